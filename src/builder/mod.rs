//! Symbol Table Builder: folds source tables into one [`MappingTable`].
//!
//! Every source is described by a [`SourceSpec`]: which [`TargetSlot`] it fills and which column
//! identifies the records it talks about. Sources are applied one after another; each record is
//! looked up by its `named` identity (created on first sight) and the source's value is written
//! into the slot.
//!
//! # Descriptors
//!
//! Member descriptors in a table are written in the file's first namespace. When the key column
//! is not the first column, descriptors are first remapped through the file's own class records
//! (first column to key column). When the key is not `named`, the result is remapped once more
//! through the classes already in the table (key to `named`), and member names are translated
//! through the members already in the table.
//!
//! # Examples
//!
//! ```rust
//! use tinymerge::{builder::{SourceSpec, TableBuilder, TargetSlot}, Namespace};
//!
//! let mut builder = TableBuilder::new();
//! builder.load_str(
//!     "tiny\t2\t0\tnamed\tofficial\nc\tx/Widget\ta\n\tm\t(Lx/Widget;)V\tresize\tb\n",
//!     &SourceSpec::new(TargetSlot::SetOfficial),
//! )?;
//! builder.load_str(
//!     "tiny\t2\t0\tofficial\tsrg\nc\ta\tnet/minecraft/Widget\n\tm\t(La;)V\tb\tfunc_100_a\n",
//!     &SourceSpec::new(TargetSlot::SetSrg).keyed_by(Namespace::Official),
//! )?;
//!
//! let table = builder.finish();
//! let class = table.class("x/Widget").unwrap();
//! let method = class.method("resize", "(Lx/Widget;)V").unwrap();
//! assert_eq!(method.mapping.get(Namespace::Srg), Some("func_100_a"));
//! # Ok::<(), tinymerge::Error>(())
//! ```

mod rekey;
mod source;

use std::{
    collections::{HashMap, HashSet},
    path::Path,
};

use log::{debug, info};

use crate::{
    descriptor,
    error::ResultExt,
    file,
    mapping::{MappingTable, MemberKey},
    namespace::Namespace,
    tiny::{ClassRecord, TinyFile},
    Error::DuplicateDeclaration,
    Result,
};

use rekey::Rekey;
pub use source::{SourceSpec, TargetSlot};

/// What one source contributed to the table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SourceStats {
    /// Class records applied
    pub classes: usize,
    /// Method records applied
    pub methods: usize,
    /// Field records applied
    pub fields: usize,
    /// Named parameters attached
    pub parameters: usize,
    /// Records whose key could not be translated into `named`
    pub unmatched: usize,
}

/// Identities already declared by the source being applied.
#[derive(Default)]
struct Seen {
    classes: HashSet<String>,
    methods: HashSet<(String, MemberKey)>,
    fields: HashSet<(String, MemberKey)>,
}

/// Builds a [`MappingTable`] from source tables.
#[derive(Debug, Default)]
pub struct TableBuilder {
    table: MappingTable,
}

impl TableBuilder {
    /// Creates a builder with an empty table.
    #[must_use]
    pub fn new() -> TableBuilder {
        TableBuilder::default()
    }

    /// The table merged so far.
    #[must_use]
    pub fn table(&self) -> &MappingTable {
        &self.table
    }

    /// Returns the merged table.
    #[must_use]
    pub fn finish(self) -> MappingTable {
        self.table
    }

    /// Reads the table at `path` and applies it.
    ///
    /// # Errors
    /// Any error of [`TinyFile::parse`] or [`TableBuilder::apply`], wrapped with `path`.
    pub fn load_file(&mut self, path: &Path, spec: &SourceSpec) -> Result<SourceStats> {
        let source = file::read_with(path, TinyFile::parse)?;
        let stats = self.apply(&source, spec).in_file(path)?;

        info!(
            "Merged {} ({} -> {:?}): {} classes, {} methods, {} fields, {} parameters",
            path.display(),
            spec.key,
            spec.slot,
            stats.classes,
            stats.methods,
            stats.fields,
            stats.parameters
        );
        Ok(stats)
    }

    /// Parses `text` and applies it.
    ///
    /// # Errors
    /// Any error of [`TinyFile::parse`] or [`TableBuilder::apply`].
    pub fn load_str(&mut self, text: &str, spec: &SourceSpec) -> Result<SourceStats> {
        let source = TinyFile::parse(text)?;
        self.apply(&source, spec)
    }

    /// Folds a parsed source into the table.
    ///
    /// # Errors
    /// - [`crate::Error::StructuralViolation`] if the header lacks the key or target namespace
    /// - [`crate::Error::DuplicateDeclaration`] if the source declares a class or member twice,
    ///   or a value conflicts with one merged from an earlier source
    /// - [`crate::Error::InvalidDescriptor`] for a descriptor that cannot be remapped
    ///
    /// Errors are wrapped with the record's line and symbol identity.
    pub fn apply(&mut self, source: &TinyFile, spec: &SourceSpec) -> Result<SourceStats> {
        let header = &source.header;
        let target = spec.slot.namespace();

        let Some(key_col) = header.column_of(spec.key) else {
            return Err(structural_error!(
                "key namespace {} is not declared in {:?}",
                spec.key,
                header.namespaces
            ));
        };
        let Some(target_col) = header.column_of(target) else {
            return Err(structural_error!(
                "target namespace {} is not declared in {:?}",
                target,
                header.namespaces
            ));
        };

        // First column to key column, for descriptors
        let descriptors: Option<HashMap<&str, &str>> = (key_col != 0).then(|| {
            source
                .classes
                .iter()
                .filter(|class| !class.names[0].is_empty() && !class.names[key_col].is_empty())
                .map(|class| (class.names[0].as_str(), class.names[key_col].as_str()))
                .collect()
        });

        let rekey = (spec.key != Namespace::PRIMARY).then(|| Rekey::new(&self.table, spec.key));

        let mut context = Apply {
            spec,
            key_col,
            target_col,
            descriptors,
            rekey,
            seen: Seen::default(),
            stats: SourceStats::default(),
        };

        for class in &source.classes {
            context.class(&mut self.table, class)?;
        }

        if spec.slot == TargetSlot::SetNamedParameters {
            self.table.escaped_names = header.escaped_names();
        }

        debug!(
            "{:?} keyed by {}: {} unmatched records",
            spec.slot, spec.key, context.stats.unmatched
        );
        Ok(context.stats)
    }
}

/// State of one [`TableBuilder::apply`] call.
struct Apply<'a> {
    spec: &'a SourceSpec,
    key_col: usize,
    target_col: usize,
    descriptors: Option<HashMap<&'a str, &'a str>>,
    rekey: Option<Rekey>,
    seen: Seen,
    stats: SourceStats,
}

impl Apply<'_> {
    fn class(&mut self, table: &mut MappingTable, class: &ClassRecord) -> Result<()> {
        let key_name = &class.names[self.key_col];
        if key_name.is_empty() {
            return Ok(());
        }

        let named = match &self.rekey {
            Some(rekey) => match rekey.class(key_name) {
                Some(named) => named.to_string(),
                None => {
                    debug!("No named class for {} {}", self.spec.key, key_name);
                    self.stats.unmatched += 1;
                    return Ok(());
                }
            },
            None => key_name.clone(),
        };

        if !self.seen.classes.insert(named.clone()) {
            return Err(DuplicateDeclaration("class declared twice".to_string()))
                .in_symbol(|| named.as_str())
                .at_line(class.line);
        }

        if self.spec.slot != TargetSlot::SetNamedParameters {
            let target = &class.names[self.target_col];
            let value = if target.is_empty() && self.spec.fill_blanks {
                key_name
            } else {
                target
            };

            let mapping = &mut table.class_or_insert(&named).mapping;
            if !value.is_empty() {
                mapping
                    .set(self.spec.slot.namespace(), value.as_str())
                    .in_symbol(|| named.as_str())
                    .at_line(class.line)?;
            }
            self.stats.classes += 1;
        }

        for method in &class.methods {
            let Some(key) = self
                .member_key(&named, &method.names, &method.descriptor, true)
                .at_line(method.line)?
            else {
                continue;
            };

            let identity = || format!("{}#{}{}", named, key.name, key.descriptor);
            if !self.seen.methods.insert((named.clone(), key.clone())) {
                return Err(DuplicateDeclaration("method declared twice".to_string()))
                    .in_symbol(identity)
                    .at_line(method.line);
            }

            if self.spec.slot == TargetSlot::SetNamedParameters {
                let params: Vec<(usize, usize, &str)> = method
                    .params
                    .iter()
                    .map(|param| (param.line, param.slot, param.names[self.target_col].as_str()))
                    .filter(|(_, _, name)| !name.is_empty())
                    .collect();
                if params.is_empty() {
                    continue;
                }

                let mapping = table.class_or_insert(&named).method_or_insert(key.clone());
                for (line, slot, name) in params {
                    mapping
                        .set_named_parameter(slot, name)
                        .in_symbol(identity)
                        .at_line(line)?;
                    self.stats.parameters += 1;
                }
                self.stats.methods += 1;
                continue;
            }

            let value = &method.names[self.target_col];
            let mapping = table.class_or_insert(&named).method_or_insert(key.clone());
            if !value.is_empty() {
                mapping
                    .mapping
                    .set(self.spec.slot.namespace(), value.as_str())
                    .in_symbol(identity)
                    .at_line(method.line)?;
            }
            self.stats.methods += 1;
        }

        if self.spec.slot == TargetSlot::SetNamedParameters {
            return Ok(());
        }

        for field in &class.fields {
            let Some(key) = self
                .member_key(&named, &field.names, &field.descriptor, false)
                .at_line(field.line)?
            else {
                continue;
            };

            let identity = || format!("{}#{}{}", named, key.name, key.descriptor);
            if !self.seen.fields.insert((named.clone(), key.clone())) {
                return Err(DuplicateDeclaration("field declared twice".to_string()))
                    .in_symbol(identity)
                    .at_line(field.line);
            }

            let value = &field.names[self.target_col];
            let mapping = table.class_or_insert(&named).field_or_insert(key.clone());
            if !value.is_empty() {
                mapping
                    .mapping
                    .set(self.spec.slot.namespace(), value.as_str())
                    .in_symbol(identity)
                    .at_line(field.line)?;
            }
            self.stats.fields += 1;
        }

        Ok(())
    }

    /// Resolves the `named` identity of a member record, `None` if it cannot be matched.
    fn member_key(
        &mut self,
        owner: &str,
        names: &[String],
        descriptor: &str,
        is_method: bool,
    ) -> Result<Option<MemberKey>> {
        let key_name = &names[self.key_col];
        if key_name.is_empty() {
            return Ok(None);
        }

        let descriptor = match &self.descriptors {
            Some(lookup) => descriptor::remap(descriptor, |name| lookup.get(name).copied())?,
            None => descriptor.to_string(),
        };

        let Some(rekey) = &self.rekey else {
            return Ok(Some(MemberKey::new(key_name.as_str(), descriptor)));
        };

        let descriptor = rekey.descriptor(&descriptor)?;
        let named = if is_method {
            rekey.method(owner, key_name, &descriptor)
        } else {
            rekey.field(owner, key_name, &descriptor)
        };

        match named {
            Some(named) => Ok(Some(MemberKey::new(named, descriptor))),
            None => {
                debug!(
                    "No named member for {}#{}{} ({})",
                    owner, key_name, descriptor, self.spec.key
                );
                self.stats.unmatched += 1;
                Ok(None)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    const NAMED: &str = "tiny\t2\t0\tnamed\tintermediary\tofficial
\tescaped-names
c\tx/Widget\tclass_1\ta
\tm\t(Lx/Widget;J)V\tmerge\tmethod_1\tb
\t\tp\t1\tother\t\t
\t\tp\t2\tweight\t\t
\tm\t()V\t<init>\t<init>\t<init>
\tf\tI\tsize\tfield_1\tc
c\tx/Other\tclass_2\td
";

    fn named_table() -> TableBuilder {
        let mut builder = TableBuilder::new();
        builder
            .load_str(NAMED, &SourceSpec::new(TargetSlot::SetOfficial))
            .unwrap();
        builder
            .load_str(NAMED, &SourceSpec::new(TargetSlot::SetIntermediary))
            .unwrap();
        builder
            .load_str(NAMED, &SourceSpec::new(TargetSlot::SetNamedParameters))
            .unwrap();
        builder
    }

    #[test]
    fn fold_named_source() {
        let builder = named_table();
        let table = builder.table();
        assert_eq!(table.len(), 2);
        assert!(table.escaped_names);

        let widget = table.class("x/Widget").unwrap();
        assert_eq!(widget.mapping.get(Namespace::Official), Some("a"));
        assert_eq!(widget.mapping.get(Namespace::Intermediary), Some("class_1"));
        assert_eq!(widget.method_count(), 2);

        let merge = widget.method("merge", "(Lx/Widget;J)V").unwrap();
        assert_eq!(merge.mapping.get(Namespace::Official), Some("b"));
        assert_eq!(merge.named_parameter(1), Some("other"));
        assert_eq!(merge.named_parameter(2), Some("weight"));

        let size = widget.field("size", "I").unwrap();
        assert_eq!(size.mapping.get(Namespace::Intermediary), Some("field_1"));
    }

    #[test]
    fn descriptors_follow_key_column() {
        // First column is official, key column is named
        let srg = "tiny\t2\t0\tofficial\tnamed\tsrg
c\ta\tx/Widget\tnet/minecraft/Widget
\tm\t(La;J)V\tb\tmerge\tfunc_1000_a
\tf\tI\tc\tsize\tfield_2000_b
";
        let mut builder = named_table();
        let stats = builder
            .load_str(srg, &SourceSpec::new(TargetSlot::SetSrg))
            .unwrap();
        assert_eq!(stats.methods, 1);
        assert_eq!(stats.fields, 1);

        let table = builder.finish();
        let widget = table.class("x/Widget").unwrap();
        assert_eq!(widget.mapping.get(Namespace::Srg), Some("net/minecraft/Widget"));
        let merge = widget.method("merge", "(Lx/Widget;J)V").unwrap();
        assert_eq!(merge.mapping.get(Namespace::Srg), Some("func_1000_a"));
        assert_eq!(widget.method_count(), 2);
    }

    #[test]
    fn source_keyed_by_official() {
        let srg = "tiny\t2\t0\tofficial\tsrg
c\ta\tnet/minecraft/Widget
\tm\t(La;J)V\tb\tfunc_1000_a
\tf\tI\tc\tfield_2000_b
c\tzz\tnet/minecraft/Unknown
";
        let mut builder = named_table();
        let stats = builder
            .load_str(
                srg,
                &SourceSpec::new(TargetSlot::SetSrg).keyed_by(Namespace::Official),
            )
            .unwrap();
        assert_eq!(stats.unmatched, 1);
        assert_eq!(stats.classes, 1);

        let table = builder.finish();
        let widget = table.class("x/Widget").unwrap();
        assert_eq!(
            widget
                .method("merge", "(Lx/Widget;J)V")
                .unwrap()
                .mapping
                .get(Namespace::Srg),
            Some("func_1000_a")
        );
        assert_eq!(
            widget.field("size", "I").unwrap().mapping.get(Namespace::Srg),
            Some("field_2000_b")
        );
        assert!(table.class("zz").is_none());
    }

    #[test]
    fn blank_class_names_fill_from_key() {
        let mcp = "tiny\t2\t0\tnamed\tmcp
c\tx/Widget\t
\tm\t(Lx/Widget;J)V\tmerge\tcombine
\tf\tI\tsize\t
c\tx/Other\tnet/Other
";
        let mut builder = named_table();
        builder
            .load_str(mcp, &SourceSpec::new(TargetSlot::SetMcp).fill_blank_classes(true))
            .unwrap();

        let table = builder.finish();
        let widget = table.class("x/Widget").unwrap();
        assert_eq!(widget.mapping.get(Namespace::Mcp), Some("x/Widget"));
        assert_eq!(
            widget.field("size", "I").unwrap().mapping.get(Namespace::Mcp),
            None
        );
        assert_eq!(
            table.class("x/Other").unwrap().mapping.get(Namespace::Mcp),
            Some("net/Other")
        );
    }

    #[test]
    fn duplicate_in_one_source() {
        let text = "tiny\t2\t0\tnamed\tofficial
c\tx/Widget\ta
\tm\t()V\trun\tb
\tm\t()V\trun\tc
";
        let mut builder = TableBuilder::new();
        let err = builder
            .load_str(text, &SourceSpec::new(TargetSlot::SetOfficial))
            .unwrap_err();

        assert!(matches!(err, Error::AtLine { line: 4, .. }));
        assert!(matches!(err.root(), Error::DuplicateDeclaration(_)));
        assert!(err.to_string().contains("x/Widget#run()V"));
    }

    #[test]
    fn duplicate_class_in_one_source() {
        let text = "tiny\t2\t0\tnamed\tofficial\nc\tx/Widget\ta\nc\tx/Widget\ta\n";
        let mut builder = TableBuilder::new();
        let err = builder
            .load_str(text, &SourceSpec::new(TargetSlot::SetOfficial))
            .unwrap_err();
        assert!(matches!(err.root(), Error::DuplicateDeclaration(_)));
    }

    #[test]
    fn conflicting_sources() {
        let first = "tiny\t2\t0\tnamed\tsrg\nc\tx/Widget\tnet/A\n";
        let second = "tiny\t2\t0\tnamed\tsrg\nc\tx/Widget\tnet/B\n";
        let spec = SourceSpec::new(TargetSlot::SetSrg);

        let mut builder = TableBuilder::new();
        builder.load_str(first, &spec).unwrap();
        builder.load_str(first, &spec).unwrap();
        let err = builder.load_str(second, &spec).unwrap_err();
        assert!(matches!(err.root(), Error::DuplicateDeclaration(_)));
    }

    #[test]
    fn missing_namespace_column() {
        let text = "tiny\t2\t0\tnamed\tofficial\n";
        let mut builder = TableBuilder::new();
        let err = builder
            .load_str(text, &SourceSpec::new(TargetSlot::SetSrg))
            .unwrap_err();
        assert!(matches!(err, Error::StructuralViolation(_)));
    }

    #[test]
    fn load_file_wraps_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.tiny");
        std::fs::write(&path, "tiny\t2\t0\tnamed\tofficial\nc\tonly\n").unwrap();

        let mut builder = TableBuilder::new();
        let err = builder
            .load_file(&path, &SourceSpec::new(TargetSlot::SetOfficial))
            .unwrap_err();
        assert!(matches!(err, Error::InFile { .. }));
        assert!(matches!(err.root(), Error::StructuralViolation(_)));
        assert!(err.to_string().contains("line 2"));
    }
}
