//! Table Writer: serializes a merged, derived table.
//!
//! The output header is always `tiny 2 0 named intermediary official srg mcp`. Before any record
//! is emitted its names go through the fallback rules and the completeness check:
//!
//! - a class without `mcp` takes its `srg` name, which must then equal its `named` name
//! - a method or field without `mcp` takes its `srg` name
//! - constructors carry `<init>` in every column
//! - bridges are skipped with a warning
//!
//! Any record still missing a namespace aborts the write with
//! [`crate::Error::IncompleteMapping`]. The table itself is not modified.

use std::path::Path;

use log::warn;
use strum::IntoEnumIterator;

use crate::{
    error::ResultExt,
    file,
    mapping::{ClassMapping, Mapping, MappingTable, MethodMapping, CONSTRUCTOR},
    namespace::Namespace,
    tiny::{Header, TinyWriter},
    Error::IncompleteMapping,
    Result,
};

/// Counters of one write.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WriteStats {
    /// Class records written
    pub classes: usize,
    /// Method records written
    pub methods: usize,
    /// Field records written
    pub fields: usize,
    /// Parameter records written
    pub parameters: usize,
    /// Bridge methods left out
    pub bridges_skipped: usize,
}

/// Serializes a [`MappingTable`].
#[derive(Debug, Clone, Copy)]
pub struct TableWriter {
    escaped: bool,
}

impl TableWriter {
    /// Create a new writer; `escaped` selects the `escaped-names` rule for the output.
    #[must_use]
    pub fn new(escaped: bool) -> Self {
        TableWriter { escaped }
    }

    /// The header every merged table starts with.
    #[must_use]
    pub fn header(&self) -> Header {
        let mut header = Header::new(Namespace::iter().map(|ns| ns.as_ref().to_string()));
        header.set_escaped_names(self.escaped);
        header
    }

    /// Renders `table` into a string.
    ///
    /// # Errors
    /// - [`crate::Error::IncompleteMapping`] for a record missing a namespace after fallbacks
    /// - [`crate::Error::StructuralViolation`] for a malformed constructor, or a name with a
    ///   separator in an unescaped table
    ///
    /// Errors are wrapped with the symbol's identity.
    pub fn render(&self, table: &MappingTable) -> Result<(String, WriteStats)> {
        let mut out = TinyWriter::new(&self.header());
        let mut stats = WriteStats::default();

        for class in table.classes() {
            Self::write_class(&mut out, class, &mut stats).in_symbol(|| class.named())?;

            for method in class.methods() {
                Self::write_method(&mut out, class, method, &mut stats)
                    .in_symbol(|| class.member_identity(method.mapping.named(), method.descriptor()))?;
            }

            for field in class.fields() {
                let columns = member_columns(&field.mapping)
                    .in_symbol(|| class.member_identity(field.mapping.named(), field.descriptor()))?;
                out.field(field.descriptor(), &columns)
                    .in_symbol(|| class.member_identity(field.mapping.named(), field.descriptor()))?;
                stats.fields += 1;
            }
        }

        Ok((out.finish(), stats))
    }

    /// Renders `table` and atomically replaces `path` with it.
    ///
    /// Nothing is written unless rendering succeeded.
    ///
    /// # Errors
    /// See [`TableWriter::render`] and [`crate::file::write_atomic`].
    pub fn write(&self, table: &MappingTable, path: &Path) -> Result<WriteStats> {
        let (text, stats) = self.render(table)?;
        file::write_atomic(path, text.as_bytes())?;
        Ok(stats)
    }

    fn write_class(out: &mut TinyWriter, class: &ClassMapping, stats: &mut WriteStats) -> Result<()> {
        let mapping = &class.mapping;
        let mut columns = mapping.columns();

        if mapping.get(Namespace::Mcp).is_none() {
            match mapping.get(Namespace::Srg) {
                Some(srg) if srg == mapping.named() => columns[4] = srg,
                _ => {
                    return Err(IncompleteMapping(format!(
                        "mcp is absent and srg does not fall back to named ({mapping})"
                    )))
                }
            }
        }

        check_complete(&columns, mapping)?;
        out.class(&columns)?;
        stats.classes += 1;
        Ok(())
    }

    fn write_method(
        out: &mut TinyWriter,
        class: &ClassMapping,
        method: &MethodMapping,
        stats: &mut WriteStats,
    ) -> Result<()> {
        let mapping = &method.mapping;

        let columns = if method.is_constructor() {
            for ns in [Namespace::Intermediary, Namespace::Official] {
                match mapping.get(ns) {
                    Some(CONSTRUCTOR) => {}
                    Some(other) => {
                        return Err(structural_error!(
                            "constructor is called \"{}\" in {}",
                            other,
                            ns
                        ))
                    }
                    None => return Err(IncompleteMapping(format!("constructor has no {ns} name"))),
                }
            }
            [CONSTRUCTOR; 5]
        } else if method.is_bridge() {
            warn!(
                "Skipping bridge method {}/{} (intermediary {}, named {})",
                class.mapping.get(Namespace::Intermediary).unwrap_or(class.named()),
                mapping.get(Namespace::Official).unwrap_or_default(),
                mapping.get(Namespace::Intermediary).unwrap_or_default(),
                mapping.named()
            );
            stats.bridges_skipped += 1;
            return Ok(());
        } else {
            member_columns(mapping)?
        };

        out.method(method.descriptor(), &columns)?;
        stats.methods += 1;

        let srg = method.srg_parameters();
        let mcp = method.mcp_parameters();
        for (slot, srg_name) in srg.iter().enumerate() {
            let Some(srg_name) = srg_name else {
                continue;
            };

            let mcp_name = mcp
                .get(slot)
                .and_then(|name| name.as_deref())
                .unwrap_or(srg_name);
            let named = method.named_parameter(slot).unwrap_or_default();

            out.param(slot, &[named, "", "", srg_name, mcp_name])?;
            stats.parameters += 1;
        }

        Ok(())
    }
}

/// Output columns of a method or field, `mcp` falling back to `srg`.
fn member_columns(mapping: &Mapping) -> Result<[&str; 5]> {
    let mut columns = mapping.columns();
    if mapping.get(Namespace::Mcp).is_none() {
        if let Some(srg) = mapping.get(Namespace::Srg) {
            columns[4] = srg;
        }
    }

    check_complete(&columns, mapping)?;
    Ok(columns)
}

fn check_complete(columns: &[&str; 5], mapping: &Mapping) -> Result<()> {
    let missing: Vec<String> = Namespace::iter()
        .zip(columns)
        .filter(|(_, name)| name.is_empty())
        .map(|(ns, _)| ns.to_string())
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(IncompleteMapping(format!(
            "missing {} ({mapping})",
            missing.join(", ")
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{mapping::MemberKey, tiny::TinyFile, Error};

    fn fill(mapping: &mut Mapping, names: [&str; 4]) {
        let namespaces = [
            Namespace::Intermediary,
            Namespace::Official,
            Namespace::Srg,
            Namespace::Mcp,
        ];
        for (ns, name) in namespaces.into_iter().zip(names) {
            if !name.is_empty() {
                mapping.set(ns, name).unwrap();
            }
        }
    }

    fn sample() -> MappingTable {
        let mut table = MappingTable::new();
        let class = table.class_or_insert("x/Widget");
        fill(&mut class.mapping, ["class_1", "a", "net/minecraft/Widget", ""]);

        let method = class.method_or_insert(MemberKey::new("resize", "(I)V"));
        fill(&mut method.mapping, ["method_1", "b", "func_100_b", ""]);
        method.set_named_parameter(1, "width").unwrap();
        method.set_derived(
            vec![None, Some("p_i100_1_".to_string())],
            vec![None, Some("size".to_string())],
        );

        let bridge = class.method_or_insert(MemberKey::new("compareTo", "(Ljava/lang/Object;)I"));
        fill(&mut bridge.mapping, ["c", "c", "func_200_c", ""]);

        let ctor = class.method_or_insert(MemberKey::new(CONSTRUCTOR, "()V"));
        fill(&mut ctor.mapping, [CONSTRUCTOR, CONSTRUCTOR, "", ""]);

        let field = class.field_or_insert(MemberKey::new("size", "I"));
        fill(&mut field.mapping, ["field_1", "d", "field_300_d", "size"]);
        table
    }

    #[test]
    fn render_with_fallbacks() {
        let mut table = sample();
        table
            .class_or_insert("x/Widget")
            .mapping
            .set(Namespace::Mcp, "net/minecraft/Widget")
            .unwrap();

        let (text, stats) = TableWriter::new(false).render(&table).unwrap();
        assert_eq!(
            text,
            "tiny\t2\t0\tnamed\tintermediary\tofficial\tsrg\tmcp
c\tx/Widget\tclass_1\ta\tnet/minecraft/Widget\tnet/minecraft/Widget
\tm\t(I)V\tresize\tmethod_1\tb\tfunc_100_b\tfunc_100_b
\t\tp\t1\twidth\t\t\tp_i100_1_\tsize
\tm\t()V\t<init>\t<init>\t<init>\t<init>\t<init>
\tf\tI\tsize\tfield_1\td\tfield_300_d\tsize
"
        );
        assert_eq!(
            stats,
            WriteStats {
                classes: 1,
                methods: 2,
                fields: 1,
                parameters: 1,
                bridges_skipped: 1,
            }
        );

        let reread = TinyFile::parse(&text).unwrap();
        assert_eq!(reread.classes[0].methods.len(), 2);
    }

    #[test]
    fn class_mcp_falls_back_only_to_unchanged_srg() {
        let table = sample();
        let err = TableWriter::new(false).render(&table).unwrap_err();
        assert!(matches!(err.root(), Error::IncompleteMapping(_)));
        assert!(err.to_string().starts_with("x/Widget: "));

        let mut table = MappingTable::new();
        let class = table.class_or_insert("net/minecraft/Same");
        fill(&mut class.mapping, ["class_2", "e", "net/minecraft/Same", ""]);
        let (text, _) = TableWriter::new(false).render(&table).unwrap();
        assert!(text.ends_with(
            "c\tnet/minecraft/Same\tclass_2\te\tnet/minecraft/Same\tnet/minecraft/Same\n"
        ));
    }

    #[test]
    fn incomplete_member_is_fatal() {
        let mut table = MappingTable::new();
        let class = table.class_or_insert("x/Widget");
        fill(&mut class.mapping, ["class_1", "a", "net/W", "net/W"]);
        let field = class.field_or_insert(MemberKey::new("size", "I"));
        fill(&mut field.mapping, ["field_1", "b", "", ""]);

        let err = TableWriter::new(false).render(&table).unwrap_err();
        assert!(matches!(err.root(), Error::IncompleteMapping(_)));
        assert!(err.to_string().starts_with("x/Widget#sizeI: "));
        assert!(err.to_string().contains("missing srg, mcp"));
    }

    #[test]
    fn escaped_output() {
        let mut table = MappingTable::new();
        let class = table.class_or_insert("x/Odd\tName");
        fill(&mut class.mapping, ["class_1", "a", "net/W", "net/W"]);

        assert!(TableWriter::new(false).render(&table).is_err());

        let (text, _) = TableWriter::new(true).render(&table).unwrap();
        assert!(text.starts_with("tiny\t2\t0\tnamed\tintermediary\tofficial\tsrg\tmcp\n\tescaped-names\n"));
        assert!(text.contains("c\tx/Odd\\tName\t"));
    }

    #[test]
    fn write_leaves_target_on_failure() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("merged.tiny");
        std::fs::write(&path, "previous").unwrap();

        let err = TableWriter::new(false).write(&sample(), &path).unwrap_err();
        assert!(matches!(err.root(), Error::IncompleteMapping(_)));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "previous");

        let mut table = sample();
        table
            .class_or_insert("x/Widget")
            .mapping
            .set(Namespace::Mcp, "net/minecraft/Widget")
            .unwrap();
        let stats = TableWriter::new(false).write(&table, &path).unwrap();
        assert_eq!(stats.classes, 1);
        assert!(std::fs::read_to_string(&path)
            .unwrap()
            .starts_with("tiny\t2\t0\tnamed"));
    }
}
