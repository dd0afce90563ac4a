//! Parses a complete tiny v2 table into an owned record tree.
//!
//! The tree is deliberately dumb: names are kept per column, exactly as written (after
//! unescaping), and descriptors stay in the file's primary namespace. Interpreting columns and
//! remapping descriptors is the job of [`crate::builder`].
//!
//! # Nesting contract
//!
//! | Depth | Section | Fields after the section                 | Parent       |
//! |-------|---------|------------------------------------------|--------------|
//! | 0     | `c`     | one name per namespace                   | -            |
//! | 1     | `m`/`f` | descriptor, one name per namespace       | class        |
//! | 2     | `p`     | slot, one name per namespace             | method       |
//! | 2     | `v`     | slot, start, lvt index, names            | method       |
//!
//! Comment records (`c` below depth 0) and sections this crate does not know are skipped, a
//! member outside a class or a parameter outside a method is a structural violation.

use crate::{
    error::ResultExt,
    tiny::{
        codec::{indent_of, split_record, unescape_opt},
        header::Header,
    },
    Error::{TruncatedFile, UnsupportedFeature},
    Result,
};

/// A parsed tiny v2 table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TinyFile {
    /// The header, including properties
    pub header: Header,
    /// Class records in file order
    pub classes: Vec<ClassRecord>,
}

/// A class record with its members.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassRecord {
    /// 1-based line the record was read from
    pub line: usize,
    /// One name per namespace column, blank for unknown
    pub names: Vec<String>,
    /// Method records in file order
    pub methods: Vec<MethodRecord>,
    /// Field records in file order
    pub fields: Vec<FieldRecord>,
}

/// A method record with its parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodRecord {
    /// 1-based line the record was read from
    pub line: usize,
    /// Method descriptor in the primary namespace
    pub descriptor: String,
    /// One name per namespace column, blank for unknown
    pub names: Vec<String>,
    /// Parameter records in file order
    pub params: Vec<ParamRecord>,
}

/// A field record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldRecord {
    /// 1-based line the record was read from
    pub line: usize,
    /// Field descriptor in the primary namespace
    pub descriptor: String,
    /// One name per namespace column, blank for unknown
    pub names: Vec<String>,
}

/// A method parameter record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParamRecord {
    /// 1-based line the record was read from
    pub line: usize,
    /// Local variable slot of the parameter
    pub slot: usize,
    /// One name per namespace column, blank for unknown
    pub names: Vec<String>,
}

/// Which record the following deeper lines belong to.
#[derive(Clone, Copy, PartialEq, Eq)]
enum Context {
    Header,
    Class,
    Method,
    Field,
    /// A parameter or local variable, only comments may follow
    Leaf,
    /// Inside a record this reader skips
    Unknown,
}

impl TinyFile {
    /// Parses a complete table.
    ///
    /// Both `\n` and `\r\n` line endings are accepted.
    ///
    /// # Errors
    /// - [`crate::Error::TruncatedFile`] if `text` holds no header line
    /// - [`crate::Error::UnsupportedVersion`] for a rejected header
    /// - [`crate::Error::StructuralViolation`] for a record with the wrong field count, a member
    ///   outside a class or a parameter outside a method
    /// - [`crate::Error::MalformedEscape`] for a bad escape while `escaped-names` is active
    /// - [`crate::Error::UnsupportedFeature`] for a named local variable record
    ///
    /// Every error apart from [`crate::Error::TruncatedFile`] is wrapped with its line number.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use tinymerge::tiny::TinyFile;
    ///
    /// let file = TinyFile::parse("tiny\t2\t0\tnamed\tofficial\nc\ta/Named\tb\n\tf\tI\tcount\tc\n")?;
    /// assert_eq!(file.classes[0].names, ["a/Named", "b"]);
    /// assert_eq!(file.classes[0].fields[0].descriptor, "I");
    /// # Ok::<(), tinymerge::Error>(())
    /// ```
    pub fn parse(text: &str) -> Result<TinyFile> {
        let mut lines = text
            .split('\n')
            .map(|line| line.strip_suffix('\r').unwrap_or(line))
            .enumerate()
            .map(|(index, line)| (index + 1, line));

        let header = match lines.next() {
            Some((_, line)) if !line.is_empty() => Header::parse(line).at_line(1)?,
            _ => return Err(TruncatedFile),
        };

        let mut reader = Reader {
            columns: header.namespaces.len(),
            file: TinyFile {
                header,
                classes: Vec::new(),
            },
            context: Context::Header,
        };

        for (number, line) in lines {
            if line.is_empty() {
                continue;
            }

            reader.line(number, line).at_line(number)?;
        }

        Ok(reader.file)
    }

    /// Number of namespace columns.
    #[must_use]
    pub fn columns(&self) -> usize {
        self.header.namespaces.len()
    }

    /// Iterates all method records with their owning class.
    pub fn methods(&self) -> impl Iterator<Item = (&ClassRecord, &MethodRecord)> {
        self.classes
            .iter()
            .flat_map(|class| class.methods.iter().map(move |method| (class, method)))
    }

    /// Iterates all field records with their owning class.
    pub fn fields(&self) -> impl Iterator<Item = (&ClassRecord, &FieldRecord)> {
        self.classes
            .iter()
            .flat_map(|class| class.fields.iter().map(move |field| (class, field)))
    }
}

struct Reader {
    columns: usize,
    file: TinyFile,
    context: Context,
}

impl Reader {
    fn escaped(&self) -> bool {
        self.file.header.escaped_names()
    }

    fn names(&self, parts: &[&str]) -> Result<Vec<String>> {
        let escaped = self.escaped();
        parts
            .iter()
            .map(|part| unescape_opt(part, escaped).map(|name| name.into_owned()))
            .collect()
    }

    fn expect_fields(parts: &[&str], expected: usize, what: &str) -> Result<()> {
        if parts.len() == expected {
            Ok(())
        } else {
            Err(structural_error!(
                "invalid {} declaration, expected {} fields but found {}",
                what,
                expected,
                parts.len()
            ))
        }
    }

    fn parse_slot(text: &str) -> Result<usize> {
        text.parse::<usize>()
            .map_err(|_| structural_error!("invalid local variable index \"{}\"", text))
    }

    fn line(&mut self, number: usize, line: &str) -> Result<()> {
        let indent = indent_of(line);
        let parts = split_record(line, indent);
        let section = parts[0];

        match indent {
            0 => self.top_level(number, section, &parts),
            1 => self.member(number, section, &parts),
            2 => self.parameter(number, section, &parts),
            _ => {
                // Comments on parameters and variables, nothing else lives this deep
                if self.context == Context::Header {
                    return Err(structural_error!("depth {} line inside the header", indent));
                }
                Ok(())
            }
        }
    }

    fn top_level(&mut self, number: usize, section: &str, parts: &[&str]) -> Result<()> {
        if section != "c" {
            self.context = Context::Unknown;
            return Ok(());
        }

        Self::expect_fields(parts, self.columns + 1, "class")?;
        let names = self.names(&parts[1..])?;

        self.file.classes.push(ClassRecord {
            line: number,
            names,
            methods: Vec::new(),
            fields: Vec::new(),
        });
        self.context = Context::Class;
        Ok(())
    }

    fn member(&mut self, number: usize, section: &str, parts: &[&str]) -> Result<()> {
        match (self.context, section) {
            (Context::Header, "m" | "f") => Err(structural_error!(
                "'{}' record before the first class",
                section
            )),
            (Context::Header, key) => {
                let value = parts.get(1).map(|value| (*value).to_string());
                self.file.header.properties.insert(key.to_string(), value);
                Ok(())
            }
            (Context::Unknown, _) => Ok(()),
            (_, "m" | "f") => {
                let Some(class) = self.file.classes.last_mut() else {
                    return Err(structural_error!("member declared outside of a class"));
                };
                if !matches!(self.context, Context::Class | Context::Method | Context::Field | Context::Leaf) {
                    return Err(structural_error!("member declared outside of a class"));
                }

                let is_method = section == "m";
                Self::expect_fields(
                    parts,
                    self.columns + 2,
                    if is_method { "method" } else { "field" },
                )?;

                let escaped = self.file.header.escaped_names();
                let descriptor = unescape_opt(parts[1], escaped)?.into_owned();
                let names = parts[2..]
                    .iter()
                    .map(|part| unescape_opt(part, escaped).map(|name| name.into_owned()))
                    .collect::<Result<Vec<_>>>()?;

                if is_method {
                    class.methods.push(MethodRecord {
                        line: number,
                        descriptor,
                        names,
                        params: Vec::new(),
                    });
                    self.context = Context::Method;
                } else {
                    class.fields.push(FieldRecord {
                        line: number,
                        descriptor,
                        names,
                    });
                    self.context = Context::Field;
                }
                Ok(())
            }
            (_, "p" | "v") => Err(structural_error!(
                "'{}' record at member depth",
                section
            )),
            _ => {
                // Class comments and unknown member sections
                self.context = Context::Class;
                Ok(())
            }
        }
    }

    fn parameter(&mut self, number: usize, section: &str, parts: &[&str]) -> Result<()> {
        match (self.context, section) {
            (Context::Header, _) => Err(structural_error!("depth 2 line inside the header")),
            (Context::Method | Context::Leaf, "p") => {
                Self::expect_fields(parts, self.columns + 2, "method parameter")?;
                let slot = Self::parse_slot(parts[1])?;
                let names = self.names(&parts[2..])?;

                let method = self
                    .file
                    .classes
                    .last_mut()
                    .and_then(|class| class.methods.last_mut())
                    .ok_or_else(|| structural_error!("parameter declared outside of a method"))?;

                method.params.push(ParamRecord {
                    line: number,
                    slot,
                    names,
                });
                self.context = Context::Leaf;
                Ok(())
            }
            (Context::Method | Context::Leaf, "v") => {
                Self::expect_fields(parts, self.columns + 4, "method variable")?;
                let slot = Self::parse_slot(parts[1])?;
                let names = self.names(&parts[4..])?;

                if let Some(name) = names.iter().find(|name| !name.is_empty()) {
                    return Err(UnsupportedFeature(format!(
                        "local variable \"{}\" (slot {}, start {}, lvt index {}) cannot be merged",
                        name, slot, parts[2], parts[3]
                    )));
                }

                self.context = Context::Leaf;
                Ok(())
            }
            (Context::Unknown, _) => Ok(()),
            (_, "p" | "v") => Err(structural_error!(
                "'{}' record outside of a method",
                section
            )),
            _ => Ok(()),
        }
    }
}
