//! The header of a tiny v2 table.
//!
//! ```text
//! tiny	2	0	named	intermediary	official
//! 	escaped-names
//! 	some-key	some-value
//! ```
//!
//! The first line names the format, its version and the namespace columns; the first namespace is
//! the primary one and is the namespace member descriptors are written in. Properties follow at
//! depth 1 until the first class record.

use indexmap::IndexMap;

use crate::{
    namespace::Namespace,
    tiny::codec::{split_record, SEPARATOR},
    Error::UnsupportedVersion,
    Result,
};

/// Format magic at the start of every header line.
pub const MAGIC: &str = "tiny";
/// The only major version which is understood.
pub const MAJOR_VERSION: u32 = 2;
/// Minor version written by this crate.
pub const MINOR_VERSION: u32 = 0;
/// The property toggling the escape rule for the whole file.
pub const ESCAPED_NAMES: &str = "escaped-names";
/// The primary namespace plus at least one more.
const MIN_NAMESPACES: usize = 2;

/// Parsed table header: version, namespace columns and properties.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    /// Major format version, always [`MAJOR_VERSION`]
    pub major: u32,
    /// Minor format version
    pub minor: u32,
    /// Namespace columns in file order
    pub namespaces: Vec<String>,
    /// Header properties in file order, `escaped-names` included
    pub properties: IndexMap<String, Option<String>>,
}

impl Header {
    /// Creates a header for `namespaces`, without properties.
    pub fn new<I, S>(namespaces: I) -> Header
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Header {
            major: MAJOR_VERSION,
            minor: MINOR_VERSION,
            namespaces: namespaces.into_iter().map(Into::into).collect(),
            properties: IndexMap::new(),
        }
    }

    /// Parses the first line of a table.
    ///
    /// # Errors
    /// Returns [`crate::Error::UnsupportedVersion`] if the magic or major version is wrong, the
    /// minor version is not a number, or fewer than two namespaces are declared.
    pub fn parse(line: &str) -> Result<Header> {
        let parts = split_record(line, 0);

        if parts.len() < 3 || parts[0] != MAGIC {
            return Err(UnsupportedVersion(format!("not a tiny header: \"{line}\"")));
        }

        match parts[1].parse::<u32>() {
            Ok(MAJOR_VERSION) => {}
            _ => {
                return Err(UnsupportedVersion(format!(
                    "expected major version {MAJOR_VERSION}, found \"{}\"",
                    parts[1]
                )))
            }
        }

        let minor = parts[2].parse::<u32>().map_err(|_| {
            UnsupportedVersion(format!("invalid minor version \"{}\"", parts[2]))
        })?;

        let namespaces: Vec<String> = parts[3..].iter().map(|ns| (*ns).to_string()).collect();
        if namespaces.len() < MIN_NAMESPACES || namespaces.iter().any(String::is_empty) {
            return Err(UnsupportedVersion(format!(
                "expected at least {MIN_NAMESPACES} namespaces, found {namespaces:?}"
            )));
        }

        Ok(Header {
            major: MAJOR_VERSION,
            minor,
            namespaces,
            properties: IndexMap::new(),
        })
    }

    /// Returns the column of the namespace called `name`, if present.
    #[must_use]
    pub fn column(&self, name: &str) -> Option<usize> {
        self.namespaces.iter().position(|ns| ns == name)
    }

    /// Returns the column of `namespace`, if present.
    #[must_use]
    pub fn column_of(&self, namespace: Namespace) -> Option<usize> {
        self.column(namespace.as_ref())
    }

    /// The primary namespace, which member descriptors are expressed in.
    #[must_use]
    pub fn primary(&self) -> &str {
        &self.namespaces[0]
    }

    /// Returns `true` if names in this table use the escape rule.
    #[must_use]
    pub fn escaped_names(&self) -> bool {
        self.properties.contains_key(ESCAPED_NAMES)
    }

    /// Switches the escape rule on or off.
    pub fn set_escaped_names(&mut self, escaped: bool) {
        if escaped {
            self.properties.insert(ESCAPED_NAMES.to_string(), None);
        } else {
            self.properties.shift_remove(ESCAPED_NAMES);
        }
    }

    /// Renders the header line and property lines, each terminated by `\n`.
    #[must_use]
    pub fn render(&self) -> String {
        let mut out = format!("{MAGIC}{SEPARATOR}{}{SEPARATOR}{}", self.major, self.minor);
        for ns in &self.namespaces {
            out.push(SEPARATOR);
            out.push_str(ns);
        }
        out.push('\n');

        for (key, value) in &self.properties {
            out.push(SEPARATOR);
            out.push_str(key);
            if let Some(value) = value {
                out.push(SEPARATOR);
                out.push_str(value);
            }
            out.push('\n');
        }

        out
    }
}
