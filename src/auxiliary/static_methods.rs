use std::collections::BTreeSet;

use crate::{error::ResultExt, Result};

/// Methods without a receiver, by `srg` name.
///
/// One name per line, blank lines are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StaticMethods {
    names: BTreeSet<String>,
}

impl StaticMethods {
    /// Parses a static method list.
    ///
    /// # Errors
    /// Returns [`crate::Error::InvalidAuxiliary`], wrapped with the line number, for a line
    /// holding more than one name.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use tinymerge::auxiliary::StaticMethods;
    ///
    /// let statics = StaticMethods::parse("func_100_a\n\nfunc_200_b\r\n")?;
    /// assert!(statics.contains("func_200_b"));
    /// assert_eq!(statics.len(), 2);
    /// # Ok::<(), tinymerge::Error>(())
    /// ```
    pub fn parse(text: &str) -> Result<StaticMethods> {
        let mut names = BTreeSet::new();

        for (index, line) in text.lines().enumerate() {
            let name = line.trim();
            if name.is_empty() {
                continue;
            }

            if name.contains(char::is_whitespace) {
                return Err(auxiliary_error!("expected one method name, found \"{}\"", name))
                    .at_line(index + 1);
            }

            names.insert(name.to_string());
        }

        Ok(StaticMethods { names })
    }

    /// Returns `true` if `name` is listed.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    /// Number of listed methods.
    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Returns `true` if nothing is listed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for StaticMethods {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        StaticMethods {
            names: iter.into_iter().map(Into::into).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    #[test]
    fn parse_skips_blank_lines() {
        let statics = StaticMethods::parse("\n  func_1_a  \n\n").unwrap();
        assert_eq!(statics.len(), 1);
        assert!(statics.contains("func_1_a"));
        assert!(!statics.contains("func_2_b"));

        assert!(StaticMethods::parse("").unwrap().is_empty());
    }

    #[test]
    fn parse_rejects_two_names() {
        let err = StaticMethods::parse("func_1_a\nfunc_2_b func_3_c\n").unwrap_err();
        assert!(matches!(err, Error::AtLine { line: 2, .. }));
        assert!(matches!(err.root(), Error::InvalidAuxiliary(_)));
    }
}
