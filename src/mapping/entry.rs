use std::fmt;

use strum::IntoEnumIterator;

use crate::{namespace::Namespace, Error::DuplicateDeclaration, Result};

/// One identifier across every [`Namespace`].
///
/// The `named` value is the merge key, it is fixed at creation. Every other slot starts absent
/// and is filled by the sources as they are merged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mapping {
    named: String,
    intermediary: Option<String>,
    official: Option<String>,
    srg: Option<String>,
    mcp: Option<String>,
}

impl Mapping {
    /// Creates a mapping which only knows its `named` key.
    #[must_use]
    pub fn new(named: impl Into<String>) -> Mapping {
        Mapping {
            named: named.into(),
            intermediary: None,
            official: None,
            srg: None,
            mcp: None,
        }
    }

    /// The merge key.
    #[must_use]
    pub fn named(&self) -> &str {
        &self.named
    }

    /// Returns the value of `namespace`, if filled.
    #[must_use]
    pub fn get(&self, namespace: Namespace) -> Option<&str> {
        match namespace {
            Namespace::Named => Some(&self.named),
            Namespace::Intermediary => self.intermediary.as_deref(),
            Namespace::Official => self.official.as_deref(),
            Namespace::Srg => self.srg.as_deref(),
            Namespace::Mcp => self.mcp.as_deref(),
        }
    }

    fn slot_mut(&mut self, namespace: Namespace) -> Option<&mut Option<String>> {
        match namespace {
            Namespace::Named => None,
            Namespace::Intermediary => Some(&mut self.intermediary),
            Namespace::Official => Some(&mut self.official),
            Namespace::Srg => Some(&mut self.srg),
            Namespace::Mcp => Some(&mut self.mcp),
        }
    }

    /// Fills the slot of `namespace` with `value`.
    ///
    /// Writing the value a slot already holds is a no-op. For [`Namespace::Named`] the value must
    /// equal the key.
    ///
    /// # Errors
    /// Returns [`crate::Error::DuplicateDeclaration`] if the slot already holds a different value.
    pub fn set(&mut self, namespace: Namespace, value: impl Into<String>) -> Result<()> {
        let value = value.into();
        let named = self.named.clone();

        let Some(slot) = self.slot_mut(namespace) else {
            if value == named {
                return Ok(());
            }
            return Err(DuplicateDeclaration(format!(
                "cannot rename key \"{named}\" to \"{value}\""
            )));
        };

        if let Some(existing) = slot.as_deref() {
            if existing != value {
                return Err(DuplicateDeclaration(format!(
                    "{namespace} of \"{named}\" is already \"{existing}\", refusing \"{value}\""
                )));
            }
            return Ok(());
        }

        *slot = Some(value);
        Ok(())
    }

    /// Returns `true` once every namespace is filled.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        Namespace::iter().all(|ns| self.get(ns).is_some())
    }

    /// The namespaces which are still absent.
    #[must_use]
    pub fn missing(&self) -> Vec<Namespace> {
        Namespace::iter().filter(|ns| self.get(*ns).is_none()).collect()
    }

    /// All five values in output column order, absent ones blank.
    #[must_use]
    pub fn columns(&self) -> [&str; 5] {
        [
            self.named.as_str(),
            self.intermediary.as_deref().unwrap_or_default(),
            self.official.as_deref().unwrap_or_default(),
            self.srg.as_deref().unwrap_or_default(),
            self.mcp.as_deref().unwrap_or_default(),
        ]
    }
}

impl fmt::Display for Mapping {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for ns in Namespace::iter() {
            if !first {
                write!(f, ", ")?;
            }
            first = false;
            write!(f, "{ns}={}", self.get(ns).unwrap_or("<absent>"))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    #[test]
    fn fill_slots() {
        let mut mapping = Mapping::new("net/example/Widget");
        assert_eq!(mapping.get(Namespace::Named), Some("net/example/Widget"));
        assert_eq!(mapping.missing().len(), 4);

        mapping.set(Namespace::Official, "a").unwrap();
        mapping.set(Namespace::Official, "a").unwrap();
        mapping.set(Namespace::Intermediary, "class_1").unwrap();
        mapping.set(Namespace::Srg, "net/minecraft/Widget").unwrap();
        assert_eq!(mapping.missing(), [Namespace::Mcp]);
        assert!(!mapping.is_complete());

        mapping.set(Namespace::Mcp, "net/minecraft/Widget").unwrap();
        assert!(mapping.is_complete());
        assert_eq!(
            mapping.columns(),
            [
                "net/example/Widget",
                "class_1",
                "a",
                "net/minecraft/Widget",
                "net/minecraft/Widget"
            ]
        );
    }

    #[test]
    fn conflicting_value_is_duplicate() {
        let mut mapping = Mapping::new("x");
        mapping.set(Namespace::Srg, "one").unwrap();
        let err = mapping.set(Namespace::Srg, "two").unwrap_err();
        assert!(matches!(err, Error::DuplicateDeclaration(_)));
        assert_eq!(mapping.get(Namespace::Srg), Some("one"));
    }

    #[test]
    fn named_is_immutable() {
        let mut mapping = Mapping::new("x");
        mapping.set(Namespace::Named, "x").unwrap();
        assert!(mapping.set(Namespace::Named, "y").is_err());
        assert_eq!(mapping.named(), "x");
    }

    #[test]
    fn display_lists_absent() {
        let mapping = Mapping::new("x");
        assert_eq!(
            mapping.to_string(),
            "named=x, intermediary=<absent>, official=<absent>, srg=<absent>, mcp=<absent>"
        );
    }
}
