use std::collections::HashMap;

use crate::{descriptor, error::ResultExt, Result};

/// Member indices of constructors.
///
/// Lines read `<index> <owner> <descriptor>`, with owner and descriptor in the `srg`
/// namespace. Descriptors are remapped into `named` while loading, so entries are keyed by
/// `(srg owner, named descriptor)`, which is how the deriver sees constructors.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConstructorIndices {
    indices: HashMap<(String, String), u32>,
}

impl ConstructorIndices {
    /// Parses a constructor index list.
    ///
    /// `srg_to_named` maps `srg` class names to `named` ones; classes it does not know are kept.
    ///
    /// # Errors
    /// Returns [`crate::Error::InvalidAuxiliary`], wrapped with the line number, for a line
    /// without three fields, a non-numeric index, or a key listed twice. Descriptor errors are
    /// reported as [`crate::Error::InvalidDescriptor`].
    ///
    /// # Examples
    ///
    /// ```rust
    /// use std::collections::HashMap;
    /// use tinymerge::auxiliary::ConstructorIndices;
    ///
    /// let lookup = HashMap::from([("net/A".to_string(), "x/Alpha".to_string())]);
    /// let ctors = ConstructorIndices::parse("1234 net/B (Lnet/A;I)V\n", &lookup)?;
    /// assert_eq!(ctors.get("net/B", "(Lx/Alpha;I)V"), Some(1234));
    /// # Ok::<(), tinymerge::Error>(())
    /// ```
    pub fn parse(text: &str, srg_to_named: &HashMap<String, String>) -> Result<ConstructorIndices> {
        let mut indices = HashMap::new();

        for (index, line) in text.lines().enumerate() {
            Self::parse_line(line.trim_end(), srg_to_named, &mut indices).at_line(index + 1)?;
        }

        Ok(ConstructorIndices { indices })
    }

    fn parse_line(
        line: &str,
        srg_to_named: &HashMap<String, String>,
        indices: &mut HashMap<(String, String), u32>,
    ) -> Result<()> {
        if line.is_empty() {
            return Ok(());
        }

        let parts: Vec<&str> = line.split(' ').collect();
        let [number, owner, desc] = parts[..] else {
            return Err(auxiliary_error!(
                "expected \"<index> <owner> <descriptor>\", found \"{}\"",
                line
            ));
        };

        if number.is_empty() || !number.bytes().all(|b| b.is_ascii_digit()) {
            return Err(auxiliary_error!("invalid constructor index \"{}\"", number));
        }
        let number = number
            .parse::<u32>()
            .map_err(|_| auxiliary_error!("constructor index {} is out of range", number))?;

        let desc = descriptor::remap(desc, |name| srg_to_named.get(name).map(String::as_str))?;
        let key = (owner.to_string(), desc);

        if let Some(existing) = indices.get(&key) {
            return Err(auxiliary_error!(
                "duplicate constructor {}{}: {} and {}",
                key.0,
                key.1,
                existing,
                number
            ));
        }

        indices.insert(key, number);
        Ok(())
    }

    /// Index of the constructor of `owner` (srg) with the `named` descriptor `descriptor`.
    #[must_use]
    pub fn get(&self, owner: &str, descriptor: &str) -> Option<u32> {
        self.indices
            .get(&(owner.to_string(), descriptor.to_string()))
            .copied()
    }

    /// Number of known constructors.
    #[must_use]
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    /// Returns `true` if no constructor is known.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    fn lookup() -> HashMap<String, String> {
        HashMap::from([
            ("net/minecraft/A".to_string(), "x/Alpha".to_string()),
            ("net/minecraft/B".to_string(), "x/Beta".to_string()),
        ])
    }

    #[test]
    fn parse_and_remap() {
        let text = "100 net/minecraft/A ()V\n\n101 net/minecraft/A (Lnet/minecraft/B;J)V\r\n102 net/minecraft/B (Ljava/lang/String;)V\n";
        let ctors = ConstructorIndices::parse(text, &lookup()).unwrap();

        assert_eq!(ctors.len(), 3);
        assert_eq!(ctors.get("net/minecraft/A", "()V"), Some(100));
        assert_eq!(ctors.get("net/minecraft/A", "(Lx/Beta;J)V"), Some(101));
        assert_eq!(ctors.get("net/minecraft/B", "(Ljava/lang/String;)V"), Some(102));
        assert_eq!(ctors.get("x/Alpha", "()V"), None);
    }

    #[test]
    fn duplicate_key() {
        let text = "100 net/minecraft/A (Lnet/minecraft/B;)V\n101 net/minecraft/A (Lx/Beta;)V\n";
        let err = ConstructorIndices::parse(text, &lookup()).unwrap_err();
        assert!(matches!(err, Error::AtLine { line: 2, .. }));
        assert!(matches!(err.root(), Error::InvalidAuxiliary(_)));
    }

    #[test]
    fn malformed_lines() {
        for text in ["100 net/minecraft/A", "x1 net/A ()V", "1 a ()V extra", "99999999999 a ()V"] {
            let err = ConstructorIndices::parse(text, &lookup()).unwrap_err();
            assert!(matches!(err.root(), Error::InvalidAuxiliary(_)), "{text}");
        }

        let err = ConstructorIndices::parse("1 a (La)V", &lookup()).unwrap_err();
        assert!(matches!(err.root(), Error::InvalidDescriptor(_)));
    }
}
