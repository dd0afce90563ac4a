use std::fmt;

use crate::{
    auxiliary::ParameterNames,
    config::{IndexEncoding, MergeConfig, UnnumberedPolicy},
    mapping::CONSTRUCTOR,
    Error::UnresolvedMemberIndex,
    Result,
};

/// Prefix of numbered `srg` method names (`func_1234_a`).
const FUNCTION_PREFIX: &str = "func_";

/// The member index parameter names are derived from.
///
/// Rendered as the prefix of every synthesized parameter name: `p_1234`, `p_i1234` or
/// `p_equals`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum MemberIndex {
    /// A numbered method, `p_<n>`
    Numbered(u32),
    /// A numbered method of the historical low range or a constructor, `p_i<n>`
    Indexed(u32),
    /// A method without a number, identified by its name, `p_<name>`
    Named(String),
}

impl MemberIndex {
    /// The name of the parameter at `slot`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use tinymerge::params::MemberIndex;
    ///
    /// assert_eq!(MemberIndex::Numbered(12345).synthesize(0), "p_12345_0_");
    /// assert_eq!(MemberIndex::Indexed(999).synthesize(2), "p_i999_2_");
    /// ```
    #[must_use]
    pub fn synthesize(&self, slot: usize) -> String {
        format!("{self}_{slot}_")
    }

    /// Parses the index part of a parameter name table entry (`p_1234`, `p_i1234`).
    ///
    /// Only numeric indices are accepted.
    #[must_use]
    pub fn parse_prefix(text: &str) -> Option<MemberIndex> {
        let rest = text.strip_prefix("p_")?;
        let (indexed, digits) = match rest.strip_prefix('i') {
            Some(digits) => (true, digits),
            None => (false, rest),
        };

        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }

        let number = digits.parse::<u32>().ok()?;
        Some(if indexed {
            MemberIndex::Indexed(number)
        } else {
            MemberIndex::Numbered(number)
        })
    }

    /// Resolves the index of a method from its `srg` name.
    ///
    /// `func_<n>_<suffix>` names are numbered and encoded as `config.index_encoding` demands,
    /// anything else follows `config.unnumbered_methods`.
    ///
    /// # Errors
    /// Returns [`crate::Error::UnresolvedMemberIndex`] for a malformed `func_` name, or an
    /// unnumbered name under [`UnnumberedPolicy::Reject`].
    pub fn for_method(
        srg: &str,
        config: &MergeConfig,
        names: &ParameterNames,
    ) -> Result<MemberIndex> {
        let Some(rest) = srg.strip_prefix(FUNCTION_PREFIX) else {
            if srg.starts_with(CONSTRUCTOR) {
                return Err(UnresolvedMemberIndex(format!(
                    "constructor \"{srg}\" needs a constructor index"
                )));
            }

            return match config.unnumbered_methods {
                UnnumberedPolicy::NameAsIndex => Ok(MemberIndex::Named(srg.to_string())),
                UnnumberedPolicy::Reject => Err(UnresolvedMemberIndex(format!(
                    "\"{srg}\" carries no method number"
                ))),
            };
        };

        let number = rest
            .split_once('_')
            .and_then(|(digits, _)| digits.parse::<u32>().ok())
            .ok_or_else(|| {
                UnresolvedMemberIndex(format!("malformed method number in \"{srg}\""))
            })?;

        Ok(Self::encode(number, config.index_encoding, names))
    }

    /// Applies the configured encoding to a method number.
    #[must_use]
    pub fn encode(number: u32, encoding: IndexEncoding, names: &ParameterNames) -> MemberIndex {
        let threshold = match encoding {
            IndexEncoding::Threshold(threshold) => threshold,
            IndexEncoding::ParameterTable { fallback } => {
                if names.contains(&MemberIndex::Indexed(number)) {
                    return MemberIndex::Indexed(number);
                }
                if names.contains(&MemberIndex::Numbered(number)) {
                    return MemberIndex::Numbered(number);
                }
                fallback
            }
        };

        if number < threshold {
            MemberIndex::Indexed(number)
        } else {
            MemberIndex::Numbered(number)
        }
    }
}

impl fmt::Display for MemberIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MemberIndex::Numbered(number) => write!(f, "p_{number}"),
            MemberIndex::Indexed(number) => write!(f, "p_i{number}"),
            MemberIndex::Named(name) => write!(f, "p_{name}"),
        }
    }
}

/// The class-qualified identity of a constructor, `<init><owner>`.
///
/// Constructors are class scoped in the `srg` scheme: this identity, rather than the bare
/// `<init>`, is what the constructor index table is consulted with.
#[must_use]
pub fn qualified_constructor(owner_srg: &str) -> String {
    format!("{CONSTRUCTOR}{owner_srg}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    #[test]
    fn threshold_encoding() {
        let config = MergeConfig::default();
        let names = ParameterNames::default();

        assert_eq!(
            MemberIndex::for_method("func_12345_a", &config, &names).unwrap(),
            MemberIndex::Indexed(12345)
        );
        assert_eq!(
            MemberIndex::for_method("func_70000_b", &config, &names).unwrap(),
            MemberIndex::Numbered(70000)
        );
        assert_eq!(
            MemberIndex::for_method("func_213345_c_", &config, &names)
                .unwrap()
                .to_string(),
            "p_213345"
        );
    }

    #[test]
    fn table_encoding() {
        let config = MergeConfig {
            index_encoding: IndexEncoding::ParameterTable { fallback: 70000 },
            ..MergeConfig::default()
        };
        let names =
            ParameterNames::parse("param,name,side\np_100_1_,value,0\np_i200_1_,other,0\n").unwrap();

        assert_eq!(
            MemberIndex::for_method("func_100_a", &config, &names).unwrap(),
            MemberIndex::Numbered(100)
        );
        assert_eq!(
            MemberIndex::for_method("func_200_a", &config, &names).unwrap(),
            MemberIndex::Indexed(200)
        );
        assert_eq!(
            MemberIndex::for_method("func_300_a", &config, &names).unwrap(),
            MemberIndex::Indexed(300)
        );
    }

    #[test]
    fn unnumbered_policy() {
        let names = ParameterNames::default();

        let err = MemberIndex::for_method("equals", &MergeConfig::strict(), &names).unwrap_err();
        assert!(matches!(err, Error::UnresolvedMemberIndex(_)));

        let index = MemberIndex::for_method("equals", &MergeConfig::lenient(), &names).unwrap();
        assert_eq!(index.synthesize(1), "p_equals_1_");

        let err = MemberIndex::for_method("func_x_a", &MergeConfig::lenient(), &names).unwrap_err();
        assert!(matches!(err, Error::UnresolvedMemberIndex(_)));

        let err =
            MemberIndex::for_method("<init>net/A", &MergeConfig::lenient(), &names).unwrap_err();
        assert!(matches!(err, Error::UnresolvedMemberIndex(_)));
    }

    #[test]
    fn parse_prefix() {
        assert_eq!(MemberIndex::parse_prefix("p_1"), Some(MemberIndex::Numbered(1)));
        assert_eq!(MemberIndex::parse_prefix("p_i77"), Some(MemberIndex::Indexed(77)));
        assert_eq!(MemberIndex::parse_prefix("p_i"), None);
        assert_eq!(MemberIndex::parse_prefix("p_equals"), None);
        assert_eq!(MemberIndex::parse_prefix("func_1"), None);
    }

    #[test]
    fn constructor_identity_ends_with_owner() {
        let identity = qualified_constructor("net/minecraft/Widget");
        assert_eq!(identity, "<init>net/minecraft/Widget");
        assert_eq!(identity.strip_prefix(CONSTRUCTOR), Some("net/minecraft/Widget"));
    }
}
