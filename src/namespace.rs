//! Naming schemes which a merged mapping table carries.
//!
//! A fully merged record has one name per [`Namespace`]. The declaration order of the variants is
//! the column order of the merged output (`named intermediary official srg mcp`), which makes
//! [`Namespace::iter`](strum::IntoEnumIterator::iter) the canonical way to walk the columns.

use strum::{AsRefStr, Display, EnumCount, EnumIter, EnumString};

/// One naming scheme for identifiers describing the same compiled artifact.
///
/// # Examples
///
/// ```rust
/// use std::str::FromStr;
/// use tinymerge::Namespace;
///
/// assert_eq!(Namespace::from_str("srg").unwrap(), Namespace::Srg);
/// assert_eq!(Namespace::Intermediary.as_ref(), "intermediary");
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Display,
    EnumString,
    EnumIter,
    EnumCount,
    AsRefStr,
)]
#[strum(serialize_all = "lowercase")]
pub enum Namespace {
    /// Human-curated names, the merge key of every table
    Named,
    /// Stable cross-version synthetic names
    Intermediary,
    /// Ground-truth obfuscated names
    Official,
    /// Deterministic numeric-indexed third-party names
    Srg,
    /// Community-curated names layered on top of `srg`
    Mcp,
}

impl Namespace {
    /// The namespace every merged record is keyed by.
    pub const PRIMARY: Namespace = Namespace::Named;
}
