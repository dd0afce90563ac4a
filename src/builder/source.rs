use crate::namespace::Namespace;

/// The slot a source fills in every matching [`crate::mapping::Mapping`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TargetSlot {
    /// Fill `official`
    SetOfficial,
    /// Fill `intermediary`
    SetIntermediary,
    /// Fill `srg`
    SetSrg,
    /// Fill `mcp`
    SetMcp,
    /// Attach the `named` parameter names of every method
    SetNamedParameters,
}

impl TargetSlot {
    /// The namespace column the source's values are read from.
    #[must_use]
    pub fn namespace(self) -> Namespace {
        match self {
            TargetSlot::SetOfficial => Namespace::Official,
            TargetSlot::SetIntermediary => Namespace::Intermediary,
            TargetSlot::SetSrg => Namespace::Srg,
            TargetSlot::SetMcp => Namespace::Mcp,
            TargetSlot::SetNamedParameters => Namespace::Named,
        }
    }
}

/// How one source file is folded into the table.
///
/// # Examples
///
/// ```rust
/// use tinymerge::{builder::{SourceSpec, TargetSlot}, Namespace};
///
/// let mcp = SourceSpec::new(TargetSlot::SetMcp).fill_blank_classes(true);
/// assert_eq!(mcp.key, Namespace::Named);
///
/// let by_official = SourceSpec::new(TargetSlot::SetSrg).keyed_by(Namespace::Official);
/// assert_eq!(by_official.key, Namespace::Official);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceSpec {
    /// The slot the source fills
    pub slot: TargetSlot,
    /// The column whose names identify existing records, `named` unless the source is keyed
    /// differently
    pub key: Namespace,
    /// A class with a blank target name takes its key name instead of staying absent
    pub fill_blanks: bool,
}

impl SourceSpec {
    /// A source keyed by `named` filling `slot`.
    #[must_use]
    pub fn new(slot: TargetSlot) -> SourceSpec {
        SourceSpec {
            slot,
            key: Namespace::PRIMARY,
            fill_blanks: false,
        }
    }

    /// Identify records through the `key` column instead of `named`.
    #[must_use]
    pub fn keyed_by(mut self, key: Namespace) -> SourceSpec {
        self.key = key;
        self
    }

    /// Fill blank class names with the key name.
    #[must_use]
    pub fn fill_blank_classes(mut self, fill: bool) -> SourceSpec {
        self.fill_blanks = fill;
        self
    }
}
