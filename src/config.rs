//! Per-run merge configuration.
//!
//! Everything the deriver would otherwise take from process-wide tables (the index threshold,
//! the well-known static methods, the compatibility allow-lists) lives here and is constructed
//! once per run.

use std::collections::BTreeSet;

/// Index below which numbered methods use the `p_i` marker.
pub const DEFAULT_INDEX_THRESHOLD: u32 = 70000;

/// Method names treated as static regardless of the auxiliary static method list.
pub const DEFAULT_STATIC_METHODS: &[&str] = &[
    "main",
    "valueOf",
    "wrapScreenError",
    "isCut",
    "isPaste",
    "isSelectAll",
    "isCopy",
    "innerBlit",
    "blit",
    "fill",
    "getErrorString",
    "_shouldClose",
    "make",
    "_init",
    "_getRefreshRate",
    "_renderCrosshair",
    "_setGlfwErrorCallback",
    "ortho",
    "translated",
    "scaled",
];

/// Parameter lists from the parameter name table which are known to be longer than the
/// method's arguments.
pub const DEFAULT_KNOWN_MISMATCHES: &[&[&str]] = &[
    &["p_71377_0_", "crashReportIn"],
    &["p_178304_0_", "hash"],
    &["p_181679_0_", "bufferBuilderIn"],
    &["p_148075_0_", "manager"],
    &["p_148077_0_", "manager"],
    &["p_180438_0_", "entitylivingbaseIn", "partialTicks"],
    &["p_189553_0_", "blockaccessIn", "x", "y", "z"],
    &["p_193578_0_", "blockaccessIn", "x", "y", "z", "nodeType"],
];

/// Packages whose methods may name the slot other methods reserve for the receiver.
pub const DEFAULT_RECEIVERLESS_PREFIXES: &[&str] = &["com/mojang/realmsclient/", "com/mojang/blaze3d/"];

/// How a numbered method index picks between `p_<n>` and `p_i<n>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexEncoding {
    /// Indices below the threshold use `p_i<n>`
    Threshold(u32),
    /// Use whichever encoding the parameter name table contains for the index, and the
    /// threshold `fallback` when it contains neither
    ParameterTable {
        /// Threshold for indices the table does not know
        fallback: u32,
    },
}

/// What to do with a constructor which has no entry in the constructor index table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstructorPolicy {
    /// Fail with [`crate::Error::UnresolvedMemberIndex`]
    Required,
    /// Write the constructor without parameter records
    SkipParameters,
}

/// What to do with a method whose `srg` name carries no numeric index (`equals`, `run`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnnumberedPolicy {
    /// Fail with [`crate::Error::UnresolvedMemberIndex`]
    Reject,
    /// Use the name itself as the index, producing `p_<name>_<slot>_`
    NameAsIndex,
}

/// Configuration of one merge run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeConfig {
    /// Encoding of numbered method indices
    pub index_encoding: IndexEncoding,

    /// Handling of constructors missing from the constructor index table
    pub constructor_policy: ConstructorPolicy,

    /// Handling of methods without a numeric index
    pub unnumbered_methods: UnnumberedPolicy,

    /// Well-known static methods, merged with the auxiliary static method list
    pub static_methods: BTreeSet<String>,

    /// Exact parameter name lists whose length may disagree with the descriptor
    pub known_mismatches: Vec<Vec<String>>,

    /// `named` class prefixes allowed to name the receiver slot
    pub receiverless_prefixes: Vec<String>,

    /// Overrides the `escaped-names` flag of the output, `None` inherits it from the parameter
    /// source
    pub escape_output: Option<bool>,
}

impl Default for MergeConfig {
    fn default() -> Self {
        Self {
            index_encoding: IndexEncoding::Threshold(DEFAULT_INDEX_THRESHOLD),
            constructor_policy: ConstructorPolicy::Required,
            unnumbered_methods: UnnumberedPolicy::Reject,
            static_methods: DEFAULT_STATIC_METHODS
                .iter()
                .map(|name| (*name).to_string())
                .collect(),
            known_mismatches: DEFAULT_KNOWN_MISMATCHES
                .iter()
                .map(|list| list.iter().map(|name| (*name).to_string()).collect())
                .collect(),
            receiverless_prefixes: DEFAULT_RECEIVERLESS_PREFIXES
                .iter()
                .map(|prefix| (*prefix).to_string())
                .collect(),
            escape_output: None,
        }
    }
}

impl MergeConfig {
    /// Every unresolved index is an error
    #[must_use]
    pub fn strict() -> Self {
        Self::default()
    }

    /// Missing constructor indices skip the parameters, unnumbered methods use their name
    #[must_use]
    pub fn lenient() -> Self {
        Self {
            constructor_policy: ConstructorPolicy::SkipParameters,
            unnumbered_methods: UnnumberedPolicy::NameAsIndex,
            ..Self::default()
        }
    }

    /// The threshold in effect, whichever encoding is selected.
    #[must_use]
    pub fn threshold(&self) -> u32 {
        match self.index_encoding {
            IndexEncoding::Threshold(threshold) => threshold,
            IndexEncoding::ParameterTable { fallback } => fallback,
        }
    }

    /// Returns `true` if `list` is one of the tolerated mismatching parameter lists.
    #[must_use]
    pub fn is_known_mismatch(&self, list: &[Option<String>]) -> bool {
        self.known_mismatches.iter().any(|known| {
            known.len() == list.len()
                && known
                    .iter()
                    .zip(list)
                    .all(|(known, name)| name.as_deref() == Some(known.as_str()))
        })
    }

    /// Returns `true` if the `named` class may name its receiver slot.
    #[must_use]
    pub fn is_receiverless(&self, class: &str) -> bool {
        self.receiverless_prefixes
            .iter()
            .any(|prefix| class.starts_with(prefix.as_str()))
    }
}
