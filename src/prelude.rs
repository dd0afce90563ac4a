//! # tinymerge Prelude
//!
//! This module provides a convenient prelude for the most commonly used types from the
//! tinymerge library. Import this module to get quick access to the essential types for
//! building, deriving and writing merged tables.

// ================================================================================================
// Core Types and Error Handling
// ================================================================================================

/// The main error type for all tinymerge operations
pub use crate::Error;

/// The result type used throughout tinymerge
pub use crate::Result;

/// Merge configuration and its policies
pub use crate::config::{ConstructorPolicy, IndexEncoding, MergeConfig, UnnumberedPolicy};

/// The five namespaces
pub use crate::Namespace;

// ================================================================================================
// Main Entry Points
// ================================================================================================

/// End to end merge
pub use crate::merge::{MergeJob, MergeReport};

/// File access
pub use crate::File;

// ================================================================================================
// Table Format
// ================================================================================================

/// Parsed tables and the record writer
pub use crate::tiny::{Header, TinyFile, TinyWriter};

// ================================================================================================
// Pipeline Phases
// ================================================================================================

/// Symbol Table Builder
pub use crate::builder::{SourceSpec, SourceStats, TableBuilder, TargetSlot};

/// The merged table
pub use crate::mapping::{ClassMapping, FieldMapping, Mapping, MappingTable, MethodMapping};

/// Side files
pub use crate::auxiliary::{Auxiliary, ConstructorIndices, ParameterNames, StaticMethods};

/// Parameter Name Deriver
pub use crate::params::{MemberIndex, ParameterDeriver};

/// Table Writer
pub use crate::writer::{TableWriter, WriteStats};

/// Type descriptors
pub use crate::descriptor::{FieldType, MethodDescriptor};
