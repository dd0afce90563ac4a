// Copyright 2025 Johann Kempter
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//
// SPDX-License-Identifier: Apache-2.0

#![doc(html_no_source)]
#![warn(missing_docs)]
#![allow(clippy::too_many_arguments)]
// - 'file/physical.rs' uses mmap to map a file into memory

//! # tinymerge
//!
//! Merges several tiny v2 mapping tables into one table over five namespaces
//! (`named`, `intermediary`, `official`, `srg`, `mcp`) and derives parameter names for the
//! `srg` and `mcp` columns.
//!
//! ## Pipeline
//!
//! A merge runs three phases, strictly in order:
//!
//! 1. **Builder** ([`builder::TableBuilder`]) reads each source table and fills one namespace
//!    column of the in-memory [`mapping::MappingTable`], keyed by the `named` class name and the
//!    `named` member identity.
//! 2. **Deriver** ([`params::ParameterDeriver`]) synthesizes `srg` parameter names from member
//!    indices and overlays curated `mcp` names from the parameter table.
//! 3. **Writer** ([`writer::TableWriter`]) renders the merged table, filling absent member
//!    names from the column to their left, and replaces the output file atomically.
//!
//! [`merge::MergeJob`] wires the three together.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use tinymerge::prelude::*;
//!
//! let report = MergeJob::standard(
//!     "yarn.tiny",
//!     "yarn-srg.tiny",
//!     "yarn-mcp.tiny",
//!     "static_methods.txt",
//!     "constructors.txt",
//!     "params.csv",
//!     "merged.tiny",
//! )
//! .run()?;
//! println!("{} parameters written", report.parameters);
//! # Ok::<(), tinymerge::Error>(())
//! ```
//!
//! ### Reading a table
//!
//! ```rust
//! use tinymerge::tiny::TinyFile;
//!
//! let tiny = TinyFile::parse("tiny\t2\t0\tofficial\tnamed\nc\ta\tx/Alpha\n")?;
//! assert_eq!(tiny.classes.len(), 1);
//! # Ok::<(), tinymerge::Error>(())
//! ```
//!
//! ## Error Handling
//!
//! Every fallible operation returns [`Result<T>`]. Errors raised deep inside a phase are
//! wrapped with the file, line and symbol they concern; [`Error::root`] recovers the
//! underlying kind.

#[macro_use]
pub(crate) mod error;

/// Input backends and atomic output.
pub mod file;

/// Convenient re-exports of the most commonly used types.
///
/// # Example
///
/// ```rust,no_run
/// use tinymerge::prelude::*;
///
/// let mut builder = TableBuilder::new();
/// builder.load_file("yarn.tiny".as_ref(), &SourceSpec::new(TargetSlot::SetOfficial))?;
/// println!("{} classes", builder.table().len());
/// # Ok::<(), tinymerge::Error>(())
/// ```
pub mod prelude;

/// Side files: static method list, constructor indices, parameter names.
pub mod auxiliary;

/// Symbol Table Builder.
///
/// Folds source tables into a [`mapping::MappingTable`], one namespace column per source.
pub mod builder;

/// Merge configuration and its presets.
pub mod config;

/// JVM type descriptors and class name remapping.
pub mod descriptor;

/// The merged symbol table.
pub mod mapping;

/// The end to end merge pipeline.
pub mod merge;

/// The five namespaces of the merged table.
pub mod namespace;

/// Parameter Name Deriver and member indices.
pub mod params;

/// The tiny v2 table format: escapes, header, reader and record writer.
pub mod tiny;

/// Table Writer.
pub mod writer;

/// A type alias for [`std::result::Result<T, Error>`] where the error type is always [`Error`].
///
/// # Examples
///
/// ```rust,no_run
/// use tinymerge::{tiny::TinyFile, Result};
///
/// fn classes(text: &str) -> Result<usize> {
///     Ok(TinyFile::parse(text)?.classes.len())
/// }
/// ```
pub type Result<T> = std::result::Result<T, Error>;

/// `tinymerge` Error type
///
/// # Examples
///
/// ```rust
/// use tinymerge::{tiny::TinyFile, Error};
///
/// match TinyFile::parse("tiny\t3\t0\tnamed\n") {
///     Ok(_) => println!("parsed"),
///     Err(e) => match e.root() {
///         Error::UnsupportedVersion(message) => println!("unsupported: {message}"),
///         other => println!("Error: {other}"),
///     },
/// }
/// ```
pub use error::Error;

pub use config::MergeConfig;
pub use file::File;
pub use merge::{MergeJob, MergeReport};
pub use namespace::Namespace;
