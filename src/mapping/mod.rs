//! In-memory model of a merged mapping table.
//!
//! A [`MappingTable`] owns one [`ClassMapping`] per `named` class name. Each class owns its
//! [`MethodMapping`]s and [`FieldMapping`]s, keyed by the `named` name and `named` descriptor
//! ([`MemberKey`]). Every entity carries a [`Mapping`] with one slot per namespace.
//!
//! The table is filled by [`crate::builder`], extended with parameter names by
//! [`crate::params`] and finally read by [`crate::writer`].

mod class;
mod entry;
mod table;

pub use class::{ClassMapping, FieldMapping, MemberKey, MethodMapping, CONSTRUCTOR};
pub use entry::Mapping;
pub use table::MappingTable;
