//! Table-Format Codec for tiny v2 mapping tables.
//!
//! The format is line oriented and tab separated. Nesting is expressed through leading tabs:
//!
//! ```text
//! tiny	2	0	named	intermediary	official
//! 	escaped-names
//! c	net/example/Widget	class_1	a
//! 	m	(IJ)V	resize	method_1	b
//! 		p	1	width
//! 	f	I	size	field_1	c
//! ```
//!
//! # Key Components
//!
//! - [`codec`] - Splitting, indentation and the escape transform
//! - [`Header`] - Version, namespace columns and properties
//! - [`TinyFile`] - A complete parsed table
//! - [`TinyWriter`] - Record emitter used by [`crate::writer::TableWriter`]
//!
//! None of these know anything about merging; they only enforce the shape of the format.

pub mod codec;
mod header;
mod reader;
mod writer;

pub use header::{Header, ESCAPED_NAMES, MAGIC, MAJOR_VERSION, MINOR_VERSION};
pub use reader::{ClassRecord, FieldRecord, MethodRecord, ParamRecord, TinyFile};
pub use writer::TinyWriter;
