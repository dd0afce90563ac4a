//! Parameter Name Deriver.
//!
//! Every method with arguments receives two lists of parameter names, indexed by local variable
//! slot:
//!
//! - `srg` names are synthesized from the method's member index: `p_<n>_<slot>_`, or
//!   `p_i<n>_<slot>_` for the historical low range and for constructors
//! - `mcp` names come from the curated parameter name table where it has one, and repeat the
//!   `srg` name everywhere else
//!
//! Both lists always name exactly the same slots. Instance methods keep slot 0 for the
//! receiver; methods on the static list start at slot 0. A `long` or `double` argument takes two
//! slots, so the slot after it stays unnamed.
//!
//! # Member indices
//!
//! | Method        | Source of the index                                  |
//! |---------------|------------------------------------------------------|
//! | `func_<n>_x`  | the number in the `srg` name, see [`MemberIndex`]    |
//! | `<init>`      | [`crate::auxiliary::ConstructorIndices`]             |
//! | anything else | [`crate::config::UnnumberedPolicy`]                  |

mod deriver;
mod index;

pub use deriver::{DeriveStats, ParameterDeriver};
pub use index::{qualified_constructor, MemberIndex};
