/*!

Types/type aliases that abstract over the implementing backing type, the same role `mod2-abs` plays for `mod2-lib`.

A motivating example is `VarSet`: several crates in this workspace need "a set of small natural numbers"
(variable indices, in our case). This module redirects to whatever backing implementation we want (`bit-set`
today) so the rest of the workspace doesn't depend on that choice directly.

*/

mod partial_ordering;
mod var_set;

pub use partial_ordering::PartialOrdering;
pub use var_set::VarSet;

// Re-exported so downstream crates don't need their own `tracing` dependency just to instrument code.
pub use tracing;

// Interned strings, used for function symbol names.
pub use ustr::Ustr;
