/*!

Error taxonomy for the completion engine. Completion is externally callable, so failures are ordinary
`Result` values rather than assertions internal to a closed module.

*/

use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum CompletionError {
  /// An equation reduced to two terms neither of which is greater than the other under the active
  /// ordering. Recoverable by retrying with another precedence/status assignment.
  #[error("equation `{s}` = `{t}` is unorientable under the active ordering")]
  Unorientable { s: String, t: String },

  /// The step/time bound passed to `orient`, `normal_form`, or `critical_pairs` was hit.
  #[error("completion exceeded its step budget")]
  BudgetExhausted,

  /// A rule was constructed with a variable LHS, or with an RHS variable absent from the LHS. Detected in
  /// `Rule::new`; indicates a bug upstream of completion, not a recoverable outcome.
  #[error("malformed rule: {0}")]
  MalformedRule(String),

  /// `equations_trs`'s search exhausted every precedence/status candidate without finding one under which
  /// `completion` succeeds. Distinct from a single `completion` call's own failure modes: this belongs to
  /// the ordering-search driver, the one component with combinatorial search.
  #[error("no symbol precedence / status assignment yielded a convergent system")]
  NoConvergentOrdering,
}
