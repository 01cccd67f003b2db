/*!

Knuth–Bendix completion: decides the word problem for equational theories by transforming a finite set of
equations into an equivalent convergent term rewriting system.

The four operations this crate exposes to its callers:

- [`normal_form_unbounded`] / [`rewriter::normal_form`] — reduce a term to normal form under a rule set.
- [`critical_pairs_unbounded`] / [`critical_pairs::critical_pairs`] — enumerate a rule set's critical pairs.
- [`completion::completion`] — orient a set of equations into a convergent TRS under a supplied ordering.
- [`completion::equations_trs`] — synthesize an ordering by searching symbol precedences and statuses, and
  run completion under the first one that succeeds.

Parsing of user-facing term syntax, pretty-printing, and the surrounding ordering-search CLI are explicitly
out of scope for this crate; callers build and consume terms through the constructors in [`term`] and print
them through [`std::fmt::Display`].

*/

pub mod budget;
pub mod completion;
pub mod critical_pairs;
pub mod equation;
pub mod error;
pub mod ordering;
pub mod rewriter;
pub mod rule;
pub mod substitution;
pub mod symbol;
pub mod term;
pub mod unify;

pub use budget::Budget;
pub use completion::{completion as run_completion, equations_trs};
pub use critical_pairs::{critical_pairs, critical_pairs_unbounded};
pub use equation::Equation;
pub use error::CompletionError;
pub use ordering::{precedence, lex, mul, rpo, RpoOrdering, Status, StatusMap};
pub use rewriter::{normal_form, normal_form_unbounded, step};
pub use rule::Rule;
pub use substitution::{substitute, Substitution};
pub use symbol::Symbol;
pub use term::{fresh_rename, structural_eq, term_size, variables_of, Term, TermPtr, VariableId, VariableSource};
pub use unify::{matches_pattern, unify};
