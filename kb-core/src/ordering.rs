/*!

Comparison primitives used to build a reduction ordering: a total `precedence` on symbols, its `lex` and
`mul` lifts to sequences, and `rpo`, the recursive path ordering with per-symbol status that gives completion
its termination proofs. All three return a `kb_abs::PartialOrdering` result (`Option<std::cmp::Ordering>`),
with `None` standing for *incomparable* rather than an error.

*/

use std::cmp::Ordering;
use std::collections::HashMap;

use kb_abs::PartialOrdering;

use crate::symbol::Symbol;
use crate::term::{contains_var, Term, TermPtr};

/// Per-symbol status selecting the extension used to compare arguments of equal top symbols under `rpo`.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
pub enum Status {
  Lex,
  Mul,
}

/// A total order on the function symbols appearing in the input, represented as a sequence; earlier is
/// smaller. Matches the data model's `Fs`.
pub type Precedence = Vec<Symbol>;

/// A mapping from each function symbol to its `Status`. Matches the data model's `Stats`.
pub type StatusMap = HashMap<Symbol, Status>;

/// Bundles a precedence and a status map into the single reduction ordering `completion` is parameterized
/// by.
#[derive(Clone, Debug)]
pub struct RpoOrdering {
  pub precedence: Precedence,
  pub status: StatusMap,
}

impl RpoOrdering {
  pub fn compare(&self, s: &TermPtr, t: &TermPtr) -> Option<Ordering> {
    rpo(&self.precedence, &self.status, s, t)
  }
}

/// `precedence(Fs, f, g)`: position-based total order on the given symbol list. A symbol absent from `Fs` is
/// incomparable to everything; this should not happen for a precedence built over the actual symbols of an
/// equation set, but guards against a malformed candidate from the search driver.
pub fn precedence(fs: &Precedence, f: Symbol, g: Symbol) -> Option<Ordering> {
  let pf = fs.iter().position(|s| *s == f)?;
  let pg = fs.iter().position(|s| *s == g)?;
  Some(pf.cmp(&pg))
}

/// `lex(cmp, xs, ys)`: the lexicographic lift of `cmp` over sequences of equal length; the first non-equal
/// position decides. Sequences of differing length are incomparable, since RPO only ever calls this with a
/// symbol's own argument list compared against itself (same arity both sides).
pub fn lex<T>(cmp: impl Fn(&T, &T) -> Option<Ordering>, xs: &[T], ys: &[T]) -> Option<Ordering> {
  if xs.len() != ys.len() {
    return PartialOrdering::Incomparable;
  }
  for (x, y) in xs.iter().zip(ys.iter()) {
    match cmp(x, y) {
      Some(Ordering::Equal) => continue,
      other => return other,
    }
  }
  PartialOrdering::Equal
}

/// `mul(cmp, xs, ys)`: the Dershowitz–Manna multiset extension of `cmp`. Let `X = xs \ ys`, `Y = ys \ xs`
/// (multiset difference using `cmp`'s equality). If both are empty, the multisets are equal. Otherwise `xs`
/// dominates `ys` iff every element of `Y` is strictly smaller than some element of `X`, and symmetrically
/// for `ys` dominating `xs`; if neither holds, the two multisets are incomparable.
pub fn mul<T: Clone>(cmp: impl Fn(&T, &T) -> Option<Ordering>, xs: &[T], ys: &[T]) -> Option<Ordering> {
  let mut xs_only: Vec<T> = xs.to_vec();
  let mut ys_only: Vec<T> = Vec::new();

  for y in ys {
    if let Some(pos) = xs_only.iter().position(|x| cmp(x, y) == Some(Ordering::Equal)) {
      xs_only.remove(pos);
    } else {
      ys_only.push(y.clone());
    }
  }

  if xs_only.is_empty() && ys_only.is_empty() {
    return PartialOrdering::Equal;
  }

  let xs_dominates = !xs_only.is_empty() && ys_only.iter().all(|y| xs_only.iter().any(|x| cmp(x, y) == Some(Ordering::Greater)));
  if xs_dominates {
    return PartialOrdering::Greater;
  }

  let ys_dominates = !ys_only.is_empty() && xs_only.iter().all(|x| ys_only.iter().any(|y| cmp(y, x) == Some(Ordering::Greater)));
  if ys_dominates {
    return PartialOrdering::Less;
  }

  PartialOrdering::Incomparable
}

/// The recursive path ordering with per-symbol status: variables compare by the subterm relation, distinct
/// variables are incomparable, and two applications compare by precedence on their head symbols, falling
/// back to the symbol's status (lexicographic or multiset) to break ties of equal precedence.
pub fn rpo(fs: &Precedence, stats: &StatusMap, s: &TermPtr, t: &TermPtr) -> Option<Ordering> {
  match (s.as_ref(), t.as_ref()) {
    // Case 1: t is a variable.
    (Term::Var(sv), Term::Var(tv)) if sv == tv => PartialOrdering::Equal,
    // Distinct variables are incomparable: neither occurs in the other, and subterm/precedence don't apply.
    (Term::Var(_), Term::Var(_)) => PartialOrdering::Incomparable,
    (_, Term::Var(tv)) => {
      if contains_var(*tv, s) {
        PartialOrdering::Greater
      } else {
        PartialOrdering::Less
      }
    }
    // Case 2: s is a variable (and t is not, handled above).
    (Term::Var(_), _) => PartialOrdering::Less,
    // Case 3: s = f(s_hat), t = g(t_hat).
    (Term::App(f, sargs), Term::App(g, targs)) => {
      // Subterm property: if some s_i >= t, then s > t.
      for si in sargs {
        if matches!(rpo(fs, stats, si, t), Some(Ordering::Greater) | Some(Ordering::Equal)) {
          return PartialOrdering::Greater;
        }
      }

      match precedence(fs, *f, *g) {
        Some(Ordering::Greater) => {
          if targs.iter().all(|tj| rpo(fs, stats, tj, s) == Some(Ordering::Less)) {
            PartialOrdering::Greater
          } else {
            PartialOrdering::Less
          }
        }
        Some(Ordering::Equal) => {
          let dominates_all_args = targs.iter().all(|tj| rpo(fs, stats, tj, s) == Some(Ordering::Less));
          if !dominates_all_args {
            return PartialOrdering::Less;
          }

          let status = stats.get(f).copied().unwrap_or(Status::Lex);
          let extension = match status {
            Status::Lex => lex(|a, b| rpo(fs, stats, a, b), sargs, targs),
            Status::Mul => mul(|a, b| rpo(fs, stats, a, b), sargs, targs),
          };

          match extension {
            Some(Ordering::Greater) => PartialOrdering::Greater,
            Some(Ordering::Equal) => PartialOrdering::Equal,
            _ => PartialOrdering::Less,
          }
        }
        Some(Ordering::Less) => PartialOrdering::Less,
        None => PartialOrdering::Incomparable,
      }
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::term::VariableSource;

  fn sym(name: &str) -> Symbol {
    Symbol::new(name)
  }

  fn precedence_of(names: &[&str]) -> Precedence {
    names.iter().map(|n| sym(n)).collect()
  }

  /// RPO is a simplification ordering: `rpo(f(..., s, ...), s) = >` for any context, via the subterm
  /// property.
  #[test]
  fn subterm_property_holds() {
    let fs = precedence_of(&["f"]);
    let stats = StatusMap::new();
    let mut src = VariableSource::new();
    let x = Term::var(src.fresh());
    let outer = Term::app(sym("f"), vec![x.clone()]);
    assert_eq!(rpo(&fs, &stats, &outer, &x), Some(Ordering::Greater));
  }

  #[test]
  fn same_variable_is_equal() {
    let fs = Precedence::new();
    let stats = StatusMap::new();
    let mut src = VariableSource::new();
    let x = Term::var(src.fresh());
    assert_eq!(rpo(&fs, &stats, &x, &x), Some(Ordering::Equal));
  }

  #[test]
  fn distinct_variables_are_incomparable() {
    let fs = Precedence::new();
    let stats = StatusMap::new();
    let mut src = VariableSource::new();
    let x = Term::var(src.fresh());
    let y = Term::var(src.fresh());
    assert_eq!(rpo(&fs, &stats, &x, &y), None);
  }

  #[test]
  fn higher_precedence_symbol_wins_regardless_of_arguments() {
    let fs = precedence_of(&["a", "f"]);
    let stats = StatusMap::new();
    let f_x = Term::app(sym("f"), vec![Term::constant(sym("a"))]);
    let a = Term::constant(sym("a"));
    assert_eq!(rpo(&fs, &stats, &f_x, &a), Some(Ordering::Greater));
  }

  #[test]
  fn lex_status_compares_arguments_left_to_right() {
    let fs = precedence_of(&["f", "a", "b"]);
    let mut stats = StatusMap::new();
    stats.insert(sym("f"), Status::Lex);
    let f_ab = Term::app(sym("f"), vec![Term::constant(sym("a")), Term::constant(sym("b"))]);
    let f_bb = Term::app(sym("f"), vec![Term::constant(sym("b")), Term::constant(sym("b"))]);
    // a < b in precedence, so f(a, b) < f(b, b) under lex status.
    assert_eq!(rpo(&fs, &stats, &f_ab, &f_bb), Some(Ordering::Less));
  }

  #[test]
  fn mul_identifies_equal_multisets() {
    let fs = precedence_of(&["a", "b"]);
    let cmp = |x: &Symbol, y: &Symbol| precedence(&fs, *x, *y);
    let xs = vec![sym("a"), sym("b")];
    let ys = vec![sym("b"), sym("a")];
    assert_eq!(mul(cmp, &xs, &ys), Some(Ordering::Equal));
  }

  /// Reflexivity: an application compared against itself (same symbol, same args) must be `Equal`, not
  /// `Less` — a same-symbol tie that is neither side's dominated-args condition ever fails has to come out
  /// `Equal`, never collapse into `Less`.
  #[test]
  fn identical_application_compares_equal() {
    let fs = precedence_of(&["a", "f"]);
    let mut stats = StatusMap::new();
    stats.insert(sym("f"), Status::Lex);
    let constant_a = Term::constant(sym("a"));
    let term = Term::app(sym("f"), vec![constant_a.clone(), constant_a]);
    assert_eq!(rpo(&fs, &stats, &term, &term), Some(Ordering::Equal));
  }

  /// Same-symbol domination must check `tj < s`, not `s < tj`: `f(a)` (arg `a`, smaller than `f(a)` itself)
  /// must dominate against `f(b)`'s argument `b` under precedence `[a, b, f]`, since `b < f(a)` too.
  #[test]
  fn same_symbol_domination_checks_subterms_against_the_whole_term() {
    let fs = precedence_of(&["a", "b", "f"]);
    let mut stats = StatusMap::new();
    stats.insert(sym("f"), Status::Lex);
    let f_a = Term::app(sym("f"), vec![Term::constant(sym("a"))]);
    let f_b = Term::app(sym("f"), vec![Term::constant(sym("b"))]);
    // a < b in precedence, so f(a) < f(b) under lex status — and both of their arguments are dominated by
    // the whole term on each side, so this must resolve via the lex comparison, not collapse to Less from a
    // failed (and backwards) domination check.
    assert_eq!(rpo(&fs, &stats, &f_a, &f_b), Some(Ordering::Less));
    assert_eq!(rpo(&fs, &stats, &f_b, &f_a), Some(Ordering::Greater));
  }
}
