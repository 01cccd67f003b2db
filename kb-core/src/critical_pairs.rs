/*!

Critical-pair generation: overlaps between a rule's LHS at a non-variable position and another rule's whole
LHS, reconstructing the surrounding context and emitting an equation. Context is tracked as a reversed stack
of `(symbol, left_siblings, right_siblings)` frames built while descending, then folded outward when a pair
is emitted — never a "replace at position" helper that re-walks the whole term from the root.

Variable positions are skipped entirely (`var(T) -> []`): generating pairs there would admit spurious
critical pairs, since a bare variable overlapped with anything unifies trivially.

*/

use kb_abs::tracing;

use crate::budget::Budget;
use crate::error::CompletionError;
use crate::equation::Equation;
use crate::rule::Rule;
use crate::substitution::substitute;
use crate::symbol::Symbol;
use crate::term::{Term, TermPtr, VariableSource};
use crate::unify::unify;

/// One frame of the context path: `f`'s arguments to the left and right of the hole currently being
/// descended into.
struct Frame {
  symbol: Symbol,
  left: Vec<TermPtr>,
  right: Vec<TermPtr>,
}

/// Rebuilds the full term by plugging `value` into the hole and folding frames outward, innermost first.
fn rebuild(value: TermPtr, frames: &[Frame]) -> TermPtr {
  let mut current = value;
  for frame in frames.iter().rev() {
    let mut children = frame.left.clone();
    children.push(current);
    children.extend(frame.right.iter().cloned());
    current = Term::app(frame.symbol, children);
  }
  current
}

/// `critical_pairs(rules)`: every critical pair arising from overlaps within `rules`, including a rule
/// overlapping with itself (via two independently renamed copies).
pub fn critical_pairs(rules: &[Rule], source: &mut VariableSource, budget: &mut Budget) -> Result<Vec<Equation>, CompletionError> {
  critical_pairs_between(rules, rules, source, budget)
}

/// Convenience wrapper around `critical_pairs`, with a fresh variable source and an unlimited budget.
pub fn critical_pairs_unbounded(rules: &[Rule]) -> Vec<Equation> {
  let mut source = VariableSource::new();
  let mut budget = Budget::unlimited();
  critical_pairs(rules, &mut source, &mut budget).expect("an unlimited budget never exhausts")
}

/// Overlaps of `outer`'s LHSs (at non-variable positions) against `inner`'s LHSs. `critical_pairs(R)` is
/// `critical_pairs_between(R, R, ...)`; completion additionally needs the asymmetric `CP({rho}, R)` and
/// `CP(R, {rho})` forms this generalizes to.
pub fn critical_pairs_between(
  outer: &[Rule],
  inner: &[Rule],
  source: &mut VariableSource,
  budget: &mut Budget,
) -> Result<Vec<Equation>, CompletionError> {
  let mut equations = Vec::new();

  for r1 in outer {
    for r2 in inner {
      let r1p = r1.fresh_rename(source);
      let r2p = r2.fresh_rename(source);
      let lhs_root = r1p.lhs.clone();
      let mut frames = Vec::new();
      overlap_positions(&r1p, &r2p, &lhs_root, &mut frames, &mut equations, budget)?;
    }
  }

  Ok(equations)
}

/// Visits every non-variable position of `node` (a subterm of `r1.lhs`, reached via `frames`), attempting an
/// overlap with `r2.lhs` at each.
fn overlap_positions(
  r1: &Rule,
  r2: &Rule,
  node: &TermPtr,
  frames: &mut Vec<Frame>,
  out: &mut Vec<Equation>,
  budget: &mut Budget,
) -> Result<(), CompletionError> {
  if matches!(node.as_ref(), Term::Var(_)) {
    // Variable positions contribute no critical pairs.
    return Ok(());
  }

  if let Some(sigma) = unify(node, &r2.lhs, budget)? {
    let replaced_template = rebuild(r2.rhs.clone(), frames);
    let u = substitute(&r1.rhs, &sigma);
    let v = substitute(&replaced_template, &sigma);
    tracing::debug!(u = %u, v = %v, "critical pair");
    out.push(Equation::new(u, v));
  }

  if let Term::App(f, args) = node.as_ref() {
    for i in 0..args.len() {
      frames.push(Frame { symbol: *f, left: args[..i].to_vec(), right: args[i + 1..].to_vec() });
      overlap_positions(r1, r2, &args[i], frames, out, budget)?;
      frames.pop();
    }
  }

  Ok(())
}
