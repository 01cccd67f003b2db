/*!

The Huet/Knuth–Bendix completion loop. State is the triple `(E, S, R)`: `E` is pending equations, `S` is
newly oriented rules awaiting critical-pair processing, `R` is stable rules already processed. A reduction
ordering (RPO with a precedence and per-symbol statuses) decides orientation.

*/

use std::cmp::Ordering;
use std::collections::{HashSet, VecDeque};

use itertools::Itertools;
use kb_abs::tracing;
use rayon::prelude::*;

use crate::budget::Budget;
use crate::equation::Equation;
use crate::error::CompletionError;
use crate::critical_pairs::critical_pairs_between;
use crate::ordering::{RpoOrdering, Status, StatusMap};
use crate::rewriter::normal_form;
use crate::rule::Rule;
use crate::symbol::Symbol;
use crate::term::{structural_eq, Term, TermPtr, VariableSource};

enum OrientOutcome {
  Discarded,
  Oriented(Rule),
}

/// `orient`: pops one equation, normalizes both sides with the current rule set, and either discards it (the
/// two sides are already equal), orients it into a `Rule`, or fails with `Unorientable`.
fn orient_one(
  eq: Equation,
  rules_so_far: &[Rule],
  ordering: &RpoOrdering,
  source: &mut VariableSource,
  budget: &mut Budget,
) -> Result<OrientOutcome, CompletionError> {
  let s = normal_form(rules_so_far, &eq.left, source, budget)?;
  let t = normal_form(rules_so_far, &eq.right, source, budget)?;

  if structural_eq(&s, &t) {
    return Ok(OrientOutcome::Discarded);
  }

  if ordering.compare(&s, &t) == Some(Ordering::Greater) {
    return Ok(OrientOutcome::Oriented(Rule::new(s, t)?));
  }
  if ordering.compare(&t, &s) == Some(Ordering::Greater) {
    return Ok(OrientOutcome::Oriented(Rule::new(t, s)?));
  }

  Err(CompletionError::Unorientable { s: s.to_string(), t: t.to_string() })
}

/// `add_rule`: installs `rho` while restoring the inter-reduced invariant. Every existing rule is either
/// demoted back to an equation (if `rho` alone rewrites its LHS) or kept with its RHS renormalized against
/// the full updated rule set.
fn add_rule(
  new_rule: Rule,
  fresh: &mut Vec<Rule>,
  stable: &mut Vec<Rule>,
  pending: &mut VecDeque<Equation>,
  source: &mut VariableSource,
  budget: &mut Budget,
) -> Result<(), CompletionError> {
  let full: Vec<Rule> = fresh.iter().chain(stable.iter()).cloned().chain(std::iter::once(new_rule.clone())).collect();
  let only_new = std::slice::from_ref(&new_rule);

  let mut kept_fresh = Vec::with_capacity(fresh.len());
  for g in fresh.drain(..) {
    reduce_or_demote(g, only_new, &full, pending, source, budget, &mut kept_fresh)?;
  }
  *fresh = kept_fresh;

  let mut kept_stable = Vec::with_capacity(stable.len());
  for g in stable.drain(..) {
    reduce_or_demote(g, only_new, &full, pending, source, budget, &mut kept_stable)?;
  }
  *stable = kept_stable;

  tracing::debug!(rule = %new_rule, "installed rule");
  fresh.push(new_rule);
  Ok(())
}

fn reduce_or_demote(
  g: Rule,
  only_new: &[Rule],
  full: &[Rule],
  pending: &mut VecDeque<Equation>,
  source: &mut VariableSource,
  budget: &mut Budget,
  keep: &mut Vec<Rule>,
) -> Result<(), CompletionError> {
  let rewritten_lhs = normal_form(only_new, &g.lhs, source, budget)?;

  if !structural_eq(&rewritten_lhs, &g.lhs) {
    // g's LHS is reducible by the new rule alone: g is subsumed, demote to an equation.
    let s = normal_form(full, &rewritten_lhs, source, budget)?;
    let t = normal_form(full, &g.rhs, source, budget)?;
    tracing::debug!(old_rule = %g, "demoting subsumed rule to an equation");
    pending.push_back(Equation::new(s, t));
  } else {
    let new_rhs = normal_form(full, &g.rhs, source, budget)?;
    keep.push(Rule { lhs: g.lhs, rhs: new_rhs });
  }

  Ok(())
}

/// The completion loop itself. Drains pending equations via `orient`; once none remain, if no fresh rules
/// are left to process, the stable set is a convergent TRS. Otherwise the smallest-size fresh rule (ties
/// broken by insertion order) is moved into the stable set, and its critical pairs with the rest of the
/// system become the next round's pending equations.
pub fn completion(equations: Vec<Equation>, ordering: &RpoOrdering, budget: &mut Budget) -> Result<Vec<Rule>, CompletionError> {
  let mut source = VariableSource::new();
  let mut pending: VecDeque<Equation> = equations.into();
  let mut fresh: Vec<Rule> = Vec::new();
  let mut stable: Vec<Rule> = Vec::new();

  loop {
    while let Some(eq) = pending.pop_front() {
      let rules_so_far: Vec<Rule> = fresh.iter().chain(stable.iter()).cloned().collect();
      match orient_one(eq, &rules_so_far, ordering, &mut source, budget)? {
        OrientOutcome::Discarded => {}
        OrientOutcome::Oriented(rule) => {
          add_rule(rule, &mut fresh, &mut stable, &mut pending, &mut source, budget)?;
        }
      }
    }

    if fresh.is_empty() {
      return Ok(stable);
    }

    let rho_index = smallest_rule_index(&fresh);
    let rho = fresh.remove(rho_index);
    tracing::debug!(rule = %rho, "processing smallest fresh rule");

    let rho_slice = std::slice::from_ref(&rho);
    let mut new_pairs = critical_pairs_between(rho_slice, &stable, &mut source, budget)?;
    new_pairs.extend(critical_pairs_between(&stable, rho_slice, &mut source, budget)?);
    new_pairs.extend(critical_pairs_between(rho_slice, rho_slice, &mut source, budget)?);

    pending.extend(new_pairs);
    stable.push(rho);
  }
}

/// Index of the smallest-size rule in `rules` (term-size of LHS+RHS), first occurrence on ties.
fn smallest_rule_index(rules: &[Rule]) -> usize {
  let mut best_index = 0;
  let mut best_size = usize::MAX;
  for (i, rule) in rules.iter().enumerate() {
    let size = rule.size();
    if size < best_size {
      best_size = size;
      best_index = i;
    }
  }
  best_index
}

fn symbols_of(equations: &[Equation]) -> Vec<Symbol> {
  let mut seen = HashSet::new();
  let mut ordered = Vec::new();
  let mut visit = |term: &TermPtr| collect_symbols(term, &mut seen, &mut ordered);
  for eq in equations {
    visit(&eq.left);
    visit(&eq.right);
  }
  ordered
}

fn collect_symbols(term: &TermPtr, seen: &mut HashSet<Symbol>, ordered: &mut Vec<Symbol>) {
  match term.as_ref() {
    Term::Var(_) => {}
    Term::App(f, args) => {
      if seen.insert(*f) {
        ordered.push(*f);
      }
      for arg in args {
        collect_symbols(arg, seen, ordered);
      }
    }
  }
}

/// Every `(precedence, status)` candidate: all permutations of the symbol list crossed with every per-symbol
/// `{Lex, Mul}` assignment. Represented as an explicit iterator-built `Vec` so the search in `equations_trs`
/// is a pure function of each candidate and trivially parallelizable.
fn ordering_candidates(symbols: &[Symbol]) -> Vec<RpoOrdering> {
  let n = symbols.len();
  if n == 0 {
    return vec![RpoOrdering { precedence: Vec::new(), status: StatusMap::new() }];
  }

  let status_options: Vec<[Status; 2]> = (0..n).map(|_| [Status::Lex, Status::Mul]).collect();

  let mut candidates = Vec::new();
  for precedence in symbols.iter().copied().permutations(n) {
    for combo in status_options.iter().map(|pair| pair.iter().copied()).multi_cartesian_product() {
      let status: StatusMap = symbols.iter().copied().zip(combo).collect();
      candidates.push(RpoOrdering { precedence: precedence.clone(), status });
    }
  }
  candidates
}

/// `equations_trs(equations)`: synthesizes an ordering by collecting the function symbols occurring in
/// `equations`, enumerating precedence permutations and per-symbol status assignments, and calling
/// `completion` with the first one that succeeds. Candidates are independent pure function calls, so the
/// search fans out over `rayon`. `steps_per_attempt` bounds every individual `completion` call.
pub fn equations_trs(equations: Vec<Equation>, steps_per_attempt: u64) -> Result<Vec<Rule>, CompletionError> {
  let symbols = symbols_of(&equations);
  let candidates = ordering_candidates(&symbols);
  tracing::info!(candidate_count = candidates.len(), "searching symbol orderings");

  candidates
    .par_iter()
    .find_map_any(|ordering| {
      let mut budget = Budget::new(steps_per_attempt);
      completion(equations.clone(), ordering, &mut budget).ok()
    })
    .ok_or(CompletionError::NoConvergentOrdering)
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::critical_pairs::critical_pairs_unbounded;
  use crate::rewriter::normal_form_unbounded;
  use crate::symbol::Symbol;
  use crate::term::structural_eq;

  fn sym(name: &str) -> Symbol {
    Symbol::new(name)
  }

  fn star(a: TermPtr, b: TermPtr) -> TermPtr {
    Term::app(sym("*"), vec![a, b])
  }

  fn inv(a: TermPtr) -> TermPtr {
    Term::app(sym("i"), vec![a])
  }

  fn e() -> TermPtr {
    Term::constant(sym("e"))
  }

  fn build_group_axioms(source: &mut VariableSource) -> Vec<Equation> {
    let x1 = Term::var(source.fresh());
    let eq1 = Equation::new(star(e(), x1.clone()), x1);

    let x2 = Term::var(source.fresh());
    let eq2 = Equation::new(star(inv(x2.clone()), x2), e());

    let x3 = Term::var(source.fresh());
    let y3 = Term::var(source.fresh());
    let z3 = Term::var(source.fresh());
    let eq3 = Equation::new(star(x3.clone(), star(y3.clone(), z3.clone())), star(star(x3, y3), z3));

    vec![eq1, eq2, eq3]
  }

  fn group_ordering() -> RpoOrdering {
    let precedence = vec![sym("*"), sym("i"), sym("e")];
    let mut status = StatusMap::new();
    status.insert(sym("*"), Status::Lex);
    status.insert(sym("i"), Status::Lex);
    status.insert(sym("e"), Status::Lex);
    RpoOrdering { precedence, status }
  }

  /// Completing the group axioms yields a convergent TRS that decides the word problem, including the
  /// specific normal-form identities below.
  #[test]
  fn group_axioms_complete_to_a_convergent_system() {
    let mut source = VariableSource::new();
    let equations = build_group_axioms(&mut source);
    let ordering = group_ordering();
    let mut budget = Budget::new(200_000);

    let rules = completion(equations, &ordering, &mut budget).expect("group axioms should complete");
    assert!(!rules.is_empty());

    // Every critical pair of the result must be confluent: both sides normalize to the same term.
    for pair in critical_pairs_unbounded(&rules) {
      let u = normal_form_unbounded(&rules, &pair.left);
      let v = normal_form_unbounded(&rules, &pair.right);
      assert!(structural_eq(&u, &v), "critical pair {pair} did not reconverge: {u} vs {v}");
    }

    // Word problem: e * i(i(e)) reduces to e.
    let lhs = star(e(), inv(inv(e())));
    let normalized = normal_form_unbounded(&rules, &lhs);
    assert!(structural_eq(&normalized, &e()));

    // i(i(X)) and i(i(i(i(X)))) have the same normal form.
    let mut src2 = VariableSource::new();
    let x = Term::var(src2.fresh());
    let double_inverse = inv(inv(x.clone()));
    let quad_inverse = inv(inv(inv(inv(x))));
    assert!(structural_eq(&normal_form_unbounded(&rules, &double_inverse), &normal_form_unbounded(&rules, &quad_inverse)));
  }

  /// Every returned rule's LHS is irreducible by the others, and every RHS is a normal form: the
  /// inter-reduced invariant.
  #[test]
  fn result_is_inter_reduced() {
    let mut source = VariableSource::new();
    let equations = build_group_axioms(&mut source);
    let ordering = group_ordering();
    let mut budget = Budget::new(200_000);
    let rules = completion(equations, &ordering, &mut budget).expect("should complete");

    for (i, rule) in rules.iter().enumerate() {
      let others: Vec<Rule> = rules.iter().enumerate().filter(|(j, _)| *j != i).map(|(_, r)| r.clone()).collect();
      let lhs_normal = normal_form_unbounded(&others, &rule.lhs);
      assert!(structural_eq(&lhs_normal, &rule.lhs), "rule {rule}'s LHS is reducible by another rule");

      let rhs_normal = normal_form_unbounded(&rules, &rule.rhs);
      assert!(structural_eq(&rhs_normal, &rule.rhs), "rule {rule}'s RHS is not a normal form");
    }
  }

  /// `f(X, Y) = f(Y, X)` is unorientable under any RPO, because `X` and `Y` are distinct variables and so
  /// incomparable no matter the status.
  #[test]
  fn symmetric_equation_is_unorientable() {
    let mut source = VariableSource::new();
    let x = Term::var(source.fresh());
    let y = Term::var(source.fresh());
    let f = sym("f");
    let equations = vec![Equation::new(Term::app(f, vec![x.clone(), y.clone()]), Term::app(f, vec![y, x]))];

    let ordering = RpoOrdering { precedence: vec![f], status: StatusMap::from([(f, Status::Lex)]) };
    let mut budget = Budget::new(1_000);
    let result = completion(equations, &ordering, &mut budget);
    assert!(matches!(result, Err(CompletionError::Unorientable { .. })));
  }

  #[test]
  fn equations_trs_finds_an_ordering_for_the_group_axioms() {
    let mut source = VariableSource::new();
    let equations = build_group_axioms(&mut source);
    let rules = equations_trs(equations, 200_000).expect("some symbol ordering should complete");
    assert!(!rules.is_empty());
  }
}
