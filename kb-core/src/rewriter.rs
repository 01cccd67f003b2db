/*!

Root rewriting (`step`) and innermost normal-form reduction (`normal_form`). `step` only ever rewrites at the
root of the term it is given; the full traversal in `normal_form` is what makes innermost reduction happen.
The rule list's order matters only here, via first-match policy: a convergent TRS's normal forms don't depend
on it, but `step` must never reorder the list mid-traversal to "optimize" a single `normal_form` call (doing
so would break the first-match semantics completion relies on).

*/

use std::rc::Rc;

use kb_abs::tracing;

use crate::budget::Budget;
use crate::error::CompletionError;
use crate::rule::Rule;
use crate::substitution::substitute;
use crate::term::{Term, TermPtr, VariableSource};
use crate::unify::matches_pattern;

/// Tries each rule in order; for the first whose LHS (after fresh renaming) matches `term` at the root,
/// returns the correspondingly instantiated RHS. `None` means *irreducible-at-root*, an ordinary outcome.
pub fn step(
  rules: &[Rule],
  term: &TermPtr,
  source: &mut VariableSource,
  budget: &mut Budget,
) -> Result<Option<TermPtr>, CompletionError> {
  for rule in rules {
    budget.tick()?;
    let renamed = rule.fresh_rename(source);
    if let Some(subst) = matches_pattern(&renamed.lhs, term) {
      tracing::trace!(rule = %renamed, term = %term, "root rewrite");
      return Ok(Some(substitute(&renamed.rhs, &subst)));
    }
  }
  Ok(None)
}

/// Innermost reduction to a term in normal form under `rules`: recursively normalize each argument, then
/// attempt root rewriting; if it succeeds, recurse on the result. Termination is only guaranteed when
/// `rules` were produced by completion under a reduction ordering — for arbitrary rule sets, callers must
/// bound this with `budget`.
pub fn normal_form(
  rules: &[Rule],
  term: &TermPtr,
  source: &mut VariableSource,
  budget: &mut Budget,
) -> Result<TermPtr, CompletionError> {
  match term.as_ref() {
    Term::Var(_) => Ok(term.clone()),
    Term::App(f, args) => {
      let mut normalized_args = Vec::with_capacity(args.len());
      for arg in args {
        normalized_args.push(normal_form(rules, arg, source, budget)?);
      }

      let rebuilt = if normalized_args.iter().zip(args.iter()).all(|(a, b)| Rc::ptr_eq(a, b)) {
        term.clone()
      } else {
        Term::app(*f, normalized_args)
      };

      match step(rules, &rebuilt, source, budget)? {
        Some(next) => normal_form(rules, &next, source, budget),
        None => Ok(rebuilt),
      }
    }
  }
}

/// Convenience wrapper around `normal_form` with a fresh variable source and an unlimited budget. Intended
/// for convergent rule sets; for arbitrary rule sets prefer `normal_form` with an explicit `Budget`.
pub fn normal_form_unbounded(rules: &[Rule], term: &TermPtr) -> TermPtr {
  let mut source = VariableSource::new();
  let mut budget = Budget::unlimited();
  normal_form(rules, term, &mut source, &mut budget).expect("an unlimited budget never exhausts")
}


#[cfg(test)]
mod properties {
  use super::*;
  use crate::symbol::Symbol;
  use crate::term::structural_eq;
  use proptest::prelude::*;

  fn convergent_rules() -> Vec<Rule> {
    let mut source = VariableSource::new();
    let x = Term::var(source.fresh());
    let f = |a: TermPtr| Term::app(Symbol::new("f"), vec![a]);
    let g = |a: TermPtr| Term::app(Symbol::new("g"), vec![a]);
    vec![Rule::new(f(f(x.clone())), g(x)).unwrap()]
  }

  fn arb_term() -> impl Strategy<Value = TermPtr> {
    let leaf = Just(Term::constant(Symbol::new("a")));
    leaf.prop_recursive(6, 32, 1, |inner| {
      prop_oneof![
        inner.clone().prop_map(|a| Term::app(Symbol::new("f"), vec![a])),
        inner.prop_map(|a| Term::app(Symbol::new("g"), vec![a])),
      ]
    })
  }

  proptest! {
    /// `normal_form(R, normal_form(R, t))` is the same term as `normal_form(R, t)`: a normal form, once
    /// reached, is left alone.
    #[test]
    fn normal_form_is_idempotent(t in arb_term()) {
      let rules = convergent_rules();
      let once = normal_form_unbounded(&rules, &t);
      let twice = normal_form_unbounded(&rules, &once);
      prop_assert!(structural_eq(&once, &twice));
    }
  }
}
