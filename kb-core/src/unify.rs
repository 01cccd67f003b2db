/*!

Most general unification with a mandatory occurs check, and one-sided matching (subsumption). Occurs check is
not optional here: without it, critical-pair generation over terms like `f(X)` unified against `X` would
admit infinite terms and corrupt completion.

*/

use crate::budget::Budget;
use crate::error::CompletionError;
use crate::substitution::{substitute, walk, Substitution};
use crate::term::{contains_var, Term, TermPtr, VariableId};

/// `unify(s, t)`: a most general unifier under occurs check, or `None` if `s` and `t` do not unify. Failure
/// to unify is an ordinary outcome, not an error; only budget exhaustion is surfaced as `Err`.
pub fn unify(s: &TermPtr, t: &TermPtr, budget: &mut Budget) -> Result<Option<Substitution>, CompletionError> {
  let mut subst = Substitution::new();
  if unify_step(s, t, &mut subst, budget)? {
    Ok(Some(subst))
  } else {
    Ok(None)
  }
}

fn unify_step(s: &TermPtr, t: &TermPtr, subst: &mut Substitution, budget: &mut Budget) -> Result<bool, CompletionError> {
  budget.tick()?;
  let s = walk(s, subst);
  let t = walk(t, subst);

  match (s.as_ref(), t.as_ref()) {
    (Term::Var(a), Term::Var(b)) if a == b => Ok(true),
    (Term::Var(a), _) => bind_var(*a, t.clone(), subst),
    (_, Term::Var(b)) => bind_var(*b, s.clone(), subst),
    (Term::App(f, fargs), Term::App(g, gargs)) => {
      if f != g || fargs.len() != gargs.len() {
        return Ok(false);
      }
      for (x, y) in fargs.iter().zip(gargs.iter()) {
        if !unify_step(x, y, subst, budget)? {
          return Ok(false);
        }
      }
      Ok(true)
    }
  }
}

fn bind_var(v: VariableId, term: TermPtr, subst: &mut Substitution) -> Result<bool, CompletionError> {
  if occurs(v, &term, subst) {
    return Ok(false);
  }
  subst.bind(v, term);
  Ok(true)
}

fn occurs(v: VariableId, term: &TermPtr, subst: &Substitution) -> bool {
  let term = walk(term, subst);
  match term.as_ref() {
    Term::Var(w) => *w == v,
    Term::App(_, args) => args.iter().any(|a| occurs(v, a, subst)),
  }
}

/// `matches(pattern, term)` (subsumption): one-sided unification where only `pattern`'s variables may bind;
/// variables occurring in `term` are treated as opaque constants, never bound.
pub fn matches_pattern(pattern: &TermPtr, term: &TermPtr) -> Option<Substitution> {
  let mut subst = Substitution::new();
  if matches_with(pattern, term, &mut subst) {
    Some(subst)
  } else {
    None
  }
}

fn matches_with(pattern: &TermPtr, term: &TermPtr, subst: &mut Substitution) -> bool {
  match pattern.as_ref() {
    Term::Var(v) => match subst.get(*v) {
      Some(bound) => crate::term::structural_eq(bound, term),
      None => {
        subst.bind(*v, term.clone());
        true
      }
    },
    Term::App(f, fargs) => match term.as_ref() {
      Term::App(g, gargs) if f == g && fargs.len() == gargs.len() => {
        fargs.iter().zip(gargs.iter()).all(|(p, t)| matches_with(p, t, subst))
      }
      _ => false,
    },
  }
}

/// Applies `pattern`'s bindings produced by a successful `matches` to `replacement`. Convenience used by the
/// rewriter: `substitute(replacement, &matches_pattern(pattern, term)?)`.
pub fn instantiate(replacement: &TermPtr, subst: &Substitution) -> TermPtr {
  substitute(replacement, subst)
}
