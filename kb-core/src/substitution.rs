/*!

A `Substitution` is a finite map from variables to terms, the binding environment threaded through
unification, matching, and rule application. It is a plain map keyed by `VariableId` rather than an array
indexed by compiled variable slots: this engine never compiles a fixed variable layout ahead of time, since
rules are built and renamed dynamically during completion.

*/

use std::collections::HashMap;
use std::rc::Rc;

use crate::term::{Term, TermPtr, VariableId};

#[derive(Clone, Default, Debug)]
pub struct Substitution {
  bindings: HashMap<VariableId, TermPtr>,
}

impl Substitution {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn get(&self, var: VariableId) -> Option<&TermPtr> {
    self.bindings.get(&var)
  }

  pub fn bind(&mut self, var: VariableId, term: TermPtr) {
    self.bindings.insert(var, term);
  }

  pub fn is_empty(&self) -> bool {
    self.bindings.is_empty()
  }

  pub fn iter(&self) -> impl Iterator<Item = (&VariableId, &TermPtr)> {
    self.bindings.iter()
  }
}

/// Follows a chain of variable-to-variable (or variable-to-bound-term) bindings starting at `term`'s root,
/// without recursing into children. Used by `unify` to see through previously-bound variables before
/// comparing two terms.
pub fn walk(term: &TermPtr, subst: &Substitution) -> TermPtr {
  let mut current = term.clone();
  while let Term::Var(v) = current.as_ref() {
    match subst.get(*v) {
      Some(bound) => current = bound.clone(),
      None => break,
    }
  }
  current
}

/// `substitute(term, binding)`: a term with each variable replaced per the binding environment; variables
/// not in the environment pass through unchanged. Fully resolves chains of bindings (a variable bound to a
/// term that itself contains bound variables), which is what lets `unify`'s triangular substitution be
/// applied directly to produce a flattened result term.
pub fn substitute(term: &TermPtr, subst: &Substitution) -> TermPtr {
  match term.as_ref() {
    Term::Var(v) => match subst.get(*v) {
      Some(bound) => substitute(bound, subst),
      None => term.clone(),
    },
    Term::App(f, args) => {
      let new_args: Vec<TermPtr> = args.iter().map(|a| substitute(a, subst)).collect();
      if new_args.iter().zip(args.iter()).all(|(a, b)| Rc::ptr_eq(a, b)) {
        term.clone()
      } else {
        Term::app(*f, new_args)
      }
    }
  }
}
