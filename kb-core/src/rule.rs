/*!

A rewrite rule `L ==> R`. Carries its own variable scope; every use site fresh-renames the rule so that
multiple simultaneous uses of the same rule (e.g. unifying a rule's LHS against itself during critical-pair
generation) never alias variables.

*/

use crate::error::CompletionError;
use crate::term::{fresh_rename_all, term_size, variables_of, Term, TermPtr, VariableSource};

#[derive(Clone, Debug)]
pub struct Rule {
  pub lhs: TermPtr,
  pub rhs: TermPtr,
}

impl Rule {
  /// Constructs a rule, enforcing the two well-formedness conditions of the data model: the LHS is not a
  /// bare variable, and every variable in the RHS occurs in the LHS. Orientation under the active reduction
  /// ordering (`L > R`) is the caller's responsibility — completion only ever builds a `Rule` after checking
  /// that with `rpo`.
  pub fn new(lhs: TermPtr, rhs: TermPtr) -> Result<Rule, CompletionError> {
    if matches!(lhs.as_ref(), Term::Var(_)) {
      return Err(CompletionError::MalformedRule("left-hand side is a bare variable".to_string()));
    }

    let lhs_vars = variables_of(&lhs);
    let rhs_vars = variables_of(&rhs);
    for v in rhs_vars.iter() {
      if !lhs_vars.contains(v) {
        return Err(CompletionError::MalformedRule(
          "right-hand side contains a variable absent from the left-hand side".to_string(),
        ));
      }
    }

    Ok(Rule { lhs, rhs })
  }

  pub fn fresh_rename(&self, source: &mut VariableSource) -> Rule {
    let renamed = fresh_rename_all(&[&self.lhs, &self.rhs], source);
    Rule { lhs: renamed[0].clone(), rhs: renamed[1].clone() }
  }

  pub fn size(&self) -> usize {
    term_size(&self.lhs) + term_size(&self.rhs)
  }
}

impl std::fmt::Display for Rule {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "{} ==> {}", self.lhs, self.rhs)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::symbol::Symbol;
  use crate::term::VariableSource;

  #[test]
  fn rejects_variable_lhs() {
    let mut src = VariableSource::new();
    let x = Term::var(src.fresh());
    let a = Term::constant(Symbol::new("a"));
    assert!(matches!(Rule::new(x, a), Err(CompletionError::MalformedRule(_))));
  }

  #[test]
  fn rejects_unbound_rhs_variable() {
    let mut src = VariableSource::new();
    let x = src.fresh();
    let y = src.fresh();
    let lhs = Term::app(Symbol::new("f"), vec![Term::var(x)]);
    let rhs = Term::var(y);
    assert!(matches!(Rule::new(lhs, rhs), Err(CompletionError::MalformedRule(_))));
  }

  #[test]
  fn fresh_rename_keeps_lhs_and_rhs_variables_consistent() {
    let mut src = VariableSource::new();
    let x = src.fresh();
    let lhs = Term::app(Symbol::new("f"), vec![Term::var(x)]);
    let rhs = Term::var(x);
    let rule = Rule::new(lhs, rhs).unwrap();
    let renamed = rule.fresh_rename(&mut src);

    if let Term::App(_, args) = renamed.lhs.as_ref() {
      assert!(crate::term::structural_eq(&args[0], &renamed.rhs));
    } else {
      panic!("expected application");
    }
  }
}
