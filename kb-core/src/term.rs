/*!

First-order terms with logical variables. A term is either a variable (a freely-allocated opaque handle, never
compared by name) or the application of a function symbol to an ordered, possibly empty, sequence of argument
subterms. Constants are applications with zero arguments.

Terms are immutable and held behind `Rc` so substitution and fresh renaming can share any subtree that didn't
change.

*/

use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use kb_abs::VarSet;

use crate::symbol::Symbol;

/// An opaque, freely-allocated variable handle. Two variables are the same variable iff they carry the same
/// id; display names are not part of the data model.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct VariableId(u32);

impl fmt::Debug for VariableId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "#{}", self.0)
  }
}

/// Owns the monotonic counter that mints fresh `VariableId`s. Every completion run owns exactly one of these;
/// there is no global variable counter.
#[derive(Debug, Default)]
pub struct VariableSource {
  next: u32,
}

impl VariableSource {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn fresh(&mut self) -> VariableId {
    let id = VariableId(self.next);
    self.next = self.next.checked_add(1).expect("variable counter overflowed");
    id
  }
}

#[derive(Debug)]
pub enum Term {
  Var(VariableId),
  App(Symbol, Vec<TermPtr>),
}

pub type TermPtr = Rc<Term>;

impl Term {
  pub fn var(id: VariableId) -> TermPtr {
    Rc::new(Term::Var(id))
  }

  pub fn app(symbol: Symbol, args: Vec<TermPtr>) -> TermPtr {
    Rc::new(Term::App(symbol, args))
  }

  pub fn constant(symbol: Symbol) -> TermPtr {
    Term::app(symbol, Vec::new())
  }
}

/// `structural_eq(s, t)`: identical tree shape and identical variable identities.
pub fn structural_eq(s: &TermPtr, t: &TermPtr) -> bool {
  if Rc::ptr_eq(s, t) {
    return true;
  }
  match (s.as_ref(), t.as_ref()) {
    (Term::Var(a), Term::Var(b)) => a == b,
    (Term::App(f, fargs), Term::App(g, gargs)) => {
      f == g && fargs.len() == gargs.len() && fargs.iter().zip(gargs.iter()).all(|(x, y)| structural_eq(x, y))
    }
    _ => false,
  }
}

/// `variables_of(term)`: the set of variables occurring in the term.
pub fn variables_of(term: &TermPtr) -> VarSet {
  let mut set = VarSet::new();
  collect_variables(term, &mut set);
  set
}

fn collect_variables(term: &TermPtr, set: &mut VarSet) {
  match term.as_ref() {
    Term::Var(v) => {
      set.insert(v.0 as usize);
    }
    Term::App(_, args) => {
      for arg in args {
        collect_variables(arg, set);
      }
    }
  }
}

/// Does `v` occur anywhere in `term`? Unlike `unify`'s occurs check this never chases a substitution; it is a
/// plain structural membership test, used by `rpo`'s variable case.
pub fn contains_var(v: VariableId, term: &TermPtr) -> bool {
  match term.as_ref() {
    Term::Var(w) => *w == v,
    Term::App(_, args) => args.iter().any(|arg| contains_var(v, arg)),
  }
}

/// The number of nodes (variables and applications) in `term`, used by completion to pick the smallest-size
/// rule from the fresh-rule set.
pub fn term_size(term: &TermPtr) -> usize {
  match term.as_ref() {
    Term::Var(_) => 1,
    Term::App(_, args) => 1 + args.iter().map(term_size).sum::<usize>(),
  }
}

/// `fresh_rename(term)`: a copy with every variable replaced by a freshly allocated variable, preserving
/// shared occurrences of the same variable within the term.
pub fn fresh_rename(term: &TermPtr, source: &mut VariableSource) -> TermPtr {
  let mut mapping = HashMap::new();
  fresh_rename_with(term, source, &mut mapping)
}

/// Renames several terms (e.g. a rule's LHS and RHS) sharing one mapping, so the same variable in both terms
/// is renamed consistently.
pub fn fresh_rename_all(terms: &[&TermPtr], source: &mut VariableSource) -> Vec<TermPtr> {
  let mut mapping = HashMap::new();
  terms.iter().map(|t| fresh_rename_with(t, source, &mut mapping)).collect()
}

fn fresh_rename_with(term: &TermPtr, source: &mut VariableSource, mapping: &mut HashMap<VariableId, VariableId>) -> TermPtr {
  match term.as_ref() {
    Term::Var(v) => {
      let renamed = *mapping.entry(*v).or_insert_with(|| source.fresh());
      Term::var(renamed)
    }
    Term::App(f, args) => {
      let new_args: Vec<TermPtr> = args.iter().map(|a| fresh_rename_with(a, source, mapping)).collect();
      Term::app(*f, new_args)
    }
  }
}

impl fmt::Display for Term {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Term::Var(v) => write!(f, "X{}", v.0),
      Term::App(sym, args) if args.is_empty() => write!(f, "{sym}"),
      Term::App(sym, args) => {
        write!(f, "{sym}(")?;
        for (i, arg) in args.iter().enumerate() {
          if i > 0 {
            write!(f, ", ")?;
          }
          write!(f, "{arg}")?;
        }
        write!(f, ")")
      }
    }
  }
}
