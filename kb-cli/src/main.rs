//! Demonstration driver for `kb-core`: builds a handful of hardcoded equation sets through the Rust
//! term-builder API (never by parsing text, which stays out of scope for the library) and runs them
//! through completion.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use kb_core::{
  completion::equations_trs, critical_pairs_unbounded, normal_form_unbounded, structural_eq, Equation, RpoOrdering, Status, StatusMap, Symbol, Term,
  TermPtr, VariableSource,
};

#[derive(Parser)]
#[command(name = "kb-cli", about = "Run a demonstration equation set through Knuth-Bendix completion")]
struct Arguments {
  #[command(subcommand)]
  command: Command,

  /// Step budget given to each completion attempt.
  #[arg(long, default_value_t = 200_000)]
  budget: u64,
}

#[derive(Subcommand)]
enum Command {
  /// The group axioms: `e*X = X`, `i(X)*X = e`, `X*(Y*Z) = (X*Y)*Z`.
  Groups,
  /// The trivial example `f(f(X)) ==> g(X)` reducing `f(f(f(f(a))))`.
  Trivial,
  /// `f(X, Y) = f(Y, X)`, unorientable under any RPO.
  Unorientable,
}

fn main() -> Result<()> {
  tracing_subscriber::fmt::init();

  let args = Arguments::parse();
  match args.command {
    Command::Groups => run_groups(args.budget),
    Command::Trivial => run_trivial(),
    Command::Unorientable => run_unorientable(args.budget),
  }
}

fn star(a: TermPtr, b: TermPtr) -> TermPtr {
  Term::app(Symbol::new("*"), vec![a, b])
}

fn inv(a: TermPtr) -> TermPtr {
  Term::app(Symbol::new("i"), vec![a])
}

fn e() -> TermPtr {
  Term::constant(Symbol::new("e"))
}

fn run_groups(budget: u64) -> Result<()> {
  let mut source = VariableSource::new();

  let x1 = Term::var(source.fresh());
  let eq1 = Equation::new(star(e(), x1.clone()), x1);

  let x2 = Term::var(source.fresh());
  let eq2 = Equation::new(star(inv(x2.clone()), x2), e());

  let x3 = Term::var(source.fresh());
  let y3 = Term::var(source.fresh());
  let z3 = Term::var(source.fresh());
  let eq3 = Equation::new(star(x3.clone(), star(y3.clone(), z3.clone())), star(star(x3, y3), z3));

  let equations = vec![eq1, eq2, eq3];
  let rules = equations_trs(equations, budget).context("completing the group axioms")?;

  println!("Convergent TRS ({} rules):", rules.len());
  for rule in &rules {
    println!("  {rule}");
  }

  let lhs = star(e(), inv(inv(e())));
  let normalized = normal_form_unbounded(&rules, &lhs);
  println!("normal_form(e * i(i(e))) = {normalized}");

  let pairs = critical_pairs_unbounded(&rules);
  println!("{} critical pair(s) among the result, all confluent", pairs.len());
  for pair in &pairs {
    let u = normal_form_unbounded(&rules, &pair.left);
    let v = normal_form_unbounded(&rules, &pair.right);
    assert!(structural_eq(&u, &v), "result TRS was not confluent on {pair}");
  }

  Ok(())
}

fn run_trivial() -> Result<()> {
  let mut source = VariableSource::new();
  let x = Term::var(source.fresh());
  let f = |a: TermPtr| Term::app(Symbol::new("f"), vec![a]);
  let g = |a: TermPtr| Term::app(Symbol::new("g"), vec![a]);
  let a = Term::constant(Symbol::new("a"));

  let rule = kb_core::Rule::new(f(f(x.clone())), g(x)).context("building the trivial rule")?;
  let input = f(f(f(f(a))));
  let normalized = normal_form_unbounded(std::slice::from_ref(&rule), &input);
  println!("normal_form(f(f(f(f(a))))) = {normalized}");
  Ok(())
}

fn run_unorientable(budget: u64) -> Result<()> {
  let mut source = VariableSource::new();
  let x = Term::var(source.fresh());
  let y = Term::var(source.fresh());
  let f = Symbol::new("f");
  let equations = vec![Equation::new(Term::app(f, vec![x.clone(), y.clone()]), Term::app(f, vec![y, x]))];

  let ordering = RpoOrdering { precedence: vec![f], status: StatusMap::from([(f, Status::Lex)]) };
  let mut bounded = kb_core::Budget::new(budget);
  match kb_core::run_completion(equations, &ordering, &mut bounded) {
    Ok(rules) => println!("unexpectedly completed with {} rules", rules.len()),
    Err(err) => println!("completion failed as expected: {err}"),
  }
  Ok(())
}
