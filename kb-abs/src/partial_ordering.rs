/*!

A version of `std::cmp::Ordering` that also has an `Incomparable` case, for orderings (like RPO) that are not
total. In the Maude source this would be called a `ReturnValue`; we just reuse `Option<Ordering>` and give the
`None` case a name.

*/
use std::cmp::Ordering;

#[allow(non_snake_case)]
pub mod PartialOrdering {
  #![allow(non_upper_case_globals)]

  use std::cmp::Ordering;

  pub const Greater: Option<Ordering> = Some(Ordering::Greater);
  pub const Less: Option<Ordering> = Some(Ordering::Less);
  pub const Equal: Option<Ordering> = Some(Ordering::Equal);
  pub const Incomparable: Option<Ordering> = None;

  /// True iff `a` is strictly less than `b` under a `PartialOrdering` result.
  #[inline(always)]
  pub fn is_less(ordering: Option<Ordering>) -> bool {
    matches!(ordering, Less)
  }

  /// True iff `a` is strictly greater than `b` under a `PartialOrdering` result.
  #[inline(always)]
  pub fn is_greater(ordering: Option<Ordering>) -> bool {
    matches!(ordering, Greater)
  }

  /// The symmetric counterpart of a comparison: flips `<`/`>`, leaves `=`/`Incomparable` alone.
  #[inline(always)]
  pub fn flip(ordering: Option<Ordering>) -> Option<Ordering> {
    match ordering {
      Greater => Less,
      Less => Greater,
      other => other,
    }
  }
}
