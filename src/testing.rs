// This module contains strategies for:
//  * points
//  * point sets
// A Strategy is a way to generate a shrinkable value.
use crate::data::Point;

use core::ops::Range;
use proptest::arbitrary::*;
use proptest::collection::*;
use proptest::prelude::*;
use proptest::strategy::*;

type Mapped<I, O> = Map<StrategyFor<I>, fn(_: I) -> O>;

// Small enough that cross products of i64 coordinates never overflow.
const SMALL: Range<i64> = -1_000..1_000;
// Dense grid: lots of duplicates and colinear triples.
const TINY: Range<i64> = -3..4;

///////////////////////////////////////////////////////////////////////////////
// Arbitrary point

impl<T> Arbitrary for Point<T>
where
  T: std::fmt::Debug,
  [T; 2]: Arbitrary,
{
  type Strategy = Mapped<[T; 2], Point<T>>;
  type Parameters = <[T; 2] as Arbitrary>::Parameters;
  fn arbitrary_with(params: Self::Parameters) -> Self::Strategy {
    any_with::<[T; 2]>(params).prop_map(|array| Point { array })
  }
}

///////////////////////////////////////////////////////////////////////////////
// Convenience functions

pub fn any_small() -> impl Strategy<Value = Point<i64>> {
  (SMALL, SMALL).prop_map(|(x, y)| Point::new([x, y]))
}

pub fn any_tiny() -> impl Strategy<Value = Point<i64>> {
  (TINY, TINY).prop_map(|(x, y)| Point::new([x, y]))
}

/// At least three points. Half of the sets come from a tiny grid so that
/// duplicates, colinear input and coincident input show up regularly.
pub fn point_set() -> impl Strategy<Value = Vec<Point<i64>>> {
  prop_oneof![vec(any_small(), 3..100), vec(any_tiny(), 3..20)]
}

/// Same as [`point_set`] with exact integer values stored as `f64`.
pub fn point_set_f64() -> impl Strategy<Value = Vec<Point<f64>>> {
  point_set().prop_map(|pts| pts.iter().map(|pt| pt.cast(|v| v as f64)).collect())
}
