// #![deny(warnings)]
#![deny(clippy::cast_lossless)]
#![doc(test(no_crate_inject))]
//! Quick Hull convex hulls that can be watched while they are built.
//!
//! The entry points live in [`algorithms`]: [`algorithms::convex_hull`] for the
//! plain result, [`algorithms::compute_hull`] to observe every intermediate
//! hull, and [`algorithms::hull_steps`] to collect the intermediate hulls as
//! owned values.
//!
//! ```rust
//! # use quickhull_trace::algorithms::convex_hull;
//! # use quickhull_trace::data::Point;
//! let pts = vec![
//!   Point::new([0., 0.]),
//!   Point::new([5., 0.]),
//!   Point::new([5., 5.]),
//!   Point::new([0., 5.]),
//!   Point::new([2., 2.]),
//! ];
//! let hull = convex_hull(&pts).unwrap();
//! assert_eq!(hull.len(), 4);
//! ```
use num_traits::Signed;
use std::fmt::Debug;

pub mod algorithms;
pub mod data;
mod orientation;

pub use orientation::Orientation;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
  /// Fewer than three points were supplied.
  InvalidInput,
  DuplicatePoints,
  /// Two consecutive hull edges are either colinear or oriented clockwise.
  ConvexViolation,
}

impl std::fmt::Display for Error {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> Result<(), std::fmt::Error> {
    match self {
      Error::InvalidInput => write!(f, "At least three points are required"),
      Error::DuplicatePoints => write!(f, "Duplicate points"),
      Error::ConvexViolation => write!(f, "Convex violation"),
    }
  }
}

impl std::error::Error for Error {}

/// Coordinate type of a [`Point`](data::Point).
///
/// Any signed, copyable number works: `f64`, `f32` and the signed integers.
/// Fixed-precision types may overflow when the coordinates are large since
/// the side test multiplies two coordinate differences.
pub trait HullScalar: Signed + PartialOrd + Copy + Debug {}

impl<T> HullScalar for T where T: Signed + PartialOrd + Copy + Debug {}

#[cfg(test)]
pub mod testing;
