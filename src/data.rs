mod hull;
pub(crate) mod point;

pub(crate) use hull::HullRing;
pub use hull::{Hull, HullView, RingIter};
pub use point::{Point, PointId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum PointLocation {
  Inside,
  OnBoundary,
  Outside,
}
