use rand::distributions::{Distribution, Standard};
use rand::Rng;
use std::fmt;
use std::ops::Deref;
use std::ops::Index;

use crate::orientation::cross;
use crate::{HullScalar, Orientation};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct Point<T> {
  pub array: [T; 2],
}

/// Identity of a point: its index in the input slice.
///
/// Hulls store ids rather than coordinates, so two input points with equal
/// coordinates are still two distinct hull candidates.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PointId(pub(crate) usize);

impl PointId {
  pub const fn new(index: usize) -> PointId {
    PointId(index)
  }

  pub fn usize(self) -> usize {
    self.0
  }
}

impl From<usize> for PointId {
  fn from(index: usize) -> PointId {
    PointId(index)
  }
}

impl fmt::Display for PointId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "#{}", self.0)
  }
}

// Random sampling.
impl<T> Distribution<Point<T>> for Standard
where
  Standard: Distribution<T>,
{
  fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Point<T> {
    Point {
      array: [rng.gen(), rng.gen()],
    }
  }
}

impl<T> Point<T> {
  pub const fn new(array: [T; 2]) -> Point<T> {
    Point { array }
  }

  pub fn x_coord(&self) -> &T {
    &self.array[0]
  }

  pub fn y_coord(&self) -> &T {
    &self.array[1]
  }

  pub fn cast<U, F>(&self, f: F) -> Point<U>
  where
    T: Clone,
    F: Fn(T) -> U,
  {
    Point {
      array: [f(self.array[0].clone()), f(self.array[1].clone())],
    }
  }
}

impl<T> Point<T>
where
  T: HullScalar,
{
  /// Signed, unnormalized distance from `self` to the directed line `a -> b`.
  ///
  /// Positive when `self` is to the left of `a -> b`, negative when it is to
  /// the right and zero when the three points are colinear. The magnitude is
  /// twice the area of the triangle `(a, b, self)`, which is proportional to
  /// the perpendicular distance for a fixed line.
  ///
  /// Warning: May cause arithmetic overflow for fixed-precision types.
  ///
  /// ```rust
  /// # use quickhull_trace::data::Point;
  /// let a = Point::new([0, 0]);
  /// let b = Point::new([4, 0]);
  /// assert_eq!(Point::new([1, 3]).signed_distance(&a, &b), 12);
  /// assert_eq!(Point::new([1, -3]).signed_distance(&a, &b), -12);
  /// assert_eq!(Point::new([9, 0]).signed_distance(&a, &b), 0);
  /// ```
  pub fn signed_distance(&self, a: &Point<T>, b: &Point<T>) -> T {
    cross(&self.array, &a.array, &b.array)
  }

  /// Turn direction when walking from `p1` to `p2` to `p3`.
  pub fn orient(p1: &Point<T>, p2: &Point<T>, p3: &Point<T>) -> Orientation {
    Orientation::new(&p1.array, &p2.array, &p3.array)
  }

  pub fn orientation(&self, q: &Point<T>, r: &Point<T>) -> Orientation {
    Orientation::new(&self.array, &q.array, &r.array)
  }
}

impl<T> Index<usize> for Point<T> {
  type Output = T;
  fn index(&self, key: usize) -> &T {
    self.array.index(key)
  }
}

impl<T> Deref for Point<T> {
  type Target = [T; 2];
  fn deref(&self) -> &[T; 2] {
    &self.array
  }
}

impl<T> From<(T, T)> for Point<T> {
  fn from(point: (T, T)) -> Point<T> {
    Point {
      array: [point.0, point.1],
    }
  }
}

impl<T> From<[T; 2]> for Point<T> {
  fn from(array: [T; 2]) -> Point<T> {
    Point { array }
  }
}

impl<T: fmt::Display> fmt::Display for Point<T> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "({}, {})", self.array[0], self.array[1])
  }
}
