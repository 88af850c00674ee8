use std::collections::BTreeSet;
use std::fmt;
use std::iter::FusedIterator;

use super::{Point, PointId, PointLocation};
use crate::{Error, HullScalar, Orientation};

/// Ordered, cyclic sequence of input points forming a convex hull.
///
/// Hulls produced by [`convex_hull`](crate::algorithms::convex_hull) are
/// counter-clockwise when the y axis points up (clockwise on a screen where
/// y grows downwards). The last point connects back to the first. They may
/// contain colinear vertices: when several points tie for the farthest from
/// an edge, the first of them is kept even if it lies between the others.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Hull {
  ids: Vec<PointId>,
}

impl Hull {
  /// $O(1)$ Wrap a sequence of ids without checking it.
  pub fn new_unchecked(ids: Vec<PointId>) -> Hull {
    Hull { ids }
  }

  pub fn len(&self) -> usize {
    self.ids.len()
  }

  pub fn is_empty(&self) -> bool {
    self.ids.is_empty()
  }

  /// True when the hull has no interior: a single point or a line segment.
  pub fn is_degenerate(&self) -> bool {
    self.ids.len() < 3
  }

  /// $O(n)$
  pub fn contains(&self, id: PointId) -> bool {
    self.ids.contains(&id)
  }

  pub fn as_slice(&self) -> &[PointId] {
    &self.ids
  }

  pub fn into_vec(self) -> Vec<PointId> {
    self.ids
  }

  pub fn iter(&self) -> std::iter::Copied<std::slice::Iter<'_, PointId>> {
    self.ids.iter().copied()
  }

  /// Coordinates of the hull vertices, in hull order.
  ///
  /// # Panics
  ///
  /// Panics if `pts` is not the slice the hull was computed from.
  pub fn points<'a, T>(&'a self, pts: &'a [Point<T>]) -> impl Iterator<Item = &'a Point<T>> + 'a {
    self.ids.iter().map(move |id| &pts[id.usize()])
  }

  /// Directed edges `(src, dst)` including the closing edge from the last
  /// vertex back to the first. Single-point hulls have no edges.
  pub fn edges(&self) -> impl Iterator<Item = (PointId, PointId)> + '_ {
    let n = self.ids.len();
    let count = if n < 2 { 0 } else { n };
    (0..count).map(move |i| (self.ids[i], self.ids[(i + 1) % n]))
  }

  /// Rotate the cyclic sequence so that the smallest id comes first.
  ///
  /// Two hulls with the same vertices in the same cyclic order compare equal
  /// after rotation.
  #[must_use]
  pub fn rotate_to_min(mut self) -> Hull {
    if let Some(pos) = self
      .ids
      .iter()
      .enumerate()
      .min_by_key(|(_, id)| **id)
      .map(|(pos, _)| pos)
    {
      self.ids.rotate_left(pos);
    }
    self
  }

  /// $O(n)$ Check that the hull is a strictly convex, counter-clockwise
  /// polygon over `pts` with no repeated points.
  ///
  /// Hulls with fewer than three points only have the repetition check.
  /// Quick Hull output can fail this check: when several points tie for the
  /// farthest, the chosen one may end up as a colinear vertex on an edge.
  /// Use [`Hull::validate_weakly`] for those.
  ///
  /// # Errors
  /// * [`Error::InvalidInput`] if an id is out of range for `pts`.
  /// * [`Error::DuplicatePoints`] if an id occurs twice.
  /// * [`Error::ConvexViolation`] if three consecutive points do not turn
  ///   counter-clockwise.
  pub fn validate<T>(&self, pts: &[Point<T>]) -> Result<(), Error>
  where
    T: HullScalar,
  {
    self.validate_ids(pts.len())?;
    if self.is_degenerate() {
      return Ok(());
    }
    if self.turns(pts).all(|turn| turn.is_ccw()) {
      Ok(())
    } else {
      Err(Error::ConvexViolation)
    }
  }

  /// $O(n)$ Like [`Hull::validate`] but colinear vertices are allowed.
  ///
  /// No three consecutive points may turn clockwise and the polygon must
  /// enclose a positive area. Every hull returned by
  /// [`convex_hull`](crate::algorithms::convex_hull) passes this check.
  ///
  /// # Errors
  /// Same as [`Hull::validate`].
  pub fn validate_weakly<T>(&self, pts: &[Point<T>]) -> Result<(), Error>
  where
    T: HullScalar,
  {
    self.validate_ids(pts.len())?;
    if self.is_degenerate() {
      return Ok(());
    }
    if self.turns(pts).any(|turn| turn.is_cw()) || self.signed_area_2x(pts) <= T::zero() {
      return Err(Error::ConvexViolation);
    }
    Ok(())
  }

  fn validate_ids(&self, len: usize) -> Result<(), Error> {
    let mut seen = BTreeSet::new();
    for &id in &self.ids {
      if id.usize() >= len {
        return Err(Error::InvalidInput);
      }
      if !seen.insert(id) {
        return Err(Error::DuplicatePoints);
      }
    }
    Ok(())
  }

  // Orientation of every consecutive triple, wrapping around.
  fn turns<'a, T>(&'a self, pts: &'a [Point<T>]) -> impl Iterator<Item = Orientation> + 'a
  where
    T: HullScalar,
  {
    let n = self.ids.len();
    (0..n).map(move |i| {
      let p1 = &pts[self.ids[i].usize()];
      let p2 = &pts[self.ids[(i + 1) % n].usize()];
      let p3 = &pts[self.ids[(i + 2) % n].usize()];
      Point::orient(p1, p2, p3)
    })
  }

  fn signed_area_2x<T>(&self, pts: &[Point<T>]) -> T
  where
    T: HullScalar,
  {
    self.edges().fold(T::zero(), |acc, (src, dst)| {
      let (a, b) = (&pts[src.usize()], &pts[dst.usize()]);
      acc + (a[0] * b[1] - b[0] * a[1])
    })
  }

  /// $O(n)$ Locate `pt` relative to the hull polygon.
  ///
  /// Assumes a hull that passes [`Hull::validate_weakly`]. Degenerate hulls are
  /// treated as a point or a line segment, so nothing is ever inside them.
  pub fn locate<T>(&self, pts: &[Point<T>], pt: &Point<T>) -> PointLocation
  where
    T: HullScalar,
  {
    match self.ids.as_slice() {
      [] => PointLocation::Outside,
      [a] => {
        if &pts[a.usize()] == pt {
          PointLocation::OnBoundary
        } else {
          PointLocation::Outside
        }
      }
      [a, b] => locate_segment(&pts[a.usize()], &pts[b.usize()], pt),
      _ => {
        let mut on_edge = false;
        for (src, dst) in self.edges() {
          match Point::orient(&pts[src.usize()], &pts[dst.usize()], pt) {
            Orientation::ClockWise => return PointLocation::Outside,
            Orientation::CoLinear => on_edge = true,
            Orientation::CounterClockWise => {}
          }
        }
        if on_edge {
          PointLocation::OnBoundary
        } else {
          PointLocation::Inside
        }
      }
    }
  }
}

fn locate_segment<T>(a: &Point<T>, b: &Point<T>, pt: &Point<T>) -> PointLocation
where
  T: HullScalar,
{
  if !Point::orient(a, b, pt).is_colinear() {
    return PointLocation::Outside;
  }
  let within = |i: usize| {
    let (lo, hi) = if a[i] <= b[i] { (a[i], b[i]) } else { (b[i], a[i]) };
    lo <= pt[i] && pt[i] <= hi
  };
  if within(0) && within(1) {
    PointLocation::OnBoundary
  } else {
    PointLocation::Outside
  }
}

impl<'a> IntoIterator for &'a Hull {
  type Item = PointId;
  type IntoIter = std::iter::Copied<std::slice::Iter<'a, PointId>>;
  fn into_iter(self) -> Self::IntoIter {
    self.iter()
  }
}

impl From<Hull> for Vec<PointId> {
  fn from(hull: Hull) -> Vec<PointId> {
    hull.ids
  }
}

///////////////////////////////////////////////////////////////////////////////
// HullRing

const NIL: usize = usize::MAX;

/// Doubly-linked ring of point ids, indexed by id.
///
/// Membership and "insert before" are $O(1)$. The head follows array splice
/// semantics: inserting before the head makes the new point the head.
#[derive(Debug, Clone)]
pub(crate) struct HullRing {
  next: Vec<usize>,
  prev: Vec<usize>,
  head: usize,
  len: usize,
}

impl HullRing {
  /// Ring `[first, second]` over ids `0..capacity`. If both ids are the same
  /// the ring holds a single point.
  pub(crate) fn new(capacity: usize, first: PointId, second: PointId) -> HullRing {
    let mut ring = HullRing {
      next: vec![NIL; capacity],
      prev: vec![NIL; capacity],
      head: first.usize(),
      len: 1,
    };
    ring.next[first.usize()] = first.usize();
    ring.prev[first.usize()] = first.usize();
    if first != second {
      ring.insert_before(second, first);
      // Appending at the tail keeps `first` as head.
      ring.head = first.usize();
    }
    ring
  }

  pub(crate) fn len(&self) -> usize {
    self.len
  }

  pub(crate) fn contains(&self, id: PointId) -> bool {
    self.next.get(id.usize()).map_or(false, |&next| next != NIL)
  }

  /// Link `id` into the ring immediately before `anchor`.
  pub(crate) fn insert_before(&mut self, id: PointId, anchor: PointId) {
    debug_assert!(!self.contains(id), "{} is already on the hull", id);
    debug_assert!(self.contains(anchor), "{} is not on the hull", anchor);
    let (id, anchor) = (id.usize(), anchor.usize());
    let before = self.prev[anchor];
    self.next[before] = id;
    self.prev[id] = before;
    self.next[id] = anchor;
    self.prev[anchor] = id;
    if anchor == self.head {
      self.head = id;
    }
    self.len += 1;
  }

  pub(crate) fn iter(&self) -> RingIter<'_> {
    RingIter {
      ring: self,
      cursor: self.head,
      remaining: self.len,
    }
  }

  pub(crate) fn to_hull(&self) -> Hull {
    Hull::new_unchecked(self.iter().collect())
  }
}

pub struct RingIter<'a> {
  ring: &'a HullRing,
  cursor: usize,
  remaining: usize,
}

impl<'a> Iterator for RingIter<'a> {
  type Item = PointId;
  fn next(&mut self) -> Option<PointId> {
    if self.remaining == 0 {
      return None;
    }
    let id = self.cursor;
    self.cursor = self.ring.next[id];
    self.remaining -= 1;
    Some(PointId(id))
  }

  fn size_hint(&self) -> (usize, Option<usize>) {
    (self.remaining, Some(self.remaining))
  }
}

impl<'a> ExactSizeIterator for RingIter<'a> {}
impl<'a> FusedIterator for RingIter<'a> {}

///////////////////////////////////////////////////////////////////////////////
// HullView

/// Borrowed snapshot of a hull that is still being built.
///
/// Handed to observers after every insertion. Use [`HullView::to_hull`] to
/// keep a copy beyond the callback.
#[derive(Clone, Copy)]
pub struct HullView<'a> {
  ring: &'a HullRing,
}

impl<'a> HullView<'a> {
  pub(crate) fn new(ring: &'a HullRing) -> HullView<'a> {
    HullView { ring }
  }

  pub fn len(&self) -> usize {
    self.ring.len()
  }

  pub fn is_empty(&self) -> bool {
    self.ring.len() == 0
  }

  /// $O(1)$
  pub fn contains(&self, id: PointId) -> bool {
    self.ring.contains(id)
  }

  pub fn iter(&self) -> RingIter<'a> {
    self.ring.iter()
  }

  pub fn points<T>(&self, pts: &'a [Point<T>]) -> impl Iterator<Item = &'a Point<T>> + 'a {
    self.ring.iter().map(move |id| &pts[id.usize()])
  }

  /// $O(n)$ Owned copy of the current state.
  pub fn to_hull(&self) -> Hull {
    self.ring.to_hull()
  }
}

impl<'a> fmt::Debug for HullView<'a> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_list().entries(self.iter()).finish()
  }
}

#[cfg(test)]
#[cfg(not(tarpaulin_include))]
mod tests {
  use super::*;

  use claims::{assert_err_eq, assert_ok};

  fn ids(hull: &Hull) -> Vec<usize> {
    hull.iter().map(PointId::usize).collect()
  }

  fn square() -> Vec<Point<i32>> {
    vec![
      Point::new([0, 0]),
      Point::new([4, 0]),
      Point::new([4, 4]),
      Point::new([0, 4]),
    ]
  }

  #[test]
  fn ring_splice_semantics() {
    let mut ring = HullRing::new(5, PointId(0), PointId(1));
    assert_eq!(ids(&ring.to_hull()), vec![0, 1]);
    // Before the head: becomes the new head.
    ring.insert_before(PointId(2), PointId(0));
    assert_eq!(ids(&ring.to_hull()), vec![2, 0, 1]);
    // Before an inner element.
    ring.insert_before(PointId(3), PointId(1));
    assert_eq!(ids(&ring.to_hull()), vec![2, 0, 3, 1]);
    ring.insert_before(PointId(4), PointId(2));
    assert_eq!(ids(&ring.to_hull()), vec![4, 2, 0, 3, 1]);
    assert_eq!(ring.len(), 5);
    assert!(ring.contains(PointId(3)));
  }

  #[test]
  fn ring_single_point() {
    let ring = HullRing::new(3, PointId(1), PointId(1));
    assert_eq!(ids(&ring.to_hull()), vec![1]);
    assert!(!ring.contains(PointId(0)));
    assert!(!ring.contains(PointId(7)));
  }

  #[test]
  fn view_reads_ring() {
    let pts = square();
    let mut ring = HullRing::new(4, PointId(0), PointId(2));
    ring.insert_before(PointId(1), PointId(2));
    let view = HullView::new(&ring);
    assert_eq!(view.len(), 3);
    assert!(view.contains(PointId(1)));
    assert!(!view.contains(PointId(3)));
    assert_eq!(view.iter().len(), 3);
    let coords: Vec<_> = view.points(&pts).copied().collect();
    assert_eq!(coords, vec![pts[0], pts[1], pts[2]]);
    assert_eq!(format!("{:?}", view), "[PointId(0), PointId(1), PointId(2)]");
  }

  #[test]
  fn validate_square() {
    let pts = square();
    let ccw = Hull::new_unchecked(vec![PointId(0), PointId(1), PointId(2), PointId(3)]);
    assert_ok!(ccw.validate(&pts));
    let cw = Hull::new_unchecked(vec![PointId(3), PointId(2), PointId(1), PointId(0)]);
    assert_err_eq!(cw.validate(&pts), Error::ConvexViolation);
    let dup = Hull::new_unchecked(vec![PointId(0), PointId(1), PointId(0)]);
    assert_err_eq!(dup.validate(&pts), Error::DuplicatePoints);
    let oob = Hull::new_unchecked(vec![PointId(0), PointId(9)]);
    assert_err_eq!(oob.validate(&pts), Error::InvalidInput);
  }

  #[test]
  fn validate_rejects_colinear_vertex() {
    let mut pts = square();
    pts.push(Point::new([2, 0]));
    let hull = Hull::new_unchecked(vec![
      PointId(0),
      PointId(4),
      PointId(1),
      PointId(2),
      PointId(3),
    ]);
    assert_err_eq!(hull.validate(&pts), Error::ConvexViolation);
    assert_ok!(hull.validate_weakly(&pts));
    assert_eq!(hull.locate(&pts, &Point::new([1, 0])), PointLocation::OnBoundary);
    assert_eq!(hull.locate(&pts, &Point::new([2, 1])), PointLocation::Inside);
  }

  #[test]
  fn validate_weakly_rejects() {
    let pts = square();
    let cw = Hull::new_unchecked(vec![PointId(3), PointId(2), PointId(1), PointId(0)]);
    assert_err_eq!(cw.validate_weakly(&pts), Error::ConvexViolation);
    let dup = Hull::new_unchecked(vec![PointId(0), PointId(1), PointId(0)]);
    assert_err_eq!(dup.validate_weakly(&pts), Error::DuplicatePoints);
    let line = vec![Point::new([0, 0]), Point::new([1, 0]), Point::new([2, 0])];
    let flat = Hull::new_unchecked(vec![PointId(0), PointId(1), PointId(2)]);
    assert_err_eq!(flat.validate_weakly(&line), Error::ConvexViolation);
  }

  #[test]
  fn locate_square() {
    let pts = square();
    let hull = Hull::new_unchecked(vec![PointId(0), PointId(1), PointId(2), PointId(3)]);
    assert_eq!(hull.locate(&pts, &Point::new([2, 2])), PointLocation::Inside);
    assert_eq!(hull.locate(&pts, &Point::new([4, 2])), PointLocation::OnBoundary);
    assert_eq!(hull.locate(&pts, &Point::new([0, 0])), PointLocation::OnBoundary);
    assert_eq!(hull.locate(&pts, &Point::new([5, 2])), PointLocation::Outside);
    assert_eq!(hull.locate(&pts, &Point::new([6, 0])), PointLocation::Outside);
  }

  #[test]
  fn locate_degenerate() {
    let pts = square();
    let segment = Hull::new_unchecked(vec![PointId(0), PointId(2)]);
    assert_eq!(segment.locate(&pts, &Point::new([1, 1])), PointLocation::OnBoundary);
    assert_eq!(segment.locate(&pts, &Point::new([5, 5])), PointLocation::Outside);
    assert_eq!(segment.locate(&pts, &Point::new([1, 2])), PointLocation::Outside);
    let single = Hull::new_unchecked(vec![PointId(1)]);
    assert_eq!(single.locate(&pts, &Point::new([4, 0])), PointLocation::OnBoundary);
    assert_eq!(single.locate(&pts, &Point::new([4, 1])), PointLocation::Outside);
    assert_eq!(Hull::default().locate(&pts, &Point::new([0, 0])), PointLocation::Outside);
  }

  #[test]
  fn edges_close_the_ring() {
    let hull = Hull::new_unchecked(vec![PointId(2), PointId(0), PointId(1)]);
    let edges: Vec<_> = hull.edges().collect();
    assert_eq!(
      edges,
      vec![
        (PointId(2), PointId(0)),
        (PointId(0), PointId(1)),
        (PointId(1), PointId(2))
      ]
    );
    assert_eq!(Hull::new_unchecked(vec![PointId(4)]).edges().count(), 0);
    assert_eq!(Hull::new_unchecked(vec![PointId(4), PointId(5)]).edges().count(), 2);
  }

  #[test]
  fn rotate_to_min_is_canonical() {
    let a = Hull::new_unchecked(vec![PointId(3), PointId(1), PointId(2)]);
    let b = Hull::new_unchecked(vec![PointId(2), PointId(3), PointId(1)]);
    assert_eq!(a.clone().rotate_to_min(), b.rotate_to_min());
    assert_eq!(ids(&a.rotate_to_min()), vec![1, 2, 3]);
    assert!(Hull::default().rotate_to_min().is_empty());
  }
}
