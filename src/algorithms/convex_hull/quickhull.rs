use log::{debug, trace};

use crate::data::{Hull, HullRing, HullView, Point, PointId};
use crate::{Error, HullScalar};

// https://en.wikipedia.org/wiki/Quickhull

/// Receives every intermediate hull while [`HullBuilder::build`] runs.
///
/// The view and the point slice are shared borrows: observers can look but
/// cannot change the hull. Any `FnMut(&HullView, &[Point<T>])` closure is an
/// observer.
pub trait HullObserver<T> {
  fn on_step(&mut self, hull: &HullView<'_>, points: &[Point<T>]);
}

impl<T, F> HullObserver<T> for F
where
  F: FnMut(&HullView<'_>, &[Point<T>]),
{
  fn on_step(&mut self, hull: &HullView<'_>, points: &[Point<T>]) {
    self(hull, points)
  }
}

/// Observer that keeps an owned copy of every step.
#[derive(Debug, Clone, Default)]
pub struct StepRecorder {
  steps: Vec<Hull>,
}

impl StepRecorder {
  pub fn new() -> StepRecorder {
    StepRecorder::default()
  }

  pub fn steps(&self) -> &[Hull] {
    &self.steps
  }

  pub fn into_steps(self) -> Vec<Hull> {
    self.steps
  }
}

impl<T> HullObserver<T> for StepRecorder {
  fn on_step(&mut self, hull: &HullView<'_>, _points: &[Point<T>]) {
    self.steps.push(hull.to_hull());
  }
}

/// Quick Hull over a borrowed point set.
///
/// The hull starts as `[leftmost, rightmost]`. Each step inserts the point
/// farthest from the current hull edge immediately before the edge's first
/// point, so the finished hull is counter-clockwise (y axis up).
///
/// # Examples
///
/// ```rust
/// # use quickhull_trace::algorithms::HullBuilder;
/// # use quickhull_trace::data::{HullView, Point, PointId};
/// let pts = vec![
///   Point::new([0, 0]),
///   Point::new([4, 0]),
///   Point::new([2, 3]),
///   Point::new([2, 1]),
/// ];
/// let builder = HullBuilder::new(&pts).unwrap();
/// assert_eq!(builder.leftmost(), PointId::new(0));
/// assert_eq!(builder.rightmost(), PointId::new(1));
///
/// let mut sizes = Vec::new();
/// let hull = builder.build(&mut |hull: &HullView<'_>, _: &[Point<i32>]| sizes.push(hull.len()));
/// assert_eq!(sizes, vec![2, 3]);
/// assert_eq!(hull.len(), 3);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct HullBuilder<'a, T> {
  pts: &'a [Point<T>],
  leftmost: PointId,
  rightmost: PointId,
}

// A pending sub-problem: `subset` lies strictly left of `a -> b`.
struct Task {
  subset: Vec<PointId>,
  a: PointId,
  b: PointId,
}

impl<'a, T> HullBuilder<'a, T>
where
  T: HullScalar,
{
  /// $O(n)$ Pick the extreme points of `pts`.
  ///
  /// # Errors
  /// Will return [`Error::InvalidInput`] iff `pts` has fewer than three points.
  pub fn new(pts: &'a [Point<T>]) -> Result<HullBuilder<'a, T>, Error> {
    if pts.len() < 3 {
      return Err(Error::InvalidInput);
    }
    let leftmost = extreme_point(pts, |p, best| {
      p.x_coord() < best.x_coord() || (p.x_coord() == best.x_coord() && p.y_coord() < best.y_coord())
    });
    let rightmost = extreme_point(pts, |p, best| {
      p.x_coord() > best.x_coord() || (p.x_coord() == best.x_coord() && p.y_coord() > best.y_coord())
    });
    Ok(HullBuilder {
      pts,
      leftmost,
      rightmost,
    })
  }

  /// Smallest x, ties broken by smallest y, then by input order.
  pub fn leftmost(&self) -> PointId {
    self.leftmost
  }

  /// Largest x, ties broken by largest y, then by input order.
  pub fn rightmost(&self) -> PointId {
    self.rightmost
  }

  pub fn points(&self) -> &'a [Point<T>] {
    self.pts
  }

  /// Run the algorithm, reporting the hull to `observer` after the initial
  /// `[leftmost, rightmost]` state and after every insertion.
  ///
  /// Colinear input yields the two-point hull `[leftmost, rightmost]`. If
  /// every point has the same coordinates the hull is the leftmost point
  /// alone.
  pub fn build<O>(&self, observer: &mut O) -> Hull
  where
    O: HullObserver<T> + ?Sized,
  {
    let pts = self.pts;
    let (left, right) = (self.leftmost, self.rightmost);
    debug!(
      "quickhull over {} points: leftmost {}, rightmost {}",
      pts.len(),
      left,
      right
    );

    let mut ring = HullRing::new(pts.len(), left, right);
    observer.on_step(&HullView::new(&ring), pts);
    if left == right {
      return ring.to_hull();
    }

    let mut upper = Vec::new();
    let mut lower = Vec::new();
    for (idx, pt) in pts.iter().enumerate() {
      let id = PointId(idx);
      if id == left || id == right {
        continue;
      }
      let dist = pt.signed_distance(&pts[left.usize()], &pts[right.usize()]);
      if dist > T::zero() {
        upper.push(id);
      } else if dist < T::zero() {
        lower.push(id);
      }
    }

    // LIFO: the upper chain is finished before the lower chain starts.
    let mut pending = vec![
      Task {
        subset: lower,
        a: right,
        b: left,
      },
      Task {
        subset: upper,
        a: left,
        b: right,
      },
    ];
    while let Some(Task { subset, a, b }) = pending.pop() {
      match subset.as_slice() {
        [] => {}
        [only] => {
          insert(&mut ring, *only, a);
          observer.on_step(&HullView::new(&ring), pts);
        }
        _ => {
          let far = farthest_point(pts, &subset, a, b);
          insert(&mut ring, far, a);
          observer.on_step(&HullView::new(&ring), pts);

          let (pa, pf, pb) = (&pts[a.usize()], &pts[far.usize()], &pts[b.usize()]);
          let mut outside_a = Vec::new();
          let mut outside_b = Vec::new();
          for &id in &subset {
            if id == far {
              continue;
            }
            let pt = &pts[id.usize()];
            if pt.signed_distance(pa, pf) > T::zero() {
              outside_a.push(id);
            } else if pt.signed_distance(pf, pb) > T::zero() {
              outside_b.push(id);
            }
          }
          pending.push(Task {
            subset: outside_b,
            a: far,
            b,
          });
          pending.push(Task {
            subset: outside_a,
            a,
            b: far,
          });
        }
      }
    }

    debug!("quickhull done: {} of {} points on the hull", ring.len(), pts.len());
    ring.to_hull()
  }
}

fn insert(ring: &mut HullRing, id: PointId, anchor: PointId) {
  ring.insert_before(id, anchor);
  trace!("inserted {} before {}, hull size {}", id, anchor, ring.len());
}

// O(n)
fn extreme_point<T, F>(pts: &[Point<T>], better: F) -> PointId
where
  F: Fn(&Point<T>, &Point<T>) -> bool,
{
  let mut best = 0;
  for (idx, pt) in pts.iter().enumerate().skip(1) {
    if better(pt, &pts[best]) {
      best = idx;
    }
  }
  PointId(best)
}

// Largest |cross| to the line a -> b. The first point wins ties.
// `subset` must not be empty.
fn farthest_point<T>(pts: &[Point<T>], subset: &[PointId], a: PointId, b: PointId) -> PointId
where
  T: HullScalar,
{
  let (pa, pb) = (&pts[a.usize()], &pts[b.usize()]);
  let mut best = subset[0];
  let mut best_dist = pts[best.usize()].signed_distance(pa, pb).abs();
  for &id in &subset[1..] {
    let dist = pts[id.usize()].signed_distance(pa, pb).abs();
    if dist > best_dist {
      best = id;
      best_dist = dist;
    }
  }
  best
}

/// Convex hull of a set of points with an observer callback.
///
/// `on_step` is called with the hull after it is initialised to
/// `[leftmost, rightmost]` and again after every point insertion.
///
/// # Errors
/// Will return [`Error::InvalidInput`] iff the input has fewer than three points.
///
/// # Examples
///
/// ```rust
/// # use quickhull_trace::algorithms::compute_hull;
/// # use quickhull_trace::data::Point;
/// let pts = vec![
///   Point::new([0., 0.]),
///   Point::new([5., 0.]),
///   Point::new([5., 5.]),
///   Point::new([0., 5.]),
///   Point::new([2., 2.]),
/// ];
/// let mut steps = 0;
/// let hull = compute_hull(&pts, |_hull, _pts| steps += 1).unwrap();
/// assert_eq!(hull.len(), 4);
/// assert_eq!(steps, 3);
/// ```
pub fn compute_hull<T, F>(pts: &[Point<T>], mut on_step: F) -> Result<Hull, Error>
where
  T: HullScalar,
  F: FnMut(&HullView<'_>, &[Point<T>]),
{
  Ok(HullBuilder::new(pts)?.build(&mut on_step))
}

/// $O(n \log n)$ expected. Convex hull of a set of points.
///
/// [Quick Hull][wiki] algorithm for finding the smallest convex polygon
/// which contains all the given points.
///
/// # Errors
/// Will return an error iff the input set contains less than three points.
///
/// # Properties
/// * No points from the input set will be outside the returned hull.
/// * All vertices in the hull are from the input set.
/// * Hulls with three or more vertices are counter-clockwise and never turn
///   clockwise. They may keep colinear vertices: when several points tie for
///   the farthest from an edge, the first in input order is inserted even if
///   it lies between the others, so such a hull passes
///   [`Hull::validate_weakly`] but not [`Hull::validate`].
/// * The strictly convex corners do not depend on input order. Colinear
///   vertices can.
///
/// # Examples
///
/// ```rust
/// # use quickhull_trace::algorithms::convex_hull;
/// # use quickhull_trace::data::Point;
/// # use quickhull_trace::Error;
/// let empty_set: Vec<Point<i32>> = vec![];
/// assert_eq!(convex_hull(&empty_set).err(), Some(Error::InvalidInput));
/// ```
///
/// [wiki]: https://en.wikipedia.org/wiki/Quickhull
pub fn convex_hull<T>(pts: &[Point<T>]) -> Result<Hull, Error>
where
  T: HullScalar,
{
  compute_hull(pts, |_: &HullView<'_>, _: &[Point<T>]| {})
}

/// Convex hull together with an owned copy of every intermediate hull.
///
/// The last step always equals the returned hull.
///
/// # Errors
/// Will return [`Error::InvalidInput`] iff the input has fewer than three points.
pub fn hull_steps<T>(pts: &[Point<T>]) -> Result<(Hull, Vec<Hull>), Error>
where
  T: HullScalar,
{
  let mut recorder = StepRecorder::new();
  let hull = HullBuilder::new(pts)?.build(&mut recorder);
  Ok((hull, recorder.into_steps()))
}
