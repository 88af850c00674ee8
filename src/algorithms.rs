pub mod convex_hull;

#[doc(inline)]
pub use convex_hull::quickhull::{
  compute_hull, convex_hull, hull_steps, HullBuilder, HullObserver, StepRecorder,
};
