use anyhow::{bail, Context, Result};
use clap::Parser;
use ordered_float::NotNan;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use quickhull_trace::algorithms::compute_hull;
use quickhull_trace::data::{Hull, Point};

mod braille;
use braille::BrailleCanvas;

#[derive(Parser, Debug)]
#[command(name = "quickhull")]
#[command(about = "Watch Quick Hull build a convex hull, one insertion at a time")]
struct Cmd {
  /// Number of random points; must be greater than 2
  #[arg(long, short = 'n', default_value_t = 16)]
  points: usize,
  /// Canvas width in pixels (two pixels per output column)
  #[arg(long, default_value_t = 128)]
  width: u32,
  /// Canvas height in pixels (four pixels per output row)
  #[arg(long, default_value_t = 64)]
  height: u32,
  /// Seed for the point generator
  #[arg(long)]
  seed: Option<u64>,
  /// Read whitespace separated `x y` lines instead of generating points ('-' for stdin)
  #[arg(long)]
  input: Option<PathBuf>,
  /// Only print the finished hull
  #[arg(long)]
  final_only: bool,
}

fn main() -> Result<()> {
  env_logger::init();
  let cmd = Cmd::parse();
  if cmd.width < 2 || cmd.height < 2 {
    bail!("the canvas must be at least 2x2 pixels");
  }

  let pts = match &cmd.input {
    Some(path) => read_points(path)?,
    None => random_points(&cmd)?,
  };
  let viewport = Viewport::fit(&pts, cmd.width, cmd.height);

  let stdout = io::stdout();
  let mut out = stdout.lock();
  let mut steps = 0;
  let mut write_err = None;
  let hull = compute_hull(&pts, |view, all| {
    steps += 1;
    if cmd.final_only || write_err.is_some() {
      return;
    }
    if let Err(err) = print_step(&mut out, steps, &view.to_hull(), all, &viewport) {
      write_err = Some(err);
    }
  })?;
  if let Some(err) = write_err {
    return Err(err).context("writing step");
  }
  if cmd.final_only {
    print_step(&mut out, steps, &hull, &pts, &viewport)?;
  }
  log::info!(
    "{} steps, {} of {} points on the hull",
    steps,
    hull.len(),
    pts.len()
  );
  Ok(())
}

fn random_points(cmd: &Cmd) -> Result<Vec<Point<f64>>> {
  if cmd.points <= 2 {
    bail!("number of points must be greater than 2, got {}", cmd.points);
  }
  let mut rng = match cmd.seed {
    Some(seed) => SmallRng::seed_from_u64(seed),
    None => SmallRng::from_entropy(),
  };
  let pts = (0..cmd.points)
    .map(|_| {
      Point::new([
        f64::from(rng.gen_range(0..cmd.width)),
        f64::from(rng.gen_range(0..cmd.height)),
      ])
    })
    .collect();
  log::debug!("generated {} points (seed {:?})", cmd.points, cmd.seed);
  Ok(pts)
}

fn read_points(path: &Path) -> Result<Vec<Point<f64>>> {
  let mut text = String::new();
  if path == Path::new("-") {
    io::stdin()
      .read_to_string(&mut text)
      .context("reading points from stdin")?;
  } else {
    text = std::fs::read_to_string(path)
      .with_context(|| format!("reading points from {}", path.display()))?;
  }
  let pts = parse_points(&text)?;
  if pts.len() <= 2 {
    bail!("need more than 2 points, {} has {}", path.display(), pts.len());
  }
  Ok(pts)
}

// One `x y` pair per line. Blank lines and lines starting with '#' are skipped.
fn parse_points(text: &str) -> Result<Vec<Point<f64>>> {
  let mut pts = Vec::new();
  for (lineno, line) in text.lines().enumerate() {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
      continue;
    }
    let fields: Vec<&str> = line.split_whitespace().collect();
    if fields.len() != 2 {
      bail!("line {}: expected `x y`, got {:?}", lineno + 1, line);
    }
    let mut coords = [0.0; 2];
    for (slot, field) in coords.iter_mut().zip(&fields) {
      let value: f64 = field
        .parse()
        .with_context(|| format!("line {}: bad number {:?}", lineno + 1, field))?;
      let value = NotNan::new(value).with_context(|| format!("line {}: NaN", lineno + 1))?;
      if value.is_infinite() {
        bail!("line {}: coordinates must be finite", lineno + 1);
      }
      *slot = value.into_inner();
    }
    pts.push(Point::new(coords));
  }
  Ok(pts)
}

/// Maps point coordinates onto canvas pixels.
#[derive(Debug, Clone, Copy)]
struct Viewport {
  min: [f64; 2],
  scale: [f64; 2],
  width: u32,
  height: u32,
}

impl Viewport {
  fn fit(pts: &[Point<f64>], width: u32, height: u32) -> Viewport {
    let mut min = [f64::INFINITY; 2];
    let mut max = [f64::NEG_INFINITY; 2];
    for pt in pts {
      for i in 0..2 {
        min[i] = min[i].min(pt[i]);
        max[i] = max[i].max(pt[i]);
      }
    }
    let size = [f64::from(width - 1), f64::from(height - 1)];
    let mut scale = [0.0; 2];
    for i in 0..2 {
      let span = max[i] - min[i];
      if span > 0.0 {
        scale[i] = size[i] / span;
      }
    }
    // Keep the aspect ratio unless one axis is flat.
    if scale[0] > 0.0 && scale[1] > 0.0 {
      let uniform = scale[0].min(scale[1]);
      scale = [uniform, uniform];
    }
    Viewport {
      min,
      scale,
      width,
      height,
    }
  }

  fn project(&self, pt: &Point<f64>) -> (i32, i32) {
    let x = (pt[0] - self.min[0]) * self.scale[0];
    let y = (pt[1] - self.min[1]) * self.scale[1];
    (x.round() as i32, y.round() as i32)
  }

  fn canvas(&self) -> BrailleCanvas {
    BrailleCanvas::new(self.width as usize, self.height as usize)
  }
}

fn print_step<W: Write>(
  out: &mut W,
  step: usize,
  hull: &Hull,
  pts: &[Point<f64>],
  viewport: &Viewport,
) -> io::Result<()> {
  writeln!(out, "step {}: {} points on the hull", step, hull.len())?;
  let path: Vec<String> = hull.points(pts).map(|pt| pt.to_string()).collect();
  writeln!(out, "  {}", path.join(" -> "))?;

  let mut canvas = viewport.canvas();
  for pt in pts {
    canvas.plot(viewport.project(pt));
  }
  for (src, dst) in hull.edges() {
    canvas.line(
      viewport.project(&pts[src.usize()]),
      viewport.project(&pts[dst.usize()]),
    );
  }
  write!(out, "{}", canvas)?;
  writeln!(out)
}

#[cfg(test)]
mod tests {
  use super::*;
  use quickhull_trace::algorithms::convex_hull;

  #[test]
  fn parse_skips_comments() {
    let pts = parse_points("# square\n0 0\n\n4 0\n 4 4 \n0 4\n").unwrap();
    assert_eq!(pts.len(), 4);
    assert_eq!(pts[2], Point::new([4.0, 4.0]));
  }

  #[test]
  fn parse_rejects_bad_lines() {
    assert!(parse_points("1 2 3\n").is_err());
    assert!(parse_points("1 x\n").is_err());
    assert!(parse_points("NaN 1\n").is_err());
    assert!(parse_points("inf 1\n").is_err());
  }

  #[test]
  fn random_points_need_three() {
    let cmd = Cmd::parse_from(["quickhull", "-n", "2"]);
    assert!(random_points(&cmd).is_err());
  }

  #[test]
  fn random_points_are_seeded_and_on_canvas() {
    let cmd = Cmd::parse_from(["quickhull", "-n", "50", "--seed", "3", "--width", "20"]);
    let first = random_points(&cmd).unwrap();
    let second = random_points(&cmd).unwrap();
    assert_eq!(first, second);
    assert!(first
      .iter()
      .all(|pt| (0.0..20.0).contains(&pt[0]) && (0.0..64.0).contains(&pt[1])));
  }

  #[test]
  fn viewport_corners() {
    let pts = vec![
      Point::new([-1.0, -1.0]),
      Point::new([1.0, 1.0]),
      Point::new([0.0, 0.0]),
    ];
    let viewport = Viewport::fit(&pts, 11, 11);
    assert_eq!(viewport.project(&pts[0]), (0, 0));
    assert_eq!(viewport.project(&pts[1]), (10, 10));
    assert_eq!(viewport.project(&pts[2]), (5, 5));
  }

  #[test]
  fn viewport_flat_axis() {
    let pts = vec![
      Point::new([0.0, 3.0]),
      Point::new([2.0, 3.0]),
      Point::new([4.0, 3.0]),
    ];
    let viewport = Viewport::fit(&pts, 9, 5);
    assert_eq!(viewport.project(&pts[2]), (8, 0));
  }

  #[test]
  fn print_step_output() {
    let pts = vec![
      Point::new([0.0, 0.0]),
      Point::new([3.0, 0.0]),
      Point::new([0.0, 3.0]),
    ];
    let hull = convex_hull(&pts).unwrap();
    let viewport = Viewport::fit(&pts, 4, 4);
    let mut out = Vec::new();
    print_step(&mut out, 2, &hull, &pts, &viewport).unwrap();
    let text = String::from_utf8(out).unwrap();
    let mut lines = text.lines();
    assert_eq!(lines.next(), Some("step 2: 3 points on the hull"));
    assert_eq!(lines.next(), Some("  (0, 3) -> (0, 0) -> (3, 0)"));
    assert!(lines.any(|line| line.chars().all(|c| ('\u{2800}'..='\u{28FF}').contains(&c))));
  }
}
