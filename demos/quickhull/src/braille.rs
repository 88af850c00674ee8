use std::fmt;

/// A monochrome pixel canvas printed with Braille Unicode symbols.
///
/// Braille characters (U+2800 to U+28FF) encode 2×4 dot patterns. Each
/// character covers a 2-pixel-wide by 4-pixel-tall cell, so a 128×64 pixel
/// canvas prints as 64 columns by 16 rows.
///
/// # Braille Dot Numbering
///
/// Standard Braille numbering:
/// ```text
/// 1  4
/// 2  5
/// 3  6
/// 7  8
/// ```
///
/// Pixel `(0, 0)` is the top-left corner, y grows downwards.
pub struct BrailleCanvas {
  width: usize,
  height: usize,
  grid: Vec<Vec<bool>>,
}

impl BrailleCanvas {
  pub fn new(width: usize, height: usize) -> Self {
    BrailleCanvas {
      width,
      height,
      grid: vec![vec![false; width]; height],
    }
  }

  /// Set a single pixel. Pixels outside the canvas are ignored.
  pub fn plot(&mut self, (x, y): (i32, i32)) {
    if x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height {
      self.grid[y as usize][x as usize] = true;
    }
  }

  pub fn line(&mut self, from: (i32, i32), to: (i32, i32)) {
    for px in LinePixels::new(from, to) {
      self.plot(px);
    }
  }

  fn is_set(&self, x: usize, y: usize) -> bool {
    y < self.height && x < self.width && self.grid[y][x]
  }

  fn render(&self) -> String {
    let rows = self.height.div_ceil(4);
    let cols = self.width.div_ceil(2);
    let mut out = String::with_capacity(rows * (cols * 3 + 1));
    for row in 0..rows {
      for col in 0..cols {
        let bits = CELL_BITS
          .iter()
          .filter(|&&(dx, dy, _)| self.is_set(col * 2 + dx, row * 4 + dy))
          .fold(0u32, |acc, &(_, _, bit)| acc | bit);
        out.push(char::from_u32(BLANK + bits).unwrap_or(' '));
      }
      out.push('\n');
    }
    out
  }
}

// The empty Braille cell.
const BLANK: u32 = 0x2800;

// (dx, dy, bit) for every dot of a 2x4 cell. The bottom row (dots 7 and 8)
// uses the two high bits.
const CELL_BITS: [(usize, usize, u32); 8] = [
  (0, 0, 1 << 0),
  (0, 1, 1 << 1),
  (0, 2, 1 << 2),
  (1, 0, 1 << 3),
  (1, 1, 1 << 4),
  (1, 2, 1 << 5),
  (0, 3, 1 << 6),
  (1, 3, 1 << 7),
];

impl fmt::Display for BrailleCanvas {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.render())
  }
}

/// Pixels of the segment `from -> to`, both ends included, in order.
///
/// Integer Bresenham stepping that works in every octant.
struct LinePixels {
  at: (i32, i32),
  to: (i32, i32),
  step: (i32, i32),
  delta: (i32, i32),
  err: i32,
  done: bool,
}

impl LinePixels {
  fn new(from: (i32, i32), to: (i32, i32)) -> LinePixels {
    let delta = ((to.0 - from.0).abs(), -(to.1 - from.1).abs());
    LinePixels {
      at: from,
      to,
      step: ((to.0 - from.0).signum(), (to.1 - from.1).signum()),
      delta,
      err: delta.0 + delta.1,
      done: false,
    }
  }
}

impl Iterator for LinePixels {
  type Item = (i32, i32);

  fn next(&mut self) -> Option<(i32, i32)> {
    if self.done {
      return None;
    }
    let current = self.at;
    if current == self.to {
      self.done = true;
      return Some(current);
    }
    let doubled = 2 * self.err;
    if doubled >= self.delta.1 {
      self.err += self.delta.1;
      self.at.0 += self.step.0;
    }
    if doubled <= self.delta.0 {
      self.err += self.delta.0;
      self.at.1 += self.step.1;
    }
    Some(current)
  }
}
