use clip_draw_match::{Canvas, Color};

/// The set of pixels of a canvas that hold one exact color.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Coverage {
    width: u32,
    height: u32,
    covered: Vec<bool>,
}

impl Coverage {
    /// Pixels of `canvas` equal to `color`.
    pub fn of_color(canvas: &Canvas, color: Color) -> Self {
        Self::from_predicate(canvas, |pixel| pixel == color)
    }

    /// Pixels of `canvas` that differ from `background`.
    pub fn painted(canvas: &Canvas, background: Color) -> Self {
        Self::from_predicate(canvas, |pixel| pixel != background)
    }

    fn from_predicate(canvas: &Canvas, predicate: impl Fn(Color) -> bool) -> Self {
        let (width, height) = (canvas.width(), canvas.height());
        let covered = (0..height)
            .flat_map(|y| (0..width).map(move |x| (x, y)))
            .map(|(x, y)| canvas.pixel(x, y).is_some_and(&predicate))
            .collect();
        Self {
            width,
            height,
            covered,
        }
    }

    pub fn contains(&self, x: u32, y: u32) -> bool {
        x < self.width && y < self.height && self.covered[(y * self.width + x) as usize]
    }

    pub fn count(&self) -> usize {
        self.covered.iter().filter(|covered| **covered).count()
    }

    /// Keeps only pixels with `min <= x < max` and `min <= y < max`.
    pub fn restricted_to(&self, min: (u32, u32), max: (u32, u32)) -> Self {
        let mut restricted = self.clone();
        for y in 0..self.height {
            for x in 0..self.width {
                let inside = (min.0..max.0).contains(&x) && (min.1..max.1).contains(&y);
                if !inside {
                    restricted.covered[(y * self.width + x) as usize] = false;
                }
            }
        }
        restricted
    }

    /// Pixels covered by exactly one of `self` and `other`, capped at `limit`
    /// entries for readable failure messages.
    pub fn mismatches(&self, other: &Coverage, limit: usize) -> Vec<(u32, u32)> {
        let mut mismatches = Vec::new();
        for y in 0..self.height.min(other.height) {
            for x in 0..self.width.min(other.width) {
                if self.contains(x, y) != other.contains(x, y) {
                    mismatches.push((x, y));
                    if mismatches.len() == limit {
                        return mismatches;
                    }
                }
            }
        }
        mismatches
    }

    /// True if every pixel covered here is covered by `other` too.
    pub fn is_subset_of(&self, other: &Coverage) -> bool {
        (0..self.height)
            .flat_map(|y| (0..self.width).map(move |x| (x, y)))
            .all(|(x, y)| !self.contains(x, y) || other.contains(x, y))
    }
}
