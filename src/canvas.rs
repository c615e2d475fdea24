//! Raster surface used by the sample.
//!
//! [`Surface`] is the seam between the sample and whatever executes its draw
//! calls. [`Canvas`] executes them with `tiny-skia`, keeping a save stack whose
//! entries hold the clip coverage as an 8-bit mask. [`RecordingSurface`] only
//! records them.

mod recording;

pub use recording::{RecordingSurface, SurfaceOp};

use lyon::math::{point, Box2D};
use tiny_skia::{FillRule, Mask, Pixmap, Transform};

use crate::error::CanvasError;
use crate::shape::{RectShape, Shape};
use crate::Color;

/// How a new clip shape combines with the current clip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClipMode {
    /// Discard the current clip and use the new shape alone.
    Replace,
    /// Keep only the overlap of the current clip and the new shape.
    Intersect,
}

/// Solid fill parameters for a draw call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Paint {
    pub color: Color,
    pub anti_alias: bool,
}

impl Paint {
    /// An aliased solid fill.
    pub fn fill(color: Color) -> Self {
        Self {
            color,
            anti_alias: false,
        }
    }

    pub fn with_anti_alias(mut self, anti_alias: bool) -> Self {
        self.anti_alias = anti_alias;
        self
    }

    fn to_skia(self) -> tiny_skia::Paint<'static> {
        let mut paint = tiny_skia::Paint::default();
        paint.set_color(self.color.to_skia());
        paint.anti_alias = self.anti_alias;
        paint
    }
}

/// The drawing operations a sample may issue during a frame.
///
/// Save counts follow the usual convention: a fresh surface has a count of 1,
/// [`save`](Surface::save) returns the count from before the save, and passing
/// that value to [`restore_to_count`](Surface::restore_to_count) undoes every
/// clip applied since.
pub trait Surface {
    /// Size of the device in pixels.
    fn device_size(&self) -> (u32, u32);

    fn save_count(&self) -> usize;

    /// Pushes the current state and returns the count to restore to.
    fn save(&mut self) -> usize;

    /// Pops saved states until the save count equals `count` (at least 1).
    fn restore_to_count(&mut self, count: usize);

    /// Combines `shape` into the current clip.
    fn clip_shape(&mut self, shape: &Shape, mode: ClipMode, anti_alias: bool);

    /// Fills `shape` through the current clip.
    fn draw_shape(&mut self, shape: &Shape, paint: &Paint);

    /// Fills an axis-aligned rectangle through the current clip.
    fn draw_rect(&mut self, rect: Box2D, paint: &Paint) {
        self.draw_shape(&Shape::Rect(RectShape { rect }), paint);
    }

    /// The whole device as a rectangle.
    fn device_bounds(&self) -> Box2D {
        let (width, height) = self.device_size();
        Box2D::new(point(0.0, 0.0), point(width as f32, height as f32))
    }
}

#[derive(Clone, Default)]
struct CanvasState {
    /// `None` means nothing is clipped.
    clip: Option<Mask>,
}

/// A `tiny-skia` backed [`Surface`].
///
/// Every shape, rectangles included, is filled as a path with the winding
/// rule, and clip masks are rasterized by the same scan converter. A shape
/// used as a clip and the same shape filled directly therefore cover the same
/// pixels when anti-aliasing is off.
pub struct Canvas {
    pixmap: Pixmap,
    state_stack: Vec<CanvasState>,
    current_state: CanvasState,
}

impl Canvas {
    /// Creates a canvas of the given size filled with `background`.
    pub fn new(width: u32, height: u32, background: Color) -> Result<Self, CanvasError> {
        let pixmap = Pixmap::new(width, height).ok_or(CanvasError::InvalidSize { width, height })?;

        let mut canvas = Self {
            pixmap,
            state_stack: Vec::new(),
            current_state: CanvasState::default(),
        };
        canvas.clear(background);

        Ok(canvas)
    }

    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }

    /// Fills every pixel with `color`, ignoring the clip.
    pub fn clear(&mut self, color: Color) {
        self.pixmap.fill(color.to_skia());
    }

    /// Straight-alpha color of the pixel at (`x`, `y`).
    pub fn pixel(&self, x: u32, y: u32) -> Option<Color> {
        self.pixmap.pixel(x, y).map(Color::from)
    }

    /// Copies the surface into `out` as `0xAARRGGBB` words.
    ///
    /// The colour channels stay premultiplied by alpha, as stored in the
    /// pixmap. Opaque pixels match [`Color::to_argb32`]; translucent ones do
    /// not.
    pub fn copy_to_argb32(&self, out: &mut [u32]) -> Result<(), CanvasError> {
        let pixels: &[[u8; 4]] = bytemuck::cast_slice(self.pixmap.data());
        if out.len() < pixels.len() {
            return Err(CanvasError::OutputTooSmall {
                needed: pixels.len(),
                actual: out.len(),
            });
        }

        for (dst, [r, g, b, a]) in out.iter_mut().zip(pixels) {
            *dst = u32::from_be_bytes([*a, *r, *g, *b]);
        }

        Ok(())
    }

    fn restore(&mut self) {
        if let Some(state) = self.state_stack.pop() {
            self.current_state = state;
        }
    }

    fn rasterize_clip(&self, shape: &Shape, anti_alias: bool) -> Option<Mask> {
        let mut mask = Mask::new(self.width(), self.height())?;
        match shape.to_skia_path() {
            Some(path) => {
                mask.fill_path(&path, FillRule::Winding, anti_alias, Transform::identity())
            }
            None => tracing::warn!("degenerate clip shape, clipping everything out"),
        }
        Some(mask)
    }
}

impl Surface for Canvas {
    fn device_size(&self) -> (u32, u32) {
        (self.width(), self.height())
    }

    fn save_count(&self) -> usize {
        self.state_stack.len() + 1
    }

    fn save(&mut self) -> usize {
        let count = self.save_count();
        self.state_stack.push(self.current_state.clone());
        count
    }

    fn restore_to_count(&mut self, count: usize) {
        let count = count.max(1);
        while self.save_count() > count {
            self.restore();
        }
    }

    fn clip_shape(&mut self, shape: &Shape, mode: ClipMode, anti_alias: bool) {
        let Some(mut mask) = self.rasterize_clip(shape, anti_alias) else {
            tracing::warn!(
                width = self.width(),
                height = self.height(),
                "cannot allocate clip mask"
            );
            return;
        };

        if let (ClipMode::Intersect, Some(current)) = (mode, &self.current_state.clip) {
            intersect_coverage(mask.data_mut(), current.data());
        }

        self.current_state.clip = Some(mask);
    }

    fn draw_shape(&mut self, shape: &Shape, paint: &Paint) {
        let Some(path) = shape.to_skia_path() else {
            tracing::warn!("skipping degenerate shape");
            return;
        };

        self.pixmap.fill_path(
            &path,
            &paint.to_skia(),
            FillRule::Winding,
            Transform::identity(),
            self.current_state.clip.as_ref(),
        );
    }
}

/// Multiplies `coverage` by `other`, both 8-bit coverage values.
fn intersect_coverage(coverage: &mut [u8], other: &[u8]) {
    for (value, other) in coverage.iter_mut().zip(other) {
        *value = ((*value as u16 * *other as u16 + 127) / 255) as u8;
    }
}
