use super::{ClipMode, Paint, Surface};
use crate::shape::Shape;

/// One call made against a [`RecordingSurface`].
#[derive(Debug, Clone)]
pub enum SurfaceOp {
    /// `save` was called; `count` is the value it returned.
    Save { count: usize },
    /// `restore_to_count` was called with `count`.
    RestoreToCount { count: usize },
    Clip {
        shape: Shape,
        mode: ClipMode,
        anti_alias: bool,
    },
    Draw { shape: Shape, paint: Paint },
}

/// A [`Surface`] that rasterizes nothing and keeps a log of every call.
///
/// Used to check what a sample asks of the surface, in which order, without
/// depending on how any particular rasterizer resolves edges.
#[derive(Debug, Clone)]
pub struct RecordingSurface {
    size: (u32, u32),
    save_count: usize,
    ops: Vec<SurfaceOp>,
}

impl RecordingSurface {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            size: (width, height),
            save_count: 1,
            ops: Vec::new(),
        }
    }

    pub fn ops(&self) -> &[SurfaceOp] {
        &self.ops
    }

    /// Returns the recorded calls and starts a new log.
    pub fn take_ops(&mut self) -> Vec<SurfaceOp> {
        std::mem::take(&mut self.ops)
    }

    /// Clip calls in the order they were made.
    pub fn clips(&self) -> impl Iterator<Item = (&Shape, ClipMode, bool)> {
        self.ops.iter().filter_map(|op| match op {
            SurfaceOp::Clip {
                shape,
                mode,
                anti_alias,
            } => Some((shape, *mode, *anti_alias)),
            _ => None,
        })
    }

    /// Draw calls in the order they were made.
    pub fn draws(&self) -> impl Iterator<Item = (&Shape, &Paint)> {
        self.ops.iter().filter_map(|op| match op {
            SurfaceOp::Draw { shape, paint } => Some((shape, paint)),
            _ => None,
        })
    }
}

impl Surface for RecordingSurface {
    fn device_size(&self) -> (u32, u32) {
        self.size
    }

    fn save_count(&self) -> usize {
        self.save_count
    }

    fn save(&mut self) -> usize {
        let count = self.save_count;
        self.save_count += 1;
        self.ops.push(SurfaceOp::Save { count });
        count
    }

    fn restore_to_count(&mut self, count: usize) {
        self.save_count = self.save_count.min(count.max(1));
        self.ops.push(SurfaceOp::RestoreToCount { count });
    }

    fn clip_shape(&mut self, shape: &Shape, mode: ClipMode, anti_alias: bool) {
        self.ops.push(SurfaceOp::Clip {
            shape: shape.clone(),
            mode,
            anti_alias,
        });
    }

    fn draw_shape(&mut self, shape: &Shape, paint: &Paint) {
        self.ops.push(SurfaceOp::Draw {
            shape: shape.clone(),
            paint: *paint,
        });
    }
}
