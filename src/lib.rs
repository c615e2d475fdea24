//! A diagnostic sample that checks whether clipping to a shape and filling the
//! same shape directly produce the same pixels.

mod canvas;
mod color;
mod error;
pub mod geometry;
mod host;
mod interpolator;
mod registry;
pub mod sample;
mod shape;
mod view;

pub use canvas::{Canvas, ClipMode, Paint, RecordingSurface, Surface, SurfaceOp};
pub use color::Color;
pub use error::{CanvasError, KeyframeError};
pub use geometry::{ClipStep, Geometry, ShapeKind};
pub use host::{HostConfig, SampleHost};
pub use interpolator::{Interpolator, Phase, Repeat, Values};
pub use registry::{SampleEntry, SampleFactory, SampleRegistry};
pub use sample::{ClipDrawMatch, ClipDrawMatchConfig, TITLE};
pub use shape::{BorderRadii, Offset, PathShape, RectShape, Shape, ShapeBuilder};
pub use view::{Event, Reply, SampleView};

pub use lyon;
pub use tiny_skia;
