//! The `shape` module provides the geometric primitives the sample clips with
//! and fills. Shapes are pure geometry: paints are supplied separately when a
//! shape is handed to a [`Surface`](crate::Surface).
//!
//! # Examples
//!
//! ```rust
//! use clip_draw_match::{BorderRadii, Shape};
//!
//! // A plain rectangle
//! let rect = Shape::rect([(0.0, 0.0), (100.0, 50.0)]);
//!
//! // A rectangle with rounded corners
//! let rounded_rect = Shape::rounded_rect([(0.0, 0.0), (100.0, 50.0)], BorderRadii::new(10.0));
//!
//! // A custom closed path
//! let triangle = Shape::builder()
//!     .begin((0.0, 0.0))
//!     .line_to((50.0, 10.0))
//!     .line_to((50.0, 50.0))
//!     .close()
//!     .build();
//!
//! assert_eq!(triangle.control_points().len(), 3);
//! ```

use lyon::algorithms::aabb::bounding_box;
use lyon::math::{point, vector, Angle, Box2D, Point, Vector};
use lyon::path::{PathEvent, Winding};

/// A sub-pixel translation applied to shapes before they are rasterized.
pub type Offset = Vector;

/// Represents a shape, which can be either a custom path or a simple rectangle.
///
/// # Variants
///
/// - `Path(PathShape)`: A custom path built from lines and Bézier curves.
/// - `Rect(RectShape)`: An axis-aligned rectangle.
#[derive(Debug, Clone)]
pub enum Shape {
    /// A custom path shape defined using Bézier curves and lines.
    Path(PathShape),
    /// A simple rectangular shape.
    Rect(RectShape),
}

impl Shape {
    /// Creates a new [`ShapeBuilder`] for constructing custom paths.
    pub fn builder() -> ShapeBuilder {
        ShapeBuilder::new()
    }

    /// Creates a rectangle from its top-left and bottom-right corners.
    pub fn rect(rect: [(f32, f32); 2]) -> Shape {
        Shape::Rect(RectShape::new(rect))
    }

    /// Creates a rectangle with rounded corners.
    ///
    /// # Parameters
    ///
    /// - `rect`: the top-left and bottom-right coordinates of the rectangle.
    /// - `border_radii`: the radii for each corner of the rectangle.
    pub fn rounded_rect(rect: [(f32, f32); 2], border_radii: BorderRadii) -> Shape {
        let mut path_builder = lyon::path::Path::builder();
        let box2d = Box2D::new(rect[0].into(), rect[1].into());

        path_builder.add_rounded_rectangle(&box2d, &border_radii.into(), Winding::Positive);
        let path = path_builder.build();

        Shape::Path(PathShape { path })
    }

    /// Creates the oval inscribed in `rect`.
    ///
    /// For a square this is a circle.
    pub fn oval(rect: [(f32, f32); 2]) -> Shape {
        let box2d = Box2D::new(rect[0].into(), rect[1].into());
        let radii = vector(box2d.width() / 2.0, box2d.height() / 2.0);

        let mut path_builder = lyon::path::Path::builder();
        path_builder.add_ellipse(box2d.center(), radii, Angle::zero(), Winding::Positive);
        let path = path_builder.build();

        Shape::Path(PathShape { path })
    }

    /// Returns the tight axis-aligned bounds of the shape.
    pub fn bounds(&self) -> Box2D {
        match self {
            Shape::Rect(rect_shape) => rect_shape.rect,
            Shape::Path(path_shape) => bounding_box(path_shape.path.iter()),
        }
    }

    /// Returns every point that defines the shape, in construction order.
    ///
    /// Rectangles report their corners clockwise from the top-left. Paths report
    /// each subpath's starting point followed by the control and end points of
    /// every segment. Two shapes with equal control point lists rasterize
    /// identically.
    pub fn control_points(&self) -> Vec<Point> {
        match self {
            Shape::Rect(rect_shape) => {
                let rect = rect_shape.rect;
                vec![
                    rect.min,
                    point(rect.max.x, rect.min.y),
                    rect.max,
                    point(rect.min.x, rect.max.y),
                ]
            }
            Shape::Path(path_shape) => {
                let mut points = Vec::new();
                for event in path_shape.path.iter() {
                    match event {
                        PathEvent::Begin { at } => points.push(at),
                        PathEvent::Line { to, .. } => points.push(to),
                        PathEvent::Quadratic { ctrl, to, .. } => points.extend([ctrl, to]),
                        PathEvent::Cubic {
                            ctrl1, ctrl2, to, ..
                        } => points.extend([ctrl1, ctrl2, to]),
                        PathEvent::End { .. } => {}
                    }
                }
                points
            }
        }
    }

    /// Converts the shape into the rasterizer's path representation.
    ///
    /// Returns `None` for degenerate shapes (empty rectangles, paths with no
    /// segments) which cannot be filled or clipped with.
    pub(crate) fn to_skia_path(&self) -> Option<tiny_skia::Path> {
        match self {
            Shape::Rect(rect_shape) => {
                let rect = rect_shape.rect;
                let rect = tiny_skia::Rect::from_ltrb(rect.min.x, rect.min.y, rect.max.x, rect.max.y)?;
                Some(tiny_skia::PathBuilder::from_rect(rect))
            }
            Shape::Path(path_shape) => {
                let mut builder = tiny_skia::PathBuilder::new();
                for event in path_shape.path.iter() {
                    match event {
                        PathEvent::Begin { at } => builder.move_to(at.x, at.y),
                        PathEvent::Line { to, .. } => builder.line_to(to.x, to.y),
                        PathEvent::Quadratic { ctrl, to, .. } => {
                            builder.quad_to(ctrl.x, ctrl.y, to.x, to.y)
                        }
                        PathEvent::Cubic {
                            ctrl1, ctrl2, to, ..
                        } => builder.cubic_to(ctrl1.x, ctrl1.y, ctrl2.x, ctrl2.y, to.x, to.y),
                        PathEvent::End { close, .. } => {
                            if close {
                                builder.close();
                            }
                        }
                    }
                }
                builder.finish()
            }
        }
    }
}

impl From<RectShape> for Shape {
    fn from(value: RectShape) -> Self {
        Shape::Rect(value)
    }
}

/// An axis-aligned rectangle.
///
/// You typically do not need to use `RectShape` directly; use [`Shape::rect`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RectShape {
    pub(crate) rect: Box2D,
}

impl RectShape {
    /// Creates a new `RectShape` from its top-left and bottom-right corners.
    pub fn new(rect: [(f32, f32); 2]) -> Self {
        Self {
            rect: Box2D::new(rect[0].into(), rect[1].into()),
        }
    }

    pub fn rect(&self) -> Box2D {
        self.rect
    }

    /// Returns the rectangle translated by `offset`.
    pub fn translate(&self, offset: Offset) -> Self {
        Self {
            rect: self.rect.translate(offset),
        }
    }
}

/// A custom path shape.
///
/// You typically do not need to use `PathShape` directly; use
/// [`Shape::builder`] to construct paths.
#[derive(Clone, Debug)]
pub struct PathShape {
    pub(crate) path: lyon::path::Path,
}

/// Builder for closed polygonal paths.
#[derive(Clone)]
pub struct ShapeBuilder {
    path_builder: lyon::path::Builder,
}

impl Default for ShapeBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ShapeBuilder {
    pub fn new() -> Self {
        Self {
            path_builder: lyon::path::Path::builder(),
        }
    }

    pub fn begin(mut self, point: (f32, f32)) -> Self {
        self.path_builder.begin(point.into());
        self
    }

    pub fn line_to(mut self, point: (f32, f32)) -> Self {
        self.path_builder.line_to(point.into());
        self
    }

    pub fn close(mut self) -> Self {
        self.path_builder.close();
        self
    }

    pub fn build(self) -> Shape {
        let path = self.path_builder.build();
        Shape::Path(PathShape { path })
    }
}

#[derive(Copy, Clone, PartialEq, PartialOrd, Debug, Default)]
pub struct BorderRadii {
    pub top_left: f32,
    pub top_right: f32,
    pub bottom_left: f32,
    pub bottom_right: f32,
}

impl BorderRadii {
    pub fn new(radius: f32) -> Self {
        let r = radius.abs();
        BorderRadii {
            top_left: r,
            top_right: r,
            bottom_left: r,
            bottom_right: r,
        }
    }
}

impl From<BorderRadii> for lyon::path::builder::BorderRadii {
    fn from(val: BorderRadii) -> Self {
        lyon::path::builder::BorderRadii {
            top_left: val.top_left,
            top_right: val.top_right,
            bottom_left: val.bottom_left,
            bottom_right: val.bottom_right,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rect_control_points_run_clockwise_from_top_left() {
        let shape = Shape::rect([(1.0, 2.0), (3.0, 4.0)]);
        assert_eq!(
            shape.control_points(),
            vec![point(1.0, 2.0), point(3.0, 2.0), point(3.0, 4.0), point(1.0, 4.0)]
        );
    }

    #[test]
    fn builder_path_reports_points_in_order() {
        let shape = Shape::builder()
            .begin((0.0, 0.0))
            .line_to((10.0, 10.0))
            .line_to((0.0, 10.0))
            .close()
            .build();

        assert_eq!(
            shape.control_points(),
            vec![point(0.0, 0.0), point(10.0, 10.0), point(0.0, 10.0)]
        );
    }

    #[test]
    fn rounded_rect_stays_inside_its_rect() {
        let shape = Shape::rounded_rect([(10.0, 10.0), (50.0, 50.0)], BorderRadii::new(5.0));
        let bounds = shape.bounds();
        assert!(bounds.min.x >= 10.0 && bounds.min.y >= 10.0);
        assert!(bounds.max.x <= 50.0 && bounds.max.y <= 50.0);
    }

    #[test]
    fn oval_touches_all_four_sides() {
        let shape = Shape::oval([(0.0, 0.0), (20.0, 20.0)]);
        let bounds = shape.bounds();
        assert!((bounds.min.x - 0.0).abs() < 1e-4);
        assert!((bounds.min.y - 0.0).abs() < 1e-4);
        assert!((bounds.max.x - 20.0).abs() < 1e-4);
        assert!((bounds.max.y - 20.0).abs() < 1e-4);
    }

    #[test]
    fn inverted_rect_has_no_raster_path() {
        let shape = Shape::rect([(5.0, 5.0), (2.0, 20.0)]);
        assert!(shape.to_skia_path().is_none());
    }

    #[test]
    fn raster_path_keeps_shape_bounds() {
        let shape = Shape::builder()
            .begin((1.5, 2.5))
            .line_to((9.5, 2.5))
            .line_to((9.5, 7.5))
            .close()
            .build();
        let path = shape.to_skia_path().expect("triangle is not degenerate");
        let bounds = path.bounds();
        assert_eq!(
            (bounds.left(), bounds.top(), bounds.right(), bounds.bottom()),
            (1.5, 2.5, 9.5, 7.5)
        );
    }

    #[test]
    fn translated_rect_moves_both_corners() {
        let rect = RectShape::new([(0.0, 0.0), (10.0, 10.0)]).translate(vector(0.25, -1.0));
        assert_eq!(rect.rect().min, point(0.25, -1.0));
        assert_eq!(rect.rect().max, point(10.25, 9.0));
    }
}
