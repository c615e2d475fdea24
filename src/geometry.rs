//! The nine geometries the sample compares.
//!
//! Every geometry is built from a fixed base square, [`MIN`]..[`MAX`] on both
//! axes, translated by the frame's offset. Simple geometries clip with one
//! shape; compound geometries first replace the clip with an outer rectangle
//! and then intersect the inner shape, which forces the rasterizer through its
//! multi-mask path. Both the clip steps and the direct fill come from
//! [`Geometry::shape`], so the two renderings cannot drift apart.

use std::fmt;

use lyon::math::vector;
use smallvec::{smallvec, SmallVec};

use crate::canvas::ClipMode;
use crate::shape::{BorderRadii, Offset, RectShape, Shape};

/// Left and top edge of the base square.
pub const MIN: f32 = 100.5;
/// Centre of the base square, used by the concave path's inner points.
pub const MID: f32 = 200.0;
/// Right and bottom edge of the base square.
pub const MAX: f32 = 299.5;

pub const CORNER_RADIUS: f32 = 10.0;

/// How far the compound geometries' outer clip rectangle sits from the base
/// square. Fixed, not derived from the offset.
pub const OUTER_RECT_SHIFT: (f32, f32) = (-100.0, -100.0);

/// The shape that ends up filled, whether by the clip or by the direct draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ShapeKind {
    #[default]
    Rect,
    RRect,
    Circle,
    ConvexPath,
    ConcavePath,
}

impl ShapeKind {
    /// Builds the shape translated by `offset`.
    pub fn build(self, offset: Offset) -> Shape {
        match self {
            ShapeKind::Rect => base_rect(offset).into(),
            ShapeKind::RRect => {
                Shape::rounded_rect(corners(offset), BorderRadii::new(CORNER_RADIUS))
            }
            ShapeKind::Circle => Shape::oval(corners(offset)),
            ShapeKind::ConvexPath => polygon(&[(MIN, MIN), (MAX, MAX), (MIN, MAX)], offset),
            ShapeKind::ConcavePath => polygon(
                &[
                    (MIN, MIN),
                    (MID, 105.0),
                    (MAX, MIN),
                    (295.0, MID),
                    (MAX, MAX),
                    (MID, 295.0),
                    (MIN, MAX),
                    (105.0, MID),
                ],
                offset,
            ),
        }
    }
}

/// The geometry selector, in key order `'1'..='9'`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Geometry {
    #[default]
    Rect,
    RRect,
    Circle,
    ConvexPath,
    ConcavePath,
    RectAndRect,
    RectAndRRect,
    RectAndConvex,
    RectAndConcave,
}

impl Geometry {
    pub const ALL: [Geometry; 9] = [
        Geometry::Rect,
        Geometry::RRect,
        Geometry::Circle,
        Geometry::ConvexPath,
        Geometry::ConcavePath,
        Geometry::RectAndRect,
        Geometry::RectAndRRect,
        Geometry::RectAndConvex,
        Geometry::RectAndConcave,
    ];

    /// Maps `'1'..='9'` to the geometry at that position in [`Geometry::ALL`].
    pub fn from_key(key: char) -> Option<Self> {
        let index = key.to_digit(10)?.checked_sub(1)?;
        Self::ALL.get(index as usize).copied()
    }

    /// The key that selects this geometry.
    pub fn key(self) -> char {
        let index = Self::ALL
            .iter()
            .position(|geometry| *geometry == self)
            .unwrap_or_default();
        char::from(b'1' + index as u8)
    }

    pub fn name(self) -> &'static str {
        match self {
            Geometry::Rect => "rect",
            Geometry::RRect => "rrect",
            Geometry::Circle => "circle",
            Geometry::ConvexPath => "convex path",
            Geometry::ConcavePath => "concave path",
            Geometry::RectAndRect => "rect & rect",
            Geometry::RectAndRRect => "rect & rrect",
            Geometry::RectAndConvex => "rect & convex path",
            Geometry::RectAndConcave => "rect & concave path",
        }
    }

    /// The inner shape, which is the only shape drawn directly.
    pub fn shape_kind(self) -> ShapeKind {
        match self {
            Geometry::Rect | Geometry::RectAndRect => ShapeKind::Rect,
            Geometry::RRect | Geometry::RectAndRRect => ShapeKind::RRect,
            Geometry::Circle => ShapeKind::Circle,
            Geometry::ConvexPath | Geometry::RectAndConvex => ShapeKind::ConvexPath,
            Geometry::ConcavePath | Geometry::RectAndConcave => ShapeKind::ConcavePath,
        }
    }

    /// True for the four geometries clipped by an outer rectangle first.
    pub fn is_compound(self) -> bool {
        matches!(
            self,
            Geometry::RectAndRect
                | Geometry::RectAndRRect
                | Geometry::RectAndConvex
                | Geometry::RectAndConcave
        )
    }

    /// The shape at `offset`, shared by the clip pass and the direct pass.
    pub fn shape(self, offset: Offset) -> Shape {
        self.shape_kind().build(offset)
    }

    /// The clip operations that isolate this geometry, in application order.
    ///
    /// The outer rectangle of a compound geometry is always clipped with
    /// anti-aliasing; `anti_alias` only applies to the inner shape.
    pub fn clip_steps(self, offset: Offset, anti_alias: bool) -> SmallVec<[ClipStep; 2]> {
        let shape = self.shape(offset);
        if self.is_compound() {
            smallvec![
                ClipStep {
                    shape: outer_clip_rect(offset).into(),
                    mode: ClipMode::Replace,
                    anti_alias: true,
                },
                ClipStep {
                    shape,
                    mode: ClipMode::Intersect,
                    anti_alias,
                },
            ]
        } else {
            smallvec![ClipStep {
                shape,
                mode: ClipMode::Replace,
                anti_alias,
            }]
        }
    }
}

impl fmt::Display for Geometry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A single clip operation.
#[derive(Debug, Clone)]
pub struct ClipStep {
    pub shape: Shape,
    pub mode: ClipMode,
    pub anti_alias: bool,
}

/// The base square translated by `offset`.
pub fn base_rect(offset: Offset) -> RectShape {
    RectShape::new([(MIN, MIN), (MAX, MAX)]).translate(offset)
}

/// The outer clip rectangle of the compound geometries.
pub fn outer_clip_rect(offset: Offset) -> RectShape {
    base_rect(offset).translate(vector(OUTER_RECT_SHIFT.0, OUTER_RECT_SHIFT.1))
}

fn corners(offset: Offset) -> [(f32, f32); 2] {
    let rect = base_rect(offset).rect();
    [rect.min.to_tuple(), rect.max.to_tuple()]
}

fn polygon(points: &[(f32, f32)], offset: Offset) -> Shape {
    let translate = |(x, y): (f32, f32)| (x + offset.x, y + offset.y);

    let mut builder = Shape::builder();
    if let Some((first, rest)) = points.split_first() {
        builder = builder.begin(translate(*first));
        for point in rest {
            builder = builder.line_to(translate(*point));
        }
        builder = builder.close();
    }
    builder.build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use lyon::math::point;

    #[test]
    fn digit_keys_select_geometries_in_order() {
        for (index, geometry) in Geometry::ALL.iter().enumerate() {
            let key = char::from(b'1' + index as u8);
            assert_eq!(Geometry::from_key(key), Some(*geometry));
            assert_eq!(geometry.key(), key);
        }
        assert_eq!(Geometry::from_key('5'), Some(Geometry::ConcavePath));
    }

    #[test]
    fn other_keys_select_nothing() {
        for key in ['0', 'a', 't', ' ', '\n', '٣'] {
            assert_eq!(Geometry::from_key(key), None, "key {key:?}");
        }
    }

    #[test]
    fn rect_at_zero_offset_is_the_base_square() {
        let shape = Geometry::Rect.shape(vector(0.0, 0.0));
        let bounds = shape.bounds();
        assert_eq!(bounds.min, point(100.5, 100.5));
        assert_eq!(bounds.max, point(299.5, 299.5));
    }

    #[test]
    fn offset_moves_every_control_point() {
        let offset = vector(0.25, 0.75);
        for geometry in Geometry::ALL {
            let still = geometry.shape(vector(0.0, 0.0)).control_points();
            let moved = geometry.shape(offset).control_points();
            assert_eq!(still.len(), moved.len(), "{geometry}");
            for (a, b) in still.iter().zip(&moved) {
                assert!(((*a + offset) - *b).length() < 1e-3, "{geometry}: {a:?} -> {b:?}");
            }
        }
    }

    #[test]
    fn convex_path_is_the_lower_left_triangle() {
        let points = ShapeKind::ConvexPath.build(vector(0.0, 0.0)).control_points();
        assert_eq!(
            points,
            vec![point(MIN, MIN), point(MAX, MAX), point(MIN, MAX)]
        );
    }

    #[test]
    fn concave_path_alternates_corners_and_inset_midpoints() {
        let points = ShapeKind::ConcavePath.build(vector(1.0, 2.0)).control_points();
        assert_eq!(points.len(), 8);
        assert_eq!(points[0], point(101.5, 102.5));
        assert_eq!(points[1], point(201.0, 107.0));
        assert_eq!(points[3], point(296.0, 202.0));
        assert_eq!(points[7], point(106.0, 202.0));
    }

    #[test]
    fn circle_is_inscribed_in_the_base_square() {
        let bounds = ShapeKind::Circle.build(vector(0.0, 0.0)).bounds();
        assert!((bounds.min.x - MIN).abs() < 1e-3);
        assert!((bounds.max.y - MAX).abs() < 1e-3);
    }

    #[test]
    fn simple_geometries_replace_once() {
        for geometry in Geometry::ALL.into_iter().filter(|g| !g.is_compound()) {
            let steps = geometry.clip_steps(vector(0.5, 0.5), false);
            assert_eq!(steps.len(), 1, "{geometry}");
            assert_eq!(steps[0].mode, ClipMode::Replace);
            assert!(!steps[0].anti_alias);
        }
    }

    #[test]
    fn compound_geometries_replace_outer_then_intersect_inner() {
        let offset = vector(0.5, 0.25);
        for geometry in Geometry::ALL.into_iter().filter(|g| g.is_compound()) {
            let steps = geometry.clip_steps(offset, false);
            assert_eq!(steps.len(), 2, "{geometry}");

            assert_eq!(steps[0].mode, ClipMode::Replace);
            assert!(steps[0].anti_alias, "outer clip is always anti-aliased");
            let outer = steps[0].shape.bounds();
            assert_eq!(outer.min, point(0.5 + 0.5, 0.5 + 0.25));
            assert_eq!(outer.max, point(199.5 + 0.5, 199.5 + 0.25));

            assert_eq!(steps[1].mode, ClipMode::Intersect);
            assert!(!steps[1].anti_alias);
            assert_eq!(
                steps[1].shape.control_points(),
                geometry.shape(offset).control_points()
            );
        }
    }

    #[test]
    fn compound_geometries_share_their_inner_shape() {
        assert_eq!(Geometry::RectAndRect.shape_kind(), ShapeKind::Rect);
        assert_eq!(Geometry::RectAndRRect.shape_kind(), ShapeKind::RRect);
        assert_eq!(Geometry::RectAndConvex.shape_kind(), ShapeKind::ConvexPath);
        assert_eq!(Geometry::RectAndConcave.shape_kind(), ShapeKind::ConcavePath);
    }
}
