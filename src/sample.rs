//! The clip/draw match sample.
//!
//! Draws a full-device red rectangle through a clip built from the selected
//! geometry, and the same geometry filled directly in black. When clipping and
//! filling agree, no red fringe shows around the black shape (or no black
//! fringe, with the order swapped). The pair is translated by a fraction of a
//! pixel every frame to expose snapping differences.
//!
//! Keys: `1`-`9` select a geometry, `t` toggles which pass is drawn first.

use std::time::{Duration, Instant};

use lyon::math::vector;

use crate::canvas::{Paint, Surface};
use crate::geometry::Geometry;
use crate::interpolator::Interpolator;
use crate::shape::Offset;
use crate::view::{Event, Reply, SampleView};
use crate::Color;

pub const TITLE: &str = "ClipDrawMatch";

/// Keyframes of the translation, as (milliseconds after start, [x, y]).
/// The offset walks the unit square's edges and returns to the origin.
const TRANSLATION_KEYFRAMES: [(u64, [f32; 2]); 5] = [
    (1000, [0.0, 0.0]),
    (2000, [0.0, 1.0]),
    (3000, [1.0, 1.0]),
    (4000, [1.0, 0.0]),
    (5000, [0.0, 0.0]),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClipDrawMatchConfig {
    /// Anti-aliasing for the direct fill and the inner clip shape.
    pub anti_alias: bool,
    /// Fill color seen through the clip.
    pub clip_color: Color,
    /// Fill color of the directly drawn geometry.
    pub geometry_color: Color,
    /// Initial draw order.
    pub clip_first: bool,
}

impl Default for ClipDrawMatchConfig {
    fn default() -> Self {
        Self {
            anti_alias: false,
            clip_color: Color::RED,
            geometry_color: Color::BLACK,
            clip_first: true,
        }
    }
}

impl ClipDrawMatchConfig {
    pub fn with_anti_alias(mut self, anti_alias: bool) -> Self {
        self.anti_alias = anti_alias;
        self
    }

    pub fn with_clip_color(mut self, color: Color) -> Self {
        self.clip_color = color;
        self
    }

    pub fn with_geometry_color(mut self, color: Color) -> Self {
        self.geometry_color = color;
        self
    }

    pub fn with_clip_first(mut self, clip_first: bool) -> Self {
        self.clip_first = clip_first;
        self
    }
}

pub struct ClipDrawMatch {
    config: ClipDrawMatchConfig,
    translation: Interpolator,
    started: Instant,
    geometry: Geometry,
    clip_first: bool,
    invalidated: bool,
}

impl ClipDrawMatch {
    /// Creates the view with its animation starting at `started`.
    pub fn new(started: Instant) -> Self {
        Self::with_config(started, ClipDrawMatchConfig::default())
    }

    pub fn with_config(started: Instant, config: ClipDrawMatchConfig) -> Self {
        Self {
            config,
            translation: translation_timeline(),
            started,
            geometry: Geometry::default(),
            clip_first: config.clip_first,
            invalidated: false,
        }
    }

    pub fn geometry(&self) -> Geometry {
        self.geometry
    }

    /// True when the clip pass is drawn before the direct pass.
    pub fn clip_first(&self) -> bool {
        self.clip_first
    }

    /// The translation applied to both passes for a frame drawn at `now`.
    pub fn offset_at(&self, now: Instant) -> Offset {
        let mut values = [0.0; 2];
        self.translation
            .sample(now.saturating_duration_since(self.started), &mut values);
        vector(values[0], values[1])
    }

    /// Draws the clip pass and the direct pass in the current order.
    pub fn draw_geometry(&self, surface: &mut dyn Surface, offset: Offset, anti_alias: bool) {
        if self.clip_first {
            draw_clipped_geometry(
                surface,
                self.geometry,
                offset,
                anti_alias,
                self.config.clip_color,
            );
        }

        draw_normal_geometry(
            surface,
            self.geometry,
            offset,
            anti_alias,
            self.config.geometry_color,
        );

        if !self.clip_first {
            draw_clipped_geometry(
                surface,
                self.geometry,
                offset,
                anti_alias,
                self.config.clip_color,
            );
        }
    }

    fn invalidate(&mut self) {
        self.invalidated = true;
    }
}

impl SampleView for ClipDrawMatch {
    fn on_event(&mut self, event: Event) -> Reply {
        match event {
            Event::Title => Reply::Title(TITLE),
            Event::Char('t') => {
                self.clip_first = !self.clip_first;
                tracing::debug!(clip_first = self.clip_first, "toggled draw order");
                self.invalidate();
                Reply::Handled
            }
            Event::Char(key) => match Geometry::from_key(key) {
                Some(geometry) => {
                    self.geometry = geometry;
                    tracing::debug!(%geometry, "selected geometry");
                    self.invalidate();
                    Reply::Handled
                }
                None => self.default_event(event),
            },
        }
    }

    fn draw_content(&mut self, surface: &mut dyn Surface, now: Instant) {
        let offset = self.offset_at(now);
        tracing::trace!(
            x = offset.x,
            y = offset.y,
            geometry = %self.geometry,
            clip_first = self.clip_first,
            "drawing frame"
        );

        let count = surface.save();
        self.draw_geometry(surface, offset, self.config.anti_alias);
        surface.restore_to_count(count);

        // Free-running: every frame schedules the next one.
        self.invalidate();
    }

    fn take_invalidation(&mut self) -> bool {
        std::mem::take(&mut self.invalidated)
    }
}

/// Fills the whole device with `color` through the clip for `geometry`, then
/// removes the clip again.
pub fn draw_clipped_geometry(
    surface: &mut dyn Surface,
    geometry: Geometry,
    offset: Offset,
    anti_alias: bool,
    color: Color,
) {
    let count = surface.save();

    for step in geometry.clip_steps(offset, anti_alias) {
        surface.clip_shape(&step.shape, step.mode, step.anti_alias);
    }

    let bounds = surface.device_bounds();
    surface.draw_rect(bounds, &Paint::fill(color));
    surface.restore_to_count(count);
}

/// Fills the shape of `geometry` directly. Compound geometries draw only their
/// inner shape.
pub fn draw_normal_geometry(
    surface: &mut dyn Surface,
    geometry: Geometry,
    offset: Offset,
    anti_alias: bool,
    color: Color,
) {
    let paint = Paint::fill(color).with_anti_alias(anti_alias);
    surface.draw_shape(&geometry.shape(offset), &paint);
}

fn translation_timeline() -> Interpolator {
    let mut timeline = Interpolator::new(2);
    for (millis, values) in TRANSLATION_KEYFRAMES {
        if let Err(error) = timeline.set_keyframe(Duration::from_millis(millis), &values) {
            tracing::error!(%error, "invalid translation keyframe");
        }
    }
    timeline
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::{ClipMode, RecordingSurface, SurfaceOp};

    fn view() -> (ClipDrawMatch, Instant) {
        let started = Instant::now();
        (ClipDrawMatch::new(started), started)
    }

    #[test]
    fn starts_with_rect_and_clip_first() {
        let (view, _) = view();
        assert_eq!(view.geometry(), Geometry::Rect);
        assert!(view.clip_first());
    }

    #[test]
    fn answers_title_query() {
        let (mut view, _) = view();
        assert_eq!(view.on_event(Event::Title), Reply::Title("ClipDrawMatch"));
        assert_eq!(view.title(), Some("ClipDrawMatch"));
        assert!(!view.take_invalidation());
    }

    #[test]
    fn digit_five_selects_concave_path() {
        let (mut view, _) = view();
        assert_eq!(view.on_event(Event::Char('5')), Reply::Handled);
        assert_eq!(view.geometry(), Geometry::ConcavePath);
        assert!(view.take_invalidation());
        assert!(!view.take_invalidation());
    }

    #[test]
    fn every_digit_selects_its_geometry() {
        let (mut view, _) = view();
        for geometry in Geometry::ALL {
            assert_eq!(view.on_event(Event::Char(geometry.key())), Reply::Handled);
            assert_eq!(view.geometry(), geometry);
        }
    }

    #[test]
    fn toggling_twice_restores_draw_order() {
        let (mut view, _) = view();
        view.on_event(Event::Char('t'));
        assert!(!view.clip_first());
        assert!(view.take_invalidation());
        view.on_event(Event::Char('t'));
        assert!(view.clip_first());
    }

    #[test]
    fn unknown_keys_fall_through() {
        let (mut view, _) = view();
        for key in ['0', 'T', 'x', ' '] {
            assert_eq!(view.on_event(Event::Char(key)), Reply::Unhandled);
        }
        assert_eq!(view.geometry(), Geometry::Rect);
        assert!(view.clip_first());
        assert!(!view.take_invalidation());
    }

    #[test]
    fn every_frame_requests_another() {
        let (mut view, started) = view();
        let mut surface = RecordingSurface::new(400, 400);
        for frame in 0..3 {
            view.draw_content(&mut surface, started + Duration::from_millis(frame * 16));
            assert!(view.take_invalidation());
        }
    }

    #[test]
    fn offset_follows_the_keyframes() {
        let (view, started) = view();
        let at = |millis: u64| view.offset_at(started + Duration::from_millis(millis));

        assert_eq!(at(0), vector(0.0, 0.0));
        assert_eq!(at(1000), vector(0.0, 0.0));
        assert_eq!(at(1500), vector(0.0, 0.5));
        assert_eq!(at(2000), vector(0.0, 1.0));
        assert_eq!(at(2500), vector(0.5, 1.0));
        assert_eq!(at(3500), vector(1.0, 0.5));
        assert_eq!(at(4500), vector(0.5, 0.0));
        assert_eq!(at(5000), vector(0.0, 0.0));
    }

    #[test]
    fn offset_before_start_is_the_origin() {
        let started = Instant::now() + Duration::from_secs(10);
        let view = ClipDrawMatch::new(started);
        assert_eq!(view.offset_at(Instant::now()), vector(0.0, 0.0));
    }

    #[test]
    fn clip_first_frame_clips_then_draws() {
        let (mut view, started) = view();
        let mut surface = RecordingSurface::new(400, 400);
        view.draw_content(&mut surface, started);

        let ops = surface.ops();
        assert!(matches!(ops[0], SurfaceOp::Save { count: 1 }));
        assert!(matches!(ops[1], SurfaceOp::Save { count: 2 }));
        assert!(matches!(
            ops[2],
            SurfaceOp::Clip {
                mode: ClipMode::Replace,
                anti_alias: false,
                ..
            }
        ));
        let SurfaceOp::Draw { paint, .. } = &ops[3] else {
            panic!("expected the clip fill, got {:?}", ops[3]);
        };
        assert_eq!(paint.color, Color::RED);
        assert!(matches!(ops[4], SurfaceOp::RestoreToCount { count: 2 }));
        let SurfaceOp::Draw { paint, .. } = &ops[5] else {
            panic!("expected the direct fill, got {:?}", ops[5]);
        };
        assert_eq!(paint.color, Color::BLACK);
        assert!(matches!(ops[6], SurfaceOp::RestoreToCount { count: 1 }));
        assert_eq!(ops.len(), 7);
    }

    #[test]
    fn toggled_frame_draws_before_clipping() {
        let (mut view, started) = view();
        view.on_event(Event::Char('t'));
        let mut surface = RecordingSurface::new(400, 400);
        view.draw_content(&mut surface, started);

        let colors: Vec<Color> = surface.draws().map(|(_, paint)| paint.color).collect();
        assert_eq!(colors, vec![Color::BLACK, Color::RED]);
    }

    #[test]
    fn clip_fill_covers_the_device() {
        let (mut view, started) = view();
        let mut surface = RecordingSurface::new(640, 480);
        view.draw_content(&mut surface, started);

        let (shape, _) = surface
            .draws()
            .find(|(_, paint)| paint.color == Color::RED)
            .expect("clip fill is drawn");
        let bounds = shape.bounds();
        assert_eq!(bounds.min.to_tuple(), (0.0, 0.0));
        assert_eq!(bounds.max.to_tuple(), (640.0, 480.0));
    }

    #[test]
    fn configured_colors_and_anti_aliasing_are_used() {
        let started = Instant::now();
        let config = ClipDrawMatchConfig::default()
            .with_anti_alias(true)
            .with_clip_color(Color::rgb(0, 0, 255))
            .with_geometry_color(Color::rgb(0, 128, 0))
            .with_clip_first(false);
        let mut view = ClipDrawMatch::with_config(started, config);
        assert!(!view.clip_first());

        let mut surface = RecordingSurface::new(400, 400);
        view.draw_content(&mut surface, started);

        let draws: Vec<Paint> = surface.draws().map(|(_, paint)| *paint).collect();
        assert_eq!(
            draws,
            vec![
                Paint::fill(Color::rgb(0, 128, 0)).with_anti_alias(true),
                Paint::fill(Color::rgb(0, 0, 255)),
            ]
        );
        assert!(surface.clips().all(|(_, _, anti_alias)| anti_alias));
    }
}
