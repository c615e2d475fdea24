use clip_draw_match::lyon::math::vector;
use clip_draw_match::sample::{draw_clipped_geometry, draw_normal_geometry};
use clip_draw_match::{Canvas, ClipDrawMatch, ClipDrawMatchConfig, Color, Geometry, ShapeKind};

use crate::expectations::PixelExpectation;

// ── Canvas constants ─────────────────────────────────────────────────────────

pub const CANVAS_WIDTH: u32 = 400;
pub const CANVAS_HEIGHT: u32 = 400;
pub const BACKGROUND: Color = Color::WHITE;

/// Sub-pixel offsets every geometry is checked at: the animation's corners
/// plus a few values that land between pixel centres.
pub const OFFSETS: [(f32, f32); 6] = [
    (0.0, 0.0),
    (0.0, 1.0),
    (1.0, 1.0),
    (0.5, 0.5),
    (0.25, 0.75),
    (0.875, 0.125),
];

/// Which of the sample's two passes to render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pass {
    /// Only the red fill through the clip.
    Clip,
    /// Only the black fill of the shape.
    Direct,
    /// Both, in the scenario's draw order, as the sample shows them.
    Both,
}

/// One frame of the sample with the animation frozen at `offset`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Scenario {
    pub geometry: Geometry,
    pub offset: (f32, f32),
    pub anti_alias: bool,
    pub clip_first: bool,
}

impl Scenario {
    pub fn new(geometry: Geometry, offset: (f32, f32)) -> Self {
        Self {
            geometry,
            offset,
            anti_alias: false,
            clip_first: true,
        }
    }

    pub fn with_anti_alias(mut self, anti_alias: bool) -> Self {
        self.anti_alias = anti_alias;
        self
    }

    pub fn with_clip_first(mut self, clip_first: bool) -> Self {
        self.clip_first = clip_first;
        self
    }

    fn label(&self, what: &str) -> String {
        format!(
            "{} @ ({}, {}) aa={} clip_first={}: {}",
            self.geometry,
            self.offset.0,
            self.offset.1,
            self.anti_alias,
            self.clip_first,
            what
        )
    }
}

/// Every geometry at every offset in [`OFFSETS`], aliased, clip first.
pub fn all_scenarios() -> Vec<Scenario> {
    Geometry::ALL
        .into_iter()
        .flat_map(|geometry| {
            OFFSETS
                .into_iter()
                .map(move |offset| Scenario::new(geometry, offset))
        })
        .collect()
}

/// Renders one scenario onto a fresh white canvas.
///
/// Panics if the canvas cannot be allocated, which cannot happen at the
/// constant size used here.
pub fn render_scenario(scenario: &Scenario, pass: Pass) -> Canvas {
    let mut canvas =
        Canvas::new(CANVAS_WIDTH, CANVAS_HEIGHT, BACKGROUND).expect("Failed to create canvas");
    let offset = vector(scenario.offset.0, scenario.offset.1);
    let config = ClipDrawMatchConfig::default();

    match pass {
        Pass::Clip => draw_clipped_geometry(
            &mut canvas,
            scenario.geometry,
            offset,
            scenario.anti_alias,
            config.clip_color,
        ),
        Pass::Direct => draw_normal_geometry(
            &mut canvas,
            scenario.geometry,
            offset,
            scenario.anti_alias,
            config.geometry_color,
        ),
        Pass::Both => {
            let view = select(scenario, config);
            view.draw_geometry(&mut canvas, offset, scenario.anti_alias);
        }
    }

    canvas
}

fn select(scenario: &Scenario, config: ClipDrawMatchConfig) -> ClipDrawMatch {
    use clip_draw_match::{Event, SampleView};

    let config = config
        .with_anti_alias(scenario.anti_alias)
        .with_clip_first(scenario.clip_first);
    let mut view = ClipDrawMatch::with_config(std::time::Instant::now(), config);
    view.on_event(Event::Char(scenario.geometry.key()));
    view
}

// ── Probes ───────────────────────────────────────────────────────────────────

/// A point well inside the shape and inside the compound geometries' outer
/// clip rectangle.
fn probe_inside_outer_clip(kind: ShapeKind) -> (u32, u32) {
    match kind {
        ShapeKind::ConvexPath => (130, 170),
        _ => (150, 150),
    }
}

/// A point well inside the shape but outside the outer clip rectangle.
fn probe_outside_outer_clip(kind: ShapeKind) -> (u32, u32) {
    match kind {
        ShapeKind::ConvexPath => (230, 270),
        _ => (250, 250),
    }
}

/// Builds pixel expectations for the [`Pass::Both`] rendering of `scenario`.
///
/// Probes sit at least ten pixels from every edge, so they hold for any offset
/// in the unit square and with or without anti-aliasing.
pub fn build_expectations(scenario: &Scenario) -> Vec<PixelExpectation> {
    let kind = scenario.geometry.shape_kind();
    let compound = scenario.geometry.is_compound();

    // Inside both clips the later pass wins.
    let overlap_color = if scenario.clip_first {
        Color::BLACK
    } else {
        Color::RED
    };
    // Outside the outer clip only the direct fill reaches the shape.
    let outside_outer_color = if compound { Color::BLACK } else { overlap_color };

    let (ix, iy) = probe_inside_outer_clip(kind);
    let (ox, oy) = probe_outside_outer_clip(kind);

    let mut expectations = vec![
        PixelExpectation::new(ix, iy, overlap_color, scenario.label("shape inside outer clip")),
        PixelExpectation::new(
            ox,
            oy,
            outside_outer_color,
            scenario.label("shape outside outer clip"),
        ),
        PixelExpectation::new(390, 10, BACKGROUND, scenario.label("top right background")),
        PixelExpectation::new(10, 390, BACKGROUND, scenario.label("bottom left background")),
        PixelExpectation::new(390, 390, BACKGROUND, scenario.label("bottom right background")),
    ];

    if compound {
        // Inside the outer rectangle but outside the shape: the intersection
        // must not let anything through.
        expectations.push(PixelExpectation::new(
            50,
            50,
            BACKGROUND,
            scenario.label("outer clip only"),
        ));
    }

    expectations
}
