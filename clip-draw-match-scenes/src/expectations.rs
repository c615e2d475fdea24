use clip_draw_match::{Canvas, Color};

/// A single pixel-color expectation to validate after rendering.
pub struct PixelExpectation {
    pub x: u32,
    pub y: u32,
    pub expected: Color,
    /// Per-channel tolerance for comparison (default 0: the sample draws
    /// opaque colors and probes stay away from edges).
    pub tolerance: u8,
    /// Human-readable label for failure messages.
    pub label: String,
}

impl PixelExpectation {
    pub fn new(x: u32, y: u32, expected: Color, label: impl Into<String>) -> Self {
        Self {
            x,
            y,
            expected,
            tolerance: 0,
            label: label.into(),
        }
    }

    pub fn with_tolerance(mut self, tolerance: u8) -> Self {
        self.tolerance = tolerance;
        self
    }
}

/// Validates pixel expectations against a rendered canvas.
///
/// Returns a list of human-readable failure descriptions. An empty list means
/// all expectations passed.
pub fn check_pixels(canvas: &Canvas, expectations: &[PixelExpectation]) -> Vec<String> {
    let mut failures = Vec::new();

    for expectation in expectations {
        let Some(actual) = canvas.pixel(expectation.x, expectation.y) else {
            failures.push(format!(
                "[{}] pixel ({},{}) is outside canvas {}×{}",
                expectation.label,
                expectation.x,
                expectation.y,
                canvas.width(),
                canvas.height(),
            ));
            continue;
        };

        let tolerance = expectation.tolerance as i16;
        let matches = actual
            .to_array()
            .iter()
            .zip(expectation.expected.to_array())
            .all(|(actual, expected)| channel_matches(*actual, expected, tolerance));

        if !matches {
            let [er, eg, eb, ea] = expectation.expected.to_array();
            let [ar, ag, ab, aa] = actual.to_array();
            failures.push(format!(
                "[{}] pixel ({},{}) expected rgba({},{},{},{}) ±{} but got rgba({},{},{},{})",
                expectation.label,
                expectation.x,
                expectation.y,
                er,
                eg,
                eb,
                ea,
                expectation.tolerance,
                ar,
                ag,
                ab,
                aa,
            ));
        }
    }

    failures
}

fn channel_matches(actual: u8, expected: u8, tolerance: i16) -> bool {
    let diff = (actual as i16) - (expected as i16);
    diff.abs() <= tolerance
}
