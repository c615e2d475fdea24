pub mod coverage;
pub mod expectations;
pub mod scene;

pub use coverage::Coverage;
pub use expectations::{check_pixels, PixelExpectation};
pub use scene::{
    all_scenarios, build_expectations, render_scenario, Pass, Scenario, BACKGROUND, CANVAS_HEIGHT,
    CANVAS_WIDTH,
};
