/// Visual confirmation example: all nine geometries side by side in a 3×3
/// grid, frozen at one of the offsets the regression tests check.
///
/// Run with:    cargo run --example scenario_grid
///
/// Keys: `1`-`6` pick the offset, `t` swaps the draw order, `a` toggles
/// anti-aliasing. The window shows the same frames the headless
/// visual-regression tests validate.
use std::error::Error;
use std::num::NonZeroU32;
use std::sync::Arc;

use clip_draw_match::Geometry;
use clip_draw_match_scenes::scene::OFFSETS;
use clip_draw_match_scenes::{render_scenario, Pass, Scenario, CANVAS_HEIGHT, CANVAS_WIDTH};
use winit::application::ApplicationHandler;
use winit::event::{ElementState, WindowEvent};
use winit::event_loop::{ActiveEventLoop, EventLoop};
use winit::window::{Window, WindowId};

const COLUMNS: u32 = 3;
const ROWS: u32 = 3;
const GRID_WIDTH: u32 = CANVAS_WIDTH * COLUMNS;
const GRID_HEIGHT: u32 = CANVAS_HEIGHT * ROWS;

#[derive(Default)]
struct App {
    window: Option<Arc<Window>>,
    softbuffer_context: Option<softbuffer::Context<Arc<Window>>>,
    softbuffer_surface: Option<softbuffer::Surface<Arc<Window>, Arc<Window>>>,
    offset_index: usize,
    draw_first: bool,
    anti_alias: bool,
    grid: Vec<u32>,
}

impl App {
    /// Renders every geometry into its tile of the grid buffer.
    fn render_grid(&mut self) {
        let offset = OFFSETS[self.offset_index];
        self.grid.resize((GRID_WIDTH * GRID_HEIGHT) as usize, 0);
        let mut tile = vec![0u32; (CANVAS_WIDTH * CANVAS_HEIGHT) as usize];

        for (index, geometry) in Geometry::ALL.into_iter().enumerate() {
            let scenario = Scenario::new(geometry, offset)
                .with_clip_first(!self.draw_first)
                .with_anti_alias(self.anti_alias);
            let canvas = render_scenario(&scenario, Pass::Both);
            if let Err(error) = canvas.copy_to_argb32(&mut tile) {
                tracing::error!("Failed to read back {geometry}: {error}");
                continue;
            }

            let column = index as u32 % COLUMNS;
            let row = index as u32 / COLUMNS;
            for (y, line) in tile.chunks_exact(CANVAS_WIDTH as usize).enumerate() {
                let start = ((row * CANVAS_HEIGHT + y as u32) * GRID_WIDTH
                    + column * CANVAS_WIDTH) as usize;
                self.grid[start..start + line.len()].copy_from_slice(line);
            }
        }

        tracing::info!(
            "offset = {:?}, clip first = {}, anti-alias = {}",
            offset,
            !self.draw_first,
            self.anti_alias
        );
    }

    fn handle_key(&mut self, key: char) -> bool {
        match key {
            't' => self.draw_first = !self.draw_first,
            'a' => self.anti_alias = !self.anti_alias,
            _ => match key.to_digit(10) {
                Some(digit) if (1..=OFFSETS.len() as u32).contains(&digit) => {
                    self.offset_index = digit as usize - 1;
                }
                _ => return false,
            },
        }
        self.render_grid();
        true
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        let window = Arc::new(
            event_loop
                .create_window(
                    Window::default_attributes()
                        .with_inner_size(winit::dpi::PhysicalSize::new(GRID_WIDTH, GRID_HEIGHT))
                        .with_title("Scenario Grid - ClipDrawMatch")
                        .with_resizable(false),
                )
                .unwrap(),
        );

        let softbuffer_context = softbuffer::Context::new(window.clone()).unwrap();
        let softbuffer_surface =
            softbuffer::Surface::new(&softbuffer_context, window.clone()).unwrap();

        self.render_grid();
        window.request_redraw();

        self.window = Some(window);
        self.softbuffer_context = Some(softbuffer_context);
        self.softbuffer_surface = Some(softbuffer_surface);
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        let Some(window) = self.window.clone() else {
            return;
        };

        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::KeyboardInput { event, .. } if event.state == ElementState::Pressed => {
                let Some(text) = event.text else { return };
                let mut handled = false;
                for key in text.chars() {
                    handled |= self.handle_key(key);
                }
                if handled {
                    window.request_redraw();
                }
            }
            WindowEvent::RedrawRequested => {
                let Some(surface) = &mut self.softbuffer_surface else {
                    return;
                };
                let size = window.inner_size();
                let (Some(width), Some(height)) =
                    (NonZeroU32::new(size.width), NonZeroU32::new(size.height))
                else {
                    return;
                };
                surface.resize(width, height).unwrap();

                let mut buffer = surface.buffer_mut().unwrap();
                let width = size.width.min(GRID_WIDTH) as usize;
                for (y, line) in buffer
                    .chunks_exact_mut(size.width as usize)
                    .take(GRID_HEIGHT as usize)
                    .enumerate()
                {
                    let start = y * GRID_WIDTH as usize;
                    line[..width].copy_from_slice(&self.grid[start..start + width]);
                }
                buffer.present().unwrap();
            }
            _ => {}
        }
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();
    let event_loop = EventLoop::new()?;
    let mut app = App::default();
    event_loop.run_app(&mut app)?;
    Ok(())
}
