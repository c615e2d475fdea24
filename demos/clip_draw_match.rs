/// Interactive ClipDrawMatch window.
///
/// Run with:    cargo run --example clip_draw_match
///
/// Keys `1`-`9` pick a geometry, `t` swaps which pass is drawn on top. With
/// the clip drawn first no red should be visible around the black shape.
use std::error::Error;
use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::Instant;

use clip_draw_match::{HostConfig, SampleHost, SampleRegistry, TITLE};
use winit::application::ApplicationHandler;
use winit::event::{ElementState, WindowEvent};
use winit::event_loop::{ActiveEventLoop, EventLoop};
use winit::window::{Window, WindowId};

struct App {
    host: SampleHost,
    window: Option<Arc<Window>>,
    softbuffer_context: Option<softbuffer::Context<Arc<Window>>>,
    softbuffer_surface: Option<softbuffer::Surface<Arc<Window>, Arc<Window>>>,
}

impl App {
    fn new() -> Result<Self, Box<dyn Error>> {
        let registry = SampleRegistry::builtin();
        let view = registry
            .create(TITLE, Instant::now())
            .ok_or("sample is not registered")?;
        let host = SampleHost::new(view, HostConfig::default())?;

        Ok(Self {
            host,
            window: None,
            softbuffer_context: None,
            softbuffer_surface: None,
        })
    }

    fn resize_surface(&mut self, width: u32, height: u32) {
        let (Some(width), Some(height)) = (NonZeroU32::new(width), NonZeroU32::new(height)) else {
            return;
        };
        if let Some(surface) = &mut self.softbuffer_surface {
            if let Err(error) = surface.resize(width, height) {
                tracing::error!("Failed to resize softbuffer surface: {error}");
            }
        }
        if let Err(error) = self.host.resize(width.get(), height.get()) {
            tracing::error!("Failed to resize sample canvas: {error}");
        }
    }

    fn redraw(&mut self) {
        let Some(window) = &self.window else { return };
        let Some(surface) = &mut self.softbuffer_surface else {
            return;
        };

        self.host.render_frame(Instant::now());

        let mut buffer = match surface.buffer_mut() {
            Ok(buffer) => buffer,
            Err(error) => {
                tracing::error!("Failed to map softbuffer buffer: {error}");
                return;
            }
        };
        if let Err(error) = self.host.present_argb32(&mut buffer) {
            tracing::warn!("Skipping frame: {error}");
            return;
        }
        window.pre_present_notify();
        if let Err(error) = buffer.present() {
            tracing::error!("Failed to present frame: {error}");
        }

        if self.host.frame_count() % 300 == 0 {
            tracing::info!("{} frames drawn", self.host.frame_count());
        }
        if self.host.needs_redraw() {
            window.request_redraw();
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        let config = HostConfig::default();
        let title = self.host.title().unwrap_or(TITLE);
        let window = match event_loop.create_window(
            Window::default_attributes()
                .with_inner_size(winit::dpi::PhysicalSize::new(config.width, config.height))
                .with_title(title),
        ) {
            Ok(window) => Arc::new(window),
            Err(error) => {
                tracing::error!("Failed to create window: {error}");
                event_loop.exit();
                return;
            }
        };

        let softbuffer_context = match softbuffer::Context::new(window.clone()) {
            Ok(context) => context,
            Err(error) => {
                tracing::error!("Failed to create softbuffer context: {error}");
                event_loop.exit();
                return;
            }
        };
        let softbuffer_surface = match softbuffer::Surface::new(&softbuffer_context, window.clone())
        {
            Ok(surface) => surface,
            Err(error) => {
                tracing::error!("Failed to create softbuffer surface: {error}");
                event_loop.exit();
                return;
            }
        };

        let size = window.inner_size();
        window.request_redraw();
        self.window = Some(window);
        self.softbuffer_context = Some(softbuffer_context);
        self.softbuffer_surface = Some(softbuffer_surface);
        self.resize_surface(size.width, size.height);
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        window_id: WindowId,
        event: WindowEvent,
    ) {
        let Some(window) = self.window.clone() else {
            return;
        };
        if window_id != window.id() {
            return;
        }

        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::Resized(size) => {
                self.resize_surface(size.width, size.height);
                window.request_redraw();
            }
            WindowEvent::KeyboardInput { event, .. } if event.state == ElementState::Pressed => {
                let Some(text) = event.text else { return };
                for key in text.chars() {
                    self.host.handle_char(key);
                }
                if self.host.needs_redraw() {
                    window.request_redraw();
                }
            }
            WindowEvent::RedrawRequested => self.redraw(),
            _ => {}
        }
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();
    let event_loop = EventLoop::new()?;
    let mut app = App::new()?;
    event_loop.run_app(&mut app)?;
    Ok(())
}
