//! Drives one sample view against a [`Canvas`].
//!
//! The host owns the pixels; a windowing layer only forwards characters,
//! asks for frames while [`SampleHost::needs_redraw`] is set, and presents the
//! result.

use std::time::Instant;

use crate::canvas::Canvas;
use crate::error::CanvasError;
use crate::view::{Event, Reply, SampleView};
use crate::Color;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HostConfig {
    pub width: u32,
    pub height: u32,
    /// Cleared to before every frame.
    pub background: Color,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            width: 400,
            height: 400,
            background: Color::WHITE,
        }
    }
}

pub struct SampleHost {
    view: Box<dyn SampleView>,
    canvas: Canvas,
    background: Color,
    frame_count: u64,
    needs_redraw: bool,
}

impl SampleHost {
    pub fn new(view: Box<dyn SampleView>, config: HostConfig) -> Result<Self, CanvasError> {
        let canvas = Canvas::new(config.width, config.height, config.background)?;
        Ok(Self {
            view,
            canvas,
            background: config.background,
            frame_count: 0,
            needs_redraw: true,
        })
    }

    /// The view's display name, if it answers title queries.
    pub fn title(&mut self) -> Option<&'static str> {
        self.view.title()
    }

    /// Forwards a typed character to the view.
    pub fn handle_char(&mut self, key: char) -> Reply {
        let reply = self.view.on_event(Event::Char(key));
        self.collect_invalidation();
        if reply == Reply::Unhandled {
            tracing::trace!(?key, "key not handled by sample");
        }
        reply
    }

    /// True if the view asked for another frame.
    pub fn needs_redraw(&self) -> bool {
        self.needs_redraw
    }

    /// Clears the canvas and draws one frame for `now`.
    pub fn render_frame(&mut self, now: Instant) -> &Canvas {
        self.canvas.clear(self.background);
        self.view.draw_content(&mut self.canvas, now);
        self.frame_count += 1;
        self.needs_redraw = false;
        self.collect_invalidation();
        &self.canvas
    }

    /// Replaces the canvas with one of the new size.
    pub fn resize(&mut self, width: u32, height: u32) -> Result<(), CanvasError> {
        if (width, height) == (self.canvas.width(), self.canvas.height()) {
            return Ok(());
        }
        self.canvas = Canvas::new(width, height, self.background)?;
        tracing::debug!(width, height, "resized sample canvas");
        self.needs_redraw = true;
        Ok(())
    }

    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Copies the last frame into `out` as premultiplied `0xAARRGGBB` words.
    pub fn present_argb32(&self, out: &mut [u32]) -> Result<(), CanvasError> {
        self.canvas.copy_to_argb32(out)
    }

    fn collect_invalidation(&mut self) {
        if self.view.take_invalidation() {
            self.needs_redraw = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sample::ClipDrawMatch;

    fn host() -> (SampleHost, Instant) {
        let started = Instant::now();
        let host = SampleHost::new(Box::new(ClipDrawMatch::new(started)), HostConfig::default())
            .expect("default size is valid");
        (host, started)
    }

    #[test]
    fn reports_the_sample_title() {
        let (mut host, _) = host();
        assert_eq!(host.title(), Some("ClipDrawMatch"));
    }

    #[test]
    fn frames_keep_requesting_redraws() {
        let (mut host, started) = host();
        assert!(host.needs_redraw());
        for _ in 0..5 {
            host.render_frame(started);
            assert!(host.needs_redraw());
        }
        assert_eq!(host.frame_count(), 5);
    }

    #[test]
    fn handled_keys_request_a_redraw() {
        let (mut host, started) = host();
        host.render_frame(started);
        assert_eq!(host.handle_char('3'), Reply::Handled);
        assert!(host.needs_redraw());
        assert_eq!(host.handle_char('q'), Reply::Unhandled);
    }

    #[test]
    fn frame_shows_black_shape_on_white() {
        let (mut host, started) = host();
        let canvas = host.render_frame(started);
        assert_eq!(canvas.pixel(200, 200), Some(Color::BLACK));
        assert_eq!(canvas.pixel(20, 20), Some(Color::WHITE));
        assert_eq!(canvas.pixel(380, 380), Some(Color::WHITE));
    }

    #[test]
    fn resize_rejects_empty_canvas_and_keeps_the_old_one() {
        let (mut host, _) = host();
        assert!(host.resize(0, 100).is_err());
        assert_eq!(host.canvas().width(), 400);

        host.resize(640, 480).unwrap();
        assert_eq!((host.canvas().width(), host.canvas().height()), (640, 480));
    }

    #[test]
    fn presents_argb_words() {
        let (mut host, started) = host();
        host.render_frame(started);
        let mut out = vec![0u32; 400 * 400];
        host.present_argb32(&mut out).unwrap();
        assert_eq!(out[0], Color::WHITE.to_argb32());
        assert_eq!(out[200 * 400 + 200], Color::BLACK.to_argb32());
    }
}
