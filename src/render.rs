use kurbo::Line;

use crate::engine::Mode;
use crate::linest;
use crate::linest::Linest;
use crate::linest::LinestResult;
use crate::point::Point;

/// The complete set of engine-to-renderer notifications.
#[derive(Clone, Copy, Debug, PartialEq, Eq, derive_more::Display)]
pub enum RenderEvent {
    /// One point was appended; incremental update is permitted.
    Redraw,
    /// The point set was emptied; wipe everything, keep decoration.
    Clear,
    /// The point set changed wholesale; full redraw, never incremental.
    Regenerate,
}

/// Read-only view of engine state handed to renderer handlers.
///
/// Renderers hold no copy of point data; whatever they need beyond their
/// own primitive handles they read from here, synchronously, during their
/// handler.
#[derive(Clone, Copy, Debug)]
pub struct Frame<'a> {
    pub points: &'a [Point],
    pub mode: Mode,
    pub width: f64,
    pub height: f64,
}

impl<'a> Frame<'a> {
    /// Recomputed from the point set on every call; `None` with fewer than
    /// two points, which callers treat as "skip the line".
    pub fn best_fit_line(&self) -> Option<Line> {
        linest::best_fit_line(self.points, self.width)
    }

    pub fn fit(&self) -> Option<LinestResult> {
        Linest::from_points(self.points).estimate()
    }
}

/// Capability contract between the engine and a visual representation.
///
/// Every handler has a default no-op body: a renderer that does not care
/// about an event simply leaves the method out, and the broadcast passes
/// it by without error.
pub trait Renderer {
    /// First full render plus interaction listener installation. Called
    /// exactly once, at registration.
    fn init(&mut self, _frame: &Frame) {}

    /// Full draw of background, axes, points and best-fit line.
    fn render(&mut self, _frame: &Frame) {}

    /// `Redraw` handler. Backends that retain primitive handles may draw
    /// only `frame.points.last()` and refresh the line; immediate-mode
    /// backends must clear and repaint everything.
    fn redraw(&mut self, _frame: &Frame) {}

    /// `Regenerate` handler. Always a full redraw.
    fn regenerate(&mut self, _frame: &Frame) {}

    /// `Clear` handler. Wipe all primitives, restore static decoration
    /// (axes, background), draw no points and no line.
    fn clear(&mut self, _frame: &Frame) {}

    /// Whether this renderer may take the cheap path on `Redraw`. Authors
    /// of retained-scene backends return `true` and implement the
    /// incremental contract; raster backends leave the default.
    fn supports_incremental_redraw(&self) -> bool {
        false
    }

    /// Dispatches a broadcast event to the matching handler.
    fn notify(&mut self, event: RenderEvent, frame: &Frame) {
        match event {
            RenderEvent::Redraw => self.redraw(frame),
            RenderEvent::Clear => self.clear(frame),
            RenderEvent::Regenerate => self.regenerate(frame),
        }
    }
}
