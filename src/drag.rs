use kurbo::Point;
use kurbo::Vec2;

/// Click/drag-to-add gesture state for one drawing surface.
///
/// Pointer positions arrive in page coordinates; they are normalized
/// against the surface's top-left offset so the added point lands in the
/// same place regardless of page scroll or surface position.
#[derive(Clone, Copy, Debug)]
pub struct DragToAdd {
    enabled: bool,
    origin: Point,
}

impl DragToAdd {
    /// Starts disabled; the toggle control enables it.
    pub fn new(origin: impl Into<Point>) -> Self {
        DragToAdd {
            enabled: false,
            origin: origin.into(),
        }
    }

    pub fn enabled(&self) -> bool {
        self.enabled
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Surface-relative coordinates for a pointer event, or `None` while
    /// the toggle is off (a silent no-op, not an error).
    pub fn resolve(&self, page_x: f64, page_y: f64) -> Option<(f64, f64)> {
        if !self.enabled {
            return None;
        }
        let local = Point::new(page_x, page_y) - Vec2::new(self.origin.x, self.origin.y);
        Some((local.x, local.y))
    }
}
