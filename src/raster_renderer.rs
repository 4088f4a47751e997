use derive_getters::Getters;
use kurbo::Circle;
use kurbo::Rect;

use crate::drag::DragToAdd;
use crate::engine::Mode;
use crate::point::Point;
use crate::render::Frame;
use crate::render::Renderer;
use crate::surface::axis_lines;
use crate::surface::RasterSurface;
use crate::surface::AXIS_COLOR;
use crate::surface::AXIS_WIDTH;
use crate::surface::BACKGROUND_COLOR;
use crate::surface::LINE_COLOR;
use crate::surface::LINE_WIDTH;
use crate::surface::OUTLINE_COLOR;
use crate::surface::OUTLINE_WIDTH;
use crate::surface::POINT_RADIUS;

/// Renderer over an immediate-mode raster backend.
///
/// There are no primitive handles, so every event that changes the
/// picture wipes the surface and repaints everything. There is no cheaper
/// path; `Redraw` costs the same as `Regenerate`.
#[derive(Getters)]
pub struct RasterRenderer<S: RasterSurface> {
    surface: S,
    drag: DragToAdd,
}

impl<S: RasterSurface> RasterRenderer<S> {
    pub fn new(surface: S, origin: impl Into<kurbo::Point>) -> Self {
        RasterRenderer {
            surface,
            drag: DragToAdd::new(origin),
        }
    }

    pub fn drag_mut(&mut self) -> &mut DragToAdd {
        &mut self.drag
    }

    fn draw_decoration(&mut self, frame: &Frame) {
        let background = Rect::new(0.0, 0.0, frame.width, frame.height);
        self.surface.fill(background.into(), &BACKGROUND_COLOR);
        for line in axis_lines(frame.width, frame.height).iter() {
            self.surface.stroke((*line).into(), &AXIS_COLOR, AXIS_WIDTH);
        }
    }

    fn draw_point(&mut self, point: &Point, mode: Mode) {
        let circle = Circle::new(point.pos(), POINT_RADIUS);
        match mode {
            Mode::Colored => self.surface.fill(circle.into(), point.color()),
            Mode::Wireframe => self.surface.stroke(circle.into(), &OUTLINE_COLOR, OUTLINE_WIDTH),
        }
    }

    fn repaint(&mut self, frame: &Frame) {
        self.surface.wipe();
        self.draw_decoration(frame);
        for point in frame.points {
            self.draw_point(point, frame.mode);
        }
        if let Some(line) = frame.best_fit_line() {
            self.surface.stroke(line.into(), &LINE_COLOR, LINE_WIDTH);
        }
    }
}

impl<S: RasterSurface> Renderer for RasterRenderer<S> {
    fn init(&mut self, frame: &Frame) {
        self.render(frame);
    }

    fn render(&mut self, frame: &Frame) {
        self.repaint(frame);
    }

    // Full repaint even for a single appended point.
    fn redraw(&mut self, frame: &Frame) {
        self.repaint(frame);
    }

    fn regenerate(&mut self, frame: &Frame) {
        self.repaint(frame);
    }

    fn clear(&mut self, frame: &Frame) {
        self.surface.wipe();
        self.draw_decoration(frame);
    }
}

#[cfg(test)]
mod test {
    use piet::Color;

    use super::RasterRenderer;
    use crate::engine::Mode;
    use crate::point::Point;
    use crate::render::Frame;
    use crate::render::Renderer;
    use crate::surface::PaintOp;
    use crate::surface::RecordingRaster;
    use crate::surface::Shape;

    fn frame<'a>(points: &'a [Point], mode: Mode) -> Frame<'a> {
        Frame {
            points,
            mode,
            width: 600.0,
            height: 500.0,
        }
    }

    fn points(coords: &[(f64, f64)]) -> Vec<Point> {
        coords
            .iter()
            .map(|&(x, y)| Point::new(x, y, Color::TEAL))
            .collect()
    }

    #[test]
    fn never_reports_incremental_capability() {
        let renderer = RasterRenderer::new(RecordingRaster::default(), (0.0, 0.0));
        assert!(!renderer.supports_incremental_redraw());
    }

    #[test]
    fn redraw_wipes_and_repaints_every_point() {
        let mut pts = points(&[(0.0, 1.0), (1.0, 3.0)]);
        let mut renderer = RasterRenderer::new(RecordingRaster::default(), (0.0, 0.0));
        renderer.init(&frame(&pts, Mode::Colored));
        assert_eq!(renderer.surface().wipes(), 1);
        pts.extend(points(&[(2.0, 5.0)]));
        renderer.redraw(&frame(&pts, Mode::Colored));
        assert_eq!(renderer.surface().wipes(), 2);
        let circles = renderer
            .surface()
            .ops()
            .iter()
            .filter(|op| matches!(op, PaintOp::Fill(Shape::Circle(_), _)))
            .count();
        assert_eq!(circles, 3);
    }

    #[test]
    fn clear_leaves_decoration_only() {
        let pts = points(&[(0.0, 1.0), (1.0, 3.0)]);
        let mut renderer = RasterRenderer::new(RecordingRaster::default(), (0.0, 0.0));
        renderer.init(&frame(&pts, Mode::Colored));
        renderer.clear(&frame(&[], Mode::Colored));
        let ops = renderer.surface().ops();
        assert_eq!(ops.len(), 3);
        assert!(matches!(ops[0], PaintOp::Fill(Shape::Rect(_), _)));
        assert!(matches!(ops[1], PaintOp::Stroke(Shape::Line(_), _, _)));
        assert!(matches!(ops[2], PaintOp::Stroke(Shape::Line(_), _, _)));
    }
}
