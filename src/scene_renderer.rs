use derive_getters::Getters;
use kurbo::Circle;
use kurbo::Rect;

use crate::drag::DragToAdd;
use crate::engine::Mode;
use crate::point::Point;
use crate::render::Frame;
use crate::render::Renderer;
use crate::surface::axis_lines;
use crate::surface::NodeId;
use crate::surface::SceneSurface;
use crate::surface::AXIS_COLOR;
use crate::surface::AXIS_WIDTH;
use crate::surface::BACKGROUND_COLOR;
use crate::surface::LINE_COLOR;
use crate::surface::LINE_WIDTH;
use crate::surface::OUTLINE_COLOR;
use crate::surface::OUTLINE_WIDTH;
use crate::surface::POINT_RADIUS;

/// Renderer over a retained-scene backend.
///
/// Keeps a handle per drawn primitive, so `Redraw` only has to draw the
/// newest point and swap out the line node. The background rect exists to
/// give drag detection a hit surface and is restored after every full
/// clear.
#[derive(Getters)]
pub struct SceneRenderer<S: SceneSurface> {
    surface: S,
    drag: DragToAdd,
    #[getter(skip)]
    point_nodes: Vec<NodeId>,
    #[getter(skip)]
    line_node: Option<NodeId>,
    #[getter(skip)]
    background_node: Option<NodeId>,
    #[getter(skip)]
    axis_nodes: Vec<NodeId>,
}

impl<S: SceneSurface> SceneRenderer<S> {
    /// `origin` is the surface's top-left offset in page coordinates,
    /// used to normalize drag gestures.
    pub fn new(surface: S, origin: impl Into<kurbo::Point>) -> Self {
        SceneRenderer {
            surface,
            drag: DragToAdd::new(origin),
            point_nodes: Vec::new(),
            line_node: None,
            background_node: None,
            axis_nodes: Vec::new(),
        }
    }

    pub fn drag_mut(&mut self) -> &mut DragToAdd {
        &mut self.drag
    }

    fn wipe(&mut self) {
        self.surface.clear();
        self.point_nodes.clear();
        self.line_node = None;
        self.background_node = None;
        self.axis_nodes.clear();
    }

    fn draw_decoration(&mut self, frame: &Frame) {
        let background = Rect::new(0.0, 0.0, frame.width, frame.height);
        self.background_node = Some(self.surface.fill(background.into(), &BACKGROUND_COLOR));
        for line in axis_lines(frame.width, frame.height).iter() {
            let id = self.surface.stroke((*line).into(), &AXIS_COLOR, AXIS_WIDTH);
            self.axis_nodes.push(id);
        }
    }

    fn draw_point(&mut self, point: &Point, mode: Mode) -> NodeId {
        let circle = Circle::new(point.pos(), POINT_RADIUS);
        match mode {
            Mode::Colored => self.surface.fill(circle.into(), point.color()),
            Mode::Wireframe => self.surface.stroke(circle.into(), &OUTLINE_COLOR, OUTLINE_WIDTH),
        }
    }

    /// Removes the current line node, if any, and strokes the line for
    /// the current point set. Skipped entirely below two points.
    fn refresh_line(&mut self, frame: &Frame) {
        if let Some(id) = self.line_node.take() {
            self.surface.remove(id);
        }
        if let Some(line) = frame.best_fit_line() {
            self.line_node = Some(self.surface.stroke(line.into(), &LINE_COLOR, LINE_WIDTH));
        }
    }

    fn full_redraw(&mut self, frame: &Frame) {
        self.wipe();
        self.draw_decoration(frame);
        for point in frame.points {
            let id = self.draw_point(point, frame.mode);
            self.point_nodes.push(id);
        }
        self.refresh_line(frame);
    }
}

impl<S: SceneSurface> Renderer for SceneRenderer<S> {
    fn init(&mut self, frame: &Frame) {
        self.render(frame);
    }

    fn render(&mut self, frame: &Frame) {
        self.full_redraw(frame);
    }

    fn redraw(&mut self, frame: &Frame) {
        if let Some(point) = frame.points.last() {
            let id = self.draw_point(point, frame.mode);
            self.point_nodes.push(id);
        }
        self.refresh_line(frame);
    }

    fn regenerate(&mut self, frame: &Frame) {
        self.full_redraw(frame);
    }

    fn clear(&mut self, frame: &Frame) {
        self.wipe();
        self.draw_decoration(frame);
    }

    fn supports_incremental_redraw(&self) -> bool {
        true
    }
}
