use kurbo::Circle;
use kurbo::Line;
use kurbo::Rect;
use piet::Color;

pub const POINT_RADIUS: f64 = 3.0;
pub const LINE_WIDTH: f64 = 2.0;
pub const AXIS_WIDTH: f64 = 1.0;
pub const OUTLINE_WIDTH: f64 = 1.0;
/// Axis lines sit one unit in from the surface edge so they stay visible.
pub const AXIS_INSET: f64 = 1.0;

pub const BACKGROUND_COLOR: Color = Color::WHITE;
pub const AXIS_COLOR: Color = Color::GRAY;
pub const LINE_COLOR: Color = Color::BLACK;
pub const OUTLINE_COLOR: Color = Color::BLACK;

/// The y-axis along the left edge and the x-axis along the bottom edge.
pub fn axis_lines(width: f64, height: f64) -> [Line; 2] {
    [
        Line::new((AXIS_INSET, AXIS_INSET), (AXIS_INSET, height - AXIS_INSET)),
        Line::new(
            (AXIS_INSET, height - AXIS_INSET),
            (width - AXIS_INSET, height - AXIS_INSET),
        ),
    ]
}

/// Geometry a renderer may put on a surface.
#[derive(Clone, Copy, Debug, PartialEq, derive_more::From)]
pub enum Shape {
    Line(Line),
    Rect(Rect),
    Circle(Circle),
}

/// Handle to a primitive retained by a [`SceneSurface`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, derive_more::From)]
pub struct NodeId(pub u64);

/// A retained-scene drawing backend: every primitive stays addressable
/// after insertion, so single primitives can be removed or replaced
/// without touching the rest of the scene.
pub trait SceneSurface {
    fn fill(&mut self, shape: Shape, color: &Color) -> NodeId;
    fn stroke(&mut self, shape: Shape, color: &Color, width: f64) -> NodeId;
    fn remove(&mut self, id: NodeId);
    fn clear(&mut self);
}

/// An immediate-mode raster backend: paint calls rasterize straight into
/// the surface and leave no handle behind. The only way to change
/// anything is to wipe and repaint.
pub trait RasterSurface {
    fn fill(&mut self, shape: Shape, color: &Color);
    fn stroke(&mut self, shape: Shape, color: &Color, width: f64);
    fn wipe(&mut self);
}

/// One paint call, as recorded by the in-memory surfaces.
#[derive(Clone, Debug)]
pub enum PaintOp {
    Fill(Shape, Color),
    Stroke(Shape, Color, f64),
}

/// In-memory [`SceneSurface`] that keeps every live primitive addressable
/// by its handle. Serves as the demo backend and as a test double.
#[derive(Default)]
pub struct RecordingScene {
    next_id: u64,
    nodes: Vec<(NodeId, PaintOp)>,
}

impl RecordingScene {
    pub fn nodes(&self) -> &[(NodeId, PaintOp)] {
        &self.nodes
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.iter().any(|(n, _)| *n == id)
    }

    fn insert(&mut self, op: PaintOp) -> NodeId {
        let id = NodeId(self.next_id);
        self.next_id += 1;
        self.nodes.push((id, op));
        id
    }
}

impl SceneSurface for RecordingScene {
    fn fill(&mut self, shape: Shape, color: &Color) -> NodeId {
        self.insert(PaintOp::Fill(shape, color.clone()))
    }

    fn stroke(&mut self, shape: Shape, color: &Color, width: f64) -> NodeId {
        self.insert(PaintOp::Stroke(shape, color.clone(), width))
    }

    fn remove(&mut self, id: NodeId) {
        self.nodes.retain(|(n, _)| *n != id);
    }

    fn clear(&mut self) {
        self.nodes.clear();
    }
}

/// In-memory [`RasterSurface`] that logs paint calls and counts wipes.
#[derive(Default)]
pub struct RecordingRaster {
    ops: Vec<PaintOp>,
    wipes: usize,
}

impl RecordingRaster {
    pub fn ops(&self) -> &[PaintOp] {
        &self.ops
    }

    pub fn wipes(&self) -> usize {
        self.wipes
    }
}

impl RasterSurface for RecordingRaster {
    fn fill(&mut self, shape: Shape, color: &Color) {
        self.ops.push(PaintOp::Fill(shape, color.clone()));
    }

    fn stroke(&mut self, shape: Shape, color: &Color, width: f64) {
        self.ops.push(PaintOp::Stroke(shape, color.clone(), width));
    }

    fn wipe(&mut self) {
        self.ops.clear();
        self.wipes += 1;
    }
}
