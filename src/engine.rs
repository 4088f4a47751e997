use std::cell::RefCell;
use std::rc::Rc;
use std::str::FromStr;

use derive_getters::Getters;
use kurbo::Line;
use rand::rngs::StdRng;
use rand::Rng;
use rand::SeedableRng;
use serde::Deserialize;
use thiserror::Error;

use crate::config::PlotConfig;
use crate::linest;
use crate::linest::Linest;
use crate::linest::LinestResult;
use crate::point::Point;
use crate::render::Frame;
use crate::render::RenderEvent;
use crate::render::Renderer;

pub const DEFAULT_WIDTH: f64 = 600.0;
pub const DEFAULT_HEIGHT: f64 = 500.0;
/// Number of points appended by one `generate` batch.
pub const DEFAULT_BATCH_SIZE: usize = 21;

/// How renderers draw points. Never affects the regression math.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, derive_more::Display)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Each point filled with its own assigned color.
    Colored,
    /// Outlines only, no per-point color.
    Wireframe,
}

#[derive(Debug, Error)]
#[error("unrecognized rendering mode: {0:?} (expected \"colored\" or \"wireframe\")")]
pub struct InvalidModeError(pub String);

impl FromStr for Mode {
    type Err = InvalidModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "colored" => Ok(Mode::Colored),
            "wireframe" => Ok(Mode::Wireframe),
            _ => Err(InvalidModeError(s.to_owned())),
        }
    }
}

/// Owner of the point set and single source of truth for every renderer.
///
/// All mutation and all notification happen synchronously on the calling
/// thread; a broadcast visits renderers in registration order and each
/// handler finishes before the next renderer is visited.
#[derive(Getters)]
pub struct RegressionEngine<R: Rng = StdRng> {
    #[getter(skip)]
    rng: R,
    #[getter(skip)]
    renderers: Vec<Rc<RefCell<dyn Renderer>>>,
    points: Vec<Point>,
    mode: Mode,
    width: f64,
    height: f64,
    batch_size: usize,
}

impl RegressionEngine<StdRng> {
    pub fn new(width: f64, height: f64) -> Self {
        Self::with_rng(width, height, StdRng::from_entropy())
    }

    pub fn from_config(config: &PlotConfig) -> Self {
        Self::from_config_with_rng(config, StdRng::from_entropy())
    }
}

impl<R: Rng> RegressionEngine<R> {
    /// Constructs an engine with an injected random source and
    /// auto-populates it with one batch of random points.
    pub fn with_rng(width: f64, height: f64, rng: R) -> Self {
        Self::build(width, height, DEFAULT_BATCH_SIZE, Mode::Colored, rng)
    }

    pub fn from_config_with_rng(config: &PlotConfig, rng: R) -> Self {
        Self::build(
            config.width,
            config.height,
            config.batch_size,
            config.mode,
            rng,
        )
    }

    fn build(width: f64, height: f64, batch_size: usize, mode: Mode, rng: R) -> Self {
        let mut engine = RegressionEngine {
            rng,
            renderers: Vec::new(),
            points: Vec::new(),
            mode,
            width,
            height,
            batch_size,
        };
        engine.generate_random_points();
        engine
    }

    /// Appends one batch of uniformly sampled points. Mutates only; the
    /// caller decides whether and how to notify.
    pub fn generate_random_points(&mut self) -> &[Point] {
        for _ in 0..self.batch_size {
            let p = Point::sample(&mut self.rng, self.width, self.height);
            self.points.push(p);
        }
        &self.points
    }

    /// Appends a single point without notifying anyone. The non-notifying
    /// primitive underneath [`add_point`](Self::add_point), usable for
    /// batch construction.
    pub fn push_point(&mut self, x: f64, y: f64) -> &Point {
        let p = Point::with_random_color(x, y, &mut self.rng);
        self.points.push(p);
        self.points.last().unwrap()
    }

    /// Appends a single point, then broadcasts `Redraw`. The only mutation
    /// that notifies within the same call; it models a user gesture adding
    /// one point.
    pub fn add_point(&mut self, x: f64, y: f64) {
        self.push_point(x, y);
        self.broadcast(RenderEvent::Redraw);
    }

    /// Empties the point set and broadcasts `Clear`.
    pub fn clear(&mut self) {
        self.points.clear();
        self.broadcast(RenderEvent::Clear);
    }

    /// Appends a fresh random batch and broadcasts `Regenerate`.
    pub fn generate(&mut self) {
        self.generate_random_points();
        self.broadcast(RenderEvent::Regenerate);
    }

    /// Switches the rendering mode and broadcasts `Clear` then
    /// `Regenerate`, in that order. Renderers must wipe fully before
    /// repainting because color usage depends on the mode.
    pub fn set_mode(&mut self, mode: Mode) {
        self.mode = mode;
        self.broadcast(RenderEvent::Clear);
        self.broadcast(RenderEvent::Regenerate);
    }

    /// Best-fit line over the current points, spanning `x = 0 ..= width`.
    /// Recomputed on every call, never cached; `None` with fewer than two
    /// points. All x-coordinates equal yields non-finite endpoints.
    pub fn best_fit_line(&self) -> Option<Line> {
        linest::best_fit_line(&self.points, self.width)
    }

    /// Slope, intercept and r² of the current fit.
    pub fn fit(&self) -> Option<LinestResult> {
        Linest::from_points(&self.points).estimate()
    }

    /// Registers a renderer at the end of the notification order and runs
    /// its one-time `init` against the current state.
    pub fn register_renderer(&mut self, renderer: Rc<RefCell<dyn Renderer>>) {
        renderer.borrow_mut().init(&self.frame());
        self.renderers.push(renderer);
    }

    fn frame(&self) -> Frame {
        Frame {
            points: &self.points,
            mode: self.mode,
            width: self.width,
            height: self.height,
        }
    }

    fn broadcast(&self, event: RenderEvent) {
        let frame = self.frame();
        for renderer in &self.renderers {
            renderer.borrow_mut().notify(event, &frame);
        }
    }
}

#[cfg(test)]
mod test {
    use std::cell::RefCell;
    use std::rc::Rc;

    use itertools::Itertools;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::Mode;
    use super::RegressionEngine;
    use super::DEFAULT_BATCH_SIZE;
    use crate::render::Frame;
    use crate::render::RenderEvent;
    use crate::render::Renderer;

    fn engine() -> RegressionEngine {
        RegressionEngine::with_rng(600.0, 500.0, StdRng::seed_from_u64(7))
    }

    /// Records every notification it receives, tagged so registration
    /// order is observable.
    struct EventLog {
        tag: &'static str,
        log: Rc<RefCell<Vec<(&'static str, RenderEvent)>>>,
    }

    impl Renderer for EventLog {
        fn redraw(&mut self, _frame: &Frame) {
            self.log.borrow_mut().push((self.tag, RenderEvent::Redraw));
        }

        fn regenerate(&mut self, _frame: &Frame) {
            self.log
                .borrow_mut()
                .push((self.tag, RenderEvent::Regenerate));
        }

        fn clear(&mut self, _frame: &Frame) {
            self.log.borrow_mut().push((self.tag, RenderEvent::Clear));
        }
    }

    /// Implements no handler at all; every event must pass it silently.
    struct Inert;

    impl Renderer for Inert {}

    fn wired(
        engine: &mut RegressionEngine,
        tags: &[&'static str],
    ) -> Rc<RefCell<Vec<(&'static str, RenderEvent)>>> {
        let log = Rc::new(RefCell::new(Vec::new()));
        for &tag in tags {
            engine.register_renderer(Rc::new(RefCell::new(EventLog {
                tag,
                log: log.clone(),
            })));
        }
        log
    }

    #[test]
    fn construction_auto_populates_one_batch() {
        let engine = engine();
        assert_eq!(engine.points().len(), DEFAULT_BATCH_SIZE);
        assert!(engine
            .points()
            .iter()
            .all(|p| (0.0..600.0).contains(&p.x) && (0.0..500.0).contains(&p.y)));
    }

    #[test]
    fn add_point_appends_exactly_one_and_is_last() {
        let mut engine = engine();
        let before = engine.points().len();
        engine.add_point(123.0, 45.0);
        assert_eq!(engine.points().len(), before + 1);
        let last = engine.points().last().unwrap();
        assert_eq!((last.x, last.y), (123.0, 45.0));
    }

    #[test]
    fn clear_then_generate_restores_batch_size() {
        let mut engine = engine();
        engine.clear();
        assert!(engine.points().is_empty());
        engine.generate();
        assert_eq!(engine.points().len(), DEFAULT_BATCH_SIZE);
    }

    #[test]
    fn redraw_reaches_each_renderer_once_in_registration_order() {
        let mut engine = engine();
        let log = wired(&mut engine, &["a", "b", "c"]);
        engine.add_point(1.0, 2.0);
        assert_eq!(
            log.borrow().clone(),
            vec![
                ("a", RenderEvent::Redraw),
                ("b", RenderEvent::Redraw),
                ("c", RenderEvent::Redraw),
            ]
        );
    }

    #[test]
    fn set_mode_emits_clear_then_regenerate_and_nothing_else() {
        let mut engine = engine();
        let log = wired(&mut engine, &["a", "b"]);
        engine.set_mode(Mode::Wireframe);
        let events = log.borrow().clone();
        assert_eq!(
            events,
            vec![
                ("a", RenderEvent::Clear),
                ("b", RenderEvent::Clear),
                ("a", RenderEvent::Regenerate),
                ("b", RenderEvent::Regenerate),
            ]
        );
        assert_eq!(*engine.mode(), Mode::Wireframe);
    }

    #[test]
    fn handlerless_renderer_is_silently_skipped() {
        let mut engine = engine();
        engine.register_renderer(Rc::new(RefCell::new(Inert)));
        let log = wired(&mut engine, &["a"]);
        engine.clear();
        engine.generate();
        engine.add_point(0.0, 0.0);
        let events = log.borrow().iter().map(|(_, e)| *e).collect_vec();
        assert_eq!(
            events,
            vec![
                RenderEvent::Clear,
                RenderEvent::Regenerate,
                RenderEvent::Redraw,
            ]
        );
    }

    #[test]
    fn engine_line_matches_fit() {
        let mut engine = engine();
        engine.clear();
        engine.push_point(0.0, 1.0);
        engine.push_point(1.0, 3.0);
        engine.push_point(2.0, 5.0);
        let fit = engine.fit().unwrap();
        let line = engine.best_fit_line().unwrap();
        assert_eq!(line.p0.x, 0.0);
        assert_eq!(line.p1.x, 600.0);
        assert!((line.p0.y - fit.intercept).abs() < 1e-12);
        assert!((line.p1.y - (fit.intercept + fit.slope * 600.0)).abs() < 1e-12);
    }

    #[test]
    fn line_is_none_below_two_points() {
        let mut engine = engine();
        engine.clear();
        assert!(engine.best_fit_line().is_none());
        engine.push_point(1.0, 1.0);
        assert!(engine.best_fit_line().is_none());
        engine.push_point(2.0, 2.0);
        assert!(engine.best_fit_line().is_some());
    }

    #[test]
    fn push_point_does_not_notify() {
        let mut engine = engine();
        let log = wired(&mut engine, &["a"]);
        engine.push_point(1.0, 1.0);
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn mode_parsing_rejects_unknown_names() {
        assert_eq!("colored".parse::<Mode>().unwrap(), Mode::Colored);
        assert_eq!("wireframe".parse::<Mode>().unwrap(), Mode::Wireframe);
        assert!("sepia".parse::<Mode>().is_err());
    }

    #[test]
    fn seeded_engines_generate_identical_points() {
        let a = RegressionEngine::with_rng(600.0, 500.0, StdRng::seed_from_u64(99));
        let b = RegressionEngine::with_rng(600.0, 500.0, StdRng::seed_from_u64(99));
        let coords = |e: &RegressionEngine| e.points().iter().map(|p| (p.x, p.y)).collect_vec();
        assert_eq!(coords(&a), coords(&b));
    }
}
