use std::cell::RefCell;
use std::env;
use std::rc::Rc;

use anyhow::Context;
use linefit::config::PlotConfig;
use linefit::engine::Mode;
use linefit::engine::RegressionEngine;
use linefit::error::PlotError;
use linefit::raster_renderer::RasterRenderer;
use linefit::scene_renderer::SceneRenderer;
use linefit::surface::RecordingRaster;
use linefit::surface::RecordingScene;

/// Demo driver: one engine, one retained-scene renderer and one raster
/// renderer side by side over in-memory surfaces, driven through the same
/// gestures a UI would produce.
fn main() -> Result<(), PlotError> {
    let mut config = PlotConfig::load()?;
    if let Some(arg) = env::args().nth(1) {
        config.mode = arg.parse()?;
    }

    let mut engine = RegressionEngine::from_config(&config);
    let scene = Rc::new(RefCell::new(SceneRenderer::new(
        RecordingScene::default(),
        (0.0, 0.0),
    )));
    let raster = Rc::new(RefCell::new(RasterRenderer::new(
        RecordingRaster::default(),
        (config.width + 40.0, 0.0),
    )));
    engine.register_renderer(scene.clone());
    engine.register_renderer(raster.clone());

    run_session(&mut engine, &scene, &raster)?;
    Ok(())
}

fn run_session(
    engine: &mut RegressionEngine,
    scene: &Rc<RefCell<SceneRenderer<RecordingScene>>>,
    raster: &Rc<RefCell<RasterRenderer<RecordingRaster>>>,
) -> anyhow::Result<()> {
    engine.generate();

    // A drag gesture over the scene surface with click-to-add switched on.
    scene.borrow_mut().drag_mut().set_enabled(true);
    let gesture = scene.borrow().drag().resolve(320.0, 180.0);
    let (x, y) = gesture.context("drag gesture ignored although the toggle is on")?;
    engine.add_point(x, y);

    engine.set_mode(Mode::Wireframe);

    if let Some(fit) = engine.fit() {
        println!(
            "{} points, slope {:.4}, intercept {:.4}, r2 {:.4}",
            engine.points().len(),
            fit.slope,
            fit.intercept,
            fit.r2
        );
    }
    println!(
        "scene holds {} nodes; raster repainted {} times",
        scene.borrow().surface().nodes().len(),
        raster.borrow().surface().wipes()
    );

    engine.clear();
    Ok(())
}
