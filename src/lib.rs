pub mod config;
pub mod drag;
pub mod engine;
pub mod error;
pub mod linest;
pub mod point;
pub mod raster_renderer;
pub mod render;
pub mod scene_renderer;
pub mod surface;
