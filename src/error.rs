use thiserror::Error;

use crate::config::ConfigLoadError;
use crate::engine::InvalidModeError;

#[derive(Debug, Error)]
pub enum PlotError {
    #[error("Error while loading config: {0}")]
    ConfigLoadError(#[from] ConfigLoadError),
    #[error("Error while selecting rendering mode: {0}")]
    InvalidMode(#[from] InvalidModeError),
    #[error("Error while driving the demo session: {0}")]
    Session(#[from] anyhow::Error),
}
