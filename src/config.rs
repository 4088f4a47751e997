use std::fs::File;
use std::io::BufReader;
use std::io::ErrorKind;
use std::io::Read;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::engine::Mode;
use crate::engine::DEFAULT_BATCH_SIZE;
use crate::engine::DEFAULT_HEIGHT;
use crate::engine::DEFAULT_WIDTH;

pub const CONFIG_PATH: &str = "linefit.toml";

/// Session parameters: logical canvas size, batch size of one `generate`,
/// and the initial rendering mode.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct PlotConfig {
    pub width: f64,
    pub height: f64,
    pub batch_size: usize,
    pub mode: Mode,
}

impl Default for PlotConfig {
    fn default() -> Self {
        PlotConfig {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            batch_size: DEFAULT_BATCH_SIZE,
            mode: Mode::Colored,
        }
    }
}

impl PlotConfig {
    /// Loads `linefit.toml` from the working directory. A missing file is
    /// not an error; every field has a default. A malformed file is.
    pub fn load() -> Result<PlotConfig, ConfigLoadError> {
        Self::load_from(CONFIG_PATH)
    }

    pub fn load_from(path: impl AsRef<Path>) -> Result<PlotConfig, ConfigLoadError> {
        let file = match File::open(path) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(PlotConfig::default()),
            Err(e) => return Err(e.into()),
        };
        let mut s = String::new();
        BufReader::new(file).read_to_string(&mut s)?;
        Ok(toml::from_str(&s)?)
    }
}

#[derive(Debug, Error)]
pub enum ConfigLoadError {
    #[error("{0}")]
    IOError(#[from] std::io::Error),
    #[error("{0}")]
    IllegalConfigEntry(#[from] toml::de::Error),
}
