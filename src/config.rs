use std::{fs, path::Path};

use serde::Deserialize;

use crate::{interval::DEFAULT_INTERVAL_MS, Error};

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Tile Cycle".into(),
            width: 960,
            height: 640,
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct AnimationConfig {
    /// Starting redraw interval; clamped into the supported range.
    pub interval_ms: u32,
    /// Mirror the interval into the window title after every adjustment.
    pub readout: bool,
    /// Fixed seed for tile color selection. Random when absent.
    pub seed: Option<u64>,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            interval_ms: DEFAULT_INTERVAL_MS,
            readout: false,
            seed: None,
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq, Default)]
#[serde(default)]
pub struct Config {
    pub window: WindowConfig,
    pub animation: AnimationConfig,
}

impl Config {
    pub fn from_ron_str(data: &str) -> Result<Self, Error> {
        ron::from_str(data).map_err(|err| Error::ConfigParse(err.to_string()))
    }

    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, Error> {
        let path = path.as_ref();
        let data = fs::read_to_string(path).map_err(|source| Error::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_ron_str(&data)
    }
}
