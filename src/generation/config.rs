//! Batch configuration

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::core::{Error, Result};
use crate::scene::SceneLayout;

/// Largest accepted sample count
pub const MAX_SAMPLES: u32 = 10_000;

/// Configuration for one dataset generation run.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BatchConfig {
    /// Number of samples to generate (1..=10000)
    pub sample_count: u32,
    /// Also render an orthographic top-down view per sample
    pub enable_top_view: bool,
    /// Root of the Images/Labels/Topviews tree
    pub output_dir: PathBuf,
    /// Batch seed; each sample's stream derives from it and the index
    pub seed: u64,
    /// Worker threads; 1 runs samples sequentially
    pub jobs: usize,
    /// File name prefix
    pub prefix: String,
    /// Directory of material textures; `None` renders flat colors
    pub assets_dir: Option<PathBuf>,
    pub layout: SceneLayout,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            sample_count: 1000,
            enable_top_view: false,
            output_dir: PathBuf::from("TerrainLayerImages"),
            seed: 12345,
            jobs: 1,
            prefix: "MarsTerrain".to_string(),
            assets_dir: None,
            layout: SceneLayout::default(),
        }
    }
}

impl BatchConfig {
    /// Load from a JSON file. Missing fields take their defaults.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Check the configuration before anything is written.
    pub fn validate(&self) -> Result<()> {
        if !(1..=MAX_SAMPLES).contains(&self.sample_count) {
            return Err(Error::InvalidConfig(format!(
                "sample_count must be in 1..={}, got {}",
                MAX_SAMPLES, self.sample_count
            )));
        }
        if self.output_dir.as_os_str().is_empty() {
            return Err(Error::InvalidConfig("output_dir must not be empty".into()));
        }
        if self.output_dir.is_file() {
            return Err(Error::InvalidConfig(format!(
                "output_dir {} is an existing file",
                self.output_dir.display()
            )));
        }
        if self.prefix.is_empty() || self.prefix.contains(['/', '\\']) {
            return Err(Error::InvalidConfig(format!(
                "prefix must be a non-empty file name fragment, got {:?}",
                self.prefix
            )));
        }
        if self.jobs == 0 {
            return Err(Error::InvalidConfig("jobs must be at least 1".into()));
        }
        self.layout.validate()
    }
}
