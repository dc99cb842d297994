/// step settings for the optimization loop
/// can be persisted to JSON and reloaded between runs
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{GeometrizeError, Result};
use crate::shape::ShapeType;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StepSettings {
    /// geometry kinds to draw from; each candidate picks one uniformly
    pub shape_types: Vec<ShapeType>,
    /// alpha of every drawn shape (0-255)
    pub alpha: u8,
    /// random candidates hill-climbed per step (only the best is kept)
    pub shape_count: usize,
    /// consecutive non-improving mutations before a candidate's search stops
    pub max_shape_mutations: u32,
    /// base seed for the model's generators
    pub seed: u64,
    /// worker threads for the candidate fan-out (None = rayon's global pool)
    pub max_threads: Option<usize>,
}

impl Default for StepSettings {
    fn default() -> Self {
        Self {
            shape_types: vec![ShapeType::Rectangle, ShapeType::RotatedRectangle, ShapeType::Ellipse],
            alpha: 128,
            shape_count: 50,
            max_shape_mutations: 100,
            seed: 0,
            max_threads: None,
        }
    }
}

impl StepSettings {
    /// reject settings that can never produce a shape
    pub fn validate(&self) -> Result<()> {
        if self.shape_types.is_empty() {
            return Err(GeometrizeError::InvalidSettings("shape_types must not be empty".into()));
        }
        if self.shape_count == 0 {
            return Err(GeometrizeError::InvalidSettings("shape_count must be at least 1".into()));
        }
        if self.max_threads == Some(0) {
            return Err(GeometrizeError::InvalidSettings("max_threads must be at least 1".into()));
        }
        Ok(())
    }

    /// save settings to a JSON file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// load and validate settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        let settings: Self = serde_json::from_str(&json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// load settings, or return defaults if the file is missing or unusable
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match Self::load(path) {
            Ok(settings) => settings,
            Err(GeometrizeError::Io(err)) if err.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "no settings file, using defaults");
                Self::default()
            }
            Err(err) => {
                tracing::warn!(%err, path = %path.display(), "failed to load settings, using defaults");
                Self::default()
            }
        }
    }
}
