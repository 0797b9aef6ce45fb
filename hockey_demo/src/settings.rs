use std::path::{Path, PathBuf};

use anyhow::Context;
use hockey_core::{Config, Params};
use serde::{Deserialize, Serialize};

/// Runner settings, read from a JSON file. Missing fields take defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Frames to simulate
    pub frames: u32,
    /// Seconds per frame
    pub dt: f32,
    pub seed: u64,
    /// Scene to load instead of the default table
    pub scene_path: Option<PathBuf>,
    /// Where to write the scene as spawned
    pub export_scene_path: Option<PathBuf>,
    /// Where to append snapshot frames
    pub recording_path: Option<PathBuf>,
    pub autopilot: bool,
    /// Aim noise for the scripted players, in table units
    pub autopilot_jitter: f32,
    pub game: Config,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            frames: 3600,
            dt: Params::FIXED_DT,
            seed: 12345,
            scene_path: None,
            export_scene_path: None,
            recording_path: None,
            autopilot: true,
            autopilot_jitter: 0.5,
            game: Config::default(),
        }
    }
}

impl Settings {
    pub fn from_json(json: &str) -> anyhow::Result<Self> {
        let settings: Self = serde_json::from_str(json).context("invalid settings json")?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read settings from {}", path.display()))?;
        Self::from_json(&json).with_context(|| format!("in {}", path.display()))
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(
            self.dt.is_finite() && self.dt > 0.0,
            "dt must be positive, got {}",
            self.dt
        );
        anyhow::ensure!(self.game.win_score > 0, "win_score must be at least 1");
        Ok(())
    }
}
