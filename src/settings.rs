//! Physics and interaction settings
//!
//! Stored as JSON. Any field missing from the file keeps its default, so
//! old or hand-written files stay loadable.

use std::fs;
use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Tunable knobs for a world and the driver that feeds it input
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Physics ===
    /// Velocity multiplier applied every tick
    pub friction: f32,
    /// vy increment per unit of dt
    pub gravity: f32,
    /// Radius of newly added balls
    pub ball_radius: f32,

    // === Screen ===
    pub screen_width: f32,
    pub screen_height: f32,

    // === Interaction ===
    /// Reach of the suck gesture
    pub suck_radius: f32,
    /// Launch speed of spat balls
    pub spit_speed: f32,
    /// Reach of a click/pick
    pub pick_radius: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            friction: DEFAULT_FRICTION,
            gravity: DEFAULT_GRAVITY,
            ball_radius: BALL_RADIUS,

            screen_width: DEFAULT_SCREEN_WIDTH,
            screen_height: DEFAULT_SCREEN_HEIGHT,

            suck_radius: SUCK_RADIUS,
            spit_speed: SPIT_SPEED,
            pick_radius: PICK_RADIUS,
        }
    }
}

impl Settings {
    pub fn from_json(json: &str) -> anyhow::Result<Self> {
        let settings: Self = serde_json::from_str(json).context("Invalid settings JSON")?;
        settings.validate()?;
        Ok(settings)
    }

    /// Reject values no world can be built from
    pub fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(
            self.ball_radius > 0.0,
            "ball_radius must be positive, got {}",
            self.ball_radius
        );
        anyhow::ensure!(
            self.screen_width > 0.0 && self.screen_height > 0.0,
            "screen size must be positive, got {}x{}",
            self.screen_width,
            self.screen_height
        );
        Ok(())
    }

    pub fn to_json(&self) -> anyhow::Result<String> {
        serde_json::to_string_pretty(self).context("Failed to serialize settings")
    }

    /// Load settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings from {}", path.display()))?;
        let settings = Self::from_json(&json)
            .with_context(|| format!("Failed to parse settings in {}", path.display()))?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Save settings to a JSON file
    pub fn save(&self, path: impl AsRef<Path>) -> anyhow::Result<()> {
        let path = path.as_ref();
        fs::write(path, self.to_json()?)
            .with_context(|| format!("Failed to write settings to {}", path.display()))?;
        log::info!("Settings saved to {}", path.display());
        Ok(())
    }
}
