//! Settings file.

use cube_physics::config::{
    PhysicsConfig,
    InteractionConfig,
};
use std::{
    path::Path,
    fs::File,
    io::{
        BufReader,
        BufWriter,
    },
};
use serde::{Serialize, Deserialize};
use anyhow::*;


pub const SETTINGS_FILE_NAME: &'static str = "settings.json";


/// Game settings. Every field falls back to its default if missing from the file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub physics: PhysicsConfig,
    pub interaction: InteractionConfig,
    /// Number of cubes scattered around the field at startup.
    pub initial_cubes: usize,
    /// Minimum corner of the region startup cubes are scattered in.
    pub scatter_min: [f32; 3],
    /// Maximum corner of the region startup cubes are scattered in.
    pub scatter_max: [f32; 3],
    /// Seed for all randomness. Random if absent.
    pub seed: Option<u64>,
    /// Height of the viewer's eyes above the floor.
    pub eye_height: f32,
    /// Scripted input for headless runs.
    pub demo: DemoSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            physics: PhysicsConfig::default(),
            interaction: InteractionConfig::default(),
            initial_cubes: 50,
            scatter_min: [-80.0, 1.0, -80.0],
            scatter_max: [80.0, 21.0, 80.0],
            seed: None,
            eye_height: 2.0,
            demo: DemoSettings::default(),
        }
    }
}

/// Knobs for the scripted input of headless runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DemoSettings {
    /// Frames between spawn-and-throws. Never if 0.
    pub throw_every: u64,
    /// Frames between pick-up-or-release toggles. Never if 0.
    pub grab_every: u64,
    /// Yaw turned per frame, radians.
    pub turn_per_frame: f32,
    /// Frames between toggling walking forward. Never walks if 0.
    pub walk_every: u64,
}

impl Default for DemoSettings {
    fn default() -> Self {
        DemoSettings {
            throw_every: 30,
            grab_every: 90,
            turn_per_frame: 0.01,
            walk_every: 120,
        }
    }
}

impl Settings {
    /// Read from `path`, or fall back to defaults if that fails.
    pub fn read(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        Self::try_read(path)
            .map_err(|e| warn!(%e, ?path, "unable to read settings, using defaults"))
            .unwrap_or_default()
    }

    pub fn try_read(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)
            .with_context(|| format!("opening {}", path.display()))?;
        Ok(serde_json::from_reader(BufReader::new(file))?)
    }

    pub fn write(&self, path: impl AsRef<Path>) -> Result<()> {
        serde_json::to_writer_pretty(BufWriter::new(File::create(path)?), self)?;
        Ok(())
    }
}


#[test]
fn test_partial_settings_fill_defaults() {
    let settings: Settings = serde_json::from_str(r#"{
        "initial_cubes": 3,
        "physics": { "restitution": 0.5 }
    }"#).unwrap();
    assert_eq!(settings.initial_cubes, 3);
    assert_eq!(settings.physics.restitution, 0.5);
    assert_eq!(settings.physics.gravity, -9.8);
    assert_eq!(settings.interaction, InteractionConfig::default());
    assert_eq!(settings.demo, DemoSettings::default());
}

#[test]
fn test_settings_json_round_trip() {
    let mut settings = Settings::default();
    settings.seed = Some(7);
    let json = serde_json::to_string(&settings).unwrap();
    assert_eq!(serde_json::from_str::<Settings>(&json).unwrap(), settings);
}
