//! Game configuration resource.
//!
//! Settings loaded from an INI configuration file. Defaults are safe to run
//! with; any key missing from the file keeps its default.
//!
//! # Configuration File Format
//!
//! ```ini
//! [time]
//! time_scale = 1.0
//! max_delta = 0.25
//!
//! [shadow]
//! depth = 0.0
//! opacity = 0.2
//!
//! [demo]
//! frames = 120
//! fixed_delta = 0.016
//! ```

use configparser::ini::Ini;
use log::info;
use std::path::PathBuf;

use crate::components::sprite::ShadowSettings;
use crate::error::{CoreError, Result};

/// Default safe values for startup
const DEFAULT_TIME_SCALE: f32 = 1.0;
const DEFAULT_MAX_DELTA: f32 = 0.25;
const DEFAULT_SHADOW_DEPTH: f32 = 0.0;
const DEFAULT_SHADOW_OPACITY: f32 = 0.2;
const DEFAULT_DEMO_FRAMES: u32 = 120;
const DEFAULT_DEMO_FIXED_DELTA: f32 = 1.0 / 60.0;
const DEFAULT_CONFIG_PATH: &str = "./config.ini";

#[derive(Debug, Clone, PartialEq)]
pub struct GameConfig {
    /// Multiplier applied to every raw frame delta.
    pub time_scale: f32,
    /// Largest raw delta accepted per frame, in seconds.
    pub max_delta: f32,
    /// Depth used for drop-shadow quads.
    pub shadow_depth: f32,
    /// Opacity of each drop-shadow row.
    pub shadow_opacity: f32,
    /// Frames the headless demo runs for.
    pub demo_frames: u32,
    /// Delta fed to the demo clock each frame.
    pub demo_fixed_delta: f32,
    /// Path to the configuration file.
    pub config_path: PathBuf,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl GameConfig {
    /// Create a new configuration with safe default values.
    pub fn new() -> Self {
        Self {
            time_scale: DEFAULT_TIME_SCALE,
            max_delta: DEFAULT_MAX_DELTA,
            shadow_depth: DEFAULT_SHADOW_DEPTH,
            shadow_opacity: DEFAULT_SHADOW_OPACITY,
            demo_frames: DEFAULT_DEMO_FRAMES,
            demo_fixed_delta: DEFAULT_DEMO_FIXED_DELTA,
            config_path: PathBuf::from(DEFAULT_CONFIG_PATH),
        }
    }

    /// Create a new configuration with a custom config file path.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: path.into(),
            ..Self::new()
        }
    }

    /// Load configuration from the INI file at `config_path`.
    pub fn load_from_file(&mut self) -> Result<()> {
        let mut config = Ini::new();
        config
            .load(&self.config_path)
            .map_err(|e| CoreError::Config(format!("failed to load config file: {}", e)))?;
        self.apply(&config)?;
        info!(
            "Loaded config from {:?}: time_scale={}, max_delta={}, shadow depth={} opacity={}",
            self.config_path, self.time_scale, self.max_delta, self.shadow_depth, self.shadow_opacity
        );
        Ok(())
    }

    /// Load configuration from INI text.
    pub fn load_from_str(&mut self, text: &str) -> Result<()> {
        let mut config = Ini::new();
        config
            .read(text.to_string())
            .map_err(|e| CoreError::Config(format!("failed to parse config: {}", e)))?;
        self.apply(&config)
    }

    /// All keys are parsed before any is stored; on error `self` is unchanged.
    fn apply(&mut self, config: &Ini) -> Result<()> {
        let mut next = self.clone();
        let float = |section: &str, key: &str| -> Result<Option<f32>> {
            config
                .getfloat(section, key)
                .map(|v| v.map(|f| f as f32))
                .map_err(|e| CoreError::Config(format!("[{}] {}: {}", section, key, e)))
        };

        // [time] section
        if let Some(scale) = float("time", "time_scale")? {
            next.time_scale = scale.max(0.0);
        }
        if let Some(max) = float("time", "max_delta")? {
            next.max_delta = max.max(0.0);
        }

        // [shadow] section
        if let Some(depth) = float("shadow", "depth")? {
            next.shadow_depth = depth;
        }
        if let Some(opacity) = float("shadow", "opacity")? {
            next.shadow_opacity = opacity.clamp(0.0, 1.0);
        }

        // [demo] section
        if let Some(frames) = config
            .getuint("demo", "frames")
            .map_err(|e| CoreError::Config(format!("[demo] frames: {}", e)))?
        {
            next.demo_frames = frames.min(u32::MAX as u64) as u32;
        }
        if let Some(dt) = float("demo", "fixed_delta")? {
            next.demo_fixed_delta = dt.max(0.0);
        }
        *self = next;
        Ok(())
    }

    /// Save configuration to the INI file. Creates the file if needed.
    pub fn save_to_file(&self) -> Result<()> {
        let mut config = Ini::new();

        config.set("time", "time_scale", Some(self.time_scale.to_string()));
        config.set("time", "max_delta", Some(self.max_delta.to_string()));
        config.set("shadow", "depth", Some(self.shadow_depth.to_string()));
        config.set("shadow", "opacity", Some(self.shadow_opacity.to_string()));
        config.set("demo", "frames", Some(self.demo_frames.to_string()));
        config.set("demo", "fixed_delta", Some(self.demo_fixed_delta.to_string()));

        config
            .write(&self.config_path)
            .map_err(|e| CoreError::Config(format!("failed to save config file: {}", e)))?;

        info!("Saved config to {:?}", self.config_path);
        Ok(())
    }

    /// Shadow settings for sprites created under this configuration.
    /// Shadows stay disabled until a sprite opts in.
    pub fn shadow_settings(&self) -> ShadowSettings {
        ShadowSettings {
            enabled: false,
            depth: self.shadow_depth,
            opacity: self.shadow_opacity,
        }
    }
}
