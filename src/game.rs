//! Process-level driver.
//!
//! [`Game`] owns what outlives a single level: the global [`ValueStore`],
//! the [`IdGenerator`] every level draws from, the [`WorldTime`] clock and
//! the table of registered levels. One level at a time is current; the host
//! loop calls [`Game::tick`] then [`Game::render`] once per frame.

use log::{info, warn};
use rustc_hash::FxHashMap;

use crate::error::{CoreError, Result};
use crate::level::{Level, LevelUpdate};
use crate::resources::gameconfig::GameConfig;
use crate::resources::objectregistry::IdGenerator;
use crate::resources::valuestore::ValueStore;
use crate::resources::worldtime::WorldTime;
use crate::systems::render::RenderRequestEmitter;
use crate::systems::time::{publish_delta_time, update_world_time};

#[derive(Debug, Default)]
pub struct Game {
    config: GameConfig,
    globals: ValueStore,
    ids: IdGenerator,
    time: WorldTime,
    levels: FxHashMap<String, Level>,
    current: Option<String>,
}

impl Game {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a game whose clock follows the `[time]` settings of `config`.
    pub fn with_config(config: GameConfig) -> Self {
        let time = WorldTime {
            time_scale: config.time_scale,
            max_delta: config.max_delta,
            ..WorldTime::default()
        };
        Self {
            config,
            time,
            ..Self::default()
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// A fresh, unregistered level drawing ids from this game's generator.
    pub fn create_level(&self, key: &str) -> Level {
        Level::new(key, self.ids.clone())
    }

    /// Add a level under its own name. A level already registered under that
    /// name is replaced and returned.
    pub fn register_level(&mut self, level: Level) -> Option<Level> {
        let key = level.name().to_string();
        let previous = self.levels.insert(key.clone(), level);
        if previous.is_some() {
            warn!("level '{}' registered twice, replacing", key);
        }
        previous
    }

    /// Make `key` the current level.
    pub fn set_level(&mut self, key: &str) -> Result<()> {
        if !self.levels.contains_key(key) {
            return Err(CoreError::key_not_found(key));
        }
        info!("switching to level '{}'", key);
        self.current = Some(key.to_string());
        Ok(())
    }

    pub fn current_level_key(&self) -> Option<&str> {
        self.current.as_deref()
    }

    pub fn current_level(&self) -> Option<&Level> {
        self.current.as_ref().and_then(|k| self.levels.get(k))
    }

    pub fn current_level_mut(&mut self) -> Option<&mut Level> {
        self.current.as_ref().and_then(|k| self.levels.get_mut(k))
    }

    pub fn level(&self, key: &str) -> Option<&Level> {
        self.levels.get(key)
    }

    pub fn level_mut(&mut self, key: &str) -> Option<&mut Level> {
        self.levels.get_mut(key)
    }

    pub fn globals(&self) -> &ValueStore {
        &self.globals
    }

    pub fn globals_mut(&mut self) -> &mut ValueStore {
        &mut self.globals
    }

    pub fn time(&self) -> &WorldTime {
        &self.time
    }

    pub fn ids(&self) -> &IdGenerator {
        &self.ids
    }

    /// Advance the clock by the raw frame delta, publish it, then update the
    /// current level. Returns `None` when no level is current.
    pub fn tick(&mut self, raw_dt: f32) -> Option<LevelUpdate> {
        update_world_time(&mut self.time, raw_dt);
        publish_delta_time(&self.time, &mut self.globals);

        let key = self.current.as_ref()?;
        let level = self.levels.get_mut(key)?;
        Some(level.update(&self.time, &self.globals))
    }

    /// Render the current level, if any.
    pub fn render(&self, out: &mut dyn RenderRequestEmitter) {
        if let Some(level) = self.current_level() {
            level.render(out);
        }
    }
}
