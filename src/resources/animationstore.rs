//! Animation definitions and the store that shares them.
//!
//! An [`AnimationDefinition`] is immutable once built: frame geometry, per
//! frame durations in authoring units (milliseconds), loop flag and the key
//! of the sprite sheet it reads from. Definitions are produced by an outer
//! asset pipeline and shared between sprites through `Arc`, so a player can
//! tell "same animation" by pointer identity.
//!
//! The record format mirrors the asset files:
//!
//! ```json
//! {
//!   "name": "bat_fly",
//!   "sheetKey": "bat",
//!   "loop": true,
//!   "frameWidth": 16,
//!   "frameHeight": 16,
//!   "frameCount": 3,
//!   "frameSpeeds": [100, 100, 150],
//!   "imagePoints": []
//! }
//! ```

use std::sync::Arc;

use log::{debug, warn};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};

/// Authoring units per second for `frameSpeeds` (milliseconds).
pub const AUTHORING_UNITS_PER_SECOND: f32 = 1000.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnimationDefinition {
    pub name: String,
    pub sheet_key: Arc<str>,
    #[serde(rename = "loop")]
    pub looped: bool,
    pub frame_width: u32,
    pub frame_height: u32,
    pub frame_count: usize,
    /// Duration of each frame in authoring units.
    pub frame_speeds: Vec<u32>,
    /// Auxiliary anchors; carried for callers, unused by playback.
    #[serde(default)]
    pub image_points: Vec<i32>,
    /// Pixel width of the sheet. Frame strips longer than this wrap onto
    /// the next row. `None` means a single row.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sheet_width: Option<u32>,
}

impl AnimationDefinition {
    /// Build a definition whose frame count is taken from `frame_speeds`.
    pub fn new(
        name: impl Into<String>,
        sheet_key: impl Into<Arc<str>>,
        looped: bool,
        frame_width: u32,
        frame_height: u32,
        frame_speeds: Vec<u32>,
    ) -> Result<Self> {
        let def = Self {
            name: name.into(),
            sheet_key: sheet_key.into(),
            looped,
            frame_width,
            frame_height,
            frame_count: frame_speeds.len(),
            frame_speeds,
            image_points: Vec::new(),
            sheet_width: None,
        };
        def.validate()?;
        Ok(def)
    }

    pub fn with_image_points(mut self, points: Vec<i32>) -> Self {
        self.image_points = points;
        self
    }

    pub fn with_sheet_width(mut self, width: u32) -> Self {
        self.sheet_width = Some(width);
        self
    }

    /// Check the record invariants: at least one frame, and exactly one
    /// duration per frame.
    pub fn validate(&self) -> Result<()> {
        let invalid = |reason: String| CoreError::InvalidAnimation {
            name: self.name.clone(),
            reason,
        };
        if self.frame_count == 0 {
            return Err(invalid("frameCount must be at least 1".into()));
        }
        if self.frame_speeds.len() != self.frame_count {
            return Err(invalid(format!(
                "{} frameSpeeds for {} frames",
                self.frame_speeds.len(),
                self.frame_count
            )));
        }
        Ok(())
    }

    /// Duration of `frame` in seconds.
    pub fn frame_duration(&self, frame: usize) -> Result<f32> {
        self.frame_speeds
            .get(frame)
            .map(|units| *units as f32 / AUTHORING_UNITS_PER_SECOND)
            .ok_or(CoreError::IndexOutOfRange {
                index: frame,
                len: self.frame_speeds.len(),
            })
    }

    /// Total duration of one pass in seconds.
    pub fn total_duration(&self) -> f32 {
        self.frame_speeds.iter().map(|u| *u as f32).sum::<f32>() / AUTHORING_UNITS_PER_SECOND
    }

    pub fn last_frame(&self) -> usize {
        self.frame_count.saturating_sub(1)
    }

    pub fn image_point(&self, index: usize) -> Option<i32> {
        self.image_points.get(index).copied()
    }
}

/// Central registry of reusable animation definitions keyed by name.
#[derive(Debug, Default, Clone)]
pub struct AnimationStore {
    animations: FxHashMap<String, Arc<AnimationDefinition>>,
}

impl AnimationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from validated definitions. Duplicate names are
    /// rejected.
    pub fn from_definitions(defs: impl IntoIterator<Item = AnimationDefinition>) -> Result<Self> {
        let mut store = Self::new();
        for def in defs {
            def.validate()?;
            if store.contains(&def.name) {
                return Err(CoreError::InvalidAnimation {
                    name: def.name,
                    reason: "duplicate name".into(),
                });
            }
            store.insert(def);
        }
        Ok(store)
    }

    /// Parse a JSON array of animation records.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let defs: Vec<AnimationDefinition> =
            serde_json::from_str(json).map_err(|e| CoreError::InvalidAnimation {
                name: "<json>".into(),
                reason: e.to_string(),
            })?;
        let store = Self::from_definitions(defs)?;
        debug!("loaded {} animations", store.len());
        Ok(store)
    }

    /// Insert a definition, replacing any previous one with the same name.
    pub fn insert(&mut self, def: AnimationDefinition) -> Arc<AnimationDefinition> {
        let def = Arc::new(def);
        if self
            .animations
            .insert(def.name.clone(), def.clone())
            .is_some()
        {
            warn!("animation '{}' replaced", def.name);
        }
        def
    }

    pub fn get(&self, name: &str) -> Result<Arc<AnimationDefinition>> {
        self.animations
            .get(name)
            .cloned()
            .ok_or_else(|| CoreError::key_not_found(name))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.animations.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.animations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.animations.is_empty()
    }
}
