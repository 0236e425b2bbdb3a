//! Placement data shared by every drawable object.
//!
//! [`SpriteState`] holds where and how a sprite is drawn; the sheet and source
//! region come from whatever drives it (an [`AnimationPlayer`] for animated
//! sprites). [`AnimatedSprite`] bundles both, plus the optional drop shadow,
//! for objects that want the stock animated-sprite behaviour.

use smallvec::SmallVec;

use crate::components::animation::AnimationPlayer;
use crate::components::geometry::{OriginKey, Vec2};
use crate::components::tint::Color;
use crate::events::animation::AnimationStep;
use crate::systems::render::RenderRequestEmitter;

#[derive(Debug, Clone, PartialEq)]
pub struct SpriteState {
    pub position: Vec2,
    pub scale: Vec2,
    pub color: Color,
    /// Draw depth passed through to the renderer.
    pub depth: f32,
    /// Pivot keys resolved against the source rectangle at draw time.
    pub origin: SmallVec<[OriginKey; 2]>,
}

impl Default for SpriteState {
    fn default() -> Self {
        Self {
            position: Vec2::ZERO,
            scale: Vec2::ONE,
            color: Color::WHITE,
            depth: 0.0,
            origin: SmallVec::new(),
        }
    }
}

impl SpriteState {
    pub fn at(x: f32, y: f32) -> Self {
        Self {
            position: Vec2::new(x, y),
            ..Self::default()
        }
    }

    pub fn with_origin(mut self, keys: &[OriginKey]) -> Self {
        self.origin = SmallVec::from_slice(keys);
        self
    }

    pub fn with_depth(mut self, depth: f32) -> Self {
        self.depth = depth;
        self
    }
}

/// Soft trailing silhouette drawn behind a sprite.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShadowSettings {
    pub enabled: bool,
    pub depth: f32,
    pub opacity: f32,
}

impl Default for ShadowSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            depth: 0.0,
            opacity: 0.2,
        }
    }
}

impl ShadowSettings {
    pub fn enabled(depth: f32, opacity: f32) -> Self {
        Self {
            enabled: true,
            depth,
            opacity,
        }
    }
}

/// Sprite placement driven by an animation player.
#[derive(Debug, Clone, Default)]
pub struct AnimatedSprite {
    pub sprite: SpriteState,
    pub player: AnimationPlayer,
    pub shadow: ShadowSettings,
}

impl AnimatedSprite {
    pub fn new(sprite: SpriteState) -> Self {
        Self {
            sprite,
            ..Self::default()
        }
    }

    pub fn update(&mut self, dt: f32) -> AnimationStep {
        self.player.update(dt)
    }

    pub fn render(&self, out: &mut dyn RenderRequestEmitter) {
        self.player.render(&self.sprite, &self.shadow, out);
    }
}
