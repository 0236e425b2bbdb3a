//! Object kinds used by the headless demo.
//!
//! A [`Spawner`] releases a [`Bat`] every time its level timer fires. Bats
//! are deep-registered, so they are also found under the `Enemy` tag. Each
//! bat flies for a while, switches to its death animation, and destroys
//! itself once that animation finishes.

use std::sync::Arc;

use log::{debug, warn};

use levelcore::components::gameobject::{
    ANIMATED_SPRITE_OBJECT, GAME_OBJECT, GameObject, ObjectHeader, ObjectKind, TypeInfo,
};
use levelcore::components::geometry::{OriginKey, Vec2};
use levelcore::components::sprite::{AnimatedSprite, ShadowSettings, SpriteState};
use levelcore::components::timer::TimerId;
use levelcore::level::UpdateContext;
use levelcore::math::{clamp, lerp, qerp};
use levelcore::resources::animationstore::{AnimationDefinition, AnimationStore};
use levelcore::systems::render::RenderRequestEmitter;

/// Global state key of the shared animation store.
pub const ANIMATIONS_KEY: &str = "animations";
/// Level state key holding the live enemy count.
pub const ENEMY_COUNT_KEY: &str = "enemies";

pub const ARENA_WIDTH: f32 = 320.0;
pub const ARENA_HEIGHT: f32 = 180.0;

pub static ENEMY: TypeInfo = TypeInfo::derived("Enemy", &ANIMATED_SPRITE_OBJECT);
pub static BAT: TypeInfo = TypeInfo::derived("Bat", &ENEMY);
pub static SPAWNER: TypeInfo = TypeInfo::derived("Spawner", &GAME_OBJECT);

/// Animations used when no `--animations` file is given.
pub fn default_animations() -> levelcore::Result<AnimationStore> {
    AnimationStore::from_definitions([
        AnimationDefinition::new("bat_fly", "bats", true, 16, 16, vec![80, 80, 80, 80])?
            .with_sheet_width(64),
        AnimationDefinition::new("bat_die", "bats", false, 16, 16, vec![60, 60, 60, 120])?
            .with_sheet_width(64)
            .with_image_points(vec![8, 8]),
    ])
}

pub struct Bat {
    header: ObjectHeader,
    body: AnimatedSprite,
    home: Vec2,
    drift: f32,
    age: f32,
    lifetime: f32,
    dying: bool,
}

impl ObjectKind for Bat {
    const TYPE: &'static TypeInfo = &BAT;
}

impl Bat {
    pub fn new(fly: Arc<AnimationDefinition>, position: Vec2, shadow: ShadowSettings) -> Self {
        let mut body = AnimatedSprite::new(
            SpriteState::at(position.x, position.y)
                .with_origin(&[OriginKey::Center])
                .with_depth(0.5),
        );
        body.shadow = shadow;
        body.player.bind(fly, true);
        let drift = if fastrand::bool() { 24.0 } else { -24.0 };
        body.player.set_mirrored(drift < 0.0);
        Self {
            header: ObjectHeader::new(),
            body,
            home: position,
            drift,
            age: 0.0,
            lifetime: lerp(1.0, 3.0, fastrand::f32()),
            dying: false,
        }
    }

    fn start_dying(&mut self, ctx: &UpdateContext<'_>) {
        self.dying = true;
        let die = ctx
            .globals()
            .get::<Arc<AnimationStore>>(ANIMATIONS_KEY)
            .and_then(|store| store.get("bat_die"));
        match die {
            Ok(def) => self.body.player.bind(def, true),
            Err(e) => {
                warn!("bat {:?} has no death animation ({}), removing", self.id(), e);
                self.destroy();
            }
        }
    }
}

impl GameObject for Bat {
    fn header(&self) -> &ObjectHeader {
        &self.header
    }

    fn header_mut(&mut self) -> &mut ObjectHeader {
        &mut self.header
    }

    fn update(&mut self, ctx: &mut UpdateContext<'_>) {
        let dt = ctx.dt();
        self.age += dt;

        if !self.dying {
            let x = self.body.sprite.position.x + self.drift * dt;
            self.body.sprite.position.x = clamp(0.0, ARENA_WIDTH, x);
            // One bob per second.
            let phase = self.age.fract();
            self.body.sprite.position.y = self.home.y + qerp(0.0, -12.0, 0.0, phase);
            if self.age >= self.lifetime {
                self.start_dying(ctx);
            }
        }

        let step = self.body.update(dt);
        if self.dying && step.finished {
            self.destroy();
        }
    }

    fn render(&self, out: &mut dyn RenderRequestEmitter) {
        self.body.render(out);
    }
}

pub struct Spawner {
    header: ObjectHeader,
    timer: TimerId,
    shadow: ShadowSettings,
    spawned: u32,
    limit: u32,
}

impl ObjectKind for Spawner {
    const TYPE: &'static TypeInfo = &SPAWNER;
}

impl Spawner {
    pub fn new(timer: TimerId, shadow: ShadowSettings, limit: u32) -> Self {
        Self {
            header: ObjectHeader::new(),
            timer,
            shadow,
            spawned: 0,
            limit,
        }
    }

    pub fn spawned(&self) -> u32 {
        self.spawned
    }
}

impl GameObject for Spawner {
    fn header(&self) -> &ObjectHeader {
        &self.header
    }

    fn header_mut(&mut self) -> &mut ObjectHeader {
        &mut self.header
    }

    fn update(&mut self, ctx: &mut UpdateContext<'_>) {
        let enemies = ctx.registry().count_by_tag(ENEMY.tag);
        ctx.level_state_mut().set(ENEMY_COUNT_KEY, enemies);

        if !ctx.timer_fired(self.timer) || self.spawned >= self.limit {
            return;
        }

        let fly = ctx
            .globals()
            .get::<Arc<AnimationStore>>(ANIMATIONS_KEY)
            .and_then(|store| store.get("bat_fly"));
        let fly = match fly {
            Ok(def) => def,
            Err(e) => {
                warn!("spawner cannot release bats: {}", e);
                return;
            }
        };

        let position = Vec2::new(
            fastrand::f32() * ARENA_WIDTH,
            lerp(16.0, ARENA_HEIGHT - 16.0, fastrand::f32()),
        );
        ctx.spawn(Bat::new(fly, position, self.shadow), true);
        self.spawned += 1;
        debug!("spawner released bat #{} ({} enemies alive)", self.spawned, enemies);

        if let Some(timer) = ctx.timer_mut(self.timer) {
            timer.restart(true);
        }
    }
}
