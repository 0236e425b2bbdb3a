//! Level driver.
//!
//! A [`Level`] owns a set of game objects (through its
//! [`ObjectRegistry`]), a set of [`Timer`]s and a level-scoped
//! [`ValueStore`], and steps them as a unit.
//!
//! # Frame flow
//!
//! [`Level::update`]:
//!
//! 1. Update every timer in registration order, collecting [`TimerEvent`]s
//! 2. Update every object in registration order. Each object is checked out
//!    of the registry for its own update and gets an [`UpdateContext`] with
//!    read access to every other object
//! 3. Apply queued destroy requests, then sweep: unregister every object
//!    whose destroyed flag is set
//! 4. Register objects spawned during the pass. They render this frame and
//!    update from the next one
//!
//! [`Level::render`] then draws the surviving objects in registration order.

use std::sync::Arc;

use log::{trace, warn};

use crate::components::gameobject::GameObject;
use crate::components::timer::{Timer, TimerId};
use crate::events::timer::TimerEvent;
use crate::resources::objectregistry::{IdGenerator, ObjectId, ObjectRegistry};
use crate::resources::valuestore::ValueStore;
use crate::resources::worldtime::TimeSource;
use crate::systems::render::{RenderRequestEmitter, render_pass};
use crate::systems::sweep::sweep_destroyed;
use crate::systems::timer::update_timers;

/// Structural changes requested during an update pass.
#[derive(Default)]
struct LevelCommands {
    spawns: Vec<(Box<dyn GameObject>, bool)>,
    destroys: Vec<ObjectId>,
}

/// What an object sees of its level while it updates.
pub struct UpdateContext<'a> {
    dt: f32,
    registry: &'a ObjectRegistry,
    timers: &'a mut [Timer],
    timer_events: &'a [TimerEvent],
    level_state: &'a mut ValueStore,
    globals: &'a ValueStore,
    commands: &'a mut LevelCommands,
}

impl<'a> UpdateContext<'a> {
    /// Seconds elapsed this frame.
    pub fn dt(&self) -> f32 {
        self.dt
    }

    /// Every other object of the level. The updating object itself is not
    /// visible here.
    pub fn registry(&self) -> &ObjectRegistry {
        self.registry
    }

    pub fn timer(&self, id: TimerId) -> Option<&Timer> {
        self.timers.get(id.0)
    }

    pub fn timer_mut(&mut self, id: TimerId) -> Option<&mut Timer> {
        self.timers.get_mut(id.0)
    }

    /// Timers that finished this frame.
    pub fn timer_events(&self) -> &[TimerEvent] {
        self.timer_events
    }

    pub fn timer_fired(&self, id: TimerId) -> bool {
        self.timer_events.iter().any(|e| e.timer == id)
    }

    pub fn level_state(&self) -> &ValueStore {
        &*self.level_state
    }

    pub fn level_state_mut(&mut self) -> &mut ValueStore {
        &mut *self.level_state
    }

    pub fn globals(&self) -> &ValueStore {
        self.globals
    }

    /// Queue an object for registration at the end of this pass.
    pub fn spawn<O: GameObject>(&mut self, object: O, deep: bool) {
        self.commands.spawns.push((Box::new(object), deep));
    }

    /// Queue another object for destruction in this pass's sweep.
    pub fn destroy(&mut self, id: ObjectId) {
        self.commands.destroys.push(id);
    }
}

/// Outcome of one [`Level::update`].
#[derive(Debug, Default, Clone)]
pub struct LevelUpdate {
    pub timer_events: Vec<TimerEvent>,
    /// Objects whose update ran.
    pub updated: usize,
    pub swept: Vec<ObjectId>,
    pub spawned: Vec<ObjectId>,
}

pub struct Level {
    name: Arc<str>,
    registry: ObjectRegistry,
    timers: Vec<Timer>,
    state: ValueStore,
    commands: LevelCommands,
}

impl Level {
    pub fn new(name: impl Into<Arc<str>>, ids: IdGenerator) -> Self {
        let name = name.into();
        Self {
            registry: ObjectRegistry::new(name.clone(), ids),
            name,
            timers: Vec::new(),
            state: ValueStore::new(),
            commands: LevelCommands::default(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn register<O: GameObject>(&mut self, object: O, deep: bool) -> ObjectId {
        self.registry.register(object, deep)
    }

    pub fn register_boxed(&mut self, object: Box<dyn GameObject>, deep: bool) -> ObjectId {
        self.registry.register_boxed(object, deep)
    }

    pub fn unregister(&mut self, id: ObjectId) -> Option<Box<dyn GameObject>> {
        self.registry.unregister(id)
    }

    pub fn registry(&self) -> &ObjectRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut ObjectRegistry {
        &mut self.registry
    }

    pub fn add_timer(&mut self, timer: Timer) -> TimerId {
        self.timers.push(timer);
        TimerId(self.timers.len() - 1)
    }

    pub fn timer(&self, id: TimerId) -> Option<&Timer> {
        self.timers.get(id.0)
    }

    pub fn timer_mut(&mut self, id: TimerId) -> Option<&mut Timer> {
        self.timers.get_mut(id.0)
    }

    pub fn timers(&self) -> &[Timer] {
        &self.timers
    }

    pub fn state(&self) -> &ValueStore {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut ValueStore {
        &mut self.state
    }

    /// Run one update pass. See the module docs for the order of phases.
    pub fn update(&mut self, time: &dyn TimeSource, globals: &ValueStore) -> LevelUpdate {
        let dt = time.delta_time();
        let timer_events = update_timers(&mut self.timers, dt);

        let mut updated = 0;
        let order = self.registry.ids().to_vec();
        for id in order {
            let Some(mut object) = self.registry.check_out(id) else {
                continue;
            };
            // Destroyed earlier (outside a pass); it only waits for the sweep.
            if !object.is_destroyed() {
                let mut ctx = UpdateContext {
                    dt,
                    registry: &self.registry,
                    timers: &mut self.timers,
                    timer_events: &timer_events,
                    level_state: &mut self.state,
                    globals,
                    commands: &mut self.commands,
                };
                object.update(&mut ctx);
                updated += 1;
            }
            self.registry.check_in(object);
        }

        for id in std::mem::take(&mut self.commands.destroys) {
            match self.registry.get_mut(id) {
                Some(object) => object.destroy(),
                None => warn!("destroy requested for unknown object {}", id),
            }
        }
        let swept = sweep_destroyed(&mut self.registry);

        let mut spawned = Vec::new();
        for (object, deep) in std::mem::take(&mut self.commands.spawns) {
            spawned.push(self.registry.register_boxed(object, deep));
        }

        trace!(
            "level '{}': {} updated, {} swept, {} spawned, {} timer event(s)",
            self.name,
            updated,
            swept.len(),
            spawned.len(),
            timer_events.len()
        );

        LevelUpdate {
            timer_events,
            updated,
            swept,
            spawned,
        }
    }

    pub fn render(&self, out: &mut dyn RenderRequestEmitter) {
        render_pass(&self.registry, out);
    }
}

impl std::fmt::Debug for Level {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Level")
            .field("name", &self.name)
            .field("registry", &self.registry)
            .field("timers", &self.timers.len())
            .finish()
    }
}
