//! levelcore library.
//!
//! Per-frame lifecycle for game objects: a [`level::Level`] owns an
//! [`resources::objectregistry::ObjectRegistry`] indexed by object kind and
//! its ancestors, steps every object once per frame, sweeps the destroyed
//! ones and renders the rest through a
//! [`systems::render::RenderRequestEmitter`]. Sprite animation playback,
//! countdown timers and keyed state stores round out the core.

pub mod components;
pub mod error;
pub mod events;
pub mod game;
pub mod level;
pub mod math;
pub mod resources;
pub mod systems;

pub use error::{CoreError, Result};
