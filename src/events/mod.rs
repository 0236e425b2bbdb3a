//! Per-update outcomes.
//!
//! Transitions that happen during an update are reported as values returned
//! from the update call rather than flags read back later.
//!
//! Submodules:
//! - [`animation`] – frames entered and the finish transition of one playback step
//! - [`timer`] – emitted once when a timer reaches its length

pub mod animation;
pub mod timer;
