//! Timer expiration events.
//!
//! When a level-owned [`Timer`](crate::components::timer::Timer) crosses its
//! length, [`update_timers`](crate::systems::timer::update_timers) emits one
//! [`TimerEvent`]. Objects see the frame's events through
//! [`UpdateContext::timer_events`](crate::level::UpdateContext::timer_events).
//!
//! # Related
//!
//! - [`crate::components::timer::Timer`] – the timer itself
//! - [`crate::systems::timer::update_timers`] – the system that emits these events

use crate::components::timer::TimerId;

/// Event emitted once when a timer finishes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimerEvent {
    /// The timer that finished.
    pub timer: TimerId,
    /// Its length in seconds.
    pub length: f32,
}
