//! Timer system.
//!
//! Advances every level-owned timer in registration order and collects a
//! [`TimerEvent`] for each one that finished this frame.

use log::trace;

use crate::components::timer::{Timer, TimerId};
use crate::events::timer::TimerEvent;

pub fn update_timers(timers: &mut [Timer], dt: f32) -> Vec<TimerEvent> {
    let mut events = Vec::new();
    for (index, timer) in timers.iter_mut().enumerate() {
        if timer.update(dt) {
            trace!("timer {} finished after {}s", index, timer.length());
            events.push(TimerEvent {
                timer: TimerId(index),
                length: timer.length(),
            });
        }
    }
    events
}
