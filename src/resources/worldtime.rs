//! Frame timing.
//!
//! [`TimeSource`] is the only view the core has of wall-clock time: one
//! delta per frame, in seconds. [`WorldTime`] is the process-wide clock
//! driver fed by the host loop; [`FixedTimeSource`] is a constant delta for
//! tests and headless runs.

/// Global state key under which the clock publishes the frame delta.
pub const DELTA_TIME_KEY: &str = "DT";

pub trait TimeSource {
    /// Elapsed seconds for the current frame. Non-negative and finite.
    fn delta_time(&self) -> f32;
}

#[derive(Clone, Copy, Debug)]
pub struct WorldTime {
    pub elapsed: f32,
    pub delta: f32,
    pub time_scale: f32,
    pub frame_count: u64,
    /// Upper bound for a single raw delta, so a stalled frame does not
    /// teleport the simulation.
    pub max_delta: f32,
}

impl Default for WorldTime {
    fn default() -> Self {
        WorldTime {
            elapsed: 0.0,
            delta: 0.0,
            time_scale: 1.0,
            frame_count: 0,
            max_delta: 0.25,
        }
    }
}

impl TimeSource for WorldTime {
    fn delta_time(&self) -> f32 {
        self.delta
    }
}

/// Constant delta.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FixedTimeSource(pub f32);

impl TimeSource for FixedTimeSource {
    fn delta_time(&self) -> f32 {
        self.0
    }
}
