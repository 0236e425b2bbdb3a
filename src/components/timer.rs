//! Elapsed-time timer.
//!
//! A [`Timer`] counts seconds up to a fixed length. It is used directly by
//! gameplay code and owned in bulk by a [`Level`](crate::level::Level), which
//! updates its timers before any object each frame.
//!
//! # Finishing
//!
//! When progress reaches the length the timer clamps, stops running and
//! reports [`is_finished`](Timer::is_finished) for that single update. The
//! flag is cleared at the start of every update, so it is never sticky; a
//! stopped timer does not fire again until restarted.

/// Handle to a timer owned by a level.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TimerId(pub usize);

#[derive(Clone, Debug, PartialEq)]
pub struct Timer {
    progress: f32,
    length: f32,
    running: bool,
    finished: bool,
}

impl Timer {
    /// Create a timer of `length` seconds, optionally already running.
    pub fn new(length: f32, start: bool) -> Self {
        Timer {
            progress: 0.0,
            length: length.max(0.0),
            running: start,
            finished: false,
        }
    }

    /// Advance by `dt` seconds. Returns `true` only on the update in which
    /// progress crosses the length.
    pub fn update(&mut self, dt: f32) -> bool {
        self.finished = false;
        if self.running {
            self.progress += dt;
            if self.progress >= self.length {
                self.progress = self.length;
                self.finished = true;
                self.running = false;
            }
        }
        self.finished
    }

    pub fn start(&mut self) {
        self.running = true;
    }

    pub fn stop(&mut self) {
        self.running = false;
    }

    /// Zero progress and clear the finished flag, whatever the prior state.
    pub fn restart(&mut self, start: bool) {
        self.progress = 0.0;
        self.running = start;
        self.finished = false;
    }

    /// Seconds elapsed, `0 <= progress <= length`.
    pub fn progress(&self) -> f32 {
        self.progress
    }

    /// Progress in `[0, 1]`. A zero-length timer reads as complete.
    pub fn normalized_progress(&self) -> f32 {
        if self.length > 0.0 {
            self.progress / self.length
        } else {
            1.0
        }
    }

    pub fn length(&self) -> f32 {
        self.length
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// True only during the update in which the timer finished.
    pub fn is_finished(&self) -> bool {
        self.finished
    }
}
