//! Animation playback transitions.
//!
//! [`AnimationPlayer::update`](crate::components::animation::AnimationPlayer::update)
//! returns an [`AnimationStep`] describing what happened during that call,
//! instead of leaving per-frame flags around to be read and cleared.

use smallvec::SmallVec;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnimationStep {
    /// Frame indices entered during the update, in order.
    pub entered: SmallVec<[usize; 4]>,
    /// True only on the update in which a non-looping animation finished.
    pub finished: bool,
}

impl AnimationStep {
    /// Nothing changed.
    pub fn is_idle(&self) -> bool {
        self.entered.is_empty() && !self.finished
    }

    /// Number of times playback wrapped back to frame 0.
    pub fn wraps(&self) -> usize {
        self.entered.iter().filter(|f| **f == 0).count()
    }
}
