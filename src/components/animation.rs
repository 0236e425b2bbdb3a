//! Frame-driven animation playback.
//!
//! An [`AnimationPlayer`] is embedded in a sprite object and advances the
//! current frame of a bound [`AnimationDefinition`] from elapsed time.
//!
//! # States
//!
//! - `Unbound` – no definition yet; update and render do nothing
//! - `Playing` – frames advance by accumulated time
//! - `Paused` – orthogonal toggle; time is not accumulated
//! - `Finished` – a non-looping animation held on its last frame until a new
//!   definition (or a restart) is bound
//!
//! # Timing
//!
//! Time carries over frame boundaries: when a frame's duration is reached the
//! duration is subtracted, not zeroed, so a fast `speed_scale` or a long
//! delta can cross several frames in one update without losing time.
//! Whole loop cycles beyond the first are dropped before stepping, so one
//! update walks at most two passes of a looping animation.

use std::sync::Arc;

use log::{trace, warn};

use crate::components::geometry::Rect;
use crate::components::sprite::{ShadowSettings, SpriteState};
use crate::error::Result;
use crate::events::animation::AnimationStep;
use crate::resources::animationstore::AnimationDefinition;
use crate::systems::animation::{frame_source_rect, render_animation};
use crate::systems::render::RenderRequestEmitter;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackState {
    Unbound,
    Playing,
    Paused,
    Finished,
}

#[derive(Debug, Clone)]
pub struct AnimationPlayer {
    current: Option<Arc<AnimationDefinition>>,
    current_frame: usize,
    /// Seconds accumulated within the current frame.
    frame_timer: f32,
    /// Seconds the current frame lasts.
    timer_target: f32,
    paused: bool,
    mirrored: bool,
    finished: bool,
    speed_scale: f32,
}

impl Default for AnimationPlayer {
    fn default() -> Self {
        Self::new()
    }
}

impl AnimationPlayer {
    pub fn new() -> Self {
        Self {
            current: None,
            current_frame: 0,
            frame_timer: 0.0,
            timer_target: 0.0,
            paused: false,
            mirrored: false,
            finished: false,
            speed_scale: 1.0,
        }
    }

    /// Bind `definition`.
    ///
    /// Playback resets to frame 0 if `restart` is set or the definition is
    /// not the one already bound (by `Arc` identity). Binding the current
    /// definition again without `restart` keeps playback where it is, so
    /// callers may request the same animation every frame.
    ///
    /// A definition that fails validation is not bound and the previous
    /// playback is left untouched; see [`try_bind`](Self::try_bind).
    pub fn bind(&mut self, definition: Arc<AnimationDefinition>, restart: bool) {
        if let Err(e) = self.try_bind(definition, restart) {
            warn!("animation not bound: {}", e);
        }
    }

    /// [`bind`](Self::bind), failing with
    /// [`CoreError::InvalidAnimation`](crate::error::CoreError::InvalidAnimation)
    /// when the definition breaks its record invariants.
    pub fn try_bind(&mut self, definition: Arc<AnimationDefinition>, restart: bool) -> Result<()> {
        let same = self
            .current
            .as_ref()
            .is_some_and(|cur| Arc::ptr_eq(cur, &definition));
        if same && !restart {
            return Ok(());
        }
        definition.validate()?;
        trace!("binding animation '{}' (restart={})", definition.name, restart);
        self.current_frame = 0;
        self.frame_timer = 0.0;
        self.timer_target = duration_of(&definition, 0);
        self.finished = false;
        self.current = Some(definition);
        Ok(())
    }

    /// Drop the bound definition.
    pub fn unbind(&mut self) {
        self.current = None;
        self.current_frame = 0;
        self.frame_timer = 0.0;
        self.timer_target = 0.0;
        self.finished = false;
    }

    /// Advance playback by `dt` seconds.
    pub fn update(&mut self, dt: f32) -> AnimationStep {
        let mut step = AnimationStep::default();
        let Some(def) = &self.current else {
            return step;
        };
        if self.paused || self.finished {
            return step;
        }

        self.frame_timer += dt * self.speed_scale;
        let last = def.last_frame();

        let cycle = def.total_duration();
        if def.looped && cycle > 0.0 && self.frame_timer >= 2.0 * cycle {
            self.frame_timer = self.frame_timer % cycle + cycle;
        }

        let max_steps = 2 * (def.frame_count + 1);
        while self.frame_timer >= self.timer_target {
            if step.entered.len() >= max_steps {
                warn!(
                    "animation '{}' still behind after {} frames, dropping {}s",
                    def.name, max_steps, self.frame_timer
                );
                self.frame_timer = 0.0;
                break;
            }
            // Checked before advancing so a single-frame one-shot finishes
            // instead of looping once.
            if self.current_frame == last && !def.looped {
                self.finished = true;
                step.finished = true;
                break;
            }
            // Zero-length frames are shown for one update each.
            if self.timer_target <= 0.0 && !step.entered.is_empty() {
                break;
            }
            self.frame_timer -= self.timer_target;
            self.current_frame = if self.current_frame == last {
                0
            } else {
                self.current_frame + 1
            };
            self.timer_target = duration_of(def, self.current_frame);
            step.entered.push(self.current_frame);
        }

        step
    }

    /// Emit draw requests for the current frame. Does nothing while unbound.
    pub fn render(
        &self,
        sprite: &SpriteState,
        shadow: &ShadowSettings,
        out: &mut dyn RenderRequestEmitter,
    ) {
        if let Some(def) = &self.current {
            render_animation(def, self.current_frame, self.mirrored, sprite, shadow, out);
        }
    }

    pub fn state(&self) -> PlaybackState {
        if self.current.is_none() {
            PlaybackState::Unbound
        } else if self.finished {
            PlaybackState::Finished
        } else if self.paused {
            PlaybackState::Paused
        } else {
            PlaybackState::Playing
        }
    }

    pub fn animation(&self) -> Option<&Arc<AnimationDefinition>> {
        self.current.as_ref()
    }

    /// Name of the bound animation.
    pub fn animation_name(&self) -> Option<&str> {
        self.current.as_deref().map(|d| d.name.as_str())
    }

    pub fn current_frame(&self) -> usize {
        self.current_frame
    }

    pub fn frame_timer(&self) -> f32 {
        self.frame_timer
    }

    pub fn timer_target(&self) -> f32 {
        self.timer_target
    }

    /// Source rectangle of the current frame on its sheet.
    pub fn source_rect(&self) -> Option<Rect> {
        self.current
            .as_deref()
            .map(|d| frame_source_rect(d, self.current_frame))
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
    }

    pub fn is_mirrored(&self) -> bool {
        self.mirrored
    }

    pub fn set_mirrored(&mut self, mirrored: bool) {
        self.mirrored = mirrored;
    }

    pub fn speed_scale(&self) -> f32 {
        self.speed_scale
    }

    /// Negative scales are treated as 0 (frozen).
    pub fn set_speed_scale(&mut self, scale: f32) {
        self.speed_scale = scale.max(0.0);
    }
}

fn duration_of(def: &AnimationDefinition, frame: usize) -> f32 {
    def.frame_duration(frame).unwrap_or_else(|e| {
        warn!("animation '{}': {}", def.name, e);
        0.0
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use smallvec::smallvec;

    fn def(name: &str, looped: bool, speeds: Vec<u32>) -> Arc<AnimationDefinition> {
        Arc::new(AnimationDefinition::new(name, "sheet", looped, 16, 16, speeds).unwrap())
    }

    #[test]
    fn test_unbound_update_is_noop() {
        let mut p = AnimationPlayer::new();
        assert_eq!(p.state(), PlaybackState::Unbound);
        assert!(p.update(1.0).is_idle());
        assert_eq!(p.source_rect(), None);
    }

    #[test]
    fn test_bind_sets_first_target() {
        let mut p = AnimationPlayer::new();
        p.bind(def("a", true, vec![250, 500]), false);
        assert_eq!(p.state(), PlaybackState::Playing);
        assert_eq!(p.current_frame(), 0);
        assert_eq!(p.timer_target(), 0.25);
    }

    #[test]
    fn test_single_frame_one_shot_finishes_without_wrapping() {
        let mut p = AnimationPlayer::new();
        p.bind(def("once", false, vec![100]), false);
        let step = p.update(0.5);
        assert!(step.finished);
        assert!(step.entered.is_empty());
        assert!(p.is_finished());
        assert_eq!(p.current_frame(), 0);
        assert_eq!(p.state(), PlaybackState::Finished);

        // Holds forever, and the transition is reported only once.
        let again = p.update(10.0);
        assert!(again.is_idle());
        assert_eq!(p.current_frame(), 0);
    }

    #[test]
    fn test_looping_three_frames_visit_in_order() {
        let mut p = AnimationPlayer::new();
        p.bind(def("loop", true, vec![250, 250, 250]), false);
        let mut visited = Vec::new();
        for _ in 0..3 {
            visited.extend(p.update(0.25).entered);
        }
        assert_eq!(visited, vec![1, 2, 0]);
        assert_eq!(p.current_frame(), 0);
        assert_eq!(p.frame_timer(), 0.0);
    }

    #[test]
    fn test_delta_spanning_two_boundaries_skips_nothing() {
        let mut p = AnimationPlayer::new();
        p.bind(def("loop", true, vec![250, 250, 250]), false);
        let step = p.update(0.5);
        let expected: smallvec::SmallVec<[usize; 4]> = smallvec![1, 2];
        assert_eq!(step.entered, expected);
        assert_eq!(p.current_frame(), 2);
    }

    #[test]
    fn test_remainder_carries_over() {
        let mut p = AnimationPlayer::new();
        p.bind(def("loop", true, vec![500, 500]), false);
        p.update(0.75);
        assert_eq!(p.current_frame(), 1);
        assert_eq!(p.frame_timer(), 0.25);
    }

    #[test]
    fn test_non_looping_holds_last_frame() {
        let mut p = AnimationPlayer::new();
        p.bind(def("die", false, vec![250, 250, 250]), false);
        let step = p.update(2.0);
        let expected: smallvec::SmallVec<[usize; 4]> = smallvec![1, 2];
        assert_eq!(step.entered, expected);
        assert!(step.finished);
        assert_eq!(p.current_frame(), 2);
    }

    #[test]
    fn test_rebinding_same_definition_keeps_progress() {
        let anim = def("walk", true, vec![250, 250]);
        let mut p = AnimationPlayer::new();
        p.bind(anim.clone(), false);
        p.update(0.25);
        assert_eq!(p.current_frame(), 1);

        p.bind(anim.clone(), false);
        assert_eq!(p.current_frame(), 1);

        p.bind(anim, true);
        assert_eq!(p.current_frame(), 0);
        assert_eq!(p.frame_timer(), 0.0);
    }

    #[test]
    fn test_binding_other_definition_resets_and_clears_finished() {
        let mut p = AnimationPlayer::new();
        p.bind(def("once", false, vec![100]), false);
        p.update(1.0);
        assert!(p.is_finished());

        // Equal contents, different identity.
        p.bind(def("once", false, vec![100]), false);
        assert!(!p.is_finished());
        assert_eq!(p.state(), PlaybackState::Playing);
    }

    #[test]
    fn test_paused_does_not_accumulate() {
        let mut p = AnimationPlayer::new();
        p.bind(def("loop", true, vec![250, 250]), false);
        p.set_paused(true);
        assert_eq!(p.state(), PlaybackState::Paused);
        assert!(p.update(1.0).is_idle());
        assert_eq!(p.frame_timer(), 0.0);
        p.set_paused(false);
        p.update(0.25);
        assert_eq!(p.current_frame(), 1);
    }

    #[test]
    fn test_speed_scale_multiplies_delta() {
        let mut p = AnimationPlayer::new();
        p.bind(def("loop", true, vec![500, 500]), false);
        p.set_speed_scale(2.0);
        p.update(0.25);
        assert_eq!(p.current_frame(), 1);
        p.set_speed_scale(-3.0);
        assert_eq!(p.speed_scale(), 0.0);
    }

    #[test]
    fn test_zero_length_frames_advance_once_per_update() {
        let mut p = AnimationPlayer::new();
        p.bind(def("zero", true, vec![0, 0, 0]), false);
        assert_eq!(p.update(0.0).entered.len(), 1);
        assert_eq!(p.current_frame(), 1);
        assert_eq!(p.update(0.0).entered.len(), 1);
        assert_eq!(p.current_frame(), 2);
    }

    #[test]
    fn test_huge_delta_on_fast_loop_returns() {
        let mut p = AnimationPlayer::new();
        p.bind(def("blur", true, vec![1, 1]), false);
        p.set_speed_scale(400_000.0);
        let step = p.update(0.25);
        assert!(!step.entered.is_empty());
        assert!(step.entered.len() <= 6);
        assert!(p.frame_timer() < p.timer_target());
        assert!(p.current_frame() <= 1);

        // Still steps normally afterwards.
        p.set_speed_scale(1.0);
        let next = p.update(0.001);
        assert!(next.entered.len() <= 2);
    }

    #[test]
    fn test_huge_delta_on_one_shot_finishes() {
        let mut p = AnimationPlayer::new();
        p.bind(def("burst", false, vec![1, 1, 1]), false);
        p.set_speed_scale(1.0e9);
        let step = p.update(1.0);
        let expected: smallvec::SmallVec<[usize; 4]> = smallvec![1, 2];
        assert_eq!(step.entered, expected);
        assert!(step.finished);
    }

    #[test]
    fn test_whole_cycles_keep_frame_phase() {
        let mut p = AnimationPlayer::new();
        p.bind(def("loop", true, vec![250, 250, 250]), false);
        // Ten passes plus one and a half frames.
        p.update(7.875);
        assert_eq!(p.current_frame(), 1);
        assert!((p.frame_timer() - 0.125).abs() < 1e-4);
    }

    #[test]
    fn test_inconsistent_record_is_not_bound() {
        let json = r#"{
            "name": "broken",
            "sheetKey": "sheet",
            "loop": true,
            "frameWidth": 16,
            "frameHeight": 16,
            "frameCount": 3,
            "frameSpeeds": [100]
        }"#;
        let broken: AnimationDefinition = serde_json::from_str(json).unwrap();
        let broken = Arc::new(broken);

        let mut p = AnimationPlayer::new();
        let err = p.try_bind(broken.clone(), false).unwrap_err();
        assert!(matches!(err, crate::error::CoreError::InvalidAnimation { .. }));
        assert_eq!(p.state(), PlaybackState::Unbound);

        // A good binding survives a rejected one.
        p.bind(def("walk", true, vec![250, 250]), false);
        p.update(0.25);
        p.bind(broken, true);
        assert_eq!(p.animation_name(), Some("walk"));
        assert_eq!(p.current_frame(), 1);
        assert!(p.update(0.1).entered.is_empty());
    }

    #[test]
    fn test_unbind_returns_to_unbound() {
        let mut p = AnimationPlayer::new();
        p.bind(def("a", true, vec![100]), false);
        p.unbind();
        assert_eq!(p.state(), PlaybackState::Unbound);
        assert_eq!(p.animation_name(), None);
    }
}
