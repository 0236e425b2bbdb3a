//! Time update system.
//!
//! Advances the shared [`WorldTime`](crate::resources::worldtime::WorldTime)
//! once per frame and publishes the scaled delta into the global
//! [`ValueStore`](crate::resources::valuestore::ValueStore).

use log::warn;

use crate::resources::valuestore::ValueStore;
use crate::resources::worldtime::{DELTA_TIME_KEY, WorldTime};

/// Update elapsed and delta seconds on the `WorldTime` clock.
///
/// `dt` is the unscaled frame delta in seconds. Non-finite or negative
/// deltas count as zero; large ones are clamped to `max_delta` before the
/// time scale is applied.
pub fn update_world_time(wt: &mut WorldTime, dt: f32) {
    let raw = if dt.is_finite() && dt > 0.0 {
        dt.min(wt.max_delta)
    } else {
        if !dt.is_finite() || dt < 0.0 {
            warn!("ignoring invalid frame delta {}", dt);
        }
        0.0
    };
    let scaled_dt = raw * wt.time_scale;
    wt.elapsed += scaled_dt;
    wt.delta = scaled_dt;
    wt.frame_count += 1;
}

/// Publish the current delta under [`DELTA_TIME_KEY`].
pub fn publish_delta_time(wt: &WorldTime, globals: &mut ValueStore) {
    globals.set(DELTA_TIME_KEY, wt.delta);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::worldtime::TimeSource;

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-6
    }

    #[test]
    fn test_applies_time_scale() {
        let mut wt = WorldTime {
            time_scale: 0.5,
            ..Default::default()
        };
        update_world_time(&mut wt, 0.1);
        assert!(approx_eq(wt.delta, 0.05));
        assert!(approx_eq(wt.elapsed, 0.05));
        assert_eq!(wt.frame_count, 1);
        assert!(approx_eq(wt.delta_time(), 0.05));
    }

    #[test]
    fn test_clamps_large_delta() {
        let mut wt = WorldTime::default();
        update_world_time(&mut wt, 3.0);
        assert!(approx_eq(wt.delta, 0.25));
    }

    #[test]
    fn test_invalid_delta_is_zero() {
        let mut wt = WorldTime::default();
        update_world_time(&mut wt, f32::NAN);
        assert_eq!(wt.delta, 0.0);
        update_world_time(&mut wt, -1.0);
        assert_eq!(wt.delta, 0.0);
        assert_eq!(wt.frame_count, 2);
    }

    #[test]
    fn test_publish_sets_dt_key() {
        let mut wt = WorldTime::default();
        let mut globals = ValueStore::new();
        update_world_time(&mut wt, 0.02);
        publish_delta_time(&wt, &mut globals);
        assert_eq!(globals.get_copied::<f32>("DT"), Ok(wt.delta));
    }
}
