//! Destruction sweep.
//!
//! Objects flag themselves destroyed during their update; they stay
//! registered (and visible to later objects in the same pass) until
//! [`sweep_destroyed`] runs after every object has been updated.

use log::debug;

use crate::resources::objectregistry::{ObjectId, ObjectRegistry};

/// Unregister every object whose destroyed flag is set. Returns the removed
/// ids in registration order.
pub fn sweep_destroyed(registry: &mut ObjectRegistry) -> Vec<ObjectId> {
    let doomed: Vec<ObjectId> = registry
        .iter()
        .filter(|o| o.is_destroyed())
        .filter_map(|o| o.id())
        .collect();
    for id in &doomed {
        registry.unregister(*id);
    }
    if !doomed.is_empty() {
        debug!(
            "swept {} object(s) from level '{}'",
            doomed.len(),
            registry.level()
        );
    }
    doomed
}
