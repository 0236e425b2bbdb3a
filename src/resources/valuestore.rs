//! Keyed store of arbitrary typed values.
//!
//! A [`ValueStore`] backs both the per-level state and the game-wide global
//! state. It is used for cross-cutting scalars such as the frame delta time
//! published under [`DELTA_TIME_KEY`](crate::resources::worldtime::DELTA_TIME_KEY),
//! and for shared handles like the animation store.
//!
//! Retrieval is typed: asking for a key that was never set yields
//! [`CoreError::KeyNotFound`], asking with the wrong type yields
//! [`CoreError::TypeMismatch`]. Both are caller errors.
//!
//! ```ignore
//! store.set("lives", 3_i32);
//! let lives: i32 = store.get_copied("lives")?;
//! ```

use std::any::{Any, type_name};

use rustc_hash::FxHashMap;

use crate::error::{CoreError, Result};

struct StoredValue {
    value: Box<dyn Any>,
    type_name: &'static str,
}

#[derive(Default)]
pub struct ValueStore {
    values: FxHashMap<String, StoredValue>,
}

impl ValueStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite a value. The new value may have a different type.
    pub fn set<T: Any>(&mut self, key: impl Into<String>, value: T) {
        self.values.insert(
            key.into(),
            StoredValue {
                value: Box::new(value),
                type_name: type_name::<T>(),
            },
        );
    }

    pub fn get<T: Any>(&self, key: &str) -> Result<&T> {
        let stored = self
            .values
            .get(key)
            .ok_or_else(|| CoreError::key_not_found(key))?;
        stored
            .value
            .downcast_ref::<T>()
            .ok_or(CoreError::TypeMismatch {
                expected: type_name::<T>(),
                found: stored.type_name,
            })
    }

    pub fn get_mut<T: Any>(&mut self, key: &str) -> Result<&mut T> {
        let stored = self
            .values
            .get_mut(key)
            .ok_or_else(|| CoreError::key_not_found(key))?;
        let found = stored.type_name;
        stored
            .value
            .downcast_mut::<T>()
            .ok_or(CoreError::TypeMismatch {
                expected: type_name::<T>(),
                found,
            })
    }

    /// Shorthand for `Copy` scalars.
    pub fn get_copied<T: Any + Copy>(&self, key: &str) -> Result<T> {
        self.get::<T>(key).copied()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    /// Remove a key. Returns `true` if it existed.
    pub fn remove(&mut self, key: &str) -> bool {
        self.values.remove(key).is_some()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    pub fn clear(&mut self) {
        self.values.clear();
    }
}

impl std::fmt::Debug for ValueStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_map()
            .entries(self.values.iter().map(|(k, v)| (k, v.type_name)))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_missing_key() {
        let store = ValueStore::new();
        assert_eq!(
            store.get::<f32>("DT").err(),
            Some(CoreError::KeyNotFound {
                key: "DT".to_string()
            })
        );
    }

    #[test]
    fn test_set_then_get_returns_value() {
        let mut store = ValueStore::new();
        store.set("DT", 0.016_f32);
        store.set("name", String::from("cave"));
        assert_eq!(store.get_copied::<f32>("DT"), Ok(0.016));
        assert_eq!(store.get::<String>("name").map(String::as_str), Ok("cave"));
    }

    #[test]
    fn test_set_overwrites() {
        let mut store = ValueStore::new();
        store.set("lives", 3_i32);
        store.set("lives", 2_i32);
        assert_eq!(store.get_copied::<i32>("lives"), Ok(2));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_type_mismatch() {
        let mut store = ValueStore::new();
        store.set("lives", 3_i32);
        assert_eq!(
            store.get::<f32>("lives").err(),
            Some(CoreError::TypeMismatch {
                expected: "f32",
                found: "i32",
            })
        );
    }

    #[test]
    fn test_get_mut_in_place() {
        let mut store = ValueStore::new();
        store.set("score", 10_u32);
        *store.get_mut::<u32>("score").unwrap() += 5;
        assert_eq!(store.get_copied::<u32>("score"), Ok(15));
    }

    #[test]
    fn test_remove_and_contains() {
        let mut store = ValueStore::new();
        store.set("flag", true);
        assert!(store.contains("flag"));
        assert!(store.remove("flag"));
        assert!(!store.remove("flag"));
        assert!(store.is_empty());
    }
}
