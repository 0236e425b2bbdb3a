//! Level-scoped registry of live game objects.
//!
//! The [`ObjectRegistry`] owns every object registered in a level and keeps
//! two indexes over them:
//!
//! - by id: a unique [`ObjectId`] handed out by a shared [`IdGenerator`]
//! - by type: one ordered bucket per [`TypeTag`], in registration order
//!
//! # Deep registration
//!
//! A shallow registration indexes an object under its own kind only. A deep
//! registration also indexes it under every ancestor kind up to (excluding)
//! the framework roots, so a `Bat` deriving from `Enemy` shows up in
//! `get_by_type::<Enemy>()`. Unregistering walks the same chain, so both
//! modes are reversed correctly.
//!
//! # Related
//!
//! - [`crate::components::gameobject`] – object trait and kind hierarchy
//! - [`crate::level::Level`] – drives update, sweep and render over a registry

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use log::{debug, warn};
use rustc_hash::FxHashMap;

use crate::components::gameobject::{GameObject, ObjectKind, TypeTag};
use crate::error::{CoreError, Result};

/// Identity of a registered object. Unique for the life of the process.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId(pub u64);

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Monotonic id source shared by every level of a game.
///
/// Clones share the same counter. Ids start at 0 and are never reused, even
/// across levels.
#[derive(Clone, Debug, Default)]
pub struct IdGenerator {
    next: Arc<AtomicU64>,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_id(&self) -> ObjectId {
        ObjectId(self.next.fetch_add(1, Ordering::Relaxed))
    }

    /// Id the next call to [`next_id`](Self::next_id) will return.
    pub fn peek(&self) -> ObjectId {
        ObjectId(self.next.load(Ordering::Relaxed))
    }
}

pub struct ObjectRegistry {
    level: Arc<str>,
    ids: IdGenerator,
    /// Primary sequence; drives update and render order.
    order: Vec<ObjectId>,
    objects: FxHashMap<ObjectId, Box<dyn GameObject>>,
    by_type: FxHashMap<TypeTag, Vec<ObjectId>>,
}

impl ObjectRegistry {
    pub fn new(level: impl Into<Arc<str>>, ids: IdGenerator) -> Self {
        Self {
            level: level.into(),
            ids,
            order: Vec::new(),
            objects: FxHashMap::default(),
            by_type: FxHashMap::default(),
        }
    }

    pub fn level(&self) -> &str {
        &self.level
    }

    /// Register an object and return its id.
    pub fn register<O: GameObject>(&mut self, object: O, deep: bool) -> ObjectId {
        self.register_boxed(Box::new(object), deep)
    }

    /// Register an already boxed object.
    ///
    /// An object that already carries an id (moved over from another level)
    /// keeps it. Registering an object whose id is already present here is a
    /// no-op.
    pub fn register_boxed(&mut self, mut object: Box<dyn GameObject>, deep: bool) -> ObjectId {
        let id = object.id().unwrap_or_else(|| self.ids.next_id());
        if self.order.contains(&id) {
            warn!("object {} already registered in level '{}'", id, self.level);
            return id;
        }

        object.header_mut().bind(id, self.level.clone());

        let info = object.type_info();
        for tag in info.registration_tags(deep) {
            self.by_type.entry(tag).or_default().push(id);
        }
        debug!(
            "registered {} {} in level '{}' (deep={})",
            info.tag, id, self.level, deep
        );

        self.order.push(id);
        object.on_registered();
        self.objects.insert(id, object);
        id
    }

    /// Remove an object from the primary sequence and from every bucket it
    /// was indexed under. Returns ownership of it; `None` if absent.
    pub fn unregister(&mut self, id: ObjectId) -> Option<Box<dyn GameObject>> {
        let mut object = self.objects.remove(&id)?;
        self.order.retain(|o| *o != id);

        // Deep walk removes shallow registrations too.
        for tag in object.type_info().registration_tags(true) {
            if let Some(bucket) = self.by_type.get_mut(&tag) {
                bucket.retain(|o| *o != id);
                if bucket.is_empty() {
                    self.by_type.remove(&tag);
                }
            }
        }

        object.header_mut().unbind_level();
        debug!("unregistered {} from level '{}'", id, self.level);
        Some(object)
    }

    /// Typed lookup by id.
    ///
    /// Fails with [`CoreError::ObjectNotFound`] if no such object is
    /// registered, or [`CoreError::TypeMismatch`] if it is not a `T`.
    pub fn get_by_id<T: ObjectKind>(&self, id: ObjectId) -> Result<&T> {
        let object = self.get(id).ok_or(CoreError::ObjectNotFound { id })?;
        let found = object.type_info().tag.name();
        object
            .as_any()
            .downcast_ref::<T>()
            .ok_or(CoreError::TypeMismatch {
                expected: T::TYPE.tag.name(),
                found,
            })
    }

    pub fn get(&self, id: ObjectId) -> Option<&(dyn GameObject + 'static)> {
        self.objects.get(&id).map(|o| o.as_ref())
    }

    pub fn get_mut(&mut self, id: ObjectId) -> Option<&mut (dyn GameObject + 'static)> {
        self.objects.get_mut(&id).map(|o| o.as_mut())
    }

    /// Every object indexed under `K`'s tag, in registration order.
    ///
    /// With deep registrations this includes descendants of `K`, so the
    /// result is type-erased. Empty if nothing of that kind was registered.
    pub fn get_by_type<K: ObjectKind>(&self) -> Vec<&(dyn GameObject + 'static)> {
        self.get_by_tag(K::TYPE.tag)
    }

    pub fn get_by_tag(&self, tag: TypeTag) -> Vec<&(dyn GameObject + 'static)> {
        self.by_type
            .get(&tag)
            .map(|bucket| bucket.iter().filter_map(|id| self.get(*id)).collect())
            .unwrap_or_default()
    }

    /// Objects of exactly type `T`, in registration order. Descendants that
    /// were deep-registered under `T`'s tag are skipped.
    pub fn get_all<T: ObjectKind>(&self) -> Vec<&T> {
        self.get_by_type::<T>()
            .into_iter()
            .filter_map(|o| o.as_any().downcast_ref::<T>())
            .collect()
    }

    /// Number of visible objects indexed under `tag`.
    pub fn count_by_tag(&self, tag: TypeTag) -> usize {
        self.by_type.get(&tag).map_or(0, |bucket| {
            bucket.iter().filter(|id| self.objects.contains_key(id)).count()
        })
    }

    pub fn contains(&self, id: ObjectId) -> bool {
        self.objects.contains_key(&id)
    }

    /// Registered objects, including one checked out for its own update.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Ids in registration order.
    pub fn ids(&self) -> &[ObjectId] {
        &self.order
    }

    /// Objects in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &(dyn GameObject + 'static)> + '_ {
        self.order.iter().filter_map(|id| self.get(*id))
    }

    /// Take an object out for its own update. It stays in the primary
    /// sequence and buckets but is invisible to lookups until checked in.
    pub(crate) fn check_out(&mut self, id: ObjectId) -> Option<Box<dyn GameObject>> {
        self.objects.remove(&id)
    }

    pub(crate) fn check_in(&mut self, object: Box<dyn GameObject>) {
        if let Some(id) = object.id() {
            self.objects.insert(id, object);
        }
    }
}

impl fmt::Debug for ObjectRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObjectRegistry")
            .field("level", &self.level)
            .field("objects", &self.order.len())
            .field("buckets", &self.by_type.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::gameobject::{GAME_OBJECT, ObjectHeader, TypeInfo};
    use crate::level::UpdateContext;

    static TEST_OBJECT: TypeInfo = TypeInfo::derived("TestObject", &GAME_OBJECT);
    static SUB_TEST_OBJECT: TypeInfo = TypeInfo::derived("SubTestObject", &TEST_OBJECT);
    static OTHER_OBJECT: TypeInfo = TypeInfo::derived("OtherObject", &GAME_OBJECT);

    #[derive(Default)]
    struct TestObject {
        header: ObjectHeader,
        registered_calls: u32,
    }
    impl ObjectKind for TestObject {
        const TYPE: &'static TypeInfo = &TEST_OBJECT;
    }
    impl GameObject for TestObject {
        fn header(&self) -> &ObjectHeader {
            &self.header
        }
        fn header_mut(&mut self) -> &mut ObjectHeader {
            &mut self.header
        }
        fn on_registered(&mut self) {
            self.registered_calls += 1;
        }
        fn update(&mut self, _ctx: &mut UpdateContext<'_>) {}
    }

    #[derive(Default)]
    struct SubTestObject {
        header: ObjectHeader,
    }
    impl ObjectKind for SubTestObject {
        const TYPE: &'static TypeInfo = &SUB_TEST_OBJECT;
    }
    impl GameObject for SubTestObject {
        fn header(&self) -> &ObjectHeader {
            &self.header
        }
        fn header_mut(&mut self) -> &mut ObjectHeader {
            &mut self.header
        }
        fn update(&mut self, _ctx: &mut UpdateContext<'_>) {}
    }

    #[derive(Default)]
    struct OtherObject {
        header: ObjectHeader,
    }
    impl ObjectKind for OtherObject {
        const TYPE: &'static TypeInfo = &OTHER_OBJECT;
    }
    impl GameObject for OtherObject {
        fn header(&self) -> &ObjectHeader {
            &self.header
        }
        fn header_mut(&mut self) -> &mut ObjectHeader {
            &mut self.header
        }
        fn update(&mut self, _ctx: &mut UpdateContext<'_>) {}
    }

    fn registry() -> ObjectRegistry {
        ObjectRegistry::new("test", IdGenerator::new())
    }

    fn ids_of(objects: Vec<&(dyn GameObject + 'static)>) -> Vec<ObjectId> {
        objects.iter().filter_map(|o| o.id()).collect()
    }

    #[test]
    fn test_ids_are_sequential_and_shared() {
        let ids = IdGenerator::new();
        let mut a = ObjectRegistry::new("a", ids.clone());
        let mut b = ObjectRegistry::new("b", ids.clone());
        assert_eq!(a.register(TestObject::default(), false), ObjectId(0));
        assert_eq!(b.register(TestObject::default(), false), ObjectId(1));
        assert_eq!(a.register(TestObject::default(), false), ObjectId(2));
        assert_eq!(ids.peek(), ObjectId(3));
    }

    #[test]
    fn test_register_binds_header_and_calls_hook() {
        let mut reg = registry();
        let id = reg.register(TestObject::default(), false);
        let obj = reg.get_by_id::<TestObject>(id).unwrap();
        assert_eq!(obj.header.id(), Some(id));
        assert_eq!(obj.header.level(), Some("test"));
        assert_eq!(obj.registered_calls, 1);
    }

    #[test]
    fn test_shallow_registration_only_exact_type() {
        let mut reg = registry();
        let base = reg.register(TestObject::default(), false);
        let sub = reg.register(SubTestObject::default(), false);

        assert_eq!(ids_of(reg.get_by_type::<TestObject>()), vec![base]);
        assert_eq!(ids_of(reg.get_by_type::<SubTestObject>()), vec![sub]);
    }

    #[test]
    fn test_deep_registration_reaches_ancestors() {
        let mut reg = registry();
        let sub = reg.register(SubTestObject::default(), true);

        assert_eq!(ids_of(reg.get_by_type::<TestObject>()), vec![sub]);
        assert_eq!(ids_of(reg.get_by_type::<SubTestObject>()), vec![sub]);
        assert_eq!(reg.count_by_tag(GAME_OBJECT.tag), 0);
    }

    #[test]
    fn test_bucket_keeps_registration_order() {
        let mut reg = registry();
        let a = reg.register(TestObject::default(), false);
        let b = reg.register(SubTestObject::default(), true);
        let c = reg.register(TestObject::default(), false);
        assert_eq!(ids_of(reg.get_by_type::<TestObject>()), vec![a, b, c]);
    }

    #[test]
    fn test_get_all_skips_descendants() {
        let mut reg = registry();
        reg.register(TestObject::default(), false);
        reg.register(SubTestObject::default(), true);
        assert_eq!(reg.get_by_type::<TestObject>().len(), 2);
        assert_eq!(reg.get_all::<TestObject>().len(), 1);
    }

    #[test]
    fn test_empty_type_query_is_empty() {
        let reg = registry();
        assert!(reg.get_by_type::<OtherObject>().is_empty());
        assert!(reg.get_all::<OtherObject>().is_empty());
    }

    #[test]
    fn test_get_by_id_not_found_and_mismatch() {
        let mut reg = registry();
        let id = reg.register(TestObject::default(), false);

        assert_eq!(
            reg.get_by_id::<TestObject>(ObjectId(99)).err(),
            Some(CoreError::ObjectNotFound { id: ObjectId(99) })
        );
        assert_eq!(
            reg.get_by_id::<OtherObject>(id).err(),
            Some(CoreError::TypeMismatch {
                expected: "OtherObject",
                found: "TestObject",
            })
        );
    }

    #[test]
    fn test_unregister_deep_clears_every_bucket() {
        let mut reg = registry();
        let sub = reg.register(SubTestObject::default(), true);
        let removed = reg.unregister(sub).unwrap();

        assert_eq!(removed.header().level(), None);
        assert_eq!(removed.id(), Some(sub));
        assert!(reg.get_by_type::<TestObject>().is_empty());
        assert!(reg.get_by_type::<SubTestObject>().is_empty());
        assert!(reg.get(sub).is_none());
        assert!(reg.is_empty());
    }

    #[test]
    fn test_unregister_absent_is_noop() {
        let mut reg = registry();
        let id = reg.register(TestObject::default(), false);
        assert!(reg.unregister(ObjectId(1234)).is_none());
        assert!(reg.unregister(id).is_some());
        assert!(reg.unregister(id).is_none());
    }

    #[test]
    fn test_reregister_keeps_id() {
        let ids = IdGenerator::new();
        let mut a = ObjectRegistry::new("a", ids.clone());
        let mut b = ObjectRegistry::new("b", ids);
        let id = a.register(TestObject::default(), false);
        let obj = a.unregister(id).unwrap();
        assert_eq!(b.register_boxed(obj, false), id);
        assert_eq!(b.get(id).and_then(|o| o.header().level()), Some("b"));
    }

    #[test]
    fn test_double_register_is_ignored() {
        let mut reg = registry();
        let id = reg.register(TestObject::default(), false);
        let mut twin = TestObject::default();
        twin.header.bind(id, Arc::from("elsewhere"));
        assert_eq!(reg.register_boxed(Box::new(twin), false), id);
        assert_eq!(reg.len(), 1);
        assert_eq!(reg.get_by_type::<TestObject>().len(), 1);
    }

    #[test]
    fn test_checked_out_object_is_invisible() {
        let mut reg = registry();
        let id = reg.register(TestObject::default(), false);
        let obj = reg.check_out(id).unwrap();
        assert!(reg.get(id).is_none());
        assert!(reg.get_by_type::<TestObject>().is_empty());
        assert!(!reg.contains(id));
        assert_eq!(reg.count_by_tag(TEST_OBJECT.tag), 0);
        assert_eq!(reg.len(), 1);
        reg.check_in(obj);
        assert!(reg.contains(id));
        assert!(reg.get(id).is_some());
    }

    #[test]
    fn test_lookup_after_mixed_register_unregister() {
        let mut reg = registry();
        let mut live = Vec::new();
        for i in 0..10 {
            let id = if i % 2 == 0 {
                reg.register(TestObject::default(), false)
            } else {
                reg.register(SubTestObject::default(), true)
            };
            live.push(id);
        }
        for id in live.iter().step_by(3) {
            reg.unregister(*id);
        }
        for id in reg.ids().to_vec() {
            assert_eq!(reg.get(id).and_then(|o| o.id()), Some(id));
        }
        for removed in [0, 3, 6, 9].map(ObjectId) {
            assert!(reg.get(removed).is_none());
        }
        assert_eq!(reg.len(), 6);
    }
}
