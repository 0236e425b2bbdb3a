//! Game objects and their explicit type hierarchy.
//!
//! A game object is any value implementing [`GameObject`]. Objects are owned
//! by a level's [`ObjectRegistry`](crate::resources::objectregistry::ObjectRegistry)
//! once registered; the registry assigns their id and binds their level key.
//!
//! # Type hierarchy
//!
//! Rust has no class chain to reflect over, so every object kind declares a
//! `static` [`TypeInfo`] naming its parent. The registry walks this chain for
//! deep registration and stops at the framework root kinds
//! ([`GAME_OBJECT`], [`SPRITE_OBJECT`], [`ANIMATED_SPRITE_OBJECT`]).
//!
//! ```ignore
//! static ENEMY: TypeInfo = TypeInfo::derived("Enemy", &ANIMATED_SPRITE_OBJECT);
//! static BAT: TypeInfo = TypeInfo::derived("Bat", &ENEMY);
//!
//! impl ObjectKind for Bat {
//!     const TYPE: &'static TypeInfo = &BAT;
//! }
//! ```
//!
//! Tags compare by name, so names must be unique within one program.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use crate::level::UpdateContext;
use crate::resources::objectregistry::ObjectId;
use crate::systems::render::RenderRequestEmitter;

/// Key of one type bucket in the registry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeTag(&'static str);

impl TypeTag {
    pub const fn name(&self) -> &'static str {
        self.0
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

/// One node of the object kind hierarchy.
#[derive(Debug)]
pub struct TypeInfo {
    pub tag: TypeTag,
    pub parent: Option<&'static TypeInfo>,
    /// Framework base kinds are never used as deep-registration buckets.
    pub root: bool,
}

impl TypeInfo {
    /// A framework base kind.
    pub const fn root(name: &'static str, parent: Option<&'static TypeInfo>) -> Self {
        Self {
            tag: TypeTag(name),
            parent,
            root: true,
        }
    }

    /// A user kind deriving from `parent`.
    pub const fn derived(name: &'static str, parent: &'static TypeInfo) -> Self {
        Self {
            tag: TypeTag(name),
            parent: Some(parent),
            root: false,
        }
    }

    /// Buckets an object of this kind is indexed under.
    ///
    /// Always yields the kind's own tag first. With `deep`, continues up the
    /// parent chain and stops at the first root kind (exclusive).
    pub fn registration_tags(&'static self, deep: bool) -> impl Iterator<Item = TypeTag> {
        let mut next = Some(self);
        let mut first = true;
        std::iter::from_fn(move || {
            let info = next?;
            if !first && info.root {
                return None;
            }
            first = false;
            next = if deep { info.parent } else { None };
            Some(info.tag)
        })
    }
}

pub static GAME_OBJECT: TypeInfo = TypeInfo::root("GameObject", None);
pub static SPRITE_OBJECT: TypeInfo = TypeInfo::root("SpriteObject", Some(&GAME_OBJECT));
pub static ANIMATED_SPRITE_OBJECT: TypeInfo =
    TypeInfo::root("AnimatedSpriteObject", Some(&SPRITE_OBJECT));

/// Static kind of a concrete object type. Used by typed registry lookups.
pub trait ObjectKind: Any {
    const TYPE: &'static TypeInfo;
}

/// Object-safe access to an object's kind and concrete type.
///
/// Implemented for every [`ObjectKind`]; never implement it by hand.
pub trait DynKind: Any {
    fn type_info(&self) -> &'static TypeInfo;
    fn as_any(&self) -> &dyn Any;
}

impl<T: ObjectKind> DynKind for T {
    fn type_info(&self) -> &'static TypeInfo {
        T::TYPE
    }
    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Bookkeeping every game object embeds.
#[derive(Debug, Clone, Default)]
pub struct ObjectHeader {
    id: Option<ObjectId>,
    level: Option<Arc<str>>,
    destroyed: bool,
}

impl ObjectHeader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn id(&self) -> Option<ObjectId> {
        self.id
    }

    /// Key of the level currently owning the object.
    pub fn level(&self) -> Option<&str> {
        self.level.as_deref()
    }

    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    /// Request removal at the end of the current update pass.
    pub fn destroy(&mut self) {
        self.destroyed = true;
    }

    /// Ids are assigned once and never change afterwards.
    pub(crate) fn bind(&mut self, id: ObjectId, level: Arc<str>) {
        if self.id.is_none() {
            self.id = Some(id);
        }
        self.level = Some(level);
    }

    pub(crate) fn unbind_level(&mut self) {
        self.level = None;
    }
}

/// A polymorphic entity living in a level.
pub trait GameObject: DynKind {
    fn header(&self) -> &ObjectHeader;
    fn header_mut(&mut self) -> &mut ObjectHeader;

    /// Called once the registry has assigned the id and level.
    fn on_registered(&mut self) {}

    fn update(&mut self, ctx: &mut UpdateContext<'_>);

    fn render(&self, _out: &mut dyn RenderRequestEmitter) {}

    fn id(&self) -> Option<ObjectId> {
        self.header().id()
    }

    fn is_destroyed(&self) -> bool {
        self.header().is_destroyed()
    }

    fn destroy(&mut self) {
        self.header_mut().destroy();
    }
}

impl fmt::Debug for dyn GameObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GameObject")
            .field("kind", &self.type_info().tag)
            .field("id", &self.id())
            .field("destroyed", &self.is_destroyed())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    static ENEMY: TypeInfo = TypeInfo::derived("Enemy", &ANIMATED_SPRITE_OBJECT);
    static FLYING_ENEMY: TypeInfo = TypeInfo::derived("FlyingEnemy", &ENEMY);
    static BAT: TypeInfo = TypeInfo::derived("Bat", &FLYING_ENEMY);

    fn names(iter: impl Iterator<Item = TypeTag>) -> Vec<&'static str> {
        iter.map(|t| t.name()).collect()
    }

    #[test]
    fn test_shallow_tags_only_own_kind() {
        assert_eq!(names(BAT.registration_tags(false)), vec!["Bat"]);
    }

    #[test]
    fn test_deep_tags_stop_at_roots() {
        assert_eq!(
            names(BAT.registration_tags(true)),
            vec!["Bat", "FlyingEnemy", "Enemy"]
        );
    }

    #[test]
    fn test_root_kind_still_indexes_itself() {
        assert_eq!(names(SPRITE_OBJECT.registration_tags(true)), vec!["SpriteObject"]);
    }

    #[test]
    fn test_header_keeps_first_id() {
        let mut h = ObjectHeader::new();
        h.bind(ObjectId(4), Arc::from("a"));
        h.bind(ObjectId(9), Arc::from("b"));
        assert_eq!(h.id(), Some(ObjectId(4)));
        assert_eq!(h.level(), Some("b"));
        h.unbind_level();
        assert_eq!(h.level(), None);
    }
}
