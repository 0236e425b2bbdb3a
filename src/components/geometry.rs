//! Plain geometry values handed to the render collaborator.
//!
//! The core never talks to a graphics API, so it carries its own small
//! vector/rectangle types instead of a backend's. A renderer converts them at
//! the [`RenderRequestEmitter`](crate::systems::render::RenderRequestEmitter)
//! boundary.

use std::ops::{Add, Mul, Sub};

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };
    pub const ONE: Vec2 = Vec2 { x: 1.0, y: 1.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Vector with both components set to `v`.
    pub const fn splat(v: f32) -> Self {
        Self { x: v, y: v }
    }
}

impl Add for Vec2 {
    type Output = Vec2;
    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Vec2 {
    type Output = Vec2;
    fn sub(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f32> for Vec2 {
    type Output = Vec2;
    fn mul(self, rhs: f32) -> Vec2 {
        Vec2::new(self.x * rhs, self.y * rhs)
    }
}

/// Integer pixel rectangle, used for sprite-sheet source regions.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

/// Floating point rectangle with inclusive edges.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FloatRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl FloatRect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn left(&self) -> f32 {
        self.x
    }
    pub fn right(&self) -> f32 {
        self.x + self.width
    }
    pub fn top(&self) -> f32 {
        self.y
    }
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Overlap test. Touching edges count as intersecting.
    pub fn intersects(&self, other: &FloatRect) -> bool {
        !(self.right() < other.left()
            || self.left() > other.right()
            || self.bottom() < other.top()
            || self.top() > other.bottom())
    }
}

/// Anchor keys used to place a quad's pivot. Keys combine, e.g.
/// `[Bottom, Left]`; `Center` overrides both axes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum OriginKey {
    Top,
    Left,
    Right,
    Bottom,
    Center,
}

/// Resolve a set of origin keys against a quad of `width` x `height` pixels.
///
/// Keys are applied in a fixed order (top, bottom, left, right, center) so
/// the result does not depend on the order they were listed in.
pub fn resolve_origin(keys: &[OriginKey], width: i32, height: i32) -> Vec2 {
    let mut origin = Vec2::ZERO;
    if keys.contains(&OriginKey::Top) {
        origin.y = 0.0;
    }
    if keys.contains(&OriginKey::Bottom) {
        origin.y = height as f32;
    }
    if keys.contains(&OriginKey::Left) {
        origin.x = 0.0;
    }
    if keys.contains(&OriginKey::Right) {
        origin.x = width as f32;
    }
    if keys.contains(&OriginKey::Center) {
        // integer halving, matching pixel-snapped sprite pivots
        origin.x = (width / 2) as f32;
        origin.y = (height / 2) as f32;
    }
    origin
}
