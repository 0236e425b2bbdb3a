//! Color values used to modulate quads.
//!
//! [`Color`] is what a sprite hands to the render collaborator as its color
//! filter. [`Color::faded`] produces the low-opacity black used for drop
//! shadows.

/// RGBA color with 8-bit channels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const WHITE: Color = Color::new(255, 255, 255, 255);
    pub const BLACK: Color = Color::new(0, 0, 0, 255);
    pub const TRANSPARENT: Color = Color::new(0, 0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Multiply every channel (alpha included) by `opacity`, clamped to
    /// `[0, 1]`. This is the premultiplied-alpha fade renderers expect.
    pub fn faded(self, opacity: f32) -> Color {
        let k = opacity.clamp(0.0, 1.0);
        let scale = |c: u8| (c as f32 * k).round() as u8;
        Color::new(scale(self.r), scale(self.g), scale(self.b), scale(self.a))
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::WHITE
    }
}
