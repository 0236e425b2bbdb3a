//! Object-side state.
//!
//! Submodules overview:
//! - [`animation`] – playback state machine for sheet-strip animations
//! - [`gameobject`] – the `GameObject` trait, object header and kind hierarchy
//! - [`geometry`] – vectors, rectangles and origin keys
//! - [`sprite`] – placement and drop-shadow settings for drawable objects
//! - [`timer`] – countdown timer with a once-per-crossing finish flag
//! - [`tint`] – RGBA color with opacity helpers

pub mod animation;
pub mod gameobject;
pub mod geometry;
pub mod sprite;
pub mod timer;
pub mod tint;
