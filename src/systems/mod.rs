//! Frame-step functions.
//!
//! Submodules overview
//! - [`animation`] – source rectangles and animated sprite draw requests
//! - [`render`] – emitter trait, quad requests and the registry render pass
//! - [`sweep`] – unregister destroyed objects after the update pass
//! - [`time`] – advance the clock and publish the frame delta
//! - [`timer`] – batch timer update producing finish events

pub mod animation;
pub mod render;
pub mod sweep;
pub mod time;
pub mod timer;
