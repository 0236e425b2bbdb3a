//! Shared stores and clocks.
//!
//! Submodules overview:
//! - [`animationstore`] – animation definitions keyed by name
//! - [`gameconfig`] – INI-backed configuration
//! - [`objectregistry`] – per-level object table with type buckets and id generation
//! - [`valuestore`] – string-keyed heterogeneous state for levels and globals
//! - [`worldtime`] – `TimeSource` trait and the frame clock

pub mod animationstore;
pub mod gameconfig;
pub mod objectregistry;
pub mod valuestore;
pub mod worldtime;
