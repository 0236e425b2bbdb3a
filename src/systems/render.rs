//! Render request plumbing.
//!
//! The core decides *what* to draw and hands each quad to a
//! [`RenderRequestEmitter`]; a backend implements the trait and does the
//! actual drawing. A missing sheet is the backend's fatal lookup error, not
//! something the core handles.
//!
//! Two emitters ship with the crate:
//! - [`RecordingEmitter`] keeps every request, for tests and tooling
//! - [`LogEmitter`] counts requests and traces them through `log`

use std::sync::Arc;

use log::trace;

use crate::components::geometry::{Rect, Vec2};
use crate::components::tint::Color;
use crate::resources::objectregistry::ObjectRegistry;

/// One textured quad.
#[derive(Debug, Clone, PartialEq)]
pub struct QuadRequest {
    pub sheet: Arc<str>,
    pub position: Vec2,
    pub source: Rect,
    pub scale: Vec2,
    pub depth: f32,
    pub color: Color,
    /// Pivot in source-rectangle pixels.
    pub origin: Vec2,
    pub mirrored: bool,
}

pub trait RenderRequestEmitter {
    fn draw_quad(&mut self, quad: QuadRequest);
}

#[derive(Debug, Default)]
pub struct RecordingEmitter {
    pub quads: Vec<QuadRequest>,
}

impl RecordingEmitter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.quads.clear();
    }

    /// Requests whose depth is exactly `depth`.
    pub fn at_depth(&self, depth: f32) -> impl Iterator<Item = &QuadRequest> {
        self.quads.iter().filter(move |q| q.depth == depth)
    }
}

impl RenderRequestEmitter for RecordingEmitter {
    fn draw_quad(&mut self, quad: QuadRequest) {
        self.quads.push(quad);
    }
}

#[derive(Debug, Default)]
pub struct LogEmitter {
    drawn: u64,
}

impl LogEmitter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn drawn(&self) -> u64 {
        self.drawn
    }
}

impl RenderRequestEmitter for LogEmitter {
    fn draw_quad(&mut self, quad: QuadRequest) {
        self.drawn += 1;
        trace!(
            "quad {} src=({},{} {}x{}) at ({:.1},{:.1}) depth={} mirrored={}",
            quad.sheet,
            quad.source.x,
            quad.source.y,
            quad.source.width,
            quad.source.height,
            quad.position.x,
            quad.position.y,
            quad.depth,
            quad.mirrored
        );
    }
}

/// Render every object of a registry in registration order.
pub fn render_pass(registry: &ObjectRegistry, out: &mut dyn RenderRequestEmitter) {
    for object in registry.iter() {
        object.render(out);
    }
}
