//! Animated sprite rendering.
//!
//! Turns the current frame of an animation into render requests:
//!
//! 1. [`frame_source_rect`] locates the frame on its sheet. Frames are laid
//!    out left to right; when the sheet has a known width the strip wraps
//!    onto following rows.
//! 2. [`render_animation`] emits the frame quad and, with the drop shadow
//!    enabled, one faded single-row quad per pixel row of the frame, each
//!    stepped one more pixel up and to the left, at the shadow depth.
//!
//! # Related
//!
//! - [`crate::components::animation::AnimationPlayer`] – playback state
//! - [`crate::systems::render::RenderRequestEmitter`] – where requests go

use crate::components::geometry::{Rect, Vec2, resolve_origin};
use crate::components::sprite::{ShadowSettings, SpriteState};
use crate::components::tint::Color;
use crate::resources::animationstore::AnimationDefinition;
use crate::systems::render::{QuadRequest, RenderRequestEmitter};

/// Source rectangle of `frame` on `def`'s sheet.
pub fn frame_source_rect(def: &AnimationDefinition, frame: usize) -> Rect {
    let width = def.frame_width as i64;
    let height = def.frame_height as i64;
    let offset = frame as i64 * width;
    let (x, row) = match def.sheet_width {
        Some(sheet) if sheet > 0 => {
            let sheet = sheet as i64;
            (offset % sheet, offset / sheet)
        }
        _ => (offset, 0),
    };
    Rect::new(x as i32, (row * height) as i32, width as i32, height as i32)
}

/// Emit the quads for one animated sprite.
pub fn render_animation(
    def: &AnimationDefinition,
    frame: usize,
    mirrored: bool,
    sprite: &SpriteState,
    shadow: &ShadowSettings,
    out: &mut dyn RenderRequestEmitter,
) {
    let source = frame_source_rect(def, frame);
    out.draw_quad(QuadRequest {
        sheet: def.sheet_key.clone(),
        position: sprite.position,
        source,
        scale: sprite.scale,
        depth: sprite.depth,
        color: sprite.color,
        origin: resolve_origin(&sprite.origin, source.width, source.height),
        mirrored,
    });

    if !shadow.enabled {
        return;
    }

    let shadow_color = Color::BLACK.faded(shadow.opacity);
    for i in 0..source.height {
        // Bottom row first, drawn closest to the sprite.
        let row = Rect::new(source.x, source.y + source.height - i - 1, source.width, 1);
        let step = (i + 1) as f32;
        out.draw_quad(QuadRequest {
            sheet: def.sheet_key.clone(),
            position: sprite.position - Vec2::splat(step),
            source: row,
            scale: sprite.scale,
            depth: shadow.depth,
            color: shadow_color,
            origin: resolve_origin(&sprite.origin, row.width, row.height),
            mirrored,
        });
    }
}
