//! Stateless geometric hit tests.

use glam::Vec2;

use hordeline_core::constants::PLAYER_HIT_SCALE;
use hordeline_core::types::{Body, PlayerState};

/// Circle against an axis-aligned box, with rounded corners.
pub fn circle_hits_box(center: Vec2, radius: f32, box_center: Vec2, half: Vec2) -> bool {
    let d = (center - box_center).abs();
    if d.x > half.x + radius || d.y > half.y + radius {
        return false;
    }
    if d.x <= half.x || d.y <= half.y {
        return true;
    }
    (d - half).length_squared() <= radius * radius
}

/// Circle against an agent's hit-box.
pub fn circle_hits_body(center: Vec2, radius: f32, body: &Body) -> bool {
    circle_hits_box(center, radius, body.hitbox_center(), body.hitbox.half_extents())
}

/// Strict overlap of two hit-boxes. Touching edges do not count.
pub fn bodies_overlap(a: &Body, b: &Body) -> bool {
    let d = (a.hitbox_center() - b.hitbox_center()).abs();
    let reach = a.hitbox.half_extents() + b.hitbox.half_extents();
    d.x < reach.x && d.y < reach.y
}

/// Hostile projectile against the player: distance to the player position
/// below the projectile radius plus a fraction of the player's width.
pub fn circle_hits_player(center: Vec2, radius: f32, player: &PlayerState) -> bool {
    let reach = radius + player.width() * PLAYER_HIT_SCALE;
    center.distance_squared(player.pos()) < reach * reach
}

pub fn point_in_circle(point: Vec2, center: Vec2, radius: f32) -> bool {
    point.distance_squared(center) < radius * radius
}

/// Point against the rectangle spanned by the segment `start..end` with the
/// given half-height, grown by `tolerance` on every side.
pub fn point_in_segment_rect(point: Vec2, start: Vec2, end: Vec2, half_height: f32, tolerance: f32) -> bool {
    let axis = end - start;
    let half_length = axis.length() * 0.5;
    let center = (start + end) * 0.5;
    let angle = axis.y.atan2(axis.x);

    // Into the rectangle's local frame.
    let local = Vec2::from_angle(-angle).rotate(point - center);
    local.x.abs() <= half_length + tolerance && local.y.abs() <= half_height + tolerance
}
