//! Weighted random item spawning from the vault

use glam::Vec2;
use rand::Rng;

use super::state::{FallingItem, ItemKind, KIND_TABLE, Scene};
use crate::consts::*;

/// Map a uniform roll in [0, 1) onto the cumulative kind thresholds
pub fn kind_for_roll(roll: f32) -> ItemKind {
    let mut threshold = 0.0;
    for spec in &KIND_TABLE {
        threshold += spec.weight;
        if roll < threshold {
            return spec.kind;
        }
    }
    // Float drift at the top end lands on the last bucket
    KIND_TABLE[KIND_TABLE.len() - 1].kind
}

/// Roll a full item for a viewport of the given width
pub fn roll_item(id: u32, viewport_width: f32, rng: &mut impl Rng) -> FallingItem {
    let kind = kind_for_roll(rng.random::<f32>());
    let spec = kind.spec();

    let base_speed = BASE_FALL_SPEED + rng.random::<f32>() * FALL_SPEED_JITTER;
    let usable = (viewport_width - 2.0 * SPAWN_MARGIN).max(0.0);
    let x = rng.random::<f32>() * usable + SPAWN_MARGIN;

    let spin = if spec.flat { 0.05 } else { 0.15 };

    let mut item = FallingItem::new(id, kind, Vec2::new(x, SPAWN_Y), base_speed * spec.speed_multiplier);
    item.rotation = rng.random::<f32>() * std::f32::consts::PI;
    item.rotation_speed = (rng.random::<f32>() - 0.5) * spin;
    item
}

/// Bernoulli trial: maybe drop one new item into the scene
///
/// Returns the new item's id when one spawned.
pub fn maybe_spawn(scene: &mut Scene) -> Option<u32> {
    if !scene.has_viewport() || !scene.rng.random_bool(SPAWN_CHANCE as f64) {
        return None;
    }
    let id = scene.next_entity_id();
    let item = roll_item(id, scene.width, &mut scene.rng);
    scene.items.push(item);
    Some(id)
}
