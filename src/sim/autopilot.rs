//! Idle/demo mode: steer the catcher by itself
//!
//! Chases the valuable item that will reach the bag soonest and sidesteps
//! penalty items that are about to land.

use super::state::Scene;
use crate::consts::*;

/// Max pointer travel per tick, so the demo looks like a person playing
const MAX_STEP: f32 = 12.0;
/// Penalties closer than this (vertically) to the bag are dodged
const DODGE_BAND: f32 = 140.0;

/// Pointer position the autopilot wants this tick
pub fn target_x(scene: &Scene) -> f32 {
    let bag = scene.bag_opening();
    let current = scene.anim.catcher_x;

    let ticks_to_bag = |y: f32, speed: f32| (bag.y - y) / speed.max(0.1);

    // Prefer the item that arrives first, value breaking ties
    let target = scene
        .items
        .iter()
        .filter(|i| !i.kind.is_penalty() && i.pos.y < bag.y)
        .filter(|i| {
            // Reachable before it lands
            let eta = ticks_to_bag(i.pos.y, i.speed);
            (i.pos.x - current).abs() <= eta * MAX_STEP + CATCH_TOLERANCE
        })
        .min_by(|a, b| {
            let ea = ticks_to_bag(a.pos.y, a.speed);
            let eb = ticks_to_bag(b.pos.y, b.speed);
            ea.partial_cmp(&eb)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then(b.value.cmp(&a.value))
        })
        .map(|i| i.pos.x);

    let mut goal = target.unwrap_or(scene.width / 2.0);

    // Dodge: if a penalty is landing near the goal, aim away from it
    for hazard in scene.items.iter().filter(|i| i.kind.is_penalty()) {
        let dy = bag.y - hazard.pos.y;
        let reach = hazard.radius + CATCH_TOLERANCE + MAX_STEP;
        if (0.0..DODGE_BAND).contains(&dy) && (hazard.pos.x - goal).abs() < reach {
            goal = if hazard.pos.x > goal {
                hazard.pos.x - reach
            } else {
                hazard.pos.x + reach
            };
        }
    }

    let step = (goal - current).clamp(-MAX_STEP, MAX_STEP);
    crate::clamp_catcher_x(current + step, scene.width)
}
