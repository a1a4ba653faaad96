//! Per-frame simulation tick
//!
//! One call per display refresh: spawn, step, collide, then update feedback.
//! Rendering happens afterwards from the resulting state.

use rand::Rng;

use super::collision::{Outcome, classify};
use super::feedback;
use super::spawn::maybe_spawn;
use super::state::{Ambience, GameEvent, GameMode, Scene};
use crate::consts::*;

/// Host inputs for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Items spawn, move and collide only while playing
    pub is_playing: bool,
    /// Remaining lives as tracked by the host
    pub lives: u32,
    pub mode: GameMode,
    pub viewport_width: f32,
    pub viewport_height: f32,
    /// Latest pointer position; `None` keeps the catcher where it is
    pub pointer_x: Option<f32>,
}

impl TickInput {
    /// A playing input for the given viewport
    pub fn playing(viewport_width: f32, viewport_height: f32) -> Self {
        Self {
            is_playing: true,
            lives: 5,
            viewport_width,
            viewport_height,
            ..Default::default()
        }
    }
}

/// Ambient mood for the host's mode and lives
pub fn ambience_for(mode: GameMode, lives: u32) -> Ambience {
    let survival = mode == GameMode::Survival;
    Ambience {
        alarm: survival && lives > 0 && lives <= ALARM_LIVES,
        heavy_rain: survival && lives <= HEAVY_RAIN_LIVES,
    }
}

/// Advance the scene by one frame, returning the events for the host
pub fn tick(scene: &mut Scene, input: &TickInput) -> Vec<GameEvent> {
    let mut events = Vec::new();

    if !crate::is_usable_viewport(input.viewport_width, input.viewport_height) {
        return events;
    }
    scene.resize(input.viewport_width, input.viewport_height);
    if let Some(x) = input.pointer_x {
        scene.set_pointer_x(x);
    }
    scene.ambience = ambience_for(input.mode, input.lives);
    scene.anim.frame += 1;

    if input.is_playing {
        maybe_spawn(scene);
    }

    step(scene, input.is_playing);

    if input.is_playing {
        resolve_collisions(scene, &mut events);
    }

    feedback::update_particles(&mut scene.particles);

    events
}

/// Advance every transient entity by one frame
///
/// Windows, rain, the catcher animation and the splatter fade run regardless
/// of play state; items only move while playing.
pub fn step(scene: &mut Scene, is_playing: bool) {
    let (width, height) = (scene.width, scene.height);

    scene.backdrop.flicker_windows(&mut scene.rng);
    scene.backdrop.advance_rain(width, height, &mut scene.rng);

    if is_playing {
        for item in &mut scene.items {
            item.advance();
        }
    }

    // Bag relaxes back to its resting size
    scene.anim.bag_scale = (scene.anim.bag_scale - BAG_SCALE_DECAY).max(1.0);

    if scene.anim.shake_ticks > 0 {
        scene.anim.shake_offset = (scene.rng.random::<f32>() - 0.5) * SHAKE_AMPLITUDE;
        scene.anim.shake_ticks -= 1;
    } else {
        scene.anim.shake_offset = 0.0;
    }

    scene.splatter.fade();
}

/// Catch or drop items touching the bag or the bottom edge
pub fn resolve_collisions(scene: &mut Scene, events: &mut Vec<GameEvent>) {
    let bag = scene.bag_opening();
    let height = scene.height;
    let mut caught = Vec::new();

    scene.items.retain(|item| match classify(item, bag, height) {
        Outcome::InFlight => true,
        Outcome::Caught => {
            caught.push(item.clone());
            false
        }
        Outcome::Missed => {
            if !item.kind.is_penalty() {
                events.push(GameEvent::Miss);
            }
            false
        }
    });

    for item in caught {
        log::debug!("Caught {:?} #{} worth {}", item.kind, item.id, item.value);
        events.push(GameEvent::Score { delta: item.value });
        if item.kind.is_penalty() {
            events.push(GameEvent::PenaltyHit);
        }
        feedback::on_catch(scene, &item);
    }
}
