//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One tick per displayed frame
//! - Seeded RNG only
//! - Stable iteration order (items in spawn order)
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod background;
pub mod collision;
pub mod feedback;
pub mod spawn;
pub mod state;
pub mod tick;

pub use background::{Backdrop, Building, RainDrop, Window};
pub use collision::{Outcome, classify, is_caught, is_past_bottom};
pub use state::{
    Ambience, Animation, FallingItem, GameEvent, GameMode, HitFlash, ItemKind, KIND_TABLE,
    KindSpec, Particle, Scene, Splatter, SplatterOverlay,
};
pub use tick::{TickInput, ambience_for, step, tick};
