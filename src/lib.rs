//! Money Catcher - A rainy-night bank heist arcade catcher
//!
//! Core modules:
//! - `sim`: Deterministic simulation (spawning, motion, catches, effects)
//! - `renderer`: Drawing surfaces, frame composition and the WebGPU pipeline
//! - `platform`: Frame loop scheduling and cancellation
//! - `settings`: Host-supplied configuration

pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use settings::{QualityPreset, Settings, SettingsError};

/// Game configuration constants
pub mod consts {
    /// Per-tick probability of a new item leaving the vault
    pub const SPAWN_CHANCE: f32 = 0.035;
    /// Base fall speed (pixels per tick) before the kind multiplier
    pub const BASE_FALL_SPEED: f32 = 3.0;
    /// Upper bound of the random jitter added to the base fall speed
    pub const FALL_SPEED_JITTER: f32 = 0.5;
    /// Horizontal margin kept free on both sides when spawning
    pub const SPAWN_MARGIN: f32 = 30.0;

    /// Bank facade
    pub const BANK_HEIGHT: f32 = 100.0;
    pub const BANK_ROOF_TOP: f32 = 10.0;
    pub const BANK_ROOF_BOTTOM: f32 = 50.0;
    pub const BANK_PILLAR_COUNT: usize = 6;
    pub const BANK_PILLAR_WIDTH: f32 = 20.0;
    /// Items appear from inside the vault
    pub const SPAWN_Y: f32 = BANK_HEIGHT - 20.0;

    /// Catcher (the thief) dimensions
    pub const CATCHER_WIDTH: f32 = 70.0;
    pub const CATCHER_HALF_WIDTH: f32 = CATCHER_WIDTH / 2.0;
    pub const CATCHER_HEIGHT: f32 = 90.0;
    /// Bag opening sits this far above the catcher's reference point
    pub const BAG_OPENING_OFFSET: f32 = 10.0;
    /// Effective mouth radius of the bag added to an item's radius
    pub const CATCH_TOLERANCE: f32 = 40.0;
    /// Items further than this below the viewport are gone
    pub const MISS_MARGIN: f32 = 20.0;

    /// Bag squash/shake animation
    pub const BAG_POP_SCALE: f32 = 1.3;
    pub const BAG_SCALE_DECAY: f32 = 0.05;
    /// Hit flash tints the bag only while it is this inflated
    pub const HIT_FLASH_MIN_SCALE: f32 = 1.05;
    pub const SHAKE_FRAMES: u32 = 20;
    pub const SHAKE_AMPLITUDE: f32 = 10.0;

    /// Particles
    pub const PARTICLE_LIFE_STEP: f32 = 0.02;
    pub const TEXT_PARTICLE_RISE: f32 = 20.0;

    /// Splatter overlay
    pub const SPLATTER_COUNT: usize = 6;
    pub const SPLATTER_FADE: f32 = 0.015;

    /// Ambient backdrop
    pub const RAIN_DROP_COUNT: usize = 100;
    pub const RAIN_RESPAWN_Y: f32 = -20.0;
    pub const WINDOW_OFF_CHANCE: f64 = 0.005;
    pub const WINDOW_ON_CHANCE: f64 = 0.001;
    pub const BUILDING_OVERLAP: f32 = 5.0;
    /// Frames per alarm blink phase
    pub const ALARM_BLINK_FRAMES: u64 = 10;
    /// Survival lives at or below which the alarm sounds
    pub const ALARM_LIVES: u32 = 1;
    /// Survival lives at or below which the rain gets heavy
    pub const HEAVY_RAIN_LIVES: u32 = 2;
}

/// True for a viewport with finite, positive area
///
/// NaN and infinite sizes count as unusable alongside zero-area ones.
#[inline]
pub fn is_usable_viewport(width: f32, height: f32) -> bool {
    width > 0.0 && height > 0.0 && width.is_finite() && height.is_finite()
}

/// Clamp a horizontal pointer position so the catcher stays fully on screen
///
/// Degenerate viewports narrower than the catcher pin it to the center.
#[inline]
pub fn clamp_catcher_x(x: f32, viewport_width: f32) -> f32 {
    let half = consts::CATCHER_HALF_WIDTH;
    if viewport_width.is_nan() || viewport_width <= consts::CATCHER_WIDTH {
        return viewport_width.max(0.0) / 2.0;
    }
    if x.is_nan() {
        return viewport_width / 2.0;
    }
    x.clamp(half, viewport_width - half)
}

/// Format a money amount with thousands separators, e.g. `8000` -> `8,000`
pub fn format_money(amount: i64) -> String {
    let digits = amount.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if amount < 0 {
        out.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_format_money() {
        assert_eq!(format_money(0), "0");
        assert_eq!(format_money(500), "500");
        assert_eq!(format_money(8000), "8,000");
        assert_eq!(format_money(30000), "30,000");
        assert_eq!(format_money(1234567), "1,234,567");
        assert_eq!(format_money(-2000), "-2,000");
    }

    #[test]
    fn test_clamp_narrow_viewport() {
        assert_eq!(clamp_catcher_x(10.0, 50.0), 25.0);
        assert_eq!(clamp_catcher_x(10.0, 0.0), 0.0);
    }

    #[test]
    fn test_clamp_non_finite_viewport() {
        assert_eq!(clamp_catcher_x(10.0, f32::NAN), 0.0);
        assert_eq!(clamp_catcher_x(10.0, f32::INFINITY), consts::CATCHER_HALF_WIDTH);
        assert_eq!(clamp_catcher_x(500.0, f32::INFINITY), 500.0);
        assert_eq!(clamp_catcher_x(10.0, f32::NEG_INFINITY), 0.0);
    }

    #[test]
    fn test_usable_viewport() {
        assert!(is_usable_viewport(400.0, 600.0));
        assert!(!is_usable_viewport(0.0, 600.0));
        assert!(!is_usable_viewport(400.0, -1.0));
        assert!(!is_usable_viewport(f32::INFINITY, 600.0));
        assert!(!is_usable_viewport(400.0, f32::NAN));
    }

    proptest! {
        #[test]
        fn clamp_keeps_catcher_on_screen(x in -5000.0f32..5000.0, width in 71.0f32..4000.0) {
            let clamped = clamp_catcher_x(x, width);
            prop_assert!(clamped >= consts::CATCHER_HALF_WIDTH);
            prop_assert!(clamped <= width - consts::CATCHER_HALF_WIDTH);
        }

        #[test]
        fn clamp_never_panics(x in proptest::num::f32::ANY, width in proptest::num::f32::ANY) {
            let clamped = clamp_catcher_x(x, width);
            if width > consts::CATCHER_WIDTH && !x.is_nan() {
                prop_assert!(clamped >= consts::CATCHER_HALF_WIDTH);
            }
        }
    }
}
