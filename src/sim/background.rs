//! Procedural city backdrop: skyline with flickering windows and a rain field
//!
//! Generated once per viewport size. The layout is stable between resizes;
//! only window lights and rain drops change from tick to tick.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Window grid spacing inside a building
const WINDOW_STEP_X: f32 = 12.0;
const WINDOW_STEP_Y: f32 = 15.0;
const WINDOW_INSET_X: f32 = 5.0;
const WINDOW_INSET_Y: f32 = 10.0;
/// Chance that a grid cell holds a window at all
const WINDOW_PRESENCE: f64 = 0.6;

/// A single window, positioned relative to its building's top-left corner
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Window {
    pub offset: Vec2,
    pub lit: bool,
}

/// A skyline building standing on the bottom edge of the viewport
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Building {
    pub x: f32,
    pub width: f32,
    pub height: f32,
    pub windows: Vec<Window>,
}

/// A falling rain streak
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RainDrop {
    pub pos: Vec2,
    pub length: f32,
    /// Pixels per tick
    pub speed: f32,
    pub opacity: f32,
}

/// Skyline plus rain for one viewport size
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Backdrop {
    pub buildings: Vec<Building>,
    pub rain: Vec<RainDrop>,
}

impl Backdrop {
    /// Build a fresh backdrop for the given viewport
    ///
    /// Callers must not pass a zero-area or non-finite viewport; an empty
    /// backdrop comes back if they do.
    pub fn generate(width: f32, height: f32, rng: &mut impl Rng) -> Self {
        if !crate::is_usable_viewport(width, height) {
            return Self::default();
        }
        Self {
            buildings: generate_skyline(width, rng),
            rain: generate_rain(width, height, rng),
        }
    }

    /// Toggle window lights: lit windows rarely go dark, dark ones rarely light up
    pub fn flicker_windows(&mut self, rng: &mut impl Rng) {
        for building in &mut self.buildings {
            for window in &mut building.windows {
                let flip = if window.lit {
                    WINDOW_OFF_CHANCE
                } else {
                    WINDOW_ON_CHANCE
                };
                if rng.random_bool(flip) {
                    window.lit = !window.lit;
                }
            }
        }
    }

    /// Advance rain; drops leaving the bottom wrap to the top at a new x
    pub fn advance_rain(&mut self, width: f32, height: f32, rng: &mut impl Rng) {
        for drop in &mut self.rain {
            drop.pos.y += drop.speed;
            if drop.pos.y > height {
                drop.pos.y = RAIN_RESPAWN_Y;
                drop.pos.x = rng.random::<f32>() * width;
            }
        }
    }
}

/// Tile buildings with slight overlap until the width is covered
pub fn generate_skyline(width: f32, rng: &mut impl Rng) -> Vec<Building> {
    let mut buildings = Vec::new();
    if !width.is_finite() {
        return buildings;
    }
    let mut x = 0.0;
    while x < width {
        let w = rng.random_range(30.0..90.0);
        let h = rng.random_range(100.0..300.0);

        let mut windows = Vec::new();
        let mut wy = WINDOW_INSET_Y;
        while wy < h - WINDOW_INSET_Y {
            let mut wx = WINDOW_INSET_X;
            while wx < w - WINDOW_INSET_X {
                if rng.random_bool(WINDOW_PRESENCE) {
                    windows.push(Window {
                        offset: Vec2::new(wx, wy),
                        lit: rng.random_bool(0.5),
                    });
                }
                wx += WINDOW_STEP_X;
            }
            wy += WINDOW_STEP_Y;
        }

        buildings.push(Building {
            x,
            width: w,
            height: h,
            windows,
        });
        x += w - BUILDING_OVERLAP;
    }
    buildings
}

/// Scatter a fixed number of rain drops over the viewport
pub fn generate_rain(width: f32, height: f32, rng: &mut impl Rng) -> Vec<RainDrop> {
    (0..RAIN_DROP_COUNT)
        .map(|_| RainDrop {
            pos: Vec2::new(rng.random::<f32>() * width, rng.random::<f32>() * height),
            length: rng.random_range(10.0..30.0),
            speed: rng.random_range(10.0..20.0),
            opacity: rng.random_range(0.1..0.4),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_skyline_covers_width() {
        let mut rng = Pcg32::seed_from_u64(3);
        let buildings = generate_skyline(800.0, &mut rng);
        assert!(!buildings.is_empty());

        let last = buildings.last().unwrap();
        assert!(last.x + last.width >= 800.0);
        for pair in buildings.windows(2) {
            // Neighbours overlap slightly
            assert!(pair[1].x < pair[0].x + pair[0].width);
        }
        for b in &buildings {
            assert!((30.0..90.0).contains(&b.width));
            assert!((100.0..300.0).contains(&b.height));
            for w in &b.windows {
                assert!(w.offset.x < b.width && w.offset.y < b.height);
            }
        }
    }

    #[test]
    fn test_rain_parameters() {
        let mut rng = Pcg32::seed_from_u64(4);
        let rain = generate_rain(400.0, 600.0, &mut rng);
        assert_eq!(rain.len(), RAIN_DROP_COUNT);
        for drop in &rain {
            assert!((10.0..30.0).contains(&drop.length));
            assert!((10.0..20.0).contains(&drop.speed));
            assert!((0.1..0.4).contains(&drop.opacity));
            assert!(drop.pos.x >= 0.0 && drop.pos.x <= 400.0);
        }
    }

    #[test]
    fn test_rain_wraps_to_top() {
        let mut rng = Pcg32::seed_from_u64(5);
        let mut backdrop = Backdrop {
            buildings: Vec::new(),
            rain: vec![RainDrop {
                pos: Vec2::new(10.0, 595.0),
                length: 20.0,
                speed: 10.0,
                opacity: 0.2,
            }],
        };
        backdrop.advance_rain(400.0, 600.0, &mut rng);
        assert_eq!(backdrop.rain[0].pos.y, RAIN_RESPAWN_Y);

        backdrop.advance_rain(400.0, 600.0, &mut rng);
        assert_eq!(backdrop.rain[0].pos.y, RAIN_RESPAWN_Y + 10.0);
    }

    #[test]
    fn test_zero_viewport_yields_empty_backdrop() {
        let mut rng = Pcg32::seed_from_u64(6);
        let backdrop = Backdrop::generate(0.0, 0.0, &mut rng);
        assert!(backdrop.buildings.is_empty());
        assert!(backdrop.rain.is_empty());

        let backdrop = Backdrop::generate(f32::INFINITY, 600.0, &mut rng);
        assert!(backdrop.buildings.is_empty());
        assert!(backdrop.rain.is_empty());
        assert!(generate_skyline(f32::INFINITY, &mut rng).is_empty());
        assert!(generate_skyline(f32::NAN, &mut rng).is_empty());
    }

    #[test]
    fn test_windows_flicker_over_time() {
        let mut rng = Pcg32::seed_from_u64(8);
        let mut backdrop = Backdrop::generate(1200.0, 800.0, &mut rng);
        let lit_before: usize = backdrop
            .buildings
            .iter()
            .flat_map(|b| &b.windows)
            .filter(|w| w.lit)
            .count();
        let mut changed = false;
        for _ in 0..200 {
            backdrop.flicker_windows(&mut rng);
            let lit: usize = backdrop
                .buildings
                .iter()
                .flat_map(|b| &b.windows)
                .filter(|w| w.lit)
                .count();
            changed |= lit != lit_before;
        }
        assert!(changed);
    }
}
