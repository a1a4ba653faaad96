//! Scene state and core simulation types
//!
//! Everything the simulation step mutates and the renderer reads lives here.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::background::Backdrop;
use crate::consts::*;

/// Falling item kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ItemKind {
    GoldCoin,
    SilverCoin,
    Gem,
    /// The harmful one
    Penalty,
    Bill,
}

/// Per-kind constants: spawn weight, fall speed multiplier, radius, value
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KindSpec {
    pub kind: ItemKind,
    pub weight: f32,
    pub speed_multiplier: f32,
    pub radius: f32,
    pub value: i64,
    /// Flat/rectangular shapes spin slower
    pub flat: bool,
}

/// Spawn table in cumulative order: a uniform roll walks these weights
pub static KIND_TABLE: [KindSpec; 5] = [
    KindSpec {
        kind: ItemKind::Penalty,
        weight: 0.20,
        speed_multiplier: 1.5,
        radius: 18.0,
        value: -2000,
        flat: false,
    },
    KindSpec {
        kind: ItemKind::Bill,
        weight: 0.15,
        speed_multiplier: 1.1,
        radius: 22.0,
        value: 2000,
        flat: true,
    },
    KindSpec {
        kind: ItemKind::Gem,
        weight: 0.10,
        speed_multiplier: 3.0,
        radius: 16.0,
        value: 30000,
        flat: false,
    },
    KindSpec {
        kind: ItemKind::SilverCoin,
        weight: 0.15,
        speed_multiplier: 1.8,
        radius: 12.0,
        value: 500,
        flat: false,
    },
    KindSpec {
        kind: ItemKind::GoldCoin,
        weight: 0.40,
        speed_multiplier: 2.0,
        radius: 20.0,
        value: 8000,
        flat: true,
    },
];

impl ItemKind {
    pub const ALL: [ItemKind; 5] = [
        ItemKind::Penalty,
        ItemKind::Bill,
        ItemKind::Gem,
        ItemKind::SilverCoin,
        ItemKind::GoldCoin,
    ];

    pub fn spec(self) -> &'static KindSpec {
        match self {
            ItemKind::Penalty => &KIND_TABLE[0],
            ItemKind::Bill => &KIND_TABLE[1],
            ItemKind::Gem => &KIND_TABLE[2],
            ItemKind::SilverCoin => &KIND_TABLE[3],
            ItemKind::GoldCoin => &KIND_TABLE[4],
        }
    }

    pub fn value(self) -> i64 {
        self.spec().value
    }

    pub fn radius(self) -> f32 {
        self.spec().radius
    }

    pub fn is_penalty(self) -> bool {
        self == ItemKind::Penalty
    }
}

/// An item falling from the vault
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FallingItem {
    pub id: u32,
    pub pos: Vec2,
    /// Pixels per tick, downward
    pub speed: f32,
    pub kind: ItemKind,
    pub value: i64,
    pub radius: f32,
    pub rotation: f32,
    pub rotation_speed: f32,
}

impl FallingItem {
    /// Build an item with the kind's table values
    pub fn new(id: u32, kind: ItemKind, pos: Vec2, speed: f32) -> Self {
        let spec = kind.spec();
        Self {
            id,
            pos,
            speed,
            kind,
            value: spec.value,
            radius: spec.radius,
            rotation: 0.0,
            rotation_speed: 0.0,
        }
    }

    /// Advance one tick of fall and spin
    pub fn advance(&mut self) {
        self.pos.y += self.speed;
        self.rotation += self.rotation_speed;
    }
}

/// A floating label or confetti dot (decorative only)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    /// 0-1, decreases every tick
    pub life: f32,
    pub color: [f32; 4],
    pub text: Option<String>,
}

impl Particle {
    /// Alpha to render with, never negative
    pub fn alpha(&self) -> f32 {
        self.life.clamp(0.0, 1.0)
    }
}

/// One decorative mark of a penalty splatter batch
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Splatter {
    pub pos: Vec2,
    pub scale: f32,
    pub rotation: f32,
}

/// Screen overlay triggered by a penalty hit
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SplatterOverlay {
    /// 1 right after a hit, fades to 0
    pub opacity: f32,
    pub marks: Vec<Splatter>,
}

impl SplatterOverlay {
    pub fn is_visible(&self) -> bool {
        self.opacity > 0.0
    }

    /// Fade one tick; the batch is discarded once fully transparent
    pub fn fade(&mut self) {
        if self.opacity <= 0.0 {
            return;
        }
        self.opacity = (self.opacity - SPLATTER_FADE).max(0.0);
        if self.opacity == 0.0 {
            self.marks.clear();
        }
    }
}

/// Good/bad tint applied to the bag right after a catch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HitFlash {
    Good,
    Bad,
}

/// Catcher animation scalars shared between simulation and renderer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Animation {
    /// Catcher horizontal center, clamped to the viewport
    pub catcher_x: f32,
    /// Bag squash scale, relaxes toward 1
    pub bag_scale: f32,
    /// Frames of shake remaining
    pub shake_ticks: u32,
    /// Horizontal jitter while shaking
    pub shake_offset: f32,
    pub hit_flash: Option<HitFlash>,
    /// Frames since the scene was created (drives blink cadences)
    pub frame: u64,
}

impl Default for Animation {
    fn default() -> Self {
        Self {
            catcher_x: 0.0,
            bag_scale: 1.0,
            shake_ticks: 0,
            shake_offset: 0.0,
            hit_flash: None,
            frame: 0,
        }
    }
}

impl Animation {
    pub fn is_shaking(&self) -> bool {
        self.shake_ticks > 0
    }

    /// Flash tint to draw the bag with, if the pop is still fresh
    pub fn visible_flash(&self) -> Option<HitFlash> {
        self.hit_flash.filter(|_| self.bag_scale > HIT_FLASH_MIN_SCALE)
    }
}

/// Ambient mood derived from the host's mode and lives each tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ambience {
    /// Bank alarm is sounding (last life in Survival)
    pub alarm: bool,
    /// Every rain drop is drawn instead of roughly half
    pub heavy_rain: bool,
}

/// Host game mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GameMode {
    #[default]
    Timed,
    Survival,
}

/// Events raised to the host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// An item was caught; `delta` is its signed value
    Score { delta: i64 },
    /// A non-penalty item fell past the bottom
    Miss,
    /// The penalty item was caught
    PenaltyHit,
}

/// Complete scene for one canvas session
#[derive(Debug, Clone)]
pub struct Scene {
    pub seed: u64,
    pub rng: Pcg32,
    pub width: f32,
    pub height: f32,
    pub items: Vec<FallingItem>,
    pub particles: Vec<Particle>,
    pub splatter: SplatterOverlay,
    pub backdrop: Backdrop,
    pub anim: Animation,
    pub ambience: Ambience,
    /// Live particle cap (quality setting)
    pub max_particles: usize,
    /// Confetti bursts on valuable catches
    pub confetti: bool,
    next_id: u32,
}

impl Scene {
    /// Create an empty scene; call `resize` before ticking
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            width: 0.0,
            height: 0.0,
            items: Vec::new(),
            particles: Vec::new(),
            splatter: SplatterOverlay::default(),
            backdrop: Backdrop::default(),
            anim: Animation::default(),
            ambience: Ambience::default(),
            max_particles: crate::QualityPreset::default().max_particles(),
            confetti: true,
            next_id: 1,
        }
    }

    /// Create a scene already sized to the viewport
    pub fn with_viewport(seed: u64, width: f32, height: f32) -> Self {
        let mut scene = Self::new(seed);
        scene.resize(width, height);
        scene
    }

    /// Apply the quality-dependent knobs from host settings
    pub fn apply_settings(&mut self, settings: &crate::Settings) {
        self.max_particles = settings.max_particles();
        self.confetti = settings.confetti;
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id = self.next_id.wrapping_add(1);
        id
    }

    pub fn has_viewport(&self) -> bool {
        crate::is_usable_viewport(self.width, self.height)
    }

    /// Adopt new viewport dimensions
    ///
    /// Regenerates the skyline and rain and re-centers the catcher. Transient
    /// effects are reset. Zero-area and non-finite viewports are ignored.
    pub fn resize(&mut self, width: f32, height: f32) {
        if !crate::is_usable_viewport(width, height) {
            log::debug!("Ignoring unusable viewport {}x{}", width, height);
            return;
        }
        if width == self.width && height == self.height {
            return;
        }
        self.width = width;
        self.height = height;
        self.backdrop = Backdrop::generate(width, height, &mut self.rng);
        self.anim = Animation {
            catcher_x: width / 2.0,
            ..Animation::default()
        };
        self.splatter = SplatterOverlay::default();
        log::info!(
            "Viewport {}x{}: {} buildings, {} rain drops",
            width,
            height,
            self.backdrop.buildings.len(),
            self.backdrop.rain.len()
        );
    }

    /// Move the catcher toward a pointer position, clamped to the viewport
    pub fn set_pointer_x(&mut self, x: f32) {
        self.anim.catcher_x = crate::clamp_catcher_x(x, self.width);
    }

    /// Reference point of the catcher figure (top of the torso)
    pub fn catcher_y(&self) -> f32 {
        self.height - CATCHER_HEIGHT + 10.0
    }

    /// Point items must reach to be caught, following the shake
    pub fn bag_opening(&self) -> Vec2 {
        Vec2::new(
            self.anim.catcher_x + self.anim.shake_offset,
            self.catcher_y() - BAG_OPENING_OFFSET,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_table_weights_sum_to_one() {
        let total: f32 = KIND_TABLE.iter().map(|k| k.weight).sum();
        assert!((total - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_kind_values_signed() {
        for kind in ItemKind::ALL {
            assert!(kind.radius() > 0.0);
            if kind.is_penalty() {
                assert!(kind.value() < 0);
            } else {
                assert!(kind.value() > 0);
            }
            assert_eq!(kind.spec().kind, kind);
        }
    }

    #[test]
    fn test_resize_ignores_zero_area() {
        let mut scene = Scene::new(1);
        scene.resize(0.0, 600.0);
        assert!(!scene.has_viewport());
        assert!(scene.backdrop.buildings.is_empty());

        scene.resize(400.0, 600.0);
        assert!(scene.has_viewport());
        assert_eq!(scene.anim.catcher_x, 200.0);
        assert_eq!(scene.bag_opening(), Vec2::new(200.0, 510.0));
    }

    #[test]
    fn test_resize_ignores_non_finite() {
        let mut scene = Scene::new(1);
        scene.resize(f32::NAN, 600.0);
        scene.resize(400.0, f32::INFINITY);
        scene.resize(f32::INFINITY, f32::INFINITY);
        assert!(!scene.has_viewport());
        assert_eq!(scene.width, 0.0);
        assert_eq!(scene.height, 0.0);
        scene.set_pointer_x(10.0);
        assert_eq!(scene.anim.catcher_x, 0.0);

        let mut scene = Scene::with_viewport(1, 400.0, 600.0);
        scene.resize(f32::NAN, f32::NAN);
        assert_eq!((scene.width, scene.height), (400.0, 600.0));
        scene.set_pointer_x(10.0);
        assert_eq!(scene.anim.catcher_x, CATCHER_HALF_WIDTH);
    }

    #[test]
    fn test_resize_same_size_is_stable() {
        let mut scene = Scene::with_viewport(7, 400.0, 600.0);
        let before: Vec<f32> = scene.backdrop.buildings.iter().map(|b| b.width).collect();
        scene.resize(400.0, 600.0);
        let after: Vec<f32> = scene.backdrop.buildings.iter().map(|b| b.width).collect();
        assert_eq!(before, after);
    }

    #[test]
    fn test_splatter_fades_then_clears() {
        let mut overlay = SplatterOverlay {
            opacity: 0.02,
            marks: vec![Splatter {
                pos: Vec2::ZERO,
                scale: 2.0,
                rotation: 0.0,
            }],
        };
        overlay.fade();
        assert!(overlay.is_visible());
        overlay.fade();
        assert!(!overlay.is_visible());
        assert!(overlay.marks.is_empty());
    }

    #[test]
    fn test_flash_only_while_inflated() {
        let mut anim = Animation {
            hit_flash: Some(HitFlash::Good),
            bag_scale: 1.3,
            ..Animation::default()
        };
        assert_eq!(anim.visible_flash(), Some(HitFlash::Good));
        anim.bag_scale = 1.0;
        assert_eq!(anim.visible_flash(), None);
    }
}
