//! Visual feedback: floating labels, confetti, bag pop/shake, splatter overlay

use glam::Vec2;
use rand::Rng;

use super::state::{FallingItem, HitFlash, ItemKind, Particle, Scene, Splatter};
use crate::consts::*;
use crate::format_money;

/// Particle palette
pub mod colors {
    pub const LABEL_GOOD: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
    pub const LABEL_BAD: [f32; 4] = [0.937, 0.267, 0.267, 1.0];
    pub const CONFETTI_GOLD: [[f32; 4]; 2] = [[1.0, 0.843, 0.0, 1.0], [0.988, 0.827, 0.302, 1.0]];
    pub const CONFETTI_GEM: [[f32; 4]; 3] = [
        [0.231, 0.510, 0.965, 1.0],
        [0.376, 0.647, 0.980, 1.0],
        [1.0, 1.0, 1.0, 1.0],
    ];
}

/// React to a caught item at its last position
pub fn on_catch(scene: &mut Scene, item: &FallingItem) {
    scene.anim.bag_scale = BAG_POP_SCALE;
    if item.kind.is_penalty() {
        penalty_feedback(scene, item);
    } else {
        reward_feedback(scene, item);
    }
}

fn reward_feedback(scene: &mut Scene, item: &FallingItem) {
    scene.anim.hit_flash = Some(HitFlash::Good);
    push_particle(
        scene,
        Particle {
            pos: item.pos - Vec2::new(0.0, TEXT_PARTICLE_RISE),
            vel: Vec2::new(0.0, -1.0),
            life: 1.0,
            color: colors::LABEL_GOOD,
            text: Some(format!("+${}", format_money(item.value))),
        },
    );

    if !scene.confetti {
        return;
    }
    match item.kind {
        ItemKind::Bill | ItemKind::GoldCoin => {
            confetti_burst(scene, item.pos, 5, 30f32.to_radians(), &colors::CONFETTI_GOLD)
        }
        ItemKind::Gem => confetti_burst(scene, item.pos, 15, 40f32.to_radians(), &colors::CONFETTI_GEM),
        _ => {}
    }
}

fn penalty_feedback(scene: &mut Scene, item: &FallingItem) {
    scene.anim.hit_flash = Some(HitFlash::Bad);
    scene.anim.shake_ticks = SHAKE_FRAMES;
    push_particle(
        scene,
        Particle {
            pos: item.pos - Vec2::new(0.0, TEXT_PARTICLE_RISE),
            vel: Vec2::new(0.0, -2.0),
            life: 1.0,
            color: colors::LABEL_BAD,
            text: Some(format!("OOPS! -${}", format_money(item.value.abs()))),
        },
    );
    trigger_splatter(scene);
}

/// Start a fresh splatter batch covering the viewport
pub fn trigger_splatter(scene: &mut Scene) {
    let (w, h) = (scene.width, scene.height);
    let rng = &mut scene.rng;
    scene.splatter.opacity = 1.0;
    scene.splatter.marks = (0..SPLATTER_COUNT)
        .map(|_| Splatter {
            pos: Vec2::new(rng.random::<f32>() * w, rng.random::<f32>() * h),
            scale: rng.random_range(2.0..5.0),
            rotation: rng.random::<f32>() - 0.5,
        })
        .collect();
}

/// Spray untexted dots upward in a cone around vertical
fn confetti_burst(scene: &mut Scene, origin: Vec2, count: usize, spread: f32, palette: &[[f32; 4]]) {
    for i in 0..count {
        let angle = -std::f32::consts::FRAC_PI_2 + (scene.rng.random::<f32>() - 0.5) * spread * 2.0;
        let speed = scene.rng.random_range(2.0..5.0);
        let color = palette[i % palette.len()];
        push_particle(
            scene,
            Particle {
                pos: origin,
                vel: Vec2::new(angle.cos(), angle.sin()) * speed,
                life: 1.0,
                color,
                text: None,
            },
        );
    }
}

/// Add a particle unless the quality cap is reached (labels always win a slot)
fn push_particle(scene: &mut Scene, particle: Particle) {
    if scene.particles.len() >= scene.max_particles {
        if particle.text.is_none() {
            return;
        }
        if let Some(idx) = scene.particles.iter().position(|p| p.text.is_none()) {
            scene.particles.remove(idx);
        } else {
            return;
        }
    }
    scene.particles.push(particle);
}

/// Integrate particles one tick and drop the dead ones
pub fn update_particles(particles: &mut Vec<Particle>) {
    for p in particles.iter_mut() {
        p.pos += p.vel;
        p.life -= PARTICLE_LIFE_STEP;
    }
    particles.retain(|p| p.life > 0.0);
}

/// Whether the alarm windows are in their red phase this frame
pub fn alarm_lit(scene: &Scene) -> bool {
    scene.ambience.alarm && (scene.anim.frame / ALARM_BLINK_FRAMES) % 2 == 0
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn item(kind: ItemKind) -> FallingItem {
        FallingItem::new(1, kind, Vec2::new(100.0, 300.0), 3.0)
    }

    #[test]
    fn test_reward_catch_feedback() {
        let mut scene = Scene::with_viewport(1, 400.0, 600.0);
        on_catch(&mut scene, &item(ItemKind::GoldCoin));

        assert_eq!(scene.anim.bag_scale, BAG_POP_SCALE);
        assert_eq!(scene.anim.hit_flash, Some(HitFlash::Good));
        assert_eq!(scene.anim.shake_ticks, 0);
        assert!(!scene.splatter.is_visible());

        let labels: Vec<_> = scene.particles.iter().filter_map(|p| p.text.as_deref()).collect();
        assert_eq!(labels, vec!["+$8,000"]);
        // Label plus gold confetti
        assert_eq!(scene.particles.len(), 6);
        assert_eq!(scene.particles[0].pos, Vec2::new(100.0, 280.0));
    }

    #[test]
    fn test_gem_confetti_and_silver_without() {
        let mut scene = Scene::with_viewport(1, 400.0, 600.0);
        on_catch(&mut scene, &item(ItemKind::Gem));
        assert_eq!(scene.particles.len(), 16);

        scene.particles.clear();
        on_catch(&mut scene, &item(ItemKind::SilverCoin));
        assert_eq!(scene.particles.len(), 1);
    }

    #[test]
    fn test_confetti_disabled() {
        let mut scene = Scene::with_viewport(1, 400.0, 600.0);
        scene.confetti = false;
        on_catch(&mut scene, &item(ItemKind::Gem));
        assert_eq!(scene.particles.len(), 1);
    }

    #[test]
    fn test_penalty_feedback() {
        let mut scene = Scene::with_viewport(1, 400.0, 600.0);
        on_catch(&mut scene, &item(ItemKind::Penalty));

        assert_eq!(scene.anim.hit_flash, Some(HitFlash::Bad));
        assert_eq!(scene.anim.shake_ticks, SHAKE_FRAMES);
        assert_eq!(scene.splatter.opacity, 1.0);
        assert_eq!(scene.splatter.marks.len(), SPLATTER_COUNT);
        for mark in &scene.splatter.marks {
            assert!(mark.pos.x >= 0.0 && mark.pos.x <= 400.0);
            assert!(mark.pos.y >= 0.0 && mark.pos.y <= 600.0);
            assert!((2.0..5.0).contains(&mark.scale));
            assert!(mark.rotation.abs() <= 0.5);
        }
        assert_eq!(scene.particles.len(), 1);
        assert_eq!(scene.particles[0].text.as_deref(), Some("OOPS! -$2,000"));
        assert_eq!(scene.particles[0].color, colors::LABEL_BAD);
    }

    #[test]
    fn test_particle_cap_keeps_labels() {
        let mut scene = Scene::with_viewport(1, 400.0, 600.0);
        scene.max_particles = 4;
        on_catch(&mut scene, &item(ItemKind::Gem));
        assert_eq!(scene.particles.len(), 4);

        on_catch(&mut scene, &item(ItemKind::SilverCoin));
        assert_eq!(scene.particles.len(), 4);
        let labels = scene.particles.iter().filter(|p| p.text.is_some()).count();
        assert_eq!(labels, 2);
    }

    #[test]
    fn test_alarm_blinks() {
        let mut scene = Scene::with_viewport(1, 400.0, 600.0);
        scene.ambience.alarm = true;
        scene.anim.frame = 0;
        assert!(alarm_lit(&scene));
        scene.anim.frame = ALARM_BLINK_FRAMES;
        assert!(!alarm_lit(&scene));
        scene.anim.frame = ALARM_BLINK_FRAMES * 2 + 3;
        assert!(alarm_lit(&scene));

        scene.ambience.alarm = false;
        scene.anim.frame = 0;
        assert!(!alarm_lit(&scene));
    }

    proptest! {
        #[test]
        fn particle_life_strictly_decreases(life in 0.001f32..1.0, vx in -5.0f32..5.0, vy in -5.0f32..5.0) {
            let mut particles = vec![Particle {
                pos: Vec2::ZERO,
                vel: Vec2::new(vx, vy),
                life,
                color: colors::LABEL_GOOD,
                text: None,
            }];
            let mut last = life;
            for _ in 0..100 {
                update_particles(&mut particles);
                match particles.first() {
                    Some(p) => {
                        prop_assert!(p.life < last);
                        prop_assert!(p.life > 0.0);
                        prop_assert!(p.alpha() >= 0.0);
                        last = p.life;
                    }
                    None => {
                        prop_assert!(last - PARTICLE_LIFE_STEP <= 0.0);
                        break;
                    }
                }
            }
            prop_assert!(particles.is_empty());
        }
    }
}
