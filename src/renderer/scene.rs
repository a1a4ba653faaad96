//! Frame composition
//!
//! Draws the scene back to front: backdrop, bank facade, thief, falling
//! items, particles and the splatter overlay. Rendering never mutates the
//! simulation; per-frame flicker comes from a hash of the frame counter.

use glam::Vec2;
use std::f32::consts::{PI, TAU};

use super::items::{draw_item, draw_penalty_blob};
use super::surface::{Surface, with_alpha};
use super::vertex::colors;
use crate::Settings;
use crate::consts::*;
use crate::sim::feedback::alarm_lit;
use crate::sim::{HitFlash, Scene};

const PARALLAX_FACTOR: f32 = 0.05;
const WINDOW_SIZE: Vec2 = Vec2::new(4.0, 6.0);
const PARTICLE_TEXT_SIZE: f32 = 22.0;
const PARTICLE_DOT_RADIUS: f32 = 4.0;
const SPLATTER_BASE_SCALE: f32 = 1.5;

/// Stateless per-frame noise in 0..1 for (frame, index)
#[inline]
fn frame_noise(frame: u64, index: usize, salt: u32) -> f32 {
    let mut h = (frame as u32)
        .wrapping_mul(2654435761)
        .wrapping_add((index as u32).wrapping_mul(0x9E37_79B9))
        .wrapping_add(salt);
    h ^= h >> 15;
    h = h.wrapping_mul(2654435761);
    h ^= h >> 13;
    (h & 0xFFFF) as f32 / 65536.0
}

/// Draw one frame of the scene
///
/// Returns `false` (and draws nothing) when there is no surface, the surface
/// has no area yet, or the scene has no viewport.
pub fn render(scene: &Scene, settings: &Settings, surface: Option<&mut dyn Surface>) -> bool {
    let Some(surface) = surface else {
        log::debug!("No drawing surface; skipping frame");
        return false;
    };
    if !surface.is_ready() || !scene.has_viewport() {
        log::debug!("Drawing surface not ready; skipping frame");
        return false;
    }

    draw_sky(scene, surface);
    draw_skyline(scene, settings, surface);
    if settings.rain {
        draw_rain(scene, surface);
    }
    draw_bank(scene, surface);
    draw_thief(scene, settings, surface);

    for item in &scene.items {
        surface.save();
        surface.translate(item.pos);
        surface.rotate(item.rotation);
        draw_item(surface, item);
        surface.restore();
    }

    draw_particles(scene, surface);
    draw_splatter(scene, settings, surface);
    true
}

fn draw_sky(scene: &Scene, surface: &mut dyn Surface) {
    surface.fill_rect(Vec2::ZERO, Vec2::new(scene.width, scene.height), colors::SKY);
}

fn draw_skyline(scene: &Scene, settings: &Settings, surface: &mut dyn Surface) {
    let drift = if settings.parallax {
        (scene.anim.catcher_x - scene.width / 2.0) * PARALLAX_FACTOR
    } else {
        0.0
    };
    let frame = scene.anim.frame;

    for (i, building) in scene.backdrop.buildings.iter().enumerate() {
        let shift = if i % 2 == 0 { drift } else { -drift };
        let top_left = Vec2::new(building.x + shift, scene.height - building.height);
        surface.fill_rect(top_left, Vec2::new(building.width, building.height), colors::BUILDING);

        let tone = if i % 3 == 0 {
            colors::WINDOW_WARM
        } else {
            colors::WINDOW_COOL
        };
        for (j, window) in building.windows.iter().enumerate().filter(|(_, w)| w.lit) {
            let glow = 0.6 + frame_noise(frame, i * 1024 + j, 0x5EED) * 0.4;
            surface.fill_rect(top_left + window.offset, WINDOW_SIZE, with_alpha(tone, glow));
        }
    }
}

fn draw_rain(scene: &Scene, surface: &mut dyn Surface) {
    let frame = scene.anim.frame;
    for (i, drop) in scene.backdrop.rain.iter().enumerate() {
        // Light rain draws roughly half the field each frame
        if !scene.ambience.heavy_rain && frame_noise(frame, i, 0xDA7A) < 0.5 {
            continue;
        }
        let tail = drop.pos + Vec2::new(-2.0, drop.length);
        surface.stroke_line(drop.pos, tail, 1.0, with_alpha(colors::RAIN, drop.opacity));
    }
}

fn draw_bank(scene: &Scene, surface: &mut dyn Surface) {
    let w = scene.width;
    let spacing = w / BANK_PILLAR_COUNT as f32;

    for i in 0..=BANK_PILLAR_COUNT {
        surface.fill_rect(
            Vec2::new(i as f32 * spacing - BANK_PILLAR_WIDTH / 2.0, BANK_ROOF_BOTTOM),
            Vec2::new(BANK_PILLAR_WIDTH, BANK_HEIGHT),
            colors::PILLAR,
        );
    }

    surface.fill_rect(
        Vec2::new(0.0, BANK_ROOF_TOP),
        Vec2::new(w, BANK_ROOF_BOTTOM - BANK_ROOF_TOP),
        colors::ROOF,
    );

    let alarm = alarm_lit(scene);
    for i in 0..BANK_PILLAR_COUNT {
        let wx = i as f32 * spacing + (spacing - BANK_PILLAR_WIDTH) / 2.0;
        let ww = spacing - BANK_PILLAR_WIDTH * 2.0;
        let min = Vec2::new(wx - ww / 4.0, 60.0);
        let size = Vec2::new(ww / 2.0, 30.0);
        if alarm {
            // Soft glow behind the red glass
            surface.fill_rect(min - Vec2::splat(6.0), size + Vec2::splat(12.0), with_alpha(colors::ALARM, 0.3));
            surface.fill_rect(min, size, colors::ALARM);
        } else {
            surface.fill_rect(min, size, colors::BANK_GLASS);
        }
    }

    surface.fill_rect(Vec2::new(w / 2.0 - 60.0, 20.0), Vec2::new(120.0, 25.0), colors::SIGN);
    surface.text("CENTRAL BANK", Vec2::new(w / 2.0, 32.5), 12.0, colors::SIGN_TEXT);

    surface.fill_rect(Vec2::new(0.0, BANK_HEIGHT), Vec2::new(w, 20.0), colors::BANK_SHADOW);
}

fn draw_thief(scene: &Scene, settings: &Settings, surface: &mut dyn Surface) {
    let anim = &scene.anim;
    let shake = if settings.effective_shake() {
        anim.shake_offset
    } else {
        0.0
    };
    let x = anim.catcher_x + shake;
    let y = scene.catcher_y();

    // Bag, behind the figure
    surface.save();
    surface.translate(Vec2::new(x, y - BAG_OPENING_OFFSET));
    surface.scale(Vec2::splat(anim.bag_scale));
    let bag_color = match anim.visible_flash() {
        Some(HitFlash::Good) => colors::FLASH_GOOD,
        Some(HitFlash::Bad) => colors::FLASH_BAD,
        None => colors::BAG,
    };
    let mut bag = super::shapes::ellipse_points(Vec2::ZERO, Vec2::new(40.0, 25.0), 0.0, PI, 24);
    bag.push(Vec2::new(-30.0, -30.0));
    bag.push(Vec2::new(30.0, -30.0));
    surface.fill_polygon(&bag, bag_color);
    surface.stroke_polyline(&bag, true, 3.0, colors::BAG_OUTLINE);
    surface.text("$", Vec2::new(0.0, 0.0), 24.0, colors::BAG_DOLLAR);
    surface.fill_ellipse(Vec2::new(0.0, -30.0), Vec2::new(30.0, 8.0), colors::BAG_INSIDE);
    surface.restore();

    // Legs
    surface.fill_rect(Vec2::new(x - 15.0, y + 40.0), Vec2::new(10.0, 30.0), colors::DARK);
    surface.fill_rect(Vec2::new(x + 5.0, y + 40.0), Vec2::new(10.0, 30.0), colors::DARK);

    // Striped shirt
    surface.fill_rect(Vec2::new(x - 20.0, y), Vec2::new(40.0, 45.0), colors::SHIRT);
    for stripe in 0..4 {
        let sy = y + 5.0 + stripe as f32 * 10.0;
        surface.fill_rect(Vec2::new(x - 20.0, sy), Vec2::new(40.0, 5.0), colors::DARK);
    }

    // Arms up holding the bag
    surface.stroke_line(Vec2::new(x - 20.0, y + 10.0), Vec2::new(x - 30.0, y - 10.0), 6.0, colors::DARK);
    surface.stroke_line(Vec2::new(x + 20.0, y + 10.0), Vec2::new(x + 30.0, y - 10.0), 6.0, colors::DARK);

    // Head and mask
    surface.fill_circle(Vec2::new(x, y - 15.0), 18.0, colors::SKIN);
    surface.fill_rect(Vec2::new(x - 16.0, y - 20.0), Vec2::new(32.0, 10.0), colors::DARK);

    for ex in [x - 8.0, x + 8.0] {
        let eye = Vec2::new(ex, y - 15.0);
        if anim.is_shaking() {
            surface.text("x", eye, 8.0, colors::WHITE);
        } else {
            surface.fill_circle(eye, 2.0, colors::WHITE);
        }
    }

    // Beanie
    surface.fill_arc(Vec2::new(x, y - 20.0), Vec2::splat(19.0), PI, TAU, colors::HAT);
    surface.stroke_line(Vec2::new(x - 18.0, y - 20.0), Vec2::new(x + 18.0, y - 20.0), 4.0, colors::HAT);
}

fn draw_particles(scene: &Scene, surface: &mut dyn Surface) {
    for particle in &scene.particles {
        let alpha = particle.alpha();
        if alpha <= 0.0 {
            continue;
        }
        surface.save();
        surface.set_alpha(alpha);
        match &particle.text {
            Some(text) => surface.text(text, particle.pos, PARTICLE_TEXT_SIZE, particle.color),
            None => surface.fill_circle(particle.pos, PARTICLE_DOT_RADIUS, particle.color),
        }
        surface.restore();
    }
}

fn draw_splatter(scene: &Scene, settings: &Settings, surface: &mut dyn Surface) {
    let overlay = &scene.splatter;
    if !overlay.is_visible() {
        return;
    }
    surface.save();
    surface.set_alpha(overlay.opacity);
    surface.fill_rect(Vec2::ZERO, Vec2::new(scene.width, scene.height), colors::SPLATTER_TINT);

    if settings.effective_splatter_marks() {
        for mark in &overlay.marks {
            surface.save();
            surface.translate(mark.pos);
            surface.rotate(mark.rotation);
            draw_penalty_blob(surface, mark.scale * SPLATTER_BASE_SCALE);
            surface.restore();
        }
    }
    surface.restore();
}
