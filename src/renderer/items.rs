//! Per-kind visual templates for falling items
//!
//! Every template is drawn around the local origin; the caller has already
//! translated to the item's center and rotated by its spin.

use glam::Vec2;

use super::surface::Surface;
use super::vertex::colors;
use crate::sim::{FallingItem, ItemKind};

const GOLD_BAR_TOP: f32 = 15.0;
const GOLD_BAR_BOTTOM: f32 = 20.0;
const GOLD_BAR_HALF_HEIGHT: f32 = 7.5;
const BILL_SIZE: Vec2 = Vec2::new(36.0, 20.0);

/// Draw one item in local space
pub fn draw_item(surface: &mut dyn Surface, item: &FallingItem) {
    match item.kind {
        ItemKind::Penalty => draw_penalty_blob(surface, 1.0),
        ItemKind::Bill => draw_bill(surface),
        ItemKind::GoldCoin => draw_gold_bar(surface, item.rotation),
        ItemKind::Gem => draw_gem(surface),
        ItemKind::SilverCoin => draw_silver_coin(surface, item.radius, item.rotation),
    }
}

/// Stacked brown blob, also reused for the splatter marks
pub fn draw_penalty_blob(surface: &mut dyn Surface, scale: f32) {
    let s = scale;
    surface.fill_ellipse(Vec2::new(0.0, 5.0) * s, Vec2::new(18.0, 10.0) * s, colors::PENALTY);
    surface.fill_ellipse(Vec2::new(0.0, -3.0) * s, Vec2::new(14.0, 8.0) * s, colors::PENALTY);
    surface.fill_ellipse(Vec2::new(0.0, -10.0) * s, Vec2::new(8.0, 5.0) * s, colors::PENALTY);

    // Eyes
    for x in [-5.0, 5.0] {
        surface.fill_circle(Vec2::new(x, -2.0) * s, 3.0 * s, colors::WHITE);
        surface.fill_circle(Vec2::new(x, -2.0) * s, 1.5 * s, colors::BLACK);
    }
}

fn draw_bill(surface: &mut dyn Surface) {
    let min = -BILL_SIZE / 2.0;
    surface.fill_rect(min, BILL_SIZE, colors::BILL);
    let outline = super::shapes::rect_points(min, BILL_SIZE);
    surface.stroke_polyline(&outline, true, 1.5, colors::BILL_INK);
    surface.fill_circle(Vec2::ZERO, 6.0, colors::BILL_INK);
    surface.text("$", Vec2::ZERO, 10.0, colors::BILL);
}

fn draw_gold_bar(surface: &mut dyn Surface, rotation: f32) {
    let trapezoid = [
        Vec2::new(-GOLD_BAR_TOP, -GOLD_BAR_HALF_HEIGHT),
        Vec2::new(GOLD_BAR_TOP, -GOLD_BAR_HALF_HEIGHT),
        Vec2::new(GOLD_BAR_BOTTOM, GOLD_BAR_HALF_HEIGHT),
        Vec2::new(-GOLD_BAR_BOTTOM, GOLD_BAR_HALF_HEIGHT),
    ];
    surface.fill_polygon(&trapezoid, colors::GOLD);
    surface.stroke_polyline(&trapezoid, true, 1.5, colors::GOLD_OUTLINE);

    // Shine along the top face
    let shine = [
        Vec2::new(-12.0, -5.5),
        Vec2::new(-4.0, -5.5),
        Vec2::new(-8.0, 5.5),
        Vec2::new(-16.0, 5.5),
    ];
    surface.fill_polygon(&shine, colors::GOLD_SHINE);

    // Stamp stays upright
    surface.save();
    surface.rotate(-rotation);
    surface.text("999.9", Vec2::ZERO, 8.0, colors::GOLD_STAMP);
    surface.restore();
}

fn draw_gem(surface: &mut dyn Surface) {
    let diamond = [
        Vec2::new(0.0, -15.0),
        Vec2::new(12.0, -5.0),
        Vec2::new(0.0, 15.0),
        Vec2::new(-12.0, -5.0),
    ];
    surface.fill_polygon(&diamond, colors::GEM);
    surface.stroke_polyline(&diamond, true, 1.0, colors::WHITE);

    // Facets
    surface.stroke_line(Vec2::new(-12.0, -5.0), Vec2::new(12.0, -5.0), 1.0, colors::WHITE);
    surface.stroke_polyline(
        &[Vec2::new(-6.0, -5.0), Vec2::new(0.0, 15.0), Vec2::new(6.0, -5.0)],
        false,
        1.0,
        colors::WHITE,
    );
}

fn draw_silver_coin(surface: &mut dyn Surface, radius: f32, rotation: f32) {
    surface.fill_circle(Vec2::ZERO, radius, colors::SILVER);
    let rim = super::shapes::ellipse_points(
        Vec2::ZERO,
        Vec2::splat(radius),
        0.0,
        std::f32::consts::TAU,
        24,
    );
    surface.stroke_polyline(&rim, true, 1.5, colors::SILVER_OUTLINE);

    surface.save();
    surface.rotate(-rotation);
    surface.text("$", Vec2::ZERO, radius, colors::SILVER_OUTLINE);
    surface.restore();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::draw_list::{DrawList, DrawOp};

    fn item(kind: ItemKind) -> FallingItem {
        let mut item = FallingItem::new(1, kind, Vec2::ZERO, 3.0);
        item.rotation = 0.7;
        item
    }

    #[test]
    fn test_every_kind_draws_something() {
        for kind in ItemKind::ALL {
            let mut list = DrawList::new(100.0, 100.0);
            draw_item(&mut list, &item(kind));
            assert!(!list.is_empty(), "{:?} drew nothing", kind);
            assert!(list.is_balanced());
        }
    }

    #[test]
    fn test_templates_are_distinct() {
        let gold = {
            let mut list = DrawList::new(100.0, 100.0);
            draw_item(&mut list, &item(ItemKind::GoldCoin));
            list
        };
        assert_eq!(gold.texts(), vec!["999.9"]);
        assert_eq!(gold.with_color(colors::GOLD).len(), 1);

        let bill = {
            let mut list = DrawList::new(100.0, 100.0);
            draw_item(&mut list, &item(ItemKind::Bill));
            list
        };
        assert!(matches!(bill.commands()[0].op, DrawOp::Rect { .. }));
        assert_eq!(bill.texts(), vec!["$"]);
    }

    #[test]
    fn test_gold_stamp_is_counter_rotated() {
        let mut list = DrawList::new(100.0, 100.0);
        list.rotate(0.7);
        draw_item(&mut list, &item(ItemKind::GoldCoin));
        let stamp = list
            .commands()
            .iter()
            .find(|c| matches!(c.op, DrawOp::Text { .. }))
            .unwrap();
        // Net rotation cancels out
        let x_axis = stamp.transform.matrix2.x_axis;
        assert!((x_axis.x - 1.0).abs() < 1e-5 && x_axis.y.abs() < 1e-5);
    }

    #[test]
    fn test_blob_scales() {
        let mut list = DrawList::new(100.0, 100.0);
        draw_penalty_blob(&mut list, 3.0);
        match &list.commands()[0].op {
            DrawOp::Arc { center, radii, .. } => {
                assert_eq!(*center, Vec2::new(0.0, 15.0));
                assert_eq!(*radii, Vec2::new(54.0, 30.0));
            }
            other => panic!("unexpected op {:?}", other),
        }
    }
}
