//! Catch and boundary detection
//!
//! The bag is approximated by a circle of radius `CATCH_TOLERANCE` around its
//! opening point; an item is caught when the two circles overlap.

use glam::Vec2;

use super::state::FallingItem;
use crate::consts::*;

/// What happened to an item this tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Still falling
    InFlight,
    /// Landed in the bag
    Caught,
    /// Fell past the bottom edge
    Missed,
}

/// True if the item overlaps the bag's effective mouth
#[inline]
pub fn is_caught(item: &FallingItem, bag_opening: Vec2) -> bool {
    item.pos.distance(bag_opening) < item.radius + CATCH_TOLERANCE
}

/// True once the item is below the viewport plus the miss margin
#[inline]
pub fn is_past_bottom(item: &FallingItem, viewport_height: f32) -> bool {
    item.pos.y > viewport_height + MISS_MARGIN
}

/// Classify an item; a catch takes priority over crossing the boundary
pub fn classify(item: &FallingItem, bag_opening: Vec2, viewport_height: f32) -> Outcome {
    if is_caught(item, bag_opening) {
        Outcome::Caught
    } else if is_past_bottom(item, viewport_height) {
        Outcome::Missed
    } else {
        Outcome::InFlight
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::ItemKind;

    fn item_at(kind: ItemKind, x: f32, y: f32) -> FallingItem {
        FallingItem::new(1, kind, Vec2::new(x, y), 3.0)
    }

    #[test]
    fn test_catch_radius() {
        let bag = Vec2::new(200.0, 510.0);
        // Gold radius 20 + tolerance 40 = 60
        assert!(is_caught(&item_at(ItemKind::GoldCoin, 200.0, 451.0), bag));
        assert!(!is_caught(&item_at(ItemKind::GoldCoin, 200.0, 450.0), bag));
        // Diagonal distance 50 < 52 for silver (12 + 40)
        assert!(is_caught(&item_at(ItemKind::SilverCoin, 230.0, 470.0), bag));
        assert!(!is_caught(&item_at(ItemKind::SilverCoin, 260.0, 510.0), bag));
    }

    #[test]
    fn test_boundary() {
        assert!(!is_past_bottom(&item_at(ItemKind::Gem, 10.0, 620.0), 600.0));
        assert!(is_past_bottom(&item_at(ItemKind::Gem, 10.0, 620.5), 600.0));
    }

    #[test]
    fn test_classify_prefers_catch() {
        // A bag sitting on the floor of a tiny viewport still catches
        let bag = Vec2::new(50.0, 70.0);
        let item = item_at(ItemKind::Bill, 50.0, 75.0);
        assert_eq!(classify(&item, bag, 40.0), Outcome::Caught);
        let far = item_at(ItemKind::Bill, 300.0, 75.0);
        assert_eq!(classify(&far, bag, 40.0), Outcome::Missed);
        let up = item_at(ItemKind::Bill, 300.0, 10.0);
        assert_eq!(classify(&up, bag, 40.0), Outcome::InFlight);
    }
}
