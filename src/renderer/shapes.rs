//! Shape generation for 2D primitives
//!
//! Outlines are produced as point lists in local space; the mesh builder
//! transforms them and turns them into triangles.

use glam::Vec2;
use std::f32::consts::TAU;

use super::vertex::Vertex;

/// Points along an elliptical arc from `start` to `end` (inclusive)
///
/// `segments_per_turn` is the resolution of a full ellipse; partial arcs get
/// a proportional share, never fewer than 2 segments.
pub fn ellipse_points(
    center: Vec2,
    radii: Vec2,
    start: f32,
    end: f32,
    segments_per_turn: u32,
) -> Vec<Vec2> {
    let span = end - start;
    let segments = (((span.abs() / TAU) * segments_per_turn as f32).ceil() as u32).max(2);
    let mut points = Vec::with_capacity(segments as usize + 1);

    for i in 0..=segments {
        let theta = start + span * (i as f32 / segments as f32);
        points.push(Vec2::new(
            center.x + radii.x * theta.cos(),
            center.y + radii.y * theta.sin(),
        ));
    }

    points
}

/// Axis-aligned rectangle corners, clockwise on screen from the top-left
pub fn rect_points(min: Vec2, size: Vec2) -> [Vec2; 4] {
    [
        min,
        Vec2::new(min.x + size.x, min.y),
        min + size,
        Vec2::new(min.x, min.y + size.y),
    ]
}

/// Triangulate a convex polygon as a fan around its first point
pub fn convex_fan(points: &[Vec2], color: [f32; 4], out: &mut Vec<Vertex>) {
    if points.len() < 3 {
        return;
    }
    let anchor = points[0];
    for pair in points[1..].windows(2) {
        out.push(Vertex::new(anchor.x, anchor.y, color));
        out.push(Vertex::new(pair[0].x, pair[0].y, color));
        out.push(Vertex::new(pair[1].x, pair[1].y, color));
    }
}

/// Triangulate a sector as a fan around its center
pub fn sector_fan(center: Vec2, rim: &[Vec2], color: [f32; 4], out: &mut Vec<Vertex>) {
    for pair in rim.windows(2) {
        out.push(Vertex::new(center.x, center.y, color));
        out.push(Vertex::new(pair[0].x, pair[0].y, color));
        out.push(Vertex::new(pair[1].x, pair[1].y, color));
    }
}

/// Corners of a thick line segment as a quad (two triangles' worth)
///
/// Returns `None` for zero-length segments.
pub fn segment_quad(from: Vec2, to: Vec2, width: f32) -> Option<[Vec2; 4]> {
    let dir = (to - from).normalize_or_zero();
    if dir == Vec2::ZERO {
        return None;
    }
    // Perpendicular for width
    let perp = Vec2::new(-dir.y, dir.x) * (width / 2.0);
    Some([from + perp, from - perp, to - perp, to + perp])
}

/// Push a quad as two triangles
pub fn quad(corners: [Vec2; 4], color: [f32; 4], out: &mut Vec<Vertex>) {
    let [a, b, c, d] = corners;
    out.push(Vertex::new(a.x, a.y, color));
    out.push(Vertex::new(b.x, b.y, color));
    out.push(Vertex::new(c.x, c.y, color));

    out.push(Vertex::new(a.x, a.y, color));
    out.push(Vertex::new(c.x, c.y, color));
    out.push(Vertex::new(d.x, d.y, color));
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::PI;

    #[test]
    fn test_half_ellipse_goes_through_bottom() {
        let pts = ellipse_points(Vec2::ZERO, Vec2::new(40.0, 25.0), 0.0, PI, 24);
        assert_eq!(pts.len(), 13);
        assert!((pts[0] - Vec2::new(40.0, 0.0)).length() < 1e-4);
        assert!((pts[6] - Vec2::new(0.0, 25.0)).length() < 1e-3);
        assert!((pts[12] - Vec2::new(-40.0, 0.0)).length() < 1e-3);
    }

    #[test]
    fn test_fan_triangle_count() {
        let mut out = Vec::new();
        convex_fan(&rect_points(Vec2::ZERO, Vec2::ONE), [1.0; 4], &mut out);
        assert_eq!(out.len(), 6);

        out.clear();
        convex_fan(&[Vec2::ZERO, Vec2::X], [1.0; 4], &mut out);
        assert!(out.is_empty());
    }

    #[test]
    fn test_segment_quad_width() {
        let corners = segment_quad(Vec2::ZERO, Vec2::new(10.0, 0.0), 4.0).unwrap();
        assert_eq!(corners[0], Vec2::new(0.0, 2.0));
        assert_eq!(corners[1], Vec2::new(0.0, -2.0));
        assert!(segment_quad(Vec2::ONE, Vec2::ONE, 4.0).is_none());
    }
}
