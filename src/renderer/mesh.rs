//! Surface implementation that tessellates drawing calls into triangles
//!
//! The resulting vertex list is in pixel space; the GPU pipeline maps it to
//! clip space when uploading.

use glam::{Affine2, Vec2};

use super::glyphs;
use super::shapes;
use super::surface::{Color, Surface, with_alpha};
use super::vertex::Vertex;

#[derive(Debug, Clone, Copy)]
struct DrawState {
    transform: Affine2,
    alpha: f32,
}

impl Default for DrawState {
    fn default() -> Self {
        Self {
            transform: Affine2::IDENTITY,
            alpha: 1.0,
        }
    }
}

/// Collects one frame of geometry as a colored triangle list
#[derive(Debug, Clone)]
pub struct MeshSurface {
    size: (f32, f32),
    segments_per_turn: u32,
    state: DrawState,
    stack: Vec<DrawState>,
    vertices: Vec<Vertex>,
}

impl MeshSurface {
    pub fn new(width: f32, height: f32, segments_per_turn: u32) -> Self {
        Self {
            size: (width, height),
            segments_per_turn: segments_per_turn.max(6),
            state: DrawState::default(),
            stack: Vec::new(),
            vertices: Vec::with_capacity(16 * 1024),
        }
    }

    /// Reset for a new frame, keeping the allocation
    pub fn begin_frame(&mut self, width: f32, height: f32) {
        self.size = (width, height);
        self.state = DrawState::default();
        self.stack.clear();
        self.vertices.clear();
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    fn color(&self, color: Color) -> Color {
        with_alpha(color, self.state.alpha)
    }

    fn to_screen(&self, points: impl IntoIterator<Item = Vec2>) -> Vec<Vec2> {
        points
            .into_iter()
            .map(|p| self.state.transform.transform_point2(p))
            .collect()
    }
}

impl Surface for MeshSurface {
    fn size(&self) -> (f32, f32) {
        self.size
    }

    fn save(&mut self) {
        self.stack.push(self.state);
    }

    fn restore(&mut self) {
        if let Some(state) = self.stack.pop() {
            self.state = state;
        }
    }

    fn translate(&mut self, offset: Vec2) {
        self.state.transform = self.state.transform * Affine2::from_translation(offset);
    }

    fn rotate(&mut self, angle: f32) {
        self.state.transform = self.state.transform * Affine2::from_angle(angle);
    }

    fn scale(&mut self, factor: Vec2) {
        self.state.transform = self.state.transform * Affine2::from_scale(factor);
    }

    fn set_alpha(&mut self, alpha: f32) {
        self.state.alpha = alpha.clamp(0.0, 1.0);
    }

    fn fill_rect(&mut self, min: Vec2, size: Vec2, color: Color) {
        let color = self.color(color);
        if color[3] <= 0.0 {
            return;
        }
        let corners = self.to_screen(shapes::rect_points(min, size));
        shapes::convex_fan(&corners, color, &mut self.vertices);
    }

    fn fill_polygon(&mut self, points: &[Vec2], color: Color) {
        let color = self.color(color);
        if color[3] <= 0.0 {
            return;
        }
        let screen = self.to_screen(points.iter().copied());
        shapes::convex_fan(&screen, color, &mut self.vertices);
    }

    fn fill_arc(&mut self, center: Vec2, radii: Vec2, start: f32, end: f32, color: Color) {
        let color = self.color(color);
        if color[3] <= 0.0 {
            return;
        }
        let rim = shapes::ellipse_points(center, radii, start, end, self.segments_per_turn);
        let rim = self.to_screen(rim);
        let center = self.state.transform.transform_point2(center);
        shapes::sector_fan(center, &rim, color, &mut self.vertices);
    }

    fn stroke_polyline(&mut self, points: &[Vec2], closed: bool, width: f32, color: Color) {
        let color = self.color(color);
        if color[3] <= 0.0 || points.len() < 2 {
            return;
        }
        let mut segments: Vec<(Vec2, Vec2)> = points.windows(2).map(|w| (w[0], w[1])).collect();
        if closed {
            segments.push((points[points.len() - 1], points[0]));
        }
        for (from, to) in segments {
            // Widen in local space so the stroke scales with the transform
            let Some(corners) = shapes::segment_quad(from, to, width) else {
                continue;
            };
            let screen = self.to_screen(corners);
            shapes::quad([screen[0], screen[1], screen[2], screen[3]], color, &mut self.vertices);
        }
    }

    fn text(&mut self, text: &str, center: Vec2, size: f32, color: Color) {
        let width = (size * glyphs::STROKE_RATIO).max(1.0);
        for stroke in glyphs::layout(text, center, size) {
            self.stroke_polyline(&stroke, false, width, color);
        }
    }
}
