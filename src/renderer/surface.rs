//! Drawing surface abstraction
//!
//! The frame composer only talks to this trait, so the same drawing code can
//! feed the GPU mesh builder or a recording list in tests.

use glam::Vec2;

/// Straight (non-premultiplied) RGBA in 0-1
pub type Color = [f32; 4];

/// A 2D immediate-mode drawing target with a canvas-style state stack
///
/// Coordinates are pixels with y pointing down. Angles are radians measured
/// clockwise on screen (the y-down convention).
pub trait Surface {
    /// Drawable size in pixels; zero while the surface is not ready
    fn size(&self) -> (f32, f32);

    /// Push the current transform and alpha
    fn save(&mut self);
    /// Pop the transform and alpha pushed by the matching `save`
    fn restore(&mut self);
    fn translate(&mut self, offset: Vec2);
    fn rotate(&mut self, angle: f32);
    fn scale(&mut self, factor: Vec2);
    /// Set the global alpha applied to everything drawn until `restore`
    fn set_alpha(&mut self, alpha: f32);

    fn fill_rect(&mut self, min: Vec2, size: Vec2, color: Color);
    /// Fill a convex polygon
    fn fill_polygon(&mut self, points: &[Vec2], color: Color);
    /// Fill an elliptical sector between two angles, closed through the center
    fn fill_arc(&mut self, center: Vec2, radii: Vec2, start: f32, end: f32, color: Color);
    fn stroke_polyline(&mut self, points: &[Vec2], closed: bool, width: f32, color: Color);
    /// Draw a single line of text centered on `center`
    fn text(&mut self, text: &str, center: Vec2, size: f32, color: Color);

    fn fill_ellipse(&mut self, center: Vec2, radii: Vec2, color: Color) {
        self.fill_arc(center, radii, 0.0, std::f32::consts::TAU, color);
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        self.fill_ellipse(center, Vec2::splat(radius), color);
    }

    fn stroke_line(&mut self, from: Vec2, to: Vec2, width: f32, color: Color) {
        self.stroke_polyline(&[from, to], false, width, color);
    }

    /// True when there is something to draw onto
    fn is_ready(&self) -> bool {
        let (w, h) = self.size();
        crate::is_usable_viewport(w, h)
    }
}

/// Scale the alpha channel of a color
#[inline]
pub fn with_alpha(color: Color, alpha: f32) -> Color {
    [color[0], color[1], color[2], color[3] * alpha.clamp(0.0, 1.0)]
}
