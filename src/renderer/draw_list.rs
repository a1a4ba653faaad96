//! Recording surface
//!
//! Stores every drawing call with the transform and alpha that were active,
//! so frames can be inspected without a GPU.

use glam::{Affine2, Vec2};

use super::surface::{Color, Surface};

#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Rect {
        min: Vec2,
        size: Vec2,
        color: Color,
    },
    Polygon {
        points: Vec<Vec2>,
        color: Color,
    },
    Arc {
        center: Vec2,
        radii: Vec2,
        start: f32,
        end: f32,
        color: Color,
    },
    Polyline {
        points: Vec<Vec2>,
        closed: bool,
        width: f32,
        color: Color,
    },
    Text {
        text: String,
        center: Vec2,
        size: f32,
        color: Color,
    },
}

impl DrawOp {
    pub fn color(&self) -> Color {
        match self {
            DrawOp::Rect { color, .. }
            | DrawOp::Polygon { color, .. }
            | DrawOp::Arc { color, .. }
            | DrawOp::Polyline { color, .. }
            | DrawOp::Text { color, .. } => *color,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DrawCmd {
    pub op: DrawOp,
    pub transform: Affine2,
    pub alpha: f32,
}

impl DrawCmd {
    /// Where the op's local origin lands on screen
    pub fn origin(&self) -> Vec2 {
        self.transform.translation
    }
}

#[derive(Debug, Clone)]
pub struct DrawList {
    size: (f32, f32),
    transform: Affine2,
    alpha: f32,
    stack: Vec<(Affine2, f32)>,
    commands: Vec<DrawCmd>,
}

impl Default for DrawList {
    fn default() -> Self {
        Self::new(0.0, 0.0)
    }
}

impl DrawList {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            size: (width, height),
            transform: Affine2::IDENTITY,
            alpha: 1.0,
            stack: Vec::new(),
            commands: Vec::new(),
        }
    }

    pub fn commands(&self) -> &[DrawCmd] {
        &self.commands
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Every text op's string, in draw order
    pub fn texts(&self) -> Vec<&str> {
        self.commands
            .iter()
            .filter_map(|cmd| match &cmd.op {
                DrawOp::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Commands drawn with exactly this color
    pub fn with_color(&self, color: Color) -> Vec<&DrawCmd> {
        self.commands
            .iter()
            .filter(|cmd| cmd.op.color() == color)
            .collect()
    }

    /// True if the state stack is balanced (every save was restored)
    pub fn is_balanced(&self) -> bool {
        self.stack.is_empty()
    }

    fn record(&mut self, op: DrawOp) {
        self.commands.push(DrawCmd {
            op,
            transform: self.transform,
            alpha: self.alpha,
        });
    }
}

impl Surface for DrawList {
    fn size(&self) -> (f32, f32) {
        self.size
    }

    fn save(&mut self) {
        self.stack.push((self.transform, self.alpha));
    }

    fn restore(&mut self) {
        if let Some((transform, alpha)) = self.stack.pop() {
            self.transform = transform;
            self.alpha = alpha;
        }
    }

    fn translate(&mut self, offset: Vec2) {
        self.transform = self.transform * Affine2::from_translation(offset);
    }

    fn rotate(&mut self, angle: f32) {
        self.transform = self.transform * Affine2::from_angle(angle);
    }

    fn scale(&mut self, factor: Vec2) {
        self.transform = self.transform * Affine2::from_scale(factor);
    }

    fn set_alpha(&mut self, alpha: f32) {
        self.alpha = alpha.clamp(0.0, 1.0);
    }

    fn fill_rect(&mut self, min: Vec2, size: Vec2, color: Color) {
        self.record(DrawOp::Rect { min, size, color });
    }

    fn fill_polygon(&mut self, points: &[Vec2], color: Color) {
        self.record(DrawOp::Polygon {
            points: points.to_vec(),
            color,
        });
    }

    fn fill_arc(&mut self, center: Vec2, radii: Vec2, start: f32, end: f32, color: Color) {
        self.record(DrawOp::Arc {
            center,
            radii,
            start,
            end,
            color,
        });
    }

    fn stroke_polyline(&mut self, points: &[Vec2], closed: bool, width: f32, color: Color) {
        self.record(DrawOp::Polyline {
            points: points.to_vec(),
            closed,
            width,
            color,
        });
    }

    fn text(&mut self, text: &str, center: Vec2, size: f32, color: Color) {
        self.record(DrawOp::Text {
            text: text.to_string(),
            center,
            size,
            color,
        });
    }
}
