//! Vertex types for 2D rendering

use bytemuck::{Pod, Zeroable};

/// Simple 2D vertex with position and color
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

impl Vertex {
    pub const fn new(x: f32, y: f32, color: [f32; 4]) -> Self {
        Self {
            position: [x, y],
            color,
        }
    }

    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x2,
                },
                wgpu::VertexAttribute {
                    offset: std::mem::size_of::<[f32; 2]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x4,
                },
            ],
        }
    }
}

/// Colors for game elements
pub mod colors {
    // Night city
    pub const SKY: [f32; 4] = [0.09, 0.12, 0.19, 1.0];
    pub const BUILDING: [f32; 4] = [0.059, 0.090, 0.165, 1.0];
    pub const WINDOW_WARM: [f32; 4] = [0.996, 0.953, 0.780, 1.0];
    pub const WINDOW_COOL: [f32; 4] = [0.886, 0.910, 0.941, 1.0];
    pub const RAIN: [f32; 4] = [0.580, 0.639, 0.722, 1.0];

    // Bank facade
    pub const PILLAR: [f32; 4] = [0.118, 0.161, 0.231, 1.0];
    pub const ROOF: [f32; 4] = [0.200, 0.255, 0.333, 1.0];
    pub const BANK_GLASS: [f32; 4] = [0.278, 0.333, 0.412, 1.0];
    pub const ALARM: [f32; 4] = [0.937, 0.267, 0.267, 1.0];
    pub const SIGN: [f32; 4] = [0.580, 0.639, 0.722, 1.0];
    pub const SIGN_TEXT: [f32; 4] = [0.059, 0.090, 0.165, 1.0];
    pub const BANK_SHADOW: [f32; 4] = [0.0, 0.0, 0.0, 0.3];

    // The thief
    pub const BAG: [f32; 4] = [0.706, 0.325, 0.035, 1.0];
    pub const BAG_OUTLINE: [f32; 4] = [0.471, 0.208, 0.059, 1.0];
    pub const BAG_INSIDE: [f32; 4] = [0.271, 0.102, 0.012, 1.0];
    pub const BAG_DOLLAR: [f32; 4] = [0.988, 0.827, 0.302, 1.0];
    pub const FLASH_GOOD: [f32; 4] = [0.984, 0.749, 0.141, 1.0];
    pub const FLASH_BAD: [f32; 4] = [0.443, 0.247, 0.071, 1.0];
    pub const DARK: [f32; 4] = [0.059, 0.090, 0.165, 1.0];
    pub const SHIRT: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
    pub const SKIN: [f32; 4] = [0.988, 0.647, 0.647, 1.0];
    pub const HAT: [f32; 4] = [0.200, 0.255, 0.333, 1.0];
    pub const WHITE: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
    pub const BLACK: [f32; 4] = [0.0, 0.0, 0.0, 1.0];

    // Loot
    pub const GOLD: [f32; 4] = [0.984, 0.749, 0.141, 1.0];
    pub const GOLD_OUTLINE: [f32; 4] = [0.706, 0.325, 0.035, 1.0];
    pub const GOLD_SHINE: [f32; 4] = [1.0, 1.0, 1.0, 0.6];
    pub const GOLD_STAMP: [f32; 4] = [0.573, 0.251, 0.055, 1.0];
    pub const SILVER: [f32; 4] = [0.580, 0.639, 0.722, 1.0];
    pub const SILVER_OUTLINE: [f32; 4] = [0.278, 0.333, 0.412, 1.0];
    pub const GEM: [f32; 4] = [0.376, 0.647, 0.980, 1.0];
    pub const BILL: [f32; 4] = [0.525, 0.937, 0.675, 1.0];
    pub const BILL_INK: [f32; 4] = [0.082, 0.502, 0.239, 1.0];
    pub const PENALTY: [f32; 4] = [0.396, 0.263, 0.129, 1.0];

    // Penalty overlay
    pub const SPLATTER_TINT: [f32; 4] = [0.259, 0.129, 0.043, 0.7];
}
