//! Rendering module
//!
//! The frame composer draws through the [`Surface`] trait. [`MeshSurface`]
//! tessellates into colored triangles for the WebGPU pipeline; [`DrawList`]
//! records calls for inspection in tests and tools.

pub mod draw_list;
pub mod glyphs;
pub mod items;
pub mod mesh;
pub mod pipeline;
pub mod scene;
pub mod shapes;
pub mod surface;
pub mod vertex;

pub use draw_list::{DrawCmd, DrawList, DrawOp};
pub use mesh::MeshSurface;
pub use pipeline::{RenderInitError, RenderState};
pub use scene::render;
pub use surface::{Color, Surface};
pub use vertex::Vertex;
