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
    /// Court background (slate)
    pub const BACKGROUND: [f32; 4] = [0.059, 0.090, 0.165, 1.0];
    pub const CENTER_LINE: [f32; 4] = [1.0, 1.0, 1.0, 0.3];
    /// Indigo gradient ends
    pub const PADDLE_INNER: [f32; 4] = [0.310, 0.275, 0.898, 1.0];
    pub const PADDLE_OUTER: [f32; 4] = [0.388, 0.400, 0.945, 1.0];
    pub const BALL_FALLBACK: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
}
