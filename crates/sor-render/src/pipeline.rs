use bytemuck::{Pod, Zeroable};
use sor_math::{Transform, Vector4};
use sor_mesh::GeometryBuffers;

use crate::frame::{DrawCommand, FrameOutput, Primitive};

/// Vertex with f32 data packed for GPU.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct GpuVertex {
    pub position: [f32; 4],
    pub normal: [f32; 4],
}

impl GpuVertex {
    pub fn new(position: Vector4, normal: Vector4) -> Self {
        Self {
            position: position.as_vec4().to_array(),
            normal: normal.as_vec4().to_array(),
        }
    }
}

/// Interleaved vertices and indices ready for upload.
#[derive(Debug, Clone)]
pub struct UploadBuffers {
    pub vertices: Vec<GpuVertex>,
    pub indices: Vec<u32>,
}

impl UploadBuffers {
    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    pub fn index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.indices)
    }
}

/// Convert the shared geometry buffers to GPU layout.
pub fn prepare_buffers(buffers: &GeometryBuffers) -> UploadBuffers {
    let vertices = buffers
        .positions()
        .iter()
        .zip(buffers.normals())
        .map(|(&p, &n)| GpuVertex::new(p, n))
        .collect();

    UploadBuffers {
        vertices,
        indices: buffers.indices().to_vec(),
    }
}

/// Per-draw uniform block.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct DrawUniforms {
    pub model_view: [[f32; 4]; 4],
    pub projection: [[f32; 4]; 4],
    pub light_position: [f32; 4],
    pub ambient: [f32; 4],
    pub diffuse: [f32; 4],
    pub specular: [f32; 4],
    pub shininess: f32,
    /// Nonzero when drawing the normal-line overlay.
    pub normal_lines: u32,
    pub _padding: [u32; 2],
}

fn matrix_f32(transform: &Transform) -> [[f32; 4]; 4] {
    transform.to_mat4().as_mat4().to_cols_array_2d()
}

fn rgba(rgb: sor_math::DVec3) -> [f32; 4] {
    rgb.as_vec3().extend(1.0).to_array()
}

impl DrawUniforms {
    pub fn new(frame: &FrameOutput, draw: &DrawCommand) -> Self {
        Self {
            model_view: matrix_f32(&draw.model_view),
            projection: matrix_f32(&frame.projection),
            light_position: frame.light_position.as_vec4().to_array(),
            ambient: rgba(draw.color.ambient),
            diffuse: rgba(draw.color.diffuse),
            specular: rgba(draw.color.specular),
            shininess: draw.shininess as f32,
            normal_lines: u32::from(draw.primitive == Primitive::Lines),
            _padding: [0; 2],
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::bytes_of(self)
    }
}
