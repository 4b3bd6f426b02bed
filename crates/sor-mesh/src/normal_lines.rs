//! Line segments visualising per-vertex normals.

use sor_core::{Result, SorError};

use crate::buffers::{GeometryBuffers, IndexRange, VertexRange};

/// For every vertex in `vertices`, append a tip vertex at
/// `position + length * normal` and the line pair `(vertex, tip)`.
///
/// The tip copies its source normal so the position and normal sequences
/// stay the same length. Returns the range of the appended line indices.
pub fn append_normal_lines(
    buffers: &mut GeometryBuffers,
    vertices: VertexRange,
    length: f64,
) -> Result<IndexRange> {
    if !(length.is_finite() && length > 0.0) {
        return Err(SorError::config(format!(
            "normal line length must be positive, got {}",
            length
        )));
    }
    if vertices.end() as usize > buffers.vertex_count() {
        return Err(SorError::InvalidOperation(format!(
            "vertex range {}..{} is outside the {} buffered vertices",
            vertices.first,
            vertices.end(),
            buffers.vertex_count()
        )));
    }

    let start = buffers.index_count();
    for i in vertices.iter() {
        let position = buffers.position(i);
        let normal = buffers.normal(i);
        let tip = buffers.push_vertex(position + normal * length, normal)?;
        buffers.push_line(i, tip);
    }
    IndexRange::between(start, buffers.index_count())
}
