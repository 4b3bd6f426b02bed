use sor_core::{Result, SorError};
use sor_math::{direction4, point4, Aabb3, Point3, Vector3, Vector4};

/// Convert a buffer length or offset to a 32-bit index.
pub fn to_index(n: usize) -> Result<u32> {
    u32::try_from(n).map_err(|_| SorError::config(format!("{} does not fit a 32-bit index", n)))
}

/// Contiguous run of vertices in the shared vertex sequences.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct VertexRange {
    pub first: u32,
    pub count: u32,
}

impl VertexRange {
    pub fn new(first: u32, count: u32) -> Self {
        Self { first, count }
    }

    pub fn end(&self) -> u32 {
        self.first + self.count
    }

    pub fn contains(&self, index: u32) -> bool {
        index >= self.first && index < self.end()
    }

    pub fn iter(&self) -> std::ops::Range<u32> {
        self.first..self.end()
    }
}

/// Contiguous run of entries in the shared index sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct IndexRange {
    pub first: u32,
    pub count: u32,
}

impl IndexRange {
    pub fn new(first: u32, count: u32) -> Self {
        Self { first, count }
    }

    /// Range covering everything appended between two index counts.
    pub fn between(start: usize, end: usize) -> Result<Self> {
        Ok(Self {
            first: to_index(start)?,
            count: to_index(end.saturating_sub(start))?,
        })
    }

    /// Offset in bytes into a `u32` element buffer.
    pub fn byte_offset(&self) -> usize {
        self.first as usize * std::mem::size_of::<u32>()
    }

    pub fn end(&self) -> u32 {
        self.first + self.count
    }
}

/// Flat vertex/normal/index sequences shared by every object in the scene.
///
/// Positions are homogeneous points (`w = 1`), normals homogeneous
/// directions (`w = 0`). Both sequences are indexed identically.
#[derive(Debug, Clone, Default)]
pub struct GeometryBuffers {
    positions: Vec<Vector4>,
    normals: Vec<Vector4>,
    indices: Vec<u32>,
}

impl GeometryBuffers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn index_count(&self) -> usize {
        self.indices.len()
    }

    pub fn positions(&self) -> &[Vector4] {
        &self.positions
    }

    pub fn normals(&self) -> &[Vector4] {
        &self.normals
    }

    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    pub fn position(&self, index: u32) -> Point3 {
        self.positions[index as usize].truncate()
    }

    pub fn normal(&self, index: u32) -> Vector3 {
        self.normals[index as usize].truncate()
    }

    /// Append one vertex and return its index.
    pub fn push_vertex(&mut self, position: Point3, normal: Vector3) -> Result<u32> {
        let index = to_index(self.positions.len())?;
        self.positions.push(point4(position));
        self.normals.push(direction4(normal));
        Ok(index)
    }

    pub fn push_triangle(&mut self, tri: [u32; 3]) {
        self.indices.extend_from_slice(&tri);
    }

    pub fn push_line(&mut self, a: u32, b: u32) {
        self.indices.push(a);
        self.indices.push(b);
    }

    /// Indices within `range`.
    pub fn index_slice(&self, range: IndexRange) -> &[u32] {
        &self.indices[range.first as usize..range.end() as usize]
    }

    /// Bounding box of the positions in `range`.
    pub fn bounding_box(&self, range: VertexRange) -> Option<Aabb3> {
        let points: Vec<Point3> = range.iter().map(|i| self.position(i)).collect();
        Aabb3::from_points(&points)
    }
}
