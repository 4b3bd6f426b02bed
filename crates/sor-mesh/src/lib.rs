pub mod buffers;
pub mod builder;
pub mod cap;
pub mod normal_lines;
pub mod registry;

pub use buffers::{GeometryBuffers, IndexRange, VertexRange};
pub use builder::{build_cylinder, build_ring, SurfaceMesh};
pub use cap::{stitch_cap, CapSide};
pub use normal_lines::append_normal_lines;
pub use registry::{GeometryRegistry, GeometrySpec, ObjectKind, SurfaceEntry};
