//! Scene state, animation, camera and per-frame draw lists for the
//! surface-of-revolution viewer.

pub mod animation;
pub mod camera;
pub mod config;
pub mod frame;
pub mod light;
pub mod palette;
pub mod pipeline;
pub mod rings;
pub mod scene;

// Re-export main types
pub use animation::{LightAnimations, LightStep, Orbit, Relocation, RelocationState, RelocationStep, Spin};
pub use camera::{CameraView, OrbitCamera, PointerButton, Projection, MIN_RADIUS};
pub use config::ViewerConfig;
pub use frame::{DrawCommand, FrameClock, FrameDriver, FrameOutput, ObjectShading, Primitive, RingPlacement};
pub use light::{LightFrame, LightPosition};
pub use palette::{Palette, Reflectance, Rgb};
pub use pipeline::{prepare_buffers, DrawUniforms, GpuVertex, UploadBuffers};
pub use rings::{layout_rings, RingInstance, MAX_RINGS};
pub use scene::{Command, ObjectState, SceneState};
