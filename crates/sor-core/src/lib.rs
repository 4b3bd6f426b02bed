pub mod error;
pub mod traits;

pub use error::{Result, SorError};
pub use traits::{BoundingBox, Validate};
