pub mod error;
pub mod id;
pub mod tolerance;
pub mod traits;

pub use error::{Result, StrandError};
pub use id::GeomId;
pub use tolerance::Tolerance;
