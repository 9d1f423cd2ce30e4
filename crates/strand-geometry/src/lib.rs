//! Strand geometry: curve bases, buffer model, and the bounding queries a
//! spatial-index builder needs.

pub mod buffer;
pub mod curve;
pub mod geometry;

pub use buffer::{NativeBuffers, RawBuffer};
pub use curve::{tessellated_bounds, Basis, CurveSegment, Form, Segment};
pub use geometry::CurveGeometry;
