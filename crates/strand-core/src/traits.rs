use crate::error::Result;

/// Validate structural integrity of a committed geometry object.
pub trait Validate {
    fn validate(&self) -> Result<()>;
}

/// Compute an axis-aligned bounding box.
pub trait Bounded {
    type Bounds;
    fn bounds(&self) -> Self::Bounds;
}
