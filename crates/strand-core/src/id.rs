use std::sync::atomic::{AtomicU32, Ordering};

static NEXT_ID: AtomicU32 = AtomicU32::new(0);

/// Identifier of a geometry object within a scene.
///
/// Every primitive reference carries the id of its owning geometry so the
/// spatial-structure builder can map a leaf entry back to the curve it
/// bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct GeomId(u32);

impl GeomId {
    /// Allocate a fresh, process-unique id.
    pub fn fresh() -> Self {
        Self(NEXT_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// Wrap an id assigned by an external scene container.
    pub fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    pub fn value(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for GeomId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "geom#{}", self.0)
    }
}
