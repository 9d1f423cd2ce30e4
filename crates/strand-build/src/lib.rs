//! Primitive references and aggregate statistics handed to the
//! spatial-structure builder.

pub mod primref;
pub mod refs;
pub mod stats;

pub use primref::{PrimRef, PrimRefMB};
pub use refs::{
    create_prim_refs, create_prim_refs_mb, create_prim_refs_mb_par, create_prim_refs_par,
};
pub use stats::{BuildStats, BuildStatsMB};
