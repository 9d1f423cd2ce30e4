//! Primitive-reference construction over a range of curves.

use std::ops::Range;

use rayon::prelude::*;
use strand_geometry::CurveGeometry;
use strand_math::TimeRange;

use crate::primref::{PrimRef, PrimRefMB};
use crate::stats::{BuildStats, BuildStatsMB};

/// Emit one reference per buildable curve in `range`, writing positionally
/// into `out` starting at `cursor`.
///
/// Curves failing the build check are skipped outright: the output stays
/// gap-free and in input order, and the skipped curve simply never reaches
/// the spatial index. Returns the aggregate over everything written; advance
/// the cursor by its `count`.
pub fn create_prim_refs(
    geom: &CurveGeometry,
    range: Range<usize>,
    out: &mut [PrimRef],
    cursor: usize,
) -> BuildStats {
    let mut stats = BuildStats::EMPTY;
    let mut k = cursor;
    for i in range {
        let bounds = match geom.build_bounds(i) {
            Some(b) => b,
            None => continue,
        };
        let prim = PrimRef::new(bounds, geom.id(), i as u32);
        stats.add(&prim);
        out[k] = prim;
        k += 1;
    }
    stats
}

/// Motion-blur variant: references carry validity-guarded linear bounds
/// over `window`, and curves invalid anywhere in the touched timestep range
/// are skipped whole.
pub fn create_prim_refs_mb(
    geom: &CurveGeometry,
    window: TimeRange,
    range: Range<usize>,
    out: &mut [PrimRefMB],
    cursor: usize,
) -> BuildStatsMB {
    let mut stats = BuildStatsMB::EMPTY;
    let mut k = cursor;
    for i in range {
        let lbounds = match geom.linear_bounds_checked(i, window) {
            Some(b) => b,
            None => continue,
        };
        let prim = PrimRefMB::new(
            lbounds,
            geom.num_time_segments() as u32,
            window,
            geom.id(),
            i as u32,
        );
        stats.add(&prim);
        out[k] = prim;
        k += 1;
    }
    stats
}

/// Parallel reference construction.
///
/// Per-curve work is independent and the aggregate is a monoid, so the
/// range folds in parallel and partial results concatenate in index order.
pub fn create_prim_refs_par(
    geom: &CurveGeometry,
    range: Range<usize>,
) -> (Vec<PrimRef>, BuildStats) {
    range
        .into_par_iter()
        .fold(
            || (Vec::new(), BuildStats::EMPTY),
            |(mut prims, mut stats), i| {
                if let Some(bounds) = geom.build_bounds(i) {
                    let prim = PrimRef::new(bounds, geom.id(), i as u32);
                    stats.add(&prim);
                    prims.push(prim);
                }
                (prims, stats)
            },
        )
        .reduce(
            || (Vec::new(), BuildStats::EMPTY),
            |(mut a, sa), (b, sb)| {
                a.extend(b);
                (a, sa.merge(&sb))
            },
        )
}

/// Parallel motion-blur reference construction.
pub fn create_prim_refs_mb_par(
    geom: &CurveGeometry,
    window: TimeRange,
    range: Range<usize>,
) -> (Vec<PrimRefMB>, BuildStatsMB) {
    range
        .into_par_iter()
        .fold(
            || (Vec::new(), BuildStatsMB::EMPTY),
            |(mut prims, mut stats), i| {
                if let Some(lbounds) = geom.linear_bounds_checked(i, window) {
                    let prim = PrimRefMB::new(
                        lbounds,
                        geom.num_time_segments() as u32,
                        window,
                        geom.id(),
                        i as u32,
                    );
                    stats.add(&prim);
                    prims.push(prim);
                }
                (prims, stats)
            },
        )
        .reduce(
            || (Vec::new(), BuildStatsMB::EMPTY),
            |(mut a, sa), (b, sb)| {
                a.extend(b);
                (a, sa.merge(&sb))
            },
        )
}
