//! End-to-end reference construction over a committed geometry with a mix
//! of valid and degenerate curves.

use glam::{vec4, Vec4};
use strand_build::{
    create_prim_refs, create_prim_refs_mb, create_prim_refs_mb_par, create_prim_refs_par,
    BuildStats, BuildStatsMB, PrimRef, PrimRefMB,
};
use strand_core::GeomId;
use strand_geometry::{Basis, CurveGeometry, Form, RawBuffer};
use strand_math::{Aabb3, LinearBounds, TimeRange};

/// Three curves; the middle one points past the vertex array.
fn mixed_geometry(steps: &[&[Vec4]]) -> CurveGeometry {
    let mut g = CurveGeometry::new(GeomId::fresh(), Basis::Bezier, Form::Round);
    g.set_num_time_steps(steps.len()).unwrap();
    g.set_curve_buffer(RawBuffer::from_u32s(&[0, 100, 4]));
    for (t, verts) in steps.iter().enumerate() {
        g.set_vertex_buffer(t, RawBuffer::from_vec4s(verts)).unwrap();
    }
    g.commit().unwrap();
    g
}

fn vertices() -> Vec<Vec4> {
    vec![
        vec4(0.0, 0.0, 0.0, 0.1),
        vec4(1.0, 1.0, 0.0, 0.1),
        vec4(2.0, 1.0, 0.0, 0.1),
        vec4(3.0, 0.0, 0.0, 0.1),
        vec4(10.0, 0.0, 0.0, 0.2),
        vec4(11.0, 2.0, 0.0, 0.2),
        vec4(12.0, 2.0, 0.0, 0.2),
        vec4(13.0, 0.0, 0.0, 0.2),
    ]
}

fn empty_refs(n: usize) -> Vec<PrimRef> {
    vec![PrimRef::new(Aabb3::EMPTY, GeomId::from_raw(u32::MAX), u32::MAX); n]
}

fn empty_refs_mb(n: usize) -> Vec<PrimRefMB> {
    vec![
        PrimRefMB::new(
            LinearBounds::EMPTY,
            0,
            TimeRange::full(),
            GeomId::from_raw(u32::MAX),
            u32::MAX,
        );
        n
    ]
}

#[test]
fn test_skips_invalid_and_closes_gaps() {
    let verts = vertices();
    let g = mixed_geometry(&[&verts]);

    let mut out = empty_refs(3);
    let stats = create_prim_refs(&g, 0..3, &mut out, 0);

    assert_eq!(stats.count, 2);
    assert_eq!(out[0].prim_id, 0);
    assert_eq!(out[1].prim_id, 2);
    assert_eq!(out[0].geom_id, g.id());

    let expected = g.bounds(0, 0).merge(&g.bounds(2, 0));
    assert_eq!(stats.geom_bounds, expected);
    assert!(stats
        .centroid_bounds
        .contains_point(out[0].bounds.center()));
}

#[test]
fn test_write_cursor_offsets_output() {
    let verts = vertices();
    let g = mixed_geometry(&[&verts]);

    let mut out = empty_refs(5);
    let stats = create_prim_refs(&g, 0..3, &mut out, 2);
    assert_eq!(stats.count, 2);
    assert_eq!(out[2].prim_id, 0);
    assert_eq!(out[3].prim_id, 2);
    // slots before the cursor are untouched
    assert_eq!(out[0].prim_id, u32::MAX);
}

#[test]
fn test_parallel_matches_sequential() {
    let verts = vertices();
    let g = mixed_geometry(&[&verts]);

    let mut out = empty_refs(3);
    let seq_stats = create_prim_refs(&g, 0..3, &mut out, 0);
    let (par_prims, par_stats) = create_prim_refs_par(&g, 0..3);

    assert_eq!(par_stats, seq_stats);
    assert_eq!(par_prims.len(), 2);
    assert_eq!(&out[..2], par_prims.as_slice());
}

#[test]
fn test_mb_refs_guard_the_whole_window() {
    let t0 = vertices();
    let mut t1 = vertices();
    // break the last curve at the second timestep only
    t1[5].y = f32::NAN;
    let g = mixed_geometry(&[&t0, &t1]);

    let mut out = empty_refs_mb(3);
    let stats = create_prim_refs_mb(&g, TimeRange::full(), 0..3, &mut out, 0);

    // curve 1 is out of range, curve 2 degenerate at t1: only curve 0 survives
    assert_eq!(stats.count, 1);
    assert_eq!(out[0].prim_id, 0);
    assert_eq!(out[0].num_time_segments, 1);
    assert_eq!(stats.max_time_segments, 1);

    // the surviving reference bounds the curve at both timesteps
    assert!(out[0].lbounds.bounds_at(0.0).contains(&g.bounds(0, 0)));
    assert!(out[0].lbounds.bounds_at(1.0).contains(&g.bounds(0, 1)));
}

#[test]
fn test_mb_parallel_matches_sequential() {
    let t0 = vertices();
    let t1: Vec<Vec4> = t0.iter().map(|v| *v + vec4(0.0, 5.0, 0.0, 0.0)).collect();
    let g = mixed_geometry(&[&t0, &t1]);

    let mut out = empty_refs_mb(3);
    let seq_stats: BuildStatsMB = create_prim_refs_mb(&g, TimeRange::full(), 0..3, &mut out, 0);
    let (par_prims, par_stats) = create_prim_refs_mb_par(&g, TimeRange::full(), 0..3);

    assert_eq!(par_stats, seq_stats);
    assert_eq!(&out[..seq_stats.count], par_prims.as_slice());
}

#[test]
fn test_stats_merge_across_disjoint_ranges() {
    let verts = vertices();
    let g = mixed_geometry(&[&verts]);

    let mut out = empty_refs(3);
    let whole: BuildStats = create_prim_refs(&g, 0..3, &mut out, 0);

    let mut left_out = empty_refs(2);
    let mut right_out = empty_refs(2);
    let left = create_prim_refs(&g, 0..2, &mut left_out, 0);
    let right = create_prim_refs(&g, 2..3, &mut right_out, 0);
    assert_eq!(left.merge(&right), whole);
}
