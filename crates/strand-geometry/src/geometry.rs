//! Curve geometry: buffer bindings, commit, and the per-curve queries used
//! to build and traverse a spatial index.

use std::ops::RangeInclusive;

use log::debug;
use strand_core::traits::{Bounded, Validate};
use strand_core::{GeomId, Result, StrandError, Tolerance};
use strand_math::time::{time_segment, time_segment_range};
use strand_math::{
    Aabb3, Affine3A, Frame, LinearBounds, Mat3, Point3, TimeRange, Vec4, Vec4Swizzles, Vector3,
};

use crate::buffer::{NativeBuffers, RawBuffer};
use crate::curve::{tessellated_bounds, Basis, CurveSegment, Form, Segment};

/// Flag bit marking a curve as the first segment of its strand.
pub const STRAND_START: u8 = 0x1;
/// Flag bit marking a curve as the last segment of its strand.
pub const STRAND_END: u8 = 0x2;

const DEFAULT_TESSELLATION_RATE: u32 = 4;

/// An array of curves over shared vertex buffers.
///
/// Each curve is four consecutive (position, radius) control points,
/// addressed through a per-curve start index. Raw buffers are bound with
/// arbitrary strides and materialized into dense native arrays by
/// [`commit`](Self::commit); every query below reads only the native
/// arrays, so queries for disjoint curves may run concurrently between
/// commits.
pub struct CurveGeometry {
    id: GeomId,
    basis: Basis,
    form: Form,
    tessellation_rate: u32,
    num_time_steps: usize,
    tolerance: Tolerance,

    raw_curves: Option<RawBuffer>,
    raw_vertices: Vec<Option<RawBuffer>>,
    raw_flags: Option<RawBuffer>,
    attributes: Vec<Option<RawBuffer>>,

    native: NativeBuffers,
}

impl CurveGeometry {
    pub fn new(id: GeomId, basis: Basis, form: Form) -> Self {
        Self {
            id,
            basis,
            form,
            tessellation_rate: DEFAULT_TESSELLATION_RATE,
            num_time_steps: 1,
            tolerance: Tolerance::default(),
            raw_curves: None,
            raw_vertices: vec![None],
            raw_flags: None,
            attributes: Vec::new(),
            native: NativeBuffers::default(),
        }
    }

    pub fn id(&self) -> GeomId {
        self.id
    }

    pub fn basis(&self) -> Basis {
        self.basis
    }

    pub fn form(&self) -> Form {
        self.form
    }

    pub fn tessellation_rate(&self) -> u32 {
        self.tessellation_rate
    }

    /// Set the number of linear sub-segments used to bound flat curves.
    /// Affects only bounding tightness, never correctness.
    pub fn set_tessellation_rate(&mut self, rate: u32) {
        self.tessellation_rate = rate.max(1);
    }

    pub fn num_time_steps(&self) -> usize {
        self.num_time_steps
    }

    pub fn num_time_segments(&self) -> usize {
        self.num_time_steps - 1
    }

    /// Resize the per-timestep vertex buffer slots. Existing bindings for
    /// surviving timesteps are kept.
    pub fn set_num_time_steps(&mut self, n: usize) -> Result<()> {
        if n == 0 {
            return Err(StrandError::InvalidOperation(
                "geometry needs at least one timestep".into(),
            ));
        }
        self.num_time_steps = n;
        self.raw_vertices.resize(n, None);
        Ok(())
    }

    /// Size the attribute slot table. Attribute buffers are carried for
    /// downstream interpolation and never interpreted here.
    pub fn set_vertex_attribute_count(&mut self, n: usize) {
        self.attributes.resize(n, None);
    }

    pub fn set_curve_buffer(&mut self, buffer: RawBuffer) {
        self.raw_curves = Some(buffer);
    }

    pub fn set_vertex_buffer(&mut self, timestep: usize, buffer: RawBuffer) -> Result<()> {
        let slot = self.raw_vertices.get_mut(timestep).ok_or_else(|| {
            StrandError::Buffer(format!(
                "vertex timestep {} out of range ({} timesteps)",
                timestep, self.num_time_steps
            ))
        })?;
        *slot = Some(buffer);
        Ok(())
    }

    pub fn set_flags_buffer(&mut self, buffer: RawBuffer) {
        self.raw_flags = Some(buffer);
    }

    pub fn set_attribute_buffer(&mut self, slot: usize, buffer: RawBuffer) -> Result<()> {
        let entry = self.attributes.get_mut(slot).ok_or_else(|| {
            StrandError::Buffer(format!("attribute slot {} out of range", slot))
        })?;
        *entry = Some(buffer);
        Ok(())
    }

    pub fn attribute_buffer(&self, slot: usize) -> Option<&RawBuffer> {
        self.attributes.get(slot).and_then(Option::as_ref)
    }

    /// Materialize dense native buffers from the bound raw buffers.
    ///
    /// All timestep buffers must be bound and equally sized. The previous
    /// native buffers are replaced wholesale; callers must not overlap a
    /// commit with in-flight queries.
    pub fn commit(&mut self) -> Result<()> {
        let raw_curves = self.raw_curves.as_ref().ok_or_else(|| {
            StrandError::Commit("no curve index buffer bound".into())
        })?;
        let mut curves = Vec::with_capacity(raw_curves.count());
        for i in 0..raw_curves.count() {
            curves.push(raw_curves.read_u32(i)?);
        }

        let mut vertices = Vec::with_capacity(self.num_time_steps);
        let mut expected_len = None;
        for (t, slot) in self.raw_vertices.iter().enumerate() {
            let buf = slot.as_ref().ok_or_else(|| {
                StrandError::Commit(format!("no vertex buffer bound for timestep {}", t))
            })?;
            match expected_len {
                None => expected_len = Some(buf.count()),
                Some(len) if len != buf.count() => {
                    return Err(StrandError::Commit(format!(
                        "vertex buffer for timestep {} has {} elements, expected {}",
                        t,
                        buf.count(),
                        len
                    )))
                }
                _ => {}
            }
            let mut verts = Vec::with_capacity(buf.count());
            for i in 0..buf.count() {
                verts.push(buf.read_vec4(i)?);
            }
            vertices.push(verts);
        }

        let flags = match &self.raw_flags {
            Some(buf) => {
                if buf.count() < curves.len() {
                    return Err(StrandError::Commit(format!(
                        "flags buffer has {} entries for {} curves",
                        buf.count(),
                        curves.len()
                    )));
                }
                let mut bytes = Vec::with_capacity(curves.len());
                for i in 0..curves.len() {
                    bytes.push(buf.read_u8(i)?);
                }
                Some(bytes)
            }
            None => None,
        };

        self.native = NativeBuffers {
            curves,
            vertices,
            flags,
        };
        debug!(
            "{}: committed {} curves, {} vertices, {} timesteps",
            self.id,
            self.native.num_curves(),
            self.native.num_vertices(),
            self.num_time_steps
        );
        Ok(())
    }

    pub fn num_curves(&self) -> usize {
        self.native.num_curves()
    }

    pub fn num_vertices(&self) -> usize {
        self.native.num_vertices()
    }

    /// Vertex count of one timestep buffer. Equal across timesteps after a
    /// successful commit.
    pub fn num_vertices_at(&self, itime: usize) -> usize {
        self.native.vertices[itime].len()
    }

    /// Start index of the `i`'th curve's control points.
    pub fn curve(&self, i: usize) -> u32 {
        self.native.curves[i]
    }

    /// The `i`'th vertex of the `itime`'th timestep.
    pub fn vertex(&self, i: usize, itime: usize) -> Vec4 {
        self.native.vertices[itime][i]
    }

    /// The `i`'th vertex of the first timestep (untimed fast path).
    pub fn vertex0(&self, i: usize) -> Vec4 {
        self.native.vertices[0][i]
    }

    pub fn radius(&self, i: usize, itime: usize) -> f32 {
        self.native.vertices[itime][i].w
    }

    /// The `i`'th vertex at continuous time `u`, blended between the
    /// bracketing timesteps.
    pub fn vertex_blended(&self, i: usize, u: f32) -> Vec4 {
        if self.num_time_steps == 1 {
            return self.vertex0(i);
        }
        let (itime, f) = time_segment(u, self.num_time_segments());
        self.vertex(i, itime).lerp(self.vertex(i, itime + 1), f)
    }

    /// Strand start/end bits of curve `i`, shifted into the top of a mask
    /// word for downstream continuity logic.
    pub fn start_end_mask(&self, i: usize) -> u32 {
        match &self.native.flags {
            Some(flags) => ((flags[i] & (STRAND_START | STRAND_END)) as u32) << 30,
            None => 0,
        }
    }

    /// The four control points of curve `i` at a discrete timestep.
    pub fn gather(&self, i: usize, itime: usize) -> [Vec4; 4] {
        let index = self.curve(i) as usize;
        [
            self.vertex(index, itime),
            self.vertex(index + 1, itime),
            self.vertex(index + 2, itime),
            self.vertex(index + 3, itime),
        ]
    }

    /// The four control points of curve `i` at continuous time `u`.
    ///
    /// Both bracketing timesteps are gathered and blended pointwise, before
    /// any bounding, so bounds of the blend stay conservative.
    pub fn gather_blended(&self, i: usize, u: f32) -> [Vec4; 4] {
        if self.num_time_steps == 1 {
            return self.gather(i, 0);
        }
        let (itime, f) = time_segment(u, self.num_time_segments());
        let a = self.gather(i, itime);
        let b = self.gather(i, itime + 1);
        [
            a[0].lerp(b[0], f),
            a[1].lerp(b[1], f),
            a[2].lerp(b[2], f),
            a[3].lerp(b[3], f),
        ]
    }

    /// The evaluation strategy for curve `i` at a discrete timestep.
    pub fn segment(&self, i: usize, itime: usize) -> Segment {
        self.basis.segment(self.gather(i, itime))
    }

    fn segment_bounds(&self, seg: &Segment) -> Aabb3 {
        match self.form {
            Form::Flat => tessellated_bounds(seg, self.tessellation_rate),
            Form::Round => seg.accurate_bounds(),
        }
    }

    /// Check curve `i` at one timestep: indices in bounds, positions
    /// finite, radii finite and non-negative.
    pub fn valid(&self, i: usize, itime: usize) -> bool {
        self.valid_range(i, itime..=itime)
    }

    /// Check curve `i` at every timestep of the inclusive range. Motion
    /// bounds need all touched timesteps sound at once.
    pub fn valid_range(&self, i: usize, itimes: RangeInclusive<usize>) -> bool {
        let index = self.curve(i) as usize;
        if index + 3 >= self.num_vertices() {
            return false;
        }
        for itime in itimes {
            let cp = self.gather(i, itime);
            for v in cp {
                if !v.w.is_finite() || v.w < 0.0 {
                    return false;
                }
            }
            for v in cp {
                if !v.xyz().is_finite() {
                    return false;
                }
            }
        }
        true
    }

    /// Bounds of curve `i` at timestep 0 if it passes the build check, used
    /// when emitting primitive references.
    ///
    /// The check requires in-range indices and finite positions and radii
    /// at every timestep, but unlike [`valid`](Self::valid) it does not
    /// reject negative radii; coarse build-time averaging tolerates them.
    pub fn build_bounds(&self, i: usize) -> Option<Aabb3> {
        let index = self.curve(i) as usize;
        if index + 3 >= self.num_vertices() {
            return None;
        }
        for itime in 0..self.num_time_steps {
            for v in self.gather(i, itime) {
                if !v.w.is_finite() {
                    return None;
                }
                if !v.xyz().is_finite() {
                    return None;
                }
            }
        }
        Some(self.bounds(i, 0))
    }

    /// Control points of curve `i` averaged across the timestep pair
    /// `(itime, itime + 1)`, for coarse secondary indexing. `None` if any
    /// endpoint vertex is non-finite or any radius negative.
    pub fn averaged_control_points(&self, i: usize, itime: usize) -> Option<[Vec4; 4]> {
        let index = self.curve(i) as usize;
        if index + 3 >= self.num_vertices() {
            return None;
        }
        let a = self.gather(i, itime);
        let b = self.gather(i, itime + 1);
        for v in a.iter().chain(b.iter()) {
            if !v.is_finite() {
                return None;
            }
        }
        if a.iter().any(|v| v.w < 0.0) || b.iter().any(|v| v.w < 0.0) {
            return None;
        }
        Some([
            0.5 * (a[0] + b[0]),
            0.5 * (a[1] + b[1]),
            0.5 * (a[2] + b[2]),
            0.5 * (a[3] + b[3]),
        ])
    }

    /// Bounds of curve `i` at a discrete timestep.
    pub fn bounds(&self, i: usize, itime: usize) -> Aabb3 {
        let seg = self.segment(i, itime);
        self.segment_bounds(&seg)
    }

    /// Bounds of curve `i` with control points mapped through an affine
    /// space first; radii pass through unchanged.
    pub fn bounds_in(&self, space: &Affine3A, i: usize, itime: usize) -> Aabb3 {
        let cp = self
            .gather(i, itime)
            .map(|v| space.transform_point3(v.xyz()).extend(v.w));
        let seg = self.basis.segment(cp);
        self.segment_bounds(&seg)
    }

    /// Bounds of curve `i` recentered by `offset`, scaled by `scale`
    /// (radii by `r_scale * scale`), then rotated into `space`. Used for
    /// bounding inside a normalized node-local reference frame.
    pub fn bounds_rescaled(
        &self,
        offset: Point3,
        scale: f32,
        r_scale: f32,
        space: &Mat3,
        i: usize,
        itime: usize,
    ) -> Aabb3 {
        let r_scale = r_scale * scale;
        let cp = self
            .gather(i, itime)
            .map(|v| (*space * ((v.xyz() - offset) * scale)).extend(v.w * r_scale));
        let seg = self.basis.segment(cp);
        self.segment_bounds(&seg)
    }

    /// Linear bounds of curve `i` over one time segment.
    pub fn linear_bounds_pair(&self, i: usize, itime: usize) -> LinearBounds {
        LinearBounds::new(self.bounds(i, itime), self.bounds(i, itime + 1))
    }

    /// Linear bounds of curve `i` over an arbitrary time window.
    pub fn linear_bounds(&self, i: usize, window: TimeRange) -> LinearBounds {
        LinearBounds::from_time_samples(window, self.num_time_segments(), |itime| {
            self.bounds(i, itime)
        })
    }

    /// Linear bounds over a window, with control points mapped through an
    /// affine space.
    pub fn linear_bounds_in(&self, space: &Affine3A, i: usize, window: TimeRange) -> LinearBounds {
        LinearBounds::from_time_samples(window, self.num_time_segments(), |itime| {
            self.bounds_in(space, i, itime)
        })
    }

    /// Linear bounds over a window in a normalized node-local frame.
    pub fn linear_bounds_rescaled(
        &self,
        offset: Point3,
        scale: f32,
        r_scale: f32,
        space: &Mat3,
        i: usize,
        window: TimeRange,
    ) -> LinearBounds {
        LinearBounds::from_time_samples(window, self.num_time_segments(), |itime| {
            self.bounds_rescaled(offset, scale, r_scale, space, i, itime)
        })
    }

    /// Validity-guarded linear bounds: `None` if any timestep the window
    /// touches is invalid, so a partially degenerate moving curve is never
    /// partially bounded.
    pub fn linear_bounds_checked(&self, i: usize, window: TimeRange) -> Option<LinearBounds> {
        let (lo, hi) = time_segment_range(window, self.num_time_segments());
        if !self.valid_range(i, lo..=hi) {
            return None;
        }
        Some(self.linear_bounds(i, window))
    }

    /// Orthonormal frame aligned with curve `i`, for tight local-space
    /// bounding.
    ///
    /// The primary axis follows the start-to-end chord, falling back to the
    /// initial tangent and then to `+Z` as each degenerates. The secondary
    /// axis comes from the chord/tangent cross product, falling back to a
    /// deterministic completion.
    pub fn aligned_frame(&self, i: usize) -> Frame {
        let seg = self.segment(i, 0);
        let chord = seg.end() - seg.start();
        let d0 = seg.tangent_at(0.0);

        let axis_z = if !self.tolerance.is_degenerate_sq(chord.length_squared()) {
            chord.normalize()
        } else if !self.tolerance.is_degenerate_sq(d0.length_squared()) {
            d0.normalize()
        } else {
            Vector3::Z
        };

        let axis_y = axis_z.cross(d0);
        if !self.tolerance.is_degenerate_sq(axis_y.length_squared()) {
            let y = axis_y.normalize();
            let x = y.cross(axis_z).normalize();
            Frame::new(x, y, axis_z)
        } else {
            Frame::from_z(axis_z)
        }
    }

    /// Frame for a moving curve, taken from the single timestep nearest the
    /// middle of the window rather than recomputed per instant.
    pub fn aligned_frame_mb(&self, i: usize, window: TimeRange) -> Frame {
        let (lo, hi) = time_segment_range(window, self.num_time_segments());
        let itime = (lo + hi) / 2;
        let seg = self.segment(i, itime);
        let chord = seg.end() - seg.start();
        if !self.tolerance.is_degenerate_sq(chord.length_squared()) {
            Frame::from_z(chord.normalize())
        } else {
            Frame::from_z(Vector3::Z)
        }
    }

    /// Chord vector of curve `i` at timestep 0, a cheap representative
    /// orientation.
    pub fn direction(&self, i: usize) -> Vector3 {
        self.direction_at(i, 0)
    }

    /// Chord vector of curve `i` at a discrete timestep.
    pub fn direction_at(&self, i: usize, itime: usize) -> Vector3 {
        let seg = self.segment(i, itime);
        seg.end() - seg.start()
    }
}

impl Validate for CurveGeometry {
    /// Strict post-commit check: every curve's control points in range and
    /// every position finite. Per-curve degeneracies (NaN radii, negative
    /// radii) are left to the per-primitive checks, which exclude rather
    /// than fail.
    fn validate(&self) -> Result<()> {
        let num_vertices = self.num_vertices();
        for (i, &index) in self.native.curves.iter().enumerate() {
            if index as usize + 3 >= num_vertices {
                return Err(StrandError::Geometry(format!(
                    "curve {}: control points {}..={} past vertex count {}",
                    i,
                    index,
                    index as usize + 3,
                    num_vertices
                )));
            }
        }
        for (t, verts) in self.native.vertices.iter().enumerate() {
            for (k, v) in verts.iter().enumerate() {
                if !v.xyz().is_finite() {
                    return Err(StrandError::Geometry(format!(
                        "vertex {} at timestep {} is not finite",
                        k, t
                    )));
                }
            }
        }
        Ok(())
    }
}

impl Bounded for CurveGeometry {
    type Bounds = Aabb3;

    /// Union of the build bounds of every buildable curve.
    fn bounds(&self) -> Aabb3 {
        let mut out = Aabb3::EMPTY;
        for i in 0..self.num_curves() {
            if let Some(b) = self.build_bounds(i) {
                out = out.merge(&b);
            }
        }
        out
    }
}
