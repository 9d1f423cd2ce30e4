//! Raw strided buffer views and the dense native buffers derived from them
//! at commit.

use std::sync::Arc;

use strand_core::{Result, StrandError};
use strand_math::Vec4;

/// An externally supplied buffer view: shared bytes plus offset, byte
/// stride, and element count.
///
/// Bound before commit; never read on the query path. Commit materializes
/// dense copies instead, so odd strides and alignment only cost once.
#[derive(Debug, Clone)]
pub struct RawBuffer {
    data: Arc<[u8]>,
    offset: usize,
    stride: usize,
    count: usize,
}

impl RawBuffer {
    pub fn new(data: Arc<[u8]>, offset: usize, stride: usize, count: usize) -> Self {
        Self {
            data,
            offset,
            stride,
            count,
        }
    }

    /// A tightly packed view over the whole slice.
    pub fn tight(data: Arc<[u8]>, elem_size: usize) -> Self {
        let count = if elem_size == 0 {
            0
        } else {
            data.len() / elem_size
        };
        Self {
            data,
            offset: 0,
            stride: elem_size,
            count,
        }
    }

    /// Convenience view over `(x, y, z, radius)` vertices.
    pub fn from_vec4s(vertices: &[Vec4]) -> Self {
        let bytes: &[u8] = bytemuck::cast_slice(vertices);
        Self::tight(Arc::from(bytes), 16)
    }

    /// Convenience view over curve start indices.
    pub fn from_u32s(indices: &[u32]) -> Self {
        let bytes: &[u8] = bytemuck::cast_slice(indices);
        Self::tight(Arc::from(bytes), 4)
    }

    /// Convenience view over per-curve flag bytes.
    pub fn from_bytes(flags: &[u8]) -> Self {
        Self::tight(Arc::from(flags), 1)
    }

    pub fn count(&self) -> usize {
        self.count
    }

    fn element(&self, i: usize, size: usize) -> Result<&[u8]> {
        let begin = self.offset + i * self.stride;
        let end = begin + size;
        if i >= self.count || end > self.data.len() {
            return Err(StrandError::Buffer(format!(
                "element {} ({} bytes at offset {}) past buffer of {} bytes",
                i,
                size,
                begin,
                self.data.len()
            )));
        }
        Ok(&self.data[begin..end])
    }

    pub fn read_u32(&self, i: usize) -> Result<u32> {
        Ok(bytemuck::pod_read_unaligned(self.element(i, 4)?))
    }

    pub fn read_u8(&self, i: usize) -> Result<u8> {
        Ok(self.element(i, 1)?[0])
    }

    pub fn read_vec4(&self, i: usize) -> Result<Vec4> {
        let v: [f32; 4] = bytemuck::pod_read_unaligned(self.element(i, 16)?);
        Ok(Vec4::from_array(v))
    }
}

/// Dense, committed topology and vertex arrays.
///
/// One vertex vec per timestep, all the same length; index 0 is the fast
/// path for untimed queries. Replaced wholesale by each commit.
#[derive(Debug, Clone, Default)]
pub struct NativeBuffers {
    pub curves: Vec<u32>,
    pub vertices: Vec<Vec<Vec4>>,
    pub flags: Option<Vec<u8>>,
}

impl NativeBuffers {
    pub fn num_curves(&self) -> usize {
        self.curves.len()
    }

    pub fn num_vertices(&self) -> usize {
        self.vertices.first().map_or(0, Vec::len)
    }
}
