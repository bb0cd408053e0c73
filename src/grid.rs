//! Chunked n-dimensional fields.
//!
//! A [`ChunkedArray`] is a contiguous `ndarray` field plus a [`ChunkGeometry`]
//! that divides it into blocks. Blocks are enumerated in row-major order and
//! the last block along an axis may be shorter than the others. Block
//! boundaries carry no meaning for elementwise work.

use ndarray::{ArrayD, IxDyn, Slice};
use std::ops::Range;
use thiserror::Error;

/// Errors raised while describing or assembling chunked fields
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GridError {
    #[error("Chunk specification has {found} axes but the field has {expected}")]
    RankMismatch { expected: usize, found: usize },

    #[error("Chunk size along axis {axis} must be positive")]
    ZeroChunk { axis: usize },

    #[error("Shape {shape:?} needs {expected} values, got {found}")]
    DataLength {
        shape: Vec<usize>,
        expected: usize,
        found: usize,
    },

    #[error("Chunk {chunk} out of range ({count} chunks)")]
    ChunkOutOfRange { chunk: usize, count: usize },

    #[error("Chunk {chunk} holds {found} values, expected {expected}")]
    ChunkLength {
        chunk: usize,
        expected: usize,
        found: usize,
    },
}

/// Chunk size request for one axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChunkSpec {
    /// Let the grid choose from the element budget
    #[default]
    Auto,
    /// Fixed number of elements along the axis
    Explicit(usize),
}

/// Shape of a field and of the blocks it is divided into
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChunkGeometry {
    shape: Vec<usize>,
    chunk_shape: Vec<usize>,
}

impl ChunkGeometry {
    /// Geometry with an explicit block shape.
    ///
    /// Block sizes larger than the axis are clamped to the axis length.
    pub fn new(shape: &[usize], chunk_shape: &[usize]) -> Result<Self, GridError> {
        if chunk_shape.len() != shape.len() {
            return Err(GridError::RankMismatch {
                expected: shape.len(),
                found: chunk_shape.len(),
            });
        }
        if let Some(axis) = chunk_shape.iter().position(|&c| c == 0) {
            return Err(GridError::ZeroChunk { axis });
        }

        let chunk_shape = shape
            .iter()
            .zip(chunk_shape)
            .map(|(&len, &chunk)| chunk.min(len.max(1)))
            .collect();

        Ok(Self {
            shape: shape.to_vec(),
            chunk_shape,
        })
    }

    /// Resolve a per-axis request into a concrete block shape.
    ///
    /// Missing trailing entries count as [`ChunkSpec::Auto`]. Automatic axes
    /// split `target_elements / (product of explicit sizes)` between them,
    /// shortest axis first, so a short axis is taken whole and leaves more of
    /// the budget to the others.
    pub fn resolve(
        shape: &[usize],
        spec: &[ChunkSpec],
        target_elements: usize,
    ) -> Result<Self, GridError> {
        if spec.len() > shape.len() {
            return Err(GridError::RankMismatch {
                expected: shape.len(),
                found: spec.len(),
            });
        }

        let spec_for = |axis: usize| spec.get(axis).copied().unwrap_or_default();
        let mut chunk_shape = vec![0usize; shape.len()];
        let mut explicit_elements = 1usize;
        let mut auto_axes = Vec::new();

        for (axis, &len) in shape.iter().enumerate() {
            match spec_for(axis) {
                ChunkSpec::Explicit(0) => return Err(GridError::ZeroChunk { axis }),
                ChunkSpec::Explicit(n) => {
                    chunk_shape[axis] = n.min(len.max(1));
                    explicit_elements = explicit_elements.saturating_mul(chunk_shape[axis]);
                }
                ChunkSpec::Auto => auto_axes.push(axis),
            }
        }

        auto_axes.sort_by_key(|&axis| (shape[axis], axis));
        let mut budget = (target_elements.max(1) / explicit_elements).max(1) as f64;
        let mut remaining = auto_axes.len();

        for axis in auto_axes {
            let share = budget.powf(1.0 / remaining as f64).floor().max(1.0) as usize;
            let size = share.min(shape[axis].max(1));
            chunk_shape[axis] = size;
            budget = (budget / size as f64).max(1.0);
            remaining -= 1;
        }

        Self::new(shape, &chunk_shape)
    }

    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    pub fn chunk_shape(&self) -> &[usize] {
        &self.chunk_shape
    }

    pub fn ndim(&self) -> usize {
        self.shape.len()
    }

    /// Total number of elements
    pub fn len(&self) -> usize {
        self.shape.iter().product()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of blocks along each axis
    pub fn grid_shape(&self) -> Vec<usize> {
        self.shape
            .iter()
            .zip(&self.chunk_shape)
            .map(|(&len, &chunk)| len.div_ceil(chunk))
            .collect()
    }

    /// Total number of blocks
    pub fn num_chunks(&self) -> usize {
        self.grid_shape().iter().product()
    }

    /// Index ranges covered by block `chunk` (row-major block order)
    pub fn chunk_bounds(&self, chunk: usize) -> Result<Vec<Range<usize>>, GridError> {
        let count = self.num_chunks();
        if chunk >= count {
            return Err(GridError::ChunkOutOfRange { chunk, count });
        }

        let grid = self.grid_shape();
        let mut bounds = vec![0..0; self.ndim()];
        let mut rest = chunk;
        for axis in (0..self.ndim()).rev() {
            let position = rest % grid[axis];
            rest /= grid[axis];
            let start = position * self.chunk_shape[axis];
            let end = (start + self.chunk_shape[axis]).min(self.shape[axis]);
            bounds[axis] = start..end;
        }
        Ok(bounds)
    }

    /// Number of elements in block `chunk`
    pub fn chunk_len(&self, chunk: usize) -> Result<usize, GridError> {
        Ok(self.chunk_bounds(chunk)?.iter().map(|r| r.len()).product())
    }
}

/// Named field with units, stored contiguously and divided into blocks
#[derive(Debug, Clone)]
pub struct ChunkedArray {
    name: String,
    units: String,
    data: ArrayD<f64>,
    geometry: ChunkGeometry,
}

impl ChunkedArray {
    /// Wrap `data` with an explicit block shape
    pub fn new(
        name: impl Into<String>,
        units: impl Into<String>,
        data: ArrayD<f64>,
        chunk_shape: &[usize],
    ) -> Result<Self, GridError> {
        let geometry = ChunkGeometry::new(data.shape(), chunk_shape)?;
        Ok(Self {
            name: name.into(),
            units: units.into(),
            data,
            geometry,
        })
    }

    /// Wrap `data`, resolving the block shape from a per-axis request
    pub fn with_chunks(
        name: impl Into<String>,
        units: impl Into<String>,
        data: ArrayD<f64>,
        spec: &[ChunkSpec],
        target_elements: usize,
    ) -> Result<Self, GridError> {
        let geometry = ChunkGeometry::resolve(data.shape(), spec, target_elements)?;
        Ok(Self {
            name: name.into(),
            units: units.into(),
            data,
            geometry,
        })
    }

    /// Build from row-major values
    pub fn from_shape_vec(
        name: impl Into<String>,
        units: impl Into<String>,
        shape: &[usize],
        values: Vec<f64>,
        chunk_shape: &[usize],
    ) -> Result<Self, GridError> {
        let expected: usize = shape.iter().product();
        if values.len() != expected {
            return Err(GridError::DataLength {
                shape: shape.to_vec(),
                expected,
                found: values.len(),
            });
        }
        let data = ArrayD::from_shape_vec(IxDyn(shape), values).map_err(|_| GridError::DataLength {
            shape: shape.to_vec(),
            expected,
            found: expected,
        })?;
        Self::new(name, units, data, chunk_shape)
    }

    /// Assemble a field from per-block values given in block order
    pub fn assemble(
        name: impl Into<String>,
        units: impl Into<String>,
        geometry: ChunkGeometry,
        chunks: Vec<Vec<f64>>,
    ) -> Result<Self, GridError> {
        let count = geometry.num_chunks();
        if chunks.len() != count {
            return Err(GridError::ChunkOutOfRange {
                chunk: chunks.len(),
                count,
            });
        }

        let mut data = ArrayD::<f64>::zeros(IxDyn(geometry.shape()));
        for (chunk, values) in chunks.into_iter().enumerate() {
            let bounds = geometry.chunk_bounds(chunk)?;
            let mut block = data.slice_each_axis_mut(|ax| Slice::from(bounds[ax.axis.index()].clone()));
            if block.len() != values.len() {
                return Err(GridError::ChunkLength {
                    chunk,
                    expected: block.len(),
                    found: values.len(),
                });
            }
            block
                .iter_mut()
                .zip(values)
                .for_each(|(slot, value)| *slot = value);
        }

        Ok(Self {
            name: name.into(),
            units: units.into(),
            data,
            geometry,
        })
    }

    /// Copy of the values of block `chunk` in row-major order
    pub fn chunk_values(&self, chunk: usize) -> Result<Vec<f64>, GridError> {
        let bounds = self.geometry.chunk_bounds(chunk)?;
        let block = self
            .data
            .slice_each_axis(|ax| Slice::from(bounds[ax.axis.index()].clone()));
        Ok(block.iter().copied().collect())
    }

    /// Same values with a different block shape
    pub fn rechunk(&self, chunk_shape: &[usize]) -> Result<Self, GridError> {
        Ok(Self {
            geometry: ChunkGeometry::new(self.data.shape(), chunk_shape)?,
            ..self.clone()
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn units(&self) -> &str {
        &self.units
    }

    pub fn data(&self) -> &ArrayD<f64> {
        &self.data
    }

    pub fn geometry(&self) -> &ChunkGeometry {
        &self.geometry
    }

    pub fn shape(&self) -> &[usize] {
        self.geometry.shape()
    }

    pub fn rename(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Count of undefined (NaN) elements
    pub fn count_undefined(&self) -> usize {
        self.data.iter().filter(|v| v.is_nan()).count()
    }
}
