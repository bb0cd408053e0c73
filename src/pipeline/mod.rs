//! Lazy elementwise transforms over aligned chunked fields.
//!
//! A [`Pipeline`] records inputs and transform applications as graph nodes
//! without computing anything. [`Pipeline::materialize`] evaluates one node:
//! every chunk of the requested node is computed on the worker pool by
//! walking the node's upstream sub-graph for that chunk only, then the chunks
//! are assembled in chunk order. The result never depends on the chunk
//! shape, the worker count or the order in which chunks finish.

mod graph;
pub mod transform;

use log::info;
use std::sync::Arc;
use std::time::{Duration, Instant};
use thiserror::Error;

use crate::grid::{ChunkGeometry, ChunkedArray, GridError};
use crate::parallel::{ChunkExecutor, ExecutorError};
use graph::{LazyGraph, Node};

pub use transform::{
    AdiabaticWetBulbTemperature, ElementwiseTransform, FnTransform, KelvinToCelsius,
    PseudoadiabatTemperature, SpecificHumidityFromDewpoint, TransformError,
    WetBulbPotentialTemperature,
};

/// Errors raised while building or materializing a graph
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PipelineError {
    #[error("Unknown graph node {0:?}")]
    UnknownNode(NodeId),

    #[error("{transform} takes {expected} operands, got {found}")]
    ArityMismatch {
        transform: String,
        expected: usize,
        found: usize,
    },

    #[error("Operand {operand} has geometry {found:?}, expected {expected:?}")]
    ShapeMismatch {
        operand: usize,
        expected: ChunkGeometry,
        found: ChunkGeometry,
    },

    #[error("Chunk {chunk} failed: {message}")]
    ChunkComputeFailure { chunk: usize, message: String },

    #[error("Worker pool error: {0}")]
    ThreadPool(String),

    #[error(transparent)]
    Transform(#[from] TransformError),

    #[error(transparent)]
    Grid(#[from] GridError),
}

impl From<ExecutorError> for PipelineError {
    fn from(err: ExecutorError) -> Self {
        match err {
            ExecutorError::ThreadPool(msg) => PipelineError::ThreadPool(msg),
            ExecutorError::ChunkFailed { chunk, message } => {
                PipelineError::ChunkComputeFailure { chunk, message }
            }
        }
    }
}

/// Handle to a node of a [`Pipeline`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

/// Whether a node holds data or only describes how to compute it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeState {
    Materialized,
    Deferred,
}

/// Statistics of one [`Pipeline::materialize`] call
#[derive(Debug, Clone)]
pub struct MaterializeReport {
    pub chunks: usize,
    /// Transform nodes in the evaluated sub-graph
    pub transform_nodes: usize,
    /// (transform node, chunk) evaluations performed
    pub node_evaluations: usize,
    pub workers: usize,
    pub elapsed: Duration,
}

/// Result of [`Pipeline::materialize`]
#[derive(Debug, Clone)]
pub struct Materialized {
    pub array: ChunkedArray,
    pub report: MaterializeReport,
}

/// Builder and evaluator of a lazy transform graph
#[derive(Debug, Default)]
pub struct Pipeline {
    graph: LazyGraph,
}

impl Pipeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a caller-supplied field
    pub fn input(&mut self, array: ChunkedArray) -> NodeId {
        self.graph.push(Node::Input(Arc::new(array)))
    }

    /// Add `transform` applied to `operands`; nothing is computed.
    ///
    /// Fails when the operand count differs from the transform's arity or
    /// when operands differ in shape or chunk shape.
    pub fn register<T>(&mut self, transform: T, operands: &[NodeId]) -> Result<NodeId, PipelineError>
    where
        T: ElementwiseTransform + 'static,
    {
        self.register_shared(Arc::new(transform), operands)
    }

    /// [`Pipeline::register`] for a transform shared between graphs
    pub fn register_shared(
        &mut self,
        transform: Arc<dyn ElementwiseTransform>,
        operands: &[NodeId],
    ) -> Result<NodeId, PipelineError> {
        if operands.is_empty() || operands.len() != transform.arity() {
            return Err(PipelineError::ArityMismatch {
                transform: transform.name().to_string(),
                expected: transform.arity(),
                found: operands.len(),
            });
        }

        let expected = self.graph.node(operands[0])?.geometry().clone();
        for (operand, &id) in operands.iter().enumerate().skip(1) {
            let found = self.graph.node(id)?.geometry();
            if *found != expected {
                return Err(PipelineError::ShapeMismatch {
                    operand,
                    expected,
                    found: found.clone(),
                });
            }
        }

        Ok(self.graph.push(Node::Apply {
            transform,
            operands: operands.to_vec(),
            geometry: expected,
        }))
    }

    pub fn state(&self, node: NodeId) -> Result<NodeState, PipelineError> {
        Ok(match self.graph.node(node)? {
            Node::Input(_) => NodeState::Materialized,
            Node::Apply { .. } => NodeState::Deferred,
        })
    }

    pub fn geometry(&self, node: NodeId) -> Result<&ChunkGeometry, PipelineError> {
        Ok(self.graph.node(node)?.geometry())
    }

    /// Number of nodes in the graph
    pub fn len(&self) -> usize {
        self.graph.len()
    }

    pub fn is_empty(&self) -> bool {
        self.graph.len() == 0
    }

    /// Compute `node` on `executor` and assemble it into one field.
    ///
    /// Blocks until every chunk is done. Any chunk failure aborts the whole
    /// call and no field is returned.
    pub fn materialize(
        &self,
        node: NodeId,
        executor: &ChunkExecutor,
    ) -> Result<Materialized, PipelineError> {
        let start = Instant::now();
        let target = self.graph.node(node)?;
        let geometry = target.geometry().clone();
        let (name, units) = match target {
            Node::Input(array) => (array.name().to_string(), array.units().to_string()),
            Node::Apply { transform, .. } => {
                (transform.name().to_string(), transform.units().to_string())
            }
        };

        let plan = self.graph.upstream(node)?;
        let transform_nodes = plan
            .iter()
            .filter(|&&id| matches!(self.graph.node(id), Ok(Node::Apply { .. })))
            .count();
        let chunks = geometry.num_chunks();

        info!(
            "Materializing '{}' {:?}: {} chunks of {:?}, {} transform nodes, {} workers",
            target.label(),
            geometry.shape(),
            chunks,
            geometry.chunk_shape(),
            transform_nodes,
            executor.num_workers()
        );

        let outputs = executor.execute(chunks, |chunk| {
            self.graph.evaluate_chunk(&plan, node, chunk)
        })?;

        let node_evaluations = outputs.iter().map(|o| o.evaluations).sum();
        let values = outputs.into_iter().map(|o| o.values).collect();
        let array = ChunkedArray::assemble(name, units, geometry, values)?;

        let report = MaterializeReport {
            chunks,
            transform_nodes,
            node_evaluations,
            workers: executor.num_workers(),
            elapsed: start.elapsed(),
        };
        info!(
            "Materialized '{}' in {:.3}s ({} undefined elements)",
            array.name(),
            report.elapsed.as_secs_f64(),
            array.count_undefined()
        );

        Ok(Materialized { array, report })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::ChunkedArray;

    fn field(name: &str, values: Vec<f64>, shape: &[usize], chunks: &[usize]) -> ChunkedArray {
        ChunkedArray::from_shape_vec(name, "1", shape, values, chunks).unwrap()
    }

    #[test]
    fn test_register_is_deferred() {
        let mut pipeline = Pipeline::new();
        let a = pipeline.input(field("a", vec![1.0; 4], &[2, 2], &[1, 2]));
        let doubled = pipeline
            .register(FnTransform::new("double", 1, |x| x[0] * 2.0), &[a])
            .unwrap();
        assert_eq!(pipeline.state(a).unwrap(), NodeState::Materialized);
        assert_eq!(pipeline.state(doubled).unwrap(), NodeState::Deferred);
        assert_eq!(pipeline.len(), 2);
    }

    #[test]
    fn test_arity_mismatch() {
        let mut pipeline = Pipeline::new();
        let a = pipeline.input(field("a", vec![1.0; 4], &[4], &[2]));
        let err = pipeline
            .register(WetBulbPotentialTemperature, &[a])
            .unwrap_err();
        assert_eq!(
            err,
            PipelineError::ArityMismatch {
                transform: "wbpt".to_string(),
                expected: 2,
                found: 1
            }
        );
    }

    #[test]
    fn test_chunk_geometry_mismatch() {
        let mut pipeline = Pipeline::new();
        let a = pipeline.input(field("a", vec![1.0; 4], &[4], &[2]));
        let b = pipeline.input(field("b", vec![1.0; 4], &[4], &[1]));
        let err = pipeline
            .register(FnTransform::new("add", 2, |x| x[0] + x[1]), &[a, b])
            .unwrap_err();
        assert!(matches!(err, PipelineError::ShapeMismatch { operand: 1, .. }));
    }

    #[test]
    fn test_unknown_node() {
        let mut other = Pipeline::new();
        let a = other.input(field("a", vec![1.0; 4], &[4], &[2]));
        let b = other.input(field("b", vec![1.0; 4], &[4], &[2]));

        let mut pipeline = Pipeline::new();
        pipeline.input(field("a", vec![1.0; 4], &[4], &[2]));
        let err = pipeline
            .register(FnTransform::new("add", 2, |x| x[0] + x[1]), &[a, b])
            .unwrap_err();
        assert_eq!(err, PipelineError::UnknownNode(b));
    }

    #[test]
    fn test_materialize_input_returns_field() {
        let mut pipeline = Pipeline::new();
        let a = pipeline.input(field("a", vec![1.0, 2.0, 3.0], &[3], &[2]));
        let executor = ChunkExecutor::new(1).unwrap();
        let out = pipeline.materialize(a, &executor).unwrap();
        assert_eq!(out.array.data().as_slice().unwrap(), &[1.0, 2.0, 3.0]);
        assert_eq!(out.report.node_evaluations, 0);
    }

    #[test]
    fn test_materialized_field_takes_transform_name_and_units() {
        let mut pipeline = Pipeline::new();
        let a = pipeline.input(field("a", vec![1.0, 2.0], &[2], &[1]));
        let scaled = pipeline
            .register(
                FnTransform::new("scaled", 1, |x| x[0] * 100.0).with_units("hPa"),
                &[a],
            )
            .unwrap();
        let out = pipeline
            .materialize(scaled, &ChunkExecutor::new(2).unwrap())
            .unwrap();
        assert_eq!(out.array.name(), "scaled");
        assert_eq!(out.array.units(), "hPa");
        assert_eq!(out.array.data().as_slice().unwrap(), &[100.0, 200.0]);
        assert_eq!(out.report.chunks, 2);
        assert_eq!(out.report.node_evaluations, 2);
    }
}
