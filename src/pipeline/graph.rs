use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use super::transform::{apply_chunk, ElementwiseTransform};
use super::{NodeId, PipelineError};
use crate::grid::{ChunkGeometry, ChunkedArray};

/// Deferred array expression
pub(crate) enum Node {
    /// Field supplied by the caller; already materialized
    Input(Arc<ChunkedArray>),
    /// Transform applied to upstream nodes; evaluated only on demand
    Apply {
        transform: Arc<dyn ElementwiseTransform>,
        operands: Vec<NodeId>,
        geometry: ChunkGeometry,
    },
}

impl Node {
    pub(crate) fn geometry(&self) -> &ChunkGeometry {
        match self {
            Node::Input(array) => array.geometry(),
            Node::Apply { geometry, .. } => geometry,
        }
    }

    pub(crate) fn label(&self) -> &str {
        match self {
            Node::Input(array) => array.name(),
            Node::Apply { transform, .. } => transform.name(),
        }
    }
}

impl fmt::Debug for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::Input(array) => f
                .debug_tuple("Input")
                .field(&array.name())
                .field(&array.shape())
                .finish(),
            Node::Apply {
                transform,
                operands,
                ..
            } => f
                .debug_struct("Apply")
                .field("transform", &transform.name())
                .field("operands", operands)
                .finish(),
        }
    }
}

/// Values of one chunk of the target node
pub(crate) struct ChunkOutput {
    pub values: Vec<f64>,
    /// Transform nodes evaluated for this chunk
    pub evaluations: usize,
}

/// Append-only graph; operands always have smaller ids than their consumers.
#[derive(Debug, Default)]
pub(crate) struct LazyGraph {
    nodes: Vec<Node>,
}

impl LazyGraph {
    pub(crate) fn push(&mut self, node: Node) -> NodeId {
        self.nodes.push(node);
        NodeId(self.nodes.len() - 1)
    }

    pub(crate) fn node(&self, id: NodeId) -> Result<&Node, PipelineError> {
        self.nodes.get(id.0).ok_or(PipelineError::UnknownNode(id))
    }

    pub(crate) fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Every node `target` depends on, itself included, in ascending id order
    pub(crate) fn upstream(&self, target: NodeId) -> Result<Vec<NodeId>, PipelineError> {
        self.node(target)?;

        let mut seen = vec![false; self.nodes.len()];
        let mut stack = vec![target];
        while let Some(id) = stack.pop() {
            if std::mem::replace(&mut seen[id.0], true) {
                continue;
            }
            if let Node::Apply { operands, .. } = &self.nodes[id.0] {
                stack.extend(operands.iter().copied());
            }
        }

        Ok(seen
            .iter()
            .enumerate()
            .filter(|(_, reached)| **reached)
            .map(|(i, _)| NodeId(i))
            .collect())
    }

    /// Evaluate `plan` (from [`LazyGraph::upstream`]) for one chunk.
    ///
    /// Each node in the plan is computed once for the chunk and shared by all
    /// of its consumers.
    pub(crate) fn evaluate_chunk(
        &self,
        plan: &[NodeId],
        target: NodeId,
        chunk: usize,
    ) -> Result<ChunkOutput, PipelineError> {
        let mut values: HashMap<NodeId, Vec<f64>> = HashMap::with_capacity(plan.len());
        let mut evaluations = 0;

        for &id in plan {
            let computed = match self.node(id)? {
                Node::Input(array) => array.chunk_values(chunk)?,
                Node::Apply {
                    transform,
                    operands,
                    geometry,
                } => {
                    let len = geometry.chunk_len(chunk)?;
                    let inputs = operands
                        .iter()
                        .map(|op| {
                            values
                                .get(op)
                                .map(Vec::as_slice)
                                .ok_or(PipelineError::UnknownNode(*op))
                        })
                        .collect::<Result<Vec<&[f64]>, _>>()?;
                    evaluations += 1;
                    apply_chunk(transform.as_ref(), &inputs, len)?
                }
            };
            values.insert(id, computed);
        }

        let values = values
            .remove(&target)
            .ok_or(PipelineError::UnknownNode(target))?;
        Ok(ChunkOutput {
            values,
            evaluations,
        })
    }
}
