pub mod benchmark;
pub mod config;
pub mod data_io;
pub mod grid;
pub mod math;
pub mod parallel;
pub mod pipeline;
pub mod workflow;

pub use grid::{ChunkGeometry, ChunkSpec, ChunkedArray};
pub use math::{temperature, wbpt};
pub use pipeline::{NodeId, Pipeline, PipelineError};
