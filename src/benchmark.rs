use log::info;
use ndarray::{ArrayD, IxDyn};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::time::{Duration, Instant};

use crate::config::Config;
use crate::data_io::{FieldSource, InMemoryDataset};
use crate::grid::{ChunkSpec, ChunkedArray, GridError};
use crate::parallel::ChunkExecutor;
use crate::workflow::hourly_wet_bulb;

/// Benchmark results for a specific thread count
#[derive(Debug, Clone)]
pub struct BenchmarkResult {
    pub thread_count: usize,
    pub duration: Duration,
    pub elements_per_second: f64,
    pub chunks: usize,
    pub undefined: usize,
    /// Output matches the first configuration bit for bit
    pub identical: bool,
}

/// Complete benchmark suite results
#[derive(Debug, Clone)]
pub struct BenchmarkSuite {
    pub results: Vec<BenchmarkResult>,
    pub shape: Vec<usize>,
    pub chunk_shape: Vec<usize>,
}

/// Plausible hourly surface fields (`sp`, `t2m`, `d2m`) with a fixed seed.
///
/// Dewpoint never exceeds temperature.
pub fn synthetic_surface_fields(
    shape: &[usize],
    chunks: &[ChunkSpec],
    target_chunk_elements: usize,
    seed: u64,
) -> Result<InMemoryDataset, GridError> {
    let mut rng = StdRng::seed_from_u64(seed);
    let len: usize = shape.iter().product();

    let mut sp: Vec<f64> = Vec::with_capacity(len);
    let mut t2m = Vec::with_capacity(len);
    let mut d2m = Vec::with_capacity(len);
    for _ in 0..len {
        let t: f64 = rng.random_range(270.0..310.0);
        sp.push(rng.random_range(95_000.0..103_000.0));
        t2m.push(t);
        d2m.push(t - rng.random_range(0.0..15.0));
    }

    let field = |name: &str, units: &str, values: Vec<f64>| -> Result<ChunkedArray, GridError> {
        let data = ArrayD::from_shape_vec(IxDyn(shape), values).map_err(|_| {
            GridError::DataLength {
                shape: shape.to_vec(),
                expected: len,
                found: len,
            }
        })?;
        ChunkedArray::with_chunks(name, units, data, chunks, target_chunk_elements)
    };

    let mut dataset = InMemoryDataset::new();
    dataset.insert(field("sp", "Pa", sp)?);
    dataset.insert(field("t2m", "K", t2m)?);
    dataset.insert(field("d2m", "K", d2m)?);
    Ok(dataset)
}

impl BenchmarkSuite {
    /// Run the wet-bulb workflow over `source` once per thread count
    pub fn run_suite<S: FieldSource + ?Sized>(
        source: &S,
        config: &Config,
        thread_counts: &[usize],
    ) -> Result<Self, String> {
        let probe = source
            .field(&config.variables.pressure)
            .map_err(|e| e.to_string())?;
        let shape = probe.shape().to_vec();
        let chunk_shape = probe.geometry().chunk_shape().to_vec();

        info!(
            "Starting benchmark suite: shape {:?}, chunks {:?}, thread counts {:?}",
            shape, chunk_shape, thread_counts
        );

        let mut results = Vec::new();
        let mut baseline: Option<Vec<u64>> = None;

        for &thread_count in thread_counts {
            let executor = ChunkExecutor::new(thread_count)
                .map_err(|e| format!("Benchmark setup failed: {}", e))?
                .with_progress_interval(config.pipeline.progress_interval);
            let mut sink = InMemoryDataset::new();

            let start_time = Instant::now();
            let summary = hourly_wet_bulb(source, &mut sink, config, &executor)
                .map_err(|e| format!("Benchmark computation failed: {}", e))?;
            let duration = start_time.elapsed();

            let bits: Vec<u64> = sink
                .get(&summary.output)
                .ok_or_else(|| format!("Output '{}' was not written", summary.output))?
                .data()
                .iter()
                .map(|v| v.to_bits())
                .collect();
            let identical = match &baseline {
                Some(first) => *first == bits,
                None => {
                    baseline = Some(bits);
                    true
                }
            };

            let elements = shape.iter().product::<usize>() as f64;
            let result = BenchmarkResult {
                thread_count,
                duration,
                elements_per_second: elements / duration.as_secs_f64().max(f64::EPSILON),
                chunks: summary.report.chunks,
                undefined: summary.undefined,
                identical,
            };
            info!(
                "{} threads: {:.3}s, {:.0} elements/s",
                thread_count,
                duration.as_secs_f64(),
                result.elements_per_second
            );
            results.push(result);
        }

        Ok(BenchmarkSuite {
            results,
            shape,
            chunk_shape,
        })
    }

    /// True when every configuration produced the same output bits
    pub fn all_identical(&self) -> bool {
        self.results.iter().all(|r| r.identical)
    }

    /// Plain-text performance summary
    pub fn report(&self) -> String {
        let mut report = String::new();

        report.push_str("=== Wet-bulb Pipeline Benchmark ===\n\n");
        report.push_str(&format!("Shape: {:?}\n", self.shape));
        report.push_str(&format!("Chunk shape: {:?}\n\n", self.chunk_shape));

        report.push_str("Threads | Duration (s) | Elements/sec | Chunks | Speedup | Identical\n");
        report.push_str("--------|--------------|--------------|--------|---------|----------\n");

        let baseline_duration = self
            .results
            .first()
            .map(|r| r.duration.as_secs_f64())
            .unwrap_or(1.0);

        for result in &self.results {
            let speedup = baseline_duration / result.duration.as_secs_f64().max(f64::EPSILON);
            report.push_str(&format!(
                "{:7} | {:12.3} | {:12.0} | {:6} | {:6.2}x | {}\n",
                result.thread_count,
                result.duration.as_secs_f64(),
                result.elements_per_second,
                result.chunks,
                speedup,
                if result.identical { "yes" } else { "NO" }
            ));
        }

        if let Some(optimal) = self.find_optimal_thread_count() {
            report.push_str(&format!("\nOptimal thread count: {}\n", optimal));
        }
        if let Some(first) = self.results.first() {
            report.push_str(&format!("Undefined elements: {}\n", first.undefined));
        }

        report
    }

    /// Find the optimal thread count based on performance
    pub fn find_optimal_thread_count(&self) -> Option<usize> {
        self.results
            .iter()
            .min_by_key(|result| result.duration)
            .map(|result| result.thread_count)
    }

    /// Speedup over the first configuration divided by the thread count, in percent
    pub fn get_scaling_efficiency(&self, thread_count: usize) -> Option<f64> {
        let first = self.results.first()?;
        let target_result = self
            .results
            .iter()
            .find(|r| r.thread_count == thread_count)?;

        let speedup = first.duration.as_secs_f64() / target_result.duration.as_secs_f64();
        Some(speedup * first.thread_count as f64 / thread_count as f64 * 100.0)
    }
}
