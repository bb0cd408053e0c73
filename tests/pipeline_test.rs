use newt_rust::data_io::{Attributes, FieldSink, InMemoryDataset};
use newt_rust::grid::{ChunkGeometry, ChunkSpec, ChunkedArray};
use newt_rust::parallel::ChunkExecutor;
use newt_rust::pipeline::{
    ElementwiseTransform, FnTransform, NodeId, Pipeline, PipelineError, PseudoadiabatTemperature,
    TransformError, WetBulbPotentialTemperature,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

const SHAPE: [usize; 3] = [4, 5, 6];

fn len() -> usize {
    SHAPE.iter().product()
}

fn pressure_values() -> Vec<f64> {
    (0..len())
        .map(|i| 30_000.0 + (i * 7919 % 75_000) as f64)
        .collect()
}

fn temperature_values() -> Vec<f64> {
    (0..len())
        .map(|i| 240.0 + (i * 37 % 70) as f64 * 0.9)
        .collect()
}

fn field(name: &str, values: Vec<f64>, chunks: &[usize]) -> ChunkedArray {
    ChunkedArray::from_shape_vec(name, "1", &SHAPE, values, chunks).unwrap()
}

/// `temperature(p, wbpt(p, t)) - t` over the test grid
fn build_round_trip(pipeline: &mut Pipeline, chunks: &[usize]) -> NodeId {
    let p = pipeline.input(field("p", pressure_values(), chunks));
    let t = pipeline.input(field("t", temperature_values(), chunks));
    let thw = pipeline
        .register(WetBulbPotentialTemperature, &[p, t])
        .unwrap();
    let back = pipeline
        .register(PseudoadiabatTemperature, &[p, thw])
        .unwrap();
    pipeline
        .register(FnTransform::new("error", 2, |x| x[0] - x[1]), &[back, t])
        .unwrap()
}

fn bits(array: &ChunkedArray) -> Vec<u64> {
    array.data().iter().map(|v| v.to_bits()).collect()
}

#[test]
fn test_result_independent_of_chunks_and_workers() {
    let mut reference: Option<Vec<u64>> = None;

    for chunks in [[1, 1, 1], [2, 3, 5], [4, 5, 6], [3, 2, 4]] {
        for workers in [1, 2, 4, 8] {
            let mut pipeline = Pipeline::new();
            let node = build_round_trip(&mut pipeline, &chunks);
            let executor = ChunkExecutor::new(workers).unwrap();
            let out = pipeline.materialize(node, &executor).unwrap();

            assert_eq!(out.array.shape(), &SHAPE);
            let out_bits = bits(&out.array);
            match &reference {
                Some(expected) => assert_eq!(
                    &out_bits, expected,
                    "chunks {:?} with {} workers differ",
                    chunks, workers
                ),
                None => reference = Some(out_bits),
            }
        }
    }
}

#[test]
fn test_auto_chunking_matches_explicit() {
    let geometry = ChunkGeometry::resolve(&SHAPE, &[ChunkSpec::Auto], 16).unwrap();
    assert!(geometry.num_chunks() > 1);

    let mut auto_pipeline = Pipeline::new();
    let auto_node = build_round_trip(&mut auto_pipeline, geometry.chunk_shape());
    let mut single_pipeline = Pipeline::new();
    let single_node = build_round_trip(&mut single_pipeline, &SHAPE);

    let executor = ChunkExecutor::new(3).unwrap();
    let auto = auto_pipeline.materialize(auto_node, &executor).unwrap();
    let single = single_pipeline.materialize(single_node, &executor).unwrap();

    assert_eq!(bits(&auto.array), bits(&single.array));
    assert_eq!(auto.report.chunks, geometry.num_chunks());
    assert_eq!(single.report.chunks, 1);
}

#[test]
fn test_round_trip_error_small_where_defined() {
    let mut pipeline = Pipeline::new();
    let node = build_round_trip(&mut pipeline, &[2, 2, 3]);
    let out = pipeline
        .materialize(node, &ChunkExecutor::new(2).unwrap())
        .unwrap();

    let defined: Vec<f64> = out
        .array
        .data()
        .iter()
        .copied()
        .filter(|v| v.is_finite())
        .collect();
    assert!(!defined.is_empty());
    assert!(defined.iter().all(|e| e.abs() < 0.5));
}

#[test]
fn test_undefined_propagates_through_every_depth() {
    let mut values: Vec<f64> = (0..len()).map(|i| i as f64).collect();
    let holes = [0, 17, 59, len() - 1];
    for &i in &holes {
        values[i] = f64::NAN;
    }

    let mut pipeline = Pipeline::new();
    let mut node = pipeline.input(field("x", values, &[2, 2, 4]));
    let executor = ChunkExecutor::new(4).unwrap();

    for depth in 1..=5 {
        node = pipeline
            .register(FnTransform::new("inc", 1, |x| x[0] + 1.0), &[node])
            .unwrap();
        let out = pipeline.materialize(node, &executor).unwrap();

        for (i, v) in out.array.data().iter().enumerate() {
            if holes.contains(&i) {
                assert!(v.is_nan(), "element {} at depth {} should be undefined", i, depth);
            } else {
                assert_eq!(*v, i as f64 + depth as f64);
            }
        }
        assert_eq!(out.array.count_undefined(), holes.len());
    }
}

#[test]
fn test_shared_node_evaluated_once_per_chunk() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);

    let mut pipeline = Pipeline::new();
    let x = pipeline.input(field("x", vec![1.5; len()], &[2, 5, 3]));
    let shared = pipeline
        .register(
            FnTransform::new("counted", 1, move |x| {
                counter.fetch_add(1, Ordering::Relaxed);
                x[0] * 2.0
            }),
            &[x],
        )
        .unwrap();
    let sum = pipeline
        .register(FnTransform::new("sum", 2, |x| x[0] + x[1]), &[shared, shared])
        .unwrap();
    let product = pipeline
        .register(FnTransform::new("product", 2, |x| x[0] * x[1]), &[shared, sum])
        .unwrap();

    let out = pipeline
        .materialize(product, &ChunkExecutor::new(4).unwrap())
        .unwrap();

    assert_eq!(calls.load(Ordering::Relaxed), len());
    assert_eq!(out.report.chunks, 4);
    assert_eq!(out.report.transform_nodes, 3);
    assert_eq!(out.report.node_evaluations, 3 * 4);
    assert!(out.array.data().iter().all(|&v| v == 18.0));
}

#[test]
fn test_register_computes_nothing() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);

    let mut pipeline = Pipeline::new();
    let x = pipeline.input(field("x", vec![1.0; len()], &SHAPE));
    pipeline
        .register(
            FnTransform::new("counted", 1, move |x| {
                counter.fetch_add(1, Ordering::Relaxed);
                x[0]
            }),
            &[x],
        )
        .unwrap();

    assert_eq!(calls.load(Ordering::Relaxed), 0);
}

/// Rejects the sentinel value -999
struct RejectSentinel;

impl ElementwiseTransform for RejectSentinel {
    fn name(&self) -> &str {
        "reject_sentinel"
    }

    fn arity(&self) -> usize {
        1
    }

    fn apply(&self, args: &[f64]) -> Result<f64, TransformError> {
        if args[0] == -999.0 {
            return Err(TransformError {
                transform: self.name().to_string(),
                inputs: args.to_vec(),
                message: "sentinel value".to_string(),
            });
        }
        Ok(args[0])
    }
}

#[test]
fn test_chunk_failure_aborts_materialization() {
    let mut values = vec![1.0; len()];
    // Row-major index of [3, 4, 5]: last chunk with chunk shape [2, 5, 3]
    values[len() - 1] = -999.0;

    let mut pipeline = Pipeline::new();
    let x = pipeline.input(field("x", values, &[2, 5, 3]));
    let checked = pipeline.register(RejectSentinel, &[x]).unwrap();
    let doubled = pipeline
        .register(FnTransform::new("double", 1, |x| x[0] * 2.0), &[checked])
        .unwrap();

    let mut sink = InMemoryDataset::new();
    let result = pipeline.materialize(doubled, &ChunkExecutor::new(4).unwrap());
    let err = match result {
        Ok(out) => {
            sink.write(out.array, Attributes::new()).unwrap();
            panic!("materialization should have failed");
        }
        Err(err) => err,
    };

    match err {
        PipelineError::ChunkComputeFailure { chunk, message } => {
            assert_eq!(chunk, 3);
            assert!(message.contains("sentinel value"));
        }
        other => panic!("unexpected error: {:?}", other),
    }
    assert!(sink.is_empty());
}

#[test]
fn test_mismatched_operands_rejected_at_registration() {
    let mut pipeline = Pipeline::new();
    let a = pipeline.input(field("a", vec![1.0; len()], &[2, 5, 3]));
    let b = pipeline.input(
        ChunkedArray::from_shape_vec("b", "1", &[6, 5, 4], vec![1.0; len()], &[2, 5, 2]).unwrap(),
    );
    let err = pipeline
        .register(FnTransform::new("add", 2, |x| x[0] + x[1]), &[a, b])
        .unwrap_err();
    assert!(matches!(err, PipelineError::ShapeMismatch { operand: 1, .. }));
}
