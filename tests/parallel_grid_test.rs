use newt_rust::grid::{ChunkGeometry, ChunkSpec, ChunkedArray};
use newt_rust::parallel::{ChunkExecutor, ExecutorError};
use rayon::prelude::*;

#[test]
fn test_chunks_tile_the_grid_exactly_once() {
    let geometry = ChunkGeometry::new(&[3, 7, 10], &[2, 3, 4]).unwrap();
    let mut hits = vec![0usize; geometry.len()];

    for chunk in 0..geometry.num_chunks() {
        let bounds = geometry.chunk_bounds(chunk).unwrap();
        for i in bounds[0].clone() {
            for j in bounds[1].clone() {
                for k in bounds[2].clone() {
                    hits[(i * 7 + j) * 10 + k] += 1;
                }
            }
        }
    }

    // 2 * 3 * 3 = 18 blocks, each point covered once
    assert_eq!(geometry.num_chunks(), 18);
    assert!(hits.iter().all(|&h| h == 1));
}

#[test]
fn test_executor_matches_rayon_map() {
    let field = ChunkedArray::with_chunks(
        "x",
        "1",
        ndarray::ArrayD::from_shape_fn(ndarray::IxDyn(&[6, 50]), |ix| (ix[0] * 50 + ix[1]) as f64),
        &[ChunkSpec::Explicit(4), ChunkSpec::Auto],
        64,
    )
    .unwrap();
    let executor = ChunkExecutor::new(4).unwrap();

    let sums = executor
        .execute(field.geometry().num_chunks(), |chunk| {
            field
                .chunk_values(chunk)
                .map(|values| values.iter().map(|x| x * x).sum::<f64>())
        })
        .unwrap();
    let expected: Vec<f64> = (0..field.geometry().num_chunks())
        .into_par_iter()
        .map(|chunk| field.chunk_values(chunk).unwrap().iter().map(|x| x * x).sum())
        .collect();

    assert_eq!(sums, expected);
}

#[test]
fn test_out_of_range_chunk_reported() {
    let field = ChunkedArray::from_shape_vec("x", "1", &[4], vec![0.0; 4], &[2]).unwrap();
    let executor = ChunkExecutor::new(2).unwrap();

    let result = executor.execute(3, |chunk| field.chunk_values(chunk));
    match result {
        Err(ExecutorError::ChunkFailed { chunk, message }) => {
            assert_eq!(chunk, 2);
            assert!(message.contains("out of range"));
        }
        other => panic!("expected chunk failure, got {:?}", other),
    }
}
