//! Work partitioning for parallel searches.
//!
//! The search domain is tiled along the leading dimensions of the `poly_a` coefficient
//! space and the tiles are dealt round-robin to a fixed-width worker pool, so that for any
//! worker count and tile shape the slabs form an exact partition of the input space. The
//! engine, hash table included, is built before the pool starts and shared immutably by
//! every worker.

use crate::errors::SearchError;
use crate::search::{GcfSearchEngine, Match};
use crate::series::CoefficientSpace;
use rayon::prelude::*;
use std::panic::AssertUnwindSafe;

/// The outcome of a partitioned run: validated matches concatenated in deterministic slab
/// order, plus one [`SearchError::SlabFailed`] per slab that died. Completed slabs are
/// retained even when others fail.
#[derive(Debug, Default)]
pub struct SearchOutcome {
    pub matches: Vec<Match>,
    pub failures: Vec<SearchError>,
}

/// Carves `space` into tiles of shape `tile` along its first `min(tile.len(), dims)`
/// dimensions, in row-major order. Dimensions beyond the tile shape are left whole; a
/// trailing short chunk goes to the last tile of each dimension.
pub fn tile_space(space: &CoefficientSpace, tile: &[usize]) -> Vec<CoefficientSpace> {
    let tiled_dims = tile.len().min(space.num_dims());

    let mut tiles = vec![space.clone()];
    for dim in 0..tiled_dims {
        let step = tile[dim].max(1);
        let chunks = space.dims()[dim]
            .chunks(step)
            .map(<[i64]>::to_vec)
            .collect::<Vec<Vec<i64>>>();
        let mut next = Vec::with_capacity(tiles.len() * chunks.len());
        for t in &tiles {
            for chunk in &chunks {
                next.push(t.with_dim(dim, chunk.clone()));
            }
        }
        tiles = next;
    }
    tiles
}

/// Runs `engine.find_hits` over every tile of `poly_a` using `num_workers` parallel
/// workers. With no explicit tile shape, the first dimension is cut into `num_workers`
/// contiguous slabs (the last one taking the remainder).
pub fn run_partitioned(
    engine: &GcfSearchEngine,
    poly_a: &CoefficientSpace,
    poly_b: &CoefficientSpace,
    num_workers: usize,
    tile: Option<&[usize]>,
    report_progress: bool,
) -> Result<SearchOutcome, SearchError> {
    assert!(num_workers >= 1, "need at least one worker");

    let default_tile;
    let tile = match tile {
        Some(t) => t,
        None => {
            let dim0 = poly_a.dims().first().map_or(1, Vec::len);
            default_tile = [((dim0 + num_workers - 1) / num_workers).max(1)];
            &default_tile[..]
        }
    };
    let tiles = tile_space(poly_a, tile);

    if num_workers == 1 {
        let mut matches = Vec::new();
        for slab in &tiles {
            matches.extend(engine.find_hits(slab, poly_b, report_progress));
        }
        return Ok(SearchOutcome {
            matches,
            failures: Vec::new(),
        });
    }

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(num_workers)
        .build()
        .map_err(|e| SearchError::WorkerPool(e.to_string()))?;

    // Worker w owns tiles w, w + W, w + 2W, ...; results come back in worker order and in
    // tile order within each worker, so concatenation is deterministic.
    let per_worker: Vec<Vec<Result<Vec<Match>, SearchError>>> = pool.install(|| {
        (0..num_workers)
            .into_par_iter()
            .map(|worker| {
                tiles
                    .iter()
                    .enumerate()
                    .skip(worker)
                    .step_by(num_workers)
                    .map(|(slab, tile)| {
                        let report = report_progress && worker == num_workers - 1;
                        std::panic::catch_unwind(AssertUnwindSafe(|| {
                            engine.find_hits(tile, poly_b, report)
                        }))
                        .map_err(|panic| SearchError::SlabFailed {
                            slab,
                            reason: panic_message(&panic),
                        })
                    })
                    .collect()
            })
            .collect()
    });

    let mut outcome = SearchOutcome::default();
    for worker_results in per_worker {
        for result in worker_results {
            match result {
                Ok(matches) => outcome.matches.extend(matches),
                Err(failure) => {
                    log::warn!("{}", failure);
                    outcome.failures.push(failure);
                }
            }
        }
    }
    Ok(outcome)
}

fn panic_message(panic: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = panic.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else {
        "worker panicked".to_string()
    }
}
