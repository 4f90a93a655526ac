mod engine;
mod partition;
mod verifier;

pub use engine::GcfSearchEngine;
pub use partition::{run_partitioned, tile_space, SearchOutcome};

/// One candidate identity: the fingerprint key that hit the LHS table, plus the coefficient
/// vectors that seeded the two series of the right-hand side.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Match {
    pub lhs_key: i128,
    pub an_coeffs: Vec<i64>,
    pub bn_coeffs: Vec<i64>,
}
