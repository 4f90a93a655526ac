//! High-precision re-validation of first-pass hits.
//!
//! A fingerprint collision only proves agreement to the threshold's ~10 digits. The
//! verifier re-evaluates both sides from scratch (the left-hand side from its stored
//! coefficients, the right-hand side as a much deeper convergent) and accepts a candidate
//! only when the two decimal expansions agree on the first
//! [`VERIFY_DIGITS`](crate::constants::VERIFY_DIGITS) significant digits, compared as
//! strings so there is no ULP hair-splitting. The caller is responsible for scoping the
//! working precision (twice the final budget, to absorb convergent truncation error).

use crate::constants::{N_VERIFY_TERMS, VERIFY_DIGITS};
use crate::gcf;
use crate::precision::{working_dps, working_prec};
use crate::search::{GcfSearchEngine, Match};
use crate::utils::bigfloat::significant_digits;
use rug::Float;

pub(crate) fn refine(engine: &GcfSearchEngine, candidates: &[Match]) -> Vec<Match> {
    if candidates.is_empty() {
        return Vec::new();
    }
    let dps = working_dps();
    let prec = working_prec();
    let constant_values = engine
        .constants()
        .iter()
        .map(|c| c.eval(dps))
        .collect::<Vec<Float>>();

    let mut accepted: Vec<Match> = Vec::new();
    for (i, candidate) in candidates.iter().enumerate() {
        if (i + 1) % 10 == 0 {
            log::debug!(
                "verified {} of {} candidates, {} accepted",
                i + 1,
                candidates.len(),
                accepted.len()
            );
        }

        // degenerate left-hand sides are dropped, not errors
        let Some(lhs) = engine
            .hash_table()
            .evaluate(candidate.lhs_key, &constant_values)
        else {
            continue;
        };

        let an = engine
            .an_generator()
            .generate(&candidate.an_coeffs, N_VERIFY_TERMS);
        let bn = engine
            .bn_generator()
            .generate(&candidate.bn_coeffs, N_VERIFY_TERMS);
        let Some(rhs) = gcf::convergent_value(&an, &bn, prec) else {
            continue;
        };

        if significant_digits(&lhs, VERIFY_DIGITS) == significant_digits(&rhs, VERIFY_DIGITS) {
            accepted.push(candidate.clone());
        }
    }
    accepted
}
