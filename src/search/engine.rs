use crate::constant::MathConstant;
use crate::constants::{
    DEFAULT_THRESHOLD_EXP, ENUM_DPS, N_INITIAL_SEARCH_TERMS, PROGRESS_INTERVAL, VERIFY_DPS,
};
use crate::errors::SearchError;
use crate::gcf;
use crate::lhs::{LhsHashTable, TableRegistry};
use crate::precision::{working_dps, ScopedDps};
use crate::render;
use crate::search::{verifier, Match};
use crate::series::{CoefficientSpace, SeriesGenerator};
use crate::utils::bigfloat::pow10_bigint;
use rug::Float;
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

/// Convergent depth used when measuring the digits-per-term rate for presentation.
const PRESENTATION_TERMS: usize = 250;

/// Which enumeration axis gets materialized in memory during the first pass; the other one
/// is streamed. Chosen by size, the smaller axis is cached.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum CachedAxis {
    A,
    B,
}

/// The meet-in-the-middle search engine.
///
/// One engine owns the (immutable) LHS hash table, the constants it was built over and the
/// two series families of the right-hand side. A search is a three-step procedure: build or
/// load the table, stream every RHS candidate against it, and re-verify the hits at high
/// precision. Note the coverage caveat of the fingerprint policy: a genuine identity whose
/// truncated key lands one off the stored key (a rounding-boundary straddle) is lost; the
/// blacklist's ±1 dilation applies only to purging rationals, not to probing.
pub struct GcfSearchEngine {
    constants: Vec<MathConstant>,
    threshold_exp: u32,
    table: Arc<LhsHashTable>,
    an_generator: Box<dyn SeriesGenerator>,
    bn_generator: Box<dyn SeriesGenerator>,
}

impl GcfSearchEngine {
    /// Builds the LHS hash table for `constants` over `[-lhs_search_limit,
    /// lhs_search_limit]` coefficients, or reloads it through `registry` when `saved_hash`
    /// points at an existing file. A freshly built table is saved (and registered) when a
    /// path was given.
    pub fn new(
        constants: Vec<MathConstant>,
        lhs_search_limit: i64,
        saved_hash: Option<&Path>,
        registry: &TableRegistry,
        an_generator: Box<dyn SeriesGenerator>,
        bn_generator: Box<dyn SeriesGenerator>,
    ) -> Result<Self, SearchError> {
        let threshold_exp = DEFAULT_THRESHOLD_EXP;
        let table = match saved_hash {
            Some(path) if path.is_file() => registry.load(path)?,
            _ => {
                let _dps = ScopedDps::new(ENUM_DPS);
                let values = constants
                    .iter()
                    .map(|c| c.eval(ENUM_DPS))
                    .collect::<Vec<Float>>();
                log::info!(
                    "building LHS hash table (range {}, {} constants)",
                    lhs_search_limit,
                    constants.len()
                );
                let start = Instant::now();
                let table = Arc::new(LhsHashTable::build(
                    lhs_search_limit,
                    &values,
                    threshold_exp,
                ));
                log::info!("stored {} keys in {:.2?}", table.len(), start.elapsed());
                if let Some(path) = saved_hash {
                    table.save(path)?;
                    registry.store(path, &table);
                }
                table
            }
        };

        Ok(GcfSearchEngine {
            constants,
            threshold_exp,
            table,
            an_generator,
            bn_generator,
        })
    }

    pub fn hash_table(&self) -> &LhsHashTable {
        &self.table
    }

    pub fn constants(&self) -> &[MathConstant] {
        &self.constants
    }

    pub(crate) fn an_generator(&self) -> &dyn SeriesGenerator {
        self.an_generator.as_ref()
    }

    pub(crate) fn bn_generator(&self) -> &dyn SeriesGenerator {
        self.bn_generator.as_ref()
    }

    /// Runs the full search over the two coefficient spaces: first-pass enumeration at
    /// [`ENUM_DPS`], then verification of every hit at twice [`VERIFY_DPS`]. Returns only
    /// the validated matches.
    pub fn find_hits(
        &self,
        poly_a: &CoefficientSpace,
        poly_b: &CoefficientSpace,
        report_progress: bool,
    ) -> Vec<Match> {
        let candidates = {
            let _dps = ScopedDps::new(ENUM_DPS);
            self.first_enumeration(poly_a, poly_b, report_progress)
        };
        if report_progress {
            log::info!("first pass found {} candidates", candidates.len());
        }
        let _dps = ScopedDps::new(2 * VERIFY_DPS);
        verifier::refine(self, &candidates)
    }

    /// The full identity as a LaTeX equation, for presentation.
    pub fn render_identity(&self, m: &Match) -> Option<String> {
        let symbols = self
            .constants
            .iter()
            .map(MathConstant::symbol)
            .collect::<Vec<String>>();
        let lhs = self.table.evaluate_symbolic(m.lhs_key, &symbols)?;
        let depth = render::display_depth(&m.an_coeffs, &m.bn_coeffs);
        let an = self.an_generator.generate(&m.an_coeffs, depth);
        let bn = self.bn_generator.generate(&m.bn_coeffs, depth);
        Some(format!("{} = {}", lhs, render::gcf_latex(&an, &bn, depth)))
    }

    /// Average decimal digits gained per term of the validated fraction, measured at
    /// [`VERIFY_DPS`] against the stored left-hand side.
    pub fn measure_convergence(&self, m: &Match) -> Option<Float> {
        let _dps = ScopedDps::new(VERIFY_DPS);
        let values = self
            .constants
            .iter()
            .map(|c| c.eval(working_dps()))
            .collect::<Vec<Float>>();
        let reference = self.table.evaluate(m.lhs_key, &values)?;
        let an = self.an_generator.generate(&m.an_coeffs, PRESENTATION_TERMS);
        let bn = self.bn_generator.generate(&m.bn_coeffs, PRESENTATION_TERMS);
        gcf::convergence_rate(&an, &bn, &reference, working_dps())
    }

    pub(crate) fn first_enumeration(
        &self,
        poly_a: &CoefficientSpace,
        poly_b: &CoefficientSpace,
        report_progress: bool,
    ) -> Vec<Match> {
        let size_a = self.an_generator.count(poly_a);
        let size_b = self.bn_generator.count(poly_b);
        let axis = if size_a > size_b {
            CachedAxis::B
        } else {
            CachedAxis::A
        };
        self.first_enumeration_with_axis(poly_a, poly_b, axis, report_progress)
    }

    /// The double loop of the first pass: expand and cache every sequence of one axis,
    /// stream the other, and probe the table with the fingerprint of each pairing.
    pub(crate) fn first_enumeration_with_axis(
        &self,
        poly_a: &CoefficientSpace,
        poly_b: &CoefficientSpace,
        axis: CachedAxis,
        report_progress: bool,
    ) -> Vec<Match> {
        let key_factor = pow10_bigint(self.threshold_exp);
        let mut results: Vec<Match> = Vec::new();

        match axis {
            CachedAxis::B => {
                let (b_coeffs, b_series) =
                    materialize(self.bn_generator.as_ref(), poly_b, false);
                let total = self.an_generator.count(poly_a) * b_series.len() as u64;
                let mut progress = Progress::new(report_progress, total);
                for a_coeffs in self.an_generator.iterate(poly_a) {
                    let an = self
                        .an_generator
                        .generate(&a_coeffs, N_INITIAL_SEARCH_TERMS);
                    if has_forbidden_zero(&an, true) {
                        progress.advance(b_series.len() as u64, results.len());
                        continue;
                    }
                    for (bn, b_c) in b_series.iter().zip(b_coeffs.iter()) {
                        let key = gcf::fingerprint_key(&an, bn, &key_factor);
                        if self.table.contains(key) {
                            results.push(Match {
                                lhs_key: key,
                                an_coeffs: a_coeffs.clone(),
                                bn_coeffs: b_c.clone(),
                            });
                        }
                        progress.advance(1, results.len());
                    }
                }
            }
            CachedAxis::A => {
                let (a_coeffs, a_series) =
                    materialize(self.an_generator.as_ref(), poly_a, true);
                let total = self.bn_generator.count(poly_b) * a_series.len() as u64;
                let mut progress = Progress::new(report_progress, total);
                for b_coeffs in self.bn_generator.iterate(poly_b) {
                    let bn = self
                        .bn_generator
                        .generate(&b_coeffs, N_INITIAL_SEARCH_TERMS);
                    if has_forbidden_zero(&bn, false) {
                        progress.advance(a_series.len() as u64, results.len());
                        continue;
                    }
                    for (an, a_c) in a_series.iter().zip(a_coeffs.iter()) {
                        let key = gcf::fingerprint_key(an, &bn, &key_factor);
                        if self.table.contains(key) {
                            results.push(Match {
                                lhs_key: key,
                                an_coeffs: a_c.clone(),
                                bn_coeffs: b_coeffs.clone(),
                            });
                        }
                        progress.advance(1, results.len());
                    }
                }
            }
        }
        results
    }
}

/// Expands every coefficient vector of one axis and drops the sequences a GCF cannot use.
fn materialize(
    generator: &dyn SeriesGenerator,
    space: &CoefficientSpace,
    allow_leading_zero: bool,
) -> (Vec<Vec<i64>>, Vec<Vec<i128>>) {
    let mut coeffs_list = Vec::new();
    let mut series_list = Vec::new();
    for coeffs in generator.iterate(space) {
        let series = generator.generate(&coeffs, N_INITIAL_SEARCH_TERMS);
        if has_forbidden_zero(&series, allow_leading_zero) {
            continue;
        }
        coeffs_list.push(coeffs);
        series_list.push(series);
    }
    (coeffs_list, series_list)
}

/// A zero partial numerator truncates the fraction and a zero partial denominator past the
/// first term degenerates it, so both sides are filtered; only $a_0$, the free integer
/// offset of the fraction, may vanish.
fn has_forbidden_zero(series: &[i128], allow_leading_zero: bool) -> bool {
    let tail = if allow_leading_zero {
        &series[1..]
    } else {
        series
    };
    tail.contains(&0)
}

struct Progress {
    enabled: bool,
    total: u64,
    passed: u64,
    since_report: u64,
}

impl Progress {
    fn new(enabled: bool, total: u64) -> Self {
        Progress {
            enabled,
            total,
            passed: 0,
            since_report: 0,
        }
    }

    fn advance(&mut self, count: u64, matches_so_far: usize) {
        self.passed += count;
        self.since_report += count;
        if self.enabled && self.since_report >= PROGRESS_INTERVAL {
            self.since_report = 0;
            log::info!(
                "passed {} of {} probes, {} matches so far",
                self.passed,
                self.total,
                matches_so_far
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::series::{CartesianAn, CartesianBn};

    fn e_engine() -> GcfSearchEngine {
        let registry = TableRegistry::new();
        GcfSearchEngine::new(
            vec![MathConstant::E],
            2,
            None,
            &registry,
            Box::new(CartesianAn),
            Box::new(CartesianBn),
        )
        .unwrap()
    }

    #[test]
    fn axis_choice_is_observationally_equivalent() {
        let engine = e_engine();
        let poly_a = CoefficientSpace::symmetric(2, 3);
        let poly_b = CoefficientSpace::symmetric(2, 2);
        let _dps = ScopedDps::new(ENUM_DPS);

        let via_a =
            engine.first_enumeration_with_axis(&poly_a, &poly_b, CachedAxis::A, false);
        let via_b =
            engine.first_enumeration_with_axis(&poly_a, &poly_b, CachedAxis::B, false);

        let set_a: std::collections::HashSet<Match> = via_a.into_iter().collect();
        let set_b: std::collections::HashSet<Match> = via_b.into_iter().collect();
        assert_eq!(set_a, set_b);
    }

    #[test]
    fn zero_filter_spares_only_the_leading_a_term() {
        assert!(!has_forbidden_zero(&[0, 1, 2], true));
        assert!(has_forbidden_zero(&[1, 0, 2], true));
        assert!(has_forbidden_zero(&[0, 1, 2], false));
        assert!(!has_forbidden_zero(&[3, 1, 2], false));
    }
}
