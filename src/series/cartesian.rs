use crate::series::{compact_poly, SeriesGenerator};

/// Plain compact-polynomial $\{a_n\}$ family: $s_n = c_k n^k + \dots + c_1 n + c_0$.
#[derive(Clone, Copy, Debug, Default)]
pub struct CartesianAn;

impl SeriesGenerator for CartesianAn {
    fn name(&self) -> String {
        "cartesian_an".to_string()
    }

    fn generate(&self, coeffs: &[i64], num_terms: usize) -> Vec<i128> {
        (1..=num_terms as i128).map(|n| compact_poly(coeffs, n)).collect()
    }
}

/// Plain compact-polynomial $\{b_n\}$ family, same shape as [`CartesianAn`].
#[derive(Clone, Copy, Debug, Default)]
pub struct CartesianBn;

impl SeriesGenerator for CartesianBn {
    fn name(&self) -> String {
        "cartesian_bn".to_string()
    }

    fn generate(&self, coeffs: &[i64], num_terms: usize) -> Vec<i128> {
        (1..=num_terms as i128).map(|n| compact_poly(coeffs, n)).collect()
    }
}

/// Compact polynomial evaluated one index ahead: $s_n = p(n + 1)$.
#[derive(Clone, Copy, Debug, Default)]
pub struct ShiftedBn;

impl SeriesGenerator for ShiftedBn {
    fn name(&self) -> String {
        "polynomial_shift1_bn".to_string()
    }

    fn generate(&self, coeffs: &[i64], num_terms: usize) -> Vec<i128> {
        (1..=num_terms as i128).map(|n| compact_poly(coeffs, n + 1)).collect()
    }
}
