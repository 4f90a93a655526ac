//! Series families used by the Catalan-constant searches.

use crate::series::SeriesGenerator;

/// $\{b_n\}$ family $s_n = -(c_0\, n + c_1)\,(2n - 1)^3$.
#[derive(Clone, Copy, Debug, Default)]
pub struct CatalanBn;

impl SeriesGenerator for CatalanBn {
    fn name(&self) -> String {
        "catalan_bn".to_string()
    }

    fn generate(&self, coeffs: &[i64], num_terms: usize) -> Vec<i128> {
        let c0 = coeffs[0] as i128;
        let c1 = coeffs[1] as i128;
        (1..=num_terms as i128)
            .map(|n| {
                let odd = 2 * n - 1;
                -(c0 * n + c1) * odd * odd * odd
            })
            .collect()
    }
}

/// $\{b_n\}$ family $s_n = -c_0\, n^{d-1}\, (n + c_1)$ of total degree `degree`, built from
/// the integer factorization of the sampled terms rather than a dense coefficient list.
#[derive(Clone, Copy, Debug)]
pub struct FactorizationBn {
    pub degree: u32,
}

impl SeriesGenerator for FactorizationBn {
    fn name(&self) -> String {
        format!("integer_factorization_bn(deg {})", self.degree)
    }

    fn generate(&self, coeffs: &[i64], num_terms: usize) -> Vec<i128> {
        let c0 = coeffs[0] as i128;
        let c1 = coeffs[1] as i128;
        (1..=num_terms as i128)
            .map(|n| {
                let mut power: i128 = 1;
                for _ in 0..self.degree.saturating_sub(1) {
                    power *= n;
                }
                -c0 * power * (n + c1)
            })
            .collect()
    }
}
