//! Series families shaped after the Apéry-style continued fractions for $\zeta(3)$.

use crate::series::SeriesGenerator;

/// $\{a_n\}$ family $s_n = (2n - 1)\,(c_0\, n(n-1) + c_1)$.
///
/// With $(c_0, c_1) = (17, 5)$ this is Apéry's $34m^3 + 51m^2 + 27m + 5$ reindexed to start
/// at $m = 0$ for $s_1$.
#[derive(Clone, Copy, Debug, Default)]
pub struct Zeta3An;

impl SeriesGenerator for Zeta3An {
    fn name(&self) -> String {
        "zeta3_an".to_string()
    }

    fn generate(&self, coeffs: &[i64], num_terms: usize) -> Vec<i128> {
        let c0 = coeffs[0] as i128;
        let c1 = coeffs[1] as i128;
        (1..=num_terms as i128)
            .map(|n| (2 * n - 1) * (c0 * n * (n - 1) + c1))
            .collect()
    }
}

/// $\{b_n\}$ family $s_n = -(c_0\, n^3)^2$, the negative sixth powers of the $\zeta(3)$
/// fractions.
#[derive(Clone, Copy, Debug, Default)]
pub struct ZetaBn;

impl SeriesGenerator for ZetaBn {
    fn name(&self) -> String {
        "zeta_bn".to_string()
    }

    fn generate(&self, coeffs: &[i64], num_terms: usize) -> Vec<i128> {
        let c0 = coeffs[0] as i128;
        (1..=num_terms as i128)
            .map(|n| {
                let root = c0 * n * n * n;
                -(root * root)
            })
            .collect()
    }
}
