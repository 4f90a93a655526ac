//! Generalized continued fraction evaluation.
//!
//! A GCF $a_0 + \cfrac{b_0}{a_1 + \cfrac{b_1}{a_2 + \dots}}$ is evaluated through the
//! classical three-term recurrence for its convergents:
//!
//! $p_{-1} = 1,\ q_{-1} = 0,\ p_0 = a_0,\ q_0 = 1$
//! $p_n = a_n p_{n-1} + b_{n-1} p_{n-2}, \qquad q_n = a_n q_{n-1} + b_{n-1} q_{n-2}$
//!
//! The numerators and denominators routinely exceed $10^{200}$ at the depths the verifier
//! uses, so the recurrence runs over arbitrary-precision integers throughout.

use crate::utils::bigfloat::{big_ratio_to_float, pow10_integer};
use num_bigint::BigInt;
use num_traits::{One, ToPrimitive, Zero};
use rug::Float;

/// The convergent $(p_L, q_L)$ at depth $L = \mathtt{an.len()} - 1$.
///
/// `bn` must carry at least `an.len() - 1` terms; extra terms are ignored.
pub fn convergent(an: &[i128], bn: &[i128]) -> (BigInt, BigInt) {
    let mut p_prev = BigInt::one();
    let mut q_prev = BigInt::zero();
    let mut p = BigInt::from(an[0]);
    let mut q = BigInt::one();

    for n in 1..an.len() {
        let a = an[n];
        let b = bn[n - 1];
        let p_next = &p * a + &p_prev * b;
        let q_next = &q * a + &q_prev * b;
        p_prev = std::mem::replace(&mut p, p_next);
        q_prev = std::mem::replace(&mut q, q_next);
    }
    (p, q)
}

/// The fingerprint key of the convergent: `trunc(p_L * 10^D / q_L)`, truncated toward zero
/// in exact integer arithmetic.
///
/// A vanishing $q_L$, or a quotient too large for the key width, returns the sentinel key
/// 0, which the hash table build never stores, so it is a guaranteed miss.
pub fn fingerprint_key(an: &[i128], bn: &[i128], key_factor: &BigInt) -> i128 {
    let (p, q) = convergent(an, bn);
    if q.is_zero() {
        return 0;
    }
    ((p * key_factor) / q).to_i128().unwrap_or(0)
}

/// The convergent as a real value with `prec` bits, or `None` when $q_L = 0$.
pub fn convergent_value(an: &[i128], bn: &[i128], prec: u32) -> Option<Float> {
    let (p, q) = convergent(an, bn);
    if q.is_zero() {
        return None;
    }
    Some(big_ratio_to_float(&p, &q, prec))
}

/// Average number of correct decimal digits gained per term when the GCF approaches
/// `reference`, measured over every finite convergent of the given depth.
///
/// Errors are clamped from below at the working precision so a fraction that bottoms out
/// early does not produce infinite rates.
pub fn convergence_rate(an: &[i128], bn: &[i128], reference: &Float, dps: u32) -> Option<Float> {
    let prec = reference.prec();
    let floor = Float::with_val(prec, pow10_integer(dps)).recip();

    let mut p_prev = BigInt::one();
    let mut q_prev = BigInt::zero();
    let mut p = BigInt::from(an[0]);
    let mut q = BigInt::one();
    let mut log_errors: Vec<Float> = Vec::with_capacity(an.len());

    for n in 1..an.len() {
        let a = an[n];
        let b = bn[n - 1];
        let p_next = &p * a + &p_prev * b;
        let q_next = &q * a + &q_prev * b;
        p_prev = std::mem::replace(&mut p, p_next);
        q_prev = std::mem::replace(&mut q, q_next);
        if q.is_zero() {
            continue;
        }
        let val = big_ratio_to_float(&p, &q, prec);
        let err = Float::with_val(prec, &val - reference).abs() + &floor;
        log_errors.push(err.log10());
    }

    if log_errors.len() < 2 {
        return None;
    }
    let span = Float::with_val(prec, log_errors.last().unwrap() - log_errors.first().unwrap());
    Some(-span / (log_errors.len() as u32 - 1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::precision::dps_to_prec;
    use crate::series::SeriesGenerator;
    use crate::utils::bigfloat::{bigint_to_integer, pow10_bigint};
    use more_asserts::assert_gt;
    use rand::Rng;
    use rug::Rational;

    /// Reference evaluation straight off the nested-fraction definition, folded from the
    /// innermost term outward in exact rational arithmetic.
    fn backward_value(an: &[i128], bn: &[i128]) -> Rational {
        let depth = an.len() - 1;
        let mut acc = Rational::from(an[depth]);
        for n in (0..depth).rev() {
            acc = Rational::from(an[n]) + Rational::from(bn[n]) / acc;
        }
        acc
    }

    #[test]
    fn recurrence_equals_nested_definition() {
        let an: Vec<i128> = (1..=12).map(|n| 3 * n - 1).collect();
        let bn: Vec<i128> = (1..=12).map(|n| n * n + 1).collect();
        let (p, q) = convergent(&an, &bn);
        let folded = backward_value(&an, &bn);
        let ours = Rational::from((bigint_to_integer(&p), bigint_to_integer(&q)));
        assert_eq!(ours, folded);
    }

    #[test]
    fn recurrence_equals_nested_definition_on_random_fractions() {
        let mut rng = rand::thread_rng();
        for _ in 0..50 {
            // positive terms, so the backward fold can never divide by zero
            let an: Vec<i128> = (0..10).map(|_| rng.gen_range(1..=50) as i128).collect();
            let bn: Vec<i128> = (0..10).map(|_| rng.gen_range(1..=50) as i128).collect();
            let (p, q) = convergent(&an, &bn);
            let folded = backward_value(&an, &bn);
            let ours = Rational::from((bigint_to_integer(&p), bigint_to_integer(&q)));
            assert_eq!(ours, folded);
        }
    }

    #[test]
    fn fingerprint_matches_float_truncation() {
        let an: Vec<i128> = (1..=32).map(|n| 4 * n - 2).collect();
        let bn: Vec<i128> = vec![1; 32];
        let key_factor = pow10_bigint(10);
        let key = fingerprint_key(&an, &bn, &key_factor);
        // coth(1/2) = (e + 1)/(e - 1) = 2.16395341373865284877...
        assert_eq!(key, 21_639_534_137);
    }

    #[test]
    fn coth_half_converges_to_reference() {
        let an: Vec<i128> = (1..=32).map(|n| 4 * n - 2).collect();
        let bn: Vec<i128> = vec![1; 32];
        let prec = dps_to_prec(50);
        let value = convergent_value(&an, &bn, prec).unwrap();

        let e = Float::with_val(prec, 1u32).exp();
        let reference = Float::with_val(prec, &e + &Float::with_val(prec, 1u32))
            / Float::with_val(prec, &e - &Float::with_val(prec, 1u32));
        let diff = Float::with_val(prec, &value - &reference).abs();
        assert!(diff < Float::with_val(prec, Float::parse("1e-40").unwrap()));
    }

    #[test]
    fn vanishing_denominator_is_a_sentinel_miss() {
        // a_1 = 0 and b_0 = 0 forces q_1 = 0
        let key = fingerprint_key(&[5, 0], &[0], &pow10_bigint(10));
        assert_eq!(key, 0);
    }

    #[test]
    fn apery_fraction_gains_digits_linearly() {
        let an = crate::series::Zeta3An.generate(&[17, 5], 60);
        let bn = crate::series::ZetaBn.generate(&[1], 60);
        let prec = dps_to_prec(100);
        let reference = Float::with_val(prec, 6u32) / crate::constant::MathConstant::Zeta(3).eval(100);
        let rate = convergence_rate(&an, &bn, &reference, 100).unwrap();
        // Apery's fraction gains roughly three digits per term
        assert_gt!(rate.to_f64(), 1.0);
    }
}
