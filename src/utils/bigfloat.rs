//! Bridges between the `num-bigint` integers used by the continued-fraction recurrence and
//! the MPFR-backed `rug::Float` reals used everywhere a constant is involved.

use num_bigint::{BigInt, Sign};
use rug::float::Round;
use rug::{Float, Integer, Rational};

/// Converts a `num_bigint::BigInt` into a `rug::Integer` via its little-endian limbs.
pub(crate) fn bigint_to_integer(x: &BigInt) -> Integer {
    let (sign, digits) = x.to_u64_digits();
    let mut ret = Integer::from_digits(&digits, rug::integer::Order::Lsf);
    if sign == Sign::Minus {
        ret = -ret;
    }
    ret
}

/// The ratio `p/q` as a correctly-rounded `Float` with `prec` bits.
///
/// `q` must be non-zero; the continued-fraction evaluator treats a vanishing denominator as
/// a non-match before ever dividing.
pub(crate) fn big_ratio_to_float(p: &BigInt, q: &BigInt, prec: u32) -> Float {
    let ratio = Rational::from((bigint_to_integer(p), bigint_to_integer(q)));
    Float::with_val(prec, ratio)
}

/// `10^exp` as an arbitrary-precision integer key factor.
pub(crate) fn pow10_integer(exp: u32) -> Integer {
    Integer::from(Integer::u_pow_u(10, exp))
}

/// `10^exp` as a `BigInt`, for the exact integer fingerprint quotient.
pub(crate) fn pow10_bigint(exp: u32) -> BigInt {
    num_traits::pow(BigInt::from(10), exp as usize)
}

/// The fingerprint key of a real value: `trunc(x * 10^exp)`, truncated toward zero.
///
/// Returns `None` when the value is not finite or the key does not fit the key width, both
/// of which the callers treat as "cannot be stored / cannot match".
pub(crate) fn float_key(x: &Float, threshold_exp: u32) -> Option<i128> {
    if !x.is_finite() {
        return None;
    }
    let scaled = Float::with_val(x.prec(), x * &pow10_integer(threshold_exp));
    scaled.trunc().to_integer().and_then(|key| key.to_i128())
}

/// Decimal rendering with `digits` significant digits, the comparison format of the
/// verification pass. Rounds to nearest, like the value it is called on.
pub(crate) fn significant_digits(x: &Float, digits: usize) -> String {
    x.to_string_radix_round(10, Some(digits), Round::Nearest)
}
