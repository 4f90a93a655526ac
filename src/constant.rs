//! The mathematical constants the search can target.
//!
//! Each constant is an opaque scalar provider: it can produce a fresh numeric value at any
//! requested decimal precision, and a symbolic handle that only the presentation layer looks
//! at. The search core never assumes anything else about them.

use crate::precision::dps_to_prec;
use rug::float::Constant;
use rug::Float;
use std::fmt::{Display, Formatter};

/// A named constant (or product of primitives) that candidate identities are built around.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MathConstant {
    /// Euler's number $e$.
    E,
    /// $\pi$.
    Pi,
    /// The Riemann zeta value $\zeta(n)$ at a positive integer argument.
    Zeta(u32),
    /// Catalan's constant $G = \sum_{k \ge 0} (-1)^k / (2k+1)^2$.
    Catalan,
    /// The product $\pi \cdot \operatorname{acosh}(2)$, a single scalar as far as the search
    /// is concerned.
    PiAcosh2,
}

impl MathConstant {
    /// Evaluates the constant from scratch at `dps` decimal digits.
    pub fn eval(&self, dps: u32) -> Float {
        let prec = dps_to_prec(dps);
        match self {
            MathConstant::E => Float::with_val(prec, 1u32).exp(),
            MathConstant::Pi => Float::with_val(prec, Constant::Pi),
            MathConstant::Zeta(n) => Float::with_val(prec, *n).zeta(),
            MathConstant::Catalan => Float::with_val(prec, Constant::Catalan),
            MathConstant::PiAcosh2 => {
                let pi = Float::with_val(prec, Constant::Pi);
                let acosh2 = Float::with_val(prec, 2u32).acosh();
                Float::with_val(prec, &pi * &acosh2)
            }
        }
    }

    /// The LaTeX fragment the presentation layer prints for this constant.
    pub fn symbol(&self) -> String {
        match self {
            MathConstant::E => "e".to_string(),
            MathConstant::Pi => "\\pi".to_string(),
            MathConstant::Zeta(n) => format!("\\zeta\\left({}\\right)", n),
            MathConstant::Catalan => "Catalan".to_string(),
            MathConstant::PiAcosh2 => "\\pi \\operatorname{acosh}{\\left(2 \\right)}".to_string(),
        }
    }
}

impl Display for MathConstant {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            MathConstant::E => write!(f, "e"),
            MathConstant::Pi => write!(f, "pi"),
            MathConstant::Zeta(n) => write!(f, "zeta({})", n),
            MathConstant::Catalan => write!(f, "catalan"),
            MathConstant::PiAcosh2 => write!(f, "pi*acosh(2)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close_to(c: MathConstant, reference_digits: &str, tolerance: &str) {
        let val = c.eval(50);
        let prec = val.prec();
        let reference = Float::with_val(prec, Float::parse(reference_digits).unwrap());
        let tolerance = Float::with_val(prec, Float::parse(tolerance).unwrap());
        let diff = Float::with_val(prec, &val - &reference).abs();
        assert!(diff < tolerance, "{} evaluated to {}, expected {}", c, val, reference);
    }

    #[test]
    fn known_decimal_expansions() {
        assert_close_to(
            MathConstant::E,
            "2.71828182845904523536028747135266249775724709369995",
            "1e-45",
        );
        assert_close_to(
            MathConstant::Pi,
            "3.14159265358979323846264338327950288419716939937510",
            "1e-45",
        );
        assert_close_to(
            MathConstant::Zeta(3),
            "1.20205690315959428539973816151144999076498629234049",
            "1e-45",
        );
        assert_close_to(
            MathConstant::Catalan,
            "0.91596559417721901505460351493238411077414937428167",
            "1e-45",
        );
        // pi * ln(2 + sqrt(3)), correct to the digits shown
        assert_close_to(MathConstant::PiAcosh2, "4.137345254", "1e-8");
    }

    #[test]
    fn precision_is_fresh_per_call() {
        let coarse = MathConstant::E.eval(50);
        let fine = MathConstant::E.eval(200);
        assert!(fine.prec() > coarse.prec());
        let diff = Float::with_val(fine.prec(), &fine - &coarse).abs();
        assert!(diff < Float::with_val(fine.prec(), Float::parse("1e-45").unwrap()));
    }
}
