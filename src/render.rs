//! LaTeX presentation of validated identities.
//!
//! Everything here is string assembly over the constants' opaque symbolic handles; the
//! search core never feeds back from this module. Conventions: the constant term of an
//! affine combination prints first, coefficients of magnitude one drop the digit, negative
//! partial numerators fold into a minus sign on the enclosing fraction, and the displayed
//! fraction tower ends in a `..` tail.

use crate::lhs::LhsEntry;

/// Minimum number of fraction levels shown for any identity.
const MIN_DISPLAY_DEPTH: usize = 5;

/// `alpha_0 + alpha_1 sym_1 + ...` with zero terms skipped. An all-zero combination prints
/// as `0`.
pub fn affine_latex(coeffs: &[i64], symbols: &[String]) -> String {
    let mut out = String::new();
    let mut first = true;

    let mut push_term = |coeff: i64, symbol: Option<&str>, out: &mut String| {
        if coeff == 0 {
            return;
        }
        let magnitude = coeff.unsigned_abs();
        if first {
            if coeff < 0 {
                out.push('-');
            }
            first = false;
        } else if coeff < 0 {
            out.push_str(" - ");
        } else {
            out.push_str(" + ");
        }
        match symbol {
            None => out.push_str(&magnitude.to_string()),
            Some(sym) => {
                if magnitude != 1 {
                    out.push_str(&format!("{} ", magnitude));
                }
                out.push_str(sym);
            }
        }
    };

    push_term(coeffs[0], None, &mut out);
    for (&coeff, symbol) in coeffs[1..].iter().zip(symbols.iter()) {
        push_term(coeff, Some(symbol.as_str()), &mut out);
    }

    if out.is_empty() {
        out.push('0');
    }
    out
}

/// The stored rational expression as `\frac{top}{bottom}`, collapsing a unit denominator.
pub fn ratio_latex(entry: &LhsEntry, symbols: &[String]) -> String {
    let top = affine_latex(&entry.top, symbols);
    let bottom = affine_latex(&entry.bottom, symbols);
    if bottom == "1" {
        top
    } else {
        format!("\\frac{{{}}}{{{}}}", top, bottom)
    }
}

/// The truncated fraction tower `a_0 ± \frac{|b_0|}{a_1 ± \frac{|b_1|}{...}}` with `depth`
/// fraction levels, the innermost denominator elided as `..`.
pub fn gcf_latex(an: &[i128], bn: &[i128], depth: usize) -> String {
    fn tail(an: &[i128], bn: &[i128], level: usize, depth: usize) -> String {
        if level == depth {
            return "..".to_string();
        }
        let (sign, magnitude) = fraction_sign(bn[level]);
        format!(
            "{} {} \\frac{{{}}}{{{}}}",
            an[level],
            sign,
            magnitude,
            tail(an, bn, level + 1, depth)
        )
    }

    let (sign, magnitude) = fraction_sign(bn[0]);
    format!(
        "{} {} \\frac{{{}}}{{{}}}",
        an[0],
        sign,
        magnitude,
        tail(an, bn, 1, depth)
    )
}

fn fraction_sign(b: i128) -> (char, i128) {
    if b < 0 {
        ('-', -b)
    } else {
        ('+', b)
    }
}

/// How many fraction levels an identity with these coefficient vectors displays.
pub fn display_depth(an_coeffs: &[i64], bn_coeffs: &[i64]) -> usize {
    an_coeffs.len().max(bn_coeffs.len()).max(MIN_DISPLAY_DEPTH)
}
