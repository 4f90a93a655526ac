//
// Fingerprinting
//

/// Decimal digits `D` kept by the fingerprint key: a real value `x` is keyed as
/// `trunc(x * 10^D)`. Equivalently, the match threshold is `10^-D`.
pub const DEFAULT_THRESHOLD_EXP: u32 = 10;

/// Working decimal precision during hash-table construction and the first enumeration pass.
pub const ENUM_DPS: u32 = 50;

/// Final decimal precision budget for validating candidate identities. The verifier itself
/// works at twice this, to absorb the truncation error of the finite continued fraction.
pub const VERIFY_DPS: u32 = 2000;

/// Number of significant decimal digits that must agree, as strings, for a candidate
/// identity to be accepted.
pub const VERIFY_DIGITS: usize = 100;

//
// Continued-fraction depths
//

/// Convergent depth used when fingerprinting candidates in the first pass. 32 terms are
/// enough to separate ~10^10 keys for well-converging fractions; slow or divergent ones
/// are filtered by the miss itself or by verification.
pub const N_INITIAL_SEARCH_TERMS: usize = 32;

/// Convergent depth used when re-evaluating a candidate at verification precision.
pub const N_VERIFY_TERMS: usize = 1000;

//
// Progress reporting
//

/// How many enumeration probes pass between two progress log lines.
pub const PROGRESS_INTERVAL: u64 = 100_000;
