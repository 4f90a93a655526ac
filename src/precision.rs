//! Scoped working precision.
//!
//! Every phase of the search runs at a known decimal precision: the cheap enumeration at
//! [`ENUM_DPS`](crate::constants::ENUM_DPS), verification at twice
//! [`VERIFY_DPS`](crate::constants::VERIFY_DPS), presentation-time convergence measurement at
//! `VERIFY_DPS`. The precision is a thread-local ambient property, changed only through
//! [`ScopedDps`], which restores the previous value on drop no matter how the scope exits.

use crate::constants::ENUM_DPS;
use std::cell::Cell;

thread_local! {
    static WORKING_DPS: Cell<u32> = Cell::new(ENUM_DPS);
}

/// log2(10), to slightly more figures than an f64 can hold.
const LOG2_10: f64 = 3.321_928_094_887_362;

/// Converts a decimal precision to a binary (MPFR) one, with one extra decimal digit of
/// headroom so that decimal round-trips do not lose the last place.
pub fn dps_to_prec(dps: u32) -> u32 {
    (((dps + 1) as f64) * LOG2_10).round() as u32
}

/// The ambient decimal precision of the current thread.
pub fn working_dps() -> u32 {
    WORKING_DPS.with(Cell::get)
}

/// The ambient precision of the current thread, in bits.
pub fn working_prec() -> u32 {
    dps_to_prec(working_dps())
}

/// Sets the thread's working decimal precision for as long as the guard lives.
///
/// Scopes nest; each guard restores exactly the precision it displaced, including during
/// unwinding, so a precision change can never leak across a component boundary.
pub struct ScopedDps {
    previous: u32,
}

impl ScopedDps {
    pub fn new(dps: u32) -> Self {
        let previous = WORKING_DPS.with(|cell| cell.replace(dps));
        ScopedDps { previous }
    }
}

impl Drop for ScopedDps {
    fn drop(&mut self) {
        WORKING_DPS.with(|cell| cell.set(self.previous));
    }
}
