//! Meet-in-the-middle search for continued-fraction identities.
//!
//! The crate hunts for equalities between a closed-form expression in mathematical
//! constants (such as $e$, $\pi$, $\zeta(3)$, Catalan) and a generalized continued fraction
//! whose partial numerators $\{b_n\}$ and denominators $\{a_n\}$ are integer polynomial
//! series in $n$. One side is indexed: every canonical rational combination of the
//! constants over a coefficient range goes into a hash table keyed by its truncated
//! high-precision value. The other side is streamed: millions of candidate fractions are
//! evaluated through the integer convergent recurrence and probed against the table. Hits
//! are numerical coincidences until the verifier re-derives both sides to 100 significant
//! digits.
//!
//! Coverage is probabilistic, not exhaustive: a true identity whose fingerprint lands one
//! key off the stored one (the truncation boundary) is missed, and distinct left-hand
//! sides that alias to one key keep only the last; verification weeds the impostors out.

pub mod constant;
pub mod constants;
pub mod errors;
pub mod gcf;
pub mod lhs;
pub mod precision;
pub mod render;
pub mod search;
pub mod series;
pub(crate) mod utils;

pub use constant::MathConstant;
pub use errors::SearchError;
pub use lhs::{LhsEntry, LhsHashTable, TableRegistry};
pub use search::{run_partitioned, GcfSearchEngine, Match, SearchOutcome};
