use crate::errors::SearchError;
use crate::precision::working_prec;
use crate::render;
use crate::series::CoefficientSpace;
use crate::utils::are_coprime;
use crate::utils::bigfloat::float_key;
use rug::Float;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

/// One stored left-hand side: the rational-in-constants expression
/// $\frac{\alpha_0 + \alpha_1 c_1 + \dots + \alpha_k c_k}{\beta_0 + \beta_1 c_1 + \dots + \beta_k c_k}$
/// as its two coefficient tuples.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LhsEntry {
    pub top: Vec<i64>,
    pub bottom: Vec<i64>,
}

/// The left-hand-side index of the meet-in-the-middle search: every canonicalized rational
/// combination of the constants over a coefficient range, keyed by its truncated-value
/// fingerprint.
///
/// Built once per run, then read-only. Entries satisfy the canonical form: the numerator is
/// numerically positive, the combined coefficient tuple has gcd 1, the denominator does not
/// vanish, and the key does not collide with any purely rational value of the same range
/// (those match regardless of the constants and are purged up front).
#[derive(Debug, Serialize, Deserialize)]
pub struct LhsHashTable {
    threshold_exp: u32,
    entries: HashMap<i128, LhsEntry>,
}

/// $\alpha_0 + \sum_i \alpha_{i+1} c_i$ over the given constant values.
pub(crate) fn affine_combination(coeffs: &[i64], constant_values: &[Float], prec: u32) -> Float {
    let mut acc = Float::with_val(prec, coeffs[0]);
    for (&c, value) in coeffs[1..].iter().zip(constant_values.iter()) {
        acc += Float::with_val(prec, value * c);
    }
    acc
}

impl LhsHashTable {
    /// Enumerates all `top`/`bottom` pairs over `[-search_limit, search_limit]^{k+1}` and
    /// stores every canonical entry under its fingerprint key. Constant values must already
    /// be evaluated at the ambient working precision.
    pub fn build(search_limit: i64, constant_values: &[Float], threshold_exp: u32) -> Self {
        let prec = working_prec();
        let key_factor = 10i128.pow(threshold_exp);

        // Keys of p/q for all admissible integer p, q: values independent of the constants.
        // Dilated by one key in each direction against rounding at the truncation boundary.
        let mut blacklist: HashSet<i128> = HashSet::new();
        for p in -search_limit..=search_limit {
            if p == 0 {
                continue;
            }
            for q in -search_limit..=search_limit {
                if q == 0 {
                    continue;
                }
                let key = (p as i128 * key_factor) / q as i128;
                blacklist.insert(key - 1);
                blacklist.insert(key);
                blacklist.insert(key + 1);
            }
        }

        let space = CoefficientSpace::symmetric(constant_values.len() + 1, search_limit);
        let bottoms = space
            .iterate()
            .map(|bottom| {
                let den = affine_combination(&bottom, constant_values, prec);
                (bottom, den)
            })
            .collect::<Vec<(Vec<i64>, Float)>>();

        let mut entries: HashMap<i128, LhsEntry> = HashMap::new();
        for top in space.iterate() {
            let num = affine_combination(&top, constant_values, prec);
            // only positive numerators, to cut sign-swapped duplicates
            if num.cmp0() != Some(Ordering::Greater) {
                continue;
            }
            for (bottom, den) in &bottoms {
                if den.is_zero() {
                    continue;
                }
                // skip expressions an integer factor would cancel
                if !are_coprime(&top, bottom) {
                    continue;
                }
                let val = Float::with_val(prec, &num / den);
                let Some(key) = float_key(&val, threshold_exp) else {
                    continue;
                };
                // key 0 is the probe-side sentinel for degenerate fractions and must stay
                // a guaranteed miss
                if key == 0 || blacklist.contains(&key) {
                    continue;
                }
                // TODO: consider keeping every colliding entry per key instead of
                // last-write-wins; verification already rejects the impostors.
                entries.insert(
                    key,
                    LhsEntry {
                        top: top.clone(),
                        bottom: bottom.clone(),
                    },
                );
            }
        }

        LhsHashTable {
            threshold_exp,
            entries,
        }
    }

    pub fn threshold_exp(&self) -> u32 {
        self.threshold_exp
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, key: i128) -> bool {
        self.entries.contains_key(&key)
    }

    pub fn get(&self, key: i128) -> Option<&LhsEntry> {
        self.entries.get(&key)
    }

    pub fn entries(&self) -> impl Iterator<Item = (&i128, &LhsEntry)> {
        self.entries.iter()
    }

    /// Re-evaluates the entry stored under `key` at the ambient working precision. `None`
    /// for unknown keys and for degenerate arithmetic (vanishing denominator, non-finite
    /// result), which callers skip silently.
    pub fn evaluate(&self, key: i128, constant_values: &[Float]) -> Option<Float> {
        let entry = self.entries.get(&key)?;
        let prec = working_prec();
        let num = affine_combination(&entry.top, constant_values, prec);
        let den = affine_combination(&entry.bottom, constant_values, prec);
        if den.is_zero() {
            return None;
        }
        let val = Float::with_val(prec, &num / &den);
        val.is_finite().then_some(val)
    }

    /// The entry stored under `key` as a rendered expression over the constants' symbolic
    /// handles.
    pub fn evaluate_symbolic(&self, key: i128, symbols: &[String]) -> Option<String> {
        let entry = self.entries.get(&key)?;
        Some(render::ratio_latex(entry, symbols))
    }

    /// Writes a self-describing binary image of the table. Backward compatibility across
    /// versions is not promised.
    pub fn save(&self, path: &Path) -> Result<(), SearchError> {
        let file = File::create(path)?;
        bincode::serialize_into(BufWriter::new(file), self)?;
        Ok(())
    }

    /// Reloads a table written by [`save`](Self::save).
    pub fn load(path: &Path) -> Result<Self, SearchError> {
        let file = File::open(path)?;
        Ok(bincode::deserialize_from(BufReader::new(file))?)
    }
}

/// Two tables are interchangeable iff they use the same threshold and index the same keys.
impl PartialEq for LhsHashTable {
    fn eq(&self, other: &Self) -> bool {
        self.threshold_exp == other.threshold_exp
            && self.entries.len() == other.entries.len()
            && self.entries.keys().all(|k| other.entries.contains_key(k))
    }
}

impl Eq for LhsHashTable {}
