//! Properties of the LHS hash table: canonical form, fingerprint reproducibility,
//! rational purging, equality, and persistence.

use gcf_mitm::constants::{DEFAULT_THRESHOLD_EXP, ENUM_DPS};
use gcf_mitm::lhs::{LhsHashTable, TableRegistry};
use gcf_mitm::{MathConstant, SearchError};
use more_asserts::{assert_gt, assert_le};
use rug::Float;
use std::path::PathBuf;
use std::sync::Arc;

fn constant_values(constants: &[MathConstant], dps: u32) -> Vec<Float> {
    constants.iter().map(|c| c.eval(dps)).collect()
}

fn e_table(range: i64) -> LhsHashTable {
    let values = constant_values(&[MathConstant::E], ENUM_DPS);
    LhsHashTable::build(range, &values, DEFAULT_THRESHOLD_EXP)
}

fn temp_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("gcf-mitm-{}-{}", std::process::id(), name))
}

#[test]
fn stores_the_canonical_coth_half_entry() {
    let table = e_table(2);
    assert_gt!(table.len(), 0);

    // (1 + e)/(-1 + e) = coth(1/2) = 2.1639534137386528...
    let key = 21_639_534_137_i128;
    assert!(table.contains(key));
    let entry = table.get(key).unwrap();
    assert_eq!(entry.top, vec![1, 1]);
    assert_eq!(entry.bottom, vec![-1, 1]);
}

#[test]
fn every_stored_key_reproduces_from_its_entry() {
    let table = e_table(2);
    let values = constant_values(&[MathConstant::E], ENUM_DPS);
    let key_factor = 10i128.pow(DEFAULT_THRESHOLD_EXP);

    for (&key, _) in table.entries() {
        let val = table
            .evaluate(key, &values)
            .expect("stored entries must re-evaluate");
        // trunc(val * 10^D) recomputed from scratch, one ulp of slack at the boundary
        let scaled = val * Float::with_val(64, key_factor);
        let recomputed = scaled
            .trunc()
            .to_integer()
            .and_then(|n| n.to_i128())
            .unwrap();
        assert_le!((recomputed - key).abs(), 1, "key {} drifted on re-evaluation", key);
    }
}

#[test]
fn rational_values_are_purged() {
    let table = e_table(2);
    let key_factor = 10i128.pow(DEFAULT_THRESHOLD_EXP);

    // no key of any p/q with p, q in [-2, 2] \ {0} survives, nor its neighbors
    for p in [-2i128, -1, 1, 2] {
        for q in [-2i128, -1, 1, 2] {
            let key = p * key_factor / q;
            for neighbor in [key - 1, key, key + 1] {
                assert!(
                    !table.contains(neighbor),
                    "rational {}/{} leaked into the table",
                    p,
                    q
                );
            }
        }
    }

    // and no entry is constant-free on both sides
    for (_, entry) in table.entries() {
        let pure_rational =
            entry.top[1..].iter().all(|&c| c == 0) && entry.bottom[1..].iter().all(|&c| c == 0);
        assert!(!pure_rational);
    }
}

#[test]
fn sentinel_key_is_never_stored() {
    // key 0 marks a degenerate fraction on the probe side, so it must always miss
    for range in [2, 3] {
        assert!(!e_table(range).contains(0));
    }
}

#[test]
fn tables_compare_by_threshold_and_key_set() {
    let first = e_table(2);
    let second = e_table(2);
    assert_eq!(first, second);

    let wider = e_table(3);
    assert_ne!(first, wider);
}

#[test]
fn evaluate_matches_the_closed_form() {
    let table = e_table(2);
    let values = constant_values(&[MathConstant::E], ENUM_DPS);
    let val = table.evaluate(21_639_534_137, &values).unwrap();

    let prec = val.prec();
    let e = Float::with_val(prec, 1u32).exp();
    let one = Float::with_val(prec, 1u32);
    let reference = Float::with_val(prec, &e + &one) / Float::with_val(prec, &e - &one);
    let diff = Float::with_val(prec, &val - &reference).abs();
    assert!(diff < Float::with_val(prec, Float::parse("1e-40").unwrap()));
}

#[test]
fn evaluate_symbolic_prints_the_stored_ratio() {
    let table = e_table(2);
    let symbols = vec![MathConstant::E.symbol()];
    assert_eq!(
        table.evaluate_symbolic(21_639_534_137, &symbols).unwrap(),
        "\\frac{1 + e}{-1 + e}"
    );
    assert_eq!(table.evaluate_symbolic(0, &symbols), None);
}

#[test]
fn survives_a_disk_round_trip() {
    let table = e_table(2);
    let path = temp_path("roundtrip.bin");

    table.save(&path).unwrap();
    let reloaded = LhsHashTable::load(&path).unwrap();
    assert_eq!(table, reloaded);
    assert_eq!(reloaded.threshold_exp(), DEFAULT_THRESHOLD_EXP);

    std::fs::remove_file(&path).unwrap();
}

#[test]
fn registry_shares_one_instance_per_path() {
    let table = e_table(2);
    let path = temp_path("registry.bin");
    table.save(&path).unwrap();

    let registry = TableRegistry::new();
    let first = registry.load(&path).unwrap();
    let second = registry.load(&path).unwrap();
    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(*first, table);

    std::fs::remove_file(&path).unwrap();
}

#[test]
fn missing_file_propagates_as_io_error() {
    let registry = TableRegistry::new();
    let result = registry.load(&temp_path("does-not-exist.bin"));
    assert!(matches!(result, Err(SearchError::Io(_))));
}
