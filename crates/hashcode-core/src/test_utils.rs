//! Shared helpers for unit tests.

use std::sync::Once;

use tracing_subscriber::EnvFilter;

use crate::combine::{bytes_hash, int_hash, mix, record_seed, SEED};

static INIT: Once = Once::new();

/// Installs a test-writer subscriber once per process. Filter with
/// `RUST_LOG`, e.g. `RUST_LOG=hashcode_core=trace`.
pub fn init_tracing() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

/// Hash of an integer, spelled out.
pub fn ih(v: i64) -> u64 {
    int_hash(v as u64)
}

/// Hash of a string, spelled out.
pub fn sh(s: &str) -> u64 {
    bytes_hash(s.as_bytes())
}

/// Folds children from the sequence seed.
pub fn fold(children: &[u64]) -> u64 {
    children.iter().fold(SEED, |acc, &c| mix(acc, c))
}

/// Folds fields from a record seed.
pub fn fold_record(name: &str, fields: &[u64]) -> u64 {
    fields.iter().fold(record_seed(name), |acc, &c| mix(acc, c))
}
