//! Shared test utilities for faqkit.

pub mod fixtures;

/// Assert two scores are equal within `1e-9`.
#[track_caller]
pub fn assert_score_eq(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "score {actual} differs from expected {expected}"
    );
}
