// Shared proptest configuration for integration tests.
//
// Env knobs:
// - PROPTEST_CASES: cases per property (default 8; every case builds a database)
// - PROPTEST_MAX_SHRINK_MS: cap on shrinking time in milliseconds

pub fn proptest_prelude_config() -> proptest::prelude::ProptestConfig {
    let base = proptest::prelude::ProptestConfig::default();

    let cases = std::env::var("PROPTEST_CASES")
        .ok()
        .and_then(|s| s.parse::<u32>().ok())
        .unwrap_or(8)
        .max(1);

    let max_shrink_time = std::env::var("PROPTEST_MAX_SHRINK_MS")
        .ok()
        .and_then(|s| s.parse::<u32>().ok())
        .unwrap_or(base.max_shrink_time);

    proptest::prelude::ProptestConfig {
        // no regression files for integration binaries
        failure_persistence: None,
        cases,
        max_shrink_time,
        ..base
    }
}
