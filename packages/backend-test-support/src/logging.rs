//! Unified test logging initialization
//!
//! One subscriber per test binary, installed on first use. Unit tests and
//! integration tests both go through [`init`].

use once_cell::sync::OnceCell;
use tracing_subscriber::{fmt, EnvFilter};

static INITIALIZED: OnceCell<()> = OnceCell::new();

/// Default filter when neither `TEST_LOG` nor `RUST_LOG` is set.
/// sqlx statement logging is noisy at info.
const DEFAULT_FILTER: &str = "warn,sqlx=error";

/// Initialize structured logging for tests.
///
/// Idempotent and race-safe. The filter is taken from, in order:
///
/// 1. `TEST_LOG`
/// 2. `RUST_LOG`
/// 3. [`DEFAULT_FILTER`]
///
/// Set `TEST_LOG_JSON=1` to emit JSON lines instead of the compact format,
/// which is handy when grepping `customer_id` / `sequence` fields.
pub fn init() {
    INITIALIZED.get_or_init(|| {
        let filter = std::env::var("TEST_LOG")
            .or_else(|_| std::env::var("RUST_LOG"))
            .map(EnvFilter::new)
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

        let json = std::env::var("TEST_LOG_JSON").is_ok_and(|v| v == "1");

        let builder = fmt()
            .with_env_filter(filter)
            .with_test_writer() // cargo/nextest capture
            .without_time();

        // try_init: something else may already own the global subscriber
        if json {
            builder.json().try_init().ok();
        } else {
            builder.try_init().ok();
        }
    });
}
