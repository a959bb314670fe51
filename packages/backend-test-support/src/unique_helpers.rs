//! Test helpers for generating unique test data
//!
//! ULIDs keep generated keys distinct across tests that share a database.

use ulid::Ulid;

/// Generate a unique string in the format `{prefix}-{ulid}`
///
/// # Examples
/// ```
/// use backend_test_support::unique_helpers::unique_str;
///
/// let id1 = unique_str("user");
/// let id2 = unique_str("user");
/// assert_ne!(id1, id2);
/// assert!(id1.starts_with("user-"));
/// ```
pub fn unique_str(prefix: &str) -> String {
    format!("{}-{}", prefix, Ulid::new())
}

/// Generate a unique SSN-shaped string (`ddd-dd-dddd`).
///
/// Digits are drawn from the ULID's random component, so collisions are
/// possible in principle but vanishingly rare within one test run.
///
/// # Examples
/// ```
/// use backend_test_support::unique_helpers::unique_ssn;
///
/// let ssn = unique_ssn();
/// assert_eq!(ssn.len(), 11);
/// assert_eq!(&ssn[3..4], "-");
/// assert_eq!(&ssn[6..7], "-");
/// ```
pub fn unique_ssn() -> String {
    let n = Ulid::new().random() % 1_000_000_000;
    let digits = format!("{n:09}");
    format!("{}-{}-{}", &digits[..3], &digits[3..5], &digits[5..])
}

/// Generate a unique username with the given prefix
///
/// # Examples
/// ```
/// use backend_test_support::unique_helpers::unique_username;
///
/// let a = unique_username("steve");
/// assert!(a.starts_with("steve_"));
/// assert_ne!(a, unique_username("steve"));
/// ```
pub fn unique_username(prefix: &str) -> String {
    format!("{}_{}", prefix, Ulid::new().to_string().to_lowercase())
}
