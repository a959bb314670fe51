use tracing::{info, warn};

use crate::logging::pii::{mask_identifier, Redacted};

/// Log a credential lookup that matched no customer.
pub fn credentials_rejected(username: &str) {
    warn!(
        event = "SECURITY_CREDENTIALS_REJECTED",
        username = %mask_identifier(username),
        "Customer credential lookup failed"
    );
}

/// Log a lookup keyed on a social security number.
pub fn ssn_lookup(ssn: &str, found: bool) {
    info!(
        event = "SECURITY_SSN_LOOKUP",
        ssn = %Redacted(ssn),
        found,
        "Customer looked up by SSN"
    );
}
