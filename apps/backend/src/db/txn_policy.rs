use std::sync::OnceLock;

/// Whether [`crate::db::txn::with_txn`] commits or rolls back a successful closure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TxnPolicy {
    /// Commit on success (default)
    CommitOnOk,
    /// Roll back even on success, leaving the database as it was
    RollbackOnOk,
}

impl TxnPolicy {
    /// Parse a policy name as used in `PARABANK_TXN_POLICY`.
    ///
    /// `commit` selects [`TxnPolicy::CommitOnOk`]; anything else rolls back, so a
    /// typo in a test environment never persists data.
    pub fn from_name(name: &str) -> Self {
        if name.trim().eq_ignore_ascii_case("commit") {
            TxnPolicy::CommitOnOk
        } else {
            TxnPolicy::RollbackOnOk
        }
    }
}

static POLICY: OnceLock<TxnPolicy> = OnceLock::new();

/// Current process-wide policy. Defaults to `CommitOnOk`.
pub fn current() -> TxnPolicy {
    POLICY.get().copied().unwrap_or(TxnPolicy::CommitOnOk)
}

/// Set the policy for the process. Only the first call has any effect.
pub fn set_txn_policy(policy: TxnPolicy) {
    let _ = POLICY.set(policy);
}
