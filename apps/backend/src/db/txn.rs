use std::future::Future;
use std::pin::Pin;

use sea_orm::{DatabaseTransaction, TransactionTrait};
use tracing::warn;

use super::{require_db, txn_policy};
use crate::error::AppError;
use crate::state::app_state::AppState;

/// Boxed future borrowing the transaction for its lifetime.
pub type TxnFuture<'a, R> = Pin<Box<dyn Future<Output = Result<R, AppError>> + Send + 'a>>;

/// Execute a function within a database transaction.
///
/// On `Ok` the transaction is committed or rolled back per
/// [`txn_policy::current`]; on `Err` it is always rolled back and the
/// original error is returned.
///
/// ```ignore
/// let id = with_txn(&state, |txn| {
///     Box::pin(async move { Ok(store.create_customer(txn, &mut customer).await?) })
/// })
/// .await?;
/// ```
pub async fn with_txn<R, F>(state: &AppState, f: F) -> Result<R, AppError>
where
    F: for<'a> FnOnce(&'a DatabaseTransaction) -> TxnFuture<'a, R>,
{
    let db = require_db(state)?;
    let txn = db.begin().await?;
    let out = f(&txn).await;

    match out {
        Ok(val) => {
            match txn_policy::current() {
                txn_policy::TxnPolicy::CommitOnOk => txn.commit().await?,
                txn_policy::TxnPolicy::RollbackOnOk => txn.rollback().await?,
            }
            Ok(val)
        }
        Err(err) => {
            // best-effort; the closure's error wins
            if let Err(rollback_err) = txn.rollback().await {
                warn!(error = %rollback_err, "transaction rollback failed");
            }
            Err(err)
        }
    }
}
