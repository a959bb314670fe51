use backend::db::require_db;
use backend::services::OFFSET;
use futures::future::join_all;

use crate::support::build_seeded_state;
use crate::support::fixtures::CUSTOMER_SEQ_VALUE;

const CALLERS: i64 = 25;

#[tokio::test]
async fn concurrent_callers_get_a_contiguous_progression(
) -> Result<(), Box<dyn std::error::Error>> {
    let state = build_seeded_state().await?;
    let db = require_db(&state)?;
    let gen = state.sequences;

    let results = join_all((0..CALLERS).map(|_| gen.get_next_id(db, "Customer"))).await;

    let mut ids = results.into_iter().collect::<Result<Vec<_>, _>>()?;
    ids.sort_unstable();

    let expected: Vec<i64> = (1..=CALLERS)
        .map(|k| CUSTOMER_SEQ_VALUE + k * OFFSET)
        .collect();
    assert_eq!(ids, expected);

    assert_eq!(
        gen.get_current_id(db, "Customer").await?,
        CUSTOMER_SEQ_VALUE + CALLERS * OFFSET
    );

    Ok(())
}
