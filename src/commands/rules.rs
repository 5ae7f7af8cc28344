//! Pattern rule commands.

use tracing::debug;

use crate::error::AppError;

use super::state::AppState;

pub async fn add_rule(state: &AppState, pattern: &str, description: &str) -> Result<(), AppError> {
    let outcome = state.mutations.add_rule(pattern, description).await?;
    debug!("Rule add settled: {outcome:?}");
    Ok(())
}

pub async fn delete_rule(state: &AppState, id: i64) -> Result<(), AppError> {
    let outcome = state.mutations.delete_rule(id).await?;
    debug!("Rule deletion settled: {outcome:?}");
    Ok(())
}
