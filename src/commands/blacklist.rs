//! Blacklist commands.

use tracing::debug;

use crate::error::AppError;

use super::state::AppState;

pub async fn add_ip(state: &AppState, ip: &str) -> Result<(), AppError> {
    let outcome = state.mutations.add_ip(ip).await?;
    debug!("Blacklist add settled: {outcome:?}");
    Ok(())
}

pub async fn remove_ip(state: &AppState, ip: &str) -> Result<(), AppError> {
    let outcome = state.mutations.remove_ip(ip).await?;
    debug!("Blacklist removal settled: {outcome:?}");
    Ok(())
}
