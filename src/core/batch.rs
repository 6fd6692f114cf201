use crate::core::expander::expand_selection;
use crate::domain::ports::ListingApi;
use crate::utils::error::{DeskError, Result};

/// What the batch view receives: the backend's view id plus the expanded,
/// de-duplicated SKU list that was handed over.
#[derive(Debug, Clone, PartialEq)]
pub struct BatchHandoff {
    pub batch_id: String,
    pub skus: Vec<String>,
}

/// Expands a raw selection and enforces the one precondition of the bulk
/// flow: an empty expansion aborts with [`DeskError::EmptySelection`]
/// before anything is sent.
pub fn prepare_selection(selected: &[String]) -> Result<Vec<String>> {
    let skus = expand_selection(selected);
    if skus.is_empty() {
        return Err(DeskError::EmptySelection);
    }
    Ok(skus)
}

/// The "send to batch view" bulk action: expand, de-duplicate globally,
/// then hand the list to the backend's batch-view endpoint.
pub async fn send_selection_to_batch<A: ListingApi>(
    api: &A,
    selected: &[String],
) -> Result<BatchHandoff> {
    let skus = prepare_selection(selected)?;
    tracing::info!("Sending {} SKUs to batch view", skus.len());
    let batch_id = api.send_batch(&skus).await?;
    Ok(BatchHandoff { batch_id, skus })
}
