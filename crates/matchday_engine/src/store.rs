use matchday_core::Row;

use crate::StoreError;

/// The data store a list screen is backed by.
///
/// Calls from the pipeline are independent: nothing is assumed about
/// ordering or atomicity between a fetch and a delete.
#[async_trait::async_trait]
pub trait Store<R: Row>: Send + Sync {
    /// Returns the complete current collection.
    async fn fetch_all(&self) -> Result<Vec<R>, StoreError>;

    /// Deletes one row. `Ok(false)` means no row with this identity existed.
    async fn delete_by_id(&self, id: &R::Id) -> Result<bool, StoreError>;
}
