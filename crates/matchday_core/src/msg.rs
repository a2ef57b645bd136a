use crate::Row;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg<R: Row> {
    /// The owning screen became visible (`true`) or hidden (`false`).
    SetActive(bool),
    /// Explicit request to resynchronize with the store.
    RefreshRequested,
    /// User asked to delete the row with this identity.
    DeleteRequested { id: R::Id },
    /// Store answer for the fetch issued with `generation`.
    FetchCompleted {
        generation: u64,
        result: Result<Vec<R>, String>,
    },
    /// Store answer for a delete. `Ok(false)` means nothing was removed.
    DeleteCompleted {
        id: R::Id,
        result: Result<bool, String>,
    },
    /// Fallback for placeholder wiring.
    NoOp,
}
