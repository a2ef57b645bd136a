use crate::{Changeset, Row};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect<R: Row> {
    /// Ask the store for the full collection, tagged with the request generation.
    Fetch { generation: u64 },
    /// Ask the store to delete one row.
    Delete { id: R::Id },
    /// Loading indicator transition.
    LoadingChanged(bool),
    /// A refresh completed; consumers apply these edits to their rows.
    ContentChanged(Changeset<R>),
    /// Human-readable failure for the user.
    Alert(String),
}
