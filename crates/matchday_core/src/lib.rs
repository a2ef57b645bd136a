//! Matchday core: pure refresh state machine, changeset diffing and list view-model helpers.
mod changeset;
mod effect;
mod model;
mod msg;
mod state;
mod update;
mod view_model;

pub use changeset::{diff, Changeset, Edit};
pub use effect::Effect;
pub use model::{Match, MatchId, Player, PlayerId, Row};
pub use msg::Msg;
pub use state::ListState;
pub use update::update;
pub use view_model::{MatchRowView, MatchesViewModel, LIST_TITLE};
