use crate::{ListState, Match, Player};

pub const LIST_TITLE: &str = "Matches";

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MatchesViewModel {
    pub title: String,
    pub loading: bool,
    pub rows: Vec<MatchRowView>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchRowView {
    pub home_players: String,
    pub away_players: String,
    pub result: String,
}

impl From<&Match> for MatchRowView {
    fn from(row: &Match) -> Self {
        Self {
            home_players: joined_names(&row.home_players),
            away_players: joined_names(&row.away_players),
            result: format_result(row),
        }
    }
}

impl ListState<Match> {
    pub fn view(&self) -> MatchesViewModel {
        MatchesViewModel {
            title: LIST_TITLE.to_string(),
            loading: self.is_loading(),
            rows: self.rows().iter().map(MatchRowView::from).collect(),
        }
    }

    /// The match to hand to an editor screen.
    pub fn match_at(&self, index: usize) -> Option<&Match> {
        self.row_at(index)
    }

    pub fn home_players_at(&self, index: usize) -> Option<String> {
        self.row_at(index).map(|row| joined_names(&row.home_players))
    }

    pub fn away_players_at(&self, index: usize) -> Option<String> {
        self.row_at(index).map(|row| joined_names(&row.away_players))
    }

    pub fn result_at(&self, index: usize) -> Option<String> {
        self.row_at(index).map(format_result)
    }
}

fn joined_names(players: &[Player]) -> String {
    players
        .iter()
        .map(|player| player.name.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

fn format_result(row: &Match) -> String {
    format!("{} : {}", row.home_goals, row.away_goals)
}
