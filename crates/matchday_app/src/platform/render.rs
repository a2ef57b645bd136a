use chrono::{DateTime, Utc};
use matchday_core::{Changeset, Edit, Match, MatchRowView};

pub fn render_table(title: &str, rows: &[Match]) -> Vec<String> {
    let mut lines = Vec::with_capacity(rows.len() + 2);
    lines.push(format!("== {title} ({}) ==", rows.len()));
    if rows.is_empty() {
        lines.push("   (no matches)".to_string());
    }
    for (index, row) in rows.iter().enumerate() {
        lines.push(format!("{:>3}. {}", index + 1, format_row(row)));
    }
    lines
}

pub fn render_changeset(changeset: &Changeset<Match>, at: DateTime<Utc>) -> Vec<String> {
    let mut lines = Vec::with_capacity(changeset.edits().len() + 1);
    lines.push(format!(
        "[{}] updated: {} inserted, {} deleted, {} moved, {} changed",
        at.format("%H:%M:%S"),
        changeset.insertions().len(),
        changeset.deletions().len(),
        changeset.moves().len(),
        changeset.updates().len()
    ));
    for edit in changeset.edits() {
        let line = match edit {
            Edit::Delete { index, row } => format!("  - {:>3}. {}", index + 1, format_row(row)),
            Edit::Insert { index, row } => format!("  + {:>3}. {}", index + 1, format_row(row)),
            Edit::Move { from, to, row } => {
                format!("  > {:>3} -> {}. {}", from + 1, to + 1, format_row(row))
            }
            Edit::Update { index, row } => format!("  ~ {:>3}. {}", index + 1, format_row(row)),
        };
        lines.push(line);
    }
    lines
}

pub fn render_loading(loading: bool) -> &'static str {
    if loading {
        "loading..."
    } else {
        "done."
    }
}

fn format_row(row: &Match) -> String {
    let view = MatchRowView::from(row);
    format!(
        "{}  {}  {}",
        display_side(&view.home_players),
        view.result,
        display_side(&view.away_players)
    )
}

fn display_side(names: &str) -> &str {
    if names.is_empty() {
        "?"
    } else {
        names
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use matchday_core::{diff, Match, Player};
    use pretty_assertions::assert_eq;

    use super::{render_changeset, render_loading, render_table};

    fn row(id: &str, home: &str, away: &str, score: (u32, u32)) -> Match {
        Match::new(id)
            .with_players(vec![Player::new(home, home)], vec![Player::new(away, away)])
            .with_score(score.0, score.1)
    }

    #[test]
    fn table_numbers_rows_from_one() {
        let rows = vec![row("a", "Ann", "Ben", (1, 0)), Match::new("b")];

        assert_eq!(
            render_table("Matches", &rows),
            vec![
                "== Matches (2) ==".to_string(),
                "  1. Ann  1 : 0  Ben".to_string(),
                "  2. ?  0 : 0  ?".to_string(),
            ]
        );
    }

    #[test]
    fn empty_table_says_so() {
        assert_eq!(render_table("Matches", &[])[1], "   (no matches)");
    }

    #[test]
    fn changeset_lists_each_edit() {
        let old = vec![row("a", "Ann", "Ben", (1, 0)), row("b", "Cy", "Di", (0, 0))];
        let new = vec![row("b", "Cy", "Di", (0, 1)), row("c", "Ed", "Flo", (2, 2))];
        let at = Utc.with_ymd_and_hms(2026, 5, 1, 18, 30, 5).unwrap();

        let lines = render_changeset(&diff(&old, &new), at);

        assert_eq!(
            lines,
            vec![
                "[18:30:05] updated: 1 inserted, 1 deleted, 0 moved, 1 changed".to_string(),
                "  -   1. Ann  1 : 0  Ben".to_string(),
                "  +   2. Ed  2 : 2  Flo".to_string(),
                "  ~   1. Cy  0 : 1  Di".to_string(),
            ]
        );
    }

    #[test]
    fn loading_labels() {
        assert_eq!(render_loading(true), "loading...");
        assert_eq!(render_loading(false), "done.");
    }
}
