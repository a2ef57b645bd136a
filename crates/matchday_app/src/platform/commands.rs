use anyhow::{anyhow, bail, Context};
use matchday_core::{Match, Player};

pub const HELP: &str = "\
Commands:
  show                       screen visible (refreshes when it was hidden)
  hide                       screen hidden
  refresh                    fetch the matches again
  list                       print the visible rows
  add <home> - <away> <h>:<a>  create a match, players comma-separated
  edit <row> <h>:<a>         change the score of a row
  delete <row>               delete a row
  help                       this text
  quit                       exit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Show,
    Hide,
    Refresh,
    List,
    Add {
        home: Vec<String>,
        away: Vec<String>,
        score: (u32, u32),
    },
    /// `row` is zero-based.
    Edit { row: usize, score: (u32, u32) },
    /// `row` is zero-based.
    Delete { row: usize },
    Help,
    Quit,
}

/// Parses one console line. Rows are numbered from 1 on the console.
pub fn parse_command(line: &str) -> anyhow::Result<Command> {
    let line = line.trim();
    let (word, rest) = line
        .split_once(char::is_whitespace)
        .map(|(word, rest)| (word, rest.trim()))
        .unwrap_or((line, ""));

    let command = match word.to_ascii_lowercase().as_str() {
        "show" => Command::Show,
        "hide" => Command::Hide,
        "refresh" | "r" => Command::Refresh,
        "list" | "ls" => Command::List,
        "help" | "?" => Command::Help,
        "quit" | "exit" | "q" => Command::Quit,
        "delete" | "del" => Command::Delete {
            row: parse_row(rest)?,
        },
        "edit" => {
            let (row, score) = rest
                .split_once(char::is_whitespace)
                .ok_or_else(|| anyhow!("usage: edit <row> <h>:<a>"))?;
            Command::Edit {
                row: parse_row(row)?,
                score: parse_score(score.trim())?,
            }
        }
        "add" => parse_add(rest)?,
        other => bail!("unknown command {other:?}, type help"),
    };
    Ok(command)
}

fn parse_row(text: &str) -> anyhow::Result<usize> {
    let number: usize = text
        .parse()
        .with_context(|| format!("invalid row number {text:?}"))?;
    number
        .checked_sub(1)
        .ok_or_else(|| anyhow!("rows are numbered from 1"))
}

fn parse_score(text: &str) -> anyhow::Result<(u32, u32)> {
    let (home, away) = text
        .split_once(':')
        .ok_or_else(|| anyhow!("score must look like 3:1, got {text:?}"))?;
    let home = home
        .trim()
        .parse()
        .with_context(|| format!("invalid home goals {home:?}"))?;
    let away = away
        .trim()
        .parse()
        .with_context(|| format!("invalid away goals {away:?}"))?;
    Ok((home, away))
}

fn parse_add(rest: &str) -> anyhow::Result<Command> {
    let (teams, score) = rest
        .rsplit_once(char::is_whitespace)
        .ok_or_else(|| anyhow!("usage: add <home> - <away> <h>:<a>"))?;
    let (home, away) = teams
        .split_once(" - ")
        .ok_or_else(|| anyhow!("separate home and away players with \" - \""))?;
    let home = parse_names(home);
    let away = parse_names(away);
    if home.is_empty() || away.is_empty() {
        bail!("both sides need at least one player");
    }
    Ok(Command::Add {
        home,
        away,
        score: parse_score(score)?,
    })
}

fn parse_names(text: &str) -> Vec<String> {
    text.split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(ToOwned::to_owned)
        .collect()
}

/// Builds a new match with an identity not used by any of `existing`.
pub fn new_match(
    existing: &[Match],
    home: &[String],
    away: &[String],
    score: (u32, u32),
) -> Match {
    let mut n = existing.len() + 1;
    let id = loop {
        let candidate = format!("m{n}");
        if existing.iter().all(|row| row.id != candidate) {
            break candidate;
        }
        n += 1;
    };
    Match::new(id)
        .with_players(players(home), players(away))
        .with_score(score.0, score.1)
}

fn players(names: &[String]) -> Vec<Player> {
    names
        .iter()
        .map(|name| Player::new(name.to_lowercase(), name.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use matchday_core::Match;
    use pretty_assertions::assert_eq;

    use super::{new_match, parse_command, Command};

    #[test]
    fn simple_commands_parse_case_insensitively() {
        assert_eq!(parse_command("  SHOW ").unwrap(), Command::Show);
        assert_eq!(parse_command("hide").unwrap(), Command::Hide);
        assert_eq!(parse_command("r").unwrap(), Command::Refresh);
        assert_eq!(parse_command("quit").unwrap(), Command::Quit);
    }

    #[test]
    fn delete_uses_one_based_rows() {
        assert_eq!(
            parse_command("delete 2").unwrap(),
            Command::Delete { row: 1 }
        );
        assert!(parse_command("delete 0").is_err());
        assert!(parse_command("delete two").is_err());
    }

    #[test]
    fn add_parses_rosters_and_score() {
        assert_eq!(
            parse_command("add Alice, Bob - Carol 3:2").unwrap(),
            Command::Add {
                home: vec!["Alice".to_string(), "Bob".to_string()],
                away: vec!["Carol".to_string()],
                score: (3, 2),
            }
        );
        assert!(parse_command("add Alice Carol 3:2").is_err());
        assert!(parse_command("add Alice - Carol 3-2").is_err());
    }

    #[test]
    fn edit_parses_row_and_score() {
        assert_eq!(
            parse_command("edit 1 0 : 4").unwrap(),
            Command::Edit {
                row: 0,
                score: (0, 4)
            }
        );
    }

    #[test]
    fn unknown_command_is_rejected() {
        let err = parse_command("launch").unwrap_err();
        assert!(err.to_string().contains("unknown command"));
    }

    #[test]
    fn new_match_picks_unused_id() {
        let existing = vec![Match::new("m2"), Match::new("m3")];
        let created = new_match(
            &existing,
            &["Ann".to_string()],
            &["Ben".to_string()],
            (1, 0),
        );

        assert_eq!(created.id, "m4");
        assert_eq!(created.home_players[0].id, "ann");
        assert_eq!(created.away_goals, 0);
    }
}
