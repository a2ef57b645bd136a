use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::sync::{Arc, Mutex, PoisonError};

use chrono::Utc;
use engine_logging::{engine_info, engine_warn};
use matchday_core::{Changeset, Match, LIST_TITLE};
use matchday_engine::{MemoryStore, PipelineHandle, PipelineObserver};

use super::commands::{self, Command, HELP};
use super::config::{self, AppConfig, CONFIG_FILENAME};
use super::logging;
use super::render;

pub fn run_app() -> anyhow::Result<()> {
    let config_path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(CONFIG_FILENAME));
    let (config, config_error) = match config::load(&config_path) {
        Ok(config) => (config, None),
        Err(err) => (AppConfig::default(), Some(err)),
    };

    logging::initialize(config.log_destination, config.verbose);
    if let Some(err) = config_error {
        engine_warn!("Using default configuration: {:#}", err);
    }
    engine_info!(
        "matchday starting config={:?} fixtures={} latency_ms={}",
        config_path,
        config.fixtures.len(),
        config.latency_ms
    );

    let store = Arc::new(MemoryStore::with_rows(
        config.fixtures.clone(),
        config.store_settings(),
    ));
    let visible = Arc::new(Mutex::new(Vec::new()));
    let pipeline = PipelineHandle::<Match>::spawn(
        store.clone(),
        ConsoleObserver::new(Arc::clone(&visible)),
        config.pipeline_settings(),
    )?;

    println!("{LIST_TITLE}. Type help for commands.");
    pipeline.set_active(true);

    for line in io::stdin().lock().lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        match commands::parse_command(&line) {
            Ok(Command::Quit) => break,
            Ok(command) => execute(command, &pipeline, &store, &visible),
            Err(err) => println!("{err:#}"),
        }
    }

    pipeline.shutdown();
    engine_info!("matchday exiting");
    Ok(())
}

fn execute(
    command: Command,
    pipeline: &PipelineHandle<Match>,
    store: &MemoryStore<Match>,
    visible: &Mutex<Vec<Match>>,
) {
    match command {
        Command::Show => pipeline.set_active(true),
        Command::Hide => pipeline.set_active(false),
        Command::Refresh => pipeline.request_refresh(),
        Command::List => {
            let rows = visible.lock().unwrap_or_else(PoisonError::into_inner);
            print_lines(&render::render_table(LIST_TITLE, &rows));
        }
        Command::Add { home, away, score } => {
            let created = commands::new_match(&store.rows(), &home, &away, score);
            engine_info!("adding match {}", created.id);
            store.upsert(created);
            pipeline.request_refresh();
        }
        Command::Edit { row, score } => {
            let existing = pipeline.with_state(|state| state.match_at(row).cloned());
            match existing {
                Some(existing) => {
                    engine_info!("editing match {}", existing.id);
                    store.upsert(existing.with_score(score.0, score.1));
                    pipeline.request_refresh();
                }
                None => println!("no row {}", row + 1),
            }
        }
        Command::Delete { row } => {
            if !pipeline.delete_at(row) {
                println!("no row {}", row + 1);
            }
        }
        Command::Help => println!("{HELP}"),
        Command::Quit => {}
    }
}

/// Applies every changeset to the console's own copy of the rows and prints it.
struct ConsoleObserver {
    visible: Arc<Mutex<Vec<Match>>>,
}

impl ConsoleObserver {
    fn new(visible: Arc<Mutex<Vec<Match>>>) -> Self {
        Self { visible }
    }
}

impl PipelineObserver<Match> for ConsoleObserver {
    fn content_changed(&mut self, changeset: &Changeset<Match>) {
        let mut rows = self.visible.lock().unwrap_or_else(PoisonError::into_inner);
        let next = changeset.apply(&rows);
        if next.len() != changeset.new_len() {
            engine_warn!(
                "changeset produced {} rows, expected {}",
                next.len(),
                changeset.new_len()
            );
        }
        *rows = next;

        if changeset.is_empty() {
            println!("[{}] up to date.", Utc::now().format("%H:%M:%S"));
        } else {
            print_lines(&render::render_changeset(changeset, Utc::now()));
        }
        print_lines(&render::render_table(LIST_TITLE, &rows));
    }

    fn loading_changed(&mut self, loading: bool) {
        println!("{}", render::render_loading(loading));
    }

    fn alert(&mut self, message: &str) {
        println!("!! {message}");
    }
}

fn print_lines(lines: &[String]) {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    for line in lines {
        let _ = writeln!(out, "{line}");
    }
    let _ = out.flush();
}
