use matchday_core::{update, Effect, ListState, Match, Msg};

fn init_logging() {
    engine_logging::initialize_for_tests();
}

fn row(id: &str, home_goals: u32) -> Match {
    Match::new(id).with_score(home_goals, 0)
}

fn fetch_generation(effects: &[Effect<Match>]) -> u64 {
    effects
        .iter()
        .find_map(|effect| match effect {
            Effect::Fetch { generation } => Some(*generation),
            _ => None,
        })
        .expect("fetch effect")
}

fn complete(
    state: ListState<Match>,
    generation: u64,
    result: Result<Vec<Match>, String>,
) -> (ListState<Match>, Vec<Effect<Match>>) {
    update(state, Msg::FetchCompleted { generation, result })
}

fn count_fetches(effects: &[Effect<Match>]) -> usize {
    effects
        .iter()
        .filter(|effect| matches!(effect, Effect::Fetch { .. }))
        .count()
}

#[test]
fn activation_requests_refresh_only_on_rising_edge() {
    init_logging();
    let inputs = [false, true, true, false, false, true, false, true];
    let mut state = ListState::<Match>::new();
    let mut previous = false;
    let mut expected = 0;
    let mut observed = 0;

    for active in inputs {
        if active && !previous {
            expected += 1;
        }
        previous = active;
        let (next, effects) = update(state, Msg::SetActive(active));
        observed += count_fetches(&effects);
        state = next;
    }

    assert_eq!(expected, 3);
    assert_eq!(observed, expected);
    assert!(state.is_active());
}

#[test]
fn accepted_refresh_marks_busy_and_emits_loading() {
    init_logging();
    let (mut state, effects) = update(ListState::<Match>::new(), Msg::SetActive(true));

    assert!(state.is_loading());
    assert!(state.consume_dirty());
    assert_eq!(
        effects,
        vec![Effect::LoadingChanged(true), Effect::Fetch { generation: 1 }]
    );
}

#[test]
fn successful_fetch_clears_busy_and_emits_changeset() {
    init_logging();
    let (state, effects) = update(ListState::<Match>::new(), Msg::RefreshRequested);
    let generation = fetch_generation(&effects);

    let rows = vec![row("a", 1), row("b", 2)];
    let (state, effects) = complete(state, generation, Ok(rows.clone()));

    assert!(!state.is_loading());
    assert_eq!(state.rows(), rows.as_slice());
    assert_eq!(effects.len(), 2);
    assert_eq!(effects[0], Effect::LoadingChanged(false));
    match &effects[1] {
        Effect::ContentChanged(changeset) => {
            assert_eq!(changeset.insertions(), vec![0, 1]);
            assert!(changeset.deletions().is_empty());
        }
        other => panic!("expected changeset, got {other:?}"),
    }
}

#[test]
fn second_request_supersedes_first_fetch() {
    init_logging();
    let (state, first) = update(ListState::<Match>::new(), Msg::RefreshRequested);
    let first = fetch_generation(&first);
    let (state, second_effects) = update(state, Msg::RefreshRequested);
    let second = fetch_generation(&second_effects);

    assert!(second > first);
    // Still busy from the first request: no second loading transition.
    assert_eq!(second_effects, vec![Effect::Fetch { generation: second }]);

    let (state, effects) = complete(state, second, Ok(vec![row("new", 0)]));
    assert!(!state.is_loading());
    assert_eq!(effects.len(), 2);

    // The superseded result arrives late and is dropped entirely.
    let before = state.clone();
    let (state, effects) = complete(state, first, Ok(vec![row("stale", 0)]));
    assert!(effects.is_empty());
    assert_eq!(state, before);
    assert_eq!(state.rows()[0].id, "new");
}

#[test]
fn stale_result_before_latest_keeps_busy() {
    init_logging();
    let (state, first) = update(ListState::<Match>::new(), Msg::RefreshRequested);
    let first = fetch_generation(&first);
    let (state, second) = update(state, Msg::RefreshRequested);
    let second = fetch_generation(&second);

    let (state, effects) = complete(state, first, Err("offline".to_string()));
    assert!(effects.is_empty());
    assert!(state.is_loading());

    let (state, effects) = complete(state, second, Ok(Vec::new()));
    assert!(!state.is_loading());
    assert_eq!(effects[0], Effect::LoadingChanged(false));
}

#[test]
fn failed_fetch_alerts_and_keeps_snapshot() {
    init_logging();
    let (state, effects) = update(ListState::<Match>::new(), Msg::RefreshRequested);
    let (state, _) = complete(
        state,
        fetch_generation(&effects),
        Ok(vec![row("a", 0), row("b", 0)]),
    );

    let (state, effects) = update(state, Msg::RefreshRequested);
    let (state, effects) = complete(
        state,
        fetch_generation(&effects),
        Err("store unavailable: offline".to_string()),
    );

    assert!(!state.is_loading());
    assert_eq!(
        effects,
        vec![
            Effect::LoadingChanged(false),
            Effect::Alert("store unavailable: offline".to_string()),
        ]
    );
    assert_eq!(state.rows().len(), 2);

    // The next success diffs against the pre-failure snapshot.
    let (state, effects) = update(state, Msg::RefreshRequested);
    let (_state, effects) = complete(
        state,
        fetch_generation(&effects),
        Ok(vec![row("b", 0), row("c", 0)]),
    );
    match &effects[1] {
        Effect::ContentChanged(changeset) => {
            assert_eq!(changeset.deletions(), vec![0]);
            assert_eq!(changeset.insertions(), vec![1]);
            assert_eq!(changeset.old_len(), 2);
        }
        other => panic!("expected changeset, got {other:?}"),
    }
}

#[test]
fn duplicate_completion_is_ignored() {
    init_logging();
    let (state, effects) = update(ListState::<Match>::new(), Msg::RefreshRequested);
    let generation = fetch_generation(&effects);
    let (state, _) = complete(state, generation, Ok(vec![row("a", 0)]));

    let (state, effects) = complete(state, generation, Ok(Vec::new()));
    assert!(effects.is_empty());
    assert_eq!(state.rows().len(), 1);
}

#[test]
fn deactivation_does_not_cancel_inflight_fetch() {
    init_logging();
    let (state, effects) = update(ListState::<Match>::new(), Msg::SetActive(true));
    let generation = fetch_generation(&effects);
    let (state, effects) = update(state, Msg::SetActive(false));
    assert!(effects.is_empty());
    assert!(state.is_loading());

    let (state, effects) = complete(state, generation, Ok(vec![row("a", 0)]));
    assert!(!state.is_loading());
    assert_eq!(effects.len(), 2);
    assert!(!state.is_active());
}
