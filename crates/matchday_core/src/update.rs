use crate::{diff, Effect, ListState, Msg, Row};

/// Pure update function: applies a message to state and returns any effects.
///
/// Only the most recently issued fetch may complete: a `FetchCompleted` for
/// an older generation is dropped without touching state or emitting anything.
pub fn update<R: Row>(mut state: ListState<R>, msg: Msg<R>) -> (ListState<R>, Vec<Effect<R>>) {
    let effects = match msg {
        Msg::SetActive(active) => {
            if state.set_active(active) {
                request_fetch(&mut state)
            } else {
                Vec::new()
            }
        }
        Msg::RefreshRequested => request_fetch(&mut state),
        Msg::DeleteRequested { id } => vec![Effect::Delete { id }],
        Msg::FetchCompleted { generation, result } => {
            if !state.is_current(generation) {
                return (state, Vec::new());
            }
            state.finish_fetch();
            match result {
                Ok(rows) => {
                    let changeset = diff(state.rows(), &rows);
                    state.replace_rows(rows);
                    vec![
                        Effect::LoadingChanged(false),
                        Effect::ContentChanged(changeset),
                    ]
                }
                Err(message) => vec![Effect::LoadingChanged(false), Effect::Alert(message)],
            }
        }
        Msg::DeleteCompleted { result, .. } => match result {
            Ok(true) => request_fetch(&mut state),
            Ok(false) => Vec::new(),
            Err(message) => vec![Effect::Alert(message)],
        },
        Msg::NoOp => Vec::new(),
    };

    (state, effects)
}

fn request_fetch<R: Row>(state: &mut ListState<R>) -> Vec<Effect<R>> {
    let (generation, started) = state.begin_fetch();
    let mut effects = Vec::with_capacity(2);
    if started {
        effects.push(Effect::LoadingChanged(true));
    }
    effects.push(Effect::Fetch { generation });
    effects
}
