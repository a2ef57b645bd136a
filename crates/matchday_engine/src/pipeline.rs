use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::thread;

use engine_logging::{engine_debug, engine_error, engine_info, engine_trace, engine_warn};
use matchday_core::{update, Effect, ListState, Match, MatchesViewModel, Msg, Row};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use crate::{PipelineError, PipelineObserver, Store};

#[derive(Debug, Clone)]
pub struct PipelineSettings {
    /// Abort a fetch as soon as a newer one supersedes it. When false the
    /// superseded call runs to completion and its result is discarded.
    pub cancel_superseded: bool,
    pub thread_name: String,
}

impl Default for PipelineSettings {
    fn default() -> Self {
        Self {
            cancel_superseded: true,
            thread_name: "refresh-pipeline".to_string(),
        }
    }
}

enum Command<R: Row> {
    Dispatch(Msg<R>),
    Shutdown,
}

/// A running refresh pipeline for one list screen.
///
/// Every message, whether a user command or a store completion, is processed
/// by a single event loop on a dedicated thread, so state changes never
/// interleave. Dropping the handle stops the loop.
pub struct PipelineHandle<R: Row> {
    cmd_tx: mpsc::UnboundedSender<Command<R>>,
    shared: Arc<Mutex<ListState<R>>>,
    worker: Option<thread::JoinHandle<()>>,
}

impl<R: Row> PipelineHandle<R> {
    pub fn spawn<O>(
        store: Arc<dyn Store<R>>,
        observer: O,
        settings: PipelineSettings,
    ) -> Result<Self, PipelineError>
    where
        O: PipelineObserver<R> + 'static,
    {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_time()
            .build()?;
        let (cmd_tx, cmd_rx) = mpsc::unbounded_channel();
        let shared = Arc::new(Mutex::new(ListState::new()));

        let event_loop = EventLoop {
            store,
            observer: Box::new(observer),
            shared: Arc::clone(&shared),
            cmd_tx: cmd_tx.clone(),
            cancel_superseded: settings.cancel_superseded,
            in_flight: None,
            seq: 0,
        };
        let worker = thread::Builder::new()
            .name(settings.thread_name.clone())
            .spawn(move || runtime.block_on(event_loop.run(cmd_rx)))?;

        engine_info!(
            "refresh pipeline started thread={} cancel_superseded={}",
            settings.thread_name,
            settings.cancel_superseded
        );
        Ok(Self {
            cmd_tx,
            shared,
            worker: Some(worker),
        })
    }

    /// Records whether the owning screen is visible; becoming visible refreshes.
    pub fn set_active(&self, active: bool) {
        self.dispatch(Msg::SetActive(active));
    }

    pub fn request_refresh(&self) {
        self.dispatch(Msg::RefreshRequested);
    }

    pub fn delete_row(&self, id: R::Id) {
        self.dispatch(Msg::DeleteRequested { id });
    }

    /// Deletes the row shown at `index`. Returns false if there is no such row.
    pub fn delete_at(&self, index: usize) -> bool {
        let id = self.lock_state().row_at(index).map(Row::id);
        match id {
            Some(id) => {
                self.delete_row(id);
                true
            }
            None => false,
        }
    }

    pub fn dispatch(&self, msg: Msg<R>) {
        if self.cmd_tx.send(Command::Dispatch(msg)).is_err() {
            engine_warn!("refresh pipeline is stopped; message dropped");
        }
    }

    pub fn is_active(&self) -> bool {
        self.lock_state().is_active()
    }

    pub fn is_loading(&self) -> bool {
        self.lock_state().is_loading()
    }

    /// Copy of the last applied snapshot.
    pub fn rows(&self) -> Vec<R> {
        self.lock_state().rows().to_vec()
    }

    pub fn row_count(&self) -> usize {
        self.lock_state().number_of_rows(0)
    }

    pub fn with_state<T>(&self, read: impl FnOnce(&ListState<R>) -> T) -> T {
        read(&self.lock_state())
    }

    /// Stops the event loop and waits for the pipeline thread to exit.
    pub fn shutdown(mut self) {
        self.stop();
    }

    fn stop(&mut self) {
        let Some(worker) = self.worker.take() else {
            return;
        };
        let _ = self.cmd_tx.send(Command::Shutdown);
        if worker.join().is_err() {
            engine_error!("refresh pipeline thread panicked");
        }
    }

    fn lock_state(&self) -> MutexGuard<'_, ListState<R>> {
        self.shared.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl PipelineHandle<Match> {
    pub fn view(&self) -> MatchesViewModel {
        self.lock_state().view()
    }
}

impl<R: Row> Drop for PipelineHandle<R> {
    fn drop(&mut self) {
        self.stop();
    }
}

struct EventLoop<R: Row> {
    store: Arc<dyn Store<R>>,
    observer: Box<dyn PipelineObserver<R>>,
    shared: Arc<Mutex<ListState<R>>>,
    cmd_tx: mpsc::UnboundedSender<Command<R>>,
    cancel_superseded: bool,
    in_flight: Option<CancellationToken>,
    seq: u64,
}

impl<R: Row> EventLoop<R> {
    async fn run(mut self, mut cmd_rx: mpsc::UnboundedReceiver<Command<R>>) {
        while let Some(command) = cmd_rx.recv().await {
            match command {
                Command::Dispatch(msg) => self.dispatch(msg),
                Command::Shutdown => break,
            }
        }
        if let Some(token) = self.in_flight.take() {
            token.cancel();
        }
        engine_info!("refresh pipeline stopped after {} messages", self.seq);
    }

    fn dispatch(&mut self, msg: Msg<R>) {
        self.seq += 1;
        engine_logging::set_dispatch_seq(self.seq);
        engine_trace!("dispatch #{} {:?}", self.seq, msg);

        let effects = {
            let mut guard = self.shared.lock().unwrap_or_else(PoisonError::into_inner);
            let state = std::mem::take(&mut *guard);
            let (state, effects) = update(state, msg);
            *guard = state;
            effects
        };

        for effect in effects {
            self.run_effect(effect);
        }
    }

    fn run_effect(&mut self, effect: Effect<R>) {
        match effect {
            Effect::Fetch { generation } => self.spawn_fetch(generation),
            Effect::Delete { id } => self.spawn_delete(id),
            Effect::LoadingChanged(loading) => {
                engine_debug!("dispatch #{} loading={}", self.seq, loading);
                self.observer.loading_changed(loading);
            }
            Effect::ContentChanged(changeset) => {
                engine_debug!(
                    "dispatch #{} changeset: {} edits, {} -> {} rows",
                    self.seq,
                    changeset.edits().len(),
                    changeset.old_len(),
                    changeset.new_len()
                );
                self.observer.content_changed(&changeset);
            }
            Effect::Alert(message) => {
                engine_warn!("dispatch #{} alert: {}", self.seq, message);
                self.observer.alert(&message);
            }
        }
    }

    fn spawn_fetch(&mut self, generation: u64) {
        let token = CancellationToken::new();
        if let Some(previous) = self.in_flight.replace(token.clone()) {
            if self.cancel_superseded {
                previous.cancel();
            }
        }

        let store = Arc::clone(&self.store);
        let cmd_tx = self.cmd_tx.clone();
        tokio::spawn(async move {
            let result = tokio::select! {
                _ = token.cancelled() => {
                    engine_debug!("fetch generation={} cancelled", generation);
                    return;
                }
                result = store.fetch_all() => result,
            };
            let result = result.map_err(|err| err.to_string());
            let _ = cmd_tx.send(Command::Dispatch(Msg::FetchCompleted { generation, result }));
        });
    }

    fn spawn_delete(&mut self, id: R::Id) {
        let store = Arc::clone(&self.store);
        let cmd_tx = self.cmd_tx.clone();
        tokio::spawn(async move {
            let result = store
                .delete_by_id(&id)
                .await
                .map_err(|err| err.to_string());
            let _ = cmd_tx.send(Command::Dispatch(Msg::DeleteCompleted { id, result }));
        });
    }
}
