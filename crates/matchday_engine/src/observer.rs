use std::sync::mpsc;

use matchday_core::{Changeset, Row};

/// Receives the pipeline's outputs.
///
/// Callbacks run on the pipeline thread, one at a time, after the state
/// change they report has been applied.
pub trait PipelineObserver<R: Row>: Send {
    fn content_changed(&mut self, _changeset: &Changeset<R>) {}

    fn loading_changed(&mut self, _loading: bool) {}

    fn alert(&mut self, _message: &str) {}
}

/// Receiving ends of a [`ChannelObserver`].
pub struct PipelineOutputs<R: Row> {
    pub changesets: mpsc::Receiver<Changeset<R>>,
    pub loading: mpsc::Receiver<bool>,
    pub alerts: mpsc::Receiver<String>,
}

/// Forwards every output into its own channel.
pub struct ChannelObserver<R: Row> {
    changesets: mpsc::Sender<Changeset<R>>,
    loading: mpsc::Sender<bool>,
    alerts: mpsc::Sender<String>,
}

impl<R: Row> ChannelObserver<R> {
    pub fn new() -> (Self, PipelineOutputs<R>) {
        let (changesets_tx, changesets) = mpsc::channel();
        let (loading_tx, loading) = mpsc::channel();
        let (alerts_tx, alerts) = mpsc::channel();
        (
            Self {
                changesets: changesets_tx,
                loading: loading_tx,
                alerts: alerts_tx,
            },
            PipelineOutputs {
                changesets,
                loading,
                alerts,
            },
        )
    }
}

impl<R: Row> PipelineObserver<R> for ChannelObserver<R> {
    fn content_changed(&mut self, changeset: &Changeset<R>) {
        let _ = self.changesets.send(changeset.clone());
    }

    fn loading_changed(&mut self, loading: bool) {
        let _ = self.loading.send(loading);
    }

    fn alert(&mut self, message: &str) {
        let _ = self.alerts.send(message.to_string());
    }
}
