use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use engine_logging::{engine_debug, engine_warn};
use matchday_core::Row;

use crate::{Store, StoreError};

#[derive(Debug, Clone, Default)]
pub struct MemoryStoreSettings {
    /// Simulated round-trip time applied to every call.
    pub latency: Duration,
}

/// Thread-safe in-memory store.
///
/// Besides the [`Store`] operations it supports direct edits, standing in for
/// an editor screen, and one-shot failure injection.
#[derive(Debug)]
pub struct MemoryStore<R: Row> {
    settings: MemoryStoreSettings,
    rows: Mutex<Vec<R>>,
    next_fetch_error: Mutex<Option<StoreError>>,
    next_delete_error: Mutex<Option<StoreError>>,
    fetches: AtomicUsize,
}

impl<R: Row> MemoryStore<R> {
    pub fn new(settings: MemoryStoreSettings) -> Self {
        Self::with_rows(Vec::new(), settings)
    }

    pub fn with_rows(rows: Vec<R>, settings: MemoryStoreSettings) -> Self {
        Self {
            settings,
            rows: Mutex::new(rows),
            next_fetch_error: Mutex::new(None),
            next_delete_error: Mutex::new(None),
            fetches: AtomicUsize::new(0),
        }
    }

    /// Replaces the row with the same identity, or appends it.
    pub fn upsert(&self, row: R) {
        let mut rows = lock(&self.rows);
        let id = row.id();
        match rows.iter_mut().find(|existing| existing.id() == id) {
            Some(existing) => *existing = row,
            None => rows.push(row),
        }
    }

    pub fn remove(&self, id: &R::Id) -> bool {
        let mut rows = lock(&self.rows);
        let before = rows.len();
        rows.retain(|row| &row.id() != id);
        rows.len() != before
    }

    pub fn rows(&self) -> Vec<R> {
        lock(&self.rows).clone()
    }

    /// Makes the next `fetch_all` fail with `error`.
    pub fn fail_next_fetch(&self, error: StoreError) {
        *lock(&self.next_fetch_error) = Some(error);
    }

    /// Makes the next `delete_by_id` fail with `error`.
    pub fn fail_next_delete(&self, error: StoreError) {
        *lock(&self.next_delete_error) = Some(error);
    }

    /// Number of `fetch_all` calls served so far, failed ones included.
    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::Relaxed)
    }

    async fn simulate_latency(&self) {
        if !self.settings.latency.is_zero() {
            tokio::time::sleep(self.settings.latency).await;
        }
    }
}

#[async_trait::async_trait]
impl<R: Row> Store<R> for MemoryStore<R> {
    async fn fetch_all(&self) -> Result<Vec<R>, StoreError> {
        self.fetches.fetch_add(1, Ordering::Relaxed);
        self.simulate_latency().await;
        if let Some(error) = lock(&self.next_fetch_error).take() {
            engine_warn!("memory store: injected fetch failure: {}", error);
            return Err(error);
        }
        let rows = self.rows();
        engine_debug!("memory store: fetched {} rows", rows.len());
        Ok(rows)
    }

    async fn delete_by_id(&self, id: &R::Id) -> Result<bool, StoreError> {
        self.simulate_latency().await;
        if let Some(error) = lock(&self.next_delete_error).take() {
            engine_warn!("memory store: injected delete failure for {:?}: {}", id, error);
            return Err(error);
        }
        let removed = self.remove(id);
        engine_debug!("memory store: delete {:?} removed={}", id, removed);
        Ok(removed)
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
