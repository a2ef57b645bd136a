use crate::Row;

/// State owned by one list screen's refresh pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListState<R: Row> {
    active: bool,
    busy: bool,
    generation: u64,
    rows: Vec<R>,
    dirty: bool,
}

impl<R: Row> Default for ListState<R> {
    fn default() -> Self {
        Self {
            active: false,
            busy: false,
            generation: 0,
            rows: Vec::new(),
            dirty: false,
        }
    }
}

impl<R: Row> ListState<R> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// True while the latest issued fetch has not delivered its outcome.
    pub fn is_loading(&self) -> bool {
        self.busy
    }

    /// Generation of the most recently issued fetch; 0 before the first one.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Last successfully applied snapshot.
    pub fn rows(&self) -> &[R] {
        &self.rows
    }

    pub fn row_at(&self, index: usize) -> Option<&R> {
        self.rows.get(index)
    }

    pub fn number_of_sections(&self) -> usize {
        1
    }

    pub fn number_of_rows(&self, section: usize) -> usize {
        if section == 0 {
            self.rows.len()
        } else {
            0
        }
    }

    /// Returns whether anything visible changed since the last call, and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn set_active(&mut self, active: bool) -> bool {
        let was_active = std::mem::replace(&mut self.active, active);
        !was_active && active
    }

    /// Issues a new fetch generation. Returns it, and whether loading just started.
    pub(crate) fn begin_fetch(&mut self) -> (u64, bool) {
        self.generation += 1;
        let started = !self.busy;
        if started {
            self.busy = true;
            self.dirty = true;
        }
        (self.generation, started)
    }

    pub(crate) fn is_current(&self, generation: u64) -> bool {
        self.busy && generation == self.generation
    }

    pub(crate) fn finish_fetch(&mut self) {
        self.busy = false;
        self.dirty = true;
    }

    pub(crate) fn replace_rows(&mut self, rows: Vec<R>) {
        self.rows = rows;
        self.dirty = true;
    }
}
