use std::time::{Duration, Instant};

pub const DEFAULT_FLUSH_INTERVAL: Duration = Duration::from_secs(30);

/// 變更追蹤狀態。 / Tracker state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackerState {
    Clean,
    Dirty,
}

/// 工作區變更的種類，用於記錄。 / Kind of workspace mutation, kept for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Change {
    Created,
    Moved,
    Refined,
    Resized,
    Deleted,
    Cleared,
    Replaced,
}

/// Decides when the auto-save slot needs to be flushed.
///
/// Every effective workspace mutation moves the tracker from `Clean` to `Dirty`.
/// [`ChangeTracker::poll`] fires once per elapsed interval while dirty; the caller
/// flushes and then reports success with [`ChangeTracker::mark_clean`]. A failed
/// flush leaves the tracker dirty so the next tick retries.
#[derive(Debug, Clone)]
pub struct ChangeTracker {
    state: TrackerState,
    pending: usize,
    last_change: Option<Change>,
    interval: Duration,
    last_tick: Option<Instant>,
}

impl Default for ChangeTracker {
    fn default() -> Self {
        Self::new(DEFAULT_FLUSH_INTERVAL)
    }
}

impl ChangeTracker {
    pub fn new(interval: Duration) -> Self {
        Self {
            state: TrackerState::Clean,
            pending: 0,
            last_change: None,
            interval,
            last_tick: None,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn state(&self) -> TrackerState {
        self.state
    }

    pub fn is_dirty(&self) -> bool {
        self.state == TrackerState::Dirty
    }

    /// 自上次清除以來的變更數。 / Mutations recorded since the last successful flush.
    pub fn pending_changes(&self) -> usize {
        self.pending
    }

    pub fn last_change(&self) -> Option<Change> {
        self.last_change
    }

    pub fn record(&mut self, change: Change) {
        if self.state == TrackerState::Clean {
            log::debug!("workspace became dirty ({change:?})");
        }
        self.state = TrackerState::Dirty;
        self.pending += 1;
        self.last_change = Some(change);
    }

    pub fn mark_clean(&mut self) {
        self.state = TrackerState::Clean;
        self.pending = 0;
    }

    /// Starts the periodic timer at `now` without firing.
    pub fn start(&mut self, now: Instant) {
        self.last_tick = Some(now);
    }

    /// 計時器觸發：若已過間隔且為 dirty 則回傳 `true`。 /
    /// Timer tick: returns true when an interval has elapsed and there is something to flush.
    pub fn poll(&mut self, now: Instant) -> bool {
        let Some(last) = self.last_tick else {
            self.last_tick = Some(now);
            return false;
        };
        if now.saturating_duration_since(last) < self.interval {
            return false;
        }
        self.last_tick = Some(now);
        self.is_dirty()
    }
}
