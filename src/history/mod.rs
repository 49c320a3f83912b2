//! Undo/Redo History
//!
//! Linear history for editor state. Rapid successive edits (typing, slider
//! drags) inside the debounce window collapse into a single undo step.

use chrono::{DateTime, Duration, Utc};
use log::debug;

use crate::config::HistoryConfig;

/// Default maximum number of undo levels
pub const DEFAULT_MAX_UNDO_LEVELS: usize = 50;

/// Default debounce window in milliseconds
pub const DEFAULT_DEBOUNCE_MS: u64 = 500;

/// Undo/redo stacks around a present value
#[derive(Debug, Clone)]
pub struct History<T> {
    /// Older values, most recent last
    past: Vec<T>,

    present: T,

    /// Undone values, most recent last
    future: Vec<T>,

    max_undo_levels: usize,

    debounce: Duration,

    /// When `present` last changed through `set`
    last_change: Option<DateTime<Utc>>,
}

impl<T: Clone + PartialEq> History<T> {
    /// Create a history with default limits
    pub fn new(initial: T) -> Self {
        Self::with_limits(initial, DEFAULT_MAX_UNDO_LEVELS, DEFAULT_DEBOUNCE_MS)
    }

    /// Create with the limits of an engine configuration
    pub fn from_config(initial: T, config: &HistoryConfig) -> Self {
        Self::with_limits(initial, config.max_levels, config.debounce_ms)
    }

    /// Create with custom max levels and debounce window
    pub fn with_limits(initial: T, max_undo_levels: usize, debounce_ms: u64) -> Self {
        Self {
            past: Vec::new(),
            present: initial,
            future: Vec::new(),
            max_undo_levels,
            debounce: Duration::milliseconds(debounce_ms.min(i64::MAX as u64) as i64),
            last_change: None,
        }
    }

    pub fn present(&self) -> &T {
        &self.present
    }

    /// Record a new value at the current time
    pub fn set(&mut self, value: T) -> bool {
        self.set_at(value, Utc::now())
    }

    /// Record a new value at `now`
    ///
    /// Returns false when `value` equals the present value. Changes inside
    /// the debounce window replace the present value instead of adding an
    /// undo step. Any change clears the redo stack.
    pub fn set_at(&mut self, value: T, now: DateTime<Utc>) -> bool {
        if value == self.present {
            return false;
        }

        let coalesce = matches!(self.last_change, Some(prev) if now - prev < self.debounce);
        if coalesce {
            debug!("[HISTORY] Coalescing change into current step");
            self.present = value;
        } else {
            let previous = std::mem::replace(&mut self.present, value);
            self.past.push(previous);
            while self.past.len() > self.max_undo_levels {
                self.past.remove(0);
            }
        }

        self.future.clear();
        self.last_change = Some(now);
        true
    }

    /// Step back, returning the restored value
    pub fn undo(&mut self) -> Option<&T> {
        let previous = self.past.pop()?;
        let current = std::mem::replace(&mut self.present, previous);
        self.future.push(current);
        self.last_change = None;
        Some(&self.present)
    }

    /// Step forward, returning the restored value
    pub fn redo(&mut self) -> Option<&T> {
        let next = self.future.pop()?;
        let current = std::mem::replace(&mut self.present, next);
        self.past.push(current);
        self.last_change = None;
        Some(&self.present)
    }

    /// Replace the present value and drop all history
    pub fn reset(&mut self, value: T) {
        self.past.clear();
        self.future.clear();
        self.present = value;
        self.last_change = None;
    }

    pub fn can_undo(&self) -> bool {
        !self.past.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.future.is_empty()
    }

    pub fn undo_count(&self) -> usize {
        self.past.len()
    }

    pub fn redo_count(&self) -> usize {
        self.future.len()
    }
}
