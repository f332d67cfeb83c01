// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::collections::VecDeque;

/// How a change is entered into a [`History`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HistoryMode {
    /// The previous value becomes an undo step.
    #[default]
    Record,
    /// The current entry is replaced in place, e.g. for the frames of a drag that
    /// should undo as a single step.
    Amend,
}

/// A value with bounded undo/redo, similar to back/forward navigation.
///
/// At most `capacity` undo steps are kept. Once full, recording another step drops
/// the oldest one. Any change truncates the redo steps.
#[derive(Debug, Clone)]
pub struct History<T> {
    past: VecDeque<T>,
    present: T,
    future: Vec<T>,
    capacity: usize,
    /// Bumped on every change of `present`, including undo and redo.
    revision: u64,
}

impl<T: Clone> History<T> {
    pub fn new(initial: T, capacity: usize) -> Self {
        Self {
            past: VecDeque::with_capacity(capacity.min(64)),
            present: initial,
            future: Vec::new(),
            capacity,
            revision: 0,
        }
    }

    pub fn get(&self) -> &T {
        &self.present
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Replaces the value. With `record` the previous value becomes an undo step,
    /// otherwise all undo and redo steps are discarded, as when a session starts.
    pub fn set(&mut self, value: T, record: bool) {
        if record {
            self.push(value, HistoryMode::Record);
        } else {
            self.past.clear();
            self.future.clear();
            self.replace(value);
        }
    }

    /// Applies `f` to a copy of the current value and enters the result per `mode`.
    pub fn update(&mut self, mode: HistoryMode, f: impl FnOnce(T) -> T) {
        let next = f(self.present.clone());
        self.push(next, mode);
    }

    pub fn undo(&mut self) -> bool {
        let Some(previous) = self.past.pop_back() else {
            return false;
        };
        let current = std::mem::replace(&mut self.present, previous);
        self.future.push(current);
        self.revision += 1;
        true
    }

    pub fn redo(&mut self) -> bool {
        let Some(next) = self.future.pop() else {
            return false;
        };
        let current = std::mem::replace(&mut self.present, next);
        self.past.push_back(current);
        self.revision += 1;
        true
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

    fn push(&mut self, value: T, mode: HistoryMode) {
        self.future.clear();
        match mode {
            HistoryMode::Record => {
                let previous = std::mem::replace(&mut self.present, value);
                if self.capacity == 0 {
                    self.revision += 1;
                    return;
                }
                if self.past.len() == self.capacity {
                    self.past.pop_front();
                }
                self.past.push_back(previous);
                self.revision += 1;
            }
            HistoryMode::Amend => self.replace(value),
        }
    }

    fn replace(&mut self, value: T) {
        self.present = value;
        self.revision += 1;
    }
}


// End of File
