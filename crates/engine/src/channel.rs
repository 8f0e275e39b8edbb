// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Output Channel: coalesces streamed text into display records.

use algo_core::{OutputRecord, StreamKind};
use parking_lot::Mutex;
use std::sync::Arc;
use tokio::sync::watch;

/// Ordered, append-only record list for the current run.
///
/// Consecutive writes of the same mergeable kind extend the last record,
/// so a program printing one character at a time still shows as one block.
/// Every mutation bumps a revision that subscribers can watch.
#[derive(Clone)]
pub struct OutputChannel {
    panel: Arc<Mutex<Panel>>,
    revision: Arc<watch::Sender<u64>>,
}

#[derive(Default)]
struct Panel {
    records: Vec<OutputRecord>,
    /// Bumped whenever the records are replaced rather than appended to.
    epoch: u64,
}

impl Default for OutputChannel {
    fn default() -> Self {
        Self::new()
    }
}

impl OutputChannel {
    pub fn new() -> Self {
        let (revision, _) = watch::channel(0);
        Self { panel: Arc::new(Mutex::new(Panel::default())), revision: Arc::new(revision) }
    }

    /// Append `text` under `kind`, merging into the last record when it has
    /// the same mergeable kind. Empty text still creates a record.
    pub fn write(&self, kind: StreamKind, text: &str) {
        {
            let mut panel = self.panel.lock();
            match panel.records.last_mut() {
                Some(last) if last.kind == kind && kind.is_mergeable() => {
                    last.content.push_str(text)
                }
                _ => panel.records.push(OutputRecord::new(kind, text)),
            }
        }
        self.bump();
    }

    pub fn clear(&self) {
        self.restore(Vec::new());
    }

    /// Replace the contents wholesale (restoring a saved panel).
    pub fn restore(&self, records: Vec<OutputRecord>) {
        {
            let mut panel = self.panel.lock();
            panel.records = records;
            panel.epoch = panel.epoch.wrapping_add(1);
        }
        self.bump();
    }

    pub fn records(&self) -> Vec<OutputRecord> {
        self.panel.lock().records.clone()
    }

    pub fn last(&self) -> Option<OutputRecord> {
        self.panel.lock().records.last().cloned()
    }

    pub fn len(&self) -> usize {
        self.panel.lock().records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.panel.lock().records.is_empty()
    }

    /// Current revision; changes on every write or clear.
    pub fn revision(&self) -> u64 {
        *self.revision.borrow()
    }

    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.revision.subscribe()
    }

    fn bump(&self) {
        self.revision.send_modify(|rev| *rev = rev.wrapping_add(1));
    }
}

/// Tracks how much of a channel a front end has already rendered.
///
/// [`OutputCursor::advance`] returns only the text appended since the last
/// call, including growth of a merged record. A clear restarts from the top.
#[derive(Debug, Default)]
pub struct OutputCursor {
    epoch: u64,
    records: usize,
    /// Bytes already seen of the last seen record.
    offset: usize,
}

impl OutputCursor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&mut self, channel: &OutputChannel) -> Vec<OutputRecord> {
        let panel = channel.panel.lock();
        if panel.epoch != self.epoch {
            self.epoch = panel.epoch;
            self.records = 0;
            self.offset = 0;
        }
        let records = &panel.records;

        let mut fresh = Vec::new();
        if self.records > 0 {
            let last = &records[self.records - 1];
            if let Some(tail) = last.content.get(self.offset..).filter(|t| !t.is_empty()) {
                fresh.push(OutputRecord::new(last.kind, tail));
            }
        }
        fresh.extend(records[self.records..].iter().cloned());

        self.records = records.len();
        self.offset = records.last().map_or(0, |r| r.content.len());
        fresh
    }
}

#[cfg(test)]
#[path = "channel_tests.rs"]
mod tests;
