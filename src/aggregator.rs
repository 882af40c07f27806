//! Streaming accumulation of parsed records.
//!
//! The [`Aggregator`] exclusively owns all mutable parse-phase state: the
//! per-user counters, the flat per-user session streams, and both interners.
//! Each user's sessions are packed as alternating browser-id/date-id integers
//! in arrival order; that ordering is externally observable in the rendered
//! `browsers` and `dates` arrays and is preserved exactly.
//!
//! [`Aggregator::freeze`] consumes the value once parsing completes and hands
//! a read-only [`ReportSnapshot`] to the renderer; no mutable state crosses
//! the phase boundary.

use std::collections::HashMap;

use crate::classifier::BrowserClassifier;
use crate::error::ReportError;
use crate::interner::Interner;
use crate::models::{RunTotals, SessionRecord, UserRecord, UserStats};

#[derive(Debug, Default)]
pub struct Aggregator {
    users: HashMap<u64, UserStats>,
    user_order: Vec<u64>,
    sessions: HashMap<u64, Vec<u32>>,
    browsers: Interner,
    dates: Interner,
    total_sessions: u64,
}

/// One user of the frozen snapshot, in first-seen order.
#[derive(Debug)]
pub struct FrozenUser {
    pub stats: UserStats,
    /// Alternating browser-id/date-id pairs, arrival order.
    pub session_ids: Vec<u32>,
}

/// Read-only parse result: inverted tables, classifier sets, counters.
#[derive(Debug)]
pub struct ReportSnapshot {
    pub users: Vec<FrozenUser>,
    pub browser_table: Vec<String>,
    pub date_table: Vec<String>,
    pub classifier: BrowserClassifier,
    pub total_sessions: u64,
}

impl Aggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a user with zeroed counters. A repeated id overwrites the
    /// entry in place: counters reset, insertion position and any already
    /// recorded session stream kept.
    pub fn record_user(&mut self, record: UserRecord) {
        if !self.users.contains_key(&record.id) {
            self.user_order.push(record.id);
        }
        self.users
            .insert(record.id, UserStats::new(record.display_name));
    }

    /// Folds one session into its user's counters and id stream.
    ///
    /// Fails fast with [`ReportError::UnknownUserReference`] when the session
    /// arrives before the user line introducing its id.
    pub fn record_session(&mut self, record: SessionRecord) -> Result<(), ReportError> {
        let user = self
            .users
            .get_mut(&record.user_id)
            .ok_or(ReportError::UnknownUserReference {
                user_id: record.user_id,
            })?;

        user.total_time += record.time;
        if record.time > user.max_time {
            user.max_time = record.time;
        }

        let browser_id = self.browsers.intern(&record.browser);
        let date_id = self.dates.intern(&record.date);
        let stream = self.sessions.entry(record.user_id).or_default();
        stream.push(browser_id);
        stream.push(date_id);

        self.total_sessions += 1;
        Ok(())
    }

    pub fn total_sessions(&self) -> u64 {
        self.total_sessions
    }

    pub fn user_count(&self) -> usize {
        self.user_order.len()
    }

    /// Ends the parse phase: inverts both interners, builds the classifier
    /// sets, and lays users out in first-seen order.
    pub fn freeze(mut self) -> ReportSnapshot {
        let browser_table = self.browsers.into_table();
        let date_table = self.dates.into_table();
        let classifier = BrowserClassifier::build(&browser_table);

        let mut users = Vec::with_capacity(self.user_order.len());
        for id in &self.user_order {
            if let Some(stats) = self.users.remove(id) {
                let session_ids = self.sessions.remove(id).unwrap_or_default();
                users.push(FrozenUser { stats, session_ids });
            }
        }

        ReportSnapshot {
            users,
            browser_table,
            date_table,
            classifier,
            total_sessions: self.total_sessions,
        }
    }
}

impl ReportSnapshot {
    pub fn totals(&self) -> RunTotals {
        RunTotals {
            total_sessions: self.total_sessions,
            total_users: self.users.len(),
            unique_browsers: self.browser_table.len(),
        }
    }
}
