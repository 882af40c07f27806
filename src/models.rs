//! Core Data Models
//!
//! Data flows through these types in sequence:
//!
//! 1. **Raw records**: [`ParsedLine`] / [`UserRecord`] / [`SessionRecord`] -
//!    one classified input line each, produced by the line parser
//! 2. **Accumulation**: [`UserStats`] - per-user counters owned by the
//!    aggregator during the parse phase
//! 3. **Output**: [`UserReport`] and [`RunTotals`] - serializable shapes for
//!    the rendered JSON report and the run summary
//!
//! Records are named structs with explicit fields; nothing in the pipeline
//! addresses a record by position.

use serde::Serialize;

/// One user line: `u,<id>,<first>,<last>,<ignored>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRecord {
    pub id: u64,
    pub display_name: String,
}

/// One session line: `s,<user_id>,<ignored>,<browser>,<time>,<date>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionRecord {
    pub user_id: u64,
    pub browser: String,
    pub time: u64,
    pub date: String,
}

/// Classification of a single input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedLine {
    User(UserRecord),
    Session(SessionRecord),
    /// Unrecognized leading character; the line affects nothing.
    Skip,
}

/// Per-user accumulator, mutated by every session referencing the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserStats {
    pub display_name: String,
    pub total_time: u64,
    pub max_time: u64,
}

impl UserStats {
    pub fn new(display_name: String) -> Self {
        Self {
            display_name,
            total_time: 0,
            max_time: 0,
        }
    }
}

/// One entry of the rendered `usersStats` map.
///
/// Field order here is serialization order in the report. The time and count
/// fields are stringified on purpose; that is the report contract.
#[derive(Debug, Clone, Serialize)]
pub struct UserReport {
    #[serde(rename = "alwaysUsedChrome")]
    pub always_used_chrome: bool,
    pub browsers: String,
    pub dates: Vec<String>,
    #[serde(rename = "longestSession")]
    pub longest_session: String,
    #[serde(rename = "sessionsCount")]
    pub sessions_count: String,
    #[serde(rename = "totalTime")]
    pub total_time: String,
    #[serde(rename = "usedIE")]
    pub used_ie: bool,
}

/// Document-level counters, frozen at end of parse.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct RunTotals {
    #[serde(rename = "totalSessions")]
    pub total_sessions: u64,
    #[serde(rename = "totalUsers")]
    pub total_users: usize,
    #[serde(rename = "uniqueBrowsersCount")]
    pub unique_browsers: usize,
}
