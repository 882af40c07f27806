//! Report rendering.
//!
//! Walks the frozen snapshot's users in first-seen order and streams the
//! JSON document incrementally: header with the document-level counters,
//! one `usersStats` entry per user, footer. Each user's flat id stream is
//! consumed two ids at a time (browser, date); browsers are classified
//! against the sorted family sets built at freeze time.
//!
//! The document is written piecewise but every string value passes through
//! `serde_json`, so the result is always valid JSON.

use std::io::Write;

use anyhow::Result;

use crate::aggregator::{FrozenUser, ReportSnapshot};
use crate::models::UserReport;

/// Characters of the session date kept in the `dates` array.
const DATE_PREFIX_CHARS: usize = 10;

pub struct ReportRenderer<'a> {
    snapshot: &'a ReportSnapshot,
}

impl<'a> ReportRenderer<'a> {
    pub fn new(snapshot: &'a ReportSnapshot) -> Self {
        Self { snapshot }
    }

    pub fn write_to<W: Write>(&self, out: &mut W) -> Result<()> {
        self.write_header(out)?;
        self.write_body(out)?;
        self.write_footer(out)?;
        Ok(())
    }

    fn write_header<W: Write>(&self, out: &mut W) -> Result<()> {
        let all_browsers = self.snapshot.browser_table.join(",");
        writeln!(out, "{{")?;
        writeln!(
            out,
            "  \"allBrowsers\": {},",
            serde_json::to_string(&all_browsers)?
        )?;
        writeln!(out, "  \"totalSessions\": {},", self.snapshot.total_sessions)?;
        writeln!(out, "  \"totalUsers\": {},", self.snapshot.users.len())?;
        writeln!(
            out,
            "  \"uniqueBrowsersCount\": {},",
            self.snapshot.browser_table.len()
        )?;
        writeln!(out, "  \"usersStats\": {{")?;
        Ok(())
    }

    fn write_body<W: Write>(&self, out: &mut W) -> Result<()> {
        for (idx, user) in self.snapshot.users.iter().enumerate() {
            if idx > 0 {
                writeln!(out, ",")?;
            }
            let entry = self.prepare_user(user);
            write!(
                out,
                "    {}: {}",
                serde_json::to_string(&user.stats.display_name)?,
                serde_json::to_string(&entry)?
            )?;
        }
        if !self.snapshot.users.is_empty() {
            writeln!(out)?;
        }
        Ok(())
    }

    fn write_footer<W: Write>(&self, out: &mut W) -> Result<()> {
        writeln!(out, "  }}")?;
        writeln!(out, "}}")?;
        Ok(())
    }

    /// Per-user state machine over the flat id stream.
    ///
    /// An IE browser sets `used_ie` and clears `chrome_only`, short-circuiting
    /// the Chrome check for that pair; any other non-Chrome browser clears
    /// `chrome_only`. A user with no sessions cannot count as Chrome-only.
    fn prepare_user(&self, user: &FrozenUser) -> UserReport {
        let mut browsers: Vec<&str> = Vec::new();
        let mut dates = Vec::new();
        let mut chrome_only = true;
        let mut used_ie = false;

        for pair in user.session_ids.chunks_exact(2) {
            let (browser_id, date_id) = (pair[0], pair[1]);
            browsers.push(self.snapshot.browser_table[browser_id as usize].as_str());
            dates.push(date_prefix(&self.snapshot.date_table[date_id as usize]));

            if self.snapshot.classifier.is_ie(browser_id) {
                used_ie = true;
                chrome_only = false;
                continue;
            }
            if !self.snapshot.classifier.is_chrome(browser_id) {
                chrome_only = false;
            }
        }

        if browsers.is_empty() {
            chrome_only = false;
        }

        UserReport {
            always_used_chrome: chrome_only,
            browsers: browsers.join(","),
            dates,
            longest_session: user.stats.max_time.to_string(),
            sessions_count: (user.session_ids.len() / 2).to_string(),
            total_time: user.stats.total_time.to_string(),
            used_ie,
        }
    }
}

fn date_prefix(date: &str) -> String {
    date.chars().take(DATE_PREFIX_CHARS).collect()
}
