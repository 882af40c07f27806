//! Line classification and positional field extraction.
//!
//! The parser is pure: it keeps no state across lines. Dispatch is on the
//! first character of the line; fields are positional, comma-separated, with
//! no escaping. Surplus delimiters fold into the last field of a shape.

use crate::error::ReportError;
use crate::models::{ParsedLine, SessionRecord, UserRecord};

const DELIMITER: char = ',';
const USER_PREFIX: char = 'u';
const SESSION_PREFIX: char = 's';

// Field counts including the record prefix.
const USER_ARITY: usize = 5;
const SESSION_ARITY: usize = 6;

/// Classifies one input line and extracts its fields.
///
/// Lines with any leading character other than the user or session prefix
/// are reported as [`ParsedLine::Skip`] and affect nothing.
pub fn parse_line(line: &str) -> Result<ParsedLine, ReportError> {
    match line.chars().next() {
        Some(USER_PREFIX) => parse_user(line).map(ParsedLine::User),
        Some(SESSION_PREFIX) => parse_session(line).map(ParsedLine::Session),
        _ => Ok(ParsedLine::Skip),
    }
}

fn parse_user(line: &str) -> Result<UserRecord, ReportError> {
    let mut fields = line.splitn(USER_ARITY, DELIMITER);
    fields.next(); // prefix
    let id = parse_int("user", "user_id", fields.next())?;
    let first_name = required("user", "first_name", fields.next())?;
    let last_name = required("user", "last_name", fields.next())?;

    Ok(UserRecord {
        id,
        display_name: format!("{first_name} {last_name}"),
    })
}

fn parse_session(line: &str) -> Result<SessionRecord, ReportError> {
    let mut fields = line.splitn(SESSION_ARITY, DELIMITER);
    fields.next(); // prefix
    let user_id = parse_int("session", "user_id", fields.next())?;
    fields.next(); // session ordinal, unused by the report
    let browser = required("session", "browser", fields.next())?;
    let time = parse_int("session", "time", fields.next())?;
    let date = required("session", "date", fields.next())?;

    Ok(SessionRecord {
        user_id,
        browser: browser.to_owned(),
        time,
        date: date.to_owned(),
    })
}

fn required<'a>(
    shape: &'static str,
    field: &str,
    value: Option<&'a str>,
) -> Result<&'a str, ReportError> {
    value.ok_or_else(|| ReportError::malformed(shape, format!("missing field {field}")))
}

fn parse_int(shape: &'static str, field: &str, value: Option<&str>) -> Result<u64, ReportError> {
    let raw = required(shape, field, value)?;
    raw.parse().map_err(|_| {
        ReportError::malformed(shape, format!("invalid integer {raw:?} in field {field}"))
    })
}
