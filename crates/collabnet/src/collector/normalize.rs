//! Normalization of raw source payloads into canonical values.
//!
//! Sources disagree about whitespace, date formats, and which fields exist
//! at all. The helpers here resolve those differences in one place so every
//! collector produces the same [`Paper`](crate::paper::Paper) shape:
//! missing optional fields become `None` or an empty list, and dates always
//! parse to a concrete calendar day.

use lazy_static::lazy_static;
use regex::Regex;

use super::*;

lazy_static! {
  /// Runs of whitespace (arXiv wraps titles and abstracts with newlines).
  static ref WHITESPACE: Regex = Regex::new(r"\s+").expect("whitespace pattern is valid");
}

/// Collapses internal whitespace runs and trims the ends.
///
/// Atom feeds hard-wrap long titles and abstracts; the canonical form is a
/// single line with single spaces.
pub(crate) fn clean_text(raw: &str) -> String {
  WHITESPACE.replace_all(raw.trim(), " ").into_owned()
}

/// Parses a source-reported publication date into a calendar date.
///
/// Accepts the formats the supported sources actually emit:
/// - `YYYY-MM-DD` (PubMed, Semantic Scholar with a known month)
/// - RFC 3339 timestamps (arXiv Atom `published` entries)
/// - bare `YYYY` years (Semantic Scholar year-only records), pinned to
///   January 1st
///
/// Anything else falls back to the current date at collection time. The
/// fallback is lossy but explicit: a record with a mangled date is still
/// worth storing, and the collection date is the most honest stand-in.
pub fn parse_publication_date(raw: &str) -> NaiveDate {
  let raw = raw.trim();

  if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
    return date;
  }
  if let Ok(timestamp) = chrono::DateTime::parse_from_rfc3339(raw) {
    return timestamp.date_naive();
  }
  if let Ok(year) = raw.parse::<i32>() {
    if let Some(date) = NaiveDate::from_ymd_opt(year, 1, 1) {
      return date;
    }
  }

  let today = chrono::Utc::now().date_naive();
  warn!(raw, fallback = %today, "unparseable publication date; using collection date");
  today
}
