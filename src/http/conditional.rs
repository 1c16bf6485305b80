//! Conditional request module
//!
//! Validator generation (`ETag`, `Last-Modified`) and evaluation of the
//! `If-Match`, `If-Unmodified-Since`, `If-None-Match`, `If-Modified-Since`
//! and `If-Range` request headers, following RFC 7232.

use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use hyper::header::{
    HeaderMap, IF_MATCH, IF_MODIFIED_SINCE, IF_NONE_MATCH, IF_RANGE, IF_UNMODIFIED_SINCE,
};
use std::fs::Metadata;
use std::time::UNIX_EPOCH;

/// IMF-fixdate, the preferred HTTP-date format
const IMF_FIXDATE: &str = "%a, %d %b %Y %H:%M:%S GMT";
/// Obsolete RFC 850 date format
const RFC850_DATE: &str = "%A, %d-%b-%y %H:%M:%S GMT";
/// Obsolete asctime date format
const ASCTIME_DATE: &str = "%a %b %e %H:%M:%S %Y";

/// Cache validators computed from file metadata
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Validators {
    /// Strong entity tag, quoted
    pub etag: String,
    /// Modification time truncated to whole seconds, `None` when unknown
    pub last_modified: Option<DateTime<Utc>>,
}

impl Validators {
    /// Build validators from file metadata
    pub fn from_metadata(metadata: &Metadata) -> Self {
        let modified_secs = metadata
            .modified()
            .ok()
            .and_then(|t| t.duration_since(UNIX_EPOCH).ok())
            .map(|d| d.as_secs());

        // A zero (epoch) modification time carries no information
        let last_modified = modified_secs
            .filter(|secs| *secs > 0)
            .and_then(|secs| i64::try_from(secs).ok())
            .and_then(|secs| Utc.timestamp_opt(secs, 0).single());

        Self {
            etag: generate_etag(modified_secs.unwrap_or(0), metadata.len()),
            last_modified,
        }
    }

    /// `Last-Modified` header value
    pub fn last_modified_header(&self) -> Option<String> {
        self.last_modified.map(format_http_date)
    }
}

/// Outcome of evaluating request preconditions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Precondition {
    /// Send the representation
    Proceed,
    /// Answer 304 Not Modified
    NotModified,
    /// Answer 412 Precondition Failed
    Failed,
}

/// Generate a strong `ETag` from modification time and size
///
/// # Returns
/// Quoted `ETag` string, e.g., `"6553f100-1a2b"`
pub fn generate_etag(modified_secs: u64, size: u64) -> String {
    format!("\"{modified_secs:x}-{size:x}\"")
}

/// Format a timestamp as an IMF-fixdate
pub fn format_http_date(time: DateTime<Utc>) -> String {
    time.format(IMF_FIXDATE).to_string()
}

/// Parse any of the three HTTP-date formats
pub fn parse_http_date(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if let Ok(dt) = DateTime::parse_from_rfc2822(value) {
        return Some(dt.with_timezone(&Utc));
    }
    [IMF_FIXDATE, RFC850_DATE, ASCTIME_DATE]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
        .map(|naive| naive.and_utc())
}

/// Check if client's `If-None-Match` header matches the server's `ETag`
///
/// Uses weak comparison. Supports:
/// - Single `ETag`: `"abc123"`
/// - Multiple `ETags`: `"abc123", "def456"`
/// - Wildcard: `*`
pub fn check_etag_match(if_none_match: Option<&str>, etag: &str) -> bool {
    if_none_match.is_some_and(|client_etag| {
        client_etag.split(',').map(str::trim).any(|e| {
            e == "*" || strip_weak(e) == strip_weak(etag)
        })
    })
}

/// Strong comparison used by `If-Match` and `If-Range`
pub fn check_strong_match(header: &str, etag: &str) -> bool {
    if is_weak(etag) {
        return false;
    }
    header
        .split(',')
        .map(str::trim)
        .any(|e| e == "*" || (!is_weak(e) && e == etag))
}

/// Evaluate request preconditions against the current validators
///
/// `If-Match` takes priority over `If-Unmodified-Since`, and
/// `If-None-Match` over `If-Modified-Since`.
pub fn evaluate(headers: &HeaderMap, validators: &Validators) -> Precondition {
    if let Some(if_match) = header_str(headers, IF_MATCH.as_str()) {
        if !check_strong_match(if_match, &validators.etag) {
            return Precondition::Failed;
        }
    } else if let Some(since) = header_str(headers, IF_UNMODIFIED_SINCE.as_str()) {
        if let (Some(since), Some(modified)) = (parse_http_date(since), validators.last_modified)
        {
            if modified > since {
                return Precondition::Failed;
            }
        }
    }

    if let Some(if_none_match) = header_str(headers, IF_NONE_MATCH.as_str()) {
        if check_etag_match(Some(if_none_match), &validators.etag) {
            return Precondition::NotModified;
        }
    } else if let Some(since) = header_str(headers, IF_MODIFIED_SINCE.as_str()) {
        if let (Some(since), Some(modified)) = (parse_http_date(since), validators.last_modified)
        {
            if modified <= since {
                return Precondition::NotModified;
            }
        }
    }

    Precondition::Proceed
}

/// Whether a `Range` header may be honoured given the `If-Range` header
pub fn range_allowed(headers: &HeaderMap, validators: &Validators) -> bool {
    let Some(if_range) = header_str(headers, IF_RANGE.as_str()) else {
        return true;
    };

    if if_range.starts_with('"') || if_range.starts_with("W/") {
        return check_strong_match(if_range, &validators.etag);
    }

    match (parse_http_date(if_range), validators.last_modified) {
        (Some(date), Some(modified)) => date == modified,
        _ => false,
    }
}

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers.get(name).and_then(|v| v.to_str().ok())
}

fn is_weak(etag: &str) -> bool {
    etag.starts_with("W/")
}

fn strip_weak(etag: &str) -> &str {
    etag.strip_prefix("W/").unwrap_or(etag)
}
