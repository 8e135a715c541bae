use chrono::{DateTime, Duration, NaiveDateTime, SecondsFormat, Utc};
use tracing::warn;

// ── Parsing ───────────────────────────────────────────────────────────────────

/// Parse an ISO 8601 / RFC 3339 timestamp string into a UTC [`DateTime`].
///
/// Handles the `Z`-suffix form written by the ledger and any fixed UTC
/// offset. Naive timestamps without an offset are read as UTC.
/// Returns `None` for empty strings or unrecognised formats.
pub fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }

    const FMTS: &[&str] = &[
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%d %H:%M:%S",
    ];
    for fmt in FMTS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(naive.and_utc());
        }
    }

    warn!("could not parse timestamp \"{}\"", s);
    None
}

// ── Formatting ────────────────────────────────────────────────────────────────

/// Render `dt` the way ledger timestamps are stored: millisecond precision
/// with a `Z` suffix (e.g. `2024-01-15T10:30:00.000Z`).
pub fn format_timestamp(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Millis, true)
}

// ── Windows ───────────────────────────────────────────────────────────────────

/// The instant `days` days before `now`.
///
/// Saturates at the representable range instead of panicking, so absurd
/// retention values behave like "keep everything" or "keep nothing".
pub fn days_before(now: DateTime<Utc>, days: i64) -> DateTime<Utc> {
    Duration::try_days(days)
        .and_then(|delta| now.checked_sub_signed(delta))
        .unwrap_or(if days > 0 {
            DateTime::<Utc>::MIN_UTC
        } else {
            DateTime::<Utc>::MAX_UTC
        })
}

// ── Tests ──────────────────────────────────────────────────────────────────────
