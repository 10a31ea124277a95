//! Read boundary: stored instant → wall-clock text in a named zone.

use super::error::TimeError;
use chrono::{DateTime, FixedOffset, NaiveDate, NaiveTime, Offset, TimeZone, Utc};
use chrono_tz::Tz;

/// Rendered in place of a stored value that cannot be read as an instant.
pub const UNKNOWN_TIME: &str = "Unknown time";

const TIME_FORMAT: &str = "%I:%M:%S %p";
const DATE_FORMAT: &str = "%d %b %Y";
const DATE_TIME_FORMAT: &str = "%d %b %Y, %I:%M %p";
const DATE_TIME_SECONDS_FORMAT: &str = "%d %b %Y, %I:%M:%S %p";

/// Offset-carrying layouts the SQLite driver writes besides RFC 3339.
const STORED_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S%.f%:z", "%Y-%m-%d %H:%M:%S%.f %:z"];

/// Parses a persisted instant.
///
/// Only self-describing values are accepted: RFC 3339 with `Z` or an explicit
/// offset, or epoch milliseconds. A bare local time is rejected because its
/// zone would have to be guessed.
pub fn parse_stored(raw: &str) -> Result<DateTime<Utc>, TimeError> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(dt.with_timezone(&Utc));
    }
    if let Some(dt) = STORED_FORMATS
        .iter()
        .find_map(|fmt| DateTime::parse_from_str(raw, fmt).ok())
    {
        return Ok(dt.with_timezone(&Utc));
    }
    raw.parse::<i64>()
        .ok()
        .and_then(DateTime::from_timestamp_millis)
        .ok_or_else(|| TimeError::InvalidReading(raw.to_owned()))
}

/// Parses an `HH:MM` wall-clock time such as a daily schedule slot.
pub fn parse_wall_time(raw: &str) -> Result<NaiveTime, TimeError> {
    NaiveTime::parse_from_str(raw.trim(), "%H:%M")
        .map_err(|_| TimeError::InvalidReading(raw.to_owned()))
}

/// Target zone for rendering, resolved against the tz database.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayZone {
    tz: Tz,
}

impl DisplayZone {
    pub fn new(tz: Tz) -> Self {
        Self { tz }
    }

    pub fn parse(name: &str) -> Result<Self, TimeError> {
        name.trim()
            .parse::<Tz>()
            .map(Self::new)
            .map_err(|_| TimeError::UnknownZone(name.to_owned()))
    }

    pub fn name(&self) -> &'static str {
        self.tz.name()
    }

    pub fn localize(&self, instant: &DateTime<Utc>) -> DateTime<Tz> {
        instant.with_timezone(&self.tz)
    }

    /// Offset in force in this zone at `instant`.
    pub fn offset_at(&self, instant: &DateTime<Utc>) -> FixedOffset {
        self.localize(instant).offset().fix()
    }

    pub fn local_date(&self, instant: &DateTime<Utc>) -> NaiveDate {
        self.localize(instant).date_naive()
    }

    /// `hh:mm:ss AM/PM`
    pub fn format_time(&self, instant: &DateTime<Utc>) -> String {
        self.localize(instant).format(TIME_FORMAT).to_string()
    }

    pub fn format_date(&self, instant: &DateTime<Utc>) -> String {
        self.localize(instant).format(DATE_FORMAT).to_string()
    }

    pub fn format_date_time(&self, instant: &DateTime<Utc>) -> String {
        self.localize(instant).format(DATE_TIME_FORMAT).to_string()
    }

    /// Full timestamp used in exports, e.g. `24 Sep 2025, 11:54:31 AM`.
    pub fn format_date_time_seconds(&self, instant: &DateTime<Utc>) -> String {
        self.localize(instant)
            .format(DATE_TIME_SECONDS_FORMAT)
            .to_string()
    }

    /// Formats a raw persisted value, falling back to [`UNKNOWN_TIME`].
    pub fn format_stored(&self, raw: &str) -> String {
        self.format_stored_with(raw, Self::format_time)
    }

    /// Like [`format_stored`](Self::format_stored) with a caller-chosen layout.
    pub fn format_stored_with(
        &self,
        raw: &str,
        render: fn(&Self, &DateTime<Utc>) -> String,
    ) -> String {
        match parse_stored(raw) {
            Ok(instant) => render(self, &instant),
            Err(e) => {
                tracing::warn!(value = raw, error = %e, "Unreadable stored instant");
                UNKNOWN_TIME.to_owned()
            }
        }
    }

    /// UTC bounds `[start of from, start of day after to)` for local dates.
    ///
    /// Returns `None` when `from` is after `to`.
    pub fn day_bounds(
        &self,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
        if from > to {
            return None;
        }
        let start = self.start_of_day(from)?;
        let end = self.start_of_day(to.succ_opt()?)?;
        Some((start, end))
    }

    fn start_of_day(&self, date: NaiveDate) -> Option<DateTime<Utc>> {
        self.at_local(date, NaiveTime::MIN)
    }

    /// The instant at which this zone's clocks show `time` on `date`.
    ///
    /// Ambiguous local times resolve to the earlier instant; times skipped by
    /// a DST jump yield `None`.
    pub fn at_local(&self, date: NaiveDate, time: NaiveTime) -> Option<DateTime<Utc>> {
        self.tz
            .from_local_datetime(&date.and_time(time))
            .earliest()
            .map(|dt| dt.with_timezone(&Utc))
    }

    /// Next instant strictly after `now` at which the local clock reads `time`.
    pub fn next_occurrence(&self, now: &DateTime<Utc>, time: NaiveTime) -> Option<DateTime<Utc>> {
        let mut date = self.local_date(now);
        // A DST gap can skip `time` on one day; look a few days ahead.
        for _ in 0..3 {
            if let Some(candidate) = self.at_local(date, time) {
                if candidate > *now {
                    return Some(candidate);
                }
            }
            date = date.succ_opt()?;
        }
        None
    }
}

impl Default for DisplayZone {
    fn default() -> Self {
        Self::new(chrono_tz::Asia::Kolkata)
    }
}
