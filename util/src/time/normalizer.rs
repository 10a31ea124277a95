//! Write boundary: clock reading → canonical stored instant.

use super::clock::Clock;
use super::error::TimeError;
use chrono::{DateTime, FixedOffset, NaiveDateTime, Offset, SubsecRound, TimeDelta, Utc};
use std::str::FromStr;

/// Accepted layouts for a host-local wall-clock reading (no offset).
const LOCAL_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// A reading taken from some clock.
///
/// The two variants are kept apart so an offset can only ever be removed from
/// a reading that still carries local wall-clock digits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockReading {
    /// Offset-aware instant (RFC 3339 with `Z`/offset, or epoch milliseconds).
    Absolute(DateTime<FixedOffset>),
    /// Wall-clock digits as shown on a host clock running at the host offset.
    Local(NaiveDateTime),
}

impl ClockReading {
    pub fn parse(raw: &str) -> Result<Self, TimeError> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Err(TimeError::MissingReading);
        }

        if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
            return Ok(Self::Absolute(dt));
        }

        if raw.bytes().all(|b| b.is_ascii_digit()) {
            return raw
                .parse::<i64>()
                .ok()
                .and_then(DateTime::from_timestamp_millis)
                .map(|dt| Self::Absolute(dt.fixed_offset()))
                .ok_or_else(|| TimeError::InvalidReading(raw.to_owned()));
        }

        LOCAL_FORMATS
            .iter()
            .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
            .map(Self::Local)
            .ok_or_else(|| TimeError::InvalidReading(raw.to_owned()))
    }
}

impl FromStr for ClockReading {
    type Err = TimeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl From<DateTime<Utc>> for ClockReading {
    fn from(instant: DateTime<Utc>) -> Self {
        Self::Absolute(instant.fixed_offset())
    }
}

/// Parses `+05:30`, `-0400`, `+09`, `Z` or `UTC` into a fixed offset.
pub fn parse_utc_offset(raw: &str) -> Result<FixedOffset, TimeError> {
    let s = raw.trim();
    let invalid = || TimeError::InvalidOffset(raw.to_owned());

    if s.eq_ignore_ascii_case("z") || s.eq_ignore_ascii_case("utc") {
        return Ok(Utc.fix());
    }

    let (sign, rest) = match s.as_bytes().first() {
        Some(b'+') => (1, &s[1..]),
        Some(b'-') => (-1, &s[1..]),
        _ => return Err(invalid()),
    };

    let (h, m) = match rest.split_once(':') {
        Some(parts) => parts,
        None if rest.len() == 4 => rest.split_at(2),
        None if rest.len() == 2 => (rest, "00"),
        None => return Err(invalid()),
    };

    let two_digits = |part: &str| part.len() == 2 && part.bytes().all(|b| b.is_ascii_digit());
    if !two_digits(h) || !two_digits(m) {
        return Err(invalid());
    }

    let hours: i32 = h.parse().map_err(|_| invalid())?;
    let minutes: i32 = m.parse().map_err(|_| invalid())?;
    if hours > 14 || minutes > 59 {
        return Err(invalid());
    }

    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60)).ok_or_else(invalid)
}

/// Converts clock readings into the canonical stored form.
///
/// Output is always UTC truncated to millisecond precision, so a stored
/// instant reads back bit-identically.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Normalizer {
    host_offset: FixedOffset,
}

impl Normalizer {
    pub fn new(host_offset: FixedOffset) -> Self {
        Self { host_offset }
    }

    pub fn from_offset_str(raw: &str) -> Result<Self, TimeError> {
        parse_utc_offset(raw).map(Self::new)
    }

    pub fn host_offset(&self) -> FixedOffset {
        self.host_offset
    }

    /// Fails only for a local reading so close to the representable range
    /// that removing the host offset would leave it.
    pub fn normalize(&self, reading: ClockReading) -> Result<DateTime<Utc>, TimeError> {
        let instant = match reading {
            ClockReading::Absolute(dt) => dt.with_timezone(&Utc),
            ClockReading::Local(local) => self.local_to_utc(local)?,
        };
        Ok(instant.trunc_subsecs(3))
    }

    /// Reads the injected clock. The reading is already absolute and is kept as is.
    pub fn normalize_now(&self, clock: &dyn Clock) -> DateTime<Utc> {
        clock.now().trunc_subsecs(3)
    }

    /// Uses a reading supplied by a device when present, else the clock.
    ///
    /// A supplied but blank or unparsable reading is an error; the caller must
    /// not record the event.
    pub fn normalize_supplied(
        &self,
        supplied: Option<&str>,
        clock: &dyn Clock,
    ) -> Result<DateTime<Utc>, TimeError> {
        match supplied {
            Some(raw) => self.normalize(ClockReading::parse(raw)?),
            None => Ok(self.normalize_now(clock)),
        }
    }

    // Subtracts the host offset exactly once.
    fn local_to_utc(&self, local: NaiveDateTime) -> Result<DateTime<Utc>, TimeError> {
        let shift = TimeDelta::seconds(i64::from(self.host_offset.local_minus_utc()));
        local
            .checked_sub_signed(shift)
            .map(|utc| utc.and_utc())
            .ok_or_else(|| TimeError::InvalidReading(local.to_string()))
    }
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::new(FixedOffset::east_opt(5 * 3600 + 30 * 60).unwrap_or(Utc.fix()))
    }
}
