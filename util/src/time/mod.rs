//! Attendance timestamp handling.
//!
//! Scan times cross two boundaries. On the way in, [`Normalizer`] turns a clock
//! reading into one absolute UTC instant; this is the only place an offset is
//! ever applied. On the way out, [`DisplayZone`] renders a stored instant in a
//! named zone, looking the offset up in the time-zone database. Nothing between
//! the two touches offsets.

pub mod clock;
pub mod display;
pub mod error;
pub mod normalizer;

pub use clock::{Clock, FixedClock, SharedClock, SystemClock};
pub use display::{DisplayZone, UNKNOWN_TIME, parse_stored, parse_wall_time};
pub use error::TimeError;
pub use normalizer::{ClockReading, Normalizer, parse_utc_offset};
