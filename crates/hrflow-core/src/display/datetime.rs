//! Timestamp formatting in the local time zone.

use std::fmt;

use jiff::{tz::TimeZone, Timestamp};

const FORMAT: &str = "%Y-%m-%d %H:%M:%S %Z";

/// Formats a `Timestamp` as `YYYY-MM-DD HH:MM:SS TZ` in the system zone.
pub struct LocalDateTime<'a>(pub &'a Timestamp);

impl fmt::Display for LocalDateTime<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let zoned = self.0.to_zoned(TimeZone::system());
        write!(f, "{}", zoned.strftime(FORMAT))
    }
}
