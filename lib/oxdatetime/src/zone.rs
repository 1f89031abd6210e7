use crate::calendar::{self, MILLIS_PER_DAY};
use crate::duration::{Duration, ParseOffsetError};
use chrono::{Offset, TimeZone};
use chrono_tz::Tz;
use std::fmt;
use std::str::FromStr;

/// A fixed signed displacement from UTC, without DST rules.
#[derive(Eq, PartialEq, Ord, PartialOrd, Debug, Clone, Copy, Hash, Default)]
pub struct UtcOffset {
    seconds: i32,
}

impl UtcOffset {
    pub const UTC: Self = Self { seconds: 0 };
    const MAX_SECONDS: i32 = 18 * 3_600;

    /// An offset from a signed second count; fails outside the supported
    /// +/-18:00 range.
    pub fn from_seconds(seconds: i32) -> Result<Self, ParseOffsetError> {
        if seconds.abs() > Self::MAX_SECONDS {
            return Err(ParseOffsetError::out_of_range(i64::from(seconds)));
        }
        Ok(Self { seconds })
    }

    /// The displacement from UTC in seconds, positive east of Greenwich.
    #[inline]
    #[must_use]
    pub const fn seconds(self) -> i32 {
        self.seconds
    }
}

impl TryFrom<Duration> for UtcOffset {
    type Error = ParseOffsetError;

    #[inline]
    fn try_from(value: Duration) -> Result<Self, ParseOffsetError> {
        let seconds = i32::try_from(value.total_seconds())
            .map_err(|_| ParseOffsetError::out_of_range(value.total_seconds()))?;
        Self::from_seconds(seconds)
    }
}

impl FromStr for UtcOffset {
    type Err = ParseOffsetError;

    /// Accepts `Z` or a signed `[+|-]HH:MM[:SS]` string.
    fn from_str(input: &str) -> Result<Self, ParseOffsetError> {
        if input == "Z" {
            return Ok(Self::UTC);
        }
        Duration::from_offset_str(input)?.try_into()
    }
}

impl fmt::Display for UtcOffset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.seconds == 0 {
            return f.write_str("Z");
        }
        let sign = if self.seconds < 0 { '-' } else { '+' };
        let magnitude = self.seconds.unsigned_abs();
        let (hours, minutes, seconds) = (magnitude / 3_600, magnitude % 3_600 / 60, magnitude % 60);
        if seconds == 0 {
            write!(f, "{sign}{hours:02}:{minutes:02}")
        } else {
            write!(f, "{sign}{hours:02}:{minutes:02}:{seconds:02}")
        }
    }
}

/// The zone used to project calendar fields out of an absolute instant.
///
/// `Fixed` applies constant offset arithmetic and never models DST
/// transitions; `Named` follows the IANA rules for the zone, DST included.
/// The two deliberately stay distinct so a fixed-offset call site cannot be
/// mistaken for a rules-based one.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash)]
pub enum Zone {
    Fixed(UtcOffset),
    Named(Tz),
}

impl Zone {
    #[inline]
    #[must_use]
    pub const fn utc() -> Self {
        Self::Fixed(UtcOffset::UTC)
    }

    /// The zone the process runs in, from the platform zone database name.
    ///
    /// Falls back to UTC when the name cannot be discovered or is unknown.
    #[must_use]
    pub fn local() -> Self {
        iana_time_zone::get_timezone()
            .ok()
            .and_then(|name| name.parse::<Tz>().ok())
            .map_or_else(Self::utc, Self::Named)
    }

    /// The UTC offset in effect at the given instant, in seconds.
    #[must_use]
    pub fn offset_seconds_at(self, epoch_millis: i64) -> i32 {
        match self {
            Self::Fixed(offset) => offset.seconds(),
            Self::Named(tz) => {
                let seconds = epoch_millis.div_euclid(1_000);
                chrono::DateTime::from_timestamp(seconds, 0)
                    .or_else(|| chrono::DateTime::from_timestamp(0, 0))
                    .map_or(0, |utc| {
                        utc.with_timezone(&tz).offset().fix().local_minus_utc()
                    })
            }
        }
    }

    /// Resolves wall-clock milliseconds (civil fields laid out as if they
    /// were UTC) to the absolute instant carrying that wall time here.
    ///
    /// During a DST gap the post-transition offset applies; during an
    /// overlap the earlier instant wins.
    #[expect(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    #[must_use]
    pub(crate) fn resolve_wall_millis(self, wall_millis: i64) -> i64 {
        match self {
            Self::Fixed(offset) => wall_millis.saturating_sub(i64::from(offset.seconds()) * 1_000),
            Self::Named(tz) => {
                let days = wall_millis.div_euclid(MILLIS_PER_DAY);
                let (year, month, day) = calendar::civil_from_epoch_days(days);
                let millis_of_day = wall_millis.rem_euclid(MILLIS_PER_DAY);
                let naive =
                    chrono::NaiveDate::from_ymd_opt(year, u32::from(month), u32::from(day))
                        .and_then(|date| {
                            date.and_hms_milli_opt(
                                (millis_of_day / 3_600_000) as u32,
                                (millis_of_day / 60_000 % 60) as u32,
                                (millis_of_day / 1_000 % 60) as u32,
                                (millis_of_day % 1_000) as u32,
                            )
                        });
                let Some(naive) = naive else {
                    // Outside the chrono-supported year range; keep the
                    // fixed-at-wall offset
                    return wall_millis
                        .saturating_sub(i64::from(self.offset_seconds_at(wall_millis)) * 1_000);
                };
                match tz.from_local_datetime(&naive) {
                    chrono::LocalResult::Single(instant) => instant.timestamp_millis(),
                    chrono::LocalResult::Ambiguous(earliest, _) => earliest.timestamp_millis(),
                    chrono::LocalResult::None => {
                        let guess = wall_millis
                            .saturating_sub(i64::from(self.offset_seconds_at(wall_millis)) * 1_000);
                        wall_millis
                            .saturating_sub(i64::from(self.offset_seconds_at(guess)) * 1_000)
                    }
                }
            }
        }
    }
}

impl FromStr for Zone {
    type Err = UnknownZoneError;

    /// Accepts an IANA zone name like `Asia/Jerusalem` or an offset string
    /// like `+03:00`.
    fn from_str(id: &str) -> Result<Self, UnknownZoneError> {
        if let Ok(tz) = id.parse::<Tz>() {
            return Ok(Self::Named(tz));
        }
        id.parse::<UtcOffset>()
            .map(Self::Fixed)
            .map_err(|_| UnknownZoneError { id: id.into() })
    }
}

impl fmt::Display for Zone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Named(tz) => f.write_str(tz.name()),
            Self::Fixed(offset) => write!(f, "{offset}"),
        }
    }
}

/// A zone id that is neither an IANA name nor a UTC offset.
#[derive(Debug, Clone, thiserror::Error)]
#[error("unknown time zone id {id:?}")]
pub struct UnknownZoneError {
    id: String,
}

#[cfg(test)]
#[expect(clippy::panic_in_result_fn)]
mod tests {
    use super::*;

    #[test]
    fn offset_from_str() -> Result<(), ParseOffsetError> {
        assert_eq!(UtcOffset::from_str("Z")?, UtcOffset::UTC);
        assert_eq!(UtcOffset::from_str("+03:00")?.seconds(), 10_800);
        assert_eq!(UtcOffset::from_str("-02:30")?.seconds(), -9_000);
        assert_eq!(UtcOffset::from_str("+05:30:15")?.seconds(), 19_815);
        assert!(UtcOffset::from_str("+19:00").is_err());
        assert!(UtcOffset::from_str("nonsense").is_err());
        Ok(())
    }

    #[test]
    fn offset_display() -> Result<(), ParseOffsetError> {
        assert_eq!(UtcOffset::UTC.to_string(), "Z");
        assert_eq!(UtcOffset::from_str("+03:00")?.to_string(), "+03:00");
        assert_eq!(UtcOffset::from_str("-02:30")?.to_string(), "-02:30");
        assert_eq!(UtcOffset::from_str("+05:30:15")?.to_string(), "+05:30:15");
        Ok(())
    }

    #[test]
    fn zone_from_str() {
        assert!(matches!(
            "Asia/Jerusalem".parse::<Zone>(),
            Ok(Zone::Named(_))
        ));
        assert!(matches!("UTC".parse::<Zone>(), Ok(Zone::Named(_))));
        assert!(matches!("+03:00".parse::<Zone>(), Ok(Zone::Fixed(_))));
        assert!("Middle/Nowhere".parse::<Zone>().is_err());
    }

    #[test]
    fn fixed_offsets_ignore_instants() -> Result<(), ParseOffsetError> {
        let zone = Zone::Fixed(UtcOffset::from_str("+03:00")?);
        assert_eq!(zone.offset_seconds_at(0), 10_800);
        assert_eq!(zone.offset_seconds_at(1_700_000_000_000), 10_800);
        assert_eq!(zone.resolve_wall_millis(10_800_000), 0);
        Ok(())
    }

    #[test]
    fn named_offsets_follow_dst() -> Result<(), UnknownZoneError> {
        let jerusalem = "Asia/Jerusalem".parse::<Zone>()?;
        // 2024-01-15 12:00:00 UTC, Israel standard time (+02:00)
        assert_eq!(jerusalem.offset_seconds_at(1_705_320_000_000), 7_200);
        // 2024-07-15 12:00:00 UTC, Israel daylight time (+03:00)
        assert_eq!(jerusalem.offset_seconds_at(1_721_044_800_000), 10_800);
        Ok(())
    }
}
