#![expect(clippy::expect_used)]

//! Stateless helpers over raw epoch values and date strings.
//!
//! The [`DateTime`](crate::DateTime) type covers the same ground with a
//! richer value type; the free functions here serve call sites that only
//! hold a raw timestamp or a string and want a one-off conversion.

use crate::calendar::{self, MILLIS_PER_DAY, MILLIS_PER_HOUR};
use crate::detect;
use crate::format::{self, ParseError};
use crate::zone::Zone;
use std::time::SystemTime;

/// Milliseconds since the Unix epoch right now.
#[must_use]
pub fn now_epoch_millis() -> i64 {
    SystemTime::now()
        .duration_since(SystemTime::UNIX_EPOCH)
        .expect("System time before UNIX epoch")
        .as_millis()
        .try_into()
        .expect("The current time seems way in the future, it's strange")
}

/// The year of an epoch millisecond value, read in the process zone.
#[must_use]
pub fn year_of(epoch_millis: i64) -> i32 {
    format::civil_at(epoch_millis, Zone::local()).year
}

/// The month (1-12) of an epoch millisecond value, read in the process zone.
#[must_use]
pub fn month_of(epoch_millis: i64) -> u8 {
    format::civil_at(epoch_millis, Zone::local()).month
}

/// The day of month (1-31) of an epoch millisecond value, read in the
/// process zone.
#[must_use]
pub fn day_of(epoch_millis: i64) -> u8 {
    format::civil_at(epoch_millis, Zone::local()).day
}

/// The day of the week (1 = Sunday through 7 = Saturday) of an epoch
/// millisecond value, read in the process zone.
#[must_use]
pub fn day_of_week_of(epoch_millis: i64) -> u8 {
    format::civil_at(epoch_millis, Zone::local()).weekday
}

/// The day of the week (1 = Sunday through 7 = Saturday) of the present day.
#[must_use]
pub fn day_of_week_today() -> u8 {
    day_of_week_of(now_epoch_millis())
}

/// Renders an epoch millisecond value with a token pattern in the process
/// zone.
#[must_use]
pub fn epoch_to_string(epoch_millis: i64, pattern: &str) -> String {
    epoch_to_string_in_zone(epoch_millis, pattern, Zone::local())
}

/// Renders an epoch millisecond value with a token pattern in an explicit
/// zone.
#[must_use]
pub fn epoch_to_string_in_zone(epoch_millis: i64, pattern: &str, zone: Zone) -> String {
    format::format_civil(&format::civil_at(epoch_millis, zone), pattern)
}

/// Today's date rendered with a token pattern.
#[must_use]
pub fn today_string(pattern: &str) -> String {
    epoch_to_string(now_epoch_millis(), pattern)
}

/// The date a number of days from today (negative for the past), rendered
/// with a token pattern.
#[must_use]
pub fn date_in_days_from_today(pattern: &str, days: i64) -> String {
    epoch_to_string(shift_epoch_days(now_epoch_millis(), days), pattern)
}

/// Parses a date string with a known token pattern to epoch milliseconds,
/// anchoring the fields in the process zone.
pub fn string_to_epoch_millis(input: &str, pattern: &str) -> Result<i64, ParseError> {
    Ok(format::parse_civil(input, pattern)?.resolve())
}

/// Re-renders a date string, whose format gets detected, with a new pattern.
///
/// `month_first` disambiguates day/month order the way
/// [`detect`](crate::detect()) does.
pub fn reformat(
    input: &str,
    new_pattern: &str,
    month_first: Option<bool>,
) -> Result<String, ParseError> {
    let pattern = detect::detect(input, month_first)?;
    reformat_with(input, pattern, new_pattern)
}

/// Re-renders a date string from a known pattern to a new one.
pub fn reformat_with(
    input: &str,
    current_pattern: &str,
    new_pattern: &str,
) -> Result<String, ParseError> {
    let fields = format::parse_civil(input, current_pattern)?;
    Ok(format::format_civil(&fields.into_civil(), new_pattern))
}

/// Shifts an epoch millisecond value by a number of days.
#[must_use]
pub fn shift_epoch_days(epoch_millis: i64, days: i64) -> i64 {
    epoch_millis.saturating_add(days.saturating_mul(MILLIS_PER_DAY))
}

/// Shifts an epoch millisecond value by a number of hours.
#[must_use]
pub fn shift_epoch_hours(epoch_millis: i64, hours: i64) -> i64 {
    epoch_millis.saturating_add(hours.saturating_mul(MILLIS_PER_HOUR))
}

/// Epoch milliseconds of the first day of the month containing the given
/// value, at the same time of day, read in the process zone.
#[must_use]
pub fn first_day_of_month_of(epoch_millis: i64) -> i64 {
    let zone = Zone::local();
    let civil = format::civil_at(epoch_millis, zone);
    let shifted_days = calendar::epoch_days_from_civil(civil.year, civil.month, 1);
    let wall = shifted_days.saturating_mul(MILLIS_PER_DAY)
        + i64::from(civil.hour) * MILLIS_PER_HOUR
        + i64::from(civil.minute) * 60_000
        + i64::from(civil.second) * 1_000
        + i64::from(civil.millisecond);
    zone.resolve_wall_millis(wall)
}

/// Inclusive range check, the shape wanted for date windows.
#[must_use]
pub fn is_in_range<T: PartialOrd>(value: &T, start: &T, end: &T) -> bool {
    !(value < start || value > end)
}

/// Units for elapsed-time conversions.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash)]
pub enum TimeUnit {
    Millisecond,
    Second,
    Minute,
    Hour,
    Day,
}

/// Converts a millisecond count to another unit, keeping the fraction.
#[expect(clippy::cast_precision_loss)]
#[must_use]
pub fn millis_to_unit(millis: i64, unit: TimeUnit) -> f64 {
    let millis = millis as f64;
    match unit {
        TimeUnit::Millisecond => millis,
        TimeUnit::Second => millis / 1_000.,
        TimeUnit::Minute => millis / 1_000. / 60.,
        TimeUnit::Hour => millis / 1_000. / 60. / 60.,
        TimeUnit::Day => millis / 1_000. / 60. / 60. / 24.,
    }
}

/// The difference `end - start` between two epoch millisecond values,
/// converted to the requested unit.
#[must_use]
pub fn difference_in_unit(start_millis: i64, end_millis: i64, unit: TimeUnit) -> f64 {
    millis_to_unit(end_millis.saturating_sub(start_millis), unit)
}

/// A timestamp string for unique artifact names:
/// `<process id>_<yyyyMMdd_HHmmssSSS>`.
#[must_use]
pub fn unique_timestamp() -> String {
    format!(
        "{}_{}",
        std::process::id(),
        epoch_to_string(now_epoch_millis(), "yyyyMMdd_HHmmssSSS")
    )
}

#[cfg(test)]
#[expect(clippy::panic_in_result_fn)]
mod tests {
    use super::*;
    use crate::zone::UtcOffset;

    #[test]
    fn epoch_rendering() {
        let zone = Zone::utc();
        assert_eq!(
            epoch_to_string_in_zone(0, "yyyy-MM-dd HH:mm:ss", zone),
            "1970-01-01 00:00:00"
        );
        assert_eq!(
            epoch_to_string_in_zone(1_700_000_000_000, "yyyy-MM-dd HH:mm:ss", zone),
            "2023-11-14 22:13:20"
        );
        let plus_three = Zone::Fixed(UtcOffset::from_seconds(10_800).expect("valid offset"));
        assert_eq!(
            epoch_to_string_in_zone(0, "yyyy-MM-dd HH:mm", plus_three),
            "1970-01-01 03:00"
        );
    }

    #[test]
    fn epoch_shifts() {
        assert_eq!(shift_epoch_days(0, 1), 86_400_000);
        assert_eq!(shift_epoch_days(0, -1), -86_400_000);
        assert_eq!(shift_epoch_hours(0, 3), 10_800_000);
        assert_eq!(
            epoch_to_string_in_zone(shift_epoch_days(0, 60), "yyyy-MM-dd", Zone::utc()),
            "1970-03-02"
        );
    }

    #[test]
    fn reformatting() -> Result<(), ParseError> {
        assert_eq!(
            reformat("31/01/2024", "yyyy-MM-dd", None)?,
            "2024-01-31"
        );
        assert_eq!(
            reformat("01/02/2024", "yyyy-MM-dd", Some(true))?,
            "2024-02-01"
        );
        assert_eq!(
            reformat("2024-01-31 13:45:30", "dd-MMM-yyyy", None)?,
            "31-Jan-2024"
        );
        assert_eq!(
            reformat_with("16.05.2001", "dd.MM.yyyy", "EEEE, MMMM d, yyyy")?,
            "Wednesday, May 16, 2001"
        );
        assert!(reformat("nonsense", "yyyy-MM-dd", None).is_err());
        Ok(())
    }

    #[test]
    fn unit_conversions() {
        assert_eq!(millis_to_unit(1_500, TimeUnit::Millisecond), 1_500.);
        assert_eq!(millis_to_unit(1_500, TimeUnit::Second), 1.5);
        assert_eq!(millis_to_unit(90_000, TimeUnit::Minute), 1.5);
        assert_eq!(millis_to_unit(5_400_000, TimeUnit::Hour), 1.5);
        assert_eq!(millis_to_unit(129_600_000, TimeUnit::Day), 1.5);
        assert_eq!(
            difference_in_unit(1_000, 91_000, TimeUnit::Minute),
            1.5
        );
        assert_eq!(difference_in_unit(91_000, 1_000, TimeUnit::Second), -90.);
    }

    #[test]
    fn ranges() {
        assert!(is_in_range(&5, &1, &10));
        assert!(is_in_range(&1, &1, &10));
        assert!(is_in_range(&10, &1, &10));
        assert!(!is_in_range(&0, &1, &10));
        assert!(!is_in_range(&11, &1, &10));
    }

    #[test]
    fn unique_timestamps() {
        let stamp = unique_timestamp();
        // <pid>_<yyyyMMdd>_<HHmmssSSS>
        let mut parts = stamp.split('_');
        assert!(parts.next().is_some_and(|pid| pid.bytes().all(|b| b.is_ascii_digit())));
        assert!(parts.next().is_some_and(|date| date.len() == 8));
        assert!(parts.next().is_some_and(|time| time.len() == 9));
        assert!(parts.next().is_none());
    }
}
