//! The Gregorian calendar engine shared by the whole crate.
//!
//! Everything here is pure integer math over civil fields and epoch day
//! counts. Zone handling and string work live in the sibling modules.

use std::fmt;
use std::str::FromStr;

pub(crate) const MILLIS_PER_SECOND: i64 = 1_000;
pub(crate) const MILLIS_PER_MINUTE: i64 = 60 * MILLIS_PER_SECOND;
pub(crate) const MILLIS_PER_HOUR: i64 = 60 * MILLIS_PER_MINUTE;
pub(crate) const MILLIS_PER_DAY: i64 = 24 * MILLIS_PER_HOUR;

/// Returns whether the given year is a Gregorian leap year.
#[inline]
#[must_use]
pub fn is_leap_year(year: i32) -> bool {
    year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
}

/// Returns the number of days in the given month, accounting for leap years.
#[inline]
#[must_use]
pub fn days_in_month(year: i32, month: u8) -> u8 {
    match month {
        2 => {
            if is_leap_year(year) {
                29
            } else {
                28
            }
        }
        4 | 6 | 9 | 11 => 30,
        _ => 31,
    }
}

/// Converts a civil date to a day count relative to 1970-01-01.
///
/// Day values past the end of the month roll over into the following month,
/// matching lenient calendar semantics.
#[must_use]
pub(crate) fn epoch_days_from_civil(year: i32, month: u8, day: u8) -> i64 {
    let year = i64::from(year) - i64::from(month <= 2);
    let era = year.div_euclid(400);
    let year_of_era = year - era * 400;
    // Months counted from March so the leap day lands at the end of the year
    let shifted_month = i64::from(month) + if month > 2 { -3 } else { 9 };
    let day_of_year = (153 * shifted_month + 2) / 5 + i64::from(day) - 1;
    let day_of_era = year_of_era * 365 + year_of_era / 4 - year_of_era / 100 + day_of_year;
    era * 146_097 + day_of_era - 719_468
}

/// Inverse of [`epoch_days_from_civil`].
#[expect(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
#[must_use]
pub(crate) fn civil_from_epoch_days(days: i64) -> (i32, u8, u8) {
    let days = days + 719_468;
    let era = days.div_euclid(146_097);
    let day_of_era = days - era * 146_097;
    let year_of_era =
        (day_of_era - day_of_era / 1460 + day_of_era / 36_524 - day_of_era / 146_096) / 365;
    let year = year_of_era + era * 400;
    let day_of_year = day_of_era - (365 * year_of_era + year_of_era / 4 - year_of_era / 100);
    let shifted_month = (5 * day_of_year + 2) / 153;
    let day = day_of_year - (153 * shifted_month + 2) / 5 + 1;
    let month = if shifted_month < 10 {
        shifted_month + 3
    } else {
        shifted_month - 9
    };
    (
        (year + i64::from(month <= 2)) as i32,
        month as u8,
        day as u8,
    )
}

/// Day of the week for an epoch day count, 1 (Sunday) through 7 (Saturday).
#[expect(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
#[inline]
#[must_use]
pub(crate) fn day_of_week_from_epoch_days(days: i64) -> u8 {
    // 1970-01-01 was a Thursday
    ((days + 4).rem_euclid(7) + 1) as u8
}

/// One-based day number within the year.
#[must_use]
pub(crate) fn day_of_year(year: i32, month: u8, day: u8) -> i64 {
    let mut result = i64::from(day);
    for past_month in 1..month {
        result += i64::from(days_in_month(year, past_month));
    }
    result
}

/// Week number within the year under the supplied week start day
/// (1 = Sunday through 7 = Saturday).
///
/// Week 1 is the week containing January 1, however short it is.
#[expect(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
#[must_use]
pub(crate) fn week_of_year(year: i32, month: u8, day: u8, first_day_of_week: u8) -> u32 {
    let jan_1 = day_of_week_from_epoch_days(epoch_days_from_civil(year, 1, 1));
    let lead = (i64::from(jan_1) - i64::from(first_day_of_week)).rem_euclid(7);
    ((day_of_year(year, month, day) + lead - 1) / 7 + 1) as u32
}

/// Epoch day of the first day of the given week of the given year, under the
/// supplied week start day.
#[must_use]
pub(crate) fn epoch_days_of_week_start(week: u32, year: i32, first_day_of_week: u8) -> i64 {
    let jan_1_days = epoch_days_from_civil(year, 1, 1);
    let jan_1 = day_of_week_from_epoch_days(jan_1_days);
    let lead = (i64::from(jan_1) - i64::from(first_day_of_week)).rem_euclid(7);
    jan_1_days + (i64::from(week) - 1) * 7 - lead
}

/// Validates explicit calendar fields the way the public constructors do.
pub(crate) fn validate_civil_fields(
    year: i32,
    month: u8,
    day: u8,
    hour: u8,
    minute: u8,
    second: u8,
) -> Result<(), InvalidFieldError> {
    if !(1..=31).contains(&day) {
        return Err(InvalidFieldError(InvalidFieldErrorKind::Day(day)));
    }
    if !(1..=12).contains(&month) {
        return Err(InvalidFieldError(InvalidFieldErrorKind::Month(month)));
    }
    if month == 2 && day > 28 && !is_leap_year(year) {
        return Err(InvalidFieldError(InvalidFieldErrorKind::LeapDay {
            year,
            day,
        }));
    }
    if hour > 23 {
        return Err(InvalidFieldError(InvalidFieldErrorKind::Hour(hour)));
    }
    if minute > 59 {
        return Err(InvalidFieldError(InvalidFieldErrorKind::Minute(minute)));
    }
    if second > 59 {
        return Err(InvalidFieldError(InvalidFieldErrorKind::Second(second)));
    }
    Ok(())
}

/// A calendar field outside its valid range at construction time.
#[derive(Debug, Clone, Copy, thiserror::Error)]
#[error(transparent)]
pub struct InvalidFieldError(#[from] InvalidFieldErrorKind);

#[derive(Debug, Clone, Copy, thiserror::Error)]
enum InvalidFieldErrorKind {
    #[error("the day value must be between 1-31, received: {0}")]
    Day(u8),
    #[error("the month value must be between 1-12, received: {0}")]
    Month(u8),
    #[error("February {day} does not exist, {year} is not a leap year")]
    LeapDay { year: i32, day: u8 },
    #[error("the hour value must be between 0-23, received: {0}")]
    Hour(u8),
    #[error("the minutes value must be between 0-59, received: {0}")]
    Minute(u8),
    #[error("the seconds value must be between 0-59, received: {0}")]
    Second(u8),
}

/// An auxiliary argument outside its documented range.
#[derive(Debug, Clone, Copy, thiserror::Error)]
#[error("{name} must be between {min}-{max}, received: {value}")]
pub struct InvalidArgumentError {
    name: &'static str,
    min: i64,
    max: i64,
    value: i64,
}

impl InvalidArgumentError {
    pub(crate) const fn new(name: &'static str, min: i64, max: i64, value: i64) -> Self {
        Self {
            name,
            min,
            max,
            value,
        }
    }
}

/// A string that matches no known English month or weekday name.
#[derive(Debug, Clone, thiserror::Error)]
#[error("no month or weekday matches {name:?}")]
pub struct UnknownNameError {
    name: String,
}

impl UnknownNameError {
    fn new(name: &str) -> Self {
        Self { name: name.into() }
    }
}

/// A month of the Gregorian year, numbered 1 (January) through 12 (December).
#[derive(Eq, PartialEq, Ord, PartialOrd, Debug, Clone, Copy, Hash)]
pub enum Month {
    January = 1,
    February = 2,
    March = 3,
    April = 4,
    May = 5,
    June = 6,
    July = 7,
    August = 8,
    September = 9,
    October = 10,
    November = 11,
    December = 12,
}

impl Month {
    const ALL: [Self; 12] = [
        Self::January,
        Self::February,
        Self::March,
        Self::April,
        Self::May,
        Self::June,
        Self::July,
        Self::August,
        Self::September,
        Self::October,
        Self::November,
        Self::December,
    ];

    /// Month-of-year number, 1 (January) through 12 (December).
    #[inline]
    #[must_use]
    pub const fn number(self) -> u8 {
        self as u8
    }

    /// The month for a 1-based month-of-year number.
    pub fn from_number(month: u8) -> Result<Self, InvalidArgumentError> {
        Self::ALL
            .get(usize::from(month).wrapping_sub(1))
            .copied()
            .ok_or(InvalidArgumentError::new(
                "the month value",
                1,
                12,
                i64::from(month),
            ))
    }

    /// Full English name, e.g. `January`.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::January => "January",
            Self::February => "February",
            Self::March => "March",
            Self::April => "April",
            Self::May => "May",
            Self::June => "June",
            Self::July => "July",
            Self::August => "August",
            Self::September => "September",
            Self::October => "October",
            Self::November => "November",
            Self::December => "December",
        }
    }

    /// Three-letter abbreviation, e.g. `Jan`.
    #[must_use]
    pub fn abbreviated(self) -> &'static str {
        &self.name()[..3]
    }

    /// Single-letter form, e.g. `J`.
    #[must_use]
    pub fn narrow(self) -> &'static str {
        &self.name()[..1]
    }
}

impl FromStr for Month {
    type Err = UnknownNameError;

    /// Matches at least the first three letters of the English name,
    /// case-insensitive, so both `FEB` and `February` resolve.
    fn from_str(name: &str) -> Result<Self, UnknownNameError> {
        if name.len() >= 3 {
            let upper = name.to_ascii_uppercase();
            for month in Self::ALL {
                if month.name().to_ascii_uppercase().starts_with(&upper) {
                    return Ok(month);
                }
            }
        }
        Err(UnknownNameError::new(name))
    }
}

impl fmt::Display for Month {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A day of the week, numbered 1 (Sunday) through 7 (Saturday).
#[derive(Eq, PartialEq, Ord, PartialOrd, Debug, Clone, Copy, Hash)]
pub enum Weekday {
    Sunday = 1,
    Monday = 2,
    Tuesday = 3,
    Wednesday = 4,
    Thursday = 5,
    Friday = 6,
    Saturday = 7,
}

impl Weekday {
    const ALL: [Self; 7] = [
        Self::Sunday,
        Self::Monday,
        Self::Tuesday,
        Self::Wednesday,
        Self::Thursday,
        Self::Friday,
        Self::Saturday,
    ];

    /// Day-of-week number, 1 (Sunday) through 7 (Saturday).
    #[inline]
    #[must_use]
    pub const fn number(self) -> u8 {
        self as u8
    }

    /// The weekday for a 1-based day-of-week number.
    pub fn from_number(day: u8) -> Result<Self, InvalidArgumentError> {
        Self::ALL
            .get(usize::from(day).wrapping_sub(1))
            .copied()
            .ok_or(InvalidArgumentError::new(
                "the day of the week",
                1,
                7,
                i64::from(day),
            ))
    }

    /// Full English name, e.g. `Sunday`.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Sunday => "Sunday",
            Self::Monday => "Monday",
            Self::Tuesday => "Tuesday",
            Self::Wednesday => "Wednesday",
            Self::Thursday => "Thursday",
            Self::Friday => "Friday",
            Self::Saturday => "Saturday",
        }
    }

    /// Three-letter abbreviation, e.g. `Sun`.
    #[must_use]
    pub fn abbreviated(self) -> &'static str {
        &self.name()[..3]
    }
}

impl FromStr for Weekday {
    type Err = UnknownNameError;

    fn from_str(name: &str) -> Result<Self, UnknownNameError> {
        if name.len() >= 3 {
            let upper = name.to_ascii_uppercase();
            for weekday in Self::ALL {
                if weekday.name().to_ascii_uppercase().starts_with(&upper) {
                    return Ok(weekday);
                }
            }
        }
        Err(UnknownNameError::new(name))
    }
}

impl fmt::Display for Weekday {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
