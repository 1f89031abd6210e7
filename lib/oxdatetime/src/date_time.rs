use crate::calendar::{
    self, InvalidArgumentError, InvalidFieldError, MILLIS_PER_DAY, MILLIS_PER_HOUR,
    MILLIS_PER_MINUTE, MILLIS_PER_SECOND, Month, Weekday,
};
use crate::detect;
use crate::duration::{Duration, ParseOffsetError};
use crate::epoch::now_epoch_millis;
use crate::format::{self, Civil, ParseError};
use crate::zone::{UnknownZoneError, Zone};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

/// A point in time: an absolute instant in milliseconds since the Unix
/// epoch, paired with the zone used to read calendar fields out of it.
///
/// The fields (year, month, day, ...) are always computed on demand from the
/// instant and the zone, so they cannot drift out of sync with it. Equality,
/// ordering and hashing only look at the instant; the display zone never
/// participates.
///
/// Arithmetic comes in two flavors: the `add_*` family mutates the receiver
/// and returns it for chaining, the `plus_*` family returns a fresh value
/// and is the recommended default. Both run through the same calendar code.
/// A value is `Copy`; nothing here is shared, so there is no concurrent
/// mutation to guard against unless the caller aliases a single value.
#[derive(Debug, Clone, Copy)]
pub struct DateTime {
    epoch_millis: i64,
    zone: Zone,
}

impl DateTime {
    /// A date-time from explicit calendar fields, read in the process zone.
    ///
    /// Fails when a field is out of range or when February 29 lands in a
    /// year that is not a leap year.
    pub fn new(
        year: i32,
        month: u8,
        day: u8,
        hour: u8,
        minute: u8,
        second: u8,
    ) -> Result<Self, InvalidFieldError> {
        Self::new_in(Zone::local(), year, month, day, hour, minute, second)
    }

    /// Like [`new`](Self::new) with an explicit zone for the fields.
    pub fn new_in(
        zone: Zone,
        year: i32,
        month: u8,
        day: u8,
        hour: u8,
        minute: u8,
        second: u8,
    ) -> Result<Self, InvalidFieldError> {
        calendar::validate_civil_fields(year, month, day, hour, minute, second)?;
        let wall = calendar::epoch_days_from_civil(year, month, day)
            .saturating_mul(MILLIS_PER_DAY)
            .saturating_add(
                i64::from(hour) * MILLIS_PER_HOUR
                    + i64::from(minute) * MILLIS_PER_MINUTE
                    + i64::from(second) * MILLIS_PER_SECOND,
            );
        Ok(Self {
            epoch_millis: zone.resolve_wall_millis(wall),
            zone,
        })
    }

    /// A date at midnight in the process zone.
    pub fn from_ymd(year: i32, month: u8, day: u8) -> Result<Self, InvalidFieldError> {
        Self::new(year, month, day, 0, 0, 0)
    }

    /// Wraps an absolute instant, displayed in the process zone.
    #[inline]
    #[must_use]
    pub fn from_epoch_millis(epoch_millis: i64) -> Self {
        Self {
            epoch_millis,
            zone: Zone::local(),
        }
    }

    /// Wraps an absolute instant, displayed in an explicit zone.
    #[inline]
    #[must_use]
    pub const fn from_epoch_millis_in(epoch_millis: i64, zone: Zone) -> Self {
        Self { epoch_millis, zone }
    }

    /// Wraps a Unix timestamp in seconds, displayed in the process zone.
    #[inline]
    #[must_use]
    pub fn from_epoch_seconds(epoch_seconds: i64) -> Self {
        Self::from_epoch_millis(epoch_seconds.saturating_mul(1_000))
    }

    /// The current instant in the process zone.
    #[must_use]
    pub fn now() -> Self {
        Self::from_epoch_millis(now_epoch_millis())
    }

    /// Today's date in the process zone with the time cleared to midnight.
    #[must_use]
    pub fn today() -> Self {
        Self::now().at_midnight()
    }

    /// The current instant displayed as UTC.
    #[must_use]
    pub fn utc_now() -> Self {
        Self {
            epoch_millis: now_epoch_millis(),
            zone: Zone::utc(),
        }
    }

    /// Milliseconds since the Unix epoch.
    #[inline]
    #[must_use]
    pub const fn epoch_millis(&self) -> i64 {
        self.epoch_millis
    }

    /// Whole seconds since the Unix epoch.
    #[inline]
    #[must_use]
    pub const fn epoch_seconds(&self) -> i64 {
        self.epoch_millis.div_euclid(1_000)
    }

    /// The zone the calendar fields are displayed in.
    #[inline]
    #[must_use]
    pub const fn zone(&self) -> Zone {
        self.zone
    }

    fn civil(&self) -> Civil {
        format::civil_at(self.epoch_millis, self.zone)
    }

    #[must_use]
    pub fn year(&self) -> i32 {
        self.civil().year
    }

    /// The month component, 1 through 12.
    #[must_use]
    pub fn month(&self) -> u8 {
        self.civil().month
    }

    /// The day component, 1 through 31.
    #[must_use]
    pub fn day(&self) -> u8 {
        self.civil().day
    }

    /// The hour component, 0 through 23.
    #[must_use]
    pub fn hour(&self) -> u8 {
        self.civil().hour
    }

    /// The minute component, 0 through 59.
    #[must_use]
    pub fn minute(&self) -> u8 {
        self.civil().minute
    }

    /// The second component, 0 through 59.
    #[must_use]
    pub fn second(&self) -> u8 {
        self.civil().second
    }

    /// The millisecond component, 0 through 999.
    #[must_use]
    pub fn millisecond(&self) -> u16 {
        self.civil().millisecond
    }

    /// The day of the week, 1 (Sunday) through 7 (Saturday).
    #[must_use]
    pub fn day_of_week(&self) -> u8 {
        self.civil().weekday
    }

    /// The day of the week as an enumerated value.
    #[must_use]
    pub fn day_of_week_name(&self) -> Weekday {
        Weekday::from_number(self.day_of_week()).unwrap_or(Weekday::Sunday)
    }

    /// The month as an enumerated value.
    #[must_use]
    pub fn month_name(&self) -> Month {
        Month::from_number(self.month()).unwrap_or(Month::January)
    }

    /// The week number within the year, under the supplied week start day
    /// (1 = Sunday through 7 = Saturday). Week 1 contains January 1.
    pub fn week_of_year(&self, first_day_of_week: u8) -> Result<u32, InvalidArgumentError> {
        if !(1..=7).contains(&first_day_of_week) {
            return Err(InvalidArgumentError::new(
                "the first day of the week",
                1,
                7,
                i64::from(first_day_of_week),
            ));
        }
        let civil = self.civil();
        Ok(calendar::week_of_year(
            civil.year,
            civil.month,
            civil.day,
            first_day_of_week,
        ))
    }

    /// The date of the first day of the given week of the given year, at
    /// midnight in the process zone.
    ///
    /// With week 5 of 2024 and a Sunday week start this is January 28; with
    /// a Monday week start, January 29.
    pub fn first_day_of_week_date(
        week: u32,
        year: i32,
        first_day_of_week: u8,
    ) -> Result<Self, InvalidArgumentError> {
        if !(1..=7).contains(&first_day_of_week) {
            return Err(InvalidArgumentError::new(
                "the first day of the week",
                1,
                7,
                i64::from(first_day_of_week),
            ));
        }
        let days = calendar::epoch_days_of_week_start(week, year, first_day_of_week);
        let zone = Zone::local();
        Ok(Self {
            epoch_millis: zone.resolve_wall_millis(days.saturating_mul(MILLIS_PER_DAY)),
            zone,
        })
    }

    /// The number of days in this value's month.
    #[must_use]
    pub fn days_in_month(&self) -> u8 {
        let civil = self.civil();
        calendar::days_in_month(civil.year, civil.month)
    }

    /// Whether this value's year is a leap year.
    #[must_use]
    pub fn is_in_leap_year(&self) -> bool {
        calendar::is_leap_year(self.year())
    }

    /// The first day of this value's month, keeping the time of day.
    #[must_use]
    pub fn first_day_of_month(&self) -> Self {
        let civil = self.civil();
        let days = calendar::epoch_days_from_civil(civil.year, civil.month, 1);
        self.anchored_at(days, &civil)
    }

    /// Zeroes the millisecond component in place.
    pub fn clear_milliseconds(&mut self) -> &mut Self {
        self.epoch_millis -= i64::from(self.civil().millisecond);
        self
    }

    /// Zeroes the second component in place, keeping milliseconds.
    pub fn clear_seconds(&mut self) -> &mut Self {
        self.epoch_millis -= i64::from(self.civil().second) * MILLIS_PER_SECOND;
        self
    }

    /// Zeroes the minute component in place.
    pub fn clear_minutes(&mut self) -> &mut Self {
        self.epoch_millis -= i64::from(self.civil().minute) * MILLIS_PER_MINUTE;
        self
    }

    /// Zeroes the hour component in place.
    pub fn clear_hours(&mut self) -> &mut Self {
        self.epoch_millis -= i64::from(self.civil().hour) * MILLIS_PER_HOUR;
        self
    }

    /// The same date with the whole time of day cleared to midnight.
    ///
    /// This is the pure counterpart of the `clear_*` family and the base of
    /// the whole-day computations below.
    #[must_use]
    pub fn at_midnight(self) -> Self {
        let civil = self.civil();
        let days = calendar::epoch_days_from_civil(civil.year, civil.month, civil.day);
        Self {
            epoch_millis: self.zone.resolve_wall_millis(days.saturating_mul(MILLIS_PER_DAY)),
            zone: self.zone,
        }
    }

    /// Re-anchors the receiver on a civil date, keeping its time of day.
    fn anchored_at(&self, epoch_days: i64, time_of: &Civil) -> Self {
        let wall = epoch_days.saturating_mul(MILLIS_PER_DAY).saturating_add(
            i64::from(time_of.hour) * MILLIS_PER_HOUR
                + i64::from(time_of.minute) * MILLIS_PER_MINUTE
                + i64::from(time_of.second) * MILLIS_PER_SECOND
                + i64::from(time_of.millisecond),
        );
        Self {
            epoch_millis: self.zone.resolve_wall_millis(wall),
            zone: self.zone,
        }
    }

    /// Shifts the instant by a number of milliseconds in place; negative
    /// values subtract.
    pub fn add_millis(&mut self, millis: i64) -> &mut Self {
        self.epoch_millis = self.epoch_millis.saturating_add(millis);
        self
    }

    /// Shifts the instant by a number of seconds in place.
    pub fn add_seconds(&mut self, seconds: i64) -> &mut Self {
        self.add_millis(seconds.saturating_mul(MILLIS_PER_SECOND))
    }

    /// Shifts the instant by a number of minutes in place.
    pub fn add_minutes(&mut self, minutes: i64) -> &mut Self {
        self.add_millis(minutes.saturating_mul(MILLIS_PER_MINUTE))
    }

    /// Shifts the instant by a number of hours in place.
    pub fn add_hours(&mut self, hours: i64) -> &mut Self {
        self.add_millis(hours.saturating_mul(MILLIS_PER_HOUR))
    }

    /// Moves the calendar date by a number of days in place, keeping the
    /// wall-clock time of day even across a DST transition.
    pub fn add_days(&mut self, days: i64) -> &mut Self {
        let civil = self.civil();
        let shifted =
            calendar::epoch_days_from_civil(civil.year, civil.month, civil.day).saturating_add(days);
        *self = self.anchored_at(shifted, &civil);
        self
    }

    /// Moves the calendar date by a number of months in place.
    ///
    /// The day of month is clamped to the length of the target month, so
    /// January 31 plus one month is the last day of February.
    #[expect(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn add_months(&mut self, months: i64) -> &mut Self {
        let civil = self.civil();
        let total = i64::from(civil.year) * 12 + i64::from(civil.month) - 1 + months;
        let year = total.div_euclid(12).clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32;
        let month = (total.rem_euclid(12) + 1) as u8;
        let day = civil.day.min(calendar::days_in_month(year, month));
        *self = self.anchored_at(calendar::epoch_days_from_civil(year, month, day), &civil);
        self
    }

    /// Moves the calendar date by a number of years in place; February 29
    /// clamps to February 28 outside leap years.
    pub fn add_years(&mut self, years: i64) -> &mut Self {
        self.add_months(years.saturating_mul(12))
    }

    /// Shifts the instant by a span's signed total seconds in place.
    pub fn add_duration(&mut self, span: &Duration) -> &mut Self {
        self.add_seconds(span.total_seconds())
    }

    /// Shifts the instant by a `[+|-]HH:MM[:SS]` string's signed total
    /// seconds in place.
    pub fn add_offset_str(&mut self, offset: &str) -> Result<&mut Self, ParseOffsetError> {
        let span = Duration::from_offset_str(offset)?;
        Ok(self.add_duration(&span))
    }

    /// Pure counterpart of [`add_millis`](Self::add_millis).
    #[must_use]
    pub fn plus_millis(self, millis: i64) -> Self {
        let mut result = self;
        result.add_millis(millis);
        result
    }

    /// Pure counterpart of [`add_seconds`](Self::add_seconds).
    #[must_use]
    pub fn plus_seconds(self, seconds: i64) -> Self {
        let mut result = self;
        result.add_seconds(seconds);
        result
    }

    /// Pure counterpart of [`add_minutes`](Self::add_minutes).
    #[must_use]
    pub fn plus_minutes(self, minutes: i64) -> Self {
        let mut result = self;
        result.add_minutes(minutes);
        result
    }

    /// Pure counterpart of [`add_hours`](Self::add_hours).
    #[must_use]
    pub fn plus_hours(self, hours: i64) -> Self {
        let mut result = self;
        result.add_hours(hours);
        result
    }

    /// Pure counterpart of [`add_days`](Self::add_days).
    #[must_use]
    pub fn plus_days(self, days: i64) -> Self {
        let mut result = self;
        result.add_days(days);
        result
    }

    /// Pure counterpart of [`add_months`](Self::add_months).
    #[must_use]
    pub fn plus_months(self, months: i64) -> Self {
        let mut result = self;
        result.add_months(months);
        result
    }

    /// Pure counterpart of [`add_years`](Self::add_years).
    #[must_use]
    pub fn plus_years(self, years: i64) -> Self {
        let mut result = self;
        result.add_years(years);
        result
    }

    /// Pure counterpart of [`add_duration`](Self::add_duration).
    #[must_use]
    pub fn plus_duration(self, span: &Duration) -> Self {
        let mut result = self;
        result.add_duration(span);
        result
    }

    /// The signed millisecond difference `self - other`; negative when
    /// `other` is later.
    #[must_use]
    pub fn subtract(&self, other: &Self) -> i64 {
        self.epoch_millis.saturating_sub(other.epoch_millis)
    }

    /// The span from this value to `end` as a [`Duration`].
    #[must_use]
    pub fn difference(&self, end: &Self) -> Duration {
        Duration::from_millis(end.subtract(self))
    }

    /// Whole days between the two instants, truncated toward zero, so
    /// month and year boundaries play no role.
    #[must_use]
    pub fn days_between(first: &Self, second: &Self) -> i64 {
        second.subtract(first) / MILLIS_PER_DAY
    }

    /// Whole weeks between the two values, both normalized to midnight
    /// first; sign-aware.
    ///
    /// Runs in time linear in the number of weeks, which is fine for the
    /// date ranges this is used with.
    #[must_use]
    pub fn weeks_between(first: &Self, second: &Self) -> i64 {
        if second < first {
            return -Self::weeks_between(second, first);
        }
        let target = second.at_midnight();
        let mut cursor = first.at_midnight();
        let mut weeks = 0;
        while cursor < target {
            cursor.add_days(7);
            weeks += 1;
        }
        weeks
    }

    /// Whole calendar months elapsed between the two values; the last
    /// partial month is not counted. Sign-aware.
    #[must_use]
    pub fn months_between(first: &Self, second: &Self) -> i64 {
        if second < first {
            return -Self::months_between(second, first);
        }
        let start = first.civil();
        let end = second.civil();
        let mut months = (i64::from(end.year) - i64::from(start.year)) * 12
            + i64::from(end.month)
            - i64::from(start.month);
        if end.day < start.day {
            months -= 1;
        }
        months
    }

    /// Three-way compare with optional sub-second truncation: when
    /// `include_millis` is false both instants are truncated to whole
    /// seconds first, so values differing only in milliseconds compare
    /// equal.
    #[must_use]
    pub fn compare(&self, other: &Self, include_millis: bool) -> Ordering {
        if include_millis {
            self.cmp(other)
        } else {
            self.epoch_millis
                .div_euclid(1_000)
                .cmp(&other.epoch_millis.div_euclid(1_000))
        }
    }

    /// The same instant displayed in another zone; the calendar fields
    /// change, the instant does not.
    #[must_use]
    pub fn with_display_zone(self, zone: Zone) -> Self {
        Self {
            epoch_millis: self.epoch_millis,
            zone,
        }
    }

    /// [`with_display_zone`](Self::with_display_zone) from a zone id string
    /// like `Asia/Jerusalem` or `+03:00`.
    pub fn to_time_zone(self, zone_id: &str) -> Result<Self, UnknownZoneError> {
        Ok(self.with_display_zone(zone_id.parse()?))
    }

    /// Re-anchors the current calendar fields in another zone: the fields
    /// stay what they read now, the instant moves. This is the
    /// field-preserving conversion, as opposed to the instant-preserving
    /// [`with_display_zone`](Self::with_display_zone).
    #[must_use]
    pub fn reinterpret_fields_in(self, zone: Zone) -> Self {
        let offset = self.zone.offset_seconds_at(self.epoch_millis);
        let wall = self.epoch_millis.saturating_add(i64::from(offset) * 1_000);
        Self {
            epoch_millis: zone.resolve_wall_millis(wall),
            zone,
        }
    }

    /// Reinterprets the current wall-clock fields as UTC.
    #[must_use]
    pub fn to_utc_from_local(self) -> Self {
        self.reinterpret_fields_in(Zone::utc())
    }

    /// Converts to UTC by fixed-offset arithmetic: an offset of `+03:00`
    /// means the value is three hours ahead of UTC, so three hours are
    /// subtracted; a `-` offset adds.
    ///
    /// This is constant-offset math and does not consult DST rules; use the
    /// [`Zone::Named`] operations when transitions matter.
    pub fn to_utc_using_offset(self, offset: &str) -> Result<Self, ParseOffsetError> {
        let span = Duration::from_offset_str(offset)?;
        Ok(self.plus_seconds(-span.total_seconds()))
    }

    /// Converts between two fixed offsets: to UTC with `from_offset`, then
    /// out with `to_offset`. Same DST caveat as
    /// [`to_utc_using_offset`](Self::to_utc_using_offset).
    pub fn between_offsets(
        self,
        from_offset: &str,
        to_offset: &str,
    ) -> Result<Self, ParseOffsetError> {
        let span = Duration::from_offset_str(to_offset)?;
        Ok(self
            .to_utc_using_offset(from_offset)?
            .plus_seconds(span.total_seconds()))
    }

    /// Shifts a UTC value out to a fixed offset.
    pub fn utc_to_offset(utc: Self, to_offset: &str) -> Result<Self, ParseOffsetError> {
        let span = Duration::from_offset_str(to_offset)?;
        Ok(utc.plus_seconds(span.total_seconds()))
    }

    /// Converts a Zulu instant string to the given zone, rendered with a
    /// token pattern: `2025-08-07T13:00:00.000Z` in `Asia/Jerusalem` with
    /// `yyyy-MM-dd HH:mm:ss` becomes `2025-08-07 16:00:00`.
    pub fn zulu_to_zone_string(
        zulu: &str,
        zone: Zone,
        pattern: &str,
    ) -> Result<String, ParseError> {
        let instant = format::parse_instant(zulu)?;
        Ok(Self::from_epoch_millis_in(instant, zone).format(pattern))
    }

    /// Converts an instant string carrying a zone offset to its Zulu form:
    /// `2025-02-08T17:52:44+03:00` becomes `2025-02-08T14:52:44Z`.
    pub fn zone_string_to_zulu(input: &str) -> Result<String, ParseError> {
        Ok(format::format_instant_zulu(format::parse_instant(input)?))
    }

    /// Parses a date string whose format gets detected against the catalog;
    /// `month_first` disambiguates day/month order the way
    /// [`detect`](crate::detect()) does.
    pub fn parse(input: &str, month_first: Option<bool>) -> Result<Self, ParseError> {
        let pattern = detect::detect(input, month_first)?;
        Self::parse_with(input, pattern)
    }

    /// Parses a date string with a known token pattern. The fields anchor in
    /// the process zone, or in UTC when the pattern carries a Zulu marker.
    pub fn parse_with(input: &str, pattern: &str) -> Result<Self, ParseError> {
        let fields = format::parse_civil(input, pattern)?;
        Ok(Self {
            epoch_millis: fields.resolve(),
            zone: Zone::local(),
        })
    }

    /// Renders the calendar fields, as displayed in this value's zone, with
    /// a token pattern.
    #[must_use]
    pub fn format(&self, pattern: &str) -> String {
        format::format_civil(&self.civil(), pattern)
    }

    /// `EEEE, MMMM d, yyyy`, e.g. `Wednesday, May 16, 2001`.
    #[must_use]
    pub fn to_long_date_string(&self) -> String {
        self.format("EEEE, MMMM d, yyyy")
    }

    /// `EEEE, MMMM d, yyyy h:mm:ss a`, e.g.
    /// `Wednesday, May 16, 2001 2:05:59 PM`.
    #[must_use]
    pub fn to_long_date_time_string(&self) -> String {
        self.format("EEEE, MMMM d, yyyy h:mm:ss a")
    }

    /// `h:mm:ss a`, e.g. `3:02:15 AM`.
    #[must_use]
    pub fn to_long_time_string(&self) -> String {
        self.format("h:mm:ss a")
    }

    /// `M/d/yyyy` in US style, `d/M/yyyy` otherwise.
    #[must_use]
    pub fn to_short_date_string(&self, us_style: bool) -> String {
        if us_style {
            self.format("M/d/yyyy")
        } else {
            self.format("d/M/yyyy")
        }
    }

    /// `M/d/yyyy h:mm a` in US style, `d/M/yyyy h:mm a` otherwise.
    #[must_use]
    pub fn to_short_date_time_string(&self, us_style: bool) -> String {
        if us_style {
            self.format("M/d/yyyy h:mm a")
        } else {
            self.format("d/M/yyyy h:mm a")
        }
    }

    /// `h:mm a`, e.g. `3:02 AM`.
    #[must_use]
    pub fn to_short_time_string(&self) -> String {
        self.format("h:mm a")
    }
}

impl PartialEq for DateTime {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.epoch_millis == other.epoch_millis
    }
}

impl Eq for DateTime {}

impl PartialOrd for DateTime {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for DateTime {
    #[inline]
    fn cmp(&self, other: &Self) -> Ordering {
        self.epoch_millis.cmp(&other.epoch_millis)
    }
}

impl Hash for DateTime {
    #[inline]
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.epoch_millis.hash(state);
    }
}

impl FromStr for DateTime {
    type Err = ParseError;

    fn from_str(input: &str) -> Result<Self, ParseError> {
        Self::parse(input, None)
    }
}

impl fmt::Display for DateTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format("yyyy-MM-dd HH:mm:ss"))
    }
}

#[cfg(test)]
#[expect(clippy::panic_in_result_fn)]
mod tests {
    use super::*;
    use crate::zone::UtcOffset;

    fn utc() -> Zone {
        Zone::utc()
    }

    fn moment(
        year: i32,
        month: u8,
        day: u8,
        hour: u8,
        minute: u8,
        second: u8,
    ) -> Result<DateTime, InvalidFieldError> {
        DateTime::new_in(utc(), year, month, day, hour, minute, second)
    }

    #[test]
    fn leap_year_construction() {
        assert!(moment(2024, 2, 29, 0, 0, 0).is_ok());
        assert!(moment(2000, 2, 29, 0, 0, 0).is_ok());
        assert!(moment(2023, 2, 29, 0, 0, 0).is_err());
        assert!(moment(1900, 2, 29, 0, 0, 0).is_err());
    }

    #[test]
    fn field_range_validation() {
        assert!(moment(2024, 1, 32, 0, 0, 0).is_err());
        assert!(moment(2024, 13, 1, 0, 0, 0).is_err());
        assert!(moment(2024, 1, 1, 24, 0, 0).is_err());
        assert!(moment(2024, 1, 1, 0, 60, 0).is_err());
        assert!(moment(2024, 1, 1, 0, 0, 60).is_err());
        assert!(moment(2024, 1, 1, 0, 0, 0).is_ok());
        assert!(moment(2024, 12, 31, 23, 59, 59).is_ok());
    }

    #[test]
    fn field_accessors() -> Result<(), InvalidFieldError> {
        let value = moment(2024, 2, 29, 13, 45, 30)?;
        assert_eq!(value.year(), 2024);
        assert_eq!(value.month(), 2);
        assert_eq!(value.day(), 29);
        assert_eq!(value.hour(), 13);
        assert_eq!(value.minute(), 45);
        assert_eq!(value.second(), 30);
        assert_eq!(value.millisecond(), 0);
        // 2024-02-29 was a Thursday
        assert_eq!(value.day_of_week(), 5);
        assert_eq!(value.day_of_week_name(), Weekday::Thursday);
        assert_eq!(value.month_name(), Month::February);
        assert_eq!(value.days_in_month(), 29);
        assert!(value.is_in_leap_year());
        assert_eq!(value.epoch_seconds(), value.epoch_millis() / 1_000);
        Ok(())
    }

    #[test]
    fn instant_equality_ignores_display_zone() -> Result<(), Box<dyn std::error::Error>> {
        let base = moment(2024, 1, 15, 12, 0, 0)?;
        let copy = base;
        assert_eq!(base.compare(&copy, true), Ordering::Equal);
        assert_eq!(base, copy);

        let plus_two = Zone::Fixed(UtcOffset::from_seconds(7_200)?);
        let shifted_display = base.with_display_zone(plus_two);
        assert_eq!(base, shifted_display);
        assert_eq!(base.compare(&shifted_display, true), Ordering::Equal);
        assert_eq!(shifted_display.hour(), 14);

        let same_instant = DateTime::new_in(plus_two, 2024, 1, 15, 14, 0, 0)?;
        assert_eq!(base.compare(&same_instant, true), Ordering::Equal);
        Ok(())
    }

    #[test]
    fn sub_second_truncation() {
        let first = DateTime::from_epoch_millis_in(1_700_000_000_123, utc());
        let second = DateTime::from_epoch_millis_in(1_700_000_000_456, utc());
        assert_eq!(first.compare(&second, false), Ordering::Equal);
        assert_ne!(first.compare(&second, true), Ordering::Equal);
        assert_eq!(first.compare(&first, true), Ordering::Equal);
    }

    #[test]
    fn ordering() -> Result<(), InvalidFieldError> {
        let earlier = moment(2024, 1, 1, 0, 0, 0)?;
        let later = moment(2024, 1, 1, 0, 0, 1)?;
        assert!(earlier < later);
        assert_eq!(earlier.compare(&later, true), Ordering::Less);
        assert_eq!(later.compare(&earlier, true), Ordering::Greater);
        Ok(())
    }

    #[test]
    fn instant_arithmetic() -> Result<(), InvalidFieldError> {
        let mut value = moment(2024, 1, 1, 0, 0, 0)?;
        value.add_hours(2).add_minutes(30).add_seconds(15).add_millis(250);
        assert_eq!(value.hour(), 2);
        assert_eq!(value.minute(), 30);
        assert_eq!(value.second(), 15);
        assert_eq!(value.millisecond(), 250);
        value.add_hours(-3);
        assert_eq!((value.year(), value.month(), value.day()), (2023, 12, 31));
        assert_eq!(value.hour(), 23);
        Ok(())
    }

    #[test]
    fn calendar_arithmetic() -> Result<(), InvalidFieldError> {
        let mut value = moment(2024, 1, 31, 10, 0, 0)?;
        value.add_months(1);
        assert_eq!((value.year(), value.month(), value.day()), (2024, 2, 29));
        assert_eq!(value.hour(), 10);

        let mut value = moment(2023, 1, 31, 0, 0, 0)?;
        value.add_months(1);
        assert_eq!((value.year(), value.month(), value.day()), (2023, 2, 28));

        let mut value = moment(2024, 2, 29, 0, 0, 0)?;
        value.add_years(1);
        assert_eq!((value.year(), value.month(), value.day()), (2025, 2, 28));

        let mut value = moment(2024, 11, 30, 0, 0, 0)?;
        value.add_months(-12);
        assert_eq!((value.year(), value.month(), value.day()), (2023, 11, 30));

        let mut value = moment(2024, 1, 1, 0, 0, 0)?;
        value.add_days(60);
        assert_eq!((value.year(), value.month(), value.day()), (2024, 3, 1));
        value.add_days(-60);
        assert_eq!((value.year(), value.month(), value.day()), (2024, 1, 1));
        Ok(())
    }

    #[test]
    fn pure_variants_leave_the_receiver_alone() -> Result<(), InvalidFieldError> {
        let base = moment(2024, 1, 31, 0, 0, 0)?;
        let next_month = base.plus_months(1);
        let next_day = base.plus_days(1);
        assert_eq!((base.month(), base.day()), (1, 31));
        assert_eq!((next_month.month(), next_month.day()), (2, 29));
        assert_eq!((next_day.month(), next_day.day()), (2, 1));
        assert_eq!(base.plus_hours(26).day(), 1);
        assert_eq!(base.plus_millis(500).millisecond(), 500);
        Ok(())
    }

    #[test]
    fn duration_arithmetic() -> Result<(), Box<dyn std::error::Error>> {
        let mut value = moment(2024, 1, 1, 0, 0, 0)?;
        value.add_offset_str("+01:30")?;
        assert_eq!((value.hour(), value.minute()), (1, 30));
        value.add_offset_str("-00:30")?;
        assert_eq!((value.hour(), value.minute()), (1, 0));
        value.add_duration(&Duration::from_seconds(3_600));
        assert_eq!(value.hour(), 2);
        assert!(value.add_offset_str("junk").is_err());
        Ok(())
    }

    #[test]
    fn subtraction_and_difference() -> Result<(), InvalidFieldError> {
        let start = moment(2024, 1, 1, 10, 0, 0)?;
        let end = moment(2024, 1, 1, 12, 30, 0)?;
        assert_eq!(end.subtract(&start), 9_000_000);
        assert_eq!(start.subtract(&end), -9_000_000);
        let span = start.difference(&end);
        assert_eq!(span.total_seconds(), 9_000);
        assert_eq!(span.hours(), 2);
        assert_eq!(span.minutes(), 30);
        Ok(())
    }

    #[test]
    fn days_between_instants() -> Result<(), InvalidFieldError> {
        let january = moment(2024, 1, 1, 0, 0, 0)?;
        let march = moment(2024, 3, 1, 0, 0, 0)?;
        assert_eq!(DateTime::days_between(&january, &march), 60);
        assert_eq!(DateTime::days_between(&march, &january), -60);
        // sub-day remainders are ignored
        let evening = moment(2024, 1, 2, 23, 0, 0)?;
        assert_eq!(DateTime::days_between(&january, &evening), 1);
        Ok(())
    }

    #[test]
    fn weeks_between_instants() -> Result<(), InvalidFieldError> {
        let start = moment(2024, 1, 1, 15, 0, 0)?;
        assert_eq!(
            DateTime::weeks_between(&start, &moment(2024, 1, 15, 1, 0, 0)?),
            2
        );
        assert_eq!(
            DateTime::weeks_between(&start, &moment(2024, 1, 14, 23, 59, 59)?),
            2
        );
        assert_eq!(
            DateTime::weeks_between(&moment(2024, 1, 15, 1, 0, 0)?, &start),
            -2
        );
        assert_eq!(DateTime::weeks_between(&start, &start), 0);
        Ok(())
    }

    #[test]
    fn months_between_instants() -> Result<(), InvalidFieldError> {
        let start = moment(2024, 1, 15, 0, 0, 0)?;
        assert_eq!(
            DateTime::months_between(&start, &moment(2024, 3, 15, 0, 0, 0)?),
            2
        );
        assert_eq!(
            DateTime::months_between(&start, &moment(2024, 3, 14, 0, 0, 0)?),
            1
        );
        assert_eq!(
            DateTime::months_between(&moment(2024, 3, 15, 0, 0, 0)?, &start),
            -2
        );
        assert_eq!(
            DateTime::months_between(
                &moment(2024, 1, 31, 0, 0, 0)?,
                &moment(2024, 2, 29, 0, 0, 0)?
            ),
            0
        );
        assert_eq!(
            DateTime::months_between(
                &moment(2023, 11, 10, 0, 0, 0)?,
                &moment(2024, 2, 10, 0, 0, 0)?
            ),
            3
        );
        Ok(())
    }

    #[test]
    fn clearing() -> Result<(), InvalidFieldError> {
        let mut value = moment(2024, 5, 16, 14, 35, 59)?;
        value.add_millis(123);
        value.clear_milliseconds();
        assert_eq!(value.millisecond(), 0);
        assert_eq!(value.second(), 59);
        value.clear_seconds().clear_minutes().clear_hours();
        assert_eq!((value.hour(), value.minute(), value.second()), (0, 0, 0));
        assert_eq!((value.year(), value.month(), value.day()), (2024, 5, 16));

        let evening = moment(2024, 5, 16, 23, 59, 59)?;
        let midnight = evening.at_midnight();
        assert_eq!(evening.hour(), 23);
        assert_eq!((midnight.hour(), midnight.minute(), midnight.second()), (0, 0, 0));
        assert_eq!((midnight.year(), midnight.month(), midnight.day()), (2024, 5, 16));
        Ok(())
    }

    #[test]
    fn week_of_year() -> Result<(), Box<dyn std::error::Error>> {
        let value = moment(2024, 2, 15, 0, 0, 0)?;
        assert_eq!(value.week_of_year(1)?, 7);
        assert!(value.week_of_year(0).is_err());
        assert!(value.week_of_year(8).is_err());

        let sunday_start = DateTime::first_day_of_week_date(5, 2024, 1)?;
        assert_eq!((sunday_start.month(), sunday_start.day()), (1, 28));
        let monday_start = DateTime::first_day_of_week_date(5, 2024, 2)?;
        assert_eq!((monday_start.month(), monday_start.day()), (1, 29));
        assert!(DateTime::first_day_of_week_date(5, 2024, 0).is_err());
        Ok(())
    }

    #[test]
    fn first_day_of_month() -> Result<(), InvalidFieldError> {
        let value = moment(2021, 12, 22, 9, 30, 0)?;
        let first = value.first_day_of_month();
        assert_eq!((first.year(), first.month(), first.day()), (2021, 12, 1));
        assert_eq!(first.hour(), 9);
        Ok(())
    }

    #[test]
    fn display_zone_switch_preserves_instant() -> Result<(), Box<dyn std::error::Error>> {
        let base = moment(2024, 1, 15, 12, 0, 0)?;
        let jerusalem = base.to_time_zone("Asia/Jerusalem")?;
        assert_eq!(base.epoch_millis(), jerusalem.epoch_millis());
        // Israel standard time in January is +02:00
        assert_eq!(jerusalem.hour(), 14);
        assert!(base.to_time_zone("Middle/Nowhere").is_err());
        Ok(())
    }

    #[test]
    fn field_reinterpretation_moves_instant() -> Result<(), Box<dyn std::error::Error>> {
        let plus_two = Zone::Fixed(UtcOffset::from_seconds(7_200)?);
        let local = DateTime::new_in(plus_two, 2024, 1, 15, 12, 0, 0)?;
        let reinterpreted = local.to_utc_from_local();
        // the fields survive, the instant moves by the two hours
        assert_eq!(reinterpreted.hour(), 12);
        assert_eq!(
            reinterpreted.epoch_millis() - local.epoch_millis(),
            7_200_000
        );
        Ok(())
    }

    #[test]
    fn offset_conversions() -> Result<(), Box<dyn std::error::Error>> {
        // the documented example: 2020-10-10 10:00 at +03:00 is 07:00 UTC
        let value = moment(2020, 10, 10, 10, 0, 0)?;
        let utc_value = value.to_utc_using_offset("+03:00")?;
        assert_eq!(utc_value.hour(), 7);

        // and +03:00 to +05:00 lands on 12:00
        let shifted = moment(2020, 10, 10, 10, 0, 0)?.between_offsets("+03:00", "+05:00")?;
        assert_eq!(shifted.hour(), 12);

        let out = DateTime::utc_to_offset(moment(2020, 10, 10, 10, 0, 0)?, "+05:00")?;
        assert_eq!(out.hour(), 15);

        assert!(moment(2020, 10, 10, 10, 0, 0)?.to_utc_using_offset("oops").is_err());
        Ok(())
    }

    #[test]
    fn offset_round_trip() -> Result<(), Box<dyn std::error::Error>> {
        let value = moment(2024, 6, 1, 9, 30, 15)?;
        for offset in ["+03:00", "-02:30", "+00:00", "+05:30:15"] {
            let there_and_back = value
                .to_utc_using_offset(offset)?
                .between_offsets("+00:00", offset)?;
            assert_eq!(value, there_and_back, "round trip failed for {offset}");
        }
        Ok(())
    }

    #[test]
    fn zulu_conversions() -> Result<(), Box<dyn std::error::Error>> {
        let jerusalem: Zone = "Asia/Jerusalem".parse()?;
        assert_eq!(
            DateTime::zulu_to_zone_string(
                "2025-08-07T13:00:00.000Z",
                jerusalem,
                "yyyy-MM-dd HH:mm:ss"
            )?,
            "2025-08-07 16:00:00"
        );
        assert_eq!(
            DateTime::zone_string_to_zulu("2025-02-08T17:52:44+03:00")?,
            "2025-02-08T14:52:44Z"
        );
        assert_eq!(
            DateTime::zone_string_to_zulu("2025-02-08T17:52:44.250Z")?,
            "2025-02-08T17:52:44.250Z"
        );
        assert!(DateTime::zone_string_to_zulu("not an instant").is_err());
        Ok(())
    }

    #[test]
    fn parse_and_format_round_trip() -> Result<(), Box<dyn std::error::Error>> {
        let pattern = "yyyy-MM-dd HH:mm:ss";
        let value = DateTime::new(2024, 5, 16, 14, 5, 59)?;
        let rendered = value.format(pattern);
        let reparsed = DateTime::parse(&rendered, None)?;
        assert_eq!(reparsed.compare(&value, false), Ordering::Equal);

        let explicit = DateTime::parse_with(&rendered, pattern)?;
        assert_eq!(explicit.compare(&value, false), Ordering::Equal);
        Ok(())
    }

    #[test]
    fn parse_detects_day_first() -> Result<(), ParseError> {
        let value = DateTime::parse("31/01/2024", None)?;
        assert_eq!((value.year(), value.month(), value.day()), (2024, 1, 31));

        let hinted = DateTime::parse("01/02/2024", Some(true))?;
        assert_eq!((hinted.month(), hinted.day()), (1, 2));

        let unhinted = DateTime::parse("01/02/2024", None)?;
        assert_eq!((unhinted.month(), unhinted.day()), (2, 1));

        assert!(DateTime::parse("", None).is_err());
        assert!(DateTime::parse("not a date", None).is_err());
        assert!(DateTime::parse("2023-02-29", None).is_err());
        Ok(())
    }

    #[test]
    fn canned_formats() -> Result<(), InvalidFieldError> {
        let value = moment(2001, 5, 16, 14, 5, 59)?;
        assert_eq!(value.to_long_date_string(), "Wednesday, May 16, 2001");
        assert_eq!(
            value.to_long_date_time_string(),
            "Wednesday, May 16, 2001 2:05:59 PM"
        );
        assert_eq!(value.to_long_time_string(), "2:05:59 PM");
        assert_eq!(value.to_short_date_string(true), "5/16/2001");
        assert_eq!(value.to_short_date_string(false), "16/5/2001");
        assert_eq!(value.to_short_date_time_string(true), "5/16/2001 2:05 PM");
        assert_eq!(value.to_short_date_time_string(false), "16/5/2001 2:05 PM");
        assert_eq!(value.to_short_time_string(), "2:05 PM");
        assert_eq!(value.to_string(), "2001-05-16 14:05:59");
        Ok(())
    }

    #[test]
    fn canned_formats_round_trip_through_detection() -> Result<(), Box<dyn std::error::Error>> {
        let value = DateTime::new(2001, 5, 16, 14, 5, 59)?;
        let long_date_time = value.to_long_date_time_string();
        let reparsed = DateTime::parse(&long_date_time, None)?;
        assert_eq!(reparsed.compare(&value, false), Ordering::Equal);

        let short_date = value.to_short_date_string(false);
        let reparsed = DateTime::parse(&short_date, None)?;
        assert_eq!((reparsed.year(), reparsed.month(), reparsed.day()), (2001, 5, 16));
        Ok(())
    }

    #[test]
    fn epoch_constructors() {
        let value = DateTime::from_epoch_millis_in(0, utc());
        assert_eq!((value.year(), value.month(), value.day()), (1970, 1, 1));
        let value = DateTime::from_epoch_seconds(1_700_000_000);
        assert_eq!(value.epoch_millis(), 1_700_000_000_000);
        assert_eq!(value.epoch_seconds(), 1_700_000_000);
    }

    #[test]
    fn today_is_at_midnight() {
        let today = DateTime::today();
        assert_eq!(today.hour(), 0);
        assert_eq!(today.minute(), 0);
        assert_eq!(today.second(), 0);
        assert_eq!(today.millisecond(), 0);
        let now = DateTime::now();
        assert!(today <= now);
        assert_eq!(DateTime::days_between(&today, &now), 0);
    }
}
