#![doc = include_str!("../README.md")]
#![doc(test(attr(deny(warnings))))]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![allow(clippy::return_self_not_must_use)]

mod calendar;
mod date_time;
mod detect;
mod duration;
mod epoch;
mod format;
mod zone;

pub use self::calendar::{
    InvalidArgumentError, InvalidFieldError, Month, UnknownNameError, Weekday, days_in_month,
    is_leap_year,
};
pub use self::date_time::DateTime;
pub use self::detect::{UnrecognizedFormatError, detect, is_month_first_pattern};
pub use self::duration::{Duration, DurationOverflowError, ParseOffsetError, Sign};
pub use self::epoch::{
    TimeUnit, date_in_days_from_today, day_of, day_of_week_of, day_of_week_today,
    difference_in_unit, epoch_to_string, epoch_to_string_in_zone, first_day_of_month_of,
    is_in_range, millis_to_unit, month_of, now_epoch_millis, reformat, reformat_with,
    shift_epoch_days, shift_epoch_hours, string_to_epoch_millis, today_string, unique_timestamp,
    year_of,
};
pub use self::format::ParseError;
pub use self::zone::{UnknownZoneError, UtcOffset, Zone};
