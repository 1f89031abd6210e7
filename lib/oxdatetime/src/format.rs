#![expect(clippy::expect_used)]

//! Pattern-token formatting and parsing.
//!
//! The token grammar follows the common date-format conventions: runs of a
//! pattern letter select a field and a width (`yyyy`, `MM`, `dd`, `HH`,
//! `mm`, `ss`, `SSS`, `h`, `a`, `EEEE`, `MMMM`, ...), `'...'` quotes literal
//! text and any other character stands for itself. Unrecognized letters pass
//! through as literals.
//!
//! When parsing, a numeric token abutting another numeric token consumes
//! exactly its pattern width (`yyyyMMdd`); elsewhere it consumes greedily up
//! to the field's natural width, so `d/M/yyyy` and `dd/MM/yyyy` accept the
//! same strings.

use crate::calendar::{
    self, InvalidFieldError, MILLIS_PER_DAY, MILLIS_PER_HOUR, MILLIS_PER_MINUTE, MILLIS_PER_SECOND,
    Month, Weekday,
};
use crate::detect::UnrecognizedFormatError;
use crate::zone::{UtcOffset, Zone};
use std::str::FromStr;

/// Calendar fields projected out of an instant, ready for rendering.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Civil {
    pub year: i32,
    pub month: u8,
    pub day: u8,
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
    pub millisecond: u16,
    pub weekday: u8,
}

/// Projects the calendar fields of an instant as displayed in a zone.
#[expect(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
#[must_use]
pub(crate) fn civil_at(epoch_millis: i64, zone: Zone) -> Civil {
    let offset = zone.offset_seconds_at(epoch_millis);
    let local = epoch_millis.saturating_add(i64::from(offset) * 1_000);
    let days = local.div_euclid(MILLIS_PER_DAY);
    let (year, month, day) = calendar::civil_from_epoch_days(days);
    let millis_of_day = local.rem_euclid(MILLIS_PER_DAY);
    Civil {
        year,
        month,
        day,
        hour: (millis_of_day / MILLIS_PER_HOUR) as u8,
        minute: (millis_of_day / MILLIS_PER_MINUTE % 60) as u8,
        second: (millis_of_day / MILLIS_PER_SECOND % 60) as u8,
        millisecond: (millis_of_day % 1_000) as u16,
        weekday: calendar::day_of_week_from_epoch_days(days),
    }
}

/// Fields recovered from an input string. Anything the pattern does not
/// mention keeps the epoch default.
#[derive(Debug, Clone, Copy)]
pub(crate) struct ParsedFields {
    pub year: i32,
    pub month: u8,
    pub day: u8,
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
    pub millisecond: u16,
    /// The pattern carried a literal Zulu marker, so the fields are UTC.
    pub utc: bool,
}

impl ParsedFields {
    pub(crate) fn into_civil(self) -> Civil {
        let days = calendar::epoch_days_from_civil(self.year, self.month, self.day);
        Civil {
            year: self.year,
            month: self.month,
            day: self.day,
            hour: self.hour,
            minute: self.minute,
            second: self.second,
            millisecond: self.millisecond,
            weekday: calendar::day_of_week_from_epoch_days(days),
        }
    }

    /// Lays the fields out as wall-clock milliseconds and anchors them in
    /// the zone the pattern implies (UTC for Zulu-marked patterns, the
    /// process zone otherwise).
    pub(crate) fn resolve(self) -> i64 {
        let zone = if self.utc { Zone::utc() } else { Zone::local() };
        self.resolve_in(zone)
    }

    pub(crate) fn resolve_in(self, zone: Zone) -> i64 {
        let wall = calendar::epoch_days_from_civil(self.year, self.month, self.day)
            .saturating_mul(MILLIS_PER_DAY)
            .saturating_add(
                i64::from(self.hour) * MILLIS_PER_HOUR
                    + i64::from(self.minute) * MILLIS_PER_MINUTE
                    + i64::from(self.second) * MILLIS_PER_SECOND
                    + i64::from(self.millisecond),
            );
        zone.resolve_wall_millis(wall)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Token<'a> {
    Field { letter: char, len: usize },
    Literal(&'a str),
}

const FIELD_LETTERS: &str = "yMdEHhmsSa";

fn lex_pattern(pattern: &str) -> Vec<Token<'_>> {
    let mut tokens = Vec::new();
    let bytes = pattern.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        let c = char::from(bytes[i]);
        if c.is_ascii_alphabetic() && FIELD_LETTERS.contains(c) {
            let start = i;
            while i < bytes.len() && bytes[i] == bytes[start] {
                i += 1;
            }
            tokens.push(Token::Field {
                letter: c,
                len: i - start,
            });
        } else if c == '\'' {
            i += 1;
            let start = i;
            while i < bytes.len() && bytes[i] != b'\'' {
                i += 1;
            }
            if i == start {
                tokens.push(Token::Literal("'"));
            } else {
                tokens.push(Token::Literal(&pattern[start..i]));
            }
            if i < bytes.len() {
                i += 1;
            }
        } else {
            let start = i;
            while i < bytes.len() {
                let c = char::from(bytes[i]);
                if c == '\'' || (c.is_ascii_alphabetic() && FIELD_LETTERS.contains(c)) {
                    break;
                }
                i += 1;
            }
            tokens.push(Token::Literal(&pattern[start..i]));
        }
    }
    tokens
}

/// Renders calendar fields with a token pattern.
#[must_use]
pub(crate) fn format_civil(civil: &Civil, pattern: &str) -> String {
    let mut out = String::with_capacity(pattern.len() + 8);
    for token in lex_pattern(pattern) {
        match token {
            Token::Literal(text) => out.push_str(text),
            Token::Field { letter, len } => format_field(&mut out, civil, letter, len),
        }
    }
    out
}

fn format_field(out: &mut String, civil: &Civil, letter: char, len: usize) {
    let month = Month::from_number(civil.month).unwrap_or(Month::January);
    let weekday = Weekday::from_number(civil.weekday).unwrap_or(Weekday::Sunday);
    match letter {
        'y' => {
            if len == 2 {
                push_padded(out, civil.year.rem_euclid(100).unsigned_abs(), 2);
            } else {
                if civil.year < 0 {
                    out.push('-');
                }
                push_padded(out, civil.year.unsigned_abs(), len.max(4));
            }
        }
        'M' => match len {
            1 | 2 => push_padded(out, u32::from(civil.month), len),
            3 => out.push_str(month.abbreviated()),
            _ => out.push_str(month.name()),
        },
        'd' => push_padded(out, u32::from(civil.day), len),
        'E' => {
            if len < 4 {
                out.push_str(weekday.abbreviated());
            } else {
                out.push_str(weekday.name());
            }
        }
        'H' => push_padded(out, u32::from(civil.hour), len),
        'h' => {
            let half_day_hour = match civil.hour % 12 {
                0 => 12,
                hour => hour,
            };
            push_padded(out, u32::from(half_day_hour), len);
        }
        'm' => push_padded(out, u32::from(civil.minute), len),
        's' => push_padded(out, u32::from(civil.second), len),
        'S' => push_padded(out, u32::from(civil.millisecond), len),
        'a' => out.push_str(if civil.hour < 12 { "AM" } else { "PM" }),
        _ => {}
    }
}

fn push_padded(out: &mut String, value: u32, width: usize) {
    let digits = value.to_string();
    for _ in digits.len()..width {
        out.push('0');
    }
    out.push_str(&digits);
}

/// Parses an input string with a token pattern into raw calendar fields.
///
/// The shape must match exactly; field values out of range surface as an
/// [`InvalidFieldError`]-carrying [`ParseError`].
#[expect(clippy::cast_possible_truncation)]
pub(crate) fn parse_civil(input: &str, pattern: &str) -> Result<ParsedFields, ParseError> {
    tracing::debug!(input, pattern, "parsing date string");
    let tokens = lex_pattern(pattern);
    let mut rest = input;
    let mut fields = ParsedFields {
        year: 1970,
        month: 1,
        day: 1,
        hour: 0,
        minute: 0,
        second: 0,
        millisecond: 0,
        utc: false,
    };
    let mut half_day_hour: Option<u32> = None;
    let mut past_noon = false;

    for (i, token) in tokens.iter().enumerate() {
        match *token {
            Token::Literal(text) => {
                rest = rest.strip_prefix(text).ok_or_else(|| {
                    ParseError::syntax(input, pattern, "the literal text does not match")
                })?;
                if text == "Z" {
                    fields.utc = true;
                }
            }
            Token::Field { letter: 'M', len } if len >= 3 => {
                let (word, remaining) = split_alpha(rest);
                fields.month = Month::from_str(word)
                    .map_err(|_| ParseError::syntax(input, pattern, "unknown month name"))?
                    .number();
                rest = remaining;
            }
            Token::Field { letter: 'E', .. } => {
                let (word, remaining) = split_alpha(rest);
                // The weekday is display-only; the date fields decide the day
                Weekday::from_str(word)
                    .map_err(|_| ParseError::syntax(input, pattern, "unknown weekday name"))?;
                rest = remaining;
            }
            Token::Field { letter: 'a', .. } => {
                let (word, remaining) = split_alpha(rest);
                if word.eq_ignore_ascii_case("PM") {
                    past_noon = true;
                } else if !word.eq_ignore_ascii_case("AM") {
                    return Err(ParseError::syntax(
                        input,
                        pattern,
                        "expected an AM or PM marker",
                    ));
                }
                rest = remaining;
            }
            Token::Field { letter, len } => {
                let abutting = matches!(
                    tokens.get(i + 1),
                    Some(Token::Field { letter: next, len: next_len })
                        if is_numeric_field(*next, *next_len)
                );
                let (digits, remaining) = if abutting {
                    let (digits, remaining) = split_digits(rest, len);
                    if digits.len() != len {
                        return Err(ParseError::syntax(
                            input,
                            pattern,
                            "expected a fixed-width number",
                        ));
                    }
                    (digits, remaining)
                } else {
                    let (digits, remaining) = split_digits(rest, natural_width(letter, len));
                    if digits.is_empty() {
                        return Err(ParseError::syntax(input, pattern, "expected a number"));
                    }
                    (digits, remaining)
                };
                rest = remaining;
                let value = u32::from_str(digits).expect("valid integer");
                apply_numeric_field(&mut fields, &mut half_day_hour, letter, len, value);
            }
        }
    }
    if !rest.is_empty() {
        return Err(ParseError::syntax(
            input,
            pattern,
            "unexpected trailing characters",
        ));
    }

    if let Some(half_day_hour) = half_day_hour {
        if !(1..=12).contains(&half_day_hour) {
            return Err(ParseError::syntax(
                input,
                pattern,
                "the clock hour must be between 1 and 12",
            ));
        }
        fields.hour = ((half_day_hour % 12) + if past_noon { 12 } else { 0 }) as u8;
    }

    calendar::validate_civil_fields(
        fields.year,
        fields.month,
        fields.day,
        fields.hour,
        fields.minute,
        fields.second,
    )
    .map_err(|source| ParseError::field(input, pattern, source))?;
    Ok(fields)
}

const fn is_numeric_field(letter: char, len: usize) -> bool {
    match letter {
        'y' | 'd' | 'H' | 'h' | 'm' | 's' | 'S' => true,
        'M' => len <= 2,
        _ => false,
    }
}

const fn natural_width(letter: char, len: usize) -> usize {
    match letter {
        'y' => {
            if len >= 3 {
                4
            } else {
                2
            }
        }
        'S' => 3,
        _ => 2,
    }
}

#[expect(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
fn apply_numeric_field(
    fields: &mut ParsedFields,
    half_day_hour: &mut Option<u32>,
    letter: char,
    len: usize,
    value: u32,
) {
    match letter {
        'y' => {
            fields.year = if len == 2 {
                // Two-digit years pivot on 70, the Unix epoch decade
                if value < 70 {
                    2_000 + value as i32
                } else {
                    1_900 + value as i32
                }
            } else {
                value as i32
            };
        }
        'M' => fields.month = value.min(99) as u8,
        'd' => fields.day = value.min(99) as u8,
        'H' => fields.hour = value.min(99) as u8,
        'h' => *half_day_hour = Some(value),
        'm' => fields.minute = value.min(99) as u8,
        's' => fields.second = value.min(99) as u8,
        'S' => fields.millisecond = value.min(999) as u16,
        _ => {}
    }
}

fn split_digits(input: &str, max: usize) -> (&str, &str) {
    let mut end = 0;
    for byte in input.bytes() {
        if end >= max || !byte.is_ascii_digit() {
            break;
        }
        end += 1;
    }
    input.split_at(end)
}

fn split_alpha(input: &str) -> (&str, &str) {
    let mut end = 0;
    for byte in input.bytes() {
        if !byte.is_ascii_alphabetic() {
            break;
        }
        end += 1;
    }
    input.split_at(end)
}

/// Parses an RFC 3339-style instant string (`2025-08-07T13:00:00.000Z`,
/// `2025-02-08T17:52:44+03:00`) to epoch milliseconds.
pub(crate) fn parse_instant(input: &str) -> Result<i64, ParseError> {
    const SHAPE: &str = "yyyy-MM-dd'T'HH:mm:ss[.SSS](Z|[+|-]HH:MM)";
    let syntax = |message| ParseError::syntax(input, SHAPE, message);

    let (year_digits, rest) = split_digits(input, 4);
    if year_digits.len() != 4 {
        return Err(syntax("the year must be encoded on 4 digits"));
    }
    let year = i32::from_str(year_digits).expect("valid integer");
    let rest = expect_char(rest, '-').ok_or_else(|| syntax("expected '-' after the year"))?;
    let (month, rest) = two_digits(rest).ok_or_else(|| syntax("expected a 2-digit month"))?;
    let rest = expect_char(rest, '-').ok_or_else(|| syntax("expected '-' after the month"))?;
    let (day, rest) = two_digits(rest).ok_or_else(|| syntax("expected a 2-digit day"))?;
    let rest = expect_char(rest, 'T').ok_or_else(|| syntax("expected 'T' after the date"))?;
    let (hour, rest) = two_digits(rest).ok_or_else(|| syntax("expected a 2-digit hour"))?;
    let rest = expect_char(rest, ':').ok_or_else(|| syntax("expected ':' after the hour"))?;
    let (minute, rest) = two_digits(rest).ok_or_else(|| syntax("expected 2-digit minutes"))?;
    let rest = expect_char(rest, ':').ok_or_else(|| syntax("expected ':' after the minutes"))?;
    let (second, rest) = two_digits(rest).ok_or_else(|| syntax("expected 2-digit seconds"))?;

    let (millisecond, rest) = if let Some(after_dot) = rest.strip_prefix('.') {
        let (fraction, rest) = split_digits(after_dot, 9);
        if fraction.is_empty() {
            return Err(syntax("expected fraction digits after '.'"));
        }
        let mut millis = 0_u16;
        for (i, byte) in fraction.bytes().take(3).enumerate() {
            millis += u16::from(byte - b'0') * [100, 10, 1][i];
        }
        (millis, rest)
    } else {
        (0, rest)
    };

    let (offset_seconds, rest) = if let Some(rest) = rest.strip_prefix('Z') {
        (0, rest)
    } else if rest.starts_with('+') || rest.starts_with('-') {
        let offset = UtcOffset::from_str(rest)
            .map_err(|_| syntax("malformed zone offset designator"))?;
        (offset.seconds(), "")
    } else {
        return Err(syntax("missing zone designator"));
    };
    if !rest.is_empty() {
        return Err(syntax("unexpected trailing characters"));
    }

    calendar::validate_civil_fields(year, month, day, hour, minute, second)
        .map_err(|source| ParseError::field(input, SHAPE, source))?;
    let wall = calendar::epoch_days_from_civil(year, month, day)
        .saturating_mul(MILLIS_PER_DAY)
        .saturating_add(
            i64::from(hour) * MILLIS_PER_HOUR
                + i64::from(minute) * MILLIS_PER_MINUTE
                + i64::from(second) * MILLIS_PER_SECOND
                + i64::from(millisecond),
        );
    Ok(wall.saturating_sub(i64::from(offset_seconds) * 1_000))
}

/// Renders an instant as a Zulu string, with milliseconds only when present.
#[must_use]
pub(crate) fn format_instant_zulu(epoch_millis: i64) -> String {
    let civil = civil_at(epoch_millis, Zone::utc());
    if civil.millisecond == 0 {
        format_civil(&civil, "yyyy-MM-dd'T'HH:mm:ss'Z'")
    } else {
        format_civil(&civil, "yyyy-MM-dd'T'HH:mm:ss.SSS'Z'")
    }
}

fn expect_char(input: &str, expected: char) -> Option<&str> {
    input.strip_prefix(expected)
}

fn two_digits(input: &str) -> Option<(u8, &str)> {
    let (digits, rest) = split_digits(input, 2);
    if digits.len() != 2 {
        return None;
    }
    Some((u8::from_str(digits).expect("valid integer"), rest))
}

/// A date string that did not parse under the pattern attempted.
#[derive(Debug, Clone, thiserror::Error)]
#[error(transparent)]
pub struct ParseError(#[from] ParseErrorKind);

#[derive(Debug, Clone, thiserror::Error)]
enum ParseErrorKind {
    #[error(transparent)]
    Unrecognized(UnrecognizedFormatError),
    #[error("failed to parse date string {input:?} with pattern {pattern:?}: {message}")]
    Syntax {
        input: String,
        pattern: String,
        message: &'static str,
    },
    #[error("failed to parse date string {input:?} with pattern {pattern:?}: {source}")]
    Field {
        input: String,
        pattern: String,
        source: InvalidFieldError,
    },
}

impl ParseError {
    pub(crate) fn syntax(input: &str, pattern: &str, message: &'static str) -> Self {
        Self(ParseErrorKind::Syntax {
            input: input.into(),
            pattern: pattern.into(),
            message,
        })
    }

    pub(crate) fn field(input: &str, pattern: &str, source: InvalidFieldError) -> Self {
        Self(ParseErrorKind::Field {
            input: input.into(),
            pattern: pattern.into(),
            source,
        })
    }
}

impl From<UnrecognizedFormatError> for ParseError {
    fn from(error: UnrecognizedFormatError) -> Self {
        Self(ParseErrorKind::Unrecognized(error))
    }
}
