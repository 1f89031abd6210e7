use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::Neg;
use std::str::FromStr;
use std::time::Duration as StdDuration;

/// A signed span of time with millisecond precision.
///
/// The decomposed accessors (`hours`, `minutes`, `seconds`, the `total_*`
/// family) are always derived from the single millisecond count, so they
/// cannot drift apart. A value parsed from an offset string remembers its
/// explicit sign prefix for round-tripping; the prefix never participates in
/// equality or ordering.
#[derive(Debug, Clone, Copy, Default)]
pub struct Duration {
    millis: i64,
    explicit_sign: Option<Sign>,
}

/// An explicit sign prefix on a parsed offset string.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash)]
pub enum Sign {
    Plus,
    Minus,
}

impl Duration {
    /// A span from a raw signed millisecond count.
    #[inline]
    #[must_use]
    pub const fn from_millis(millis: i64) -> Self {
        Self {
            millis,
            explicit_sign: None,
        }
    }

    /// A span from a raw signed second count.
    #[inline]
    #[must_use]
    pub const fn from_seconds(seconds: i64) -> Self {
        Self::from_millis(seconds.saturating_mul(1_000))
    }

    /// Parses a `[+|-]HH:MM[:SS]` string, the shape used both for UTC offsets
    /// and for plain elapsed time.
    ///
    /// A `-` prefix yields a negative span: `-02:30` has a total of -9000
    /// seconds. The hour part is unbounded so elapsed times like `26:10`
    /// parse; minutes and seconds must stay under 60.
    pub fn from_offset_str(input: &str) -> Result<Self, ParseOffsetError> {
        let (explicit_sign, rest) = match input.as_bytes().first() {
            Some(b'+') => (Some(Sign::Plus), &input[1..]),
            Some(b'-') => (Some(Sign::Minus), &input[1..]),
            Some(_) => (None, input),
            None => return Err(ParseOffsetError::msg("the offset string is empty")),
        };
        let mut parts = rest.split(':');
        let hours = offset_part(parts.next(), "the hour part is missing")?;
        let minutes = offset_part(parts.next(), "the minutes part is missing")?;
        if minutes > 59 {
            return Err(ParseOffsetError(ParseOffsetErrorKind::MinutesRange(
                minutes,
            )));
        }
        let seconds = match parts.next() {
            Some(part) => {
                let seconds = offset_part(Some(part), "the seconds part is empty")?;
                if seconds > 59 {
                    return Err(ParseOffsetError(ParseOffsetErrorKind::SecondsRange(
                        seconds,
                    )));
                }
                seconds
            }
            None => 0,
        };
        if parts.next().is_some() {
            return Err(ParseOffsetError::msg(
                "the offset string has too many ':' separated parts",
            ));
        }
        let total_seconds = hours
            .saturating_mul(3_600)
            .saturating_add(minutes * 60)
            .saturating_add(seconds);
        let millis = if explicit_sign == Some(Sign::Minus) {
            total_seconds.saturating_mul(-1_000)
        } else {
            total_seconds.saturating_mul(1_000)
        };
        Ok(Self {
            millis,
            explicit_sign,
        })
    }

    /// Total signed milliseconds.
    #[inline]
    #[must_use]
    pub const fn as_millis(self) -> i64 {
        self.millis
    }

    /// Total whole seconds, truncated toward zero.
    #[inline]
    #[must_use]
    pub const fn total_seconds(self) -> i64 {
        self.millis / 1_000
    }

    /// Total whole minutes, truncated toward zero.
    #[inline]
    #[must_use]
    pub const fn total_minutes(self) -> i64 {
        self.millis / 60_000
    }

    /// Total whole hours, truncated toward zero.
    #[inline]
    #[must_use]
    pub const fn total_hours(self) -> i64 {
        self.millis / 3_600_000
    }

    /// Hour component of the decomposition.
    #[inline]
    #[must_use]
    pub const fn hours(self) -> i64 {
        self.total_seconds() / 3_600
    }

    /// Minute component of the decomposition, 0-59 in magnitude.
    #[inline]
    #[must_use]
    pub const fn minutes(self) -> i64 {
        self.total_seconds() % 3_600 / 60
    }

    /// Second component of the decomposition, 0-59 in magnitude.
    #[inline]
    #[must_use]
    pub const fn seconds(self) -> i64 {
        self.total_seconds() % 60
    }

    /// The span in seconds, keeping the millisecond fraction.
    #[expect(clippy::cast_precision_loss)]
    #[inline]
    #[must_use]
    pub fn seconds_f64(self) -> f64 {
        self.millis as f64 / 1_000.
    }

    /// The sign prefix recorded when this span was parsed from an offset
    /// string, if any.
    #[inline]
    #[must_use]
    pub const fn explicit_sign(self) -> Option<Sign> {
        self.explicit_sign
    }

    #[inline]
    #[must_use]
    pub const fn is_negative(self) -> bool {
        self.millis < 0
    }
}

fn offset_part(part: Option<&str>, missing: &'static str) -> Result<i64, ParseOffsetError> {
    let Some(part) = part else {
        return Err(ParseOffsetError::msg(missing));
    };
    if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ParseOffsetError::msg(
            "the offset parts must be unsigned numbers",
        ));
    }
    i64::from_str(part)
        .map_err(|_| ParseOffsetError::msg("the offset part does not fit a number"))
}

impl PartialEq for Duration {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.millis == other.millis
    }
}

impl Eq for Duration {}

impl PartialOrd for Duration {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Duration {
    #[inline]
    fn cmp(&self, other: &Self) -> Ordering {
        self.millis.cmp(&other.millis)
    }
}

impl Hash for Duration {
    #[inline]
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.millis.hash(state);
    }
}

impl Neg for Duration {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Self {
            millis: self.millis.saturating_neg(),
            explicit_sign: match self.explicit_sign {
                Some(Sign::Plus) => Some(Sign::Minus),
                Some(Sign::Minus) => Some(Sign::Plus),
                None => None,
            },
        }
    }
}

impl TryFrom<StdDuration> for Duration {
    type Error = DurationOverflowError;

    #[inline]
    fn try_from(value: StdDuration) -> Result<Self, DurationOverflowError> {
        Ok(Self::from_millis(
            i64::try_from(value.as_millis()).map_err(|_| DurationOverflowError)?,
        ))
    }
}

impl FromStr for Duration {
    type Err = ParseOffsetError;

    fn from_str(input: &str) -> Result<Self, ParseOffsetError> {
        Self::from_offset_str(input)
    }
}

impl fmt::Display for Duration {
    /// Renders the decomposed magnitude as `[+|-]HH:MM:SS`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.millis < 0 {
            "-"
        } else if self.explicit_sign == Some(Sign::Plus) {
            "+"
        } else {
            ""
        };
        let total = self.total_seconds().unsigned_abs();
        write!(
            f,
            "{sign}{:02}:{:02}:{:02}",
            total / 3_600,
            total % 3_600 / 60,
            total % 60
        )
    }
}

/// A malformed `[+|-]HH:MM[:SS]` offset string.
#[derive(Debug, Clone, thiserror::Error)]
#[error(transparent)]
pub struct ParseOffsetError(#[from] ParseOffsetErrorKind);

#[derive(Debug, Clone, thiserror::Error)]
enum ParseOffsetErrorKind {
    #[error("{0}")]
    Message(&'static str),
    #[error("the offset minutes must be between 0-59, received: {0}")]
    MinutesRange(i64),
    #[error("the offset seconds must be between 0-59, received: {0}")]
    SecondsRange(i64),
    #[error("the offset must be within \u{b1}18:00, received: {0} seconds")]
    OffsetRange(i64),
}

impl ParseOffsetError {
    pub(crate) const fn msg(message: &'static str) -> Self {
        Self(ParseOffsetErrorKind::Message(message))
    }

    pub(crate) const fn out_of_range(seconds: i64) -> Self {
        Self(ParseOffsetErrorKind::OffsetRange(seconds))
    }
}

/// An elapsed time too large to represent with signed milliseconds.
#[derive(Debug, Clone, Copy, thiserror::Error)]
#[error("overflow converting an elapsed time to a duration")]
pub struct DurationOverflowError;

#[cfg(test)]
#[expect(clippy::panic_in_result_fn)]
mod tests {
    use super::*;

    #[test]
    fn from_offset_str() -> Result<(), ParseOffsetError> {
        assert_eq!(Duration::from_offset_str("+01:00")?.total_seconds(), 3_600);
        assert_eq!(Duration::from_offset_str("-02:30")?.total_seconds(), -9_000);
        assert_eq!(Duration::from_offset_str("02:30")?.total_seconds(), 9_000);
        assert_eq!(
            Duration::from_offset_str("+05:30:15")?.total_seconds(),
            19_815
        );
        assert_eq!(Duration::from_offset_str("26:10")?.total_hours(), 26);
        assert_eq!(
            Duration::from_offset_str("-00:00:01")?.total_seconds(),
            -1
        );
        Ok(())
    }

    #[test]
    fn from_offset_str_errors() {
        assert!(Duration::from_offset_str("").is_err());
        assert!(Duration::from_offset_str("+").is_err());
        assert!(Duration::from_offset_str("02").is_err());
        assert!(Duration::from_offset_str("02:").is_err());
        assert!(Duration::from_offset_str("aa:30").is_err());
        assert!(Duration::from_offset_str("02:60").is_err());
        assert!(Duration::from_offset_str("02:30:60").is_err());
        assert!(Duration::from_offset_str("02:30:15:01").is_err());
        assert!(Duration::from_offset_str("-2:-30").is_err());
    }

    #[test]
    fn decomposition() {
        let span = Duration::from_millis(93_784_512);
        assert_eq!(span.total_hours(), 26);
        assert_eq!(span.total_minutes(), 1_563);
        assert_eq!(span.total_seconds(), 93_784);
        assert_eq!(span.hours(), 26);
        assert_eq!(span.minutes(), 3);
        assert_eq!(span.seconds(), 4);
        assert_eq!(span.as_millis(), 93_784_512);

        let negative = Duration::from_millis(-9_000_000);
        assert_eq!(negative.hours(), -2);
        assert_eq!(negative.minutes(), -30);
        assert_eq!(negative.seconds(), 0);
        assert!(negative.is_negative());
    }

    #[test]
    fn explicit_sign() -> Result<(), ParseOffsetError> {
        assert_eq!(
            Duration::from_offset_str("+01:00")?.explicit_sign(),
            Some(Sign::Plus)
        );
        assert_eq!(
            Duration::from_offset_str("-01:00")?.explicit_sign(),
            Some(Sign::Minus)
        );
        assert_eq!(Duration::from_offset_str("01:00")?.explicit_sign(), None);
        assert_eq!(Duration::from_millis(42).explicit_sign(), None);
        // the prefix is presentation metadata, not part of the value
        assert_eq!(
            Duration::from_offset_str("+01:00")?,
            Duration::from_offset_str("01:00")?
        );
        Ok(())
    }

    #[test]
    fn display() -> Result<(), ParseOffsetError> {
        assert_eq!(Duration::from_offset_str("-02:30")?.to_string(), "-02:30:00");
        assert_eq!(Duration::from_offset_str("+01:00")?.to_string(), "+01:00:00");
        assert_eq!(Duration::from_millis(93_784_512).to_string(), "26:03:04");
        assert_eq!(Duration::from_millis(-1_000).to_string(), "-00:00:01");
        Ok(())
    }

    #[test]
    fn negation() -> Result<(), ParseOffsetError> {
        let span = Duration::from_offset_str("+02:00")?;
        assert_eq!((-span).total_seconds(), -7_200);
        assert_eq!((-span).explicit_sign(), Some(Sign::Minus));
        Ok(())
    }

    #[test]
    fn from_std_duration() -> Result<(), DurationOverflowError> {
        let span = Duration::try_from(StdDuration::from_millis(1_500))?;
        assert_eq!(span.as_millis(), 1_500);
        assert_eq!(span.seconds_f64(), 1.5);
        assert!(Duration::try_from(StdDuration::from_secs(u64::MAX)).is_err());
        Ok(())
    }
}
