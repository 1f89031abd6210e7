#![expect(clippy::expect_used)]

//! Recognition of date strings against a fixed pattern catalog.
//!
//! Detection is deterministic: the catalog is scanned in order and the first
//! matching shape wins. For shapes where the two leading number slots could
//! be either day-first or month-first, the tie-break is:
//!
//! 1. a slot reading that would put an impossible value in the day or month
//!    position is discarded (`31/01` cannot be month-first, `01/31` cannot
//!    be day-first);
//! 2. if both readings stay possible, an explicit month-first hint decides;
//! 3. with no hint, the day-first (non-US) reading wins.
//!
//! A shape whose slots fit neither reading is not a match at all, so
//! detection fails instead of guessing.

use regex::Regex;
use std::sync::LazyLock;

/// Shape table: anchored regex, day-first pattern, month-first pattern for
/// the shapes with an ambiguous day/month pair. The two leading capture
/// groups of an ambiguous shape are its day/month slots.
const CATALOG: &[(&str, &str, Option<&str>)] = &[
    // compact digit blocks
    (r"^\d{8}$", "yyyyMMdd", None),
    (r"^\d{8} \d{6}$", "ddMMyyyy HHmmss", None),
    (r"^\d{14}$", "yyyyMMddHHmmss", None),
    // ISO-like, year first
    (r"^\d{4}-\d{1,2}-\d{1,2}$", "yyyy-MM-dd", None),
    (r"^\d{4}-\d{1,2}-\d{1,2} \d{1,2}:\d{2}$", "yyyy-MM-dd HH:mm", None),
    (
        r"^\d{4}-\d{1,2}-\d{1,2} \d{1,2}:\d{2}:\d{2}$",
        "yyyy-MM-dd HH:mm:ss",
        None,
    ),
    (
        r"^\d{4}-\d{1,2}-\d{1,2} \d{1,2}:\d{2}:\d{2}\.\d{1,3}$",
        "yyyy-MM-dd HH:mm:ss.SSS",
        None,
    ),
    (
        r"^\d{4}-\d{1,2}-\d{1,2}T\d{1,2}:\d{2}:\d{2}$",
        "yyyy-MM-dd'T'HH:mm:ss",
        None,
    ),
    (
        r"^\d{4}-\d{1,2}-\d{1,2}T\d{1,2}:\d{2}:\d{2}Z$",
        "yyyy-MM-dd'T'HH:mm:ss'Z'",
        None,
    ),
    (
        r"^\d{4}-\d{1,2}-\d{1,2}T\d{1,2}:\d{2}:\d{2}\.\d{1,3}$",
        "yyyy-MM-dd'T'HH:mm:ss.SSS",
        None,
    ),
    (
        r"^\d{4}-\d{1,2}-\d{1,2}T\d{1,2}:\d{2}:\d{2}\.\d{1,3}Z$",
        "yyyy-MM-dd'T'HH:mm:ss.SSS'Z'",
        None,
    ),
    (r"^\d{4}/\d{1,2}/\d{1,2}$", "yyyy/MM/dd", None),
    // day and month slots separated by '-'
    (r"^(\d{1,2})-(\d{1,2})-\d{4}$", "dd-MM-yyyy", Some("MM-dd-yyyy")),
    (
        r"^(\d{1,2})-(\d{1,2})-\d{4} \d{1,2}:\d{2}$",
        "dd-MM-yyyy HH:mm",
        Some("MM-dd-yyyy HH:mm"),
    ),
    (
        r"^(\d{1,2})-(\d{1,2})-\d{4} \d{1,2}:\d{2}:\d{2}$",
        "dd-MM-yyyy HH:mm:ss",
        Some("MM-dd-yyyy HH:mm:ss"),
    ),
    // day and month slots separated by '/'
    (r"^(\d{1,2})/(\d{1,2})/\d{4}$", "dd/MM/yyyy", Some("MM/dd/yyyy")),
    (
        r"^(\d{1,2})/(\d{1,2})/\d{4} \d{1,2}:\d{2}$",
        "dd/MM/yyyy HH:mm",
        Some("MM/dd/yyyy HH:mm"),
    ),
    (
        r"^(\d{1,2})/(\d{1,2})/\d{4} \d{1,2}:\d{2}:\d{2}$",
        "dd/MM/yyyy HH:mm:ss",
        Some("MM/dd/yyyy HH:mm:ss"),
    ),
    (
        r"^(\d{1,2})/(\d{1,2})/\d{4} \d{1,2}:\d{2} [AaPp][Mm]$",
        "d/M/yyyy h:mm a",
        Some("M/d/yyyy h:mm a"),
    ),
    (
        r"^(\d{1,2})/(\d{1,2})/\d{4} \d{1,2}:\d{2}:\d{2} [AaPp][Mm]$",
        "d/M/yyyy h:mm:ss a",
        Some("M/d/yyyy h:mm:ss a"),
    ),
    // day and month slots separated by '.'
    (r"^(\d{1,2})\.(\d{1,2})\.\d{4}$", "dd.MM.yyyy", Some("MM.dd.yyyy")),
    // month names
    (r"^\d{1,2}-[A-Za-z]{3}-\d{4}$", "dd-MMM-yyyy", None),
    (r"^\d{1,2} [A-Za-z]{3,9} \d{4}$", "dd MMMM yyyy", None),
    (r"^[A-Za-z]{3,9} \d{1,2}, \d{4}$", "MMMM d, yyyy", None),
    (
        r"^[A-Za-z]{3,9}, [A-Za-z]{3,9} \d{1,2}, \d{4}$",
        "EEEE, MMMM d, yyyy",
        None,
    ),
    (
        r"^[A-Za-z]{3,9}, [A-Za-z]{3,9} \d{1,2}, \d{4} \d{1,2}:\d{2}:\d{2} [AaPp][Mm]$",
        "EEEE, MMMM d, yyyy h:mm:ss a",
        None,
    ),
];

struct Shape {
    regex: Regex,
    day_first: &'static str,
    month_first: Option<&'static str>,
}

static SHAPES: LazyLock<Vec<Shape>> = LazyLock::new(|| {
    CATALOG
        .iter()
        .map(|&(shape, day_first, month_first)| Shape {
            regex: Regex::new(shape).expect("valid catalog regex"),
            day_first,
            month_first,
        })
        .collect()
});

/// Determines which catalog pattern a date string is written in.
///
/// `month_first` disambiguates shapes where both the day-first and the
/// month-first reading stay possible; it is ignored everywhere else. The
/// result only depends on the input string and the hint.
pub fn detect(
    input: &str,
    month_first: Option<bool>,
) -> Result<&'static str, UnrecognizedFormatError> {
    if input.is_empty() {
        return Err(UnrecognizedFormatError::new(input));
    }
    for shape in &*SHAPES {
        let Some(captures) = shape.regex.captures(input) else {
            continue;
        };
        let Some(month_first_pattern) = shape.month_first else {
            tracing::debug!(input, pattern = shape.day_first, "detected date format");
            return Ok(shape.day_first);
        };
        let first: u32 = captures[1].parse().expect("valid integer");
        let second: u32 = captures[2].parse().expect("valid integer");
        let day_first_possible = (1..=31).contains(&first) && (1..=12).contains(&second);
        let month_first_possible = (1..=12).contains(&first) && (1..=31).contains(&second);
        let resolved = match (day_first_possible, month_first_possible) {
            (false, false) => continue,
            (true, false) => shape.day_first,
            (false, true) => month_first_pattern,
            (true, true) => {
                if month_first == Some(true) {
                    month_first_pattern
                } else {
                    shape.day_first
                }
            }
        };
        tracing::debug!(input, pattern = resolved, "detected date format");
        return Ok(resolved);
    }
    Err(UnrecognizedFormatError::new(input))
}

/// Whether a pattern lays the month out before the day (US style).
#[must_use]
pub fn is_month_first_pattern(pattern: &str) -> bool {
    match (pattern.find('M'), pattern.find('d')) {
        (Some(month_at), Some(day_at)) => month_at < day_at,
        (Some(_), None) => true,
        _ => false,
    }
}

/// A date string matching none of the recognized format shapes.
#[derive(Debug, Clone, thiserror::Error)]
#[error("unrecognized date format for {input:?}")]
pub struct UnrecognizedFormatError {
    input: String,
}

impl UnrecognizedFormatError {
    pub(crate) fn new(input: &str) -> Self {
        Self {
            input: input.into(),
        }
    }

    /// The string that failed detection.
    #[must_use]
    pub fn input(&self) -> &str {
        &self.input
    }
}
