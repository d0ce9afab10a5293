//! Structural and strict-calendar validation of EDTF expressions.
//!
//! Errors accumulate: every rule a token trips is reported, except that a
//! grammar failure is unrecoverable for that token and suppresses the
//! remaining rules.

use crate::consts::{
    INTERVAL_SEPARATOR, MAX_MONTH, OPEN_ENDPOINT, TIME_SEPARATOR, UNSPECIFIED_DIGIT, YEAR_DIGITS,
    is_season_code, month_display,
};
use crate::expression::{set_encoding_is_valid, set_interior, split_set_members};
use crate::parser::parse;
use crate::types::{ParsedDate, days_in_month};

/// One validation failure. `Display` renders the exact message surfaced to
/// callers; the variants keep failures matchable.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// Token does not round-trip through the grammar.
    #[error("Could not parse the date '{0}'.")]
    Parse(String),

    /// Extended years cannot be checked against a real calendar.
    #[error("Extended years are not supported with the 'strict dates' option enabled.")]
    ExtendedYearStrict,

    #[error("Years longer than 4 digits must be prefixed with a 'Y'.")]
    YearTooLong,

    #[error("Years must be at least 4 characters long.")]
    YearTooShort,

    #[error("Provided month value '{0}' is not valid.")]
    MonthRange(String),

    #[error("Provided day value '{0}' is not valid.")]
    DayRange(String),

    // The misspelling is load-bearing: downstream callers match on it.
    #[error("Time not provided with time seperator (T).")]
    TimeSeparator,

    #[error("The date/time '{0}' is invalid.")]
    TimeFormat(String),

    #[error("Strictly speaking, the date (and/or time) '{0}' is invalid.")]
    StrictCalendar(String),

    #[error("The set is improperly encoded.")]
    SetEncoding,

    #[error("Date intervals cannot include times.")]
    IntervalTime,
}

/// Validates an EDTF expression, returning every triggered error in rule
/// order. An empty list means the expression is valid.
///
/// `intervals` and `sets` widen the accepted syntax; `strict` additionally
/// requires a real, constructible proleptic-Gregorian date.
pub fn validate(text: &str, intervals: bool, sets: bool, strict: bool) -> Vec<ValidationError> {
    if sets && text.contains(['[', ']', '{', '}']) {
        let mut msgs = Vec::new();
        if !set_encoding_is_valid(text) {
            msgs.push(ValidationError::SetEncoding);
        }
        for member in split_set_members(set_interior(text)) {
            if !member.is_empty() {
                msgs.extend(validate_date(member, strict));
            }
        }
        return msgs;
    }
    if intervals {
        let mut msgs = Vec::new();
        if text.contains(TIME_SEPARATOR) {
            msgs.push(ValidationError::IntervalTime);
        }
        for member in text.split(INTERVAL_SEPARATOR) {
            if !member.is_empty() && member != OPEN_ENDPOINT {
                msgs.extend(validate_date(member, strict));
            }
        }
        return msgs;
    }
    validate_date(text, strict)
}

/// Validates one single-date token.
pub fn validate_date(token: &str, strict: bool) -> Vec<ValidationError> {
    let parsed = match parse(token) {
        Ok(parsed) => parsed,
        Err(err) => return vec![ValidationError::Parse(err.token().to_owned())],
    };
    let mut msgs = Vec::new();

    // Year.
    if parsed.year_is_extended {
        if strict {
            msgs.push(ValidationError::ExtendedYearStrict);
        }
    } else if parsed.year_digits.len() > YEAR_DIGITS {
        msgs.push(ValidationError::YearTooLong);
    } else if parsed.year_digits.len() < YEAR_DIGITS {
        msgs.push(ValidationError::YearTooShort);
    }

    // Month. Unspecified digits suspend the range check.
    if let Some(month) = parsed.month.as_deref() {
        if !month.contains(UNSPECIFIED_DIGIT) {
            let season_with_day = is_season_code(month) && parsed.day.is_some();
            if month_display(month).is_none() || season_with_day {
                msgs.push(ValidationError::MonthRange(month.to_owned()));
            }
        }
    }

    // Day.
    if let Some(day) = parsed.day.as_deref() {
        if !day.contains(UNSPECIFIED_DIGIT)
            && !day.parse::<u8>().is_ok_and(|d| (1..=31).contains(&d))
        {
            msgs.push(ValidationError::DayRange(day.to_owned()));
        }
    }

    // Time.
    match parsed.time.as_deref() {
        Some("") => msgs.push(ValidationError::TimeSeparator),
        Some(_) if !is_valid_datetime(token) => {
            msgs.push(ValidationError::TimeFormat(token.to_owned()));
        }
        _ => {}
    }

    // Strict calendar correctness, once the structure is known good.
    if strict && msgs.is_empty() && !strict_calendar_ok(&parsed) {
        msgs.push(ValidationError::StrictCalendar(token.to_owned()));
    }

    msgs
}

/// Fixed date-time pattern: `-?YYYY+-MM-DDTHH:MM:SS` with an optional `Z`
/// or `±HH:MM` offset, matched over the whole token.
fn is_valid_datetime(token: &str) -> bool {
    fn literal(bytes: &[u8], pos: &mut usize, byte: u8) -> bool {
        if bytes.get(*pos) == Some(&byte) {
            *pos += 1;
            true
        } else {
            false
        }
    }
    fn two_digits(bytes: &[u8], pos: &mut usize) -> bool {
        for _ in 0..2 {
            if !bytes.get(*pos).is_some_and(u8::is_ascii_digit) {
                return false;
            }
            *pos += 1;
        }
        true
    }

    let bytes = token.as_bytes();
    let mut pos = usize::from(bytes.first() == Some(&b'-'));

    let year_start = pos;
    while bytes.get(pos).is_some_and(u8::is_ascii_digit) {
        pos += 1;
    }
    if pos - year_start < YEAR_DIGITS {
        return false;
    }

    for _ in 0..2 {
        if !(literal(bytes, &mut pos, b'-') && two_digits(bytes, &mut pos)) {
            return false;
        }
    }
    if !(literal(bytes, &mut pos, b'T') && two_digits(bytes, &mut pos)) {
        return false;
    }
    for _ in 0..2 {
        if !(literal(bytes, &mut pos, b':') && two_digits(bytes, &mut pos)) {
            return false;
        }
    }
    match bytes.get(pos) {
        None => true,
        Some(b'Z') => pos + 1 == bytes.len(),
        Some(b'+' | b'-') => {
            pos += 1;
            two_digits(bytes, &mut pos)
                && literal(bytes, &mut pos, b':')
                && two_digits(bytes, &mut pos)
                && pos == bytes.len()
        }
        Some(_) => false,
    }
}

/// True when the cleaned components form a real calendar date (and a sane
/// time of day, when one is carried).
fn strict_calendar_ok(parsed: &ParsedDate) -> bool {
    if parsed.year_is_unspecified() || parsed.month_is_unspecified() || parsed.day_is_unspecified()
    {
        return false;
    }
    let Some(year) = parsed.year_int() else {
        return false;
    };
    let month = match parsed.month.as_deref() {
        None => None,
        Some(m) => match m.parse::<u8>() {
            Ok(m) if (1..=MAX_MONTH).contains(&m) => Some(m),
            // Season codes and other non-calendar months are not
            // constructible dates.
            _ => return false,
        },
    };
    if let Some(day) = parsed.day.as_deref() {
        let Some(month) = month else {
            return false;
        };
        match day.parse::<u8>() {
            Ok(d) if d >= 1 && d <= days_in_month(year, month) => {}
            _ => return false,
        }
    }
    if let Some(time) = parsed.time.as_deref() {
        let field = |range: std::ops::Range<usize>| -> Option<u8> {
            time.get(range).and_then(|s| s.parse().ok())
        };
        let (Some(h), Some(m), Some(s)) = (field(0..2), field(3..5), field(6..8)) else {
            return false;
        };
        if h > 23 || m > 59 || s > 59 {
            return false;
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    fn messages(text: &str) -> Vec<String> {
        validate(text, false, false, false)
            .iter()
            .map(ToString::to_string)
            .collect()
    }

    fn strict_messages(text: &str) -> Vec<String> {
        validate(text, false, false, true)
            .iter()
            .map(ToString::to_string)
            .collect()
    }

    #[test]
    fn test_valid_single_dates() {
        for token in [
            "1900",
            "1900-01",
            "1900-01-02",
            "190X",
            "1900-XX",
            // No validation for months with an unspecified digit.
            "1900-3X",
            // Month 31 without a day matches a season, so it's valid.
            "1900-31",
            "190X-5X-8X",
            "Y19000",
            "-0044",
            "2004-06~",
            "?1984",
            "1900-01-02T01:22:33",
            "1900-01-02T01:22:33Z",
            "1900-01-02T01:22:33+05:00",
        ] {
            assert_eq!(messages(token), Vec::<String>::new(), "token {token}");
        }
    }

    #[test]
    fn test_month_out_of_range() {
        assert_eq!(
            messages("1900-91"),
            ["Provided month value '91' is not valid."]
        );
        // Day validation is independent of the month error.
        assert_eq!(
            messages("1900-91-01"),
            ["Provided month value '91' is not valid."]
        );
    }

    #[test]
    fn test_season_with_day_is_invalid() {
        assert_eq!(
            messages("1900-31-01"),
            ["Provided month value '31' is not valid."]
        );
    }

    #[test]
    fn test_year_length() {
        assert_eq!(
            messages("19000"),
            ["Years longer than 4 digits must be prefixed with a 'Y'."]
        );
        assert_eq!(messages("Y19000"), Vec::<String>::new());
        assert_eq!(messages("190"), ["Years must be at least 4 characters long."]);
    }

    #[test]
    fn test_errors_accumulate() {
        assert_eq!(
            messages("190-99-52"),
            [
                "Years must be at least 4 characters long.",
                "Provided month value '99' is not valid.",
                "Provided day value '52' is not valid.",
            ]
        );
    }

    #[test]
    fn test_parse_failure_short_circuits() {
        assert_eq!(messages("190u"), ["Could not parse the date '190u'."]);
    }

    #[test]
    fn test_time_rules() {
        assert_eq!(
            messages("1900-01-02T"),
            ["Time not provided with time seperator (T)."]
        );
        assert_eq!(
            messages("1900-01-02T1:1:1"),
            ["The date/time '1900-01-02T1:1:1' is invalid."]
        );
        assert_eq!(
            messages("1900-01-02T01:22:33+"),
            ["The date/time '1900-01-02T01:22:33+' is invalid."]
        );
        assert_eq!(
            messages("1900-01-02T01:22:33+05"),
            ["The date/time '1900-01-02T01:22:33+05' is invalid."]
        );
        assert_eq!(messages("1900T01:22:33"), ["The date/time '1900T01:22:33' is invalid."]);
    }

    #[test]
    fn test_strict_calendar() {
        assert_eq!(strict_messages("1900-02-28"), Vec::<String>::new());
        assert_eq!(strict_messages("2000-02-29"), Vec::<String>::new());
        assert_eq!(
            strict_messages("1900-02-29"),
            ["Strictly speaking, the date (and/or time) '1900-02-29' is invalid."]
        );
        assert_eq!(
            strict_messages("2023-04-31"),
            ["Strictly speaking, the date (and/or time) '2023-04-31' is invalid."]
        );
        // Seasons and unspecified digits are not constructible dates.
        assert_eq!(
            strict_messages("1900-21"),
            ["Strictly speaking, the date (and/or time) '1900-21' is invalid."]
        );
        assert_eq!(
            strict_messages("190X"),
            ["Strictly speaking, the date (and/or time) '190X' is invalid."]
        );
    }

    #[test]
    fn test_strict_time_fields() {
        assert_eq!(strict_messages("1900-01-02T01:22:33"), Vec::<String>::new());
        assert_eq!(
            strict_messages("1900-01-02T25:22:33"),
            ["Strictly speaking, the date (and/or time) '1900-01-02T25:22:33' is invalid."]
        );
    }

    #[test]
    fn test_strict_extended_years() {
        assert_eq!(
            strict_messages("Y19000"),
            ["Extended years are not supported with the 'strict dates' option enabled."]
        );
        // Without strict the same token is fine.
        assert_eq!(messages("Y19000"), Vec::<String>::new());
    }

    #[test]
    fn test_interval_dispatch() {
        let ok = |text: &str| validate(text, true, true, false);
        assert_eq!(ok("1900/2023"), []);
        assert_eq!(ok("../1985"), []);
        assert_eq!(ok("1985/.."), []);
        assert_eq!(ok("/2000"), []);
        assert_eq!(
            ok("1900/202u"),
            [ValidationError::Parse("202u".into())]
        );
    }

    #[test]
    fn test_intervals_reject_times() {
        let msgs = validate("1900-01-02T01:22:33/2000", true, true, false);
        assert_eq!(msgs, [ValidationError::IntervalTime]);
    }

    #[test]
    fn test_set_dispatch() {
        let check = |text: &str| validate(text, true, true, false);
        assert_eq!(check("[1667,1668,1670]"), []);
        assert_eq!(check("{1960,1961..1963}"), []);
        assert_eq!(check("[..1760]"), []);
        // A broken enclosure reports the encoding and whatever the member
        // split still manages to find.
        assert_eq!(
            check("[1900,1910)"),
            [
                ValidationError::SetEncoding,
                ValidationError::Parse("1910)".into())
            ]
        );
        // Member errors surface alongside the encoding verdict.
        assert_eq!(
            check("[1900,190u]"),
            [ValidationError::Parse("190u".into())]
        );
        assert_eq!(
            check("{190}"),
            [ValidationError::YearTooShort]
        );
    }

    #[test]
    fn test_sets_disabled_falls_through() {
        // With sets off, the brackets are just unparseable characters.
        let msgs = validate("[1900]", false, false, false);
        assert_eq!(msgs, [ValidationError::Parse("[1900]".into())]);
    }

    #[test]
    fn test_round_trip_idempotence() {
        for token in ["1900", "190X", "1900-XX", "1900-31", "1900-01-02"] {
            assert_eq!(messages(token), Vec::<String>::new());
            let iso = crate::convert::iso8601_value(token).unwrap();
            assert_eq!(messages(&iso), Vec::<String>::new(), "iso of {token}");
        }
    }
}
