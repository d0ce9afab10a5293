//! Conversion of EDTF tokens to canonical ISO 8601-like values.
//!
//! Approximation and uncertainty are dropped, and every range collapses to
//! its earliest value: unspecified digits become zeros (a fully-unspecified
//! month or day becomes `01`), seasons become their representative
//! equinox/solstice month, and intervals and sets contribute their first
//! dated member. Callers are expected to validate first; residual failures
//! surface as typed errors rather than defined behavior.

use crate::consts::{TIME_SEPARATOR, UNSPECIFIED_DIGIT, is_calendar_month, season_month};
use crate::expression::{EdtfExpression, ExpressionError};
use crate::parser::{ParseError, parse};
use crate::types::{Hemisphere, ParsedDate};

/// Default time-of-day appended when a token carries none.
const MIDNIGHT: &str = "00:00:00";

/// Error type for conversions.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConvertError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// A month code that maps to no calendar month, even after resolving
    /// unspecified digits.
    #[error("The month value '{0}' cannot be mapped to a calendar month.")]
    Month(String),

    /// An expression whose members are all open.
    #[error("The expression '{0}' contains no dated members.")]
    NoDates(String),
}

impl From<ExpressionError> for ConvertError {
    fn from(err: ExpressionError) -> Self {
        match err {
            ExpressionError::Parse(err) => Self::Parse(err),
            ExpressionError::SetEncoding | ExpressionError::MalformedInterval(_) => {
                // Structurally broken expressions never reach a date token.
                Self::Parse(ParseError::Unparseable(String::new()))
            }
        }
    }
}

/// Earliest calendar date of a single token, seasons mapped with a
/// northern-hemisphere bias.
pub fn iso8601_value(token: &str) -> Result<String, ConvertError> {
    iso8601_value_with(token, Hemisphere::North)
}

/// Earliest calendar date of a single token.
pub fn iso8601_value_with(token: &str, hemisphere: Hemisphere) -> Result<String, ConvertError> {
    let parsed = parse(token)?;
    convert_date(&parsed, hemisphere)
}

/// Earliest timestamp of a single token: the date joined with the carried
/// time, or with midnight when none was given.
pub fn datetime_iso8601_value(token: &str) -> Result<String, ConvertError> {
    datetime_iso8601_value_with(token, Hemisphere::North)
}

/// Earliest timestamp of a single token.
pub fn datetime_iso8601_value_with(
    token: &str,
    hemisphere: Hemisphere,
) -> Result<String, ConvertError> {
    let parsed = parse(token)?;
    let mut value = convert_date(&parsed, hemisphere)?;
    value.push(TIME_SEPARATOR);
    match parsed.time.as_deref() {
        Some(time) if !time.is_empty() => value.push_str(time),
        _ => value.push_str(MIDNIGHT),
    }
    Ok(value)
}

/// Earliest calendar date of a whole expression, applying the
/// earliest-member policy to intervals and sets.
pub fn earliest_iso8601_value(text: &str) -> Result<String, ConvertError> {
    earliest_iso8601_value_with(text, Hemisphere::North)
}

/// Earliest calendar date of a whole expression.
pub fn earliest_iso8601_value_with(
    text: &str,
    hemisphere: Hemisphere,
) -> Result<String, ConvertError> {
    let expression = EdtfExpression::decompose(text)?;
    let earliest = expression
        .earliest()
        .ok_or_else(|| ConvertError::NoDates(text.to_owned()))?;
    convert_date(earliest, hemisphere)
}

fn convert_date(parsed: &ParsedDate, hemisphere: Hemisphere) -> Result<String, ConvertError> {
    let year = parsed.expanded_year().replace(UNSPECIFIED_DIGIT, "0");

    let month = match parsed.month.as_deref() {
        None => None,
        Some(m) => Some(resolve_month(m, hemisphere)?),
    };

    let day = parsed.day.as_deref().map(|d| {
        if d.contains(UNSPECIFIED_DIGIT) && d.chars().all(|c| c == UNSPECIFIED_DIGIT) {
            "01".to_owned()
        } else {
            d.replace(UNSPECIFIED_DIGIT, "0")
        }
    });

    let mut value = year;
    for part in [month, day].into_iter().flatten() {
        value.push('-');
        value.push_str(&part);
    }
    Ok(value)
}

/// Earliest calendar month for a month code: `XX` is January, a season is
/// its representative month, and a partially-unspecified code is zeroed
/// but must still land on a calendar month.
fn resolve_month(month: &str, hemisphere: Hemisphere) -> Result<String, ConvertError> {
    if month.chars().all(|c| c == UNSPECIFIED_DIGIT) {
        return Ok("01".to_owned());
    }
    if month.contains(UNSPECIFIED_DIGIT) {
        let zeroed = month.replace(UNSPECIFIED_DIGIT, "0");
        if is_calendar_month(&zeroed) {
            return Ok(zeroed);
        }
        return Err(ConvertError::Month(month.to_owned()));
    }
    if let Some(mapped) = season_month(month, hemisphere) {
        return Ok(mapped.to_owned());
    }
    if is_calendar_month(month) {
        return Ok(month.to_owned());
    }
    Err(ConvertError::Month(month.to_owned()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_dates_pass_through() {
        assert_eq!(iso8601_value("1900").unwrap(), "1900");
        assert_eq!(iso8601_value("1900-01").unwrap(), "1900-01");
        assert_eq!(iso8601_value("1900-01-02").unwrap(), "1900-01-02");
        assert_eq!(iso8601_value("-0044").unwrap(), "-0044");
    }

    #[test]
    fn test_unspecified_digits_take_earliest_value() {
        assert_eq!(iso8601_value("190X").unwrap(), "1900");
        assert_eq!(iso8601_value("1900-XX").unwrap(), "1900-01");
        assert_eq!(iso8601_value("1900-XX-XX").unwrap(), "1900-01-01");
        assert_eq!(iso8601_value("1900-01-1X").unwrap(), "1900-01-10");
        assert_eq!(iso8601_value("1900-0X").unwrap_err(), ConvertError::Month("0X".into()));
    }

    #[test]
    fn test_qualifiers_are_dropped() {
        assert_eq!(iso8601_value("1984~").unwrap(), "1984");
        assert_eq!(iso8601_value("2004-06?-11").unwrap(), "2004-06-11");
    }

    #[test]
    fn test_season_mapping_north_default() {
        assert_eq!(iso8601_value("1900-21").unwrap(), "1900-03");
        assert_eq!(iso8601_value("1900-24").unwrap(), "1900-12");
        // Explicitly southern autumn maps to March under either bias.
        assert_eq!(iso8601_value("1900-31").unwrap(), "1900-03");
        assert_eq!(iso8601_value("1900-33").unwrap(), "1900-01");
        assert_eq!(iso8601_value("1900-41").unwrap(), "1900-07");
    }

    #[test]
    fn test_season_mapping_south() {
        assert_eq!(
            iso8601_value_with("1900-21", Hemisphere::South).unwrap(),
            "1900-09"
        );
        assert_eq!(
            iso8601_value_with("1900-24", Hemisphere::South).unwrap(),
            "1900-06"
        );
        assert_eq!(
            iso8601_value_with("1900-31", Hemisphere::South).unwrap(),
            "1900-03"
        );
    }

    #[test]
    fn test_unrecognized_month_code_is_an_error() {
        // 3X zeroes to 30, which is not a calendar month.
        assert_eq!(
            iso8601_value("1900-3X").unwrap_err(),
            ConvertError::Month("3X".into())
        );
        assert_eq!(
            iso8601_value("1900-91").unwrap_err(),
            ConvertError::Month("91".into())
        );
    }

    #[test]
    fn test_extended_years_expand() {
        assert_eq!(iso8601_value("Y17E7").unwrap(), "170000000");
        assert_eq!(iso8601_value("Y-17E7").unwrap(), "-170000000");
        assert_eq!(iso8601_value("Y19000").unwrap(), "19000");
    }

    #[test]
    fn test_datetime_values() {
        assert_eq!(
            datetime_iso8601_value("1900-01-02T01:22:33").unwrap(),
            "1900-01-02T01:22:33"
        );
        assert_eq!(
            datetime_iso8601_value("1900-01-02").unwrap(),
            "1900-01-02T00:00:00"
        );
        assert_eq!(datetime_iso8601_value("190X").unwrap(), "1900T00:00:00");
    }

    #[test]
    fn test_earliest_value_law() {
        // First interval endpoint and first set member agree.
        assert_eq!(earliest_iso8601_value("1900/2023").unwrap(), "1900");
        assert_eq!(earliest_iso8601_value("[1900,2023]").unwrap(), "1900");
        assert_eq!(earliest_iso8601_value("../1985").unwrap(), "1985");
        assert_eq!(earliest_iso8601_value("{1960,1961..1963}").unwrap(), "1960");
        assert_eq!(
            earliest_iso8601_value("../..").unwrap_err(),
            ConvertError::NoDates("../..".into())
        );
    }

    #[test]
    fn test_unparseable_input_is_an_error() {
        assert!(iso8601_value("190u").is_err());
        assert!(datetime_iso8601_value("..").is_err());
    }
}
