use crate::consts::{
    APPROXIMATE_MARKER, APPROXIMATE_UNCERTAIN_MARKER, CENTURY_CYCLE, DATE_SEPARATOR, DAYS_IN_MONTH,
    EXPONENT_MARKER, EXTENDED_YEAR_MARKER, FEBRUARY, FEBRUARY_DAYS_LEAP, GREGORIAN_CYCLE,
    LEAP_YEAR_CYCLE, MAX_MONTH, SIGNIFICANT_DIGIT_MARKER, TIME_SEPARATOR, UNCERTAIN_MARKER,
    UNDATED, UNSPECIFIED_DIGIT,
};
use crate::parser::expand_year;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Hemisphere used when a season code must be resolved to a calendar month.
///
/// Never an implicit global: every mapping call site takes one explicitly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Hemisphere {
    #[default]
    North,
    South,
}

/// An uncertainty/approximation marker attached to a date component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Qualifier {
    /// `?`
    Uncertain,
    /// `~`
    Approximate,
    /// `%`
    Both,
}

impl Qualifier {
    /// Maps a marker character to its qualifier, if it is one.
    pub fn from_marker(c: char) -> Option<Self> {
        match c {
            UNCERTAIN_MARKER => Some(Self::Uncertain),
            APPROXIMATE_MARKER => Some(Self::Approximate),
            APPROXIMATE_UNCERTAIN_MARKER => Some(Self::Both),
            _ => None,
        }
    }

    /// The marker character this qualifier was parsed from.
    pub const fn marker(self) -> char {
        match self {
            Self::Uncertain => UNCERTAIN_MARKER,
            Self::Approximate => APPROXIMATE_MARKER,
            Self::Both => APPROXIMATE_UNCERTAIN_MARKER,
        }
    }

    /// Combines two qualifiers attached to the same component.
    /// Differing markers escalate to `Both`.
    pub fn merge(a: Option<Self>, b: Self) -> Self {
        match a {
            None => b,
            Some(a) if a == b => a,
            Some(_) => Self::Both,
        }
    }
}

/// Component scope a qualifier can be anchored at, coarsest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Scope {
    Year,
    Month,
    Day,
}

/// Resolved uncertainty/approximation state of one component scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Qualification {
    pub uncertain: bool,
    pub approximate: bool,
}

impl Qualification {
    fn absorb(&mut self, q: Option<Qualifier>) {
        match q {
            Some(Qualifier::Uncertain) => self.uncertain = true,
            Some(Qualifier::Approximate) => self.approximate = true,
            Some(Qualifier::Both) => {
                self.uncertain = true;
                self.approximate = true;
            }
            None => {}
        }
    }

    /// True when neither marker applies.
    pub const fn is_plain(self) -> bool {
        !self.uncertain && !self.approximate
    }
}

/// One EDTF single-date token decomposed into typed components.
///
/// Produced by [`crate::parser::parse`]; immutable thereafter. The grammar
/// guarantees that `month` and `day` are exactly two characters of digits
/// or unspecified-digit markers, and that `day` never appears without
/// `month`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ParsedDate {
    /// Year digits, possibly containing unspecified-digit markers.
    /// The sign is held in `year_negative`.
    pub year_digits: String,
    /// Year was negative-signed (the sign may precede or follow the
    /// extended-year marker in the source).
    pub year_negative: bool,
    /// Year carried the explicit long-year marker.
    pub year_is_extended: bool,
    /// Power-of-ten multiplier from exponent notation.
    pub year_exponent: Option<i32>,
    /// Count of significant digits; informational only.
    pub year_significant_digits: Option<u32>,
    /// Two-character month code, calendar (`01`-`12`) or
    /// season/quarter/semester (`21`-`41`), possibly with markers.
    pub month: Option<String>,
    /// Two-character day, possibly with markers.
    pub day: Option<String>,
    /// Raw time-of-day text after the `T` separator. `Some("")` records a
    /// separator with no time; validation decides what to do with it.
    pub time: Option<String>,
    /// Qualifier anchored at year scope.
    pub year_qualifier: Option<Qualifier>,
    /// Qualifier anchored at year+month scope.
    pub month_qualifier: Option<Qualifier>,
    /// Qualifier anchored at year+month+day scope.
    pub day_qualifier: Option<Qualifier>,
}

impl ParsedDate {
    /// Year string with exponent notation resolved and the sign applied.
    pub fn expanded_year(&self) -> String {
        let base = if self.year_negative {
            format!("-{}", self.year_digits)
        } else {
            self.year_digits.clone()
        };
        expand_year(&base, self.year_exponent)
    }

    /// Expanded year as an integer, when every digit is specified.
    pub fn year_int(&self) -> Option<i64> {
        self.expanded_year().parse().ok()
    }

    /// True when the year contains an unspecified-digit marker.
    pub fn year_is_unspecified(&self) -> bool {
        self.year_digits.contains(UNSPECIFIED_DIGIT)
    }

    /// True when the month contains an unspecified-digit marker.
    pub fn month_is_unspecified(&self) -> bool {
        self.month
            .as_deref()
            .is_some_and(|m| m.contains(UNSPECIFIED_DIGIT))
    }

    /// True when the day contains an unspecified-digit marker.
    pub fn day_is_unspecified(&self) -> bool {
        self.day
            .as_deref()
            .is_some_and(|d| d.contains(UNSPECIFIED_DIGIT))
    }

    /// True for the fully-unspecified year used to mark undated records.
    pub fn is_undated(&self) -> bool {
        self.year_digits == UNDATED && self.month.is_none()
    }

    /// Resolved qualification at a scope.
    ///
    /// A qualifier anchored at scope S applies to S and every coarser scope
    /// to its left, so the year picks up qualifiers anchored at the month
    /// and day while the day only answers for its own. This cumulative rule
    /// holds even when an intermediate component is unspecified.
    pub fn qualification_at(&self, scope: Scope) -> Qualification {
        let mut q = Qualification::default();
        q.absorb(self.day_qualifier);
        if scope == Scope::Day {
            return q;
        }
        q.absorb(self.month_qualifier);
        if scope == Scope::Month {
            return q;
        }
        q.absorb(self.year_qualifier);
        q
    }
}

/// Canonical re-rendering: qualifiers trail the component they anchor at.
impl fmt::Display for ParsedDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.year_is_extended {
            write!(f, "{EXTENDED_YEAR_MARKER}")?;
        }
        if self.year_negative {
            write!(f, "-")?;
        }
        write!(f, "{}", self.year_digits)?;
        if let Some(exp) = self.year_exponent {
            write!(f, "{EXPONENT_MARKER}{exp}")?;
        }
        if let Some(sig) = self.year_significant_digits {
            write!(f, "{SIGNIFICANT_DIGIT_MARKER}{sig}")?;
        }
        if let Some(q) = self.year_qualifier {
            write!(f, "{}", q.marker())?;
        }
        if let Some(month) = &self.month {
            write!(f, "{DATE_SEPARATOR}{month}")?;
            if let Some(q) = self.month_qualifier {
                write!(f, "{}", q.marker())?;
            }
        }
        if let Some(day) = &self.day {
            write!(f, "{DATE_SEPARATOR}{day}")?;
            if let Some(q) = self.day_qualifier {
                write!(f, "{}", q.marker())?;
            }
        }
        if let Some(time) = &self.time {
            write!(f, "{TIME_SEPARATOR}{time}")?;
        }
        Ok(())
    }
}

impl serde::Serialize for ParsedDate {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> serde::Deserialize<'de> for ParsedDate {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

impl FromStr for ParsedDate {
    type Err = crate::parser::ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        crate::parser::parse(s)
    }
}

// --- calendar helpers for strict-mode validation ---

pub const fn is_leap_year(year: i64) -> bool {
    (year % LEAP_YEAR_CYCLE == 0 && year % CENTURY_CYCLE != 0) || year % GREGORIAN_CYCLE == 0
}

pub const fn days_in_month(year: i64, month: u8) -> u8 {
    debug_assert!(month != 0 && month <= MAX_MONTH);

    if month == FEBRUARY && is_leap_year(year) {
        FEBRUARY_DAYS_LEAP
    } else {
        DAYS_IN_MONTH[month as usize]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse;

    #[test]
    fn test_qualifier_merge() {
        assert_eq!(
            Qualifier::merge(None, Qualifier::Uncertain),
            Qualifier::Uncertain
        );
        assert_eq!(
            Qualifier::merge(Some(Qualifier::Uncertain), Qualifier::Uncertain),
            Qualifier::Uncertain
        );
        assert_eq!(
            Qualifier::merge(Some(Qualifier::Uncertain), Qualifier::Approximate),
            Qualifier::Both
        );
    }

    #[test]
    fn test_qualification_is_cumulative_toward_coarser_scopes() {
        // Qualifier anchored at the day qualifies month and year too.
        let date = parse("2004-06-11?").unwrap();
        assert_eq!(date.day_qualifier, Some(Qualifier::Uncertain));
        assert!(date.qualification_at(Scope::Year).uncertain);
        assert!(date.qualification_at(Scope::Month).uncertain);
        assert!(date.qualification_at(Scope::Day).uncertain);
    }

    #[test]
    fn test_qualification_does_not_flow_toward_finer_scopes() {
        let date = parse("2004?-06-11").unwrap();
        assert!(date.qualification_at(Scope::Year).uncertain);
        assert!(date.qualification_at(Scope::Month).is_plain());
        assert!(date.qualification_at(Scope::Day).is_plain());
    }

    #[test]
    fn test_qualification_mixed_markers() {
        let date = parse("2004~-06?").unwrap();
        let year = date.qualification_at(Scope::Year);
        assert!(year.uncertain && year.approximate);
        let month = date.qualification_at(Scope::Month);
        assert!(month.uncertain && !month.approximate);
    }

    #[test]
    fn test_display_round_trip() {
        for token in [
            "1900",
            "-0044",
            "Y19000",
            "Y17E7",
            "1950S2",
            "190X",
            "1900-05",
            "1900-05-12",
            "2004-06-11?",
            "1984~",
            "2004-06~-11",
            "1900-01-02T01:22:33Z",
        ] {
            let date = parse(token).unwrap();
            assert_eq!(parse(&date.to_string()).unwrap(), date, "token {token}");
        }
    }

    #[test]
    fn test_serde_string_format() {
        let date = parse("1900-05-12").unwrap();
        let json = serde_json::to_string(&date).unwrap();
        assert_eq!(json, r#""1900-05-12""#);
        let back: ParsedDate = serde_json::from_str(&json).unwrap();
        assert_eq!(back, date);

        let result: Result<ParsedDate, _> = serde_json::from_str(r#""190u""#);
        assert!(result.is_err());
    }

    #[test]
    fn test_undated_detection() {
        assert!(parse("XXXX").unwrap().is_undated());
        assert!(!parse("190X").unwrap().is_undated());
        assert!(!parse("XXXX-XX").unwrap().is_undated());
    }

    #[test]
    fn test_is_leap_year_cases() {
        assert!(is_leap_year(2024));
        assert!(is_leap_year(2000));
        assert!(is_leap_year(-44));
        assert!(!is_leap_year(1900));
        assert!(!is_leap_year(2023));
    }

    #[test]
    fn test_days_in_month() {
        assert_eq!(days_in_month(2023, 1), 31);
        assert_eq!(days_in_month(2023, 2), 28);
        assert_eq!(days_in_month(2024, 2), 29);
        assert_eq!(days_in_month(1900, 2), 28);
        assert_eq!(days_in_month(2023, 4), 30);
        assert_eq!(days_in_month(2023, 12), 31);
    }
}
