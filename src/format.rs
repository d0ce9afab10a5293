//! Human-readable rendering of EDTF expressions.
//!
//! Renders Level-1 dates under a display configuration: separator,
//! component order, month spelling, day padding, and the hemisphere used
//! to resolve season codes for numeric month formats. Qualifiers and
//! unspecified digits become natural-language phrases instead of marker
//! characters.

use crate::consts::{
    INTERVAL_SEPARATOR, OPEN_ENDPOINT, UNSPECIFIED_DIGIT, is_season_code, month_display,
    season_month,
};
use crate::expression::set_interior;
use crate::parser::{ParseError, parse};
use crate::types::{Hemisphere, Scope};
use serde::{Deserialize, Serialize};

/// Separator between rendered date components.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DateSeparator {
    /// ISO 8601 bias.
    #[default]
    Dash,
    Stroke,
    Period,
    Space,
}

impl DateSeparator {
    const fn as_str(self) -> &'static str {
        match self {
            Self::Dash => "-",
            Self::Stroke => "/",
            Self::Period => ".",
            Self::Space => " ",
        }
    }
}

/// Order of rendered date components.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DateOrder {
    /// Year, month, day.
    #[default]
    BigEndian,
    /// Day, month, year.
    LittleEndian,
    /// Month, day, year.
    MiddleEndian,
}

/// Month rendering style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MonthFormat {
    /// `04`
    #[default]
    TwoDigit,
    /// `4`
    OneDigit,
    /// `Apr`
    Abbreviated,
    /// `April`
    Full,
}

/// Day rendering style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DayFormat {
    /// `02`
    #[default]
    TwoDigit,
    /// `2`
    OneDigit,
}

/// Display configuration for the formatter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FormatConfig {
    pub date_separator: DateSeparator,
    pub date_order: DateOrder,
    pub month_format: MonthFormat,
    pub day_format: DayFormat,
    /// Hemisphere used when a season code must render as a calendar month.
    pub season_hemisphere: Hemisphere,
}

/// Renders a whole expression: single date, interval, or set.
pub fn format(text: &str, config: &FormatConfig) -> Result<String, ParseError> {
    if text.contains(['[', ']', '{', '}']) {
        return format_set(text, config);
    }
    if let Some((begin, end)) = text.split_once(INTERVAL_SEPARATOR) {
        let begin = if begin.is_empty() || begin == OPEN_ENDPOINT {
            "open start".to_owned()
        } else {
            format_date(begin, config)?
        };
        let end = if end.is_empty() || end == OPEN_ENDPOINT {
            "open end".to_owned()
        } else {
            format_date(end, config)?
        };
        return Ok(format!("{begin} to {end}"));
    }
    format_date(text, config)
}

fn format_set(text: &str, config: &FormatConfig) -> Result<String, ParseError> {
    let qualifier = if text.starts_with('{') {
        "all of the dates"
    } else {
        "one of the dates"
    };
    let mut rendered = Vec::new();
    for member in set_interior(text).split(',') {
        if member.is_empty() {
            continue;
        }
        let formatted = match member.split_once(OPEN_ENDPOINT) {
            None => format_date(member, config)?,
            Some(("", "")) => continue,
            Some((start, "")) => format!("{} or later", format_date(start, config)?),
            Some(("", end)) => format!("{} or earlier", format_date(end, config)?),
            Some((start, end)) => format!(
                "{} until {}",
                format_date(start, config)?,
                format_date(end, config)?
            ),
        };
        rendered.push(formatted);
    }
    Ok(format!("{qualifier}: {}", rendered.join(", ")))
}

/// Renders one single-date token under the configuration.
///
/// Marker characters never reach the output: qualifiers wrap the date in a
/// phrase, an unspecified month or day is dropped, and an unspecified year
/// renders as its decade/century ("the 1900's").
pub fn format_date(token: &str, config: &FormatConfig) -> Result<String, ParseError> {
    let parsed = parse(token)?;

    // Year scope accumulates every anchored qualifier.
    let qualification = parsed.qualification_at(Scope::Year);

    // Finest unspecified component names the phrase.
    let unspecified_part = if parsed.day_is_unspecified() {
        Some("day")
    } else if parsed.month_is_unspecified() {
        Some("month")
    } else if parsed.year_is_unspecified() {
        Some("year")
    } else {
        None
    };

    let mut year = parsed.expanded_year();
    if parsed.year_is_unspecified() {
        year = format!("the {}'s", year.replace(UNSPECIFIED_DIGIT, "0"));
    }

    // No partial months or days in display.
    let month = match parsed.month.as_deref() {
        Some(m) if !m.contains(UNSPECIFIED_DIGIT) => render_month(m, config),
        _ => String::new(),
    };
    let day = match parsed.day.as_deref() {
        Some(d) if !d.contains(UNSPECIFIED_DIGIT) => render_day(d, config),
        _ => String::new(),
    };

    let month_is_textual = month.chars().any(|c| c.is_ascii_alphabetic());
    let core = if config.date_order == DateOrder::MiddleEndian && month_is_textual {
        // "April 22, 1996" reads better than "April-22-1996".
        if day.is_empty() {
            format!("{month} {year}")
        } else {
            format!("{month} {day}, {year}")
        }
    } else {
        let parts = match config.date_order {
            DateOrder::BigEndian => [year.as_str(), month.as_str(), day.as_str()],
            DateOrder::LittleEndian => [day.as_str(), month.as_str(), year.as_str()],
            DateOrder::MiddleEndian => [month.as_str(), day.as_str(), year.as_str()],
        };
        parts
            .iter()
            .copied()
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(config.date_separator.as_str())
    };

    let mut out = core;
    if qualification.uncertain && qualification.approximate {
        out = format!("{out} (approximate and uncertain)");
    } else if qualification.uncertain {
        out = format!("{out} (uncertain)");
    } else if qualification.approximate {
        out = format!("approximately {out}");
    }
    if let Some(part) = unspecified_part {
        out = format!("an unspecified {part} in {out}");
    }
    Ok(out)
}

fn render_month(code: &str, config: &FormatConfig) -> String {
    match config.month_format {
        MonthFormat::Abbreviated | MonthFormat::Full => match month_display(code) {
            Some((abbreviated, full)) => {
                let name = if config.month_format == MonthFormat::Abbreviated {
                    abbreviated
                } else {
                    full
                };
                name.to_owned()
            }
            None => code.to_owned(),
        },
        MonthFormat::TwoDigit | MonthFormat::OneDigit => {
            let code = if is_season_code(code) {
                season_month(code, config.season_hemisphere).unwrap_or(code)
            } else {
                code
            };
            if config.month_format == MonthFormat::OneDigit {
                code.trim_start_matches('0').to_owned()
            } else {
                code.to_owned()
            }
        }
    }
}

fn render_day(day: &str, config: &FormatConfig) -> String {
    match config.day_format {
        DayFormat::TwoDigit => day.to_owned(),
        DayFormat::OneDigit => day.trim_start_matches('0').to_owned(),
    }
}
