//! Bulk extraction of calendar years from EDTF expressions.
//!
//! Feeds year-faceted search indexes: every year an expression covers is
//! emitted as an `i64`, with intervals expanded inclusively and open
//! endpoints clamped by configuration. A member that cannot be converted
//! contributes nothing rather than failing the whole extraction.

use crate::consts::{INTERVAL_SEPARATOR, OPEN_ENDPOINT, UNDATED};
use crate::convert::iso8601_value;
use crate::expression::set_interior;
use serde::{Deserialize, Serialize};

/// Configuration for [`extract_years`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct YearExtractionConfig {
    /// Skip the fully-undated token `XXXX` instead of indexing year 0.
    pub ignore_undated: bool,
    /// Collapse any open-ended expression to the single year of its dated
    /// side instead of expanding through the configured bounds.
    pub ignore_open_dates: bool,
    /// Year substituted for an open start when expanding.
    pub open_start_year: i64,
    /// Year substituted for an open end when expanding. `None` collapses
    /// the open end to the dated side, keeping extraction clock-free.
    pub open_end_year: Option<i64>,
}

impl Default for YearExtractionConfig {
    fn default() -> Self {
        Self {
            ignore_undated: true,
            ignore_open_dates: false,
            open_start_year: 0,
            open_end_year: None,
        }
    }
}

/// All calendar years covered by an expression.
///
/// Single dates contribute their (earliest) year, intervals and set
/// sub-ranges every year from begin through end, and set members each
/// their own year.
pub fn extract_years(edtf: &str, config: &YearExtractionConfig) -> Vec<i64> {
    if config.ignore_undated && edtf == UNDATED {
        return Vec::new();
    }
    if edtf.contains(['[', ']', '{', '}']) {
        let mut years = Vec::new();
        for member in set_interior(edtf).split(',') {
            if member.is_empty() {
                continue;
            }
            match member.split_once(OPEN_ENDPOINT) {
                Some((start, end)) => years.extend(range_years(start, end, config)),
                None => years.extend(member_year(member)),
            }
        }
        return years;
    }
    if config.ignore_open_dates
        && (edtf.contains(OPEN_ENDPOINT)
            || edtf.starts_with(INTERVAL_SEPARATOR)
            || edtf.ends_with(INTERVAL_SEPARATOR))
    {
        return member_year(edtf.trim_matches(['.', '/'])).into_iter().collect();
    }
    if let Some((begin, end)) = edtf.split_once(INTERVAL_SEPARATOR) {
        return range_years(begin, end, config);
    }
    member_year(edtf).into_iter().collect()
}

fn range_years(begin: &str, end: &str, config: &YearExtractionConfig) -> Vec<i64> {
    let begin_year = endpoint_year(begin);
    let end_year = endpoint_year(end).or_else(|| {
        if end.is_empty() || end == OPEN_ENDPOINT {
            config.open_end_year
        } else {
            None
        }
    });
    let begin_year = begin_year.or_else(|| {
        if begin.is_empty() || begin == OPEN_ENDPOINT {
            Some(config.open_start_year)
        } else {
            None
        }
    });
    match (begin_year, end_year) {
        (Some(b), Some(e)) if b <= e => (b..=e).collect(),
        // An inverted or half-open range keeps its dated side only.
        (Some(b), _) => vec![b],
        (None, Some(e)) => vec![e],
        (None, None) => Vec::new(),
    }
}

fn endpoint_year(token: &str) -> Option<i64> {
    if token.is_empty() || token == OPEN_ENDPOINT {
        None
    } else {
        member_year(token)
    }
}

/// The earliest calendar year of one date token, via its ISO 8601 value.
fn member_year(token: &str) -> Option<i64> {
    let value = iso8601_value(token).ok()?;
    // First '-' after the sign position ends the year.
    let end = value
        .get(1..)
        .and_then(|rest| rest.find('-'))
        .map_or(value.len(), |i| i + 1);
    value.get(..end)?.parse().ok()
}
