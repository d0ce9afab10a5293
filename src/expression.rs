//! Structural decomposition of top-level EDTF expressions.
//!
//! Splits intervals (`a/b`) and sets (`[..]`, `{..}`) into single-date
//! tokens and hands each one to the grammar parser. Expressions are built
//! fresh per call and never cached.

use crate::consts::{INTERVAL_SEPARATOR, OPEN_ENDPOINT};
use crate::parser::{ParseError, parse};
use crate::types::ParsedDate;
use serde::{Deserialize, Serialize};

/// Error type for expression decomposition.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ExpressionError {
    /// Bracket/brace mismatch or a disallowed character in a set.
    #[error("The set is improperly encoded.")]
    SetEncoding,

    /// An interval with anything other than two endpoints.
    #[error("The interval '{0}' is improperly encoded.")]
    MalformedInterval(String),

    /// A member token failed the grammar.
    #[error(transparent)]
    Parse(#[from] ParseError),
}

/// One endpoint of an interval; `..` or an empty string is open.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Endpoint {
    Open,
    Date(ParsedDate),
}

impl Endpoint {
    fn from_token(token: &str) -> Result<Self, ParseError> {
        if token.is_empty() || token == OPEN_ENDPOINT {
            Ok(Self::Open)
        } else {
            Ok(Self::Date(parse(token)?))
        }
    }

    /// The endpoint's date, unless open.
    pub const fn date(&self) -> Option<&ParsedDate> {
        match self {
            Self::Open => None,
            Self::Date(date) => Some(date),
        }
    }
}

/// One member of a set: a date or a `begin..end` sub-range, either side of
/// which may be open.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SetMember {
    Date(ParsedDate),
    Range {
        start: Option<ParsedDate>,
        end: Option<ParsedDate>,
    },
}

impl SetMember {
    /// The earliest date this member names, if it names one at all.
    pub const fn earliest(&self) -> Option<&ParsedDate> {
        match self {
            Self::Date(date) => Some(date),
            Self::Range { start: Some(date), .. }
            | Self::Range { start: None, end: Some(date) } => Some(date),
            Self::Range { start: None, end: None } => None,
        }
    }
}

/// A fully decomposed top-level EDTF expression.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum EdtfExpression {
    Single(ParsedDate),
    Interval { begin: Endpoint, end: Endpoint },
    Set { members: Vec<SetMember>, inclusive: bool },
}

impl EdtfExpression {
    /// Splits an expression along interval and set delimiters, parsing
    /// every member token.
    pub fn decompose(text: &str) -> Result<Self, ExpressionError> {
        if text.contains(['[', ']', '{', '}']) {
            if !set_encoding_is_valid(text) {
                return Err(ExpressionError::SetEncoding);
            }
            let inclusive = text.starts_with('[');
            let mut members = Vec::new();
            for raw in set_interior(text).split(',') {
                if raw.is_empty() {
                    continue;
                }
                let member = match raw.split_once(OPEN_ENDPOINT) {
                    None => SetMember::Date(parse(raw)?),
                    Some((start, end)) => SetMember::Range {
                        start: (!start.is_empty()).then(|| parse(start)).transpose()?,
                        end: (!end.is_empty()).then(|| parse(end)).transpose()?,
                    },
                };
                members.push(member);
            }
            return Ok(Self::Set { members, inclusive });
        }
        if text.contains(INTERVAL_SEPARATOR) {
            let mut parts = text.split(INTERVAL_SEPARATOR);
            let (Some(begin), Some(end), None) = (parts.next(), parts.next(), parts.next()) else {
                return Err(ExpressionError::MalformedInterval(text.to_owned()));
            };
            return Ok(Self::Interval {
                begin: Endpoint::from_token(begin)?,
                end: Endpoint::from_token(end)?,
            });
        }
        Ok(Self::Single(parse(text)?))
    }

    /// The earliest member: the single date, the first dated interval
    /// endpoint, or the first dated set member. Conversion of intervals and
    /// sets applies its earliest-value policy through this.
    pub fn earliest(&self) -> Option<&ParsedDate> {
        match self {
            Self::Single(date) => Some(date),
            Self::Interval { begin, end } => begin.date().or_else(|| end.date()),
            Self::Set { members, .. } => members.iter().find_map(SetMember::earliest),
        }
    }
}

/// Enclosure and character-set check for a set expression: a matching
/// bracket/brace pair around digits and `, - X Y E S .` only.
pub(crate) fn set_encoding_is_valid(text: &str) -> bool {
    let mut chars = text.chars();
    let (Some(open), Some(close)) = (chars.next(), chars.next_back()) else {
        return false;
    };
    if !matches!((open, close), ('[', ']') | ('{', '}')) {
        return false;
    }
    chars
        .as_str()
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, ',' | '-' | 'X' | 'Y' | 'E' | 'S' | '.'))
}

/// The text between the enclosing brackets/braces.
pub(crate) fn set_interior(text: &str) -> &str {
    text.trim_matches(['[', ']', '{', '}'])
}

/// Single-date member tokens of a set interior, split on `,` and `..`.
pub(crate) fn split_set_members(interior: &str) -> impl Iterator<Item = &str> {
    interior.split(',').flat_map(|m| m.split(OPEN_ENDPOINT))
}
