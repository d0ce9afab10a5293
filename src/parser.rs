//! Grammar tokenizer for single EDTF date tokens.
//!
//! One token is `[qualifier][sign][Y][sign]<digits/X>[E<exp>][S<n>][qualifier]`
//! optionally followed by `-[qualifier]MM[qualifier]` and
//! `-[qualifier]DD[qualifier]`, with an optional `T<time>` suffix. The
//! cursor must consume the entire date part; any leftover character fails
//! the whole token. That single round-trip requirement is the primary
//! defense against malformed input.

use crate::consts::{
    DATE_SEPARATOR, EXPONENT_MARKER, EXTENDED_YEAR_MARKER, SIGNIFICANT_DIGIT_MARKER,
    TIME_SEPARATOR, UNSPECIFIED_DIGIT,
};
use crate::prelude::*;
use crate::types::{ParsedDate, Qualifier};

/// Failure to decompose a token into date components.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum ParseError {
    #[display(fmt = "Could not parse the date '{_0}'.")]
    Unparseable(String),
}

impl std::error::Error for ParseError {}

impl ParseError {
    /// The offending date text.
    pub fn token(&self) -> &str {
        match self {
            Self::Unparseable(token) => token,
        }
    }
}

/// Decomposes one single-date token into typed components.
///
/// The text after the first `T` is carried through as the raw time string;
/// only the date part is tokenized here.
pub fn parse(token: &str) -> Result<ParsedDate, ParseError> {
    let (date, time) = match token.split_once(TIME_SEPARATOR) {
        Some((date, time)) => (date, Some(time.to_owned())),
        None => (token, None),
    };
    parse_date_part(date, time).ok_or_else(|| ParseError::Unparseable(date.to_owned()))
}

fn parse_date_part(date: &str, time: Option<String>) -> Option<ParsedDate> {
    let mut cur = Cursor::new(date);

    let mut year_qualifier = cur.eat_qualifier();
    let mut year_negative = cur.eat(b'-');
    let year_is_extended = cur.eat(EXTENDED_YEAR_MARKER as u8);
    if year_is_extended && !year_negative {
        // The sign may follow the long-year marker.
        year_negative = cur.eat(b'-');
    }
    let year_digits = cur.eat_digit_run()?.to_owned();
    let year_exponent = if cur.eat(EXPONENT_MARKER as u8) {
        Some(cur.eat_signed_int()?)
    } else {
        None
    };
    let year_significant_digits = if cur.eat(SIGNIFICANT_DIGIT_MARKER as u8) {
        Some(cur.eat_unsigned_int()?)
    } else {
        None
    };
    if let Some(q) = cur.eat_qualifier() {
        year_qualifier = Some(Qualifier::merge(year_qualifier, q));
    }

    let mut month = None;
    let mut month_qualifier = None;
    let mut day = None;
    let mut day_qualifier = None;
    if cur.eat(DATE_SEPARATOR as u8) {
        month_qualifier = cur.eat_qualifier();
        month = Some(cur.eat_component()?.to_owned());
        if let Some(q) = cur.eat_qualifier() {
            month_qualifier = Some(Qualifier::merge(month_qualifier, q));
        }
        if cur.eat(DATE_SEPARATOR as u8) {
            day_qualifier = cur.eat_qualifier();
            day = Some(cur.eat_component()?.to_owned());
            if let Some(q) = cur.eat_qualifier() {
                day_qualifier = Some(Qualifier::merge(day_qualifier, q));
            }
        }
    }

    if !cur.done() {
        return None;
    }

    // An unspecified coarser component forbids a fully-specified finer one.
    let fully_specified = |c: &Option<String>| {
        c.as_deref()
            .is_some_and(|s| !s.contains(UNSPECIFIED_DIGIT))
    };
    if year_digits.contains(UNSPECIFIED_DIGIT) && fully_specified(&month) {
        return None;
    }
    if month.as_deref().is_some_and(|m| m.contains(UNSPECIFIED_DIGIT)) && fully_specified(&day) {
        return None;
    }

    Some(ParsedDate {
        year_digits,
        year_negative,
        year_is_extended,
        year_exponent,
        year_significant_digits,
        month,
        day,
        time,
        year_qualifier,
        month_qualifier,
        day_qualifier,
    })
}

/// Resolves exponent notation into a plain year string.
///
/// `base` may carry a leading negative sign; it is preserved through the
/// multiplication. Without an exponent the base is returned unchanged, and
/// a base this function cannot interpret (a precondition violation caught
/// upstream by the round-trip check) comes back unchanged as well.
pub fn expand_year(base: &str, exponent: Option<i32>) -> String {
    let Some(exp) = exponent else {
        return base.to_owned();
    };
    let Ok(base_int) = base.parse::<i128>() else {
        return base.to_owned();
    };
    let Some(multiplier) = 10i128.checked_pow(exp.unsigned_abs()) else {
        return base.to_owned();
    };
    if exp >= 0 {
        base_int
            .checked_mul(multiplier)
            .map_or_else(|| base.to_owned(), |year| year.to_string())
    } else {
        (base_int / multiplier).to_string()
    }
}

/// Byte cursor over an ASCII date token. Any non-ASCII byte simply fails
/// to match a grammar class, so slices below always fall on char
/// boundaries.
struct Cursor<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }

    fn peek(&self) -> Option<u8> {
        self.input.as_bytes().get(self.pos).copied()
    }

    fn eat(&mut self, byte: u8) -> bool {
        if self.peek() == Some(byte) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn eat_qualifier(&mut self) -> Option<Qualifier> {
        let q = self.peek().and_then(|b| Qualifier::from_marker(b as char))?;
        self.pos += 1;
        Some(q)
    }

    fn is_component_byte(byte: u8) -> bool {
        byte.is_ascii_digit() || byte == UNSPECIFIED_DIGIT as u8
    }

    /// One or more digits or unspecified-digit markers.
    fn eat_digit_run(&mut self) -> Option<&'a str> {
        let start = self.pos;
        while self.peek().is_some_and(Self::is_component_byte) {
            self.pos += 1;
        }
        (self.pos > start).then(|| &self.input[start..self.pos])
    }

    /// Exactly two digits or unspecified-digit markers.
    fn eat_component(&mut self) -> Option<&'a str> {
        let start = self.pos;
        for _ in 0..2 {
            if !self.peek().is_some_and(Self::is_component_byte) {
                return None;
            }
            self.pos += 1;
        }
        Some(&self.input[start..self.pos])
    }

    fn eat_unsigned_int(&mut self) -> Option<u32> {
        let start = self.pos;
        while self.peek().is_some_and(|b| b.is_ascii_digit()) {
            self.pos += 1;
        }
        (self.pos > start).then(|| self.input[start..self.pos].parse().ok())?
    }

    fn eat_signed_int(&mut self) -> Option<i32> {
        let start = self.pos;
        self.eat(b'-');
        while self.peek().is_some_and(|b| b.is_ascii_digit()) {
            self.pos += 1;
        }
        if self.input[start..self.pos].chars().any(|c| c.is_ascii_digit()) {
            self.input[start..self.pos].parse().ok()
        } else {
            None
        }
    }

    fn done(&self) -> bool {
        self.pos == self.input.len()
    }
}
