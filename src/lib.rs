mod consts;
mod convert;
mod expression;
mod format;
mod parser;
mod prelude;
mod types;
mod validate;
mod years;

pub use consts::*;
pub use convert::{
    ConvertError, datetime_iso8601_value, datetime_iso8601_value_with, earliest_iso8601_value,
    earliest_iso8601_value_with, iso8601_value, iso8601_value_with,
};
pub use expression::{EdtfExpression, Endpoint, ExpressionError, SetMember};
pub use format::{
    DateOrder, DateSeparator, DayFormat, FormatConfig, MonthFormat, format, format_date,
};
pub use parser::{ParseError, expand_year, parse};
pub use types::{
    Hemisphere, ParsedDate, Qualification, Qualifier, Scope, days_in_month, is_leap_year,
};
pub use validate::{ValidationError, validate, validate_date};
pub use years::{YearExtractionConfig, extract_years};
