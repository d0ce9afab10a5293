use crate::types::Hemisphere;

/// Placeholder character standing in for an unknown digit.
pub const UNSPECIFIED_DIGIT: char = 'X';

/// Marks an uncertain component.
pub const UNCERTAIN_MARKER: char = '?';
/// Marks an approximate component.
pub const APPROXIMATE_MARKER: char = '~';
/// Marks a component that is both approximate and uncertain.
pub const APPROXIMATE_UNCERTAIN_MARKER: char = '%';

/// Prefix permitting years outside the default 4-digit range.
pub const EXTENDED_YEAR_MARKER: char = 'Y';
/// Introduces a power-of-ten multiplier inside an extended year.
pub const EXPONENT_MARKER: char = 'E';
/// Introduces a significant-digit count inside an extended year.
pub const SIGNIFICANT_DIGIT_MARKER: char = 'S';

/// Separates the date part from the time-of-day part.
pub const TIME_SEPARATOR: char = 'T';
/// Separates date components (ISO 8601 bias).
pub const DATE_SEPARATOR: char = '-';
/// Separates the two endpoints of an interval.
pub const INTERVAL_SEPARATOR: char = '/';
/// Denotes an open interval endpoint or an open-ended set member.
pub const OPEN_ENDPOINT: &str = "..";

/// Digit count of a non-extended year.
pub const YEAR_DIGITS: usize = 4;

/// A fully-unspecified year, commonly used for undated records.
pub const UNDATED: &str = "XXXX";

/// Maximum valid calendar month (December)
pub const MAX_MONTH: u8 = 12;
/// Month number for February
pub const FEBRUARY: u8 = 2;
/// Days in February for leap years
pub const FEBRUARY_DAYS_LEAP: u8 = 29;

/// Maximum days in each month (index 0 is unused, months are 1-indexed)
/// February shows 28 days (non-leap year default)
pub const DAYS_IN_MONTH: [u8; 13] = [
    0,  // index 0 unused (months are 1-indexed)
    31, // January
    28, // February (non-leap, adjusted by is_leap_year check)
    31, // March
    30, // April
    31, // May
    30, // June
    31, // July
    31, // August
    30, // September
    31, // October
    30, // November
    31, // December
];

/// Leap year occurs every 4 years
pub(crate) const LEAP_YEAR_CYCLE: i64 = 4;
/// Century years are not leap years unless...
pub(crate) const CENTURY_CYCLE: i64 = 100;
/// ...they are divisible by 400 (Gregorian calendar correction)
pub(crate) const GREGORIAN_CYCLE: i64 = 400;

/// Abbreviated and full display names for every recognized month code:
/// calendar months `01`-`12`, seasons `21`-`32` (generic, northern, southern),
/// quarters `33`-`36`, quadrimesters `37`-`39`, and semesters `40`-`41`.
///
/// Returns `None` for anything else, which doubles as the month-code
/// validity check.
pub fn month_display(code: &str) -> Option<(&'static str, &'static str)> {
    let names = match code {
        "01" => ("Jan", "January"),
        "02" => ("Feb", "February"),
        "03" => ("Mar", "March"),
        "04" => ("Apr", "April"),
        "05" => ("May", "May"),
        "06" => ("Jun", "June"),
        "07" => ("Jul", "July"),
        "08" => ("Aug", "August"),
        "09" => ("Sep", "September"),
        "10" => ("Oct", "October"),
        "11" => ("Nov", "November"),
        "12" => ("Dec", "December"),
        "21" => ("Spr", "Spring"),
        "22" => ("Sum", "Summer"),
        "23" => ("Aut", "Autumn"),
        "24" => ("Win", "Winter"),
        "25" => ("Spr", "Spring - Northern Hemisphere"),
        "26" => ("Sum", "Summer - Northern Hemisphere"),
        "27" => ("Aut", "Autumn - Northern Hemisphere"),
        "28" => ("Win", "Winter - Northern Hemisphere"),
        "29" => ("Spr", "Spring - Southern Hemisphere"),
        "30" => ("Sum", "Summer - Southern Hemisphere"),
        "31" => ("Aut", "Autumn - Southern Hemisphere"),
        "32" => ("Win", "Winter - Southern Hemisphere"),
        "33" => ("Q1", "Quarter 1"),
        "34" => ("Q2", "Quarter 2"),
        "35" => ("Q3", "Quarter 3"),
        "36" => ("Q4", "Quarter 4"),
        // No standardized abbreviations exist for these.
        "37" => ("Quad1", "Quadrimester 1"),
        "38" => ("Quad2", "Quadrimester 2"),
        "39" => ("Quad3", "Quadrimester 3"),
        "40" => ("Sem1", "Semestral 1"),
        "41" => ("Sem2", "Semestral 2"),
        _ => return None,
    };
    Some(names)
}

/// True when `code` denotes a non-calendar period (season, quarter,
/// quadrimester, or semester).
pub fn is_season_code(code: &str) -> bool {
    code.parse::<u8>().is_ok_and(|n| (21..=41).contains(&n))
}

/// True when `code` is a plain calendar month, `01`-`12`.
pub fn is_calendar_month(code: &str) -> bool {
    code.parse::<u8>().is_ok_and(|n| (1..=MAX_MONTH).contains(&n))
}

/// Representative calendar month for a season/quarter/semester code.
///
/// The generic seasons `21`-`24` map to their equinox/solstice month in the
/// requested hemisphere; the explicitly-hemisphered codes `25`-`32` ignore
/// the parameter; quarters, quadrimesters, and semesters map to their first
/// month.
pub fn season_month(code: &str, hemisphere: Hemisphere) -> Option<&'static str> {
    let month = match (code, hemisphere) {
        ("21", Hemisphere::North) | ("23", Hemisphere::South) | ("25", _) | ("31", _) => "03",
        ("22", Hemisphere::North) | ("24", Hemisphere::South) | ("26", _) | ("32", _) => "06",
        ("23", Hemisphere::North) | ("21", Hemisphere::South) | ("27", _) | ("29", _) => "09",
        ("24", Hemisphere::North) | ("22", Hemisphere::South) | ("28", _) | ("30", _) => "12",
        ("33", _) | ("37", _) | ("40", _) => "01",
        ("34", _) => "04",
        ("38", _) => "05",
        ("35", _) | ("41", _) => "07",
        ("39", _) => "09",
        ("36", _) => "10",
        _ => return None,
    };
    Some(month)
}
