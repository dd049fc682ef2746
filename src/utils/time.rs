//! Calendar helpers.

use std::time::SystemTime;

/// Current UTC year.
pub fn current_year() -> i32 {
    let secs = SystemTime::now()
        .duration_since(SystemTime::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);
    #[allow(clippy::cast_possible_wrap)]
    year_from_days((secs / 86_400) as i64)
}

/// Gregorian year of a day count since 1970-01-01.
fn year_from_days(days: i64) -> i32 {
    // days-from-civil inverse, eras of 400 years starting 0000-03-01
    let z = days + 719_468;
    let era = z.div_euclid(146_097);
    let doe = z.rem_euclid(146_097);
    let yoe = (doe - doe / 1460 + doe / 36_524 - doe / 146_096) / 365;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let month = if mp < 10 { mp + 3 } else { mp - 9 };
    let year = yoe + era * 400 + i64::from(month <= 2);
    #[allow(clippy::cast_possible_truncation)]
    {
        year as i32
    }
}
