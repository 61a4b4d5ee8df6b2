//! Calendar arithmetic for deposit terms and payout schedules
//!
//! Month stepping clamps to the end of the target month instead of rolling
//! over, fractional terms are stepped on a 30-day-month basis, and month keys
//! sort lexically in chronological order.

use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveDateTime, TimeZone};

/// Days per month used when converting a fractional term to calendar days
pub const DAYS_PER_MONTH: f64 = 30.0;

/// Longest term a deposit record may carry (100 years)
pub const MAX_TERM_MONTHS: f64 = 1200.0;

/// Normalize a term in months: non-finite values become 0, negatives clamp to 0
pub fn sanitize_term(months: f64) -> f64 {
    if months.is_finite() {
        months.max(0.0)
    } else {
        0.0
    }
}

/// Number of days in the given month
pub fn days_in_month(year: i32, month: u32) -> u32 {
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .and_then(|first| first.pred_opt())
        .map(|last| last.day())
        .unwrap_or(31)
}

/// Step `date` by `months`, preserving the day of month where it exists
///
/// Jan 31 + 1 month is Feb 28 (Feb 29 in a leap year), never March. Results
/// past chrono's calendar range saturate at `NaiveDate::MAX` / `NaiveDate::MIN`.
pub fn add_months(date: NaiveDate, months: i32) -> NaiveDate {
    let bound = if months < 0 { NaiveDate::MIN } else { NaiveDate::MAX };
    let total = i64::from(month_index(date)) + i64::from(months);

    if total > i64::from(month_index(NaiveDate::MAX)) {
        return NaiveDate::MAX;
    }
    if total < i64::from(month_index(NaiveDate::MIN)) {
        return NaiveDate::MIN;
    }

    let year = total.div_euclid(12) as i32;
    let month = total.rem_euclid(12) as u32 + 1;
    let day = date.day().min(days_in_month(year, month));

    NaiveDate::from_ymd_opt(year, month, day).unwrap_or(bound)
}

/// Step `date` by a possibly fractional number of months
///
/// The whole part steps like [`add_months`]; the remainder is converted to
/// days on a 30-day-month basis (0.5 → 15 days) and added as calendar days.
pub fn add_term_months(date: NaiveDate, months: f64) -> NaiveDate {
    let months = sanitize_term(months);
    let whole = months.trunc();
    let extra_days = ((months - whole) * DAYS_PER_MONTH).round() as i64;

    add_months(date, whole as i32)
        .checked_add_signed(Duration::days(extra_days))
        .unwrap_or(NaiveDate::MAX)
}

/// Values that resolve to a UTC calendar date
pub trait CalendarDate {
    fn utc_date(&self) -> NaiveDate;
}

impl CalendarDate for NaiveDate {
    fn utc_date(&self) -> NaiveDate {
        *self
    }
}

/// Naive datetimes are taken to be UTC
impl CalendarDate for NaiveDateTime {
    fn utc_date(&self) -> NaiveDate {
        self.date()
    }
}

impl<Tz: TimeZone> CalendarDate for DateTime<Tz> {
    fn utc_date(&self) -> NaiveDate {
        self.naive_utc().date()
    }
}

/// Whole-day difference between the UTC dates of two values
///
/// Time of day and local offsets are ignored: `2025-03-01T23:00-05:00` and
/// `2025-03-02T01:00Z` fall on the same UTC day. `diff(a, b) == -diff(b, a)`.
pub fn difference_in_calendar_days<L, E>(later: &L, earlier: &E) -> i64
where
    L: CalendarDate,
    E: CalendarDate,
{
    later
        .utc_date()
        .signed_duration_since(earlier.utc_date())
        .num_days()
}

/// Zero-padded `YYYY-MM` bucket key
pub fn month_key(date: NaiveDate) -> String {
    format!("{:04}-{:02}", date.year(), date.month())
}

/// Display label for a month bucket, e.g. `Mar 2026`
pub fn month_label(date: NaiveDate) -> String {
    date.format("%b %Y").to_string()
}

/// Months since year 0, used to compare months regardless of day
pub fn month_index(date: NaiveDate) -> i32 {
    date.year() * 12 + date.month0() as i32
}
