use chrono::{Datelike, Duration, NaiveDate};

pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

pub fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()
}

/// Monday of the week containing `d`.
pub fn week_start(d: NaiveDate) -> NaiveDate {
    d - Duration::days(d.weekday().num_days_from_monday() as i64)
}

/// First day of the month containing `d`.
pub fn month_start(d: NaiveDate) -> NaiveDate {
    NaiveDate::from_ymd_opt(d.year(), d.month(), 1).unwrap_or(d)
}

/// January 1st of the year containing `d`.
pub fn year_start(d: NaiveDate) -> NaiveDate {
    NaiveDate::from_ymd_opt(d.year(), 1, 1).unwrap_or(d)
}

/// Every calendar date from `start` to `end`, both inclusive.
/// Empty when start > end.
pub fn days_inclusive(start: NaiveDate, end: NaiveDate) -> Vec<NaiveDate> {
    let mut out = Vec::new();
    let mut d = start;
    while d <= end {
        out.push(d);
        match d.succ_opt() {
            Some(next) => d = next,
            None => break,
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> NaiveDate {
        parse_date(s).unwrap()
    }

    #[test]
    fn week_starts_on_monday() {
        assert_eq!(week_start(d("2024-06-12")), d("2024-06-10")); // Wednesday
        assert_eq!(week_start(d("2024-06-10")), d("2024-06-10")); // Monday itself
        assert_eq!(week_start(d("2024-06-16")), d("2024-06-10")); // Sunday
    }

    #[test]
    fn days_inclusive_covers_both_ends() {
        let days = days_inclusive(d("2024-02-27"), d("2024-03-02"));
        assert_eq!(days.len(), 5); // leap-year February
        assert_eq!(days[0], d("2024-02-27"));
        assert_eq!(days[4], d("2024-03-02"));
    }

    #[test]
    fn days_inclusive_empty_for_inverted_range() {
        assert!(days_inclusive(d("2024-06-10"), d("2024-06-09")).is_empty());
    }
}
