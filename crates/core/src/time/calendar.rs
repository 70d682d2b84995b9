use chrono::{DateTime, NaiveDate, Utc};

/// Returns `count` consecutive calendar dates starting the day after `last_date`.
///
/// Stepping is done on `NaiveDate`, so there is no timezone or DST involvement:
/// each element is exactly one calendar day after the previous one.
pub fn next_dates(count: usize, last_date: NaiveDate) -> Vec<NaiveDate> {
    last_date.iter_days().skip(1).take(count).collect()
}

/// Calendar date used when there is no prior series to extend.
pub fn today(now_utc: DateTime<Utc>) -> NaiveDate {
    now_utc.date_naive()
}
