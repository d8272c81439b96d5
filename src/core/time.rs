use chrono::{Local, NaiveDate};

/// The current calendar day on the local clock. All status derivation and
/// bucketing compares dates at this granularity, never timestamps.
pub fn local_today() -> NaiveDate {
    Local::now().date_naive()
}
