/// Current UTC timestamp in milliseconds.
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Current UTC calendar date.
pub fn today_utc() -> chrono::NaiveDate {
    chrono::Utc::now().date_naive()
}
