use time::OffsetDateTime;

/// Current UTC year, used for the footer copyright line.
pub fn current_year() -> i32 {
    OffsetDateTime::now_utc().year()
}

/// UTC year of a Unix timestamp, `None` when out of range.
pub fn year_from_unix(secs: i64) -> Option<i32> {
    OffsetDateTime::from_unix_timestamp(secs)
        .ok()
        .map(OffsetDateTime::year)
}
