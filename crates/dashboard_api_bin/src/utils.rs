use chrono::{Days, Local, NaiveDate};

pub fn sanitize_ticker(ticker: String) -> String {
    return ticker
        .chars()
        .take(20)
        .filter(|c| c.is_alphanumeric() || *c == '-' || *c == '.')
        .collect::<String>()
        .to_uppercase();
}

pub fn round3(value: f64) -> f64 {
    return (value * 1000.0).round() / 1000.0;
}

/// Missing bounds fall back to the last ~10 years ending today.
pub fn resolve_range(start: Option<NaiveDate>, end: Option<NaiveDate>) -> (NaiveDate, NaiveDate) {
    let end = end.unwrap_or_else(|| Local::now().date_naive());
    let start = start.unwrap_or_else(|| end.checked_sub_days(Days::new(3650)).unwrap_or(end));
    (start, end)
}
