use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// One trading day of price history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuoteRecord {
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub adj_close: f64,
    pub volume: i64,
}

/// One entry from a news feed, timestamp normalized to UTC.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewsItem {
    pub published_at: DateTime<Utc>,
    pub title: String,
    pub link: String,
}

/// Summary statistics over one quote series. `volatility` is the sample
/// standard deviation of daily percentage returns; `highest`/`lowest`
/// are taken over closes.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct VolatilitySummary {
    pub volatility: f64,
    pub highest: f64,
    pub lowest: f64,
}
