use chrono::{DateTime, NaiveDate, NaiveTime};
use dashboard_model::QuoteRecord;
use log::debug;
use serde::Deserialize;
use std::error::Error;
use std::fmt;

const YAHOO_BASE_API_URL: &str = "https://query1.finance.yahoo.com";

#[derive(Debug, Deserialize)]
struct ChartJSON {
    chart: Chart,
}

#[derive(Debug, Deserialize)]
struct Chart {
    result: Option<Vec<ChartResult>>,
}

#[derive(Debug, Deserialize)]
struct ChartResult {
    #[serde(default)]
    timestamp: Vec<i64>,
    indicators: Indicators,
}

#[derive(Debug, Deserialize)]
struct Indicators {
    quote: Vec<Quote>,
    #[serde(default)]
    adjclose: Vec<AdjClose>,
}

// Yahoo pads non-trading cells with nulls, hence Option elements
#[derive(Debug, Deserialize)]
struct Quote {
    open: Vec<Option<f64>>,
    high: Vec<Option<f64>>,
    low: Vec<Option<f64>>,
    close: Vec<Option<f64>>,
    volume: Vec<Option<i64>>,
}

#[derive(Debug, Deserialize)]
struct AdjClose {
    adjclose: Vec<Option<f64>>,
}

#[derive(Clone)]
pub struct YahooAPI {
    base_url: &'static str,
    client: reqwest::Client,
}

impl YahooAPI {
    pub fn new() -> Self {
        return YahooAPI {
            base_url: YAHOO_BASE_API_URL,
            client: reqwest::Client::new(),
        };
    }

    pub async fn get_history(
        &self,
        ticker: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<QuoteRecord>, Box<dyn Error>> {
        let period1 = start.and_time(NaiveTime::MIN).and_utc().timestamp();
        // period2 is exclusive upstream, so step past the requested end day
        let period2 = end
            .succ_opt()
            .unwrap_or(end)
            .and_time(NaiveTime::MIN)
            .and_utc()
            .timestamp();

        let url = format!(
            "{}/v8/finance/chart/{}?period1={}&period2={}&interval=1d&events=div%2Csplits",
            self.base_url, ticker, period1, period2
        );

        debug!("get_history | url: {}", url);

        let json = self
            .client
            .get(&url)
            .send()
            .await?
            .json::<ChartJSON>()
            .await?;

        extract_history(json)
    }
}

fn extract_history(json: ChartJSON) -> Result<Vec<QuoteRecord>, Box<dyn Error>> {
    let result = match json.chart.result {
        Some(result) => result,
        None => return Err(Box::new(CustomError::NotFound)),
    };
    let base = match result.into_iter().next() {
        Some(base) => base,
        None => return Err(Box::new(CustomError::NotFound)),
    };

    if base.timestamp.is_empty() {
        return Err(Box::new(CustomError::NoData));
    }

    let quote = match base.indicators.quote.into_iter().next() {
        Some(quote) => quote,
        None => return Err(Box::new(CustomError::NoData)),
    };
    let adjclose = base
        .indicators
        .adjclose
        .into_iter()
        .next()
        .map(|a| a.adjclose)
        .unwrap_or_default();

    let mut history = Vec::new();
    for (i, ts) in base.timestamp.iter().enumerate() {
        let date = match DateTime::from_timestamp(*ts, 0) {
            Some(dt) => dt.date_naive(),
            None => continue,
        };

        let close = quote.close.get(i).copied().flatten().unwrap_or_default();
        if close == 0.0 {
            // null or zero cells mark halted/non-trading rows
            continue;
        }

        history.push(QuoteRecord {
            date,
            open: quote.open.get(i).copied().flatten().unwrap_or_default(),
            high: quote.high.get(i).copied().flatten().unwrap_or_default(),
            low: quote.low.get(i).copied().flatten().unwrap_or_default(),
            close,
            adj_close: adjclose.get(i).copied().flatten().unwrap_or(close),
            volume: quote.volume.get(i).copied().flatten().unwrap_or_default(),
        });
    }

    Ok(history)
}

#[derive(Debug)]
pub enum CustomError {
    NotFound,
    NoData,
}

impl fmt::Display for CustomError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            CustomError::NotFound => write!(f, "Not found"),
            CustomError::NoData => write!(f, "No data"),
        }
    }
}

impl Error for CustomError {}
