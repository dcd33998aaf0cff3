use chrono::NaiveDate;
use dashboard_model::{NewsItem, QuoteRecord, VolatilitySummary};
use dotenvy::dotenv;
use gnews_api::api::GnewsAPI;
use gnews_api::filter::filter_by_date_range;
use log::{debug, error, warn};
use serde::{Deserialize, Serialize};
use std::{env, process::exit};
use yahoo_api::api::YahooAPI;

use actix_web::{App, HttpResponse, HttpServer, Responder, get, middleware::Logger, web};

mod utils;

#[derive(Serialize)]
struct HealthcheckResponse {
    status: String,
}

#[derive(Deserialize)]
struct RangeQuery {
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
}

#[derive(Deserialize)]
struct DashboardQuery {
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
    query: Option<String>,
}

#[derive(Serialize)]
struct DashboardResponse {
    ticker: String,
    quotes: Vec<QuoteRecord>,
    volatility: Option<VolatilitySummary>,
    news: Vec<NewsItem>,
    query_news: Option<Vec<NewsItem>>,
}

fn summarize_rounded(history: &[QuoteRecord]) -> Option<VolatilitySummary> {
    match volatility::summarize(history) {
        Ok(summary) => Some(VolatilitySummary {
            volatility: utils::round3(summary.volatility),
            highest: utils::round3(summary.highest),
            lowest: utils::round3(summary.lowest),
        }),
        Err(e) => {
            debug!("summarize_rounded | volatility undefined: {}", e);
            None
        }
    }
}

#[get("/quotes/{ticker}")]
async fn get_quotes(
    ticker: web::Path<String>,
    range: web::Query<RangeQuery>,
    api: web::Data<YahooAPI>,
) -> impl Responder {
    let sanitized_ticker = utils::sanitize_ticker(ticker.to_string());
    let (start, end) = utils::resolve_range(range.start, range.end);
    match api.get_history(&sanitized_ticker, start, end).await {
        Ok(history) => web::Json(history),
        Err(e) => {
            warn!("get_quotes | {}: {}", sanitized_ticker, e);
            web::Json(vec![])
        }
    }
}

#[get("/volatility/{ticker}")]
async fn get_volatility(
    ticker: web::Path<String>,
    range: web::Query<RangeQuery>,
    api: web::Data<YahooAPI>,
) -> impl Responder {
    let sanitized_ticker = utils::sanitize_ticker(ticker.to_string());
    let (start, end) = utils::resolve_range(range.start, range.end);
    let history = match api.get_history(&sanitized_ticker, start, end).await {
        Ok(history) => history,
        Err(e) => {
            warn!("get_volatility | {}: {}", sanitized_ticker, e);
            vec![]
        }
    };
    web::Json(summarize_rounded(&history))
}

#[get("/news/{query}")]
async fn get_news(
    query: web::Path<String>,
    range: web::Query<RangeQuery>,
    api: web::Data<GnewsAPI>,
) -> impl Responder {
    let (start, end) = utils::resolve_range(range.start, range.end);
    let entries = match api.search(&query).await {
        Ok(entries) => entries,
        Err(e) => {
            warn!("get_news | {:?}: {}", query.as_str(), e);
            vec![]
        }
    };
    web::Json(filter_by_date_range(entries, start, end))
}

#[get("/dashboard/{ticker}")]
async fn get_dashboard(
    ticker: web::Path<String>,
    params: web::Query<DashboardQuery>,
    yahoo: web::Data<YahooAPI>,
    gnews: web::Data<GnewsAPI>,
) -> impl Responder {
    let sanitized_ticker = utils::sanitize_ticker(ticker.to_string());
    let (start, end) = utils::resolve_range(params.start, params.end);

    let quotes = match yahoo.get_history(&sanitized_ticker, start, end).await {
        Ok(history) => history,
        Err(e) => {
            warn!("get_dashboard | quotes {}: {}", sanitized_ticker, e);
            vec![]
        }
    };
    let volatility = summarize_rounded(&quotes);

    let news = match gnews.search(&sanitized_ticker).await {
        Ok(entries) => filter_by_date_range(entries, start, end),
        Err(e) => {
            warn!("get_dashboard | news {}: {}", sanitized_ticker, e);
            vec![]
        }
    };

    let query_news = match &params.query {
        Some(query) => Some(match gnews.search(query).await {
            Ok(entries) => filter_by_date_range(entries, start, end),
            Err(e) => {
                warn!("get_dashboard | news {:?}: {}", query, e);
                vec![]
            }
        }),
        None => None,
    };

    web::Json(DashboardResponse {
        ticker: sanitized_ticker,
        quotes,
        volatility,
        news,
        query_news,
    })
}

#[get("/healthcheck")]
async fn healthcheck() -> impl Responder {
    web::Json(HealthcheckResponse {
        status: "ok".to_string(),
    })
}

async fn not_found() -> impl Responder {
    HttpResponse::NotFound().json(HealthcheckResponse {
        status: "not found".to_string(),
    })
}

struct Config {
    workers: usize,
}

impl Config {
    fn new() -> Result<Config, Box<dyn std::error::Error>> {
        dotenv().ok();

        let mut workers: usize = env::var("DASHBOARD_API_WORKERS")?.parse()?;

        if workers == 0 {
            workers = 1;
        }

        let config = Config { workers };
        Ok(config)
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));
    let config = match Config::new() {
        Ok(config) => config,
        Err(e) => {
            error!("Could not create config: {}", e);
            exit(1);
        }
    };

    let yahoo_api = web::Data::new(YahooAPI::new());
    let gnews_api = web::Data::new(GnewsAPI::new());

    HttpServer::new(move || {
        App::new()
            .app_data(yahoo_api.clone())
            .app_data(gnews_api.clone())
            .service(healthcheck)
            .service(get_quotes)
            .service(get_volatility)
            .service(get_news)
            .service(get_dashboard)
            .default_service(web::to(not_found))
            .wrap(Logger::default())
    })
    .bind(("0.0.0.0", 8080))?
    .workers(config.workers)
    .run()
    .await
}
