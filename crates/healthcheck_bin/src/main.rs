use serde::Deserialize;
use std::fmt;

const DEFAULT_API_URL: &str = "http://localhost:8080";

#[derive(Debug)]
enum ProbeError {
    Transport(String),
    BadStatus(u16),
    NotOk(String),
}

#[derive(Debug, Deserialize)]
struct HealthcheckJSON {
    status: String,
}

impl fmt::Display for ProbeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProbeError::Transport(e) => write!(f, "Transport error: {}", e),
            ProbeError::BadStatus(code) => write!(f, "Unexpected status code: {}", code),
            ProbeError::NotOk(status) => write!(f, "Service reported status {:?}", status),
        }
    }
}

impl From<reqwest::Error> for ProbeError {
    fn from(err: reqwest::Error) -> ProbeError {
        ProbeError::Transport(err.to_string())
    }
}

fn probe(base_url: &str) -> Result<(), ProbeError> {
    let res = reqwest::blocking::get(format!("{}/healthcheck", base_url))?;
    if res.status() != 200 {
        return Err(ProbeError::BadStatus(res.status().as_u16()));
    }
    let body: HealthcheckJSON = res.json()?;
    if body.status != "ok" {
        return Err(ProbeError::NotOk(body.status));
    }
    Ok(())
}

fn main() -> Result<(), ProbeError> {
    let base_url =
        std::env::var("DASHBOARD_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());
    probe(&base_url)
}
