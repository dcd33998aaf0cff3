use chrono::{DateTime, Utc};
use dashboard_model::NewsItem;
use log::debug;
use serde::Deserialize;
use std::error::Error;

const GNEWS_BASE_API_URL: &str = "https://news.google.com";

#[derive(Debug, Deserialize)]
struct Rss {
    channel: Channel,
}

#[derive(Debug, Deserialize)]
struct Channel {
    #[serde(rename = "item", default)]
    items: Vec<Item>,
}

#[derive(Debug, Deserialize)]
struct Item {
    title: String,
    link: String,
    #[serde(rename = "pubDate")]
    pub_date: String,
}

#[derive(Clone)]
pub struct GnewsAPI {
    base_url: &'static str,
    client: reqwest::Client,
}

impl GnewsAPI {
    pub fn new() -> Self {
        return GnewsAPI {
            base_url: GNEWS_BASE_API_URL,
            client: reqwest::Client::new(),
        };
    }

    /// Search the news feed for a free-text query. Entries come back in
    /// feed order; zero matches is an Ok empty list.
    pub async fn search(&self, query: &str) -> Result<Vec<NewsItem>, Box<dyn Error>> {
        let url = format!("{}/rss/search", self.base_url);

        debug!("search | url: {} | q: {}", url, query);

        let body = self
            .client
            .get(&url)
            .query(&[("q", query), ("hl", "en-US"), ("gl", "US"), ("ceid", "US:en")])
            .send()
            .await?
            .text()
            .await?;

        parse_feed(&body)
    }
}

fn parse_feed(xml: &str) -> Result<Vec<NewsItem>, Box<dyn Error>> {
    let rss: Rss = quick_xml::de::from_str(xml)?;

    let mut entries = Vec::new();
    for item in rss.channel.items {
        // pubDate carries the source offset; pin every entry to UTC so
        // date comparisons downstream are well-defined
        let published_at = match DateTime::parse_from_rfc2822(&item.pub_date) {
            Ok(ts) => ts.with_timezone(&Utc),
            Err(e) => {
                debug!("parse_feed | skipping entry with bad pubDate {:?}: {}", item.pub_date, e);
                continue;
            }
        };

        entries.push(NewsItem {
            published_at,
            title: item.title,
            link: item.link,
        });
    }

    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;

    const FEED_BODY: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0">
  <channel>
    <title>"BLK" - Google News</title>
    <link>https://news.google.com/search?q=BLK</link>
    <item>
      <title>BlackRock posts quarterly results</title>
      <link>https://example.com/a</link>
      <guid isPermaLink="false">abc123</guid>
      <pubDate>Fri, 06 Jan 2023 05:10:00 +0500</pubDate>
      <description>snippet</description>
    </item>
    <item>
      <title>Markets close higher</title>
      <link>https://example.com/b</link>
      <pubDate>Thu, 05 Jan 2023 23:50:00 GMT</pubDate>
    </item>
    <item>
      <title>Entry with broken date</title>
      <link>https://example.com/c</link>
      <pubDate>yesterday-ish</pubDate>
    </item>
  </channel>
</rss>"#;

    #[test]
    fn parse_feed_pass_normalizes_to_utc() {
        let entries = parse_feed(FEED_BODY).unwrap();

        // broken-date entry is skipped
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].title, "BlackRock posts quarterly results");
        // 05:10 at +0500 is 00:10 UTC
        assert_eq!(
            entries[0].published_at.to_rfc3339(),
            "2023-01-06T00:10:00+00:00"
        );
        assert_eq!(entries[1].link, "https://example.com/b");
        assert_eq!(
            entries[1].published_at.to_rfc3339(),
            "2023-01-05T23:50:00+00:00"
        );
    }

    #[test]
    fn parse_feed_pass_empty_channel() {
        let body = r#"<rss version="2.0"><channel><title>empty</title></channel></rss>"#;
        let entries = parse_feed(body).unwrap();
        assert!(entries.is_empty());
    }

    #[test]
    fn parse_feed_fail_not_xml() {
        assert!(parse_feed("<html>service unavailable</html>").is_err());
    }
}
