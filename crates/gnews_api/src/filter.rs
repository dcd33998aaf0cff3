use chrono::NaiveDate;
use dashboard_model::NewsItem;
use itertools::Itertools;

/// Keep entries whose UTC calendar date falls inside [start, end], both
/// bounds inclusive, newest date first. Same-date entries have no defined
/// relative order since the key drops the time of day. An inverted range
/// simply matches nothing.
pub fn filter_by_date_range(
    entries: Vec<NewsItem>,
    start: NaiveDate,
    end: NaiveDate,
) -> Vec<NewsItem> {
    entries
        .into_iter()
        .filter(|entry| {
            let date = entry.published_at.date_naive();
            start <= date && date <= end
        })
        .sorted_by(|a, b| {
            b.published_at
                .date_naive()
                .cmp(&a.published_at.date_naive())
        })
        .collect()
}
