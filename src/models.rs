use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A discounted plugin as served by the upstream deals API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Deal {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub brand: String,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub discount: String,
    #[serde(default)]
    pub original_price: String,
    #[serde(default)]
    pub sale_price: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<Timestamp>,
}

impl Deal {
    /// UTC calendar date of `lastUpdated`, if present and parseable.
    pub fn updated_on(&self) -> Option<NaiveDate> {
        self.last_updated.as_ref().and_then(Timestamp::utc_date)
    }
}

/// Raw `lastUpdated` value. Shapes other than an integer or a string are
/// kept in `Other` so one odd deal cannot fail the whole feed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Timestamp {
    Millis(i64),
    Text(String),
    Other(serde_json::Value),
}

impl Timestamp {
    pub fn utc_date(&self) -> Option<NaiveDate> {
        match self {
            Timestamp::Millis(ms) => date_from_millis(*ms),
            Timestamp::Text(raw) => parse_date_text(raw.trim()),
            Timestamp::Other(value) => value
                .as_f64()
                .filter(|ms| ms.is_finite() && ms.abs() < i64::MAX as f64)
                .and_then(|ms| date_from_millis(ms.trunc() as i64)),
        }
    }
}

fn date_from_millis(ms: i64) -> Option<NaiveDate> {
    DateTime::<Utc>::from_timestamp_millis(ms).map(|dt| dt.date_naive())
}

fn parse_date_text(raw: &str) -> Option<NaiveDate> {
    if raw.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc).date_naive());
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(dt.date());
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()
}

/// Deals grouped by the `YYYY-MM-DD` key of their update date.
///
/// Deals without a usable timestamp are kept apart in `undated` instead of
/// being filed under whatever day the grouping happens to run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct DateBuckets {
    pub days: BTreeMap<String, Vec<Deal>>,
    pub undated: Vec<Deal>,
}

impl DateBuckets {
    pub fn get(&self, key: &str) -> &[Deal] {
        self.days.get(key).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn count_on(&self, key: &str) -> usize {
        self.get(key).len()
    }

    pub fn total(&self) -> usize {
        self.days.values().map(Vec::len).sum::<usize>() + self.undated.len()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Intensity {
    None,
    Low,
    Medium,
    High,
}

impl Intensity {
    pub fn from_count(count: usize) -> Self {
        match count {
            0 => Intensity::None,
            1..=2 => Intensity::Low,
            3..=4 => Intensity::Medium,
            _ => Intensity::High,
        }
    }

    pub fn css_class(self) -> &'static str {
        match self {
            Intensity::None => "heat-none",
            Intensity::Low => "heat-low",
            Intensity::Medium => "heat-medium",
            Intensity::High => "heat-high",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarCell {
    /// Zero, negative or past the month end for padding cells.
    pub day_of_month: i32,
    pub date_key: String,
    pub is_valid_and_past: bool,
    pub deals: Vec<Deal>,
    pub intensity_bucket: Intensity,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityBar {
    pub day: u32,
    pub count: usize,
    pub height_percent: f64,
    pub level: Intensity,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarResponse {
    pub year: i32,
    pub month: u32,
    pub label: String,
    pub counts: BTreeMap<u32, usize>,
    pub max_deals: usize,
    pub cells: Vec<CalendarCell>,
    pub bars: Vec<ActivityBar>,
    pub undated: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deal_parses_camel_case_payload() {
        let deal: Deal = serde_json::from_str(
            r#"{"id":7,"name":"Pro-Q 3","brand":"FabFilter","image":"https://x/img.png",
                "discount":"30%","originalPrice":"$179","salePrice":"$125",
                "lastUpdated":"2024-03-03T22:15:00Z"}"#,
        )
        .unwrap();
        assert_eq!(deal.id, 7);
        assert_eq!(deal.sale_price, "$125");
        assert_eq!(deal.updated_on(), NaiveDate::from_ymd_opt(2024, 3, 3));
    }

    #[test]
    fn missing_display_fields_default_to_empty() {
        let deal: Deal = serde_json::from_str(r#"{"id":1,"name":"Bare"}"#).unwrap();
        assert!(deal.brand.is_empty());
        assert_eq!(deal.updated_on(), None);
    }

    #[test]
    fn timestamp_formats() {
        let march_3 = NaiveDate::from_ymd_opt(2024, 3, 3);
        assert_eq!(Timestamp::Text("2024-03-03".into()).utc_date(), march_3);
        assert_eq!(Timestamp::Text("2024-03-03 10:00:00".into()).utc_date(), march_3);
        assert_eq!(Timestamp::Text("2024-03-03T10:00:00.123".into()).utc_date(), march_3);
        // offset pushes the instant into the next UTC day
        assert_eq!(
            Timestamp::Text("2024-03-02T23:30:00-02:00".into()).utc_date(),
            march_3
        );
        assert_eq!(Timestamp::Millis(1_709_424_000_000).utc_date(), march_3);
        assert_eq!(Timestamp::Text("yesterday".into()).utc_date(), None);
        assert_eq!(Timestamp::Text("  ".into()).utc_date(), None);
    }

    #[test]
    fn odd_timestamps_do_not_break_the_list() {
        let deals: Vec<Deal> = serde_json::from_str(
            r#"[{"id":1,"name":"A","lastUpdated":"2024-03-01"},
                {"id":2,"name":"B","lastUpdated":1709424000000.0},
                {"id":3,"name":"C","lastUpdated":{"$date":"x"}},
                {"id":4,"name":"D","lastUpdated":true},
                {"id":5,"name":"E","lastUpdated":18446744073709551615},
                {"id":6,"name":"F","lastUpdated":null}]"#,
        )
        .unwrap();
        assert_eq!(deals.len(), 6);
        assert_eq!(deals[0].updated_on(), NaiveDate::from_ymd_opt(2024, 3, 1));
        assert_eq!(deals[1].updated_on(), NaiveDate::from_ymd_opt(2024, 3, 3));
        for deal in &deals[2..] {
            assert_eq!(deal.updated_on(), None, "deal {} should be undated", deal.id);
        }

        let buckets = crate::calendar::bucket_by_date(&deals);
        assert_eq!(buckets.total(), 6);
        assert_eq!(buckets.undated.len(), 4);
    }

    #[test]
    fn intensity_thresholds() {
        assert_eq!(Intensity::from_count(0), Intensity::None);
        assert_eq!(Intensity::from_count(1), Intensity::Low);
        assert_eq!(Intensity::from_count(2), Intensity::Low);
        assert_eq!(Intensity::from_count(3), Intensity::Medium);
        assert_eq!(Intensity::from_count(4), Intensity::Medium);
        assert_eq!(Intensity::from_count(5), Intensity::High);
        assert_eq!(Intensity::from_count(40), Intensity::High);
    }
}
