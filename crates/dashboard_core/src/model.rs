//! Records received from (or sent to) the backend.
//!
//! Field names follow the wire format; serde renames cover the camelCase
//! fields the news endpoint uses.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// Stable identity of a news article, synthesised from its content when the
/// page is fetched. Articles carry no server-side id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ArticleId(String);

impl ArticleId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ArticleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct NewsArticle {
    pub title: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub description: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub url: String,
    #[serde(
        rename = "urlToImage",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub image_url: Option<String>,
    #[serde(
        rename = "publishedAt",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub published_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
}

/// A fetched article paired with its synthesised identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewsItem {
    pub id: ArticleId,
    pub article: NewsArticle,
}

impl NewsItem {
    pub fn new(id: ArticleId, article: NewsArticle) -> Self {
        Self { id, article }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NewsCategory {
    Business,
    Entertainment,
    Health,
    Science,
    Sports,
    Technology,
}

impl NewsCategory {
    pub const ALL: [NewsCategory; 6] = [
        NewsCategory::Business,
        NewsCategory::Entertainment,
        NewsCategory::Health,
        NewsCategory::Science,
        NewsCategory::Sports,
        NewsCategory::Technology,
    ];

    /// Value used in the `category` query parameter.
    pub fn as_query(self) -> &'static str {
        match self {
            NewsCategory::Business => "business",
            NewsCategory::Entertainment => "entertainment",
            NewsCategory::Health => "health",
            NewsCategory::Science => "science",
            NewsCategory::Sports => "sports",
            NewsCategory::Technology => "technology",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        Self::ALL
            .into_iter()
            .find(|category| category.as_query().eq_ignore_ascii_case(raw))
    }
}

impl fmt::Display for NewsCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_query())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SearchResult {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub link: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub snippet: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadRecord {
    pub id: i64,
    pub filename: String,
    #[serde(default)]
    pub size: u64,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub uploaded_at: String,
}

impl UploadRecord {
    /// Size in kilobytes, rounded to the nearest whole number.
    pub fn size_kb(&self) -> u64 {
        (self.size + 512) / 1024
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub id: i64,
    #[serde(alias = "event_type")]
    pub action: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub created_at: String,
}

/// A single quote. Numeric fields are kept as display text because the
/// backend relays them as strings; JSON numbers are accepted too.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockQuote {
    pub symbol: String,
    #[serde(default, deserialize_with = "text_or_number")]
    pub price: String,
    #[serde(
        default,
        deserialize_with = "optional_text_or_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub change: Option<String>,
    #[serde(
        default,
        deserialize_with = "optional_text_or_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub change_percent: Option<String>,
    #[serde(
        default,
        deserialize_with = "optional_text_or_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub high: Option<String>,
    #[serde(
        default,
        deserialize_with = "optional_text_or_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub low: Option<String>,
}

/// Payload of `POST /report/build`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportRequest {
    pub title: String,
    pub news: Vec<NewsArticle>,
    pub stock: Option<StockQuote>,
    pub uploads: Vec<String>,
    pub notes: String,
}

/// Reply of `POST /report/build`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct ReportReceipt {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub filename: Option<String>,
}

impl ReportReceipt {
    /// Direct URL if given, otherwise `/reports/<filename>`.
    pub fn resolved_url(&self) -> Option<String> {
        if let Some(url) = self.url.as_deref().filter(|url| !url.is_empty()) {
            return Some(url.to_string());
        }
        self.filename
            .as_deref()
            .filter(|name| !name.is_empty())
            .map(|name| format!("/reports/{name}"))
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum TextOrNumber {
    Text(String),
    Int(i64),
    Float(f64),
}

impl TextOrNumber {
    fn into_text(self) -> String {
        match self {
            TextOrNumber::Text(text) => text,
            TextOrNumber::Int(value) => value.to_string(),
            TextOrNumber::Float(value) => value.to_string(),
        }
    }
}

fn text_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(optional_text_or_number(deserializer)?.unwrap_or_default())
}

fn optional_text_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<TextOrNumber>::deserialize(deserializer)?;
    Ok(value.map(TextOrNumber::into_text))
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn receipt_prefers_direct_url() {
        let receipt = ReportReceipt {
            url: Some("/reports/a.pdf".into()),
            filename: Some("b.pdf".into()),
        };
        assert_eq!(receipt.resolved_url().as_deref(), Some("/reports/a.pdf"));
    }

    #[test]
    fn receipt_derives_url_from_filename() {
        let receipt = ReportReceipt {
            url: None,
            filename: Some("weekly.txt".into()),
        };
        assert_eq!(receipt.resolved_url().as_deref(), Some("/reports/weekly.txt"));
        assert_eq!(ReportReceipt::default().resolved_url(), None);
    }

    #[test]
    fn size_rounds_to_nearest_kb() {
        let record = UploadRecord {
            id: 1,
            filename: "a.csv".into(),
            size: 1536,
            uploaded_at: String::new(),
        };
        assert_eq!(record.size_kb(), 2);
    }

    #[test]
    fn category_parse_is_case_insensitive() {
        assert_eq!(NewsCategory::parse(" Sports "), Some(NewsCategory::Sports));
        assert_eq!(NewsCategory::parse("weather"), None);
    }
}
