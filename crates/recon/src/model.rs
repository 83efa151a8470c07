use std::collections::BTreeMap;

use serde::de::Deserializer;
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

use crate::calendar::Month;

// ---------------------------------------------------------------------------
// Input
// ---------------------------------------------------------------------------

/// A monitored product from the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Product {
    pub name: String,
    /// May be empty.
    pub origin: String,
    /// Harvest window expression, e.g. `"DEZ-MAR"`.
    pub harvest_window: Option<String>,
}

impl Product {
    pub fn new(name: impl Into<String>, origin: impl Into<String>, harvest_window: Option<&str>) -> Self {
        Self {
            name: name.into(),
            origin: origin.into(),
            harvest_window: harvest_window.map(str::to_string),
        }
    }
}

/// Market outlook attached to an analysis.
///
/// Known tokens are `POSITIVO`, `NEUTRO` and `NEGATIVO`. Anything else is kept
/// verbatim in `Other` and never matches a known category.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Sentiment {
    Positive,
    Neutral,
    Negative,
    Other(String),
}

impl Sentiment {
    /// The three recognized categories, in display order.
    pub const KNOWN: [Sentiment; 3] = [Sentiment::Positive, Sentiment::Neutral, Sentiment::Negative];

    /// Parse a stored token. Returns `None` for empty input.
    pub fn parse(raw: &str) -> Option<Sentiment> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return None;
        }
        Some(match trimmed.to_uppercase().as_str() {
            "POSITIVO" => Self::Positive,
            "NEUTRO" => Self::Neutral,
            "NEGATIVO" => Self::Negative,
            _ => Self::Other(trimmed.to_string()),
        })
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Positive => "POSITIVO",
            Self::Neutral => "NEUTRO",
            Self::Negative => "NEGATIVO",
            Self::Other(raw) => raw,
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, Self::Other(_))
    }
}

impl std::fmt::Display for Sentiment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Serialize for Sentiment {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// A source reference attached to an analysis.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SourceLink {
    #[serde(rename = "titulo", default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub url: String,
    #[serde(rename = "data", default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
}

/// A sentiment analysis for one product/country pair.
///
/// Deserializes from the analysis payload (`produto`, `pais`, `sentimento`,
/// `resumo`, `links`). Missing or null fields read as empty.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AnalysisRecord {
    #[serde(rename = "produto", default, deserialize_with = "null_as_default")]
    pub product: String,
    #[serde(rename = "pais", default, deserialize_with = "null_as_default")]
    pub country: String,
    #[serde(
        rename = "sentimento",
        default,
        deserialize_with = "deserialize_sentiment",
        skip_serializing_if = "Option::is_none"
    )]
    pub sentiment: Option<Sentiment>,
    #[serde(rename = "resumo", default, deserialize_with = "null_as_default")]
    pub summary: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub links: Vec<SourceLink>,
}

/// Deserialize a possibly-null field, reading `null` as `T::default()`.
pub fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn deserialize_sentiment<'de, D>(deserializer: D) -> Result<Option<Sentiment>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.as_deref().and_then(Sentiment::parse))
}

/// Immutable point-in-time copy of both record sets.
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    pub products: Vec<Product>,
    pub analyses: Vec<AnalysisRecord>,
}

// ---------------------------------------------------------------------------
// Calendar
// ---------------------------------------------------------------------------

/// Active flag for each of the 12 months. Always exactly 12 entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MonthSet([bool; 12]);

impl MonthSet {
    pub fn empty() -> Self {
        Self([false; 12])
    }

    pub fn insert(&mut self, month: Month) {
        self.0[month.index()] = true;
    }

    pub fn contains(&self, month: Month) -> bool {
        self.0[month.index()]
    }

    /// Active months in calendar order.
    pub fn active(&self) -> impl Iterator<Item = Month> + '_ {
        Month::ALL.into_iter().filter(|m| self.contains(*m))
    }

    pub fn active_count(&self) -> usize {
        self.0.iter().filter(|a| **a).count()
    }

    pub fn is_empty(&self) -> bool {
        self.active_count() == 0
    }
}

impl Serialize for MonthSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(12))?;
        for m in Month::ALL {
            map.serialize_entry(m.code(), &self.contains(m))?;
        }
        map.end()
    }
}

/// One product as placed on the harvest calendar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CalendarEntry {
    pub product: String,
    pub origin: String,
    pub tracked_in_report: bool,
    pub active_months: MonthSet,
}

// ---------------------------------------------------------------------------
// Month buckets
// ---------------------------------------------------------------------------

/// Display classification of a product inside a month bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SentimentMarker {
    Positive,
    Neutral,
    Negative,
    /// Tracked, but the sentiment is missing or unrecognized.
    Unknown,
    Untracked,
}

impl SentimentMarker {
    pub fn for_sentiment(tracked: bool, sentiment: Option<&Sentiment>) -> Self {
        if !tracked {
            return Self::Untracked;
        }
        match sentiment {
            Some(Sentiment::Positive) => Self::Positive,
            Some(Sentiment::Neutral) => Self::Neutral,
            Some(Sentiment::Negative) => Self::Negative,
            Some(Sentiment::Other(_)) | None => Self::Unknown,
        }
    }

    /// Single-character glyph for text output.
    pub fn glyph(&self) -> &'static str {
        match self {
            Self::Positive => "+",
            Self::Neutral => "=",
            Self::Negative => "-",
            Self::Unknown => "•",
            Self::Untracked => "○",
        }
    }
}

impl std::fmt::Display for SentimentMarker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Positive => write!(f, "positive"),
            Self::Neutral => write!(f, "neutral"),
            Self::Negative => write!(f, "negative"),
            Self::Unknown => write!(f, "unknown"),
            Self::Untracked => write!(f, "untracked"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BucketItem {
    pub product: String,
    pub origin: String,
    pub tracked: bool,
    pub marker: SentimentMarker,
}

/// Products per month, in calendar order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MonthBuckets([Vec<BucketItem>; 12]);

impl MonthBuckets {
    pub fn get(&self, month: Month) -> &[BucketItem] {
        &self.0[month.index()]
    }

    pub(crate) fn get_mut(&mut self, month: Month) -> &mut Vec<BucketItem> {
        &mut self.0[month.index()]
    }

    pub fn iter(&self) -> impl Iterator<Item = (Month, &[BucketItem])> + '_ {
        Month::ALL.into_iter().map(move |m| (m, self.get(m)))
    }
}

impl Serialize for MonthBuckets {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(12))?;
        for (m, items) in self.iter() {
            map.serialize_entry(m.code(), items)?;
        }
        map.end()
    }
}

// ---------------------------------------------------------------------------
// Statistics
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Distributions {
    pub sentiments: BTreeMap<Sentiment, usize>,
    pub countries: BTreeMap<String, usize>,
}

impl Distributions {
    pub fn sentiment_count(&self, sentiment: &Sentiment) -> usize {
        self.sentiments.get(sentiment).copied().unwrap_or(0)
    }

    pub fn country_count(&self, country: &str) -> usize {
        self.countries.get(country).copied().unwrap_or(0)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Metrics {
    pub total_products: usize,
    pub tracked_products: usize,
    pub total_analyses: usize,
    pub positive: usize,
    pub neutral: usize,
    pub negative: usize,
}

// ---------------------------------------------------------------------------
// Report
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
pub struct ReportMeta {
    pub engine_version: String,
    pub generated_at: String,
}

/// Everything derived from one snapshot.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub meta: ReportMeta,
    pub metrics: Metrics,
    pub calendar: Vec<CalendarEntry>,
    pub months: MonthBuckets,
    pub distributions: Distributions,
}
