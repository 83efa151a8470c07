//! `safra-recon`: harvest calendar and sentiment reconciliation engine.
//!
//! Pure engine crate: receives pre-loaded product and analysis snapshots,
//! returns the month-indexed calendar and aggregate statistics.
//! No CLI or IO dependencies.

pub mod aggregate;
pub mod buckets;
pub mod builder;
pub mod calendar;
pub mod engine;
pub mod filter;
pub mod membership;
pub mod model;
pub mod views;
pub mod window;

pub use calendar::Month;
pub use engine::run;
pub use filter::AnalysisFilter;
pub use model::{
    AnalysisRecord, BucketItem, CalendarEntry, Distributions, Metrics, MonthBuckets, MonthSet, Product, Report,
    Sentiment, SentimentMarker, Snapshot, SourceLink,
};
