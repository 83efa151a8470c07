use std::collections::HashMap;

use crate::calendar::Month;
use crate::membership::normalize_name;
use crate::model::{AnalysisRecord, BucketItem, CalendarEntry, MonthBuckets, Sentiment, SentimentMarker};

/// Sentiment per normalized product name.
///
/// Analyses are applied in order, so when several reference the same product
/// the last one wins.
pub fn sentiment_lookup(analyses: &[AnalysisRecord]) -> HashMap<String, Option<Sentiment>> {
    let mut lookup = HashMap::new();
    for a in analyses {
        lookup.insert(normalize_name(&a.product), a.sentiment.clone());
    }
    lookup
}

/// Place every calendar entry into each month it is active in.
///
/// Within a month, tracked products come first; relative input order is kept
/// inside each group.
pub fn bucket(entries: &[CalendarEntry], analyses: &[AnalysisRecord]) -> MonthBuckets {
    let lookup = sentiment_lookup(analyses);
    let mut buckets = MonthBuckets::default();

    for entry in entries {
        let sentiment = lookup.get(&normalize_name(&entry.product)).and_then(|s| s.as_ref());
        let marker = SentimentMarker::for_sentiment(entry.tracked_in_report, sentiment);

        for month in entry.active_months.active() {
            buckets.get_mut(month).push(BucketItem {
                product: entry.product.clone(),
                origin: entry.origin.clone(),
                tracked: entry.tracked_in_report,
                marker,
            });
        }
    }

    for month in Month::ALL {
        // sort_by_key is stable
        buckets.get_mut(month).sort_by_key(|item| !item.tracked);
    }

    buckets
}
