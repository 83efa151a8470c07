//! Report views derived directly from the analysis set.

use crate::model::{AnalysisRecord, CalendarEntry, Metrics, Sentiment};

/// Negative analyses, sorted by product name.
pub fn alerts(analyses: &[AnalysisRecord]) -> Vec<&AnalysisRecord> {
    let mut out: Vec<&AnalysisRecord> = analyses
        .iter()
        .filter(|a| a.sentiment == Some(Sentiment::Negative))
        .collect();
    out.sort_by(|a, b| a.product.cmp(&b.product));
    out
}

/// Analyses grouped by known sentiment, in display order.
///
/// Missing sentiment is grouped as `NEUTRO`. Unrecognized tokens are left out.
/// Empty groups are omitted.
pub fn group_by_sentiment<'a, I>(analyses: I) -> Vec<(Sentiment, Vec<&'a AnalysisRecord>)>
where
    I: IntoIterator<Item = &'a AnalysisRecord>,
{
    let mut groups: Vec<(Sentiment, Vec<&'a AnalysisRecord>)> =
        Sentiment::KNOWN.iter().map(|s| (s.clone(), Vec::new())).collect();

    for a in analyses {
        let sentiment = a.sentiment.clone().unwrap_or(Sentiment::Neutral);
        if let Some((_, group)) = groups.iter_mut().find(|(s, _)| *s == sentiment) {
            group.push(a);
        }
    }

    groups.retain(|(_, group)| !group.is_empty());
    groups
}

/// Headline numbers for the calendar page.
///
/// Sentiment counts here are exact matches only; missing sentiment is not
/// folded into `neutral`.
pub fn metrics(entries: &[CalendarEntry], analyses: &[AnalysisRecord]) -> Metrics {
    let count = |s: Sentiment| analyses.iter().filter(|a| a.sentiment.as_ref() == Some(&s)).count();
    Metrics {
        total_products: entries.len(),
        tracked_products: entries.iter().filter(|e| e.tracked_in_report).count(),
        total_analyses: analyses.len(),
        positive: count(Sentiment::Positive),
        neutral: count(Sentiment::Neutral),
        negative: count(Sentiment::Negative),
    }
}
