use std::collections::BTreeMap;

use crate::model::{AnalysisRecord, Distributions, Sentiment};

/// Count analyses by sentiment and by country.
///
/// Missing sentiment counts as `NEUTRO`; unrecognized tokens get their own
/// key, so sentiment counts always sum to `analyses.len()`. Analyses with an
/// empty country are left out of the country counts.
pub fn aggregate(analyses: &[AnalysisRecord]) -> Distributions {
    let mut sentiments: BTreeMap<Sentiment, usize> = BTreeMap::new();
    let mut countries: BTreeMap<String, usize> = BTreeMap::new();

    for a in analyses {
        let sentiment = a.sentiment.clone().unwrap_or(Sentiment::Neutral);
        *sentiments.entry(sentiment).or_insert(0) += 1;

        let country = a.country.trim();
        if !country.is_empty() {
            *countries.entry(country.to_string()).or_insert(0) += 1;
        }
    }

    Distributions { sentiments, countries }
}
