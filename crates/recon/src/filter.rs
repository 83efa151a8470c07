use std::collections::BTreeSet;

use crate::model::{AnalysisRecord, Sentiment};

/// Sentiment/country selection over an analysis set.
///
/// An empty selection means "everything selectable": the three known
/// sentiments, or every non-empty country present in the set being filtered.
/// Analyses without a known sentiment or without a country are therefore
/// never selected.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnalysisFilter {
    pub sentiments: Vec<Sentiment>,
    pub countries: Vec<String>,
}

impl AnalysisFilter {
    pub fn new(sentiments: Vec<Sentiment>, countries: Vec<String>) -> Self {
        Self { sentiments, countries }
    }

    pub fn is_empty(&self) -> bool {
        self.sentiments.is_empty() && self.countries.is_empty()
    }

    /// Analyses passing the filter, in input order.
    pub fn apply<'a>(&self, analyses: &'a [AnalysisRecord]) -> Vec<&'a AnalysisRecord> {
        let sentiments: Vec<Sentiment> = if self.sentiments.is_empty() {
            Sentiment::KNOWN.to_vec()
        } else {
            self.sentiments.clone()
        };
        let countries: BTreeSet<String> = if self.countries.is_empty() {
            available_countries(analyses).into_iter().collect()
        } else {
            self.countries.iter().map(|c| c.trim().to_string()).collect()
        };

        analyses
            .iter()
            .filter(|a| {
                let sentiment_ok = a
                    .sentiment
                    .as_ref()
                    .map(|s| s.is_known() && sentiments.contains(s))
                    .unwrap_or(false);
                sentiment_ok && countries.contains(a.country.trim())
            })
            .collect()
    }

    /// Like [`apply`](Self::apply), but returns owned records.
    pub fn apply_owned(&self, analyses: &[AnalysisRecord]) -> Vec<AnalysisRecord> {
        self.apply(analyses).into_iter().cloned().collect()
    }
}

/// Distinct non-empty countries, sorted.
pub fn available_countries(analyses: &[AnalysisRecord]) -> Vec<String> {
    analyses
        .iter()
        .map(|a| a.country.trim())
        .filter(|c| !c.is_empty())
        .map(str::to_string)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}
