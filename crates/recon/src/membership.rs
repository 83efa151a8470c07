use std::collections::HashSet;

use crate::model::AnalysisRecord;

/// Normalized product key: trimmed and upper-cased.
pub fn normalize_name(name: &str) -> String {
    name.trim().to_uppercase()
}

/// Set of normalized product names that appear in an analysis set.
#[derive(Debug, Clone, Default)]
pub struct TrackedNames {
    names: HashSet<String>,
}

impl TrackedNames {
    pub fn from_analyses(analyses: &[AnalysisRecord]) -> Self {
        Self {
            names: analyses.iter().map(|a| normalize_name(&a.product)).collect(),
        }
    }

    /// Exact match after normalization. No substring or fuzzy matching.
    pub fn contains(&self, product_name: &str) -> bool {
        self.names.contains(&normalize_name(product_name))
    }

    #[cfg(test)]
    fn len(&self) -> usize {
        self.names.len()
    }

    #[cfg(test)]
    fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// Whether `product_name` appears in at least one analysis.
pub fn is_tracked(product_name: &str, analyses: &[AnalysisRecord]) -> bool {
    TrackedNames::from_analyses(analyses).contains(product_name)
}
