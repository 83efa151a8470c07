use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;

use safra_recon::Snapshot;

use crate::error::SourceError;
use crate::rows::{decode_analyses, AnalysisRow, ProductRow};

/// Anything that can produce a fresh snapshot of both record sets.
pub trait SnapshotSource {
    fn load(&self) -> Result<Snapshot, SourceError>;

    /// Short description for log lines.
    fn describe(&self) -> String;
}

/// Reads product rows and analysis rows from two JSON files.
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    pub products_path: PathBuf,
    pub analyses_path: PathBuf,
}

impl JsonFileSource {
    pub fn new(products_path: impl Into<PathBuf>, analyses_path: impl Into<PathBuf>) -> Self {
        Self {
            products_path: products_path.into(),
            analyses_path: analyses_path.into(),
        }
    }
}

impl SnapshotSource for JsonFileSource {
    fn load(&self) -> Result<Snapshot, SourceError> {
        let product_rows: Vec<ProductRow> = read_rows(&self.products_path)?;
        let analysis_rows: Vec<AnalysisRow> = read_rows(&self.analyses_path)?;

        let products = product_rows.iter().map(ProductRow::to_product).collect::<Vec<_>>();
        let (analyses, skipped) = decode_analyses(&analysis_rows);

        log::debug!(
            "loaded {} products, {} analyses ({} skipped) from {}",
            products.len(),
            analyses.len(),
            skipped,
            self.describe()
        );

        Ok(Snapshot { products, analyses })
    }

    fn describe(&self) -> String {
        format!("{} + {}", self.products_path.display(), self.analyses_path.display())
    }
}

/// Read a JSON array of rows. A `null` document reads as no rows.
pub(crate) fn read_rows<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>, SourceError> {
    let data = std::fs::read_to_string(path).map_err(|e| SourceError::io(path, e))?;
    let rows: Option<Vec<T>> = serde_json::from_str(&data).map_err(|e| SourceError::parse(path, e))?;
    Ok(rows.unwrap_or_default())
}
