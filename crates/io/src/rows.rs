// Raw row shapes as stored in the product and analysis files

use serde::de::Deserializer;
use serde::{Deserialize, Serialize};

use safra_recon::model::null_as_default;
use safra_recon::{AnalysisRecord, Product};

/// One row of the monitored-products table.
///
/// Unknown columns are kept so the file can be rewritten without loss.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductRow {
    #[serde(rename = "PRODUTO", default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(rename = "COLHEITA", default, deserialize_with = "string_or_none")]
    pub harvest_window: Option<String>,
    #[serde(rename = "LOCAL", default, deserialize_with = "string_or_none")]
    pub origin: Option<String>,
    #[serde(rename = "STATUS", default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(rename = "DATA_CRIACAO", default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl ProductRow {
    pub fn to_product(&self) -> Product {
        Product {
            name: self.name.trim().to_string(),
            origin: self.origin.clone().unwrap_or_default(),
            harvest_window: self.harvest_window.clone(),
        }
    }
}

/// One row of the dashboard view: the analysis payload sits in `RESULTADO`,
/// either as a JSON string or as an embedded object.
#[derive(Debug, Clone, Deserialize)]
pub struct AnalysisRow {
    #[serde(rename = "PRODUTO", default)]
    pub product: Option<String>,
    #[serde(rename = "RESULTADO", default)]
    pub result: Option<serde_json::Value>,
}

impl AnalysisRow {
    /// Decode the payload. `Ok(None)` when the row carries no payload.
    pub fn decode(&self) -> Result<Option<AnalysisRecord>, serde_json::Error> {
        match &self.result {
            None | Some(serde_json::Value::Null) => Ok(None),
            Some(serde_json::Value::String(s)) if s.trim().is_empty() => Ok(None),
            Some(serde_json::Value::String(s)) => serde_json::from_str(s).map(Some),
            Some(value) => AnalysisRecord::deserialize(value).map(Some),
        }
    }
}

/// Decode every analysis row, skipping empty and malformed payloads.
///
/// Returns the decoded records (in row order) and the number of malformed
/// rows that were skipped.
pub fn decode_analyses(rows: &[AnalysisRow]) -> (Vec<AnalysisRecord>, usize) {
    let mut records = Vec::with_capacity(rows.len());
    let mut skipped = 0;

    for row in rows {
        match row.decode() {
            Ok(Some(record)) => records.push(record),
            Ok(None) => {}
            Err(e) => {
                skipped += 1;
                log::warn!(
                    "skipping analysis for product {}: {e}",
                    row.product.as_deref().unwrap_or("desconhecido")
                );
            }
        }
    }

    (records, skipped)
}

/// Keep string cells only. Numbers, arrays and objects read as `None`.
fn string_or_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<serde_json::Value>::deserialize(deserializer)? {
        Some(serde_json::Value::String(s)) => Ok(Some(s)),
        _ => Ok(None),
    }
}
