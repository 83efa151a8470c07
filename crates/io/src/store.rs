// Product registration against the product rows file

use std::path::{Path, PathBuf};

use crate::error::SourceError;
use crate::rows::ProductRow;
use crate::source::read_rows;
use crate::STATUS_ADDED;

pub struct ProductStore {
    path: PathBuf,
}

impl ProductStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// All rows. A missing file reads as empty.
    pub fn rows(&self) -> Result<Vec<ProductRow>, SourceError> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        read_rows(&self.path)
    }

    /// Whether a product with this name and origin is already registered.
    ///
    /// Names compare upper-cased and trimmed; origins compare trimmed.
    pub fn exists(&self, name: &str, origin: &str) -> Result<bool, SourceError> {
        let rows = self.rows()?;
        Ok(find_duplicate(&rows, &name.trim().to_uppercase(), origin.trim()))
    }

    /// Append a new product row. The harvest window is left empty.
    pub fn add_product(&self, name: &str, origin: &str) -> Result<ProductRow, SourceError> {
        let name = name.trim().to_uppercase();
        let origin = origin.trim().to_string();
        if name.is_empty() {
            return Err(SourceError::InvalidProduct("product name is empty".into()));
        }
        if origin.is_empty() {
            return Err(SourceError::InvalidProduct("origin is empty".into()));
        }

        let mut rows = self.rows()?;
        if find_duplicate(&rows, &name, &origin) {
            return Err(SourceError::DuplicateProduct { name, origin });
        }

        let row = ProductRow {
            name,
            harvest_window: None,
            origin: Some(origin),
            status: Some(STATUS_ADDED.to_string()),
            created_at: Some(chrono::Utc::now().to_rfc3339()),
            extra: serde_json::Map::new(),
        };
        rows.push(row.clone());
        self.write(&rows)?;

        log::info!("registered product {} ({})", row.name, row.origin.as_deref().unwrap_or(""));
        Ok(row)
    }

    /// Rows registered through [`add_product`](Self::add_product), newest first.
    pub fn recent_additions(&self, limit: usize) -> Result<Vec<ProductRow>, SourceError> {
        let mut rows: Vec<ProductRow> = self
            .rows()?
            .into_iter()
            .filter(|r| r.status.as_deref() == Some(STATUS_ADDED))
            .collect();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        rows.truncate(limit);
        Ok(rows)
    }

    fn write(&self, rows: &[ProductRow]) -> Result<(), SourceError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| SourceError::io(parent, e))?;
            }
        }
        let json = serde_json::to_string_pretty(rows).map_err(|e| SourceError::parse(&self.path, e))?;
        std::fs::write(&self.path, json).map_err(|e| SourceError::io(&self.path, e))
    }
}

fn find_duplicate(rows: &[ProductRow], name: &str, origin: &str) -> bool {
    rows.iter().any(|r| {
        r.name.trim().to_uppercase() == name && r.origin.as_deref().unwrap_or("").trim() == origin
    })
}
