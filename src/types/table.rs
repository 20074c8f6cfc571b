//! Column-oriented tables returned by every ISS endpoint.
//!
//! Each response is an envelope keyed by dataset name:
//!
//! ```json
//! {
//!     "candles": {
//!         "columns": ["open", "close", "high", "low", "value", "volume", "begin", "end"],
//!         "data": [[300.1, 301.5, 302.0, 299.8, 1.2e9, 4000000, "2024-01-03 00:00:00", "2024-01-03 23:59:59"]]
//!     }
//! }
//! ```
//!
//! Rows stay positional. Callers resolve column names to indices themselves
//! (see [`Dataset::column_map`]) because the field set differs per endpoint.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A single row, aligned to [`Dataset::columns`].
pub type Row = Vec<Value>;

/// One named table inside a response envelope.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    /// Optional per-column type information (`iss.meta=on`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Value>,
    /// Column names in positional order.
    #[serde(default)]
    pub columns: Vec<String>,
    /// Rows of values, each aligned to `columns`.
    #[serde(default)]
    pub data: Vec<Row>,
}

impl Dataset {
    /// Number of rows.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the dataset has no rows.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Position of a column by name.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Map of column name to position, built once per result.
    pub fn column_map(&self) -> HashMap<&str, usize> {
        self.columns
            .iter()
            .enumerate()
            .map(|(idx, col)| (col.as_str(), idx))
            .collect()
    }

    /// Value at `row` in the named column.
    pub fn value(&self, row: usize, column: &str) -> Option<&Value> {
        let idx = self.column_index(column)?;
        self.data.get(row)?.get(idx)
    }
}

/// A decoded ISS response: dataset name to table.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IssResponse {
    datasets: BTreeMap<String, Dataset>,
}

impl IssResponse {
    /// Get a dataset by name (e.g. `"securities"`, `"marketdata"`, `"candles"`, `"futoi"`).
    pub fn dataset(&self, name: &str) -> Option<&Dataset> {
        self.datasets.get(name)
    }

    /// Mutable access to a dataset by name.
    pub fn dataset_mut(&mut self, name: &str) -> Option<&mut Dataset> {
        self.datasets.get_mut(name)
    }

    /// Rows of a dataset, or an empty slice if it is absent.
    pub fn rows(&self, name: &str) -> &[Row] {
        self.datasets
            .get(name)
            .map(|d| d.data.as_slice())
            .unwrap_or_default()
    }

    /// Take a single dataset out of the envelope.
    pub fn into_dataset(mut self, name: &str) -> Option<Dataset> {
        self.datasets.remove(name)
    }

    /// Names of all datasets in the envelope.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.datasets.keys().map(String::as_str)
    }

    /// Insert or replace a dataset.
    pub fn insert(&mut self, name: impl Into<String>, dataset: Dataset) {
        self.datasets.insert(name.into(), dataset);
    }
}

impl FromIterator<(String, Dataset)> for IssResponse {
    fn from_iter<I: IntoIterator<Item = (String, Dataset)>>(iter: I) -> Self {
        Self {
            datasets: iter.into_iter().collect(),
        }
    }
}
