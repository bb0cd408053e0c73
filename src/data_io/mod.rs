//! Boundary with whatever opens and persists gridded datasets.
//!
//! Real readers and writers (NetCDF, Zarr, ...) live outside this crate and
//! plug in through [`FieldSource`] and [`FieldSink`]. [`InMemoryDataset`]
//! implements both for tests, benchmarks and embedding.

use std::collections::HashMap;
use thiserror::Error;

use crate::grid::ChunkedArray;

/// Generic error type for dataset access
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DataError {
    #[error("Variable not found: {0}")]
    MissingVariable(String),

    #[error("Variable already written: {0}")]
    AlreadyWritten(String),

    #[error("Write error: {0}")]
    Write(String),
}

/// Global and variable attributes
pub type Attributes = HashMap<String, String>;

/// Read-only access to input fields.
///
/// Implementations are shared by every worker and must be safe for
/// concurrent reads.
pub trait FieldSource: Sync {
    /// Load variable `name` with its chunk geometry
    fn field(&self, name: &str) -> Result<ChunkedArray, DataError>;

    /// Names of the available variables
    fn variables(&self) -> Vec<String>;
}

/// Destination of fully materialized results.
///
/// Only ever called by the orchestrating caller after materialization has
/// succeeded, never by workers.
pub trait FieldSink {
    fn write(&mut self, field: ChunkedArray, attributes: Attributes) -> Result<(), DataError>;
}

/// Fields and their attributes held in memory
#[derive(Debug, Default, Clone)]
pub struct InMemoryDataset {
    fields: HashMap<String, ChunkedArray>,
    attributes: HashMap<String, Attributes>,
}

impl InMemoryDataset {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a field under its own name
    pub fn insert(&mut self, field: ChunkedArray) {
        self.fields.insert(field.name().to_string(), field);
    }

    pub fn get(&self, name: &str) -> Option<&ChunkedArray> {
        self.fields.get(name)
    }

    pub fn attributes(&self, name: &str) -> Option<&Attributes> {
        self.attributes.get(name)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl FieldSource for InMemoryDataset {
    fn field(&self, name: &str) -> Result<ChunkedArray, DataError> {
        self.fields
            .get(name)
            .cloned()
            .ok_or_else(|| DataError::MissingVariable(name.to_string()))
    }

    fn variables(&self) -> Vec<String> {
        let mut names: Vec<String> = self.fields.keys().cloned().collect();
        names.sort();
        names
    }
}

impl FieldSink for InMemoryDataset {
    /// Write-once: a second write under the same name is rejected
    fn write(&mut self, field: ChunkedArray, attributes: Attributes) -> Result<(), DataError> {
        let name = field.name().to_string();
        if self.attributes.contains_key(&name) {
            return Err(DataError::AlreadyWritten(name));
        }
        self.attributes.insert(name, attributes);
        self.insert(field);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field(name: &str) -> ChunkedArray {
        ChunkedArray::from_shape_vec(name, "K", &[2], vec![1.0, 2.0], &[1]).unwrap()
    }

    #[test]
    fn test_missing_variable() {
        let dataset = InMemoryDataset::new();
        assert_eq!(
            dataset.field("t2m").unwrap_err(),
            DataError::MissingVariable("t2m".to_string())
        );
    }

    #[test]
    fn test_variables_sorted() {
        let mut dataset = InMemoryDataset::new();
        dataset.insert(field("t2m"));
        dataset.insert(field("d2m"));
        assert_eq!(dataset.variables(), vec!["d2m", "t2m"]);
    }

    #[test]
    fn test_sink_is_write_once() {
        let mut dataset = InMemoryDataset::new();
        let mut attrs = Attributes::new();
        attrs.insert("unit".to_string(), "K".to_string());

        dataset.write(field("tw"), attrs.clone()).unwrap();
        assert_eq!(dataset.attributes("tw"), Some(&attrs));
        assert_eq!(
            dataset.write(field("tw"), attrs),
            Err(DataError::AlreadyWritten("tw".to_string()))
        );
    }
}
