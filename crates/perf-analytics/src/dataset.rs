//! Loading raw evaluation and employee documents from JSON exports.
//!
//! Exports come in two shapes: a plain array of documents, or an object keyed
//! by document id (the way collection dumps are usually written). Keyed
//! exports get their key copied into `"id"` unless the document already has
//! one.

use serde_json::{Map, Value};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

#[derive(Debug, thiserror::Error)]
pub enum DatasetError {
    #[error("unable to read dataset: {0}")]
    Io(#[from] std::io::Error),
    #[error("dataset is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("dataset must be an array or an object keyed by id, found {found}")]
    NotAnArray { found: &'static str },
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawDataset {
    documents: Vec<Value>,
}

impl RawDataset {
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, DatasetError> {
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file))
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, DatasetError> {
        let value: Value = serde_json::from_reader(reader)?;
        Self::from_value(value)
    }

    pub fn from_value(value: Value) -> Result<Self, DatasetError> {
        let documents = match value {
            Value::Array(documents) => documents,
            Value::Object(map) => keyed_documents(map),
            other => {
                return Err(DatasetError::NotAnArray {
                    found: kind(&other),
                })
            }
        };

        Ok(Self { documents })
    }

    pub fn documents(&self) -> &[Value] {
        &self.documents
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    pub fn into_documents(self) -> Vec<Value> {
        self.documents
    }
}

fn keyed_documents(map: Map<String, Value>) -> Vec<Value> {
    map.into_iter()
        .map(|(key, document)| match document {
            Value::Object(mut fields) => {
                let has_id = fields.get("id").is_some_and(|id| !id.is_null());
                if !has_id {
                    fields.insert("id".to_string(), Value::String(key));
                }
                Value::Object(fields)
            }
            other => other,
        })
        .collect()
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
