use crate::value::{FieldValue, ModelRef, Value};
use derive_more::{Deref, DerefMut, IntoIterator};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error as ThisError;

///
/// NormalizeError
///
/// A nested model reference had no identifier at normalize time. Not
/// recoverable locally; surfaced to the caller of `save`.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum NormalizeError {
    #[error("nested {model} reference has no id; save it before the parent")]
    UnsavedReference { model: String },
}

///
/// Record
///
/// Ordered field map carrying a model instance's values. A field with no
/// value is simply absent from the map; `Value::Null` is an explicit null.
/// Transient model metadata (edge flag, schema-full flag) never enters a
/// record.
///

#[derive(
    Clone, Debug, Default, Deref, DerefMut, IntoIterator, PartialEq, Serialize, Deserialize,
)]
pub struct Record(BTreeMap<String, Value>);

impl Record {
    #[must_use]
    pub const fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Set a field from any convertible value.
    #[must_use]
    pub fn with(mut self, field: &str, value: impl FieldValue) -> Self {
        self.0.insert(field.to_string(), value.to_value());
        self
    }

    /// Set a raw value.
    #[must_use]
    pub fn with_value(mut self, field: &str, value: Value) -> Self {
        self.0.insert(field.to_string(), value);
        self
    }

    /// Set a field only when a value is present; unset fields are omitted
    /// from the record, never sent as null.
    #[must_use]
    pub fn maybe(mut self, field: &str, value: Option<Value>) -> Self {
        if let Some(value) = value {
            self.0.insert(field.to_string(), value);
        }
        self
    }

    /// Replace every nested model reference with its identifier, recursing
    /// into lists and nested objects. The input is left untouched; running
    /// the pass over an already-normalized record is a no-op.
    pub fn normalize(&self) -> Result<Self, NormalizeError> {
        let mut out = BTreeMap::new();
        for (field, value) in &self.0 {
            out.insert(field.clone(), normalize_value(value)?);
        }

        Ok(Self(out))
    }

    /// True when no pending model reference remains at any depth.
    #[must_use]
    pub fn is_normalized(&self) -> bool {
        self.0.values().all(Value::is_normalized)
    }
}

fn normalize_value(value: &Value) -> Result<Value, NormalizeError> {
    match value {
        Value::Model(ModelRef { model, id }) => match id {
            Some(id) => Ok(Value::Text(id.as_str().to_string())),
            None => Err(NormalizeError::UnsavedReference {
                model: model.clone(),
            }),
        },
        Value::List(items) => items
            .iter()
            .map(normalize_value)
            .collect::<Result<Vec<_>, _>>()
            .map(Value::List),
        Value::Object(map) => map
            .iter()
            .map(|(key, value)| Ok((key.clone(), normalize_value(value)?)))
            .collect::<Result<BTreeMap<_, _>, _>>()
            .map(Value::Object),
        other => Ok(other.clone()),
    }
}
