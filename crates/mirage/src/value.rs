use chrono::{DateTime, Utc};
use derive_more::{Deref, Display};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

///
/// RecordId
///
/// Identifier assigned by the server on first save. Holds the bare id part;
/// statement targets are composed as `<table>:<id>`.
///

#[derive(
    Clone, Debug, Deref, Display, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize, Deserialize,
)]
pub struct RecordId(String);

impl RecordId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for RecordId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for RecordId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

///
/// GeoPoint
///
/// Longitude/latitude pair for geo-point fields.
///

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lon: f64,
    pub lat: f64,
}

impl GeoPoint {
    #[must_use]
    pub const fn new(lon: f64, lat: f64) -> Self {
        Self { lon, lat }
    }
}

///
/// ModelRef
///
/// A nested model occurrence inside a record, awaiting reference
/// normalization. Carries the owning type key for diagnostics and the
/// identifier if the nested instance has been persisted.
///

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ModelRef {
    pub model: String,
    pub id: Option<RecordId>,
}

///
/// Value
///
/// Closed set of field value variants. Normalization and statement
/// rendering dispatch on these variants; there is no runtime type
/// inspection beyond this enum.
///
/// `Null`  → an explicit null sent to the server.
/// `Model` → a pending reference; never present in a normalized record.
///

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Value {
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    DateTime(DateTime<Utc>),
    Geo(GeoPoint),
    List(Vec<Self>),
    Object(BTreeMap<String, Self>),
    Model(ModelRef),
    Null,
}

impl Value {
    /// True when no `Model` variant remains at any depth.
    #[must_use]
    pub fn is_normalized(&self) -> bool {
        match self {
            Self::Model(_) => false,
            Self::List(items) => items.iter().all(Self::is_normalized),
            Self::Object(map) => map.values().all(Self::is_normalized),
            _ => true,
        }
    }
}

///
/// FieldValue
///
/// Conversion boundary between typed model fields and `Value`.
/// `from_value` is lenient: a variant mismatch yields `None` and the
/// caller keeps its current field value.
///

pub trait FieldValue {
    fn to_value(&self) -> Value;

    #[must_use]
    fn from_value(value: &Value) -> Option<Self>
    where
        Self: Sized;
}

impl FieldValue for String {
    fn to_value(&self) -> Value {
        Value::Text(self.clone())
    }

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Text(v) => Some(v.clone()),
            _ => None,
        }
    }
}

impl FieldValue for &str {
    fn to_value(&self) -> Value {
        Value::Text((*self).to_string())
    }

    fn from_value(_value: &Value) -> Option<Self> {
        None
    }
}

impl FieldValue for bool {
    fn to_value(&self) -> Value {
        Value::Bool(*self)
    }

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Bool(v) => Some(*v),
            _ => None,
        }
    }
}

impl FieldValue for f64 {
    fn to_value(&self) -> Value {
        Value::Float(*self)
    }

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Float(v) => Some(*v),
            Value::Int(v) => Some(*v as Self),
            _ => None,
        }
    }
}

impl FieldValue for DateTime<Utc> {
    fn to_value(&self) -> Value {
        Value::DateTime(*self)
    }

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::DateTime(v) => Some(*v),
            _ => None,
        }
    }
}

impl FieldValue for GeoPoint {
    fn to_value(&self) -> Value {
        Value::Geo(*self)
    }

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Geo(v) => Some(*v),
            _ => None,
        }
    }
}

impl FieldValue for RecordId {
    fn to_value(&self) -> Value {
        Value::Text(self.as_str().to_string())
    }

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Text(v) => Some(Self::new(v.clone())),
            _ => None,
        }
    }
}

impl FieldValue for ModelRef {
    fn to_value(&self) -> Value {
        Value::Model(self.clone())
    }

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Model(v) => Some(v.clone()),
            _ => None,
        }
    }
}

impl<T: FieldValue> FieldValue for Option<T> {
    fn to_value(&self) -> Value {
        match self {
            Some(v) => v.to_value(),
            None => Value::Null,
        }
    }

    fn from_value(value: &Value) -> Option<Self> {
        if matches!(value, Value::Null) {
            return Some(None);
        }

        T::from_value(value).map(Some)
    }
}

impl<T: FieldValue> FieldValue for Vec<T> {
    fn to_value(&self) -> Value {
        Value::List(self.iter().map(FieldValue::to_value).collect())
    }

    fn from_value(value: &Value) -> Option<Self> {
        let Value::List(items) = value else {
            return None;
        };

        let mut out = Self::with_capacity(items.len());
        for item in items {
            out.push(T::from_value(item)?);
        }

        Some(out)
    }
}

// impl_field_value_int
macro_rules! impl_field_value_int {
    ( $( $type:ty ),* $(,)? ) => {
        $(
            impl FieldValue for $type {
                fn to_value(&self) -> Value {
                    Value::Int(i64::from(*self))
                }

                fn from_value(value: &Value) -> Option<Self> {
                    match value {
                        Value::Int(v) => (*v).try_into().ok(),
                        _ => None,
                    }
                }
            }
        )*
    };
}

impl_field_value_int!(i8, i16, i32, i64, u8, u16, u32);
