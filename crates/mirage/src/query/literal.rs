use crate::{
    query::escape::escape_string,
    record::Record,
    value::{ModelRef, Value},
};
use std::collections::BTreeMap;

///
/// Literal rendering
///
/// `Value` → SurrealQL literal text. Records render as mapping literals
/// with their fields in key order, so rendered statements are stable and
/// byte-comparable.
///

#[must_use]
pub fn value_literal(value: &Value) -> String {
    match value {
        Value::Null => "NULL".to_string(),
        Value::Bool(v) => v.to_string(),
        Value::Int(v) => v.to_string(),
        Value::Float(v) => v.to_string(),
        Value::Text(v) => format!("'{}'", escape_string(v)),
        Value::DateTime(v) => format!("'{}'", v.to_rfc3339()),
        Value::Geo(v) => format!("({}, {})", v.lon, v.lat),
        Value::List(items) => {
            let items: Vec<String> = items.iter().map(value_literal).collect();
            format!("[{}]", items.join(", "))
        }
        Value::Object(map) => object_literal(map),
        // Pending references are normalized away before rendering; a saved
        // one still degrades to its identifier, an unsaved one to NONE.
        Value::Model(ModelRef { id, .. }) => id
            .as_ref()
            .map_or_else(|| "NONE".to_string(), |id| format!("'{id}'")),
    }
}

#[must_use]
pub fn record_literal(record: &Record) -> String {
    object_literal(record)
}

fn object_literal(map: &BTreeMap<String, Value>) -> String {
    if map.is_empty() {
        return "{}".to_string();
    }

    let fields: Vec<String> = map
        .iter()
        .map(|(field, value)| format!("{field}: {}", value_literal(value)))
        .collect();

    format!("{{ {} }}", fields.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    #[test]
    fn scalars_render_as_ql_literals() {
        assert_eq!(value_literal(&Value::Bool(true)), "true");
        assert_eq!(value_literal(&Value::Int(-3)), "-3");
        assert_eq!(value_literal(&Value::Text("a'b".into())), "'ab'");
        assert_eq!(value_literal(&Value::Null), "NULL");
    }

    #[test]
    fn datetimes_render_quoted_rfc3339() {
        let at = Utc.with_ymd_and_hms(2023, 4, 1, 12, 30, 0).unwrap();
        assert_eq!(
            value_literal(&Value::DateTime(at)),
            "'2023-04-01T12:30:00+00:00'"
        );
    }

    #[test]
    fn records_render_in_key_order() {
        let record = Record::new()
            .with("title", "New issue")
            .with("priority", "high");

        assert_eq!(
            record_literal(&record),
            "{ priority: 'high', title: 'New issue' }"
        );
    }

    #[test]
    fn empty_record_renders_braces() {
        assert_eq!(record_literal(&Record::new()), "{}");
    }

    #[test]
    fn containers_nest() {
        let value = Value::List(vec![
            Value::Int(1),
            Value::Object([("point".to_string(), Value::Geo(crate::value::GeoPoint::new(-0.1, 51.5)))].into()),
        ]);

        assert_eq!(value_literal(&value), "[1, { point: (-0.1, 51.5) }]");
    }
}
