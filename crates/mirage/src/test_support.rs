use crate::{
    access::{Permissions, ScopeGrants},
    model::{
        Model,
        meta::{FieldKind, FieldModel, ModelMeta},
        registry,
    },
    record::Record,
    transport::{QueryResponse, Transport, TransportError},
    value::{FieldValue, GeoPoint, ModelRef, RecordId},
};
use chrono::{DateTime, Utc};
use std::sync::Mutex;

///
/// Issue
///
/// Shared test-only model for core tests.
///

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Issue {
    pub id: Option<RecordId>,
    pub title: Option<String>,
    pub status: Option<String>,
    pub due: Option<DateTime<Utc>>,
    pub parent: Option<ModelRef>,
    pub points: Option<Vec<GeoPoint>>,
}

const ISSUE_FIELDS: [FieldModel; 5] = [
    FieldModel::new("title", FieldKind::Text).indexed(),
    FieldModel::new(
        "status",
        FieldKind::Enum {
            allowed: &["backlog", "todo", "done"],
        },
    ),
    FieldModel::new("due", FieldKind::DateTime),
    FieldModel::new("parent", FieldKind::Record { target: "Issue" }),
    FieldModel::new("points", FieldKind::Array(&FieldKind::Geo)),
];

/// Idempotent registration for the shared test model.
pub fn register_issue() {
    let meta = ModelMeta::new("Issue")
        .fields(&ISSUE_FIELDS)
        .permissions(
            Permissions::from(ScopeGrants {
                create: &["admin"],
                update: &["admin"],
                ..ScopeGrants::default()
            })
            .select(crate::expr::Expr::Allow),
        );

    registry::register(meta).expect("test model metadata is valid");
}

impl Model for Issue {
    const TYPE_NAME: &'static str = "Issue";

    fn id(&self) -> Option<&RecordId> {
        self.id.as_ref()
    }

    fn set_id(&mut self, id: RecordId) {
        self.id = Some(id);
    }

    fn to_record(&self) -> Record {
        Record::new()
            .maybe("id", self.id.as_ref().map(FieldValue::to_value))
            .maybe("title", self.title.as_ref().map(FieldValue::to_value))
            .maybe("status", self.status.as_ref().map(FieldValue::to_value))
            .maybe("due", self.due.as_ref().map(FieldValue::to_value))
            .maybe("parent", self.parent.as_ref().map(FieldValue::to_value))
            .maybe("points", self.points.as_ref().map(FieldValue::to_value))
    }

    fn apply_record(&mut self, record: &Record) {
        assign(&mut self.id, record, "id");
        assign(&mut self.title, record, "title");
        assign(&mut self.status, record, "status");
        assign(&mut self.due, record, "due");
        assign(&mut self.parent, record, "parent");
        assign(&mut self.points, record, "points");
    }
}

fn assign<T: FieldValue>(slot: &mut Option<T>, record: &Record, field: &str) {
    if let Some(value) = record.get(field)
        && let Some(converted) = T::from_value(value)
    {
        *slot = Some(converted);
    }
}

///
/// ScriptedTransport
///
/// Records every executed statement and replays a scripted response per
/// call, in order.
///

pub struct ScriptedTransport {
    statements: Mutex<Vec<String>>,
    responses: Mutex<Vec<Result<Vec<QueryResponse>, TransportError>>>,
}

impl ScriptedTransport {
    pub fn new(responses: Vec<Result<Vec<QueryResponse>, TransportError>>) -> Self {
        Self {
            statements: Mutex::new(Vec::new()),
            responses: Mutex::new(responses),
        }
    }

    /// One OK response per call, each carrying the given rows.
    pub fn ok_rows(rows: Vec<Vec<Record>>) -> Self {
        Self::new(
            rows.into_iter()
                .map(|rows| Ok(vec![QueryResponse::ok(rows)]))
                .collect(),
        )
    }

    pub fn statements(&self) -> Vec<String> {
        self.statements.lock().unwrap().clone()
    }
}

impl Transport for ScriptedTransport {
    async fn query(&self, statement: &str) -> Result<Vec<QueryResponse>, TransportError> {
        self.statements.lock().unwrap().push(statement.to_string());

        let mut responses = self.responses.lock().unwrap();
        if responses.is_empty() {
            return Ok(vec![QueryResponse::ok(vec![])]);
        }
        responses.remove(0)
    }
}

///
/// NullTransport
///
/// For render-only tests; answers every statement with an empty OK.
///

#[derive(Default)]
pub struct NullTransport;

impl Transport for NullTransport {
    async fn query(&self, _statement: &str) -> Result<Vec<QueryResponse>, TransportError> {
        Ok(vec![QueryResponse::ok(vec![])])
    }
}
