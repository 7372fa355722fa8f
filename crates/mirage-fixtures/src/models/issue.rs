use crate::{
    models::{Account, IssueLabel, Project, assign},
    scopes,
};
use chrono::{DateTime, Utc};
use mirage::prelude::*;

///
/// Issue
///
/// The richest fixture: enum fields, a datetime, reference fields at
/// scalar and list cardinality, tags, geo points. Select/update access is
/// also open to the record's own creator, not just scope members.
///

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Issue {
    pub id: Option<RecordId>,
    pub title: Option<String>,
    pub body: Option<String>,
    pub priority: Option<String>,
    pub status: Option<String>,
    pub due: Option<DateTime<Utc>>,
    pub labels: Option<Vec<Reference<IssueLabel>>>,
    pub project: Option<Reference<Project>>,
    pub parent: Option<Reference<Issue>>,
    pub assignee: Option<Reference<Account>>,
    pub creator: Option<Reference<Account>>,
    pub tags: Option<Vec<String>>,
    pub points: Option<Vec<GeoPoint>>,
}

pub const PRIORITIES: &[&str] = &["no_priority", "urgent", "high", "medium", "low"];
pub const STATUSES: &[&str] = &["backlog", "todo", "in_progress", "done", "canceled"];

const FIELDS: [FieldModel; 12] = [
    FieldModel::new("title", FieldKind::Text).indexed(),
    FieldModel::new("body", FieldKind::Text),
    FieldModel::new("priority", FieldKind::Enum { allowed: PRIORITIES }),
    FieldModel::new("status", FieldKind::Enum { allowed: STATUSES }),
    FieldModel::new("due", FieldKind::DateTime),
    FieldModel::new(
        "labels",
        FieldKind::Array(&FieldKind::Record {
            target: "IssueLabel",
        }),
    ),
    FieldModel::new("project", FieldKind::Record { target: "Project" }),
    FieldModel::new("parent", FieldKind::Record { target: "Issue" }),
    FieldModel::new("assignee", FieldKind::Record { target: "Account" }),
    FieldModel::new("creator", FieldKind::Record { target: "Account" }),
    FieldModel::new("tags", FieldKind::Array(&FieldKind::Text)),
    FieldModel::new("points", FieldKind::Array(&FieldKind::Geo)),
];

#[ctor::ctor]
fn register() {
    let owner = Expr::cmp(expr::field("creator"), CompareOp::Eq, expr::auth("id"));

    registry::register(
        ModelMeta::new("Issue").fields(&FIELDS).permissions(
            Permissions::new()
                .select(Expr::scope(scopes::ADMIN) | owner.clone())
                .create(Expr::scope(scopes::ADMIN) | Expr::scope(scopes::ACCOUNT))
                .update(Expr::scope(scopes::ADMIN) | owner)
                .delete(Expr::scope(scopes::ADMIN)),
        ),
    )
    .expect("issue fixture metadata is valid");
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
            .maybe("body", self.body.as_ref().map(FieldValue::to_value))
            .maybe("priority", self.priority.as_ref().map(FieldValue::to_value))
            .maybe("status", self.status.as_ref().map(FieldValue::to_value))
            .maybe("due", self.due.as_ref().map(FieldValue::to_value))
            .maybe("labels", self.labels.as_ref().map(FieldValue::to_value))
            .maybe("project", self.project.as_ref().map(FieldValue::to_value))
            .maybe("parent", self.parent.as_ref().map(FieldValue::to_value))
            .maybe("assignee", self.assignee.as_ref().map(FieldValue::to_value))
            .maybe("creator", self.creator.as_ref().map(FieldValue::to_value))
            .maybe("tags", self.tags.as_ref().map(FieldValue::to_value))
            .maybe("points", self.points.as_ref().map(FieldValue::to_value))
    }

    fn apply_record(&mut self, record: &Record) {
        assign(&mut self.id, record, "id");
        assign(&mut self.title, record, "title");
        assign(&mut self.body, record, "body");
        assign(&mut self.priority, record, "priority");
        assign(&mut self.status, record, "status");
        assign(&mut self.due, record, "due");
        assign(&mut self.labels, record, "labels");
        assign(&mut self.project, record, "project");
        assign(&mut self.parent, record, "parent");
        assign(&mut self.assignee, record, "assignee");
        assign(&mut self.creator, record, "creator");
        assign(&mut self.tags, record, "tags");
        assign(&mut self.points, record, "points");
    }
}
