use crate::{models::assign, scopes};
use mirage::prelude::*;

///
/// IssueLabel
///
/// Table name derives to `issue_label`.
///

#[derive(Clone, Debug, Default, PartialEq)]
pub struct IssueLabel {
    pub id: Option<RecordId>,
    pub name: Option<String>,
    pub color: Option<String>,
}

const FIELDS: [FieldModel; 2] = [
    FieldModel::new("name", FieldKind::Text).indexed(),
    FieldModel::new("color", FieldKind::Text),
];

#[ctor::ctor]
fn register() {
    registry::register(
        ModelMeta::new("IssueLabel")
            .fields(&FIELDS)
            .permissions(ScopeGrants {
                select: &[scopes::ADMIN, scopes::ACCOUNT],
                create: &[scopes::ADMIN],
                update: &[scopes::ADMIN],
                delete: &[scopes::ADMIN],
            }),
    )
    .expect("issue label fixture metadata is valid");
}

impl Model for IssueLabel {
    const TYPE_NAME: &'static str = "IssueLabel";

    fn id(&self) -> Option<&RecordId> {
        self.id.as_ref()
    }

    fn set_id(&mut self, id: RecordId) {
        self.id = Some(id);
    }

    fn to_record(&self) -> Record {
        Record::new()
            .maybe("id", self.id.as_ref().map(FieldValue::to_value))
            .maybe("name", self.name.as_ref().map(FieldValue::to_value))
            .maybe("color", self.color.as_ref().map(FieldValue::to_value))
    }

    fn apply_record(&mut self, record: &Record) {
        assign(&mut self.id, record, "id");
        assign(&mut self.name, record, "name");
        assign(&mut self.color, record, "color");
    }
}
