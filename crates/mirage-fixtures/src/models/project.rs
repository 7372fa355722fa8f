use crate::{models::assign, scopes};
use mirage::prelude::*;

///
/// Project
///

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Project {
    pub id: Option<RecordId>,
    pub name: Option<String>,
    pub description: Option<String>,
}

const FIELDS: [FieldModel; 2] = [
    FieldModel::new("name", FieldKind::Text).indexed(),
    FieldModel::new("description", FieldKind::Text),
];

#[ctor::ctor]
fn register() {
    registry::register(
        ModelMeta::new("Project")
            .fields(&FIELDS)
            .permissions(ScopeGrants {
                select: &[scopes::ADMIN, scopes::ACCOUNT],
                create: &[scopes::ADMIN],
                update: &[scopes::ADMIN],
                delete: &[scopes::ADMIN],
            }),
    )
    .expect("project fixture metadata is valid");
}

impl Model for Project {
    const TYPE_NAME: &'static str = "Project";

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
            .maybe(
                "description",
                self.description.as_ref().map(FieldValue::to_value),
            )
    }

    fn apply_record(&mut self, record: &Record) {
        assign(&mut self.id, record, "id");
        assign(&mut self.name, record, "name");
        assign(&mut self.description, record, "description");
    }
}
