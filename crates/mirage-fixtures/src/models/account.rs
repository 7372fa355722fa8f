use crate::{models::assign, scopes};
use mirage::prelude::*;

///
/// Account
///

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Account {
    pub id: Option<RecordId>,
    pub name: Option<String>,
    pub email: Option<String>,
    pub verified: Option<bool>,
}

const FIELDS: [FieldModel; 3] = [
    FieldModel::new("name", FieldKind::Text),
    FieldModel::new("email", FieldKind::Text).indexed(),
    FieldModel::new("verified", FieldKind::Bool),
];

#[ctor::ctor]
fn register() {
    registry::register(
        ModelMeta::new("Account")
            .fields(&FIELDS)
            .permissions(ScopeGrants {
                select: &[scopes::ADMIN, scopes::ACCOUNT],
                create: &[scopes::ADMIN],
                update: &[scopes::ADMIN],
                delete: &[scopes::ADMIN],
            }),
    )
    .expect("account fixture metadata is valid");
}

impl Model for Account {
    const TYPE_NAME: &'static str = "Account";

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
            .maybe("email", self.email.as_ref().map(FieldValue::to_value))
            .maybe("verified", self.verified.as_ref().map(FieldValue::to_value))
    }

    fn apply_record(&mut self, record: &Record) {
        assign(&mut self.id, record, "id");
        assign(&mut self.name, record, "name");
        assign(&mut self.email, record, "email");
        assign(&mut self.verified, record, "verified");
    }
}
