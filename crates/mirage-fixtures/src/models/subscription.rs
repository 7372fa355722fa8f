use crate::{
    models::{Account, Issue, assign},
    scopes,
};
use mirage::prelude::*;

///
/// Subscription
///
/// Edge table connecting an account to an issue it watches.
///

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Subscription {
    pub id: Option<RecordId>,
    pub account: Option<Reference<Account>>,
    pub issue: Option<Reference<Issue>>,
    pub muted: Option<bool>,
}

const FIELDS: [FieldModel; 3] = [
    FieldModel::new("account", FieldKind::Record { target: "Account" }),
    FieldModel::new("issue", FieldKind::Record { target: "Issue" }),
    FieldModel::new("muted", FieldKind::Bool),
];

#[ctor::ctor]
fn register() {
    registry::register(
        ModelMeta::new("Subscription")
            .edge()
            .fields(&FIELDS)
            .permissions(ScopeGrants {
                select: &[scopes::ADMIN, scopes::ACCOUNT],
                create: &[scopes::ACCOUNT],
                update: &[scopes::ACCOUNT],
                delete: &[scopes::ADMIN, scopes::ACCOUNT],
            }),
    )
    .expect("subscription fixture metadata is valid");
}

impl Model for Subscription {
    const TYPE_NAME: &'static str = "Subscription";

    fn id(&self) -> Option<&RecordId> {
        self.id.as_ref()
    }

    fn set_id(&mut self, id: RecordId) {
        self.id = Some(id);
    }

    fn to_record(&self) -> Record {
        Record::new()
            .maybe("id", self.id.as_ref().map(FieldValue::to_value))
            .maybe("account", self.account.as_ref().map(FieldValue::to_value))
            .maybe("issue", self.issue.as_ref().map(FieldValue::to_value))
            .maybe("muted", self.muted.as_ref().map(FieldValue::to_value))
    }

    fn apply_record(&mut self, record: &Record) {
        assign(&mut self.id, record, "id");
        assign(&mut self.account, record, "account");
        assign(&mut self.issue, record, "issue");
        assign(&mut self.muted, record, "muted");
    }
}
