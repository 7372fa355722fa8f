mod account;
mod issue;
mod issue_label;
mod project;
mod subscription;

pub use account::Account;
pub use issue::Issue;
pub use issue_label::IssueLabel;
pub use project::Project;
pub use subscription::Subscription;

use mirage::prelude::*;

/// Assign a field from a record slot, keeping the current value on a
/// missing field or a variant mismatch.
pub(crate) fn assign<T: FieldValue>(slot: &mut Option<T>, record: &Record, field: &str) {
    if let Some(value) = record.get(field)
        && let Some(converted) = T::from_value(value)
    {
        *slot = Some(converted);
    }
}
