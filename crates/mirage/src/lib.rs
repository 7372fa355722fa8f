//! Mirage: a typed object-relational mapping layer for SurrealDB.
//!
//! Model types implement [`model::Model`] and register their metadata once
//! at initialization; the library translates instances into statement text
//! (create/update/select/delete, table and trigger definitions) and
//! reconstructs instances from query results. The network boundary is the
//! [`transport::Transport`] trait — session and auth live behind it.

pub mod access;
pub mod error;
pub mod event;
pub mod expr;
pub mod model;
pub mod query;
pub mod record;
pub mod transport;
pub mod value;

#[cfg(test)]
pub(crate) mod test_support;

pub use error::Error;

///
/// Prelude
///
/// Domain vocabulary for model declarations and call sites.
///

pub mod prelude {
    pub use crate::{
        access::{Operation, Permissions, ScopeGrants},
        error::Error,
        event::{EventFrames, EventManager, EventSpec},
        expr::{self, CompareOp, Expr, Operand},
        model::{
            self, Model, Reference,
            meta::{FieldKind, FieldModel, ModelMeta},
            registry,
        },
        query::{
            Statement,
            range::RangeKeys,
            select::{FieldExpr, Projection},
        },
        record::Record,
        transport::{QueryResponse, Transport, TransportError},
        value::{FieldValue, GeoPoint, ModelRef, RecordId, Value},
    };
}
