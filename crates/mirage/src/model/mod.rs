pub mod meta;
pub mod registry;

use crate::{
    error::Error,
    event::{EventManager, EventSpec},
    query::{
        Statement, create::create_statement, define, delete::DeleteBuilder,
        select::SelectBuilder, update::UpdateBuilder,
    },
    record::Record,
    transport::{self, Transport},
    value::{ModelRef, RecordId, Value},
};
use futures_util::future::try_join_all;
use self::registry::RegistryError;
use tracing::debug;

///
/// Model
///
/// The entity contract. A model type owns its registry key and converts
/// between its typed fields and records; everything else — table identity,
/// builders, lifecycle — is provided on top of that.
///
/// Instances live entirely in caller memory: the library assigns fields and
/// identifiers onto them but never destroys them.
///

pub trait Model: Default {
    /// Registry key; by convention the type's own identifier.
    const TYPE_NAME: &'static str;

    fn id(&self) -> Option<&RecordId>;
    fn set_id(&mut self, id: RecordId);

    /// Snapshot the instance's set fields. Unset fields are omitted;
    /// transient metadata (edge flag, schema mode) never appears.
    fn to_record(&self) -> Record;

    /// Assign every field present in the record onto the instance.
    /// Unknown fields and variant mismatches are skipped.
    fn apply_record(&mut self, record: &Record);

    // ======================================================================
    // Metadata
    // ======================================================================

    fn table_name() -> Result<String, RegistryError> {
        registry::table_name(Self::TYPE_NAME)
    }

    fn is_edge() -> bool {
        registry::edge(Self::TYPE_NAME)
    }

    /// Pending reference to this instance, for embedding in another
    /// model's record.
    fn to_ref(&self) -> ModelRef {
        ModelRef {
            model: Self::TYPE_NAME.to_string(),
            id: self.id().cloned(),
        }
    }

    /// `to_ref` as a field value.
    fn ref_value(&self) -> Value {
        Value::Model(self.to_ref())
    }

    // ======================================================================
    // Builders & compilation
    // ======================================================================

    fn select<C: Transport>(client: &C) -> SelectBuilder<'_, C, Self> {
        SelectBuilder::new(client)
    }

    fn update<C: Transport>(client: &C) -> UpdateBuilder<'_, C, Self> {
        UpdateBuilder::new(client)
    }

    fn delete<C: Transport>(client: &C) -> DeleteBuilder<'_, C, Self> {
        DeleteBuilder::new(client)
    }

    /// Compile lifecycle rules into trigger definitions for this model's
    /// table.
    fn events(specs: &[EventSpec]) -> Result<EventManager, Error> {
        EventManager::define::<Self>(specs)
    }

    /// Render the table definition script (table, fields, indexes).
    fn define() -> Result<Vec<Statement>, Error> {
        define::define_table::<Self>()
    }
}

///
/// Reference
///
/// A reference-typed field: either an embedded instance awaiting
/// flattening, or the identifier form the wire carries. Reconstruction
/// from a query result always yields the identifier form.
///

#[derive(Clone, Debug, PartialEq)]
pub enum Reference<M: Model> {
    Model(Box<M>),
    Id(RecordId),
}

impl<M: Model> Reference<M> {
    #[must_use]
    pub fn from_model(model: M) -> Self {
        Self::Model(Box::new(model))
    }

    #[must_use]
    pub fn from_id(id: impl Into<RecordId>) -> Self {
        Self::Id(id.into())
    }

    /// Identifier of the referenced record, if it has one.
    #[must_use]
    pub fn id(&self) -> Option<&RecordId> {
        match self {
            Self::Model(model) => model.id(),
            Self::Id(id) => Some(id),
        }
    }
}

impl<M: Model> crate::value::FieldValue for Reference<M> {
    fn to_value(&self) -> Value {
        match self {
            Self::Model(model) => model.ref_value(),
            Self::Id(id) => Value::Model(ModelRef {
                model: M::TYPE_NAME.to_string(),
                id: Some(id.clone()),
            }),
        }
    }

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Text(id) => Some(Self::Id(RecordId::new(id.clone()))),
            Value::Model(ModelRef { id: Some(id), .. }) => Some(Self::Id(id.clone())),
            _ => None,
        }
    }
}

// ==========================================================================
// Lifecycle
// ==========================================================================

/// Persist an instance. Without an identifier this issues a create and
/// assigns every server-returned field (including the new id) back onto
/// the instance; with one it issues a merge against `<table>:<id>` and
/// trusts the local record.
pub async fn save<C: Transport, M: Model>(client: &C, model: &mut M) -> Result<(), Error> {
    let record = model.to_record().normalize()?;
    let table = M::table_name()?;

    match model.id() {
        Some(id) => {
            let target = format!("{table}:{id}");
            M::update(client).from(target).merge(record).execute().await?;
            Ok(())
        }
        None => {
            let statement = create_statement(&table, &record);
            debug!(statement = %statement, "executing create");

            let responses = client.query(statement.as_str()).await?;
            let rows = transport::expect_first(responses)?;
            let Some(row) = rows.first() else {
                return Err(transport::TransportError::EmptyResponse.into());
            };

            model.apply_record(row);
            Ok(())
        }
    }
}

/// Construct-and-save in one step.
pub async fn create<C: Transport, M: Model>(client: &C, mut model: M) -> Result<M, Error> {
    save(client, &mut model).await?;
    Ok(model)
}

/// Save a batch concurrently. Resolves when every save has completed,
/// surfacing the first failure; the remaining saves are not cancelled and
/// may or may not have taken effect.
pub async fn create_many<C: Transport, M: Model>(
    client: &C,
    models: Vec<M>,
) -> Result<Vec<M>, Error> {
    try_join_all(models.into_iter().map(|model| create(client, model))).await
}
