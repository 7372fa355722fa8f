use crate::{
    error::Error,
    expr::Expr,
    model::{Model, registry},
    query::{Statement, literal::record_literal},
    record::Record,
    transport::{self, Transport},
};
use std::marker::PhantomData;
use tracing::debug;

///
/// UpdateBuilder
///
/// Merge-style partial update: only supplied fields change. The merge
/// payload is normalized at render time, so pending references flatten (or
/// fail) exactly as they do on the create path.
///

pub struct UpdateBuilder<'c, C, M> {
    client: &'c C,
    target: Option<String>,
    merge: Option<Record>,
    conditions: Vec<Expr>,
    _marker: PhantomData<M>,
}

impl<'c, C: Transport, M: Model> UpdateBuilder<'c, C, M> {
    #[must_use]
    pub const fn new(client: &'c C) -> Self {
        Self {
            client,
            target: None,
            merge: None,
            conditions: Vec::new(),
            _marker: PhantomData,
        }
    }

    /// Override the statement target; defaults to the model's table. Pass
    /// `<table>:<id>` to address a single record.
    #[must_use]
    pub fn from(mut self, target: impl Into<String>) -> Self {
        self.target = Some(target.into());
        self
    }

    /// Set the merge payload.
    #[must_use]
    pub fn merge(mut self, record: Record) -> Self {
        self.merge = Some(record);
        self
    }

    /// Add a filter condition, AND-ed with any existing conditions.
    #[must_use]
    pub fn filter(mut self, condition: Expr) -> Self {
        self.conditions.push(condition);
        self
    }

    pub fn render(&self) -> Result<Statement, Error> {
        let target = match &self.target {
            Some(target) => target.clone(),
            None => registry::table_name(M::TYPE_NAME)?,
        };

        let mut text = format!("UPDATE {target}");

        if let Some(merge) = &self.merge {
            let normalized = merge.normalize()?;
            text.push_str(&format!(" MERGE {}", record_literal(&normalized)));
        }

        if !self.conditions.is_empty() {
            let rendered: Vec<String> = self.conditions.iter().map(Expr::render).collect();
            text.push_str(&format!(" WHERE {}", rendered.join(" AND ")));
        }

        text.push(';');

        Ok(Statement::new(text))
    }

    /// Execute and reconstruct the updated records.
    pub async fn execute(self) -> Result<Vec<M>, Error> {
        let statement = self.render()?;
        debug!(statement = %statement, "executing update");

        let responses = self.client.query(statement.as_str()).await?;
        let rows = transport::expect_first(responses)?;

        Ok(rows
            .iter()
            .map(|row| {
                let mut model = M::default();
                model.apply_record(row);
                model
            })
            .collect())
    }
}
