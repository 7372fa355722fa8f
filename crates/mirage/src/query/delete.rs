use crate::{
    error::Error,
    expr::Expr,
    model::{Model, registry},
    query::Statement,
    transport::{self, Transport},
};
use std::marker::PhantomData;
use tracing::debug;

///
/// DeleteBuilder
///

pub struct DeleteBuilder<'c, C, M> {
    client: &'c C,
    target: Option<String>,
    conditions: Vec<Expr>,
    _marker: PhantomData<M>,
}

impl<'c, C: Transport, M: Model> DeleteBuilder<'c, C, M> {
    #[must_use]
    pub const fn new(client: &'c C) -> Self {
        Self {
            client,
            target: None,
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

        let mut text = format!("DELETE {target}");

        if !self.conditions.is_empty() {
            let rendered: Vec<String> = self.conditions.iter().map(Expr::render).collect();
            text.push_str(&format!(" WHERE {}", rendered.join(" AND ")));
        }

        Ok(Statement::new(text))
    }

    /// Execute the deletion. Instances themselves are never destroyed by
    /// this layer; ownership stays with the caller.
    pub async fn execute(self) -> Result<(), Error> {
        let statement = self.render()?;
        debug!(statement = %statement, "executing delete");

        let responses = self.client.query(statement.as_str()).await?;
        transport::expect_first(responses)?;

        Ok(())
    }
}
