use crate::{
    error::Error,
    expr::Expr,
    model::{Model, registry},
    query::{
        Statement,
        range::{RangeKeys, join_range},
    },
    transport::{self, Transport},
};
use std::marker::PhantomData;
use tracing::debug;

///
/// OrderDirection
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum OrderDirection {
    Asc,
    Desc,
}

impl OrderDirection {
    const fn keyword(self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

///
/// FieldExpr
///
/// One projected column: a plain field or a computed expression with an
/// alias.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FieldExpr {
    expr: String,
    alias: Option<String>,
}

impl FieldExpr {
    #[must_use]
    pub fn named(field: impl Into<String>) -> Self {
        Self {
            expr: field.into(),
            alias: None,
        }
    }

    #[must_use]
    pub fn aliased(expr: impl Into<String>, alias: impl Into<String>) -> Self {
        Self {
            expr: expr.into(),
            alias: Some(alias.into()),
        }
    }

    fn render(&self) -> String {
        match &self.alias {
            Some(alias) => format!("{} AS {alias}", self.expr),
            None => self.expr.clone(),
        }
    }
}

///
/// Projection
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Projection {
    All,
    Fields(Vec<FieldExpr>),
}

impl Projection {
    fn render(&self) -> String {
        match self {
            Self::All => "*".to_string(),
            Self::Fields(fields) => fields
                .iter()
                .map(FieldExpr::render)
                .collect::<Vec<_>>()
                .join(", "),
        }
    }
}

///
/// SelectBuilder
///
/// Declarative accumulator for select statements, parameterized by the
/// model type it reconstructs. Table identity is resolved from the
/// registry at render time. Must not be shared across concurrent call
/// sites; each builder belongs to its owning caller.
///

pub struct SelectBuilder<'c, C, M> {
    client: &'c C,
    projection: Projection,
    conditions: Vec<Expr>,
    order: Vec<(String, OrderDirection)>,
    limit: Option<u64>,
    offset: Option<u64>,
    range: Option<RangeKeys>,
    _marker: PhantomData<M>,
}

impl<'c, C: Transport, M: Model> SelectBuilder<'c, C, M> {
    #[must_use]
    pub const fn new(client: &'c C) -> Self {
        Self {
            client,
            projection: Projection::All,
            conditions: Vec::new(),
            order: Vec::new(),
            limit: None,
            offset: None,
            range: None,
            _marker: PhantomData,
        }
    }

    /// Replace the projection; the default selects all declared fields.
    #[must_use]
    pub fn fields(mut self, fields: Vec<FieldExpr>) -> Self {
        self.projection = Projection::Fields(fields);
        self
    }

    /// Add a filter condition, AND-ed with any existing conditions.
    #[must_use]
    pub fn filter(mut self, condition: Expr) -> Self {
        self.conditions.push(condition);
        self
    }

    /// Append an ascending sort key.
    #[must_use]
    pub fn order_by(mut self, field: impl Into<String>) -> Self {
        self.order.push((field.into(), OrderDirection::Asc));
        self
    }

    /// Append a descending sort key.
    #[must_use]
    pub fn order_by_desc(mut self, field: impl Into<String>) -> Self {
        self.order.push((field.into(), OrderDirection::Desc));
        self
    }

    #[must_use]
    pub const fn limit(mut self, n: u64) -> Self {
        self.limit = Some(n);
        self
    }

    /// Result offset; renders as the `START` clause.
    #[must_use]
    pub const fn offset(mut self, n: u64) -> Self {
        self.offset = Some(n);
        self
    }

    /// Scan a record range instead of the whole table.
    #[must_use]
    pub fn range(mut self, keys: RangeKeys) -> Self {
        self.range = Some(keys);
        self
    }

    /// Render the statement. Clauses never set are omitted entirely.
    pub fn render(&self) -> Result<Statement, Error> {
        let table = registry::table_name(M::TYPE_NAME)?;
        let target = match &self.range {
            Some(keys) => format!("{table}:{}", join_range(keys)),
            None => table,
        };

        let mut text = format!("SELECT {} FROM {target}", self.projection.render());

        if !self.conditions.is_empty() {
            let rendered: Vec<String> = self.conditions.iter().map(Expr::render).collect();
            text.push_str(&format!(" WHERE {}", rendered.join(" AND ")));
        }

        if !self.order.is_empty() {
            let keys: Vec<String> = self
                .order
                .iter()
                .map(|(field, direction)| format!("{field} {}", direction.keyword()))
                .collect();
            text.push_str(&format!(" ORDER BY {}", keys.join(", ")));
        }

        if let Some(limit) = self.limit {
            text.push_str(&format!(" LIMIT {limit}"));
        }

        if let Some(offset) = self.offset {
            text.push_str(&format!(" START {offset}"));
        }

        Ok(Statement::new(text))
    }

    /// Execute and reconstruct one model instance per returned row, in
    /// response order.
    pub async fn execute(self) -> Result<Vec<M>, Error> {
        let statement = self.render()?;
        debug!(statement = %statement, "executing select");

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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{expr, test_support::{NullTransport, register_issue}};

    fn builder(client: &NullTransport) -> SelectBuilder<'_, NullTransport, crate::test_support::Issue> {
        register_issue();
        SelectBuilder::new(client)
    }

    #[test]
    fn trivial_select_has_no_trailing_clauses() {
        let client = NullTransport::default();
        let statement = builder(&client).render().unwrap();

        assert_eq!(statement.as_str(), "SELECT * FROM issue");
    }

    #[test]
    fn all_clauses_compose_in_order() {
        let client = NullTransport::default();
        let statement = builder(&client)
            .fields(vec![
                FieldExpr::named("title"),
                FieldExpr::aliased("count()", "total"),
            ])
            .filter(expr::eq("status", &"done"))
            .order_by("title")
            .order_by_desc("due")
            .limit(10)
            .offset(20)
            .render()
            .unwrap();

        assert_eq!(
            statement.as_str(),
            "SELECT title, count() AS total FROM issue \
             WHERE status = 'done' ORDER BY title ASC, due DESC LIMIT 10 START 20"
        );
    }

    #[test]
    fn multiple_filters_and_together() {
        let client = NullTransport::default();
        let statement = builder(&client)
            .filter(expr::eq("status", &"done"))
            .filter(expr::gt("points", &2i64))
            .render()
            .unwrap();

        assert_eq!(
            statement.as_str(),
            "SELECT * FROM issue WHERE status = 'done' AND points > 2"
        );
    }

    #[test]
    fn range_target_attaches_to_table() {
        let client = NullTransport::default();
        let statement = builder(&client)
            .range(RangeKeys::Flat(vec![1, 5]))
            .render()
            .unwrap();

        assert_eq!(statement.as_str(), "SELECT * FROM issue:1..5");
    }

    #[test]
    fn unregistered_model_fails_to_render() {
        #[derive(Default)]
        struct Ghost;
        impl Model for Ghost {
            const TYPE_NAME: &'static str = "SelectGhost";

            fn id(&self) -> Option<&crate::value::RecordId> {
                None
            }

            fn set_id(&mut self, _id: crate::value::RecordId) {}

            fn to_record(&self) -> crate::record::Record {
                crate::record::Record::new()
            }

            fn apply_record(&mut self, _record: &crate::record::Record) {}
        }

        let client = NullTransport::default();
        let err = SelectBuilder::<_, Ghost>::new(&client).render().unwrap_err();
        assert!(matches!(err, Error::Registry(_)));
    }
}
