use crate::{
    query::{Statement, literal::record_literal},
    record::Record,
};

/// Render a create statement for an already-normalized record.
#[must_use]
pub fn create_statement(table: &str, record: &Record) -> Statement {
    Statement::new(format!("CREATE {table} CONTENT {};", record_literal(record)))
}
