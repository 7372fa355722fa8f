use crate::{
    error::Error,
    model::{
        Model,
        meta::{FieldKind, FieldModel, ModelMeta},
        registry,
    },
    query::Statement,
};

///
/// Schema synthesis
///
/// Renders the full definition script for a model's table: the table
/// statement carrying the compiled permission predicates, one field
/// definition per declared field, and an index definition per indexed
/// field.
///

pub fn define_table<M: Model>() -> Result<Vec<Statement>, Error> {
    let meta = registry::lookup(M::TYPE_NAME)?;
    let table = meta.table_name();

    let mut statements = vec![table_statement(&meta, &table)];
    for field in meta.fields {
        statements.push(field_statement(&table, field)?);
        if field.indexed {
            statements.push(index_statement(&table, field.name));
        }
    }

    Ok(statements)
}

fn table_statement(meta: &ModelMeta, table: &str) -> Statement {
    let schema_mode = if meta.schemafull {
        "SCHEMAFULL"
    } else {
        "SCHEMALESS"
    };
    let relation = if meta.edge { " TYPE RELATION" } else { "" };

    Statement::new(format!(
        "DEFINE TABLE {table} {schema_mode}{relation} {};",
        meta.permissions.render_clause()
    ))
}

fn field_statement(table: &str, field: &FieldModel) -> Result<Statement, Error> {
    let mut text = format!(
        "DEFINE FIELD {} ON {table} TYPE {}",
        field.name,
        field_type(&field.kind)?
    );

    if let FieldKind::Enum { allowed } = field.kind {
        text.push_str(&format!(" ASSERT $value IN ['{}']", allowed.join("', '")));
    }

    text.push(';');

    Ok(Statement::new(text))
}

fn index_statement(table: &str, field: &str) -> Statement {
    Statement::new(format!(
        "DEFINE INDEX idx_{table}_{field} ON {table} FIELDS {field};"
    ))
}

fn field_type(kind: &FieldKind) -> Result<String, Error> {
    let text = match kind {
        FieldKind::Bool => "bool".to_string(),
        FieldKind::Int => "int".to_string(),
        FieldKind::Float => "float".to_string(),
        FieldKind::Text | FieldKind::Enum { .. } => "string".to_string(),
        FieldKind::DateTime => "datetime".to_string(),
        FieldKind::Geo => "geometry(point)".to_string(),
        FieldKind::Array(_) => "array".to_string(),
        // Reference targets resolve through the registry so renames and
        // overrides propagate into the definition.
        FieldKind::Record { target } => format!("record({})", registry::table_name(target)?),
    };

    Ok(text)
}
