use crate::access::Permissions;

///
/// FieldKind
///
/// Declared type shape of a model field. Statement rendering and schema
/// synthesis dispatch on these tags; values themselves are carried by the
/// closed `Value` enum.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum FieldKind {
    Bool,
    Int,
    Float,
    Text,
    /// Enum over a fixed allowed-value set; the set must be non-empty.
    Enum { allowed: &'static [&'static str] },
    DateTime,
    Geo,
    Array(&'static Self),
    /// Reference to another model, by its registry type key.
    Record { target: &'static str },
}

///
/// FieldModel
///
/// Runtime field metadata: name, declared kind, indexed flag.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct FieldModel {
    pub name: &'static str,
    pub kind: FieldKind,
    pub indexed: bool,
}

impl FieldModel {
    #[must_use]
    pub const fn new(name: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            kind,
            indexed: false,
        }
    }

    #[must_use]
    pub const fn indexed(mut self) -> Self {
        self.indexed = true;
        self
    }
}

///
/// ModelMeta
///
/// Per-type registry entry: table identity, edge flag, schema mode, field
/// declarations, permission set.
///

#[derive(Clone, Debug)]
pub struct ModelMeta {
    /// Registry key; the model type's identifier.
    pub type_name: &'static str,
    /// Explicit table name; used verbatim when present.
    pub table: Option<&'static str>,
    /// Relation table connecting two entity tables.
    pub edge: bool,
    /// Renders `SCHEMAFULL` vs `SCHEMALESS` in the table definition.
    pub schemafull: bool,
    pub fields: &'static [FieldModel],
    pub permissions: Permissions,
}

impl ModelMeta {
    #[must_use]
    pub fn new(type_name: &'static str) -> Self {
        Self {
            type_name,
            table: None,
            edge: false,
            schemafull: true,
            fields: &[],
            permissions: Permissions::default(),
        }
    }

    #[must_use]
    pub const fn table(mut self, table: &'static str) -> Self {
        self.table = Some(table);
        self
    }

    #[must_use]
    pub const fn edge(mut self) -> Self {
        self.edge = true;
        self
    }

    #[must_use]
    pub const fn schemaless(mut self) -> Self {
        self.schemafull = false;
        self
    }

    #[must_use]
    pub const fn fields(mut self, fields: &'static [FieldModel]) -> Self {
        self.fields = fields;
        self
    }

    #[must_use]
    pub fn permissions(mut self, permissions: impl Into<Permissions>) -> Self {
        self.permissions = permissions.into();
        self
    }

    /// Resolved table name: explicit override verbatim, otherwise derived
    /// from the type name.
    #[must_use]
    pub fn table_name(&self) -> String {
        self.table
            .map_or_else(|| derive_table_name(self.type_name), str::to_string)
    }
}

/// Fold a capitalized-word type identifier into a database-style table
/// name. The first character is always lowercased. A caseless or uppercase
/// character mid-name starts a new `_`-joined segment — unless the
/// identifier already contains `_`, in which case characters are lowercased
/// in place with no extra separators. The asymmetry is part of the wire
/// contract and must not be "fixed".
#[must_use]
pub fn derive_table_name(type_name: &str) -> String {
    let has_underscore = type_name.contains('_');
    let mut out = String::with_capacity(type_name.len() + 4);

    for (i, ch) in type_name.chars().enumerate() {
        if ch.is_lowercase() {
            out.push(ch);
        } else if i == 0 || has_underscore {
            out.extend(ch.to_lowercase());
        } else {
            out.push('_');
            out.extend(ch.to_lowercase());
        }
    }

    out
}
