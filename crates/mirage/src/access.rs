use crate::expr::Expr;
use std::fmt;

///
/// Operation
///
/// The four statement kinds a permission predicate can gate.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Operation {
    Select,
    Create,
    Update,
    Delete,
}

impl Operation {
    pub const ALL: [Self; 4] = [Self::Select, Self::Create, Self::Update, Self::Delete];
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Select => "select",
            Self::Create => "create",
            Self::Update => "update",
            Self::Delete => "delete",
        };
        write!(f, "{label}")
    }
}

///
/// Permissions
///
/// One predicate per operation. Any operation left unset is denied; there
/// is no implicit allow. Predicates are compiled into the table definition
/// and evaluated server-side against the authentication context — never in
/// this process.
///

#[derive(Clone, Debug, PartialEq)]
pub struct Permissions {
    pub select: Expr,
    pub create: Expr,
    pub update: Expr,
    pub delete: Expr,
}

impl Default for Permissions {
    fn default() -> Self {
        Self {
            select: Expr::Deny,
            create: Expr::Deny,
            update: Expr::Deny,
            delete: Expr::Deny,
        }
    }
}

impl Permissions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn select(mut self, expr: Expr) -> Self {
        self.select = expr;
        self
    }

    #[must_use]
    pub fn create(mut self, expr: Expr) -> Self {
        self.create = expr;
        self
    }

    #[must_use]
    pub fn update(mut self, expr: Expr) -> Self {
        self.update = expr;
        self
    }

    #[must_use]
    pub fn delete(mut self, expr: Expr) -> Self {
        self.delete = expr;
        self
    }

    #[must_use]
    pub const fn get(&self, operation: Operation) -> &Expr {
        match operation {
            Operation::Select => &self.select,
            Operation::Create => &self.create,
            Operation::Update => &self.update,
            Operation::Delete => &self.delete,
        }
    }

    /// Render the `PERMISSIONS` clause of a table definition.
    #[must_use]
    pub fn render_clause(&self) -> String {
        let mut out = String::from("PERMISSIONS");
        for operation in Operation::ALL {
            out.push_str(&format!(" FOR {operation} "));
            out.push_str(&match self.get(operation) {
                Expr::Allow => "FULL".to_string(),
                Expr::Deny => "NONE".to_string(),
                expr => format!("WHERE {}", expr.render()),
            });
        }

        out
    }
}

///
/// ScopeGrants
///
/// Declarative shorthand: per operation, the scopes allowed to perform it.
/// Expands into the same predicate trees the programmatic form builds —
/// each scope becomes a membership test, multiple scopes OR-combine, and
/// an empty list stays denied.
///

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct ScopeGrants {
    pub select: &'static [&'static str],
    pub create: &'static [&'static str],
    pub update: &'static [&'static str],
    pub delete: &'static [&'static str],
}

impl From<ScopeGrants> for Permissions {
    fn from(grants: ScopeGrants) -> Self {
        Self {
            select: expand_scopes(grants.select),
            create: expand_scopes(grants.create),
            update: expand_scopes(grants.update),
            delete: expand_scopes(grants.delete),
        }
    }
}

fn expand_scopes(scopes: &[&str]) -> Expr {
    match scopes {
        [] => Expr::Deny,
        [scope] => Expr::scope(*scope),
        many => Expr::Or(many.iter().map(|scope| Expr::scope(*scope)).collect()),
    }
}
