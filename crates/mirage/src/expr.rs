use crate::{
    query::literal::value_literal,
    value::{FieldValue, Value},
};
use std::ops::{BitAnd, BitOr};

///
/// Predicate expressions
///
/// Pure representation of access predicates and filter conditions. The tree
/// is only ever rendered into statement text; it is never evaluated
/// in-process. Interpretation belongs to the query engine.
///

///
/// CompareOp
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum CompareOp {
    Eq,
    Ne,
    Lt,
    Lte,
    Gt,
    Gte,
    In,
    NotIn,
    Contains,
}

impl CompareOp {
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Eq => "=",
            Self::Ne => "!=",
            Self::Lt => "<",
            Self::Lte => "<=",
            Self::Gt => ">",
            Self::Gte => ">=",
            Self::In => "IN",
            Self::NotIn => "NOT IN",
            Self::Contains => "CONTAINS",
        }
    }
}

///
/// Operand
///
/// Either side of a comparison: a record field, a field of the server-side
/// authentication context, or a literal value.
///

#[derive(Clone, Debug, PartialEq)]
pub enum Operand {
    Field(String),
    Auth(String),
    Value(Value),
}

impl Operand {
    fn render(&self) -> String {
        match self {
            Self::Field(name) => name.clone(),
            Self::Auth(name) => format!("$auth.{name}"),
            Self::Value(value) => value_literal(value),
        }
    }
}

/// Record-field operand.
#[must_use]
pub fn field(name: impl Into<String>) -> Operand {
    Operand::Field(name.into())
}

/// Authentication-context operand (`$auth.<name>`).
#[must_use]
pub fn auth(name: impl Into<String>) -> Operand {
    Operand::Auth(name.into())
}

/// Literal operand.
#[must_use]
pub fn lit<V: FieldValue + ?Sized>(value: &V) -> Operand {
    Operand::Value(value.to_value())
}

///
/// Expr
///
/// Boolean expression tree over record fields and the authentication
/// context. `Allow`/`Deny` are the degenerate endpoints used by the
/// permission compiler.
///

#[derive(Clone, Debug, PartialEq)]
pub enum Expr {
    Allow,
    Deny,
    And(Vec<Self>),
    Or(Vec<Self>),
    Not(Box<Self>),
    Compare {
        lhs: Operand,
        op: CompareOp,
        rhs: Operand,
    },
    /// Membership test against a named scope (`$scope = '<name>'`).
    Scope(String),
}

impl Expr {
    #[must_use]
    pub const fn and(exprs: Vec<Self>) -> Self {
        Self::And(exprs)
    }

    #[must_use]
    pub const fn or(exprs: Vec<Self>) -> Self {
        Self::Or(exprs)
    }

    #[expect(clippy::should_implement_trait)]
    #[must_use]
    pub fn not(expr: Self) -> Self {
        Self::Not(Box::new(expr))
    }

    #[must_use]
    pub const fn cmp(lhs: Operand, op: CompareOp, rhs: Operand) -> Self {
        Self::Compare { lhs, op, rhs }
    }

    #[must_use]
    pub fn scope(name: impl Into<String>) -> Self {
        Self::Scope(name.into())
    }

    /// Render to predicate text. Inside a tree the endpoints degrade to
    /// boolean literals; clause-position `FULL`/`NONE` is the permission
    /// compiler's concern.
    #[must_use]
    pub fn render(&self) -> String {
        match self {
            Self::Allow => "true".to_string(),
            Self::Deny => "false".to_string(),
            Self::And(exprs) => join_children(exprs, " AND "),
            Self::Or(exprs) => join_children(exprs, " OR "),
            Self::Not(inner) => format!("!({})", inner.render()),
            Self::Compare { lhs, op, rhs } => {
                format!("{} {} {}", lhs.render(), op.symbol(), rhs.render())
            }
            Self::Scope(name) => format!("$scope = '{name}'"),
        }
    }

    const fn is_compound(&self) -> bool {
        matches!(self, Self::And(_) | Self::Or(_))
    }
}

fn join_children(exprs: &[Expr], separator: &str) -> String {
    exprs
        .iter()
        .map(|expr| {
            if expr.is_compound() {
                format!("({})", expr.render())
            } else {
                expr.render()
            }
        })
        .collect::<Vec<_>>()
        .join(separator)
}

impl BitAnd for Expr {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self::Output {
        Self::And(vec![self, rhs])
    }
}

impl BitOr for Expr {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self::Output {
        Self::Or(vec![self, rhs])
    }
}

// ============================================================================
// Field-comparison shorthand
// ============================================================================

#[must_use]
pub fn eq<V: FieldValue + ?Sized>(name: &str, value: &V) -> Expr {
    Expr::cmp(field(name), CompareOp::Eq, lit(value))
}

#[must_use]
pub fn ne<V: FieldValue + ?Sized>(name: &str, value: &V) -> Expr {
    Expr::cmp(field(name), CompareOp::Ne, lit(value))
}

#[must_use]
pub fn lt<V: FieldValue + ?Sized>(name: &str, value: &V) -> Expr {
    Expr::cmp(field(name), CompareOp::Lt, lit(value))
}

#[must_use]
pub fn lte<V: FieldValue + ?Sized>(name: &str, value: &V) -> Expr {
    Expr::cmp(field(name), CompareOp::Lte, lit(value))
}

#[must_use]
pub fn gt<V: FieldValue + ?Sized>(name: &str, value: &V) -> Expr {
    Expr::cmp(field(name), CompareOp::Gt, lit(value))
}

#[must_use]
pub fn gte<V: FieldValue + ?Sized>(name: &str, value: &V) -> Expr {
    Expr::cmp(field(name), CompareOp::Gte, lit(value))
}

#[must_use]
pub fn in_values<V: FieldValue>(name: &str, values: &[V]) -> Expr {
    let items = values.iter().map(FieldValue::to_value).collect();
    Expr::cmp(field(name), CompareOp::In, Operand::Value(Value::List(items)))
}

#[must_use]
pub fn contains<V: FieldValue + ?Sized>(name: &str, value: &V) -> Expr {
    Expr::cmp(field(name), CompareOp::Contains, lit(value))
}
