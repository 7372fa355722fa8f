//! Statement builders and SurrealQL rendering.
//!
//! Builders accumulate clauses declaratively and render once; execution
//! hands the rendered text to the transport. No builder imposes ordering
//! between executions — callers that need sequencing must await.

pub mod create;
pub mod define;
pub mod delete;
pub mod escape;
pub mod literal;
pub mod range;
pub mod select;
pub mod update;

use derive_more::Display;

///
/// Statement
///
/// Rendered statement text. Immutable once produced; owned by the builder
/// that rendered it until handed to the transport.
///

#[derive(Clone, Debug, Display, Eq, PartialEq)]
pub struct Statement(String);

impl Statement {
    pub(crate) const fn new(text: String) -> Self {
        Self(text)
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}
