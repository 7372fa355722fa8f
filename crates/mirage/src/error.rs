use crate::{model::registry::RegistryError, record::NormalizeError, transport::TransportError};
use thiserror::Error as ThisError;

///
/// Error
///
/// Top-level error surfaced by model lifecycle operations and builder
/// execution. Each variant wraps the structured error of the layer that
/// produced it.
///

#[derive(Debug, ThisError)]
pub enum Error {
    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error(transparent)]
    Normalize(#[from] NormalizeError),

    #[error(transparent)]
    Transport(#[from] TransportError),
}

impl Error {
    /// True when the failure came from the transport boundary rather than
    /// from local translation.
    #[must_use]
    pub const fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }
}
