use crate::record::Record;
use serde::{Deserialize, Serialize};
use std::future::Future;
use thiserror::Error as ThisError;
use tracing::warn;

/// Status string a successful statement reports.
pub const STATUS_OK: &str = "OK";

///
/// TransportError
///
/// Failure at the transport boundary. Never retried by this layer; a
/// cancelled or timed-out call surfaces here like any other failure.
/// Server-side permission denial also manifests only as a reported
/// statement failure.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum TransportError {
    #[error("empty response from server")]
    EmptyResponse,

    #[error("statement failed with status '{status}'")]
    ErrorStatus { status: String },

    #[error("connection failure: {0}")]
    Connection(String),
}

///
/// QueryResponse
///
/// One element per statement in the executed batch.
///

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct QueryResponse {
    pub status: String,
    #[serde(default)]
    pub result: Vec<Record>,
}

impl QueryResponse {
    #[must_use]
    pub fn ok(result: Vec<Record>) -> Self {
        Self {
            status: STATUS_OK.to_string(),
            result,
        }
    }
}

///
/// Transport
///
/// The network collaborator. Session and auth handshake live behind it;
/// this layer only hands over statement text and reads responses back.
///

pub trait Transport: Send + Sync {
    fn query(
        &self,
        statement: &str,
    ) -> impl Future<Output = Result<Vec<QueryResponse>, TransportError>> + Send;
}

/// Unwrap the first response of a batch, treating an empty batch or a
/// non-OK status as a transport failure.
pub(crate) fn expect_first(
    mut responses: Vec<QueryResponse>,
) -> Result<Vec<Record>, TransportError> {
    if responses.is_empty() {
        return Err(TransportError::EmptyResponse);
    }

    let first = responses.remove(0);
    if first.status != STATUS_OK {
        warn!(status = %first.status, "statement rejected by server");
        return Err(TransportError::ErrorStatus {
            status: first.status,
        });
    }

    Ok(first.result)
}
