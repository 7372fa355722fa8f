use mirage::prelude::*;
use std::sync::Mutex;

///
/// RecordingTransport
///
/// In-memory transport for tests: records every executed statement and
/// replays scripted responses in order. Once the script runs out, every
/// further statement gets an empty OK.
///

pub struct RecordingTransport {
    statements: Mutex<Vec<String>>,
    responses: Mutex<Vec<Result<Vec<QueryResponse>, TransportError>>>,
}

impl Default for RecordingTransport {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl RecordingTransport {
    #[must_use]
    pub fn new(responses: Vec<Result<Vec<QueryResponse>, TransportError>>) -> Self {
        Self {
            statements: Mutex::new(Vec::new()),
            responses: Mutex::new(responses),
        }
    }

    /// One OK response per call, each carrying the given rows.
    #[must_use]
    pub fn ok_rows(rows: Vec<Vec<Record>>) -> Self {
        Self::new(
            rows.into_iter()
                .map(|rows| Ok(vec![QueryResponse::ok(rows)]))
                .collect(),
        )
    }

    /// Statements executed so far, in order.
    #[must_use]
    pub fn statements(&self) -> Vec<String> {
        self.statements.lock().unwrap().clone()
    }
}

impl Transport for RecordingTransport {
    async fn query(&self, statement: &str) -> Result<Vec<QueryResponse>, TransportError> {
        self.statements.lock().unwrap().push(statement.to_string());

        let mut responses = self.responses.lock().unwrap();
        if responses.is_empty() {
            return Ok(vec![QueryResponse::ok(vec![])]);
        }
        responses.remove(0)
    }
}
