//! Issue-tracker fixtures: registered models, scope constants, and a
//! recording transport, shared by the end-to-end test surfaces.

pub mod models;
pub mod scopes;
pub mod transport;

pub use models::{Account, Issue, IssueLabel, Project, Subscription};
pub use transport::RecordingTransport;
