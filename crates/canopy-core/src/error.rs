use thiserror::Error;

use crate::identifiers::ProcedureId;
use crate::procedures::ProcedureKind;

/// Error returned by a procedure handler to abort the call.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ResolverError {
    pub message: String,
}

impl ResolverError {
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }
}

/// Failures raised while resolving a call through a [`Router`](crate::Router).
#[derive(Debug, Error)]
pub enum ExecError {
    #[error("{kind} '{id}' not found")]
    ProcedureNotFound { kind: ProcedureKind, id: ProcedureId },
    #[error("deserializing input for '{id}' failed: {source}")]
    InvalidInput {
        id: ProcedureId,
        #[source]
        source: serde_json::Error,
    },
    #[error("serializing result of '{id}' failed: {source}")]
    InvalidResult {
        id: ProcedureId,
        #[source]
        source: serde_json::Error,
    },
    #[error("procedure '{id}' failed: {message}")]
    Resolver { id: ProcedureId, message: String },
}

/// Failures raised by the transport seam between client and resolver.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error(transparent)]
    Exec(#[from] ExecError),
    #[error("transport disconnected")]
    Disconnected,
    #[error("transport protocol failure: {0}")]
    Protocol(String),
}

/// Failures surfaced at the client edge.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("{kind} '{id}' is not part of this client's procedure set")]
    UnknownProcedure { kind: ProcedureKind, id: ProcedureId },
    #[error("serializing input for '{id}' failed: {source}")]
    Serialize {
        id: ProcedureId,
        #[source]
        source: serde_json::Error,
    },
    #[error("deserializing result of '{id}' failed: {source}")]
    Deserialize {
        id: ProcedureId,
        #[source]
        source: serde_json::Error,
    },
    #[error(transparent)]
    Transport(#[from] TransportError),
}
