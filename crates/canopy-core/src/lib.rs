//! Typed client handles and in-process procedure routing.
//!
//! The crate models an RPC client surface without committing to any wire
//! transport: a [`Router`] maps procedure names to handlers, a [`Transport`]
//! carries calls from a [`Client`] to whatever resolves them, and a
//! [`Procedures`] set describes at compile time which remote operations a
//! given client supports.

pub mod client;
pub mod error;
pub mod identifiers;
pub mod procedures;
pub mod router;
pub mod transport;

pub use client::Client;
pub use error::{ClientError, ExecError, ResolverError, TransportError};
pub use identifiers::ProcedureId;
pub use procedures::{ProcedureDescriptor, ProcedureKind, Procedures};
pub use router::{Router, RouterBuilder};
pub use transport::{LocalTransport, Transport};
