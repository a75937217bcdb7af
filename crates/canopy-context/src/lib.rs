//! Tree-scoped context storage and the client registry built on it.
//!
//! A [`Scope`] tree stands in for a UI framework's component tree: values
//! published on a scope are visible to every descendant, resolved
//! nearest-ancestor-first, and disappear when the scope is disposed. On top
//! of that sits the client registry — [`set_client`] publishes a typed
//! [`Client`](canopy_core::Client) handle under a key private to this crate,
//! [`get_client`] retrieves the nearest published one or reports absence.

mod key;
mod registry;
mod scope;

pub use key::ContextKey;
pub use registry::{get_client, set_client};
pub use scope::Scope;
