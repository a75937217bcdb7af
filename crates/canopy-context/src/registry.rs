use canopy_core::{Client, Procedures};

use crate::key::ContextKey;
use crate::scope::Scope;

/// Slot name private to this module so unrelated keys cannot collide with
/// or spoof the published client.
const CLIENT_SLOT: &str = "$$_canopy_client";

fn client_key<P: Procedures>() -> ContextKey<Client<P>> {
    ContextKey::new(CLIENT_SLOT)
}

/// Publishes `client` for every descendant of `scope`, overwriting any
/// handle published at this scope earlier.
///
/// Call this from an ancestor of all intended consumers; the scope tree's
/// nearest-ancestor resolution does the rest.
pub fn set_client<P: Procedures>(scope: &Scope, client: Client<P>) {
    scope.set(client_key::<P>(), client);
}

/// Returns the nearest ancestor-published client narrowed to the procedure
/// set `P`, or `None` when no ancestor has published one. Never panics.
///
/// Narrowing rides on the slot's type identity: a handle published for a
/// different procedure set is simply not found.
pub fn get_client<P: Procedures>(scope: &Scope) -> Option<Client<P>> {
    scope.get(client_key::<P>()).map(|client| (*client).clone())
}
