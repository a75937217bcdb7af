use std::sync::Arc;

use serde_json::Value;

use crate::error::TransportError;
use crate::identifiers::ProcedureId;
use crate::procedures::ProcedureKind;
use crate::router::Router;

/// Carries procedure calls from a client handle to whatever resolves them.
///
/// The only implementation shipped here is [`LocalTransport`]; wire
/// transports live in their own crates and only need this trait.
pub trait Transport: Send + Sync {
    fn call(
        &self,
        kind: ProcedureKind,
        id: &ProcedureId,
        input: Value,
    ) -> Result<Value, TransportError>;
}

/// In-process loopback that resolves calls directly against a [`Router`].
pub struct LocalTransport<Ctx> {
    router: Arc<Router<Ctx>>,
    make_ctx: Box<dyn Fn() -> Ctx + Send + Sync>,
}

impl<Ctx: 'static> LocalTransport<Ctx> {
    /// `make_ctx` produces a fresh call context per dispatched procedure.
    pub fn new(
        router: Arc<Router<Ctx>>,
        make_ctx: impl Fn() -> Ctx + Send + Sync + 'static,
    ) -> Self {
        Self { router, make_ctx: Box::new(make_ctx) }
    }

    pub fn router(&self) -> &Arc<Router<Ctx>> {
        &self.router
    }
}

impl<Ctx: 'static> Transport for LocalTransport<Ctx> {
    fn call(
        &self,
        kind: ProcedureKind,
        id: &ProcedureId,
        input: Value,
    ) -> Result<Value, TransportError> {
        self.router.exec((self.make_ctx)(), kind, id, input).map_err(TransportError::from)
    }
}
