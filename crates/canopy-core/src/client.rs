use std::fmt::{self, Debug, Formatter};
use std::marker::PhantomData;
use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::ClientError;
use crate::identifiers::ProcedureId;
use crate::procedures::{ProcedureKind, Procedures};
use crate::transport::Transport;

/// Opaque handle to a configured client, parameterized by the procedure set
/// `P` it is expected to serve.
///
/// Cloning shares the underlying instance; [`Client::ptr_eq`] tells whether
/// two handles refer to the same one. The handle itself is immutable after
/// construction.
pub struct Client<P: Procedures = ()> {
    inner: Arc<ClientInner>,
    procedures: PhantomData<fn() -> P>,
}

struct ClientInner {
    transport: Box<dyn Transport>,
}

impl<P: Procedures> Client<P> {
    pub fn new(transport: impl Transport + 'static) -> Self {
        Self {
            inner: Arc::new(ClientInner { transport: Box::new(transport) }),
            procedures: PhantomData,
        }
    }

    /// Whether two handles refer to the same underlying client instance.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    pub fn query<I, O>(&self, name: impl Into<ProcedureId>, input: I) -> Result<O, ClientError>
    where
        I: Serialize,
        O: DeserializeOwned,
    {
        self.call(ProcedureKind::Query, name.into(), input)
    }

    pub fn mutation<I, O>(&self, name: impl Into<ProcedureId>, input: I) -> Result<O, ClientError>
    where
        I: Serialize,
        O: DeserializeOwned,
    {
        self.call(ProcedureKind::Mutation, name.into(), input)
    }

    /// One-shot subscription resolve; stream delivery belongs to the
    /// transport behind the handle.
    pub fn subscription<I, O>(
        &self,
        name: impl Into<ProcedureId>,
        input: I,
    ) -> Result<O, ClientError>
    where
        I: Serialize,
        O: DeserializeOwned,
    {
        self.call(ProcedureKind::Subscription, name.into(), input)
    }

    fn call<I, O>(&self, kind: ProcedureKind, id: ProcedureId, input: I) -> Result<O, ClientError>
    where
        I: Serialize,
        O: DeserializeOwned,
    {
        if !P::supports(id.as_str(), kind) {
            return Err(ClientError::UnknownProcedure { kind, id });
        }
        let input = serde_json::to_value(input)
            .map_err(|source| ClientError::Serialize { id: id.clone(), source })?;
        let result = self.inner.transport.call(kind, &id, input)?;
        serde_json::from_value(result).map_err(|source| ClientError::Deserialize { id, source })
    }
}

impl<P: Procedures> Clone for Client<P> {
    fn clone(&self) -> Self {
        Self { inner: Arc::clone(&self.inner), procedures: PhantomData }
    }
}

impl<P: Procedures> Debug for Client<P> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client")
            .field("procedures", &P::descriptors().len())
            .finish_non_exhaustive()
    }
}
