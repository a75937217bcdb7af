use std::collections::BTreeMap;
use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{ExecError, ResolverError};
use crate::identifiers::ProcedureId;
use crate::procedures::ProcedureKind;

type Handler<Ctx> = Box<dyn Fn(Ctx, Value) -> Result<Value, ExecError> + Send + Sync>;

struct Procedure<Ctx> {
    exec: Handler<Ctx>,
}

/// Registry of procedure handlers, dispatched by kind and name.
///
/// `Ctx` is produced per call by the transport (request context, auth state,
/// ...). Handlers receive it together with the deserialized input.
pub struct Router<Ctx = ()> {
    queries: BTreeMap<ProcedureId, Procedure<Ctx>>,
    mutations: BTreeMap<ProcedureId, Procedure<Ctx>>,
    subscriptions: BTreeMap<ProcedureId, Procedure<Ctx>>,
}

impl<Ctx: 'static> Router<Ctx> {
    pub fn builder() -> RouterBuilder<Ctx> {
        RouterBuilder::new()
    }

    /// Resolves one call. Subscriptions resolve one-shot; stream delivery is
    /// the transport's concern.
    pub fn exec(
        &self,
        ctx: Ctx,
        kind: ProcedureKind,
        id: &ProcedureId,
        input: Value,
    ) -> Result<Value, ExecError> {
        tracing::debug!(procedure = %id, kind = %kind, "executing procedure");
        let Some(procedure) = self.map(kind).get(id) else {
            tracing::warn!(procedure = %id, kind = %kind, "procedure not found");
            return Err(ExecError::ProcedureNotFound { kind, id: id.clone() });
        };
        (procedure.exec)(ctx, input)
    }

    /// Whether a procedure with the given semantics is registered.
    pub fn has(&self, kind: ProcedureKind, name: &str) -> bool {
        self.map(kind).contains_key(name)
    }

    /// Registered names for one kind, in lexical order.
    pub fn names(&self, kind: ProcedureKind) -> impl Iterator<Item = &ProcedureId> {
        self.map(kind).keys()
    }

    pub fn arced(self) -> Arc<Self> {
        Arc::new(self)
    }

    fn map(&self, kind: ProcedureKind) -> &BTreeMap<ProcedureId, Procedure<Ctx>> {
        match kind {
            ProcedureKind::Query => &self.queries,
            ProcedureKind::Mutation => &self.mutations,
            ProcedureKind::Subscription => &self.subscriptions,
        }
    }
}

/// Builder collecting typed handlers before freezing them into a [`Router`].
///
/// Registration serializes at the boundary: handlers take and return plain
/// Rust types, the router speaks [`Value`] towards the transport.
pub struct RouterBuilder<Ctx = ()> {
    queries: BTreeMap<ProcedureId, Procedure<Ctx>>,
    mutations: BTreeMap<ProcedureId, Procedure<Ctx>>,
    subscriptions: BTreeMap<ProcedureId, Procedure<Ctx>>,
}

impl<Ctx: 'static> RouterBuilder<Ctx> {
    fn new() -> Self {
        Self { queries: BTreeMap::new(), mutations: BTreeMap::new(), subscriptions: BTreeMap::new() }
    }

    pub fn query<I, O, F>(self, name: impl Into<ProcedureId>, handler: F) -> Self
    where
        I: DeserializeOwned + 'static,
        O: Serialize + 'static,
        F: Fn(Ctx, I) -> Result<O, ResolverError> + Send + Sync + 'static,
    {
        self.register(ProcedureKind::Query, name.into(), handler)
    }

    pub fn mutation<I, O, F>(self, name: impl Into<ProcedureId>, handler: F) -> Self
    where
        I: DeserializeOwned + 'static,
        O: Serialize + 'static,
        F: Fn(Ctx, I) -> Result<O, ResolverError> + Send + Sync + 'static,
    {
        self.register(ProcedureKind::Mutation, name.into(), handler)
    }

    pub fn subscription<I, O, F>(self, name: impl Into<ProcedureId>, handler: F) -> Self
    where
        I: DeserializeOwned + 'static,
        O: Serialize + 'static,
        F: Fn(Ctx, I) -> Result<O, ResolverError> + Send + Sync + 'static,
    {
        self.register(ProcedureKind::Subscription, name.into(), handler)
    }

    pub fn build(self) -> Router<Ctx> {
        let Self { queries, mutations, subscriptions } = self;
        Router { queries, mutations, subscriptions }
    }

    fn register<I, O, F>(mut self, kind: ProcedureKind, id: ProcedureId, handler: F) -> Self
    where
        I: DeserializeOwned + 'static,
        O: Serialize + 'static,
        F: Fn(Ctx, I) -> Result<O, ResolverError> + Send + Sync + 'static,
    {
        let handler_id = id.clone();
        let exec: Handler<Ctx> = Box::new(move |ctx, input| {
            let input: I = serde_json::from_value(input)
                .map_err(|source| ExecError::InvalidInput { id: handler_id.clone(), source })?;
            let output = handler(ctx, input).map_err(|err| ExecError::Resolver {
                id: handler_id.clone(),
                message: err.message,
            })?;
            serde_json::to_value(output)
                .map_err(|source| ExecError::InvalidResult { id: handler_id.clone(), source })
        });
        self.map_mut(kind).insert(id, Procedure { exec });
        self
    }

    fn map_mut(&mut self, kind: ProcedureKind) -> &mut BTreeMap<ProcedureId, Procedure<Ctx>> {
        match kind {
            ProcedureKind::Query => &mut self.queries,
            ProcedureKind::Mutation => &mut self.mutations,
            ProcedureKind::Subscription => &mut self.subscriptions,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};
    use serde_json::json;

    #[fixture]
    fn router() -> Router<()> {
        Router::builder()
            .query("echo", |(), input: String| Ok(input))
            .query("double", |(), input: i64| Ok(input * 2))
            .mutation("append", |(), input: String| Ok(format!("{input}!")))
            .subscription("changes", |(), _input: ()| Ok("subscribed".to_owned()))
            .build()
    }

    #[rstest]
    fn exec_resolves_registered_query(router: Router<()>) {
        let result = router
            .exec((), ProcedureKind::Query, &ProcedureId::from("echo"), json!("hi"))
            .expect("echo resolves");
        assert_eq!(result, json!("hi"));
    }

    #[rstest]
    fn exec_dispatches_by_kind(router: Router<()>) {
        // "append" exists, but only as a mutation.
        let err = router
            .exec((), ProcedureKind::Query, &ProcedureId::from("append"), json!("hi"))
            .expect_err("kind mismatch is a miss");
        assert!(matches!(err, ExecError::ProcedureNotFound { kind: ProcedureKind::Query, .. }));

        let result = router
            .exec((), ProcedureKind::Mutation, &ProcedureId::from("append"), json!("hi"))
            .expect("append resolves as mutation");
        assert_eq!(result, json!("hi!"));
    }

    #[rstest]
    fn exec_reports_missing_procedures(router: Router<()>) {
        let err = router
            .exec((), ProcedureKind::Query, &ProcedureId::from("missing"), Value::Null)
            .expect_err("unknown name");
        assert_eq!(err.to_string(), "query 'missing' not found");
    }

    #[rstest]
    fn exec_rejects_malformed_input(router: Router<()>) {
        let err = router
            .exec((), ProcedureKind::Query, &ProcedureId::from("double"), json!("not a number"))
            .expect_err("string is not i64");
        assert!(matches!(err, ExecError::InvalidInput { .. }));
    }

    #[rstest]
    fn resolver_errors_carry_the_procedure_id() {
        let router: Router<()> = Router::builder()
            .query("fails", |(), _input: ()| -> Result<String, ResolverError> {
                Err(ResolverError::new("backend unavailable"))
            })
            .build();
        let err = router
            .exec((), ProcedureKind::Query, &ProcedureId::from("fails"), Value::Null)
            .expect_err("handler aborts");
        assert_eq!(err.to_string(), "procedure 'fails' failed: backend unavailable");
    }

    #[rstest]
    fn handlers_receive_the_call_context() {
        let router: Router<String> = Router::builder()
            .query("whoami", |ctx: String, _input: ()| Ok(ctx))
            .build();
        let result = router
            .exec("alice".to_owned(), ProcedureKind::Query, &ProcedureId::from("whoami"), Value::Null)
            .expect("whoami resolves");
        assert_eq!(result, json!("alice"));
    }

    #[rstest]
    fn names_reports_registered_procedures(router: Router<()>) {
        let names: Vec<_> = router.names(ProcedureKind::Query).map(ProcedureId::as_str).collect();
        assert_eq!(names, ["double", "echo"]);
        assert!(router.has(ProcedureKind::Subscription, "changes"));
        assert!(!router.has(ProcedureKind::Subscription, "echo"));
    }
}
