use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

/// Differentiates the call semantics of a remote procedure.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ProcedureKind {
    Query,
    Mutation,
    Subscription,
}

impl ProcedureKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ProcedureKind::Query => "query",
            ProcedureKind::Mutation => "mutation",
            ProcedureKind::Subscription => "subscription",
        }
    }
}

impl Display for ProcedureKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Metadata describing a single remote procedure.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ProcedureDescriptor {
    pub name: &'static str,
    pub kind: ProcedureKind,
}

impl ProcedureDescriptor {
    pub const fn new(name: &'static str, kind: ProcedureKind) -> Self {
        Self { name, kind }
    }
}

/// Compile-time description of the remote operations a client supports.
///
/// Implementations are usually declared through [`procedures!`](crate::procedures!)
/// rather than by hand. The unit type implements the empty set for clients
/// that are passed around untyped.
pub trait Procedures: Send + Sync + 'static {
    fn descriptors() -> &'static [ProcedureDescriptor];

    /// Whether the set declares `name` with the given call semantics.
    fn supports(name: &str, kind: ProcedureKind) -> bool {
        Self::descriptors().iter().any(|descriptor| descriptor.kind == kind && descriptor.name == name)
    }
}

impl Procedures for () {
    fn descriptors() -> &'static [ProcedureDescriptor] {
        &[]
    }
}

/// Declares a [`Procedures`] set from plain name lists.
///
/// ```
/// canopy_core::procedures! {
///     /// Procedures exposed by the echo service.
///     pub struct EchoProcedures {
///         queries: ["echo", "version"],
///         mutations: ["append"],
///     }
/// }
///
/// use canopy_core::{ProcedureKind, Procedures};
/// assert!(EchoProcedures::supports("echo", ProcedureKind::Query));
/// assert!(!EchoProcedures::supports("echo", ProcedureKind::Mutation));
/// ```
#[macro_export]
macro_rules! procedures {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident {
            $(queries: [$($query:literal),* $(,)?],)?
            $(mutations: [$($mutation:literal),* $(,)?],)?
            $(subscriptions: [$($subscription:literal),* $(,)?],)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq)]
        $vis struct $name;

        impl $crate::procedures::Procedures for $name {
            fn descriptors() -> &'static [$crate::procedures::ProcedureDescriptor] {
                const DESCRIPTORS: &[$crate::procedures::ProcedureDescriptor] = &[
                    $($($crate::procedures::ProcedureDescriptor::new(
                        $query,
                        $crate::procedures::ProcedureKind::Query,
                    ),)*)?
                    $($($crate::procedures::ProcedureDescriptor::new(
                        $mutation,
                        $crate::procedures::ProcedureKind::Mutation,
                    ),)*)?
                    $($($crate::procedures::ProcedureDescriptor::new(
                        $subscription,
                        $crate::procedures::ProcedureKind::Subscription,
                    ),)*)?
                ];
                DESCRIPTORS
            }
        }
    };
}
