use std::fmt;

use serde_json::Value;

use crate::ApiError;

/// Whether a procedure reads (`GET`) or writes (`POST`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProcedureKind {
    Query,
    Mutation,
}

/// A named procedure on the relocation API, e.g. `move.getById`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Procedure {
    pub path: &'static str,
    pub kind: ProcedureKind,
}

impl Procedure {
    pub const fn query(path: &'static str) -> Self {
        Self {
            path,
            kind: ProcedureKind::Query,
        }
    }

    pub const fn mutation(path: &'static str) -> Self {
        Self {
            path,
            kind: ProcedureKind::Mutation,
        }
    }
}

impl fmt::Display for Procedure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path)
    }
}

/// Executes relocation business procedures.
///
/// Tool servers depend on this trait rather than on [`crate::RelocationClient`]
/// so handlers can run against an in-memory backend in tests.
#[async_trait::async_trait]
pub trait RelocationBackend: Send + Sync + fmt::Debug {
    /// Invoke `procedure` with `input` and return the unwrapped result data.
    ///
    /// `Value::Null` input means "no input" for queries.
    async fn invoke(&self, procedure: Procedure, input: Value) -> Result<Value, ApiError>;
}
