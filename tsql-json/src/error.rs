use std::fmt;

/// Raised only when the marshaller's `match` over a closed AST enum reaches
/// a branch that genuine Rust exhaustiveness checking should have made
/// unreachable (spec §7's third error kind). This is never raised for a
/// recognized-but-shallow-modeled form — those marshal through
/// [`tsql_ast::Statement::Unsupported`]'s own dedicated arm instead.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct InternalInvariant {
    message: String,
}

impl InternalInvariant {
    pub(crate) fn new(message: impl Into<String>) -> Self {
        InternalInvariant {
            message: message.into(),
        }
    }
}

impl fmt::Display for InternalInvariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "internal invariant violated: {}", self.message)
    }
}

impl std::error::Error for InternalInvariant {}

/// Panics with an [`InternalInvariant`] message. The marshaller's dispatch
/// is exhaustive over closed enums, so this is only reachable if that
/// exhaustiveness is ever violated by a future variant addition.
pub(crate) fn internal_invariant(message: impl Into<String>) -> ! {
    panic!("{}", InternalInvariant::new(message));
}
