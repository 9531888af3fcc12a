use std::collections::HashSet;
use std::rc::Rc;

use tsql_ast::GraphMatchNodeExpression;
use tsql_ast::Identifier;

/// Tracks which `Identifier` and `GraphMatchNodeExpression` allocations have
/// already been fully serialized once, so a later traversal that reaches the
/// same `Rc` allocation a second time emits `{"$ref": ...}` instead of the
/// full node (spec §4.5, §9). Built fresh once per [`crate::to_json`] call;
/// never shared across scripts.
#[derive(Default)]
pub(crate) struct MarshalContext {
    seen_identifiers: HashSet<usize>,
    seen_graph_nodes: HashSet<usize>,
}

impl MarshalContext {
    pub(crate) fn new() -> Self {
        MarshalContext::default()
    }

    /// Returns `true` the first time this allocation is seen, `false` (a
    /// `$ref` is owed) on every later call with the same allocation.
    pub(crate) fn mark_identifier(&mut self, identifier: &Rc<Identifier>) -> bool {
        self.seen_identifiers
            .insert(Rc::as_ptr(identifier) as usize)
    }

    pub(crate) fn mark_graph_node(&mut self, node: &Rc<GraphMatchNodeExpression>) -> bool {
        self.seen_graph_nodes.insert(Rc::as_ptr(node) as usize)
    }
}
