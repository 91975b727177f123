use crate::{Edge, NodeId, Value};

/// A read-only view over a node's full record, as exposed to external
/// readers (spec.md §6 "Snapshot API (consumed)").
///
/// `graphnorm-core::Snapshot` is the concrete, commit-producing
/// implementation; this trait exists so other crates (the CLI, tests, a
/// future read path) can depend only on the shape of a snapshot rather than
/// on `graphnorm-core` internals.
pub trait GraphSnapshot {
    /// The node's current `value` tree, or `None` if it does not exist (or
    /// has been collected as an orphan).
    fn get(&self, id: &str) -> Option<Value>;

    /// The node's inbound edges, or `None` if it does not exist.
    fn inbound(&self, id: &str) -> Option<Vec<Edge>>;

    /// The node's outbound edges, or `None` if it does not exist.
    fn outbound(&self, id: &str) -> Option<Vec<Edge>>;

    /// All node ids currently present in the snapshot.
    fn node_ids(&self) -> Vec<NodeId>;

    /// Every node id with no inbound edge: the well-known query/mutation
    /// roots plus any entity merged directly without a referring field.
    ///
    /// The default walks `node_ids`/`inbound`; implementations that already
    /// track inbound edge counts per node should override this with a
    /// direct lookup instead of re-deriving it.
    fn root_ids(&self) -> Vec<NodeId> {
        self.node_ids()
            .into_iter()
            .filter(|id| matches!(self.inbound(id), Some(edges) if edges.is_empty()))
            .collect()
    }
}
