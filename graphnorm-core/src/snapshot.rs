use crate::node::NodeRecord;
use crate::value::NodeValue;
use graphnorm_api::{Edge, GraphSnapshot, NodeId, Value};
use std::collections::BTreeMap;
use std::sync::Arc;

/// An immutable, point-in-time view of the graph produced by
/// [`crate::Editor::commit`].
///
/// Cloning a `Snapshot` is an `Arc` bump. Nodes untouched by a transaction
/// keep citing the exact same `Arc<NodeRecord>` their previous snapshot did
/// (spec.md §3 invariant 3, §8 property 1) — see [`Snapshot::is_same_record`],
/// used by tests to assert this directly.
#[derive(Debug, Clone)]
pub struct Snapshot {
    nodes: Arc<BTreeMap<NodeId, Arc<NodeRecord>>>,
}

impl Snapshot {
    pub fn empty() -> Self {
        Self {
            nodes: Arc::new(BTreeMap::new()),
        }
    }

    pub(crate) fn from_map(nodes: BTreeMap<NodeId, Arc<NodeRecord>>) -> Self {
        Self {
            nodes: Arc::new(nodes),
        }
    }

    pub(crate) fn nodes_clone(&self) -> BTreeMap<NodeId, Arc<NodeRecord>> {
        (*self.nodes).clone()
    }

    pub fn get_record(&self, id: &str) -> Option<&Arc<NodeRecord>> {
        self.nodes.get(id)
    }

    pub fn get_value(&self, id: &str) -> Option<&NodeValue> {
        self.nodes.get(id).map(|r| &r.value)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.nodes.contains_key(id)
    }

    /// Reference-identity check: do both snapshots cite the exact same
    /// `Arc<NodeRecord>` for `id`? Used to assert structural sharing in
    /// tests rather than deep equality, which would trivially pass even if
    /// the engine had reallocated the record.
    pub fn is_same_record(&self, other: &Snapshot, id: &str) -> bool {
        match (self.nodes.get(id), other.nodes.get(id)) {
            (Some(a), Some(b)) => Arc::ptr_eq(a, b),
            (None, None) => true,
            _ => false,
        }
    }
}

impl GraphSnapshot for Snapshot {
    fn get(&self, id: &str) -> Option<Value> {
        self.get_value(id).map(Value::from)
    }

    fn inbound(&self, id: &str) -> Option<Vec<Edge>> {
        self.get_record(id).map(|r| r.inbound.clone())
    }

    fn outbound(&self, id: &str) -> Option<Vec<Edge>> {
        self.get_record(id).map(|r| r.outbound.clone())
    }

    fn node_ids(&self) -> Vec<NodeId> {
        self.nodes.keys().cloned().collect()
    }

    /// Every node id with no inbound edge, read directly off each record
    /// rather than re-deriving it through `node_ids`/`inbound`.
    fn root_ids(&self) -> Vec<NodeId> {
        self.nodes
            .iter()
            .filter(|(_, record)| record.inbound.is_empty())
            .map(|(id, _)| id.clone())
            .collect()
    }
}
