use crate::node::NodeRecord;
use crate::path_setter::{deep_set, navigate};
use crate::snapshot::Snapshot;
use crate::value::NodeValue;
use graphnorm_api::{Edge, NodeId, Path};
use std::collections::{HashMap, HashSet};

/// One node's staged state within a transaction: either a private, mutable
/// copy promoted out of the parent snapshot (or created fresh), or a
/// tombstone recording that the node was collected as an orphan.
#[derive(Debug, Clone)]
pub(crate) enum Staged {
    Record(NodeRecord),
    Tombstone,
}

/// The editor's private, mutable working set for one transaction, shared by
/// the walker, bookkeeper, rebuilder, and orphan collector.
///
/// Nodes are promoted into `new_nodes` lazily, on first write — until then,
/// reads fall through to `parent`, which is never mutated (it is the
/// previous, still-immutable snapshot).
pub(crate) struct EditorState<'a> {
    pub parent: &'a Snapshot,
    pub new_nodes: &'a mut HashMap<NodeId, Staged>,
    /// Nodes whose value content changed during the current `merge` call
    /// (spec.md §4.1): scalar writes, array replacements, reference-edit
    /// writes, and tombstones. Rebuild writes (phase 3) never add here.
    pub merge_edited: HashSet<NodeId>,
}

impl<'a> EditorState<'a> {
    pub fn new(parent: &'a Snapshot, new_nodes: &'a mut HashMap<NodeId, Staged>) -> Self {
        Self {
            parent,
            new_nodes,
            merge_edited: HashSet::new(),
        }
    }

    pub fn current_value(&self, id: &str) -> NodeValue {
        match self.new_nodes.get(id) {
            Some(Staged::Record(record)) => record.value.clone(),
            Some(Staged::Tombstone) => NodeValue::Undefined,
            None => self
                .parent
                .get_value(id)
                .cloned()
                .unwrap_or(NodeValue::Undefined),
        }
    }

    pub fn value_at(&self, id: &str, path: &Path) -> NodeValue {
        navigate(&self.current_value(id), path)
    }

    pub fn current_inbound(&self, id: &str) -> Vec<Edge> {
        match self.new_nodes.get(id) {
            Some(Staged::Record(record)) => record.inbound.clone(),
            Some(Staged::Tombstone) => Vec::new(),
            None => self
                .parent
                .get_record(id)
                .map(|r| r.inbound.clone())
                .unwrap_or_default(),
        }
    }

    pub fn current_outbound(&self, id: &str) -> Vec<Edge> {
        match self.new_nodes.get(id) {
            Some(Staged::Record(record)) => record.outbound.clone(),
            Some(Staged::Tombstone) => Vec::new(),
            None => self
                .parent
                .get_record(id)
                .map(|r| r.outbound.clone())
                .unwrap_or_default(),
        }
    }

    /// Promote `id` into `new_nodes` if it is not already a live staged
    /// record, then return a mutable reference to it.
    pub fn get_or_promote(&mut self, id: &NodeId) -> &mut NodeRecord {
        if !matches!(self.new_nodes.get(id), Some(Staged::Record(_))) {
            let base = match self.new_nodes.get(id) {
                Some(Staged::Tombstone) => NodeRecord::new(NodeValue::Undefined),
                _ => self
                    .parent
                    .get_record(id)
                    .map(|r| (**r).clone())
                    .unwrap_or_else(|| NodeRecord::new(NodeValue::Undefined)),
            };
            self.new_nodes.insert(id.clone(), Staged::Record(base));
        }
        match self.new_nodes.get_mut(id).expect("just inserted") {
            Staged::Record(record) => record,
            Staged::Tombstone => unreachable!("just promoted out of tombstone"),
        }
    }

    pub fn tombstone(&mut self, id: &NodeId) {
        self.new_nodes.insert(id.clone(), Staged::Tombstone);
    }

    /// Write `value` at `path` within `id`'s value tree. `is_edit` controls
    /// whether `id` is recorded in `merge_edited` — `false` for phase-3
    /// rebuild writes, which change object identity but not logical content
    /// (spec.md §4.4).
    pub fn write_at(&mut self, id: &NodeId, path: &Path, value: Option<NodeValue>, is_edit: bool) {
        let current = self.current_value(id);
        let updated = deep_set(&current, path, value);
        self.get_or_promote(id).value = updated;
        if is_edit {
            self.merge_edited.insert(id.clone());
        }
    }
}

/// Remove the first edge matching `(node_id, path)` from `edges`, returning
/// whether one was found.
pub(crate) fn remove_one(edges: &mut Vec<Edge>, node_id: &NodeId, path: Option<&Path>) -> bool {
    if let Some(pos) = edges
        .iter()
        .position(|e| &e.node_id == node_id && e.path.as_deref() == path.map(|p| p.as_slice()))
    {
        edges.remove(pos);
        true
    } else {
        false
    }
}
