use crate::bookkeeper::apply_reference_edits;
use crate::config::Config;
use crate::error::Result;
use crate::orphan::collect_orphans;
use crate::rebuild::rebuild_inbound;
use crate::snapshot::Snapshot;
use crate::state::{EditorState, Staged};
use crate::value::NodeValue;
use crate::walker::walk_payload;
use graphnorm_api::{NodeId, Query, Value};
use std::collections::{BTreeSet, HashMap, HashSet};

/// A single write transaction against a [`Snapshot`] (spec.md §4.1).
///
/// Call [`Editor::merge`] any number of times, then [`Editor::commit`] once
/// to publish a new, structurally-shared [`Snapshot`]. Nothing is visible
/// to other readers of `parent` until `commit` runs — an `Editor` owns its
/// staged writes exclusively.
pub struct Editor {
    config: Config,
    parent: Snapshot,
    new_nodes: HashMap<NodeId, Staged>,
    edited_node_ids: HashSet<NodeId>,
    roots: HashSet<NodeId>,
}

/// Diagnostics returned by one `merge` call (spec.md §7 "Supplemented
/// Features" — not part of the original write-only interface, but useful
/// for hosts that want to know what a merge actually touched without
/// re-diffing two snapshots).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergeReport {
    pub edited_node_ids: BTreeSet<NodeId>,
    pub reference_edits_applied: usize,
    pub orphans_collected: usize,
}

/// The result of [`Editor::commit`]: the new snapshot, and every node id
/// whose value changed across the whole transaction (spec.md §4.1).
#[derive(Debug, Clone)]
pub struct CommitResult {
    pub snapshot: Snapshot,
    pub edited_node_ids: HashSet<NodeId>,
}

impl Editor {
    pub fn new(config: Config, parent: Snapshot) -> Self {
        let mut roots = HashSet::new();
        roots.insert(graphnorm_api::DEFAULT_ROOT_ID.to_string());
        Self {
            config,
            parent,
            new_nodes: HashMap::new(),
            edited_node_ids: HashSet::new(),
            roots,
        }
    }

    /// Merge `payload` into the graph under `query`'s document and root,
    /// running the four ordered phases described in spec.md §4.1: walk,
    /// apply reference edits, rebuild inbound holders, collect orphans.
    pub fn merge(&mut self, query: &Query, payload: impl Into<Value>) -> Result<MergeReport> {
        self.roots.insert(query.root_id.clone());
        let payload = NodeValue::from(payload.into());

        let mut state = EditorState::new(&self.parent, &mut self.new_nodes);

        let reference_edits = walk_payload(
            &mut state,
            &self.config,
            &query.variables,
            query.root_id.clone(),
            payload,
            &query.document,
        );
        let reference_edits_applied = reference_edits.len();

        let orphan_candidates = apply_reference_edits(&mut state, reference_edits, &self.config)?;

        let edited_this_merge = state.merge_edited.clone();
        rebuild_inbound(&mut state, &edited_this_merge);

        let orphans_collected = collect_orphans(&mut state, orphan_candidates, &self.roots, &self.config)?;

        self.edited_node_ids.extend(state.merge_edited.iter().cloned());
        Ok(MergeReport {
            edited_node_ids: state.merge_edited.into_iter().collect(),
            reference_edits_applied,
            orphans_collected,
        })
    }

    /// Publish the staged writes as a new snapshot. Nodes never touched by
    /// any `merge` call on this editor keep citing the exact `Arc` they had
    /// in `parent` (spec.md §3 invariant 3).
    pub fn commit(self) -> CommitResult {
        let mut combined = self.parent.nodes_clone();
        for (id, staged) in self.new_nodes {
            match staged {
                Staged::Record(record) => {
                    combined.insert(id, std::sync::Arc::new(record));
                }
                Staged::Tombstone => {
                    combined.remove(&id);
                }
            }
        }
        CommitResult {
            snapshot: Snapshot::from_map(combined),
            edited_node_ids: self.edited_node_ids,
        }
    }
}
