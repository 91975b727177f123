use crate::state::EditorState;
use graphnorm_api::NodeId;
use std::collections::{HashSet, VecDeque};

/// Phase 3: republish every node that transitively holds one of
/// `edited_ids` inline, so a reader who already has a stale holder snapshot
/// can tell it apart from a fresh one by object identity (spec.md §4.4,
/// §8 property 2).
///
/// `rebuilt` doubles as the BFS's seen-set and its initial work queue,
/// breaking cycles in the inbound graph: a node already rebuilt in this
/// pass is never revisited, even if reachable from more than one edited
/// node.
pub(crate) fn rebuild_inbound(state: &mut EditorState, edited_ids: &HashSet<NodeId>) {
    let mut queue: VecDeque<NodeId> = edited_ids.iter().cloned().collect();
    let mut rebuilt: HashSet<NodeId> = edited_ids.iter().cloned().collect();

    while let Some(node_id) = queue.pop_front() {
        for edge in state.current_inbound(&node_id) {
            let Some(path) = &edge.path else {
                // Parameterized-value edges have no own-value projection to
                // rewrite (spec.md §3 invariant 5).
                continue;
            };
            let child_value = state.current_value(&node_id);
            state.write_at(&edge.node_id, path, Some(child_value), false);
            if rebuilt.insert(edge.node_id.clone()) {
                queue.push_back(edge.node_id);
            }
        }
    }
}
