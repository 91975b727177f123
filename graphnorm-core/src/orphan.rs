use crate::bookkeeper::report_missing;
use crate::config::Config;
use crate::error::Result;
use crate::state::{remove_one, EditorState};
use graphnorm_api::NodeId;
use std::collections::{HashSet, VecDeque};

/// Phase 4: BFS-tombstone every node transitively orphaned by phase 2's
/// edge removals (spec.md §4.5).
///
/// `roots` is never collected, however empty its inbound set becomes — it
/// is the graph's set of entry points, not a node reachable only by
/// reference. Returns the number of nodes tombstoned, for `MergeReport`.
pub(crate) fn collect_orphans(
    state: &mut EditorState,
    initial: HashSet<NodeId>,
    roots: &HashSet<NodeId>,
    config: &Config,
) -> Result<usize> {
    let mut queue: VecDeque<NodeId> = initial.into_iter().collect();
    let mut processed: HashSet<NodeId> = HashSet::new();

    while let Some(id) = queue.pop_front() {
        if processed.contains(&id) || roots.contains(&id) {
            continue;
        }
        processed.insert(id.clone());

        let outbound = state.current_outbound(&id);
        state.tombstone(&id);
        state.merge_edited.insert(id.clone());

        for edge in outbound {
            let target = &edge.node_id;
            let target_record = state.get_or_promote(target);
            let removed = remove_one(&mut target_record.inbound, &id, edge.path.as_ref());
            let now_empty = target_record.inbound.is_empty();
            report_missing(removed, &id, target, edge.path.as_ref(), config)?;
            if now_empty {
                queue.push_back(target.clone());
            }
        }
    }
    Ok(processed.len())
}
