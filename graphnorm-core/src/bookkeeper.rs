use crate::config::Config;
use crate::error::{Error, Result};
use crate::reference_edit::ReferenceEdit;
use crate::state::{remove_one, EditorState};
use graphnorm_api::{Edge, NodeId, Path};
use std::collections::{BTreeMap, HashSet};

/// Phase 2: apply the reference edits collected by the payload walker.
///
/// Edits targeting the same `(holder, path)` within one `merge` call are
/// deduplicated, keeping the last one in walk order (spec.md §9 Open
/// Question 1) — in `Config::strict` mode, two edits disagreeing on the
/// target instead raise [`Error::IdentityViolation`].
///
/// Returns the set of nodes that lost their last inbound edge during this
/// phase, which phase 4 sweeps for garbage collection.
pub(crate) fn apply_reference_edits(
    state: &mut EditorState,
    edits: Vec<ReferenceEdit>,
    config: &Config,
) -> Result<HashSet<NodeId>> {
    let mut deduped: BTreeMap<(NodeId, Path), ReferenceEdit> = BTreeMap::new();
    for edit in edits {
        let key = (edit.holder_id.clone(), edit.path.clone());
        if let Some(existing) = deduped.get(&key) {
            if existing.next != edit.next {
                if config.strict {
                    return Err(Error::IdentityViolation {
                        holder: edit.holder_id.clone(),
                        path: edit.path.clone(),
                        existing: existing.next.clone().unwrap_or_default(),
                        incoming: edit.next.clone().unwrap_or_default(),
                    });
                }
                if let Some(logger) = &config.logger {
                    logger.warn(&format!(
                        "duplicate reference edit at {} {:?}, keeping last write",
                        edit.holder_id, edit.path
                    ));
                }
            }
        }
        deduped.insert(key, edit);
    }

    let mut orphan_candidates: HashSet<NodeId> = HashSet::new();
    for (_, edit) in deduped {
        let target_value = match &edit.next {
            Some(id) => state.current_value(id),
            None => crate::value::NodeValue::Null,
        };
        state.write_at(&edit.holder_id, &edit.path, Some(target_value), true);

        if let Some(prev) = &edit.prev {
            let emptied = remove_edge_pair(state, &edit.holder_id, prev, &edit.path, config)?;
            if emptied {
                orphan_candidates.insert(prev.clone());
            }
        }
        if let Some(next) = &edit.next {
            add_edge_pair(state, &edit.holder_id, next, Some(&edit.path));
            orphan_candidates.remove(next);
        }
    }
    Ok(orphan_candidates)
}

fn remove_edge_pair(
    state: &mut EditorState,
    holder: &NodeId,
    target: &NodeId,
    path: &Path,
    config: &Config,
) -> Result<bool> {
    let removed_out = remove_one(&mut state.get_or_promote(holder).outbound, target, Some(path));
    report_missing(removed_out, holder, target, Some(path), config)?;

    let target_record = state.get_or_promote(target);
    let removed_in = remove_one(&mut target_record.inbound, holder, Some(path));
    report_missing(removed_in, holder, target, Some(path), config)?;
    Ok(target_record.inbound.is_empty())
}

fn add_edge_pair(state: &mut EditorState, holder: &NodeId, target: &NodeId, path: Option<&Path>) {
    state
        .get_or_promote(holder)
        .outbound
        .push(Edge::new(target.clone(), path.cloned()));
    state
        .get_or_promote(target)
        .inbound
        .push(Edge::new(holder.clone(), path.cloned()));
}

pub(crate) fn report_missing(
    found: bool,
    holder: &NodeId,
    target: &NodeId,
    path: Option<&Path>,
    config: &Config,
) -> Result<()> {
    if found {
        return Ok(());
    }
    if config.strict {
        return Err(Error::EdgeSymmetryCorruption {
            holder: holder.clone(),
            target: target.clone(),
            path: path.cloned(),
        });
    }
    if let Some(logger) = &config.logger {
        logger.warn(&format!("edge {holder} -> {target} at {path:?} was already absent"));
    }
    Ok(())
}
