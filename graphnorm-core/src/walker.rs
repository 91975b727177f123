use crate::config::Config;
use crate::paramid::parameterized_id;
use crate::reference_edit::ReferenceEdit;
use crate::state::EditorState;
use crate::value::NodeValue;
use graphnorm_api::{EdgeMapNode, NodeId, Path, PathSegment, Value};
use std::collections::{BTreeMap, VecDeque};

/// One position still to be visited: a container id, the path within that
/// container's value tree, the payload subtree at that position, and the
/// edge-map subtree describing it (spec.md §4.2).
///
/// Kept in an explicit `VecDeque` rather than walked by recursion, so a
/// deeply nested payload cannot blow the stack.
struct WalkTask {
    container_id: NodeId,
    path: Path,
    payload: NodeValue,
    edge_map: Option<EdgeMapNode>,
}

/// Phase 1: jointly walk `payload` against `query.document`, starting at
/// `root_id`. Applies scalar writes and parameterized-edge bookkeeping
/// directly; returns the entity-reference edits for phase 2 to apply.
pub(crate) fn walk_payload(
    state: &mut EditorState,
    config: &Config,
    variables: &BTreeMap<String, Value>,
    root_id: NodeId,
    payload: NodeValue,
    document: &EdgeMapNode,
) -> Vec<ReferenceEdit> {
    let mut queue = VecDeque::new();
    enqueue_children(&mut queue, root_id, &payload, Some(document.clone()));

    let mut reference_edits = Vec::new();
    while let Some(task) = queue.pop_front() {
        visit(state, config, variables, &mut queue, &mut reference_edits, task);
    }
    reference_edits
}

fn visit(
    state: &mut EditorState,
    config: &Config,
    variables: &BTreeMap<String, Value>,
    queue: &mut VecDeque<WalkTask>,
    reference_edits: &mut Vec<ReferenceEdit>,
    task: WalkTask,
) {
    let WalkTask {
        container_id,
        path,
        payload,
        edge_map,
    } = task;

    // Rule 1: parameterized edge.
    if let Some(edge_map_node) = &edge_map {
        if let Some(parameterized) = &edge_map_node.parameterized {
            let args = parameterized.resolve_args(variables);
            let edge_id = parameterized_id(&container_id, &path, &args);
            ensure_parameterized_edge(state, &container_id, &edge_id);
            // The nested walk re-classifies `payload` from scratch (it may turn
            // out to be an entity reference, array, or scalar at its own root),
            // but must not re-match rule 1 against the same `parameterized`
            // marker — that would mint an endless chain of edges for one field.
            let inner_edge_map = EdgeMapNode {
                parameterized: None,
                fields: edge_map_node.fields.clone(),
            };
            enqueue_root(queue, edge_id, payload, Some(inner_edge_map));
            return;
        }
    }

    // Rule 2: entity reference.
    if matches!(payload, NodeValue::Object(_)) {
        let current = state.value_at(&container_id, &path);
        let next_raw = config.entity_id_for_node(&payload);
        let prev = config.entity_id_for_node(&current);
        if next_raw.is_some() || prev.is_some() {
            let next = if next_raw.is_none() && prev.is_some() {
                prev.clone()
            } else {
                next_raw
            };
            if prev != next {
                reference_edits.push(ReferenceEdit {
                    holder_id: container_id.clone(),
                    path: path.clone(),
                    prev: prev.clone(),
                    next: next.clone(),
                });
            }
            if let Some(next_id) = next {
                enqueue_children(queue, next_id, &payload, edge_map.clone());
            }
            return;
        }
    }

    // Rule 3: array.
    if let NodeValue::Array(items) = &payload {
        let current = state.value_at(&container_id, &path);
        let same_length = matches!(&current, NodeValue::Array(existing) if existing.len() == items.len());
        if !same_length {
            let existing = current.as_array().cloned().unwrap_or_default();
            let mut replacement = im::Vector::new();
            for i in 0..items.len() {
                replacement.push_back(existing.get(i).cloned().unwrap_or(NodeValue::Undefined));
            }
            state.write_at(&container_id, &path, Some(NodeValue::Array(replacement)), true);
        }
        for (i, item) in items.iter().enumerate() {
            let mut child_path = path.clone();
            child_path.push(PathSegment::Index(i));
            queue.push_back(WalkTask {
                container_id: container_id.clone(),
                path: child_path,
                payload: item.clone(),
                edge_map: edge_map.clone(),
            });
        }
        return;
    }

    // Rule 4: scalar.
    if payload.is_scalar() {
        let current = state.value_at(&container_id, &path);
        if payload != current {
            state.write_at(&container_id, &path, Some(payload), true);
        }
        return;
    }

    // Rule 5: otherwise, continue descent (a plain mapping with no identity).
    if let NodeValue::Object(fields) = &payload {
        for (key, val) in fields.iter() {
            let mut child_path = path.clone();
            child_path.push(PathSegment::Field(key.clone()));
            queue.push_back(WalkTask {
                container_id: container_id.clone(),
                path: child_path,
                payload: val.clone(),
                edge_map: edge_map.as_ref().and_then(|n| n.field(key)).cloned(),
            });
        }
    }
}

fn ensure_parameterized_edge(state: &mut EditorState, container_id: &NodeId, edge_id: &NodeId) {
    let already = state
        .current_outbound(container_id)
        .iter()
        .any(|e| &e.node_id == edge_id && e.path.is_none());
    if already {
        return;
    }
    state
        .get_or_promote(container_id)
        .outbound
        .push(graphnorm_api::Edge::new(edge_id.clone(), None));
    state
        .get_or_promote(edge_id)
        .inbound
        .push(graphnorm_api::Edge::new(container_id.clone(), None));
}

/// Enqueue a nested walk whose own root position must itself be classified
/// (spec.md §4.2: a parameterized value's payload may itself turn out to be
/// an entity reference, array, or scalar).
fn enqueue_root(queue: &mut VecDeque<WalkTask>, container_id: NodeId, payload: NodeValue, edge_map: Option<EdgeMapNode>) {
    queue.push_back(WalkTask {
        container_id,
        path: Vec::new(),
        payload,
        edge_map,
    });
}

/// Enqueue a nested walk whose root position is already classified (it is
/// the entity reference we just resolved), so only its children are walked.
fn enqueue_children(queue: &mut VecDeque<WalkTask>, container_id: NodeId, payload: &NodeValue, edge_map: Option<EdgeMapNode>) {
    match payload {
        NodeValue::Object(fields) => {
            for (key, val) in fields.iter() {
                queue.push_back(WalkTask {
                    container_id: container_id.clone(),
                    path: vec![PathSegment::Field(key.clone())],
                    payload: val.clone(),
                    edge_map: edge_map.as_ref().and_then(|n| n.field(key)).cloned(),
                });
            }
        }
        NodeValue::Array(items) => {
            for (i, item) in items.iter().enumerate() {
                queue.push_back(WalkTask {
                    container_id: container_id.clone(),
                    path: vec![PathSegment::Index(i)],
                    payload: item.clone(),
                    edge_map: edge_map.clone(),
                });
            }
        }
        _ => {}
    }
}
