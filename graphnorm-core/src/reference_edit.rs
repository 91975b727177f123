use graphnorm_api::{NodeId, Path};

/// A deferred entity-reference change, collected during the payload walk
/// (phase 1) and applied by the reference bookkeeper (phase 2).
///
/// Entity references are deferred, unlike parameterized edges, because
/// applying one requires reading the target's *post-walk* value (spec.md
/// §4.3) — which may still be edited by a nested walk elsewhere in the
/// same queue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ReferenceEdit {
    pub holder_id: NodeId,
    pub path: Path,
    pub prev: Option<NodeId>,
    pub next: Option<NodeId>,
}
