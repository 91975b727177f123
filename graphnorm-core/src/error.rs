use graphnorm_api::{NodeId, Path};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while merging a payload into the graph.
///
/// Only [`Config::strict`](crate::Config::strict) mode surfaces
/// [`Error::EdgeSymmetryCorruption`] and [`Error::IdentityViolation`] — in
/// non-strict mode both are logged through [`crate::CacheLogger`] and merge
/// proceeds on a best-effort basis (spec.md §7).
#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    /// `Config` was built without an `entity_id_for_node` function.
    #[error("graphnorm: entity_id_for_node is required to build a Config")]
    MissingEntityId,

    /// The same `(holder, path)` position was given two different target
    /// ids within one `merge` call, and `Config::strict` is set.
    #[error(
        "identity violation at {holder} {path:?}: existing target {existing:?}, incoming target {incoming:?}"
    )]
    IdentityViolation {
        holder: NodeId,
        path: Path,
        existing: NodeId,
        incoming: NodeId,
    },

    /// An edge removal expected to find its symmetric counterpart and did
    /// not, and `Config::strict` is set.
    #[error("edge symmetry corruption: no edge {holder} -> {target} at {path:?} to remove")]
    EdgeSymmetryCorruption {
        holder: NodeId,
        target: NodeId,
        path: Option<Path>,
    },
}
