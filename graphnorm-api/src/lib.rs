//! Public, dependency-light types shared at the edges of the cache write
//! engine: node identity, the dynamic value tree, and the edge-map /
//! query-document shapes produced by an external query compiler.
//!
//! Nothing in this crate has behavior beyond simple constructors and
//! `Display`/`serde` impls — the write engine itself lives in
//! `graphnorm-core`.

mod edge_map;
mod ids;
mod snapshot;

pub use edge_map::{ArgExpr, EdgeMapNode, ParameterizedEdge, Query};
pub use ids::{Edge, NodeId, Path, PathSegment};
pub use snapshot::GraphSnapshot;

/// The dynamic value tree carried by payloads and node values.
///
/// Both a payload and a node's `value` are arbitrary, acyclic JSON-shaped
/// trees of scalars, arrays, and string-keyed maps, so `serde_json::Value`
/// is used directly rather than a hand-rolled tagged enum.
pub use serde_json::Value;

/// Separator used in parameterized-value node ids (`U+2756`, BLACK DIAMOND
/// MINUS WHITE X). Must not occur in any container id.
pub const PARAMETERIZED_ID_SEPARATOR: char = '\u{2756}';

/// The well-known root id used when a query document does not specify one.
pub const DEFAULT_ROOT_ID: &str = "QueryRoot";
