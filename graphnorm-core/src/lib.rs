//! The write engine: merges GraphQL-shaped payloads into an immutable,
//! content-normalized node graph (spec.md §1–§4).
//!
//! A [`Snapshot`] is a read-only, `Arc`-shared map from node id to node
//! record. An [`Editor`] stages one or more [`Editor::merge`] calls against
//! a parent `Snapshot` and produces the next one on [`Editor::commit`],
//! sharing structure with its parent everywhere it didn't write.
//!
//! Node identity, the edge-map/query-document shapes, and the external
//! `Value` type live in `graphnorm-api`; this crate only consumes them.

mod bookkeeper;
mod config;
mod editor;
mod error;
mod node;
mod orphan;
mod paramid;
mod path_setter;
mod rebuild;
mod reference_edit;
mod snapshot;
mod state;
mod value;
mod walker;

pub use config::{CacheLogger, Config, ConfigBuilder};
pub use editor::{CommitResult, Editor, MergeReport};
pub use error::{Error, Result};
pub use node::NodeRecord;
pub use snapshot::Snapshot;
pub use value::NodeValue;

pub use graphnorm_api::{
    ArgExpr, Edge, EdgeMapNode, GraphSnapshot, NodeId, ParameterizedEdge, Path, PathSegment, Query,
    Value, DEFAULT_ROOT_ID, PARAMETERIZED_ID_SEPARATOR,
};
