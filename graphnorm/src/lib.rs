//! # graphnorm
//!
//! **A normalized graph cache write engine for GraphQL-shaped payloads.**
//!
//! `graphnorm` merges denormalized, query-shaped response payloads into an
//! immutable, content-normalized node graph: scalar fields are diffed and
//! written in place, entity references are resolved to node ids and kept
//! bidirectionally consistent, parameterized fields get their own
//! deterministic identity, and nodes no longer reachable from the root set
//! are collected after every commit.
//!
//! ## 🚀 Quickstart
//!
//! Add `graphnorm` to your `Cargo.toml`. Then:
//!
//! ```rust
//! use graphnorm::{Cache, Config, EdgeMapNode, GraphSnapshot, Query};
//! use serde_json::json;
//!
//! fn main() -> graphnorm::Result<()> {
//!     // 1. Configure how a payload value names an entity.
//!     let config = Config::builder()
//!         .entity_id_for_node(|value| {
//!             value.get("id").and_then(|v| v.as_str()).map(str::to_string)
//!         })
//!         .build()?;
//!
//!     // 2. Open a cache (starts from an empty snapshot).
//!     let mut cache = Cache::new(config);
//!
//!     // 3. Describe the shape of the payload and merge it.
//!     let document = EdgeMapNode::new().with_field("me", EdgeMapNode::new());
//!     let query = Query::new(document);
//!     cache.merge(&query, json!({ "me": { "id": "1", "name": "Ada" } }))?;
//!
//!     // 4. Inspect the result.
//!     let snapshot = cache.snapshot();
//!     assert_eq!(snapshot.get("1").unwrap()["name"], "Ada");
//!     Ok(())
//! }
//! ```
//!
//! ## 💡 Core Concepts
//!
//! - **[`Cache`]**: The entry point. Owns the current [`Snapshot`] and the
//!   [`Config`] every merge is performed under.
//! - **[`Transaction`]**: One or more `merge` calls staged over a parent
//!   snapshot before `commit()` — mirrors spec.md's "one transaction, many
//!   merges" model.
//! - **[`Snapshot`] / [`GraphSnapshot`]**: The immutable, structurally
//!   shared read view produced by a commit.
//! - **`graphnorm_core`**: The write engine itself (payload walker,
//!   reference bookkeeper, rebuilder, orphan collector). Re-exported here
//!   for hosts that want the lower-level `Editor` API directly.
//!
//! ## 📦 Feature Flags
//!
//! | Flag | Description | Default |
//! |------|-------------|---------|
//! | (none yet) | `graphnorm` has no optional features today | — |

mod error;

pub use error::{Error, Result};
pub use graphnorm_api::{
    ArgExpr, Edge, EdgeMapNode, GraphSnapshot, NodeId, ParameterizedEdge, Path, PathSegment,
    Query, Value, DEFAULT_ROOT_ID, PARAMETERIZED_ID_SEPARATOR,
};
pub use graphnorm_core::{CacheLogger, Config, ConfigBuilder, MergeReport, NodeRecord, NodeValue};
pub use graphnorm_core::Snapshot;

use graphnorm_core::Editor;

/// The main cache handle.
///
/// `Cache` owns the current committed [`Snapshot`] and the [`Config`] every
/// merge runs under. It is the facade most hosts should reach for; use
/// [`graphnorm_core::Editor`] directly only if you need to stage a
/// transaction without a `Cache` to own the result.
///
/// # Example
///
/// ```ignore
/// use graphnorm::{Cache, Config};
///
/// let config = Config::builder().entity_id_for_node(|_| None).build().unwrap();
/// let cache = Cache::new(config);
/// ```
#[derive(Debug, Clone)]
pub struct Cache {
    config: Config,
    snapshot: Snapshot,
}

impl Cache {
    /// Opens a cache starting from an empty snapshot.
    pub fn new(config: Config) -> Self {
        Self {
            config,
            snapshot: Snapshot::empty(),
        }
    }

    /// Opens a cache starting from an existing snapshot — useful when
    /// restoring from a previously committed `Snapshot` handed back by an
    /// earlier `Cache` or `Transaction`.
    pub fn with_snapshot(config: Config, snapshot: Snapshot) -> Self {
        Self { config, snapshot }
    }

    /// Returns the current committed snapshot.
    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    /// Begins a transaction over the current snapshot.
    ///
    /// The transaction accepts one or more `merge` calls; its effects only
    /// become visible through `Cache::snapshot()` once `Transaction::commit`
    /// runs.
    pub fn begin(&mut self) -> Transaction<'_> {
        let editor = Editor::new(self.config.clone(), self.snapshot.clone());
        Transaction {
            cache: self,
            editor: Some(editor),
        }
    }

    /// Convenience for the common case of one `merge` immediately followed
    /// by `commit`.
    pub fn merge(
        &mut self,
        query: &Query,
        payload: impl Into<Value>,
    ) -> Result<MergeReport> {
        let mut txn = self.begin();
        let report = txn.merge(query, payload)?;
        txn.commit();
        Ok(report)
    }
}

/// A staged transaction: one or more `merge` calls over a parent snapshot,
/// finished by `commit`.
///
/// Dropping a `Transaction` without calling `commit` discards every staged
/// edit; the parent `Cache`'s snapshot is untouched, matching spec.md §5's
/// cancellation guarantee.
pub struct Transaction<'a> {
    cache: &'a mut Cache,
    editor: Option<Editor>,
}

impl<'a> Transaction<'a> {
    /// Merges one payload into the staged state.
    ///
    /// On error, the transaction's staged state is left as-is for
    /// inspection but should be discarded by the caller; the parent
    /// `Cache`'s committed snapshot is never touched by a failed merge.
    pub fn merge(&mut self, query: &Query, payload: impl Into<Value>) -> Result<MergeReport> {
        let editor = self.editor.as_mut().expect("transaction already committed");
        editor.merge(query, payload).map_err(Error::from)
    }

    /// Commits every `merge` staged so far, updating the owning `Cache`'s
    /// snapshot in place and returning the ids of every node edited this
    /// transaction.
    pub fn commit(mut self) -> std::collections::HashSet<NodeId> {
        let editor = self.editor.take().expect("transaction already committed");
        let result = editor.commit();
        self.cache.snapshot = result.snapshot;
        result.edited_node_ids
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use graphnorm_api::{EdgeMapNode as Doc, GraphSnapshot};
    use serde_json::json;

    fn config() -> Config {
        Config::builder()
            .entity_id_for_node(|value| {
                value.get("id").and_then(|v| v.as_str()).map(str::to_string)
            })
            .build()
            .unwrap()
    }

    #[test]
    fn merge_then_commit_is_visible_through_snapshot() {
        let mut cache = Cache::new(config());
        let document = Doc::new().with_field("me", Doc::new());
        let query = Query::new(document);
        cache
            .merge(&query, json!({ "me": { "id": "1", "name": "Ada" } }))
            .unwrap();
        assert_eq!(cache.snapshot().get("1").unwrap()["name"], "Ada");
    }

    #[test]
    fn multiple_merges_in_one_transaction_share_one_commit() {
        let mut cache = Cache::new(config());
        let document = Doc::new().with_field("me", Doc::new());
        let query = Query::new(document);

        let mut txn = cache.begin();
        txn.merge(&query, json!({ "me": { "id": "1", "name": "Ada" } }))
            .unwrap();
        txn.merge(&query, json!({ "me": { "id": "1", "age": 36 } }))
            .unwrap();
        txn.commit();

        let node = cache.snapshot().get("1").unwrap();
        assert_eq!(node["name"], "Ada");
        assert_eq!(node["age"], 36);
    }

    #[test]
    fn dropping_a_transaction_without_commit_discards_edits() {
        let mut cache = Cache::new(config());
        let document = Doc::new().with_field("me", Doc::new());
        let query = Query::new(document);

        {
            let mut txn = cache.begin();
            txn.merge(&query, json!({ "me": { "id": "1", "name": "Ada" } }))
                .unwrap();
        }

        assert!(cache.snapshot().get("1").is_none());
    }
}
