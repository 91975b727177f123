use graphnorm_api::{NodeId, Path, Value, PARAMETERIZED_ID_SEPARATOR};
use std::collections::BTreeMap;

/// Compute a parameterized-value node id: `{container}❖{JSON(path)}❖{JSON(args)}`
/// (spec.md §3.2).
///
/// `args` must already be a `BTreeMap`, so `serde_json`'s `Map` serializer
/// writes its keys in sorted order — the same determinism `BTreeMap` gives
/// every other ordered structure in this crate — making the id stable
/// across two merges that supply the same arguments in a different order.
pub(crate) fn parameterized_id(container_id: &str, path: &Path, args: &BTreeMap<String, Value>) -> NodeId {
    let path_json = serde_json::to_string(path).expect("Path segments are always representable as JSON");
    let args_json = serde_json::to_string(args).expect("BTreeMap<String, Value> is always representable as JSON");
    format!("{container_id}{PARAMETERIZED_ID_SEPARATOR}{path_json}{PARAMETERIZED_ID_SEPARATOR}{args_json}")
}
