use im::{OrdMap, Vector};

/// A node's `value` tree.
///
/// Mirrors `graphnorm_api::Value` (`serde_json::Value`) in shape, but uses
/// `im`'s persistent `Vector`/`OrdMap` for arrays and objects instead of
/// `Vec`/`serde_json::Map`, so that [`crate::path_setter::deep_set`] only
/// reallocates the nodes on the path it touches — every other subtree is
/// shared, by construction, with the value it was derived from (spec.md §3
/// invariant 3, §4.6).
///
/// `Undefined` has no `serde_json` counterpart. It marks positions that
/// were never written: a hole left by growing an array to a payload's
/// length (spec.md §4.2 rule 3, §4.6 "leaves a hole"), or simply an object
/// field nothing has ever set. It is distinct from an explicit JSON `null`
/// written by a payload (spec.md §8 scenario S6 depends on this: `[null,
/// {...}]` must read back as `[null, undefined]`, not `[null, null]`).
#[derive(Debug, Clone, PartialEq)]
pub enum NodeValue {
    Undefined,
    Null,
    Bool(bool),
    Number(serde_json::Number),
    String(String),
    Array(Vector<NodeValue>),
    Object(OrdMap<String, NodeValue>),
}

impl Default for NodeValue {
    fn default() -> Self {
        NodeValue::Undefined
    }
}

impl NodeValue {
    pub fn empty_object() -> Self {
        NodeValue::Object(OrdMap::new())
    }

    pub fn is_scalar(&self) -> bool {
        matches!(
            self,
            NodeValue::Null | NodeValue::Bool(_) | NodeValue::Number(_) | NodeValue::String(_)
        )
    }

    pub fn as_object(&self) -> Option<&OrdMap<String, NodeValue>> {
        match self {
            NodeValue::Object(m) => Some(m),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&Vector<NodeValue>> {
        match self {
            NodeValue::Array(a) => Some(a),
            _ => None,
        }
    }

    pub fn get_field(&self, name: &str) -> Option<&NodeValue> {
        self.as_object().and_then(|m| m.get(name))
    }

    pub fn get_index(&self, idx: usize) -> Option<&NodeValue> {
        self.as_array().and_then(|a| a.get(idx))
    }
}

impl From<&serde_json::Value> for NodeValue {
    fn from(v: &serde_json::Value) -> Self {
        match v {
            serde_json::Value::Null => NodeValue::Null,
            serde_json::Value::Bool(b) => NodeValue::Bool(*b),
            serde_json::Value::Number(n) => NodeValue::Number(n.clone()),
            serde_json::Value::String(s) => NodeValue::String(s.clone()),
            serde_json::Value::Array(items) => {
                NodeValue::Array(items.iter().map(NodeValue::from).collect())
            }
            serde_json::Value::Object(map) => NodeValue::Object(
                map.iter()
                    .map(|(k, v)| (k.clone(), NodeValue::from(v)))
                    .collect(),
            ),
        }
    }
}

impl From<serde_json::Value> for NodeValue {
    fn from(v: serde_json::Value) -> Self {
        NodeValue::from(&v)
    }
}

/// `Undefined` has no JSON representation and is rendered as `null`, the
/// same lossy mapping `JSON.stringify` uses for `undefined` array elements.
impl From<&NodeValue> for serde_json::Value {
    fn from(v: &NodeValue) -> Self {
        match v {
            NodeValue::Undefined | NodeValue::Null => serde_json::Value::Null,
            NodeValue::Bool(b) => serde_json::Value::Bool(*b),
            NodeValue::Number(n) => serde_json::Value::Number(n.clone()),
            NodeValue::String(s) => serde_json::Value::String(s.clone()),
            NodeValue::Array(items) => {
                serde_json::Value::Array(items.iter().map(serde_json::Value::from).collect())
            }
            NodeValue::Object(map) => serde_json::Value::Object(
                map.iter()
                    .map(|(k, v)| (k.clone(), serde_json::Value::from(v)))
                    .collect(),
            ),
        }
    }
}

impl From<NodeValue> for serde_json::Value {
    fn from(v: NodeValue) -> Self {
        serde_json::Value::from(&v)
    }
}
