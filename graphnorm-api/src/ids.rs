use std::fmt;

/// Opaque node identifier.
///
/// A node is either an entity (id extracted from its payload by the
/// host-configured `entity_id_for_node` function), a parameterized value
/// (a deterministic composite id, see [`crate::edge_map`]), or a root (a
/// small fixed set of well-known ids such as [`crate::DEFAULT_ROOT_ID`]).
pub type NodeId = String;

/// One step of a [`Path`] into a node's `value` tree.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
pub enum PathSegment {
    Field(String),
    Index(usize),
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathSegment::Field(name) => write!(f, "{name}"),
            PathSegment::Index(i) => write!(f, "{i}"),
        }
    }
}

impl From<&str> for PathSegment {
    fn from(s: &str) -> Self {
        PathSegment::Field(s.to_string())
    }
}

impl From<String> for PathSegment {
    fn from(s: String) -> Self {
        PathSegment::Field(s)
    }
}

impl From<usize> for PathSegment {
    fn from(i: usize) -> Self {
        PathSegment::Index(i)
    }
}

/// A sequence of string/number steps from a node's value root to a given
/// position. `path.is_empty()` means "the value itself", as distinct from
/// `Option<Path>::None` on an [`Edge`], which means "no own-value
/// projection at all" (parameterized-value edges).
pub type Path = Vec<PathSegment>;

/// One directed pointer between two node records.
///
/// Stored symmetrically: a reference edit that creates `{h -> t, path}`
/// appends `{target: t, path}` to `h.outbound` and `{holder: h, path}` to
/// `t.inbound`. `path = None` marks a parameterized-value edge, whose
/// target is not exposed under any field of the holder's own `value`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Edge {
    pub node_id: NodeId,
    pub path: Option<Path>,
}

impl Edge {
    pub fn new(node_id: impl Into<NodeId>, path: Option<Path>) -> Self {
        Self {
            node_id: node_id.into(),
            path,
        }
    }
}
