use crate::{NodeId, Value};
use std::collections::BTreeMap;

/// A static argument expression as it appears in a query document: either a
/// literal value or a reference to a bound variable, resolved against
/// `Query::variables` at merge time.
#[derive(Debug, Clone, PartialEq)]
pub enum ArgExpr {
    Literal(Value),
    Variable(String),
}

impl ArgExpr {
    /// Resolve against bound variables. An unbound variable becomes `null`,
    /// per spec: "undefined variables become `null`".
    pub fn resolve(&self, variables: &BTreeMap<String, Value>) -> Value {
        match self {
            ArgExpr::Literal(v) => v.clone(),
            ArgExpr::Variable(name) => variables.get(name).cloned().unwrap_or(Value::Null),
        }
    }
}

/// Marks a position in the edge map as parameterized, carrying its static
/// argument expressions.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParameterizedEdge {
    pub args: BTreeMap<String, ArgExpr>,
}

impl ParameterizedEdge {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_arg(mut self, name: impl Into<String>, expr: ArgExpr) -> Self {
        self.args.insert(name.into(), expr);
        self
    }

    /// Resolve all args against bound variables, producing the map used to
    /// compute a parameterized node id and stored as its identity.
    pub fn resolve_args(&self, variables: &BTreeMap<String, Value>) -> BTreeMap<String, Value> {
        self.args
            .iter()
            .map(|(k, expr)| (k.clone(), expr.resolve(variables)))
            .collect()
    }
}

/// A tree mirroring a query document's selection set, produced by an
/// external query compiler (out of scope for this crate — see spec.md §1).
/// Nodes are marked [`ParameterizedEdge`] at parameterized field positions;
/// all other positions simply nest further `fields`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EdgeMapNode {
    pub parameterized: Option<ParameterizedEdge>,
    pub fields: BTreeMap<String, EdgeMapNode>,
}

impl EdgeMapNode {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn parameterized(args: ParameterizedEdge) -> Self {
        Self {
            parameterized: Some(args),
            fields: BTreeMap::new(),
        }
    }

    pub fn with_field(mut self, name: impl Into<String>, child: EdgeMapNode) -> Self {
        self.fields.insert(name.into(), child);
        self
    }

    pub fn field(&self, name: &str) -> Option<&EdgeMapNode> {
        self.fields.get(name)
    }
}

/// A query as handed to `Editor::merge`: the edge map for its document, the
/// bound variables, and the root node this payload should be merged under.
#[derive(Debug, Clone, PartialEq)]
pub struct Query {
    pub document: EdgeMapNode,
    pub variables: BTreeMap<String, Value>,
    pub root_id: NodeId,
}

impl Query {
    pub fn new(document: EdgeMapNode) -> Self {
        Self {
            document,
            variables: BTreeMap::new(),
            root_id: crate::DEFAULT_ROOT_ID.to_string(),
        }
    }

    pub fn with_variables(mut self, variables: BTreeMap<String, Value>) -> Self {
        self.variables = variables;
        self
    }

    pub fn with_root_id(mut self, root_id: impl Into<NodeId>) -> Self {
        self.root_id = root_id.into();
        self
    }
}
