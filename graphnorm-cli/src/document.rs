use graphnorm_api::{ArgExpr, EdgeMapNode, NodeId, ParameterizedEdge, Query};
use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeMap;

/// On-disk shape of a query document, since parsing an actual GraphQL-style
/// selection set is an external collaborator's job (spec.md §1). A field is
/// marked parameterized with `"$args"`; its own nested selection goes under
/// `"$fields"`. `{"$var": "name"}` marks an argument as bound to a query
/// variable rather than a literal.
#[derive(Debug, Deserialize)]
pub struct QueryFile {
    #[serde(default = "default_root_id")]
    pub root_id: NodeId,
    #[serde(default)]
    pub variables: BTreeMap<String, Value>,
    pub document: Value,
}

fn default_root_id() -> NodeId {
    graphnorm_api::DEFAULT_ROOT_ID.to_string()
}

impl QueryFile {
    pub fn into_query(self) -> Query {
        Query::new(parse_document(&self.document))
            .with_variables(self.variables)
            .with_root_id(self.root_id)
    }
}

fn parse_document(document: &Value) -> EdgeMapNode {
    let Value::Object(fields) = document else {
        return EdgeMapNode::new();
    };
    let mut node = EdgeMapNode::new();
    for (name, child) in fields {
        node = node.with_field(name.clone(), parse_node(child));
    }
    node
}

fn parse_node(spec: &Value) -> EdgeMapNode {
    let Value::Object(map) = spec else {
        return EdgeMapNode::new();
    };
    let mut node = if let Some(Value::Object(args)) = map.get("$args") {
        let mut parameterized = ParameterizedEdge::new();
        for (name, arg) in args {
            parameterized = parameterized.with_arg(name.clone(), parse_arg_expr(arg));
        }
        EdgeMapNode::parameterized(parameterized)
    } else {
        EdgeMapNode::new()
    };
    if let Some(Value::Object(fields)) = map.get("$fields") {
        for (name, child) in fields {
            node = node.with_field(name.clone(), parse_node(child));
        }
    }
    node
}

fn parse_arg_expr(value: &Value) -> ArgExpr {
    if let Value::Object(map) = value {
        if map.len() == 1 {
            if let Some(Value::String(name)) = map.get("$var") {
                return ArgExpr::Variable(name.clone());
            }
        }
    }
    ArgExpr::Literal(value.clone())
}

/// Default `entity_id_for_node`: any mapping with a string or numeric `id`
/// field identifies an entity. Good enough for a CLI exploring a cache
/// interactively; hosts embedding `graphnorm-core` directly supply their own.
pub fn default_entity_id_for_node(value: &Value) -> Option<NodeId> {
    match value.get("id")? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
