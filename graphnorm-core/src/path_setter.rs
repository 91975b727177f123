use crate::value::NodeValue;
use graphnorm_api::{Path, PathSegment};
use im::{OrdMap, Vector};

/// Copy-on-write deep-set: return the value that results from writing
/// `value` at `path` within `current`, creating intermediate containers as
/// needed (spec.md §4.6).
///
/// The three guarantees spec.md §4.6 asks for all fall out of `im`'s
/// persistent structures rather than anything this function does itself:
/// positions outside `path` are untouched by identity (the nodes `im`
/// doesn't rewrite are the same `Rc`s as in `current`); intermediate
/// containers are created as a mapping or an array to match the next path
/// step's kind; and repeated calls with the same `current`/`path`/`value`
/// are referentially transparent.
///
/// `value = None` clears the position — used only at the end of a path,
/// to represent an array slot that must exist but has nothing written to
/// it yet.
pub(crate) fn deep_set(current: &NodeValue, path: &[PathSegment], value: Option<NodeValue>) -> NodeValue {
    match path.split_first() {
        None => value.unwrap_or(NodeValue::Undefined),
        Some((PathSegment::Field(name), rest)) => {
            let mut map = current.as_object().cloned().unwrap_or_else(OrdMap::new);
            if rest.is_empty() {
                match value {
                    Some(v) => {
                        map.insert(name.clone(), v);
                    }
                    None => {
                        map.remove(name);
                    }
                }
            } else {
                let child = map
                    .get(name)
                    .cloned()
                    .unwrap_or_else(|| default_container_for(&rest[0]));
                map.insert(name.clone(), deep_set(&child, rest, value));
            }
            NodeValue::Object(map)
        }
        Some((PathSegment::Index(idx), rest)) => {
            let mut arr = current.as_array().cloned().unwrap_or_else(Vector::new);
            while arr.len() <= *idx {
                arr.push_back(NodeValue::Undefined);
            }
            if rest.is_empty() {
                let _ = arr.set(*idx, value.unwrap_or(NodeValue::Undefined));
            } else {
                let child = arr
                    .get(*idx)
                    .cloned()
                    .unwrap_or_else(|| default_container_for(&rest[0]));
                let updated = deep_set(&child, rest, value);
                let _ = arr.set(*idx, updated);
            }
            NodeValue::Array(arr)
        }
    }
}

fn default_container_for(segment: &PathSegment) -> NodeValue {
    match segment {
        PathSegment::Field(_) => NodeValue::empty_object(),
        PathSegment::Index(_) => NodeValue::Array(Vector::new()),
    }
}

/// Read the value at `path` within `current`, or `NodeValue::Undefined` if
/// any step along the way is missing.
pub(crate) fn navigate(current: &NodeValue, path: &Path) -> NodeValue {
    let mut cur = current.clone();
    for segment in path {
        cur = match (&cur, segment) {
            (NodeValue::Object(map), PathSegment::Field(name)) => {
                map.get(name).cloned().unwrap_or(NodeValue::Undefined)
            }
            (NodeValue::Array(arr), PathSegment::Index(i)) => {
                arr.get(*i).cloned().unwrap_or(NodeValue::Undefined)
            }
            _ => NodeValue::Undefined,
        };
    }
    cur
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_scalar_at_shallow_path() {
        let result = deep_set(
            &NodeValue::Undefined,
            &[PathSegment::Field("name".into())],
            Some(NodeValue::String("Foo".into())),
        );
        assert_eq!(navigate(&result, &vec![PathSegment::Field("name".into())]), NodeValue::String("Foo".into()));
    }

    #[test]
    fn creates_intermediate_object_and_array_containers() {
        let path = vec![
            PathSegment::Field("a".into()),
            PathSegment::Index(2),
            PathSegment::Field("b".into()),
        ];
        let result = deep_set(&NodeValue::Undefined, &path, Some(NodeValue::Bool(true)));
        assert_eq!(navigate(&result, &path), NodeValue::Bool(true));
        // index 0 and 1 of the created array are holes, not set values.
        let index0 = vec![PathSegment::Field("a".into()), PathSegment::Index(0)];
        assert_eq!(navigate(&result, &index0), NodeValue::Undefined);
    }

    #[test]
    fn untouched_siblings_share_structure_by_identity() {
        let base = deep_set(
            &NodeValue::Undefined,
            &[PathSegment::Field("keep".into())],
            Some(NodeValue::String("same".into())),
        );
        let updated = deep_set(
            &base,
            &[PathSegment::Field("other".into())],
            Some(NodeValue::String("changed".into())),
        );
        if let (NodeValue::Object(a), NodeValue::Object(b)) = (&base, &updated) {
            let va = a.get("keep").unwrap();
            let vb = b.get("keep").unwrap();
            assert_eq!(va, vb);
        } else {
            panic!("expected objects");
        }
    }

    #[test]
    fn empty_path_replaces_whole_value() {
        let result = deep_set(&NodeValue::Undefined, &[], Some(NodeValue::Bool(false)));
        assert_eq!(result, NodeValue::Bool(false));
    }
}
