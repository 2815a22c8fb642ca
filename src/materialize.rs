//! Turns decoded JSON into domain objects.
//!
//! Objects shaped `{"kind": <tag>, "data": {...}}` become the node type the
//! tag resolves to, built from the inner `data`. Every other object becomes
//! a [`Blob`] over its own keys. Every produced container is bound to the
//! client and tagged with the request path, so the whole tree can make
//! follow-up calls. This never fails: anything unrecognized degrades to the
//! most generic container.

use serde_json::{Map, Value};

use crate::{
    models::{Blob, Kind, ListBlob, Node},
    util::unescape_entities,
    Client,
};

pub(crate) fn thingify(client: &Client, value: Value, path: Option<&str>) -> Node {
    match value {
        Value::Null => Node::Null,
        Value::Bool(b) => Node::Bool(b),
        Value::Number(n) => Node::Number(n),
        Value::String(s) => Node::String(unescape_entities(&s)),
        Value::Array(values) => {
            let items = values
                .into_iter()
                .map(|v| thingify(client, v, path))
                .collect();
            Node::List(ListBlob::new(client.clone(), path, items))
        }
        Value::Object(map) => thingify_object(client, map, path),
    }
}

/// The kind of a wrapped object, or [`Kind::Blob`] if it isn't one.
fn identify(map: &Map<String, Value>) -> Kind {
    match (map.get("kind"), map.get("data")) {
        (Some(Value::String(tag)), Some(Value::Object(_))) => Kind::resolve(tag),
        _ => Kind::Blob,
    }
}

fn thingify_object(client: &Client, mut map: Map<String, Value>, path: Option<&str>) -> Node {
    let kind = identify(&map);
    if kind == Kind::Blob {
        return Node::Blob(populate(Blob::new(client.clone(), path), client, map, path));
    }

    let tag = match map.remove("kind") {
        Some(Value::String(tag)) => tag,
        _ => String::new(),
    };
    let data = match map.remove("data") {
        Some(Value::Object(data)) => data,
        _ => Map::new(),
    };
    let blob = populate(Blob::new(client.clone(), path), client, data, path);
    kind.construct(&tag, blob)
}

fn populate(mut blob: Blob, client: &Client, map: Map<String, Value>, path: Option<&str>) -> Blob {
    for (key, value) in map {
        blob.set(key, thingify(client, value, path));
    }
    blob
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        models::{Thing, ThingData},
        testing::offline_client,
    };
    use serde_json::json;

    fn run(value: Value, path: Option<&str>) -> Node {
        thingify(&offline_client(), value, path)
    }

    #[test]
    fn passes_scalars_through() {
        assert_eq!(run(json!(42), None), Node::from(42));
        assert_eq!(run(json!("foobar"), None), Node::from("foobar"));
        assert_eq!(run(json!(true), None), Node::Bool(true));
        assert_eq!(run(json!(null), None), Node::Null);
        assert_eq!(run(json!(1.5), None).as_f64(), Some(1.5));
    }

    #[test]
    fn unescapes_strings() {
        assert_eq!(run(json!("&#34;"), None), Node::from("\""));
        assert_eq!(run(json!("&amp;#34; &amp;#229;"), None), Node::from("\" å"));
    }

    #[test]
    fn empty_containers() {
        let blob = run(json!({}), None);
        assert!(matches!(&blob, Node::Blob(b) if b.is_empty()));
        let list = run(json!([]), None);
        assert!(matches!(&list, Node::List(l) if l.is_empty()));
    }

    #[test]
    fn untagged_object_is_a_blob() {
        let node = run(json!({"foo": "bar"}), None);
        assert!(matches!(node, Node::Blob(_)));
        assert_eq!(node.get("foo"), Some(&Node::from("bar")));
    }

    #[test]
    fn tagged_object_uses_inner_data() {
        let node = run(json!({"kind": "t1", "data": {"foo": "bar"}}), None);
        let thing = node.as_thing().unwrap();
        assert!(matches!(thing, Thing::Comment(_)));
        assert_eq!(thing.data().blob().get_str("foo"), Some("bar"));
        assert!(!thing.data().blob().contains_key("kind"));
        assert!(!thing.data().blob().contains_key("data"));
        assert_eq!(thing.data().tag(), "t1");
    }

    #[test]
    fn unknown_kind_keeps_top_level_keys() {
        let node = run(json!({"kind": "bogus", "data": {"x": 1}}), None);
        let blob = match &node {
            Node::Blob(blob) => blob,
            other => panic!("expected blob, got {other:?}"),
        };
        assert_eq!(blob.get_str("kind"), Some("bogus"));
        assert_eq!(blob.get("data").and_then(|d| d.get("x")), Some(&Node::from(1)));
    }

    #[test]
    fn malformed_wrappers_degrade_to_blob() {
        assert!(matches!(run(json!({"kind": "t3"}), None), Node::Blob(_)));
        assert!(matches!(run(json!({"kind": "t3", "data": [1]}), None), Node::Blob(_)));
        assert!(matches!(run(json!({"kind": 3, "data": {}}), None), Node::Blob(_)));
    }

    #[test]
    fn arrays_keep_length_and_order() {
        let node = run(json!([{"kind": "t1", "data": {"foo": "bar"}}, {"baz": "bam"}, 3]), None);
        let list = node.as_list().unwrap();
        assert_eq!(list.len(), 3);
        assert!(matches!(list[0], Node::Thing(Thing::Comment(_))));
        assert!(matches!(list[1], Node::Blob(_)));
        assert_eq!(list[2], Node::from(3));
        assert_eq!(list[1].get("baz"), Some(&Node::from("bam")));
    }

    #[test]
    fn builds_listings() {
        let node = run(
            json!({
                "kind": "Listing",
                "data": {
                    "modhash": "mh",
                    "children": [{"kind": "t3", "data": {"id": "a"}}],
                    "after": "t3_a",
                    "before": null,
                    "dist": 1
                }
            }),
            Some("/r/test/.json"),
        );
        let listing = node.as_listing().unwrap();
        assert_eq!(listing.len(), 1);
        assert_eq!(listing.after(), Some("t3_a"));
        assert_eq!(listing.before(), None);
        assert_eq!(listing.modhash(), Some("mh"));
        assert_eq!(listing.attributes().get_i64("dist"), Some(1));
        assert!(!listing.attributes().contains_key("children"));
        assert_eq!(listing.path(), Some("/r/test/.json"));
    }

    #[test]
    fn builds_userlists() {
        let node = run(
            json!({"kind": "UserList", "data": {"children": [{"name": "alice", "id": "t2_1"}]}}),
            None,
        );
        let list = match &node {
            Node::Userlist(list) => list,
            other => panic!("expected userlist, got {other:?}"),
        };
        assert_eq!(list.len(), 1);
        assert_eq!(list[0].get("name"), Some(&Node::from("alice")));
    }

    #[test]
    fn path_reaches_every_node() {
        let path = "/some/path";
        let node = run(
            json!([
                {"foo": "bar"},
                [{"kind": "t2", "data": {"hello": "world", "last": [{"one": 1}]}}]
            ]),
            Some(path),
        );

        let outer = node.as_list().unwrap();
        let inner = outer[1].as_list().unwrap();
        let account = inner[0].as_thing().unwrap();
        assert!(matches!(account, Thing::Account(_)));
        let last = account.data().blob().get("last").unwrap();
        let last_item = &last.as_list().unwrap()[0];

        assert_eq!(outer[0].get("foo"), Some(&Node::from("bar")));
        assert_eq!(account.data().blob().get_str("hello"), Some("world"));
        assert_eq!(last_item.get("one"), Some(&Node::from(1)));

        for n in [&node, &outer[0], &outer[1], &inner[0], last, last_item] {
            assert_eq!(n.path(), Some(path));
        }
    }

    #[test]
    fn serializes_back_to_envelopes() {
        let value = json!({"kind": "t3", "data": {"id": "a", "title": "hi"}});
        assert_eq!(run(value.clone(), None).to_json(), value);
    }
}
