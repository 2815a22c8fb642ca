use std::fmt;

use indexmap::IndexMap;

use crate::{models::Node, Client};

/// An untyped bag of attributes.
///
/// Produced for JSON objects that carry no recognized `kind`, and used as
/// the attribute storage of every typed thing. Attribute order follows the
/// response.
#[derive(Clone)]
pub struct Blob {
    attrs: IndexMap<String, Node>,
    client: Client,
    path: Option<String>,
}

impl Blob {
    pub(crate) fn new(client: Client, path: Option<&str>) -> Self {
        Blob {
            attrs: IndexMap::new(),
            client,
            path: path.map(ToString::to_string),
        }
    }

    /// The client that fetched this data.
    pub fn client(&self) -> &Client {
        &self.client
    }

    /// Path of the request this data came from, if it came from one.
    pub fn path(&self) -> Option<&str> {
        self.path.as_deref()
    }

    /// Returns the attribute named `key`.
    pub fn get(&self, key: &str) -> Option<&Node> {
        self.attrs.get(key)
    }

    /// Returns `key` if it holds a string.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Node::as_str)
    }

    /// Returns `key` if it holds an integer.
    pub fn get_i64(&self, key: &str) -> Option<i64> {
        self.get(key).and_then(Node::as_i64)
    }

    /// Returns `key` if it holds a number.
    pub fn get_f64(&self, key: &str) -> Option<f64> {
        self.get(key).and_then(Node::as_f64)
    }

    /// Returns `key` if it holds a boolean.
    pub fn get_bool(&self, key: &str) -> Option<bool> {
        self.get(key).and_then(Node::as_bool)
    }

    /// Sets `key`, returning the value it replaces.
    pub fn set(&mut self, key: impl Into<String>, value: Node) -> Option<Node> {
        self.attrs.insert(key.into(), value)
    }

    /// Removes `key`, returning its value.
    pub fn remove(&mut self, key: &str) -> Option<Node> {
        self.attrs.shift_remove(key)
    }

    /// Whether `key` is present.
    pub fn contains_key(&self, key: &str) -> bool {
        self.attrs.contains_key(key)
    }

    /// Attribute names, in response order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.attrs.keys().map(String::as_str)
    }

    /// Attributes, in response order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Node)> {
        self.attrs.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of attributes.
    pub fn len(&self) -> usize {
        self.attrs.len()
    }

    /// Whether the bag has no attributes.
    pub fn is_empty(&self) -> bool {
        self.attrs.is_empty()
    }
}

impl PartialEq for Blob {
    fn eq(&self, other: &Self) -> bool {
        self.attrs == other.attrs && self.path == other.path
    }
}

impl fmt::Debug for Blob {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Blob")
            .field("attrs", &self.attrs)
            .field("path", &self.path)
            .finish()
    }
}

/// An ordered sequence of materialized values.
///
/// Dereferences to `Vec<Node>`, so indexing, `len`, `contains`, `push`,
/// `remove` and iteration all work as on a vector.
#[derive(Clone)]
pub struct ListBlob {
    items: Vec<Node>,
    client: Client,
    path: Option<String>,
}

impl ListBlob {
    pub(crate) fn new(client: Client, path: Option<&str>, items: Vec<Node>) -> Self {
        ListBlob {
            items,
            client,
            path: path.map(ToString::to_string),
        }
    }

    /// The client that fetched this data.
    pub fn client(&self) -> &Client {
        &self.client
    }

    /// Path of the request this data came from, if it came from one.
    pub fn path(&self) -> Option<&str> {
        self.path.as_deref()
    }

    /// Consumes the list, returning its items.
    pub fn into_items(self) -> Vec<Node> {
        self.items
    }
}

impl std::ops::Deref for ListBlob {
    type Target = Vec<Node>;

    fn deref(&self) -> &Self::Target {
        &self.items
    }
}

impl std::ops::DerefMut for ListBlob {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.items
    }
}

impl<'a> IntoIterator for &'a ListBlob {
    type Item = &'a Node;
    type IntoIter = std::slice::Iter<'a, Node>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl IntoIterator for ListBlob {
    type Item = Node;
    type IntoIter = std::vec::IntoIter<Node>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl PartialEq for ListBlob {
    fn eq(&self, other: &Self) -> bool {
        self.items == other.items && self.path == other.path
    }
}

impl fmt::Debug for ListBlob {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListBlob")
            .field("items", &self.items)
            .field("path", &self.path)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::offline_client;

    #[test]
    fn blob_keeps_attribute_order() {
        let mut blob = Blob::new(offline_client(), Some("/r/test"));
        blob.set("b", Node::Bool(true));
        blob.set("a", Node::String("x".into()));
        assert_eq!(blob.keys().collect::<Vec<_>>(), vec!["b", "a"]);
        assert_eq!(blob.get_str("a"), Some("x"));
        assert_eq!(blob.get_bool("b"), Some(true));
        assert_eq!(blob.remove("b"), Some(Node::Bool(true)));
        assert_eq!(blob.len(), 1);
        assert_eq!(blob.path(), Some("/r/test"));
    }

    #[test]
    fn list_blob_behaves_like_a_vec() {
        let items = vec![Node::from(1), Node::from(2), Node::from(3)];
        let mut list = ListBlob::new(offline_client(), None, items);
        list[1] = Node::from(10);
        assert_eq!(list[1], Node::from(10));
        list.remove(1);
        assert_eq!(list.len(), 2);
        assert!(list.contains(&Node::from(3)));
        list.push(Node::from(3));
        assert_eq!(list.iter().filter(|n| **n == Node::from(3)).count(), 2);
        assert_eq!(list.pop(), Some(Node::from(3)));
        list.reverse();
        assert_eq!(*list, vec![Node::from(3), Node::from(1)]);
        let collected: Vec<i64> = (&list).into_iter().filter_map(Node::as_i64).collect();
        assert_eq!(collected, vec![3, 1]);
    }
}
