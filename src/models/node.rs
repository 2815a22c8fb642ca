use serde::{
    ser::{SerializeMap, SerializeSeq},
    Serialize, Serializer,
};
use serde_json::{Number, Value};

use crate::{
    error::Error,
    models::{Blob, ListBlob, Listing, Thing, ThingData},
    result::Result,
};

/// A materialized JSON value.
///
/// Scalars stay scalars; objects and arrays become the domain containers
/// chosen by their `kind`.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// JSON `null`.
    Null,
    /// JSON boolean.
    Bool(bool),
    /// JSON number.
    Number(Number),
    /// JSON string, with numeric entities decoded.
    String(String),
    /// Object without a recognized `kind`.
    Blob(Blob),
    /// JSON array.
    List(ListBlob),
    /// Typed, identity-bearing object.
    Thing(Thing),
    /// Paginated collection.
    Listing(Listing),
    /// List of users, as returned for moderators and contributors.
    Userlist(ListBlob),
}

impl Node {
    /// Whether this is JSON `null`.
    pub fn is_null(&self) -> bool {
        matches!(self, Node::Null)
    }

    /// The boolean, if this is one.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Node::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// The number as `i64`, if it fits.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Node::Number(n) => n.as_i64(),
            _ => None,
        }
    }

    /// The number as `f64`.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Node::Number(n) => n.as_f64(),
            _ => None,
        }
    }

    /// The string, if this is one.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Node::String(s) => Some(s),
            _ => None,
        }
    }

    /// The attribute bag of a blob, thing or listing.
    pub fn attributes(&self) -> Option<&Blob> {
        match self {
            Node::Blob(blob) => Some(blob),
            Node::Thing(thing) => Some(thing.data().blob()),
            Node::Listing(listing) => Some(listing.attributes()),
            _ => None,
        }
    }

    /// Looks up an attribute on a blob, thing or listing.
    pub fn get(&self, key: &str) -> Option<&Node> {
        self.attributes().and_then(|blob| blob.get(key))
    }

    /// The items of a list, userlist or listing.
    pub fn as_list(&self) -> Option<&ListBlob> {
        match self {
            Node::List(list) | Node::Userlist(list) => Some(list),
            Node::Listing(listing) => Some(listing.children()),
            _ => None,
        }
    }

    /// The thing, if this is one.
    pub fn as_thing(&self) -> Option<&Thing> {
        match self {
            Node::Thing(thing) => Some(thing),
            _ => None,
        }
    }

    /// The listing, if this is one.
    pub fn as_listing(&self) -> Option<&Listing> {
        match self {
            Node::Listing(listing) => Some(listing),
            _ => None,
        }
    }

    /// Path of the request this node came from. Scalars carry none.
    pub fn path(&self) -> Option<&str> {
        match self {
            Node::Blob(blob) => blob.path(),
            Node::List(list) | Node::Userlist(list) => list.path(),
            Node::Thing(thing) => thing.data().path(),
            Node::Listing(listing) => listing.path(),
            _ => None,
        }
    }

    /// Converts into a thing.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnexpectedResponse`] for any other node.
    pub fn into_thing(self) -> Result<Thing> {
        match self {
            Node::Thing(thing) => Ok(thing),
            other => Err(other.unexpected()),
        }
    }

    /// Converts into a listing.
    ///
    /// A comment page arrives as `[link listing, comment listing]`; for
    /// such lists the trailing listing is returned.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnexpectedResponse`] when no listing can be found.
    pub fn into_listing(self) -> Result<Listing> {
        match self {
            Node::Listing(listing) => Ok(listing),
            Node::List(list) => match list.into_items().pop() {
                Some(Node::Listing(listing)) => Ok(listing),
                Some(last) => Err(last.unexpected()),
                None => Err(Error::UnexpectedResponse(Value::Array(Vec::new()))),
            },
            other => Err(other.unexpected()),
        }
    }

    /// Serializes back into plain JSON.
    pub fn to_json(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }

    pub(crate) fn unexpected(&self) -> Error {
        Error::UnexpectedResponse(self.to_json())
    }
}

impl From<bool> for Node {
    fn from(b: bool) -> Self {
        Node::Bool(b)
    }
}

impl From<i32> for Node {
    fn from(n: i32) -> Self {
        Node::Number(n.into())
    }
}

impl From<i64> for Node {
    fn from(n: i64) -> Self {
        Node::Number(n.into())
    }
}

impl From<&str> for Node {
    fn from(s: &str) -> Self {
        Node::String(s.to_string())
    }
}

impl From<String> for Node {
    fn from(s: String) -> Self {
        Node::String(s)
    }
}

impl Serialize for Node {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Node::Null => serializer.serialize_unit(),
            Node::Bool(b) => serializer.serialize_bool(*b),
            Node::Number(n) => n.serialize(serializer),
            Node::String(s) => serializer.serialize_str(s),
            Node::Blob(blob) => blob.serialize(serializer),
            Node::List(list) => list.serialize(serializer),
            Node::Thing(thing) => Envelope {
                kind: thing.data().tag(),
                data: EnvelopeData::Blob(thing.data().blob()),
            }
            .serialize(serializer),
            Node::Listing(listing) => Envelope {
                kind: "Listing",
                data: EnvelopeData::Listing(listing),
            }
            .serialize(serializer),
            Node::Userlist(list) => Envelope {
                kind: "UserList",
                data: EnvelopeData::Userlist(list),
            }
            .serialize(serializer),
        }
    }
}

impl Serialize for Blob {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (key, value) in self.iter() {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

impl Serialize for ListBlob {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.len()))?;
        for item in self {
            seq.serialize_element(item)?;
        }
        seq.end()
    }
}

#[derive(Serialize)]
struct Envelope<'a> {
    kind: &'a str,
    data: EnvelopeData<'a>,
}

enum EnvelopeData<'a> {
    Blob(&'a Blob),
    Listing(&'a Listing),
    Userlist(&'a ListBlob),
}

impl Serialize for EnvelopeData<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            EnvelopeData::Blob(blob) => blob.serialize(serializer),
            EnvelopeData::Userlist(list) => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry("children", list)?;
                map.end()
            }
            EnvelopeData::Listing(listing) => {
                let attrs = listing.attributes();
                let mut map = serializer.serialize_map(Some(attrs.len() + 4))?;
                map.serialize_entry("modhash", &listing.modhash())?;
                map.serialize_entry("children", listing.children())?;
                map.serialize_entry("after", &listing.after())?;
                map.serialize_entry("before", &listing.before())?;
                for (key, value) in attrs.iter() {
                    map.serialize_entry(key, value)?;
                }
                map.end()
            }
        }
    }
}
