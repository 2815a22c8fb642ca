use std::collections::HashMap;

use lazy_static::lazy_static;
use regex::Regex;

use crate::models::{
    Account, Blob, Comment, Link, ListBlob, Listing, Message, More, Node, Subreddit, Thing,
};

lazy_static! {
    static ref KIND_PATTERN: Regex =
        Regex::new(r"^t(?P<type>[0-9]+)(?:_(?P<id>[A-Za-z0-9]+))?$").unwrap();

    /// Numeric type codes. The API reuses codes for aliased types
    /// (promoted links, message subtypes).
    static ref TYPES: HashMap<&'static str, Kind> = HashMap::from([
        ("1", Kind::Comment),
        ("2", Kind::Account),
        ("3", Kind::Link),
        ("4", Kind::Message),
        ("5", Kind::Subreddit),
        ("6", Kind::Link),
        ("7", Kind::Message),
    ]);

    static ref KEYWORDS: HashMap<&'static str, Kind> = HashMap::from([
        ("listing", Kind::Listing),
        ("userlist", Kind::Userlist),
        ("more", Kind::More),
    ]);
}

/// The concrete node type a `kind` tag resolves to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    /// `t1`
    Comment,
    /// `t2`
    Account,
    /// `t3`, `t6`
    Link,
    /// `t4`, `t7`
    Message,
    /// `t5`
    Subreddit,
    /// `more`
    More,
    /// `Listing`
    Listing,
    /// `UserList`
    Userlist,
    /// Anything else: a plain attribute bag.
    Blob,
}

impl Kind {
    /// Resolves a tag such as `t3`, `t1_c0ffee` or `Listing`.
    ///
    /// Unknown or malformed tags resolve to [`Kind::Blob`].
    pub fn resolve(tag: &str) -> Kind {
        let kind = match KIND_PATTERN.captures(tag) {
            Some(caps) => TYPES.get(&caps["type"]),
            None => KEYWORDS.get(tag.to_ascii_lowercase().as_str()),
        };
        kind.copied().unwrap_or(Kind::Blob)
    }

    /// Whether nodes of this kind are [`Thing`]s.
    pub fn is_thing(self) -> bool {
        matches!(
            self,
            Kind::Comment
                | Kind::Account
                | Kind::Link
                | Kind::Message
                | Kind::Subreddit
                | Kind::More
        )
    }

    /// Builds the node for this kind out of its populated attribute bag.
    pub(crate) fn construct(self, tag: &str, blob: Blob) -> Node {
        match self {
            Kind::Comment => Node::Thing(Thing::Comment(Comment::from_parts(tag, blob))),
            Kind::Account => Node::Thing(Thing::Account(Account::from_parts(tag, blob))),
            Kind::Link => Node::Thing(Thing::Link(Link::from_parts(tag, blob))),
            Kind::Message => Node::Thing(Thing::Message(Message::from_parts(tag, blob))),
            Kind::Subreddit => Node::Thing(Thing::Subreddit(Subreddit::from_parts(tag, blob))),
            Kind::More => Node::Thing(Thing::More(More::from_parts(tag, blob))),
            Kind::Listing => Node::Listing(Listing::from_blob(blob)),
            Kind::Userlist => Node::Userlist(userlist_from_blob(blob)),
            Kind::Blob => Node::Blob(blob),
        }
    }
}

fn userlist_from_blob(mut blob: Blob) -> ListBlob {
    let items = match blob.remove("children") {
        Some(Node::List(list)) => list.into_items(),
        _ => Vec::new(),
    };
    ListBlob::new(blob.client().clone(), blob.path(), items)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_numeric_tags() {
        assert_eq!(Kind::resolve("t1"), Kind::Comment);
        assert_eq!(Kind::resolve("t2_asdf"), Kind::Account);
        assert_eq!(Kind::resolve("t3_a342kj"), Kind::Link);
        assert_eq!(Kind::resolve("t4"), Kind::Message);
        assert_eq!(Kind::resolve("t5"), Kind::Subreddit);
        assert_eq!(Kind::resolve("t6_adskfj"), Kind::Link);
        assert_eq!(Kind::resolve("t7_1"), Kind::Message);
    }

    #[test]
    fn resolves_keywords_case_insensitively() {
        assert_eq!(Kind::resolve("listing"), Kind::Listing);
        assert_eq!(Kind::resolve("Listing"), Kind::Listing);
        assert_eq!(Kind::resolve("UserList"), Kind::Userlist);
        assert_eq!(Kind::resolve("moRe"), Kind::More);
    }

    #[test]
    fn unknown_tags_fall_back_to_blob() {
        assert_eq!(Kind::resolve(""), Kind::Blob);
        assert_eq!(Kind::resolve("notatype"), Kind::Blob);
        assert_eq!(Kind::resolve("t9"), Kind::Blob);
        assert_eq!(Kind::resolve("t12_abc"), Kind::Blob);
        assert_eq!(Kind::resolve("t1_"), Kind::Blob);
        assert_eq!(Kind::resolve("1"), Kind::Blob);
        assert_eq!(Kind::resolve("T1"), Kind::Blob);
    }

    #[test]
    fn only_typed_kinds_are_things() {
        assert!(Kind::Link.is_thing());
        assert!(Kind::More.is_thing());
        assert!(!Kind::Listing.is_thing());
        assert!(!Kind::Blob.is_thing());
    }
}
