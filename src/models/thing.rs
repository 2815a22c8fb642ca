use crate::{
    error::Error,
    models::{Account, Blob, Comment, Kind, Link, Message, More, Subreddit},
    result::Result,
    Client,
};

/// What every typed thing has: a kind tag and an attribute bag.
pub trait ThingData: Send + Sync {
    /// The `kind` tag the thing was materialized from, e.g. `t3`.
    fn tag(&self) -> &str;

    /// The thing's attributes.
    fn blob(&self) -> &Blob;

    /// The client that fetched this thing.
    fn client(&self) -> &Client {
        self.blob().client()
    }

    /// Path of the request this thing came from.
    fn path(&self) -> Option<&str> {
        self.blob().path()
    }

    /// The thing's short id, e.g. `c0ffee`.
    fn id(&self) -> Option<&str> {
        self.blob().get_str("id")
    }

    /// The type part of the tag: `t3` for both `t3` and `t3_c0ffee`.
    fn type_prefix(&self) -> &str {
        let tag = self.tag();
        tag.split_once('_').map_or(tag, |(prefix, _)| prefix)
    }

    /// The fully-qualified name, e.g. `t3_c0ffee`.
    ///
    /// Uses the `name` attribute when the API sent one, and
    /// `<type prefix>_<id>` otherwise.
    fn name(&self) -> Option<String> {
        if let Some(name) = self.blob().get_str("name") {
            return Some(name.to_string());
        }
        self.id().map(|id| format!("{}_{}", self.type_prefix(), id))
    }

    /// [`name`](ThingData::name), or an error when it cannot be derived.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingAttribute`] when neither `name` nor `id` is
    /// present.
    fn require_name(&self) -> Result<String> {
        self.name().ok_or(Error::MissingAttribute("name"))
    }
}

/// A typed, identity-bearing object.
#[derive(Debug, Clone, PartialEq)]
pub enum Thing {
    /// A comment.
    Comment(Comment),
    /// A link or self post.
    Link(Link),
    /// A private message.
    Message(Message),
    /// A user account.
    Account(Account),
    /// A subreddit.
    Subreddit(Subreddit),
    /// A continuation marker in a comment tree.
    More(More),
}

macro_rules! thing_accessors {
    ($($variant:ident => $as_fn:ident, $into_fn:ident;)*) => {
        $(
            #[doc = concat!("The `", stringify!($variant), "`, if this is one.")]
            pub fn $as_fn(&self) -> Option<&$variant> {
                match self {
                    Thing::$variant(inner) => Some(inner),
                    _ => None,
                }
            }

            #[doc = concat!("Converts into a `", stringify!($variant), "`.")]
            ///
            /// # Errors
            ///
            /// Returns [`Error::UnexpectedResponse`] for any other variant.
            pub fn $into_fn(self) -> Result<$variant> {
                match self {
                    Thing::$variant(inner) => Ok(inner),
                    other => Err(Error::UnexpectedResponse(
                        crate::models::Node::Thing(other).to_json(),
                    )),
                }
            }
        )*
    };
}

impl Thing {
    /// The shared view of whichever variant this is.
    pub fn data(&self) -> &dyn ThingData {
        match self {
            Thing::Comment(inner) => inner,
            Thing::Link(inner) => inner,
            Thing::Message(inner) => inner,
            Thing::Account(inner) => inner,
            Thing::Subreddit(inner) => inner,
            Thing::More(inner) => inner,
        }
    }

    /// The kind this thing was resolved to.
    pub fn kind(&self) -> Kind {
        match self {
            Thing::Comment(_) => Kind::Comment,
            Thing::Link(_) => Kind::Link,
            Thing::Message(_) => Kind::Message,
            Thing::Account(_) => Kind::Account,
            Thing::Subreddit(_) => Kind::Subreddit,
            Thing::More(_) => Kind::More,
        }
    }

    /// See [`ThingData::id`].
    pub fn id(&self) -> Option<&str> {
        self.data().id()
    }

    /// See [`ThingData::name`].
    pub fn name(&self) -> Option<String> {
        self.data().name()
    }

    thing_accessors! {
        Comment => as_comment, into_comment;
        Link => as_link, into_link;
        Message => as_message, into_message;
        Account => as_account, into_account;
        Subreddit => as_subreddit, into_subreddit;
        More => as_more, into_more;
    }
}

#[cfg(feature = "display")]
const MAX_REPRSTR: usize = 24;

/// `<Kind [short form]>`, with the short form cut to a few words.
#[cfg(feature = "display")]
impl std::fmt::Display for Thing {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let (label, text) = match self {
            Thing::Comment(inner) => ("Comment", inner.to_string()),
            Thing::Link(inner) => ("Link", inner.to_string()),
            Thing::Message(inner) => ("Message", inner.to_string()),
            Thing::Account(inner) => ("Account", inner.to_string()),
            Thing::Subreddit(inner) => ("Subreddit", inner.to_string()),
            Thing::More(inner) => ("More", inner.name().unwrap_or_default()),
        };
        write!(f, "<{} [{}]>", label, crate::util::limstr(&text, MAX_REPRSTR))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{models::Node, testing::offline_client};

    fn tagged_link(tag: &str, attrs: &[(&str, &str)]) -> Link {
        let mut blob = Blob::new(offline_client(), None);
        for (key, value) in attrs {
            blob.set(*key, Node::from(*value));
        }
        Link::from_parts(tag, blob)
    }

    fn link(attrs: &[(&str, &str)]) -> Link {
        tagged_link("t3", attrs)
    }

    #[test]
    fn name_prefers_the_attribute() {
        let thing = link(&[("id", "abc"), ("name", "t3_xyz")]);
        assert_eq!(thing.name().as_deref(), Some("t3_xyz"));
    }

    #[test]
    fn name_falls_back_to_tag_and_id() {
        let thing = link(&[("id", "abc")]);
        assert_eq!(thing.name().as_deref(), Some("t3_abc"));
    }

    #[test]
    fn name_fallback_uses_only_the_type_prefix() {
        let thing = tagged_link("t3_xyz", &[("id", "abc")]);
        assert_eq!(thing.type_prefix(), "t3");
        assert_eq!(thing.name().as_deref(), Some("t3_abc"));
    }

    #[test]
    fn name_is_required_for_actions() {
        let thing = link(&[]);
        assert!(matches!(
            thing.require_name(),
            Err(Error::MissingAttribute("name"))
        ));
    }

    #[test]
    fn converts_between_variants() {
        let thing = Thing::Link(link(&[("id", "abc")]));
        assert_eq!(thing.kind(), Kind::Link);
        assert!(thing.as_link().is_some());
        assert!(thing.as_comment().is_none());
        assert!(thing.clone().into_link().is_ok());
        assert!(matches!(
            thing.into_comment(),
            Err(Error::UnexpectedResponse(_))
        ));
    }

    #[cfg(feature = "display")]
    #[test]
    fn displays_a_short_form() {
        let thing = Thing::Link(link(&[("title", "a title far too long to show in full")]));
        assert_eq!(thing.to_string(), "<Link [(None) a title far to...]>");
    }
}
