mod account;
mod blob;
mod capability;
mod comment;
mod kind;
mod link;
mod listing;
mod message;
mod more;
mod node;
mod subreddit;
mod thing;

pub use account::Account;
pub use blob::{Blob, ListBlob};
pub use capability::{Commentable, Created, Distinguish, Hideable, Reportable, VoteDirection, Votable};
pub use comment::Comment;
pub use kind::Kind;
pub use link::Link;
pub use listing::Listing;
pub use message::Message;
pub use more::More;
pub use node::Node;
pub use subreddit::Subreddit;
pub use thing::{Thing, ThingData};

pub(crate) mod macros {
    /// Declares a typed thing: a tag plus an attribute bag, dereferencing to
    /// the bag and implementing [`ThingData`].
    ///
    /// [`ThingData`]: crate::models::ThingData
    macro_rules! thing_variant {
        ($(#[$meta:meta])* $name:ident) => {
            $(#[$meta])*
            #[derive(Debug, Clone, PartialEq)]
            pub struct $name {
                tag: String,
                blob: $crate::models::Blob,
            }

            impl $name {
                pub(crate) fn from_parts(tag: impl Into<String>, blob: $crate::models::Blob) -> Self {
                    $name {
                        tag: tag.into(),
                        blob,
                    }
                }
            }

            impl $crate::models::ThingData for $name {
                fn tag(&self) -> &str {
                    &self.tag
                }

                fn blob(&self) -> &$crate::models::Blob {
                    &self.blob
                }
            }

            impl std::ops::Deref for $name {
                type Target = $crate::models::Blob;

                fn deref(&self) -> &Self::Target {
                    &self.blob
                }
            }
        };
    }

    pub(crate) use thing_variant;
}
