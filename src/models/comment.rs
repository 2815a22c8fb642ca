use async_trait::async_trait;

use crate::{
    error::Error,
    models::{
        macros::thing_variant, Commentable, Created, Listing, Reportable, ThingData, Votable,
    },
    result::Result,
    util::urljoin,
};

thing_variant! {
    /// A comment on a link, or a reply to another comment.
    Comment
}

impl Comment {
    /// Author's username.
    pub fn author(&self) -> Option<&str> {
        self.get_str("author")
    }

    /// Markdown body.
    pub fn body(&self) -> Option<&str> {
        self.get_str("body")
    }

    /// Fullname of the link this comment belongs to, e.g. `t3_abc`.
    pub fn link_id(&self) -> Option<&str> {
        self.get_str("link_id")
    }

    /// Fullname of the parent link or comment.
    pub fn parent_id(&self) -> Option<&str> {
        self.get_str("parent_id")
    }

    /// Name of the subreddit.
    pub fn subreddit(&self) -> Option<&str> {
        self.get_str("subreddit")
    }

    /// Nested replies, when the response included them.
    pub fn replies(&self) -> Option<&Listing> {
        self.get("replies").and_then(crate::models::Node::as_listing)
    }

    /// Site-relative permalink, e.g. `/r/rust/comments/abc/_/def`.
    pub fn relative_permalink(&self) -> Option<String> {
        let link_id = self.link_id()?;
        let link = link_id.split_once('_').map_or(link_id, |(_, id)| id);
        let id = self.id()?;
        let mut segments = Vec::with_capacity(6);
        if let Some(subreddit) = self.subreddit() {
            segments.extend(["r", subreddit]);
        }
        segments.extend(["comments", link, "_", id]);
        Some(format!("/{}", urljoin(segments.as_slice())))
    }

    /// Absolute permalink.
    pub fn permalink(&self) -> Option<String> {
        self.relative_permalink()
            .map(|path| urljoin(&[self.client().base_url(), path.as_str()]))
    }

    /// Alias for [`Commentable::comment`].
    ///
    /// # Errors
    ///
    /// Fails if not logged in, the action is rejected, or no comment is
    /// echoed back.
    pub async fn reply(&self, text: &str) -> Result<Comment> {
        self.comment(text).await
    }
}

impl Created for Comment {}
impl Votable for Comment {}
impl Reportable for Comment {}

#[async_trait]
impl Commentable for Comment {
    async fn comments(&self, limit: Option<u32>) -> Result<Listing> {
        let path = self
            .relative_permalink()
            .ok_or(Error::MissingAttribute("link_id"))?;
        self.client().fetch_listing(&path, &[], limit).await
    }
}

#[cfg(feature = "display")]
impl std::fmt::Display for Comment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let score = match (Votable::ups(self), Votable::downs(self)) {
            (Some(ups), Some(downs)) => (ups - downs).to_string(),
            _ => "None".to_string(),
        };
        write!(
            f,
            "({}) {}: {}",
            score,
            self.author().unwrap_or_default(),
            self.body().unwrap_or_default().replace('\n', " ")
        )
    }
}
