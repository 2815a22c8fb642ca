use async_trait::async_trait;

use crate::{
    models::{
        macros::thing_variant, Commentable, Created, Hideable, Listing, Reportable, ThingData,
        Votable,
    },
    result::Result,
};

thing_variant! {
    /// A submission: either a link to an external URL or a self (text) post.
    Link
}

impl Link {
    /// Title of the submission.
    pub fn title(&self) -> Option<&str> {
        self.get_str("title")
    }

    /// Submitter's username.
    pub fn author(&self) -> Option<&str> {
        self.get_str("author")
    }

    /// Target URL (for self posts, the post itself).
    pub fn url(&self) -> Option<&str> {
        self.get_str("url")
    }

    /// Site-relative permalink of the comment page.
    pub fn permalink(&self) -> Option<&str> {
        self.get_str("permalink")
    }

    /// Name of the subreddit the link was submitted to.
    pub fn subreddit(&self) -> Option<&str> {
        self.get_str("subreddit")
    }

    /// Text of a self post.
    pub fn selftext(&self) -> Option<&str> {
        self.get_str("selftext")
    }

    /// Net score.
    pub fn score(&self) -> Option<i64> {
        self.get_i64("score")
    }

    /// Number of comments.
    pub fn num_comments(&self) -> Option<i64> {
        self.get_i64("num_comments")
    }

    /// Whether this is a self post.
    pub fn is_self(&self) -> Option<bool> {
        self.get_bool("is_self")
    }

    /// Whether the link is marked NSFW.
    pub fn over_18(&self) -> Option<bool> {
        self.get_bool("over_18")
    }

    /// Saves the link.
    ///
    /// # Errors
    ///
    /// Fails if not logged in or the action is rejected.
    pub async fn save(&self) -> Result<()> {
        self.client().save(&self.require_name()?).await
    }

    /// Unsaves the link.
    ///
    /// # Errors
    ///
    /// Fails if not logged in or the action is rejected.
    pub async fn unsave(&self) -> Result<()> {
        self.client().unsave(&self.require_name()?).await
    }

    /// Marks the link NSFW.
    ///
    /// # Errors
    ///
    /// Fails if not logged in or the action is rejected.
    pub async fn marknsfw(&self) -> Result<()> {
        self.client().marknsfw(&self.require_name()?).await
    }

    /// Removes the NSFW mark.
    ///
    /// # Errors
    ///
    /// Fails if not logged in or the action is rejected.
    pub async fn unmarknsfw(&self) -> Result<()> {
        self.client().unmarknsfw(&self.require_name()?).await
    }

    /// Approves the link (moderators only).
    ///
    /// # Errors
    ///
    /// Fails if not logged in or the action is rejected.
    pub async fn approve(&self) -> Result<()> {
        self.client().approve(&self.require_name()?).await
    }

    /// Fetches this link again, returning the current representation.
    ///
    /// # Errors
    ///
    /// Fails if the request fails or no link comes back.
    pub async fn refresh(&self) -> Result<Link> {
        self.client().by_id(&self.require_name()?).await
    }
}

impl Created for Link {}
impl Votable for Link {}
impl Hideable for Link {}
impl Reportable for Link {}

#[async_trait]
impl Commentable for Link {
    async fn comments(&self, limit: Option<u32>) -> Result<Listing> {
        let permalink = self
            .permalink()
            .ok_or(crate::error::Error::MissingAttribute("permalink"))?;
        self.client().fetch_listing(permalink, &[], limit).await
    }
}

#[cfg(feature = "display")]
impl std::fmt::Display for Link {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let score = self.score().map_or_else(|| "None".to_string(), |s| s.to_string());
        write!(f, "({}) {}", score, self.title().unwrap_or_default())
    }
}
