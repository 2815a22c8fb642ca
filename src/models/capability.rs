//! Actions shared by several kinds of thing.
//!
//! Each capability method is a thin call into the owning [`Client`],
//! supplying the thing's fully-qualified name.
//!
//! [`Client`]: crate::Client

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};

use crate::{
    models::{Comment, Listing, Thing, ThingData},
    result::Result,
};

/// Direction of a vote.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoteDirection {
    /// `1`
    Up,
    /// `0`, clears an earlier vote.
    Clear,
    /// `-1`
    Down,
}

impl VoteDirection {
    /// The form value the API expects.
    pub fn as_str(self) -> &'static str {
        match self {
            VoteDirection::Up => "1",
            VoteDirection::Clear => "0",
            VoteDirection::Down => "-1",
        }
    }
}

/// How a moderator's post is marked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Distinguish {
    /// Distinguish as moderator.
    Yes,
    /// Remove the distinction.
    No,
    /// Distinguish as admin.
    Admin,
}

impl Distinguish {
    /// Path segment the API expects.
    pub fn as_str(self) -> &'static str {
        match self {
            Distinguish::Yes => "yes",
            Distinguish::No => "no",
            Distinguish::Admin => "admin",
        }
    }
}

/// Things carrying creation timestamps.
pub trait Created: ThingData {
    /// Creation time, as the server's local epoch.
    fn created(&self) -> Option<DateTime<Utc>> {
        self.blob().get_f64("created").and_then(epoch)
    }

    /// Creation time, UTC.
    fn created_utc(&self) -> Option<DateTime<Utc>> {
        self.blob().get_f64("created_utc").and_then(epoch)
    }
}

#[allow(clippy::cast_possible_truncation)]
fn epoch(seconds: f64) -> Option<DateTime<Utc>> {
    Utc.timestamp_opt(seconds.trunc() as i64, 0).single()
}

/// Things that can be voted on.
#[async_trait]
pub trait Votable: ThingData {
    /// Upvote count.
    fn ups(&self) -> Option<i64> {
        self.blob().get_i64("ups")
    }

    /// Downvote count.
    fn downs(&self) -> Option<i64> {
        self.blob().get_i64("downs")
    }

    /// The viewer's vote: `Some(true)` up, `Some(false)` down, `None` neither.
    fn likes(&self) -> Option<bool> {
        self.blob().get_bool("likes")
    }

    /// Casts a vote.
    ///
    /// # Errors
    ///
    /// Fails if not logged in or the action is rejected.
    async fn vote(&self, direction: VoteDirection) -> Result<()> {
        let name = self.require_name()?;
        self.client().vote(&name, direction).await
    }

    /// Votes up.
    ///
    /// # Errors
    ///
    /// Fails if not logged in or the action is rejected.
    async fn upvote(&self) -> Result<()> {
        self.vote(VoteDirection::Up).await
    }

    /// Votes down.
    ///
    /// # Errors
    ///
    /// Fails if not logged in or the action is rejected.
    async fn downvote(&self) -> Result<()> {
        self.vote(VoteDirection::Down).await
    }

    /// Clears the vote.
    ///
    /// # Errors
    ///
    /// Fails if not logged in or the action is rejected.
    async fn unvote(&self) -> Result<()> {
        self.vote(VoteDirection::Clear).await
    }
}

/// Things that can be replied to and moderated as posts.
#[async_trait]
pub trait Commentable: ThingData {
    /// The comment tree below this thing.
    ///
    /// # Errors
    ///
    /// Fails if the request fails or no comment listing comes back.
    async fn comments(&self, limit: Option<u32>) -> Result<Listing>;

    /// Posts a reply.
    ///
    /// # Errors
    ///
    /// Fails if not logged in, the action is rejected, or no comment is
    /// echoed back.
    async fn comment(&self, text: &str) -> Result<Comment> {
        let name = self.require_name()?;
        self.client().comment(&name, text).await
    }

    /// Replaces the body text, returning the updated thing.
    ///
    /// # Errors
    ///
    /// Fails if not logged in, the action is rejected, or nothing is
    /// echoed back.
    async fn edit(&self, text: &str) -> Result<Thing> {
        let name = self.require_name()?;
        self.client().edit(&name, text).await
    }

    /// Marks (or unmarks) this as a moderator's post.
    ///
    /// # Errors
    ///
    /// Fails if not logged in, the action is rejected, or nothing is
    /// echoed back.
    async fn distinguish(&self, how: Distinguish) -> Result<Thing> {
        let name = self.require_name()?;
        self.client().distinguish(&name, how).await
    }

    /// Deletes this (must be the author).
    ///
    /// # Errors
    ///
    /// Fails if not logged in or the action is rejected.
    async fn delete(&self) -> Result<()> {
        let name = self.require_name()?;
        self.client().delete(&name).await
    }

    /// Removes this (must be a moderator).
    ///
    /// # Errors
    ///
    /// Fails if not logged in or the action is rejected.
    async fn remove(&self) -> Result<()> {
        let name = self.require_name()?;
        self.client().remove(&name).await
    }
}

/// Things that can be hidden from listings.
#[async_trait]
pub trait Hideable: ThingData {
    /// Hides this.
    ///
    /// # Errors
    ///
    /// Fails if not logged in or the action is rejected.
    async fn hide(&self) -> Result<()> {
        let name = self.require_name()?;
        self.client().hide(&name).await
    }

    /// Unhides this.
    ///
    /// # Errors
    ///
    /// Fails if not logged in or the action is rejected.
    async fn unhide(&self) -> Result<()> {
        let name = self.require_name()?;
        self.client().unhide(&name).await
    }
}

/// Things that can be reported.
#[async_trait]
pub trait Reportable: ThingData {
    /// Reports this to the moderators.
    ///
    /// # Errors
    ///
    /// Fails if not logged in or the action is rejected.
    async fn report(&self) -> Result<()> {
        let name = self.require_name()?;
        self.client().report(&name).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        models::{Blob, Link, Node},
        testing::offline_client,
    };

    #[test]
    fn reads_vote_counts_and_timestamps() {
        let mut blob = Blob::new(offline_client(), None);
        blob.set("ups", Node::from(10));
        blob.set("downs", Node::from(3));
        blob.set("likes", Node::Null);
        blob.set("created_utc", Node::Number(serde_json::Number::from_f64(1_300_000_000.0).unwrap()));
        let link = Link::from_parts("t3", blob);

        assert_eq!(link.ups(), Some(10));
        assert_eq!(link.downs(), Some(3));
        assert_eq!(link.likes(), None);
        assert_eq!(link.created_utc().map(|t| t.timestamp()), Some(1_300_000_000));
        assert_eq!(link.created(), None);
    }

    #[test]
    fn directions_match_wire_values() {
        assert_eq!(VoteDirection::Up.as_str(), "1");
        assert_eq!(VoteDirection::Clear.as_str(), "0");
        assert_eq!(VoteDirection::Down.as_str(), "-1");
        assert_eq!(Distinguish::Admin.as_str(), "admin");
    }
}
