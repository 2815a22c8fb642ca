//! Write actions. All of them require a logged-in client and fail with
//! [`Error::NotLoggedIn`] before touching the network otherwise.

use reqwest::Url;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::{
    client::Envelope,
    error::Error,
    models::{Comment, Distinguish, Link, Node, Thing, VoteDirection},
    result::Result,
    Client,
};

/// Result of submitting a link or self post.
#[derive(Debug, Clone, PartialEq)]
pub enum Submission {
    /// The new submission, fetched after posting.
    Followed(Link),
    /// Path of the new submission's comment page.
    Permalink(String),
}

/// Settings for [`Client::create_subreddit`].
#[derive(Debug, Clone)]
pub struct SubredditSettings {
    /// URL name.
    pub name: String,
    /// Page title.
    pub title: String,
    /// Sidebar text.
    pub description: String,
    /// Language code.
    pub lang: String,
    /// `public`, `private` or `restricted`.
    pub kind: String,
    /// `any`, `link` or `self`.
    pub link_type: String,
    /// Mark the subreddit NSFW.
    pub over_18: bool,
    /// Allow links to reach the front page.
    pub allow_top: bool,
    /// Show media previews.
    pub show_media: bool,
    /// Domain to associate.
    pub domain: Option<String>,
}

impl SubredditSettings {
    /// Public, English, any link type, listed on the front page.
    pub fn new(name: &str, title: &str, description: &str) -> Self {
        SubredditSettings {
            name: name.to_string(),
            title: title.to_string(),
            description: description.to_string(),
            lang: "en".to_string(),
            kind: "public".to_string(),
            link_type: "any".to_string(),
            over_18: false,
            allow_top: true,
            show_media: false,
            domain: None,
        }
    }
}

#[derive(Debug, Deserialize)]
struct Echo {
    things: Vec<Value>,
}

#[derive(Debug, Deserialize)]
struct Submitted {
    url: String,
}

/// `{}` and `{"json": {"errors": []}}` both mean success.
fn assert_truthy(body: Value) -> Result<()> {
    if body == json!({}) || body == json!({"json": {"errors": []}}) {
        Ok(())
    } else {
        Err(Error::UnexpectedResponse(body))
    }
}

/// Data payload of an envelope, if the body is one.
fn envelope_data(body: &Value) -> Option<Value> {
    serde_json::from_value::<Envelope>(body.clone())
        .ok()
        .and_then(|envelope| envelope.json.data)
}

/// Path component of `url`, resolved against `base` when relative. Query
/// and fragment are dropped.
fn path_of(base: &str, url: &str) -> Option<String> {
    Url::parse(base)
        .and_then(|base| base.join(url))
        .ok()
        .map(|url| url.path().to_string())
}

impl Client {
    async fn simple_action(&self, endpoint: &str, data: &[(&str, &str)]) -> Result<()> {
        self.require_login().await?;
        let body = self.submit(endpoint, data).await?;
        assert_truthy(body)
    }

    /// Posts an action whose response echoes the affected thing back.
    pub(crate) async fn submit_echo(&self, endpoint: &str, data: &[(&str, &str)]) -> Result<Thing> {
        self.require_login().await?;
        let body = self.submit(endpoint, data).await?;
        let echoed = envelope_data(&body)
            .and_then(|data| serde_json::from_value::<Echo>(data).ok())
            .and_then(|echo| echo.things.into_iter().next());
        match echoed {
            Some(thing) => self.materialize(thing, None).into_thing(),
            None => Err(Error::UnexpectedResponse(body)),
        }
    }

    /// Votes on the thing named `id`.
    ///
    /// # Errors
    ///
    /// Fails if not logged in or the action is rejected.
    pub async fn vote(&self, id: &str, direction: VoteDirection) -> Result<()> {
        self.simple_action("api/vote", &[("id", id), ("dir", direction.as_str())])
            .await
    }

    /// Votes `id` up.
    ///
    /// # Errors
    ///
    /// Fails if not logged in or the action is rejected.
    pub async fn upvote(&self, id: &str) -> Result<()> {
        self.vote(id, VoteDirection::Up).await
    }

    /// Votes `id` down.
    ///
    /// # Errors
    ///
    /// Fails if not logged in or the action is rejected.
    pub async fn downvote(&self, id: &str) -> Result<()> {
        self.vote(id, VoteDirection::Down).await
    }

    /// Clears the vote on `id`.
    ///
    /// # Errors
    ///
    /// Fails if not logged in or the action is rejected.
    pub async fn unvote(&self, id: &str) -> Result<()> {
        self.vote(id, VoteDirection::Clear).await
    }

    /// Replies to the link or comment named `parent`.
    ///
    /// # Errors
    ///
    /// Fails if not logged in, the action is rejected, or no comment is
    /// echoed back.
    pub async fn comment(&self, parent: &str, text: &str) -> Result<Comment> {
        self.submit_echo("api/comment", &[("parent", parent), ("text", text)])
            .await?
            .into_comment()
    }

    /// Replaces the text of a self post or comment.
    ///
    /// # Errors
    ///
    /// Fails if not logged in, the action is rejected, or nothing is
    /// echoed back.
    pub async fn edit(&self, id: &str, text: &str) -> Result<Thing> {
        self.submit_echo("api/editusertext", &[("thing_id", id), ("text", text)])
            .await
    }

    /// Marks a post as a moderator's (or admin's) post, or clears the mark.
    ///
    /// # Errors
    ///
    /// Fails if not logged in, the action is rejected, or nothing is
    /// echoed back.
    pub async fn distinguish(&self, id: &str, how: Distinguish) -> Result<Thing> {
        let endpoint = format!("api/distinguish/{}", how.as_str());
        self.submit_echo(&endpoint, &[("id", id)]).await
    }

    async fn submit_post(
        &self,
        sr: &str,
        title: &str,
        kind: &str,
        content: (&str, &str),
        follow: bool,
    ) -> Result<Submission> {
        self.require_login().await?;
        let body = self
            .submit(
                "api/submit",
                &[("title", title), ("sr", sr), ("kind", kind), content],
            )
            .await?;
        let url = envelope_data(&body)
            .and_then(|data| serde_json::from_value::<Submitted>(data).ok())
            .map(|submitted| submitted.url)
            .ok_or_else(|| Error::UnexpectedResponse(body.clone()))?;
        let path = path_of(self.base_url(), &url).ok_or(Error::UnexpectedResponse(body))?;
        if !follow {
            return Ok(Submission::Permalink(path));
        }

        let page = self.get(&path, &[]).await?;
        let link = page
            .as_list()
            .and_then(|list| list.first())
            .and_then(Node::as_list)
            .and_then(|listing| listing.first())
            .and_then(Node::as_thing)
            .and_then(Thing::as_link)
            .cloned()
            .ok_or_else(|| page.unexpected())?;
        Ok(Submission::Followed(link))
    }

    /// Submits a link to `sr`.
    ///
    /// The API only answers with the new permalink; with `follow` set,
    /// that page is fetched to return the full [`Link`].
    ///
    /// # Errors
    ///
    /// Fails if not logged in, the submission is rejected, or the response
    /// has an unexpected shape.
    pub async fn submit_link(
        &self,
        sr: &str,
        title: &str,
        url: &str,
        follow: bool,
    ) -> Result<Submission> {
        self.submit_post(sr, title, "link", ("url", url), follow).await
    }

    /// Submits a self post to `sr`. See [`Client::submit_link`].
    ///
    /// # Errors
    ///
    /// Fails if not logged in, the submission is rejected, or the response
    /// has an unexpected shape.
    pub async fn submit_text(
        &self,
        sr: &str,
        title: &str,
        text: &str,
        follow: bool,
    ) -> Result<Submission> {
        self.submit_post(sr, title, "self", ("text", text), follow).await
    }

    /// Deletes a link or comment of the logged-in user.
    ///
    /// # Errors
    ///
    /// Fails if not logged in or the action is rejected.
    pub async fn delete(&self, id: &str) -> Result<()> {
        self.simple_action("api/del", &[("id", id)]).await
    }

    /// Saves a link.
    ///
    /// # Errors
    ///
    /// Fails if not logged in or the action is rejected.
    pub async fn save(&self, id: &str) -> Result<()> {
        self.simple_action("api/save", &[("id", id)]).await
    }

    /// Unsaves a link.
    ///
    /// # Errors
    ///
    /// Fails if not logged in or the action is rejected.
    pub async fn unsave(&self, id: &str) -> Result<()> {
        self.simple_action("api/unsave", &[("id", id)]).await
    }

    /// Hides a link.
    ///
    /// # Errors
    ///
    /// Fails if not logged in or the action is rejected.
    pub async fn hide(&self, id: &str) -> Result<()> {
        self.simple_action("api/hide", &[("id", id)]).await
    }

    /// Unhides a link.
    ///
    /// # Errors
    ///
    /// Fails if not logged in or the action is rejected.
    pub async fn unhide(&self, id: &str) -> Result<()> {
        self.simple_action("api/unhide", &[("id", id)]).await
    }

    /// Marks a link NSFW.
    ///
    /// # Errors
    ///
    /// Fails if not logged in or the action is rejected.
    pub async fn marknsfw(&self, id: &str) -> Result<()> {
        self.simple_action("api/marknsfw", &[("id", id)]).await
    }

    /// Removes the NSFW mark from a link.
    ///
    /// # Errors
    ///
    /// Fails if not logged in or the action is rejected.
    pub async fn unmarknsfw(&self, id: &str) -> Result<()> {
        self.simple_action("api/unmarknsfw", &[("id", id)]).await
    }

    /// Reports a thing to the moderators.
    ///
    /// # Errors
    ///
    /// Fails if not logged in or the action is rejected.
    pub async fn report(&self, id: &str) -> Result<()> {
        self.simple_action("api/report", &[("id", id)]).await
    }

    /// Sends a private message to `to`.
    ///
    /// # Errors
    ///
    /// Fails if not logged in or the action is rejected.
    pub async fn compose(&self, to: &str, subject: &str, text: &str) -> Result<()> {
        self.simple_action(
            "api/compose",
            &[("to", to), ("subject", subject), ("text", text)],
        )
        .await
    }

    /// Alias for [`Client::compose`].
    ///
    /// # Errors
    ///
    /// Fails if not logged in or the action is rejected.
    pub async fn message(&self, to: &str, subject: &str, text: &str) -> Result<()> {
        self.compose(to, subject, text).await
    }

    /// Marks a message read.
    ///
    /// # Errors
    ///
    /// Fails if not logged in or the action is rejected.
    pub async fn read_message(&self, id: &str) -> Result<()> {
        self.simple_action("api/read_message", &[("id", id)]).await
    }

    /// Marks a message unread.
    ///
    /// # Errors
    ///
    /// Fails if not logged in or the action is rejected.
    pub async fn unread_message(&self, id: &str) -> Result<()> {
        self.simple_action("api/unread_message", &[("id", id)]).await
    }

    /// Fullname of `sr`, looking the subreddit up when given a bare name.
    async fn subreddit_fullname(&self, sr: &str) -> Result<String> {
        if sr.starts_with("t5_") {
            return Ok(sr.to_string());
        }
        let subreddit = self.subreddit(sr).await?;
        crate::models::ThingData::require_name(&subreddit)
    }

    async fn set_subscription(&self, sr: &str, action: &str) -> Result<()> {
        self.require_login().await?;
        let fullname = self.subreddit_fullname(sr).await?;
        self.simple_action("api/subscribe", &[("action", action), ("sr", fullname.as_str())])
            .await
    }

    /// Subscribes to a subreddit given by fullname (`t5_...`) or name.
    ///
    /// A bare name costs one extra request to look up the fullname.
    ///
    /// # Errors
    ///
    /// Fails if not logged in, the lookup fails, or the action is rejected.
    pub async fn subscribe(&self, sr: &str) -> Result<()> {
        self.set_subscription(sr, "sub").await
    }

    /// Unsubscribes from a subreddit given by fullname (`t5_...`) or name.
    ///
    /// # Errors
    ///
    /// Fails if not logged in, the lookup fails, or the action is rejected.
    pub async fn unsubscribe(&self, sr: &str) -> Result<()> {
        self.set_subscription(sr, "unsub").await
    }

    /// Approves a submission or comment (moderators only).
    ///
    /// # Errors
    ///
    /// Fails if not logged in or the action is rejected.
    pub async fn approve(&self, id: &str) -> Result<()> {
        self.simple_action("api/approve", &[("id", id)]).await
    }

    /// Removes a submission or comment (moderators only).
    ///
    /// # Errors
    ///
    /// Fails if not logged in or the action is rejected.
    pub async fn remove(&self, id: &str) -> Result<()> {
        self.simple_action("api/remove", &[("id", id)]).await
    }

    /// Sets a user's flair in subreddit `r`.
    ///
    /// # Errors
    ///
    /// Fails if not logged in or the action is rejected.
    pub async fn flair(&self, r: &str, name: &str, text: &str, css_class: &str) -> Result<()> {
        self.simple_action(
            "api/flair",
            &[("r", r), ("name", name), ("text", text), ("css_class", css_class)],
        )
        .await
    }

    /// Sets flair in bulk from CSV, returning the per-row report.
    ///
    /// # Errors
    ///
    /// Fails if not logged in or the action is rejected.
    pub async fn flaircsv(&self, r: &str, flair_csv: &str) -> Result<Value> {
        self.require_login().await?;
        self.submit("api/flaircsv", &[("r", r), ("flair_csv", flair_csv)])
            .await
    }

    /// Creates a subreddit.
    ///
    /// # Errors
    ///
    /// Fails if not logged in or the action is rejected.
    pub async fn create_subreddit(&self, settings: &SubredditSettings) -> Result<()> {
        let mut data = vec![
            ("name", settings.name.as_str()),
            ("title", settings.title.as_str()),
            ("description", settings.description.as_str()),
            ("lang", settings.lang.as_str()),
            ("type", settings.kind.as_str()),
            ("link_type", settings.link_type.as_str()),
        ];
        let flags = [
            ("over_18", settings.over_18),
            ("allow_top", settings.allow_top),
            ("show_media", settings.show_media),
        ];
        data.extend(flags.iter().filter(|(_, on)| *on).map(|(key, _)| (*key, "on")));
        if let Some(domain) = &settings.domain {
            data.push(("domain", domain.as_str()));
        }
        self.simple_action("api/site_admin", &data).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truthy_bodies() {
        assert!(assert_truthy(json!({})).is_ok());
        assert!(assert_truthy(json!({"json": {"errors": []}})).is_ok());
        assert!(matches!(
            assert_truthy(json!({"json": {"errors": [], "data": {}}})),
            Err(Error::UnexpectedResponse(_))
        ));
        assert!(assert_truthy(json!([])).is_err());
    }

    #[test]
    fn extracts_url_paths() {
        let base = "https://www.reddit.com";
        assert_eq!(
            path_of(base, "https://www.reddit.com/r/test/comments/abc/title/").as_deref(),
            Some("/r/test/comments/abc/title/")
        );
        assert_eq!(
            path_of(base, "https://www.reddit.com/r/test/comments/abc/title/?ref=source#x")
                .as_deref(),
            Some("/r/test/comments/abc/title/")
        );
        assert_eq!(path_of(base, "/already/a/path").as_deref(), Some("/already/a/path"));
        assert_eq!(path_of("not a base", "/a/path"), None);
    }

    #[test]
    fn default_subreddit_settings() {
        let settings = SubredditSettings::new("rust", "Rust", "about rust");
        assert_eq!(settings.lang, "en");
        assert!(settings.allow_top);
        assert!(!settings.over_18);
    }
}
