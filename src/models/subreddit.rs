use crate::{
    error::Error,
    models::{macros::thing_variant, Created, ListBlob, Listing, ThingData},
    result::Result,
    Submission,
};

thing_variant! {
    /// A subreddit.
    Subreddit
}

impl Subreddit {
    /// Name as used in URLs, e.g. `rust`.
    pub fn display_name(&self) -> Option<&str> {
        self.get_str("display_name")
    }

    /// Page title.
    pub fn title(&self) -> Option<&str> {
        self.get_str("title")
    }

    /// Sidebar text.
    pub fn description(&self) -> Option<&str> {
        self.get_str("description")
    }

    /// Subscriber count.
    pub fn subscribers(&self) -> Option<i64> {
        self.get_i64("subscribers")
    }

    /// Whether the subreddit is marked NSFW.
    pub fn over18(&self) -> Option<bool> {
        self.get_bool("over18")
    }

    fn require_display_name(&self) -> Result<&str> {
        self.display_name()
            .ok_or(Error::MissingAttribute("display_name"))
    }

    /// Hot links.
    ///
    /// # Errors
    ///
    /// Fails if the request fails or no listing comes back.
    pub async fn hot(&self, limit: Option<u32>) -> Result<Listing> {
        let sr = self.require_display_name()?;
        self.client().hot(Some(sr), limit).await
    }

    /// Newest links.
    ///
    /// # Errors
    ///
    /// Fails if the request fails or no listing comes back.
    pub async fn newest(&self, limit: Option<u32>) -> Result<Listing> {
        let sr = self.require_display_name()?;
        self.client().newest(Some(sr), limit).await
    }

    /// Top links.
    ///
    /// # Errors
    ///
    /// Fails if the request fails or no listing comes back.
    pub async fn top(&self, limit: Option<u32>) -> Result<Listing> {
        let sr = self.require_display_name()?;
        self.client().top(Some(sr), limit).await
    }

    /// Controversial links.
    ///
    /// # Errors
    ///
    /// Fails if the request fails or no listing comes back.
    pub async fn controversial(&self, limit: Option<u32>) -> Result<Listing> {
        let sr = self.require_display_name()?;
        self.client().controversial(Some(sr), limit).await
    }

    /// Newest comments.
    ///
    /// # Errors
    ///
    /// Fails if the request fails or no listing comes back.
    pub async fn comments(&self, limit: Option<u32>) -> Result<Listing> {
        let sr = self.require_display_name()?;
        self.client().comments(Some(sr), limit).await
    }

    /// Subscribes the logged-in user.
    ///
    /// # Errors
    ///
    /// Fails if not logged in or the action is rejected.
    pub async fn subscribe(&self) -> Result<()> {
        self.client().subscribe(&self.require_name()?).await
    }

    /// Unsubscribes the logged-in user.
    ///
    /// # Errors
    ///
    /// Fails if not logged in or the action is rejected.
    pub async fn unsubscribe(&self) -> Result<()> {
        self.client().unsubscribe(&self.require_name()?).await
    }

    /// Submits a link here.
    ///
    /// # Errors
    ///
    /// Fails if not logged in, the submission is rejected, or the response
    /// cannot be followed.
    pub async fn submit_link(&self, title: &str, url: &str, follow: bool) -> Result<Submission> {
        let sr = self.require_display_name()?;
        self.client().submit_link(sr, title, url, follow).await
    }

    /// Submits a self post here.
    ///
    /// # Errors
    ///
    /// Fails if not logged in, the submission is rejected, or the response
    /// cannot be followed.
    pub async fn submit_text(&self, title: &str, text: &str, follow: bool) -> Result<Submission> {
        let sr = self.require_display_name()?;
        self.client().submit_text(sr, title, text, follow).await
    }

    /// Moderators, as accounts carrying only `id` and `name`.
    ///
    /// # Errors
    ///
    /// Fails if the request fails or no user list comes back.
    pub async fn moderators(&self) -> Result<ListBlob> {
        let sr = self.require_display_name()?;
        self.client().moderators(sr, None).await
    }

    /// Approved submitters, as accounts carrying only `id` and `name`.
    ///
    /// # Errors
    ///
    /// Fails if not logged in, the request fails, or no user list comes
    /// back.
    pub async fn contributors(&self) -> Result<ListBlob> {
        let sr = self.require_display_name()?;
        self.client().contributors(sr, None).await
    }

    /// Fetches the subreddit's about page again.
    ///
    /// # Errors
    ///
    /// Fails if the request fails or no subreddit comes back.
    pub async fn refresh(&self) -> Result<Subreddit> {
        let sr = self.require_display_name()?;
        self.client().subreddit(sr).await
    }
}

impl Created for Subreddit {}

#[cfg(feature = "display")]
impl std::fmt::Display for Subreddit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "r/{}", self.display_name().unwrap_or_default())
    }
}
