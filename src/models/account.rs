use crate::{
    error::Error,
    models::{macros::thing_variant, Created, Listing, ThingData},
    result::Result,
};

thing_variant! {
    /// A user account.
    ///
    /// Accounts listed as moderators or contributors only carry `id` and
    /// `name`; use [`Account::about`] for the full record.
    Account
}

impl Account {
    /// The username. The API reports it as the account's `name`.
    pub fn username(&self) -> Option<&str> {
        self.get_str("name")
    }

    /// Fully-qualified name, e.g. `t2_abc`.
    pub fn fullname(&self) -> Option<String> {
        self.id().map(|id| format!("{}_{}", self.type_prefix(), id))
    }

    /// Karma from links.
    pub fn link_karma(&self) -> Option<i64> {
        self.get_i64("link_karma")
    }

    /// Karma from comments.
    pub fn comment_karma(&self) -> Option<i64> {
        self.get_i64("comment_karma")
    }

    /// Whether the user has unread mail. Only set for the logged-in user.
    pub fn has_mail(&self) -> Option<bool> {
        self.get_bool("has_mail")
    }

    /// Whether the user moderates any subreddit.
    pub fn is_mod(&self) -> Option<bool> {
        self.get_bool("is_mod")
    }

    fn require_username(&self) -> Result<&str> {
        self.username().ok_or(Error::MissingAttribute("name"))
    }

    async fn user_listing(&self, section: &str, limit: Option<u32>) -> Result<Listing> {
        let path = format!("user/{}/{}", self.require_username()?, section);
        self.client().fetch_listing(&path, &[], limit).await
    }

    /// Recent comments and submissions.
    ///
    /// # Errors
    ///
    /// Fails if the request fails or no listing comes back.
    pub async fn overview(&self, limit: Option<u32>) -> Result<Listing> {
        self.user_listing("overview", limit).await
    }

    /// Recent comments.
    ///
    /// # Errors
    ///
    /// Fails if the request fails or no listing comes back.
    pub async fn comments(&self, limit: Option<u32>) -> Result<Listing> {
        self.user_listing("comments", limit).await
    }

    /// Recent submissions.
    ///
    /// # Errors
    ///
    /// Fails if the request fails or no listing comes back.
    pub async fn submitted(&self, limit: Option<u32>) -> Result<Listing> {
        self.user_listing("submitted", limit).await
    }

    /// Liked submissions (visible when public or when this is you).
    ///
    /// # Errors
    ///
    /// Fails if the request fails or no listing comes back.
    pub async fn liked(&self, limit: Option<u32>) -> Result<Listing> {
        self.user_listing("liked", limit).await
    }

    /// Disliked submissions (visible when public or when this is you).
    ///
    /// # Errors
    ///
    /// Fails if the request fails or no listing comes back.
    pub async fn disliked(&self, limit: Option<u32>) -> Result<Listing> {
        self.user_listing("disliked", limit).await
    }

    /// Hidden submissions (visible only to the user).
    ///
    /// # Errors
    ///
    /// Fails if the request fails or no listing comes back.
    pub async fn hidden(&self, limit: Option<u32>) -> Result<Listing> {
        self.user_listing("hidden", limit).await
    }

    /// Fetches the full account record.
    ///
    /// # Errors
    ///
    /// Fails if the request fails or no account comes back.
    pub async fn about(&self) -> Result<Account> {
        self.client().user(self.require_username()?).await
    }

    /// Alias for [`Account::about`].
    ///
    /// # Errors
    ///
    /// Fails if the request fails or no account comes back.
    pub async fn refresh(&self) -> Result<Account> {
        self.about().await
    }

    /// Sends this user a private message.
    ///
    /// # Errors
    ///
    /// Fails if not logged in or the action is rejected.
    pub async fn send_message(&self, subject: &str, text: &str) -> Result<()> {
        self.client()
            .compose(self.require_username()?, subject, text)
            .await
    }
}

impl Created for Account {}

#[cfg(feature = "display")]
impl std::fmt::Display for Account {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.username().unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        models::{Blob, Node},
        testing::offline_client,
    };

    fn account(tag: &str) -> Account {
        let mut blob = Blob::new(offline_client(), None);
        blob.set("id", Node::from("u1"));
        blob.set("name", Node::from("alice"));
        Account::from_parts(tag, blob)
    }

    #[test]
    fn fullname_joins_type_prefix_and_id() {
        assert_eq!(account("t2").fullname().as_deref(), Some("t2_u1"));
        assert_eq!(account("t2_foo").fullname().as_deref(), Some("t2_u1"));
    }

    #[test]
    fn username_is_the_name_attribute() {
        assert_eq!(account("t2").username(), Some("alice"));
    }
}
