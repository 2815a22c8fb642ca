//! Read endpoints: listings, lookups and the logged-in user's inbox.

use crate::{
    error::Error,
    models::{Account, Blob, Link, ListBlob, Listing, Node, Subreddit, Thing},
    result::Result,
    util::urljoin,
    Client,
};

/// Subreddits of the logged-in user, see [`Client::mine`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Membership {
    /// Subscribed subreddits.
    #[default]
    Subscriber,
    /// Subreddits the user may submit to.
    Contributor,
    /// Subreddits the user moderates.
    Moderator,
}

impl Membership {
    fn as_str(self) -> &'static str {
        match self {
            Membership::Subscriber => "subscriber",
            Membership::Contributor => "contributor",
            Membership::Moderator => "moderator",
        }
    }
}

/// Replaces each user entry with an [`Account`] carrying only `id` and
/// `name`, which is all the API reports for them.
fn accounts_from_userlist(node: Node) -> Result<ListBlob> {
    let list = match node {
        Node::Userlist(list) => list,
        other => return Err(other.unexpected()),
    };
    let client = list.client().clone();
    let path = list.path().map(str::to_string);
    let accounts = list
        .into_items()
        .into_iter()
        .map(|user| {
            let mut blob = Blob::new(client.clone(), path.as_deref());
            for key in ["id", "name"] {
                if let Some(value) = user.get(key) {
                    blob.set(key, value.clone());
                }
            }
            Node::Thing(Thing::Account(Account::from_parts("t2", blob)))
        })
        .collect();
    Ok(ListBlob::new(client, path.as_deref(), accounts))
}

impl Client {
    async fn subreddit_listing(
        &self,
        sr: Option<&str>,
        section: Option<&str>,
        limit: Option<u32>,
    ) -> Result<Listing> {
        let mut segments = Vec::new();
        if let Some(sr) = sr {
            segments.extend(["r", sr]);
        }
        segments.extend(section);
        self.fetch_listing(&urljoin(segments.as_slice()), &[], limit).await
    }

    /// Fetches a link by its fullname.
    ///
    /// # Errors
    ///
    /// Fails if the request fails or no link comes back.
    pub async fn by_id(&self, id: &str) -> Result<Link> {
        let listing = self.fetch_listing(&urljoin(&["by_id", id]), &[], None).await?;
        match listing.into_children().into_items().into_iter().next() {
            Some(Node::Thing(thing)) => thing.into_link(),
            Some(other) => Err(other.unexpected()),
            None => Err(Error::MissingAttribute("children")),
        }
    }

    /// Hot links, from the front page or from `sr`.
    ///
    /// # Errors
    ///
    /// Fails if the request fails or no listing comes back.
    pub async fn hot(&self, sr: Option<&str>, limit: Option<u32>) -> Result<Listing> {
        self.subreddit_listing(sr, None, limit).await
    }

    /// Newest links, from the front page or from `sr`.
    ///
    /// # Errors
    ///
    /// Fails if the request fails or no listing comes back.
    pub async fn newest(&self, sr: Option<&str>, limit: Option<u32>) -> Result<Listing> {
        self.subreddit_listing(sr, Some("new"), limit).await
    }

    /// Top links, from the front page or from `sr`.
    ///
    /// # Errors
    ///
    /// Fails if the request fails or no listing comes back.
    pub async fn top(&self, sr: Option<&str>, limit: Option<u32>) -> Result<Listing> {
        self.subreddit_listing(sr, Some("top"), limit).await
    }

    /// Controversial links, from the front page or from `sr`.
    ///
    /// # Errors
    ///
    /// Fails if the request fails or no listing comes back.
    pub async fn controversial(&self, sr: Option<&str>, limit: Option<u32>) -> Result<Listing> {
        self.subreddit_listing(sr, Some("controversial"), limit).await
    }

    /// Newest comments, site-wide or in `sr`.
    ///
    /// # Errors
    ///
    /// Fails if the request fails or no listing comes back.
    pub async fn comments(&self, sr: Option<&str>, limit: Option<u32>) -> Result<Listing> {
        self.subreddit_listing(sr, Some("comments"), limit).await
    }

    /// Fetches a user's about page.
    ///
    /// # Errors
    ///
    /// Fails if the request fails or no account comes back.
    pub async fn user(&self, username: &str) -> Result<Account> {
        self.get(&urljoin(&["user", username, "about"]), &[])
            .await?
            .into_thing()?
            .into_account()
    }

    /// Fetches a subreddit's about page.
    ///
    /// # Errors
    ///
    /// Fails if the request fails or no subreddit comes back.
    pub async fn subreddit(&self, sr: &str) -> Result<Subreddit> {
        self.get(&urljoin(&["r", sr, "about"]), &[])
            .await?
            .into_thing()?
            .into_subreddit()
    }

    /// Links submitted with `url`.
    ///
    /// # Errors
    ///
    /// Fails if the request fails or no listing comes back.
    pub async fn info(&self, url: &str, limit: Option<u32>) -> Result<Listing> {
        self.fetch_listing("api/info", &[("url", url)], limit).await
    }

    /// Site search.
    ///
    /// # Errors
    ///
    /// Fails if the request fails or no listing comes back.
    pub async fn search(&self, query: &str, limit: Option<u32>) -> Result<Listing> {
        self.fetch_listing("search", &[("q", query)], limit).await
    }

    /// Links to `domain`, e.g. `example.com`.
    ///
    /// # Errors
    ///
    /// Fails if the request fails or no listing comes back.
    pub async fn domain(&self, domain: &str, limit: Option<u32>) -> Result<Listing> {
        self.fetch_listing(&urljoin(&["domain", domain]), &[], limit)
            .await
    }

    async fn user_listing(&self, user: &str, section: &str, limit: Option<u32>) -> Result<Listing> {
        self.fetch_listing(&urljoin(&["user", user, section]), &[], limit)
            .await
    }

    /// A user's recent comments and submissions.
    ///
    /// # Errors
    ///
    /// Fails if the request fails or no listing comes back.
    pub async fn user_overview(&self, user: &str, limit: Option<u32>) -> Result<Listing> {
        self.user_listing(user, "overview", limit).await
    }

    /// A user's recent comments.
    ///
    /// # Errors
    ///
    /// Fails if the request fails or no listing comes back.
    pub async fn user_comments(&self, user: &str, limit: Option<u32>) -> Result<Listing> {
        self.user_listing(user, "comments", limit).await
    }

    /// A user's recent submissions.
    ///
    /// # Errors
    ///
    /// Fails if the request fails or no listing comes back.
    pub async fn user_submitted(&self, user: &str, limit: Option<u32>) -> Result<Listing> {
        self.user_listing(user, "submitted", limit).await
    }

    /// Moderators of `sr`, as accounts carrying only `id` and `name`.
    ///
    /// # Errors
    ///
    /// Fails if the request fails or no user list comes back.
    pub async fn moderators(&self, sr: &str, limit: Option<u32>) -> Result<ListBlob> {
        let node = self
            .fetch(&urljoin(&["r", sr, "about", "moderators"]), &[], limit)
            .await?;
        accounts_from_userlist(node)
    }

    /// Approved submitters of `sr`, as accounts carrying only `id` and
    /// `name`.
    ///
    /// # Errors
    ///
    /// Fails if not logged in, the request fails, or no user list comes
    /// back.
    pub async fn contributors(&self, sr: &str, limit: Option<u32>) -> Result<ListBlob> {
        self.require_login().await?;
        let node = self
            .fetch(&urljoin(&["r", sr, "about", "contributors"]), &[], limit)
            .await?;
        accounts_from_userlist(node)
    }

    /// The logged-in user's account.
    ///
    /// # Errors
    ///
    /// Fails if not logged in, the request fails, or no account comes back.
    pub async fn me(&self) -> Result<Account> {
        self.require_login().await?;
        self.get("api/me", &[]).await?.into_thing()?.into_account()
    }

    /// Subreddits the logged-in user belongs to.
    ///
    /// # Errors
    ///
    /// Fails if not logged in, the request fails, or no listing comes back.
    pub async fn mine(&self, which: Membership, limit: Option<u32>) -> Result<Listing> {
        self.require_login().await?;
        self.fetch_listing(&urljoin(&["reddits", "mine", which.as_str()]), &[], limit)
            .await
    }

    async fn own_listing(&self, path: &str, limit: Option<u32>) -> Result<Listing> {
        self.require_login().await?;
        self.fetch_listing(path, &[], limit).await
    }

    /// The logged-in user's saved links.
    ///
    /// # Errors
    ///
    /// Fails if not logged in, the request fails, or no listing comes back.
    pub async fn saved(&self, limit: Option<u32>) -> Result<Listing> {
        self.own_listing("saved", limit).await
    }

    /// The logged-in user's inbox.
    ///
    /// # Errors
    ///
    /// Fails if not logged in, the request fails, or no listing comes back.
    pub async fn inbox(&self, limit: Option<u32>) -> Result<Listing> {
        self.own_listing("message/inbox", limit).await
    }

    /// Unread inbox items.
    ///
    /// # Errors
    ///
    /// Fails if not logged in, the request fails, or no listing comes back.
    pub async fn unread(&self, limit: Option<u32>) -> Result<Listing> {
        self.own_listing("message/unread", limit).await
    }

    /// Private messages.
    ///
    /// # Errors
    ///
    /// Fails if not logged in, the request fails, or no listing comes back.
    pub async fn messages(&self, limit: Option<u32>) -> Result<Listing> {
        self.own_listing("message/messages", limit).await
    }

    /// Replies to the logged-in user's comments.
    ///
    /// # Errors
    ///
    /// Fails if not logged in, the request fails, or no listing comes back.
    pub async fn commentreplies(&self, limit: Option<u32>) -> Result<Listing> {
        self.own_listing("message/comments", limit).await
    }

    /// Replies to the logged-in user's submissions.
    ///
    /// # Errors
    ///
    /// Fails if not logged in, the request fails, or no listing comes back.
    pub async fn postreplies(&self, limit: Option<u32>) -> Result<Listing> {
        self.own_listing("message/selfreply", limit).await
    }

    /// Sent messages.
    ///
    /// # Errors
    ///
    /// Fails if not logged in, the request fails, or no listing comes back.
    pub async fn sent(&self, limit: Option<u32>) -> Result<Listing> {
        self.own_listing("message/sent", limit).await
    }

    /// Moderator mail.
    ///
    /// # Errors
    ///
    /// Fails if not logged in, the request fails, or no listing comes back.
    pub async fn modmail(&self, limit: Option<u32>) -> Result<Listing> {
        self.own_listing("message/moderator", limit).await
    }

    async fn own_user_listing(&self, section: &str, limit: Option<u32>) -> Result<Listing> {
        let auth = self.require_login().await?;
        self.user_listing(&auth.username, section, limit).await
    }

    /// Links the logged-in user liked.
    ///
    /// # Errors
    ///
    /// Fails if not logged in, the request fails, or no listing comes back.
    pub async fn liked(&self, limit: Option<u32>) -> Result<Listing> {
        self.own_user_listing("liked", limit).await
    }

    /// Links the logged-in user disliked.
    ///
    /// # Errors
    ///
    /// Fails if not logged in, the request fails, or no listing comes back.
    pub async fn disliked(&self, limit: Option<u32>) -> Result<Listing> {
        self.own_user_listing("disliked", limit).await
    }

    /// Links the logged-in user hid.
    ///
    /// # Errors
    ///
    /// Fails if not logged in, the request fails, or no listing comes back.
    pub async fn hidden(&self, limit: Option<u32>) -> Result<Listing> {
        self.own_user_listing("hidden", limit).await
    }

    /// Flair assignments in subreddit `r`.
    ///
    /// Each entry is a blob with `user`, `flair_text` and `flair_css_class`.
    /// `after` takes precedence over `before`.
    ///
    /// # Errors
    ///
    /// Fails if not logged in, the request fails, or the response carries
    /// no `users`.
    pub async fn flairlist(
        &self,
        r: &str,
        limit: u32,
        after: Option<&str>,
        before: Option<&str>,
    ) -> Result<Node> {
        self.require_login().await?;
        let limit = limit.to_string();
        let mut params = vec![("limit", limit.as_str())];
        if let Some(after) = after {
            params.push(("after", after));
        } else if let Some(before) = before {
            params.push(("before", before));
        }
        let node = self
            .get(&urljoin(&["r", r, "api", "flairlist"]), &params)
            .await?;
        match node {
            Node::Blob(mut blob) => blob.remove("users").ok_or(Error::MissingAttribute("users")),
            other => Err(other.unexpected()),
        }
    }
}
