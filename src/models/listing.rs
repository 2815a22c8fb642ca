use crate::{
    error::Error,
    models::{Blob, ListBlob, Node, Thing},
    result::Result,
    util::{urljoin, COMMENTS_PATH_PATTERN},
    Client,
};

/// A page of results with cursors to its neighbours.
///
/// A listing remembers the path it was fetched from and the page size
/// used, so [`next_listing`] and [`prev_listing`] need no further input.
///
/// [`next_listing`]: Listing::next_listing
/// [`prev_listing`]: Listing::prev_listing
#[derive(Debug, Clone, PartialEq)]
pub struct Listing {
    children: ListBlob,
    attrs: Blob,
    before: Option<String>,
    after: Option<String>,
    modhash: Option<String>,
    pub(crate) limit: Option<u32>,
    pub(crate) query: Vec<(String, String)>,
}

fn take_cursor(blob: &mut Blob, key: &str) -> Option<String> {
    match blob.remove(key) {
        Some(Node::String(cursor)) => Some(cursor),
        Some(Node::Null) | None => None,
        Some(other) => {
            blob.set(key, other);
            None
        }
    }
}

impl Listing {
    /// Consumes the listing fields out of a populated attribute bag.
    pub(crate) fn from_blob(mut attrs: Blob) -> Self {
        let children = match attrs.remove("children") {
            Some(Node::List(list)) => list,
            other => {
                if let Some(other) = other {
                    attrs.set("children", other);
                }
                ListBlob::new(attrs.client().clone(), attrs.path(), Vec::new())
            }
        };
        let before = take_cursor(&mut attrs, "before");
        let after = take_cursor(&mut attrs, "after");
        let modhash = take_cursor(&mut attrs, "modhash");
        Listing {
            children,
            attrs,
            before,
            after,
            modhash,
            limit: None,
            query: Vec::new(),
        }
    }

    /// The items on this page.
    pub fn children(&self) -> &ListBlob {
        &self.children
    }

    /// Consumes the listing, returning its items.
    pub fn into_children(self) -> ListBlob {
        self.children
    }

    /// Attributes other than the items and cursors.
    pub fn attributes(&self) -> &Blob {
        &self.attrs
    }

    /// Cursor to the previous page.
    pub fn before(&self) -> Option<&str> {
        self.before.as_deref()
    }

    /// Cursor to the next page.
    pub fn after(&self) -> Option<&str> {
        self.after.as_deref()
    }

    /// Modhash echoed with the listing.
    pub fn modhash(&self) -> Option<&str> {
        self.modhash.as_deref()
    }

    /// Page size this listing was requested with.
    pub fn limit(&self) -> Option<u32> {
        self.limit
    }

    /// Query parameters, other than cursors and page size, this listing
    /// was requested with. Repeated on every page.
    pub fn query(&self) -> &[(String, String)] {
        &self.query
    }

    /// `query` plus one cursor.
    fn page_params<'a>(&'a self, cursor: (&'a str, &'a str)) -> Vec<(&'a str, &'a str)> {
        self.query
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_str()))
            .chain(std::iter::once(cursor))
            .collect()
    }

    /// Path this listing was fetched from.
    pub fn path(&self) -> Option<&str> {
        self.children.path()
    }

    /// The client that fetched this listing.
    pub fn client(&self) -> &Client {
        self.children.client()
    }

    fn trailing_more(&self) -> Option<&crate::models::More> {
        match self.children.last() {
            Some(Node::Thing(Thing::More(more))) => Some(more),
            _ => None,
        }
    }

    /// Whether another page can be fetched, either through the `after`
    /// cursor or through a trailing [`More`](crate::models::More) marker.
    pub fn has_more(&self) -> bool {
        self.after.is_some() || self.trailing_more().is_some()
    }

    /// Alias for [`Listing::next_listing`].
    ///
    /// # Errors
    ///
    /// See [`Listing::next_listing`].
    pub async fn more(&self, limit: Option<u32>) -> Result<Listing> {
        self.next_listing(limit).await
    }

    /// Fetches the next page.
    ///
    /// Uses the `after` cursor when set. Otherwise, inside a comment tree
    /// ending in a `More` marker, fetches the replies the marker stands for.
    /// `limit` defaults to the limit this page was fetched with.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoMore`] on the last page, or an error if the
    /// request fails.
    pub async fn next_listing(&self, limit: Option<u32>) -> Result<Listing> {
        let limit = limit.or(self.limit);

        if let Some(after) = &self.after {
            let path = self.path().ok_or(Error::MissingAttribute("path"))?;
            log::debug!("fetching page after {} from {}", after, path);
            return self
                .client()
                .fetch_listing(path, &self.page_params(("after", after.as_str())), limit)
                .await;
        }

        if let Some(more) = self.trailing_more() {
            let caps = self
                .path()
                .and_then(|path| COMMENTS_PATH_PATTERN.captures(path))
                .ok_or(Error::NoMore("no more items"))?;
            let more_id = more.get_str("id").ok_or(Error::MissingAttribute("id"))?;
            let path = urljoin(&[&caps["start"], &caps["link_id"], &caps["link_title"], more_id]);
            log::debug!("following more marker to {}", path);
            return self.client().fetch_listing(&format!("/{path}"), &[], limit).await;
        }

        Err(Error::NoMore("no more items"))
    }

    /// Fetches the previous page.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoMore`] when there is no `before` cursor, or an
    /// error if the request fails.
    pub async fn prev_listing(&self, limit: Option<u32>) -> Result<Listing> {
        let before = self.before.as_deref().ok_or(Error::NoMore("no previous items"))?;
        let path = self.path().ok_or(Error::MissingAttribute("path"))?;
        log::debug!("fetching page before {} from {}", before, path);
        self.client()
            .fetch_listing(path, &self.page_params(("before", before)), limit.or(self.limit))
            .await
    }
}

impl std::ops::Deref for Listing {
    type Target = ListBlob;

    fn deref(&self) -> &Self::Target {
        &self.children
    }
}

impl std::ops::DerefMut for Listing {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.children
    }
}

impl<'a> IntoIterator for &'a Listing {
    type Item = &'a Node;
    type IntoIter = std::slice::Iter<'a, Node>;

    fn into_iter(self) -> Self::IntoIter {
        self.children.iter()
    }
}
