use crate::models::{macros::thing_variant, Node};

thing_variant! {
    /// Marks replies left out of a comment tree.
    ///
    /// A [`Listing`] ending in one of these can still be continued with
    /// [`Listing::next_listing`].
    ///
    /// [`Listing`]: crate::models::Listing
    /// [`Listing::next_listing`]: crate::models::Listing::next_listing
    More
}

impl More {
    /// Ids of the comments not yet fetched.
    pub fn children(&self) -> Vec<&str> {
        self.get("children")
            .and_then(Node::as_list)
            .map(|list| list.iter().filter_map(Node::as_str).collect())
            .unwrap_or_default()
    }

    /// Number of comments left out.
    pub fn count(&self) -> Option<i64> {
        self.get_i64("count")
    }
}
