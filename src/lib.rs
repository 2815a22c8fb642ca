#![deny(clippy::all, clippy::pedantic)]
#![deny(missing_docs)]
#![allow(clippy::must_use_candidate, clippy::module_name_repetitions)]
//! # snoo
//!
//! snoo is a client library for a social-news site's JSON API that turns
//! every response into navigable domain objects.
//!
//! Every object it hands back is bound to the [`Client`] that fetched it,
//! so things can act on themselves:
//! - [`Listing`]s page forward and backward with [`Listing::next_listing`]
//!   and [`Listing::prev_listing`].
//! - [`Link`]s and [`Comment`]s vote, reply, hide and report through their
//!   capability traits ([`Votable`], [`Commentable`], ...).
//! - [`Account`]s and [`Subreddit`]s fetch their own listings.
//!
//! While respecting:
//! - 1 request every 2 seconds per client.
//! - A mandatory user agent.
//!
//! ## Example: Printing the front page.
//!
//! ```no_run
//! # type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;
//! use snoo::{Client, Config, Node, Thing};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let client = Client::new(Config::new("front-page-printer/0.1"))?;
//!     let listing = client.hot(None, Some(5)).await?;
//!
//!     for link in listing.iter().filter_map(Node::as_thing).filter_map(Thing::as_link) {
//!         println!("{}", link.title().unwrap_or_default());
//!     }
//!
//!     // next five
//!     let _page = listing.next_listing(None).await?;
//!     Ok(())
//! }
//! ```

/// Write actions and their argument types.
pub mod actions;

/// Client module contains [`Client`] for requesting, materializing and
/// acting on data.
pub mod client;

/// Initialization parameters.
pub mod config;

/// Contains [`Error`]s that can be thrown by the library.
///
/// [`Error`]: crate::error::Error
pub mod error;

/// Read endpoints and their argument types.
pub mod listings;

/// The HTTP boundary, replaceable for tests.
pub mod transport;

mod materialize;

pub(crate) mod models;

pub(crate) mod result;

mod util;

pub use actions::{Submission, SubredditSettings};
pub use client::Client;
pub use config::Config;
pub use listings::Membership;
pub use models::*;
