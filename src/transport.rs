//! The HTTP boundary of the client.
//!
//! [`Client`] never talks to the network directly; it hands fully built URLs
//! and form/query pairs to a [`Transport`]. [`HttpTransport`] is the
//! `reqwest`-backed implementation used by [`Client::new`]. Tests and
//! alternative runtimes can supply their own.
//!
//! [`Client`]: crate::Client
//! [`Client::new`]: crate::Client::new

use async_trait::async_trait;
use reqwest::{
    header::USER_AGENT, Client as ReqwestClient, RequestBuilder, Response, StatusCode,
};
use serde_json::Value;

use crate::{error::Error, result::Result};

/// A decoded response body and the path of the URL that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct Reply {
    /// Path component of the final (post-redirect) request URL.
    pub path: String,
    /// Decoded JSON body.
    pub body: Value,
}

/// Sends requests on behalf of a [`Client`].
///
/// Implementations must return [`Error::UnexpectedStatus`] for any
/// non-success status and must keep cookies set by the login endpoint for
/// later requests.
///
/// [`Client`]: crate::Client
#[async_trait]
pub trait Transport: Send + Sync {
    /// Sends a GET to `url` with `params` as the query string.
    async fn get(&self, url: &str, params: &[(String, String)]) -> Result<Reply>;

    /// Sends a form-encoded POST to `url`.
    async fn post(&self, url: &str, form: &[(String, String)]) -> Result<Reply>;
}

/// [`Transport`] over a cookie-keeping `reqwest` client.
#[derive(Debug)]
pub struct HttpTransport {
    http: ReqwestClient,
    user_agent: String,
}

impl HttpTransport {
    /// Builds a transport that identifies itself as `user_agent`.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be constructed.
    pub fn new(user_agent: impl Into<String>) -> Result<Self> {
        let http = ReqwestClient::builder().cookie_store(true).build()?;
        Ok(HttpTransport {
            http,
            user_agent: user_agent.into(),
        })
    }

    async fn dispatch(&self, builder: RequestBuilder, url: &str) -> Result<Reply> {
        log::info!("request for {} dispatched", url);
        let response = builder.header(USER_AGENT, &self.user_agent).send().await?;
        log::info!("response status: {}", response.status());
        Self::decode(response).await
    }

    async fn decode(response: Response) -> Result<Reply> {
        let status = response.status();
        let path = response.url().path().to_string();
        let text = response.text().await?;
        match status {
            StatusCode::OK => {
                let body = serde_json::from_str(&text)?;
                Ok(Reply { path, body })
            }
            status => Err(Error::UnexpectedStatus { status, body: text }),
        }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get(&self, url: &str, params: &[(String, String)]) -> Result<Reply> {
        let builder = self.http.get(url).query(params);
        self.dispatch(builder, url).await
    }

    async fn post(&self, url: &str, form: &[(String, String)]) -> Result<Reply> {
        let builder = self.http.post(url).form(form);
        self.dispatch(builder, url).await
    }
}
