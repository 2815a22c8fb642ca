use std::{fmt, sync::Arc, time::Duration};

use crate::{
    config::Config,
    error::Error,
    materialize::thingify,
    models::{Listing, Node},
    result::Result,
    transport::{HttpTransport, Reply, Transport},
    util::api_url,
};
use serde::Deserialize;
use serde_json::Value;
use tokio::{
    sync::{Mutex, MutexGuard, RwLock},
    time::Instant,
};

/// A session against the API.
///
/// `Client` is a cheap handle: clones share the same transport, credentials
/// and rate limiter. Every object materialized from a response holds a clone
/// so it can call back into the session (paginate, vote, reply, ...).
#[derive(Clone)]
pub struct Client {
    inner: Arc<Inner>,
}

struct Inner {
    transport: Box<dyn Transport>,
    config: Config,
    limiter: RateLimit,
    auth: RwLock<Option<Auth>>,
}

#[derive(Debug, Clone)]
pub(crate) struct Auth {
    pub(crate) username: String,
    pub(crate) modhash: String,
}

/// Serializes requests and spaces them at least `period` apart.
#[derive(Debug)]
pub(crate) struct RateLimit {
    enabled: bool,
    period: Duration,
    last_request: Mutex<Option<Instant>>,
}

impl RateLimit {
    pub(crate) fn new(enabled: bool, period: Duration) -> Self {
        RateLimit {
            enabled,
            period,
            last_request: Mutex::new(None),
        }
    }

    /// Waits for the next request slot.
    ///
    /// The returned guard must be held until the request completes; that
    /// keeps a second request from starting in the meantime.
    pub(crate) async fn acquire(&self) -> MutexGuard<'_, Option<Instant>> {
        let mut last = self.last_request.lock().await;
        if self.enabled {
            if let Some(previous) = *last {
                let elapsed = previous.elapsed();
                if elapsed < self.period {
                    let wait_time = self.period - elapsed;
                    log::debug!("requesting too often! sleeping for {:?}", wait_time);
                    tokio::time::sleep(wait_time).await;
                }
            }
        }
        *last = Some(Instant::now());
        last
    }
}

/// `{"json": {"errors": [...], "data": {...}}}`, the body of every write
/// action and of login.
#[derive(Debug, Deserialize)]
pub(crate) struct Envelope {
    pub(crate) json: EnvelopeBody,
}

#[derive(Debug, Deserialize)]
pub(crate) struct EnvelopeBody {
    #[serde(default)]
    pub(crate) errors: Vec<Value>,
    #[serde(default)]
    pub(crate) data: Option<Value>,
}

#[derive(Debug, Deserialize)]
struct LoginData {
    modhash: String,
}

impl Client {
    /// Creates a client that talks HTTP through `reqwest`.
    ///
    /// # Errors
    ///
    /// Returns an error if `config` respects the API rules without a user
    /// agent, or if the HTTP client cannot be built.
    pub fn new(config: Config) -> Result<Client> {
        config.validate()?;
        let transport = HttpTransport::new(config.user_agent())?;
        Client::with_transport(config, transport)
    }

    /// Creates a client on top of a caller-supplied [`Transport`].
    ///
    /// # Errors
    ///
    /// Returns an error if `config` respects the API rules without a user
    /// agent.
    pub fn with_transport(config: Config, transport: impl Transport + 'static) -> Result<Client> {
        config.validate()?;
        let limiter = RateLimit::new(config.respect, config.period);
        let inner = Inner {
            transport: Box::new(transport),
            config,
            limiter,
            auth: RwLock::new(None),
        };
        Ok(Client {
            inner: Arc::new(inner),
        })
    }

    /// Creates a client and logs in with the given credentials.
    ///
    /// # Errors
    ///
    /// Returns an error if the client cannot be created or login fails.
    pub async fn connect(config: Config, username: &str, password: &str) -> Result<Client> {
        let client = Client::new(config)?;
        client.login(username, password).await?;
        Ok(client)
    }

    /// The configuration this client was built with.
    pub fn config(&self) -> &Config {
        &self.inner.config
    }

    /// Logs in, storing the modhash and the session cookie.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnexpectedStatus`] on a non-success status and
    /// [`Error::LoginFailed`] when no modhash can be read from the body.
    pub async fn login(&self, username: &str, password: &str) -> Result<()> {
        let form = vec![
            ("user".to_string(), username.to_string()),
            ("passwd".to_string(), password.to_string()),
            ("api_type".to_string(), "json".to_string()),
        ];
        let reply = self
            .inner
            .transport
            .post(&self.inner.config.login_url, &form)
            .await?;

        let modhash = serde_json::from_value::<Envelope>(reply.body)
            .ok()
            .filter(|envelope| envelope.json.errors.is_empty())
            .and_then(|envelope| envelope.json.data)
            .and_then(|data| serde_json::from_value::<LoginData>(data).ok())
            .map(|data| data.modhash)
            .ok_or(Error::LoginFailed)?;

        log::debug!("logged in as {}", username);
        *self.inner.auth.write().await = Some(Auth {
            username: username.to_string(),
            modhash,
        });
        Ok(())
    }

    /// Whether a login has succeeded on this client.
    pub async fn logged_in(&self) -> bool {
        self.inner.auth.read().await.is_some()
    }

    /// Name of the logged-in user, if any.
    pub async fn current_user(&self) -> Option<String> {
        self.inner
            .auth
            .read()
            .await
            .as_ref()
            .map(|auth| auth.username.clone())
    }

    /// Fails with [`Error::NotLoggedIn`] before any request is made.
    pub(crate) async fn require_login(&self) -> Result<Auth> {
        self.inner
            .auth
            .read()
            .await
            .clone()
            .ok_or(Error::NotLoggedIn)
    }

    /// GETs `path` and materializes the response.
    ///
    /// `path` is relative to the configured base URL (`"r/rust/new"`), or a
    /// path previously recorded on a node.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the status is not success.
    pub async fn get(&self, path: &str, params: &[(&str, &str)]) -> Result<Node> {
        let params = owned_pairs(params);
        let reply = self.send_get(path, &params).await?;
        Ok(self.materialize(reply.body, Some(&reply.path)))
    }

    /// GETs `path` with an optional page size, recording it on the result.
    ///
    /// A `limit` replaces any `limit` already present in `params`.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the status is not success.
    pub async fn fetch(
        &self,
        path: &str,
        params: &[(&str, &str)],
        limit: Option<u32>,
    ) -> Result<Node> {
        let mut params = owned_pairs(params);
        if let Some(limit) = limit {
            params.retain(|(key, _)| key != "limit");
            params.push(("limit".to_string(), limit.to_string()));
        }
        let reply = self.send_get(path, &params).await?;
        let mut node = self.materialize(reply.body, Some(&reply.path));
        if let Node::Listing(listing) = &mut node {
            listing.limit = limit;
            listing.query = page_query(&params);
        }
        Ok(node)
    }

    /// [`Client::fetch`] for endpoints that answer with a listing.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnexpectedResponse`] when the body holds no listing,
    /// or an error if the request fails.
    pub async fn fetch_listing(
        &self,
        path: &str,
        params: &[(&str, &str)],
        limit: Option<u32>,
    ) -> Result<Listing> {
        let mut listing = self.fetch(path, params, limit).await?.into_listing()?;
        listing.limit = limit;
        listing.query = page_query(params);
        Ok(listing)
    }

    /// POSTs a write action to `path` and returns the raw decoded body.
    ///
    /// `api_type=json` and, when logged in, the modhash are added unless
    /// `data` already carries them.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Post`] when the body carries a non-empty `errors`
    /// list, or an error if the request fails.
    pub async fn submit(&self, path: &str, data: &[(&str, &str)]) -> Result<Value> {
        let mut form = owned_pairs(data);
        set_default(&mut form, "api_type", "json");
        if let Some(auth) = self.inner.auth.read().await.as_ref() {
            set_default(&mut form, "uh", &auth.modhash);
        }

        let url = api_url(&self.inner.config.base_url, path);
        let reply = {
            let _slot = self.inner.limiter.acquire().await;
            self.inner.transport.post(&url, &form).await?
        };

        if let Ok(envelope) = serde_json::from_value::<Envelope>(reply.body.clone()) {
            if !envelope.json.errors.is_empty() {
                return Err(Error::Post(envelope.json.errors));
            }
        }
        Ok(reply.body)
    }

    /// Materializes `value` as if it had been fetched from `path`.
    pub fn materialize(&self, value: Value, path: Option<&str>) -> Node {
        thingify(self, value, path)
    }

    async fn send_get(&self, path: &str, params: &[(String, String)]) -> Result<Reply> {
        let url = api_url(&self.inner.config.base_url, path);
        let _slot = self.inner.limiter.acquire().await;
        self.inner.transport.get(&url, params).await
    }

    pub(crate) fn base_url(&self) -> &str {
        &self.inner.config.base_url
    }
}

impl fmt::Debug for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let user = self
            .inner
            .auth
            .try_read()
            .ok()
            .and_then(|auth| auth.as_ref().map(|a| a.username.clone()));
        f.debug_struct("Client")
            .field("base_url", &self.inner.config.base_url)
            .field("user", &user)
            .finish()
    }
}

fn owned_pairs(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
    pairs
        .iter()
        .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
        .collect()
}

/// Parameters that select a listing, as opposed to a page of it.
fn page_query<K: AsRef<str>, V: AsRef<str>>(params: &[(K, V)]) -> Vec<(String, String)> {
    params
        .iter()
        .filter(|(key, _)| !matches!(key.as_ref(), "after" | "before" | "limit"))
        .map(|(key, value)| (key.as_ref().to_string(), value.as_ref().to_string()))
        .collect()
}

fn set_default(form: &mut Vec<(String, String)>, key: &str, value: &str) {
    if !form.iter().any(|(k, _)| k == key) {
        form.push((key.to_string(), value.to_string()));
    }
}
