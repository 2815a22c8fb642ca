#![allow(dead_code)]

use std::{
    collections::VecDeque,
    sync::{Arc, Mutex},
};

use async_trait::async_trait;
use serde_json::Value;
use snoo::{
    error::Error,
    transport::{Reply, Transport},
    Client, Config,
};

pub const BASE: &str = "http://localhost";

#[derive(Debug, Clone, PartialEq)]
pub struct Call {
    pub method: &'static str,
    pub url: String,
    pub params: Vec<(String, String)>,
}

impl Call {
    pub fn param(&self, key: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

#[derive(Default)]
struct State {
    calls: Vec<Call>,
    replies: VecDeque<Value>,
}

/// Records every request and answers with the queued bodies in order.
#[derive(Clone, Default)]
pub struct MockTransport {
    state: Arc<Mutex<State>>,
}

impl MockTransport {
    pub fn reply(&self, body: Value) -> &Self {
        self.state.lock().unwrap().replies.push_back(body);
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.state.lock().unwrap().calls.clone()
    }

    fn answer(&self, method: &'static str, url: &str, params: &[(String, String)]) -> Result<Reply, Error> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(Call {
            method,
            url: url.to_string(),
            params: params.to_vec(),
        });
        let body = state
            .replies
            .pop_front()
            .ok_or_else(|| Error::Config(format!("no reply queued for {method} {url}")))?;
        let path = url.strip_prefix(BASE).unwrap_or(url).to_string();
        Ok(Reply { path, body })
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn get(&self, url: &str, params: &[(String, String)]) -> Result<Reply, Error> {
        self.answer("GET", url, params)
    }

    async fn post(&self, url: &str, form: &[(String, String)]) -> Result<Reply, Error> {
        self.answer("POST", url, form)
    }
}

pub fn client() -> (Client, MockTransport) {
    let mock = MockTransport::default();
    let config = Config::default()
        .with_respect(false)
        .with_base_url(BASE)
        .with_login_url(format!("{BASE}/api/login.json"));
    let client = Client::with_transport(config, mock.clone()).unwrap();
    (client, mock)
}

pub async fn logged_in_client() -> (Client, MockTransport) {
    let (client, mock) = client();
    mock.reply(serde_json::json!({"json": {"errors": [], "data": {"modhash": "mh"}}}));
    client.login("alice", "hunter2").await.unwrap();
    (client, mock)
}

pub fn listing(children: Value, after: Option<&str>, before: Option<&str>) -> Value {
    serde_json::json!({
        "kind": "Listing",
        "data": {
            "modhash": "",
            "children": children,
            "after": after,
            "before": before
        }
    })
}
