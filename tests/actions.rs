mod common;

use common::{client, logged_in_client, BASE};
use serde_json::json;
use snoo::{
    error::Error, Commentable, Distinguish, Hideable, Node, Submission, SubredditSettings, Thing,
    Votable,
};

fn link_node(client: &snoo::Client) -> Node {
    client.materialize(
        json!({"kind": "t3", "data": {"id": "abc", "name": "t3_abc", "title": "hello"}}),
        Some("/r/test/.json"),
    )
}

#[tokio::test]
async fn upvote_posts_once_with_direction_and_name() {
    let (client, mock) = logged_in_client().await;
    mock.reply(json!({}));

    let node = link_node(&client);
    let link = node.as_thing().and_then(Thing::as_link).unwrap();
    link.upvote().await.unwrap();

    let calls = mock.calls();
    assert_eq!(calls.len(), 2);
    let vote = &calls[1];
    assert_eq!(vote.method, "POST");
    assert_eq!(vote.url, format!("{BASE}/api/vote/.json"));
    assert_eq!(vote.param("dir"), Some("1"));
    assert_eq!(vote.param("id"), Some("t3_abc"));
    assert_eq!(vote.param("uh"), Some("mh"));
    assert_eq!(vote.param("api_type"), Some("json"));
}

#[tokio::test]
async fn actions_fail_before_any_request_when_logged_out() {
    let (client, mock) = client();
    let node = link_node(&client);
    let link = node.as_thing().and_then(Thing::as_link).unwrap();

    assert!(matches!(link.downvote().await, Err(Error::NotLoggedIn)));
    assert!(matches!(link.hide().await, Err(Error::NotLoggedIn)));
    assert!(matches!(client.saved(None).await, Err(Error::NotLoggedIn)));
    assert!(matches!(client.subscribe("rust").await, Err(Error::NotLoggedIn)));
    assert!(mock.calls().is_empty());
}

#[tokio::test]
async fn rejected_action_surfaces_upstream_errors() {
    let (client, mock) = logged_in_client().await;
    mock.reply(json!({"json": {"errors": [["RATELIMIT", "slow down", "ratelimit"]]}}));

    match client.save("t3_abc").await {
        Err(Error::Post(errors)) => assert_eq!(errors.len(), 1),
        other => panic!("expected upstream error, got {other:?}"),
    }
}

#[tokio::test]
async fn unexpected_action_body_is_reported() {
    let (client, mock) = logged_in_client().await;
    mock.reply(json!({"unexpected": true}));

    assert!(matches!(
        client.report("t3_abc").await,
        Err(Error::UnexpectedResponse(_))
    ));
}

#[tokio::test]
async fn login_without_modhash_fails() {
    let (client, mock) = client();
    mock.reply(json!({"json": {"errors": [["WRONG_PASSWORD", "invalid password", "passwd"]]}}));

    assert!(matches!(
        client.login("alice", "wrong").await,
        Err(Error::LoginFailed)
    ));
    assert!(!client.logged_in().await);
    assert_eq!(client.current_user().await, None);
}

#[tokio::test]
async fn login_stores_user_and_modhash() {
    let (client, mock) = logged_in_client().await;
    assert!(client.logged_in().await);
    assert_eq!(client.current_user().await.as_deref(), Some("alice"));

    let login = &mock.calls()[0];
    assert_eq!(login.url, format!("{BASE}/api/login.json"));
    assert_eq!(login.param("user"), Some("alice"));
    assert_eq!(login.param("passwd"), Some("hunter2"));
    assert_eq!(login.param("api_type"), Some("json"));
}

#[tokio::test]
async fn comment_returns_the_echoed_comment() {
    let (client, mock) = logged_in_client().await;
    mock.reply(json!({
        "json": {
            "errors": [],
            "data": {"things": [{"kind": "t1", "data": {"id": "c9", "body": "nice"}}]}
        }
    }));

    let node = link_node(&client);
    let link = node.as_thing().and_then(Thing::as_link).unwrap();
    let comment = link.comment("nice").await.unwrap();
    assert_eq!(comment.body(), Some("nice"));

    let call = &mock.calls()[1];
    assert_eq!(call.url, format!("{BASE}/api/comment/.json"));
    assert_eq!(call.param("parent"), Some("t3_abc"));
    assert_eq!(call.param("text"), Some("nice"));
}

#[tokio::test]
async fn distinguish_uses_the_mode_in_the_path() {
    let (client, mock) = logged_in_client().await;
    mock.reply(json!({
        "json": {"errors": [], "data": {"things": [{"kind": "t3", "data": {"id": "abc"}}]}}
    }));

    let thing = client.distinguish("t3_abc", Distinguish::Admin).await.unwrap();
    assert!(thing.as_link().is_some());
    assert_eq!(mock.calls()[1].url, format!("{BASE}/api/distinguish/admin/.json"));
}

#[tokio::test]
async fn echo_without_things_is_unexpected() {
    let (client, mock) = logged_in_client().await;
    mock.reply(json!({"json": {"errors": [], "data": {}}}));

    assert!(matches!(
        client.edit("t1_c9", "edited").await,
        Err(Error::UnexpectedResponse(_))
    ));
}

#[tokio::test]
async fn submit_without_follow_returns_permalink() {
    let (client, mock) = logged_in_client().await;
    mock.reply(json!({
        "json": {"errors": [], "data": {"url": "http://localhost/r/test/comments/new1/title/"}}
    }));

    let submission = client
        .submit_text("test", "title", "body", false)
        .await
        .unwrap();
    assert_eq!(
        submission,
        Submission::Permalink("/r/test/comments/new1/title/".to_string())
    );

    let call = &mock.calls()[1];
    assert_eq!(call.param("kind"), Some("self"));
    assert_eq!(call.param("sr"), Some("test"));
    assert_eq!(call.param("text"), Some("body"));
}

#[tokio::test]
async fn submit_with_follow_fetches_the_new_link() {
    let (client, mock) = logged_in_client().await;
    mock.reply(json!({
        "json": {"errors": [], "data": {"url": "http://localhost/r/test/comments/new1/title/"}}
    }))
    .reply(json!([
        common::listing(json!([{"kind": "t3", "data": {"id": "new1", "title": "title"}}]), None, None),
        common::listing(json!([]), None, None)
    ]));

    let submission = client
        .submit_link("test", "title", "https://example.com", true)
        .await
        .unwrap();
    match submission {
        Submission::Followed(link) => assert_eq!(link.title(), Some("title")),
        other => panic!("expected followed link, got {other:?}"),
    }
    let follow = &mock.calls()[2];
    assert_eq!(follow.method, "GET");
    assert_eq!(follow.url, format!("{BASE}/r/test/comments/new1/title/.json"));
}

#[tokio::test]
async fn submitted_permalink_drops_query_and_fragment() {
    let (client, mock) = logged_in_client().await;
    let response = json!({
        "json": {
            "errors": [],
            "data": {"url": "http://localhost/r/test/comments/new1/title/?ref=source#x"}
        }
    });
    mock.reply(response.clone())
        .reply(response)
        .reply(json!([
            common::listing(json!([{"kind": "t3", "data": {"id": "new1"}}]), None, None),
            common::listing(json!([]), None, None)
        ]));

    let submission = client
        .submit_text("test", "title", "body", false)
        .await
        .unwrap();
    assert_eq!(
        submission,
        Submission::Permalink("/r/test/comments/new1/title/".to_string())
    );

    client
        .submit_text("test", "title", "body", true)
        .await
        .unwrap();
    let follow = &mock.calls()[3];
    assert_eq!(follow.url, format!("{BASE}/r/test/comments/new1/title/.json"));
}

#[tokio::test]
async fn subscribe_by_name_looks_up_the_fullname() {
    let (client, mock) = logged_in_client().await;
    mock.reply(json!({"kind": "t5", "data": {"id": "2qh1i", "name": "t5_2qh1i", "display_name": "rust"}}))
        .reply(json!({}));

    client.subscribe("rust").await.unwrap();

    let calls = mock.calls();
    assert_eq!(calls[1].url, format!("{BASE}/r/rust/about/.json"));
    assert_eq!(calls[2].param("sr"), Some("t5_2qh1i"));
    assert_eq!(calls[2].param("action"), Some("sub"));
}

#[tokio::test]
async fn subscribe_by_fullname_skips_the_lookup() {
    let (client, mock) = logged_in_client().await;
    mock.reply(json!({"json": {"errors": []}}));

    client.unsubscribe("t5_2qh1i").await.unwrap();

    let calls = mock.calls();
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[1].param("action"), Some("unsub"));
}

#[tokio::test]
async fn create_subreddit_sends_only_enabled_flags() {
    let (client, mock) = logged_in_client().await;
    mock.reply(json!({}));

    let settings = SubredditSettings::new("rust", "Rust", "about rust");
    client.create_subreddit(&settings).await.unwrap();

    let call = &mock.calls()[1];
    assert_eq!(call.url, format!("{BASE}/api/site_admin/.json"));
    assert_eq!(call.param("allow_top"), Some("on"));
    assert_eq!(call.param("over_18"), None);
    assert_eq!(call.param("type"), Some("public"));
}
