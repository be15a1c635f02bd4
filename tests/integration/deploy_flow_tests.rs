//! Integration tests for `/netlify deploy` and the deploy site picker.

use reqwest::StatusCode;
use serde_json::json;

use mattermost_netlify::mattermost::messages;
use mattermost_netlify::models::netlify::BOT_BUILD_HOOK_TITLE;

use super::test_helpers::{site, spawn_app, CHANNEL_ID, NETLIFY_TOKEN, USER_ID};

#[tokio::test]
async fn deploy_by_id_creates_hook_and_triggers_build() {
    let app = spawn_app().await;
    app.connect_user(USER_ID).await;
    app.upstream
        .with(|data| data.sites = vec![site("s1", "docs", "main")]);

    let (status, body) = app.slash(USER_ID, "deploy s1").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.get("text").is_none(), "unexpected reply: {body}");

    let ephemerals = app.upstream.ephemerals();
    assert_eq!(ephemerals.len(), 1);
    assert_eq!(ephemerals[0]["user_id"], USER_ID);
    assert_eq!(
        ephemerals[0]["post"]["message"],
        messages::preparing_deploy("docs", "main")
    );

    let created = app
        .upstream
        .requests_to("POST", "/api/v1/sites/s1/build_hooks");
    assert_eq!(created.len(), 1);
    assert_eq!(
        created[0].body,
        json!({ "title": BOT_BUILD_HOOK_TITLE, "branch": "main" })
    );

    let triggered = app.upstream.requests_to("POST", "/build_hooks/bh-new");
    assert_eq!(triggered.len(), 1);
    assert!(triggered[0].query.contains("trigger_branch=main"));
    assert!(triggered[0].query.contains("trigger_title=Deploy"));

    assert_eq!(
        app.upstream.post_messages(),
        vec![messages::deploy_requested("docs", "main")]
    );
}

#[tokio::test]
async fn deploy_reuses_existing_bot_hook() {
    let app = spawn_app().await;
    app.connect_user(USER_ID).await;
    let hook_url = format!("{}/build_hooks/bh-old", app.upstream.url);
    app.upstream.with(|data| {
        data.sites = vec![site("s1", "docs", "main")];
        data.build_hooks = vec![
            json!({ "id": "other", "title": "CI", "branch": "main", "url": "http://127.0.0.1:1/never" }),
            json!({ "id": "bh-old", "title": BOT_BUILD_HOOK_TITLE, "branch": "main", "url": hook_url }),
        ];
    });

    app.slash(USER_ID, "deploy s1").await;

    assert!(app
        .upstream
        .requests_to("POST", "/api/v1/sites/s1/build_hooks")
        .is_empty());
    assert_eq!(app.upstream.requests_to("POST", "/build_hooks/bh-old").len(), 1);
}

#[tokio::test]
async fn netlify_calls_carry_user_token_and_hook_call_does_not() {
    let app = spawn_app().await;
    app.connect_user(USER_ID).await;
    app.upstream
        .with(|data| data.sites = vec![site("s1", "docs", "main")]);

    app.slash(USER_ID, "deploy s1").await;

    let site = app.upstream.requests_to("GET", "/api/v1/sites/s1");
    assert_eq!(site[0].authorization, format!("Bearer {NETLIFY_TOKEN}"));
    let trigger = app.upstream.requests_to("POST", "/build_hooks/bh-new");
    assert!(trigger[0].authorization.is_empty());

    let posts = app.upstream.requests_to("POST", "/api/v4/posts");
    assert_eq!(posts[0].authorization, "Bearer bot-token");
}

#[tokio::test]
async fn deploy_without_site_offers_picker_with_branch() {
    let app = spawn_app().await;
    app.connect_user(USER_ID).await;
    app.upstream
        .with(|data| data.sites = vec![site("s1", "docs", "main")]);

    let (_, body) = app.slash(USER_ID, "deploy").await;
    let action = &body["props"]["attachments"][0]["actions"][0];
    assert_eq!(action["options"][0]["value"], "s1 docs main");
    assert_eq!(
        action["integration"]["url"],
        format!("{}/command/deploy", app.url)
    );
}

#[tokio::test]
async fn deploy_with_several_sites_is_refused() {
    let app = spawn_app().await;
    app.connect_user(USER_ID).await;

    let (_, body) = app.slash(USER_ID, "deploy s1 s2").await;
    assert_eq!(body["text"], messages::one_site_only("/netlify"));
    assert!(app.upstream.requests_to("GET", "/api/v1/sites/s1").is_empty());
}

#[tokio::test]
async fn deploy_of_unknown_site_reports_failure() {
    let app = spawn_app().await;
    app.connect_user(USER_ID).await;

    let (_, body) = app.slash(USER_ID, "deploy missing").await;
    let text = body["text"].as_str().expect("text");
    assert!(text.starts_with(":exclamation: Failed to get site details"));
    assert!(app.upstream.posts().is_empty());
}

#[tokio::test]
async fn failing_trigger_is_reported() {
    let app = spawn_app().await;
    app.connect_user(USER_ID).await;
    app.upstream
        .with(|data| data.sites = vec![site("s1", "docs", "main")]);
    app.upstream.fail("POST", "/build_hooks/bh-new");

    let (_, body) = app.slash(USER_ID, "deploy s1").await;
    let text = body["text"].as_str().expect("text");
    assert!(text.starts_with(":exclamation: Failed to deploy **docs** site"));
    assert!(app.upstream.posts().is_empty());
}

#[tokio::test]
async fn picker_selection_deploys_and_updates_post() {
    let app = spawn_app().await;
    app.connect_user(USER_ID).await;

    let (status, body) = app
        .action("deploy", USER_ID, app.selection("s1 docs main"))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["update"]["message"],
        messages::preparing_deploy("docs", "main")
    );
    assert!(body.get("ephemeral_text").is_none());

    assert_eq!(app.upstream.requests_to("POST", "/build_hooks/bh-new").len(), 1);
    let posts = app.upstream.posts();
    assert_eq!(posts.len(), 1);
    assert_eq!(posts[0]["channel_id"], CHANNEL_ID);
}

#[tokio::test]
async fn picker_selection_failure_adds_ephemeral_note() {
    let app = spawn_app().await;
    app.connect_user(USER_ID).await;
    app.upstream.fail("GET", "/api/v1/sites/s1/build_hooks");

    let (_, body) = app
        .action("deploy", USER_ID, app.selection("s1 docs main"))
        .await;
    assert_eq!(
        body["update"]["message"],
        messages::preparing_deploy("docs", "main")
    );
    let note = body["ephemeral_text"].as_str().expect("ephemeral");
    assert!(note.starts_with(":exclamation: Failed to deploy **docs** site"));
}

#[tokio::test]
async fn incomplete_selection_is_rejected() {
    let app = spawn_app().await;
    app.connect_user(USER_ID).await;

    let (_, body) = app.action("deploy", USER_ID, app.selection("s1 docs")).await;
    assert_eq!(body["ephemeral_text"], messages::EMPTY_SELECTION);
    assert!(app.upstream.requests_to("POST", "/build_hooks/bh-new").is_empty());
}
