//! Integration tests for `/netlify disconnect` and its confirmation buttons.

use reqwest::StatusCode;
use serde_json::json;

use mattermost_netlify::mattermost::messages;

use super::test_helpers::{spawn_app, USER_ID};

fn button(secret: &str, action: &str) -> serde_json::Value {
    json!({ "action": action, "actionSecret": secret })
}

#[tokio::test]
async fn disconnect_command_shows_confirmation() {
    let app = spawn_app().await;
    app.connect_user(USER_ID).await;

    let (_, body) = app.slash(USER_ID, "disconnect").await;
    let attachment = &body["props"]["attachments"][0];
    assert_eq!(attachment["title"], "Disconnect Netlify plugin");

    let actions = attachment["actions"].as_array().expect("actions");
    assert_eq!(actions.len(), 2);
    assert_eq!(actions[0]["integration"]["context"]["action"], "disconnect");
    assert_eq!(actions[1]["integration"]["context"]["action"], "cancel");
    assert_eq!(
        actions[0]["integration"]["url"],
        format!("{}/command/disconnect", app.url)
    );

    // Nothing is removed until the button is pressed.
    assert!(app.state.tokens.get(USER_ID).await.expect("read").is_some());
}

#[tokio::test]
async fn confirm_removes_token() {
    let app = spawn_app().await;
    app.connect_user(USER_ID).await;

    let (status, body) = app
        .action("disconnect", USER_ID, button(&app.secret(), "disconnect"))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["update"]["message"], messages::disconnected("/netlify"));
    assert!(app.state.tokens.get(USER_ID).await.expect("read").is_none());

    let (_, body) = app.slash(USER_ID, "list").await;
    assert_eq!(body["text"], messages::not_connected("/netlify"));
}

#[tokio::test]
async fn cancel_keeps_token() {
    let app = spawn_app().await;
    app.connect_user(USER_ID).await;

    let (_, body) = app
        .action("disconnect", USER_ID, button(&app.secret(), "cancel"))
        .await;
    assert_eq!(body["update"]["message"], messages::DISCONNECT_CANCELLED);
    assert!(app.state.tokens.get(USER_ID).await.expect("read").is_some());
}

#[tokio::test]
async fn confirm_without_connection_is_reported() {
    let app = spawn_app().await;

    let (_, body) = app
        .action("disconnect", USER_ID, button(&app.secret(), "disconnect"))
        .await;
    assert_eq!(body["ephemeral_text"], messages::not_connected("/netlify"));
}

#[tokio::test]
async fn forged_secret_does_not_disconnect() {
    let app = spawn_app().await;
    app.connect_user(USER_ID).await;

    let (_, body) = app
        .action("disconnect", USER_ID, button("forged", "disconnect"))
        .await;
    assert_eq!(body["ephemeral_text"], messages::AUTHENTICATION_FAILED);
    assert!(app.state.tokens.get(USER_ID).await.expect("read").is_some());
}

#[tokio::test]
async fn unknown_button_is_bad_request() {
    let app = spawn_app().await;
    app.connect_user(USER_ID).await;

    let (status, _) = app
        .action("disconnect", USER_ID, button(&app.secret(), "explode"))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let ephemerals = app.upstream.ephemerals();
    let replaced = ephemerals.last().expect("prompt replaced");
    assert_eq!(replaced["user_id"], USER_ID);
    assert_eq!(replaced["post"]["id"], "post-1");
    assert_eq!(replaced["post"]["message"], messages::DISCONNECT_DISMISSED);
    assert!(replaced["post"].get("props").is_none());
    assert!(app.state.tokens.get(USER_ID).await.expect("token").is_some());
}
