//! Unit tests for Netlify and webhook payload models.

use mattermost_netlify::models::netlify::{
    format_netlify_date, Account, Build, Hook, Site, BOT_BUILD_HOOK_TITLE,
};
use mattermost_netlify::models::webhook::{DeployEvent, DeployEventKind};

#[test]
fn site_tolerates_null_fields() {
    let site: Site = serde_json::from_value(serde_json::json!({
        "id": "s1",
        "name": "docs",
        "url": null,
        "custom_domain": null,
        "build_settings": null
    }))
    .expect("site");

    assert_eq!(site.id, "s1");
    assert!(site.url.is_empty());
    assert!(site.custom_domain.is_empty());
    assert_eq!(site.branch(), "");
    assert_eq!(site.repo_url(), "");
}

#[test]
fn site_exposes_repository_settings() {
    let site: Site = serde_json::from_value(serde_json::json!({
        "id": "s1",
        "name": "docs",
        "build_settings": { "repo_url": "https://github.com/acme/docs", "repo_branch": "main" },
        "unknown_field": 42
    }))
    .expect("site");

    assert_eq!(site.branch(), "main");
    assert_eq!(site.repo_url(), "https://github.com/acme/docs");
}

#[test]
fn account_reads_type_field() {
    let account: Account = serde_json::from_value(serde_json::json!({
        "id": "a1",
        "name": "Jane",
        "type": "starter",
        "type_name": "Starter",
        "roles_allowed": null
    }))
    .expect("account");

    assert_eq!(account.account_type, "starter");
    assert!(account.roles_allowed.is_empty());
}

#[test]
fn only_clean_finished_builds_are_restorable() {
    let ok = Build {
        deploy_id: "d1".into(),
        done: true,
        ..Build::default()
    };
    let running = Build {
        done: false,
        ..ok.clone()
    };
    let failed = Build {
        error: "boom".into(),
        ..ok.clone()
    };
    let no_deploy = Build {
        deploy_id: String::new(),
        ..ok.clone()
    };

    assert!(ok.is_restorable());
    assert!(!running.is_restorable());
    assert!(!failed.is_restorable());
    assert!(!no_deploy.is_restorable());
}

#[test]
fn url_hook_serializes_netlify_shape() {
    let hook = Hook::url_hook("s1", "deploy_created", "https://bridge/webhook");
    let body = serde_json::to_value(&hook).expect("json");
    assert_eq!(
        body,
        serde_json::json!({
            "site_id": "s1",
            "type": "url",
            "event": "deploy_created",
            "data": { "url": "https://bridge/webhook" }
        })
    );
}

#[test]
fn netlify_dates_render_in_utc() {
    assert_eq!(
        format_netlify_date("2026-03-04T07:06:07.890+02:00").as_deref(),
        Some("04 Mar 26 05:06 UTC")
    );
    assert_eq!(format_netlify_date(""), None);
    assert_eq!(format_netlify_date("yesterday"), None);
}

#[test]
fn event_kinds_parse_from_header() {
    assert_eq!(
        DeployEventKind::from_header("deploy_building"),
        Some(DeployEventKind::Building)
    );
    assert_eq!(
        DeployEventKind::from_header(" deploy_failed "),
        Some(DeployEventKind::Failed)
    );
    assert_eq!(DeployEventKind::from_header("deploy_locked"), None);

    let names: Vec<_> = DeployEventKind::ALL.iter().map(|k| k.as_str()).collect();
    assert_eq!(names, vec!["deploy_building", "deploy_created", "deploy_failed"]);
}

#[test]
fn deploy_event_builds_log_url() {
    let event: DeployEvent = serde_json::from_value(serde_json::json!({
        "name": "docs",
        "build_id": "b1",
        "admin_url": "https://app.netlify.com/sites/docs",
        "error_message": null
    }))
    .expect("event");

    assert_eq!(event.build_log_url(), "https://app.netlify.com/sites/docs/deploys/b1");
    assert!(event.error_message.is_none());
}

#[test]
fn bot_hook_title_is_stable() {
    assert_eq!(BOT_BUILD_HOOK_TITLE, "Mattermost Netlify Bot");
}
