//! Unit tests for markdown message rendering.

use mattermost_netlify::mattermost::messages;
use mattermost_netlify::models::netlify::{Account, Build, BuildSettings, Site};

fn site() -> Site {
    Site {
        id: "site-1".into(),
        name: "docs".into(),
        url: "https://docs.netlify.app".into(),
        custom_domain: String::new(),
        account_name: "Acme".into(),
        updated_at: "2026-03-04T05:06:07.890Z".into(),
        build_settings: Some(BuildSettings {
            repo_url: "https://github.com/acme/docs".into(),
            repo_branch: "main".into(),
        }),
    }
}

#[test]
fn site_table_renders_detail_row() {
    let table = messages::site_table(&[site()], false);
    let mut lines = table.lines();
    assert!(lines.next().expect("header").starts_with("| Name | URL |"));
    lines.next().expect("separator");
    assert_eq!(
        lines.next().expect("row"),
        "| docs | https://docs.netlify.app | *none* | https://github.com/acme/docs | main | Acme | 04 Mar 26 05:06 UTC |"
    );
}

#[test]
fn site_table_uses_placeholders_for_missing_fields() {
    let bare = Site {
        id: "site-2".into(),
        ..Site::default()
    };
    let table = messages::site_table(&[bare], false);
    assert!(table.ends_with("| - | - | *none* | - | - | - | *failed to obtain* |"));
}

#[test]
fn id_table_lists_names_and_ids() {
    let table = messages::site_table(&[site()], true);
    assert!(table.starts_with("| Name | Site ID |"));
    assert!(table.ends_with("| docs | site-1 |"));
}

#[test]
fn account_details_include_every_field() {
    let account = Account {
        id: "acc-1".into(),
        name: "Jane".into(),
        billing_email: "jane@example.com".into(),
        account_type: "starter".into(),
        type_name: "Starter".into(),
        roles_allowed: vec!["Owner".into(), "Collaborator".into()],
        created_at: "2020-01-02T03:04:05.000Z".into(),
        updated_at: "garbage".into(),
    };
    let text = messages::account_details(&account);
    assert!(text.contains("*Name* : **Jane**"));
    assert!(text.contains("*Email* : **jane@example.com**"));
    assert!(text.contains("*Account Type* : **starter** - **Starter**"));
    assert!(text.contains("*Roles allowed* : Owner Collaborator"));
    assert!(text.contains("*Created at* : 02 Jan 20 03:04 UTC"));
    assert!(text.contains("*Last updated* : not available"));
}

#[test]
fn build_table_numbers_rows_from_one() {
    let builds = vec![
        Build {
            deploy_id: "d1".into(),
            sha: "abc123".into(),
            done: true,
            created_at: "2026-01-01T00:00:00.000Z".into(),
            ..Build::default()
        },
        Build {
            deploy_id: "d2".into(),
            done: true,
            ..Build::default()
        },
    ];
    let table = messages::build_table("docs", &builds);
    assert!(table.starts_with(":chains: List of latest 2 releases of **docs** Netlify site"));
    assert!(table.contains("| Sequence | Commit | Deployed at | Deploy ID |"));
    assert!(table.contains("| 1 | abc123 | 01 Jan 26 00:00 UTC | d1 |"));
    assert!(table.ends_with("| 2 | - | - | d2 |"));
}

#[test]
fn unknown_command_echoes_the_action() {
    assert_eq!(
        messages::unknown_command("/netlify", "frobnicate"),
        "Unknown command `/netlify frobnicate`\nTo see list of commands type `/netlify help`"
    );
}

#[test]
fn command_hints_follow_the_configured_trigger() {
    for message in [
        messages::not_connected("/nf"),
        messages::one_site_only("/nf"),
        messages::disconnected("/nf"),
        messages::welcome("/nf"),
        messages::unknown_command("/nf", "x"),
    ] {
        assert!(message.contains("`/nf "), "{message}");
        assert!(!message.contains("/netlify"), "{message}");
    }
}

#[test]
fn help_lists_commands_with_base_command() {
    let help = messages::help_text("/netlify");
    for command in [
        "connect",
        "disconnect",
        "list id",
        "me",
        "deploy",
        "rollback",
        "subscribe",
        "unsubscribe",
    ] {
        assert!(help.contains(&format!("`/netlify {command}")), "{command}");
    }
}

#[test]
fn deploy_announcement_names_branch_and_site() {
    assert_eq!(
        messages::deploy_requested("docs", "main"),
        ":satellite: Mattermost Netlify Bot has successfully asked Netlify to deploy **main** branch of **docs** site."
    );
}
