//! Unit tests for credential loading from the environment.
//!
//! The keychain service `mattermost-netlify` is absent in test
//! environments, so every lookup falls through to env vars. These tests
//! mutate process-global env vars and must run serially.

use mattermost_netlify::config::GlobalConfig;

const TOML: &str = r#"
public_url = "https://bridge.example.com"

[mattermost]
server_url = "https://chat.example.com"

[netlify]
client_id = "client-123"
"#;

const ALL_VARS: [&str; 5] = [
    "MATTERMOST_BOT_TOKEN",
    "MATTERMOST_COMMAND_TOKEN",
    "NETLIFY_CLIENT_SECRET",
    "NETLIFY_ENCRYPTION_KEY",
    "NETLIFY_WEBHOOK_SECRET",
];

fn clear_env() {
    for var in ALL_VARS {
        std::env::remove_var(var);
    }
}

fn set_required_env() {
    std::env::set_var("MATTERMOST_BOT_TOKEN", "bot-token");
    std::env::set_var("MATTERMOST_COMMAND_TOKEN", "command-token");
    std::env::set_var("NETLIFY_CLIENT_SECRET", "client-secret");
    std::env::set_var("NETLIFY_ENCRYPTION_KEY", "encryption-key");
}

#[tokio::test]
#[serial_test::serial]
async fn env_vars_populate_credentials() {
    clear_env();
    set_required_env();
    std::env::set_var("NETLIFY_WEBHOOK_SECRET", "hook-secret");

    let mut config = GlobalConfig::from_toml_str(TOML).expect("config");
    config.load_credentials().await.expect("credentials load");

    assert_eq!(config.mattermost.bot_token, "bot-token");
    assert_eq!(config.mattermost.command_token, "command-token");
    assert_eq!(config.netlify.client_secret, "client-secret");
    assert_eq!(config.encryption_key, "encryption-key");
    assert_eq!(config.webhook_secret, "hook-secret");

    clear_env();
}

#[tokio::test]
#[serial_test::serial]
async fn webhook_secret_is_optional() {
    clear_env();
    set_required_env();

    let mut config = GlobalConfig::from_toml_str(TOML).expect("config");
    config.load_credentials().await.expect("credentials load");
    assert!(config.webhook_secret.is_empty());

    clear_env();
}

#[tokio::test]
#[serial_test::serial]
async fn missing_encryption_key_names_the_env_var() {
    clear_env();
    set_required_env();
    std::env::remove_var("NETLIFY_ENCRYPTION_KEY");

    let mut config = GlobalConfig::from_toml_str(TOML).expect("config");
    let err = config.load_credentials().await.expect_err("must fail");
    let message = err.to_string();
    assert!(message.starts_with("config:"), "{message}");
    assert!(message.contains("NETLIFY_ENCRYPTION_KEY"), "{message}");

    clear_env();
}

#[tokio::test]
#[serial_test::serial]
async fn empty_env_var_counts_as_missing() {
    clear_env();
    set_required_env();
    std::env::set_var("MATTERMOST_BOT_TOKEN", "");

    let mut config = GlobalConfig::from_toml_str(TOML).expect("config");
    let err = config.load_credentials().await.expect_err("must fail");
    assert!(err.to_string().contains("MATTERMOST_BOT_TOKEN"));

    clear_env();
}
