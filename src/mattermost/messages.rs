//! Markdown messages shown to users.

use std::fmt::Write as _;

use crate::models::netlify::{format_netlify_date, Account, Build, Site};

/// Reply when a command needs a connected account.
#[must_use]
pub fn not_connected(base_command: &str) -> String {
    format!("You must connect your Netlify account first.\nPlease run `{base_command} connect`")
}

/// Reply when an interactive callback carries the wrong secret.
pub const AUTHENTICATION_FAILED: &str = ":exclamation: Authentication failed";

/// Reply when a dropdown selection is incomplete.
pub const EMPTY_SELECTION: &str =
    ":exclamation: One of more values while selecting from dropdown were empty";

/// Reply when `deploy` gets more than one site.
#[must_use]
pub fn one_site_only(base_command: &str) -> String {
    format!(
        ":warning: Please mention only one site id for a command.\n\
         Eg. `{base_command} deploy <site id>` , for more details run help command"
    )
}

/// Reply when the user has no sites.
pub const NO_SITES: &str = "You don't seem to have any Netlify sites";

/// Post update after a confirmed disconnect.
#[must_use]
pub fn disconnected(base_command: &str) -> String {
    format!(
        ":zzz: Mattermost Netlify plugin is now disconnected\n\
         If you ever want to connect again, just run `{base_command} connect`"
    )
}

/// Post update after a cancelled disconnect.
pub const DISCONNECT_CANCELLED: &str =
    ":relieved: Netlify is still connected with your Mattermost account";

/// Replaces a disconnect prompt that received an unknown action.
pub const DISCONNECT_DISMISSED: &str = "This disconnect prompt is no longer valid.";

/// Welcome message sent by DM after a successful connection, help included.
#[must_use]
pub fn welcome(base_command: &str) -> String {
    format!(
        "#### Welcome to the Mattermost Netlify Plugin!\n\
         You've successfully connected your Mattermost account on Netlify.\n\n\
         ##### Notifications\n\
         Run `{base_command} subscribe` in a channel to receive build notifications of a site there.\n\
         ##### Slash Commands\n{}",
        help_text(base_command)
    )
}

const SITE_LIST_HEADER: &str = "| Name | URL | Custom domain | Repository | Branch | Team | Last updated |\n\
     |:-----|:----|:--------------|:-----------|:-------|:-----|:-------------|";

const SITE_ID_LIST_HEADER: &str = "| Name | Site ID |\n|:-----|:--------|";

const BUILD_LIST_HEADER: &str = "| Sequence | Commit | Deployed at | Deploy ID |\n\
     |:---------|:-------|:------------|:----------|";

/// Help text listing every command.
#[must_use]
pub fn help_text(base_command: &str) -> String {
    let commands = [
        ("connect", "Connect your Mattermost account with Netlify"),
        ("disconnect", "Disconnect your Netlify account"),
        ("list", "List all sites with their details"),
        ("list id", "List all sites with their IDs"),
        ("me", "Show details of the connected Netlify account"),
        ("deploy", "Pick a site and deploy its production branch"),
        ("deploy <site id>", "Deploy the production branch of a site"),
        ("rollback", "Pick a site and restore one of its recent deploys"),
        ("subscribe", "Receive build notifications of a site in this channel"),
        ("unsubscribe", "Stop build notifications of a site"),
        ("help", "Show this message"),
    ];

    let mut text = String::from("###### Mattermost Netlify Plugin - Slash Command Help\n");
    for (command, description) in commands {
        let _ = writeln!(text, "* `{base_command} {command}` - {description}");
    }
    text
}

/// Reply for an unrecognised action.
#[must_use]
pub fn unknown_command(base_command: &str, action: &str) -> String {
    format!(
        "Unknown command `{base_command} {action}`\nTo see list of commands type `{base_command} help`"
    )
}

/// Connect link carrying a freshly issued state.
#[must_use]
pub fn connect_link(connect_url: &str) -> String {
    format!("[Click here to connect your Netlify account with Mattermost.]({connect_url})")
}

fn or_dash(value: &str) -> &str {
    if value.is_empty() {
        "-"
    } else {
        value
    }
}

/// Markdown table of sites; `ids_only` limits it to names and IDs.
#[must_use]
pub fn site_table(sites: &[Site], ids_only: bool) -> String {
    let mut table = String::from(if ids_only {
        SITE_ID_LIST_HEADER
    } else {
        SITE_LIST_HEADER
    });

    for site in sites {
        table.push('\n');
        if ids_only {
            let _ = write!(table, "| {} | {} |", or_dash(&site.name), or_dash(&site.id));
            continue;
        }

        let custom_domain = if site.custom_domain.is_empty() {
            "*none*"
        } else {
            site.custom_domain.as_str()
        };
        let last_updated =
            format_netlify_date(&site.updated_at).unwrap_or_else(|| "*failed to obtain*".into());
        let _ = write!(
            table,
            "| {} | {} | {} | {} | {} | {} | {} |",
            or_dash(&site.name),
            or_dash(&site.url),
            custom_domain,
            or_dash(site.repo_url()),
            or_dash(site.branch()),
            or_dash(&site.account_name),
            last_updated,
        );
    }
    table
}

/// Account details for `/netlify me`.
#[must_use]
pub fn account_details(account: &Account) -> String {
    let created =
        format_netlify_date(&account.created_at).unwrap_or_else(|| "not available".into());
    let updated =
        format_netlify_date(&account.updated_at).unwrap_or_else(|| "not available".into());
    format!(
        "Details of Netlify account attached with Mattermost:\n\
         ***\n\
         ### Primary details\n\
         *Name* : **{}**\n\
         *Email* : **{}**\n\
         *Account Type* : **{}** - **{}**\n\n\
         ### Misc details\n\
         *ID* : {}\n\
         *Roles allowed* : {}\n\
         *Created at* : {created}\n\
         *Last updated* : {updated}\n\
         ***",
        account.name,
        account.billing_email,
        account.account_type,
        account.type_name,
        account.id,
        account.roles_allowed.join(" "),
    )
}

/// Numbered table of restorable builds.
#[must_use]
pub fn build_table(site_name: &str, builds: &[Build]) -> String {
    let mut table = format!(
        ":chains: List of latest {} releases of **{site_name}** Netlify site\n{BUILD_LIST_HEADER}",
        builds.len()
    );
    for (index, build) in builds.iter().enumerate() {
        let deployed_at =
            format_netlify_date(&build.created_at).unwrap_or_else(|| "-".into());
        let _ = write!(
            table,
            "\n| {} | {} | {} | {} |",
            index + 1,
            or_dash(&build.sha),
            deployed_at,
            build.deploy_id,
        );
    }
    table
}

/// Announcement before a deploy starts.
#[must_use]
pub fn preparing_deploy(site_name: &str, branch: &str) -> String {
    format!(":loudspeaker: Mattermost Netlify Bot is preparing to deploy **{branch}** branch of **{site_name}** site.")
}

/// Channel announcement after a deploy was requested.
#[must_use]
pub fn deploy_requested(site_name: &str, branch: &str) -> String {
    format!(":satellite: Mattermost Netlify Bot has successfully asked Netlify to deploy **{branch}** branch of **{site_name}** site.")
}

/// Reply when a deploy could not be requested.
#[must_use]
pub fn deploy_failed(site_name: &str, error: &str) -> String {
    format!(":exclamation: Failed to deploy **{site_name}** site with Mattermost build hook.\n*Error : {error}*")
}

/// Post update while recent builds are fetched.
#[must_use]
pub fn fetching_builds(site_name: &str) -> String {
    format!(":one: Fetching list of 5 most recent deploys of **{site_name}** site.")
}

/// Reply when a site has nothing to roll back to.
#[must_use]
pub fn no_valid_deploys(site_name: &str) -> String {
    format!(":white-flag: There are no valid deploys with **{site_name}** site.")
}

/// Post update before a restore.
#[must_use]
pub fn preparing_rollback(site_name: &str, deploy_id: &str) -> String {
    format!(":two: Preparing to rollback {site_name} site to {deploy_id} deploy id state")
}

/// Channel announcement after a restore.
#[must_use]
pub fn rollback_requested(site_name: &str, deploy_id: &str) -> String {
    format!(
        ":satellite: Mattermost Netlify Bot has successfully asked Netlify to rollback **{site_name}** site \
         to a previously version by ID {deploy_id}.\n\
         *Since this is an update, you probably will not receive a build notification from Netlify.*"
    )
}

/// Post update once a site was picked from a dropdown.
#[must_use]
pub fn site_selected(site_name: &str) -> String {
    format!(":white_check_mark: Selected **{site_name}** site.")
}

/// Ephemeral note while hooks are being registered.
#[must_use]
pub fn subscribing(channel_name: &str, site_name: &str) -> String {
    format!(":hourglass: Hang on while subscribing is in progress for **{channel_name}** channel with **{site_name}** build notifications.")
}

/// Channel announcement for each hook created on Netlify.
#[must_use]
pub fn hook_created(event: &str, site_name: &str) -> String {
    format!(":fishing_pole_and_fish: Created a new webhook on Netlify of `{event}` for **{site_name}** site.")
}

/// Channel announcement after a subscription.
#[must_use]
pub fn subscribed(channel_name: &str, site_name: &str) -> String {
    format!(":star2:  Successfully subscribed **{channel_name}** for build notifications from **{site_name}** site.")
}

/// Reply when the channel was already subscribed.
#[must_use]
pub fn already_subscribed(channel_name: &str, site_name: &str) -> String {
    format!(":information_source: **{channel_name}** is already subscribed to build notifications from **{site_name}** site.")
}

/// Reply when some hooks could not be registered.
#[must_use]
pub fn subscription_incomplete(site_name: &str, failed_events: &[&str]) -> String {
    format!(
        ":warning: Subscription to **{site_name}** failed, could not create webhooks for `{}`. Try again later.",
        failed_events.join("`, `")
    )
}

/// Channel announcement after unsubscribing.
#[must_use]
pub fn unsubscribed(site_name: &str) -> String {
    format!(":mute: Build notifications of **{site_name}** site are now turned off.")
}

/// Generic failure reply for a Netlify call.
#[must_use]
pub fn netlify_failure(what: &str, error: &str) -> String {
    format!(":exclamation: Failed to {what}\n*Error : {error}*")
}
