//! `igfeed verify`: credential sanity checks plus two live Graph API calls.

use igfeed_core::{Credentials, FeedConfig};
use igfeed_scraper::{FeedError, GraphApiClient};

/// Long-lived tokens are well over this length; anything shorter is almost
/// certainly truncated.
const MIN_TOKEN_LEN: usize = 50;

const CAPTION_PREVIEW_CHARS: usize = 50;

/// Static checks that do not need the network.
pub(crate) fn credential_warnings(credentials: &Credentials) -> Vec<String> {
    let mut warnings = Vec::new();
    if credentials.access_token.len() < MIN_TOKEN_LEN {
        warnings.push(format!(
            "access token is only {} characters; it may be truncated",
            credentials.access_token.len()
        ));
    }
    if !credentials.user_id.chars().all(|c| c.is_ascii_digit()) {
        warnings.push(format!(
            "user id \"{}\" is not numeric; use the numeric Instagram account id",
            credentials.user_id
        ));
    }
    warnings
}

pub(crate) fn caption_preview(caption: Option<&str>) -> String {
    match caption {
        Some(text) if !text.is_empty() => {
            let preview: String = text.chars().take(CAPTION_PREVIEW_CHARS).collect();
            if preview.len() < text.len() {
                format!("{preview}...")
            } else {
                preview
            }
        }
        _ => "No caption".to_owned(),
    }
}

/// # Errors
///
/// Returns an error when credentials are missing or either API call fails.
pub(crate) async fn run_verify(config: &FeedConfig) -> anyhow::Result<()> {
    let Some(credentials) = config.credentials.clone() else {
        println!("Instagram API credentials are not configured.");
        println!("Set INSTAGRAM_ACCESS_TOKEN and INSTAGRAM_USER_ID (e.g. in .env).");
        anyhow::bail!("missing Instagram API credentials");
    };

    println!("access token: {} characters", credentials.access_token.len());
    println!("user id: {}", credentials.user_id);
    for warning in credential_warnings(&credentials) {
        println!("warning: {warning}");
    }

    let api = GraphApiClient::new(
        credentials,
        config.api_timeout_secs,
        &config.api_user_agent,
        &config.graph_api_base_url,
    )?;

    let account = api.fetch_account().await.map_err(report)?;
    println!(
        "account: @{} (id {})",
        account.username.as_deref().unwrap_or("unknown"),
        account.id
    );

    let media = api.fetch_media(1).await.map_err(report)?;
    match media.first() {
        Some(post) => {
            println!("sample post:");
            println!("  id: {}", post.id);
            println!("  type: {}", post.media_type.as_deref().unwrap_or("unknown"));
            println!("  caption: {}", caption_preview(post.caption.as_deref()));
            println!("  permalink: {}", post.permalink.as_deref().unwrap_or("-"));
        }
        None => println!("no media returned for this account"),
    }

    println!("credentials OK");
    Ok(())
}

fn report(error: FeedError) -> anyhow::Error {
    if error.is_expired_token() {
        println!("The access token is invalid or has expired. Generate a new long-lived token.");
    }
    anyhow::Error::new(error).context("Graph API check failed")
}
