use crate::app_config::{Credentials, FeedConfig};
use crate::feed::MAX_POSTS_CEILING;
use crate::ConfigError;

/// Values left over from the setup template; treated as "not configured".
const TOKEN_PLACEHOLDER: &str = "YOUR_ACCESS_TOKEN_HERE";
const USER_ID_PLACEHOLDER: &str = "YOUR_USER_ID_HERE";

/// Load feed configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but cannot be parsed.
pub fn load_feed_config() -> Result<FeedConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_feed_config_from_env()
}

/// Load feed configuration from environment variables already in the process.
///
/// Unlike [`load_feed_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but cannot be parsed.
pub fn load_feed_config_from_env() -> Result<FeedConfig, ConfigError> {
    build_feed_config(|key| std::env::var(key))
}

/// Build feed configuration using the provided env-var lookup function.
///
/// Decoupled from the real environment so tests can use a `HashMap` lookup.
fn build_feed_config<F>(lookup: F) -> Result<FeedConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_timeout = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let invalid = |reason: String| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason,
        };
        let secs = or_default(var, default)
            .trim()
            .parse::<u64>()
            .map_err(|e| invalid(e.to_string()))?;
        if secs == 0 {
            return Err(invalid("must be at least 1 second".to_string()));
        }
        Ok(secs)
    };

    let parse_bool = |var: &str, default: &str| -> Result<bool, ConfigError> {
        let raw = or_default(var, default);
        parse_flag(&raw).ok_or_else(|| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: format!("expected true/false, got \"{raw}\""),
        })
    };

    let optional = |var: &str, placeholder: &str| -> Option<String> {
        lookup(var)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty() && v != placeholder)
    };

    let access_token = optional("INSTAGRAM_ACCESS_TOKEN", TOKEN_PLACEHOLDER);
    let user_id = optional("INSTAGRAM_USER_ID", USER_ID_PLACEHOLDER);
    let credentials = match (access_token, user_id) {
        (Some(access_token), Some(user_id)) => Some(Credentials {
            access_token,
            user_id,
        }),
        _ => None,
    };

    let max_posts = parse_max_posts(&or_default("IGFEED_MAX_POSTS", "9"))?;

    Ok(FeedConfig {
        credentials,
        username: or_default("IGFEED_USERNAME", "dough_beats"),
        output_path: PathBuf::from(or_default("IGFEED_OUTPUT_PATH", "public/instagram.json")),
        images_dir: PathBuf::from(or_default("IGFEED_IMAGES_DIR", "public/instagram")),
        image_public_prefix: or_default("IGFEED_IMAGE_PUBLIC_PREFIX", "instagram")
            .trim_matches('/')
            .to_string(),
        download_images: parse_bool("IGFEED_DOWNLOAD_IMAGES", "true")?,
        max_posts,
        scrape_timeout_secs: parse_timeout("IGFEED_SCRAPE_TIMEOUT_SECS", "10")?,
        api_timeout_secs: parse_timeout("IGFEED_API_TIMEOUT_SECS", "15")?,
        api_user_agent: or_default("IGFEED_API_USER_AGENT", "igfeed/0.1 (instagram-feed-sync)"),
        graph_api_base_url: or_default("IGFEED_GRAPH_API_BASE_URL", "https://graph.instagram.com"),
        profile_base_url: or_default("IGFEED_PROFILE_BASE_URL", "https://www.instagram.com"),
        log_level: or_default("IGFEED_LOG_LEVEL", "info"),
    })
}

/// Parse `IGFEED_MAX_POSTS`, which must fall within `1..=MAX_POSTS_CEILING`.
fn parse_max_posts(raw: &str) -> Result<usize, ConfigError> {
    let invalid = |reason: String| ConfigError::InvalidEnvVar {
        var: "IGFEED_MAX_POSTS".to_string(),
        reason,
    };
    let value = raw
        .trim()
        .parse::<usize>()
        .map_err(|e| invalid(e.to_string()))?;
    if value == 0 || value > MAX_POSTS_CEILING {
        return Err(invalid(format!(
            "must be between 1 and {MAX_POSTS_CEILING}, got {value}"
        )));
    }
    Ok(value)
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
