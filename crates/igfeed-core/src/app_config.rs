use std::path::PathBuf;

/// Graph API credentials. Present only when both halves are configured.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub access_token: String,
    pub user_id: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("access_token", &"[redacted]")
            .field("user_id", &self.user_id)
            .finish()
    }
}

/// Everything one pipeline run needs, resolved up front.
#[derive(Clone)]
pub struct FeedConfig {
    pub credentials: Option<Credentials>,
    pub username: String,
    pub output_path: PathBuf,
    pub images_dir: PathBuf,
    /// Site-relative directory written into `local_image`, e.g. `instagram`.
    pub image_public_prefix: String,
    pub download_images: bool,
    pub max_posts: usize,
    pub scrape_timeout_secs: u64,
    pub api_timeout_secs: u64,
    pub api_user_agent: String,
    pub graph_api_base_url: String,
    pub profile_base_url: String,
    pub log_level: String,
}

impl FeedConfig {
    /// `true` when the Graph API path will be taken.
    #[must_use]
    pub fn api_configured(&self) -> bool {
        self.credentials.is_some()
    }
}

impl std::fmt::Debug for FeedConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FeedConfig")
            .field("credentials", &self.credentials)
            .field("username", &self.username)
            .field("output_path", &self.output_path)
            .field("images_dir", &self.images_dir)
            .field("image_public_prefix", &self.image_public_prefix)
            .field("download_images", &self.download_images)
            .field("max_posts", &self.max_posts)
            .field("scrape_timeout_secs", &self.scrape_timeout_secs)
            .field("api_timeout_secs", &self.api_timeout_secs)
            .field("api_user_agent", &self.api_user_agent)
            .field("graph_api_base_url", &self.graph_api_base_url)
            .field("profile_base_url", &self.profile_base_url)
            .field("log_level", &self.log_level)
            .finish()
    }
}
