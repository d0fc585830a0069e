mod fetch;
mod show;
mod verify;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "igfeed")]
#[command(about = "Instagram feed sync for the Dough & Beats site")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Fetch posts and write the feed document
    Fetch {
        /// Instagram username (defaults to IGFEED_USERNAME)
        username: Option<String>,

        /// Where to write the feed JSON
        #[arg(long)]
        output: Option<PathBuf>,

        /// Number of posts to keep (1-9)
        #[arg(long, value_parser = clap::value_parser!(u8).range(1..=9))]
        max_posts: Option<u8>,

        /// Skip downloading images into the local image directory
        #[arg(long)]
        no_images: bool,
    },
    /// Check the Graph API credentials against the live API
    Verify,
    /// Print the feed as the site would render it
    Show {
        /// Feed JSON to read (defaults to IGFEED_OUTPUT_PATH)
        #[arg(long)]
        path: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = igfeed_core::load_feed_config()?;

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    match cli.command {
        Commands::Fetch {
            username,
            output,
            max_posts,
            no_images,
        } => {
            let overrides = fetch::FetchOverrides {
                username,
                output,
                max_posts: max_posts.map(usize::from),
                no_images,
            };
            fetch::run_fetch(config, overrides).await
        }
        Commands::Verify => verify::run_verify(&config).await,
        Commands::Show { path } => {
            let path = path.unwrap_or_else(|| config.output_path.clone());
            show::run_show(&path);
            Ok(())
        }
    }
}
