pub mod fetch;

use std::net::SocketAddr;
use std::num::NonZeroUsize;
use std::time::Duration;

use clap::{Args, Parser, Subcommand};
use url::Url;

use crate::application::pages::DEFAULT_MAX_PAGES;
use crate::infrastructure::cat_api::{CAT_API_URL, DEFAULT_REQUEST_TIMEOUT};
use fetch::FetchCommand;

#[derive(Debug, Parser)]
#[command(author, version, about = "Show a random cat, and another one on request", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Run the HTTP server
    Serve(ServeCommand),

    /// Fetch one random cat image and print its URL
    Fetch(FetchCommand),
}

/// Where cat images come from and how long to wait for them.
#[derive(Debug, Clone, Args)]
pub struct CatApiArgs {
    #[arg(long, env = "CATVIEW_CAT_API_URL", default_value = CAT_API_URL)]
    pub cat_api_url: Url,

    #[arg(long, env = "CATVIEW_REQUEST_TIMEOUT_SECS", default_value_t = DEFAULT_REQUEST_TIMEOUT.as_secs())]
    pub request_timeout_secs: u64,
}

impl CatApiArgs {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

#[derive(Debug, Args)]
pub struct ServeCommand {
    #[arg(long, env = "CATVIEW_BIND_ADDRESS", default_value = "127.0.0.1:3000")]
    pub bind_address: SocketAddr,

    #[command(flatten)]
    pub cat_api: CatApiArgs,

    /// Number of live pages kept before the least recently used is dropped
    #[arg(long, env = "CATVIEW_MAX_PAGES", default_value_t = DEFAULT_MAX_PAGES)]
    pub max_pages: NonZeroUsize,
}

pub(crate) fn print_json<T>(value: &T) -> anyhow::Result<()>
where
    T: serde::Serialize,
{
    let rendered = serde_json::to_string_pretty(value)?;
    println!("{rendered}");
    Ok(())
}
