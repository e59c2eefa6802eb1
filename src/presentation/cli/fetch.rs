use anyhow::{Context, Result};
use clap::Args;

use super::{CatApiArgs, print_json};
use crate::domain::sources::ImageSource;
use crate::infrastructure::cat_api::CatApiClient;

#[derive(Debug, Args)]
pub struct FetchCommand {
    #[command(flatten)]
    pub cat_api: CatApiArgs,

    /// Print the image as JSON instead of a bare URL
    #[arg(long)]
    pub json: bool,
}

pub async fn run(cmd: FetchCommand) -> Result<()> {
    let client =
        CatApiClient::with_timeout(cmd.cat_api.cat_api_url.clone(), cmd.cat_api.request_timeout())
            .context("failed to build cat API client")?;

    let image = client
        .fetch_image()
        .await
        .context("failed to fetch a cat image")?;

    if cmd.json {
        print_json(&image)
    } else {
        println!("{}", image.url);
        Ok(())
    }
}
