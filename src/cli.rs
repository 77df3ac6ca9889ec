//! Command-line interface: argument parsing and the download pipeline.
//!
//! Product output (image links, download confirmations, rate limit lines) goes to
//! stdout; diagnostics go to stderr through `tracing`.

use std::fs;
use std::path::Path;

use clap::Parser;
use tracing::{debug, info, warn};

use crate::resolve::resolve;
use crate::{ClientId, Image, ImgurClient, ImgurError, RateLimit};

/// Download images from Imgur URLs using the Imgur API.
#[derive(Debug, Parser)]
#[command(name = "imgur-dl", version)]
pub struct Args {
    /// The Imgur URL(s) to download images from.
    #[arg(required = true)]
    pub urls: Vec<String>,

    /// Print the image links without downloading them.
    #[arg(short, long)]
    pub list: bool,

    /// Show the remaining request limit after each fetch.
    #[arg(short, long)]
    pub show_limits: bool,

    /// The Imgur API client ID.
    #[arg(short, long, env = "IMGUR_CLIENT_ID")]
    pub client_id: Option<String>,
}

/// Run the pipeline for every URL on the command line, in order.
///
/// Inputs are processed strictly one after another; a failure to resolve or fetch
/// any of them aborts the run. Individual images that cannot be downloaded are
/// logged and skipped without failing the whole run.
///
/// # Errors
///
/// - [`ImgurError::MissingClientId`] if neither `--client-id` nor `IMGUR_CLIENT_ID` is set
/// - [`ImgurError::InvalidInput`] if a URL cannot be resolved to a target
/// - [`ImgurError::FileWrite`] if downloaded bytes cannot be written to disk
/// - Any error returned by [`ImgurClient::fetch`]
pub async fn run(args: Args) -> Result<(), ImgurError> {
    let client_id = args.client_id.ok_or(ImgurError::MissingClientId)?;
    let client = ImgurClient::new(ClientId::new(client_id))?;

    for input in &args.urls {
        let target = resolve(input)?;
        debug!(
            "resolved {input} as {} {}",
            if target.is_album() { "album" } else { "image" },
            target.id()
        );

        let listing = client.fetch(&target).await?;

        if listing.images.is_empty() {
            info!("no images found for {}", target.id());
        } else if args.list {
            for image in &listing.images {
                println!("{}", image.link);
            }
        } else {
            download_images(&client, &listing.images, Path::new(".")).await?;
        }

        if args.show_limits {
            println!("{}", limits_line(listing.rate_limit.as_ref()));
        }
    }

    Ok(())
}

/// Download each image into `dest`, one at a time.
///
/// Images with unusable links or failed fetches are logged and skipped; a file
/// write failure is fatal.
async fn download_images(
    client: &ImgurClient,
    images: &[Image],
    dest: &Path,
) -> Result<(), ImgurError> {
    for image in images {
        let (url, file_name) = match image.download_target() {
            Ok(target) => target,
            Err(err) => {
                warn!("{err}; skipping");
                continue;
            }
        };

        let bytes = match client.download(url).await {
            Ok(bytes) => bytes,
            Err(err) => {
                warn!("failed to fetch {}: {err}; skipping", image.link);
                continue;
            }
        };

        write_image(dest, &file_name, &bytes)?;
        println!("Downloaded image: {file_name}");
    }

    Ok(())
}

// Colliding file names silently overwrite.
fn write_image(dest: &Path, file_name: &str, bytes: &[u8]) -> Result<(), ImgurError> {
    let path = dest.join(file_name);
    fs::write(&path, bytes).map_err(|source| ImgurError::FileWrite { path, source })
}

fn limits_line(rate_limit: Option<&RateLimit>) -> String {
    match rate_limit {
        Some(limit) => format!(
            "Remaining requests: {} of {}",
            limit.client_remaining, limit.client_limit
        ),
        None => "Failed to get rate limit information from response headers".to_string(),
    }
}

/// Process exit code for a pipeline error: `2` for unusable input or a missing
/// credential, `1` for everything else.
pub fn exit_code(err: &ImgurError) -> i32 {
    match err {
        ImgurError::MissingClientId | ImgurError::InvalidInput(_) => 2,
        _ => 1,
    }
}
