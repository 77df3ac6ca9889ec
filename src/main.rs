use clap::Parser;
use tracing::error;

use imgur_dl::cli::{self, Args};

fn configure_logging() {
    // Diagnostics go to stderr; stdout is reserved for image links and download
    // confirmations.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() {
    configure_logging();
    let args = Args::parse();

    if let Err(err) = cli::run(args).await {
        error!("{err}");
        std::process::exit(cli::exit_code(&err));
    }
}
