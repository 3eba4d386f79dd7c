use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod cli;

#[tokio::main]
async fn main() {
    let args = cli::Cli::parse();
    init_tracing(args.verbose);

    if let Err(e) = cli::run(args).await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Logs go to stderr so command output on stdout stays clean.
fn init_tracing(verbose: bool) {
    let default_level = if verbose {
        "reportdash=debug"
    } else {
        "reportdash=info"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
