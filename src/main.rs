//! pingport binary entry point.

use clap::Parser;
use pingport::cli::{self, Cli};
use tracing_subscriber::EnvFilter;

/// Initialize logging to stderr so stdout stays machine-parseable.
/// `RUST_LOG` overrides the verbosity flags.
fn init_tracing(verbose: bool, quiet: bool) {
    let default_level = if quiet {
        "pingport=error"
    } else if verbose {
        "pingport=debug"
    } else {
        "pingport=warn"
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.quiet);

    match cli::run(&cli).await {
        Ok(result) => std::process::exit(result.exit_code()),
        Err(e) => {
            pingport::output::print_error(&e.to_string());
            std::process::exit(1);
        }
    }
}
