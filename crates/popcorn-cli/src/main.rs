mod app;
mod cli;
mod logging;
mod render;

use std::process::ExitCode;

use clap::Parser;

#[tokio::main]
async fn main() -> ExitCode {
    let args = cli::Args::parse();
    let _log_guard = logging::init(args.verbose);

    match app::run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "popcorn exited with an error");
            eprintln!("popcorn: {e}");
            ExitCode::FAILURE
        }
    }
}
