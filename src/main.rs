// src/main.rs

use snowdaemon::errors::SnowdaemonError;
use snowdaemon::{cli, run};

#[tokio::main]
async fn main() {
    let args = cli::parse();
    match run(args).await {
        // The daemon's exit code mirrors the supervised child's.
        Ok(code) => std::process::exit(code),
        Err(err @ SnowdaemonError::ConfigMissing(_)) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
        Err(err) => {
            eprintln!("snowdaemon error: {err:?}");
            std::process::exit(1);
        }
    }
}
