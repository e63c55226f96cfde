// src/lib.rs

pub mod aws;
pub mod cli;
pub mod config;
pub mod errors;
pub mod exec;
pub mod logging;
pub mod relay;

use std::path::PathBuf;

use tracing::info;

use crate::aws::cloudwatch::CloudWatchStream;
use crate::aws::credentials;
use crate::aws::identity;
use crate::aws::s3::{ConfigFetcher, S3Fetcher};
use crate::aws::sns::SnsNotifier;
use crate::cli::CliArgs;
use crate::config::{load_and_validate, ConfigFile, SinkKind};
use crate::errors::Result;
use crate::exec::{snowflake_loader_command, streaming_command, supervise, CommandSpec};
use crate::relay::{FanOutSink, LogSink, RemoteSink, TracingSink};

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - config loading
/// - logging sinks
/// - the object-storage fetch for the selected service
/// - the supervised run
///
/// Returns the supervised child's exit code, which `main` passes through as
/// the daemon's own exit code.
pub async fn run(args: CliArgs) -> Result<i32> {
    let config_path = PathBuf::from(&args.config);
    let cfg = load_and_validate(&config_path)?;
    logging::init_logging(&cfg.logging, args.log_level)?;

    if args.dry_run {
        // Resolve the command without touching S3 or credentials.
        let spec = if cfg.service.is_batch() {
            snowflake_loader_command(&cfg, None)?
        } else {
            streaming_command(&cfg)?
        };
        print_dry_run(&cfg, &spec);
        return Ok(0);
    }

    let instance_id = identity::instance_id(identity::METADATA_ENDPOINT).await;
    info!(instance_id = %instance_id, "resolved execution host identity");

    let sink = build_sink(&cfg, &instance_id);
    let notifier = SnsNotifier::from_config(&cfg);
    let fetcher = S3Fetcher::new(&cfg.aws.aws_region, &cfg.aws.s3_config_bucket);

    let spec = prepare_service(&cfg, &fetcher)?;

    supervise(&spec, &cfg.service.service_name, sink.as_ref(), &notifier).await
}

/// Fetch the service's configuration and build its command line.
///
/// The batch loader gets the whole config folder, runs from inside it, and
/// carries the ambient temporary credentials on its environment; streaming
/// services get a single config file into the working directory.
fn prepare_service(cfg: &ConfigFile, fetcher: &dyn ConfigFetcher) -> Result<CommandSpec> {
    if cfg.service.is_batch() {
        if let Some(folder) = cfg.service.service_config_folder.as_deref() {
            fetcher.fetch_folder(folder)?;
        }
        let creds = credentials::export_credentials(&cfg.aws.aws_region)?;
        snowflake_loader_command(cfg, Some(&creds))
    } else {
        if let Some(file) = cfg.service.service_config_file.as_deref() {
            let key = format!("{}/{}", cfg.service.service_name, file);
            let dest = std::env::current_dir()?.join(file);
            fetcher.fetch_file(&key, &dest)?;
        }
        streaming_command(cfg)
    }
}

/// Build the sink the supervisor forwards classified child output to.
///
/// Stderr and local-file output go through the `tracing` subscriber
/// configured in [`logging::init_logging`]; the remote stream is a separate
/// member because it carries per-record severity.
fn build_sink(cfg: &ConfigFile, stream_name: &str) -> Box<dyn LogSink> {
    let mut sinks: Vec<Box<dyn LogSink>> = vec![Box::new(TracingSink)];

    if cfg.logging.sinks.contains(&SinkKind::Cloudwatch) {
        let stream = CloudWatchStream::new(
            cfg.aws.aws_region.clone(),
            &cfg.service.service_name,
            stream_name,
        );
        stream.ensure();
        sinks.push(Box::new(RemoteSink::new(stream, cfg.logging.min_level)));
    }

    Box::new(FanOutSink::new(sinks))
}

/// Simple dry-run output: the resolved command line and context.
fn print_dry_run(cfg: &ConfigFile, spec: &CommandSpec) {
    println!("snowdaemon dry-run");
    println!("  service: {}", cfg.service.service_name);
    println!("  command: {spec}");
    if let Some(dir) = spec.current_dir() {
        println!("  working directory: {}", dir.display());
    }
    println!("  region: {}", cfg.aws.aws_region);
    println!("  config bucket: {}", cfg.aws.s3_config_bucket);
}
