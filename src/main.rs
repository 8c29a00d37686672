mod cli;
mod config;

use clap::Parser;
use cli::Args;
use config::{discover_config, load_config_from_path, Settings};
use package_network::adapters::outbound::console::StderrProgressReporter;
use package_network::adapters::outbound::filesystem::{
    FileSystemReader, FileSystemWriter, StdoutPresenter,
};
use package_network::adapters::outbound::manifest::ManifestParserRegistry;
use package_network::adapters::outbound::network::OsvClient;
use package_network::application::dto::NetworkRequest;
use package_network::application::factories::{FormatterFactory, ResolverFactory};
use package_network::application::use_cases::{BuildNetworkUseCase, VulnerabilityAnnotator};
use package_network::ports::outbound::{NetworkFormatter, OutputPresenter};
use package_network::shared::error::ExitCode;
use package_network::shared::Result;
use std::path::Path;
use std::process;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            // --help and --version also arrive here and are not failures
            let code = if e.use_stderr() {
                ExitCode::InvalidArguments
            } else {
                ExitCode::Success
            };
            let _ = e.print();
            process::exit(code.as_i32());
        }
    };

    init_tracing(args.verbose);

    match run(args).await {
        Ok(code) => process::exit(code.as_i32()),
        Err(e) => {
            eprintln!("\n❌ An error occurred:\n");
            eprintln!("{}", e);

            // Display error chain
            for cause in e.chain().skip(1) {
                eprintln!("\nCaused by: {}", cause);
            }

            eprintln!();
            process::exit(ExitCode::ApplicationError.as_i32());
        }
    }
}

/// Diagnostics go to stderr; `RUST_LOG` wins over the verbosity flag
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

async fn run(args: Args) -> Result<ExitCode> {
    let settings = load_settings(&args)?;
    tracing::debug!(?settings, "Effective settings");

    // Create adapters (Dependency Injection)
    let manifest_reader = FileSystemReader::new();
    let manifest_parser = ManifestParserRegistry::new();
    let resolver = ResolverFactory::create(settings.request_timeout, settings.max_concurrent_requests)?;
    let annotator = if settings.check_vulnerabilities {
        Some(VulnerabilityAnnotator::new(
            OsvClient::new(settings.request_timeout)?
                .with_max_concurrent_details(settings.max_concurrent_requests),
        ))
    } else {
        None
    };
    let progress_reporter = StderrProgressReporter::new();

    // Create use case with injected dependencies
    let use_case = BuildNetworkUseCase::new(
        manifest_reader,
        manifest_parser,
        resolver,
        annotator,
        progress_reporter,
    );

    let request = NetworkRequest::new(args.manifest.clone()).with_max_levels(settings.max_levels);
    let response = use_case.execute(request).await?;

    eprintln!("{}", FormatterFactory::progress_message(settings.format));
    let formatter = FormatterFactory::create(settings.format, settings.check_vulnerabilities);
    let formatted_output = formatter.format(&response.network, &response.metadata)?;

    let presenter: Box<dyn OutputPresenter> = match args.output {
        Some(path) => Box::new(FileSystemWriter::new(path)),
        None => Box::new(StdoutPresenter::new()),
    };
    presenter.present(&formatted_output)?;

    if let Some(threshold) = settings.fail_on {
        if response.has_vulnerabilities_at_or_above(threshold) {
            eprintln!(
                "❌ Vulnerabilities at or above {} found; exiting with code {}",
                threshold,
                ExitCode::VulnerabilitiesDetected.as_i32()
            );
            return Ok(ExitCode::VulnerabilitiesDetected);
        }
    }

    Ok(ExitCode::Success)
}

/// Layers defaults, then the config file, then command-line flags
fn load_settings(args: &Args) -> Result<Settings> {
    let config = match &args.config {
        Some(path) => Some(load_config_from_path(path)?),
        None => {
            let dir = args
                .manifest
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .unwrap_or(Path::new("."));
            let discovered = discover_config(dir)?;
            if discovered.is_some() {
                eprintln!(
                    "📄 Auto-discovered config file: {}",
                    dir.join(config::CONFIG_FILENAME).display()
                );
            }
            discovered
        }
    };

    let settings = match config {
        Some(config) => Settings::default().with_config(&config)?,
        None => Settings::default(),
    };
    Ok(args.apply_to(settings))
}
