//! CLI entrypoint for notehub
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, anyhow, bail};
use clap::{CommandFactory, Parser};
use notehub_application::{
    CreateNoteUseCase, NoProgress, QueryParams, RetrievalDispatcher, RetrievalProgress,
    RetrievalRequest, RetrievalWorker,
};
use notehub_domain::NoteDraft;
use notehub_infrastructure::{
    ConfigLoader, ConfigTenantDirectory, FileConfig, HttpUpstreamClient, InMemoryNoteStore,
};
use notehub_presentation::{
    ClassificationReport, Cli, Command, ConsoleFormatter, JsonFormatter, OutputFormat,
    OutputFormatter, SimpleProgress, TenantSummary,
};
use std::path::Path;
use std::sync::Arc;
use tracing::{error, info};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Held until exit so buffered log lines reach the file
    let _log_guard = init_logging(cli.verbose, cli.log_file.as_deref())?;

    info!("Starting notehub");

    if cli.show_config {
        ConfigLoader::print_config_sources(cli.config.as_deref());
        return Ok(());
    }

    let Some(command) = cli.command.clone() else {
        Cli::command().print_help()?;
        return Ok(());
    };

    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_deref())
            .map_err(|e| anyhow!("Failed to load configuration: {}", e))?
    };

    let issues = config.validate();
    if !issues.is_empty() {
        for issue in &issues {
            error!("Invalid configuration: {}", issue);
        }
        bail!("Configuration has {} issue(s): {}", issues.len(), issues[0]);
    }

    // === Dependency Injection ===
    let directory = Arc::new(ConfigTenantDirectory::from_config(&config)?);

    let formatter: Box<dyn OutputFormatter> = match cli.output {
        OutputFormat::Text => Box::new(ConsoleFormatter),
        OutputFormat::Json => Box::new(JsonFormatter),
    };

    match command {
        Command::Fetch {
            owners,
            books,
            params,
        } => {
            let worker_config = config.worker_config();
            let client = Arc::new(HttpUpstreamClient::new(
                config.endpoints(),
                worker_config.upstream_timeout,
            )?);
            let worker =
                Arc::new(RetrievalWorker::new(directory, client).with_config(worker_config));
            let dispatcher = RetrievalDispatcher::new(worker);

            let progress: Arc<dyn RetrievalProgress> = if cli.quiet {
                Arc::new(NoProgress)
            } else {
                Arc::new(SimpleProgress)
            };
            let params: QueryParams = params.into_iter().collect();

            let jobs: Vec<_> = owners
                .iter()
                .map(|owner| {
                    let request = if books {
                        RetrievalRequest::books(params.clone())
                    } else {
                        RetrievalRequest::notes(params.clone())
                    };
                    dispatcher.dispatch_with_progress(owner.as_str(), request, Arc::clone(&progress))
                })
                .collect();

            let mut failed = 0;
            for job in jobs {
                let owner = job.owner_reference().to_string();
                let id = job.id();
                match job.wait().await {
                    Ok(outcome) => println!("{}", formatter.format_outcome(&owner, &outcome)),
                    Err(e) => {
                        error!("{} for {} failed: {}", id, owner, e);
                        eprintln!("{}: {}", owner, e);
                        failed += 1;
                    }
                }
            }
            if failed > 0 {
                bail!("{} of {} retrievals failed", failed, owners.len());
            }
        }

        Command::Classify { tenant, text } => {
            let profile = directory.registry().profile(&tenant)?;
            let report = ClassificationReport::new(&text, profile);
            println!("{}", formatter.format_classification(&report));
        }

        Command::Validate {
            owner,
            title,
            content,
            note_type,
        } => {
            let store = Arc::new(InMemoryNoteStore::new());
            let use_case = CreateNoteUseCase::new(directory, store);
            let draft = NoteDraft {
                title,
                content,
                note_type,
                owner_reference: owner,
            };

            let result = use_case.execute(draft).await;
            println!("{}", formatter.format_created(&result));
            if result.is_err() {
                bail!("Note was not stored");
            }
        }

        Command::Tenants => {
            println!("{}", formatter.format_tenants(&tenant_summaries(&config)));
        }
    }

    Ok(())
}

/// Initialize logging based on verbosity level, optionally into a file
fn init_logging(verbose: u8, log_file: Option<&Path>) -> Result<Option<WorkerGuard>> {
    let filter = match verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false);

    match log_file {
        Some(path) => {
            let file_name = path
                .file_name()
                .with_context(|| format!("--log-file must name a file: {}", path.display()))?;
            let dir = path
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .unwrap_or_else(|| Path::new("."));

            let (writer, guard) =
                tracing_appender::non_blocking(tracing_appender::rolling::never(dir, file_name));
            builder.with_writer(writer).with_ansi(false).init();
            Ok(Some(guard))
        }
        None => {
            builder.with_writer(std::io::stderr).init();
            Ok(None)
        }
    }
}

fn tenant_summaries(config: &FileConfig) -> Vec<TenantSummary> {
    config
        .tenants
        .iter()
        .map(|(name, tenant)| TenantSummary {
            name: name.clone(),
            family: tenant.parse_family().ok(),
            short_threshold: tenant.short_threshold,
            medium_threshold: tenant.medium_threshold,
            endpoint: tenant.to_endpoint().map(|e| e.base_url().to_string()),
            owners: config
                .owners
                .iter()
                .filter(|(_, t)| *t == name)
                .map(|(owner, _)| owner.clone())
                .collect(),
        })
        .collect()
}
