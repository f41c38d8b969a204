mod cli;

use crate::cli::Cli;
use anyhow::Context;
use clap::Parser;
use std::future::Future;
use std::path::Path;
use std::process::ExitCode;
use sticker_batch::{BatchOrchestrator, BatchPlan, BatchReport};
use sticker_core::{Registry, RegistryError};
use sticker_generator::{Generator, RandomGenerator, SeededRandom, WordList};
use sticker_render::{PngDirectorySink, StickerRenderer};
use sticker_storage::MySqlRegistry;
use sticker_telemetry::TelemetryOptions;
use tracing::{error, info};

/// Everything checked before the registry is touched. Building it has no
/// side effects.
struct Config {
    plan: BatchPlan,
    sink: PngDirectorySink,
    moderation: WordList,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let telemetry = TelemetryOptions {
        verbose: cli.print_info,
        json: cli.json_logs,
    };
    if let Err(e) = sticker_telemetry::init(telemetry) {
        eprintln!("failed to initialise logging: {e}");
        return ExitCode::FAILURE;
    }

    let config = match configure(&cli) {
        Ok(config) => config,
        Err(e) => {
            let message = format!("{e:#}");
            error!(error = %message, "invalid configuration");
            return ExitCode::from(2);
        }
    };

    match execute(&cli, config).await {
        Ok(report) => {
            summarize(&report);
            ExitCode::SUCCESS
        }
        Err(e) => {
            let message = format!("{e:#}");
            error!(error = %message, "sticker batch failed");
            ExitCode::FAILURE
        }
    }
}

fn configure(cli: &Cli) -> anyhow::Result<Config> {
    let plan = cli.plan()?;
    let options = cli.render_options()?;

    let renderer = StickerRenderer::from_files(&cli.sticker_base, &cli.font, cli.font_size, options)
        .context("failed to prepare the sticker renderer")?;
    renderer
        .check_capacity(&cli.link_base, plan.code_length.get())
        .with_context(|| format!("link base '{}' does not fit in a qr code", cli.link_base))?;

    let moderation = match &cli.blocklist {
        Some(path) => WordList::load(path)
            .with_context(|| format!("failed to read blocklist {}", path.display()))?,
        None => WordList::builtin(),
    };

    Ok(Config {
        plan,
        sink: PngDirectorySink::new(renderer, &cli.sticker_directory),
        moderation,
    })
}

async fn execute(cli: &Cli, config: Config) -> anyhow::Result<BatchReport> {
    info!(
        database = %cli.database,
        collection = %cli.collection,
        "opening code registry"
    );
    let settings = cli.registry_settings();
    let registry = open_registry(|| MySqlRegistry::open(&settings), &cli.sticker_directory).await?;

    match cli.seed {
        Some(seed) => {
            info!(seed, "using seeded code generator");
            run_batch(RandomGenerator::new(SeededRandom::new(seed)), registry, cli, config).await
        }
        None => run_batch(RandomGenerator::thread_local(), registry, cli, config).await,
    }
}

/// Opens the registry, then creates the output directory. Nothing is
/// written to disk unless the registry opened.
async fn open_registry<R, F, Fut>(open: F, sticker_directory: &Path) -> anyhow::Result<R>
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<R, RegistryError>>,
{
    let registry = open().await.context("failed to open the code registry")?;

    std::fs::create_dir_all(sticker_directory).with_context(|| {
        format!(
            "failed to create sticker directory {}",
            sticker_directory.display()
        )
    })?;

    Ok(registry)
}

async fn run_batch<G: Generator, R: Registry>(
    generator: G,
    registry: R,
    cli: &Cli,
    config: Config,
) -> anyhow::Result<BatchReport> {
    let orchestrator = BatchOrchestrator::new(
        generator,
        config.moderation,
        registry,
        config.sink,
        cli.link_base.clone(),
    );

    Ok(orchestrator.run(&config.plan).await?)
}

fn summarize(report: &BatchReport) {
    info!(
        succeeded = report.succeeded,
        attempted = report.attempted,
        conflicts = report.conflicts,
        "generated {} of {} attempted stickers",
        report.succeeded,
        report.attempted
    );

    let elapsed = format!("{:#}", report.elapsed);
    match report.per_sticker() {
        Some(per_sticker) => {
            let per_sticker = format!("{per_sticker:#}");
            info!(elapsed = %elapsed, per_sticker = %per_sticker, "batch finished")
        }
        None => info!(elapsed = %elapsed, "batch finished"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sticker_storage::{InMemoryRegistry, InMemoryStore};

    #[tokio::test]
    async fn unavailable_registry_leaves_no_directory_behind() {
        let dir = tempfile::tempdir().unwrap();
        let stickers = dir.path().join("Stickers");
        let store = InMemoryStore::new();

        let result = open_registry(|| async { store.open("Books", "Stickers") }, &stickers).await;

        let err = result.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<RegistryError>(),
            Some(RegistryError::Unavailable(_))
        ));
        assert!(!stickers.exists());
    }

    #[tokio::test]
    async fn directory_is_created_once_the_registry_is_open() {
        let dir = tempfile::tempdir().unwrap();
        let stickers = dir.path().join("out").join("Stickers");
        let store = InMemoryStore::new();
        store.create_collection("Books", "Stickers");

        let registry: InMemoryRegistry =
            open_registry(|| async { store.open("Books", "Stickers") }, &stickers)
                .await
                .unwrap();

        assert!(stickers.is_dir());
        assert!(registry.is_empty());
    }
}
