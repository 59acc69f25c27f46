//! Contract harness — runs HTTP golden assertions against live services.
//!
//! # Usage
//!
//! ```bash
//! # Run all fixtures against a live gateway or service
//! cargo run -p contract-harness -- --base-url http://localhost:3210
//!
//! # Run only station service fixtures
//! cargo run -p contract-harness -- --base-url http://localhost:3220 --service station
//!
//! # Self-provision Postgres via Docker and boot the auth service in-process
//! cargo run -p contract-harness --features auth
//! ```
//!
//! Exits 0 when all assertions pass, exits 1 when any fail.

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use contract_harness::{fixture, reporter::Reporter, runner::Runner};

#[derive(Parser)]
#[command(about = "Run HTTP contract assertions against live services")]
struct Args {
    /// Base URL of the service or gateway (e.g. http://localhost:3210).
    /// When omitted, the harness provisions its own infra via Docker
    /// (requires building with `--features auth`).
    #[arg(long)]
    base_url: Option<String>,

    /// Run only fixtures for this service: auth or station
    #[arg(long)]
    service: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    tracing_subscriber::fmt::init();

    let args = Args::parse();
    let workspace_root = workspace_root();

    let Some(base_url) = args.base_url else {
        return provision_and_run(&workspace_root).await;
    };

    let fixtures = fixture::load_all(&workspace_root, args.service.as_deref())?;
    if fixtures.is_empty() {
        eprintln!("No fixtures found.");
        return Ok(());
    }

    println!("Running {} fixture(s) against {}", fixtures.len(), base_url);
    println!();

    let runner = Runner::new(&base_url);
    let mut reporter = Reporter::new();

    for f in &fixtures {
        let result = runner.run(f).await;
        reporter.record(f, result);
    }

    reporter.print_summary();

    if reporter.all_passed() {
        Ok(())
    } else {
        std::process::exit(1);
    }
}

#[cfg(feature = "auth")]
async fn provision_and_run(workspace_root: &std::path::Path) -> Result<()> {
    use contract_harness::{config::ContractHarnessConfig, docker::DockerOrchestrator, services};

    let config = ContractHarnessConfig::from_env();

    let mut docker = DockerOrchestrator::connect(&config.docker_host).await?;
    docker.cleanup_stale().await.ok();
    let database_url = docker.start_postgres().await?;

    let infra = services::InfraUrls { database_url };
    let passed = services::auth::run(&infra, &config, workspace_root).await;

    docker.cleanup().await.ok();

    if passed? {
        Ok(())
    } else {
        std::process::exit(1);
    }
}

#[cfg(not(feature = "auth"))]
async fn provision_and_run(_workspace_root: &std::path::Path) -> Result<()> {
    anyhow::bail!("no --base-url given; rebuild with --features auth to self-provision")
}

/// Walk up from the binary's own manifest dir to find the workspace root
/// (the directory containing `Cargo.lock`).
fn workspace_root() -> PathBuf {
    let start = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    start
        .ancestors()
        .find(|p| p.join("Cargo.lock").exists())
        .unwrap_or(&start)
        .to_path_buf()
}
