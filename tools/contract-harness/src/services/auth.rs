//! Auth service contract runner (requires `--features auth`).

use std::path::Path;

use anyhow::Result;
use sea_orm::Database;
use sea_orm_migration::MigratorTrait;
use tats_auth::{router::build_router, state::AppState};
use tats_auth_migration::Migrator;
use tokio::net::TcpListener;

use crate::{
    config::ContractHarnessConfig, fixture, reporter, runner::Runner, services::InfraUrls,
};

/// Run auth migrations, start the auth service in-process, run all auth fixtures.
///
/// The email outbox worker is not spawned — fixtures assert HTTP behavior
/// only, and enqueued events simply stay pending in the test database.
///
/// Returns `true` if every fixture passed.
pub async fn run(
    infra: &InfraUrls,
    config: &ContractHarnessConfig,
    workspace_root: &Path,
) -> Result<bool> {
    // ── DB + migrations ────────────────────────────────────────────────────
    let db = Database::connect(&infra.database_url).await?;
    Migrator::up(&db, None).await?;

    // ── Start auth service on a random OS-assigned port ────────────────────
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let port = listener.local_addr()?.port();
    let base_url = format!("http://127.0.0.1:{port}");

    let state = AppState {
        db,
        jwt_secret: config.jwt_secret.clone(),
        cookie_domain: config.cookie_domain.clone(),
    };
    tokio::spawn(async move {
        axum::serve(listener, build_router(state)).await.unwrap();
    });

    // ── Load fixtures and run ──────────────────────────────────────────────
    let fixtures = fixture::load_all(workspace_root, Some("auth"))?;
    let runner = Runner::new(&base_url);
    let mut rep = reporter::Reporter::new();

    for f in &fixtures {
        let result = runner.run(f).await;
        rep.record(f, result);
    }

    rep.print_summary();
    Ok(rep.all_passed())
}
