use anyhow::Context as _;
use clap::{Parser, Subcommand};
use sea_orm::Database;
use sea_orm_migration::MigratorTrait;
use tracing::info;

use drl_core::config::Config;
use drl_core::tracing::init_tracing;
use drl_portal::config::PortalConfig;
use drl_portal::router::build_router;
use drl_portal::state::AppState;
use drl_portal::usecase::seed::SeedUseCase;
use drl_portal_migration::Migrator;

/// Extracurricular participation portal.
#[derive(Parser)]
#[command(version, about)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Run pending migrations (if enabled) and serve HTTP. The default.
    Serve,
    /// Migrate, then insert the demo accounts and activities that are missing.
    Seed,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();
    init_tracing();

    let cli = Cli::parse();
    let config = PortalConfig::from_env().context("load configuration")?;

    let db = Database::connect(&config.database_url)
        .await
        .context("connect to database")?;

    let seeding = matches!(cli.command, Some(Command::Seed));
    if config.run_migrations || seeding {
        Migrator::up(&db, None).await.context("run migrations")?;
    }

    let state = AppState::new(db, &config);

    if seeding {
        SeedUseCase {
            accounts: state.account_repo(),
            activities: state.activity_repo(),
            hasher: state.hasher(),
        }
        .execute()
        .await?;
        return Ok(());
    }

    let router = build_router(state);
    let http_addr = format!("0.0.0.0:{}", config.portal_port);
    let listener = tokio::net::TcpListener::bind(&http_addr)
        .await
        .with_context(|| format!("bind {http_addr}"))?;

    info!("portal listening on {http_addr}");
    axum::serve(listener, router).await.context("server error")?;
    Ok(())
}
