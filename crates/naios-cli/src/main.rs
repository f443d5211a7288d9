mod config;
mod seed;

use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use naios_server::AppState;
use tokio::net::TcpListener;

use config::{AiArgs, StoreArgs, env_report};

#[derive(Parser)]
#[command(name = "naios")]
#[command(about = "Naios producer marketplace backend", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP API until ctrl-c
    Serve {
        /// Address to listen on
        #[arg(long, env = "NAIOS_BIND", default_value = "0.0.0.0:3000")]
        bind: String,
        #[command(flatten)]
        ai: AiArgs,
        #[command(flatten)]
        store: StoreArgs,
    },
    /// Insert the bundled sample producers
    Seed {
        #[command(flatten)]
        store: StoreArgs,
    },
    /// Print which configuration values are loaded
    CheckEnv {
        #[arg(long, env = "NAIOS_BIND", default_value = "0.0.0.0:3000")]
        bind: String,
        #[command(flatten)]
        ai: AiArgs,
        #[command(flatten)]
        store: StoreArgs,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();
    tracing::info!("naios v{}", env!("CARGO_PKG_VERSION"));

    match Cli::parse().command {
        Commands::Serve { bind, ai, store } => serve(&bind, ai, store).await,
        Commands::Seed { store } => {
            let store = store.build()?;
            let stats = seed::seed_producers(store.as_ref()).await?;
            println!(
                "Seeded {} producers ({} skipped, {} translation rows)",
                stats.inserted, stats.skipped, stats.translations
            );
            Ok(())
        }
        Commands::CheckEnv { bind, ai, store } => {
            let report = env_report(&bind, &ai, &store);
            println!("{}", serde_json::to_string_pretty(&report)?);
            Ok(())
        }
    }
}

async fn serve(bind: &str, ai: AiArgs, store_args: StoreArgs) -> anyhow::Result<()> {
    let env = env_report(bind, &ai, &store_args);
    let model = ai.build()?;
    tracing::info!(model = model.model(), "using chat model");
    let store = store_args.build()?;
    let state = AppState::new(store, Arc::new(model)).with_env(env);

    let listener = TcpListener::bind(bind)
        .await
        .with_context(|| format!("binding {bind}"))?;
    naios_server::serve(listener, state, shutdown_signal())
        .await
        .context("serving HTTP API")?;
    tracing::info!("naios API stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for ctrl-c");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown requested");
}
