//! Sprite CLI and REST relay entry point.
//!
//! Binary name: `sprite`
//!
//! Parses CLI arguments, installs tracing, initializes storage (and the
//! completion provider for commands that answer messages), then dispatches.

mod cli;
mod http;
mod state;

use clap::Parser;
use clap_complete::generate;

use sprite_observe::tracing_setup::{default_filter, init_tracing, shutdown_tracing};

use cli::{Cli, Commands, ContextAction};
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Shell completions don't need tracing or app state
    if let Commands::Completions { shell } = &cli.command {
        let mut cmd = <Cli as clap::CommandFactory>::command();
        generate(*shell, &mut cmd, "sprite", &mut std::io::stdout());
        return Ok(());
    }

    init_tracing(default_filter(cli.verbose, cli.quiet), cli.otel)
        .map_err(|e| anyhow::anyhow!("failed to initialize tracing: {e}"))?;

    let result = run(cli).await;
    shutdown_tracing();
    result
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let needs_responder = matches!(cli.command, Commands::Serve { .. } | Commands::Chat { .. });
    let state = AppState::init(needs_responder).await?;

    match cli.command {
        Commands::Serve { port, host } => {
            let addr = format!("{host}:{port}");
            let listener = tokio::net::TcpListener::bind(&addr).await?;

            if !cli.quiet {
                println!(
                    "  {} Sprite relay listening on {}",
                    console::style("*").magenta().bold(),
                    console::style(format!("http://{addr}")).cyan()
                );
                println!("  {}", console::style("Press Ctrl+C to stop").dim());
            }
            tracing::info!(%addr, bot_id = %state.config.bot_id, "relay started");

            let router = http::router::build_router(state.clone());
            axum::serve(listener, router)
                .with_graceful_shutdown(shutdown_signal())
                .await?;

            if !cli.quiet {
                println!("\n  Server stopped.");
            }
        }

        Commands::Chat { user_id, name } => {
            cli::chat::run_chat(&state, user_id, name).await?;
        }

        Commands::Context { action } => match action {
            ContextAction::Show { raw } => {
                cli::context::show_context(&state, raw, cli.json).await?;
            }
            ContextAction::Stats => {
                cli::context::context_stats(&state, cli.json).await?;
            }
        },

        // Handled before state init
        Commands::Completions { .. } => {}
    }

    state.shutdown().await;
    Ok(())
}

/// Wait for Ctrl+C or SIGTERM for graceful shutdown.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("shutdown signal received");
}
