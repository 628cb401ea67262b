//! Transport coordinator: starts exactly one inbound delivery path next to the HTTP listener and
//! tears them down in order.
//!
//! Startup: getMe → listener task → polling dispatcher *or* webhook registration.
//! Shutdown: stop inbound delivery → stop the listener → release the bot client.

use anyhow::{Context, Result};
use std::future::Future;
use teloxide::prelude::*;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, instrument, warn};

use crate::components::BotComponents;
use crate::config::{BotConfig, TransportMode};
use crate::core::init_tracing;
use crate::server::{self, build_router, AppState};
use crate::telegram::{delete_webhook, register_webhook, run_polling};

/// Why the coordinator left its wait state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ExitReason {
    Signal,
    ServerExited,
    PollingExited,
}

/// Spawns `fut` and returns a token that is cancelled once the task ends, however it ends.
fn spawn_watched<F>(fut: F) -> (JoinHandle<Result<()>>, CancellationToken)
where
    F: Future<Output = Result<()>> + Send + 'static,
{
    let exited = CancellationToken::new();
    let guard = exited.clone().drop_guard();
    let handle = tokio::spawn(async move {
        let _guard = guard;
        fut.await
    });
    (handle, exited)
}

/// Resolves on Ctrl+C or, on unix, SIGTERM.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                error!(error = %e, "Failed to install SIGTERM handler");
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
    info!("Shutdown signal received");
}

/// Main entry: validate config, init logging, build components, bind the listener, then run
/// until Ctrl+C / SIGTERM.
#[instrument(skip(config))]
pub async fn run_bot(config: BotConfig) -> Result<()> {
    config.validate()?;
    init_tracing(config.log_file())?;

    info!(
        mode = %config.mode(),
        bot_token = %llm_client::mask_token(config.bot_token()),
        log_file = ?config.log_file(),
        "Initializing bot"
    );

    let components = BotComponents::build(&config)?;
    let addr = config.base.listen_addr()?;
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind HTTP listener on {}", addr))?;

    run_with_shutdown(&config, components, listener, shutdown_signal()).await
}

/// Runs the bot on an already bound listener until `shutdown` resolves or a task exits early.
///
/// Returns `Ok(())` after a requested shutdown; an unexpected exit of the listener or the
/// polling loop is reported as an error once everything has been torn down.
#[instrument(skip_all, fields(mode = %config.mode()))]
pub async fn run_with_shutdown<S>(
    config: &BotConfig,
    components: BotComponents,
    listener: TcpListener,
    shutdown: S,
) -> Result<()>
where
    S: Future<Output = ()> + Send,
{
    let mode = config.mode();
    let bot = components.teloxide_bot.clone();

    let me = bot
        .get_me()
        .await
        .context("Failed to initialize bot client (getMe); check BOT_TOKEN")?;
    info!(
        bot_id = me.user.id.0,
        username = ?me.user.username,
        "Bot client initialized"
    );
    *components.bot_username.write().await = me.user.username.clone();

    let server_stop = CancellationToken::new();
    let router = build_router(AppState::new(components.handler_chain.clone(), mode));
    let (server_task, server_exited) =
        spawn_watched(server::serve(listener, router, server_stop.clone()));

    let polling_stop = CancellationToken::new();
    let mut polling_task = None;
    let polling_exited = match mode {
        TransportMode::Polling => {
            let chain = components.handler_chain.clone();
            let stop = polling_stop.clone();
            let polling_bot = bot.clone();
            let (task, exited) = spawn_watched(async move {
                run_polling(polling_bot, chain, stop).await;
                Ok(())
            });
            polling_task = Some(task);
            exited
        }
        TransportMode::Webhook => {
            let registered = match config.transport.webhook_endpoint() {
                Ok(url) => register_webhook(&bot, &url).await.map_err(anyhow::Error::from),
                Err(e) => Err(e),
            };
            if let Err(e) = registered {
                error!(error = %e, "Webhook registration failed, stopping HTTP listener");
                server_stop.cancel();
                if let Err(join_err) = server_task.await {
                    warn!(error = %join_err, "HTTP listener task did not finish cleanly");
                }
                return Err(e.context("Webhook registration failed"));
            }
            // Never cancelled: no polling loop in webhook mode.
            CancellationToken::new()
        }
    };

    info!("Bot started successfully");

    tokio::pin!(shutdown);
    let reason = tokio::select! {
        _ = &mut shutdown => ExitReason::Signal,
        _ = server_exited.cancelled() => ExitReason::ServerExited,
        _ = polling_exited.cancelled() => ExitReason::PollingExited,
    };
    info!(reason = ?reason, "Shutting down");

    match mode {
        TransportMode::Polling => {
            polling_stop.cancel();
            if let Some(task) = polling_task {
                if let Err(e) = task.await {
                    warn!(error = %e, "Polling task did not finish cleanly");
                }
            }
        }
        TransportMode::Webhook => {
            if let Err(e) = delete_webhook(&bot).await {
                warn!(error = %e, "Failed to delete webhook on shutdown");
            }
        }
    }

    server_stop.cancel();
    let server_result = match server_task.await {
        Ok(result) => result,
        Err(e) => Err(anyhow::anyhow!("HTTP listener task panicked: {}", e)),
    };

    drop(bot);
    drop(components);
    info!("Bot client released");

    match reason {
        ExitReason::Signal => {
            if let Err(e) = server_result {
                warn!(error = %e, "HTTP listener reported an error during shutdown");
            }
            Ok(())
        }
        ExitReason::ServerExited => {
            server_result?;
            anyhow::bail!("HTTP listener exited unexpectedly")
        }
        ExitReason::PollingExited => anyhow::bail!("Polling stopped unexpectedly"),
    }
}
