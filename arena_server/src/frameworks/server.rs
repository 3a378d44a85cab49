// Framework bootstrap for the arena server runtime.

use crate::domain::{ActionProvider, ArenaState};
use crate::frameworks::config::{self, ArenaFile};
use crate::interface_adapters::clients::PlayerServiceClient;
use crate::interface_adapters::net::{arena_snapshot_handler, health_handler};
use crate::interface_adapters::state::AppState;
use crate::use_cases::{ArenaSettings, ArenaUpdate, TickSettings, arena_task};

use axum::{Router, routing::get};
use std::net::SocketAddr;
use std::{io::Result, sync::Arc};
use tokio::sync::{Notify, watch};
use tracing::Instrument;

fn init_runtime() {
    let _ = dotenvy::dotenv();

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(config::DEFAULT_LOG_FILTER));

    // Per-poll spans carry the player service; keep them in structured output.
    if config::log_json() {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .json()
            .with_current_span(true)
            .with_span_list(false)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .compact()
            .init();
    }

    // A panic outside the per-poll tasks takes the arena loop down with it.
    std::panic::set_hook(Box::new(|info| {
        let backtrace = std::backtrace::Backtrace::capture();
        let thread = std::thread::current();
        let location = info
            .location()
            .map(|loc| format!("{}:{}", loc.file(), loc.line()))
            .unwrap_or_default();
        tracing::error!(
            %info,
            %location,
            thread = thread.name().unwrap_or("unnamed"),
            ?backtrace,
            "panic"
        );
    }));
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/arena", get(arena_snapshot_handler))
        .route("/health", get(health_handler))
        .with_state(state)
}

/// Runs the arena loop and serves snapshots until ctrl-c.
pub async fn run(
    listener: tokio::net::TcpListener,
    arena: ArenaState,
    provider: Arc<dyn ActionProvider>,
    settings: ArenaSettings,
) -> Result<()> {
    let address = listener.local_addr()?;

    let (updates_tx, updates_rx) = watch::channel(ArenaUpdate {
        tick: 0,
        arena: Arc::new(arena.clone()),
    });
    let shutdown = Arc::new(Notify::new());

    // The arena loop owns the state; the HTTP side only reads the watch channel.
    let arena_loop = tokio::spawn(
        arena_task(
            arena,
            provider,
            settings,
            updates_tx,
            Arc::clone(&shutdown),
        )
        .in_current_span(),
    );

    let app = router(Arc::new(AppState { updates_rx }));
    tracing::info!(%address, "listening");

    // Serve app and report errors rather than panicking
    let served = axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            tracing::info!("shutdown requested");
        })
        .await
        .inspect_err(|e| {
            tracing::error!(error = %e, "server error");
        });

    shutdown.notify_one();
    match arena_loop.await {
        Ok(Ok(ticks)) => tracing::info!(ticks, "arena finished"),
        Ok(Err(e)) => tracing::error!(error = %e, "arena aborted"),
        Err(e) => tracing::error!(error = %e, "arena task failed"),
    }

    served
}

pub async fn run_with_config() -> Result<()> {
    init_runtime();

    let config_path = config::arena_config_path();
    let arena = ArenaFile::load(&config_path)
        .and_then(ArenaFile::into_arena)
        .map_err(|e| std::io::Error::other(format!("{config_path}: {e}")))?;

    let settings = ArenaSettings {
        tick_interval: config::tick_interval(),
        tick: TickSettings {
            poll_timeout: config::player_poll_timeout(),
            rules: config::tick_rules(),
        },
    };

    // Client timeout mirrors the per-poll budget; the tick enforces it too.
    let client = PlayerServiceClient::new(settings.tick.poll_timeout)
        .map_err(|e| std::io::Error::other(format!("failed to initialize player client: {e}")))?;
    tracing::debug!(
        arena_id = %arena.id,
        players = arena.players.len(),
        poll_timeout_ms = settings.tick.poll_timeout.as_millis() as u64,
        throw_range = ?settings.tick.rules.throw_range,
        "arena configured"
    );

    let address = SocketAddr::from(([127, 0, 0, 1], config::http_port()));

    // Bind TCP listener with error handling
    let listener = tokio::net::TcpListener::bind(address)
        .await
        .inspect_err(|e| {
            tracing::error!(%address, error = %e, "failed to bind");
        })?;

    // Everything logged for this arena, including the loop task, carries its id.
    let span = tracing::info_span!("arena", arena_id = %arena.id);
    run(listener, arena, Arc::new(client), settings)
        .instrument(span)
        .await
}
