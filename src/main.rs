//! Prayer Cloud - A state-managed HTTP server hosting a two-screen prayer timer
//! 
//! This is the main entry point for the prayer-cloud application.

use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

use prayer_cloud::{
    api::create_router,
    config::Config,
    services::{
        AnalyticsSink, CommandClipboard, FormAnalytics, Integrations, LinkOpener, LogOpener,
        SystemOpener,
    },
    state::AppState,
    tasks::countdown_task,
    utils::shutdown_signal,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Initialize tracing with appropriate log level
    tracing_subscriber::fmt()
        .with_env_filter(format!("prayer_cloud={},tower_http=info", config.log_level()))
        .init();

    info!("Starting prayer-cloud server v{}", env!("CARGO_PKG_VERSION"));
    info!("Configuration: host={}, port={}, recipient={}, analytics={}",
          config.host, config.port, config.recipient,
          config.analytics_url.as_ref().map_or("disabled", |url| url.as_str()));

    let analytics = config
        .analytics_settings()
        .map(|settings| Arc::new(FormAnalytics::new(settings)) as Arc<dyn AnalyticsSink>);

    let opener: Arc<dyn LinkOpener> = if config.no_open {
        Arc::new(LogOpener)
    } else {
        Arc::new(SystemOpener)
    };

    let clipboard_command = config
        .clipboard_command
        .as_deref()
        .unwrap_or(CommandClipboard::default_command());
    let clipboard = CommandClipboard::from_command_line(clipboard_command)
        .ok_or_else(|| anyhow::anyhow!("clipboard command must not be empty"))?;

    let integrations = Integrations {
        analytics,
        opener,
        clipboard: Arc::new(clipboard),
    };

    // Create application state
    let state = Arc::new(AppState::new(
        config.port,
        config.host.clone(),
        config.dispatch_settings(),
        integrations,
    ));

    // Start the countdown background task
    let timer_state = Arc::clone(&state);
    tokio::spawn(async move {
        countdown_task(timer_state).await;
    });

    // Create HTTP router with all endpoints
    let app = create_router(state);

    // Bind to the specified address
    let addr = config.address();
    let listener = TcpListener::bind(&addr).await?;

    info!("Server running on http://{}", addr);
    info!("Endpoints:");
    info!("  POST /ui/start-prayer-btn    - Open the prayer page");
    info!("  POST /ui/begin-timer-btn     - Start the countdown ({{\"value\": \"<minutes>\"}})");
    info!("  POST /ui/pause-timer-btn     - Pause or resume");
    info!("  POST /ui/reset-timer-btn     - Reset the timer");
    info!("  POST /ui/reflection-text     - Save the reflection draft");
    info!("  POST /ui/send-reflection-btn - Send the reflection");
    info!("  POST /ui/copy-invite-btn     - Copy the invite link");
    info!("  GET  /view                   - Current page");
    info!("  GET  /status                 - Page plus server information");
    info!("  GET  /health                 - Health check");

    // Setup graceful shutdown
    let server = axum::serve(listener, app);

    tokio::select! {
        result = server => {
            if let Err(e) = result {
                tracing::error!("Server error: {}", e);
            }
        }
        _ = shutdown_signal() => {
            info!("Shutdown signal received");
        }
    }

    info!("Server shutdown complete");
    Ok(())
}
