use std::{net::SocketAddr, sync::Arc};

use tokio::signal;
use tracing::{error, info};

use trackfit_api as api;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cfg = api::config::load_config()?;
    api::config::init_tracing(cfg.log_level(), cfg.log_json);

    let db_pool = api::db::establish_connection_from_app_config(&cfg).await?;
    if cfg.auto_migrate {
        api::db::run_migrations(&db_pool).await.map_err(|e| {
            error!("Failed running migrations: {}", e);
            e
        })?;
    }

    let access_log = api::logging::setup_logger(api::logging::LoggerConfig {
        use_color: cfg.is_development(),
        ..Default::default()
    });

    if cfg.summary_service_url.is_some() {
        info!(
            timeout_secs = cfg.summary_timeout_secs,
            "external summary service configured"
        );
    } else {
        info!("external summary service not configured; local summaries only");
    }

    let app_state = api::AppState::new(Arc::new(db_pool), cfg.clone())?;
    let app = api::build_router(app_state, access_log).map_err(|e| {
        error!("{}", e);
        e
    })?;

    let addr: SocketAddr = format!("{}:{}", cfg.host, cfg.port).parse()?;
    info!("trackfit-api listening on http://{}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            error!("failed to install Ctrl+C handler: {}", err);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};

        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(err) => {
                error!("failed to install SIGTERM handler: {}", err);
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
    info!("shutdown signal received");
}
