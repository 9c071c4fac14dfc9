use std::path::Path;
use std::sync::Arc;

use clap::Parser;
use tracing::{info, warn};

use mailform_core::UploadStore;
use mailform_email::{MailComposer, SmtpBackend};
use mailform_server::api::{self, AppState};
use mailform_server::config::MailformConfig;
use mailform_server::workflow::Workflow;

/// Upload-and-email web form server.
#[derive(Parser, Debug)]
#[command(name = "mailform-server", about = "Upload files and email them as attachments")]
struct Cli {
    /// Path to the TOML configuration file.
    #[arg(short, long, default_value = "mailform.toml")]
    config: String,

    /// Override the bind host.
    #[arg(long)]
    host: Option<String>,

    /// Override the bind port.
    #[arg(long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let (mut config, found) = MailformConfig::load(Path::new(&cli.config))?;

    // Must happen after config is loaded so we know whether OTel is enabled,
    // but before any tracing calls.
    let telemetry_guard = mailform_server::telemetry::init(&config.telemetry);

    if !found {
        info!(path = %cli.config, "config file not found, using defaults");
    }

    if let Some(host) = cli.host {
        config.server.host = host;
    }
    if let Some(port) = cli.port {
        config.server.port = port;
    }

    let store = UploadStore::new(&config.uploads.directory);
    store.ensure_dir().await?;
    info!(directory = %store.root().display(), "upload directory ready");

    let composer = MailComposer::from_config(&config.mail)?;
    if composer.sender().is_none() {
        warn!("no sender address configured; sends will fail until MAIL_USERNAME is set");
    }

    let backend = SmtpBackend::new(config.mail.clone())?;
    info!(
        server = %config.mail.server,
        port = config.mail.port,
        tls = ?config.mail.tls,
        "SMTP backend configured"
    );

    let workflow = Workflow::new(store, composer, Arc::new(backend));
    let state = AppState::new(workflow)?.with_max_request_bytes(config.server.max_request_bytes);
    let app = api::router(state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(address = %addr, "mailform-server listening");

    // Serve with graceful shutdown on SIGINT / SIGTERM.
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("mailform-server stopped");
    telemetry_guard.shutdown();

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "failed to listen for Ctrl+C");
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
                warn!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => { info!("received SIGINT"); }
        () = terminate => { info!("received SIGTERM"); }
    }
}
