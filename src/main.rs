use anyhow::Context;
use clap::Parser;
use folio_server::{
    auth::{AllowList, AuthController, SessionRegistry},
    portfolio::Portfolio,
    state::{AppState, SiteConfig},
    store::{DocumentStore, MemoryStore, SqliteStore},
    sync::SyncEngine,
    web,
};
use std::{path::PathBuf, sync::Arc};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "folio-server", about = "Serve an editable portfolio site")]
struct Args {
    /// Port to listen on
    #[arg(short, long, env = "PORT", default_value = "3000")]
    port: u16,

    /// Host address to bind to
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    host: String,

    /// SQLite file holding the portfolio documents.
    #[arg(long, env = "DATABASE_PATH", default_value = "folio.db")]
    db: PathBuf,

    /// Keep documents in memory only. Nothing survives a restart.
    #[arg(long)]
    ephemeral: bool,

    /// Comma-separated e-mails allowed to unlock admin mode.
    #[arg(long, env = "ADMIN_EMAILS", default_value = "")]
    admin_emails: String,

    /// Google Identity Services client id for the sign-in button.
    #[arg(long, env = "GOOGLE_CLIENT_ID")]
    google_client_id: Option<String>,

    /// Resume file served at /resume when no link is stored.
    #[arg(long, env = "RESUME_PATH")]
    resume_path: Option<PathBuf>,

    /// Name shown in the header and page titles.
    #[arg(long, env = "SITE_OWNER", default_value = "Portfolio")]
    site_owner: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "folio_server=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load .env file if present (silently ignored if absent).
    dotenvy::dotenv().ok();

    let args = Args::parse();

    let store: Arc<dyn DocumentStore> = if args.ephemeral {
        tracing::warn!("ephemeral mode: edits are kept in memory only");
        Arc::new(MemoryStore::new())
    } else {
        Arc::new(
            SqliteStore::open(&args.db)
                .await
                .with_context(|| format!("Cannot open database {}", args.db.display()))?,
        )
    };
    tracing::info!(backend = store.backend_tag(), "document store ready");

    let allow_list = AllowList::parse(&args.admin_emails);
    if allow_list.is_empty() {
        tracing::warn!("ADMIN_EMAILS is empty: nobody can unlock admin mode");
    } else {
        tracing::info!("{} admin account(s) allowed", allow_list.len());
    }
    if args.google_client_id.is_none() {
        tracing::warn!("GOOGLE_CLIENT_ID not set: the sign-in button is disabled");
    }
    if let Some(path) = &args.resume_path {
        if !path.exists() {
            tracing::warn!("resume file does not exist yet: {}", path.display());
        }
    }

    let engine = SyncEngine::new(store);
    let portfolio = Arc::new(Portfolio::new(engine));

    let state = AppState {
        portfolio: portfolio.clone(),
        auth: Arc::new(AuthController::new(allow_list)),
        sessions: SessionRegistry::default(),
        site: Arc::new(SiteConfig {
            owner: args.site_owner,
            google_client_id: args.google_client_id,
            resume_path: args.resume_path,
        }),
    };

    let app = web::app(state);

    let addr = format!("{}:{}", args.host, args.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Cannot bind to {addr}"))?;

    tracing::info!("Listening on http://{addr}");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    // Queued writes are fire-and-forget for requests, but not for shutdown.
    portfolio.engine().flush().await;
    tracing::info!("pending writes flushed");

    Ok(())
}

async fn shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{SignalKind, signal};
        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                tokio::select! {
                    result = tokio::signal::ctrl_c() => {
                        if let Err(e) = result { tracing::error!("ctrl-c error: {}", e); }
                    }
                    _ = sigterm.recv() => {
                        tracing::info!("Received SIGTERM");
                    }
                }
            }
            Err(e) => {
                tracing::error!("cannot register SIGTERM handler: {}", e);
                tokio::signal::ctrl_c().await.ok();
            }
        }
    }
    #[cfg(not(unix))]
    {
        tokio::signal::ctrl_c().await.ok();
    }
    tracing::info!("Shutting down gracefully");
}
