mod config;
mod controllers;
mod error;
mod models;
mod strip_trailing_slashes;
mod tera_utils;


use std::sync::Arc;

use anyhow::Context;
use axum::{
    Extension, Router,
    routing::{get, post},
};
use config::Config;
use controllers::{
    admin::{all_submissions, view_submission},
    auth::{login, login_page, logout, seed_demo_accounts, signup, signup_page},
    challenge::{submit_challenge, view_challenge},
    dashboard::dashboard,
    home::get_homepage,
};
use macros::OutputWrapperFactory;
use models::{DataStore, postgres::PgStore};
use sqlx::postgres::PgPoolOptions;
use strip_trailing_slashes::strip_trailing_slashes;
use tera_utils::TeraHtmlRenderer;
use tokio::signal;
use tower_http::{catch_panic::CatchPanicLayer, services::ServeDir, trace::TraceLayer};
use tower_sessions::{Expiry, SessionManagerLayer, SessionStore, session_store::ExpiredDeletion};
use tower_sessions_sqlx_store::PostgresStore;
use tracing_subscriber::EnvFilter;

const SESSION_COOKIE_NAME: &str = "solve_hub_session_id";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Setup .env
    #[cfg(debug_assertions)]
    {
        dotenvy::from_filename(".env.local").ok();
        dotenvy::dotenv().ok();
    }

    // Setup Tracking Subscriber
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,tower_http=debug,sqlx=warn")),
        )
        .log_internal_errors(true)
        .init();

    let config = Config::load()?;

    // Setup SQLX
    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .connect(&config.database_url)
        .await
        .context("could not connect to database_url")?;
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("could not run migrations")?;

    let store: DataStore = Arc::new(PgStore::new(pool.clone()));
    if config.seed_demo_accounts {
        seed_demo_accounts(store.as_ref())
            .await
            .map_err(|e| anyhow::anyhow!("could not seed demo accounts: {e:?}"))?;
    }

    // Setup Sessions
    let session_store = PostgresStore::new(pool);
    session_store
        .migrate()
        .await
        .context("could not create the session table")?;
    let _deletion_task = tokio::task::spawn(
        session_store
            .clone()
            .continuously_delete_expired(tokio::time::Duration::from_secs(60 * 60)),
    );

    let app = build_router(store, session_layer(session_store, config.secure_cookies));

    let listener = tokio::net::TcpListener::bind(config.bind_address())
        .await
        .with_context(|| format!("could not bind {}", config.bind_address()))?;

    if let Ok(addr) = listener.local_addr() {
        tracing::info!("Listening on http://{addr}");
    }

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;
    Ok(())
}

fn session_layer<Sessions: SessionStore + Clone>(
    sessions: Sessions,
    secure: bool,
) -> SessionManagerLayer<Sessions> {
    SessionManagerLayer::new(sessions)
        .with_secure(secure)
        .with_same_site(tower_sessions::cookie::SameSite::Lax)
        .with_name(SESSION_COOKIE_NAME)
        .with_expiry(Expiry::OnInactivity(
            tower_sessions::cookie::time::Duration::days(30),
        ))
}

fn build_router<Sessions: SessionStore + Clone>(
    store: DataStore,
    session_layer: SessionManagerLayer<Sessions>,
) -> Router {
    let route_factory = OutputWrapperFactory {
        renderer: TeraHtmlRenderer,
    };

    Router::new()
        .route(
            "/",
            get(route_factory.handler("home.html.jinja", get_homepage)),
        )
        .route(
            "/login",
            get(route_factory.handler("login.html.jinja", login_page))
                .post(route_factory.handler("login.html.jinja", login)),
        )
        .route(
            "/signup",
            get(route_factory.handler("signup.html.jinja", signup_page))
                .post(route_factory.handler("signup.html.jinja", signup)),
        )
        .route(
            "/logout",
            post(route_factory.handler("error.html.jinja", logout)),
        )
        .route(
            "/dashboard",
            get(route_factory.handler("dashboard.html.jinja", dashboard)),
        )
        .route(
            "/challenge/{id}",
            get(route_factory.handler("challenge.html.jinja", view_challenge))
                .post(route_factory.handler("challenge.html.jinja", submit_challenge)),
        )
        .route(
            "/admin",
            get(route_factory.handler("admin/index.html.jinja", all_submissions)),
        )
        .route(
            "/admin/submission/{id}",
            get(route_factory.handler("admin/submission.html.jinja", view_submission)),
        )
        .nest_service("/static", ServeDir::new("static"))
        .fallback(route_factory.handler("error.html.jinja", strip_trailing_slashes))
        .layer(CatchPanicLayer::new())
        .layer(Extension(store))
        .layer(session_layer)
        .layer(TraceLayer::new_for_http())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = ?e, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = ?e, "failed to install signal handler");
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

    tracing::info!("shutting down");
}
