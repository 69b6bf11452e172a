use std::{env, error::Error, net::SocketAddr};

use axum::{
    Router,
    extract::{MatchedPath, Request},
    middleware,
};
use axum_server::Handle;
use clap::Parser;
use rusqlite::Connection;
use time::Duration;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use finance_tracker::{
    AppState, DEFAULT_TOKEN_DURATION, build_router, graceful_shutdown, logging_middleware,
};

/// The REST API server for the finance tracker.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to the application SQLite database.
    #[arg(long)]
    db_path: String,

    /// The IP address to serve the API from.
    #[arg(short, long, default_value = "127.0.0.1")]
    address: String,

    /// The port to serve the API from.
    #[arg(short, long, default_value_t = 5000)]
    port: u16,

    /// The canonical name of the local timezone, e.g. "Asia/Jakarta".
    #[arg(long, default_value = "Etc/UTC")]
    timezone: String,

    /// How long a log-in token is valid for, in minutes.
    #[arg(long, default_value_t = DEFAULT_TOKEN_DURATION.whole_minutes())]
    token_duration_minutes: i64,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    setup_logging();

    let args = Args::parse();

    let addr: SocketAddr = format!("{}:{}", args.address, args.port).parse()?;

    let secret = env::var("SECRET").map_err(|_| "The environment variable 'SECRET' must be set")?;

    let conn = Connection::open(&args.db_path)?;
    let state = AppState::new(
        conn,
        &secret,
        &args.timezone,
        Duration::minutes(args.token_duration_minutes),
    )?;

    let handle = Handle::new();
    tokio::spawn(graceful_shutdown(handle.clone()));

    let router = add_tracing_layer(
        build_router(state)
            .layer(middleware::from_fn(logging_middleware))
            .layer(CorsLayer::permissive()),
    );

    tracing::info!("HTTP server listening on {}", addr);
    axum_server::bind(addr)
        .handle(handle)
        .serve(router.into_make_service())
        .await?;

    Ok(())
}

fn setup_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().pretty())
        .init();
}

fn add_tracing_layer(router: Router) -> Router {
    let tracing_layer = TraceLayer::new_for_http()
        .make_span_with(|req: &Request| {
            let method = req.method();
            let uri = req.uri();

            let matched_path = req
                .extensions()
                .get::<MatchedPath>()
                .map(|matched_path| matched_path.as_str());

            tracing::debug_span!("request", %method, %uri, matched_path)
        })
        // Errors are already logged where they happen.
        .on_failure(());

    router.layer(tracing_layer)
}
