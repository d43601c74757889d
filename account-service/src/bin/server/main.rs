use std::sync::Arc;

use account_service::config::Config;
use account_service::domain::user::auth_service::AuthService;
use account_service::domain::user::profile_service::ProfileService;
use account_service::inbound::http::router::create_router;
use account_service::outbound::cache::RedisProfileCache;
use account_service::outbound::repositories::PostgresUserRepository;
use auth::TokenIssuer;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "account_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "account-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    tracing::info!(
        http_port = config.server.http_port,
        cache_enabled = config.cache.url.is_some(),
        cache_ttl_seconds = config.cache.ttl_seconds,
        jwt_expiration_hours = config.jwt.expiration_hours,
        "Configuration loaded"
    );

    let pg_pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&config.database.url)
        .await?;
    tracing::info!(
        max_connections = 5,
        database = "postgresql",
        "Database connection pool created"
    );

    sqlx::migrate!("./migrations").run(&pg_pool).await?;
    tracing::info!(database = "postgresql", "Database migrations completed");

    let token_issuer = Arc::new(TokenIssuer::new(
        config.jwt.secret.as_bytes(),
        chrono::Duration::hours(config.jwt.expiration_hours),
    ));

    let user_repository = Arc::new(PostgresUserRepository::new(pg_pool));

    // The cache is an optional capability: a missing URL or a failed
    // connection leaves the service running with uncached reads.
    let profile_cache = match &config.cache.url {
        Some(url) => match RedisProfileCache::connect(url, config.cache.op_timeout()).await {
            Ok(cache) => {
                tracing::info!(cache = "redis", "Profile cache connected");
                Some(Arc::new(cache))
            }
            Err(e) => {
                tracing::warn!(error = %e, "Profile cache unavailable, continuing without it");
                None
            }
        },
        None => None,
    };

    let auth_service = Arc::new(AuthService::new(
        Arc::clone(&user_repository),
        Arc::clone(&token_issuer),
    ));
    let profile_service = Arc::new(ProfileService::new(
        Arc::clone(&user_repository),
        profile_cache,
        config.cache.ttl(),
    ));

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    let application = create_router(auth_service, profile_service, token_issuer);
    axum::serve(http_listener, application).await?;

    Ok(())
}
