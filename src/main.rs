use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use axum::extract::MatchedPath;
use dotenvy::dotenv;
use http::HeaderValue;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use bank_api::application::ports::account_repository::AccountRepository;
use bank_api::bootstrap::app_context::{AppContext, AppServices};
use bank_api::bootstrap::config::{Config, StoreBackend};
use bank_api::infrastructure::crypto::jwt::JwtTokenCodec;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[derive(OpenApi)]
#[openapi(
        paths(
            bank_api::presentation::http::auth::login,
            bank_api::presentation::http::accounts::list_accounts,
            bank_api::presentation::http::accounts::create_account,
            bank_api::presentation::http::accounts::get_account,
            bank_api::presentation::http::accounts::delete_account,
            bank_api::presentation::http::accounts::update_account,
            bank_api::presentation::http::transfers::transfer,
            bank_api::presentation::http::health::health,
        ),
        components(schemas(
            bank_api::presentation::http::auth::LoginRequest,
            bank_api::presentation::http::accounts::Account,
            bank_api::presentation::http::accounts::CreateAccountRequest,
            bank_api::presentation::http::accounts::UpdateAccountRequest,
            bank_api::presentation::http::transfers::TransferRequest,
            bank_api::presentation::http::error::ErrorBody,
            bank_api::presentation::http::health::HealthResp,
        )),
        tags(
            (name = "Auth", description = "Login echo"),
            (name = "Accounts", description = "Account management"),
            (name = "Transfers", description = "Transfer requests (echoed, not applied)"),
            (name = "Health", description = "System health checks")
        )
    )]
struct ApiDoc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("RUST_LOG")
                .unwrap_or_else(|_| "bank_api=debug,axum=info,tower_http=info".into()),
        )
        .init();

    let cfg = Config::from_env()?;
    info!(?cfg, "Starting bank API");

    // Store
    let (account_repo, pool) = match cfg.store_backend {
        StoreBackend::Postgres => {
            let pool = bank_api::infrastructure::db::connect_pool(
                &cfg.database_url,
                cfg.db_max_connections,
            )
            .await?;
            bank_api::infrastructure::db::migrate(&pool).await?;
            let repo: Arc<dyn AccountRepository> = Arc::new(
                bank_api::infrastructure::db::repositories::account_repository_sqlx::SqlxAccountRepository::new(
                    pool.clone(),
                ),
            );
            (repo, Some(pool))
        }
        StoreBackend::Memory => {
            tracing::warn!("store_backend_memory_data_is_not_persisted");
            let repo: Arc<dyn AccountRepository> =
                Arc::new(bank_api::infrastructure::memory::InMemoryAccountRepository::new());
            (repo, None)
        }
    };

    let tokens = Arc::new(JwtTokenCodec::new(
        cfg.jwt_secret.as_bytes(),
        cfg.jwt_expires_secs,
    ));
    let ctx = AppContext::new(cfg.clone(), AppServices::new(account_repo, tokens));

    let methods = [
        http::Method::GET,
        http::Method::POST,
        http::Method::DELETE,
        http::Method::PATCH,
        http::Method::OPTIONS,
    ];
    let headers = [http::header::CONTENT_TYPE, http::header::AUTHORIZATION];
    let cors = match cfg.frontend_url.as_deref().map(HeaderValue::from_str) {
        Some(Ok(origin)) => CorsLayer::new()
            .allow_origin(origin)
            .allow_methods(methods)
            .allow_headers(headers),
        _ if cfg.is_production => CorsLayer::new()
            .allow_origin(AllowOrigin::exact(HeaderValue::from_static("http://invalid")))
            .allow_methods(methods)
            .allow_headers(headers),
        // Development convenience
        _ => CorsLayer::new()
            .allow_origin(AllowOrigin::mirror_request())
            .allow_methods(methods)
            .allow_headers(headers),
    };

    let app = Router::new()
        .merge(bank_api::presentation::http::router(ctx))
        .merge(bank_api::presentation::http::health::routes(pool))
        .merge(SwaggerUi::new("/docs").url("/openapi.json", ApiDoc::openapi()))
        .layer(cors)
        .layer(
            TraceLayer::new_for_http().make_span_with(|req: &http::Request<_>| {
                let method = req.method().clone();
                let uri = req.uri().clone();
                let matched = req
                    .extensions()
                    .get::<MatchedPath>()
                    .map(|p| p.as_str().to_string())
                    .unwrap_or_default();
                tracing::info_span!("http", %method, %uri, matched_path = %matched)
            }),
        );

    let api_addr = SocketAddr::from(([0, 0, 0, 0], cfg.api_port));
    info!(%api_addr, "HTTP API listening");
    let listener = tokio::net::TcpListener::bind(api_addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = ?e, "failed to listen for shutdown signal");
    }
    info!("shutdown_signal_received");
}
