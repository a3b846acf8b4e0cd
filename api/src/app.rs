//! Application state and factory
//!
//! Wires the configured collaborators (repositories, key-value store,
//! notifier, vehicle source) into the core services and builds the
//! actix-web application around them.

use std::sync::Arc;

use actix_web::{
    body::MessageBody,
    dev::{ServiceFactory, ServiceRequest, ServiceResponse},
    error::{JsonPayloadError, PathError, QueryPayloadError},
    web, App, Error, HttpRequest, HttpResponse,
};
use tracing_actix_web::TracingLogger;

use am_core::repositories::{
    InMemoryListingRepository, InMemoryReviewRepository, InMemoryUserRepository, InMemoryVehicleRepository,
    InMemoryWatchlistRepository, ListingRepository, ReviewRepository, UserRepository, VehicleRepository,
    WatchlistRepository,
};
use am_core::services::{
    EnrichmentClient, KeyValueStore, ListingEnrichmentComposer, ListingService, Notifier, OtpService,
    OtpServiceConfig, ReviewService, TokenService, TokenServiceConfig, UserService, UserServiceConfig,
    VehicleService, VehicleSource,
};
use am_infra::{
    ConsoleNotifier, DatabasePool, HttpVehicleSource, InfrastructureError, MemoryKeyValueStore,
    MySqlListingRepository, MySqlReviewRepository, MySqlUserRepository, MySqlVehicleRepository,
    MySqlWatchlistRepository, RedisClient, SmtpNotifier,
};
use am_shared::{error_codes, AppConfig, CacheBackend, CorsConfig, EmailBackend, ErrorResponse, StorageBackend};

use crate::handlers::ApiError;
use crate::middleware::create_cors;
use crate::routes;

/// Services shared by every worker
pub struct AppState {
    pub users: Arc<UserService>,
    pub vehicles: Arc<VehicleService>,
    pub listings: Arc<ListingService>,
    pub reviews: Arc<ReviewService>,
    pub tokens: Arc<TokenService>,
}

/// Adapters behind the core service traits
pub struct Collaborators {
    pub users: Arc<dyn UserRepository>,
    pub vehicles: Arc<dyn VehicleRepository>,
    pub listings: Arc<dyn ListingRepository>,
    pub watchlist: Arc<dyn WatchlistRepository>,
    pub reviews: Arc<dyn ReviewRepository>,
    pub store: Arc<dyn KeyValueStore>,
    pub notifier: Arc<dyn Notifier>,
    pub vehicle_source: Arc<dyn VehicleSource>,
}

impl Collaborators {
    /// Connect the backends selected in `config`
    pub async fn from_config(config: &AppConfig) -> Result<Self, InfrastructureError> {
        let vehicle_source: Arc<dyn VehicleSource> = Arc::new(HttpVehicleSource::new(&config.enrichment)?);

        let store: Arc<dyn KeyValueStore> = match config.cache.backend {
            CacheBackend::Redis => Arc::new(RedisClient::new(&config.cache).await?),
            CacheBackend::Memory => Arc::new(MemoryKeyValueStore::new()),
        };

        let notifier: Arc<dyn Notifier> = match config.email.backend {
            EmailBackend::Smtp => Arc::new(SmtpNotifier::new(&config.email)?),
            EmailBackend::Console => {
                tracing::warn!("Email backend is console; OTP codes are written to the log");
                Arc::new(ConsoleNotifier::new())
            }
        };

        match config.database.backend {
            StorageBackend::Memory => {
                tracing::warn!("Using in-memory storage; data is lost on restart");
                let mut collaborators = Self::in_memory(notifier, vehicle_source);
                collaborators.store = store;
                Ok(collaborators)
            }
            StorageBackend::Mysql => {
                let database = DatabasePool::new(&config.database).await?;
                if config.database.run_migrations {
                    database.run_migrations().await?;
                }
                tracing::info!(stats = %database.get_statistics(), "Database ready");

                let pool = database.get_pool().clone();
                Ok(Self {
                    users: Arc::new(MySqlUserRepository::new(pool.clone())),
                    vehicles: Arc::new(MySqlVehicleRepository::new(pool.clone())),
                    listings: Arc::new(MySqlListingRepository::new(pool.clone())),
                    watchlist: Arc::new(MySqlWatchlistRepository::new(pool.clone())),
                    reviews: Arc::new(MySqlReviewRepository::new(pool)),
                    store,
                    notifier,
                    vehicle_source,
                })
            }
        }
    }

    /// Everything in process except the notifier and vehicle source
    pub fn in_memory(notifier: Arc<dyn Notifier>, vehicle_source: Arc<dyn VehicleSource>) -> Self {
        Self {
            users: Arc::new(InMemoryUserRepository::new()),
            vehicles: Arc::new(InMemoryVehicleRepository::new()),
            listings: Arc::new(InMemoryListingRepository::new()),
            watchlist: Arc::new(InMemoryWatchlistRepository::new()),
            reviews: Arc::new(InMemoryReviewRepository::new()),
            store: Arc::new(MemoryKeyValueStore::new()),
            notifier,
            vehicle_source,
        }
    }
}

impl AppState {
    pub fn new(config: &AppConfig, collaborators: Collaborators) -> Self {
        let tokens = Arc::new(TokenService::new(TokenServiceConfig::from(&config.auth.jwt)));
        let otp = Arc::new(OtpService::new(
            collaborators.store,
            collaborators.notifier,
            collaborators.users.clone(),
            OtpServiceConfig::from(&config.otp),
        ));
        let users = Arc::new(UserService::new(
            collaborators.users,
            otp,
            tokens.clone(),
            UserServiceConfig::from(&config.auth),
        ));

        let enrichment = Arc::new(EnrichmentClient::with_timeout(
            collaborators.vehicle_source,
            config.enrichment.timeout(),
        ));
        let composer = Arc::new(ListingEnrichmentComposer::new(enrichment));

        Self {
            users,
            vehicles: Arc::new(VehicleService::new(collaborators.vehicles)),
            listings: Arc::new(ListingService::new(
                collaborators.listings,
                collaborators.watchlist,
                composer,
            )),
            reviews: Arc::new(ReviewService::new(collaborators.reviews)),
            tokens,
        }
    }
}

/// Create and configure the application
pub fn create_app(
    state: web::Data<AppState>,
    cors: &CorsConfig,
    max_payload_size: usize,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(state)
        .app_data(
            web::JsonConfig::default()
                .limit(max_payload_size)
                .error_handler(json_error_handler),
        )
        .app_data(web::QueryConfig::default().error_handler(query_error_handler))
        .app_data(web::PathConfig::default().error_handler(path_error_handler))
        .wrap(create_cors(cors))
        .wrap(TracingLogger::default())
        .route("/health", web::get().to(health_check))
        .service(web::scope("/api").configure(routes::configure))
        .default_service(web::route().to(not_found))
}

fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> Error {
    ApiError::bad_request(format!("Invalid JSON body: {}", err)).into()
}

fn query_error_handler(err: QueryPayloadError, _req: &HttpRequest) -> Error {
    ApiError::bad_request(format!("Invalid query string: {}", err)).into()
}

fn path_error_handler(err: PathError, _req: &HttpRequest) -> Error {
    ApiError::bad_request(format!("Invalid path parameter: {}", err)).into()
}

/// Health check endpoint handler
async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "service": "automarket-api",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

async fn not_found(req: HttpRequest) -> HttpResponse {
    HttpResponse::NotFound().json(ErrorResponse::new(
        error_codes::NOT_FOUND,
        format!("No route for {} {}", req.method(), req.path()),
    ))
}
