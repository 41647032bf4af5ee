use axum::{
    Router,
    extract::FromRef,
    http::HeaderName,
    routing::{delete, get, patch, post},
};
use std::sync::Arc;
use tokio::sync::Mutex;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::{DefaultOnResponse, TraceLayer},
};
use tracing::{Level, Span};

// --- Module Structure ---

// Routing core: where the user is, what is declared, what gets drawn.
pub mod gate;
pub mod navigation;
pub mod renderer;
pub mod routes;
pub mod view;

// Client state and its collaborators.
pub mod api;
pub mod credentials;
pub mod models;
pub mod store;

// HTTP shell.
pub mod config;
pub mod handlers;
pub mod shell;

// --- Public Re-exports ---

pub use api::{ApiState, BurgerApi, HttpBurgerApi, MockBurgerApi};
pub use config::AppConfig;
pub use credentials::{CredentialState, FileCredentialStore, MemoryCredentialStore};
pub use navigation::{Location, LocationState, Navigator};
pub use renderer::{Frame, Layer, render, render_with};
pub use store::Store;

/// ApiDoc
///
/// OpenAPI description of the shell endpoints, served at `/api-docs/openapi.json`.
#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::get_frame, handlers::push_location, handlers::replace_location,
        handlers::open_overlay, handlers::go_back, handlers::go_forward,
        handlers::close_overlay, handlers::get_store, handlers::login, handlers::register,
        handlers::logout, handlers::update_user, handlers::refresh_session,
        handlers::forgot_password, handlers::reset_password,
        handlers::refresh_profile_orders, handlers::add_ingredient,
        handlers::remove_ingredient, handlers::move_ingredient, handlers::place_order,
        handlers::close_order_modal, handlers::get_order, handlers::refresh_feed
    ),
    components(
        schemas(
            models::Ingredient, models::IngredientKind, models::ConstructorIngredient,
            models::Order, models::Feed, models::User, models::LoginData,
            models::RegisterData, models::UserUpdate, models::ForgotPasswordData,
            models::ResetPasswordData,
            handlers::NavigateRequest, handlers::OverlayRequest,
            handlers::AddIngredientRequest, handlers::MoveIngredientRequest,
            store::RootState, store::UserState, store::IngredientsState,
            store::OrderState, store::ConstructorItems, store::FeedState,
        )
    ),
    tags(
        (name = "stellar-burgers", description = "Stellar Burgers application shell")
    )
)]
struct ApiDoc;

/// StoreState
///
/// The process-wide store, shared by every handler.
pub type StoreState = Arc<Store>;

/// NavigatorState
///
/// The history stack. Navigations are serialised through the mutex, so a frame is
/// always rendered from the location its own navigation produced.
pub type NavigatorState = Arc<Mutex<Navigator>>;

/// AppState
///
/// Everything the handlers share: the store, the navigator and the configuration.
#[derive(Clone)]
pub struct AppState {
    pub store: StoreState,
    pub navigator: NavigatorState,
    pub config: AppConfig,
}

impl AppState {
    /// Fresh state around `store`, starting at `/`.
    pub fn new(store: Store, config: AppConfig) -> Self {
        Self {
            store: Arc::new(store),
            navigator: Arc::new(Mutex::new(Navigator::default())),
            config,
        }
    }
}

// --- Axum FromRef Extractor Implementations ---

impl FromRef<AppState> for StoreState {
    fn from_ref(app_state: &AppState) -> StoreState {
        app_state.store.clone()
    }
}

impl FromRef<AppState> for NavigatorState {
    fn from_ref(app_state: &AppState) -> NavigatorState {
        app_state.navigator.clone()
    }
}

impl FromRef<AppState> for AppConfig {
    fn from_ref(app_state: &AppState) -> AppConfig {
        app_state.config.clone()
    }
}

/// create_router
///
/// Assembles the shell's routes, applies the observability layers and registers the
/// application state.
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_methods(Any)
        .allow_origin(Any)
        .allow_headers(Any);

    let x_request_id = HeaderName::from_static("x-request-id");

    let navigation = Router::new()
        .route("/frame", get(handlers::get_frame))
        .route("/navigation/push", post(handlers::push_location))
        .route("/navigation/replace", post(handlers::replace_location))
        .route("/navigation/overlay", post(handlers::open_overlay))
        .route("/navigation/back", post(handlers::go_back))
        .route("/navigation/forward", post(handlers::go_forward))
        .route("/navigation/close-overlay", post(handlers::close_overlay));

    let session = Router::new()
        .route("/session/login", post(handlers::login))
        .route("/session/register", post(handlers::register))
        .route("/session/logout", post(handlers::logout))
        .route("/session/user", patch(handlers::update_user))
        .route("/session/refresh", post(handlers::refresh_session))
        .route("/session/forgot-password", post(handlers::forgot_password))
        .route("/session/reset-password", post(handlers::reset_password))
        .route("/profile/orders/refresh", post(handlers::refresh_profile_orders));

    let orders = Router::new()
        .route("/constructor/ingredients", post(handlers::add_ingredient))
        .route("/constructor/ingredients/{id}", delete(handlers::remove_ingredient))
        .route("/constructor/move", post(handlers::move_ingredient))
        .route("/orders", post(handlers::place_order))
        .route("/orders/modal/close", post(handlers::close_order_modal))
        .route("/orders/{number}", get(handlers::get_order))
        .route("/feed/refresh", post(handlers::refresh_feed));

    let base_router = Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .route("/health", get(|| async { "ok" }))
        .route("/store", get(handlers::get_store))
        .merge(navigation)
        .merge(session)
        .merge(orders)
        .with_state(state);

    base_router
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::new(x_request_id.clone(), MakeRequestUuid))
                .layer(
                    TraceLayer::new_for_http()
                        .make_span_with(trace_span_logger)
                        .on_response(
                            DefaultOnResponse::new()
                                .level(Level::INFO)
                                .latency_unit(tower_http::LatencyUnit::Millis),
                        ),
                )
                .layer(PropagateRequestIdLayer::new(x_request_id)),
        )
        .layer(cors)
}

/// trace_span_logger
///
/// Span for one HTTP request, tagged with its `x-request-id` so every log line of the
/// request can be correlated.
fn trace_span_logger(request: &axum::http::Request<axum::body::Body>) -> Span {
    let request_id = request
        .headers()
        .get("x-request-id")
        .and_then(|value| value.to_str().ok())
        .unwrap_or("unknown");

    tracing::info_span!(
        "http_request",
        method = ?request.method(),
        uri = ?request.uri(),
        req_id = %request_id,
    )
}
