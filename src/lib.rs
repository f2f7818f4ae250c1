use axum::{
    Router,
    extract::{FromRef, Request},
    http::HeaderName,
    middleware::{self, Next},
    response::Response,
};
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

// Pure console logic.
pub mod breadcrumbs;
pub mod dashboards;
pub mod details;
pub mod format;
pub mod navigation;
pub mod roles;
pub mod sla;
pub mod tables;
pub mod view;

// Data, identity and the HTTP surface.
pub mod auth;
pub mod config;
pub mod fixtures;
pub mod handlers;
pub mod models;
pub mod repository;
pub mod session;

pub mod routes;
use auth::Viewer;
use routes::{console, public};

// --- Public Re-exports ---

pub use config::AppConfig;
pub use repository::{InMemoryRepository, RepositoryState};
pub use session::{MemorySessionStore, SessionState};

/// ApiDoc
///
/// OpenAPI document aggregated from the `#[utoipa::path]` handlers and the
/// `ToSchema` wire types. Served at `/api-docs/openapi.json`.
#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::get_roles, handlers::get_navigation, handlers::get_breadcrumbs,
        handlers::get_shell, handlers::apply_view_action, handlers::get_dashboard,
        handlers::get_sla, handlers::list_tickets, handlers::get_ticket,
        handlers::create_ticket, handlers::update_ticket, handlers::list_customers,
        handlers::list_invoices, handlers::get_invoice, handlers::invoice_action,
        handlers::list_tenants, handlers::create_tenant, handlers::login,
        handlers::get_session, handlers::logout
    ),
    components(
        schemas(
            roles::Role, roles::RoleSummary, navigation::NavEntry, breadcrumbs::Breadcrumb,
            sla::SlaKind, sla::SlaState, sla::SlaCountdown,
            view::ViewState, view::Action, view::Page, view::ShellView,
            handlers::ViewRequest, handlers::ViewResponse,
            dashboards::DashboardPage, dashboards::DashboardView, dashboards::Kpi,
            dashboards::Trend, dashboards::Chart, dashboards::ChartPoint,
            dashboards::TicketGroup, dashboards::JobCard,
            tables::TicketRow, tables::TicketTable, tables::CustomerRow,
            tables::CustomerTable, tables::InvoiceRow,
            details::TicketDetail, details::InvoiceDetail,
            models::Tenant, models::Customer, models::Ticket, models::Invoice,
            models::Payment, models::User, models::TimelineEvent, models::LineItem,
            models::AssigneeOption, models::CreateTicketRequest, models::UpdateTicketRequest,
            models::InvoiceAction, models::InvoiceActionRequest, models::CreateTenantRequest,
            models::LoginRequest, session::Session,
        )
    ),
    tags(
        (name = "isp-console", description = "Role-based ISP operator console API")
    )
)]
struct ApiDoc;

/// AppState
///
/// The single shared container of application services. Cloned per request;
/// every field is cheap to clone.
#[derive(Clone)]
pub struct AppState {
    /// Data layer. Seeded in-memory store at runtime, mocks in tests.
    pub repo: RepositoryState,
    /// Holds the logged-in session under `user-store`.
    pub sessions: SessionState,
    pub config: AppConfig,
}

impl AppState {
    /// State backed by the seeded demo data and an empty session store.
    pub fn seeded(config: AppConfig) -> Self {
        Self {
            repo: std::sync::Arc::new(InMemoryRepository::seeded()),
            sessions: std::sync::Arc::new(MemorySessionStore::new()),
            config,
        }
    }
}

// --- Axum FromRef Extractor Implementations ---

impl FromRef<AppState> for RepositoryState {
    fn from_ref(app_state: &AppState) -> RepositoryState {
        app_state.repo.clone()
    }
}

impl FromRef<AppState> for SessionState {
    fn from_ref(app_state: &AppState) -> SessionState {
        app_state.sessions.clone()
    }
}

impl FromRef<AppState> for AppConfig {
    fn from_ref(app_state: &AppState) -> AppConfig {
        app_state.config.clone()
    }
}

/// viewer_middleware
///
/// Rejects console requests that carry no usable identity (401) before any
/// handler runs. The resolved `Viewer` rides in the request extensions, so the
/// handlers' own extraction reuses it instead of decoding the token again.
async fn viewer_middleware(viewer: Viewer, mut request: Request, next: Next) -> Response {
    request.extensions_mut().insert(viewer);
    next.run(request).await
}

/// create_router
///
/// Assembles the routes, the viewer middleware, the shared state and the
/// observability layers.
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_methods(Any)
        .allow_origin(Any)
        .allow_headers(Any);

    let x_request_id = HeaderName::from_static("x-request-id");

    let base_router = Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .merge(public::public_routes())
        .merge(
            console::console_routes().route_layer(middleware::from_fn_with_state(
                state.clone(),
                viewer_middleware,
            )),
        )
        .with_state(state);

    base_router
        .layer(
            ServiceBuilder::new()
                // Generate an id for every incoming request.
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
                // Echo the id back to the client.
                .layer(PropagateRequestIdLayer::new(x_request_id)),
        )
        .layer(cors)
}

/// trace_span_logger
///
/// Span of one HTTP request, correlated by its `x-request-id`.
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
