use crate::{AppState, handlers};
use axum::{
    Router,
    routing::{get, post},
};

/// Public Router Module
///
/// Endpoints that do not depend on who is asking: the role registry, pure
/// calculators (breadcrumbs, SLA chips, the view reducer) and the session
/// endpoints themselves.
pub fn public_routes() -> Router<AppState> {
    Router::new()
        // GET /health
        // Liveness check for load balancers.
        .route("/health", get(|| async { "ok" }))
        // GET /roles
        // Role switcher options.
        .route("/roles", get(handlers::get_roles))
        // GET /breadcrumbs?path=...
        .route("/breadcrumbs", get(handlers::get_breadcrumbs))
        // GET /sla?kind=...&due_at=...&breached=...
        .route("/sla", get(handlers::get_sla))
        // POST /view
        // Applies one reducer action to a posted view state.
        .route("/view", post(handlers::apply_view_action))
        // POST/GET/DELETE /session
        // Demo login, current session and logout.
        .route(
            "/session",
            post(handlers::login)
                .get(handlers::get_session)
                .delete(handlers::logout),
        )
}
