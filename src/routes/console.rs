use crate::{AppState, handlers};
use axum::{
    Router,
    routing::{get, post},
};

/// Console Router Module
///
/// Everything rendered for a viewer. The router is wrapped in the viewer
/// middleware, so a request without a usable identity never reaches a handler.
/// Which role may read what is decided inside the handlers against the
/// navigation table.
pub fn console_routes() -> Router<AppState> {
    Router::<AppState>::new()
        // --- Shell ---
        .route("/navigation", get(handlers::get_navigation))
        .route("/shell", get(handlers::get_shell))
        .route("/dashboard", get(handlers::get_dashboard))
        // --- Tickets ---
        .route(
            "/tickets",
            get(handlers::list_tickets).post(handlers::create_ticket),
        )
        .route(
            "/tickets/{id}",
            get(handlers::get_ticket).patch(handlers::update_ticket),
        )
        // --- Customers ---
        .route("/customers", get(handlers::list_customers))
        // --- Billing ---
        .route("/invoices", get(handlers::list_invoices))
        .route("/invoices/{id}", get(handlers::get_invoice))
        .route("/invoices/{id}/actions", post(handlers::invoice_action))
        // --- Platform ---
        .route(
            "/tenants",
            get(handlers::list_tenants).post(handlers::create_tenant),
        )
}
