use crate::{
    AppState,
    auth::Viewer,
    breadcrumbs::{self, Breadcrumb, ROOT_HREF},
    dashboards::{self, DashboardPage},
    details::{self, InvoiceDetail, TicketDetail},
    fixtures::{self, DEMO_CUSTOMER_ID},
    models::{
        CreateTenantRequest, CreateTicketRequest, InvoiceActionRequest, LoginRequest, Tenant,
        Ticket, UpdateTicketRequest,
    },
    navigation::{self, NavEntry},
    repository::InvoiceActionError,
    roles::{self, Role, RoleSummary},
    session::{self, LoginError, Session},
    sla::{self, SlaCountdown, SlaKind},
    tables::{self, CustomerTable, InvoiceRow, TicketTable},
    view::{self, Action, ShellView, ViewState},
};
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use utoipa::ToSchema;

// --- Query Structs ---

/// PathQuery
///
/// The console location a response is rendered for (`?path=/tickets`).
#[derive(Deserialize, utoipa::IntoParams)]
pub struct PathQuery {
    /// Defaults to `/dashboard`.
    pub path: Option<String>,
}

impl PathQuery {
    fn path(&self) -> &str {
        self.path.as_deref().unwrap_or(ROOT_HREF)
    }
}

#[derive(Deserialize, utoipa::IntoParams)]
pub struct SearchQuery {
    /// Case-insensitive free-text filter.
    pub search: Option<String>,
}

/// SlaQuery
///
/// Inputs of a single countdown chip.
#[derive(Deserialize, utoipa::IntoParams)]
pub struct SlaQuery {
    /// `respond`, `onsite` or `resolve`.
    pub kind: String,
    /// RFC 3339 timestamp of the deadline.
    pub due_at: DateTime<Utc>,
    pub breached: Option<bool>,
}

/// ViewRequest
///
/// An action applied to the posted state; a missing state starts from the
/// console's initial state.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct ViewRequest {
    #[serde(default)]
    pub state: Option<ViewState>,
    pub action: Action,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct ViewResponse {
    pub state: ViewState,
    pub shell: ShellView,
}

// --- Access Helpers ---

/// require_route
///
/// Resolves the viewer's role and checks it against the nav entry owning
/// `route`. Unknown roles and roles the entry does not admit get 403.
fn require_route(viewer: &Viewer, route: &str) -> Result<Role, StatusCode> {
    match viewer.role() {
        Some(role) if navigation::can_access(role, route) => Ok(role),
        _ => {
            tracing::debug!(role = %viewer.role, route, "route not visible to viewer");
            Err(StatusCode::FORBIDDEN)
        }
    }
}

/// Customers only ever see their own tickets.
fn ticket_visible(role: Role, ticket: &Ticket) -> bool {
    match role {
        Role::Customer => ticket.customer_id == DEMO_CUSTOMER_ID,
        Role::SuperAdmin
        | Role::SystemAdmin
        | Role::CustomerSupport
        | Role::BillingOfficer
        | Role::ItStaff
        | Role::FieldTechnician => true,
    }
}

// --- Console Shell ---

/// get_roles
///
/// Options of the role switcher, in switcher order.
#[utoipa::path(
    get,
    path = "/roles",
    responses((status = 200, description = "Role registry", body = [RoleSummary]))
)]
pub async fn get_roles() -> Json<Vec<RoleSummary>> {
    Json(roles::registry())
}

/// get_navigation
///
/// Sidebar entries visible to the viewer. An unknown role tag gets an empty list.
#[utoipa::path(
    get,
    path = "/navigation",
    params(PathQuery),
    responses((status = 200, description = "Visible navigation", body = [NavEntry]))
)]
pub async fn get_navigation(viewer: Viewer, Query(query): Query<PathQuery>) -> Json<Vec<NavEntry>> {
    Json(navigation::nav_entries(viewer.role(), query.path()))
}

#[utoipa::path(
    get,
    path = "/breadcrumbs",
    params(PathQuery),
    responses((status = 200, description = "Breadcrumb chain", body = [Breadcrumb]))
)]
pub async fn get_breadcrumbs(Query(query): Query<PathQuery>) -> Json<Vec<Breadcrumb>> {
    Json(breadcrumbs::build(query.path()))
}

/// get_shell
///
/// Header, sidebar, breadcrumbs and resolved page for the viewer at `path`.
#[utoipa::path(
    get,
    path = "/shell",
    params(PathQuery),
    responses((status = 200, description = "Shell view", body = ShellView))
)]
pub async fn get_shell(viewer: Viewer, Query(query): Query<PathQuery>) -> Json<ShellView> {
    Json(view::render(viewer.role(), query.path()))
}

/// apply_view_action
///
/// Runs the console reducer server-side and returns the new state with its shell.
#[utoipa::path(
    post,
    path = "/view",
    request_body = ViewRequest,
    responses((status = 200, description = "Next state", body = ViewResponse))
)]
pub async fn apply_view_action(Json(payload): Json<ViewRequest>) -> Json<ViewResponse> {
    let state = view::reduce(payload.state.unwrap_or_default(), payload.action);
    let shell = view::render_shell(&state);
    Json(ViewResponse { state, shell })
}

/// get_dashboard
///
/// The viewer's role dashboard, built from one repository snapshot.
#[utoipa::path(
    get,
    path = "/dashboard",
    responses(
        (status = 200, description = "Dashboard", body = DashboardPage),
        (status = 403, description = "Unknown role")
    )
)]
pub async fn get_dashboard(
    viewer: Viewer,
    State(state): State<AppState>,
) -> Result<Json<DashboardPage>, StatusCode> {
    let role = require_route(&viewer, ROOT_HREF)?;
    let data = state.repo.snapshot().await;
    Ok(Json(dashboards::build(role, &data, Utc::now())))
}

/// get_sla
///
/// Evaluates one countdown chip against the server clock.
#[utoipa::path(
    get,
    path = "/sla",
    params(SlaQuery),
    responses(
        (status = 200, description = "Countdown", body = SlaCountdown),
        (status = 400, description = "Unknown SLA kind")
    )
)]
pub async fn get_sla(Query(query): Query<SlaQuery>) -> Result<Json<SlaCountdown>, StatusCode> {
    let kind: SlaKind = query.kind.parse().map_err(|e: String| {
        tracing::debug!(error = %e, "rejected SLA query");
        StatusCode::BAD_REQUEST
    })?;
    Ok(Json(sla::evaluate_now(kind, query.due_at, query.breached)))
}

// --- Tickets ---

#[utoipa::path(
    get,
    path = "/tickets",
    params(SearchQuery),
    responses(
        (status = 200, description = "Ticket table", body = TicketTable),
        (status = 403, description = "Tickets not visible to role")
    )
)]
pub async fn list_tickets(
    viewer: Viewer,
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<TicketTable>, StatusCode> {
    let role = require_route(&viewer, "/tickets")?;
    let tickets: Vec<Ticket> = state
        .repo
        .get_tickets(query.search)
        .await
        .into_iter()
        .filter(|ticket| ticket_visible(role, ticket))
        .collect();
    Ok(Json(tables::ticket_table(&tickets, Utc::now())))
}

/// get_ticket
///
/// Detail panel of a single ticket. Tickets hidden from the role are reported
/// as not found.
#[utoipa::path(
    get,
    path = "/tickets/{id}",
    params(("id" = String, Path, description = "Ticket ID")),
    responses(
        (status = 200, description = "Ticket detail", body = TicketDetail),
        (status = 404, description = "Not Found")
    )
)]
pub async fn get_ticket(
    viewer: Viewer,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<TicketDetail>, StatusCode> {
    let role = require_route(&viewer, "/tickets")?;
    match state.repo.get_ticket(&id).await {
        Some(ticket) if ticket_visible(role, &ticket) => {
            Ok(Json(details::ticket_detail(ticket, Utc::now())))
        }
        _ => Err(StatusCode::NOT_FOUND),
    }
}

/// create_ticket
///
/// Simulated: the ticket only lives in the in-memory store.
#[utoipa::path(
    post,
    path = "/tickets",
    request_body = CreateTicketRequest,
    responses(
        (status = 201, description = "Ticket Created", body = Ticket),
        (status = 400, description = "Missing subject or unknown customer")
    )
)]
pub async fn create_ticket(
    viewer: Viewer,
    State(state): State<AppState>,
    Json(payload): Json<CreateTicketRequest>,
) -> Result<(StatusCode, Json<Ticket>), StatusCode> {
    let role = require_route(&viewer, "/tickets")?;
    if payload.subject.trim().is_empty() {
        return Err(StatusCode::BAD_REQUEST);
    }
    if role == Role::Customer && payload.customer_id != DEMO_CUSTOMER_ID {
        return Err(StatusCode::FORBIDDEN);
    }

    match state.repo.create_ticket(payload, Utc::now()).await {
        Some(ticket) => Ok((StatusCode::CREATED, Json(ticket))),
        None => Err(StatusCode::BAD_REQUEST),
    }
}

/// update_ticket
///
/// Simulated status, priority and assignee changes from the detail panel.
#[utoipa::path(
    patch,
    path = "/tickets/{id}",
    params(("id" = String, Path, description = "Ticket ID")),
    request_body = UpdateTicketRequest,
    responses(
        (status = 200, description = "Updated", body = Ticket),
        (status = 400, description = "Unknown assignee"),
        (status = 404, description = "Not Found")
    )
)]
pub async fn update_ticket(
    viewer: Viewer,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<UpdateTicketRequest>,
) -> Result<Json<Ticket>, StatusCode> {
    let role = require_route(&viewer, "/tickets")?;

    if let Some(assignee_id) = payload.assignee_id.as_deref() {
        let known = fixtures::assignee_options()
            .iter()
            .any(|option| option.id == assignee_id);
        if !known {
            return Err(StatusCode::BAD_REQUEST);
        }
    }

    match state.repo.get_ticket(&id).await {
        Some(ticket) if ticket_visible(role, &ticket) => {}
        _ => return Err(StatusCode::NOT_FOUND),
    }

    state
        .repo
        .update_ticket(&id, payload, Utc::now())
        .await
        .map(Json)
        .ok_or(StatusCode::NOT_FOUND)
}

// --- Customers ---

#[utoipa::path(
    get,
    path = "/customers",
    params(SearchQuery),
    responses(
        (status = 200, description = "Customer table", body = CustomerTable),
        (status = 403, description = "Customers not visible to role")
    )
)]
pub async fn list_customers(
    viewer: Viewer,
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<CustomerTable>, StatusCode> {
    require_route(&viewer, "/customers")?;
    let customers = state.repo.get_customers(query.search).await;
    Ok(Json(tables::customer_table(&customers)))
}

// --- Billing ---

#[utoipa::path(
    get,
    path = "/invoices",
    responses(
        (status = 200, description = "Invoices", body = [InvoiceRow]),
        (status = 403, description = "Billing not visible to role")
    )
)]
pub async fn list_invoices(
    viewer: Viewer,
    State(state): State<AppState>,
) -> Result<Json<Vec<InvoiceRow>>, StatusCode> {
    require_route(&viewer, "/billing")?;
    let invoices = state.repo.get_invoices().await;
    Ok(Json(tables::invoice_rows(&invoices)))
}

#[utoipa::path(
    get,
    path = "/invoices/{id}",
    params(("id" = String, Path, description = "Invoice ID")),
    responses(
        (status = 200, description = "Invoice detail", body = InvoiceDetail),
        (status = 404, description = "Not Found")
    )
)]
pub async fn get_invoice(
    viewer: Viewer,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<InvoiceDetail>, StatusCode> {
    require_route(&viewer, "/billing")?;
    match state.repo.get_invoice(&id).await {
        Some(invoice) => Ok(Json(details::invoice_detail(invoice))),
        None => Err(StatusCode::NOT_FOUND),
    }
}

/// invoice_action
///
/// Simulated payment, refund or dispute. Actions the panel does not offer for
/// the invoice's current status are rejected.
#[utoipa::path(
    post,
    path = "/invoices/{id}/actions",
    params(("id" = String, Path, description = "Invoice ID")),
    request_body = InvoiceActionRequest,
    responses(
        (status = 200, description = "Action applied", body = InvoiceDetail),
        (status = 400, description = "Action not available"),
        (status = 404, description = "Not Found")
    )
)]
pub async fn invoice_action(
    viewer: Viewer,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<InvoiceActionRequest>,
) -> Result<Json<InvoiceDetail>, StatusCode> {
    require_route(&viewer, "/billing")?;

    let today = Utc::now().date_naive();
    match state.repo.apply_invoice_action(&id, payload, today).await {
        Ok(invoice) => Ok(Json(details::invoice_detail(invoice))),
        Err(InvoiceActionError::NotFound) => Err(StatusCode::NOT_FOUND),
        Err(InvoiceActionError::NotAvailable { .. }) => Err(StatusCode::BAD_REQUEST),
    }
}

// --- Platform ---

#[utoipa::path(
    get,
    path = "/tenants",
    responses(
        (status = 200, description = "Tenants", body = [Tenant]),
        (status = 403, description = "Tenants not visible to role")
    )
)]
pub async fn list_tenants(
    viewer: Viewer,
    State(state): State<AppState>,
) -> Result<Json<Vec<Tenant>>, StatusCode> {
    require_route(&viewer, "/tenants")?;
    Ok(Json(state.repo.get_tenants().await))
}

/// create_tenant
///
/// Final step of the tenant stepper. Company, admin name and admin email are
/// required.
#[utoipa::path(
    post,
    path = "/tenants",
    request_body = CreateTenantRequest,
    responses(
        (status = 201, description = "Tenant Created", body = Tenant),
        (status = 400, description = "Missing required field")
    )
)]
pub async fn create_tenant(
    viewer: Viewer,
    State(state): State<AppState>,
    Json(payload): Json<CreateTenantRequest>,
) -> Result<(StatusCode, Json<Tenant>), StatusCode> {
    require_route(&viewer, "/tenants")?;

    let missing = [&payload.company_name, &payload.admin_name, &payload.admin_email]
        .iter()
        .any(|field| field.trim().is_empty());
    if missing {
        return Err(StatusCode::BAD_REQUEST);
    }

    let tenant = state
        .repo
        .create_tenant(payload, Utc::now().date_naive())
        .await;
    Ok((StatusCode::CREATED, Json(tenant)))
}

// --- Session ---

/// login
///
/// Demo login against the fixture accounts.
#[utoipa::path(
    post,
    path = "/session",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Logged in", body = Session),
        (status = 400, description = "Missing credentials"),
        (status = 401, description = "Unknown account")
    )
)]
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<Session>, StatusCode> {
    let result = session::login(
        state.repo.as_ref(),
        state.sessions.as_ref(),
        &state.config,
        payload,
        Utc::now(),
    )
    .await;

    match result {
        Ok(session) => Ok(Json(session)),
        Err(LoginError::MissingCredentials) => Err(StatusCode::BAD_REQUEST),
        Err(LoginError::UnknownUser) => Err(StatusCode::UNAUTHORIZED),
        Err(e) => {
            tracing::error!(error = %e, "login failed");
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// get_session
///
/// The stored session, shown only to the user it belongs to. Requests without
/// a token are 401 in production and see no session locally.
#[utoipa::path(
    get,
    path = "/session",
    responses(
        (status = 200, description = "Current session", body = Session),
        (status = 401, description = "Missing or invalid token"),
        (status = 404, description = "No session for this user")
    )
)]
pub async fn get_session(
    viewer: Viewer,
    State(state): State<AppState>,
) -> Result<Json<Session>, StatusCode> {
    let user_id = viewer.user_id.as_deref().ok_or(StatusCode::NOT_FOUND)?;
    session::current_session(state.sessions.as_ref(), user_id)
        .await
        .map(Json)
        .ok_or(StatusCode::NOT_FOUND)
}

/// logout
///
/// Clears the caller's own session.
#[utoipa::path(
    delete,
    path = "/session",
    responses(
        (status = 204, description = "Logged out"),
        (status = 401, description = "Missing or invalid token"),
        (status = 404, description = "No session for this user")
    )
)]
pub async fn logout(viewer: Viewer, State(state): State<AppState>) -> StatusCode {
    let Some(user_id) = viewer.user_id.as_deref() else {
        return StatusCode::NOT_FOUND;
    };
    if session::logout(state.sessions.as_ref(), user_id).await {
        StatusCode::NO_CONTENT
    } else {
        StatusCode::NOT_FOUND
    }
}
