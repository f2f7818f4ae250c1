//! Console view state.
//!
//! `ViewState` is the whole client-side state of the console shell. It only
//! changes through `reduce`, and everything painted around the page content
//! (title, sidebar, breadcrumbs, which page to show) is derived from it by
//! `render_shell`.

use serde::{Deserialize, Serialize};
use ts_rs::TS;
use utoipa::ToSchema;

use crate::{
    breadcrumbs::{self, Breadcrumb, ROOT_HREF},
    navigation::{self, NavEntry},
    roles::Role,
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct ViewState {
    pub role: Role,
    pub path: String,
    pub sidebar_collapsed: bool,
    pub selected_ticket: Option<String>,
    pub ticket_sheet_open: bool,
    pub create_ticket_open: bool,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            role: Role::SystemAdmin,
            path: ROOT_HREF.to_string(),
            sidebar_collapsed: true,
            selected_ticket: None,
            ticket_sheet_open: false,
            create_ticket_open: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS, ToSchema)]
#[serde(tag = "type", rename_all = "snake_case")]
#[ts(export)]
pub enum Action {
    /// Follows a link; on narrow screens the sidebar closes behind it.
    Navigate { path: String },
    /// The role switcher always lands on the new role's dashboard.
    SwitchRole { role: Role },
    ToggleSidebar,
    OpenTicket { id: String },
    CloseTicket,
    OpenCreateTicket,
    CloseCreateTicket,
}

/// reduce
///
/// Pure transition function of the console state.
pub fn reduce(state: ViewState, action: Action) -> ViewState {
    match action {
        Action::Navigate { path } => ViewState {
            path,
            sidebar_collapsed: true,
            ..state
        },
        Action::SwitchRole { role } => ViewState {
            role,
            path: ROOT_HREF.to_string(),
            ..state
        },
        Action::ToggleSidebar => ViewState {
            sidebar_collapsed: !state.sidebar_collapsed,
            ..state
        },
        Action::OpenTicket { id } => ViewState {
            selected_ticket: Some(id),
            ticket_sheet_open: true,
            ..state
        },
        Action::CloseTicket => ViewState {
            selected_ticket: None,
            ticket_sheet_open: false,
            ..state
        },
        Action::OpenCreateTicket => ViewState {
            create_ticket_open: true,
            ..state
        },
        Action::CloseCreateTicket => ViewState {
            create_ticket_open: false,
            ..state
        },
    }
}

/// Page
///
/// The content component the shell renders below the header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS, ToSchema)]
#[serde(tag = "kind", rename_all = "snake_case")]
#[ts(export)]
pub enum Page {
    Dashboard { role: Role },
    Tickets,
    Customers,
    Billing,
    Tenants,
    /// Placeholder for paths that have no content yet.
    ComingSoon { title: String },
    /// Placeholder with a retry action. No path resolves to it.
    DataUnavailable,
    Forbidden { path: String },
}

/// Leading slash added, trailing slashes dropped, empty path is the dashboard.
fn normalize(path: &str) -> String {
    match path.trim().trim_matches('/') {
        "" => ROOT_HREF.to_string(),
        trimmed => format!("/{trimmed}"),
    }
}

/// resolve_route
///
/// Maps a path to the page to render for `role`. Paths owned by a nav entry the
/// role may not see resolve to `Forbidden`; an unresolved role sees no
/// dashboard.
pub fn resolve_route(path: &str, role: Option<Role>) -> Page {
    let normalized = normalize(path);
    let path = normalized.as_str();

    let Some(role) = role else {
        return match navigation::owning_route(path) {
            Some(route) if route.path != ROOT_HREF => Page::Forbidden {
                path: path.to_string(),
            },
            _ => Page::ComingSoon {
                title: breadcrumbs::page_title(path, None),
            },
        };
    };

    if !navigation::can_access(role, path) {
        return Page::Forbidden {
            path: path.to_string(),
        };
    }

    match path {
        "/dashboard" => Page::Dashboard { role },
        "/tickets" => Page::Tickets,
        "/customers" => Page::Customers,
        "/billing" => Page::Billing,
        "/tenants" => Page::Tenants,
        other => Page::ComingSoon {
            title: breadcrumbs::page_title(other, Some(role)),
        },
    }
}

/// ShellView
///
/// Everything around the page content: header, sidebar and breadcrumbs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct ShellView {
    pub title: String,
    pub role: Option<Role>,
    pub user_name: Option<String>,
    pub tenant_name: Option<String>,
    pub navigation: Vec<NavEntry>,
    pub breadcrumbs: Vec<Breadcrumb>,
    pub page: Page,
}

/// Shell for a possibly-unresolved role at `path`.
pub fn render(role: Option<Role>, path: &str) -> ShellView {
    let normalized = normalize(path);
    let path = normalized.as_str();
    ShellView {
        title: breadcrumbs::page_title(path, role),
        role,
        user_name: role.map(|role| role.display_name().to_string()),
        tenant_name: role.and_then(|role| role.tenant_name()).map(str::to_string),
        navigation: navigation::nav_entries(role, path),
        breadcrumbs: breadcrumbs::build(path),
        page: resolve_route(path, role),
    }
}

pub fn render_shell(state: &ViewState) -> ShellView {
    render(Some(state.role), &state.path)
}
