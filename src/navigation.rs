use serde::{Deserialize, Serialize};
use ts_rs::TS;
use utoipa::ToSchema;

use crate::roles::Role;

/// RouteDescriptor
///
/// One entry of the sidebar. Descriptors are declared once in `NAV_ROUTES` and
/// never change at runtime; `allowed_roles` is never empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouteDescriptor {
    pub path: &'static str,
    pub title: &'static str,
    pub allowed_roles: &'static [Role],
}

impl RouteDescriptor {
    pub fn admits(&self, role: Role) -> bool {
        self.allowed_roles.contains(&role)
    }

    /// A route is active for the exact path and for any path nested below it.
    pub fn is_active(&self, current_path: &str) -> bool {
        current_path == self.path
            || current_path
                .strip_prefix(self.path)
                .is_some_and(|rest| rest.starts_with('/'))
    }
}

/// The sidebar in declaration order.
pub static NAV_ROUTES: [RouteDescriptor; 10] = [
    RouteDescriptor {
        path: "/dashboard",
        title: "Dashboard",
        allowed_roles: &Role::ALL,
    },
    RouteDescriptor {
        path: "/tickets",
        title: "Tickets",
        allowed_roles: &[
            Role::SystemAdmin,
            Role::CustomerSupport,
            Role::ItStaff,
            Role::FieldTechnician,
            Role::Customer,
        ],
    },
    RouteDescriptor {
        path: "/billing",
        title: "Billing",
        allowed_roles: &[Role::SystemAdmin, Role::BillingOfficer],
    },
    RouteDescriptor {
        path: "/customers",
        title: "Customers",
        allowed_roles: &[Role::SystemAdmin, Role::CustomerSupport, Role::BillingOfficer],
    },
    RouteDescriptor {
        path: "/users",
        title: "Users",
        allowed_roles: &[Role::SuperAdmin, Role::SystemAdmin],
    },
    RouteDescriptor {
        path: "/technicians",
        title: "Technicians",
        allowed_roles: &[Role::SystemAdmin],
    },
    RouteDescriptor {
        path: "/tenants",
        title: "Tenants",
        allowed_roles: &[Role::SuperAdmin],
    },
    RouteDescriptor {
        path: "/reports",
        title: "Reports",
        allowed_roles: &[Role::SuperAdmin, Role::SystemAdmin],
    },
    RouteDescriptor {
        path: "/integrations",
        title: "Integrations",
        allowed_roles: &[Role::SystemAdmin],
    },
    RouteDescriptor {
        path: "/settings",
        title: "Settings",
        allowed_roles: &[Role::SuperAdmin, Role::SystemAdmin, Role::Customer],
    },
];

/// filter_routes
///
/// Returns the descriptors `role` may see, in the order they were declared.
pub fn filter_routes(role: Role, routes: &[RouteDescriptor]) -> Vec<&RouteDescriptor> {
    routes.iter().filter(|route| route.admits(role)).collect()
}

/// visible_routes
///
/// Sidebar for a possibly-unresolved role. A tag that did not parse into a `Role`
/// sees nothing; this is not treated as an error.
pub fn visible_routes(role: Option<Role>) -> Vec<&'static RouteDescriptor> {
    match role {
        Some(role) => filter_routes(role, &NAV_ROUTES),
        None => Vec::new(),
    }
}

/// owning_route
///
/// The nav descriptor a path belongs to (`/tickets/TK-1` belongs to `/tickets`).
pub fn owning_route(path: &str) -> Option<&'static RouteDescriptor> {
    NAV_ROUTES.iter().find(|route| route.is_active(path))
}

/// can_access
///
/// Paths outside the nav table are not gated.
pub fn can_access(role: Role, path: &str) -> bool {
    owning_route(path).is_none_or(|route| route.admits(role))
}

/// NavEntry
///
/// Serialized sidebar item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct NavEntry {
    pub title: String,
    pub href: String,
    pub active: bool,
}

/// Builds the sidebar entries for `role` with the active flag set against `current_path`.
pub fn nav_entries(role: Option<Role>, current_path: &str) -> Vec<NavEntry> {
    visible_routes(role)
        .into_iter()
        .map(|route| NavEntry {
            title: route.title.to_string(),
            href: route.path.to_string(),
            active: route.is_active(current_path),
        })
        .collect()
}
