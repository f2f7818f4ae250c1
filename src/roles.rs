use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use ts_rs::TS;
use utoipa::ToSchema;

/// Role
///
/// The closed set of personas the console renders for. The wire tag is the
/// snake_case variant name (e.g. `billing_officer`), which is also what the
/// `x-role` switcher header and the `role` JWT claim carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS, ToSchema)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum Role {
    /// Platform operator, sees every tenant.
    SuperAdmin,
    /// Administrator of a single ISP tenant.
    SystemAdmin,
    CustomerSupport,
    BillingOfficer,
    ItStaff,
    FieldTechnician,
    /// End subscriber of a tenant.
    Customer,
}

/// Tenant shown in the top bar for every tenant-scoped role.
pub const DEFAULT_TENANT_NAME: &str = "Metro Manila Fiber";

impl Role {
    /// Every role, in role-switcher order.
    pub const ALL: [Role; 7] = [
        Role::SuperAdmin,
        Role::SystemAdmin,
        Role::CustomerSupport,
        Role::BillingOfficer,
        Role::ItStaff,
        Role::FieldTechnician,
        Role::Customer,
    ];

    /// parse
    ///
    /// Resolves a wire tag into a role. Unknown tags yield `None`; callers treat that
    /// as "no access" rather than an error.
    pub fn parse(tag: &str) -> Option<Role> {
        Role::ALL.into_iter().find(|role| role.as_str() == tag)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::SuperAdmin => "super_admin",
            Role::SystemAdmin => "system_admin",
            Role::CustomerSupport => "customer_support",
            Role::BillingOfficer => "billing_officer",
            Role::ItStaff => "it_staff",
            Role::FieldTechnician => "field_technician",
            Role::Customer => "customer",
        }
    }

    /// Name shown in the top bar user menu.
    pub fn display_name(&self) -> &'static str {
        match self {
            Role::SuperAdmin => "Super Admin",
            Role::SystemAdmin => "System Admin",
            Role::CustomerSupport => "Support Agent",
            Role::BillingOfficer => "Billing Officer",
            Role::ItStaff => "IT Staff",
            Role::FieldTechnician => "Field Tech",
            Role::Customer => "Customer",
        }
    }

    /// Label used by the role switcher.
    pub fn switcher_label(&self) -> &'static str {
        match self {
            Role::SuperAdmin => "Super Admin",
            Role::SystemAdmin => "System Admin",
            Role::CustomerSupport => "Customer Support",
            Role::BillingOfficer => "Billing Officer",
            Role::ItStaff => "IT Staff",
            Role::FieldTechnician => "Field Technician",
            Role::Customer => "Customer",
        }
    }

    /// Page title of `/dashboard` for this role.
    pub fn dashboard_title(&self) -> &'static str {
        match self {
            Role::SuperAdmin => "Platform Dashboard",
            Role::SystemAdmin => "Tenant Dashboard",
            Role::CustomerSupport => "Support Dashboard",
            Role::BillingOfficer => "Billing Dashboard",
            Role::ItStaff => "IT Dashboard",
            Role::FieldTechnician => "My Jobs",
            Role::Customer => "My Account",
        }
    }

    /// The platform operator is not scoped to a tenant.
    pub fn tenant_name(&self) -> Option<&'static str> {
        match self {
            Role::SuperAdmin => None,
            _ => Some(DEFAULT_TENANT_NAME),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// UnknownRole
///
/// Returned by `FromStr` for tags outside the closed set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownRole(pub String);

impl fmt::Display for UnknownRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown role tag `{}`", self.0)
    }
}

impl std::error::Error for UnknownRole {}

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Role::parse(s).ok_or_else(|| UnknownRole(s.to_string()))
    }
}

/// RoleSummary
///
/// Registry entry served to the client for the role switcher (GET /roles).
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct RoleSummary {
    pub role: Role,
    pub label: String,
    pub display_name: String,
    pub dashboard_title: String,
    pub tenant_name: Option<String>,
}

impl From<Role> for RoleSummary {
    fn from(role: Role) -> Self {
        Self {
            role,
            label: role.switcher_label().to_string(),
            display_name: role.display_name().to_string(),
            dashboard_title: role.dashboard_title().to_string(),
            tenant_name: role.tenant_name().map(str::to_string),
        }
    }
}

/// The full registry in switcher order.
pub fn registry() -> Vec<RoleSummary> {
    Role::ALL.into_iter().map(RoleSummary::from).collect()
}
