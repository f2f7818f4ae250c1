use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use utoipa::ToSchema;

use crate::{
    roles::Role,
    sla::{SlaDeadline, SlaKind},
};

/// humanize
///
/// Turns a snake_case tag into a display label (`in_progress` -> `In Progress`).
pub fn humanize(tag: &str) -> String {
    tag.split('_')
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

// --- Enumerations ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS, ToSchema)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum TenantStatus {
    Active,
    Suspended,
    Inactive,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS, ToSchema)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum CustomerStatus {
    Active,
    Suspended,
    Cancelled,
}

impl CustomerStatus {
    pub fn variant(&self) -> &'static str {
        match self {
            CustomerStatus::Active => "default",
            CustomerStatus::Suspended => "destructive",
            CustomerStatus::Cancelled => "outline",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS, ToSchema)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum TicketStatus {
    Open,
    InProgress,
    Onsite,
    Resolved,
    Closed,
    Escalated,
}

impl TicketStatus {
    pub const ALL: [TicketStatus; 6] = [
        TicketStatus::Open,
        TicketStatus::InProgress,
        TicketStatus::Onsite,
        TicketStatus::Resolved,
        TicketStatus::Closed,
        TicketStatus::Escalated,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TicketStatus::Open => "open",
            TicketStatus::InProgress => "in_progress",
            TicketStatus::Onsite => "onsite",
            TicketStatus::Resolved => "resolved",
            TicketStatus::Closed => "closed",
            TicketStatus::Escalated => "escalated",
        }
    }

    pub fn variant(&self) -> &'static str {
        match self {
            TicketStatus::Open => "default",
            TicketStatus::InProgress | TicketStatus::Onsite => "secondary",
            TicketStatus::Resolved | TicketStatus::Closed => "outline",
            TicketStatus::Escalated => "destructive",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, TS, ToSchema)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum TicketPriority {
    Low,
    Medium,
    High,
    Critical,
}

impl TicketPriority {
    pub fn as_str(&self) -> &'static str {
        match self {
            TicketPriority::Low => "low",
            TicketPriority::Medium => "medium",
            TicketPriority::High => "high",
            TicketPriority::Critical => "critical",
        }
    }

    pub fn variant(&self) -> &'static str {
        match self {
            TicketPriority::Critical | TicketPriority::High => "destructive",
            TicketPriority::Medium => "secondary",
            TicketPriority::Low => "outline",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS, ToSchema)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum TicketCategory {
    Installation,
    Repair,
    Transfer,
    ItSupport,
    Billing,
}

impl TicketCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            TicketCategory::Installation => "installation",
            TicketCategory::Repair => "repair",
            TicketCategory::Transfer => "transfer",
            TicketCategory::ItSupport => "it_support",
            TicketCategory::Billing => "billing",
        }
    }

    /// Categories that send a technician to the customer's premises.
    pub fn is_field_job(&self) -> bool {
        matches!(self, TicketCategory::Installation | TicketCategory::Repair)
    }

    /// Categories routed to the IT staff queue.
    pub fn is_it_queue(&self) -> bool {
        matches!(self, TicketCategory::ItSupport | TicketCategory::Repair)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS, ToSchema)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum InvoiceStatus {
    Draft,
    Sent,
    Paid,
    Overdue,
    Disputed,
    Cancelled,
}

impl InvoiceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            InvoiceStatus::Draft => "draft",
            InvoiceStatus::Sent => "sent",
            InvoiceStatus::Paid => "paid",
            InvoiceStatus::Overdue => "overdue",
            InvoiceStatus::Disputed => "disputed",
            InvoiceStatus::Cancelled => "cancelled",
        }
    }

    pub fn variant(&self) -> &'static str {
        match self {
            InvoiceStatus::Draft | InvoiceStatus::Paid | InvoiceStatus::Cancelled => "outline",
            InvoiceStatus::Sent => "secondary",
            InvoiceStatus::Overdue | InvoiceStatus::Disputed => "destructive",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS, ToSchema)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum PaymentMethod {
    Cash,
    BankTransfer,
    Gcash,
    CreditCard,
}

// --- Core records ---

/// Tenant
///
/// An ISP operator hosted on the platform.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct Tenant {
    pub id: String,
    pub name: String,
    pub status: TenantStatus,
    /// Name of the tenant's administrator.
    pub admin: String,
    pub customers: u32,
    pub created_at: NaiveDate,
    pub plan: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct Customer {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub plan: String,
    pub status: CustomerStatus,
    /// Outstanding balance in whole pesos.
    pub balance: i64,
    pub tenant_id: String,
}

/// Ticket
///
/// A support ticket. The three SLA deadlines are optional; `sla_breach` is the
/// upstream breach flag and overrides any countdown computed from them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct Ticket {
    pub id: String,
    pub customer_id: String,
    pub customer_name: String,
    pub category: TicketCategory,
    pub priority: TicketPriority,
    pub status: TicketStatus,
    pub assignee_id: Option<String>,
    pub assignee_name: Option<String>,
    pub subject: String,
    pub description: String,
    #[ts(type = "string")]
    pub created_at: DateTime<Utc>,
    #[ts(type = "string")]
    pub updated_at: DateTime<Utc>,
    #[ts(type = "string | null")]
    pub sla_respond_due: Option<DateTime<Utc>>,
    #[ts(type = "string | null")]
    pub sla_onsite_due: Option<DateTime<Utc>>,
    #[ts(type = "string | null")]
    pub sla_resolve_due: Option<DateTime<Utc>>,
    pub sla_breach: bool,
    pub tenant_id: String,
}

impl Ticket {
    /// Every deadline present on the ticket, in respond/onsite/resolve order.
    pub fn sla_deadlines(&self) -> Vec<SlaDeadline> {
        [
            (SlaKind::Respond, self.sla_respond_due),
            (SlaKind::Onsite, self.sla_onsite_due),
            (SlaKind::Resolve, self.sla_resolve_due),
        ]
        .into_iter()
        .filter_map(|(kind, due)| due.map(|due_at| SlaDeadline::new(kind, due_at, self.sla_breach)))
        .collect()
    }

    pub fn deadline(&self, kind: SlaKind) -> Option<SlaDeadline> {
        let due = match kind {
            SlaKind::Respond => self.sla_respond_due,
            SlaKind::Onsite => self.sla_onsite_due,
            SlaKind::Resolve => self.sla_resolve_due,
        };
        due.map(|due_at| SlaDeadline::new(kind, due_at, self.sla_breach))
    }

    pub fn is_unassigned(&self) -> bool {
        self.assignee_id.is_none()
    }

    /// Case-insensitive match on id, customer name or subject.
    pub fn matches(&self, query: &str) -> bool {
        let query = query.to_lowercase();
        self.id.to_lowercase().contains(&query)
            || self.customer_name.to_lowercase().contains(&query)
            || self.subject.to_lowercase().contains(&query)
    }
}

impl Customer {
    /// Case-insensitive match on name, email or phone.
    pub fn matches(&self, query: &str) -> bool {
        let query = query.to_lowercase();
        self.name.to_lowercase().contains(&query)
            || self.email.to_lowercase().contains(&query)
            || self.phone.to_lowercase().contains(&query)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct Invoice {
    pub id: String,
    pub customer_id: String,
    pub customer_name: String,
    /// Whole pesos.
    pub amount: i64,
    pub due_date: NaiveDate,
    pub status: InvoiceStatus,
    pub issued_date: NaiveDate,
    pub paid_date: Option<NaiveDate>,
    pub tenant_id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct Payment {
    pub id: String,
    pub invoice_id: String,
    pub customer_id: String,
    pub customer_name: String,
    pub amount: i64,
    pub method: PaymentMethod,
    pub date: NaiveDate,
    pub reference: String,
    pub tenant_id: String,
}

/// User
///
/// A console account. Only used by the session store; the role switcher does
/// not require one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct User {
    pub id: String,
    pub email: String,
    pub name: String,
    pub role: Role,
    pub tenant_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct TimelineEvent {
    pub id: String,
    #[serde(rename = "type")]
    pub event_type: String,
    #[ts(type = "string")]
    pub timestamp: DateTime<Utc>,
    pub user: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct LineItem {
    pub description: String,
    pub quantity: u32,
    pub unit_price: i64,
    pub amount: i64,
}

/// AssigneeOption
///
/// Entry of the ticket assignee picker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct AssigneeOption {
    pub id: String,
    pub name: String,
}

/// Dataset
///
/// A point-in-time copy of everything the repository holds. Dashboards are built
/// from one snapshot so a single response never mixes two states.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    pub tenants: Vec<Tenant>,
    pub customers: Vec<Customer>,
    pub tickets: Vec<Ticket>,
    pub invoices: Vec<Invoice>,
    pub payments: Vec<Payment>,
    pub users: Vec<User>,
}

// --- Request payloads ---

/// CreateTicketRequest
///
/// Payload of the create-ticket dialog (POST /tickets).
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct CreateTicketRequest {
    pub customer_id: String,
    pub category: TicketCategory,
    #[serde(default = "default_priority")]
    pub priority: TicketPriority,
    pub subject: String,
    #[serde(default)]
    pub description: String,
}

fn default_priority() -> TicketPriority {
    TicketPriority::Medium
}

/// UpdateTicketRequest
///
/// Partial update from the ticket detail panel (PATCH /tickets/{id}).
/// An `assignee_id` of `"unassigned"` clears the assignment.
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct UpdateTicketRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<TicketStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<TicketPriority>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assignee_id: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS, ToSchema)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum InvoiceAction {
    LogPayment,
    IssueRefund,
    MarkDispute,
}

/// InvoiceActionRequest
///
/// Body of POST /invoices/{id}/actions. `method` only applies to `log_payment`
/// and defaults to cash.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct InvoiceActionRequest {
    pub action: InvoiceAction,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub method: Option<PaymentMethod>,
}

/// CreateTenantRequest
///
/// The collected fields of the five-step tenant stepper.
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct CreateTenantRequest {
    pub company_name: String,
    #[serde(default)]
    pub industry: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub contact_name: String,
    #[serde(default)]
    pub contact_email: String,
    #[serde(default)]
    pub contact_phone: String,
    #[serde(default)]
    pub plan: String,
    pub admin_name: String,
    pub admin_email: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}
