//! Per-role dashboards.
//!
//! Each role gets its own landing page. KPI cards either carry fixed demo
//! figures or are counted from the current dataset snapshot; chart series are
//! fixed demo figures.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use ts_rs::TS;
use utoipa::ToSchema;

use crate::{
    fixtures::{self, DEMO_CUSTOMER_ID, DEMO_IT_ASSIGNEE, DEMO_SUPPORT_ASSIGNEE},
    format::{format_currency, format_number, format_percentage},
    models::{
        Dataset, InvoiceStatus, Payment, Tenant, Ticket, TicketCategory, TicketPriority,
        TicketStatus,
    },
    roles::Role,
    sla::{SlaCountdown, SlaKind},
    tables::{InvoiceRow, TicketRow, invoice_rows, ticket_rows},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS, ToSchema)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum Trend {
    Up,
    Down,
    Neutral,
}

/// Kpi
///
/// A KPI card. `value` is already formatted for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct Kpi {
    pub title: String,
    pub value: String,
    pub trend: Trend,
    pub change: String,
}

impl Kpi {
    fn new(title: &str, value: String, trend: Trend, change: &str) -> Self {
        Self {
            title: title.to_string(),
            value,
            trend,
            change: change.to_string(),
        }
    }

    pub fn number(title: &str, value: i64, trend: Trend, change: &str) -> Self {
        Self::new(title, format_number(value), trend, change)
    }

    pub fn currency(title: &str, value: i64, trend: Trend, change: &str) -> Self {
        Self::new(title, format_currency(value), trend, change)
    }

    pub fn percentage(title: &str, value: f64, trend: Trend, change: &str) -> Self {
        Self::new(title, format_percentage(value), trend, change)
    }

    /// Pre-rendered values such as `12m`.
    pub fn text(title: &str, value: &str, trend: Trend, change: &str) -> Self {
        Self::new(title, value.to_string(), trend, change)
    }
}

/// ChartPoint
///
/// One x-axis position; `values` maps series name to value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct ChartPoint {
    pub label: String,
    pub values: BTreeMap<String, i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct Chart {
    pub title: String,
    pub points: Vec<ChartPoint>,
}

impl Chart {
    fn new(title: &str, points: Vec<ChartPoint>) -> Self {
        Self {
            title: title.to_string(),
            points,
        }
    }
}

fn point(label: &str, values: &[(&str, i64)]) -> ChartPoint {
    ChartPoint {
        label: label.to_string(),
        values: values
            .iter()
            .map(|(series, value)| (series.to_string(), *value))
            .collect(),
    }
}

/// A named group of ticket rows, e.g. one tab of the support queue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct TicketGroup {
    pub title: String,
    pub rows: Vec<TicketRow>,
}

impl TicketGroup {
    fn new(title: &str, tickets: &[Ticket], now: DateTime<Utc>) -> Self {
        Self {
            title: title.to_string(),
            rows: ticket_rows(tickets, now),
        }
    }
}

/// JobCard
///
/// A field job: an installation or repair ticket joined with the customer's
/// contact details.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct JobCard {
    pub ticket_id: String,
    pub subject: String,
    pub customer_name: String,
    pub customer_address: Option<String>,
    pub customer_phone: Option<String>,
    pub category: TicketCategory,
    pub priority: TicketPriority,
    pub status: TicketStatus,
    pub onsite_sla: Option<SlaCountdown>,
}

/// DashboardView
///
/// Content of `/dashboard`, one variant per role.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS, ToSchema)]
#[serde(tag = "role", rename_all = "snake_case")]
#[ts(export)]
pub enum DashboardView {
    SuperAdmin {
        kpis: Vec<Kpi>,
        charts: Vec<Chart>,
        tenants: Vec<Tenant>,
    },
    SystemAdmin {
        kpis: Vec<Kpi>,
        charts: Vec<Chart>,
        priority_tickets: Vec<TicketRow>,
        recent_payments: Vec<Payment>,
    },
    CustomerSupport {
        kpis: Vec<Kpi>,
        queues: Vec<TicketGroup>,
    },
    BillingOfficer {
        kpis: Vec<Kpi>,
        charts: Vec<Chart>,
        invoices: Vec<InvoiceRow>,
    },
    ItStaff {
        kpis: Vec<Kpi>,
        queues: Vec<TicketGroup>,
    },
    FieldTechnician {
        jobs: Vec<JobCard>,
    },
    Customer {
        kpis: Vec<Kpi>,
        outstanding_balance: i64,
        next_bill_date: NaiveDate,
        open_tickets: usize,
        recent_invoices: Vec<InvoiceRow>,
        recent_tickets: Vec<TicketRow>,
    },
}

/// DashboardPage
///
/// Response of GET /dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct DashboardPage {
    pub title: String,
    pub view: DashboardView,
}

/// build
///
/// Renders the dashboard of `role` from one consistent snapshot.
pub fn build(role: Role, data: &Dataset, now: DateTime<Utc>) -> DashboardPage {
    let view = match role {
        Role::SuperAdmin => super_admin(data),
        Role::SystemAdmin => system_admin(data, now),
        Role::CustomerSupport => customer_support(data, now),
        Role::BillingOfficer => billing_officer(data),
        Role::ItStaff => it_staff(data, now),
        Role::FieldTechnician => field_technician(data, now),
        Role::Customer => customer_portal(data, now),
    };

    DashboardPage {
        title: role.dashboard_title().to_string(),
        view,
    }
}

fn super_admin(data: &Dataset) -> DashboardView {
    let kpis = vec![
        Kpi::number("Total Tenants", 58, Trend::Up, "5.5% from last month"),
        Kpi::number("Active Customers", 11800, Trend::Up, "7.3% from last month"),
        Kpi::currency("Platform Revenue", 295000, Trend::Up, "3.2% from last month"),
        Kpi::percentage("Growth Rate", 12.5, Trend::Up, "1.5% from last month"),
    ];

    let growth = [
        ("Jun", 45, 8500),
        ("Jul", 48, 9200),
        ("Aug", 52, 10100),
        ("Sep", 55, 11000),
        ("Oct", 58, 11800),
    ]
    .into_iter()
    .map(|(month, tenants, customers)| {
        point(month, &[("tenants", tenants), ("customers", customers)])
    })
    .collect();

    let revenue_by_tenant = [
        ("Metro Manila", 148000),
        ("Cebu Broadband", 95000),
        ("Davao Connect", 52000),
    ]
    .into_iter()
    .map(|(tenant, revenue)| point(tenant, &[("revenue", revenue)]))
    .collect();

    DashboardView::SuperAdmin {
        kpis,
        charts: vec![
            Chart::new("Platform Growth", growth),
            Chart::new("Revenue by Tenant", revenue_by_tenant),
        ],
        tenants: data.tenants.clone(),
    }
}

fn system_admin(data: &Dataset, now: DateTime<Utc>) -> DashboardView {
    let kpis = vec![
        Kpi::number("Open Tickets", 47, Trend::Down, "12% from last week"),
        Kpi::number("Overdue Invoices", 23, Trend::Up, "5% from last week"),
        Kpi::currency("Monthly Revenue", 148000, Trend::Down, "2% from last month"),
        Kpi::number("SLA Breaches", 3, Trend::Neutral, "Same as last week"),
    ];

    let by_status = [("Open", 12), ("In Progress", 8), ("Resolved", 24), ("Escalated", 3)]
        .into_iter()
        .map(|(status, count)| point(status, &[("value", count)]))
        .collect();

    let revenue = [
        ("Jun", 125000),
        ("Jul", 138000),
        ("Aug", 142000),
        ("Sep", 151000),
        ("Oct", 148000),
    ]
    .into_iter()
    .map(|(month, revenue)| point(month, &[("revenue", revenue)]))
    .collect();

    let by_plan = [("Fiber 50", 45000), ("Fiber 100", 68000), ("Fiber 200", 35000)]
        .into_iter()
        .map(|(plan, revenue)| point(plan, &[("revenue", revenue)]))
        .collect();

    let priority: Vec<Ticket> = data
        .tickets
        .iter()
        .filter(|ticket| ticket.priority >= TicketPriority::High)
        .take(5)
        .cloned()
        .collect();

    DashboardView::SystemAdmin {
        kpis,
        charts: vec![
            Chart::new("Tickets by Status", by_status),
            Chart::new("Revenue Trend", revenue),
            Chart::new("Revenue by Plan", by_plan),
        ],
        priority_tickets: ticket_rows(&priority, now),
        recent_payments: data.payments.iter().take(5).cloned().collect(),
    }
}

fn customer_support(data: &Dataset, now: DateTime<Utc>) -> DashboardView {
    let assigned = tickets_where(data, |t| t.assignee_id.as_deref() == Some(DEMO_SUPPORT_ASSIGNEE));
    let unassigned = tickets_where(data, Ticket::is_unassigned);
    let overdue = tickets_where(data, |t| t.sla_breach);

    let kpis = vec![
        Kpi::number("My Assigned", assigned.len() as i64, Trend::Neutral, "Same as yesterday"),
        Kpi::number("Unassigned", unassigned.len() as i64, Trend::Up, "2 new tickets"),
        Kpi::number("Overdue", overdue.len() as i64, Trend::Down, "1 less than yesterday"),
        Kpi::text("Avg Response Time", "12m", Trend::Down, "Improved by 20%"),
    ];

    DashboardView::CustomerSupport {
        kpis,
        queues: vec![
            TicketGroup::new("My Assigned", &assigned, now),
            TicketGroup::new("Unassigned", &unassigned, now),
            TicketGroup::new("Overdue", &overdue, now),
        ],
    }
}

fn billing_officer(data: &Dataset) -> DashboardView {
    let total_overdue: i64 = data
        .invoices
        .iter()
        .filter(|invoice| invoice.status == InvoiceStatus::Overdue)
        .map(|invoice| invoice.amount)
        .sum();

    let kpis = vec![
        Kpi::currency("Total Billed", 185000, Trend::Up, "8% from last month"),
        Kpi::currency("Collected", 148000, Trend::Up, "5% from last month"),
        Kpi::currency("Overdue", total_overdue, Trend::Down, "3% from last month"),
        Kpi::number("Payments Today", 12, Trend::Neutral, "Same as yesterday"),
    ];

    let collections = [
        ("Jun", 125000, 130000),
        ("Jul", 138000, 135000),
        ("Aug", 142000, 140000),
        ("Sep", 151000, 150000),
        ("Oct", 148000, 155000),
    ]
    .into_iter()
    .map(|(month, collected, target)| {
        point(month, &[("collected", collected), ("target", target)])
    })
    .collect();

    DashboardView::BillingOfficer {
        kpis,
        charts: vec![Chart::new("Collections vs Target", collections)],
        invoices: invoice_rows(&data.invoices),
    }
}

fn it_staff(data: &Dataset, now: DateTime<Utc>) -> DashboardView {
    let queue = tickets_where(data, |t| t.category.is_it_queue());
    let mine: Vec<Ticket> = queue
        .iter()
        .filter(|t| t.assignee_id.as_deref() == Some(DEMO_IT_ASSIGNEE))
        .cloned()
        .collect();
    let unassigned: Vec<Ticket> = queue.iter().filter(|t| t.is_unassigned()).cloned().collect();

    let kpis = vec![
        Kpi::number("My Open Tickets", mine.len() as i64, Trend::Neutral, "Same as yesterday"),
        Kpi::number("Unassigned", unassigned.len() as i64, Trend::Down, "2 less than yesterday"),
        Kpi::number("Resolved Today", 5, Trend::Up, "25% more than yesterday"),
        Kpi::text("Avg Resolution Time", "4.2h", Trend::Down, "Improved by 15%"),
    ];

    DashboardView::ItStaff {
        kpis,
        queues: vec![
            TicketGroup::new("My Assigned Tickets", &mine, now),
            TicketGroup::new("Unassigned Tickets", &unassigned, now),
        ],
    }
}

fn field_technician(data: &Dataset, now: DateTime<Utc>) -> DashboardView {
    let jobs = data
        .tickets
        .iter()
        .filter(|ticket| ticket.category.is_field_job())
        .map(|ticket| {
            let customer = data.customers.iter().find(|c| c.id == ticket.customer_id);
            JobCard {
                ticket_id: ticket.id.clone(),
                subject: ticket.subject.clone(),
                customer_name: ticket.customer_name.clone(),
                customer_address: customer.map(|c| c.address.clone()),
                customer_phone: customer.map(|c| c.phone.clone()),
                category: ticket.category,
                priority: ticket.priority,
                status: ticket.status,
                onsite_sla: ticket
                    .deadline(SlaKind::Onsite)
                    .map(|deadline| deadline.evaluate(now)),
            }
        })
        .collect();

    DashboardView::FieldTechnician { jobs }
}

fn customer_portal(data: &Dataset, now: DateTime<Utc>) -> DashboardView {
    let invoices: Vec<_> = data
        .invoices
        .iter()
        .filter(|invoice| invoice.customer_id == DEMO_CUSTOMER_ID)
        .cloned()
        .collect();
    let tickets = tickets_where(data, |t| t.customer_id == DEMO_CUSTOMER_ID);

    let outstanding_balance: i64 = invoices
        .iter()
        .filter(|invoice| invoice.status != InvoiceStatus::Paid)
        .map(|invoice| invoice.amount)
        .sum();
    let open_tickets = tickets
        .iter()
        .filter(|ticket| ticket.status == TicketStatus::Open)
        .count();
    let next_bill_date = fixtures::next_bill_date();

    let kpis = vec![
        Kpi::currency("Outstanding Balance", outstanding_balance, Trend::Neutral, ""),
        Kpi::text(
            "Next Bill Date",
            &next_bill_date.format("%Y-%m-%d").to_string(),
            Trend::Neutral,
            "",
        ),
        Kpi::number("Open Tickets", open_tickets as i64, Trend::Neutral, ""),
    ];

    DashboardView::Customer {
        kpis,
        outstanding_balance,
        next_bill_date,
        open_tickets,
        recent_invoices: invoice_rows(&invoices[..invoices.len().min(3)]),
        recent_tickets: ticket_rows(&tickets[..tickets.len().min(3)], now),
    }
}

fn tickets_where(data: &Dataset, predicate: impl Fn(&Ticket) -> bool) -> Vec<Ticket> {
    data.tickets
        .iter()
        .filter(|ticket| predicate(*ticket))
        .cloned()
        .collect()
}
