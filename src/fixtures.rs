//! Static demo data the console is seeded with.
//!
//! Everything here is fixed demo content for tenant `tenant-1` (Metro Manila
//! Fiber) plus the platform-level tenant list.

use chrono::{DateTime, NaiveDate, Utc};

use crate::{
    models::{
        AssigneeOption, Customer, CustomerStatus, Dataset, Invoice, InvoiceStatus, LineItem,
        Payment, PaymentMethod, Tenant, TenantStatus, Ticket, TicketCategory, TicketPriority,
        TicketStatus, TimelineEvent, User,
    },
    roles::Role,
};

pub const DEMO_TENANT_ID: &str = "tenant-1";

/// Customer whose account the `customer` role views.
pub const DEMO_CUSTOMER_ID: &str = "cust-1";

/// Assignee id of the logged-in support agent.
pub const DEMO_SUPPORT_ASSIGNEE: &str = "support-1";

/// Assignee id of the logged-in IT staff member.
pub const DEMO_IT_ASSIGNEE: &str = "tech-1";

/// Next bill date shown on the customer portal.
pub fn next_bill_date() -> NaiveDate {
    date(2025, 11, 1)
}

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default()
}

fn at(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> DateTime<Utc> {
    date(year, month, day)
        .and_hms_opt(hour, minute, 0)
        .map(|naive| naive.and_utc())
        .unwrap_or_default()
}

pub fn tenants() -> Vec<Tenant> {
    vec![
        Tenant {
            id: "tenant-1".into(),
            name: "Metro Manila Fiber".into(),
            status: TenantStatus::Active,
            admin: "Juan dela Cruz".into(),
            customers: 1250,
            created_at: date(2024, 1, 15),
            plan: Some("Enterprise".into()),
        },
        Tenant {
            id: "tenant-2".into(),
            name: "Cebu Broadband Co.".into(),
            status: TenantStatus::Active,
            admin: "Maria Santos".into(),
            customers: 890,
            created_at: date(2024, 3, 20),
            plan: Some("Professional".into()),
        },
        Tenant {
            id: "tenant-3".into(),
            name: "Davao Connect".into(),
            status: TenantStatus::Suspended,
            admin: "Pedro Reyes".into(),
            customers: 450,
            created_at: date(2024, 6, 10),
            plan: Some("Starter".into()),
        },
    ]
}

#[allow(clippy::too_many_arguments)]
fn customer(
    id: &str,
    name: &str,
    email: &str,
    phone: &str,
    address: &str,
    plan: &str,
    status: CustomerStatus,
    balance: i64,
) -> Customer {
    Customer {
        id: id.into(),
        name: name.into(),
        email: email.into(),
        phone: phone.into(),
        address: address.into(),
        plan: plan.into(),
        status,
        balance,
        tenant_id: DEMO_TENANT_ID.into(),
    }
}

pub fn customers() -> Vec<Customer> {
    vec![
        customer(
            "cust-1",
            "Roberto Martinez",
            "roberto.m@email.com",
            "+63 917 123 4567",
            "123 Rizal St, Makati City",
            "Fiber 100 Mbps",
            CustomerStatus::Active,
            0,
        ),
        customer(
            "cust-2",
            "Ana Reyes",
            "ana.reyes@email.com",
            "+63 918 234 5678",
            "456 Quezon Ave, QC",
            "Fiber 50 Mbps",
            CustomerStatus::Active,
            2500,
        ),
        customer(
            "cust-3",
            "Carlos Bautista",
            "carlos.b@email.com",
            "+63 919 345 6789",
            "789 EDSA, Pasig City",
            "Fiber 200 Mbps",
            CustomerStatus::Suspended,
            7500,
        ),
        customer(
            "cust-4",
            "Linda Garcia",
            "linda.g@email.com",
            "+63 920 456 7890",
            "321 Taft Ave, Manila",
            "Fiber 100 Mbps",
            CustomerStatus::Active,
            1200,
        ),
    ]
}

pub fn tickets() -> Vec<Ticket> {
    vec![
        Ticket {
            id: "TK-2025-001".into(),
            customer_id: "cust-1".into(),
            customer_name: "Roberto Martinez".into(),
            category: TicketCategory::Repair,
            priority: TicketPriority::High,
            status: TicketStatus::Open,
            assignee_id: Some("tech-1".into()),
            assignee_name: Some("John Tech".into()),
            subject: "No internet connection".into(),
            description:
                "Customer reports complete loss of internet connectivity since this morning."
                    .into(),
            created_at: at(2025, 10, 16, 8, 30),
            updated_at: at(2025, 10, 16, 8, 30),
            sla_respond_due: Some(at(2025, 10, 16, 10, 30)),
            sla_onsite_due: Some(at(2025, 10, 16, 16, 30)),
            sla_resolve_due: Some(at(2025, 10, 17, 8, 30)),
            sla_breach: false,
            tenant_id: DEMO_TENANT_ID.into(),
        },
        Ticket {
            id: "TK-2025-002".into(),
            customer_id: "cust-2".into(),
            customer_name: "Ana Reyes".into(),
            category: TicketCategory::Installation,
            priority: TicketPriority::Medium,
            status: TicketStatus::InProgress,
            assignee_id: Some("tech-2".into()),
            assignee_name: Some("Mike Installer".into()),
            subject: "New fiber installation".into(),
            description: "Schedule installation for Fiber 50 Mbps plan.".into(),
            created_at: at(2025, 10, 15, 14, 0),
            updated_at: at(2025, 10, 16, 9, 0),
            sla_respond_due: Some(at(2025, 10, 15, 16, 0)),
            sla_onsite_due: Some(at(2025, 10, 18, 14, 0)),
            sla_resolve_due: Some(at(2025, 10, 20, 14, 0)),
            sla_breach: false,
            tenant_id: DEMO_TENANT_ID.into(),
        },
        Ticket {
            id: "TK-2025-003".into(),
            customer_id: "cust-3".into(),
            customer_name: "Carlos Bautista".into(),
            category: TicketCategory::Billing,
            priority: TicketPriority::Critical,
            status: TicketStatus::Escalated,
            assignee_id: Some("support-1".into()),
            assignee_name: Some("Jane Support".into()),
            subject: "Billing dispute - overcharged".into(),
            description: "Customer claims to be charged for services not rendered.".into(),
            created_at: at(2025, 10, 14, 10, 0),
            updated_at: at(2025, 10, 16, 7, 0),
            sla_respond_due: Some(at(2025, 10, 14, 11, 0)),
            sla_onsite_due: Some(at(2025, 10, 14, 14, 0)),
            sla_resolve_due: Some(at(2025, 10, 15, 10, 0)),
            sla_breach: true,
            tenant_id: DEMO_TENANT_ID.into(),
        },
        Ticket {
            id: "TK-2025-004".into(),
            customer_id: "cust-4".into(),
            customer_name: "Linda Garcia".into(),
            category: TicketCategory::ItSupport,
            priority: TicketPriority::Low,
            status: TicketStatus::Open,
            assignee_id: None,
            assignee_name: None,
            subject: "Router configuration help".into(),
            description: "Customer needs assistance configuring WiFi settings.".into(),
            created_at: at(2025, 10, 16, 7, 0),
            updated_at: at(2025, 10, 16, 7, 0),
            sla_respond_due: Some(at(2025, 10, 16, 15, 0)),
            sla_onsite_due: None,
            sla_resolve_due: Some(at(2025, 10, 18, 7, 0)),
            sla_breach: false,
            tenant_id: DEMO_TENANT_ID.into(),
        },
    ]
}

pub fn invoices() -> Vec<Invoice> {
    let invoice = |id: &str,
                   customer_id: &str,
                   customer_name: &str,
                   amount: i64,
                   due_date: NaiveDate,
                   status: InvoiceStatus,
                   issued_date: NaiveDate,
                   paid_date: Option<NaiveDate>| Invoice {
        id: id.into(),
        customer_id: customer_id.into(),
        customer_name: customer_name.into(),
        amount,
        due_date,
        status,
        issued_date,
        paid_date,
        tenant_id: DEMO_TENANT_ID.into(),
    };

    vec![
        invoice(
            "INV-2025-10-001",
            "cust-1",
            "Roberto Martinez",
            1500,
            date(2025, 10, 25),
            InvoiceStatus::Sent,
            date(2025, 10, 1),
            None,
        ),
        invoice(
            "INV-2025-10-002",
            "cust-2",
            "Ana Reyes",
            2500,
            date(2025, 10, 15),
            InvoiceStatus::Overdue,
            date(2025, 10, 1),
            None,
        ),
        invoice(
            "INV-2025-10-003",
            "cust-3",
            "Carlos Bautista",
            7500,
            date(2025, 10, 5),
            InvoiceStatus::Disputed,
            date(2025, 9, 25),
            None,
        ),
        invoice(
            "INV-2025-09-004",
            "cust-4",
            "Linda Garcia",
            1200,
            date(2025, 9, 25),
            InvoiceStatus::Paid,
            date(2025, 9, 1),
            Some(date(2025, 9, 20)),
        ),
    ]
}

pub fn payments() -> Vec<Payment> {
    vec![
        Payment {
            id: "PAY-001".into(),
            invoice_id: "INV-2025-09-004".into(),
            customer_id: "cust-4".into(),
            customer_name: "Linda Garcia".into(),
            amount: 1200,
            method: PaymentMethod::Gcash,
            date: date(2025, 9, 20),
            reference: "GC20250920001".into(),
            tenant_id: DEMO_TENANT_ID.into(),
        },
        Payment {
            id: "PAY-002".into(),
            invoice_id: "INV-2025-09-001".into(),
            customer_id: "cust-1".into(),
            customer_name: "Roberto Martinez".into(),
            amount: 1500,
            method: PaymentMethod::BankTransfer,
            date: date(2025, 9, 15),
            reference: "BT20250915001".into(),
            tenant_id: DEMO_TENANT_ID.into(),
        },
    ]
}

/// One demo account per role.
pub fn users() -> Vec<User> {
    let user = |id: &str, name: &str, email: &str, role: Role| User {
        id: id.into(),
        email: email.into(),
        name: name.into(),
        role,
        tenant_id: role.tenant_name().map(|_| DEMO_TENANT_ID.to_string()),
    };

    vec![
        user("user-1", "Admin User", "admin@example.com", Role::SuperAdmin),
        user("user-2", "System Admin", "sysadmin@metro-fiber.com", Role::SystemAdmin),
        user("user-3", "Support Agent", "support@metro-fiber.com", Role::CustomerSupport),
        user("user-4", "Billing Officer", "billing@metro-fiber.com", Role::BillingOfficer),
        user("user-5", "IT Staff", "it@metro-fiber.com", Role::ItStaff),
        user("user-6", "John Tech", "john.tech@metro-fiber.com", Role::FieldTechnician),
        user("user-7", "Roberto Martinez", "roberto.m@email.com", Role::Customer),
    ]
}

/// Options of the ticket assignee picker. `unassigned` clears the assignment.
pub fn assignee_options() -> Vec<AssigneeOption> {
    [
        ("unassigned", "Unassigned"),
        ("tech-1", "John Tech"),
        ("tech-2", "Mike Installer"),
        ("support-1", "Jane Support"),
    ]
    .into_iter()
    .map(|(id, name)| AssigneeOption {
        id: id.into(),
        name: name.into(),
    })
    .collect()
}

fn event(id: &str, event_type: &str, timestamp: DateTime<Utc>, user: &str, description: &str) -> TimelineEvent {
    TimelineEvent {
        id: id.into(),
        event_type: event_type.into(),
        timestamp,
        user: user.into(),
        description: description.into(),
    }
}

pub fn ticket_timeline() -> Vec<TimelineEvent> {
    vec![
        event("1", "created", at(2025, 10, 16, 8, 30), "System", "Ticket created"),
        event("2", "assignment", at(2025, 10, 16, 8, 35), "Admin User", "Assigned to John Tech"),
        event(
            "3",
            "note",
            at(2025, 10, 16, 9, 0),
            "John Tech",
            "Contacted customer, scheduled visit for 2 PM",
        ),
    ]
}

pub fn invoice_timeline() -> Vec<TimelineEvent> {
    vec![
        event("1", "created", at(2025, 10, 1, 9, 0), "System", "Invoice created"),
        event("2", "sent", at(2025, 10, 1, 10, 0), "Billing System", "Invoice sent to customer"),
        event("3", "viewed", at(2025, 10, 5, 14, 30), "Customer", "Invoice viewed by customer"),
    ]
}

pub fn invoice_line_items() -> Vec<LineItem> {
    [
        ("Fiber 100 Mbps - Monthly Subscription", 1200),
        ("Router Rental", 150),
        ("Installation Fee", 500),
    ]
    .into_iter()
    .map(|(description, unit_price)| LineItem {
        description: description.into(),
        quantity: 1,
        unit_price,
        amount: unit_price,
    })
    .collect()
}

/// The full seed the in-memory repository starts from.
pub fn dataset() -> Dataset {
    Dataset {
        tenants: tenants(),
        customers: customers(),
        tickets: tickets(),
        invoices: invoices(),
        payments: payments(),
        users: users(),
    }
}
