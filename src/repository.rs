use crate::{
    details, fixtures,
    models::{
        CreateTenantRequest, CreateTicketRequest, Customer, Dataset, Invoice, InvoiceAction,
        InvoiceActionRequest, InvoiceStatus, Payment, PaymentMethod, Tenant, TenantStatus, Ticket,
        TicketStatus, UpdateTicketRequest, User, humanize,
    },
    sla::SlaKind,
};
use async_trait::async_trait;
use chrono::{DateTime, Datelike, NaiveDate, Utc};
use std::{fmt, sync::Arc};
use tokio::sync::RwLock;

/// Repository Trait
///
/// Abstract contract for all data access. Handlers only ever see this trait, so the
/// seeded in-memory store can be swapped for a mock in tests.
///
/// Mutating methods take the clock as an argument; nothing in here reads the wall
/// clock itself.
#[async_trait]
pub trait Repository: Send + Sync {
    /// A consistent copy of every collection, used to build dashboards.
    async fn snapshot(&self) -> Dataset;

    // --- Tickets ---
    // Optional case-insensitive search on id, customer name and subject.
    async fn get_tickets(&self, search: Option<String>) -> Vec<Ticket>;
    async fn get_ticket(&self, id: &str) -> Option<Ticket>;
    // Returns None when the referenced customer does not exist.
    async fn create_ticket(&self, req: CreateTicketRequest, now: DateTime<Utc>) -> Option<Ticket>;
    async fn update_ticket(
        &self,
        id: &str,
        req: UpdateTicketRequest,
        now: DateTime<Utc>,
    ) -> Option<Ticket>;

    // --- Customers ---
    async fn get_customers(&self, search: Option<String>) -> Vec<Customer>;
    async fn get_customer(&self, id: &str) -> Option<Customer>;

    // --- Billing ---
    async fn get_invoices(&self) -> Vec<Invoice>;
    async fn get_invoice(&self, id: &str) -> Option<Invoice>;
    // The offered-actions check and the write happen under one lock.
    async fn apply_invoice_action(
        &self,
        id: &str,
        req: InvoiceActionRequest,
        today: NaiveDate,
    ) -> Result<Invoice, InvoiceActionError>;
    async fn get_payments(&self) -> Vec<Payment>;

    // --- Platform ---
    async fn get_tenants(&self) -> Vec<Tenant>;
    async fn create_tenant(&self, req: CreateTenantRequest, today: NaiveDate) -> Tenant;

    // --- Accounts ---
    async fn get_user(&self, id: &str) -> Option<User>;
    async fn find_user_by_email(&self, email: &str) -> Option<User>;
}

/// Why an invoice action was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvoiceActionError {
    NotFound,
    /// The invoice's current status does not offer the action.
    NotAvailable {
        status: InvoiceStatus,
        action: InvoiceAction,
    },
}

impl fmt::Display for InvoiceActionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InvoiceActionError::NotFound => f.write_str("invoice not found"),
            InvoiceActionError::NotAvailable { status, action } => {
                write!(f, "{action:?} is not available for a {status:?} invoice")
            }
        }
    }
}

impl std::error::Error for InvoiceActionError {}

/// RepositoryState
///
/// The concrete type used to share the data layer across the application state.
pub type RepositoryState = Arc<dyn Repository>;

/// InMemoryRepository
///
/// Holds a mutable copy of the demo fixtures. Writes only live as long as the
/// process; every restart starts again from the seed.
pub struct InMemoryRepository {
    data: RwLock<Dataset>,
}

impl InMemoryRepository {
    pub fn new(seed: Dataset) -> Self {
        Self {
            data: RwLock::new(seed),
        }
    }

    /// Repository seeded with the demo fixtures.
    pub fn seeded() -> Self {
        Self::new(fixtures::dataset())
    }
}

impl Default for InMemoryRepository {
    fn default() -> Self {
        Self::seeded()
    }
}

/// Numeric suffix of ids shaped like `TK-2025-004` or `PAY-002`.
fn id_sequence(id: &str) -> u32 {
    id.rsplit('-')
        .next()
        .and_then(|suffix| suffix.parse().ok())
        .unwrap_or(0)
}

fn next_sequence<'a>(ids: impl Iterator<Item = &'a str>) -> u32 {
    ids.map(id_sequence).max().unwrap_or(0) + 1
}

fn reference_prefix(method: PaymentMethod) -> &'static str {
    match method {
        PaymentMethod::Cash => "CS",
        PaymentMethod::BankTransfer => "BT",
        PaymentMethod::Gcash => "GC",
        PaymentMethod::CreditCard => "CC",
    }
}

fn assignee_name(assignee_id: &str) -> Option<String> {
    fixtures::assignee_options()
        .into_iter()
        .find(|option| option.id == assignee_id)
        .map(|option| option.name)
}

#[async_trait]
impl Repository for InMemoryRepository {
    async fn snapshot(&self) -> Dataset {
        self.data.read().await.clone()
    }

    async fn get_tickets(&self, search: Option<String>) -> Vec<Ticket> {
        let data = self.data.read().await;
        match search.as_deref().map(str::trim).filter(|q| !q.is_empty()) {
            Some(query) => data
                .tickets
                .iter()
                .filter(|ticket| ticket.matches(query))
                .cloned()
                .collect(),
            None => data.tickets.clone(),
        }
    }

    async fn get_ticket(&self, id: &str) -> Option<Ticket> {
        let data = self.data.read().await;
        data.tickets.iter().find(|ticket| ticket.id == id).cloned()
    }

    /// create_ticket
    ///
    /// Opens a ticket with respond/resolve deadlines counted from `now`. Field
    /// categories also get an onsite deadline.
    async fn create_ticket(&self, req: CreateTicketRequest, now: DateTime<Utc>) -> Option<Ticket> {
        let mut data = self.data.write().await;
        let customer = data
            .customers
            .iter()
            .find(|customer| customer.id == req.customer_id)
            .cloned()?;

        let sequence = next_sequence(data.tickets.iter().map(|ticket| ticket.id.as_str()));
        let ticket = Ticket {
            id: format!("TK-{}-{:03}", now.year(), sequence),
            customer_id: customer.id,
            customer_name: customer.name,
            category: req.category,
            priority: req.priority,
            status: TicketStatus::Open,
            assignee_id: None,
            assignee_name: None,
            subject: req.subject,
            description: req.description,
            created_at: now,
            updated_at: now,
            sla_respond_due: Some(now + SlaKind::Respond.window()),
            sla_onsite_due: req
                .category
                .is_field_job()
                .then(|| now + SlaKind::Onsite.window()),
            sla_resolve_due: Some(now + SlaKind::Resolve.window()),
            sla_breach: false,
            tenant_id: customer.tenant_id,
        };

        tracing::info!(
            ticket_id = %ticket.id,
            customer_id = %ticket.customer_id,
            category = ticket.category.as_str(),
            priority = ticket.priority.as_str(),
            "ticket created"
        );
        data.tickets.push(ticket.clone());
        Some(ticket)
    }

    /// update_ticket
    ///
    /// Applies only the fields present in `req`. The assignee id is expected to be
    /// one of the picker options; `unassigned` clears it.
    async fn update_ticket(
        &self,
        id: &str,
        req: UpdateTicketRequest,
        now: DateTime<Utc>,
    ) -> Option<Ticket> {
        let mut data = self.data.write().await;
        let ticket = data.tickets.iter_mut().find(|ticket| ticket.id == id)?;

        if let Some(status) = req.status {
            tracing::info!(ticket_id = %ticket.id, from = ticket.status.as_str(), to = status.as_str(), "ticket status changed");
            ticket.status = status;
        }
        if let Some(priority) = req.priority {
            tracing::info!(ticket_id = %ticket.id, from = ticket.priority.as_str(), to = priority.as_str(), "ticket priority changed");
            ticket.priority = priority;
        }
        if let Some(assignee_id) = req.assignee_id {
            if assignee_id == "unassigned" {
                ticket.assignee_id = None;
                ticket.assignee_name = None;
            } else {
                ticket.assignee_name = assignee_name(&assignee_id);
                ticket.assignee_id = Some(assignee_id);
            }
            tracing::info!(ticket_id = %ticket.id, assignee = ?ticket.assignee_name, "ticket reassigned");
        }
        ticket.updated_at = now;
        Some(ticket.clone())
    }

    async fn get_customers(&self, search: Option<String>) -> Vec<Customer> {
        let data = self.data.read().await;
        match search.as_deref().map(str::trim).filter(|q| !q.is_empty()) {
            Some(query) => data
                .customers
                .iter()
                .filter(|customer| customer.matches(query))
                .cloned()
                .collect(),
            None => data.customers.clone(),
        }
    }

    async fn get_customer(&self, id: &str) -> Option<Customer> {
        let data = self.data.read().await;
        data.customers.iter().find(|customer| customer.id == id).cloned()
    }

    async fn get_invoices(&self) -> Vec<Invoice> {
        self.data.read().await.invoices.clone()
    }

    async fn get_invoice(&self, id: &str) -> Option<Invoice> {
        let data = self.data.read().await;
        data.invoices.iter().find(|invoice| invoice.id == id).cloned()
    }

    /// apply_invoice_action
    ///
    /// `log_payment` settles the invoice and records a payment against it,
    /// `issue_refund` cancels it, `mark_dispute` flags it as disputed. Actions
    /// the invoice's status does not offer are refused without touching it.
    async fn apply_invoice_action(
        &self,
        id: &str,
        req: InvoiceActionRequest,
        today: NaiveDate,
    ) -> Result<Invoice, InvoiceActionError> {
        let mut guard = self.data.write().await;
        let data = &mut *guard;
        let invoice = data
            .invoices
            .iter_mut()
            .find(|invoice| invoice.id == id)
            .ok_or(InvoiceActionError::NotFound)?;

        if !details::available_actions(invoice.status).contains(&req.action) {
            tracing::warn!(
                invoice_id = %invoice.id,
                status = ?invoice.status,
                action = ?req.action,
                "invoice action refused"
            );
            return Err(InvoiceActionError::NotAvailable {
                status: invoice.status,
                action: req.action,
            });
        }

        match req.action {
            InvoiceAction::LogPayment => {
                let method = req.method.unwrap_or(PaymentMethod::Cash);
                invoice.status = InvoiceStatus::Paid;
                invoice.paid_date = Some(today);

                let sequence = next_sequence(data.payments.iter().map(|p| p.id.as_str()));
                let payment = Payment {
                    id: format!("PAY-{:03}", sequence),
                    invoice_id: invoice.id.clone(),
                    customer_id: invoice.customer_id.clone(),
                    customer_name: invoice.customer_name.clone(),
                    amount: invoice.amount,
                    method,
                    date: today,
                    reference: format!(
                        "{}{}{:03}",
                        reference_prefix(method),
                        today.format("%Y%m%d"),
                        sequence
                    ),
                    tenant_id: invoice.tenant_id.clone(),
                };

                if let Some(customer) = data
                    .customers
                    .iter_mut()
                    .find(|customer| customer.id == invoice.customer_id)
                {
                    customer.balance = (customer.balance - invoice.amount).max(0);
                }

                tracing::info!(
                    invoice_id = %invoice.id,
                    payment_id = %payment.id,
                    amount = invoice.amount,
                    reference = %payment.reference,
                    "payment logged"
                );
                data.payments.insert(0, payment);
            }
            InvoiceAction::IssueRefund => {
                invoice.status = InvoiceStatus::Cancelled;
                tracing::info!(invoice_id = %invoice.id, amount = invoice.amount, "refund issued");
            }
            InvoiceAction::MarkDispute => {
                invoice.status = InvoiceStatus::Disputed;
                tracing::info!(invoice_id = %invoice.id, "invoice marked as disputed");
            }
        }

        Ok(invoice.clone())
    }

    async fn get_payments(&self) -> Vec<Payment> {
        self.data.read().await.payments.clone()
    }

    async fn get_tenants(&self) -> Vec<Tenant> {
        self.data.read().await.tenants.clone()
    }

    /// create_tenant
    ///
    /// New tenants start active with no customers.
    async fn create_tenant(&self, req: CreateTenantRequest, today: NaiveDate) -> Tenant {
        let mut data = self.data.write().await;
        let sequence = next_sequence(data.tenants.iter().map(|tenant| tenant.id.as_str()));
        let plan = match req.plan.trim() {
            "" => "Starter".to_string(),
            plan => humanize(plan),
        };

        let tenant = Tenant {
            id: format!("tenant-{}", sequence),
            name: req.company_name,
            status: TenantStatus::Active,
            admin: req.admin_name,
            customers: 0,
            created_at: today,
            plan: Some(plan),
        };

        tracing::info!(
            tenant_id = %tenant.id,
            name = %tenant.name,
            admin_email = %req.admin_email,
            "tenant created"
        );
        data.tenants.push(tenant.clone());
        tenant
    }

    async fn get_user(&self, id: &str) -> Option<User> {
        let data = self.data.read().await;
        data.users.iter().find(|user| user.id == id).cloned()
    }

    async fn find_user_by_email(&self, email: &str) -> Option<User> {
        let data = self.data.read().await;
        data.users
            .iter()
            .find(|user| user.email.eq_ignore_ascii_case(email))
            .cloned()
    }
}
