use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use utoipa::ToSchema;

use crate::{
    format::format_currency,
    models::{
        Customer, CustomerStatus, Invoice, InvoiceStatus, Ticket, TicketCategory, TicketPriority,
        TicketStatus, humanize,
    },
    sla::{SlaCountdown, SlaKind},
};

pub const UNASSIGNED_LABEL: &str = "Unassigned";

/// TicketRow
///
/// One line of any ticket table. The SLA column always shows the resolve deadline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct TicketRow {
    pub id: String,
    pub customer_name: String,
    pub category: TicketCategory,
    pub category_label: String,
    pub subject: String,
    pub priority: TicketPriority,
    pub priority_variant: String,
    pub status: TicketStatus,
    pub status_label: String,
    pub status_variant: String,
    /// Assignee name, or `Unassigned`.
    pub assignee: String,
    pub sla: Option<SlaCountdown>,
    pub sla_breach: bool,
}

impl TicketRow {
    pub fn new(ticket: &Ticket, now: DateTime<Utc>) -> Self {
        Self {
            id: ticket.id.clone(),
            customer_name: ticket.customer_name.clone(),
            category: ticket.category,
            category_label: humanize(ticket.category.as_str()),
            subject: ticket.subject.clone(),
            priority: ticket.priority,
            priority_variant: ticket.priority.variant().to_string(),
            status: ticket.status,
            status_label: humanize(ticket.status.as_str()),
            status_variant: ticket.status.variant().to_string(),
            assignee: ticket
                .assignee_name
                .clone()
                .unwrap_or_else(|| UNASSIGNED_LABEL.to_string()),
            sla: ticket
                .deadline(SlaKind::Resolve)
                .map(|deadline| deadline.evaluate(now)),
            sla_breach: ticket.sla_breach,
        }
    }
}

/// TicketTable
///
/// `empty_message` is set exactly when `rows` is empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct TicketTable {
    pub rows: Vec<TicketRow>,
    pub empty_message: Option<String>,
}

pub fn ticket_rows(tickets: &[Ticket], now: DateTime<Utc>) -> Vec<TicketRow> {
    tickets.iter().map(|ticket| TicketRow::new(ticket, now)).collect()
}

pub fn ticket_table(tickets: &[Ticket], now: DateTime<Utc>) -> TicketTable {
    let rows = ticket_rows(tickets, now);
    let empty_message = rows.is_empty().then(|| "No tickets found".to_string());
    TicketTable {
        rows,
        empty_message,
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct CustomerRow {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub plan: String,
    pub status: CustomerStatus,
    pub status_variant: String,
    pub balance: i64,
    pub balance_label: String,
}

impl From<&Customer> for CustomerRow {
    fn from(customer: &Customer) -> Self {
        Self {
            id: customer.id.clone(),
            name: customer.name.clone(),
            email: customer.email.clone(),
            phone: customer.phone.clone(),
            plan: customer.plan.clone(),
            status: customer.status,
            status_variant: customer.status.variant().to_string(),
            balance: customer.balance,
            balance_label: format_currency(customer.balance),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct CustomerTable {
    pub rows: Vec<CustomerRow>,
    pub empty_message: Option<String>,
}

pub fn customer_table(customers: &[Customer]) -> CustomerTable {
    let rows: Vec<CustomerRow> = customers.iter().map(CustomerRow::from).collect();
    let empty_message = rows.is_empty().then(|| "No customers found".to_string());
    CustomerTable {
        rows,
        empty_message,
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct InvoiceRow {
    pub id: String,
    pub customer_name: String,
    pub amount: i64,
    pub amount_label: String,
    pub issued_date: NaiveDate,
    pub due_date: NaiveDate,
    pub status: InvoiceStatus,
    pub status_label: String,
    pub status_variant: String,
}

impl From<&Invoice> for InvoiceRow {
    fn from(invoice: &Invoice) -> Self {
        Self {
            id: invoice.id.clone(),
            customer_name: invoice.customer_name.clone(),
            amount: invoice.amount,
            amount_label: format_currency(invoice.amount),
            issued_date: invoice.issued_date,
            due_date: invoice.due_date,
            status: invoice.status,
            status_label: humanize(invoice.status.as_str()),
            status_variant: invoice.status.variant().to_string(),
        }
    }
}

pub fn invoice_rows(invoices: &[Invoice]) -> Vec<InvoiceRow> {
    invoices.iter().map(InvoiceRow::from).collect()
}
