use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use utoipa::ToSchema;

use crate::{
    fixtures,
    format::format_currency,
    models::{
        AssigneeOption, Invoice, InvoiceAction, InvoiceStatus, LineItem, Ticket, TicketStatus,
        TimelineEvent, humanize,
    },
    sla::SlaCountdown,
};

/// Value-added tax applied on top of the line-item subtotal, in percent.
pub const VAT_PERCENT: i64 = 12;

/// TicketDetail
///
/// Content of the ticket side panel: the ticket itself, one SLA chip per
/// deadline it carries, its activity and the pickers the panel offers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct TicketDetail {
    pub ticket: Ticket,
    pub status_label: String,
    pub sla: Vec<SlaCountdown>,
    pub timeline: Vec<TimelineEvent>,
    pub status_options: Vec<TicketStatus>,
    pub assignee_options: Vec<AssigneeOption>,
}

pub fn ticket_detail(ticket: Ticket, now: DateTime<Utc>) -> TicketDetail {
    let sla = ticket
        .sla_deadlines()
        .iter()
        .map(|deadline| deadline.evaluate(now))
        .collect();

    TicketDetail {
        status_label: humanize(ticket.status.as_str()),
        sla,
        timeline: fixtures::ticket_timeline(),
        status_options: TicketStatus::ALL.to_vec(),
        assignee_options: fixtures::assignee_options(),
        ticket,
    }
}

/// InvoiceDetail
///
/// Content of the invoice side panel. Amounts are whole pesos; the tax is
/// truncated to a whole peso.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct InvoiceDetail {
    pub invoice: Invoice,
    pub status_label: String,
    pub line_items: Vec<LineItem>,
    pub subtotal: i64,
    pub tax: i64,
    pub total: i64,
    pub subtotal_label: String,
    pub tax_label: String,
    pub total_label: String,
    pub timeline: Vec<TimelineEvent>,
    pub actions: Vec<InvoiceAction>,
}

/// Actions the panel offers for an invoice in `status`.
pub fn available_actions(status: InvoiceStatus) -> Vec<InvoiceAction> {
    match status {
        InvoiceStatus::Cancelled => Vec::new(),
        InvoiceStatus::Paid => vec![InvoiceAction::IssueRefund, InvoiceAction::MarkDispute],
        InvoiceStatus::Draft
        | InvoiceStatus::Sent
        | InvoiceStatus::Overdue
        | InvoiceStatus::Disputed => vec![
            InvoiceAction::LogPayment,
            InvoiceAction::IssueRefund,
            InvoiceAction::MarkDispute,
        ],
    }
}

pub fn invoice_detail(invoice: Invoice) -> InvoiceDetail {
    let line_items = fixtures::invoice_line_items();
    let subtotal: i64 = line_items.iter().map(|item| item.amount).sum();
    let tax = subtotal * VAT_PERCENT / 100;
    let total = subtotal + tax;

    InvoiceDetail {
        status_label: humanize(invoice.status.as_str()),
        actions: available_actions(invoice.status),
        line_items,
        subtotal,
        tax,
        total,
        subtotal_label: format_currency(subtotal),
        tax_label: format_currency(tax),
        total_label: format_currency(total),
        timeline: fixtures::invoice_timeline(),
        invoice,
    }
}
