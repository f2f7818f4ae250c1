use chrono::{DateTime, TimeZone, Utc};
use isp_console::{
    dashboards::{DashboardView, Kpi, build},
    fixtures,
    format::{format_currency, format_number, format_percentage},
    roles::Role,
};

fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 10, 16, 12, 0, 0).unwrap()
}

fn kpi<'a>(kpis: &'a [Kpi], title: &str) -> &'a Kpi {
    kpis.iter()
        .find(|kpi| kpi.title == title)
        .unwrap_or_else(|| panic!("missing KPI {title}"))
}

// --- Formatting ---

#[test]
fn test_number_grouping() {
    assert_eq!(format_number(0), "0");
    assert_eq!(format_number(999), "999");
    assert_eq!(format_number(1000), "1,000");
    assert_eq!(format_number(11800), "11,800");
    assert_eq!(format_number(1_234_567), "1,234,567");
    assert_eq!(format_number(-4500), "-4,500");
}

#[test]
fn test_currency_and_percentage() {
    assert_eq!(format_currency(295000), "₱295,000");
    assert_eq!(format_currency(-1500), "-₱1,500");
    assert_eq!(format_percentage(12.5), "12.5%");
    assert_eq!(format_percentage(12.0), "12%");
}

// --- Dashboards ---

#[test]
fn test_every_role_gets_its_own_dashboard() {
    let data = fixtures::dataset();
    for role in Role::ALL {
        let page = build(role, &data, fixed_now());
        assert_eq!(page.title, role.dashboard_title());

        let tag = serde_json::to_value(&page.view).unwrap()["role"].clone();
        assert_eq!(tag, serde_json::json!(role.as_str()));
    }
}

#[test]
fn test_super_admin_dashboard() {
    let page = build(Role::SuperAdmin, &fixtures::dataset(), fixed_now());
    let DashboardView::SuperAdmin {
        kpis,
        charts,
        tenants,
    } = page.view
    else {
        panic!("expected super admin dashboard");
    };

    assert_eq!(kpi(&kpis, "Total Tenants").value, "58");
    assert_eq!(kpi(&kpis, "Active Customers").value, "11,800");
    assert_eq!(kpi(&kpis, "Platform Revenue").value, "₱295,000");
    assert_eq!(kpi(&kpis, "Growth Rate").value, "12.5%");
    assert_eq!(charts[0].points.len(), 5);
    assert_eq!(charts[0].points[4].values["customers"], 11800);
    assert_eq!(tenants.len(), 3);
}

#[test]
fn test_system_admin_dashboard() {
    let page = build(Role::SystemAdmin, &fixtures::dataset(), fixed_now());
    let DashboardView::SystemAdmin {
        kpis,
        charts,
        priority_tickets,
        recent_payments,
    } = page.view
    else {
        panic!("expected system admin dashboard");
    };

    assert_eq!(kpi(&kpis, "Open Tickets").value, "47");
    assert_eq!(kpi(&kpis, "Monthly Revenue").value, "₱148,000");
    assert_eq!(charts.len(), 3);

    let ids: Vec<&str> = priority_tickets.iter().map(|row| row.id.as_str()).collect();
    assert_eq!(ids, vec!["TK-2025-001", "TK-2025-003"]);
    // Resolve chip is shown on every row that has a resolve deadline.
    assert!(priority_tickets.iter().all(|row| row.sla.is_some()));
    assert_eq!(recent_payments.len(), 2);
}

#[test]
fn test_customer_support_queues() {
    let page = build(Role::CustomerSupport, &fixtures::dataset(), fixed_now());
    let DashboardView::CustomerSupport { kpis, queues } = page.view else {
        panic!("expected support dashboard");
    };

    assert_eq!(kpi(&kpis, "My Assigned").value, "1");
    assert_eq!(kpi(&kpis, "Unassigned").value, "1");
    assert_eq!(kpi(&kpis, "Overdue").value, "1");
    assert_eq!(kpi(&kpis, "Avg Response Time").value, "12m");

    assert_eq!(queues.len(), 3);
    assert_eq!(queues[0].rows[0].id, "TK-2025-003");
    assert_eq!(queues[1].rows[0].id, "TK-2025-004");
    assert_eq!(queues[1].rows[0].assignee, "Unassigned");
    assert!(queues[2].rows[0].sla_breach);
}

#[test]
fn test_billing_officer_overdue_total() {
    let page = build(Role::BillingOfficer, &fixtures::dataset(), fixed_now());
    let DashboardView::BillingOfficer {
        kpis,
        charts,
        invoices,
    } = page.view
    else {
        panic!("expected billing dashboard");
    };

    assert_eq!(kpi(&kpis, "Overdue").value, "₱2,500");
    assert_eq!(kpi(&kpis, "Payments Today").value, "12");
    assert_eq!(charts[0].points[0].values["target"], 130000);
    assert_eq!(invoices.len(), 4);
    assert_eq!(invoices[0].amount_label, "₱1,500");
}

#[test]
fn test_it_staff_queue_only_holds_it_and_repair() {
    let page = build(Role::ItStaff, &fixtures::dataset(), fixed_now());
    let DashboardView::ItStaff { kpis, queues } = page.view else {
        panic!("expected IT dashboard");
    };

    assert_eq!(kpi(&kpis, "My Open Tickets").value, "1");
    assert_eq!(kpi(&kpis, "Unassigned").value, "1");
    assert_eq!(kpi(&kpis, "Avg Resolution Time").value, "4.2h");
    assert_eq!(queues[0].rows[0].id, "TK-2025-001");
    assert_eq!(queues[1].rows[0].id, "TK-2025-004");
}

#[test]
fn test_field_jobs_join_customer_contact() {
    let page = build(Role::FieldTechnician, &fixtures::dataset(), fixed_now());
    let DashboardView::FieldTechnician { jobs } = page.view else {
        panic!("expected field technician dashboard");
    };

    let ids: Vec<&str> = jobs.iter().map(|job| job.ticket_id.as_str()).collect();
    assert_eq!(ids, vec!["TK-2025-001", "TK-2025-002"]);
    assert_eq!(jobs[0].customer_address.as_deref(), Some("123 Rizal St, Makati City"));
    assert_eq!(jobs[0].customer_phone.as_deref(), Some("+63 917 123 4567"));

    // TK-2025-001 onsite is due 16:30, 4.5h after the fixed clock.
    let onsite = jobs[0].onsite_sla.as_ref().unwrap();
    assert_eq!(onsite.label, "Onsite: 4h");
}

#[test]
fn test_customer_portal() {
    let page = build(Role::Customer, &fixtures::dataset(), fixed_now());
    let DashboardView::Customer {
        kpis,
        outstanding_balance,
        next_bill_date,
        open_tickets,
        recent_invoices,
        recent_tickets,
    } = page.view
    else {
        panic!("expected customer portal");
    };

    assert_eq!(outstanding_balance, 1500);
    assert_eq!(kpi(&kpis, "Outstanding Balance").value, "₱1,500");
    assert_eq!(next_bill_date.to_string(), "2025-11-01");
    assert_eq!(open_tickets, 1);
    assert_eq!(recent_invoices.len(), 1);
    assert_eq!(recent_tickets.len(), 1);
    assert_eq!(recent_tickets[0].id, "TK-2025-001");
}
