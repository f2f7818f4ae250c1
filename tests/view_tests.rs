use isp_console::{
    breadcrumbs::Breadcrumb,
    roles::Role,
    view::{Action, Page, ViewState, reduce, render, render_shell, resolve_route},
};

#[test]
fn test_initial_state() {
    let state = ViewState::default();
    assert_eq!(state.role, Role::SystemAdmin);
    assert_eq!(state.path, "/dashboard");
    assert!(state.sidebar_collapsed);
    assert!(state.selected_ticket.is_none());
    assert!(!state.ticket_sheet_open);
    assert!(!state.create_ticket_open);
}

#[test]
fn test_navigate_sets_path_and_collapses_sidebar() {
    let open = reduce(ViewState::default(), Action::ToggleSidebar);
    assert!(!open.sidebar_collapsed);

    let state = reduce(
        open,
        Action::Navigate {
            path: "/billing".to_string(),
        },
    );
    assert_eq!(state.path, "/billing");
    assert!(state.sidebar_collapsed);
}

#[test]
fn test_switch_role_returns_to_dashboard() {
    let state = reduce(
        ViewState::default(),
        Action::Navigate {
            path: "/billing".to_string(),
        },
    );
    let state = reduce(
        state,
        Action::SwitchRole {
            role: Role::Customer,
        },
    );
    assert_eq!(state.role, Role::Customer);
    assert_eq!(state.path, "/dashboard");
}

#[test]
fn test_ticket_sheet_and_create_dialog() {
    let state = reduce(
        ViewState::default(),
        Action::OpenTicket {
            id: "TK-2025-001".to_string(),
        },
    );
    assert_eq!(state.selected_ticket.as_deref(), Some("TK-2025-001"));
    assert!(state.ticket_sheet_open);

    let state = reduce(state, Action::CloseTicket);
    assert!(state.selected_ticket.is_none());
    assert!(!state.ticket_sheet_open);

    let state = reduce(state, Action::OpenCreateTicket);
    assert!(state.create_ticket_open);
    let state = reduce(state, Action::CloseCreateTicket);
    assert!(!state.create_ticket_open);
}

#[test]
fn test_reduce_leaves_input_untouched() {
    let before = ViewState::default();
    let snapshot = before.clone();
    let _after = reduce(before.clone(), Action::ToggleSidebar);
    assert_eq!(before, snapshot);
}

#[test]
fn test_resolve_route_per_role_dashboard() {
    for role in Role::ALL {
        assert_eq!(resolve_route("/dashboard", Some(role)), Page::Dashboard { role });
        assert_eq!(resolve_route("/", Some(role)), Page::Dashboard { role });
    }
}

#[test]
fn test_resolve_route_content_pages() {
    assert_eq!(resolve_route("/tickets", Some(Role::SystemAdmin)), Page::Tickets);
    assert_eq!(resolve_route("/customers/", Some(Role::CustomerSupport)), Page::Customers);
    assert_eq!(resolve_route("/billing", Some(Role::BillingOfficer)), Page::Billing);
    assert_eq!(resolve_route("/tenants", Some(Role::SuperAdmin)), Page::Tenants);
}

#[test]
fn test_unhandled_paths_render_coming_soon() {
    assert_eq!(
        resolve_route("/reports", Some(Role::SystemAdmin)),
        Page::ComingSoon {
            title: "Reports".to_string()
        }
    );
    assert_eq!(
        resolve_route("/help-center", Some(Role::Customer)),
        Page::ComingSoon {
            title: "Help Center".to_string()
        }
    );
}

#[test]
fn test_hidden_routes_are_forbidden() {
    assert_eq!(
        resolve_route("/tenants", Some(Role::SystemAdmin)),
        Page::Forbidden {
            path: "/tenants".to_string()
        }
    );
    assert_eq!(
        resolve_route("/billing/INV-2025-10-001", Some(Role::Customer)),
        Page::Forbidden {
            path: "/billing/INV-2025-10-001".to_string()
        }
    );
}

#[test]
fn test_paths_without_leading_slash_resolve_like_absolute_ones() {
    assert_eq!(resolve_route("tickets", Some(Role::SystemAdmin)), Page::Tickets);
    assert_eq!(resolve_route("billing/", Some(Role::BillingOfficer)), Page::Billing);
    assert_eq!(
        resolve_route("tenants", Some(Role::SystemAdmin)),
        Page::Forbidden {
            path: "/tenants".to_string()
        }
    );
    assert_eq!(
        resolve_route("", Some(Role::SystemAdmin)),
        Page::Dashboard {
            role: Role::SystemAdmin
        }
    );

    let shell = render(Some(Role::SystemAdmin), "tickets");
    assert_eq!(shell.page, Page::Tickets);
    let active: Vec<&str> = shell
        .navigation
        .iter()
        .filter(|entry| entry.active)
        .map(|entry| entry.href.as_str())
        .collect();
    assert_eq!(active, vec!["/tickets"]);
    assert_eq!(shell.breadcrumbs.len(), 2);
}

#[test]
fn test_unknown_role_gets_no_dashboard() {
    assert_eq!(
        resolve_route("/dashboard", None),
        Page::ComingSoon {
            title: "Dashboard".to_string()
        }
    );
    assert_eq!(
        resolve_route("/tickets", None),
        Page::Forbidden {
            path: "/tickets".to_string()
        }
    );
}

#[test]
fn test_render_shell_composes_header_sidebar_and_page() {
    let state = ViewState {
        role: Role::BillingOfficer,
        path: "/billing".to_string(),
        ..ViewState::default()
    };
    let shell = render_shell(&state);

    assert_eq!(shell.title, "Billing");
    assert_eq!(shell.role, Some(Role::BillingOfficer));
    assert_eq!(shell.user_name.as_deref(), Some("Billing Officer"));
    assert_eq!(shell.tenant_name.as_deref(), Some("Metro Manila Fiber"));
    assert_eq!(shell.page, Page::Billing);
    assert_eq!(
        shell.breadcrumbs,
        vec![
            Breadcrumb::link("Dashboard", "/dashboard"),
            Breadcrumb::current("Billing")
        ]
    );

    let active: Vec<&str> = shell
        .navigation
        .iter()
        .filter(|entry| entry.active)
        .map(|entry| entry.href.as_str())
        .collect();
    assert_eq!(active, vec!["/billing"]);
}

#[test]
fn test_super_admin_shell_has_no_tenant() {
    let shell = render(Some(Role::SuperAdmin), "/dashboard");
    assert_eq!(shell.title, "Platform Dashboard");
    assert!(shell.tenant_name.is_none());
}

#[test]
fn test_unknown_role_shell_is_empty_but_renders() {
    let shell = render(None, "/dashboard");
    assert!(shell.navigation.is_empty());
    assert!(shell.user_name.is_none());
    assert_eq!(shell.title, "Dashboard");
}

#[test]
fn test_action_wire_format() {
    let action: Action =
        serde_json::from_value(serde_json::json!({ "type": "switch_role", "role": "it_staff" }))
            .unwrap();
    assert_eq!(action, Action::SwitchRole { role: Role::ItStaff });

    let action: Action =
        serde_json::from_value(serde_json::json!({ "type": "toggle_sidebar" })).unwrap();
    assert_eq!(action, Action::ToggleSidebar);

    let page = serde_json::to_value(Page::Dashboard {
        role: Role::Customer,
    })
    .unwrap();
    assert_eq!(page, serde_json::json!({ "kind": "dashboard", "role": "customer" }));
}
