use serde::{Deserialize, Serialize};
use ts_rs::TS;
use utoipa::ToSchema;

use crate::roles::Role;

pub const ROOT_LABEL: &str = "Dashboard";
pub const ROOT_HREF: &str = "/dashboard";

/// Breadcrumb
///
/// Only crumbs the user can navigate back to carry an `href`; the current
/// location is a plain label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct Breadcrumb {
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub href: Option<String>,
}

impl Breadcrumb {
    pub fn link(label: impl Into<String>, href: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            href: Some(href.into()),
        }
    }

    pub fn current(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            href: None,
        }
    }
}

/// title_case
///
/// `high-priority` becomes `High Priority`.
pub fn title_case(segment: &str) -> String {
    segment
        .split('-')
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

fn segments(path: &str) -> Vec<&str> {
    path.split('/').filter(|segment| !segment.is_empty()).collect()
}

/// build
///
/// Derives the breadcrumb chain for `path`. The chain always starts at the
/// dashboard; anything under `/dashboard` collapses to that root crumb.
pub fn build(path: &str) -> Vec<Breadcrumb> {
    let parts = segments(path);
    let root = Breadcrumb::link(ROOT_LABEL, ROOT_HREF);

    if parts.is_empty() || parts[0] == "dashboard" {
        return vec![root];
    }

    let mut crumbs = Vec::with_capacity(parts.len() + 1);
    crumbs.push(root);
    for (index, segment) in parts.iter().enumerate() {
        let label = title_case(segment);
        if index + 1 == parts.len() {
            crumbs.push(Breadcrumb::current(label));
        } else {
            let href = format!("/{}", parts[..=index].join("/"));
            crumbs.push(Breadcrumb::link(label, href));
        }
    }
    crumbs
}

/// page_title
///
/// `/dashboard` is titled after the role's dashboard; any other page after its
/// last path segment.
pub fn page_title(path: &str, role: Option<Role>) -> String {
    let parts = segments(path);
    match parts.as_slice() {
        [] | ["dashboard"] => role
            .map(|role| role.dashboard_title().to_string())
            .unwrap_or_else(|| ROOT_LABEL.to_string()),
        [.., last] => title_case(last),
    }
}
