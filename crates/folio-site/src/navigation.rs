//! Site settings, navigation tree and breadcrumbs.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Navigation tree node.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NavigationItem {
    /// Icon shown next to the link.
    pub icon: String,
    /// Path segment, unique among siblings.
    pub link: String,
    /// Child items.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub: Option<Vec<NavigationItem>>,
}

/// Site settings document (`settings.json`).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Site title.
    pub title: String,
    /// Site icon.
    pub icon: String,
    /// Top-level navigation items.
    pub navigation: Vec<NavigationItem>,
    /// Any other fields, passed through unchanged.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One breadcrumb: an item's icon and its full path from the root.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreadcrumbEntry {
    /// Icon of the matched item.
    pub icon: String,
    /// Links from the root to the matched item, joined with `/`.
    pub link: String,
}

/// Split a route slug into its non-empty segments.
#[must_use]
pub fn slug_segments(slug: &str) -> Vec<&str> {
    slug.split('/').filter(|s| !s.is_empty()).collect()
}

/// Build breadcrumbs for route segments.
///
/// Each segment is looked up independently from the root; segments
/// with no matching item are dropped.
#[must_use]
pub fn build_breadcrumbs(navigation: &[NavigationItem], segments: &[&str]) -> Vec<BreadcrumbEntry> {
    segments
        .iter()
        .filter_map(|segment| {
            let found = find_breadcrumb(navigation, segment);
            if found.is_none() {
                tracing::trace!(segment, "No navigation item for segment");
            }
            found
        })
        .collect()
}

/// Depth-first pre-order search for the first item whose `link` is `target`.
#[must_use]
pub fn find_breadcrumb(navigation: &[NavigationItem], target: &str) -> Option<BreadcrumbEntry> {
    find_under(navigation, target, "")
}

fn find_under(items: &[NavigationItem], target: &str, parent: &str) -> Option<BreadcrumbEntry> {
    for item in items {
        let link = if parent.is_empty() {
            item.link.clone()
        } else {
            format!("{parent}/{}", item.link)
        };
        if item.link == target {
            return Some(BreadcrumbEntry {
                icon: item.icon.clone(),
                link,
            });
        }
        if let Some(sub) = &item.sub
            && let Some(found) = find_under(sub, target, &link)
        {
            return Some(found);
        }
    }
    None
}
