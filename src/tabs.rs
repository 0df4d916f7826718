//! Navigation tabs: the built-in categories plus the ones the admin adds.

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

use crate::content::{CustomCategory, defaults::BUILTIN_CATEGORIES, forms::CategoryForm};
use crate::sync::{SyncedDoc, WriteTicket};

pub const ABOUT_TAB: &str = "About";

/// Storage key for a new category's project collection.
///
/// Lowercases the title and swaps every character outside `[a-z0-9]` for
/// `_`, one underscore per UTF-16 unit, then appends `_projects`. Runs of
/// underscores are kept as they are. Two titles can map to the same key.
pub fn derive_storage_key(title: &str) -> String {
    let mut key = String::with_capacity(title.len() + 9);
    for c in title.to_lowercase().chars() {
        if c.is_ascii_lowercase() || c.is_ascii_digit() {
            key.push(c);
        } else {
            for _ in 0..c.len_utf16() {
                key.push('_');
            }
        }
    }
    key.push_str("_projects");
    key
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tab {
    pub label: String,
    pub href: String,
}

/// `About`, then the built-in tabs, then custom categories in creation order.
pub fn tabs(custom: &[CustomCategory]) -> Vec<Tab> {
    let mut tabs = vec![Tab {
        label: ABOUT_TAB.to_string(),
        href: "/".to_string(),
    }];
    tabs.extend(BUILTIN_CATEGORIES.iter().map(|c| Tab {
        label: c.tab.to_string(),
        href: category_href(c.storage_key),
    }));
    tabs.extend(custom.iter().map(|c| Tab {
        label: c.title.clone(),
        href: category_href(&c.storage_key),
    }));
    tabs
}

/// Characters escaped when a storage key goes into a URL. Derived keys only
/// contain `[a-z0-9_]`, so they pass through unchanged.
pub const KEY_ESCAPE: &AsciiSet = &NON_ALPHANUMERIC.remove(b'_').remove(b'-');

pub fn category_href(storage_key: &str) -> String {
    format!("/category/{}", utf8_percent_encode(storage_key, KEY_ESCAPE))
}

/// Append a new category built from `form`.
///
/// Returns the created category and its write, or `None` if the form has no
/// title.
pub fn add_category(
    registry: &SyncedDoc<Vec<CustomCategory>>,
    form: CategoryForm,
) -> Option<(CustomCategory, WriteTicket)> {
    let category = form.build()?;
    let created = category.clone();
    let ticket = registry.update(|existing| {
        let mut next = existing.clone();
        next.push(category);
        next
    });
    tracing::info!(
        title = %created.title,
        storage_key = %created.storage_key,
        "custom category added"
    );
    Some((created, ticket))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn storage_key_replaces_each_character() {
        assert_eq!(derive_storage_key("UI / UX Design!"), "ui___ux_design__projects");
        assert_eq!(derive_storage_key("Design"), "design_projects");
        assert_eq!(derive_storage_key("Web3 & AI"), "web3___ai_projects");
    }

    #[test]
    fn storage_key_counts_utf16_units() {
        assert_eq!(derive_storage_key("café"), "caf__projects");
        assert_eq!(derive_storage_key("🚀"), "___projects");
    }

    #[test]
    fn colliding_titles_share_a_key() {
        assert_eq!(derive_storage_key("A-B"), derive_storage_key("a b"));
    }

    #[test]
    fn derived_keys_stay_readable_in_links() {
        assert_eq!(category_href("ui___ux_design__projects"), "/category/ui___ux_design__projects");
        assert_eq!(category_href("a b/c"), "/category/a%20b%2Fc");
    }

    #[test]
    fn custom_tabs_follow_builtins() {
        let custom = vec![CustomCategory {
            title: "Design".into(),
            storage_key: "design_projects".into(),
            ..Default::default()
        }];
        let labels: Vec<String> = tabs(&custom).into_iter().map(|t| t.label).collect();
        assert_eq!(
            labels,
            vec![
                "About",
                "Product Management",
                "AI",
                "Software Engineering",
                "Data Engineering",
                "adiicodes",
                "Design"
            ]
        );
    }
}
