//! Core data models for the mega menu provider
//!
//! This module contains the data types shared by the retrieval, recovery,
//! caching and upload paths: the navigation tree served to consumers and
//! the wire-shaped structures it is parsed from.

pub mod fallback;
pub mod recover;
pub mod store;

pub use fallback::fallback_menu;
pub use recover::{recover_menu_data, serialize_menu_source, RecoverError};
pub use store::{DocumentStoreClient, StoreError};

use serde::{Deserialize, Serialize};

/// Root menu structure holding the ordered top-level navigation
///
/// `navigation` is always present once a `MenuData` value exists; it may be
/// empty but is never absent, so consumers can iterate without checks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuData {
    /// Ordered top-level navigation entries
    #[serde(default)]
    pub navigation: Vec<NavigationItem>,
}

/// A single top-level navigation entry
///
/// An entry is either a plain link (`href` set, no `mega_menu`) or a mega
/// menu trigger (`mega_menu` set, `href` typically empty). The wire format
/// uses camelCase (`megaMenu`), matching the source files in the remote
/// document store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NavigationItem {
    /// Display label
    pub title: String,
    /// Target link; empty for entries that only open a mega menu
    #[serde(default)]
    pub href: String,
    /// Grouped dropdown content, if this entry opens a mega menu
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mega_menu: Option<MegaMenuData>,
}

/// Grouped dropdown content: an ordered sequence of columns
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MegaMenuData {
    /// Ordered columns of the dropdown
    #[serde(default)]
    pub columns: Vec<MenuColumn>,
}

/// One column of a mega menu
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuColumn {
    /// Column heading; may be empty for an unlabelled column
    #[serde(default)]
    pub title: String,
    /// Ordered links within the column
    #[serde(default)]
    pub items: Vec<MenuItem>,
}

/// A single link inside a mega menu column
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuItem {
    /// Display label
    pub title: String,
    /// Target link
    pub href: String,
}

impl MenuData {
    /// Creates an empty menu with no navigation entries
    pub fn empty() -> Self {
        Self { navigation: Vec::new() }
    }
}

impl NavigationItem {
    /// Creates a plain link entry with no mega menu
    pub fn link(title: impl Into<String>, href: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            href: href.into(),
            mega_menu: None,
        }
    }

    /// Returns true if this entry opens a mega menu rather than navigating
    pub fn is_mega_menu(&self) -> bool {
        self.mega_menu.is_some()
    }
}
