//! Built-in default navigation
//!
//! The terminal value of the menu acquisition chain. When the cache is cold
//! and every remote strategy has failed, the provider serves this menu so
//! navigation is never empty.

use super::{MegaMenuData, MenuColumn, MenuData, MenuItem, NavigationItem};

/// Returns the built-in default menu
///
/// Contains the four standard portal entries (My Sites, Forms Central,
/// Library, IT Support Portal). Library opens a small mega menu; the rest
/// are plain links.
pub fn fallback_menu() -> MenuData {
    MenuData {
        navigation: vec![
            NavigationItem::link("My Sites", "https://portal.example.com/sites"),
            NavigationItem::link("Forms Central", "https://portal.example.com/forms"),
            NavigationItem {
                title: "Library".to_string(),
                href: String::new(),
                mega_menu: Some(MegaMenuData {
                    columns: vec![MenuColumn {
                        title: "Resources".to_string(),
                        items: vec![
                            MenuItem {
                                title: "Catalog".to_string(),
                                href: "https://library.example.com/catalog".to_string(),
                            },
                            MenuItem {
                                title: "Journals".to_string(),
                                href: "https://library.example.com/journals".to_string(),
                            },
                        ],
                    }],
                }),
            },
            NavigationItem::link("IT Support Portal", "https://support.example.com/"),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fallback_contains_standard_portal_entries() {
        let menu = fallback_menu();
        let titles: Vec<&str> = menu.navigation.iter().map(|i| i.title.as_str()).collect();

        for expected in ["My Sites", "Forms Central", "Library", "IT Support Portal"] {
            assert!(
                titles.contains(&expected),
                "Fallback menu is missing entry: {}",
                expected
            );
        }
    }

    #[test]
    fn test_fallback_navigation_is_never_empty() {
        assert!(!fallback_menu().navigation.is_empty());
    }

    #[test]
    fn test_fallback_entries_are_link_or_mega_menu_never_both() {
        for item in fallback_menu().navigation {
            if item.is_mega_menu() {
                assert!(
                    item.href.is_empty(),
                    "Mega menu trigger {} should not also carry a link",
                    item.title
                );
            } else {
                assert!(
                    !item.href.is_empty(),
                    "Plain link {} should carry a target",
                    item.title
                );
            }
        }
    }

    #[test]
    fn test_fallback_library_mega_menu_has_items() {
        let menu = fallback_menu();
        let library = menu
            .navigation
            .iter()
            .find(|i| i.title == "Library")
            .expect("Library entry missing");

        let mega = library.mega_menu.as_ref().expect("Library should open a mega menu");
        assert!(!mega.columns.is_empty());
        assert!(mega.columns.iter().all(|c| !c.items.is_empty()));
    }

    #[test]
    fn test_fallback_survives_serialization_roundtrip() {
        let menu = fallback_menu();
        let json = serde_json::to_string(&menu).expect("Failed to serialize fallback");
        let parsed: MenuData = serde_json::from_str(&json).expect("Failed to deserialize fallback");
        assert_eq!(parsed, menu);
    }
}
