//! Document store client for remote menu retrieval and upload
//!
//! Talks to the document store hosting the menu configuration: direct file
//! content retrieval, metadata-resolved retrieval, list-backed retrieval,
//! and the administrative upload path guarded by an anti-forgery digest.

use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use super::{MegaMenuData, MenuColumn, MenuData, MenuItem, NavigationItem};

/// Errors that can occur when talking to the document store
#[derive(Debug, Error)]
pub enum StoreError {
    /// HTTP transport failure
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The store answered with a non-success status
    #[error("Document store returned {status} for {url}")]
    Status { status: reqwest::StatusCode, url: String },

    /// Failed to parse a store response body
    #[error("Failed to parse document store response: {0}")]
    Response(#[from] serde_json::Error),
}

/// File metadata returned by the metadata lookup endpoint
#[derive(Debug, Deserialize)]
struct FileMetadata {
    /// Where the file content can be downloaded; absolute or server-relative
    download_url: String,
}

/// Response envelope of the list items endpoint
#[derive(Debug, Deserialize)]
struct ListResponse {
    results: Vec<ListRecord>,
}

/// A single navigation record from a list-backed menu
///
/// Rows with a `column_title` become items of that column in the entry's
/// mega menu; rows without one become plain top-level links labelled by
/// `nav_title`.
#[derive(Debug, Clone, Deserialize)]
pub struct ListRecord {
    /// Top-level entry this row belongs to
    pub nav_title: String,
    /// Mega menu column, when the row is a grouped link
    #[serde(default)]
    pub column_title: Option<String>,
    /// Link label for grouped rows
    #[serde(default)]
    pub title: String,
    /// Link target
    #[serde(default)]
    pub url: String,
}

/// Anti-forgery token returned by the context-info endpoint
#[derive(Debug, Deserialize)]
struct ContextInfo {
    form_digest_value: String,
}

/// Client for the remote document store
///
/// Holds the store location plus the folder and file name of the menu
/// configuration. The base URL is overridable so tests can point the client
/// at a local server.
#[derive(Debug, Clone)]
pub struct DocumentStoreClient {
    /// HTTP client for making requests
    http_client: Client,
    /// Root URL of the document store
    base_url: String,
    /// Server-relative folder holding the menu file
    folder_path: String,
    /// Menu file name within the folder
    file_name: String,
}

impl DocumentStoreClient {
    /// Creates a new client for the given store location and menu file
    pub fn new(
        base_url: impl Into<String>,
        folder_path: impl Into<String>,
        file_name: impl Into<String>,
    ) -> Self {
        Self {
            http_client: Client::new(),
            base_url: trim_trailing_slash(base_url.into()),
            folder_path: folder_path.into(),
            file_name: file_name.into(),
        }
    }

    /// Server-relative path of the menu file
    pub fn file_path(&self) -> String {
        format!(
            "{}/{}",
            self.folder_path.trim_end_matches('/'),
            self.file_name
        )
    }

    /// URL for direct content retrieval
    fn content_url(&self) -> String {
        format!(
            "{}/api/files/content?path={}",
            self.base_url,
            urlencoded(&self.file_path())
        )
    }

    /// URL for the metadata lookup
    fn metadata_url(&self) -> String {
        format!(
            "{}/api/files/metadata?path={}",
            self.base_url,
            urlencoded(&self.file_path())
        )
    }

    /// URL for list item retrieval
    fn list_items_url(&self, list_name: &str) -> String {
        format!("{}/api/lists/{}/items", self.base_url, urlencoded(list_name))
    }

    /// URL for the file upload endpoint
    fn upload_url(&self) -> String {
        format!(
            "{}/api/files/add?folder={}&name={}&overwrite=true",
            self.base_url,
            urlencoded(&self.folder_path),
            urlencoded(&self.file_name)
        )
    }

    /// Resolves a possibly server-relative URL against the store root
    fn absolute_url(&self, url: &str) -> String {
        if url.starts_with('/') {
            format!("{}{}", self.base_url, url)
        } else {
            url.to_string()
        }
    }

    /// Fetches the raw menu file content by server-relative path
    ///
    /// This is the primary retrieval strategy: one GET straight at the
    /// content endpoint.
    pub async fn fetch_file_raw(&self) -> Result<String, StoreError> {
        self.get_text(&self.content_url()).await
    }

    /// Fetches the menu file content via metadata indirection
    ///
    /// The alternate retrieval strategy: first resolves the file's canonical
    /// download location, then fetches the content from there.
    pub async fn fetch_file_resolved(&self) -> Result<String, StoreError> {
        let url = self.metadata_url();
        let body = self.get_text(&url).await?;
        let metadata: FileMetadata = serde_json::from_str(&body)?;
        let download = self.absolute_url(&metadata.download_url);
        debug!(url = %download, "Resolved menu file location");
        self.get_text(&download).await
    }

    /// Fetches navigation records from a list-backed menu
    pub async fn fetch_list_items(&self, list_name: &str) -> Result<Vec<ListRecord>, StoreError> {
        let body = self.get_text(&self.list_items_url(list_name)).await?;
        let response: ListResponse = serde_json::from_str(&body)?;
        Ok(response.results)
    }

    /// Obtains a fresh anti-forgery digest for write operations
    async fn request_digest(&self) -> Result<String, StoreError> {
        let url = format!("{}/api/contextinfo", self.base_url);
        let response = self.http_client.post(&url).send().await?;
        if !response.status().is_success() {
            return Err(StoreError::Status {
                status: response.status(),
                url,
            });
        }
        let info: ContextInfo = serde_json::from_str(&response.text().await?)?;
        Ok(info.form_digest_value)
    }

    /// Uploads serialized menu source text to the configured folder
    ///
    /// Obtains a fresh digest first; the store rejects writes without one.
    pub async fn upload_menu_source(&self, source: &str) -> Result<(), StoreError> {
        let digest = self.request_digest().await?;
        let url = self.upload_url();
        let response = self
            .http_client
            .post(&url)
            .header("X-Request-Digest", digest)
            .body(source.to_string())
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(StoreError::Status {
                status: response.status(),
                url,
            });
        }
        Ok(())
    }

    /// Issues a GET and returns the body text of a successful response
    async fn get_text(&self, url: &str) -> Result<String, StoreError> {
        let response = self.http_client.get(url).send().await?;
        if !response.status().is_success() {
            return Err(StoreError::Status {
                status: response.status(),
                url: url.to_string(),
            });
        }
        Ok(response.text().await?)
    }
}

/// Builds a menu from list-backed navigation records
///
/// Top-level entries and columns keep first-seen row order; items within a
/// column are sorted alphabetically by title.
pub fn menu_from_records(records: &[ListRecord]) -> MenuData {
    let mut navigation: Vec<NavigationItem> = Vec::new();

    for record in records {
        match &record.column_title {
            None => {
                if !navigation.iter().any(|n| n.title == record.nav_title) {
                    navigation.push(NavigationItem::link(&record.nav_title, &record.url));
                }
            }
            Some(column_title) => {
                let entry_idx = match navigation.iter().position(|n| n.title == record.nav_title) {
                    Some(idx) => idx,
                    None => {
                        navigation.push(NavigationItem {
                            title: record.nav_title.clone(),
                            href: String::new(),
                            mega_menu: Some(MegaMenuData { columns: vec![] }),
                        });
                        navigation.len() - 1
                    }
                };
                let mega = navigation[entry_idx]
                    .mega_menu
                    .get_or_insert_with(|| MegaMenuData { columns: vec![] });
                let column_idx = match mega.columns.iter().position(|c| &c.title == column_title) {
                    Some(idx) => idx,
                    None => {
                        mega.columns.push(MenuColumn {
                            title: column_title.clone(),
                            items: vec![],
                        });
                        mega.columns.len() - 1
                    }
                };
                mega.columns[column_idx].items.push(MenuItem {
                    title: record.title.clone(),
                    href: record.url.clone(),
                });
            }
        }
    }

    for entry in &mut navigation {
        if let Some(mega) = &mut entry.mega_menu {
            for column in &mut mega.columns {
                column.items.sort_by(|a, b| a.title.cmp(&b.title));
            }
        }
    }

    MenuData { navigation }
}

/// Trims a trailing slash so URL formatting never doubles separators
fn trim_trailing_slash(url: String) -> String {
    url.trim_end_matches('/').to_string()
}

/// URL-encodes a string for use in query parameters
fn urlencoded(s: &str) -> String {
    s.replace(' ', "%20").replace('\'', "%27")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> DocumentStoreClient {
        DocumentStoreClient::new(
            "https://store.example.com/",
            "/shared/config",
            "mega-menu.ts",
        )
    }

    fn record(nav: &str, column: Option<&str>, title: &str, url: &str) -> ListRecord {
        ListRecord {
            nav_title: nav.to_string(),
            column_title: column.map(|c| c.to_string()),
            title: title.to_string(),
            url: url.to_string(),
        }
    }

    #[test]
    fn test_file_path_joins_folder_and_name() {
        assert_eq!(client().file_path(), "/shared/config/mega-menu.ts");
    }

    #[test]
    fn test_content_url_shape() {
        assert_eq!(
            client().content_url(),
            "https://store.example.com/api/files/content?path=/shared/config/mega-menu.ts"
        );
    }

    #[test]
    fn test_metadata_url_shape() {
        assert_eq!(
            client().metadata_url(),
            "https://store.example.com/api/files/metadata?path=/shared/config/mega-menu.ts"
        );
    }

    #[test]
    fn test_upload_url_shape() {
        assert_eq!(
            client().upload_url(),
            "https://store.example.com/api/files/add?folder=/shared/config&name=mega-menu.ts&overwrite=true"
        );
    }

    #[test]
    fn test_list_items_url_encodes_spaces() {
        assert_eq!(
            client().list_items_url("Mega Menu"),
            "https://store.example.com/api/lists/Mega%20Menu/items"
        );
    }

    #[test]
    fn test_absolute_url_resolves_server_relative_paths() {
        let client = client();
        assert_eq!(
            client.absolute_url("/files/abc"),
            "https://store.example.com/files/abc"
        );
        assert_eq!(
            client.absolute_url("https://cdn.example.com/abc"),
            "https://cdn.example.com/abc"
        );
    }

    #[test]
    fn test_url_encoding() {
        assert_eq!(urlencoded("Mega Menu"), "Mega%20Menu");
        assert_eq!(urlencoded("O'Brien"), "O%27Brien");
    }

    #[test]
    fn test_metadata_response_deserializes() {
        let metadata: FileMetadata =
            serde_json::from_str(r#"{"download_url":"/files/mega-menu.ts"}"#)
                .expect("Should deserialize metadata");
        assert_eq!(metadata.download_url, "/files/mega-menu.ts");
    }

    #[test]
    fn test_context_info_deserializes() {
        let info: ContextInfo = serde_json::from_str(r#"{"form_digest_value":"0x123,abc"}"#)
            .expect("Should deserialize context info");
        assert_eq!(info.form_digest_value, "0x123,abc");
    }

    #[test]
    fn test_list_response_deserializes_with_optional_fields() {
        let response: ListResponse = serde_json::from_str(
            r#"{"results":[{"nav_title":"Home","url":"/"},{"nav_title":"Tools","column_title":"Apps","title":"Forms","url":"/forms"}]}"#,
        )
        .expect("Should deserialize list response");

        assert_eq!(response.results.len(), 2);
        assert!(response.results[0].column_title.is_none());
        assert_eq!(response.results[1].column_title.as_deref(), Some("Apps"));
    }

    #[test]
    fn test_menu_from_records_builds_plain_links() {
        let records = vec![
            record("Home", None, "", "/"),
            record("News", None, "", "/news"),
        ];

        let menu = menu_from_records(&records);

        assert_eq!(menu.navigation.len(), 2);
        assert_eq!(menu.navigation[0].title, "Home");
        assert_eq!(menu.navigation[0].href, "/");
        assert!(menu.navigation[0].mega_menu.is_none());
    }

    #[test]
    fn test_menu_from_records_groups_columns_under_entry() {
        let records = vec![
            record("Tools", Some("Apps"), "Forms", "/forms"),
            record("Tools", Some("Apps"), "Calendar", "/calendar"),
            record("Tools", Some("Admin"), "Users", "/users"),
        ];

        let menu = menu_from_records(&records);

        assert_eq!(menu.navigation.len(), 1);
        let entry = &menu.navigation[0];
        assert_eq!(entry.title, "Tools");
        assert!(entry.href.is_empty());

        let mega = entry.mega_menu.as_ref().expect("Should build a mega menu");
        assert_eq!(mega.columns.len(), 2);
        assert_eq!(mega.columns[0].title, "Apps");
        assert_eq!(mega.columns[1].title, "Admin");
    }

    #[test]
    fn test_menu_from_records_sorts_items_alphabetically_within_column() {
        let records = vec![
            record("Tools", Some("Apps"), "Wiki", "/wiki"),
            record("Tools", Some("Apps"), "Calendar", "/calendar"),
            record("Tools", Some("Apps"), "Forms", "/forms"),
        ];

        let menu = menu_from_records(&records);
        let items = &menu.navigation[0].mega_menu.as_ref().unwrap().columns[0].items;
        let titles: Vec<&str> = items.iter().map(|i| i.title.as_str()).collect();

        assert_eq!(titles, vec!["Calendar", "Forms", "Wiki"]);
    }

    #[test]
    fn test_menu_from_records_preserves_entry_order() {
        let records = vec![
            record("Zeta", None, "", "/z"),
            record("Alpha", None, "", "/a"),
        ];

        let menu = menu_from_records(&records);
        let titles: Vec<&str> = menu.navigation.iter().map(|i| i.title.as_str()).collect();

        assert_eq!(titles, vec!["Zeta", "Alpha"]);
    }

    #[test]
    fn test_menu_from_records_empty_input_yields_empty_menu() {
        assert!(menu_from_records(&[]).navigation.is_empty());
    }

    #[test]
    fn test_base_url_trailing_slash_is_trimmed() {
        let with_slash = DocumentStoreClient::new("https://s.example.com/", "/f", "m.ts");
        let without = DocumentStoreClient::new("https://s.example.com", "/f", "m.ts");
        assert_eq!(with_slash.content_url(), without.content_url());
    }
}
