//! Menu provider: the ordered menu acquisition chain
//!
//! Collapses the retrieval variants into one provider over pluggable
//! sources. `get_menu_data` tries the local cache, then each source in
//! order, then the built-in fallback, and therefore never fails: remote and
//! parsing errors are logged and swallowed so navigation stays available
//! even when its content is degraded.

use async_trait::async_trait;
use chrono::Duration;
use thiserror::Error;
use tracing::{info, warn};

use crate::cache::{CacheManager, CachedData};
use crate::config::ProviderConfig;
use crate::data::store::menu_from_records;
use crate::data::{
    fallback_menu, recover_menu_data, serialize_menu_source, DocumentStoreClient, MenuData,
    RecoverError, StoreError,
};

/// Cache key of the single menu slot
const MENU_CACHE_KEY: &str = "menu_data";

/// Failure of one retrieval strategy
///
/// Wraps retrieval and recovery failures into the uniform signal the
/// provider chain degrades on.
#[derive(Debug, Error)]
pub enum SourceError {
    /// The document store could not be read
    #[error(transparent)]
    Store(#[from] StoreError),

    /// The fetched text could not be recovered into a menu
    #[error(transparent)]
    Recover(#[from] RecoverError),
}

/// One strategy for producing a complete menu
#[async_trait]
pub trait MenuSource: Send + Sync {
    /// Short name used in logs
    fn name(&self) -> &'static str;

    /// Attempts to produce a validated menu
    async fn fetch(&self) -> Result<MenuData, SourceError>;
}

/// Primary strategy: direct file content retrieval plus recovery
pub struct DirectFileSource {
    client: DocumentStoreClient,
}

impl DirectFileSource {
    /// Creates the source over the given store client
    pub fn new(client: DocumentStoreClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl MenuSource for DirectFileSource {
    fn name(&self) -> &'static str {
        "direct-file"
    }

    async fn fetch(&self) -> Result<MenuData, SourceError> {
        let raw = self.client.fetch_file_raw().await?;
        Ok(recover_menu_data(&raw)?)
    }
}

/// Alternate strategy: metadata-resolved retrieval plus recovery
pub struct ResolvedFileSource {
    client: DocumentStoreClient,
}

impl ResolvedFileSource {
    /// Creates the source over the given store client
    pub fn new(client: DocumentStoreClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl MenuSource for ResolvedFileSource {
    fn name(&self) -> &'static str {
        "resolved-file"
    }

    async fn fetch(&self) -> Result<MenuData, SourceError> {
        let raw = self.client.fetch_file_resolved().await?;
        Ok(recover_menu_data(&raw)?)
    }
}

/// List-backed strategy: navigation records grouped into a menu
pub struct ListSource {
    client: DocumentStoreClient,
    list_name: String,
}

impl ListSource {
    /// Creates the source over the given store client and list
    pub fn new(client: DocumentStoreClient, list_name: impl Into<String>) -> Self {
        Self {
            client,
            list_name: list_name.into(),
        }
    }
}

#[async_trait]
impl MenuSource for ListSource {
    fn name(&self) -> &'static str {
        "list"
    }

    async fn fetch(&self) -> Result<MenuData, SourceError> {
        let records = self.client.fetch_list_items(&self.list_name).await?;
        Ok(menu_from_records(&records))
    }
}

/// Produces validated menus, preferring cache, then remote sources, then
/// the built-in fallback
///
/// The cache slot is read-then-written without locking; two racing calls
/// compute equivalent results, an accepted low-stakes race.
pub struct MenuProvider {
    /// Retrieval strategies, tried strictly in order
    sources: Vec<Box<dyn MenuSource>>,
    /// Local TTL cache; `None` disables caching
    cache: Option<CacheManager>,
    /// Store client for the administrative upload path
    store: DocumentStoreClient,
    /// Freshness window for cached menus
    ttl: Duration,
}

impl MenuProvider {
    /// Creates a provider with the standard source chain (direct file, then
    /// metadata-resolved file)
    pub fn new(store: DocumentStoreClient, cache: Option<CacheManager>, ttl: Duration) -> Self {
        let sources: Vec<Box<dyn MenuSource>> = vec![
            Box::new(DirectFileSource::new(store.clone())),
            Box::new(ResolvedFileSource::new(store.clone())),
        ];
        Self {
            sources,
            cache,
            store,
            ttl,
        }
    }

    /// Creates a provider from configuration
    ///
    /// Appends the list-backed source when a list name is configured. A
    /// missing cache directory disables caching rather than failing.
    pub fn from_config(config: &ProviderConfig) -> Self {
        let store = DocumentStoreClient::new(
            config.base_url.clone(),
            config.folder_path.clone(),
            config.file_name.clone(),
        );
        let cache = match &config.cache_dir {
            Some(dir) => Some(CacheManager::with_dir(dir.clone())),
            None => CacheManager::new(),
        };

        let mut provider = Self::new(store, cache, config.cache_ttl());
        if let Some(list_name) = &config.list_name {
            let client = provider.store.clone();
            provider
                .sources
                .push(Box::new(ListSource::new(client, list_name.clone())));
        }
        provider
    }

    /// Replaces the source chain
    ///
    /// Used by tests to inject in-memory sources; order is preserved.
    pub fn with_sources(mut self, sources: Vec<Box<dyn MenuSource>>) -> Self {
        self.sources = sources;
        self
    }

    /// Returns a menu, never failing
    ///
    /// Acquisition order: fresh cache, then each source, then the built-in
    /// fallback. A successful source result is cached for the configured
    /// TTL.
    pub async fn get_menu_data(&self) -> MenuData {
        if let Some(cache) = &self.cache {
            if let Some(cached) = cache.read::<MenuData>(MENU_CACHE_KEY) {
                info!(cached_at = %cached.cached_at, "Serving menu from cache");
                return cached.data;
            }
        }
        self.fetch_and_cache().await
    }

    /// Returns a menu from the sources, bypassing the cache read
    ///
    /// The result still lands in the cache so subsequent reads are warm.
    pub async fn refresh(&self) -> MenuData {
        self.fetch_and_cache().await
    }

    /// Publishes a menu to the document store
    ///
    /// Serializes the menu back into the source-text declaration format and
    /// uploads it. The local cache slot is invalidated on success only, so
    /// a failed upload keeps serving the previous content.
    pub async fn upload_menu_data(&self, menu: &MenuData) -> Result<(), StoreError> {
        let source = serialize_menu_source(menu);
        self.store.upload_menu_source(&source).await?;
        if let Some(cache) = &self.cache {
            cache.evict(MENU_CACHE_KEY);
        }
        info!("Menu uploaded; local cache invalidated");
        Ok(())
    }

    /// Returns the cached menu slot, if present and fresh
    pub fn cached(&self) -> Option<CachedData<MenuData>> {
        self.cache.as_ref()?.read(MENU_CACHE_KEY)
    }

    /// Deletes the cached menu slot
    pub fn clear_cache(&self) {
        if let Some(cache) = &self.cache {
            cache.evict(MENU_CACHE_KEY);
        }
    }

    /// Tries each source in order, caching and returning the first success
    async fn fetch_and_cache(&self) -> MenuData {
        for source in &self.sources {
            match source.fetch().await {
                Ok(menu) => {
                    info!(
                        source = source.name(),
                        entries = menu.navigation.len(),
                        "Menu retrieved"
                    );
                    if let Some(cache) = &self.cache {
                        if let Err(e) = cache.write(MENU_CACHE_KEY, &menu, self.ttl) {
                            warn!(error = %e, "Failed to write menu cache");
                        }
                    }
                    return menu;
                }
                Err(e) => {
                    warn!(source = source.name(), error = %e, "Menu source failed");
                }
            }
        }

        info!("All menu sources failed; serving built-in fallback");
        fallback_menu()
    }
}
