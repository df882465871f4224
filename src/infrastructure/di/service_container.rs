//! Service container for dependency injection
//!
//! Wires services to their I/O boundaries.

use std::sync::Arc;

use crate::application::services::CatalogService;
use crate::application::{AssetCatalog, ApplicationResult, ExplorerSession, Preloader};
use crate::config::Settings;
use crate::domain::CatalogTree;
use crate::infrastructure::traits::{BitmapDecoder, FileSystem, ImageDecoder, RealFileSystem};

/// Container holding settings and the shared I/O boundaries.
pub struct ServiceContainer {
    /// Application settings
    pub settings: Arc<Settings>,

    /// Filesystem abstraction
    pub fs: Arc<dyn FileSystem>,

    /// Image decoder used by the preloader
    pub decoder: Arc<dyn BitmapDecoder>,
}

impl ServiceContainer {
    /// Create a new service container with real implementations.
    pub fn new(settings: Settings) -> Self {
        Self::with_deps(settings, Arc::new(RealFileSystem), Arc::new(ImageDecoder))
    }

    /// Create a service container with custom dependencies (for testing).
    pub fn with_deps(
        settings: Settings,
        fs: Arc<dyn FileSystem>,
        decoder: Arc<dyn BitmapDecoder>,
    ) -> Self {
        let settings = Arc::new(settings);

        Self {
            settings,
            fs,
            decoder,
        }
    }

    pub fn catalog_service(&self) -> CatalogService {
        CatalogService::new(Arc::clone(&self.fs))
    }

    pub fn preloader(&self) -> Preloader {
        Preloader::new(Arc::clone(&self.fs), Arc::clone(&self.decoder))
    }

    /// Images under the configured directory. Empty when none is configured.
    pub fn asset_catalog(&self) -> ApplicationResult<AssetCatalog> {
        match &self.settings.catalog.images_dir {
            Some(dir) => AssetCatalog::scan(self.fs.as_ref(), dir),
            None => Ok(AssetCatalog::default()),
        }
    }

    /// Session over `tree` using the configured order and page size.
    pub fn session(&self, tree: Arc<CatalogTree>) -> ExplorerSession {
        ExplorerSession::new(
            tree,
            self.settings.explorer.sibling_order,
            self.settings.explorer.page_size,
        )
    }
}
