//! Site content provider
//!
//! Holds the content the site renders. `load` pulls each collection from the
//! backend on a best-effort basis; setters write through to the backend and
//! then update local state whether or not the remote write succeeded.
//!
//! Local state always holds something renderable: it starts from the
//! built-in defaults and is only replaced by non-empty remote data.

use super::models::{
    gallery_from_rows, services_from_rows, site_setting, social_link_rows, social_links_from_rows,
    team_from_rows, testimonials_from_rows, GalleryImage, Service, SiteContent, SiteContentEntry,
    SocialLinks, TeamMember, Testimonial, ABOUT_US_IMAGE_KEY, HERO_IMAGE_KEY,
};
use crate::backend::{
    to_rows, BackendError, Collection, ContentBackend, Direction, RestBackend, Row, SelectQuery,
};
use crate::config::BackendConfig;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

/// Shared content state with write-through to the backend
pub struct SiteContentProvider {
    backend: Option<Arc<dyn ContentBackend>>,
    content: RwLock<SiteContent>,
}

impl SiteContentProvider {
    /// Create a provider holding the built-in defaults
    ///
    /// With `None` every remote operation is skipped.
    pub fn new(backend: Option<Arc<dyn ContentBackend>>) -> Self {
        Self {
            backend,
            content: RwLock::new(SiteContent::default()),
        }
    }

    /// Create a provider for the configured backend, or an offline one
    pub fn from_config(config: &BackendConfig) -> Self {
        Self::new(backend_from_config(config))
    }

    /// Whether a remote backend is attached
    pub fn is_remote(&self) -> bool {
        self.backend.is_some()
    }

    /// The attached backend, if any
    pub fn backend(&self) -> Option<Arc<dyn ContentBackend>> {
        self.backend.clone()
    }

    /// Fetch all six collections from the backend
    ///
    /// Reads run concurrently and finish in any order. A read that fails or
    /// returns no rows leaves that part of the content as it was.
    pub async fn load(&self) {
        let Some(backend) = self.backend.as_deref() else {
            tracing::warn!("Backend not configured, using built-in content");
            return;
        };

        tracing::info!("Fetching site content from backend");
        let ordered = SelectQuery::all().order("id", Direction::Ascending);

        tokio::join!(
            self.load_services(backend, &ordered),
            self.load_gallery(backend, &ordered),
            self.load_testimonials(backend, &ordered),
            self.load_team(backend, &ordered),
            self.load_social_links(backend, &ordered),
            self.load_site_settings(backend),
        );
    }

    async fn load_services(&self, backend: &dyn ContentBackend, query: &SelectQuery) {
        if let Some(rows) = fetch(backend, Collection::Services, query).await {
            let services = services_from_rows(rows);
            if !services.is_empty() {
                self.content.write().await.services = services;
            }
        }
    }

    async fn load_gallery(&self, backend: &dyn ContentBackend, query: &SelectQuery) {
        if let Some(rows) = fetch(backend, Collection::GalleryItems, query).await {
            let images = gallery_from_rows(rows);
            if !images.is_empty() {
                self.content.write().await.gallery_images = images;
            }
        }
    }

    async fn load_testimonials(&self, backend: &dyn ContentBackend, query: &SelectQuery) {
        if let Some(rows) = fetch(backend, Collection::Testimonials, query).await {
            let testimonials = testimonials_from_rows(rows);
            if !testimonials.is_empty() {
                self.content.write().await.testimonials = testimonials;
            }
        }
    }

    async fn load_team(&self, backend: &dyn ContentBackend, query: &SelectQuery) {
        if let Some(rows) = fetch(backend, Collection::TeamMembers, query).await {
            let members = team_from_rows(rows);
            if !members.is_empty() {
                self.content.write().await.team_members = members;
            }
        }
    }

    async fn load_social_links(&self, backend: &dyn ContentBackend, query: &SelectQuery) {
        if let Some(rows) = fetch(backend, Collection::SocialLinks, query).await {
            let links = social_links_from_rows(rows);
            if !links.is_empty() {
                self.content.write().await.social_links = links;
            }
        }
    }

    async fn load_site_settings(&self, backend: &dyn ContentBackend) {
        let Some(rows) = fetch(backend, Collection::SiteContent, &SelectQuery::all()).await else {
            return;
        };

        let hero = site_setting(&rows, HERO_IMAGE_KEY);
        let about_us = site_setting(&rows, ABOUT_US_IMAGE_KEY);

        let mut content = self.content.write().await;
        if let Some(url) = hero {
            content.hero_image_url = url;
        }
        if let Some(url) = about_us {
            content.about_us_image_url = url;
        }
    }

    /// Snapshot of all content
    pub async fn snapshot(&self) -> SiteContent {
        self.content.read().await.clone()
    }

    /// Current hero image URL
    pub async fn hero_image_url(&self) -> String {
        self.content.read().await.hero_image_url.clone()
    }

    /// Current about-us image URL
    pub async fn about_us_image_url(&self) -> String {
        self.content.read().await.about_us_image_url.clone()
    }

    /// Current services
    pub async fn services(&self) -> Vec<Service> {
        self.content.read().await.services.clone()
    }

    /// Current gallery
    pub async fn gallery_images(&self) -> Vec<GalleryImage> {
        self.content.read().await.gallery_images.clone()
    }

    /// Current testimonials
    pub async fn testimonials(&self) -> Vec<Testimonial> {
        self.content.read().await.testimonials.clone()
    }

    /// Current team
    pub async fn team_members(&self) -> Vec<TeamMember> {
        self.content.read().await.team_members.clone()
    }

    /// Current social links
    pub async fn social_links(&self) -> SocialLinks {
        self.content.read().await.social_links.clone()
    }

    /// Store the hero image setting, then update local state
    pub async fn set_hero_image_url(&self, url: String) {
        self.upsert_setting(HERO_IMAGE_KEY, &url, 1).await;
        self.content.write().await.hero_image_url = url;
    }

    /// Store the about-us image setting, then update local state
    pub async fn set_about_us_image_url(&self, url: String) {
        self.upsert_setting(ABOUT_US_IMAGE_KEY, &url, 2).await;
        self.content.write().await.about_us_image_url = url;
    }

    /// Replace all services remotely, then locally
    pub async fn set_services(&self, services: Vec<Service>) {
        self.replace_remote(Collection::Services, to_rows(&services))
            .await;
        self.content.write().await.services = services;
    }

    /// Replace the gallery remotely, then locally
    pub async fn set_gallery_images(&self, images: Vec<GalleryImage>) {
        self.replace_remote(Collection::GalleryItems, to_rows(&images))
            .await;
        self.content.write().await.gallery_images = images;
    }

    /// Replace all testimonials remotely, then locally
    pub async fn set_testimonials(&self, testimonials: Vec<Testimonial>) {
        self.replace_remote(Collection::Testimonials, to_rows(&testimonials))
            .await;
        self.content.write().await.testimonials = testimonials;
    }

    /// Replace the team remotely, then locally
    pub async fn set_team_members(&self, members: Vec<TeamMember>) {
        self.replace_remote(Collection::TeamMembers, to_rows(&members))
            .await;
        self.content.write().await.team_members = members;
    }

    /// Replace all social links remotely, then locally
    pub async fn set_social_links(&self, links: SocialLinks) {
        self.replace_remote(Collection::SocialLinks, to_rows(&social_link_rows(&links)))
            .await;
        self.content.write().await.social_links = links;
    }

    /// Delete every row in `collection`, then insert `rows`
    ///
    /// Not atomic. If the delete fails the insert is skipped so the
    /// collection is not duplicated. Failures are logged, never returned.
    async fn replace_remote(
        &self,
        collection: Collection,
        rows: Result<Vec<Value>, BackendError>,
    ) {
        let Some(backend) = self.backend.as_deref() else {
            tracing::warn!(collection = %collection, "Backend not configured, updating locally only");
            return;
        };

        let rows = match rows {
            Ok(rows) => rows,
            Err(e) => {
                tracing::error!(collection = %collection, error = %e, "Failed to encode rows");
                return;
            }
        };

        if let Err(e) = backend.delete_all(collection).await {
            tracing::error!(collection = %collection, error = %e, "Failed to clear collection");
            return;
        }

        match backend.insert(collection, &rows).await {
            Ok(()) => tracing::info!(
                collection = %collection,
                rows = rows.len(),
                "Replaced collection on backend"
            ),
            Err(e) => {
                tracing::error!(collection = %collection, error = %e, "Failed to insert rows")
            }
        }
    }

    async fn upsert_setting(&self, key: &str, url: &str, display_order: i32) {
        let Some(backend) = self.backend.as_deref() else {
            tracing::warn!(key = %key, "Backend not configured, updating locally only");
            return;
        };

        let entry = SiteContentEntry {
            key: key.to_string(),
            value: url.to_string(),
            is_active: true,
            display_order,
        };
        let row = match serde_json::to_value(&entry) {
            Ok(row) => row,
            Err(e) => {
                tracing::error!(key = %key, error = %e, "Failed to encode setting");
                return;
            }
        };

        if let Err(e) = backend.upsert(Collection::SiteContent, &row).await {
            tracing::error!(key = %key, error = %e, "Failed to update site setting");
        }
    }
}

/// Read one collection; `None` when the read failed or came back empty
async fn fetch(
    backend: &dyn ContentBackend,
    collection: Collection,
    query: &SelectQuery,
) -> Option<Vec<Row>> {
    match backend.select(collection, query).await {
        Ok(rows) if !rows.is_empty() => {
            tracing::info!(collection = %collection, rows = rows.len(), "Fetched collection");
            Some(rows)
        }
        Ok(_) => {
            tracing::warn!(collection = %collection, "Collection is empty, using built-in content");
            None
        }
        Err(e) => {
            tracing::error!(collection = %collection, error = %e, "Failed to fetch collection");
            tracing::warn!(collection = %collection, "Using built-in content");
            None
        }
    }
}

/// Build the REST backend if the configuration allows it
///
/// Missing settings disable the backend silently; a client that cannot be
/// built is logged and also leaves the site offline.
pub fn backend_from_config(config: &BackendConfig) -> Option<Arc<dyn ContentBackend>> {
    if !config.is_configured() {
        tracing::warn!("Backend environment variables not configured");
        return None;
    }
    let url = config.url.as_deref()?;
    let key = config.anon_key.as_deref()?;

    match RestBackend::new(url, key, Duration::from_secs(config.timeout_secs)) {
        Ok(backend) => Some(Arc::new(backend)),
        Err(e) => {
            tracing::error!(error = %e, "Failed to create backend client");
            None
        }
    }
}
