//! Site content API handlers
//!
//! Getters return the provider's current content. PUT handlers go through
//! the provider setters, so they always succeed once the body is valid;
//! backend failures are logged by the provider, not reported here.

use super::SharedState;
use crate::content::{GalleryImage, Service, SiteContent, SocialLinks, TeamMember, Testimonial};
use crate::error::AppError;
use axum::{extract::State, response::Json};
use serde::{Deserialize, Serialize};

/// Body for the image setting endpoints
#[derive(Debug, Deserialize, Serialize)]
pub struct ImageUrlBody {
    /// Image URL
    pub url: String,
}

impl ImageUrlBody {
    fn validated(self) -> Result<String, AppError> {
        let url = self.url.trim();
        if url.is_empty() {
            return Err(AppError::InvalidRequest("url cannot be empty".to_string()));
        }
        Ok(url.to_string())
    }
}

/// GET /api/content - Everything the site renders
pub async fn get_content(State(state): State<SharedState>) -> Json<SiteContent> {
    Json(state.provider.snapshot().await)
}

/// POST /api/content/reload - Fetch content from the backend again
pub async fn reload_content(State(state): State<SharedState>) -> Json<SiteContent> {
    state.provider.load().await;
    Json(state.provider.snapshot().await)
}

/// GET /api/content/services
pub async fn get_services(State(state): State<SharedState>) -> Json<Vec<Service>> {
    Json(state.provider.services().await)
}

/// PUT /api/content/services - Replace all services
pub async fn put_services(
    State(state): State<SharedState>,
    Json(services): Json<Vec<Service>>,
) -> Json<Vec<Service>> {
    state.provider.set_services(services).await;
    Json(state.provider.services().await)
}

/// GET /api/content/gallery
pub async fn get_gallery(State(state): State<SharedState>) -> Json<Vec<GalleryImage>> {
    Json(state.provider.gallery_images().await)
}

/// PUT /api/content/gallery - Replace the gallery
pub async fn put_gallery(
    State(state): State<SharedState>,
    Json(images): Json<Vec<GalleryImage>>,
) -> Json<Vec<GalleryImage>> {
    state.provider.set_gallery_images(images).await;
    Json(state.provider.gallery_images().await)
}

/// GET /api/content/testimonials
pub async fn get_testimonials(State(state): State<SharedState>) -> Json<Vec<Testimonial>> {
    Json(state.provider.testimonials().await)
}

/// PUT /api/content/testimonials - Replace all testimonials
pub async fn put_testimonials(
    State(state): State<SharedState>,
    Json(testimonials): Json<Vec<Testimonial>>,
) -> Json<Vec<Testimonial>> {
    state.provider.set_testimonials(testimonials).await;
    Json(state.provider.testimonials().await)
}

/// GET /api/content/team
pub async fn get_team(State(state): State<SharedState>) -> Json<Vec<TeamMember>> {
    Json(state.provider.team_members().await)
}

/// PUT /api/content/team - Replace the team
pub async fn put_team(
    State(state): State<SharedState>,
    Json(members): Json<Vec<TeamMember>>,
) -> Json<Vec<TeamMember>> {
    state.provider.set_team_members(members).await;
    Json(state.provider.team_members().await)
}

/// GET /api/content/social-links
pub async fn get_social_links(State(state): State<SharedState>) -> Json<SocialLinks> {
    Json(state.provider.social_links().await)
}

/// PUT /api/content/social-links - Replace all social links
pub async fn put_social_links(
    State(state): State<SharedState>,
    Json(links): Json<SocialLinks>,
) -> Json<SocialLinks> {
    state.provider.set_social_links(links).await;
    Json(state.provider.social_links().await)
}

/// GET /api/content/hero-image
pub async fn get_hero_image(State(state): State<SharedState>) -> Json<ImageUrlBody> {
    Json(ImageUrlBody {
        url: state.provider.hero_image_url().await,
    })
}

/// PUT /api/content/hero-image
pub async fn put_hero_image(
    State(state): State<SharedState>,
    Json(body): Json<ImageUrlBody>,
) -> Result<Json<ImageUrlBody>, AppError> {
    let url = body.validated()?;
    state.provider.set_hero_image_url(url).await;
    Ok(Json(ImageUrlBody {
        url: state.provider.hero_image_url().await,
    }))
}

/// GET /api/content/about-us-image
pub async fn get_about_us_image(State(state): State<SharedState>) -> Json<ImageUrlBody> {
    Json(ImageUrlBody {
        url: state.provider.about_us_image_url().await,
    })
}

/// PUT /api/content/about-us-image
pub async fn put_about_us_image(
    State(state): State<SharedState>,
    Json(body): Json<ImageUrlBody>,
) -> Result<Json<ImageUrlBody>, AppError> {
    let url = body.validated()?;
    state.provider.set_about_us_image_url(url).await;
    Ok(Json(ImageUrlBody {
        url: state.provider.about_us_image_url().await,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::AppState;
    use crate::config::BackendConfig;
    use crate::content::defaults;
    use std::sync::Arc;

    fn create_test_state() -> SharedState {
        Arc::new(AppState::new(BackendConfig::default()))
    }

    #[tokio::test]
    async fn test_get_content_offline_returns_defaults() {
        let state = create_test_state();
        let response = get_content(State(state)).await;
        assert_eq!(response.0, SiteContent::default());
    }

    #[tokio::test]
    async fn test_put_services_replaces_local_content() {
        let state = create_test_state();
        let services = defaults::services()[..2].to_vec();

        let response = put_services(State(state.clone()), Json(services.clone())).await;
        assert_eq!(response.0, services);

        let listed = get_services(State(state)).await;
        assert_eq!(listed.0.len(), 2);
    }

    #[tokio::test]
    async fn test_put_hero_image_trims_url() {
        let state = create_test_state();
        let body = ImageUrlBody {
            url: "  https://img/hero.jpg ".to_string(),
        };

        let result = put_hero_image(State(state.clone()), Json(body)).await;
        assert!(result.is_ok());
        assert_eq!(result.unwrap().url, "https://img/hero.jpg");

        let current = get_hero_image(State(state)).await;
        assert_eq!(current.url, "https://img/hero.jpg");
    }

    #[tokio::test]
    async fn test_put_about_us_image_rejects_empty_url() {
        let state = create_test_state();
        let body = ImageUrlBody {
            url: "   ".to_string(),
        };

        let result = put_about_us_image(State(state.clone()), Json(body)).await;
        match result {
            Err(AppError::InvalidRequest(_)) => {}
            other => panic!("Expected InvalidRequest error, got: {:?}", other.map(|j| j.0)),
        }
        assert_eq!(
            get_about_us_image(State(state)).await.url,
            defaults::DEFAULT_ABOUT_US_IMAGE_URL
        );
    }

    #[tokio::test]
    async fn test_put_social_links_roundtrip() {
        let state = create_test_state();
        let mut links = SocialLinks::new();
        links.insert("linkedin".to_string(), "https://linkedin.com/company/x".to_string());

        put_social_links(State(state.clone()), Json(links.clone())).await;
        assert_eq!(get_social_links(State(state)).await.0, links);
    }
}
