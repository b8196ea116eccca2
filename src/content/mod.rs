//! Site content: record types, built-in defaults, and the provider that
//! keeps them in sync with the backend.

pub mod defaults;
pub mod models;
pub mod provider;

pub use models::{
    GalleryImage, RecordId, Service, SiteContent, SocialLinks, TeamMember, Testimonial,
};
pub use provider::SiteContentProvider;
