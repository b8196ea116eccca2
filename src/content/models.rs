//! Content records shown on the site
//!
//! Each record type has a matching raw row type used only for decoding what
//! the backend returns. Rows are lenient: missing optional columns get the
//! defaults the site renders with.

use crate::backend::Row;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Currency every price is shown in
pub const CURRENCY: &str = "Ksh";

/// Key of the hero image setting in `site_content`
pub const HERO_IMAGE_KEY: &str = "hero_image_url";
/// Key of the about-us image setting in `site_content`
pub const ABOUT_US_IMAGE_KEY: &str = "about_us_image_url";

/// Row identifier; the backend uses integer or text keys depending on the table
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordId {
    /// Numeric primary key
    Int(i64),
    /// Text primary key (uuid or slug)
    Text(String),
}

/// A service offered by the business
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Service {
    /// Backend row id
    pub id: RecordId,
    /// Display name
    pub title: String,
    /// One-line summary
    pub short_description: String,
    /// Starting price
    pub price: f64,
    /// Currency code the price is in
    pub currency: String,
    /// Card image
    pub image_url: String,
    /// Sort position (ascending)
    pub display_order: i32,
    /// Whether the service is listed
    pub is_active: bool,
}

/// A photo in the event gallery
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GalleryImage {
    /// Backend row id
    pub id: RecordId,
    /// Photo URL
    pub image_url: String,
    /// Caption shown under the photo
    pub caption: String,
    /// Event category (wedding, corporate, ...)
    pub event_type: String,
    /// Sort position (ascending)
    pub display_order: i32,
    /// Whether the photo is listed
    pub is_active: bool,
    /// Whether the photo appears on the home page
    pub is_featured: bool,
}

/// A client quote
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Testimonial {
    /// Backend row id
    pub id: RecordId,
    /// Who said it
    pub client_name: String,
    /// What they said
    pub quote: String,
    /// Star rating, 1 to 5
    pub rating: u8,
    /// Sort position (ascending)
    pub display_order: i32,
    /// Whether the quote is listed
    pub is_active: bool,
    /// Whether the quote appears on the home page
    pub is_featured: bool,
}

/// A member of staff
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamMember {
    /// Backend row id
    pub id: RecordId,
    /// Full name
    pub name: String,
    /// Job title
    pub role: String,
    /// Portrait URL
    pub photo_url: String,
    /// Sort position (ascending)
    pub display_order: i32,
    /// Whether the member is listed
    pub is_active: bool,
}

/// Platform name (e.g. "instagram") to profile URL
pub type SocialLinks = BTreeMap<String, String>;

/// One social link as stored in the `social_links` collection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SocialLinkRow {
    /// Platform name
    pub platform: String,
    /// Profile URL
    pub url: String,
}

/// A `site_content` row written by the image setters
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SiteContentEntry {
    /// Setting name
    pub key: String,
    /// Setting value
    pub value: String,
    /// Always true for settings written by the site
    pub is_active: bool,
    /// Position among settings
    pub display_order: i32,
}

/// Everything the site renders, in one snapshot
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SiteContent {
    /// Home page hero image
    pub hero_image_url: String,
    /// About page image
    pub about_us_image_url: String,
    /// Offered services
    pub services: Vec<Service>,
    /// Event gallery
    pub gallery_images: Vec<GalleryImage>,
    /// Client quotes
    pub testimonials: Vec<Testimonial>,
    /// Staff
    pub team_members: Vec<TeamMember>,
    /// Platform to profile URL
    pub social_links: SocialLinks,
}

/// Numeric columns may come back as floats (`numeric` type); round to a position
fn display_order(value: Option<f64>) -> i32 {
    value
        .filter(|v| v.is_finite())
        .map(|v| v.round() as i32)
        .unwrap_or(0)
}

/// Star rating rounded into 1..=5; missing or non-positive means 5
fn rating(value: Option<f64>) -> u8 {
    match value {
        Some(v) if v.is_finite() && v > 0.0 => v.round().clamp(1.0, 5.0) as u8,
        _ => 5,
    }
}

#[derive(Debug, Deserialize)]
struct ServiceRow {
    id: RecordId,
    title: String,
    short_description: Option<String>,
    price: Option<f64>,
    image_url: Option<String>,
    display_order: Option<f64>,
}

impl From<ServiceRow> for Service {
    fn from(row: ServiceRow) -> Self {
        Self {
            id: row.id,
            title: row.title,
            short_description: row
                .short_description
                .filter(|d| !d.is_empty())
                .unwrap_or_else(|| "No description available".to_string()),
            price: row.price.unwrap_or(0.0),
            currency: CURRENCY.to_string(),
            image_url: row.image_url.unwrap_or_default(),
            display_order: display_order(row.display_order),
            is_active: true,
        }
    }
}

#[derive(Debug, Deserialize)]
struct GalleryRow {
    id: RecordId,
    image_url: String,
    caption: Option<String>,
    event_type: Option<String>,
    display_order: Option<f64>,
}

impl From<GalleryRow> for GalleryImage {
    fn from(row: GalleryRow) -> Self {
        Self {
            id: row.id,
            image_url: row.image_url,
            caption: row.caption.unwrap_or_default(),
            event_type: row
                .event_type
                .filter(|e| !e.is_empty())
                .unwrap_or_else(|| "other".to_string()),
            display_order: display_order(row.display_order),
            is_active: true,
            is_featured: true,
        }
    }
}

#[derive(Debug, Deserialize)]
struct TestimonialRow {
    id: RecordId,
    client_name: String,
    quote: String,
    rating: Option<f64>,
    display_order: Option<f64>,
}

impl From<TestimonialRow> for Testimonial {
    fn from(row: TestimonialRow) -> Self {
        Self {
            id: row.id,
            client_name: row.client_name,
            quote: row.quote,
            rating: rating(row.rating),
            display_order: display_order(row.display_order),
            is_active: true,
            is_featured: true,
        }
    }
}

#[derive(Debug, Deserialize)]
struct TeamRow {
    id: RecordId,
    name: String,
    role: Option<String>,
    photo_url: Option<String>,
    display_order: Option<f64>,
}

impl From<TeamRow> for TeamMember {
    fn from(row: TeamRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            role: row.role.unwrap_or_default(),
            photo_url: row.photo_url.unwrap_or_default(),
            display_order: display_order(row.display_order),
            is_active: true,
        }
    }
}

/// Decode rows of type `R` into records, skipping rows that don't decode
fn decode<R, T>(rows: Vec<Row>) -> Vec<T>
where
    R: for<'de> Deserialize<'de>,
    T: From<R>,
{
    rows.into_iter()
        .filter_map(|row| match serde_json::from_value::<R>(row.into()) {
            Ok(r) => Some(T::from(r)),
            Err(e) => {
                tracing::warn!(error = %e, "Skipping malformed row");
                None
            }
        })
        .collect()
}

/// Decode `services` rows
pub fn services_from_rows(rows: Vec<Row>) -> Vec<Service> {
    decode::<ServiceRow, _>(rows)
}

/// Decode `gallery_items` rows
pub fn gallery_from_rows(rows: Vec<Row>) -> Vec<GalleryImage> {
    decode::<GalleryRow, _>(rows)
}

/// Decode `testimonials` rows
pub fn testimonials_from_rows(rows: Vec<Row>) -> Vec<Testimonial> {
    decode::<TestimonialRow, _>(rows)
}

/// Decode `team_members` rows
pub fn team_from_rows(rows: Vec<Row>) -> Vec<TeamMember> {
    decode::<TeamRow, _>(rows)
}

/// Fold `social_links` rows into a platform map
pub fn social_links_from_rows(rows: Vec<Row>) -> SocialLinks {
    rows.into_iter()
        .filter_map(|row| serde_json::from_value::<SocialLinkRow>(row.into()).ok())
        .map(|link| (link.platform, link.url))
        .collect()
}

/// Rows to insert for a platform map
pub fn social_link_rows(links: &SocialLinks) -> Vec<SocialLinkRow> {
    links
        .iter()
        .map(|(platform, url)| SocialLinkRow {
            platform: platform.clone(),
            url: url.clone(),
        })
        .collect()
}

/// Find the image URL stored under `key`
///
/// `image_url` wins over `value`; empty strings count as missing.
pub fn site_setting(rows: &[Row], key: &str) -> Option<String> {
    let row = rows
        .iter()
        .find(|row| row.get("key").and_then(|k| k.as_str()) == Some(key))?;

    ["image_url", "value"].iter().find_map(|column| {
        row.get(*column)
            .and_then(|v| v.as_str())
            .filter(|s| !s.is_empty())
            .map(str::to_string)
    })
}
