//! Built-in sample content
//!
//! Used at startup and whenever the backend is unconfigured, unreachable, or
//! holds no rows for a collection.

use super::models::{
    GalleryImage, RecordId, Service, SiteContent, SocialLinks, TeamMember, Testimonial, CURRENCY,
};

/// Hero image shown before any remote setting is loaded
pub const DEFAULT_HERO_IMAGE_URL: &str =
    "https://images.unsplash.com/photo-1519167758481-83f550bb49b3?w=1600";

/// About-us image shown before any remote setting is loaded
pub const DEFAULT_ABOUT_US_IMAGE_URL: &str =
    "https://images.unsplash.com/photo-1511795409834-ef04bbd61622?w=1200";

fn service(id: i64, title: &str, description: &str, price: f64, image: &str) -> Service {
    Service {
        id: RecordId::Int(id),
        title: title.to_string(),
        short_description: description.to_string(),
        price,
        currency: CURRENCY.to_string(),
        image_url: image.to_string(),
        display_order: id as i32,
        is_active: true,
    }
}

/// Sample services
pub fn services() -> Vec<Service> {
    vec![
        service(
            1,
            "Wedding Planning",
            "Full coordination from venue scouting to the last dance.",
            150_000.0,
            "https://images.unsplash.com/photo-1519741497674-611481863552?w=800",
        ),
        service(
            2,
            "Corporate Events",
            "Launches, retreats and year-end parties run on schedule.",
            90_000.0,
            "https://images.unsplash.com/photo-1540575467063-178a50c2df87?w=800",
        ),
        service(
            3,
            "Decor & Styling",
            "Floral, lighting and table styling tailored to your theme.",
            45_000.0,
            "https://images.unsplash.com/photo-1464366400600-7168b8af9bc3?w=800",
        ),
        service(
            4,
            "Catering",
            "Local and international menus for 20 to 2,000 guests.",
            1_500.0,
            "https://images.unsplash.com/photo-1555244162-803834f70033?w=800",
        ),
    ]
}

fn gallery_image(id: i64, image: &str, caption: &str, event_type: &str) -> GalleryImage {
    GalleryImage {
        id: RecordId::Int(id),
        image_url: image.to_string(),
        caption: caption.to_string(),
        event_type: event_type.to_string(),
        display_order: id as i32,
        is_active: true,
        is_featured: true,
    }
}

/// Sample gallery
pub fn gallery_images() -> Vec<GalleryImage> {
    vec![
        gallery_image(
            1,
            "https://images.unsplash.com/photo-1465495976277-4387d4b0b4c6?w=800",
            "Garden wedding reception",
            "wedding",
        ),
        gallery_image(
            2,
            "https://images.unsplash.com/photo-1505373877841-8d25f7d46678?w=800",
            "Annual leadership summit",
            "corporate",
        ),
        gallery_image(
            3,
            "https://images.unsplash.com/photo-1530103862676-de8c9debad1d?w=800",
            "Fifth birthday celebration",
            "birthday",
        ),
        gallery_image(
            4,
            "https://images.unsplash.com/photo-1478146896981-b80fe463b330?w=800",
            "Lakeside dinner setup",
            "other",
        ),
    ]
}

fn testimonial(id: i64, client: &str, quote: &str, rating: u8) -> Testimonial {
    Testimonial {
        id: RecordId::Int(id),
        client_name: client.to_string(),
        quote: quote.to_string(),
        rating,
        display_order: id as i32,
        is_active: true,
        is_featured: true,
    }
}

/// Sample testimonials
pub fn testimonials() -> Vec<Testimonial> {
    vec![
        testimonial(
            1,
            "Amina W.",
            "Every detail of our wedding was handled. We just showed up and enjoyed it.",
            5,
        ),
        testimonial(
            2,
            "David K.",
            "Our product launch ran to the minute and the guests are still talking about it.",
            5,
        ),
        testimonial(
            3,
            "Grace N.",
            "Beautiful decor and a team that listens.",
            4,
        ),
    ]
}

fn team_member(id: i64, name: &str, role: &str, photo: &str) -> TeamMember {
    TeamMember {
        id: RecordId::Int(id),
        name: name.to_string(),
        role: role.to_string(),
        photo_url: photo.to_string(),
        display_order: id as i32,
        is_active: true,
    }
}

/// Sample team
pub fn team_members() -> Vec<TeamMember> {
    vec![
        team_member(
            1,
            "Wanjiru Kamau",
            "Founder & Lead Planner",
            "https://images.unsplash.com/photo-1494790108377-be9c29b29330?w=400",
        ),
        team_member(
            2,
            "Otieno Ouma",
            "Head of Operations",
            "https://images.unsplash.com/photo-1500648767791-00dcc994a43e?w=400",
        ),
        team_member(
            3,
            "Fatuma Said",
            "Creative Director",
            "https://images.unsplash.com/photo-1438761681033-6461ffad8d80?w=400",
        ),
    ]
}

/// Sample social links
pub fn social_links() -> SocialLinks {
    [
        ("facebook", "https://facebook.com"),
        ("instagram", "https://instagram.com"),
        ("twitter", "https://twitter.com"),
        ("whatsapp", "https://wa.me"),
    ]
    .into_iter()
    .map(|(platform, url)| (platform.to_string(), url.to_string()))
    .collect()
}

impl Default for SiteContent {
    fn default() -> Self {
        Self {
            hero_image_url: DEFAULT_HERO_IMAGE_URL.to_string(),
            about_us_image_url: DEFAULT_ABOUT_US_IMAGE_URL.to_string(),
            services: services(),
            gallery_images: gallery_images(),
            testimonials: testimonials(),
            team_members: team_members(),
            social_links: social_links(),
        }
    }
}
