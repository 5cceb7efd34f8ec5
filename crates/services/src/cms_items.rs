//! Maps published CMS posts onto feed items.

use chrono::{DateTime, Utc};
use domains::{CmsPost, Item, Link, Status, TextType, Visibility, DEFAULT_LABEL};

use crate::default_content::catalog::{default_icon_path, future_expiry, DEFAULT_AUTHOR};

/// Item summaries are cut to this many characters.
pub const SUMMARY_LENGTH: usize = 140;

/// Lengths from this one up reserve four characters for a trailing `...`.
const ELLIPSES_THRESHOLD: usize = 140;

/// Cuts `text` to at most `length` characters. At or above the threshold the
/// cut leaves room for the ellipses, which are only added when something was
/// actually cut.
pub fn truncate_with_ellipses(text: &str, length: usize) -> String {
    if length == 0 {
        return String::new();
    }
    let target = if length >= ELLIPSES_THRESHOLD { length - 4 } else { length };
    let mut chars = text.chars();
    let truncated: String = chars.by_ref().take(target).collect();
    if length >= ELLIPSES_THRESHOLD && chars.next().is_some() {
        format!("{truncated}...")
    } else {
        truncated
    }
}

pub fn item_from_cms_post(post: &CmsPost, now: DateTime<Utc>) -> Item {
    let icon = default_icon_path();
    Item {
        id: post.uuid.clone(),
        sequence_number: post.published_at.timestamp(),
        expiry: future_expiry(now),
        persistent: false,
        status: Status::Pending,
        visibility: Visibility::Show,
        icon: Link::png_image(&icon, "Icon", "Feed Item Icon", &icon),
        author: DEFAULT_AUTHOR.to_string(),
        tagline: post.slug.clone(),
        label: DEFAULT_LABEL.to_string(),
        timestamp: post.updated_at,
        summary: truncate_with_ellipses(&post.excerpt, SUMMARY_LENGTH),
        text: post.html.clone(),
        text_type: TextType::Html,
        links: vec![feature_link(post.feature_image.as_deref())],
        actions: Vec::new(),
        conversations: Vec::new(),
        users: Vec::new(),
        groups: Vec::new(),
        notification_channels: Vec::new(),
    }
}

/// PNG feature images are linked as such; anything else falls back to the
/// default icon.
fn feature_link(feature_image: Option<&str>) -> Link {
    const TITLE: &str = "CMS Item default Icon";
    match feature_image {
        Some(url) if url.to_ascii_lowercase().ends_with(".png") => Link::png_image(url, TITLE, TITLE, url),
        _ => {
            let icon = default_icon_path();
            Link::default_link(&icon, TITLE, TITLE, &icon)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use domains::{Element, LinkType};

    const EPIC: &str = "This is an epic tale that is intended to exceed 140 characters. At that point, it will be truncated to the indicated target length, including getting some ellipses added at the end.";

    #[test]
    fn truncation() {
        assert_eq!(truncate_with_ellipses("drink", 3), "dri");
        assert_eq!(truncate_with_ellipses("something", 0), "");
        assert_eq!(
            truncate_with_ellipses(EPIC, 140),
            "This is an epic tale that is intended to exceed 140 characters. At that point, it will be truncated to the indicated target length, incl..."
        );
        assert_eq!(truncate_with_ellipses("short excerpt", 140), "short excerpt");
    }

    #[test]
    fn truncation_counts_characters() {
        let waves = "👋".repeat(200);
        let cut = truncate_with_ellipses(&waves, 140);
        assert_eq!(cut.chars().count(), 139);
        assert!(cut.ends_with("👋..."));
    }

    fn post(feature_image: Option<&str>) -> CmsPost {
        CmsPost {
            uuid: "5f1e-cms".into(),
            slug: "what-is-bewell".into(),
            excerpt: EPIC.into(),
            html: "<h1>Be.Well</h1>".into(),
            feature_image: feature_image.map(str::to_string),
            updated_at: Utc.with_ymd_and_hms(2021, 2, 1, 8, 0, 0).unwrap(),
            published_at: Utc.with_ymd_and_hms(2021, 1, 31, 8, 0, 0).unwrap(),
        }
    }

    #[test]
    fn posts_map_onto_items() {
        let now = Utc::now();
        let p = post(Some("https://cms.example.com/content/images/hello.png"));
        let item = item_from_cms_post(&p, now);
        assert_eq!(item.id, "5f1e-cms");
        assert_eq!(item.sequence_number, p.published_at.timestamp());
        assert_eq!(item.tagline, "what-is-bewell");
        assert_eq!(item.timestamp, p.updated_at);
        assert_eq!(item.text_type, TextType::Html);
        assert!(!item.persistent);
        assert!(item.summary.ends_with("..."));
        assert_eq!(item.links[0].link_type, LinkType::PngImage);
        assert_eq!(item.links[0].url, "https://cms.example.com/content/images/hello.png");
        assert!(item.validate().is_ok());
    }

    #[test]
    fn other_feature_images_fall_back_to_the_default_icon() {
        for image in [None, Some("https://cms.example.com/content/images/hello.jpg")] {
            let item = item_from_cms_post(&post(image), Utc::now());
            assert_eq!(item.links[0].link_type, LinkType::Default);
            assert_eq!(item.links[0].url, "https://assets.healthcloud.co.ke/bewell_logo.png");
        }
    }
}
