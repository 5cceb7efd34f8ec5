use serde::{Deserialize, Serialize};
use url::Url;
use uuid::Uuid;

use super::element::Checks;
use super::LinkType;
use crate::error::ValidationError;

/// A reference to media attached to a feed element. Private media should
/// carry authentication details in the URL itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Link {
    pub id: String,
    pub url: String,
    pub link_type: LinkType,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub thumbnail: String,
}

impl Link {
    fn new(link_type: LinkType, url: &str, title: &str, description: &str, thumbnail: &str) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            url: url.to_string(),
            link_type,
            title: title.to_string(),
            description: description.to_string(),
            thumbnail: thumbnail.to_string(),
        }
    }

    pub fn png_image(url: &str, title: &str, description: &str, thumbnail: &str) -> Self {
        Self::new(LinkType::PngImage, url, title, description, thumbnail)
    }

    pub fn svg_image(url: &str, title: &str, description: &str, thumbnail: &str) -> Self {
        Self::new(LinkType::SvgImage, url, title, description, thumbnail)
    }

    pub fn youtube_video(url: &str, title: &str, description: &str, thumbnail: &str) -> Self {
        Self::new(LinkType::YoutubeVideo, url, title, description, thumbnail)
    }

    pub fn pdf_document(url: &str, title: &str, description: &str, thumbnail: &str) -> Self {
        Self::new(LinkType::PdfDocument, url, title, description, thumbnail)
    }

    pub fn default_link(url: &str, title: &str, description: &str, thumbnail: &str) -> Self {
        Self::new(LinkType::Default, url, title, description, thumbnail)
    }

    /// The URL must parse and agree with the declared link type.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut checks = Checks::default();
        checks.require("id", &self.id);

        let parsed = match Url::parse(&self.url) {
            Ok(url) => url,
            Err(err) => {
                checks.push("url", format!("{} is not a valid URL: {err}", self.url));
                return checks.finish();
            }
        };

        let path = parsed.path().to_ascii_lowercase();
        match self.link_type {
            LinkType::PngImage if !path.ends_with(".png") => {
                checks.push("url", format!("{} does not end with .png", self.url));
            }
            LinkType::SvgImage if !path.ends_with(".svg") => {
                checks.push("url", format!("{} does not end with .svg", self.url));
            }
            LinkType::PdfDocument if !path.ends_with(".pdf") => {
                checks.push("url", format!("{} does not end with .pdf", self.url));
            }
            LinkType::YoutubeVideo => {
                let host = parsed.host_str().unwrap_or_default();
                let youtube = host == "youtu.be" || host == "youtube.com" || host.ends_with(".youtube.com");
                if !youtube {
                    checks.push("url", format!("{} is not a YouTube URL", self.url));
                }
            }
            _ => {}
        }
        checks.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn link_type_must_match_the_url() {
        assert!(Link::png_image("https://assets.example.com/logo.png", "", "", "").validate().is_ok());
        assert!(Link::svg_image("https://assets.example.com/logo.png", "", "", "").validate().is_err());
        assert!(Link::youtube_video("https://youtu.be/-mlr9rjRXmc", "", "", "").validate().is_ok());
        assert!(Link::youtube_video("https://vimeo.com/123", "", "", "").validate().is_err());
        assert!(Link::pdf_document("https://docs.example.com/terms.pdf", "", "", "").validate().is_ok());
    }

    #[test]
    fn unparseable_urls_are_rejected() {
        let err = Link::default_link("not a url", "", "", "").validate().unwrap_err();
        assert_eq!(err.issues.len(), 1);
        assert_eq!(err.issues[0].field, "url");
    }
}
