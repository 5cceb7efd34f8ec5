use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::element::Checks;
use super::{Action, Channel, Element, ElementKind, Link, LinkType, Message, Status, TextType, Visibility};
use crate::error::ValidationError;

/// A single entry in a feed or inbox.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub id: String,
    pub sequence_number: i64,
    pub expiry: DateTime<Utc>,
    /// Persistent items also land in the inbox and survive expiry-based
    /// pruning in client UIs. Pinning an item makes it persistent.
    pub persistent: bool,
    pub status: Status,
    pub visibility: Visibility,
    /// Avatar for the item. Must be a PNG image.
    pub icon: Link,
    /// The person or robot that produced the item.
    pub author: String,
    #[serde(default)]
    pub tagline: String,
    /// Queue the item belongs to, e.g. `WELCOME`.
    #[serde(default)]
    pub label: String,
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub summary: String,
    pub text: String,
    pub text_type: TextType,
    #[serde(default)]
    pub links: Vec<Link>,
    #[serde(default)]
    pub actions: Vec<Action>,
    /// Filled from the nested messages collection on read.
    #[serde(default)]
    pub conversations: Vec<Message>,
    #[serde(default)]
    pub users: Vec<String>,
    #[serde(default)]
    pub groups: Vec<String>,
    #[serde(default)]
    pub notification_channels: Vec<Channel>,
}

impl Element for Item {
    const KIND: ElementKind = ElementKind::Item;

    fn id(&self) -> &str {
        &self.id
    }

    fn sequence_number(&self) -> i64 {
        self.sequence_number
    }

    fn validate(&self) -> Result<(), ValidationError> {
        let mut checks = Checks::default();
        checks
            .require("id", &self.id)
            .sequence(self.sequence_number)
            .require("author", &self.author)
            .nested("icon", self.icon.validate());
        if self.icon.link_type != LinkType::PngImage {
            checks.push("icon", "an icon must be a PNG image");
        }
        for (i, link) in self.links.iter().enumerate() {
            checks.nested(&format!("links[{i}]"), link.validate());
        }
        for (i, action) in self.actions.iter().enumerate() {
            checks.nested(&format!("actions[{i}]"), action.validate());
        }
        for (i, message) in self.conversations.iter().enumerate() {
            checks.nested(&format!("conversations[{i}]"), message.validate());
        }
        checks.finish()
    }
}
