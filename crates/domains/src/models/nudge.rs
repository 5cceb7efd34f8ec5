use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::element::Checks;
use super::{Action, Channel, Element, ElementKind, Link, Status, Visibility};
use crate::error::ValidationError;

/// A prompt for the user to do something, e.g. verify an email address.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Nudge {
    pub id: String,
    pub sequence_number: i64,
    pub status: Status,
    pub visibility: Visibility,
    /// When the nudge stops showing up under the default filters.
    pub expiry: DateTime<Utc>,
    pub title: String,
    pub text: String,
    #[serde(default)]
    pub links: Vec<Link>,
    #[serde(default)]
    pub actions: Vec<Action>,
    #[serde(default)]
    pub users: Vec<String>,
    #[serde(default)]
    pub groups: Vec<String>,
    #[serde(default)]
    pub notification_channels: Vec<Channel>,
}

impl Element for Nudge {
    const KIND: ElementKind = ElementKind::Nudge;

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
            .require("title", &self.title)
            .require("text", &self.text);
        for (i, link) in self.links.iter().enumerate() {
            checks.nested(&format!("links[{i}]"), link.validate());
        }
        for (i, action) in self.actions.iter().enumerate() {
            checks.nested(&format!("actions[{i}]"), action.validate());
        }
        checks.finish()
    }
}
