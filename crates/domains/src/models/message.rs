use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::element::Checks;
use super::{Element, ElementKind};
use crate::error::ValidationError;

/// One entry in an item's conversation thread.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub id: String,
    pub sequence_number: i64,
    pub text: String,
    /// ID of the message this one answers, if it is a reply.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reply_to: Option<String>,
    #[serde(rename = "postedByUID")]
    pub posted_by_uid: String,
    pub posted_by_name: String,
    pub timestamp: DateTime<Utc>,
}

impl Element for Message {
    const KIND: ElementKind = ElementKind::Message;

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
            .require("text", &self.text)
            .require("postedByUID", &self.posted_by_uid);
        if self.reply_to.as_deref() == Some(self.id.as_str()) {
            checks.push("replyTo", "a message cannot reply to itself");
        }
        checks.finish()
    }
}
