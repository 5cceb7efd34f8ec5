use serde::{Deserialize, Serialize};

use super::element::Checks;
use super::{ActionType, Element, ElementKind, Handling, Link};
use crate::error::ValidationError;

/// Something a user can do from the feed.
///
/// Global actions are stored in the actions collection. Local actions belong
/// to a single nudge or item and are only ever stored embedded in it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Action {
    pub id: String,
    pub sequence_number: i64,
    /// Rich text; may include emoji.
    pub name: String,
    pub icon: Link,
    pub action_type: ActionType,
    pub handling: Handling,
    #[serde(default)]
    pub allow_anonymous: bool,
}

impl Element for Action {
    const KIND: ElementKind = ElementKind::Action;

    fn id(&self) -> &str {
        &self.id
    }

    fn sequence_number(&self) -> i64 {
        self.sequence_number
    }

    fn validate(&self) -> Result<(), ValidationError> {
        Checks::default()
            .require("id", &self.id)
            .sequence(self.sequence_number)
            .require("name", &self.name)
            .nested("icon", self.icon.validate())
            .finish()
    }
}
