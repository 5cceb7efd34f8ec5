//! # Feed Enumerations
//!
//! Closed vocabularies shared by every element kind. All of them serialize to
//! the SCREAMING_SNAKE_CASE strings stored in feed documents.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The two product variants. Each gets its own default content and its own
/// disjoint set of collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Flavour {
    Consumer,
    Pro,
}

impl Flavour {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Consumer => "CONSUMER",
            Self::Pro => "PRO",
        }
    }
}

impl fmt::Display for Flavour {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Whether the task behind a nudge or feed item is still outstanding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Status {
    Pending,
    InProgress,
    Done,
}

impl Status {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::InProgress => "IN_PROGRESS",
            Self::Done => "DONE",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Visibility {
    Show,
    Hide,
}

impl Visibility {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Show => "SHOW",
            Self::Hide => "HIDE",
        }
    }
}

impl fmt::Display for Visibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Visual weight of an action.
///
/// Primary actions get dominant treatment, secondary less so, overflow
/// actions are hidden behind a menu and floating actions are rendered as FABs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActionType {
    Primary,
    Secondary,
    Overflow,
    Floating,
}

/// A hint for the client: handle the action in place or open a full page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Handling {
    Inline,
    FullPage,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TextType {
    Markdown,
    Html,
    Plain,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LinkType {
    PngImage,
    SvgImage,
    YoutubeVideo,
    PdfDocument,
    Default,
}

/// How a user should be notified about a new element, if at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Channel {
    Fcm,
    Email,
    Sms,
    Whatsapp,
}

/// The storable element kinds. Also names the sub-collection each kind
/// lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementKind {
    Action,
    Nudge,
    Item,
    Message,
}

impl ElementKind {
    /// Name of the sub-collection holding elements of this kind.
    pub fn collection_name(&self) -> &'static str {
        match self {
            Self::Action => "actions",
            Self::Nudge => "nudges",
            Self::Item => "items",
            Self::Message => "messages",
        }
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Action => "action",
            Self::Nudge => "nudge",
            Self::Item => "item",
            Self::Message => "message",
        };
        write!(f, "{name}")
    }
}
