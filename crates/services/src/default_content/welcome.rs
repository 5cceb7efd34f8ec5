//! The persistent welcome item and its introductory thread.

use chrono::{DateTime, Utc};
use domains::{
    ActionType, FeedRepository, FeedResultExt, Flavour, Handling, Item, Link, Message, Result, Status,
    TextType, Visibility, DEFAULT_LABEL, DEFAULT_SEQUENCE_NUMBER,
};
use tracing::debug;

use super::catalog::{default_icon_path, future_expiry, local_action, new_id, DEFAULT_AUTHOR, DEFAULT_POSTED_BY_UID, STATIC_BASE};

const TAGLINE: &str = "Welcome to Be.Well";
const SUMMARY: &str = "What is Be.Well?";

/// One message of a welcome thread. `reply_to` indexes an earlier line.
struct Line {
    posted_by: &'static str,
    reply_to: Option<usize>,
    text: &'static str,
}

const WELCOME: usize = 0;

const fn line(posted_by: &'static str, reply_to: Option<usize>, text: &'static str) -> Line {
    Line {
        posted_by,
        reply_to,
        text,
    }
}

const CONSUMER_THREAD: [Line; 10] = [
    line("Be.Well", None, "Welcome to Be.Well. We are glad to meet you!"),
    line(
        "Medications Service",
        Some(WELCOME),
        "I'm the medications service. I'll ensure that you get quality and affordable medications, on time. 👋!",
    ),
    line(
        "Delivery Assistant",
        Some(1),
        "I'm the delivery assistant. I help the medications service get medicines to you on time. 👋!",
    ),
    line(
        "Dispensing Assistant",
        Some(1),
        "I'm the dispensing assistant. I help your preferred pharmacy prepare your order before you go for it. 👋!",
    ),
    line(
        "Tests Service",
        Some(WELCOME),
        "I'm the tests service. I'll ensure that you get quality and affordable diagnostic tests. 👋!",
    ),
    line(
        "Consultations Service",
        Some(WELCOME),
        "I'm the consultations service. I'll ensure that you can get in-person or remote(tele) advice from qualified medical professionals. 👋!",
    ),
    line(
        "Teleconsultations Assistant",
        Some(5),
        "I'm the teleconsultations assistant. I'll ensure that you can reach a qualified medical professional via video or audio conference, whenever you need to. If you have an emergency, I'll help you find the nearest hospital for emergencies. 👋!",
    ),
    line(
        "Booking Assistant",
        Some(5),
        "I'm the booking assistant. I'll help you book appointments for your care and remind you when it's time. 👋!",
    ),
    line(
        "Insurance Service",
        Some(WELCOME),
        "I'm the insurance service. I'll get you great quotes for medical cover and assist you when you need to use your insurance. 👋!",
    ),
    line(
        "Reminders Service",
        Some(WELCOME),
        "I'm the reminders service. I'll help you remember things related to your health. It could be an appointment or when you need to take some medication etc. Try me 👋!",
    ),
];

const PRO_THREAD: [Line; 9] = [
    line("Be.Well", None, "Welcome to Be.Well. We are glad to meet you!"),
    line(
        "Medications Service",
        Some(WELCOME),
        "I'm the medications service. I'll help you deliver quality and affordable medications, on time. 👋!",
    ),
    line(
        "Delivery Assistant",
        Some(1),
        "I'm the delivery assistant. I help the medications service deliver medicines on time. 👋!",
    ),
    line(
        "Dispensing Assistant",
        Some(1),
        "I'm the dispensing assistant. I help you prepare your orders. 👋!",
    ),
    line(
        "Tests Service",
        Some(WELCOME),
        "I'm the tests service. I'll help you deliver quality and affordable diagnostic tests. 👋!",
    ),
    line(
        "Consultations Service",
        Some(WELCOME),
        "I'm the consultations service. I'll set up in-person and remote consultations for you. 👋!",
    ),
    line(
        "Teleconsultations Assistant",
        Some(5),
        "I'm the teleconsultations assistant. I'll ensure that you can conduct consultations via video or audio conference, whenever you need to. If you have an emergency, I'll help you find the nearest hospital for emergencies. 👋!",
    ),
    line(
        "Booking Assistant",
        Some(5),
        "I'm the booking assistant. I'll help you book appointments and remind you when it's time. 👋!",
    ),
    line(
        "Reminders Service",
        Some(WELCOME),
        "I'm the reminders service. I'll help you remember things that you need to do. 👋!",
    ),
];

fn thread(flavour: Flavour) -> &'static [Line] {
    match flavour {
        Flavour::Consumer => &CONSUMER_THREAD,
        Flavour::Pro => &PRO_THREAD,
    }
}

fn welcome_text(flavour: Flavour) -> &'static str {
    match flavour {
        Flavour::Consumer => {
            "Be.Well is a virtual and physical healthcare community. Our goal is to make it easy for you to access affordable high-quality healthcare - whether online or in person."
        }
        Flavour::Pro => {
            "Be.Well is a virtual and physical healthcare community. Our goal is to make it easy for you to provide affordable high-quality healthcare - whether online or in person."
        }
    }
}

fn welcome_links(flavour: Flavour) -> Vec<Link> {
    match flavour {
        Flavour::Consumer => {
            let thumbnail = format!("{STATIC_BASE}/items/videos/thumbs/01_lead.png");
            vec![
                Link::youtube_video(
                    "https://youtu.be/-mlr9rjRXmc",
                    "Slade 360",
                    " View your health insurance cover benefits on your Be.Well app.",
                    &thumbnail,
                ),
                Link::youtube_video(
                    "https://youtu.be/-iSB8yrSIps",
                    "Slade 360",
                    "How to add your health insurance cover to your Be.Well app.",
                    &thumbnail,
                ),
            ]
        }
        Flavour::Pro => Vec::new(),
    }
}

/// Posts the welcome thread under `item_id`, oldest first, and returns the
/// stored messages in posting order.
pub async fn post_thread(
    uid: &str,
    flavour: Flavour,
    item_id: &str,
    repository: &dyn FeedRepository,
    now: DateTime<Utc>,
) -> Result<Vec<Message>> {
    let lines = thread(flavour);
    let mut posted: Vec<Message> = Vec::with_capacity(lines.len());
    for line in lines {
        let reply_to = line.reply_to.map(|parent| posted[parent].id.clone());
        let message = Message {
            id: new_id(),
            sequence_number: DEFAULT_SEQUENCE_NUMBER,
            text: line.text.to_string(),
            reply_to,
            posted_by_uid: DEFAULT_POSTED_BY_UID.to_string(),
            posted_by_name: line.posted_by.to_string(),
            timestamp: now,
        };
        let saved = repository
            .post_message(uid, flavour, item_id, &message)
            .await
            .context(format!("unable to post {} welcome message", line.posted_by))?;
        posted.push(saved);
    }
    debug!(item_id, messages = posted.len(), "posted welcome thread");
    Ok(posted)
}

pub fn welcome_item(uid: &str, flavour: Flavour, item_id: String, conversations: Vec<Message>, now: DateTime<Utc>) -> Item {
    let icon = default_icon_path();
    Item {
        id: item_id,
        sequence_number: DEFAULT_SEQUENCE_NUMBER,
        expiry: future_expiry(now),
        persistent: true,
        status: Status::Pending,
        visibility: Visibility::Show,
        icon: Link::png_image(&icon, "Feed Item Icon", "Feed Item Icon", &icon),
        author: DEFAULT_AUTHOR.to_string(),
        tagline: TAGLINE.to_string(),
        label: DEFAULT_LABEL.to_string(),
        timestamp: now,
        summary: SUMMARY.to_string(),
        text: welcome_text(flavour).to_string(),
        text_type: TextType::Markdown,
        links: welcome_links(flavour),
        actions: vec![
            local_action("RESOLVE_ITEM", ActionType::Primary, Handling::Inline, false),
            local_action("PIN_ITEM", ActionType::Primary, Handling::Inline, true),
            local_action("HIDE_ITEM", ActionType::Primary, Handling::Inline, true),
        ],
        conversations,
        users: vec![uid.to_string()],
        groups: Vec::new(),
        notification_channels: Vec::new(),
    }
}
