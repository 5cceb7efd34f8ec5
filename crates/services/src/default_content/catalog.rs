//! The fixed default content of each feed flavour.
//!
//! Each enum lists the defaults of one element kind; `for_flavour` gives the
//! order in which they are written.

use chrono::{DateTime, Duration, Utc};
use domains::{
    Action, ActionType, Flavour, Handling, Link, Nudge, Status, Visibility, DEFAULT_SEQUENCE_NUMBER,
};
use uuid::Uuid;

pub const STATIC_BASE: &str = "https://assets.healthcloud.co.ke";
pub const DEFAULT_POSTED_BY_UID: &str = "hOcaUv8dqqgmWYf9HEhjdudgf0b2";
pub const DEFAULT_AUTHOR: &str = "Be.Well Team";

/// Roughly a century.
const FUTURE_HOURS: i64 = 878_400;

pub fn default_icon_path() -> String {
    format!("{STATIC_BASE}/bewell_logo.png")
}

pub fn future_expiry(now: DateTime<Utc>) -> DateTime<Utc> {
    now + Duration::hours(FUTURE_HOURS)
}

pub fn new_id() -> String {
    Uuid::new_v4().to_string()
}

/// Builds an action that only ever lives embedded in a nudge or item.
pub fn local_action(name: &str, action_type: ActionType, handling: Handling, allow_anonymous: bool) -> Action {
    let blank = format!("{STATIC_BASE}/1px.png");
    Action {
        id: new_id(),
        sequence_number: DEFAULT_SEQUENCE_NUMBER,
        name: name.to_string(),
        icon: Link::png_image(&blank, "Blank Image", "Default Blank Image", &blank),
        action_type,
        handling,
        allow_anonymous,
    }
}

/// Global actions shown at the top of a new feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DefaultAction {
    GetInsurance,
    GetTest,
    GetMedicine,
    GetConsultation,
    AddPatient,
    SearchPatient,
}

impl DefaultAction {
    pub fn for_flavour(flavour: Flavour) -> &'static [DefaultAction] {
        match flavour {
            Flavour::Consumer => &[
                Self::GetInsurance,
                Self::GetTest,
                Self::GetMedicine,
                Self::GetConsultation,
            ],
            Flavour::Pro => &[Self::AddPatient, Self::SearchPatient],
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::GetInsurance => "GET_INSURANCE",
            Self::GetTest => "GET_TEST",
            Self::GetMedicine => "GET_MEDICINE",
            Self::GetConsultation => "GET_CONSULTATION",
            Self::AddPatient => "ADD_PATIENT",
            Self::SearchPatient => "SEARCH_PATIENT",
        }
    }

    /// Icon file, icon title and icon description.
    fn icon(self) -> (&'static str, &'static str, &'static str) {
        match self {
            Self::GetInsurance => ("buy_cover.svg", "Buy Cover", "Buy medical insurance"),
            Self::GetTest => ("get_tested.svg", "Get tests", "Get diagnostic tests"),
            Self::GetMedicine => ("medicine.svg", "Get Medicine", "Get medicines"),
            Self::GetConsultation => ("see_doctor.svg", "See Doctor", "See a doctor"),
            Self::AddPatient => ("add_user.svg", "Register patient", "Register a patient"),
            Self::SearchPatient => ("search_user.svg", "Search a patient", "Search for a patient"),
        }
    }

    fn action_type(self) -> ActionType {
        match self {
            Self::SearchPatient => ActionType::Secondary,
            _ => ActionType::Primary,
        }
    }

    pub fn build(self) -> Action {
        let (file, title, description) = self.icon();
        let url = format!("{STATIC_BASE}/actions/svg/{file}");
        Action {
            id: new_id(),
            sequence_number: DEFAULT_SEQUENCE_NUMBER,
            name: self.name().to_string(),
            icon: Link::svg_image(&url, title, description, &url),
            action_type: self.action_type(),
            handling: Handling::FullPage,
            allow_anonymous: false,
        }
    }
}

/// Onboarding nudges. Each carries a single local action named after the
/// thing the user is asked to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DefaultNudge {
    AddInsurance,
    VerifyEmail,
    PartnerAccountSetup,
}

impl DefaultNudge {
    pub fn for_flavour(flavour: Flavour) -> &'static [DefaultNudge] {
        match flavour {
            Flavour::Consumer => &[Self::AddInsurance, Self::VerifyEmail],
            Flavour::Pro => &[Self::PartnerAccountSetup, Self::VerifyEmail],
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Self::AddInsurance => "Add Insurance",
            Self::VerifyEmail => "Add Primary Email Address",
            Self::PartnerAccountSetup => "Setup your partner account",
        }
    }

    fn text(self) -> &'static str {
        match self {
            Self::AddInsurance => "Link your existing medical cover",
            Self::VerifyEmail => "Please add and verify your primary email address",
            Self::PartnerAccountSetup => "Create a partner account to begin transacting on Be.Well",
        }
    }

    fn image(self) -> &'static str {
        match self {
            Self::AddInsurance => "add_insurance.png",
            Self::VerifyEmail => "verify_email.png",
            Self::PartnerAccountSetup => "complete_profile.png",
        }
    }

    pub fn action_name(self) -> &'static str {
        match self {
            Self::AddInsurance => "ADD_INSURANCE",
            Self::VerifyEmail => "VERIFY_EMAIL",
            Self::PartnerAccountSetup => "PARTNER_ACCOUNT_SETUP",
        }
    }

    pub fn build(self, uid: &str, now: DateTime<Utc>) -> Nudge {
        let image = format!("{STATIC_BASE}/nudges/{}", self.image());
        Nudge {
            id: new_id(),
            sequence_number: DEFAULT_SEQUENCE_NUMBER,
            status: Status::Pending,
            visibility: Visibility::Show,
            expiry: future_expiry(now),
            title: self.title().to_string(),
            text: self.text().to_string(),
            links: vec![Link::png_image(&image, self.title(), self.text(), &image)],
            actions: vec![local_action(
                self.action_name(),
                ActionType::Primary,
                Handling::FullPage,
                false,
            )],
            users: vec![uid.to_string()],
            groups: Vec::new(),
            notification_channels: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domains::{Element, LinkType};

    #[test]
    fn action_tables_per_flavour() {
        let names: Vec<_> = DefaultAction::for_flavour(Flavour::Consumer)
            .iter()
            .map(|a| a.name())
            .collect();
        assert_eq!(names, ["GET_INSURANCE", "GET_TEST", "GET_MEDICINE", "GET_CONSULTATION"]);

        let pro: Vec<_> = DefaultAction::for_flavour(Flavour::Pro).iter().map(|a| a.build()).collect();
        assert_eq!(pro[0].action_type, ActionType::Primary);
        assert_eq!(pro[1].action_type, ActionType::Secondary);
        assert_eq!(pro[1].icon.url, "https://assets.healthcloud.co.ke/actions/svg/search_user.svg");
    }

    #[test]
    fn every_default_is_valid() {
        let now = Utc::now();
        for flavour in [Flavour::Consumer, Flavour::Pro] {
            for action in DefaultAction::for_flavour(flavour) {
                let action = action.build();
                assert!(action.validate().is_ok(), "{}", action.name);
                assert_eq!(action.icon.link_type, LinkType::SvgImage);
                assert_eq!(action.handling, Handling::FullPage);
                assert!(!action.allow_anonymous);
            }
            for nudge in DefaultNudge::for_flavour(flavour) {
                let nudge = nudge.build("u1", now);
                assert!(nudge.validate().is_ok(), "{}", nudge.title);
            }
        }
    }

    #[test]
    fn nudges_target_the_user_and_never_expire_soon() {
        let now = Utc::now();
        let nudge = DefaultNudge::AddInsurance.build("u1", now);
        assert_eq!(nudge.users, ["u1"]);
        assert!(nudge.groups.is_empty());
        assert_eq!(nudge.status, Status::Pending);
        assert_eq!(nudge.visibility, Visibility::Show);
        assert_eq!(nudge.expiry, now + Duration::hours(878_400));
        assert_eq!(nudge.actions.len(), 1);
        assert_eq!(nudge.actions[0].name, "ADD_INSURANCE");
        assert_eq!(nudge.actions[0].icon.url, "https://assets.healthcloud.co.ke/1px.png");
        assert_eq!(nudge.links[0].url, "https://assets.healthcloud.co.ke/nudges/add_insurance.png");
    }

    #[test]
    fn each_build_gets_a_fresh_id() {
        assert_ne!(DefaultAction::GetTest.build().id, DefaultAction::GetTest.build().id);
    }
}
