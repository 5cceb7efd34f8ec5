//! # Feed Filters
//!
//! Optional constraints a caller may put on a feed read. `None` means
//! "apply the default policy", which is not the same as "no constraint":
//! only [`BooleanFilter::Both`] removes a constraint entirely.

use serde::{Deserialize, Serialize};

use crate::models::{Status, Visibility};

/// Tri-state filter for boolean-ish properties (persistence, expiry).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BooleanFilter {
    True,
    False,
    #[default]
    Both,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FilterParams {
    #[serde(default)]
    pub labels: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FeedFilters {
    pub persistent: BooleanFilter,
    pub status: Option<Status>,
    pub visibility: Option<Visibility>,
    pub expired: Option<BooleanFilter>,
    pub params: Option<FilterParams>,
}

impl FeedFilters {
    /// Only an unfiltered read may trigger default-content initialization.
    pub fn is_unfiltered(&self) -> bool {
        self.persistent == BooleanFilter::Both
            && self.status.is_none()
            && self.visibility.is_none()
            && self.expired.is_none()
            && self.params.is_none()
    }

    pub fn persistent(mut self, persistent: BooleanFilter) -> Self {
        self.persistent = persistent;
        self
    }

    pub fn status(mut self, status: Status) -> Self {
        self.status = Some(status);
        self
    }

    pub fn visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = Some(visibility);
        self
    }

    pub fn expired(mut self, expired: BooleanFilter) -> Self {
        self.expired = Some(expired);
        self
    }

    pub fn labels<I, S>(mut self, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.params = Some(FilterParams {
            labels: labels.into_iter().map(Into::into).collect(),
        });
        self
    }

    /// Label constraint, if one applies. An empty label list is no constraint.
    pub fn label_filter(&self) -> Option<&[String]> {
        self.params
            .as_ref()
            .map(|p| p.labels.as_slice())
            .filter(|labels| !labels.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_filters_are_unfiltered() {
        assert!(FeedFilters::default().is_unfiltered());
    }

    #[test]
    fn any_explicit_filter_counts() {
        assert!(!FeedFilters::default().persistent(BooleanFilter::True).is_unfiltered());
        assert!(!FeedFilters::default().status(Status::Done).is_unfiltered());
        assert!(!FeedFilters::default().expired(BooleanFilter::Both).is_unfiltered());
        // present-but-empty params still count as a filter being supplied
        assert!(!FeedFilters::default().labels(Vec::<String>::new()).is_unfiltered());
    }

    #[test]
    fn empty_label_list_is_not_a_constraint() {
        assert!(FeedFilters::default().labels(Vec::<String>::new()).label_filter().is_none());
        assert_eq!(
            FeedFilters::default().labels(["WELCOME"]).label_filter(),
            Some(&["WELCOME".to_string()][..])
        );
    }
}
