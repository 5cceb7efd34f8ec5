//! # Query Composer
//!
//! Turns [`FeedFilters`] into ordered store queries. Pure: `now` is passed
//! in so expiry constraints are reproducible.
//!
//! Unset filters fall back to the default view of a feed: pending, shown,
//! unexpired. Only `BooleanFilter::Both` drops a constraint entirely.

use chrono::{DateTime, Utc};
use domains::{BooleanFilter, Direction, FeedFilters, Operator, Query, Status, Visibility};

/// Hard cap on items returned by one feed read.
pub const ITEMS_LIMIT: usize = 1000;

pub fn items(collection: String, filters: &FeedFilters, now: DateTime<Utc>) -> Query {
    let query = by_expiry(collection).limit(ITEMS_LIMIT);
    let query = lifecycle(query, filters, now);
    let query = match filters.persistent {
        BooleanFilter::True => query.filter("persistent", Operator::Eq, true),
        BooleanFilter::False => query.filter("persistent", Operator::Eq, false),
        BooleanFilter::Both => query,
    };
    match filters.label_filter() {
        Some(labels) => query.filter("label", Operator::In, labels.to_vec()),
        None => query,
    }
}

/// Nudges take the lifecycle filters only; persistence and labels are
/// item concepts.
pub fn nudges(collection: String, filters: &FeedFilters, now: DateTime<Utc>) -> Query {
    lifecycle(by_expiry(collection), filters, now)
}

pub fn actions(collection: String) -> Query {
    by_id(collection)
}

pub fn messages(collection: String) -> Query {
    by_id(collection)
}

/// Nudges with this title in any status, visibility or expiry.
pub fn nudges_titled(collection: String, title: &str) -> Query {
    Query::collection(collection)
        .filter("title", Operator::Eq, title)
        .order_by("sequenceNumber", Direction::Desc)
}

/// Latest version of one element.
pub fn latest(collection: String, id: &str) -> Query {
    Query::collection(collection)
        .filter("id", Operator::Eq, id)
        .order_by("sequenceNumber", Direction::Desc)
        .limit(1)
}

/// Probe for an element with exactly this ID and sequence number.
pub fn exact(collection: String, id: &str, sequence_number: i64) -> Query {
    Query::collection(collection)
        .filter("id", Operator::Eq, id)
        .filter("sequenceNumber", Operator::Eq, sequence_number)
        .limit_to_last(1)
}

fn by_expiry(collection: String) -> Query {
    Query::collection(collection)
        .order_by("expiry", Direction::Desc)
        .order_by("id", Direction::Desc)
        .order_by("sequenceNumber", Direction::Desc)
}

fn by_id(collection: String) -> Query {
    Query::collection(collection)
        .order_by("id", Direction::Desc)
        .order_by("sequenceNumber", Direction::Desc)
}

fn lifecycle(query: Query, filters: &FeedFilters, now: DateTime<Utc>) -> Query {
    let query = query
        .filter("status", Operator::Eq, filters.status.unwrap_or(Status::Pending))
        .filter("visibility", Operator::Eq, filters.visibility.unwrap_or(Visibility::Show));
    match filters.expired.unwrap_or(BooleanFilter::False) {
        BooleanFilter::False => query.filter("expiry", Operator::Gte, now),
        BooleanFilter::True => query.filter("expiry", Operator::Lte, now),
        BooleanFilter::Both => query,
    }
}
