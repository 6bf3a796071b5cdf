//! Builds a [`FilterSpec`] from the loosely-typed listing query.
//!
//! Query construction never fails: unrecognized enum tokens, unparseable
//! dates and malformed flags are dropped so the listing degrades to a wider
//! result set. The one exception is `ids`, where a list that yields no valid
//! id at all must match nothing rather than everything.

use std::collections::BTreeSet;

use time::format_description::BorrowedFormatItem;
use time::format_description::well_known::Rfc3339;
use time::macros::format_description;
use time::{Date, OffsetDateTime, UtcOffset};

use horizon_core::{DateRange, FilterSpec, Pagination, SearchMatcher, SortSpec, TaskId};

use crate::inputs::{OneOrMany, TaskQuery};

/// Translate a listing query into the storage-agnostic filter.
pub fn build_filter(query: &TaskQuery) -> FilterSpec {
    let mut spec = FilterSpec::default();
    apply_status(&mut spec, query);
    apply_priority(&mut spec, query);
    apply_flags(&mut spec, query);
    apply_tags(&mut spec, query);
    apply_search(&mut spec, query);
    apply_dates(&mut spec, query);
    apply_ids(&mut spec, query);
    apply_sort(&mut spec, query);
    apply_pagination(&mut spec, query);
    spec
}

fn apply_status(spec: &mut FilterSpec, query: &TaskQuery) {
    if let Some(values) = &query.status {
        spec.status = values.iter().filter_map(|raw| raw.trim().parse().ok()).collect();
    }
}

fn apply_priority(spec: &mut FilterSpec, query: &TaskQuery) {
    if let Some(values) = &query.priority {
        spec.priority = values.iter().filter_map(|raw| raw.trim().parse().ok()).collect();
    }
}

fn apply_flags(spec: &mut FilterSpec, query: &TaskQuery) {
    spec.is_archived = query.is_archived.as_ref().and_then(to_bool);
    spec.is_pinned = query.is_pinned.as_ref().and_then(to_bool);
}

fn apply_tags(spec: &mut FilterSpec, query: &TaskQuery) {
    if let Some(values) = &query.tags {
        spec.tags = values.iter().filter_map(|raw| raw.trim().parse().ok()).collect();
    }
    if let Some(values) = &query.custom_tags {
        spec.custom_tags = values
            .iter()
            .map(|raw| raw.trim())
            .filter(|raw| !raw.is_empty())
            .map(str::to_owned)
            .collect();
    }
}

fn apply_search(spec: &mut FilterSpec, query: &TaskQuery) {
    spec.search = query.search.as_deref().and_then(SearchMatcher::new);
}

fn apply_dates(spec: &mut FilterSpec, query: &TaskQuery) {
    spec.due = range(query.due_from.as_deref(), query.due_to.as_deref());
    spec.start = range(query.start_from.as_deref(), query.start_to.as_deref());
    spec.created = range(query.created_from.as_deref(), query.created_to.as_deref());
    spec.updated = range(query.updated_from.as_deref(), query.updated_to.as_deref());
    spec.finished = range(query.finished_from.as_deref(), query.finished_to.as_deref());
}

fn apply_ids(spec: &mut FilterSpec, query: &TaskQuery) {
    let single = query.id.as_deref().map(str::trim).filter(|raw| !raw.is_empty());
    let many = query.ids.as_ref().map(OneOrMany::iter).into_iter().flatten();

    let mut requested = false;
    let mut ids = BTreeSet::new();
    for raw in single.into_iter().chain(many.map(String::as_str)) {
        requested = true;
        if let Ok(id) = raw.trim().parse::<TaskId>() {
            ids.insert(id);
        }
    }
    // A requested-but-fully-invalid id list over-constrains to the empty set
    // instead of silently returning everything.
    if requested {
        spec.ids = Some(ids);
    }
}

fn apply_sort(spec: &mut FilterSpec, query: &TaskQuery) {
    if let Some(field) = query.sort_by.as_deref() {
        let Ok(key) = field.trim().parse() else {
            return;
        };
        let order = query
            .sort_order
            .as_deref()
            .and_then(|raw| raw.trim().parse().ok())
            .unwrap_or_default();
        spec.sort = Some(SortSpec { key, order });
        return;
    }

    if let Some(raw) = query.sort.as_deref() {
        let (field, direction) = raw.split_once(':').unwrap_or((raw, ""));
        let Ok(key) = field.trim().parse() else {
            return;
        };
        let order = direction.trim().parse().unwrap_or_default();
        spec.sort = Some(SortSpec { key, order });
    }
}

fn apply_pagination(spec: &mut FilterSpec, query: &TaskQuery) {
    spec.pagination = Pagination::resolve(
        query.page.as_ref().and_then(to_number),
        query.limit.as_ref().and_then(to_number),
    );
}

fn to_bool(value: &serde_json::Value) -> Option<bool> {
    match value {
        serde_json::Value::Bool(flag) => Some(*flag),
        serde_json::Value::String(raw) => match raw.trim().to_ascii_lowercase().as_str() {
            "true" => Some(true),
            "false" => Some(false),
            _ => None,
        },
        _ => None,
    }
}

fn to_number(value: &serde_json::Value) -> Option<i64> {
    match value {
        serde_json::Value::Number(n) => n.as_i64(),
        serde_json::Value::String(raw) => raw.trim().parse().ok(),
        _ => None,
    }
}

fn range(from: Option<&str>, to: Option<&str>) -> Option<DateRange> {
    DateRange::bounded(
        from.and_then(parse_timestamp),
        to.and_then(parse_timestamp),
    )
}

const DATE_ONLY: &[BorrowedFormatItem<'_>] = format_description!("[year]-[month]-[day]");

/// Parse an ISO-8601 value into a UTC timestamp. Accepts full RFC 3339
/// timestamps and bare calendar dates; a date-only value is taken as UTC
/// midnight.
#[must_use]
pub fn parse_timestamp(raw: &str) -> Option<OffsetDateTime> {
    let raw = raw.trim();
    if let Ok(parsed) = OffsetDateTime::parse(raw, &Rfc3339) {
        return Some(parsed.to_offset(UtcOffset::UTC));
    }
    Date::parse(raw, DATE_ONLY)
        .ok()
        .map(|date| date.midnight().assume_utc())
}
