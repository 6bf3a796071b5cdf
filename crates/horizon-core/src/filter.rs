use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::str::FromStr;
use time::OffsetDateTime;

use crate::id::TaskId;
use crate::search::SearchMatcher;
use crate::task::{Tag, Task, TaskPriority, TaskStatus};

/// Page size applied when the request carries none (or a non-numeric one).
pub const DEFAULT_LIMIT: u32 = 5;
/// Hard ceiling on the page size.
pub const MAX_LIMIT: u32 = 100;

/// Inclusive timestamp range with at least one bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    /// Inclusive lower bound.
    pub from: Option<OffsetDateTime>,
    /// Inclusive upper bound.
    pub to: Option<OffsetDateTime>,
}

impl DateRange {
    /// Build a range, collapsing the no-bounds case to `None`.
    #[must_use]
    pub const fn bounded(from: Option<OffsetDateTime>, to: Option<OffsetDateTime>) -> Option<Self> {
        if from.is_none() && to.is_none() {
            None
        } else {
            Some(Self { from, to })
        }
    }

    /// Whether the value falls inside the range. Absent values never match
    /// a bounded range.
    #[must_use]
    pub fn matches(&self, value: Option<OffsetDateTime>) -> bool {
        let Some(value) = value else {
            return false;
        };
        self.from.is_none_or(|from| value >= from) && self.to.is_none_or(|to| value <= to)
    }
}

/// Sortable task fields, named as they appear on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    /// `createdAt`
    CreatedAt,
    /// `updatedAt`
    UpdatedAt,
    /// `dueDate`
    DueDate,
    /// `startDate`
    StartDate,
    /// `priority`
    Priority,
    /// `status`
    Status,
    /// `title`
    Title,
}

impl SortKey {
    /// Wire name of the field.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::CreatedAt => "createdAt",
            Self::UpdatedAt => "updatedAt",
            Self::DueDate => "dueDate",
            Self::StartDate => "startDate",
            Self::Priority => "priority",
            Self::Status => "status",
            Self::Title => "title",
        }
    }
}

impl FromStr for SortKey {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "createdAt" => Ok(Self::CreatedAt),
            "updatedAt" => Ok(Self::UpdatedAt),
            "dueDate" => Ok(Self::DueDate),
            "startDate" => Ok(Self::StartDate),
            "priority" => Ok(Self::Priority),
            "status" => Ok(Self::Status),
            "title" => Ok(Self::Title),
            _ => Err(()),
        }
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    /// Ascending (the default when a key is given without a direction).
    #[default]
    Asc,
    /// Descending.
    Desc,
}

impl FromStr for SortOrder {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "asc" => Ok(Self::Asc),
            "desc" => Ok(Self::Desc),
            _ => Err(()),
        }
    }
}

/// Single-field sort specification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortSpec {
    /// Field to sort by.
    pub key: SortKey,
    /// Direction.
    pub order: SortOrder,
}

impl SortSpec {
    /// The default applied when a query requests no sort at all.
    pub const NEWEST_FIRST: Self = Self {
        key: SortKey::CreatedAt,
        order: SortOrder::Desc,
    };

    /// Compare two tasks under this specification. Absent optional dates
    /// sort before present ones in ascending order.
    #[must_use]
    pub fn compare(&self, a: &Task, b: &Task) -> Ordering {
        let ordering = match self.key {
            SortKey::CreatedAt => a.created_at.cmp(&b.created_at),
            SortKey::UpdatedAt => a.updated_at.cmp(&b.updated_at),
            SortKey::DueDate => a.due_date.cmp(&b.due_date),
            SortKey::StartDate => a.start_date.cmp(&b.start_date),
            SortKey::Priority => a.priority.cmp(&b.priority),
            SortKey::Status => a.status.cmp(&b.status),
            SortKey::Title => a.title.cmp(&b.title),
        };
        match self.order {
            SortOrder::Asc => ordering,
            SortOrder::Desc => ordering.reverse(),
        }
    }
}

/// Resolved pagination window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    /// 1-based page number.
    pub page: u32,
    /// Page size, within `[1, MAX_LIMIT]`.
    pub limit: u32,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: 1,
            limit: DEFAULT_LIMIT,
        }
    }
}

impl Pagination {
    /// Resolve loosely-typed pagination input: absent, zero, or non-numeric
    /// values (passed as `None`) take the defaults; the rest is floored at
    /// page 1 and clamped to the limit ceiling.
    #[must_use]
    pub fn resolve(page: Option<i64>, limit: Option<i64>) -> Self {
        let page = page.filter(|value| *value != 0).unwrap_or(1).max(1);
        let limit = limit
            .filter(|value| *value != 0)
            .unwrap_or(i64::from(DEFAULT_LIMIT))
            .clamp(1, i64::from(MAX_LIMIT));
        Self {
            page: u32::try_from(page).unwrap_or(u32::MAX),
            limit: u32::try_from(limit).unwrap_or(MAX_LIMIT),
        }
    }

    /// Number of records to skip before the window starts.
    #[must_use]
    pub const fn offset(self) -> usize {
        (self.page as usize)
            .saturating_sub(1)
            .saturating_mul(self.limit as usize)
    }
}

/// Normalized, storage-agnostic query description.
///
/// Every field is an optional predicate; empty sets and `None` mean
/// "unconstrained". The one deliberate exception: `ids` set to
/// `Some(empty)` matches nothing, which is how a request whose explicit id
/// list was entirely malformed over-constrains instead of matching
/// everything.
#[derive(Debug, Clone, Default)]
pub struct FilterSpec {
    /// Status in-set predicate.
    pub status: BTreeSet<TaskStatus>,
    /// Priority in-set predicate.
    pub priority: BTreeSet<TaskPriority>,
    /// Archive-flag equals predicate.
    pub is_archived: Option<bool>,
    /// Pin-flag equals predicate.
    pub is_pinned: Option<bool>,
    /// Tag intersection predicate.
    pub tags: BTreeSet<Tag>,
    /// Custom-tag intersection predicate.
    pub custom_tags: BTreeSet<String>,
    /// Case-insensitive literal contains over title OR description.
    pub search: Option<SearchMatcher>,
    /// Range over `dueDate`.
    pub due: Option<DateRange>,
    /// Range over `startDate`.
    pub start: Option<DateRange>,
    /// Range over `createdAt`.
    pub created: Option<DateRange>,
    /// Range over `updatedAt`.
    pub updated: Option<DateRange>,
    /// Range over `finishedAt`.
    pub finished: Option<DateRange>,
    /// Explicit id restriction; `Some(empty)` matches nothing.
    pub ids: Option<BTreeSet<TaskId>>,
    /// Requested sort; `None` lets the caller apply its default.
    pub sort: Option<SortSpec>,
    /// Resolved pagination window.
    pub pagination: Pagination,
}

impl FilterSpec {
    /// Evaluate every predicate against a task (logical AND).
    #[must_use]
    pub fn matches(&self, task: &Task) -> bool {
        if let Some(ids) = &self.ids {
            if !ids.contains(&task.id) {
                return false;
            }
        }
        if !self.status.is_empty() && !self.status.contains(&task.status) {
            return false;
        }
        if !self.priority.is_empty() && !self.priority.contains(&task.priority) {
            return false;
        }
        if self.is_archived.is_some_and(|wanted| wanted != task.is_archived) {
            return false;
        }
        if self.is_pinned.is_some_and(|wanted| wanted != task.is_pinned) {
            return false;
        }
        if !self.tags.is_empty() && task.tags.is_disjoint(&self.tags) {
            return false;
        }
        if !self.custom_tags.is_empty() && task.custom_tags.is_disjoint(&self.custom_tags) {
            return false;
        }
        if let Some(search) = &self.search {
            if !search.matches(&task.title, task.description.as_deref()) {
                return false;
            }
        }
        if let Some(range) = &self.due {
            if !range.matches(task.due_date) {
                return false;
            }
        }
        if let Some(range) = &self.start {
            if !range.matches(task.start_date) {
                return false;
            }
        }
        if let Some(range) = &self.created {
            if !range.matches(Some(task.created_at)) {
                return false;
            }
        }
        if let Some(range) = &self.updated {
            if !range.matches(Some(task.updated_at)) {
                return false;
            }
        }
        if let Some(range) = &self.finished {
            if !range.matches(task.finished_at) {
                return false;
            }
        }
        true
    }
}
