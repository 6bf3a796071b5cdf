use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::{fmt, str::FromStr};
use thiserror::Error;
use time::OffsetDateTime;

use crate::id::TaskId;

/// Minimum accepted title length.
pub const TITLE_MIN_LEN: usize = 1;
/// Maximum accepted title length.
pub const TITLE_MAX_LEN: usize = 200;
/// Maximum accepted description length.
pub const DESCRIPTION_MAX_LEN: usize = 2000;

/// Raised when a string does not name a member of a closed vocabulary.
#[derive(Debug, Error)]
#[error("unknown {vocabulary}: {value}")]
pub struct UnknownValueError {
    /// Which vocabulary was being parsed.
    pub vocabulary: &'static str,
    /// The offending input.
    pub value: String,
}

/// Workflow status of a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TaskStatus {
    /// Not started yet.
    #[default]
    Pending,
    /// Actively being worked on.
    InProgress,
    /// Finished; the only status that carries `finishedAt`.
    Completed,
    /// Parked via the status dimension (distinct from the `isArchived` flag).
    Archived,
    /// Soft-deleted.
    Deleted,
}

impl TaskStatus {
    /// Every member of the vocabulary, in declaration order.
    pub const ALL: [Self; 5] = [
        Self::Pending,
        Self::InProgress,
        Self::Completed,
        Self::Archived,
        Self::Deleted,
    ];

    /// Wire representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::InProgress => "in-progress",
            Self::Completed => "completed",
            Self::Archived => "archived",
            Self::Deleted => "deleted",
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskStatus {
    type Err = UnknownValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| UnknownValueError {
                vocabulary: "status",
                value: s.to_owned(),
            })
    }
}

/// Priority of a task. Ordered from least to most urgent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskPriority {
    /// Default priority.
    #[default]
    Low,
    /// Medium priority.
    Medium,
    /// High priority.
    High,
    /// Drop everything.
    Urgent,
}

impl TaskPriority {
    /// Every member of the vocabulary, in ascending order.
    pub const ALL: [Self; 4] = [Self::Low, Self::Medium, Self::High, Self::Urgent];

    /// Wire representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Urgent => "urgent",
        }
    }
}

impl fmt::Display for TaskPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskPriority {
    type Err = UnknownValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|priority| priority.as_str() == s)
            .ok_or_else(|| UnknownValueError {
                vocabulary: "priority",
                value: s.to_owned(),
            })
    }
}

/// Closed tag vocabulary. Free-form labels go to `customTags` instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tag {
    /// Work-related.
    Work,
    /// Personal errands.
    Personal,
    /// Time-critical.
    Urgent,
    /// Around the house.
    Home,
    /// Shopping list material.
    Shopping,
    /// Health and fitness.
    Health,
    /// Money matters.
    Finance,
    /// Study and self-improvement.
    Learning,
}

impl Tag {
    /// Every member of the vocabulary.
    pub const ALL: [Self; 8] = [
        Self::Work,
        Self::Personal,
        Self::Urgent,
        Self::Home,
        Self::Shopping,
        Self::Health,
        Self::Finance,
        Self::Learning,
    ];

    /// Wire representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Work => "work",
            Self::Personal => "personal",
            Self::Urgent => "urgent",
            Self::Home => "home",
            Self::Shopping => "shopping",
            Self::Health => "health",
            Self::Finance => "finance",
            Self::Learning => "learning",
        }
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Tag {
    type Err = UnknownValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|tag| tag.as_str() == s)
            .ok_or_else(|| UnknownValueError {
                vocabulary: "tag",
                value: s.to_owned(),
            })
    }
}

/// The persisted task entity in its public wire shape.
///
/// `finishedAt` is derived: it is stamped by the orchestrator when a task
/// transitions into `completed` and cleared when it leaves that status.
/// Clients never set it directly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Store-assigned identifier, immutable after creation.
    pub id: TaskId,
    /// Unique, non-blank title.
    pub title: String,
    /// Workflow status.
    pub status: TaskStatus,
    /// Priority.
    pub priority: TaskPriority,
    /// Optional free-text body; non-blank when present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Store-managed creation timestamp.
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    /// Store-managed last-write timestamp.
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
    /// Optional deadline.
    #[serde(
        default,
        with = "time::serde::rfc3339::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub due_date: Option<OffsetDateTime>,
    /// Optional planned start.
    #[serde(
        default,
        with = "time::serde::rfc3339::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub start_date: Option<OffsetDateTime>,
    /// Derived completion timestamp; see the type-level docs.
    #[serde(
        default,
        with = "time::serde::rfc3339::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub finished_at: Option<OffsetDateTime>,
    /// Archive flag (independent of `status`).
    pub is_archived: bool,
    /// Pin flag.
    pub is_pinned: bool,
    /// Tags from the closed vocabulary.
    pub tags: BTreeSet<Tag>,
    /// Free-form tags.
    pub custom_tags: BTreeSet<String>,
}

#[cfg(test)]
#[allow(clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn status_roundtrips_through_strings() {
        for status in TaskStatus::ALL {
            let parsed: TaskStatus = status.as_str().parse().expect("must parse");
            assert_eq!(parsed, status);
        }
        assert!("in_progress".parse::<TaskStatus>().is_err());
        assert!("".parse::<TaskStatus>().is_err());
    }

    #[test]
    fn priority_ordering_matches_urgency() {
        assert!(TaskPriority::Low < TaskPriority::Medium);
        assert!(TaskPriority::High < TaskPriority::Urgent);
    }

    #[test]
    fn tag_rejects_values_outside_vocabulary() {
        assert!("work".parse::<Tag>().is_ok());
        let err = "chores".parse::<Tag>().expect_err("must reject");
        assert_eq!(err.vocabulary, "tag");
        assert_eq!(err.value, "chores");
    }

    #[test]
    fn task_serializes_with_camel_case_wire_names() {
        let task = Task {
            id: TaskId::new(),
            title: "Write docs".into(),
            status: TaskStatus::InProgress,
            priority: TaskPriority::High,
            description: None,
            created_at: OffsetDateTime::UNIX_EPOCH,
            updated_at: OffsetDateTime::UNIX_EPOCH,
            due_date: None,
            start_date: None,
            finished_at: None,
            is_archived: false,
            is_pinned: true,
            tags: BTreeSet::from([Tag::Work]),
            custom_tags: BTreeSet::new(),
        };

        let json = serde_json::to_value(&task).expect("must serialize");
        assert_eq!(json["status"], "in-progress");
        assert_eq!(json["isPinned"], true);
        assert_eq!(json["createdAt"], "1970-01-01T00:00:00Z");
        assert!(json.get("finishedAt").is_none());
        assert!(json.get("dueDate").is_none());
        assert_eq!(json["tags"][0], "work");
    }
}
