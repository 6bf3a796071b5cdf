//! Field-level input validation shared by the mutation operations.
//!
//! Every rejection names the offending field (wire spelling) and carries a
//! stable `ERR_*` machine code.

use serde_json::Value;
use std::collections::BTreeSet;
use time::OffsetDateTime;

use horizon_core::{
    DESCRIPTION_MAX_LEN, Tag, TaskId, TaskPriority, TaskStatus, TITLE_MAX_LEN, TITLE_MIN_LEN,
};

use crate::error::TaskError;
use crate::inputs::{BulkFlagsInput, CreateTaskInput, UpdateTaskInput};
use crate::store::{FlagChanges, NewTask, TaskChanges};

/// Validate a path-supplied task id, returning the parsed id.
///
/// # Errors
/// `ERR_TASK_ID_REQUIRED` for blank input, `ERR_INVALID_ID_FORMAT` when the
/// candidate is not a well-formed id.
pub fn validate_task_id(id: &str) -> Result<TaskId, TaskError> {
    if id.trim().is_empty() {
        return Err(TaskError::validation(
            "Task ID is required",
            "id",
            "ERR_TASK_ID_REQUIRED",
        ));
    }
    id.parse().map_err(|_| {
        TaskError::validation("Invalid task ID format", "id", "ERR_INVALID_ID_FORMAT")
    })
}

/// Validate a create body into a store-ready [`NewTask`], applying the
/// status/priority/flag defaults.
///
/// # Errors
/// The first failing field, with its `ERR_*` code.
pub fn validate_create(input: &CreateTaskInput) -> Result<NewTask, TaskError> {
    let title = match input.title.as_deref().map(str::trim) {
        Some(trimmed) if !trimmed.is_empty() => trimmed.to_owned(),
        _ => {
            return Err(TaskError::validation(
                "Title is required",
                "title",
                "ERR_TITLE_REQUIRED",
            ));
        }
    };
    check_title_length(&title)?;

    Ok(NewTask {
        title,
        status: parse_status(input.status.as_deref())?.unwrap_or_default(),
        priority: parse_priority(input.priority.as_deref())?.unwrap_or_default(),
        description: validate_description(input.description.as_deref())?,
        due_date: parse_date("dueDate", input.due_date.as_deref())?,
        start_date: parse_date("startDate", input.start_date.as_deref())?,
        is_archived: input.is_archived.unwrap_or(false),
        is_pinned: input.is_pinned.unwrap_or(false),
        tags: input.tags.as_ref().map(parse_tags).transpose()?.unwrap_or_default(),
        custom_tags: input
            .custom_tags
            .as_ref()
            .map(parse_custom_tags)
            .transpose()?
            .unwrap_or_default(),
    })
}

/// Validate an update body into a [`TaskChanges`] patch. Absent fields stay
/// untouched; `finished_at` is left for the orchestrator's transition rule.
///
/// # Errors
/// The first failing field, with its `ERR_*` code.
pub fn validate_update(input: &UpdateTaskInput) -> Result<TaskChanges, TaskError> {
    let mut changes = TaskChanges::default();

    if let Some(raw) = input.title.as_deref() {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(TaskError::validation(
                "Title cannot be empty",
                "title",
                "ERR_TITLE_EMPTY",
            ));
        }
        check_title_length(trimmed)?;
        changes.title = Some(trimmed.to_owned());
    }

    changes.description = validate_description(input.description.as_deref())?;
    changes.status = parse_status(input.status.as_deref())?;
    changes.priority = parse_priority(input.priority.as_deref())?;
    changes.due_date = parse_date("dueDate", input.due_date.as_deref())?;
    changes.start_date = parse_date("startDate", input.start_date.as_deref())?;
    changes.tags = input.tags.as_ref().map(parse_tags).transpose()?;
    changes.custom_tags = input.custom_tags.as_ref().map(parse_custom_tags).transpose()?;

    Ok(changes)
}

/// Validate a bulk id list: non-empty array, string entries only, every id
/// well-formed. Duplicates collapse to the first occurrence.
///
/// # Errors
/// A single validation failure for the whole request; bad entries are never
/// silently filtered out.
pub fn validate_id_list(raw: Option<&Value>) -> Result<Vec<TaskId>, TaskError> {
    let items = raw.and_then(Value::as_array).ok_or_else(ids_required)?;
    if items.is_empty() {
        return Err(ids_required());
    }

    let mut seen = BTreeSet::new();
    let mut ids = Vec::with_capacity(items.len());
    for item in items {
        let candidate = item.as_str().map(str::trim).filter(|s| !s.is_empty()).ok_or_else(|| {
            TaskError::validation(
                "ids must contain only non-empty strings",
                "ids",
                "ERR_IDS_INVALID_ENTRY",
            )
        })?;
        let id: TaskId = candidate.parse().map_err(|_| {
            TaskError::validation(
                format!("Invalid task ID format: '{candidate}'"),
                "ids",
                "ERR_INVALID_ID_FORMAT",
            )
        })?;
        if seen.insert(id) {
            ids.push(id);
        }
    }
    Ok(ids)
}

/// Validate the flag portion of a bulk flag update: booleans only, and at
/// least one of the two flags present.
///
/// # Errors
/// `ERR_FLAG_INVALID_TYPE` or `ERR_FLAGS_REQUIRED`.
pub fn validate_flags(input: &BulkFlagsInput) -> Result<FlagChanges, TaskError> {
    let flags = FlagChanges {
        is_archived: parse_flag("isArchived", input.is_archived.as_ref())?,
        is_pinned: parse_flag("isPinned", input.is_pinned.as_ref())?,
    };
    if flags.is_archived.is_none() && flags.is_pinned.is_none() {
        return Err(TaskError::validation(
            "At least one of isPinned or isArchived must be provided",
            "flags",
            "ERR_FLAGS_REQUIRED",
        ));
    }
    Ok(flags)
}

fn ids_required() -> TaskError {
    TaskError::validation("ids must be a non-empty array", "ids", "ERR_IDS_REQUIRED")
}

fn check_title_length(title: &str) -> Result<(), TaskError> {
    let len = title.chars().count();
    if len < TITLE_MIN_LEN {
        return Err(TaskError::validation(
            format!("Title must be at least {TITLE_MIN_LEN} characters"),
            "title",
            "ERR_TITLE_TOO_SHORT",
        ));
    }
    if len > TITLE_MAX_LEN {
        return Err(TaskError::validation(
            format!("Title must be less than {TITLE_MAX_LEN} characters"),
            "title",
            "ERR_TITLE_TOO_LONG",
        ));
    }
    Ok(())
}

fn validate_description(description: Option<&str>) -> Result<Option<String>, TaskError> {
    let Some(raw) = description else {
        return Ok(None);
    };
    if raw.trim().is_empty() {
        return Err(TaskError::validation(
            "Description cannot be empty or contain only whitespace",
            "description",
            "ERR_DESCRIPTION_EMPTY",
        ));
    }
    if raw.chars().count() > DESCRIPTION_MAX_LEN {
        return Err(TaskError::validation(
            format!("Description must be less than {DESCRIPTION_MAX_LEN} characters"),
            "description",
            "ERR_DESCRIPTION_TOO_LONG",
        ));
    }
    Ok(Some(raw.to_owned()))
}

fn parse_status(status: Option<&str>) -> Result<Option<TaskStatus>, TaskError> {
    let Some(raw) = status else {
        return Ok(None);
    };
    raw.parse().map(Some).map_err(|_| {
        TaskError::validation(
            format!("Status must be one of: {}", allowed(TaskStatus::ALL.map(TaskStatus::as_str))),
            "status",
            "ERR_INVALID_STATUS",
        )
    })
}

fn parse_priority(priority: Option<&str>) -> Result<Option<TaskPriority>, TaskError> {
    let Some(raw) = priority else {
        return Ok(None);
    };
    raw.parse().map(Some).map_err(|_| {
        TaskError::validation(
            format!(
                "Priority must be one of: {}",
                allowed(TaskPriority::ALL.map(TaskPriority::as_str))
            ),
            "priority",
            "ERR_INVALID_PRIORITY",
        )
    })
}

fn parse_tags(value: &Value) -> Result<BTreeSet<Tag>, TaskError> {
    let items = value.as_array().ok_or_else(|| {
        TaskError::validation("Tags must be an array", "tags", "ERR_TAGS_INVALID_TYPE")
    })?;
    let mut tags = BTreeSet::new();
    for item in items {
        let tag = item.as_str().and_then(|s| s.parse::<Tag>().ok()).ok_or_else(|| {
            let shown = item.as_str().map_or_else(|| item.to_string(), str::to_owned);
            TaskError::validation(
                format!(
                    "Invalid tag '{shown}'. Allowed: {}",
                    allowed(Tag::ALL.map(Tag::as_str))
                ),
                "tags",
                "ERR_INVALID_TAG",
            )
        })?;
        tags.insert(tag);
    }
    Ok(tags)
}

fn parse_custom_tags(value: &Value) -> Result<BTreeSet<String>, TaskError> {
    let invalid = || {
        TaskError::validation(
            "customTags must be an array of strings",
            "customTags",
            "ERR_CUSTOM_TAGS_INVALID_TYPE",
        )
    };
    let items = value.as_array().ok_or_else(invalid)?;
    items
        .iter()
        .map(|item| item.as_str().map(str::to_owned).ok_or_else(invalid))
        .collect()
}

fn parse_date(field: &'static str, value: Option<&str>) -> Result<Option<OffsetDateTime>, TaskError> {
    let Some(raw) = value else {
        return Ok(None);
    };
    crate::filters::parse_timestamp(raw).map(Some).ok_or_else(|| {
        TaskError::validation(
            format!("{field} must be a valid ISO-8601 timestamp or calendar date"),
            field,
            "ERR_INVALID_DATE_FORMAT",
        )
    })
}

fn parse_flag(field: &'static str, value: Option<&Value>) -> Result<Option<bool>, TaskError> {
    match value {
        None => Ok(None),
        Some(Value::Bool(flag)) => Ok(Some(*flag)),
        Some(_) => Err(TaskError::validation(
            format!("{field} must be a boolean"),
            field,
            "ERR_FLAG_INVALID_TYPE",
        )),
    }
}

fn allowed(names: impl IntoIterator<Item = &'static str>) -> String {
    names.into_iter().collect::<Vec<_>>().join(", ")
}
