use anyhow::{Result, anyhow};
use serde_json::json;

use horizon_app::{
    BulkDeleteInput, BulkFlagsInput, Success, TaskError, TaskQuery, UpdateTaskInput, failure,
};
use horizon_core::{TaskId, TaskStatus};
use horizon_e2e::{input, seed_task, service};

#[test]
fn create_then_list_roundtrip_with_envelopes() -> Result<()> {
    let service = service();
    let body = input(json!({
        "title": "Write the release notes",
        "priority": "high",
        "tags": ["work"],
        "dueDate": "2026-09-15T12:00:00Z",
    }))?;
    let task = service.create_task(&body).map_err(|err| anyhow!(err))?;
    assert_eq!(task.status, TaskStatus::Pending);

    let envelope = serde_json::to_value(Success::with_message("Task created successfully", &task))?;
    assert_eq!(envelope["success"], json!(true));
    assert_eq!(envelope["message"], json!("Task created successfully"));
    assert_eq!(envelope["data"]["title"], json!("Write the release notes"));
    assert_eq!(envelope["data"]["priority"], json!("high"));
    assert_eq!(envelope["data"]["dueDate"], json!("2026-09-15T12:00:00Z"));

    let query: TaskQuery = input(json!({}))?;
    let tasks = service.list_tasks(&query).map_err(|err| anyhow!(err))?;
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0].id, task.id);
    Ok(())
}

#[test]
fn search_is_a_literal_match_and_filters_compose() -> Result<()> {
    let service = service();
    seed_task(&service, "Deploy a.b*c release")?;
    seed_task(&service, "Deploy axbyc release")?;
    seed_task(&service, "Water the plants")?;

    let query: TaskQuery = input(json!({ "search": "a.b*c" }))?;
    let tasks = service.list_tasks(&query).map_err(|err| anyhow!(err))?;
    assert_eq!(tasks.len(), 1, "regex metacharacters must match literally");
    assert_eq!(tasks[0].title, "Deploy a.b*c release");

    let query: TaskQuery = input(json!({ "search": "DEPLOY", "status": "pending" }))?;
    let tasks = service.list_tasks(&query).map_err(|err| anyhow!(err))?;
    assert_eq!(tasks.len(), 2, "search is case-insensitive and composes with status");
    Ok(())
}

#[test]
fn finished_at_follows_the_status_lifecycle() -> Result<()> {
    let service = service();
    let task = seed_task(&service, "Finishable")?;
    assert!(task.finished_at.is_none());

    let complete: UpdateTaskInput = input(json!({ "status": "completed" }))?;
    let completed = service
        .update_task(&task.id.to_string(), &complete)
        .map_err(|err| anyhow!(err))?;
    assert_eq!(completed.status, TaskStatus::Completed);
    let stamp = completed.finished_at.ok_or_else(|| anyhow!("missing finishedAt stamp"))?;

    // Completing again must not move the stamp.
    let completed_again = service
        .update_task(&task.id.to_string(), &complete)
        .map_err(|err| anyhow!(err))?;
    assert_eq!(completed_again.finished_at, Some(stamp));

    let reopen: UpdateTaskInput = input(json!({ "status": "pending" }))?;
    let reopened = service
        .update_task(&task.id.to_string(), &reopen)
        .map_err(|err| anyhow!(err))?;
    assert_eq!(reopened.status, TaskStatus::Pending);
    assert!(reopened.finished_at.is_none(), "leaving completed clears the stamp");
    Ok(())
}

#[test]
fn duplicate_titles_render_as_conflict_envelopes() -> Result<()> {
    let service = service();
    seed_task(&service, "Unique title")?;

    let body = input(json!({ "title": "Unique title" }))?;
    let err = service
        .create_task(&body)
        .expect_err("second create with the same title must conflict");
    let (status, body) = failure(&err);
    assert_eq!(status, 409);
    assert_eq!(body["success"], json!(false));
    assert_eq!(body["code"], json!("DUPLICATE_FIELD"));
    assert_eq!(body["message"], json!("title already exists"));
    Ok(())
}

#[test]
fn bulk_delete_deduplicates_and_misses_are_not_found() -> Result<()> {
    let service = service();
    let kept = seed_task(&service, "kept")?;
    let doomed = seed_task(&service, "doomed")?;

    let body: BulkDeleteInput = input(json!({
        "ids": [doomed.id.to_string(), doomed.id.to_string(), TaskId::new().to_string()]
    }))?;
    let outcome = service.delete_selected_tasks(&body).map_err(|err| anyhow!(err))?;
    assert_eq!(outcome.deleted_count, 1, "duplicates collapse and misses do not count");
    assert_eq!(outcome.deleted_tasks[0].id, doomed.id);

    let body: BulkDeleteInput = input(json!({ "ids": [TaskId::new().to_string()] }))?;
    let err = service
        .delete_selected_tasks(&body)
        .expect_err("deleting nothing at all is an error");
    let (status, rendered) = failure(&err);
    assert_eq!(status, 404);
    assert_eq!(rendered["resourceType"], json!("Tasks"));

    let query: TaskQuery = input(json!({}))?;
    let remaining = service.list_tasks(&query).map_err(|err| anyhow!(err))?;
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].id, kept.id);
    Ok(())
}

#[test]
fn bulk_flag_updates_are_idempotent() -> Result<()> {
    let service = service();
    let first = seed_task(&service, "first")?;
    let second = seed_task(&service, "second")?;
    let ids = vec![first.id.to_string(), second.id.to_string()];

    let body: BulkFlagsInput = input(json!({ "ids": ids, "isArchived": true }))?;
    let outcome = service.update_task_flags_bulk(&body).map_err(|err| anyhow!(err))?;
    assert_eq!(outcome.modified_count, 2);
    assert!(outcome.updated_tasks.iter().all(|task| task.is_archived));

    // Re-applying the same flags matches everything but modifies nothing.
    let outcome = service.update_task_flags_bulk(&body).map_err(|err| anyhow!(err))?;
    assert_eq!(outcome.modified_count, 0);
    assert_eq!(outcome.updated_tasks.len(), 2);
    Ok(())
}

#[test]
fn fully_invalid_id_filters_match_nothing() -> Result<()> {
    let service = service();
    seed_task(&service, "present")?;

    let query: TaskQuery = input(json!({ "ids": ["not-an-id", "also-garbage"] }))?;
    let tasks = service.list_tasks(&query).map_err(|err| anyhow!(err))?;
    assert!(tasks.is_empty(), "an explicit but unusable id list over-constrains");
    Ok(())
}

#[test]
fn pagination_windows_a_sorted_listing() -> Result<()> {
    let service = service();
    for i in 0..7 {
        seed_task(&service, &format!("task {i}"))?;
    }

    let query: TaskQuery = input(json!({
        "sortBy": "title",
        "sortOrder": "asc",
        "page": "2",
        "limit": "3",
    }))?;
    let window = service.list_tasks(&query).map_err(|err| anyhow!(err))?;
    let titles: Vec<_> = window.iter().map(|task| task.title.as_str()).collect();
    assert_eq!(titles, ["task 3", "task 4", "task 5"]);

    // An absurd limit clamps instead of failing.
    let query: TaskQuery = input(json!({ "limit": 500 }))?;
    let all = service.list_tasks(&query).map_err(|err| anyhow!(err))?;
    assert_eq!(all.len(), 7);
    Ok(())
}

#[test]
fn validation_failures_render_with_field_and_code() -> Result<()> {
    let service = service();
    let body = input(json!({ "title": "   " }))?;
    let err = service.create_task(&body).expect_err("whitespace-only title");
    assert!(matches!(err, TaskError::Validation { .. }));

    let (status, rendered) = failure(&err);
    assert_eq!(status, 400);
    assert_eq!(rendered["field"], json!("title"));
    assert_eq!(rendered["code"], json!("ERR_TITLE_REQUIRED"));

    let update: UpdateTaskInput = input(json!({ "status": "paused" }))?;
    let task = seed_task(&service, "valid")?;
    let err = service
        .update_task(&task.id.to_string(), &update)
        .expect_err("unknown status in a mutation body is rejected, not ignored");
    let (status, rendered) = failure(&err);
    assert_eq!(status, 400);
    assert_eq!(rendered["code"], json!("ERR_INVALID_STATUS"));
    Ok(())
}
