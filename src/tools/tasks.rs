//! Task operations: fetch, create, update, filter, search, custom fields.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::client::{ClickUpClient, Query};
use crate::error::ServiceResult;
use crate::reduce::{reduce_array, reduce_task};
use crate::tools::{Contract, CustomFieldValue, check_priority, confirmation};
use crate::unchecked_contract;

#[derive(Debug, Deserialize, JsonSchema)]
pub struct GetTaskArgs {
    /// ClickUp task ID
    pub task_id: String,
    /// Include subtasks (default false)
    pub include_subtasks: Option<bool>,
    /// Return description as markdown
    pub include_markdown_description: Option<bool>,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct TaskIdArgs {
    /// ClickUp task ID
    pub task_id: String,
}

#[derive(Clone, Debug, Deserialize, Serialize, JsonSchema)]
pub struct CustomFieldInput {
    /// Custom field ID
    pub id: String,
    pub value: CustomFieldValue,
}

/// Request body for a new task. `None` fields are left out of the payload.
#[derive(Debug, Default, Deserialize, Serialize, JsonSchema)]
pub struct NewTask {
    /// Task name
    pub name: String,
    /// Task description (plain text or markdown)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Task description in markdown
    #[serde(skip_serializing_if = "Option::is_none")]
    pub markdown_description: Option<String>,
    /// Status name (must match list's statuses)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    /// Priority: 1=urgent, 2=high, 3=normal, 4=low
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schemars(range(min = 1, max = 4))]
    pub priority: Option<i64>,
    /// Array of user IDs to assign
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assignees: Option<Vec<i64>>,
    /// Array of tag names
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    /// Due date as Unix timestamp in milliseconds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<i64>,
    /// Whether due_date includes time
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date_time: Option<bool>,
    /// Start date as Unix timestamp in milliseconds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<i64>,
    /// Whether start_date includes time
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date_time: Option<bool>,
    /// Time estimate in milliseconds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_estimate: Option<i64>,
    /// Parent task ID (to create subtask)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,
    /// Notify assignees (default true)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notify_all: Option<bool>,
    /// Custom field values to set
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_fields: Option<Vec<CustomFieldInput>>,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct CreateTaskArgs {
    /// ClickUp list ID
    pub list_id: String,
    #[serde(flatten)]
    pub task: NewTask,
}

impl Contract for CreateTaskArgs {
    fn check(&self) -> ServiceResult<()> {
        check_priority(self.task.priority)
    }
}

#[derive(Debug, Default, Deserialize, Serialize, JsonSchema)]
pub struct AssigneeChanges {
    /// User IDs to add
    #[serde(skip_serializing_if = "Option::is_none")]
    pub add: Option<Vec<i64>>,
    /// User IDs to remove
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rem: Option<Vec<i64>>,
}

#[derive(Debug, Default, Deserialize, Serialize, JsonSchema)]
pub struct TaskChanges {
    /// New task name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// New description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// New description in markdown
    #[serde(skip_serializing_if = "Option::is_none")]
    pub markdown_description: Option<String>,
    /// New status
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    /// Priority: 1=urgent, 2=high, 3=normal, 4=low
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schemars(range(min = 1, max = 4))]
    pub priority: Option<i64>,
    /// Assignee changes (add/rem)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assignees: Option<AssigneeChanges>,
    /// Due date as Unix timestamp in milliseconds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date_time: Option<bool>,
    /// Start date as Unix timestamp in milliseconds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date_time: Option<bool>,
    /// Time estimate in milliseconds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_estimate: Option<i64>,
    /// Move to new parent task
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,
    /// Archive/unarchive the task
    #[serde(skip_serializing_if = "Option::is_none")]
    pub archived: Option<bool>,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct UpdateTaskArgs {
    /// ClickUp task ID
    pub task_id: String,
    #[serde(flatten)]
    pub changes: TaskChanges,
}

impl Contract for UpdateTaskArgs {
    fn check(&self) -> ServiceResult<()> {
        check_priority(self.changes.priority)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum OrderBy {
    Id,
    Created,
    Updated,
    DueDate,
}

impl OrderBy {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderBy::Id => "id",
            OrderBy::Created => "created",
            OrderBy::Updated => "updated",
            OrderBy::DueDate => "due_date",
        }
    }
}

/// Filters shared by list-scoped and workspace-wide task queries.
#[derive(Debug, Default, Deserialize, JsonSchema)]
pub struct TaskFilters {
    /// Page number (0-indexed)
    pub page: Option<u32>,
    pub order_by: Option<OrderBy>,
    /// Reverse sort order
    pub reverse: Option<bool>,
    /// Include subtasks
    pub subtasks: Option<bool>,
    /// Filter by status names
    pub statuses: Option<Vec<String>>,
    /// Include closed tasks
    pub include_closed: Option<bool>,
    /// Filter by assignee IDs
    pub assignees: Option<Vec<String>>,
    /// Due date greater than (ms)
    pub due_date_gt: Option<i64>,
    /// Due date less than (ms)
    pub due_date_lt: Option<i64>,
    /// Created after (ms)
    pub date_created_gt: Option<i64>,
    /// Created before (ms)
    pub date_created_lt: Option<i64>,
    /// Updated after (ms)
    pub date_updated_gt: Option<i64>,
    /// Updated before (ms)
    pub date_updated_lt: Option<i64>,
    pub include_markdown_description: Option<bool>,
}

impl TaskFilters {
    /// Every supplied scalar goes out in string form, `false` included.
    fn apply(&self, query: &mut Query) {
        query
            .set_opt("page", self.page.map(|v| v.to_string()))
            .set_opt("order_by", self.order_by.map(|v| v.as_str()))
            .set_opt("reverse", self.reverse.map(|v| v.to_string()))
            .set_opt("subtasks", self.subtasks.map(|v| v.to_string()))
            .set_opt("include_closed", self.include_closed.map(|v| v.to_string()))
            .set_opt("due_date_gt", self.due_date_gt.map(|v| v.to_string()))
            .set_opt("due_date_lt", self.due_date_lt.map(|v| v.to_string()))
            .set_opt("date_created_gt", self.date_created_gt.map(|v| v.to_string()))
            .set_opt("date_created_lt", self.date_created_lt.map(|v| v.to_string()))
            .set_opt("date_updated_gt", self.date_updated_gt.map(|v| v.to_string()))
            .set_opt("date_updated_lt", self.date_updated_lt.map(|v| v.to_string()))
            .set_opt(
                "include_markdown_description",
                self.include_markdown_description.map(|v| v.to_string()),
            );
        if let Some(statuses) = &self.statuses {
            query.append_all("statuses[]", statuses.iter().cloned());
        }
        if let Some(assignees) = &self.assignees {
            query.append_all("assignees[]", assignees.iter().cloned());
        }
    }
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct GetTasksArgs {
    /// ClickUp list ID
    pub list_id: String,
    /// Include archived tasks
    pub archived: Option<bool>,
    #[serde(flatten)]
    pub filters: TaskFilters,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct SearchTasksArgs {
    /// ClickUp workspace/team ID
    pub team_id: String,
    #[serde(flatten)]
    pub filters: TaskFilters,
    /// Filter by list IDs
    pub list_ids: Option<Vec<String>>,
    /// Filter by space IDs
    pub space_ids: Option<Vec<String>>,
    /// Filter by folder IDs
    pub folder_ids: Option<Vec<String>>,
    /// Filter by project IDs
    pub project_ids: Option<Vec<String>>,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct SetCustomFieldArgs {
    /// ClickUp task ID
    pub task_id: String,
    /// Custom field ID
    pub field_id: String,
    pub value: CustomFieldValue,
}

unchecked_contract!(
    GetTaskArgs,
    TaskIdArgs,
    GetTasksArgs,
    SearchTasksArgs,
    SetCustomFieldArgs,
);

pub async fn get_task(client: &ClickUpClient, args: GetTaskArgs) -> ServiceResult<Value> {
    let mut query = Query::new();
    if args.include_subtasks == Some(true) {
        query.set("include_subtasks", "true");
    }
    if args.include_markdown_description == Some(true) {
        query.set("include_markdown_description", "true");
    }
    let data = client
        .get(&format!("/task/{}", args.task_id), Some(&query))
        .await?;
    Ok(reduce_task(&data))
}

pub async fn create_task(client: &ClickUpClient, args: CreateTaskArgs) -> ServiceResult<Value> {
    let body = serde_json::to_value(&args.task)?;
    let data = client
        .post(&format!("/list/{}/task", args.list_id), Some(&body))
        .await?;
    Ok(reduce_task(&data))
}

pub async fn update_task(client: &ClickUpClient, args: UpdateTaskArgs) -> ServiceResult<Value> {
    let body = serde_json::to_value(&args.changes)?;
    let data = client
        .put(&format!("/task/{}", args.task_id), Some(&body))
        .await?;
    Ok(reduce_task(&data))
}

pub async fn get_tasks(client: &ClickUpClient, args: GetTasksArgs) -> ServiceResult<Value> {
    let mut query = Query::new();
    query.set_opt("archived", args.archived.map(|v| v.to_string()));
    args.filters.apply(&mut query);

    let data = client
        .get(&format!("/list/{}/task", args.list_id), Some(&query))
        .await?;
    Ok(reduce_array(&data, "tasks", reduce_task))
}

pub async fn search_tasks(client: &ClickUpClient, args: SearchTasksArgs) -> ServiceResult<Value> {
    let mut query = Query::new();
    args.filters.apply(&mut query);
    for (key, ids) in [
        ("list_ids[]", &args.list_ids),
        ("space_ids[]", &args.space_ids),
        ("folder_ids[]", &args.folder_ids),
        ("project_ids[]", &args.project_ids),
    ] {
        if let Some(ids) = ids {
            query.append_all(key, ids.iter().cloned());
        }
    }

    let data = client
        .get(&format!("/team/{}/task", args.team_id), Some(&query))
        .await?;
    Ok(reduce_array(&data, "tasks", reduce_task))
}

/// Custom fields can't be changed through `update_task`, only here.
pub async fn set_custom_field(
    client: &ClickUpClient,
    args: SetCustomFieldArgs,
) -> ServiceResult<Value> {
    let body = json!({ "value": args.value });
    client
        .post(
            &format!("/task/{}/field/{}", args.task_id, args.field_id),
            Some(&body),
        )
        .await
}

pub async fn delete_task(client: &ClickUpClient, args: TaskIdArgs) -> ServiceResult<Value> {
    client.delete(&format!("/task/{}", args.task_id), None).await?;
    Ok(confirmation("deleted", &[("task_id", args.task_id.as_str())]))
}
