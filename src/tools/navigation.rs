//! Workspace hierarchy: current user, spaces, folders and lists.

use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::{Map, Value, json};

use crate::client::{ClickUpClient, Query};
use crate::error::{ServiceError, ServiceResult};
use crate::reduce::{reduce_array, reduce_folder, reduce_list, reduce_space};
use crate::tools::{Contract, check_priority, confirmation, non_empty};
use crate::unchecked_contract;

#[derive(Debug, Deserialize, JsonSchema)]
pub struct GetSpacesArgs {
    /// ClickUp workspace/team ID
    pub team_id: String,
    /// Include archived spaces (default false)
    pub archived: Option<bool>,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct GetFoldersArgs {
    /// ClickUp space ID
    pub space_id: String,
    /// Include archived folders (default false)
    pub archived: Option<bool>,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct GetListsArgs {
    /// ClickUp folder ID
    pub folder_id: Option<String>,
    /// ClickUp space ID (folderless lists)
    pub space_id: Option<String>,
    /// Include archived lists (default false)
    pub archived: Option<bool>,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct ListIdArgs {
    /// ClickUp list ID
    pub list_id: String,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct CreateListArgs {
    /// Folder to create the list in
    pub folder_id: Option<String>,
    /// Space to create a folderless list in
    pub space_id: Option<String>,
    /// List name
    pub name: String,
    /// List description
    pub content: Option<String>,
    /// Due date as Unix timestamp in milliseconds
    pub due_date: Option<i64>,
    /// Priority: 1=urgent, 2=high, 3=normal, 4=low
    #[schemars(range(min = 1, max = 4))]
    pub priority: Option<i64>,
    /// User ID of the list owner
    pub assignee: Option<i64>,
    /// List color status
    pub status: Option<String>,
}

impl Contract for CreateListArgs {
    fn check(&self) -> ServiceResult<()> {
        check_priority(self.priority)
    }
}

unchecked_contract!(GetSpacesArgs, GetFoldersArgs, GetListsArgs, ListIdArgs);

/// `archived=true` is sent only when requested.
fn archived_query(archived: Option<bool>) -> Query {
    let mut query = Query::new();
    if archived == Some(true) {
        query.set("archived", "true");
    }
    query
}

/// Resolves the folder-or-space parent shared by list operations.
fn list_parent_path(folder_id: &Option<String>, space_id: &Option<String>) -> ServiceResult<String> {
    match (non_empty(folder_id), non_empty(space_id)) {
        (Some(folder), _) => Ok(format!("/folder/{folder}/list")),
        (None, Some(space)) => Ok(format!("/space/{space}/list")),
        (None, None) => Err(ServiceError::usage("Provide either folder_id or space_id")),
    }
}

/// Current user plus every workspace it can see, fetched concurrently.
pub async fn whoami(client: &ClickUpClient) -> ServiceResult<Value> {
    let (user, teams) = futures::try_join!(client.get("/user", None), client.get("/team", None))?;
    Ok(json!({ "user": user, "teams": teams }))
}

pub async fn get_spaces(client: &ClickUpClient, args: GetSpacesArgs) -> ServiceResult<Value> {
    let query = archived_query(args.archived);
    let data = client
        .get(&format!("/team/{}/space", args.team_id), Some(&query))
        .await?;
    Ok(reduce_array(&data, "spaces", reduce_space))
}

pub async fn get_folders(client: &ClickUpClient, args: GetFoldersArgs) -> ServiceResult<Value> {
    let query = archived_query(args.archived);
    let data = client
        .get(&format!("/space/{}/folder", args.space_id), Some(&query))
        .await?;
    Ok(reduce_array(&data, "folders", reduce_folder))
}

pub async fn get_lists(client: &ClickUpClient, args: GetListsArgs) -> ServiceResult<Value> {
    let path = list_parent_path(&args.folder_id, &args.space_id)?;
    let query = archived_query(args.archived);
    let data = client.get(&path, Some(&query)).await?;
    Ok(reduce_array(&data, "lists", reduce_list))
}

pub async fn get_list(client: &ClickUpClient, args: ListIdArgs) -> ServiceResult<Value> {
    let data = client.get(&format!("/list/{}", args.list_id), None).await?;
    Ok(reduce_list(&data))
}

pub async fn create_list(client: &ClickUpClient, args: CreateListArgs) -> ServiceResult<Value> {
    let path = list_parent_path(&args.folder_id, &args.space_id)?;

    let mut body = Map::new();
    body.insert("name".into(), json!(args.name));
    if let Some(content) = args.content {
        body.insert("content".into(), json!(content));
    }
    if let Some(due_date) = args.due_date {
        body.insert("due_date".into(), json!(due_date));
    }
    if let Some(priority) = args.priority {
        body.insert("priority".into(), json!(priority));
    }
    if let Some(assignee) = args.assignee {
        body.insert("assignee".into(), json!(assignee));
    }
    if let Some(status) = args.status {
        body.insert("status".into(), json!(status));
    }

    let data = client.post(&path, Some(&Value::Object(body))).await?;
    Ok(reduce_list(&data))
}

pub async fn delete_list(client: &ClickUpClient, args: ListIdArgs) -> ServiceResult<Value> {
    client.delete(&format!("/list/{}", args.list_id), None).await?;
    Ok(confirmation("deleted", &[("list_id", args.list_id.as_str())]))
}
