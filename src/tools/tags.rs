use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::{Map, Value, json};

use crate::client::{ClickUpClient, encode_segment};
use crate::error::ServiceResult;
use crate::tools::{confirmation, non_empty};
use crate::unchecked_contract;

#[derive(Debug, Deserialize, JsonSchema)]
pub struct SpaceIdArgs {
    /// ClickUp space ID
    pub space_id: String,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct CreateSpaceTagArgs {
    /// ClickUp space ID
    pub space_id: String,
    /// Tag name
    pub name: String,
    /// Foreground color hex (e.g. '#ffffff')
    pub tag_fg: Option<String>,
    /// Background color hex (e.g. '#000000')
    pub tag_bg: Option<String>,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct EditSpaceTagArgs {
    /// ClickUp space ID
    pub space_id: String,
    /// Current tag name
    pub tag_name: String,
    /// New tag name
    pub new_name: Option<String>,
    /// New foreground color hex
    pub tag_fg: Option<String>,
    /// New background color hex
    pub tag_bg: Option<String>,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct DeleteSpaceTagArgs {
    /// ClickUp space ID
    pub space_id: String,
    /// Tag name to delete
    pub tag_name: String,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct TaskTagArgs {
    /// ClickUp task ID
    pub task_id: String,
    /// Tag name
    pub tag_name: String,
}

unchecked_contract!(
    SpaceIdArgs,
    CreateSpaceTagArgs,
    EditSpaceTagArgs,
    DeleteSpaceTagArgs,
    TaskTagArgs,
);

/// `{ "tag": {...} }` payload; blank values are left out.
fn tag_body(name: Option<&str>, fg: &Option<String>, bg: &Option<String>) -> Value {
    let mut tag = Map::new();
    if let Some(name) = name {
        tag.insert("name".into(), json!(name));
    }
    if let Some(fg) = non_empty(fg) {
        tag.insert("tag_fg".into(), json!(fg));
    }
    if let Some(bg) = non_empty(bg) {
        tag.insert("tag_bg".into(), json!(bg));
    }
    json!({ "tag": tag })
}

pub async fn get_space_tags(client: &ClickUpClient, args: SpaceIdArgs) -> ServiceResult<Value> {
    client
        .get(&format!("/space/{}/tag", args.space_id), None)
        .await
}

pub async fn create_space_tag(
    client: &ClickUpClient,
    args: CreateSpaceTagArgs,
) -> ServiceResult<Value> {
    let body = tag_body(Some(&args.name), &args.tag_fg, &args.tag_bg);
    client
        .post(&format!("/space/{}/tag", args.space_id), Some(&body))
        .await
}

pub async fn edit_space_tag(client: &ClickUpClient, args: EditSpaceTagArgs) -> ServiceResult<Value> {
    let body = tag_body(non_empty(&args.new_name), &args.tag_fg, &args.tag_bg);
    let path = format!(
        "/space/{}/tag/{}",
        args.space_id,
        encode_segment(&args.tag_name)
    );
    client.put(&path, Some(&body)).await
}

pub async fn delete_space_tag(
    client: &ClickUpClient,
    args: DeleteSpaceTagArgs,
) -> ServiceResult<Value> {
    let path = format!(
        "/space/{}/tag/{}",
        args.space_id,
        encode_segment(&args.tag_name)
    );
    client.delete(&path, None).await?;
    Ok(confirmation("deleted", &[("tag_name", args.tag_name.as_str())]))
}

pub async fn add_tag_to_task(client: &ClickUpClient, args: TaskTagArgs) -> ServiceResult<Value> {
    let path = format!("/task/{}/tag/{}", args.task_id, encode_segment(&args.tag_name));
    client.post(&path, None).await
}

pub async fn remove_tag_from_task(
    client: &ClickUpClient,
    args: TaskTagArgs,
) -> ServiceResult<Value> {
    let path = format!("/task/{}/tag/{}", args.task_id, encode_segment(&args.tag_name));
    client.delete(&path, None).await?;
    Ok(confirmation(
        "removed",
        &[
            ("task_id", args.task_id.as_str()),
            ("tag_name", args.tag_name.as_str()),
        ],
    ))
}
