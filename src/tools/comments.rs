use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::client::{ClickUpClient, Query};
use crate::error::ServiceResult;
use crate::reduce::reduce_comment_response;
use crate::tools::non_empty;
use crate::unchecked_contract;

#[derive(Debug, Deserialize, Serialize, JsonSchema)]
pub struct NewComment {
    /// Comment text
    pub comment_text: String,
    /// User ID to assign with this comment
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assignee: Option<i64>,
    /// Notify all assignees (default true)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notify_all: Option<bool>,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct CreateCommentArgs {
    /// ClickUp task ID
    pub task_id: String,
    #[serde(flatten)]
    pub comment: NewComment,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct GetCommentsArgs {
    /// ClickUp task ID
    pub task_id: String,
    /// Start offset for pagination
    pub start: Option<i64>,
    /// Comment ID to start from
    pub start_id: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize, JsonSchema)]
pub struct CommentChanges {
    /// New comment text
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment_text: Option<String>,
    /// New assignee user ID
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assignee: Option<i64>,
    /// Mark as resolved/unresolved
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resolved: Option<bool>,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct UpdateCommentArgs {
    /// Comment ID
    pub comment_id: String,
    #[serde(flatten)]
    pub changes: CommentChanges,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct CreateReplyArgs {
    /// Comment ID
    pub comment_id: String,
    /// Reply text
    pub comment_text: String,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct CommentIdArgs {
    /// Comment ID
    pub comment_id: String,
}

unchecked_contract!(
    CreateCommentArgs,
    GetCommentsArgs,
    UpdateCommentArgs,
    CreateReplyArgs,
    CommentIdArgs,
);

pub async fn create_comment(client: &ClickUpClient, args: CreateCommentArgs) -> ServiceResult<Value> {
    let body = serde_json::to_value(&args.comment)?;
    let data = client
        .post(&format!("/task/{}/comment", args.task_id), Some(&body))
        .await?;
    Ok(reduce_comment_response(&data))
}

/// Comments come back 25 per page, newest first.
pub async fn get_comments(client: &ClickUpClient, args: GetCommentsArgs) -> ServiceResult<Value> {
    let mut query = Query::new();
    query
        .set_opt("start", args.start.map(|v| v.to_string()))
        .set_opt("start_id", non_empty(&args.start_id));
    client
        .get(&format!("/task/{}/comment", args.task_id), Some(&query))
        .await
}

pub async fn update_comment(client: &ClickUpClient, args: UpdateCommentArgs) -> ServiceResult<Value> {
    let body = serde_json::to_value(&args.changes)?;
    client
        .put(&format!("/comment/{}", args.comment_id), Some(&body))
        .await
}

pub async fn create_reply(client: &ClickUpClient, args: CreateReplyArgs) -> ServiceResult<Value> {
    let body = json!({ "comment_text": args.comment_text });
    let data = client
        .post(&format!("/comment/{}/reply", args.comment_id), Some(&body))
        .await?;
    Ok(reduce_comment_response(&data))
}

pub async fn get_replies(client: &ClickUpClient, args: CommentIdArgs) -> ServiceResult<Value> {
    client
        .get(&format!("/comment/{}/reply", args.comment_id), None)
        .await
}
