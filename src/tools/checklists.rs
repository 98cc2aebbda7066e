use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

use crate::client::ClickUpClient;
use crate::error::ServiceResult;
use crate::tools::confirmation;
use crate::unchecked_contract;

#[derive(Debug, Deserialize, JsonSchema)]
pub struct CreateChecklistArgs {
    /// ClickUp task ID
    pub task_id: String,
    /// Checklist name
    pub name: String,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct EditChecklistArgs {
    /// Checklist ID
    pub checklist_id: String,
    /// New checklist name
    pub name: Option<String>,
    /// New position (0-indexed)
    pub position: Option<i64>,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct ChecklistIdArgs {
    /// Checklist ID
    pub checklist_id: String,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct CreateChecklistItemArgs {
    /// Checklist ID
    pub checklist_id: String,
    /// Item name
    pub name: String,
    /// User ID to assign
    pub assignee: Option<i64>,
}

#[derive(Debug, Default, Deserialize, Serialize, JsonSchema)]
pub struct ChecklistItemChanges {
    /// New item name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Mark as resolved/unresolved
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resolved: Option<bool>,
    /// User ID to assign
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assignee: Option<i64>,
    /// Parent checklist item ID (to nest items)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct EditChecklistItemArgs {
    /// Checklist ID
    pub checklist_id: String,
    /// Checklist item ID
    pub checklist_item_id: String,
    #[serde(flatten)]
    pub changes: ChecklistItemChanges,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct ChecklistItemIdArgs {
    /// Checklist ID
    pub checklist_id: String,
    /// Checklist item ID
    pub checklist_item_id: String,
}

unchecked_contract!(
    CreateChecklistArgs,
    EditChecklistArgs,
    ChecklistIdArgs,
    CreateChecklistItemArgs,
    EditChecklistItemArgs,
    ChecklistItemIdArgs,
);

pub async fn create_checklist(
    client: &ClickUpClient,
    args: CreateChecklistArgs,
) -> ServiceResult<Value> {
    let body = json!({ "name": args.name });
    client
        .post(&format!("/task/{}/checklist", args.task_id), Some(&body))
        .await
}

pub async fn edit_checklist(client: &ClickUpClient, args: EditChecklistArgs) -> ServiceResult<Value> {
    let mut body = Map::new();
    if let Some(name) = args.name {
        body.insert("name".into(), json!(name));
    }
    if let Some(position) = args.position {
        body.insert("position".into(), json!(position));
    }
    client
        .put(
            &format!("/checklist/{}", args.checklist_id),
            Some(&Value::Object(body)),
        )
        .await
}

pub async fn delete_checklist(client: &ClickUpClient, args: ChecklistIdArgs) -> ServiceResult<Value> {
    client
        .delete(&format!("/checklist/{}", args.checklist_id), None)
        .await?;
    Ok(confirmation(
        "deleted",
        &[("checklist_id", args.checklist_id.as_str())],
    ))
}

pub async fn create_checklist_item(
    client: &ClickUpClient,
    args: CreateChecklistItemArgs,
) -> ServiceResult<Value> {
    let mut body = Map::new();
    body.insert("name".into(), json!(args.name));
    if let Some(assignee) = args.assignee {
        body.insert("assignee".into(), json!(assignee));
    }
    client
        .post(
            &format!("/checklist/{}/checklist_item", args.checklist_id),
            Some(&Value::Object(body)),
        )
        .await
}

pub async fn edit_checklist_item(
    client: &ClickUpClient,
    args: EditChecklistItemArgs,
) -> ServiceResult<Value> {
    let body = serde_json::to_value(&args.changes)?;
    let path = format!(
        "/checklist/{}/checklist_item/{}",
        args.checklist_id, args.checklist_item_id
    );
    client.put(&path, Some(&body)).await
}

pub async fn delete_checklist_item(
    client: &ClickUpClient,
    args: ChecklistItemIdArgs,
) -> ServiceResult<Value> {
    let path = format!(
        "/checklist/{}/checklist_item/{}",
        args.checklist_id, args.checklist_item_id
    );
    client.delete(&path, None).await?;
    Ok(confirmation(
        "deleted",
        &[
            ("checklist_id", args.checklist_id.as_str()),
            ("checklist_item_id", args.checklist_item_id.as_str()),
        ],
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::Method;
    use crate::testing::{MockTransport, body_of, mock_client};

    #[tokio::test]
    async fn edit_checklist_sends_only_supplied_fields() {
        let (client, transport) = mock_client(MockTransport::new());

        edit_checklist(
            &client,
            EditChecklistArgs {
                checklist_id: "c1".into(),
                name: None,
                position: Some(0),
            },
        )
        .await
        .unwrap();

        let request = transport.single_request();
        assert_eq!(request.path, "/checklist/c1");
        assert_eq!(body_of(&request), json!({ "position": 0 }));
    }

    #[tokio::test]
    async fn create_item_returns_upstream_checklist() {
        let transport = MockTransport::new().respond(
            Method::Post,
            "/checklist/c1/checklist_item",
            200,
            r#"{"checklist":{"id":"c1","items":[{"id":"i1","name":"Write docs"}]}}"#,
        );
        let (client, transport) = mock_client(transport);

        let result = create_checklist_item(
            &client,
            CreateChecklistItemArgs {
                checklist_id: "c1".into(),
                name: "Write docs".into(),
                assignee: Some(42),
            },
        )
        .await
        .unwrap();

        assert_eq!(
            body_of(&transport.single_request()),
            json!({ "name": "Write docs", "assignee": 42 })
        );
        assert_eq!(result["checklist"]["items"][0]["id"], "i1");
    }

    #[tokio::test]
    async fn edit_item_targets_nested_route() {
        let (client, transport) = mock_client(MockTransport::new());

        let args: EditChecklistItemArgs = serde_json::from_value(json!({
            "checklist_id": "c1",
            "checklist_item_id": "i1",
            "resolved": true
        }))
        .unwrap();
        edit_checklist_item(&client, args).await.unwrap();

        let request = transport.single_request();
        assert_eq!(request.method, Method::Put);
        assert_eq!(request.path, "/checklist/c1/checklist_item/i1");
        assert_eq!(body_of(&request), json!({ "resolved": true }));
    }

    #[tokio::test]
    async fn deletes_confirm_with_ids() {
        let (client, transport) = mock_client(MockTransport::new());

        let item = delete_checklist_item(
            &client,
            ChecklistItemIdArgs {
                checklist_id: "c1".into(),
                checklist_item_id: "i1".into(),
            },
        )
        .await
        .unwrap();
        let list = delete_checklist(&client, ChecklistIdArgs { checklist_id: "c1".into() })
            .await
            .unwrap();

        assert_eq!(
            item,
            json!({ "deleted": true, "checklist_id": "c1", "checklist_item_id": "i1" })
        );
        assert_eq!(list, json!({ "deleted": true, "checklist_id": "c1" }));
        assert!(transport.requests().iter().all(|r| r.method == Method::Delete));
    }
}
