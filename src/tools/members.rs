use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::{Value, json};

use crate::client::ClickUpClient;
use crate::error::ServiceResult;
use crate::reduce::{reduce_list_member, reduce_member};
use crate::unchecked_contract;

#[derive(Debug, Deserialize, JsonSchema)]
pub struct ListMembersArgs {
    /// ClickUp list ID
    pub list_id: String,
}

unchecked_contract!(ListMembersArgs);

fn array<'a>(value: &'a Value, key: &str) -> &'a [Value] {
    value
        .get(key)
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default()
}

/// Members of every workspace, each tagged with the workspace it belongs to.
pub async fn get_workspace_members(client: &ClickUpClient) -> ServiceResult<Value> {
    let data = client.get("/team", None).await?;

    let members: Vec<Value> = array(&data, "teams")
        .iter()
        .flat_map(|team| {
            array(team, "members").iter().map(move |member| {
                let mut tagged = serde_json::Map::new();
                if let Some(id) = team.get("id") {
                    tagged.insert("workspace_id".into(), id.clone());
                }
                if let Some(name) = team.get("name") {
                    tagged.insert("workspace_name".into(), name.clone());
                }
                if let Value::Object(fields) = member {
                    for (key, value) in fields {
                        tagged.insert(key.clone(), value.clone());
                    }
                }
                reduce_member(&Value::Object(tagged))
            })
        })
        .collect();

    Ok(json!({ "members": members }))
}

pub async fn get_list_members(client: &ClickUpClient, args: ListMembersArgs) -> ServiceResult<Value> {
    let data = client
        .get(&format!("/list/{}/member", args.list_id), None)
        .await?;
    let members: Vec<Value> = array(&data, "members")
        .iter()
        .map(reduce_list_member)
        .collect();
    Ok(json!({ "members": members }))
}
