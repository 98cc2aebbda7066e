//! Task dependencies (waiting on / blocking) and plain task links.

use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::{Map, Value, json};

use crate::client::{ClickUpClient, Query};
use crate::error::{ServiceError, ServiceResult};
use crate::reduce::{reduce_task, truthy};
use crate::tools::{confirmation, non_empty};
use crate::unchecked_contract;

#[derive(Debug, Deserialize, JsonSchema)]
pub struct DependencyArgs {
    /// The task the dependency belongs to
    pub task_id: String,
    /// Task ID this task is waiting on
    pub depends_on: Option<String>,
    /// Task ID that this task blocks
    pub dependency_of: Option<String>,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct TaskLinkArgs {
    /// First task ID
    pub task_id: String,
    /// Second task ID
    pub links_to: String,
}

unchecked_contract!(DependencyArgs, TaskLinkArgs);

impl DependencyArgs {
    /// Non-empty `(key, task id)` pairs; at least one is required.
    fn targets(&self) -> ServiceResult<Vec<(&'static str, &str)>> {
        let targets: Vec<_> = [
            ("depends_on", non_empty(&self.depends_on)),
            ("dependency_of", non_empty(&self.dependency_of)),
        ]
        .into_iter()
        .filter_map(|(key, id)| id.map(|id| (key, id)))
        .collect();

        if targets.is_empty() {
            return Err(ServiceError::usage(
                "Provide either depends_on or dependency_of",
            ));
        }
        Ok(targets)
    }
}

pub async fn add_dependency(client: &ClickUpClient, args: DependencyArgs) -> ServiceResult<Value> {
    let mut body = Map::new();
    for (key, id) in args.targets()? {
        body.insert(key.to_string(), json!(id));
    }
    client
        .post(
            &format!("/task/{}/dependency", args.task_id),
            Some(&Value::Object(body)),
        )
        .await
}

/// ClickUp reads the dependency to remove from the query string, not a body.
pub async fn delete_dependency(
    client: &ClickUpClient,
    args: DependencyArgs,
) -> ServiceResult<Value> {
    let mut query = Query::new();
    for (key, id) in args.targets()? {
        query.set(key, id);
    }
    client
        .delete(&format!("/task/{}/dependency", args.task_id), Some(&query))
        .await?;
    Ok(confirmation("deleted", &[("task_id", args.task_id.as_str())]))
}

pub async fn add_task_link(client: &ClickUpClient, args: TaskLinkArgs) -> ServiceResult<Value> {
    let data = client
        .post(&format!("/task/{}/link/{}", args.task_id, args.links_to), None)
        .await?;
    match data.get("task") {
        task @ Some(linked) if truthy(task) => Ok(json!({ "task": reduce_task(linked) })),
        _ => Ok(confirmation(
            "linked",
            &[
                ("task_id", args.task_id.as_str()),
                ("links_to", args.links_to.as_str()),
            ],
        )),
    }
}

pub async fn delete_task_link(client: &ClickUpClient, args: TaskLinkArgs) -> ServiceResult<Value> {
    client
        .delete(
            &format!("/task/{}/link/{}", args.task_id, args.links_to),
            None,
        )
        .await?;
    Ok(confirmation(
        "deleted",
        &[
            ("task_id", args.task_id.as_str()),
            ("links_to", args.links_to.as_str()),
        ],
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::Method;
    use crate::testing::{MockTransport, body_of, mock_client};

    fn dependency(depends_on: Option<&str>, dependency_of: Option<&str>) -> DependencyArgs {
        DependencyArgs {
            task_id: "86a".into(),
            depends_on: depends_on.map(String::from),
            dependency_of: dependency_of.map(String::from),
        }
    }

    #[tokio::test]
    async fn add_dependency_without_target_makes_no_call() {
        let (client, transport) = mock_client(MockTransport::new());

        let err = add_dependency(&client, dependency(None, None))
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Usage(_)));

        let err = add_dependency(&client, dependency(Some(""), None))
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Usage(_)));
        assert!(transport.requests().is_empty());
    }

    #[tokio::test]
    async fn add_dependency_posts_supplied_ids() {
        let (client, transport) = mock_client(MockTransport::new());

        add_dependency(&client, dependency(Some("86b"), None))
            .await
            .unwrap();

        let request = transport.single_request();
        assert_eq!(request.method, Method::Post);
        assert_eq!(request.path, "/task/86a/dependency");
        assert_eq!(body_of(&request), json!({ "depends_on": "86b" }));
    }

    #[tokio::test]
    async fn delete_dependency_uses_query_parameters() {
        let (client, transport) = mock_client(MockTransport::new());

        let result = delete_dependency(&client, dependency(None, Some("86c")))
            .await
            .unwrap();

        let request = transport.single_request();
        assert_eq!(request.method, Method::Delete);
        assert!(request.body.is_none());
        assert_eq!(request.query.values("dependency_of"), vec!["86c"]);
        assert!(request.query.values("depends_on").is_empty());
        assert_eq!(result, json!({ "deleted": true, "task_id": "86a" }));
    }

    #[tokio::test]
    async fn delete_dependency_without_target_makes_no_call() {
        let (client, transport) = mock_client(MockTransport::new());

        assert!(delete_dependency(&client, dependency(None, Some(""))).await.is_err());
        assert!(transport.requests().is_empty());
    }

    #[tokio::test]
    async fn task_link_reduces_returned_task() {
        let transport = MockTransport::new().respond(
            Method::Post,
            "/task/86a/link/86b",
            200,
            r#"{"task":{"id":"86a","name":"A","watchers":[],"linked_tasks":[{"task_id":"86a","link_id":"86b"}]}}"#,
        );
        let (client, transport) = mock_client(transport);

        let result = add_task_link(
            &client,
            TaskLinkArgs {
                task_id: "86a".into(),
                links_to: "86b".into(),
            },
        )
        .await
        .unwrap();

        assert!(transport.single_request().body.is_none());
        assert_eq!(
            result,
            json!({
                "task": {
                    "id": "86a",
                    "name": "A",
                    "linked_tasks": [{ "task_id": "86a", "link_id": "86b" }]
                }
            })
        );
    }

    #[tokio::test]
    async fn task_link_confirms_when_no_task_returned() {
        let (client, _) = mock_client(MockTransport::new());

        let result = add_task_link(
            &client,
            TaskLinkArgs {
                task_id: "86a".into(),
                links_to: "86b".into(),
            },
        )
        .await
        .unwrap();
        assert_eq!(
            result,
            json!({ "linked": true, "task_id": "86a", "links_to": "86b" })
        );
    }
}
