//! Response slimming
//!
//! ClickUp responses are large and deeply nested. Each function here keeps a
//! fixed allow-list of fields for one resource family and drops the rest.
//! Fields missing from the source stay missing in the output. Anything that
//! is not a JSON object is handed back untouched.

use serde_json::{Map, Value};

type Record = Map<String, Value>;

/// JavaScript-style truthiness, used where ClickUp fields fall back on each
/// other when empty.
pub(crate) fn truthy(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Number(n)) => n.as_f64().is_some_and(|f| f != 0.0),
        Some(Value::Array(_)) | Some(Value::Object(_)) => true,
    }
}

fn copy(out: &mut Record, src: &Record, keys: &[&str]) {
    for key in keys {
        if let Some(value) = src.get(*key) {
            out.insert((*key).to_string(), value.clone());
        }
    }
}

fn insert_opt(out: &mut Record, key: &str, value: Option<Value>) {
    if let Some(value) = value {
        out.insert(key.to_string(), value);
    }
}

/// Applies `f` to `src[key]`, dropping the key when it is absent.
fn map_field(src: &Record, key: &str, f: impl Fn(&Value) -> Value) -> Option<Value> {
    src.get(key).map(f)
}

/// Maps `f` over an array. A non-array is returned as is.
fn map_items(value: &Value, f: impl Fn(&Value) -> Value) -> Value {
    match value {
        Value::Array(items) => Value::Array(items.iter().map(f).collect()),
        other => other.clone(),
    }
}

fn non_empty_array<'a>(src: &'a Record, key: &str) -> Option<&'a Vec<Value>> {
    match src.get(key) {
        Some(Value::Array(items)) if !items.is_empty() => Some(items),
        _ => None,
    }
}

/// `{id, name}` for list and folder references embedded in a task.
fn reduce_ref(value: &Value) -> Value {
    let Value::Object(src) = value else {
        return value.clone();
    };
    let mut out = Record::new();
    copy(&mut out, src, &["id", "name"]);
    Value::Object(out)
}

pub fn reduce_user(value: &Value) -> Value {
    let Value::Object(src) = value else {
        return value.clone();
    };
    let mut out = Record::new();
    copy(&mut out, src, &["id", "username", "email"]);
    Value::Object(out)
}

pub fn reduce_status(value: &Value) -> Value {
    let Value::Object(src) = value else {
        return value.clone();
    };
    let mut out = Record::new();
    copy(&mut out, src, &["status", "type", "color"]);
    Value::Object(out)
}

fn reduce_statuses(value: &Value) -> Value {
    map_items(value, reduce_status)
}

pub fn reduce_space(value: &Value) -> Value {
    let Value::Object(src) = value else {
        return value.clone();
    };
    let mut out = Record::new();
    copy(&mut out, src, &["id", "name", "private", "archived"]);
    insert_opt(&mut out, "statuses", map_field(src, "statuses", reduce_statuses));
    if let Some(Value::Array(members)) = src.get("members") {
        let members = members
            .iter()
            .map(|member| match member {
                Value::Object(m) => m.get("user").map(reduce_user).unwrap_or(Value::Null),
                other => other.clone(),
            })
            .collect();
        out.insert("members".to_string(), Value::Array(members));
    }
    Value::Object(out)
}

pub fn reduce_list(value: &Value) -> Value {
    let Value::Object(src) = value else {
        return value.clone();
    };
    let mut out = Record::new();
    copy(
        &mut out,
        src,
        &["id", "name", "content", "task_count", "archived", "space"],
    );
    insert_opt(&mut out, "statuses", map_field(src, "statuses", reduce_statuses));
    Value::Object(out)
}

pub fn reduce_folder(value: &Value) -> Value {
    let Value::Object(src) = value else {
        return value.clone();
    };
    let mut out = Record::new();
    copy(
        &mut out,
        src,
        &["id", "name", "archived", "task_count", "space"],
    );
    insert_opt(
        &mut out,
        "lists",
        map_field(src, "lists", |lists| map_items(lists, reduce_list)),
    );
    Value::Object(out)
}

pub fn reduce_task(value: &Value) -> Value {
    let Value::Object(src) = value else {
        return value.clone();
    };
    let mut out = Record::new();
    copy(&mut out, src, &["id", "custom_id", "name"]);

    let description = if truthy(src.get("text_content")) {
        src.get("text_content")
    } else {
        src.get("description")
    };
    insert_opt(&mut out, "description", description.cloned());

    insert_opt(
        &mut out,
        "status",
        map_field(src, "status", |status| match status {
            Value::Object(s) => {
                let mut slim = Record::new();
                copy(&mut slim, s, &["status", "type"]);
                Value::Object(slim)
            }
            other => other.clone(),
        }),
    );
    copy(&mut out, src, &["archived"]);
    insert_opt(&mut out, "creator", map_field(src, "creator", reduce_user));
    insert_opt(
        &mut out,
        "assignees",
        map_field(src, "assignees", |users| map_items(users, reduce_user)),
    );
    insert_opt(
        &mut out,
        "tags",
        map_field(src, "tags", |tags| {
            map_items(tags, |tag| match tag {
                Value::Object(t) => t.get("name").cloned().unwrap_or(Value::Null),
                other => other.clone(),
            })
        }),
    );
    insert_opt(
        &mut out,
        "priority",
        map_field(src, "priority", |priority| match priority {
            Value::Object(p) => {
                let mut slim = Record::new();
                copy(&mut slim, p, &["id", "priority"]);
                Value::Object(slim)
            }
            other => other.clone(),
        }),
    );
    copy(
        &mut out,
        src,
        &[
            "due_date",
            "start_date",
            "time_estimate",
            "date_created",
            "date_updated",
            "date_closed",
            "parent",
            "url",
        ],
    );
    insert_opt(&mut out, "list", map_field(src, "list", reduce_ref));
    insert_opt(&mut out, "folder", map_field(src, "folder", reduce_ref));

    for key in ["checklists", "dependencies", "linked_tasks", "custom_fields"] {
        if let Some(items) = non_empty_array(src, key) {
            out.insert(key.to_string(), Value::Array(items.clone()));
        }
    }
    if let Some(subtasks) = non_empty_array(src, "subtasks") {
        out.insert(
            "subtasks".to_string(),
            Value::Array(subtasks.iter().map(reduce_task).collect()),
        );
    }
    Value::Object(out)
}

/// Comment create/reply responses carry a version blob nobody needs.
pub fn reduce_comment_response(value: &Value) -> Value {
    let Value::Object(src) = value else {
        return value.clone();
    };
    let mut out = Record::new();
    copy(&mut out, src, &["id", "date"]);
    Value::Object(out)
}

/// Workspace member, optionally tagged with `workspace_id`/`workspace_name`.
pub fn reduce_member(value: &Value) -> Value {
    let Value::Object(src) = value else {
        return value.clone();
    };
    let mut out = Record::new();
    for key in ["workspace_id", "workspace_name"] {
        if truthy(src.get(key)) {
            copy(&mut out, src, &[key]);
        }
    }
    match src.get("user") {
        Some(Value::Object(user)) => {
            copy(&mut out, user, &["id", "username", "email"]);
            let role = if truthy(user.get("role_key")) {
                user.get("role_key")
            } else {
                user.get("role")
            };
            insert_opt(&mut out, "role", role.cloned());
        }
        _ => {
            for (key, value) in src {
                out.insert(key.clone(), value.clone());
            }
        }
    }
    Value::Object(out)
}

pub fn reduce_list_member(value: &Value) -> Value {
    reduce_user(value)
}

/// Reduces every item of `envelope[key]`, leaving sibling fields alone.
pub fn reduce_array(envelope: &Value, key: &str, f: impl Fn(&Value) -> Value) -> Value {
    let Value::Object(src) = envelope else {
        return envelope.clone();
    };
    let Some(Value::Array(items)) = src.get(key) else {
        return envelope.clone();
    };
    let mut out = src.clone();
    out.insert(
        key.to_string(),
        Value::Array(items.iter().map(f).collect()),
    );
    Value::Object(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const REDUCERS: &[fn(&Value) -> Value] = &[
        reduce_user,
        reduce_status,
        reduce_space,
        reduce_list,
        reduce_folder,
        reduce_task,
        reduce_comment_response,
        reduce_member,
        reduce_list_member,
    ];

    fn full_task() -> Value {
        json!({
            "id": "86abc",
            "custom_id": null,
            "name": "Ship it",
            "text_content": "plain body",
            "description": "rich body",
            "status": { "status": "in progress", "type": "custom", "color": "#fff", "orderindex": 2 },
            "archived": false,
            "creator": { "id": 1, "username": "ada", "email": "ada@example.com", "color": "#000", "profilePicture": "x" },
            "assignees": [
                { "id": 2, "username": "bob", "email": "bob@example.com", "initials": "B" },
                { "id": 3, "username": "cy", "email": "cy@example.com", "initials": "C" }
            ],
            "tags": [{ "name": "backend", "tag_fg": "#fff", "tag_bg": "#000" }],
            "priority": { "id": "2", "priority": "high", "color": "#ffcc00", "orderindex": "2" },
            "due_date": "1700000000000",
            "date_created": "1690000000000",
            "url": "https://app.clickup.com/t/86abc",
            "list": { "id": "900", "name": "Sprint", "access": true },
            "folder": { "id": "800", "name": "Eng", "hidden": false },
            "space": { "id": "700" },
            "watchers": [{ "id": 1 }],
            "checklists": [],
            "dependencies": [{ "task_id": "86abc", "depends_on": "86xyz" }],
            "custom_fields": [],
            "subtasks": [{ "id": "86sub", "name": "child", "watchers": [], "checklists": [] }]
        })
    }

    #[test]
    fn non_records_pass_through_every_reducer() {
        let inputs = [
            Value::Null,
            json!(42),
            json!("text"),
            json!(true),
            json!([{ "id": 1 }, 2]),
        ];
        for reducer in REDUCERS {
            for input in &inputs {
                assert_eq!(&reducer(input), input);
            }
        }
    }

    #[test]
    fn task_keeps_essentials_and_drops_noise() {
        let task = reduce_task(&full_task());

        assert_eq!(task["id"], "86abc");
        assert_eq!(task["custom_id"], Value::Null);
        assert_eq!(task["description"], "plain body");
        assert_eq!(task["status"], json!({ "status": "in progress", "type": "custom" }));
        assert_eq!(
            task["creator"],
            json!({ "id": 1, "username": "ada", "email": "ada@example.com" })
        );
        assert_eq!(task["tags"], json!(["backend"]));
        assert_eq!(task["priority"], json!({ "id": "2", "priority": "high" }));
        assert_eq!(task["list"], json!({ "id": "900", "name": "Sprint" }));
        assert_eq!(task["folder"], json!({ "id": "800", "name": "Eng" }));
        assert!(task.get("watchers").is_none());
        assert!(task.get("space").is_none());
        // absent upstream, so absent here
        assert!(task.get("start_date").is_none());
        assert!(task.get("date_closed").is_none());
    }

    #[test]
    fn task_omits_empty_collections_and_keeps_non_empty_ones() {
        let task = reduce_task(&full_task());

        assert!(task.get("checklists").is_none());
        assert!(task.get("custom_fields").is_none());
        assert!(task.get("linked_tasks").is_none());
        assert_eq!(task["dependencies"].as_array().unwrap().len(), 1);

        let subtasks = task["subtasks"].as_array().unwrap();
        assert_eq!(subtasks.len(), 1);
        assert_eq!(subtasks[0], json!({ "id": "86sub", "name": "child" }));
    }

    #[test]
    fn assignees_are_reduced_one_for_one() {
        let task = reduce_task(&full_task());
        let assignees = task["assignees"].as_array().unwrap();
        assert_eq!(assignees.len(), 2);
        for assignee in assignees {
            let keys: Vec<&String> = assignee.as_object().unwrap().keys().collect();
            assert_eq!(keys.len(), 3);
            assert!(assignee.get("initials").is_none());
        }
    }

    #[test]
    fn description_falls_back_when_text_content_is_empty() {
        let task = reduce_task(&json!({ "id": "1", "text_content": "", "description": "fallback" }));
        assert_eq!(task["description"], "fallback");

        let task = reduce_task(&json!({ "id": "1" }));
        assert!(task.get("description").is_none());
    }

    #[test]
    fn space_reduces_statuses_and_member_users() {
        let space = reduce_space(&json!({
            "id": "700",
            "name": "Engineering",
            "private": false,
            "archived": false,
            "color": "#123456",
            "features": { "due_dates": { "enabled": true } },
            "statuses": [{ "id": "s1", "status": "open", "type": "open", "color": "#ddd", "orderindex": 0 }],
            "members": [{ "user": { "id": 1, "username": "ada", "email": "ada@example.com", "initials": "A" } }]
        }));

        assert_eq!(
            space,
            json!({
                "id": "700",
                "name": "Engineering",
                "private": false,
                "archived": false,
                "statuses": [{ "status": "open", "type": "open", "color": "#ddd" }],
                "members": [{ "id": 1, "username": "ada", "email": "ada@example.com" }]
            })
        );
    }

    #[test]
    fn folder_reduces_nested_lists() {
        let folder = reduce_folder(&json!({
            "id": "800",
            "name": "Eng",
            "orderindex": 4,
            "hidden": false,
            "task_count": "12",
            "space": { "id": "700", "name": "Engineering" },
            "lists": [{ "id": "900", "name": "Sprint", "permission_level": "create", "statuses": [] }]
        }));

        assert!(folder.get("hidden").is_none());
        assert_eq!(folder["task_count"], "12");
        assert_eq!(
            folder["lists"],
            json!([{ "id": "900", "name": "Sprint", "statuses": [] }])
        );
    }

    #[test]
    fn member_flattens_nested_user_and_prefers_role_key() {
        let member = reduce_member(&json!({
            "workspace_id": "t1",
            "workspace_name": "Acme",
            "user": { "id": 5, "username": "eve", "email": "eve@example.com", "role": 3, "role_key": "member", "color": "#f00" },
            "invited_by": { "id": 1 }
        }));
        assert_eq!(
            member,
            json!({
                "workspace_id": "t1",
                "workspace_name": "Acme",
                "id": 5,
                "username": "eve",
                "email": "eve@example.com",
                "role": "member"
            })
        );

        let bare = reduce_member(&json!({ "workspace_id": "", "id": 9, "username": "svc" }));
        assert_eq!(bare, json!({ "workspace_id": "", "id": 9, "username": "svc" }));
    }

    #[test]
    fn comment_response_keeps_id_and_date() {
        let comment = reduce_comment_response(&json!({
            "id": 458,
            "hist_id": "26508",
            "date": 1568036964079u64,
            "version": { "object_type": "comment", "data": {} }
        }));
        assert_eq!(comment, json!({ "id": 458, "date": 1568036964079u64 }));
    }

    #[test]
    fn array_wrapper_reduces_only_the_named_key() {
        let envelope = json!({
            "tasks": [{ "id": "1", "watchers": [] }, { "id": "2", "watchers": [] }],
            "last_page": false
        });
        let reduced = reduce_array(&envelope, "tasks", reduce_task);
        assert_eq!(reduced["last_page"], false);
        assert_eq!(reduced["tasks"], json!([{ "id": "1" }, { "id": "2" }]));
    }

    #[test]
    fn array_wrapper_is_a_no_op_without_an_array() {
        let missing = json!({ "last_page": true });
        assert_eq!(reduce_array(&missing, "tasks", reduce_task), missing);

        let not_array = json!({ "tasks": { "id": "1", "watchers": [] } });
        assert_eq!(reduce_array(&not_array, "tasks", reduce_task), not_array);

        let not_object = json!([1, 2]);
        assert_eq!(reduce_array(&not_object, "tasks", reduce_task), not_object);
    }

    #[test]
    fn reducing_twice_changes_nothing() {
        let once = reduce_task(&full_task());
        assert_eq!(reduce_task(&once), once);

        let member = reduce_list_member(&json!({ "id": 1, "username": "ada", "email": null, "color": "#000" }));
        assert_eq!(reduce_list_member(&member), member);
    }
}
