use std::future::Future;

use rmcp::{
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::*,
    tool, tool_handler, tool_router,
};
use serde_json::Value;

use crate::client::ClickUpClient;
use crate::config::ClickUpConfig;
use crate::error::{ServiceError, ServiceResult};
use crate::tools::checklists::{
    self, ChecklistIdArgs, ChecklistItemIdArgs, CreateChecklistArgs, CreateChecklistItemArgs,
    EditChecklistArgs, EditChecklistItemArgs,
};
use crate::tools::comments::{
    self, CommentIdArgs, CreateCommentArgs, CreateReplyArgs, GetCommentsArgs, UpdateCommentArgs,
};
use crate::tools::dependencies::{self, DependencyArgs, TaskLinkArgs};
use crate::tools::members::{self, ListMembersArgs};
use crate::tools::navigation::{
    self, CreateListArgs, GetFoldersArgs, GetListsArgs, GetSpacesArgs, ListIdArgs,
};
use crate::tools::tags::{
    self, CreateSpaceTagArgs, DeleteSpaceTagArgs, EditSpaceTagArgs, SpaceIdArgs, TaskTagArgs,
};
use crate::tools::tasks::{
    self, CreateTaskArgs, GetTaskArgs, GetTasksArgs, SearchTasksArgs, SetCustomFieldArgs,
    TaskIdArgs, UpdateTaskArgs,
};
use crate::tools::Contract;

/// Runs the parameter contract, then the handler, and renders the result as
/// one pretty-printed JSON text block.
async fn run<A, F, Fut>(args: A, handler: F) -> Result<CallToolResult, ErrorData>
where
    A: Contract,
    F: FnOnce(A) -> Fut,
    Fut: Future<Output = ServiceResult<Value>>,
{
    args.check()?;
    respond(handler(args).await)
}

fn respond(result: ServiceResult<Value>) -> Result<CallToolResult, ErrorData> {
    let value = result?;
    let text = serde_json::to_string_pretty(&value).map_err(ServiceError::from)?;
    Ok(CallToolResult::success(vec![Content::text(text)]))
}

#[derive(Clone)]
pub struct ClickUpServer {
    client: ClickUpClient,
    pub tool_router: ToolRouter<ClickUpServer>,
}

#[tool_router]
impl ClickUpServer {
    pub fn new(config: ClickUpConfig) -> Self {
        Self::with_client(ClickUpClient::new(config))
    }

    pub fn with_client(client: ClickUpClient) -> Self {
        Self {
            client,
            tool_router: Self::tool_router(),
        }
    }

    /// `(name, description)` of every registered tool, sorted by name.
    pub fn catalog() -> Vec<(String, String)> {
        let mut tools: Vec<(String, String)> = Self::tool_router()
            .list_all()
            .into_iter()
            .map(|tool| {
                let description = tool.description.map(|d| d.to_string()).unwrap_or_default();
                (tool.name.to_string(), description)
            })
            .collect();
        tools.sort();
        tools
    }

    // Navigation

    #[tool(
        name = "clickup_whoami",
        description = "Get current user info and list of workspaces with members"
    )]
    async fn whoami(&self) -> Result<CallToolResult, ErrorData> {
        respond(navigation::whoami(&self.client).await)
    }

    #[tool(name = "clickup_get_spaces", description = "List all spaces in a workspace")]
    async fn get_spaces(
        &self,
        Parameters(args): Parameters<GetSpacesArgs>,
    ) -> Result<CallToolResult, ErrorData> {
        run(args, |args| navigation::get_spaces(&self.client, args)).await
    }

    #[tool(
        name = "clickup_get_folders",
        description = "List folders in a space (includes nested lists)"
    )]
    async fn get_folders(
        &self,
        Parameters(args): Parameters<GetFoldersArgs>,
    ) -> Result<CallToolResult, ErrorData> {
        run(args, |args| navigation::get_folders(&self.client, args)).await
    }

    #[tool(
        name = "clickup_get_lists",
        description = "Get lists in a folder, or folderless lists in a space. Provide either folder_id or space_id."
    )]
    async fn get_lists(
        &self,
        Parameters(args): Parameters<GetListsArgs>,
    ) -> Result<CallToolResult, ErrorData> {
        run(args, |args| navigation::get_lists(&self.client, args)).await
    }

    #[tool(
        name = "clickup_get_list",
        description = "Get a single list's details including its statuses"
    )]
    async fn get_list(
        &self,
        Parameters(args): Parameters<ListIdArgs>,
    ) -> Result<CallToolResult, ErrorData> {
        run(args, |args| navigation::get_list(&self.client, args)).await
    }

    #[tool(
        name = "clickup_create_list",
        description = "Create a list in a folder, or a folderless list in a space. Provide either folder_id or space_id."
    )]
    async fn create_list(
        &self,
        Parameters(args): Parameters<CreateListArgs>,
    ) -> Result<CallToolResult, ErrorData> {
        run(args, |args| navigation::create_list(&self.client, args)).await
    }

    #[tool(
        name = "clickup_delete_list",
        description = "Permanently delete a list and its tasks"
    )]
    async fn delete_list(
        &self,
        Parameters(args): Parameters<ListIdArgs>,
    ) -> Result<CallToolResult, ErrorData> {
        run(args, |args| navigation::delete_list(&self.client, args)).await
    }

    // Tasks

    #[tool(name = "clickup_get_task", description = "Get a task by its ID")]
    async fn get_task(
        &self,
        Parameters(args): Parameters<GetTaskArgs>,
    ) -> Result<CallToolResult, ErrorData> {
        run(args, |args| tasks::get_task(&self.client, args)).await
    }

    #[tool(name = "clickup_create_task", description = "Create a new task in a list")]
    async fn create_task(
        &self,
        Parameters(args): Parameters<CreateTaskArgs>,
    ) -> Result<CallToolResult, ErrorData> {
        run(args, |args| tasks::create_task(&self.client, args)).await
    }

    #[tool(
        name = "clickup_update_task",
        description = "Update a task. Assignees use add/rem arrays, not a flat list."
    )]
    async fn update_task(
        &self,
        Parameters(args): Parameters<UpdateTaskArgs>,
    ) -> Result<CallToolResult, ErrorData> {
        run(args, |args| tasks::update_task(&self.client, args)).await
    }

    #[tool(
        name = "clickup_get_tasks",
        description = "List tasks in a list with optional filters"
    )]
    async fn get_tasks(
        &self,
        Parameters(args): Parameters<GetTasksArgs>,
    ) -> Result<CallToolResult, ErrorData> {
        run(args, |args| tasks::get_tasks(&self.client, args)).await
    }

    #[tool(
        name = "clickup_search_tasks",
        description = "Search tasks across an entire workspace"
    )]
    async fn search_tasks(
        &self,
        Parameters(args): Parameters<SearchTasksArgs>,
    ) -> Result<CallToolResult, ErrorData> {
        run(args, |args| tasks::search_tasks(&self.client, args)).await
    }

    #[tool(
        name = "clickup_set_custom_field",
        description = "Set a custom field value on a task (update_task cannot do this)"
    )]
    async fn set_custom_field(
        &self,
        Parameters(args): Parameters<SetCustomFieldArgs>,
    ) -> Result<CallToolResult, ErrorData> {
        run(args, |args| tasks::set_custom_field(&self.client, args)).await
    }

    #[tool(name = "clickup_delete_task", description = "Permanently delete a task")]
    async fn delete_task(
        &self,
        Parameters(args): Parameters<TaskIdArgs>,
    ) -> Result<CallToolResult, ErrorData> {
        run(args, |args| tasks::delete_task(&self.client, args)).await
    }

    // Tags

    #[tool(name = "clickup_get_space_tags", description = "List all tags in a space")]
    async fn get_space_tags(
        &self,
        Parameters(args): Parameters<SpaceIdArgs>,
    ) -> Result<CallToolResult, ErrorData> {
        run(args, |args| tags::get_space_tags(&self.client, args)).await
    }

    #[tool(name = "clickup_create_space_tag", description = "Create a new tag in a space")]
    async fn create_space_tag(
        &self,
        Parameters(args): Parameters<CreateSpaceTagArgs>,
    ) -> Result<CallToolResult, ErrorData> {
        run(args, |args| tags::create_space_tag(&self.client, args)).await
    }

    #[tool(
        name = "clickup_edit_space_tag",
        description = "Edit (rename or recolor) a tag in a space"
    )]
    async fn edit_space_tag(
        &self,
        Parameters(args): Parameters<EditSpaceTagArgs>,
    ) -> Result<CallToolResult, ErrorData> {
        run(args, |args| tags::edit_space_tag(&self.client, args)).await
    }

    #[tool(name = "clickup_delete_space_tag", description = "Delete a tag from a space")]
    async fn delete_space_tag(
        &self,
        Parameters(args): Parameters<DeleteSpaceTagArgs>,
    ) -> Result<CallToolResult, ErrorData> {
        run(args, |args| tags::delete_space_tag(&self.client, args)).await
    }

    #[tool(name = "clickup_add_tag_to_task", description = "Add a tag to a task")]
    async fn add_tag_to_task(
        &self,
        Parameters(args): Parameters<TaskTagArgs>,
    ) -> Result<CallToolResult, ErrorData> {
        run(args, |args| tags::add_tag_to_task(&self.client, args)).await
    }

    #[tool(name = "clickup_remove_tag_from_task", description = "Remove a tag from a task")]
    async fn remove_tag_from_task(
        &self,
        Parameters(args): Parameters<TaskTagArgs>,
    ) -> Result<CallToolResult, ErrorData> {
        run(args, |args| tags::remove_tag_from_task(&self.client, args)).await
    }

    // Checklists

    #[tool(name = "clickup_create_checklist", description = "Create a checklist on a task")]
    async fn create_checklist(
        &self,
        Parameters(args): Parameters<CreateChecklistArgs>,
    ) -> Result<CallToolResult, ErrorData> {
        run(args, |args| checklists::create_checklist(&self.client, args)).await
    }

    #[tool(name = "clickup_edit_checklist", description = "Rename or reorder a checklist")]
    async fn edit_checklist(
        &self,
        Parameters(args): Parameters<EditChecklistArgs>,
    ) -> Result<CallToolResult, ErrorData> {
        run(args, |args| checklists::edit_checklist(&self.client, args)).await
    }

    #[tool(
        name = "clickup_delete_checklist",
        description = "Delete a checklist and all its items"
    )]
    async fn delete_checklist(
        &self,
        Parameters(args): Parameters<ChecklistIdArgs>,
    ) -> Result<CallToolResult, ErrorData> {
        run(args, |args| checklists::delete_checklist(&self.client, args)).await
    }

    #[tool(name = "clickup_create_checklist_item", description = "Add an item to a checklist")]
    async fn create_checklist_item(
        &self,
        Parameters(args): Parameters<CreateChecklistItemArgs>,
    ) -> Result<CallToolResult, ErrorData> {
        run(args, |args| checklists::create_checklist_item(&self.client, args)).await
    }

    #[tool(
        name = "clickup_edit_checklist_item",
        description = "Edit a checklist item (name, resolved status, assignee, or parent)"
    )]
    async fn edit_checklist_item(
        &self,
        Parameters(args): Parameters<EditChecklistItemArgs>,
    ) -> Result<CallToolResult, ErrorData> {
        run(args, |args| checklists::edit_checklist_item(&self.client, args)).await
    }

    #[tool(name = "clickup_delete_checklist_item", description = "Delete a checklist item")]
    async fn delete_checklist_item(
        &self,
        Parameters(args): Parameters<ChecklistItemIdArgs>,
    ) -> Result<CallToolResult, ErrorData> {
        run(args, |args| checklists::delete_checklist_item(&self.client, args)).await
    }

    // Dependencies & links

    #[tool(
        name = "clickup_add_dependency",
        description = "Add a dependency between tasks (waiting_on or blocking)"
    )]
    async fn add_dependency(
        &self,
        Parameters(args): Parameters<DependencyArgs>,
    ) -> Result<CallToolResult, ErrorData> {
        run(args, |args| dependencies::add_dependency(&self.client, args)).await
    }

    #[tool(
        name = "clickup_delete_dependency",
        description = "Remove a dependency. Note: uses query params, not body."
    )]
    async fn delete_dependency(
        &self,
        Parameters(args): Parameters<DependencyArgs>,
    ) -> Result<CallToolResult, ErrorData> {
        run(args, |args| dependencies::delete_dependency(&self.client, args)).await
    }

    #[tool(name = "clickup_add_task_link", description = "Link two tasks together")]
    async fn add_task_link(
        &self,
        Parameters(args): Parameters<TaskLinkArgs>,
    ) -> Result<CallToolResult, ErrorData> {
        run(args, |args| dependencies::add_task_link(&self.client, args)).await
    }

    #[tool(name = "clickup_delete_task_link", description = "Remove a link between two tasks")]
    async fn delete_task_link(
        &self,
        Parameters(args): Parameters<TaskLinkArgs>,
    ) -> Result<CallToolResult, ErrorData> {
        run(args, |args| dependencies::delete_task_link(&self.client, args)).await
    }

    // Comments

    #[tool(name = "clickup_create_comment", description = "Add a comment to a task")]
    async fn create_comment(
        &self,
        Parameters(args): Parameters<CreateCommentArgs>,
    ) -> Result<CallToolResult, ErrorData> {
        run(args, |args| comments::create_comment(&self.client, args)).await
    }

    #[tool(
        name = "clickup_get_comments",
        description = "Get comments on a task (paginated, 25 per page)"
    )]
    async fn get_comments(
        &self,
        Parameters(args): Parameters<GetCommentsArgs>,
    ) -> Result<CallToolResult, ErrorData> {
        run(args, |args| comments::get_comments(&self.client, args)).await
    }

    #[tool(
        name = "clickup_update_comment",
        description = "Edit a comment's text or resolve/unresolve it"
    )]
    async fn update_comment(
        &self,
        Parameters(args): Parameters<UpdateCommentArgs>,
    ) -> Result<CallToolResult, ErrorData> {
        run(args, |args| comments::update_comment(&self.client, args)).await
    }

    #[tool(name = "clickup_create_reply", description = "Add a threaded reply to a comment")]
    async fn create_reply(
        &self,
        Parameters(args): Parameters<CreateReplyArgs>,
    ) -> Result<CallToolResult, ErrorData> {
        run(args, |args| comments::create_reply(&self.client, args)).await
    }

    #[tool(name = "clickup_get_replies", description = "Get threaded replies to a comment")]
    async fn get_replies(
        &self,
        Parameters(args): Parameters<CommentIdArgs>,
    ) -> Result<CallToolResult, ErrorData> {
        run(args, |args| comments::get_replies(&self.client, args)).await
    }

    // Members

    #[tool(
        name = "clickup_get_workspace_members",
        description = "Get all members across all workspaces (extracted from teams response)"
    )]
    async fn get_workspace_members(&self) -> Result<CallToolResult, ErrorData> {
        respond(members::get_workspace_members(&self.client).await)
    }

    #[tool(
        name = "clickup_get_list_members",
        description = "Get members with access to a specific list"
    )]
    async fn get_list_members(
        &self,
        Parameters(args): Parameters<ListMembersArgs>,
    ) -> Result<CallToolResult, ErrorData> {
        run(args, |args| members::get_list_members(&self.client, args)).await
    }
}

#[tool_handler]
impl rmcp::ServerHandler for ClickUpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation::from_build_env(),
            instructions: Some(include_str!("../docs/instructions.md").to_string()),
        }
    }
}
