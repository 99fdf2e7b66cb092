//! MCP server implementation for Upkeep
//!
//! Exposes maintenance plans, checklist templates and work orders as MCP
//! tools over stdio. Every tool returns the same markdown the CLI renders.

use std::future::Future;

use anyhow::Result;
use log::{debug, error, info};
use rmcp::{
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::{Implementation, ProtocolVersion, ServerCapabilities, ServerInfo},
    tool, tool_handler, tool_router, ServerHandler,
};
use tokio::signal::unix::{signal, SignalKind};
use upkeep_core::Upkeep;

pub mod errors;
pub mod handlers;

pub use handlers::{
    CreateChecklist, CreatePlan, GenerateWorkOrders, Id, ListPlans, ListWorkOrders, McpResult,
    SetChecklistItem, UpdateWorkOrderStatus,
};

/// MCP server for Upkeep
#[derive(Clone)]
pub struct UpkeepMcpServer {
    upkeep: Upkeep,
    tool_router: ToolRouter<Self>,
}

#[tool_router]
impl UpkeepMcpServer {
    pub fn new(upkeep: Upkeep) -> Self {
        Self {
            upkeep,
            tool_router: Self::tool_router(),
        }
    }

    fn handlers(&self) -> handlers::McpHandlers {
        handlers::McpHandlers::new(self.upkeep.clone())
    }

    #[tool(
        name = "create_plan",
        description = "Create a recurring maintenance plan. Requires name and frequency (weekly, monthly, bimonthly, quarterly, semiannual or annual). Optionally set description, start_date (YYYY-MM-DD), checklist_id, equipment as an ordered list of {id, name} and auto_generate. The first execution date is derived from the start date, or today."
    )]
    async fn create_plan(&self, params: Parameters<CreatePlan>) -> McpResult {
        self.handlers().create_plan(params).await
    }

    #[tool(
        name = "list_plans",
        description = "List maintenance plans. Shows active plans by default; set inactive=true for inactive plans, all=true for both, due_only=true for plans whose next execution date is today or earlier. Optionally filter by frequency."
    )]
    async fn list_plans(&self, params: Parameters<ListPlans>) -> McpResult {
        self.handlers().list_plans(params).await
    }

    #[tool(
        name = "show_plan",
        description = "Show a maintenance plan with its frequency, next execution date, checklist and equipment list."
    )]
    async fn show_plan(&self, params: Parameters<Id>) -> McpResult {
        self.handlers().show_plan(params).await
    }

    #[tool(
        name = "generate_work_orders",
        description = "Generate one preventive work order per piece of equipment in a plan and store them together. scheduled_date (YYYY-MM-DD) overrides the plan's next execution date. Set advance=true to also move the plan's next execution date forward. Fails if the plan has no equipment."
    )]
    async fn generate_work_orders(&self, params: Parameters<GenerateWorkOrders>) -> McpResult {
        self.handlers().generate_work_orders(params).await
    }

    #[tool(
        name = "advance_plan",
        description = "Move a plan's next execution date forward by its frequency until it is after today."
    )]
    async fn advance_plan(&self, params: Parameters<Id>) -> McpResult {
        self.handlers().advance_plan(params).await
    }

    #[tool(
        name = "run_due_plans",
        description = "Generate work orders for every active, auto-generating plan that is due today or earlier, and advance each of those plans. Plans that fail (for example with no equipment) are reported and skipped."
    )]
    async fn run_due_plans(&self) -> McpResult {
        self.handlers().run_due_plans().await
    }

    #[tool(
        name = "list_work_orders",
        description = "List work orders, newest scheduled first. Filter by plan_id, status (open, in_progress, completed, cancelled) or equipment_id."
    )]
    async fn list_work_orders(&self, params: Parameters<ListWorkOrders>) -> McpResult {
        self.handlers().list_work_orders(params).await
    }

    #[tool(
        name = "show_work_order",
        description = "Show a work order with its equipment, tasks and checklist items including their IDs."
    )]
    async fn show_work_order(&self, params: Parameters<Id>) -> McpResult {
        self.handlers().show_work_order(params).await
    }

    #[tool(
        name = "update_work_order_status",
        description = "Change a work order's status. Allowed: open -> in_progress or cancelled; in_progress -> completed, open or cancelled; cancelled -> open. Completed orders are final."
    )]
    async fn update_work_order_status(
        &self,
        params: Parameters<UpdateWorkOrderStatus>,
    ) -> McpResult {
        self.handlers().update_work_order_status(params).await
    }

    #[tool(
        name = "set_checklist_item",
        description = "Tick (completed=true, the default) or untick a checklist item on a work order. A task is completed once all of its items are."
    )]
    async fn set_checklist_item(&self, params: Parameters<SetChecklistItem>) -> McpResult {
        self.handlers().set_checklist_item(params).await
    }

    #[tool(
        name = "create_checklist",
        description = "Create a checklist template with a name and ordered item descriptions. Plans that reference it copy the items onto every generated work order."
    )]
    async fn create_checklist(&self, params: Parameters<CreateChecklist>) -> McpResult {
        self.handlers().create_checklist(params).await
    }

    #[tool(
        name = "list_checklists",
        description = "List checklist templates with their items."
    )]
    async fn list_checklists(&self) -> McpResult {
        self.handlers().list_checklists().await
    }
}

#[tool_handler(router = self.tool_router)]
impl ServerHandler for UpkeepMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation::from_build_env(),
            instructions: Some(r#"Upkeep is a preventive maintenance planner.

## Core Concepts
- **Plans**: recurring maintenance for a list of equipment, with a frequency and a next execution date
- **Checklists**: reusable item lists copied onto every work order a plan generates
- **Work orders**: one per piece of equipment, with tasks, checklist items and a status (open, in_progress, completed, cancelled)

## Workflow
1. Optionally create a checklist with `create_checklist`
2. Create a plan with `create_plan`, listing the equipment and the checklist ID
3. Run `run_due_plans` to generate work orders for every due plan, or `generate_work_orders` for one plan
4. Track work with `update_work_order_status` and `set_checklist_item`

## Tool Categories
- **Plans**: create_plan, list_plans, show_plan, generate_work_orders, advance_plan, run_due_plans
- **Work orders**: list_work_orders, show_work_order, update_work_order_status, set_checklist_item
- **Checklists**: create_checklist, list_checklists"#.to_string()),
        }
    }
}

/// Run the MCP server with stdio transport
pub async fn run_stdio_server(server: UpkeepMcpServer) -> Result<()> {
    use rmcp::{transport::stdio, ServiceExt};

    info!("Starting Upkeep MCP server on stdio");
    debug!(
        "Server created with {} tools",
        server.tool_router.list_all().len()
    );

    let service = server.serve(stdio()).await.inspect_err(|e| {
        error!("serving error: {e:?}");
    })?;

    let mut sigint = signal(SignalKind::interrupt())?;
    let mut sigterm = signal(SignalKind::terminate())?;

    tokio::select! {
        result = service.waiting() => {
            match result {
                Ok(_) => info!("MCP server stopped normally"),
                Err(e) => error!("MCP server error: {e:?}"),
            }
        }
        _ = sigint.recv() => {
            info!("Received SIGINT, shutting down gracefully...");
        }
        _ = sigterm.recv() => {
            info!("Received SIGTERM, shutting down gracefully...");
        }
    }

    info!("MCP server shutdown complete");
    Ok(())
}
