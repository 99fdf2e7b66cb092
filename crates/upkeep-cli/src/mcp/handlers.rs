//! MCP tool handler implementations

use log::debug;
use rmcp::{
    handler::server::wrapper::Parameters,
    model::{CallToolResult, Content},
    ErrorData,
};
use schemars::JsonSchema;
use serde::Deserialize;
use upkeep_core::{
    display::{CreateResult, GenerationResult, OperationStatus, ScanResult},
    params as core, Upkeep,
};

use super::errors::to_mcp_error;

// Core parameter structs already derive Deserialize and (with the `schema`
// feature) JsonSchema. The transparent wrapper keeps the MCP-facing type
// distinct without duplicating any fields.

/// Generic MCP wrapper for core parameter types
#[derive(Debug, Deserialize)]
#[serde(transparent)]
pub struct McpParams<T>(T)
where
    T: JsonSchema;

impl<T> JsonSchema for McpParams<T>
where
    T: JsonSchema,
{
    fn schema_name() -> std::borrow::Cow<'static, str> {
        T::schema_name()
    }

    fn json_schema(g: &mut schemars::SchemaGenerator) -> schemars::Schema {
        T::json_schema(g)
    }
}

impl<T> AsRef<T> for McpParams<T>
where
    T: JsonSchema,
{
    fn as_ref(&self) -> &T {
        &self.0
    }
}

pub type Id = McpParams<core::Id>;
pub type CreatePlan = McpParams<core::CreatePlan>;
pub type ListPlans = McpParams<core::ListPlans>;
pub type GenerateWorkOrders = McpParams<core::GenerateWorkOrders>;
pub type ListWorkOrders = McpParams<core::ListWorkOrders>;
pub type UpdateWorkOrderStatus = McpParams<core::UpdateWorkOrderStatus>;
pub type SetChecklistItem = McpParams<core::SetChecklistItem>;
pub type CreateChecklist = McpParams<core::CreateChecklist>;

pub type McpResult = Result<CallToolResult, ErrorData>;

fn markdown(body: impl Into<String>) -> CallToolResult {
    CallToolResult::success(vec![Content::text(body.into())])
}

/// Handler implementations for the MCP server
pub struct McpHandlers {
    upkeep: Upkeep,
}

impl McpHandlers {
    pub fn new(upkeep: Upkeep) -> Self {
        Self { upkeep }
    }

    pub async fn create_plan(&self, Parameters(params): Parameters<CreatePlan>) -> McpResult {
        debug!("create_plan: {params:?}");

        let plan = self
            .upkeep
            .create_plan(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to create plan", &e))?;

        Ok(markdown(CreateResult::new(plan).to_string()))
    }

    pub async fn list_plans(&self, Parameters(params): Parameters<ListPlans>) -> McpResult {
        debug!("list_plans: {params:?}");

        let inner = params.as_ref();
        let plans = self
            .upkeep
            .list_plans_summary(inner)
            .await
            .map_err(|e| to_mcp_error("Failed to list plans", &e))?;

        let title = match (inner.all, inner.inactive, inner.due_only) {
            (_, _, true) => "Due Plans",
            (true, _, _) => "All Plans",
            (_, true, _) => "Inactive Plans",
            _ => "Active Plans",
        };
        Ok(markdown(format!("# {title}\n\n{plans}")))
    }

    pub async fn show_plan(&self, Parameters(params): Parameters<Id>) -> McpResult {
        debug!("show_plan: {params:?}");

        let plan = self
            .upkeep
            .get_plan(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to get plan", &e))?
            .ok_or_else(|| {
                ErrorData::invalid_params(
                    format!("Plan with ID {} not found", params.as_ref().id),
                    None,
                )
            })?;

        Ok(markdown(plan.to_string()))
    }

    pub async fn generate_work_orders(
        &self,
        Parameters(params): Parameters<GenerateWorkOrders>,
    ) -> McpResult {
        debug!("generate_work_orders: {params:?}");

        let batch = self
            .upkeep
            .generate_work_orders(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to generate work orders", &e))?;

        Ok(markdown(GenerationResult(batch).to_string()))
    }

    pub async fn advance_plan(&self, Parameters(params): Parameters<Id>) -> McpResult {
        debug!("advance_plan: {params:?}");

        let plan = self
            .upkeep
            .advance_plan(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to advance plan", &e))?
            .ok_or_else(|| {
                ErrorData::invalid_params(
                    format!("Plan with ID {} not found", params.as_ref().id),
                    None,
                )
            })?;

        let next = plan
            .next_execution_date
            .map_or_else(|| "unscheduled".to_string(), |d| d.to_string());
        Ok(markdown(
            OperationStatus::success(format!(
                "Plan '{}' (ID: {}) next execution moved to {next}",
                plan.name, plan.id
            ))
            .to_string(),
        ))
    }

    pub async fn run_due_plans(&self) -> McpResult {
        debug!("run_due_plans");

        let report = self
            .upkeep
            .run_due_plans()
            .await
            .map_err(|e| to_mcp_error("Failed to run due plans", &e))?;

        Ok(markdown(ScanResult(report).to_string()))
    }

    pub async fn list_work_orders(
        &self,
        Parameters(params): Parameters<ListWorkOrders>,
    ) -> McpResult {
        debug!("list_work_orders: {params:?}");

        let orders = self
            .upkeep
            .list_work_orders(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to list work orders", &e))?;

        Ok(markdown(format!("# Work Orders\n\n{orders}")))
    }

    pub async fn show_work_order(&self, Parameters(params): Parameters<Id>) -> McpResult {
        debug!("show_work_order: {params:?}");

        let order = self
            .upkeep
            .get_work_order(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to get work order", &e))?
            .ok_or_else(|| {
                ErrorData::invalid_params(
                    format!("Work order with ID {} not found", params.as_ref().id),
                    None,
                )
            })?;

        Ok(markdown(order.to_string()))
    }

    pub async fn update_work_order_status(
        &self,
        Parameters(params): Parameters<UpdateWorkOrderStatus>,
    ) -> McpResult {
        debug!("update_work_order_status: {params:?}");

        let result = self
            .upkeep
            .update_work_order_status(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to update work order status", &e))?;

        Ok(markdown(result.to_string()))
    }

    pub async fn set_checklist_item(
        &self,
        Parameters(params): Parameters<SetChecklistItem>,
    ) -> McpResult {
        debug!("set_checklist_item: {params:?}");

        let order = self
            .upkeep
            .set_checklist_item(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to update checklist item", &e))?;

        Ok(markdown(order.to_string()))
    }

    pub async fn create_checklist(
        &self,
        Parameters(params): Parameters<CreateChecklist>,
    ) -> McpResult {
        debug!("create_checklist: {params:?}");

        let checklist = self
            .upkeep
            .create_checklist(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to create checklist", &e))?;

        Ok(markdown(CreateResult::new(checklist).to_string()))
    }

    pub async fn list_checklists(&self) -> McpResult {
        debug!("list_checklists");

        let checklists = self
            .upkeep
            .list_checklists()
            .await
            .map_err(|e| to_mcp_error("Failed to list checklists", &e))?;

        Ok(markdown(format!("# Checklists\n\n{checklists}")))
    }
}
