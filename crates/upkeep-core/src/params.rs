//! Parameter structures for Upkeep operations
//!
//! These structures are shared by every interface (CLI, MCP) and carry no
//! framework-specific derives beyond serde and the optional JSON schema.
//! Interface layers wrap them with their own argument types and convert via
//! `From`/`Into`; the core validates the textual fields (dates, statuses,
//! frequencies) when converting into request types.
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │   CLI Args      │    │   MCP Params    │    │  Core Params    │
//! │  (clap derives) │───▶│ (serde derives) │───▶│ (minimal deps)  │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//! ```
//!
//! Dates are accepted as ISO `YYYY-MM-DD` strings.

#[cfg(feature = "schema")]
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::models::{EquipmentRef, TaskTemplate};

/// Generic parameters for operations requiring just an ID.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct Id {
    /// The ID of the resource to operate on
    pub id: String,
}

impl Id {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

/// Parameters for creating a maintenance plan.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct CreatePlan {
    /// Name of the plan (required)
    pub name: String,
    /// Optional description; used as the checklist item when no checklist is set
    pub description: Option<String>,
    /// Frequency: weekly, monthly, bimonthly, quarterly, semiannual or annual
    pub frequency: String,
    /// Optional first execution date (YYYY-MM-DD)
    pub start_date: Option<String>,
    /// Optional checklist template ID
    pub checklist_id: Option<String>,
    /// Equipment in scope, in generation order
    #[serde(default)]
    pub equipment: Vec<EquipmentRef>,
    /// Generate work orders automatically when the plan is due
    #[serde(default)]
    pub auto_generate: bool,
}

/// Parameters for updating a maintenance plan. Absent fields are unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct UpdatePlan {
    /// ID of the plan to update
    pub id: String,
    pub name: Option<String>,
    pub description: Option<String>,
    pub frequency: Option<String>,
    pub start_date: Option<String>,
    pub checklist_id: Option<String>,
    /// Replaces the whole equipment list when present
    pub equipment: Option<Vec<EquipmentRef>>,
    pub auto_generate: Option<bool>,
}

/// Parameters for listing plans.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct ListPlans {
    /// Include both active and inactive plans
    #[serde(default)]
    pub all: bool,
    /// Show inactive plans instead of active ones
    #[serde(default)]
    pub inactive: bool,
    /// Restrict to one frequency
    pub frequency: Option<String>,
    /// Only plans whose next execution date is today or earlier
    #[serde(default)]
    pub due_only: bool,
}

/// Parameters for permanently deleting a plan.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct DeletePlan {
    /// The ID of the plan to delete
    pub id: String,
    /// Must be true; deletion cannot be undone
    #[serde(default)]
    pub confirmed: bool,
}

/// Parameters for generating work orders from a plan.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct GenerateWorkOrders {
    /// ID of the plan to generate from
    pub plan_id: String,
    /// Override scheduling date (YYYY-MM-DD); defaults to the plan's next
    /// execution date, then today
    pub scheduled_date: Option<String>,
    /// Also advance the plan's next execution date
    #[serde(default)]
    pub advance: bool,
}

/// Parameters for creating a checklist template.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct CreateChecklist {
    /// Name of the checklist; becomes the task name on generated orders
    pub name: String,
    pub description: Option<String>,
    /// Item descriptions, in order
    #[serde(default)]
    pub items: Vec<String>,
}

/// Parameters for creating a work order by hand.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct CreateWorkOrder {
    /// Title of the work order (required)
    pub title: String,
    pub description: Option<String>,
    /// Equipment the work applies to (at least one)
    #[serde(default)]
    pub equipment: Vec<EquipmentRef>,
    /// Scheduled date (YYYY-MM-DD); defaults to today
    pub scheduled_date: Option<String>,
    /// low, medium, high or critical; defaults to medium
    pub priority: Option<String>,
    /// preventive or corrective; defaults to corrective
    pub kind: Option<String>,
    /// Tasks with their checklist item descriptions
    #[serde(default)]
    pub tasks: Vec<TaskTemplate>,
    pub assigned_to: Option<String>,
    /// Plan this order belongs to, if any
    pub plan_id: Option<String>,
}

/// Parameters for listing work orders.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct ListWorkOrders {
    pub plan_id: Option<String>,
    /// open, in_progress, completed or cancelled
    pub status: Option<String>,
    pub equipment_id: Option<String>,
}

/// Parameters for changing a work order's status.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct UpdateWorkOrderStatus {
    /// ID of the work order
    pub id: String,
    /// open, in_progress, completed or cancelled
    pub status: String,
}

/// Parameters for ticking or unticking a checklist item.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct SetChecklistItem {
    pub work_order_id: String,
    pub item_id: String,
    #[serde(default = "default_true")]
    pub completed: bool,
}

fn default_true() -> bool {
    true
}
