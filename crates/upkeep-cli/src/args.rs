//! Command-line argument definitions using clap
//!
//! Each command has its own clap wrapper that converts into the matching core
//! parameter struct, so clap attributes never leak into `upkeep-core`:
//!
//! ```text
//! User Input → CLI Args (clap) → Core Params → Upkeep
//! ```

use std::path::PathBuf;

use clap::{Args as ClapArgs, Parser, Subcommand, ValueEnum};
use upkeep_core::{
    models::{EquipmentRef, TaskTemplate},
    params::*,
};

/// Preventive maintenance planner
///
/// Upkeep keeps recurring maintenance plans for pieces of equipment,
/// generates one work order per piece of equipment when a plan falls due and
/// tracks those orders through their checklist and status changes. It can
/// also run as an MCP (Model Context Protocol) server over stdio.
#[derive(Parser)]
#[command(version, about, name = "upkeep")]
pub struct Args {
    /// Path to the SQLite database file. Defaults to
    /// $XDG_DATA_HOME/upkeep/upkeep.db
    #[arg(long, global = true, env = "UPKEEP_DATABASE_FILE")]
    pub database_file: Option<PathBuf>,

    /// Disable colored output and use plain text
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Manage maintenance plans
    #[command(alias = "p")]
    Plan {
        #[command(subcommand)]
        command: PlanCommands,
    },
    /// Manage checklist templates
    #[command(alias = "c")]
    Checklist {
        #[command(subcommand)]
        command: ChecklistCommands,
    },
    /// Manage work orders
    #[command(alias = "o")]
    Order {
        #[command(subcommand)]
        command: OrderCommands,
    },
    /// Generate work orders for every due plan
    Due(DueArgs),
    /// Start the MCP server
    Serve,
}

/// Parses `ID` or `ID=NAME` into an equipment reference.
fn parse_equipment(value: &str) -> Result<EquipmentRef, String> {
    let (id, name) = match value.split_once('=') {
        Some((id, name)) => (id.trim(), Some(name.trim().to_string())),
        None => (value.trim(), None),
    };
    if id.is_empty() {
        return Err("equipment id must not be empty".to_string());
    }
    Ok(EquipmentRef::new(id, name.filter(|n| !n.is_empty())))
}

// ============================================================================
// Plan commands
// ============================================================================

/// Create a maintenance plan
#[derive(ClapArgs)]
pub struct CreatePlanArgs {
    /// Name of the plan
    pub name: String,
    /// What the maintenance consists of; becomes the checklist item when no
    /// checklist is attached
    #[arg(short, long)]
    pub description: Option<String>,
    /// How often the plan recurs
    #[arg(short, long, value_enum)]
    pub frequency: FrequencyArg,
    /// First execution date (YYYY-MM-DD); defaults to today
    #[arg(long)]
    pub start: Option<String>,
    /// Checklist template to copy onto generated work orders
    #[arg(long)]
    pub checklist: Option<String>,
    /// Equipment as ID or ID=NAME; repeat for several, order is kept
    #[arg(short, long = "equipment", value_parser = parse_equipment)]
    pub equipment: Vec<EquipmentRef>,
    /// Generate work orders automatically when the plan falls due
    #[arg(long)]
    pub auto: bool,
}

impl From<CreatePlanArgs> for CreatePlan {
    fn from(val: CreatePlanArgs) -> Self {
        CreatePlan {
            name: val.name,
            description: val.description,
            frequency: val.frequency.to_string(),
            start_date: val.start,
            checklist_id: val.checklist,
            equipment: val.equipment,
            auto_generate: val.auto,
        }
    }
}

/// List maintenance plans
///
/// Shows active plans by default.
#[derive(ClapArgs)]
pub struct ListPlansArgs {
    /// Show active and inactive plans
    #[arg(short, long, conflicts_with = "inactive")]
    pub all: bool,
    /// Show inactive plans instead of active ones
    #[arg(long)]
    pub inactive: bool,
    /// Only plans with this frequency
    #[arg(short, long, value_enum)]
    pub frequency: Option<FrequencyArg>,
    /// Only plans due today or earlier
    #[arg(long)]
    pub due: bool,
    /// Print JSON instead of markdown
    #[arg(long)]
    pub json: bool,
}

impl From<&ListPlansArgs> for ListPlans {
    fn from(val: &ListPlansArgs) -> Self {
        ListPlans {
            all: val.all,
            inactive: val.inactive,
            frequency: val.frequency.map(|f| f.to_string()),
            due_only: val.due,
        }
    }
}

/// Command arguments naming a single resource
#[derive(ClapArgs)]
pub struct IdArgs {
    /// ID of the resource
    pub id: String,
}

impl From<IdArgs> for Id {
    fn from(val: IdArgs) -> Self {
        Id { id: val.id }
    }
}

/// Update a maintenance plan
///
/// Changing the frequency or start date recomputes the next execution date.
#[derive(ClapArgs)]
pub struct UpdatePlanArgs {
    /// ID of the plan to update
    pub id: String,
    #[arg(short, long)]
    pub name: Option<String>,
    #[arg(short, long)]
    pub description: Option<String>,
    #[arg(short, long, value_enum)]
    pub frequency: Option<FrequencyArg>,
    /// New start date (YYYY-MM-DD)
    #[arg(long)]
    pub start: Option<String>,
    /// Checklist template ID
    #[arg(long)]
    pub checklist: Option<String>,
    /// Replace the equipment list; repeat for several
    #[arg(short, long = "equipment", value_parser = parse_equipment)]
    pub equipment: Vec<EquipmentRef>,
    /// Turn automatic generation on or off
    #[arg(long)]
    pub auto: Option<bool>,
}

impl From<UpdatePlanArgs> for UpdatePlan {
    fn from(val: UpdatePlanArgs) -> Self {
        UpdatePlan {
            id: val.id,
            name: val.name,
            description: val.description,
            frequency: val.frequency.map(|f| f.to_string()),
            start_date: val.start,
            checklist_id: val.checklist,
            equipment: (!val.equipment.is_empty()).then_some(val.equipment),
            auto_generate: val.auto,
        }
    }
}

/// Delete a plan permanently
///
/// Work orders generated from the plan are kept.
#[derive(ClapArgs)]
pub struct DeletePlanArgs {
    /// ID of the plan to delete
    pub id: String,
    /// Confirm the deletion (required to prevent accidental deletion)
    #[arg(long)]
    pub confirm: bool,
}

impl From<DeletePlanArgs> for DeletePlan {
    fn from(val: DeletePlanArgs) -> Self {
        DeletePlan {
            id: val.id,
            confirmed: val.confirm,
        }
    }
}

/// Generate work orders from a plan now
#[derive(ClapArgs)]
pub struct GenerateArgs {
    /// ID of the plan
    pub plan_id: String,
    /// Scheduled date for the orders (YYYY-MM-DD); defaults to the plan's
    /// next execution date
    #[arg(long)]
    pub date: Option<String>,
    /// Also move the plan's next execution date forward
    #[arg(long)]
    pub advance: bool,
}

impl From<GenerateArgs> for GenerateWorkOrders {
    fn from(val: GenerateArgs) -> Self {
        GenerateWorkOrders {
            plan_id: val.plan_id,
            scheduled_date: val.date,
            advance: val.advance,
        }
    }
}

#[derive(Subcommand)]
pub enum PlanCommands {
    /// Create a maintenance plan
    #[command(alias = "c")]
    Create(CreatePlanArgs),
    /// List maintenance plans
    #[command(aliases = ["l", "ls"])]
    List(ListPlansArgs),
    /// Show details of a plan
    #[command(alias = "s")]
    Show(IdArgs),
    /// Update a plan
    #[command(alias = "u")]
    Update(UpdatePlanArgs),
    /// Mark a plan active
    Activate(IdArgs),
    /// Mark a plan inactive
    Deactivate(IdArgs),
    /// Delete a plan permanently
    #[command(aliases = ["d", "rm"])]
    Delete(DeletePlanArgs),
    /// Generate work orders from a plan
    #[command(alias = "g")]
    Generate(GenerateArgs),
    /// Move a plan's next execution date past today
    Advance(IdArgs),
}

// ============================================================================
// Checklist commands
// ============================================================================

/// Create a checklist template
#[derive(ClapArgs)]
pub struct CreateChecklistArgs {
    /// Name of the checklist; becomes the task name on work orders
    pub name: String,
    #[arg(short, long)]
    pub description: Option<String>,
    /// Checklist item; repeat for several, order is kept
    #[arg(short, long = "item")]
    pub items: Vec<String>,
}

impl From<CreateChecklistArgs> for CreateChecklist {
    fn from(val: CreateChecklistArgs) -> Self {
        CreateChecklist {
            name: val.name,
            description: val.description,
            items: val.items,
        }
    }
}

/// List checklist templates
#[derive(ClapArgs)]
pub struct ListChecklistsArgs {
    /// Print JSON instead of markdown
    #[arg(long)]
    pub json: bool,
}

#[derive(Subcommand)]
pub enum ChecklistCommands {
    /// Create a checklist template
    #[command(alias = "c")]
    Create(CreateChecklistArgs),
    /// List checklist templates
    #[command(aliases = ["l", "ls"])]
    List(ListChecklistsArgs),
    /// Show a checklist template
    #[command(alias = "s")]
    Show(IdArgs),
    /// Delete a checklist template
    #[command(aliases = ["d", "rm"])]
    Delete(IdArgs),
}

// ============================================================================
// Work order commands
// ============================================================================

/// Create a work order by hand
#[derive(ClapArgs)]
pub struct CreateOrderArgs {
    /// Title of the work order
    pub title: String,
    #[arg(short, long)]
    pub description: Option<String>,
    /// Equipment as ID or ID=NAME; at least one is required
    #[arg(short, long = "equipment", value_parser = parse_equipment, required = true)]
    pub equipment: Vec<EquipmentRef>,
    /// Scheduled date (YYYY-MM-DD); defaults to today
    #[arg(long)]
    pub date: Option<String>,
    #[arg(short, long, value_enum)]
    pub priority: Option<PriorityArg>,
    /// Record the order as preventive instead of corrective
    #[arg(long)]
    pub preventive: bool,
    /// Name of the task holding the checklist items; defaults to the title
    #[arg(long)]
    pub task: Option<String>,
    /// Checklist item; repeat for several
    #[arg(short, long = "item")]
    pub items: Vec<String>,
    /// Person the order is assigned to
    #[arg(short, long)]
    pub assign: Option<String>,
}

impl From<CreateOrderArgs> for CreateWorkOrder {
    fn from(val: CreateOrderArgs) -> Self {
        let tasks = if val.items.is_empty() {
            Vec::new()
        } else {
            vec![TaskTemplate {
                name: val.task.unwrap_or_else(|| val.title.clone()),
                checklist: val.items,
            }]
        };

        CreateWorkOrder {
            title: val.title,
            description: val.description,
            equipment: val.equipment,
            scheduled_date: val.date,
            priority: val.priority.map(|p| p.to_string()),
            kind: val.preventive.then(|| "preventive".to_string()),
            tasks,
            assigned_to: val.assign,
            plan_id: None,
        }
    }
}

/// List work orders
#[derive(ClapArgs)]
pub struct ListOrdersArgs {
    /// Only orders generated from this plan
    #[arg(long)]
    pub plan: Option<String>,
    /// Only orders in this status
    #[arg(short, long, value_enum)]
    pub status: Option<OrderStatusArg>,
    /// Only orders for this equipment
    #[arg(short, long)]
    pub equipment: Option<String>,
    /// Print JSON instead of markdown
    #[arg(long)]
    pub json: bool,
}

impl From<&ListOrdersArgs> for ListWorkOrders {
    fn from(val: &ListOrdersArgs) -> Self {
        ListWorkOrders {
            plan_id: val.plan.clone(),
            status: val.status.map(|s| s.to_string()),
            equipment_id: val.equipment.clone(),
        }
    }
}

/// Change a work order's status
#[derive(ClapArgs)]
pub struct OrderStatusArgs {
    /// ID of the work order
    pub id: String,
    /// New status
    #[arg(value_enum)]
    pub status: OrderStatusArg,
}

impl From<OrderStatusArgs> for UpdateWorkOrderStatus {
    fn from(val: OrderStatusArgs) -> Self {
        UpdateWorkOrderStatus {
            id: val.id,
            status: val.status.to_string(),
        }
    }
}

/// Tick or untick a checklist item
#[derive(ClapArgs)]
pub struct CheckItemArgs {
    /// ID of the work order
    pub work_order_id: String,
    /// ID of the checklist item
    pub item_id: String,
    /// Untick the item instead
    #[arg(long)]
    pub undo: bool,
}

impl From<CheckItemArgs> for SetChecklistItem {
    fn from(val: CheckItemArgs) -> Self {
        SetChecklistItem {
            work_order_id: val.work_order_id,
            item_id: val.item_id,
            completed: !val.undo,
        }
    }
}

#[derive(Subcommand)]
pub enum OrderCommands {
    /// Create a work order by hand
    #[command(alias = "c")]
    Create(CreateOrderArgs),
    /// List work orders
    #[command(aliases = ["l", "ls"])]
    List(ListOrdersArgs),
    /// Show a work order with its checklist
    #[command(alias = "s")]
    Show(IdArgs),
    /// Change a work order's status
    Status(OrderStatusArgs),
    /// Tick or untick a checklist item
    Check(CheckItemArgs),
    /// Delete an open work order
    #[command(aliases = ["d", "rm"])]
    Delete(IdArgs),
}

/// Generate work orders for every due plan
///
/// Due plans are active, have automatic generation on and a next execution
/// date of today or earlier. Each one is advanced after its orders are stored.
#[derive(ClapArgs)]
pub struct DueArgs {
    /// Keep scanning until interrupted
    #[arg(short, long)]
    pub watch: bool,
    /// Seconds between scans in watch mode
    #[arg(short, long, default_value_t = 30, value_parser = clap::value_parser!(u64).range(1..))]
    pub interval: u64,
}

// ============================================================================
// Value enums
// ============================================================================

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum FrequencyArg {
    Weekly,
    Monthly,
    Bimonthly,
    Quarterly,
    Semiannual,
    Annual,
}

impl std::fmt::Display for FrequencyArg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            FrequencyArg::Weekly => "weekly",
            FrequencyArg::Monthly => "monthly",
            FrequencyArg::Bimonthly => "bimonthly",
            FrequencyArg::Quarterly => "quarterly",
            FrequencyArg::Semiannual => "semiannual",
            FrequencyArg::Annual => "annual",
        };
        write!(f, "{name}")
    }
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum PriorityArg {
    Low,
    Medium,
    High,
    Critical,
}

impl std::fmt::Display for PriorityArg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            PriorityArg::Low => "low",
            PriorityArg::Medium => "medium",
            PriorityArg::High => "high",
            PriorityArg::Critical => "critical",
        };
        write!(f, "{name}")
    }
}

/// Work order status as typed on the command line
#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum OrderStatusArg {
    Open,
    InProgress,
    Completed,
    Cancelled,
}

impl std::fmt::Display for OrderStatusArg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OrderStatusArg::Open => write!(f, "open"),
            OrderStatusArg::InProgress => write!(f, "in_progress"),
            OrderStatusArg::Completed => write!(f, "completed"),
            OrderStatusArg::Cancelled => write!(f, "cancelled"),
        }
    }
}
