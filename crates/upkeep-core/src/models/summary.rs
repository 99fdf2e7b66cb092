//! Plan summary types and functionality.

use jiff::civil::Date;
use serde::{Deserialize, Serialize};

use super::{Frequency, MaintenancePlan, PlanStatus};

/// Summary information about a plan for list views.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanSummary {
    /// Plan ID
    pub id: String,
    /// Plan name
    pub name: String,
    /// Plan description
    pub description: Option<String>,
    /// Recurrence frequency
    pub frequency: Frequency,
    /// Plan status
    pub status: PlanStatus,
    /// Next scheduled generation date
    pub next_execution_date: Option<Date>,
    /// Whether automatic generation is enabled
    pub auto_generate: bool,
    /// Number of pieces of equipment in scope
    pub equipment_count: u32,
}

impl From<&MaintenancePlan> for PlanSummary {
    fn from(plan: &MaintenancePlan) -> Self {
        Self {
            id: plan.id.clone(),
            name: plan.name.clone(),
            description: plan.description.clone(),
            frequency: plan.frequency,
            status: plan.status,
            next_execution_date: plan.next_execution_date,
            auto_generate: plan.auto_generate,
            equipment_count: plan.equipment.len() as u32,
        }
    }
}
