//! Validated request types built from the loosely typed parameters.

use jiff::civil::Date;

use super::{EquipmentRef, Frequency, Priority, TaskTemplate, WorkOrderType};
use crate::{
    error::{Result, UpkeepError},
    params::{CreatePlan, CreateWorkOrder, UpdatePlan},
};

/// Parses an ISO `YYYY-MM-DD` date for the named field.
pub fn parse_date(field: &str, value: &str) -> Result<Date> {
    value.trim().parse::<Date>().map_err(|e| {
        UpkeepError::invalid_input(field).with_reason(format!("expected YYYY-MM-DD: {e}"))
    })
}

fn parse_frequency(value: &str) -> Result<Frequency> {
    value
        .parse()
        .map_err(|reason: String| UpkeepError::invalid_input("frequency").with_reason(reason))
}

fn require_non_empty(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(UpkeepError::invalid_input(field).with_reason("must not be empty"));
    }
    Ok(())
}

fn validate_equipment(equipment: &[EquipmentRef]) -> Result<()> {
    if equipment.iter().any(|e| e.id.trim().is_empty()) {
        return Err(UpkeepError::invalid_input("equipment").with_reason("equipment id must not be empty"));
    }
    Ok(())
}

/// A validated plan ready to be inserted.
#[derive(Debug, Clone)]
pub struct NewPlan {
    pub name: String,
    pub description: Option<String>,
    pub frequency: Frequency,
    pub start_date: Option<Date>,
    pub checklist_id: Option<String>,
    pub equipment: Vec<EquipmentRef>,
    pub auto_generate: bool,
}

impl TryFrom<&CreatePlan> for NewPlan {
    type Error = UpkeepError;

    fn try_from(params: &CreatePlan) -> Result<Self> {
        require_non_empty("name", &params.name)?;
        validate_equipment(&params.equipment)?;

        Ok(Self {
            name: params.name.trim().to_string(),
            description: params.description.clone(),
            frequency: parse_frequency(&params.frequency)?,
            start_date: params
                .start_date
                .as_deref()
                .map(|d| parse_date("start_date", d))
                .transpose()?,
            checklist_id: params.checklist_id.clone(),
            equipment: params.equipment.clone(),
            auto_generate: params.auto_generate,
        })
    }
}

/// Validated field changes for a plan. `None` leaves a field unchanged.
#[derive(Debug, Clone, Default)]
pub struct PlanChanges {
    pub name: Option<String>,
    pub description: Option<String>,
    pub frequency: Option<Frequency>,
    pub start_date: Option<Date>,
    pub checklist_id: Option<String>,
    pub equipment: Option<Vec<EquipmentRef>>,
    pub auto_generate: Option<bool>,
}

impl PlanChanges {
    /// Whether the fields reported by [`MaintenancePlan::apply`] affect how the
    /// next execution date is derived.
    ///
    /// [`MaintenancePlan::apply`]: super::MaintenancePlan::apply
    pub fn reschedules(changed: &[&str]) -> bool {
        changed.iter().any(|f| matches!(*f, "frequency" | "start date"))
    }
}

impl TryFrom<&UpdatePlan> for PlanChanges {
    type Error = UpkeepError;

    fn try_from(params: &UpdatePlan) -> Result<Self> {
        if let Some(name) = &params.name {
            require_non_empty("name", name)?;
        }
        if let Some(equipment) = &params.equipment {
            validate_equipment(equipment)?;
        }

        Ok(Self {
            name: params.name.as_ref().map(|n| n.trim().to_string()),
            description: params.description.clone(),
            frequency: params.frequency.as_deref().map(parse_frequency).transpose()?,
            start_date: params
                .start_date
                .as_deref()
                .map(|d| parse_date("start_date", d))
                .transpose()?,
            checklist_id: params.checklist_id.clone(),
            equipment: params.equipment.clone(),
            auto_generate: params.auto_generate,
        })
    }
}

/// A validated, manually created work order.
#[derive(Debug, Clone)]
pub struct NewWorkOrder {
    pub title: String,
    pub description: Option<String>,
    pub equipment: Vec<EquipmentRef>,
    pub scheduled_date: Option<Date>,
    pub priority: Priority,
    pub kind: WorkOrderType,
    pub tasks: Vec<TaskTemplate>,
    pub assigned_to: Option<String>,
    pub plan_id: Option<String>,
}

impl TryFrom<&CreateWorkOrder> for NewWorkOrder {
    type Error = UpkeepError;

    fn try_from(params: &CreateWorkOrder) -> Result<Self> {
        require_non_empty("title", &params.title)?;
        if params.equipment.is_empty() {
            return Err(UpkeepError::invalid_input("equipment")
                .with_reason("a work order needs at least one piece of equipment"));
        }
        validate_equipment(&params.equipment)?;

        let priority = params
            .priority
            .as_deref()
            .map(|p| {
                p.parse()
                    .map_err(|reason: String| UpkeepError::invalid_input("priority").with_reason(reason))
            })
            .transpose()?
            .unwrap_or_default();

        let kind = params
            .kind
            .as_deref()
            .map(|k| {
                k.parse()
                    .map_err(|reason: String| UpkeepError::invalid_input("kind").with_reason(reason))
            })
            .transpose()?
            .unwrap_or_default();

        Ok(Self {
            title: params.title.trim().to_string(),
            description: params.description.clone(),
            equipment: params.equipment.clone(),
            scheduled_date: params
                .scheduled_date
                .as_deref()
                .map(|d| parse_date("scheduled_date", d))
                .transpose()?,
            priority,
            kind,
            tasks: params.tasks.clone(),
            assigned_to: params.assigned_to.clone(),
            plan_id: params.plan_id.clone(),
        })
    }
}
