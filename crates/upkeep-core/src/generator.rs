//! Work order generator: turns a maintenance plan into one work order per
//! piece of equipment.
//!
//! Generation is pure. Persisting the result is the caller's job (see
//! [`crate::maintenance`]), which stores each batch in one transaction.

use jiff::{civil::Date, Timestamp};
use log::debug;
use uuid::Uuid;

use crate::{
    error::{Result, UpkeepError},
    models::{
        work_order_number, MaintenancePlan, NewWorkOrder, Priority, TaskTemplate, WorkOrder,
        WorkOrderStatus, WorkOrderType,
    },
    repository::ChecklistLookup,
};

/// Author recorded on plan-generated work orders.
pub const SYSTEM_USER: &str = "system";

/// Author recorded on work orders created by hand.
pub const MANUAL_USER: &str = "user";

/// Checklist item used when a plan has neither a checklist nor a description.
pub const DEFAULT_CHECKLIST_ITEM: &str = "Perform maintenance according to plan";

/// Resolves the task every work order of `plan` starts from.
///
/// A referenced checklist that exists becomes one task named after it. A
/// missing reference, or a lookup miss, falls back to a single task named after
/// the plan whose only item is the plan description.
pub fn resolve_task_template<C>(plan: &MaintenancePlan, checklists: &C) -> Result<TaskTemplate>
where
    C: ChecklistLookup + ?Sized,
{
    if let Some(checklist_id) = plan.checklist_id.as_deref() {
        if let Some(checklist) = checklists.get_checklist(checklist_id)? {
            return Ok(TaskTemplate {
                name: checklist.name,
                checklist: checklist.items.into_iter().map(|i| i.description).collect(),
            });
        }
        debug!(
            "Checklist {checklist_id} for plan {} not found, using the plan description",
            plan.id
        );
    }

    let item = plan
        .description
        .as_deref()
        .filter(|d| !d.trim().is_empty())
        .unwrap_or(DEFAULT_CHECKLIST_ITEM);

    Ok(TaskTemplate {
        name: plan.name.clone(),
        checklist: vec![item.to_string()],
    })
}

/// Builds one preventive work order per piece of equipment in `plan`.
///
/// The scheduled date is `scheduled_date`, else the plan's next execution date,
/// else `today`. Orders come back in equipment order, each with its own copy
/// of the task list and every checklist item unchecked.
///
/// # Errors
///
/// [`UpkeepError::NoEquipment`] when the plan has no equipment. Checklist
/// lookup failures are passed through.
pub fn generate_work_orders_from_plan<C>(
    plan: &MaintenancePlan,
    scheduled_date: Option<Date>,
    checklists: &C,
    today: Date,
) -> Result<Vec<WorkOrder>>
where
    C: ChecklistLookup + ?Sized,
{
    if plan.equipment.is_empty() {
        return Err(UpkeepError::NoEquipment {
            plan_id: plan.id.clone(),
        });
    }

    let scheduled_date = scheduled_date
        .or(plan.next_execution_date)
        .unwrap_or(today);
    let template = resolve_task_template(plan, checklists)?;
    let now = Timestamp::now();
    let millis = now.as_millisecond();

    let orders = plan
        .equipment
        .iter()
        .enumerate()
        .map(|(index, equipment)| {
            let order = WorkOrder {
                id: Uuid::new_v4().to_string(),
                number: work_order_number(today.year(), millis, index),
                kind: WorkOrderType::Preventive,
                status: WorkOrderStatus::Open,
                priority: Priority::Medium,
                plan_id: Some(plan.id.clone()),
                equipment: vec![equipment.clone()],
                scheduled_date,
                title: format!("{} - {}", plan.name, equipment.display_name()),
                description: plan.description.clone(),
                tasks: vec![template.instantiate()],
                assigned_to: None,
                created_by: SYSTEM_USER.to_string(),
                started_at: None,
                completed_at: None,
                created_at: now,
                updated_at: now,
            };
            debug!("Built work order {} ({}) for plan {}", order.number, order.title, plan.id);
            order
        })
        .collect();

    Ok(orders)
}

/// Builds a manually requested work order.
///
/// The scheduled date defaults to `today`.
pub fn build_work_order(request: &NewWorkOrder, today: Date) -> WorkOrder {
    let now = Timestamp::now();
    WorkOrder {
        id: Uuid::new_v4().to_string(),
        number: work_order_number(today.year(), now.as_millisecond(), 0),
        kind: request.kind,
        status: WorkOrderStatus::Open,
        priority: request.priority,
        plan_id: request.plan_id.clone(),
        equipment: request.equipment.clone(),
        scheduled_date: request.scheduled_date.unwrap_or(today),
        title: request.title.clone(),
        description: request.description.clone(),
        tasks: request.tasks.iter().map(TaskTemplate::instantiate).collect(),
        assigned_to: request.assigned_to.clone(),
        created_by: MANUAL_USER.to_string(),
        started_at: None,
        completed_at: None,
        created_at: now,
        updated_at: now,
    }
}
