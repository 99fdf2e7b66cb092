//! Work order model definition and related functionality.

use jiff::{civil::Date, Timestamp};
#[cfg(feature = "schema")]
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{EquipmentRef, Priority, WorkOrderStatus, WorkOrderType};

/// A single checkable line on a work order task.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChecklistItem {
    pub id: String,
    pub description: String,
    #[serde(default)]
    pub completed: bool,
}

/// A named unit of work within a work order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct WorkOrderTask {
    pub id: String,
    pub name: String,

    /// Set once every checklist item is completed
    #[serde(default)]
    pub completed: bool,

    #[serde(default)]
    pub checklist: Vec<ChecklistItem>,
}

/// Shape of a task before it is attached to a work order.
///
/// Templates carry descriptions only. Each work order instantiates its own
/// copy with fresh ids and every item unchecked.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct TaskTemplate {
    pub name: String,
    #[serde(default)]
    pub checklist: Vec<String>,
}

impl TaskTemplate {
    /// Builds a fresh task with newly generated ids.
    pub fn instantiate(&self) -> WorkOrderTask {
        WorkOrderTask {
            id: Uuid::new_v4().to_string(),
            name: self.name.clone(),
            completed: false,
            checklist: self
                .checklist
                .iter()
                .map(|description| ChecklistItem {
                    id: Uuid::new_v4().to_string(),
                    description: description.clone(),
                    completed: false,
                })
                .collect(),
        }
    }
}

/// An executable unit of maintenance work.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WorkOrder {
    /// Unique identifier for the work order
    pub id: String,

    /// Human-facing number such as `OS-2024-123456`; not guaranteed unique
    pub number: String,

    #[serde(rename = "type")]
    pub kind: WorkOrderType,

    pub status: WorkOrderStatus,

    pub priority: Priority,

    /// Plan that generated this order, if any
    pub plan_id: Option<String>,

    /// Equipment the work applies to (exactly one for plan-generated orders)
    #[serde(default)]
    pub equipment: Vec<EquipmentRef>,

    pub scheduled_date: Date,

    pub title: String,

    pub description: Option<String>,

    #[serde(default)]
    pub tasks: Vec<WorkOrderTask>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assigned_to: Option<String>,

    pub created_by: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub started_at: Option<Timestamp>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<Timestamp>,

    pub created_at: Timestamp,

    pub updated_at: Timestamp,
}

impl WorkOrder {
    /// Number of checklist items completed, and the total.
    pub fn checklist_progress(&self) -> (usize, usize) {
        self.tasks
            .iter()
            .flat_map(|task| task.checklist.iter())
            .fold((0, 0), |(done, total), item| {
                (done + usize::from(item.completed), total + 1)
            })
    }
}

/// Builds a human-facing work order number.
///
/// The number is `OS-{year}-{digits}` where the digits are the six low-order
/// decimal digits of the creation instant in milliseconds, offset by the
/// order's position in its batch so siblings created in the same millisecond
/// differ.
pub fn work_order_number(year: i16, epoch_millis: i64, batch_index: usize) -> String {
    let suffix = (epoch_millis + batch_index as i64).rem_euclid(1_000_000);
    format!("OS-{year}-{suffix:06}")
}
