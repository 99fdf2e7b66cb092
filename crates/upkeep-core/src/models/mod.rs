//! Data models for maintenance plans, checklists and work orders.
//!
//! Display implementations for these models live in
//! [`crate::display::models`], keeping presentation apart from the data
//! structures.
//!
//! # Examples
//!
//! ```rust
//! use jiff::{civil::date, Timestamp};
//! use upkeep_core::models::{EquipmentRef, Frequency, MaintenancePlan, PlanStatus};
//!
//! let plan = MaintenancePlan {
//!     id: "plan-1".to_string(),
//!     name: "Monthly AC Check".to_string(),
//!     description: Some("Check filters".to_string()),
//!     frequency: Frequency::Monthly,
//!     status: PlanStatus::Active,
//!     start_date: None,
//!     checklist_id: None,
//!     next_execution_date: Some(date(2024, 1, 10)),
//!     auto_generate: true,
//!     equipment: vec![EquipmentRef::new("eq-1", Some("AC Unit 1".to_string()))],
//!     created_at: Timestamp::now(),
//!     updated_at: Timestamp::now(),
//! };
//! assert!(plan.is_due(date(2024, 1, 10)));
//! assert!(!plan.is_due(date(2024, 1, 9)));
//! ```

pub mod checklist;
pub mod filters;
pub mod frequency;
pub mod plan;
pub mod requests;
pub mod status;
pub mod summary;
pub mod work_order;

#[cfg(test)]
mod tests;

pub use checklist::{Checklist, ChecklistEntry};
pub use filters::{PlanFilter, WorkOrderFilter};
pub use frequency::{Frequency, Period};
pub use plan::{EquipmentRef, MaintenancePlan};
pub use requests::{NewPlan, NewWorkOrder, PlanChanges};
pub use status::{PlanStatus, Priority, WorkOrderStatus, WorkOrderType};
pub use summary::PlanSummary;
pub use work_order::{work_order_number, ChecklistItem, TaskTemplate, WorkOrder, WorkOrderTask};
