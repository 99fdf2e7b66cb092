//! Core library for the Upkeep preventive maintenance planner.
//!
//! This crate holds the business logic for maintenance plans, checklist
//! templates and work orders: the schedule advancer, the work order
//! generator, the due-plan scanner, SQLite persistence and markdown display.
//!
//! # Architecture
//!
//! - **Scheduling** ([`schedule`]): pure date arithmetic for advancing a
//!   plan's next execution date by its frequency
//! - **Generation** ([`generator`], [`scanner`]): pure functions that turn due
//!   plans into work orders, reading checklists through the
//!   [`repository`] traits
//! - **Persistence** ([`db`]): a SQLite [`Database`] implementing those traits
//! - **Orchestration** ([`maintenance`]): generation followed by atomic
//!   storage and plan advancement, generic over any repository
//! - **Façade** ([`Upkeep`]): the async API used by the CLI and MCP server
//!
//! # Quick Start
//!
//! ```rust
//! use jiff::civil::date;
//! use upkeep_core::{
//!     models::{EquipmentRef, Frequency, MaintenancePlan, PlanStatus},
//!     scanner::check_and_generate_scheduled_work_orders,
//!     MemoryStore,
//! };
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
//!     equipment: vec![
//!         EquipmentRef::new("eq-1", Some("AC Unit 1".to_string())),
//!         EquipmentRef::new("eq-2", Some("AC Unit 2".to_string())),
//!     ],
//!     created_at: jiff::Timestamp::now(),
//!     updated_at: jiff::Timestamp::now(),
//! };
//!
//! let report =
//!     check_and_generate_scheduled_work_orders(&[plan], &MemoryStore::new(), date(2024, 1, 10));
//! assert_eq!(report.total_work_orders(), 2);
//! ```

pub mod db;
pub mod display;
pub mod error;
pub mod generator;
pub mod maintenance;
pub mod models;
pub mod params;
pub mod repository;
pub mod scanner;
pub mod schedule;
pub mod upkeep;

// Re-export commonly used types
pub use db::Database;
pub use display::{
    Checklists, CreateResult, DeleteResult, GenerationResult, LocalDateTime, OperationStatus,
    PlanSummaries, ScanResult, UpdateResult, WorkOrders,
};
pub use error::{Result, UpkeepError};
pub use models::{
    Checklist, EquipmentRef, Frequency, MaintenancePlan, PlanFilter, PlanStatus, PlanSummary,
    Priority, WorkOrder, WorkOrderFilter, WorkOrderStatus, WorkOrderType,
};
pub use repository::{ChecklistLookup, MemoryStore, PlanRepository, WorkOrderRepository};
pub use scanner::{PlanBatch, PlanFailure, ScanReport};
pub use upkeep::{Upkeep, UpkeepBuilder};
