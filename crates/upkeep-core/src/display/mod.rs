//! Display formatting for models, collections and operation results.
//!
//! Domain models implement [`std::fmt::Display`] directly (see [`models`]);
//! the wrappers here add context such as "Created ..." headers, change lists
//! and empty-collection notices. All output is markdown, rendered by the CLI
//! and returned verbatim by the MCP server.
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │  Domain Models  │    │ Result Wrappers │    │   Formatted     │
//! │ (Plan, Order)   │───▶│ & Collections   │───▶│    Output       │
//! │                 │    │                 │    │  (Terminal/MCP) │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//! ```
//!
//! # Examples
//!
//! ```rust
//! use upkeep_core::display::OperationStatus;
//!
//! let status = OperationStatus::success("Plan activated");
//! assert_eq!(status.to_string(), "Success: Plan activated\n");
//! ```

pub mod collections;
pub mod datetime;
pub mod models;
pub mod results;
pub mod status;

pub use collections::{Checklists, PlanSummaries, WorkOrders};
pub use datetime::{DueDate, LocalDateTime};
pub use results::{CreateResult, DeleteResult, GenerationResult, ScanResult, UpdateResult};
pub use status::OperationStatus;
