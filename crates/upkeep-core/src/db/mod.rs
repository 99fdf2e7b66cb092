//! SQLite persistence for plans, checklists and work orders.
//!
//! [`Database`] owns one connection. Its operations are split by resource
//! across the `*_queries` submodules, and it implements the
//! [`repository`](crate::repository) traits so the generator and scanner can
//! run against it.

use std::path::Path;

use jiff::civil::Date;
use rusqlite::Connection;

use crate::{
    error::{DatabaseResultExt, Result},
    models::{Checklist, MaintenancePlan, WorkOrder, WorkOrderFilter},
    repository::{ChecklistLookup, PlanRepository, WorkOrderRepository},
    scanner::PlanBatch,
};

pub mod checklist_queries;
pub mod migrations;
pub mod plan_queries;
pub mod utils;
pub mod work_order_queries;

/// Database connection and operations handler.
pub struct Database {
    connection: Connection,
}

impl Database {
    /// Opens (or creates) the database file and initializes the schema.
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let connection = Connection::open(path).db_context("Failed to open database connection")?;

        let db = Self { connection };
        db.initialize_schema()?;
        Ok(db)
    }

    /// Opens a private in-memory database.
    pub fn open_in_memory() -> Result<Self> {
        let connection =
            Connection::open_in_memory().db_context("Failed to open in-memory database")?;

        let db = Self { connection };
        db.initialize_schema()?;
        Ok(db)
    }
}

impl ChecklistLookup for Database {
    fn get_checklist(&self, id: &str) -> Result<Option<Checklist>> {
        Database::get_checklist(self, id)
    }
}

impl PlanRepository for Database {
    fn load_plans(&self) -> Result<Vec<MaintenancePlan>> {
        self.list_plans(&Default::default())
    }

    fn get_plan(&self, id: &str) -> Result<Option<MaintenancePlan>> {
        Database::get_plan(self, id)
    }

    fn set_next_execution(&mut self, id: &str, date: Option<Date>) -> Result<bool> {
        Database::set_next_execution(self, id, date)
    }
}

impl WorkOrderRepository for Database {
    fn insert_work_orders(&mut self, orders: &[WorkOrder]) -> Result<()> {
        Database::insert_work_orders(self, orders)
    }

    fn work_orders_for_plan(&self, plan_id: &str) -> Result<Vec<WorkOrder>> {
        self.list_work_orders(&WorkOrderFilter {
            plan_id: Some(plan_id.to_string()),
            ..Default::default()
        })
    }

    fn save_batch(&mut self, batch: &PlanBatch) -> Result<()> {
        Database::save_batch(self, batch)
    }
}
