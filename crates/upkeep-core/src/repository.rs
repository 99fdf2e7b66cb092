//! Storage seams used by the generator, the scanner and the maintenance
//! operations.
//!
//! [`crate::Database`] implements every trait against SQLite; [`MemoryStore`]
//! keeps everything in vectors for tests and embedders that bring their own
//! persistence.

use jiff::{civil::Date, Timestamp};

use crate::{
    error::{Result, UpkeepError},
    models::{Checklist, MaintenancePlan, WorkOrder},
    scanner::PlanBatch,
};

/// Read access to checklist templates.
pub trait ChecklistLookup {
    /// Looks up a checklist by id. A miss is `Ok(None)`, not an error.
    fn get_checklist(&self, id: &str) -> Result<Option<Checklist>>;
}

/// Persistence for maintenance plans.
pub trait PlanRepository {
    /// Loads every plan, active or not.
    fn load_plans(&self) -> Result<Vec<MaintenancePlan>>;

    fn get_plan(&self, id: &str) -> Result<Option<MaintenancePlan>>;

    /// Stores a new next execution date. Returns `false` if the plan does not
    /// exist.
    fn set_next_execution(&mut self, id: &str, date: Option<Date>) -> Result<bool>;
}

/// Persistence for work orders.
pub trait WorkOrderRepository {
    /// Inserts every order or none of them.
    fn insert_work_orders(&mut self, orders: &[WorkOrder]) -> Result<()>;

    /// Orders generated from the given plan, most recently scheduled first.
    fn work_orders_for_plan(&self, plan_id: &str) -> Result<Vec<WorkOrder>>;

    /// Inserts a plan's batch and, when the batch carries one, stores the
    /// plan's new next execution date, all-or-nothing.
    fn save_batch(&mut self, batch: &PlanBatch) -> Result<()>;
}

/// In-memory implementation of every repository trait.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    pub plans: Vec<MaintenancePlan>,
    pub checklists: Vec<Checklist>,
    pub work_orders: Vec<WorkOrder>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_plans(mut self, plans: impl IntoIterator<Item = MaintenancePlan>) -> Self {
        self.plans.extend(plans);
        self
    }

    pub fn with_checklists(mut self, checklists: impl IntoIterator<Item = Checklist>) -> Self {
        self.checklists.extend(checklists);
        self
    }
}

impl ChecklistLookup for MemoryStore {
    fn get_checklist(&self, id: &str) -> Result<Option<Checklist>> {
        Ok(self.checklists.iter().find(|c| c.id == id).cloned())
    }
}

impl PlanRepository for MemoryStore {
    fn load_plans(&self) -> Result<Vec<MaintenancePlan>> {
        Ok(self.plans.clone())
    }

    fn get_plan(&self, id: &str) -> Result<Option<MaintenancePlan>> {
        Ok(self.plans.iter().find(|p| p.id == id).cloned())
    }

    fn set_next_execution(&mut self, id: &str, date: Option<Date>) -> Result<bool> {
        match self.plans.iter_mut().find(|p| p.id == id) {
            Some(plan) => {
                plan.next_execution_date = date;
                plan.updated_at = Timestamp::now();
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

impl WorkOrderRepository for MemoryStore {
    fn insert_work_orders(&mut self, orders: &[WorkOrder]) -> Result<()> {
        self.work_orders.extend_from_slice(orders);
        Ok(())
    }

    fn work_orders_for_plan(&self, plan_id: &str) -> Result<Vec<WorkOrder>> {
        let mut orders: Vec<WorkOrder> = self
            .work_orders
            .iter()
            .filter(|o| o.plan_id.as_deref() == Some(plan_id))
            .cloned()
            .collect();
        orders.sort_by(|a, b| b.scheduled_date.cmp(&a.scheduled_date));
        Ok(orders)
    }

    fn save_batch(&mut self, batch: &PlanBatch) -> Result<()> {
        if let Some(date) = batch.next_execution_date {
            // Check before inserting so a missing plan leaves the store untouched
            if !self.plans.iter().any(|p| p.id == batch.plan_id) {
                return Err(UpkeepError::PlanNotFound {
                    id: batch.plan_id.clone(),
                });
            }
            self.set_next_execution(&batch.plan_id, Some(date))?;
        }
        self.insert_work_orders(&batch.work_orders)
    }
}
