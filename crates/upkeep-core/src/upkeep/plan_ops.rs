//! Plan operations: CRUD, generation, advancement and the due-plan scan.

use super::Upkeep;
use crate::{
    display::{DeleteResult, PlanSummaries, UpdateResult},
    error::{Result, UpkeepError},
    maintenance,
    models::{
        requests::parse_date, MaintenancePlan, NewPlan, PlanChanges, PlanFilter, PlanStatus,
        PlanSummary,
    },
    params::{CreatePlan, DeletePlan, GenerateWorkOrders, Id, ListPlans, UpdatePlan},
    scanner::{PlanBatch, ScanReport},
    schedule::today,
};

impl Upkeep {
    /// Creates a plan and schedules its first execution.
    pub async fn create_plan(&self, params: &CreatePlan) -> Result<MaintenancePlan> {
        let new_plan = NewPlan::try_from(params)?;
        self.with_db(move |db| db.create_plan(&new_plan, today()))
            .await
    }

    /// Retrieves a plan with its equipment.
    pub async fn get_plan(&self, params: &Id) -> Result<Option<MaintenancePlan>> {
        let id = params.id.clone();
        self.with_db(move |db| db.get_plan(&id)).await
    }

    /// Lists plans matching a filter.
    pub async fn list_plans(&self, filter: PlanFilter) -> Result<Vec<MaintenancePlan>> {
        self.with_db(move |db| db.list_plans(&filter)).await
    }

    /// Lists plans as summaries for display.
    pub async fn list_plans_summary(&self, params: &ListPlans) -> Result<PlanSummaries> {
        let filter = PlanFilter::try_from(params)?;
        let plans = self.list_plans(filter).await?;
        Ok(PlanSummaries(plans.iter().map(PlanSummary::from).collect()))
    }

    /// Updates a plan's fields, rescheduling it when the frequency or start
    /// date changes.
    pub async fn update_plan(&self, params: &UpdatePlan) -> Result<UpdateResult<MaintenancePlan>> {
        let changes = PlanChanges::try_from(params)?;
        let id = params.id.clone();

        let (plan, changed) = self
            .with_db(move |db| {
                db.update_plan(&id, &changes, today())?
                    .ok_or(UpkeepError::PlanNotFound { id })
            })
            .await?;

        let mut changes: Vec<String> = changed.iter().map(|f| format!("Updated {f}")).collect();
        if PlanChanges::reschedules(&changed) {
            if let Some(next) = plan.next_execution_date {
                changes.push(format!("Rescheduled next execution to {next}"));
            }
        }
        Ok(UpdateResult::with_changes(plan, changes))
    }

    /// Marks a plan active so the scanner considers it again.
    pub async fn activate_plan(&self, params: &Id) -> Result<MaintenancePlan> {
        self.set_plan_status(params, PlanStatus::Active).await
    }

    /// Marks a plan inactive; the scanner skips it.
    pub async fn deactivate_plan(&self, params: &Id) -> Result<MaintenancePlan> {
        self.set_plan_status(params, PlanStatus::Inactive).await
    }

    async fn set_plan_status(&self, params: &Id, status: PlanStatus) -> Result<MaintenancePlan> {
        let id = params.id.clone();
        self.with_db(move |db| {
            db.set_plan_status(&id, status)?
                .ok_or(UpkeepError::PlanNotFound { id })
        })
        .await
    }

    /// Permanently deletes a plan after explicit confirmation.
    ///
    /// Work orders generated from it are kept without a plan reference.
    pub async fn delete_plan(&self, params: &DeletePlan) -> Result<DeleteResult<MaintenancePlan>> {
        if !params.confirmed {
            return Err(UpkeepError::invalid_input("confirmed")
                .with_reason("deletion must be confirmed; it cannot be undone"));
        }

        let id = params.id.clone();
        let plan = self
            .with_db(move |db| {
                let plan = db
                    .get_plan(&id)?
                    .ok_or_else(|| UpkeepError::PlanNotFound { id: id.clone() })?;
                db.delete_plan(&id)?;
                Ok(plan)
            })
            .await?;

        Ok(DeleteResult::new(plan))
    }

    /// Generates and stores one work order per piece of equipment in a plan.
    ///
    /// The whole batch is written in one transaction. With `advance` set the
    /// plan's next execution date moves forward in the same transaction.
    pub async fn generate_work_orders(&self, params: &GenerateWorkOrders) -> Result<PlanBatch> {
        let scheduled_date = params
            .scheduled_date
            .as_deref()
            .map(|d| parse_date("scheduled_date", d))
            .transpose()?;
        let plan_id = params.plan_id.clone();
        let advance = params.advance;

        self.with_db(move |db| {
            maintenance::generate_for_plan(db, &plan_id, scheduled_date, advance, today())
        })
        .await
    }

    /// Moves a plan's next execution date past today.
    ///
    /// Returns `None` if the plan does not exist.
    pub async fn advance_plan(&self, params: &Id) -> Result<Option<MaintenancePlan>> {
        let id = params.id.clone();
        self.with_db(move |db| maintenance::advance_plan(db, &id, today()))
            .await
    }

    /// Generates work orders for every due plan and advances those plans.
    pub async fn run_due_plans(&self) -> Result<ScanReport> {
        self.with_db(|db| maintenance::run_due_plans(db, today()))
            .await
    }
}
