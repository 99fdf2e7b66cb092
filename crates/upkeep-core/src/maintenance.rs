//! Generation and advancement wired to storage.
//!
//! These functions combine the pure [`generator`](crate::generator),
//! [`scanner`](crate::scanner) and [`schedule`](crate::schedule) modules with
//! any store implementing the repository traits. Each plan's batch is written
//! with [`WorkOrderRepository::save_batch`], so a plan never ends up with a
//! partial set of orders.

use jiff::civil::Date;
use log::{debug, info};

use crate::{
    error::{Result, UpkeepError},
    generator::generate_work_orders_from_plan,
    models::MaintenancePlan,
    repository::{ChecklistLookup, PlanRepository, WorkOrderRepository},
    scanner::{check_and_generate_scheduled_work_orders, PlanBatch, ScanReport},
    schedule::next_execution_date,
};

/// The date a plan moves to on its next advance.
///
/// Advances from the stored next execution date, else the start date, else
/// `today`.
pub fn advanced_execution_date(plan: &MaintenancePlan, today: Date) -> Result<Date> {
    let base = plan
        .next_execution_date
        .or(plan.start_date)
        .unwrap_or(today);
    next_execution_date(base, plan.frequency, today)
}

/// Re-reads a plan, advances its next execution date and stores it.
///
/// Returns the updated plan, or `None` if it does not exist.
pub fn advance_plan<S>(store: &mut S, plan_id: &str, today: Date) -> Result<Option<MaintenancePlan>>
where
    S: PlanRepository + ?Sized,
{
    let Some(mut plan) = store.get_plan(plan_id)? else {
        return Ok(None);
    };

    let next = advanced_execution_date(&plan, today)?;
    if !store.set_next_execution(plan_id, Some(next))? {
        return Ok(None);
    }
    info!("Advanced plan {plan_id} to {next}");

    plan.next_execution_date = Some(next);
    Ok(Some(plan))
}

/// Generates and stores the work orders for one plan.
///
/// With `advance` set, the plan's next execution date moves forward in the
/// same write as the orders.
///
/// # Errors
///
/// [`UpkeepError::PlanNotFound`] for an unknown plan and
/// [`UpkeepError::NoEquipment`] for a plan without equipment.
pub fn generate_for_plan<S>(
    store: &mut S,
    plan_id: &str,
    scheduled_date: Option<Date>,
    advance: bool,
    today: Date,
) -> Result<PlanBatch>
where
    S: PlanRepository + WorkOrderRepository + ChecklistLookup + ?Sized,
{
    let plan = store
        .get_plan(plan_id)?
        .ok_or_else(|| UpkeepError::PlanNotFound {
            id: plan_id.to_string(),
        })?;

    let work_orders = generate_work_orders_from_plan(&plan, scheduled_date, &*store, today)?;
    let next_execution_date = if advance {
        Some(advanced_execution_date(&plan, today)?)
    } else {
        None
    };

    let batch = PlanBatch {
        plan_id: plan.id,
        plan_name: plan.name,
        work_orders,
        next_execution_date,
    };
    store.save_batch(&batch)?;
    info!(
        "Stored {} work order(s) for plan {}",
        batch.work_orders.len(),
        batch.plan_id
    );

    Ok(batch)
}

/// Scans every plan, stores each due plan's batch and advances that plan.
///
/// A plan that fails to generate or to store is reported in
/// [`ScanReport::failures`] and the scan moves on; only batches that were
/// stored appear in [`ScanReport::generated`].
pub fn run_due_plans<S>(store: &mut S, today: Date) -> Result<ScanReport>
where
    S: PlanRepository + WorkOrderRepository + ChecklistLookup + ?Sized,
{
    let plans = store.load_plans()?;
    let scanned = check_and_generate_scheduled_work_orders(&plans, &*store, today);

    let mut report = ScanReport {
        generated: Vec::with_capacity(scanned.generated.len()),
        failures: scanned.failures,
    };

    for mut batch in scanned.generated {
        let Some(plan) = plans.iter().find(|p| p.id == batch.plan_id) else {
            continue;
        };

        let stored = advanced_execution_date(plan, today).and_then(|next| {
            batch.next_execution_date = Some(next);
            store.save_batch(&batch)
        });

        match stored {
            Ok(()) => {
                debug!(
                    "Plan {} next execution moved to {:?}",
                    batch.plan_id, batch.next_execution_date
                );
                report.generated.push(batch);
            }
            Err(e) => report.record_failure(plan, e.to_string()),
        }
    }

    info!(
        "Due-plan scan stored {} work order(s) for {} plan(s); {} plan(s) skipped",
        report.total_work_orders(),
        report.generated.len(),
        report.failures.len()
    );
    Ok(report)
}
