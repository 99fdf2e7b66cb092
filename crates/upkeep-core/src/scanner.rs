//! Due-plan scanner.
//!
//! Picks every plan that is active, auto-generating and due, and runs the
//! generator for each one. A failing plan is logged and skipped so the rest of
//! the scan continues. The scanner never advances execution dates; see
//! [`crate::maintenance::run_due_plans`] for the persisting variant that does.

use jiff::civil::Date;
use log::{info, warn};
use serde::Serialize;

use crate::{
    generator::generate_work_orders_from_plan,
    models::{MaintenancePlan, WorkOrder},
    repository::ChecklistLookup,
};

/// Work orders produced for a single plan.
#[derive(Debug, Clone, Serialize)]
pub struct PlanBatch {
    pub plan_id: String,
    pub plan_name: String,
    pub work_orders: Vec<WorkOrder>,

    /// New next execution date to store with the batch, if the plan advances
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_execution_date: Option<Date>,
}

/// A plan the scan skipped, with the reason.
#[derive(Debug, Clone, Serialize)]
pub struct PlanFailure {
    pub plan_id: String,
    pub plan_name: String,
    pub reason: String,
}

/// Outcome of one scan over the plan set.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ScanReport {
    pub generated: Vec<PlanBatch>,
    pub failures: Vec<PlanFailure>,
}

impl ScanReport {
    /// Every generated work order, in plan order then equipment order.
    pub fn work_orders(&self) -> impl Iterator<Item = &WorkOrder> {
        self.generated.iter().flat_map(|batch| batch.work_orders.iter())
    }

    pub fn total_work_orders(&self) -> usize {
        self.generated.iter().map(|batch| batch.work_orders.len()).sum()
    }

    /// True when no plan was due.
    pub fn is_empty(&self) -> bool {
        self.generated.is_empty() && self.failures.is_empty()
    }

    pub(crate) fn record_failure(&mut self, plan: &MaintenancePlan, reason: String) {
        warn!("Skipping plan {} ({}): {reason}", plan.id, plan.name);
        self.failures.push(PlanFailure {
            plan_id: plan.id.clone(),
            plan_name: plan.name.clone(),
            reason,
        });
    }
}

/// Generates work orders for every plan due on `today`.
pub fn check_and_generate_scheduled_work_orders<C>(
    plans: &[MaintenancePlan],
    checklists: &C,
    today: Date,
) -> ScanReport
where
    C: ChecklistLookup + ?Sized,
{
    let mut report = ScanReport::default();

    for plan in plans.iter().filter(|plan| plan.is_due(today)) {
        match generate_work_orders_from_plan(plan, None, checklists, today) {
            Ok(work_orders) => {
                info!(
                    "Generated {} work order(s) for plan {} ({})",
                    work_orders.len(),
                    plan.id,
                    plan.name
                );
                report.generated.push(PlanBatch {
                    plan_id: plan.id.clone(),
                    plan_name: plan.name.clone(),
                    work_orders,
                    next_execution_date: None,
                });
            }
            Err(e) => report.record_failure(plan, e.to_string()),
        }
    }

    report
}

#[cfg(test)]
mod tests {
    use jiff::{civil::date, Timestamp};

    use super::*;
    use crate::{
        models::{EquipmentRef, Frequency, PlanStatus},
        repository::MemoryStore,
    };

    fn plan(id: &str, next: Option<Date>) -> MaintenancePlan {
        MaintenancePlan {
            id: id.to_string(),
            name: format!("Plan {id}"),
            description: None,
            frequency: Frequency::Weekly,
            status: PlanStatus::Active,
            start_date: None,
            checklist_id: None,
            next_execution_date: next,
            auto_generate: true,
            equipment: vec![EquipmentRef::new(format!("{id}-eq"), None)],
            created_at: Timestamp::now(),
            updated_at: Timestamp::now(),
        }
    }

    #[test]
    fn test_only_due_plans_generate() {
        let today = date(2024, 6, 10);
        let mut inactive = plan("inactive", Some(today));
        inactive.status = PlanStatus::Inactive;
        let mut manual = plan("manual", Some(today));
        manual.auto_generate = false;

        let plans = vec![
            plan("due-today", Some(today)),
            plan("overdue", Some(date(2024, 5, 1))),
            plan("future", Some(date(2024, 6, 11))),
            plan("unscheduled", None),
            inactive,
            manual,
        ];

        let report = check_and_generate_scheduled_work_orders(&plans, &MemoryStore::new(), today);
        let ids: Vec<&str> = report.generated.iter().map(|b| b.plan_id.as_str()).collect();
        assert_eq!(ids, ["due-today", "overdue"]);
        assert!(report.failures.is_empty());
        assert_eq!(report.total_work_orders(), 2);
    }

    #[test]
    fn test_due_orders_use_stored_execution_date() {
        let today = date(2024, 6, 10);
        let plans = vec![plan("overdue", Some(date(2024, 5, 1)))];

        let report = check_and_generate_scheduled_work_orders(&plans, &MemoryStore::new(), today);
        let order = report.work_orders().next().unwrap();
        assert_eq!(order.scheduled_date, date(2024, 5, 1));
    }

    #[test]
    fn test_failing_plan_does_not_abort_scan() {
        let today = date(2024, 6, 10);
        let mut broken = plan("broken", Some(today));
        broken.equipment.clear();
        let plans = vec![plan("first", Some(today)), broken, plan("last", Some(today))];

        let report = check_and_generate_scheduled_work_orders(&plans, &MemoryStore::new(), today);
        assert_eq!(report.generated.len(), 2);
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].plan_id, "broken");
        assert!(report.failures[0].reason.contains("no equipment"));
    }

    #[test]
    fn test_scan_never_advances() {
        let today = date(2024, 6, 10);
        let plans = vec![plan("due", Some(today))];

        let report = check_and_generate_scheduled_work_orders(&plans, &MemoryStore::new(), today);
        assert!(report.generated.iter().all(|b| b.next_execution_date.is_none()));
        assert_eq!(plans[0].next_execution_date, Some(today));
    }

    #[test]
    fn test_empty_report() {
        let report = check_and_generate_scheduled_work_orders(&[], &MemoryStore::new(), date(2024, 1, 1));
        assert!(report.is_empty());
        assert_eq!(report.work_orders().count(), 0);
    }
}
