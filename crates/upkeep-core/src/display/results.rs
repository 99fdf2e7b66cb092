//! Result wrapper types for displaying operation outcomes.
//!
//! Create, update and delete results share a one-line header followed by the
//! affected resource. Generation and scan results list the orders produced
//! per plan.

use std::fmt;

use crate::{
    models::{Checklist, MaintenancePlan, WorkOrder},
    scanner::{PlanBatch, ScanReport},
};

/// Wrapper type for displaying the result of create operations.
///
/// # Examples
///
/// ```rust
/// use jiff::Timestamp;
/// use upkeep_core::{display::CreateResult, models::Checklist};
///
/// let checklist = Checklist {
///     id: "cl-1".to_string(),
///     name: "Pump inspection".to_string(),
///     description: None,
///     items: vec![],
///     created_at: Timestamp::now(),
///     updated_at: Timestamp::now(),
/// };
///
/// let output = CreateResult::new(checklist).to_string();
/// assert!(output.starts_with("Created checklist with ID: cl-1"));
/// ```
#[derive(Debug)]
pub struct CreateResult<T> {
    pub resource: T,
}

impl<T> CreateResult<T> {
    pub fn new(resource: T) -> Self {
        Self { resource }
    }
}

impl fmt::Display for CreateResult<MaintenancePlan> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Created plan with ID: {}", self.resource.id)?;
        writeln!(f)?;
        write!(f, "{}", self.resource)
    }
}

impl fmt::Display for CreateResult<Checklist> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Created checklist with ID: {}", self.resource.id)?;
        writeln!(f)?;
        write!(f, "{}", self.resource)
    }
}

impl fmt::Display for CreateResult<WorkOrder> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Created work order {} with ID: {}",
            self.resource.number, self.resource.id
        )?;
        writeln!(f)?;
        write!(f, "{}", self.resource)
    }
}

/// Wrapper type for displaying the result of update operations, with the
/// list of changes that were made.
#[derive(Debug)]
pub struct UpdateResult<T> {
    pub resource: T,
    pub changes: Vec<String>,
}

impl<T> UpdateResult<T> {
    pub fn new(resource: T) -> Self {
        Self {
            resource,
            changes: Vec::new(),
        }
    }

    pub fn with_changes(resource: T, changes: Vec<String>) -> Self {
        Self { resource, changes }
    }
}

fn fmt_changes(changes: &[String], f: &mut fmt::Formatter<'_>) -> fmt::Result {
    if changes.is_empty() {
        writeln!(f)?;
        writeln!(f, "No changes made.")?;
    } else {
        writeln!(f)?;
        writeln!(f, "Changes made:")?;
        for change in changes {
            writeln!(f, "- {change}")?;
        }
    }
    writeln!(f)
}

impl fmt::Display for UpdateResult<MaintenancePlan> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Updated plan with ID: {}", self.resource.id)?;
        fmt_changes(&self.changes, f)?;
        write!(f, "{}", self.resource)
    }
}

impl fmt::Display for UpdateResult<WorkOrder> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Updated work order {} (ID: {})",
            self.resource.number, self.resource.id
        )?;
        fmt_changes(&self.changes, f)?;
        write!(f, "{}", self.resource)
    }
}

/// Wrapper type for displaying the result of delete operations.
#[derive(Debug)]
pub struct DeleteResult<T> {
    pub resource: T,
}

impl<T> DeleteResult<T> {
    pub fn new(resource: T) -> Self {
        Self { resource }
    }
}

impl fmt::Display for DeleteResult<MaintenancePlan> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Deleted plan '{}' (ID: {})",
            self.resource.name, self.resource.id
        )
    }
}

impl fmt::Display for DeleteResult<Checklist> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Deleted checklist '{}' (ID: {})",
            self.resource.name, self.resource.id
        )
    }
}

impl fmt::Display for DeleteResult<WorkOrder> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Deleted work order {} '{}' (ID: {})",
            self.resource.number, self.resource.title, self.resource.id
        )
    }
}

fn fmt_batch(batch: &PlanBatch, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    writeln!(
        f,
        "## {} (ID: {}): {} work order(s)",
        batch.plan_name,
        batch.plan_id,
        batch.work_orders.len()
    )?;
    writeln!(f)?;
    for order in &batch.work_orders {
        writeln!(
            f,
            "- {}: {} (scheduled {}, ID: {})",
            order.number, order.title, order.scheduled_date, order.id
        )?;
    }
    if let Some(next) = batch.next_execution_date {
        writeln!(f)?;
        writeln!(f, "Next execution: {next}")?;
    }
    writeln!(f)
}

/// Work orders generated from one plan.
pub struct GenerationResult(pub PlanBatch);

impl fmt::Display for GenerationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Generated {} work order(s) from plan '{}'",
            self.0.work_orders.len(),
            self.0.plan_name
        )?;
        writeln!(f)?;
        fmt_batch(&self.0, f)
    }
}

/// Outcome of a due-plan scan.
pub struct ScanResult(pub ScanReport);

impl fmt::Display for ScanResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let report = &self.0;
        if report.is_empty() {
            return writeln!(f, "No plans are due.");
        }

        writeln!(
            f,
            "Generated {} work order(s) for {} due plan(s)",
            report.total_work_orders(),
            report.generated.len()
        )?;
        writeln!(f)?;
        for batch in &report.generated {
            fmt_batch(batch, f)?;
        }

        if !report.failures.is_empty() {
            writeln!(f, "## Skipped")?;
            writeln!(f)?;
            for failure in &report.failures {
                writeln!(
                    f,
                    "- {} (ID: {}): {}",
                    failure.plan_name, failure.plan_id, failure.reason
                )?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scanner::PlanFailure;

    #[test]
    fn test_scan_result_empty() {
        let output = ScanResult(ScanReport::default()).to_string();
        assert_eq!(output, "No plans are due.\n");
    }

    #[test]
    fn test_scan_result_lists_failures() {
        let report = ScanReport {
            generated: vec![],
            failures: vec![PlanFailure {
                plan_id: "p1".to_string(),
                plan_name: "Boiler".to_string(),
                reason: "Plan p1 has no equipment; select at least one piece of equipment"
                    .to_string(),
            }],
        };
        let output = ScanResult(report).to_string();
        assert!(output.contains("Generated 0 work order(s) for 0 due plan(s)"));
        assert!(output.contains("## Skipped"));
        assert!(output.contains("- Boiler (ID: p1): Plan p1 has no equipment"));
    }

    #[test]
    fn test_generation_result_header() {
        let batch = PlanBatch {
            plan_id: "p1".to_string(),
            plan_name: "Boiler".to_string(),
            work_orders: vec![],
            next_execution_date: Some(jiff::civil::date(2024, 7, 1)),
        };
        let output = GenerationResult(batch).to_string();
        assert!(output.starts_with("Generated 0 work order(s) from plan 'Boiler'"));
        assert!(output.contains("Next execution: 2024-07-01"));
    }
}
