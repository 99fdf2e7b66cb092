//! Display implementations for domain models.
//!
//! Everything renders as markdown so the CLI can hand it to the terminal
//! renderer and the MCP server can return it as text.

use std::fmt;

use super::datetime::{DueDate, LocalDateTime};
use crate::{
    models::{
        Checklist, EquipmentRef, Frequency, MaintenancePlan, PlanStatus, PlanSummary, Priority,
        WorkOrder, WorkOrderStatus, WorkOrderTask, WorkOrderType,
    },
    schedule::today,
};

impl fmt::Display for PlanStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for WorkOrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for WorkOrderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for EquipmentRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name.as_deref() {
            Some(name) if !name.trim().is_empty() => write!(f, "{name} ({})", self.id),
            _ => write!(f, "{}", self.id),
        }
    }
}

fn yes_no(value: bool) -> &'static str {
    if value {
        "yes"
    } else {
        "no"
    }
}

impl fmt::Display for MaintenancePlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# {}", self.name)?;
        writeln!(f)?;

        writeln!(f, "- ID: {}", self.id)?;
        writeln!(f, "- Status: {}", self.status)?;
        writeln!(f, "- Frequency: {}", self.frequency)?;
        if let Some(start) = self.start_date {
            writeln!(f, "- Start date: {start}")?;
        }
        match self.next_execution_date {
            Some(next) => writeln!(f, "- Next execution: {}", DueDate::new(next, today()))?,
            None => writeln!(f, "- Next execution: not scheduled")?,
        }
        writeln!(f, "- Auto-generate: {}", yes_no(self.auto_generate))?;
        if let Some(checklist) = &self.checklist_id {
            writeln!(f, "- Checklist: {checklist}")?;
        }
        writeln!(f, "- Created: {}", LocalDateTime(&self.created_at))?;
        writeln!(f, "- Updated: {}", LocalDateTime(&self.updated_at))?;

        if let Some(desc) = &self.description {
            writeln!(f)?;
            writeln!(f, "{desc}")?;
        }

        if self.equipment.is_empty() {
            writeln!(f, "\nNo equipment in this plan.")?;
        } else {
            writeln!(f, "\n## Equipment")?;
            writeln!(f)?;
            for equipment in &self.equipment {
                writeln!(f, "- {equipment}")?;
            }
        }

        Ok(())
    }
}

impl fmt::Display for PlanSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "## {} (ID: {})", self.name, self.id)?;
        writeln!(f)?;

        if let Some(desc) = &self.description {
            writeln!(f, "- **Description**: {desc}")?;
        }
        writeln!(f, "- **Frequency**: {}", self.frequency)?;
        if self.status == PlanStatus::Inactive {
            writeln!(f, "- **Status**: {}", self.status)?;
        }
        if let Some(next) = self.next_execution_date {
            writeln!(f, "- **Next execution**: {}", DueDate::new(next, today()))?;
        }
        writeln!(f, "- **Auto-generate**: {}", yes_no(self.auto_generate))?;
        writeln!(f, "- **Equipment**: {}", self.equipment_count)?;
        writeln!(f)?;

        Ok(())
    }
}

impl fmt::Display for Checklist {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "## {} (ID: {})", self.name, self.id)?;
        writeln!(f)?;

        if let Some(desc) = &self.description {
            writeln!(f, "{desc}")?;
            writeln!(f)?;
        }

        if self.items.is_empty() {
            writeln!(f, "No items.")?;
        } else {
            for (n, item) in self.items.iter().enumerate() {
                writeln!(f, "{}. {}", n + 1, item.description)?;
            }
        }
        writeln!(f)?;

        Ok(())
    }
}

impl fmt::Display for WorkOrderTask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let done = self.checklist.iter().filter(|i| i.completed).count();
        let mark = if self.completed { " ✓" } else { "" };
        writeln!(
            f,
            "### {} ({done}/{}){mark}",
            self.name,
            self.checklist.len()
        )?;
        writeln!(f)?;

        for item in &self.checklist {
            let check = if item.completed { "x" } else { " " };
            writeln!(f, "- [{check}] {} `{}`", item.description, item.id)?;
        }
        writeln!(f)?;

        Ok(())
    }
}

impl fmt::Display for WorkOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "# {}: {} ({})",
            self.number,
            self.title,
            self.status.with_icon()
        )?;
        writeln!(f)?;

        writeln!(f, "- ID: {}", self.id)?;
        writeln!(f, "- Type: {}", self.kind)?;
        writeln!(f, "- Priority: {}", self.priority)?;
        writeln!(f, "- Scheduled: {}", self.scheduled_date)?;
        if let Some(plan_id) = &self.plan_id {
            writeln!(f, "- Plan: {plan_id}")?;
        }
        for equipment in &self.equipment {
            writeln!(f, "- Equipment: {equipment}")?;
        }
        if let Some(assignee) = &self.assigned_to {
            writeln!(f, "- Assigned to: {assignee}")?;
        }
        writeln!(f, "- Created by: {}", self.created_by)?;
        if let Some(started) = &self.started_at {
            writeln!(f, "- Started: {}", LocalDateTime(started))?;
        }
        if let Some(completed) = &self.completed_at {
            writeln!(f, "- Completed: {}", LocalDateTime(completed))?;
        }
        writeln!(f, "- Created: {}", LocalDateTime(&self.created_at))?;

        if let Some(desc) = &self.description {
            writeln!(f)?;
            writeln!(f, "{desc}")?;
        }

        if !self.tasks.is_empty() {
            writeln!(f, "\n## Tasks")?;
            writeln!(f)?;
            for task in &self.tasks {
                write!(f, "{task}")?;
            }
        }

        Ok(())
    }
}

/// Compact one-entry form used in work order lists.
pub(crate) fn fmt_work_order_row(order: &WorkOrder, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let (done, total) = order.checklist_progress();
    writeln!(f, "## {}: {} (ID: {})", order.number, order.title, order.id)?;
    writeln!(f)?;
    writeln!(f, "- **Status**: {}", order.status.with_icon())?;
    writeln!(f, "- **Scheduled**: {}", order.scheduled_date)?;
    writeln!(f, "- **Priority**: {}", order.priority)?;
    if total > 0 {
        writeln!(f, "- **Checklist**: {done}/{total}")?;
    }
    writeln!(f)
}
