//! Status enumerations for plans and work orders.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Activity status of a maintenance plan.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum PlanStatus {
    /// Plan is active and eligible for generation
    #[default]
    #[serde(alias = "Ativo")]
    Active,

    /// Plan is paused; the scanner ignores it
    #[serde(alias = "Inativo")]
    Inactive,
}

impl FromStr for PlanStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "active" | "ativo" => Ok(PlanStatus::Active),
            "inactive" | "inativo" => Ok(PlanStatus::Inactive),
            _ => Err(format!("Invalid plan status: {s}")),
        }
    }
}

impl PlanStatus {
    /// Database string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            PlanStatus::Active => "active",
            PlanStatus::Inactive => "inactive",
        }
    }
}

/// Lifecycle status of a work order.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum WorkOrderStatus {
    /// Newly created, waiting for a technician
    #[default]
    Open,

    /// Work has started
    InProgress,

    /// Work is finished; terminal
    Completed,

    /// Work was called off; can be reopened
    Cancelled,
}

impl FromStr for WorkOrderStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "open" => Ok(WorkOrderStatus::Open),
            "inprogress" | "in_progress" | "in-progress" => Ok(WorkOrderStatus::InProgress),
            "completed" | "done" => Ok(WorkOrderStatus::Completed),
            "cancelled" | "canceled" => Ok(WorkOrderStatus::Cancelled),
            _ => Err(format!("Invalid work order status: {s}")),
        }
    }
}

impl WorkOrderStatus {
    /// Database string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            WorkOrderStatus::Open => "open",
            WorkOrderStatus::InProgress => "in_progress",
            WorkOrderStatus::Completed => "completed",
            WorkOrderStatus::Cancelled => "cancelled",
        }
    }

    /// Statuses reachable from this one.
    ///
    /// Completed orders are frozen; cancelled orders may only be reopened.
    pub fn allowed_transitions(&self) -> &'static [WorkOrderStatus] {
        match self {
            WorkOrderStatus::Open => &[WorkOrderStatus::InProgress, WorkOrderStatus::Cancelled],
            WorkOrderStatus::InProgress => &[
                WorkOrderStatus::Completed,
                WorkOrderStatus::Open,
                WorkOrderStatus::Cancelled,
            ],
            WorkOrderStatus::Completed => &[],
            WorkOrderStatus::Cancelled => &[WorkOrderStatus::Open],
        }
    }

    /// Whether a change from `self` to `next` is permitted.
    pub fn can_transition_to(&self, next: WorkOrderStatus) -> bool {
        self.allowed_transitions().contains(&next)
    }

    /// Get status with icon formatting for display.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use upkeep_core::models::WorkOrderStatus;
    ///
    /// assert_eq!(WorkOrderStatus::Open.with_icon(), "○ Open");
    /// assert_eq!(WorkOrderStatus::Completed.with_icon(), "✓ Completed");
    /// ```
    pub fn with_icon(&self) -> &'static str {
        match self {
            WorkOrderStatus::Open => "○ Open",
            WorkOrderStatus::InProgress => "➤ In Progress",
            WorkOrderStatus::Completed => "✓ Completed",
            WorkOrderStatus::Cancelled => "✗ Cancelled",
        }
    }
}

/// Origin of a work order.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum WorkOrderType {
    /// Generated from a maintenance plan
    Preventive,

    /// Created by hand in response to a failure
    #[default]
    Corrective,
}

impl FromStr for WorkOrderType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "preventive" | "preventiva" => Ok(WorkOrderType::Preventive),
            "corrective" | "corretiva" => Ok(WorkOrderType::Corrective),
            _ => Err(format!("Invalid work order type: {s}")),
        }
    }
}

impl WorkOrderType {
    pub fn as_str(&self) -> &'static str {
        match self {
            WorkOrderType::Preventive => "preventive",
            WorkOrderType::Corrective => "corrective",
        }
    }
}

/// Work order priority.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Default)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
    Critical,
}

impl FromStr for Priority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "low" | "baixa" => Ok(Priority::Low),
            "medium" | "média" | "media" => Ok(Priority::Medium),
            "high" | "alta" => Ok(Priority::High),
            "critical" | "crítica" | "critica" => Ok(Priority::Critical),
            _ => Err(format!("Invalid priority: {s}")),
        }
    }
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
            Priority::Critical => "critical",
        }
    }
}
