//! Filter types for querying plans and work orders.

use jiff::civil::Date;

use super::{Frequency, PlanStatus, WorkOrderStatus};
use crate::{
    error::{Result, UpkeepError},
    params::{ListPlans, ListWorkOrders},
};

/// Filter options for querying plans.
#[derive(Debug, Clone, Default)]
pub struct PlanFilter {
    /// Filter by plan status; `None` returns every plan
    pub status: Option<PlanStatus>,

    /// Filter by recurrence frequency
    pub frequency: Option<Frequency>,

    /// Only plans whose next execution date is on or before this date
    pub due_on_or_before: Option<Date>,
}

impl PlanFilter {
    /// Filter matching exactly the plans the due-plan scanner would pick.
    ///
    /// Auto-generation is checked by the scanner itself; this narrows the
    /// query to active plans with a next execution date on or before `today`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use jiff::civil::date;
    /// use upkeep_core::models::{PlanFilter, PlanStatus};
    ///
    /// let filter = PlanFilter::due(date(2024, 3, 1));
    /// assert_eq!(filter.status, Some(PlanStatus::Active));
    /// assert_eq!(filter.due_on_or_before, Some(date(2024, 3, 1)));
    /// ```
    pub fn due(today: Date) -> Self {
        Self {
            status: Some(PlanStatus::Active),
            due_on_or_before: Some(today),
            ..Default::default()
        }
    }
}

impl TryFrom<&ListPlans> for PlanFilter {
    type Error = UpkeepError;

    /// Converts list parameters into a query filter, validating the textual
    /// status and frequency.
    fn try_from(params: &ListPlans) -> Result<Self> {
        let status = if params.inactive {
            Some(PlanStatus::Inactive)
        } else if params.all {
            None
        } else {
            Some(PlanStatus::Active)
        };

        let frequency = params
            .frequency
            .as_deref()
            .map(|f| {
                f.parse()
                    .map_err(|reason: String| UpkeepError::invalid_input("frequency").with_reason(reason))
            })
            .transpose()?;

        let due_on_or_before = if params.due_only {
            Some(crate::schedule::today())
        } else {
            None
        };

        Ok(Self {
            status,
            frequency,
            due_on_or_before,
        })
    }
}

/// Filter options for querying work orders.
#[derive(Debug, Clone, Default)]
pub struct WorkOrderFilter {
    /// Orders generated from this plan
    pub plan_id: Option<String>,

    /// Orders in this status
    pub status: Option<WorkOrderStatus>,

    /// Orders that reference this equipment
    pub equipment_id: Option<String>,
}

impl TryFrom<&ListWorkOrders> for WorkOrderFilter {
    type Error = UpkeepError;

    fn try_from(params: &ListWorkOrders) -> Result<Self> {
        let status = params
            .status
            .as_deref()
            .map(|s| {
                s.parse()
                    .map_err(|reason: String| UpkeepError::invalid_input("status").with_reason(reason))
            })
            .transpose()?;

        Ok(Self {
            plan_id: params.plan_id.clone(),
            status,
            equipment_id: params.equipment_id.clone(),
        })
    }
}
