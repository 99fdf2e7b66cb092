//! Maintenance plan model definition and related functionality.

use jiff::{civil::Date, Timestamp};
#[cfg(feature = "schema")]
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::{Frequency, PlanChanges, PlanStatus};

/// A piece of equipment referenced by a plan or work order.
///
/// The name is denormalized for display only; no referential integrity is
/// enforced against an equipment registry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct EquipmentRef {
    /// Opaque equipment identifier
    pub id: String,

    /// Human-readable equipment name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl EquipmentRef {
    pub fn new(id: impl Into<String>, name: Option<String>) -> Self {
        Self {
            id: id.into(),
            name,
        }
    }

    /// Name used in titles, falling back to `Equipment {id}`.
    pub fn display_name(&self) -> String {
        match self.name.as_deref() {
            Some(name) if !name.trim().is_empty() => name.to_string(),
            _ => format!("Equipment {}", self.id),
        }
    }
}

/// A recurring maintenance schedule bound to a set of equipment.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MaintenancePlan {
    /// Unique identifier for the plan
    pub id: String,

    /// Display name, also used as the fallback task name
    pub name: String,

    /// Free-text description; becomes the fallback checklist item
    pub description: Option<String>,

    /// Recurrence frequency
    pub frequency: Frequency,

    /// Whether the plan is active
    #[serde(default)]
    pub status: PlanStatus,

    /// First scheduled date of the plan
    pub start_date: Option<Date>,

    /// Checklist template used to seed generated work orders
    pub checklist_id: Option<String>,

    /// When the plan should next generate work orders
    pub next_execution_date: Option<Date>,

    /// Whether the due-plan scanner generates work orders automatically
    #[serde(default)]
    pub auto_generate: bool,

    /// Equipment in scope, in generation order
    #[serde(default)]
    pub equipment: Vec<EquipmentRef>,

    /// Timestamp when the plan was created (UTC)
    pub created_at: Timestamp,

    /// Timestamp when the plan was last modified (UTC)
    pub updated_at: Timestamp,
}

impl MaintenancePlan {
    /// Whether the scanner should generate for this plan on `today`.
    ///
    /// A plan is due when it is active, has auto-generation enabled, and its
    /// next execution date is today or earlier.
    pub fn is_due(&self, today: Date) -> bool {
        self.status == PlanStatus::Active
            && self.auto_generate
            && self.next_execution_date.is_some_and(|date| date <= today)
    }

    /// Applies the set fields of `changes`. Returns the names of the fields
    /// that actually changed.
    pub fn apply(&mut self, changes: &PlanChanges) -> Vec<&'static str> {
        let mut changed = Vec::new();

        if let Some(name) = &changes.name {
            if *name != self.name {
                self.name = name.clone();
                changed.push("name");
            }
        }
        if let Some(description) = &changes.description {
            if self.description.as_ref() != Some(description) {
                self.description = Some(description.clone());
                changed.push("description");
            }
        }
        if let Some(frequency) = changes.frequency {
            if frequency != self.frequency {
                self.frequency = frequency;
                changed.push("frequency");
            }
        }
        if let Some(start_date) = changes.start_date {
            if self.start_date != Some(start_date) {
                self.start_date = Some(start_date);
                changed.push("start date");
            }
        }
        if let Some(checklist_id) = &changes.checklist_id {
            if self.checklist_id.as_ref() != Some(checklist_id) {
                self.checklist_id = Some(checklist_id.clone());
                changed.push("checklist");
            }
        }
        if let Some(equipment) = &changes.equipment {
            if *equipment != self.equipment {
                self.equipment = equipment.clone();
                changed.push("equipment");
            }
        }
        if let Some(auto_generate) = changes.auto_generate {
            if auto_generate != self.auto_generate {
                self.auto_generate = auto_generate;
                changed.push("auto-generate");
            }
        }

        changed
    }
}
