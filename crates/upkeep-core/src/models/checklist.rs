//! Checklist template model.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

/// One line of a checklist template.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChecklistEntry {
    pub id: String,
    pub description: String,
}

/// A reusable, named list of task descriptions referenced by plans.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Checklist {
    /// Unique identifier for the checklist
    pub id: String,

    /// Name of the checklist; becomes the generated task name
    pub name: String,

    /// Optional description of what the checklist covers
    pub description: Option<String>,

    /// Ordered item descriptions
    #[serde(default)]
    pub items: Vec<ChecklistEntry>,

    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
