//! Async façade over the maintenance operations.
//!
//! [`Upkeep`] is what the CLI and the MCP server talk to. Each call opens the
//! database on a blocking thread, runs one operation and returns owned
//! results, so the façade itself is cheap to clone and share.
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │     Upkeep      │    │   maintenance   │    │    Database     │
//! │ (plan_ops,      │───▶│ generator,      │───▶│   (via db/)     │
//! │  work_order_ops)│    │ scanner         │    │                 │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//! ```
//!
//! # Examples
//!
//! ```rust,no_run
//! use upkeep_core::{params::CreatePlan, models::EquipmentRef, UpkeepBuilder};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let upkeep = UpkeepBuilder::new()
//!     .with_database_path(Some("/tmp/upkeep.db"))
//!     .build()
//!     .await?;
//!
//! let plan = upkeep
//!     .create_plan(&CreatePlan {
//!         name: "Monthly AC Check".to_string(),
//!         description: Some("Check filters".to_string()),
//!         frequency: "monthly".to_string(),
//!         equipment: vec![EquipmentRef::new("eq-1", Some("AC Unit 1".to_string()))],
//!         auto_generate: true,
//!         ..Default::default()
//!     })
//!     .await?;
//!
//! let report = upkeep.run_due_plans().await?;
//! println!("{} work orders generated", report.total_work_orders());
//! # Ok(())
//! # }
//! ```

use std::path::{Path, PathBuf};

use tokio::task;

use crate::{
    db::Database,
    error::{Result, UpkeepError},
};

pub mod builder;
pub mod checklist_ops;
pub mod plan_ops;
pub mod work_order_ops;


pub use builder::UpkeepBuilder;

/// Main interface for managing plans, checklists and work orders.
#[derive(Debug, Clone)]
pub struct Upkeep {
    pub(crate) db_path: PathBuf,
}

impl Upkeep {
    pub(crate) fn new(db_path: PathBuf) -> Self {
        Self { db_path }
    }

    /// Path of the database file in use.
    pub fn database_path(&self) -> &Path {
        &self.db_path
    }

    /// Runs `op` against a fresh connection on the blocking thread pool.
    pub(crate) async fn with_db<T, F>(&self, op: F) -> Result<T>
    where
        F: FnOnce(&mut Database) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let db_path = self.db_path.clone();

        task::spawn_blocking(move || {
            let mut db = Database::new(&db_path)?;
            op(&mut db)
        })
        .await
        .map_err(UpkeepError::join)?
    }
}
