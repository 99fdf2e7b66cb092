//! Maintenance plan CRUD operations and queries.

use jiff::{civil::Date, Timestamp};
use rusqlite::{params, Connection, OptionalExtension, Row};
use uuid::Uuid;

use super::utils::{date_text, optional_date_at, parsed_at, timestamp_at};
use crate::{
    error::{DatabaseResultExt, Result, UpkeepError},
    models::{EquipmentRef, MaintenancePlan, NewPlan, PlanChanges, PlanFilter, PlanStatus},
    schedule::initial_execution_date,
};

const PLAN_COLUMNS: &str = "id, name, description, frequency, status, start_date, checklist_id, next_execution_date, auto_generate, created_at, updated_at";
const INSERT_PLAN_SQL: &str = "INSERT INTO maintenance_plans (id, name, description, frequency, status, start_date, checklist_id, next_execution_date, auto_generate, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)";
const UPDATE_PLAN_SQL: &str = "UPDATE maintenance_plans SET name = ?2, description = ?3, frequency = ?4, status = ?5, start_date = ?6, checklist_id = ?7, next_execution_date = ?8, auto_generate = ?9, updated_at = ?10 WHERE id = ?1";
const UPDATE_PLAN_STATUS_SQL: &str =
    "UPDATE maintenance_plans SET status = ?1, updated_at = ?2 WHERE id = ?3";
const UPDATE_NEXT_EXECUTION_SQL: &str =
    "UPDATE maintenance_plans SET next_execution_date = ?1, updated_at = ?2 WHERE id = ?3";
const CHECK_PLAN_EXISTS_SQL: &str = "SELECT EXISTS(SELECT 1 FROM maintenance_plans WHERE id = ?1)";
const DELETE_PLAN_SQL: &str = "DELETE FROM maintenance_plans WHERE id = ?1";

const SELECT_EQUIPMENT_SQL: &str =
    "SELECT equipment_id, equipment_name FROM plan_equipment WHERE plan_id = ?1 ORDER BY position";
const INSERT_EQUIPMENT_SQL: &str = "INSERT INTO plan_equipment (plan_id, position, equipment_id, equipment_name) VALUES (?1, ?2, ?3, ?4)";
const DELETE_EQUIPMENT_SQL: &str = "DELETE FROM plan_equipment WHERE plan_id = ?1";

fn plan_from_row(row: &Row<'_>) -> rusqlite::Result<MaintenancePlan> {
    Ok(MaintenancePlan {
        id: row.get(0)?,
        name: row.get(1)?,
        description: row.get(2)?,
        frequency: parsed_at(row, 3)?,
        status: parsed_at(row, 4)?,
        start_date: optional_date_at(row, 5)?,
        checklist_id: row.get(6)?,
        next_execution_date: optional_date_at(row, 7)?,
        auto_generate: row.get(8)?,
        created_at: timestamp_at(row, 9)?,
        updated_at: timestamp_at(row, 10)?,
        equipment: Vec::new(),
    })
}

fn load_equipment(conn: &Connection, plan_id: &str) -> Result<Vec<EquipmentRef>> {
    let mut stmt = conn
        .prepare_cached(SELECT_EQUIPMENT_SQL)
        .db_context("Failed to prepare equipment query")?;

    let equipment = stmt
        .query_map(params![plan_id], |row| {
            Ok(EquipmentRef {
                id: row.get(0)?,
                name: row.get(1)?,
            })
        })
        .db_context("Failed to query plan equipment")?
        .collect::<std::result::Result<Vec<_>, _>>()
        .db_context("Failed to fetch plan equipment");
    equipment
}

fn insert_equipment(conn: &Connection, plan_id: &str, equipment: &[EquipmentRef]) -> Result<()> {
    for (position, item) in equipment.iter().enumerate() {
        conn.execute(
            INSERT_EQUIPMENT_SQL,
            params![plan_id, position as i64, item.id, item.name],
        )
        .db_context("Failed to insert plan equipment")?;
    }
    Ok(())
}

fn load_plan(conn: &Connection, id: &str) -> Result<Option<MaintenancePlan>> {
    let sql = format!("SELECT {PLAN_COLUMNS} FROM maintenance_plans WHERE id = ?1");
    let plan = conn
        .query_row(&sql, params![id], plan_from_row)
        .optional()
        .db_context("Failed to query plan")?;

    match plan {
        Some(mut plan) => {
            plan.equipment = load_equipment(conn, &plan.id)?;
            Ok(Some(plan))
        }
        None => Ok(None),
    }
}

fn plan_exists(conn: &Connection, id: &str) -> Result<bool> {
    conn.query_row(CHECK_PLAN_EXISTS_SQL, params![id], |row| row.get(0))
        .db_context("Failed to check plan existence")
}

impl super::Database {
    /// Creates a plan. Its first execution date is the start date (or `today`)
    /// when that is not in the past, otherwise the first period boundary after
    /// `today`.
    pub fn create_plan(&mut self, new_plan: &NewPlan, today: Date) -> Result<MaintenancePlan> {
        let next_execution_date =
            initial_execution_date(new_plan.start_date, new_plan.frequency, today)?;
        let now = Timestamp::now();
        let plan = MaintenancePlan {
            id: Uuid::new_v4().to_string(),
            name: new_plan.name.clone(),
            description: new_plan.description.clone(),
            frequency: new_plan.frequency,
            status: PlanStatus::Active,
            start_date: new_plan.start_date,
            checklist_id: new_plan.checklist_id.clone(),
            next_execution_date: Some(next_execution_date),
            auto_generate: new_plan.auto_generate,
            equipment: new_plan.equipment.clone(),
            created_at: now,
            updated_at: now,
        };

        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let now_str = now.to_string();
        tx.execute(
            INSERT_PLAN_SQL,
            params![
                plan.id,
                plan.name,
                plan.description,
                plan.frequency.as_str(),
                plan.status.as_str(),
                date_text(plan.start_date),
                plan.checklist_id,
                date_text(plan.next_execution_date),
                plan.auto_generate,
                &now_str,
                &now_str
            ],
        )
        .db_context("Failed to insert plan")?;
        insert_equipment(&tx, &plan.id, &plan.equipment)?;

        tx.commit().db_context("Failed to commit transaction")?;

        Ok(plan)
    }

    /// Retrieves a plan with its equipment.
    pub fn get_plan(&self, id: &str) -> Result<Option<MaintenancePlan>> {
        load_plan(&self.connection, id)
    }

    /// Lists plans matching the filter, soonest next execution first.
    pub fn list_plans(&self, filter: &PlanFilter) -> Result<Vec<MaintenancePlan>> {
        let mut query = format!("SELECT {PLAN_COLUMNS} FROM maintenance_plans");

        let mut conditions = Vec::new();
        let mut params_vec: Vec<Box<dyn rusqlite::ToSql>> = Vec::new();

        if let Some(status) = filter.status {
            conditions.push("status = ?");
            params_vec.push(Box::new(status.as_str()));
        }

        if let Some(frequency) = filter.frequency {
            conditions.push("frequency = ?");
            params_vec.push(Box::new(frequency.as_str()));
        }

        if let Some(date) = filter.due_on_or_before {
            conditions.push("next_execution_date IS NOT NULL AND next_execution_date <= ?");
            params_vec.push(Box::new(date.to_string()));
        }

        if !conditions.is_empty() {
            query.push_str(" WHERE ");
            query.push_str(&conditions.join(" AND "));
        }

        query.push_str(" ORDER BY next_execution_date IS NULL, next_execution_date, name");

        let mut stmt = self
            .connection
            .prepare(&query)
            .db_context("Failed to prepare query")?;

        let params_refs: Vec<&dyn rusqlite::ToSql> = params_vec.iter().map(|b| &**b).collect();

        let mut plans: Vec<MaintenancePlan> = stmt
            .query_map(&params_refs[..], plan_from_row)
            .db_context("Failed to query plans")?
            .collect::<std::result::Result<Vec<_>, _>>()
            .db_context("Failed to fetch plans")?;

        // Eagerly load equipment for each plan
        for plan in &mut plans {
            plan.equipment = load_equipment(&self.connection, &plan.id)?;
        }

        Ok(plans)
    }

    /// Applies field changes to a plan.
    ///
    /// A changed frequency or start date recomputes the next execution date
    /// the same way [`create_plan`](Self::create_plan) does. Returns the
    /// updated plan and the names of the changed fields, or `None` if the plan
    /// does not exist.
    pub fn update_plan(
        &mut self,
        id: &str,
        changes: &PlanChanges,
        today: Date,
    ) -> Result<Option<(MaintenancePlan, Vec<&'static str>)>> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let Some(mut plan) = load_plan(&tx, id)? else {
            return Ok(None);
        };

        let changed = plan.apply(changes);
        if changed.is_empty() {
            return Ok(Some((plan, changed)));
        }

        if PlanChanges::reschedules(&changed) {
            plan.next_execution_date =
                Some(initial_execution_date(plan.start_date, plan.frequency, today)?);
        }
        plan.updated_at = Timestamp::now();

        tx.execute(
            UPDATE_PLAN_SQL,
            params![
                plan.id,
                plan.name,
                plan.description,
                plan.frequency.as_str(),
                plan.status.as_str(),
                date_text(plan.start_date),
                plan.checklist_id,
                date_text(plan.next_execution_date),
                plan.auto_generate,
                plan.updated_at.to_string()
            ],
        )
        .db_context("Failed to update plan")?;

        if changed.contains(&"equipment") {
            tx.execute(DELETE_EQUIPMENT_SQL, params![plan.id])
                .db_context("Failed to clear plan equipment")?;
            insert_equipment(&tx, &plan.id, &plan.equipment)?;
        }

        tx.commit().db_context("Failed to commit transaction")?;

        Ok(Some((plan, changed)))
    }

    /// Activates or deactivates a plan. Returns `None` if it does not exist.
    pub fn set_plan_status(
        &mut self,
        id: &str,
        status: PlanStatus,
    ) -> Result<Option<MaintenancePlan>> {
        let rows_affected = self
            .connection
            .execute(
                UPDATE_PLAN_STATUS_SQL,
                params![status.as_str(), Timestamp::now().to_string(), id],
            )
            .db_context("Failed to update plan status")?;

        if rows_affected == 0 {
            return Ok(None);
        }
        self.get_plan(id)
    }

    /// Stores a plan's next execution date. Returns `false` if the plan does
    /// not exist.
    pub fn set_next_execution(&mut self, id: &str, date: Option<Date>) -> Result<bool> {
        update_next_execution(&self.connection, id, date)
    }

    /// Permanently deletes a plan and its equipment list.
    ///
    /// Work orders generated from the plan are kept; their plan reference is
    /// cleared.
    pub fn delete_plan(&mut self, id: &str) -> Result<()> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        if !plan_exists(&tx, id)? {
            return Err(UpkeepError::PlanNotFound { id: id.to_string() });
        }

        tx.execute(DELETE_PLAN_SQL, params![id])
            .db_context("Failed to delete plan")?;

        tx.commit().db_context("Failed to commit transaction")?;

        Ok(())
    }
}

/// Runs the next-execution update on an open transaction.
pub(super) fn update_next_execution(conn: &Connection, id: &str, date: Option<Date>) -> Result<bool> {
    let rows_affected = conn
        .execute(
            UPDATE_NEXT_EXECUTION_SQL,
            params![date_text(date), Timestamp::now().to_string(), id],
        )
        .db_context("Failed to update next execution date")?;
    Ok(rows_affected > 0)
}
