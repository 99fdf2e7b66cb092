//! Work order persistence: batch inserts, queries and lifecycle updates.

use jiff::Timestamp;
use log::debug;
use rusqlite::{params, Connection, OptionalExtension, Row};

use super::{
    plan_queries::update_next_execution,
    utils::{date_at, optional_timestamp_at, parsed_at, timestamp_at},
};
use crate::{
    error::{DatabaseResultExt, Result, UpkeepError},
    models::{ChecklistItem, EquipmentRef, WorkOrder, WorkOrderFilter, WorkOrderStatus, WorkOrderTask},
    scanner::PlanBatch,
};

const WORK_ORDER_COLUMNS: &str = "id, number, kind, status, priority, plan_id, scheduled_date, title, description, assigned_to, created_by, started_at, completed_at, created_at, updated_at";
const INSERT_WORK_ORDER_SQL: &str = "INSERT INTO work_orders (id, number, kind, status, priority, plan_id, scheduled_date, title, description, assigned_to, created_by, started_at, completed_at, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15)";
const INSERT_EQUIPMENT_SQL: &str = "INSERT INTO work_order_equipment (work_order_id, position, equipment_id, equipment_name) VALUES (?1, ?2, ?3, ?4)";
const INSERT_TASK_SQL: &str = "INSERT INTO work_order_tasks (id, work_order_id, position, name, completed) VALUES (?1, ?2, ?3, ?4, ?5)";
const INSERT_ITEM_SQL: &str = "INSERT INTO work_order_checklist_items (id, task_id, position, description, completed) VALUES (?1, ?2, ?3, ?4, ?5)";

const SELECT_EQUIPMENT_SQL: &str = "SELECT equipment_id, equipment_name FROM work_order_equipment WHERE work_order_id = ?1 ORDER BY position";
const SELECT_TASKS_SQL: &str =
    "SELECT id, name, completed FROM work_order_tasks WHERE work_order_id = ?1 ORDER BY position";
const SELECT_ITEMS_SQL: &str = "SELECT id, description, completed FROM work_order_checklist_items WHERE task_id = ?1 ORDER BY position";
const SELECT_ITEM_TASK_SQL: &str = "SELECT i.task_id FROM work_order_checklist_items i JOIN work_order_tasks t ON t.id = i.task_id WHERE i.id = ?1 AND t.work_order_id = ?2";

const UPDATE_STATUS_SQL: &str = "UPDATE work_orders SET status = ?1, started_at = ?2, completed_at = ?3, updated_at = ?4 WHERE id = ?5";
const UPDATE_ITEM_SQL: &str = "UPDATE work_order_checklist_items SET completed = ?1 WHERE id = ?2";
const UPDATE_TASK_COMPLETION_SQL: &str = "UPDATE work_order_tasks SET completed = NOT EXISTS (SELECT 1 FROM work_order_checklist_items WHERE task_id = ?1 AND completed = 0) WHERE id = ?1";
const TOUCH_WORK_ORDER_SQL: &str = "UPDATE work_orders SET updated_at = ?1 WHERE id = ?2";
const DELETE_WORK_ORDER_SQL: &str = "DELETE FROM work_orders WHERE id = ?1";

fn work_order_from_row(row: &Row<'_>) -> rusqlite::Result<WorkOrder> {
    Ok(WorkOrder {
        id: row.get(0)?,
        number: row.get(1)?,
        kind: parsed_at(row, 2)?,
        status: parsed_at(row, 3)?,
        priority: parsed_at(row, 4)?,
        plan_id: row.get(5)?,
        equipment: Vec::new(),
        scheduled_date: date_at(row, 6)?,
        title: row.get(7)?,
        description: row.get(8)?,
        tasks: Vec::new(),
        assigned_to: row.get(9)?,
        created_by: row.get(10)?,
        started_at: optional_timestamp_at(row, 11)?,
        completed_at: optional_timestamp_at(row, 12)?,
        created_at: timestamp_at(row, 13)?,
        updated_at: timestamp_at(row, 14)?,
    })
}

fn insert_work_order(conn: &Connection, order: &WorkOrder) -> Result<()> {
    conn.execute(
        INSERT_WORK_ORDER_SQL,
        params![
            order.id,
            order.number,
            order.kind.as_str(),
            order.status.as_str(),
            order.priority.as_str(),
            order.plan_id,
            order.scheduled_date.to_string(),
            order.title,
            order.description,
            order.assigned_to,
            order.created_by,
            order.started_at.map(|t| t.to_string()),
            order.completed_at.map(|t| t.to_string()),
            order.created_at.to_string(),
            order.updated_at.to_string()
        ],
    )
    .db_context("Failed to insert work order")?;

    for (position, equipment) in order.equipment.iter().enumerate() {
        conn.execute(
            INSERT_EQUIPMENT_SQL,
            params![order.id, position as i64, equipment.id, equipment.name],
        )
        .db_context("Failed to insert work order equipment")?;
    }

    for (position, task) in order.tasks.iter().enumerate() {
        conn.execute(
            INSERT_TASK_SQL,
            params![task.id, order.id, position as i64, task.name, task.completed],
        )
        .db_context("Failed to insert work order task")?;

        for (item_position, item) in task.checklist.iter().enumerate() {
            conn.execute(
                INSERT_ITEM_SQL,
                params![
                    item.id,
                    task.id,
                    item_position as i64,
                    item.description,
                    item.completed
                ],
            )
            .db_context("Failed to insert checklist item")?;
        }
    }

    debug!("Inserted work order {} ({})", order.number, order.id);
    Ok(())
}

/// Loads equipment and tasks into an order read from `work_orders`.
fn load_details(conn: &Connection, order: &mut WorkOrder) -> Result<()> {
    let mut stmt = conn
        .prepare_cached(SELECT_EQUIPMENT_SQL)
        .db_context("Failed to prepare equipment query")?;
    order.equipment = stmt
        .query_map(params![order.id], |row| {
            Ok(EquipmentRef {
                id: row.get(0)?,
                name: row.get(1)?,
            })
        })
        .db_context("Failed to query work order equipment")?
        .collect::<std::result::Result<Vec<_>, _>>()
        .db_context("Failed to fetch work order equipment")?;

    let mut stmt = conn
        .prepare_cached(SELECT_TASKS_SQL)
        .db_context("Failed to prepare task query")?;
    let mut tasks = stmt
        .query_map(params![order.id], |row| {
            Ok(WorkOrderTask {
                id: row.get(0)?,
                name: row.get(1)?,
                completed: row.get(2)?,
                checklist: Vec::new(),
            })
        })
        .db_context("Failed to query work order tasks")?
        .collect::<std::result::Result<Vec<_>, _>>()
        .db_context("Failed to fetch work order tasks")?;

    let mut stmt = conn
        .prepare_cached(SELECT_ITEMS_SQL)
        .db_context("Failed to prepare checklist item query")?;
    for task in &mut tasks {
        task.checklist = stmt
            .query_map(params![task.id], |row| {
                Ok(ChecklistItem {
                    id: row.get(0)?,
                    description: row.get(1)?,
                    completed: row.get(2)?,
                })
            })
            .db_context("Failed to query checklist items")?
            .collect::<std::result::Result<Vec<_>, _>>()
            .db_context("Failed to fetch checklist items")?;
    }
    order.tasks = tasks;

    Ok(())
}

fn load_work_order(conn: &Connection, id: &str) -> Result<Option<WorkOrder>> {
    let sql = format!("SELECT {WORK_ORDER_COLUMNS} FROM work_orders WHERE id = ?1");
    let order = conn
        .query_row(&sql, params![id], work_order_from_row)
        .optional()
        .db_context("Failed to query work order")?;

    match order {
        Some(mut order) => {
            load_details(conn, &mut order)?;
            Ok(Some(order))
        }
        None => Ok(None),
    }
}

impl super::Database {
    /// Inserts work orders in one transaction; either all are stored or none.
    pub fn insert_work_orders(&mut self, orders: &[WorkOrder]) -> Result<()> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        for order in orders {
            insert_work_order(&tx, order)?;
        }

        tx.commit().db_context("Failed to commit transaction")
    }

    /// Stores a plan's generated orders and, when set, its new next execution
    /// date in one transaction.
    pub fn save_batch(&mut self, batch: &PlanBatch) -> Result<()> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        for order in &batch.work_orders {
            insert_work_order(&tx, order)?;
        }

        if let Some(date) = batch.next_execution_date {
            if !update_next_execution(&tx, &batch.plan_id, Some(date))? {
                return Err(UpkeepError::PlanNotFound {
                    id: batch.plan_id.clone(),
                });
            }
        }

        tx.commit().db_context("Failed to commit transaction")
    }

    /// Retrieves a work order with its equipment, tasks and checklist items.
    pub fn get_work_order(&self, id: &str) -> Result<Option<WorkOrder>> {
        load_work_order(&self.connection, id)
    }

    /// Lists work orders matching the filter, latest scheduled date first.
    pub fn list_work_orders(&self, filter: &WorkOrderFilter) -> Result<Vec<WorkOrder>> {
        let mut query = format!("SELECT {WORK_ORDER_COLUMNS} FROM work_orders");

        let mut conditions = Vec::new();
        let mut params_vec: Vec<Box<dyn rusqlite::ToSql>> = Vec::new();

        if let Some(ref plan_id) = filter.plan_id {
            conditions.push("plan_id = ?");
            params_vec.push(Box::new(plan_id.clone()));
        }

        if let Some(status) = filter.status {
            conditions.push("status = ?");
            params_vec.push(Box::new(status.as_str()));
        }

        if let Some(ref equipment_id) = filter.equipment_id {
            conditions.push(
                "EXISTS (SELECT 1 FROM work_order_equipment e WHERE e.work_order_id = work_orders.id AND e.equipment_id = ?)",
            );
            params_vec.push(Box::new(equipment_id.clone()));
        }

        if !conditions.is_empty() {
            query.push_str(" WHERE ");
            query.push_str(&conditions.join(" AND "));
        }

        query.push_str(" ORDER BY scheduled_date DESC, created_at DESC, number");

        let mut stmt = self
            .connection
            .prepare(&query)
            .db_context("Failed to prepare query")?;

        let params_refs: Vec<&dyn rusqlite::ToSql> = params_vec.iter().map(|b| &**b).collect();

        let mut orders: Vec<WorkOrder> = stmt
            .query_map(&params_refs[..], work_order_from_row)
            .db_context("Failed to query work orders")?
            .collect::<std::result::Result<Vec<_>, _>>()
            .db_context("Failed to fetch work orders")?;

        for order in &mut orders {
            load_details(&self.connection, order)?;
        }

        Ok(orders)
    }

    /// Moves a work order to `status`.
    ///
    /// Setting the current status again is a no-op. Entering
    /// [`WorkOrderStatus::InProgress`] records `started_at` and entering
    /// [`WorkOrderStatus::Completed`] records `completed_at`, each only the
    /// first time. Returns the previous status with the updated order.
    pub fn update_work_order_status(
        &mut self,
        id: &str,
        status: WorkOrderStatus,
    ) -> Result<(WorkOrderStatus, WorkOrder)> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let mut order = load_work_order(&tx, id)?
            .ok_or_else(|| UpkeepError::WorkOrderNotFound { id: id.to_string() })?;
        let previous = order.status;

        if previous == status {
            return Ok((previous, order));
        }

        if !previous.can_transition_to(status) {
            return Err(UpkeepError::InvalidTransition {
                from: previous.as_str().to_string(),
                to: status.as_str().to_string(),
            });
        }

        let now = Timestamp::now();
        order.status = status;
        if status == WorkOrderStatus::InProgress && order.started_at.is_none() {
            order.started_at = Some(now);
        }
        if status == WorkOrderStatus::Completed && order.completed_at.is_none() {
            order.completed_at = Some(now);
        }
        order.updated_at = now;

        tx.execute(
            UPDATE_STATUS_SQL,
            params![
                status.as_str(),
                order.started_at.map(|t| t.to_string()),
                order.completed_at.map(|t| t.to_string()),
                now.to_string(),
                id
            ],
        )
        .db_context("Failed to update work order status")?;

        tx.commit().db_context("Failed to commit transaction")?;

        Ok((previous, order))
    }

    /// Ticks or unticks one checklist item of a work order.
    ///
    /// The owning task is marked completed exactly when all of its items are.
    /// Completed and cancelled orders are read-only.
    pub fn set_checklist_item(
        &mut self,
        work_order_id: &str,
        item_id: &str,
        completed: bool,
    ) -> Result<WorkOrder> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let order = load_work_order(&tx, work_order_id)?.ok_or_else(|| {
            UpkeepError::WorkOrderNotFound {
                id: work_order_id.to_string(),
            }
        })?;

        if matches!(
            order.status,
            WorkOrderStatus::Completed | WorkOrderStatus::Cancelled
        ) {
            return Err(UpkeepError::invalid_input("work_order_id")
                .with_reason(format!("work order is {}", order.status.as_str())));
        }

        let task_id: String = tx
            .query_row(SELECT_ITEM_TASK_SQL, params![item_id, work_order_id], |row| {
                row.get(0)
            })
            .optional()
            .db_context("Failed to look up checklist item")?
            .ok_or_else(|| {
                UpkeepError::invalid_input("item_id").with_reason(format!(
                    "checklist item {item_id} does not belong to work order {work_order_id}"
                ))
            })?;

        tx.execute(UPDATE_ITEM_SQL, params![completed, item_id])
            .db_context("Failed to update checklist item")?;
        tx.execute(UPDATE_TASK_COMPLETION_SQL, params![task_id])
            .db_context("Failed to update task completion")?;
        tx.execute(
            TOUCH_WORK_ORDER_SQL,
            params![Timestamp::now().to_string(), work_order_id],
        )
        .db_context("Failed to update work order")?;

        let updated = load_work_order(&tx, work_order_id)?.ok_or_else(|| {
            UpkeepError::WorkOrderNotFound {
                id: work_order_id.to_string(),
            }
        })?;

        tx.commit().db_context("Failed to commit transaction")?;

        Ok(updated)
    }

    /// Deletes an open work order and returns what was deleted.
    ///
    /// Orders that have started, finished or been cancelled are kept as
    /// history and cannot be deleted.
    pub fn delete_work_order(&mut self, id: &str) -> Result<WorkOrder> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let order = load_work_order(&tx, id)?
            .ok_or_else(|| UpkeepError::WorkOrderNotFound { id: id.to_string() })?;

        if order.status != WorkOrderStatus::Open {
            return Err(UpkeepError::invalid_input("status").with_reason(format!(
                "only open work orders can be deleted, this one is {}",
                order.status.as_str()
            )));
        }

        tx.execute(DELETE_WORK_ORDER_SQL, params![id])
            .db_context("Failed to delete work order")?;

        tx.commit().db_context("Failed to commit transaction")?;

        Ok(order)
    }
}
