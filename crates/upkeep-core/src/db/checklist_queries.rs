//! Checklist template operations.

use jiff::Timestamp;
use rusqlite::{params, Connection, OptionalExtension};
use uuid::Uuid;

use super::utils::timestamp_at;
use crate::{
    error::{DatabaseResultExt, Result, UpkeepError},
    models::{Checklist, ChecklistEntry},
};

const INSERT_CHECKLIST_SQL: &str = "INSERT INTO checklists (id, name, description, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5)";
const INSERT_ITEM_SQL: &str =
    "INSERT INTO checklist_items (id, checklist_id, position, description) VALUES (?1, ?2, ?3, ?4)";
const SELECT_CHECKLIST_SQL: &str =
    "SELECT id, name, description, created_at, updated_at FROM checklists WHERE id = ?1";
const SELECT_CHECKLISTS_SQL: &str =
    "SELECT id, name, description, created_at, updated_at FROM checklists ORDER BY name";
const SELECT_ITEMS_SQL: &str =
    "SELECT id, description FROM checklist_items WHERE checklist_id = ?1 ORDER BY position";
const DELETE_CHECKLIST_SQL: &str = "DELETE FROM checklists WHERE id = ?1";

fn checklist_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Checklist> {
    Ok(Checklist {
        id: row.get(0)?,
        name: row.get(1)?,
        description: row.get(2)?,
        items: Vec::new(),
        created_at: timestamp_at(row, 3)?,
        updated_at: timestamp_at(row, 4)?,
    })
}

fn load_items(conn: &Connection, checklist_id: &str) -> Result<Vec<ChecklistEntry>> {
    let mut stmt = conn
        .prepare_cached(SELECT_ITEMS_SQL)
        .db_context("Failed to prepare checklist items query")?;

    let items = stmt
        .query_map(params![checklist_id], |row| {
            Ok(ChecklistEntry {
                id: row.get(0)?,
                description: row.get(1)?,
            })
        })
        .db_context("Failed to query checklist items")?
        .collect::<std::result::Result<Vec<_>, _>>()
        .db_context("Failed to fetch checklist items");
    items
}

impl super::Database {
    /// Creates a checklist template with its items in the given order.
    pub fn create_checklist(
        &mut self,
        name: &str,
        description: Option<&str>,
        items: &[String],
    ) -> Result<Checklist> {
        if name.trim().is_empty() {
            return Err(UpkeepError::invalid_input("name").with_reason("must not be empty"));
        }

        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let now = Timestamp::now();
        let now_str = now.to_string();
        let id = Uuid::new_v4().to_string();

        tx.execute(
            INSERT_CHECKLIST_SQL,
            params![id, name.trim(), description, &now_str, &now_str],
        )
        .db_context("Failed to insert checklist")?;

        let mut entries = Vec::with_capacity(items.len());
        for (position, description) in items.iter().enumerate() {
            let entry = ChecklistEntry {
                id: Uuid::new_v4().to_string(),
                description: description.clone(),
            };
            tx.execute(
                INSERT_ITEM_SQL,
                params![entry.id, id, position as i64, entry.description],
            )
            .db_context("Failed to insert checklist item")?;
            entries.push(entry);
        }

        tx.commit().db_context("Failed to commit transaction")?;

        Ok(Checklist {
            id,
            name: name.trim().to_string(),
            description: description.map(String::from),
            items: entries,
            created_at: now,
            updated_at: now,
        })
    }

    /// Retrieves a checklist with its items.
    pub fn get_checklist(&self, id: &str) -> Result<Option<Checklist>> {
        let checklist = self
            .connection
            .query_row(SELECT_CHECKLIST_SQL, params![id], checklist_from_row)
            .optional()
            .db_context("Failed to query checklist")?;

        match checklist {
            Some(mut checklist) => {
                checklist.items = load_items(&self.connection, &checklist.id)?;
                Ok(Some(checklist))
            }
            None => Ok(None),
        }
    }

    /// Lists every checklist by name.
    pub fn list_checklists(&self) -> Result<Vec<Checklist>> {
        let mut stmt = self
            .connection
            .prepare(SELECT_CHECKLISTS_SQL)
            .db_context("Failed to prepare query")?;

        let mut checklists = stmt
            .query_map([], checklist_from_row)
            .db_context("Failed to query checklists")?
            .collect::<std::result::Result<Vec<_>, _>>()
            .db_context("Failed to fetch checklists")?;

        for checklist in &mut checklists {
            checklist.items = load_items(&self.connection, &checklist.id)?;
        }

        Ok(checklists)
    }

    /// Deletes a checklist and its items. Plans that still reference it fall
    /// back to their description when generating.
    pub fn delete_checklist(&mut self, id: &str) -> Result<()> {
        let rows_affected = self
            .connection
            .execute(DELETE_CHECKLIST_SQL, params![id])
            .db_context("Failed to delete checklist")?;

        if rows_affected == 0 {
            return Err(UpkeepError::ChecklistNotFound { id: id.to_string() });
        }
        Ok(())
    }
}
