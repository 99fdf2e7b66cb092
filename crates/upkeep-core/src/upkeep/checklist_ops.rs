//! Checklist template operations.

use super::Upkeep;
use crate::{
    display::{Checklists, DeleteResult},
    error::{Result, UpkeepError},
    models::Checklist,
    params::{CreateChecklist, Id},
};

impl Upkeep {
    pub async fn create_checklist(&self, params: &CreateChecklist) -> Result<Checklist> {
        let params = params.clone();
        self.with_db(move |db| {
            db.create_checklist(&params.name, params.description.as_deref(), &params.items)
        })
        .await
    }

    pub async fn get_checklist(&self, params: &Id) -> Result<Option<Checklist>> {
        let id = params.id.clone();
        self.with_db(move |db| db.get_checklist(&id)).await
    }

    pub async fn list_checklists(&self) -> Result<Checklists> {
        self.with_db(|db| db.list_checklists().map(Checklists))
            .await
    }

    /// Deletes a checklist. Plans referencing it fall back to their
    /// description on the next generation.
    pub async fn delete_checklist(&self, params: &Id) -> Result<DeleteResult<Checklist>> {
        let id = params.id.clone();
        self.with_db(move |db| {
            let checklist = db
                .get_checklist(&id)?
                .ok_or_else(|| UpkeepError::ChecklistNotFound { id: id.clone() })?;
            db.delete_checklist(&id)?;
            Ok(DeleteResult::new(checklist))
        })
        .await
    }
}
