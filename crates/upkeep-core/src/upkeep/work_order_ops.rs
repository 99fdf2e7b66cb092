//! Work order operations: manual creation, queries and lifecycle changes.

use super::Upkeep;
use crate::{
    display::{DeleteResult, UpdateResult, WorkOrders},
    error::{Result, UpkeepError},
    generator::build_work_order,
    models::{NewWorkOrder, WorkOrder, WorkOrderFilter, WorkOrderStatus},
    params::{CreateWorkOrder, Id, ListWorkOrders, SetChecklistItem, UpdateWorkOrderStatus},
    schedule::today,
};

impl Upkeep {
    /// Creates a work order by hand.
    pub async fn create_work_order(&self, params: &CreateWorkOrder) -> Result<WorkOrder> {
        let request = NewWorkOrder::try_from(params)?;
        let order = build_work_order(&request, today());

        self.with_db(move |db| {
            db.insert_work_orders(std::slice::from_ref(&order))?;
            Ok(order)
        })
        .await
    }

    pub async fn get_work_order(&self, params: &Id) -> Result<Option<WorkOrder>> {
        let id = params.id.clone();
        self.with_db(move |db| db.get_work_order(&id)).await
    }

    pub async fn list_work_orders(&self, params: &ListWorkOrders) -> Result<WorkOrders> {
        let filter = WorkOrderFilter::try_from(params)?;
        self.with_db(move |db| db.list_work_orders(&filter).map(WorkOrders))
            .await
    }

    /// Moves a work order to a new status if the transition is allowed.
    pub async fn update_work_order_status(
        &self,
        params: &UpdateWorkOrderStatus,
    ) -> Result<UpdateResult<WorkOrder>> {
        let status: WorkOrderStatus = params
            .status
            .parse()
            .map_err(|reason: String| UpkeepError::invalid_input("status").with_reason(reason))?;
        let id = params.id.clone();

        let (previous, order) = self
            .with_db(move |db| db.update_work_order_status(&id, status))
            .await?;

        let changes = if previous == order.status {
            Vec::new()
        } else {
            vec![format!(
                "Status: {} → {}",
                previous.with_icon(),
                order.status.with_icon()
            )]
        };
        Ok(UpdateResult::with_changes(order, changes))
    }

    /// Ticks or unticks a checklist item on a work order.
    pub async fn set_checklist_item(&self, params: &SetChecklistItem) -> Result<WorkOrder> {
        let params = params.clone();
        self.with_db(move |db| {
            db.set_checklist_item(&params.work_order_id, &params.item_id, params.completed)
        })
        .await
    }

    /// Deletes an open work order.
    pub async fn delete_work_order(&self, params: &Id) -> Result<DeleteResult<WorkOrder>> {
        let id = params.id.clone();
        self.with_db(move |db| db.delete_work_order(&id).map(DeleteResult::new))
            .await
    }
}
