use jiff::civil::date;
use tempfile::NamedTempFile;
use upkeep_core::{
    db::migrations::SCHEMA_VERSION,
    generator::generate_work_orders_from_plan,
    maintenance,
    models::{
        EquipmentRef, Frequency, NewPlan, PlanChanges, PlanFilter, PlanStatus, WorkOrderFilter,
        WorkOrderStatus,
    },
    Database, PlanBatch, PlanRepository, UpkeepError, WorkOrderRepository,
};

/// Helper function to create a temporary database for testing
fn create_test_db() -> (NamedTempFile, Database) {
    let temp_file = NamedTempFile::new().expect("Failed to create temporary file");
    let db = Database::new(temp_file.path()).expect("Failed to create test database");
    (temp_file, db)
}

fn new_plan(name: &str, equipment: &[&str]) -> NewPlan {
    NewPlan {
        name: name.to_string(),
        description: Some("Check filters".to_string()),
        frequency: Frequency::Monthly,
        start_date: None,
        checklist_id: None,
        equipment: equipment
            .iter()
            .map(|id| EquipmentRef::new(*id, Some(format!("Unit {id}"))))
            .collect(),
        auto_generate: true,
    }
}

#[test]
fn test_database_initialization_records_schema_version() {
    let (temp_file, db) = create_test_db();
    assert!(temp_file.path().exists());
    assert_eq!(db.schema_version().unwrap(), SCHEMA_VERSION);

    // Reopening an initialized file is fine
    drop(db);
    let db = Database::new(temp_file.path()).expect("Failed to reopen database");
    assert_eq!(db.schema_version().unwrap(), SCHEMA_VERSION);
}

#[test]
fn test_create_and_get_plan_keeps_equipment_order() {
    let mut db = Database::open_in_memory().unwrap();
    let today = date(2024, 1, 10);

    let plan = db
        .create_plan(&new_plan("AC", &["eq-3", "eq-1", "eq-2"]), today)
        .unwrap();
    assert_eq!(plan.next_execution_date, Some(today));

    let fetched = db.get_plan(&plan.id).unwrap().expect("Plan should exist");
    let ids: Vec<&str> = fetched.equipment.iter().map(|e| e.id.as_str()).collect();
    assert_eq!(ids, ["eq-3", "eq-1", "eq-2"]);
    assert_eq!(fetched, plan);
}

#[test]
fn test_create_plan_with_past_start_date_schedules_forward() {
    let mut db = Database::open_in_memory().unwrap();
    let mut request = new_plan("Pump", &["eq-1"]);
    request.start_date = Some(date(2024, 1, 15));

    let plan = db.create_plan(&request, date(2024, 3, 20)).unwrap();
    assert_eq!(plan.next_execution_date, Some(date(2024, 4, 15)));
}

#[test]
fn test_list_plans_filters_due_plans() {
    let mut db = Database::open_in_memory().unwrap();
    let today = date(2024, 1, 10);

    let due = db.create_plan(&new_plan("Due", &["eq-1"]), today).unwrap();
    let mut later = new_plan("Later", &["eq-2"]);
    later.start_date = Some(date(2024, 2, 1));
    db.create_plan(&later, today).unwrap();

    let plans = db.list_plans(&PlanFilter::due(today)).unwrap();
    assert_eq!(plans.len(), 1);
    assert_eq!(plans[0].id, due.id);

    let all = db.list_plans(&PlanFilter::default()).unwrap();
    assert_eq!(all.len(), 2);
    assert_eq!(all[0].name, "Due");
}

#[test]
fn test_update_plan_reschedules_from_new_start_date() {
    let mut db = Database::open_in_memory().unwrap();
    let today = date(2024, 1, 10);
    let plan = db.create_plan(&new_plan("AC", &["eq-1"]), today).unwrap();

    let changes = PlanChanges {
        start_date: Some(date(2023, 11, 30)),
        ..Default::default()
    };
    let (updated, changed) = db
        .update_plan(&plan.id, &changes, today)
        .unwrap()
        .expect("Plan should exist");

    assert_eq!(changed, ["start date"]);
    // Nov 30 -> Dec 30 -> Jan 30
    assert_eq!(updated.next_execution_date, Some(date(2024, 1, 30)));

    assert!(db
        .update_plan("missing", &PlanChanges::default(), today)
        .unwrap()
        .is_none());
}

#[test]
fn test_set_plan_status() {
    let mut db = Database::open_in_memory().unwrap();
    let plan = db
        .create_plan(&new_plan("AC", &["eq-1"]), date(2024, 1, 10))
        .unwrap();

    let plan = db
        .set_plan_status(&plan.id, PlanStatus::Inactive)
        .unwrap()
        .unwrap();
    assert_eq!(plan.status, PlanStatus::Inactive);
    assert!(db
        .set_plan_status("missing", PlanStatus::Active)
        .unwrap()
        .is_none());
}

#[test]
fn test_repository_traits_run_due_plans() {
    let mut db = Database::open_in_memory().unwrap();
    let today = date(2024, 1, 10);
    let plan = db
        .create_plan(&new_plan("AC", &["eq-1", "eq-2"]), today)
        .unwrap();

    assert_eq!(PlanRepository::load_plans(&db).unwrap().len(), 1);

    let report = maintenance::run_due_plans(&mut db, today).unwrap();
    assert_eq!(report.total_work_orders(), 2);
    assert!(report.failures.is_empty());

    let stored = WorkOrderRepository::work_orders_for_plan(&db, &plan.id).unwrap();
    assert_eq!(stored.len(), 2);

    let plan = db.get_plan(&plan.id).unwrap().unwrap();
    assert_eq!(plan.next_execution_date, Some(date(2024, 2, 10)));
}

#[test]
fn test_save_batch_rolls_back_when_plan_is_missing() {
    let mut db = Database::open_in_memory().unwrap();
    let today = date(2024, 1, 10);
    let mut plan = db.create_plan(&new_plan("AC", &["eq-1"]), today).unwrap();

    let work_orders = generate_work_orders_from_plan(&plan, None, &db, today).unwrap();
    plan.id = "missing".to_string();
    let batch = PlanBatch {
        plan_id: plan.id.clone(),
        plan_name: plan.name.clone(),
        work_orders,
        next_execution_date: Some(date(2024, 2, 10)),
    };

    assert!(db.save_batch(&batch).is_err());
    assert!(db
        .list_work_orders(&WorkOrderFilter::default())
        .unwrap()
        .is_empty());
}

#[test]
fn test_deleting_plan_detaches_work_orders() {
    let mut db = Database::open_in_memory().unwrap();
    let today = date(2024, 1, 10);
    let plan = db.create_plan(&new_plan("AC", &["eq-1"]), today).unwrap();
    maintenance::generate_for_plan(&mut db, &plan.id, None, false, today).unwrap();

    db.delete_plan(&plan.id).unwrap();
    assert!(db.get_plan(&plan.id).unwrap().is_none());

    let orders = db.list_work_orders(&WorkOrderFilter::default()).unwrap();
    assert_eq!(orders.len(), 1);
    assert_eq!(orders[0].plan_id, None);

    let err = db.delete_plan(&plan.id).unwrap_err();
    assert!(matches!(err, UpkeepError::PlanNotFound { .. }));
}

#[test]
fn test_deleted_checklist_falls_back_to_description() {
    let mut db = Database::open_in_memory().unwrap();
    let today = date(2024, 1, 10);
    let checklist = db
        .create_checklist("Inspection", None, &["Check belts".to_string()])
        .unwrap();

    let mut request = new_plan("AC", &["eq-1"]);
    request.checklist_id = Some(checklist.id.clone());
    let plan = db.create_plan(&request, today).unwrap();

    let batch = maintenance::generate_for_plan(&mut db, &plan.id, None, false, today).unwrap();
    assert_eq!(batch.work_orders[0].tasks[0].name, "Inspection");

    db.delete_checklist(&checklist.id).unwrap();
    let batch = maintenance::generate_for_plan(&mut db, &plan.id, None, false, today).unwrap();
    let task = &batch.work_orders[0].tasks[0];
    assert_eq!(task.checklist[0].description, "Check filters");
}

#[test]
fn test_work_order_status_timestamps_are_stamped_once() {
    let mut db = Database::open_in_memory().unwrap();
    let today = date(2024, 1, 10);
    let plan = db.create_plan(&new_plan("AC", &["eq-1"]), today).unwrap();
    let batch = maintenance::generate_for_plan(&mut db, &plan.id, None, false, today).unwrap();
    let id = batch.work_orders[0].id.clone();

    let (previous, order) = db
        .update_work_order_status(&id, WorkOrderStatus::InProgress)
        .unwrap();
    assert_eq!(previous, WorkOrderStatus::Open);
    let started_at = order.started_at.expect("started_at should be set");

    db.update_work_order_status(&id, WorkOrderStatus::Open).unwrap();
    let (_, order) = db
        .update_work_order_status(&id, WorkOrderStatus::InProgress)
        .unwrap();
    assert_eq!(order.started_at, Some(started_at));

    // Same status is a no-op
    let (previous, order) = db
        .update_work_order_status(&id, WorkOrderStatus::InProgress)
        .unwrap();
    assert_eq!(previous, order.status);
}

#[test]
fn test_checklist_items_toggle_task_completion() {
    let mut db = Database::open_in_memory().unwrap();
    let today = date(2024, 1, 10);
    let checklist = db
        .create_checklist(
            "Inspection",
            None,
            &["Check belts".to_string(), "Clean coils".to_string()],
        )
        .unwrap();
    let mut request = new_plan("AC", &["eq-1"]);
    request.checklist_id = Some(checklist.id);
    let plan = db.create_plan(&request, today).unwrap();
    let batch = maintenance::generate_for_plan(&mut db, &plan.id, None, false, today).unwrap();

    let order = &batch.work_orders[0];
    let items: Vec<String> = order.tasks[0]
        .checklist
        .iter()
        .map(|item| item.id.clone())
        .collect();

    let updated = db.set_checklist_item(&order.id, &items[0], true).unwrap();
    assert!(!updated.tasks[0].completed);
    assert_eq!(updated.checklist_progress(), (1, 2));

    let updated = db.set_checklist_item(&order.id, &items[1], true).unwrap();
    assert!(updated.tasks[0].completed);

    let updated = db.set_checklist_item(&order.id, &items[0], false).unwrap();
    assert!(!updated.tasks[0].completed);

    let err = db.set_checklist_item(&order.id, "unknown", true).unwrap_err();
    assert!(matches!(err, UpkeepError::InvalidInput { .. }));
}

#[test]
fn test_delete_work_order_only_when_open() {
    let mut db = Database::open_in_memory().unwrap();
    let today = date(2024, 1, 10);
    let plan = db
        .create_plan(&new_plan("AC", &["eq-1", "eq-2"]), today)
        .unwrap();
    let batch = maintenance::generate_for_plan(&mut db, &plan.id, None, false, today).unwrap();

    let deleted = db.delete_work_order(&batch.work_orders[0].id).unwrap();
    assert_eq!(deleted.id, batch.work_orders[0].id);

    let second = &batch.work_orders[1].id;
    db.update_work_order_status(second, WorkOrderStatus::Cancelled)
        .unwrap();
    assert!(db.delete_work_order(second).is_err());

    let err = db.delete_work_order("missing").unwrap_err();
    assert!(matches!(err, UpkeepError::WorkOrderNotFound { .. }));
}

#[test]
fn test_list_work_orders_by_equipment_and_status() {
    let mut db = Database::open_in_memory().unwrap();
    let today = date(2024, 1, 10);
    let plan = db
        .create_plan(&new_plan("AC", &["eq-1", "eq-2"]), today)
        .unwrap();
    maintenance::generate_for_plan(&mut db, &plan.id, None, false, today).unwrap();

    let orders = db
        .list_work_orders(&WorkOrderFilter {
            equipment_id: Some("eq-2".to_string()),
            ..Default::default()
        })
        .unwrap();
    assert_eq!(orders.len(), 1);
    assert_eq!(orders[0].equipment[0].id, "eq-2");

    let orders = db
        .list_work_orders(&WorkOrderFilter {
            status: Some(WorkOrderStatus::Completed),
            ..Default::default()
        })
        .unwrap();
    assert!(orders.is_empty());
}
