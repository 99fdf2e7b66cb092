mod common;

use common::{create_test_upkeep, plan_params};
use upkeep_core::{
    params::{CreateChecklist, GenerateWorkOrders, Id, ListPlans, ListWorkOrders},
    schedule::today,
    ScanResult, UpkeepError,
};

#[tokio::test]
async fn test_scan_generates_for_each_due_plan_in_order() {
    let (_temp_dir, upkeep) = create_test_upkeep().await;
    upkeep.create_plan(&plan_params("Chillers", 2)).await.unwrap();
    upkeep.create_plan(&plan_params("Boilers", 3)).await.unwrap();

    let report = upkeep.run_due_plans().await.unwrap();
    assert_eq!(report.generated.len(), 2);
    assert_eq!(report.total_work_orders(), 5);

    let mut ids: Vec<&str> = report.work_orders().map(|o| o.id.as_str()).collect();
    ids.sort_unstable();
    ids.dedup();
    assert_eq!(ids.len(), 5);
    assert!(report.work_orders().all(|o| o.number.starts_with("OS-")));

    let rendered = ScanResult(report).to_string();
    assert!(rendered.contains("Chillers"));
    assert!(rendered.contains("Boilers"));
}

#[tokio::test]
async fn test_scan_skips_plans_without_equipment() {
    let (_temp_dir, upkeep) = create_test_upkeep().await;
    upkeep.create_plan(&plan_params("Empty", 0)).await.unwrap();
    upkeep.create_plan(&plan_params("Pumps", 1)).await.unwrap();

    let report = upkeep.run_due_plans().await.unwrap();
    assert_eq!(report.total_work_orders(), 1);
    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].plan_name, "Empty");

    let due = upkeep
        .list_plans_summary(&ListPlans {
            due_only: true,
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(due.len(), 1);
    assert_eq!(due[0].name, "Empty");
}

#[tokio::test]
async fn test_manual_generation_with_advance() {
    let (_temp_dir, upkeep) = create_test_upkeep().await;
    let checklist = upkeep
        .create_checklist(&CreateChecklist {
            name: "Pump inspection".to_string(),
            description: None,
            items: vec!["Check seals".to_string(), "Check pressure".to_string()],
        })
        .await
        .unwrap();

    let mut params = plan_params("Pumps", 2);
    params.checklist_id = Some(checklist.id);
    let plan = upkeep.create_plan(&params).await.unwrap();

    let batch = upkeep
        .generate_work_orders(&GenerateWorkOrders {
            plan_id: plan.id.clone(),
            scheduled_date: None,
            advance: true,
        })
        .await
        .unwrap();

    assert_eq!(batch.work_orders.len(), 2);
    assert!(batch
        .work_orders
        .iter()
        .all(|o| o.scheduled_date == today() && o.checklist_progress() == (0, 2)));
    assert_eq!(batch.next_execution_date, plan_next_after_today(&upkeep, &plan.id).await);

    let orders = upkeep
        .list_work_orders(&ListWorkOrders {
            equipment_id: Some("eq-2".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(orders.len(), 1);
    assert_eq!(orders[0].title, "Pumps - Unit 2");
}

async fn plan_next_after_today(
    upkeep: &upkeep_core::Upkeep,
    plan_id: &str,
) -> Option<jiff::civil::Date> {
    let plan = upkeep.get_plan(&Id::new(plan_id)).await.unwrap().unwrap();
    let next = plan.next_execution_date?;
    assert!(next > today());
    Some(next)
}

#[tokio::test]
async fn test_generate_for_unknown_plan() {
    let (_temp_dir, upkeep) = create_test_upkeep().await;

    let err = upkeep
        .generate_work_orders(&GenerateWorkOrders {
            plan_id: "missing".to_string(),
            ..Default::default()
        })
        .await
        .unwrap_err();
    assert!(matches!(err, UpkeepError::PlanNotFound { .. }));

    assert!(upkeep
        .advance_plan(&Id::new("missing"))
        .await
        .unwrap()
        .is_none());
}
