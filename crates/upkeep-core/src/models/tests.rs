use jiff::{civil::date, Timestamp};

use crate::{
    error::UpkeepError,
    models::{
        EquipmentRef, Frequency, MaintenancePlan, NewPlan, NewWorkOrder, Period, PlanChanges,
        PlanFilter, PlanStatus, Priority, TaskTemplate, WorkOrderFilter, WorkOrderStatus,
        WorkOrderType,
    },
    params::{CreatePlan, CreateWorkOrder, ListPlans, ListWorkOrders, UpdatePlan},
};

fn create_test_plan() -> MaintenancePlan {
    MaintenancePlan {
        id: "plan-1".to_string(),
        name: "Monthly AC Check".to_string(),
        description: Some("Check filters".to_string()),
        frequency: Frequency::Monthly,
        status: PlanStatus::Active,
        start_date: None,
        checklist_id: None,
        next_execution_date: Some(date(2024, 1, 10)),
        auto_generate: true,
        equipment: vec![EquipmentRef::new("eq-1", Some("AC Unit 1".to_string()))],
        created_at: Timestamp::from_second(1704067200).unwrap(),
        updated_at: Timestamp::from_second(1704067200).unwrap(),
    }
}

#[test]
fn test_frequency_parsing_accepts_legacy_names() {
    assert_eq!("Mensal".parse::<Frequency>(), Ok(Frequency::Monthly));
    assert_eq!("semanal".parse::<Frequency>(), Ok(Frequency::Weekly));
    assert_eq!("Semi-Annual".parse::<Frequency>(), Ok(Frequency::Semiannual));
    assert_eq!("yearly".parse::<Frequency>(), Ok(Frequency::Annual));
    assert!("daily".parse::<Frequency>().is_err());

    for frequency in Frequency::ALL {
        assert_eq!(frequency.as_str().parse::<Frequency>(), Ok(frequency));
    }
}

#[test]
fn test_frequency_periods_are_positive() {
    for frequency in Frequency::ALL {
        match frequency.period() {
            Period::Days(n) | Period::Months(n) => assert!(n > 0),
        }
    }
    assert_eq!(Frequency::Quarterly.period(), Period::Months(3));
}

#[test]
fn test_frequency_serde_aliases() {
    let frequency: Frequency = serde_json::from_str("\"Trimestral\"").unwrap();
    assert_eq!(frequency, Frequency::Quarterly);
    assert_eq!(serde_json::to_string(&Frequency::Bimonthly).unwrap(), "\"bimonthly\"");
}

#[test]
fn test_status_parsing() {
    assert_eq!("Ativo".parse::<PlanStatus>(), Ok(PlanStatus::Active));
    assert_eq!("in-progress".parse::<WorkOrderStatus>(), Ok(WorkOrderStatus::InProgress));
    assert_eq!("canceled".parse::<WorkOrderStatus>(), Ok(WorkOrderStatus::Cancelled));
    assert_eq!("corretiva".parse::<WorkOrderType>(), Ok(WorkOrderType::Corrective));
    assert_eq!("alta".parse::<Priority>(), Ok(Priority::High));
    assert!("paused".parse::<WorkOrderStatus>().is_err());
}

#[test]
fn test_work_order_transitions() {
    use WorkOrderStatus::*;

    assert!(Open.can_transition_to(InProgress));
    assert!(Open.can_transition_to(Cancelled));
    assert!(!Open.can_transition_to(Completed));
    assert!(InProgress.can_transition_to(Completed));
    assert!(Cancelled.can_transition_to(Open));
    assert!(Completed.allowed_transitions().is_empty());
}

#[test]
fn test_plan_is_due() {
    let mut plan = create_test_plan();
    assert!(plan.is_due(date(2024, 1, 10)));
    assert!(plan.is_due(date(2024, 2, 1)));
    assert!(!plan.is_due(date(2024, 1, 9)));

    plan.auto_generate = false;
    assert!(!plan.is_due(date(2024, 2, 1)));

    plan.auto_generate = true;
    plan.status = PlanStatus::Inactive;
    assert!(!plan.is_due(date(2024, 2, 1)));

    plan.status = PlanStatus::Active;
    plan.next_execution_date = None;
    assert!(!plan.is_due(date(2024, 2, 1)));
}

#[test]
fn test_plan_apply_reports_only_real_changes() {
    let mut plan = create_test_plan();
    let changes = PlanChanges {
        name: Some("Monthly AC Check".to_string()),
        frequency: Some(Frequency::Quarterly),
        auto_generate: Some(false),
        ..Default::default()
    };

    let changed = plan.apply(&changes);
    assert_eq!(changed, ["frequency", "auto-generate"]);
    assert_eq!(plan.frequency, Frequency::Quarterly);
    assert!(!plan.auto_generate);

    assert!(plan.apply(&changes).is_empty());
}

#[test]
fn test_equipment_display_name_falls_back_to_placeholder() {
    assert_eq!(EquipmentRef::new("eq-9", None).display_name(), "Equipment eq-9");
    assert_eq!(
        EquipmentRef::new("eq-8", Some("  ".to_string())).display_name(),
        "Equipment eq-8"
    );
    assert_eq!(
        EquipmentRef::new("eq-1", Some("Chiller".to_string())).display_name(),
        "Chiller"
    );
}

#[test]
fn test_new_plan_validation() {
    let params = CreatePlan {
        name: "  Pump service  ".to_string(),
        frequency: "quarterly".to_string(),
        start_date: Some("2024-02-29".to_string()),
        ..Default::default()
    };
    let plan = NewPlan::try_from(&params).unwrap();
    assert_eq!(plan.name, "Pump service");
    assert_eq!(plan.start_date, Some(date(2024, 2, 29)));

    let bad_date = CreatePlan {
        start_date: Some("29/02/2024".to_string()),
        ..params.clone()
    };
    let err = NewPlan::try_from(&bad_date).unwrap_err();
    assert!(matches!(err, UpkeepError::InvalidInput { ref field, .. } if field == "start_date"));

    let no_name = CreatePlan {
        name: " ".to_string(),
        ..params
    };
    assert!(NewPlan::try_from(&no_name).is_err());
}

#[test]
fn test_plan_changes_reschedules_only_on_real_schedule_changes() {
    let mut plan = create_test_plan();

    let renamed = PlanChanges::try_from(&UpdatePlan {
        id: "plan-1".to_string(),
        name: Some("Renamed".to_string()),
        ..Default::default()
    })
    .unwrap();
    assert!(!PlanChanges::reschedules(&plan.apply(&renamed)));

    let same_frequency = PlanChanges::try_from(&UpdatePlan {
        id: "plan-1".to_string(),
        frequency: Some("monthly".to_string()),
        ..Default::default()
    })
    .unwrap();
    assert!(!PlanChanges::reschedules(&plan.apply(&same_frequency)));

    let annual = PlanChanges::try_from(&UpdatePlan {
        id: "plan-1".to_string(),
        frequency: Some("annual".to_string()),
        ..Default::default()
    })
    .unwrap();
    assert!(PlanChanges::reschedules(&plan.apply(&annual)));

    let moved = PlanChanges::try_from(&UpdatePlan {
        id: "plan-1".to_string(),
        start_date: Some("2024-05-01".to_string()),
        ..Default::default()
    })
    .unwrap();
    assert!(PlanChanges::reschedules(&plan.apply(&moved)));
}

#[test]
fn test_new_work_order_defaults_and_validation() {
    let params = CreateWorkOrder {
        title: "Fix leak".to_string(),
        equipment: vec![EquipmentRef::new("eq-1", None)],
        tasks: vec![TaskTemplate {
            name: "Repair".to_string(),
            checklist: vec!["Replace seal".to_string()],
        }],
        ..Default::default()
    };
    let order = NewWorkOrder::try_from(&params).unwrap();
    assert_eq!(order.priority, Priority::Medium);
    assert_eq!(order.kind, WorkOrderType::Corrective);
    assert_eq!(order.scheduled_date, None);

    let no_equipment = CreateWorkOrder {
        equipment: Vec::new(),
        ..params.clone()
    };
    let err = NewWorkOrder::try_from(&no_equipment).unwrap_err();
    assert!(matches!(err, UpkeepError::InvalidInput { ref field, .. } if field == "equipment"));

    let bad_priority = CreateWorkOrder {
        priority: Some("urgent".to_string()),
        ..params
    };
    assert!(NewWorkOrder::try_from(&bad_priority).is_err());
}

#[test]
fn test_plan_filter_from_list_params() {
    let filter = PlanFilter::try_from(&ListPlans::default()).unwrap();
    assert_eq!(filter.status, Some(PlanStatus::Active));
    assert!(filter.due_on_or_before.is_none());

    let filter = PlanFilter::try_from(&ListPlans {
        all: true,
        frequency: Some("weekly".to_string()),
        ..Default::default()
    })
    .unwrap();
    assert_eq!(filter.status, None);
    assert_eq!(filter.frequency, Some(Frequency::Weekly));

    assert!(PlanFilter::try_from(&ListPlans {
        frequency: Some("hourly".to_string()),
        ..Default::default()
    })
    .is_err());
}

#[test]
fn test_work_order_filter_from_list_params() {
    let filter = WorkOrderFilter::try_from(&ListWorkOrders {
        status: Some("in_progress".to_string()),
        ..Default::default()
    })
    .unwrap();
    assert_eq!(filter.status, Some(WorkOrderStatus::InProgress));

    assert!(WorkOrderFilter::try_from(&ListWorkOrders {
        status: Some("archived".to_string()),
        ..Default::default()
    })
    .is_err());
}

#[test]
fn test_task_template_instantiate() {
    let template = TaskTemplate {
        name: "Inspection".to_string(),
        checklist: vec!["Check filters".to_string(), "Clean coils".to_string()],
    };
    let first = template.instantiate();
    let second = template.instantiate();

    assert_eq!(first.name, "Inspection");
    assert!(!first.completed);
    assert_eq!(first.checklist.len(), 2);
    assert!(first.checklist.iter().all(|item| !item.completed));
    assert_ne!(first.id, second.id);
    assert_ne!(first.checklist[0].id, second.checklist[0].id);
}
