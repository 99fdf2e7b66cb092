use tempfile::TempDir;
use upkeep_core::{models::EquipmentRef, params::CreatePlan, Upkeep, UpkeepBuilder};

/// Helper function to create a test upkeep instance
pub async fn create_test_upkeep() -> (TempDir, Upkeep) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = temp_dir.path().join("test.db");
    let upkeep = UpkeepBuilder::new()
        .with_database_path(Some(&db_path))
        .build()
        .await
        .expect("Failed to create upkeep");
    (temp_dir, upkeep)
}

/// Plan parameters covering `count` pieces of equipment, due today.
pub fn plan_params(name: &str, count: usize) -> CreatePlan {
    CreatePlan {
        name: name.to_string(),
        description: Some(format!("{name} routine")),
        frequency: "monthly".to_string(),
        equipment: (1..=count)
            .map(|i| EquipmentRef::new(format!("eq-{i}"), Some(format!("Unit {i}"))))
            .collect(),
        auto_generate: true,
        ..Default::default()
    }
}
