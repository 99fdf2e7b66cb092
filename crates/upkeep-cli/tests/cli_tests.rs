use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// Helper function to create a temporary directory for CLI tests
fn create_cli_test_environment() -> TempDir {
    TempDir::new().expect("Failed to create temporary directory")
}

/// Helper function to create a Command with --no-color flag for testing
fn upkeep_cmd() -> Command {
    let mut cmd = Command::cargo_bin("upkeep").expect("Failed to find upkeep binary");
    cmd.env_remove("UPKEEP_DATABASE_FILE");
    cmd.arg("--no-color");
    cmd
}

/// Runs a command against `db` and returns its stdout, asserting success.
fn run_ok(db: &str, args: &[&str]) -> String {
    let output = upkeep_cmd()
        .args(["--database-file", db])
        .args(args)
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    String::from_utf8(output).expect("Invalid UTF-8 in CLI output")
}

/// Extracts the ID from a "Created ... with ID: <id>" line.
fn created_id(output: &str) -> String {
    output
        .lines()
        .find_map(|line| line.split_once("with ID: ").map(|(_, id)| id.trim().to_string()))
        .expect("output should contain a created ID")
}

#[test]
fn test_cli_create_plan_success() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");

    upkeep_cmd()
        .args([
            "--database-file",
            db_path.to_str().unwrap(),
            "plan",
            "create",
            "Monthly AC Check",
            "--frequency",
            "monthly",
            "--description",
            "Check filters",
            "-e",
            "eq-1=AC Unit 1",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created plan with ID:"))
        .stdout(predicate::str::contains("# Monthly AC Check"))
        .stdout(predicate::str::contains("AC Unit 1 (eq-1)"))
        .stdout(predicate::str::contains("(today)"));
}

#[test]
fn test_cli_create_plan_rejects_unknown_frequency() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");

    upkeep_cmd()
        .args([
            "--database-file",
            db_path.to_str().unwrap(),
            "plan",
            "create",
            "Bad",
            "--frequency",
            "daily",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid value"));
}

#[test]
fn test_cli_list_empty_plans() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");

    upkeep_cmd()
        .args(["--database-file", db_path.to_str().unwrap(), "plan", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No plans found."));
}

#[test]
fn test_cli_default_command_lists_active_plans() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");
    let db = db_path.to_str().unwrap();

    run_ok(db, &["plan", "create", "Pumps", "-f", "weekly", "-e", "p-1"]);

    upkeep_cmd()
        .args(["--database-file", db])
        .assert()
        .success()
        .stdout(predicate::str::contains("# Active Plans"))
        .stdout(predicate::str::contains("## Pumps (ID:"));
}

#[test]
fn test_cli_database_file_from_env() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("env.db");

    let mut cmd = Command::cargo_bin("upkeep").expect("Failed to find upkeep binary");
    cmd.env("UPKEEP_DATABASE_FILE", &db_path)
        .args(["--no-color", "checklist", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No checklists found."));

    assert!(db_path.exists());
}

#[test]
fn test_cli_plan_list_json() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");
    let db = db_path.to_str().unwrap();

    run_ok(db, &["plan", "create", "Chillers", "-f", "quarterly", "-e", "c-1", "-e", "c-2"]);

    let output = run_ok(db, &["plan", "list", "--json"]);
    let plans: serde_json::Value = serde_json::from_str(&output).expect("valid JSON");
    let plans = plans.as_array().expect("JSON array");
    assert_eq!(plans.len(), 1);
    assert_eq!(plans[0]["name"], "Chillers");
    assert_eq!(plans[0]["frequency"], "quarterly");
    assert_eq!(plans[0]["equipment_count"], 2);
}

#[test]
fn test_cli_due_generates_and_advances() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");
    let db = db_path.to_str().unwrap();

    let checklist = created_id(&run_ok(
        db,
        &[
            "checklist",
            "create",
            "AC inspection",
            "-i",
            "Check filters",
            "-i",
            "Clean coils",
        ],
    ));
    run_ok(
        db,
        &[
            "plan",
            "create",
            "Monthly AC Check",
            "-f",
            "monthly",
            "--checklist",
            &checklist,
            "-e",
            "eq-1=AC Unit 1",
            "-e",
            "eq-2=AC Unit 2",
            "--auto",
        ],
    );

    upkeep_cmd()
        .args(["--database-file", db, "due"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Generated 2 work order(s) for 1 due plan(s)"))
        .stdout(predicate::str::contains("Monthly AC Check - AC Unit 1"))
        .stdout(predicate::str::contains("Monthly AC Check - AC Unit 2"));

    upkeep_cmd()
        .args(["--database-file", db, "due"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No plans are due."));

    let output = run_ok(db, &["order", "list", "--json"]);
    let orders: serde_json::Value = serde_json::from_str(&output).expect("valid JSON");
    let orders = orders.as_array().expect("JSON array");
    assert_eq!(orders.len(), 2);

    let order_id = orders[0]["id"].as_str().unwrap().to_string();
    let item_id = orders[0]["tasks"][0]["checklist"][0]["id"]
        .as_str()
        .unwrap()
        .to_string();

    upkeep_cmd()
        .args(["--database-file", db, "order", "status", &order_id, "in-progress"])
        .assert()
        .success()
        .stdout(predicate::str::contains("In Progress"));

    upkeep_cmd()
        .args(["--database-file", db, "order", "check", &order_id, &item_id])
        .assert()
        .success()
        .stdout(predicate::str::contains("- [x] Check filters"))
        .stdout(predicate::str::contains("### AC inspection (1/2)"));
}

#[test]
fn test_cli_order_status_rejects_invalid_transition() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");
    let db = db_path.to_str().unwrap();

    let order_id = created_id(&run_ok(
        db,
        &["order", "create", "Replace belt", "-e", "fan-1", "-i", "Remove guard"],
    ));

    upkeep_cmd()
        .args(["--database-file", db, "order", "status", &order_id, "completed"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to update work order status"));
}

#[test]
fn test_cli_order_create_requires_equipment() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");

    upkeep_cmd()
        .args([
            "--database-file",
            db_path.to_str().unwrap(),
            "order",
            "create",
            "No equipment",
        ])
        .assert()
        .failure();
}

#[test]
fn test_cli_generate_without_equipment_fails() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");
    let db = db_path.to_str().unwrap();

    let plan_id = created_id(&run_ok(db, &["plan", "create", "Empty", "-f", "annual"]));

    upkeep_cmd()
        .args(["--database-file", db, "plan", "generate", &plan_id])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to generate work orders"));
}

#[test]
fn test_cli_delete_plan_requires_confirmation() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");
    let db = db_path.to_str().unwrap();

    let plan_id = created_id(&run_ok(db, &["plan", "create", "Doomed", "-f", "weekly"]));

    upkeep_cmd()
        .args(["--database-file", db, "plan", "delete", &plan_id])
        .assert()
        .failure();

    run_ok(db, &["plan", "delete", &plan_id, "--confirm"]);

    upkeep_cmd()
        .args(["--database-file", db, "plan", "show", &plan_id])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn test_cli_deactivate_and_activate_plan() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");
    let db = db_path.to_str().unwrap();

    let plan_id = created_id(&run_ok(db, &["plan", "create", "Boilers", "-f", "semiannual"]));

    run_ok(db, &["plan", "deactivate", &plan_id]);
    upkeep_cmd()
        .args(["--database-file", db, "plan", "list", "--inactive"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Boilers"));

    upkeep_cmd()
        .args(["--database-file", db, "plan", "activate", &plan_id])
        .assert()
        .success()
        .stdout(predicate::str::contains("Activated plan 'Boilers'"));
}
