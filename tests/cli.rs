use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn expense(data_dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("expense").unwrap();
    cmd.env("EXPENSE_TRACKER_DATA_DIR", data_dir.path())
        .env_remove("RUST_LOG");
    cmd
}

fn stored_ids(data_dir: &TempDir) -> Vec<String> {
    let raw = std::fs::read_to_string(data_dir.path().join("data").join("expenses.json")).unwrap();
    let json: serde_json::Value = serde_json::from_str(&raw).unwrap();
    json["expenses"]
        .as_array()
        .unwrap()
        .iter()
        .map(|row| row["id"].as_str().unwrap().to_string())
        .collect()
}

#[test]
fn add_then_list() {
    let dir = TempDir::new().unwrap();

    expense(&dir)
        .args(["add", "12.50", "Food", "--note", "lunch"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created expense"))
        .stdout(predicate::str::contains("$12.50"));

    expense(&dir)
        .args(["list", "--filter", "week"])
        .assert()
        .success()
        .stdout(predicate::str::contains("This week"))
        .stdout(predicate::str::contains("Food"))
        .stdout(predicate::str::contains("Showing 1 expenses"));
}

#[test]
fn summary_totals_by_category() {
    let dir = TempDir::new().unwrap();
    for (amount, category) in [("10.00", "Food"), ("5.50", "Food"), ("20.00", "Rent")] {
        expense(&dir).args(["add", amount, category]).assert().success();
    }

    expense(&dir)
        .args(["summary", "--csv"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Food,15.50"))
        .stdout(predicate::str::contains("Rent,20.00"))
        .stdout(predicate::str::contains("TOTAL,35.50"));
}

#[test]
fn negative_amount_is_rejected() {
    let dir = TempDir::new().unwrap();

    expense(&dir)
        .args(["add", "-5.00", "Food"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("amount cannot be negative"));
}

#[test]
fn missing_category_is_rejected() {
    let dir = TempDir::new().unwrap();

    expense(&dir)
        .args(["add", "5.00", "  "])
        .assert()
        .failure()
        .stderr(predicate::str::contains("category is required"));
}

#[test]
fn edit_and_delete_by_id() {
    let dir = TempDir::new().unwrap();
    expense(&dir).args(["add", "10.00", "Food"]).assert().success();
    let id = stored_ids(&dir).remove(0);

    expense(&dir)
        .args(["edit", &id, "--amount", "12.00"])
        .assert()
        .success()
        .stdout(predicate::str::contains("$12.00"));

    expense(&dir)
        .args(["show", &id])
        .assert()
        .success()
        .stdout(predicate::str::contains("Category:  Food"));

    expense(&dir).args(["delete", &id]).assert().success();
    assert!(stored_ids(&dir).is_empty());

    expense(&dir)
        .args(["show", &id])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn unknown_filter_is_rejected() {
    let dir = TempDir::new().unwrap();

    expense(&dir)
        .args(["list", "--filter", "year"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown filter"));
}

#[test]
fn import_reports_rejected_rows() {
    let dir = TempDir::new().unwrap();
    let csv = dir.path().join("in.csv");
    std::fs::write(&csv, "amount,category,note\n4.00,Coffee,\noops,Food,\n").unwrap();

    expense(&dir)
        .arg("import")
        .arg(&csv)
        .assert()
        .success()
        .stdout(predicate::str::contains("Imported 1 expenses"))
        .stdout(predicate::str::contains("line 3: invalid amount 'oops'"));

    assert_eq!(stored_ids(&dir).len(), 1);
}

#[test]
fn import_rejects_comma_decimal() {
    let dir = TempDir::new().unwrap();
    let csv = dir.path().join("in.csv");
    std::fs::write(&csv, "amount,category\n\"12,50\",Food\n").unwrap();

    expense(&dir)
        .arg("import")
        .arg(&csv)
        .assert()
        .success()
        .stdout(predicate::str::contains("Imported 0 expenses"))
        .stdout(predicate::str::contains("line 2: invalid amount '12,50'"));
}

#[test]
fn import_without_category_header_fails() {
    let dir = TempDir::new().unwrap();
    let csv = dir.path().join("in.csv");
    std::fs::write(&csv, "date,amount\n2025-01-15,12.50\n").unwrap();

    expense(&dir)
        .arg("import")
        .arg(&csv)
        .assert()
        .failure()
        .stderr(predicate::str::contains("no category column"));
}

#[test]
fn import_uses_configured_date_format() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("config.json"),
        r#"{"date_format": "%d.%m.%Y"}"#,
    )
    .unwrap();
    let csv = dir.path().join("in.csv");
    std::fs::write(&csv, "amount,category,date\n4.00,Food,12.03.2025\n").unwrap();

    expense(&dir)
        .env("TZ", "UTC")
        .arg("import")
        .arg(&csv)
        .assert()
        .success()
        .stdout(predicate::str::contains("Imported 1 expenses"));

    let raw = std::fs::read_to_string(dir.path().join("data").join("expenses.json")).unwrap();
    assert!(raw.contains("2025-03-12T00:00:00Z"));
}

#[test]
fn first_run_writes_default_settings() {
    let dir = TempDir::new().unwrap();
    expense(&dir).args(["list"]).assert().success();

    let raw = std::fs::read_to_string(dir.path().join("config.json")).unwrap();
    let json: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(json["currency_symbol"], "$");
    assert_eq!(json["first_day_of_week"], 0);
}

#[test]
fn edit_note_of_imported_refund() {
    let dir = TempDir::new().unwrap();
    let csv = dir.path().join("in.csv");
    std::fs::write(&csv, "amount,category\n-20.00,Refund\n").unwrap();
    expense(&dir).arg("import").arg(&csv).assert().success();

    let id = stored_ids(&dir).remove(0);
    expense(&dir)
        .args(["edit", &id, "--note", "store credit"])
        .assert()
        .success()
        .stdout(predicate::str::contains("store credit"))
        .stdout(predicate::str::contains("-$20.00"));
}

#[test]
fn export_json_to_stdout() {
    let dir = TempDir::new().unwrap();
    expense(&dir).args(["add", "3.25", "Bus"]).assert().success();

    expense(&dir)
        .args(["export", "--format", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"schema_version\":\"1.0.0\""))
        .stdout(predicate::str::contains("\"total\":\"3.25\""));
}

#[test]
fn history_shows_audit_entries() {
    let dir = TempDir::new().unwrap();
    expense(&dir).args(["add", "1.00", "Snacks"]).assert().success();

    expense(&dir)
        .arg("history")
        .assert()
        .success()
        .stdout(predicate::str::contains("CREATE"));
}

#[test]
fn config_shows_paths() {
    let dir = TempDir::new().unwrap();

    expense(&dir)
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("expenses.json"))
        .stdout(predicate::str::contains("First day of week: Sun"));
}
