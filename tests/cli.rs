//! End-to-end tests for the houseshare binary

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn houseshare(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("houseshare").unwrap();
    cmd.env("HOUSESHARE_DATA_DIR", dir.path())
        .env_remove("HOUSESHARE_ROLE")
        .env_remove("RUST_LOG")
        .current_dir(dir.path());
    cmd
}

fn manager(dir: &TempDir) -> Command {
    let mut cmd = houseshare(dir);
    cmd.args(["--role", "manager"]);
    cmd
}

fn add(dir: &TempDir, description: &str, amount: &str, paid_by: &str, date: &str) {
    manager(dir)
        .args(["expense", "add", description, amount, "--paid-by", paid_by])
        .args(["--category", "Rent", "--date", date])
        .assert()
        .success();
}

#[test]
fn init_creates_household() {
    let dir = TempDir::new().unwrap();

    houseshare(&dir)
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Initialization complete!"))
        .stdout(predicate::str::contains("Amith, Anusha"));

    assert!(dir.path().join("config.json").exists());
    assert!(dir.path().join("data").join("expenses.json").exists());

    houseshare(&dir)
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Already initialized."));
}

#[test]
fn manager_adds_and_lists_expenses() {
    let dir = TempDir::new().unwrap();
    add(&dir, "January rent", "12000", "Amith", "2025-01-01");

    houseshare(&dir)
        .args(["expense", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("January rent"))
        .stdout(predicate::str::contains("₹12,000.00"));

    houseshare(&dir)
        .args(["expense", "list", "--month", "Feb 2025"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No expenses found."));
}

#[test]
fn viewer_cannot_add_expenses() {
    let dir = TempDir::new().unwrap();

    houseshare(&dir)
        .args(["expense", "add", "Snacks", "100", "--paid-by", "Amith"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Permission denied"));

    assert!(!dir.path().join("data").join("expenses.json").exists());
}

#[test]
fn role_from_environment() {
    let dir = TempDir::new().unwrap();

    houseshare(&dir)
        .env("HOUSESHARE_ROLE", "admin")
        .args(["expense", "add", "Snacks", "100", "--paid-by", "Anusha"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Added expense:"));
}

#[test]
fn unknown_payer_is_rejected() {
    let dir = TempDir::new().unwrap();

    manager(&dir)
        .args(["expense", "add", "Snacks", "100", "--paid-by", "Ravi"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Ravi"));
}

#[test]
fn settle_reports_transfers() {
    let dir = TempDir::new().unwrap();
    add(&dir, "Rent", "1000", "Amith", "2025-01-01");

    houseshare(&dir)
        .args(["report", "settle"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Anusha pays Amith ₹500.00"));

    add(&dir, "Rent", "1000", "Anusha", "2025-01-02");

    houseshare(&dir)
        .args(["report", "settle"])
        .assert()
        .success()
        .stdout(predicate::str::contains("All settled up!"));
}

#[test]
fn summary_for_one_month() {
    let dir = TempDir::new().unwrap();
    add(&dir, "January rent", "1000", "Amith", "2025-01-01");
    add(&dir, "February rent", "600", "Anusha", "2025-02-01");

    houseshare(&dir)
        .args(["report", "summary", "--month", "2025-02"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Expense Summary: Feb 2025"))
        .stdout(predicate::str::contains("Amith pays Anusha ₹300.00"));
}

#[test]
fn export_csv_writes_header() {
    let dir = TempDir::new().unwrap();
    add(&dir, "Rent", "1000", "Amith", "2025-01-01");

    let output = dir.path().join("out.csv");
    houseshare(&dir)
        .args(["export", "csv", "--output"])
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::contains("Exported 1 expense(s)"));

    let text = std::fs::read_to_string(&output).unwrap();
    assert!(text.starts_with("Date,Description,Category,Amount,Paid By,Month\n"));
    assert!(text.contains("2025-01-01,Rent,Rent,1000.00,Amith,Jan 2025"));
}

#[test]
fn exported_csv_imports_as_duplicates() {
    let dir = TempDir::new().unwrap();
    add(&dir, "Rent", "1000", "Amith", "2025-01-01");

    let output = dir.path().join("out.csv");
    houseshare(&dir)
        .args(["export", "csv", "--output"])
        .arg(&output)
        .assert()
        .success();

    manager(&dir)
        .args(["expense", "import"])
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Imported 0 expense(s), skipped 1 duplicate(s), 0 error(s)",
        ));
}

#[test]
fn settings_add_roommate() {
    let dir = TempDir::new().unwrap();

    manager(&dir)
        .args(["settings", "add-roommate", "  Ravi "])
        .assert()
        .success()
        .stdout(predicate::str::contains("Added roommate: Ravi"));

    houseshare(&dir)
        .args(["settings", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Amith, Anusha, Ravi"));

    manager(&dir)
        .args(["settings", "add-roommate", "Ravi"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}

#[test]
fn report_json_is_machine_readable() {
    let dir = TempDir::new().unwrap();
    add(&dir, "Rent", "900", "Amith", "2025-01-01");

    let output = houseshare(&dir)
        .args(["report", "json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let value: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(value["expense_count"], 1);
    assert_eq!(value["settlement"]["transfers"].as_array().unwrap().len(), 1);
}

#[test]
fn audit_lists_changes() {
    let dir = TempDir::new().unwrap();

    houseshare(&dir)
        .arg("audit")
        .assert()
        .success()
        .stdout(predicate::str::contains("No changes recorded yet."));

    add(&dir, "Rent", "1000", "Amith", "2025-01-01");
    manager(&dir)
        .args(["settings", "currency", "$"])
        .assert()
        .success();

    houseshare(&dir)
        .args(["audit", "--limit", "5"])
        .assert()
        .success()
        .stdout(predicate::str::contains("added expense exp-"))
        .stdout(predicate::str::contains("Rent, 1000.00 paid by Amith"))
        .stdout(predicate::str::contains("changed settings"));
}
