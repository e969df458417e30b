use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn pesowise(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("pesowise").unwrap();
    cmd.env("PESOWISE_DATA_DIR", dir.path())
        .env("PESOWISE_LOG", "off");
    cmd
}

fn run(dir: &TempDir, args: &[&str]) {
    pesowise(dir).args(args).assert().success();
}

#[test]
fn test_init_and_config() {
    let dir = TempDir::new().unwrap();

    pesowise(&dir)
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("PesoWise data directory"));

    pesowise(&dir)
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("Budget warning percent: 80%"));
}

#[test]
fn test_wallet_create_and_list() {
    let dir = TempDir::new().unwrap();

    pesowise(&dir)
        .args(["wallet", "create", "GCash", "--type", "gcash", "--balance", "1,500"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created wallet: GCash"))
        .stdout(predicate::str::contains("₱1,500.00"));

    pesowise(&dir)
        .args(["wallet", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("GCash"))
        .stdout(predicate::str::contains("Total Balance: ₱1,500.00"));
}

#[test]
fn test_duplicate_wallet_rejected() {
    let dir = TempDir::new().unwrap();
    run(&dir, &["wallet", "create", "Cash"]);

    pesowise(&dir)
        .args(["wallet", "create", "cash"])
        .assert()
        .failure();
}

#[test]
fn test_expense_updates_wallet_and_budget() {
    let dir = TempDir::new().unwrap();
    run(&dir, &["wallet", "create", "Cash", "--balance", "5000"]);
    run(&dir, &["budget", "create", "Food", "1000"]);

    pesowise(&dir)
        .args(["txn", "add", "Cash", "850", "-c", "Food", "-d", "Groceries"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Wallet Cash: ₱4,150.00"))
        .stdout(predicate::str::contains("Budget Warning"));

    pesowise(&dir)
        .args(["txn", "add", "Cash", "200", "-c", "food"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Budget Alert"));

    pesowise(&dir)
        .args(["budget", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("OVER"));

    pesowise(&dir)
        .args(["txn", "list", "--category", "FOOD"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Groceries"));
}

#[test]
fn test_income_into_unknown_wallet_fails() {
    let dir = TempDir::new().unwrap();

    pesowise(&dir)
        .args(["txn", "add", "Nowhere", "100", "-c", "Salary", "--income"])
        .assert()
        .failure();
}

#[test]
fn test_bill_pay_deducts_wallet() {
    let dir = TempDir::new().unwrap();
    run(&dir, &["wallet", "create", "BPI", "--type", "bpi", "--balance", "3000"]);
    run(
        &dir,
        &["bill", "create", "Meralco", "2500", "--due", "2025-01-20"],
    );

    pesowise(&dir)
        .args(["bill", "pay", "Meralco", "-w", "BPI", "--date", "2025-01-18"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Paid Meralco: ₱2,500.00"));

    pesowise(&dir)
        .args(["wallet", "show", "BPI"])
        .assert()
        .success()
        .stdout(predicate::str::contains("₱500.00"));

    pesowise(&dir)
        .args(["bill", "pay", "Meralco", "-w", "BPI"])
        .assert()
        .failure();
}

#[test]
fn test_export_then_import_round_trip() {
    let dir = TempDir::new().unwrap();
    let backup = dir.path().join("backup.json");
    let backup_arg = backup.to_str().unwrap();

    run(&dir, &["wallet", "create", "Maya", "--type", "maya", "--balance", "800"]);
    run(&dir, &["txn", "add", "Maya", "120", "-c", "Transportation"]);

    pesowise(&dir)
        .args(["export", "json", backup_arg])
        .assert()
        .success()
        .stdout(predicate::str::contains("Backup written to"));

    let contents = std::fs::read_to_string(&backup).unwrap();
    assert!(contents.contains("\"walletId\""));

    let other = TempDir::new().unwrap();

    pesowise(&other)
        .args(["import", backup_arg])
        .assert()
        .success()
        .stdout(predicate::str::contains("--force"));

    pesowise(&other)
        .args(["wallet", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No wallets found."));

    pesowise(&other)
        .args(["import", backup_arg, "--force"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Imported 2 records."));

    pesowise(&other)
        .args(["wallet", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Total Balance: ₱680.00"));
}

#[test]
fn test_transactions_csv_export() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("txns.csv");

    run(&dir, &["wallet", "create", "Cash", "--balance", "1000"]);
    run(
        &dir,
        &["txn", "add", "Cash", "99.50", "-c", "Food", "--date", "2025-02-03"],
    );

    pesowise(&dir)
        .args(["export", "transactions", out.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Exported 1 transactions"));

    let csv = std::fs::read_to_string(&out).unwrap();
    assert!(csv.starts_with("Date,Description,Category,Type,Amount,Wallet"));
    assert!(csv.contains("2025-02-03,,Food,Expense,99.50,Cash"));
}

#[test]
fn test_reports() {
    let dir = TempDir::new().unwrap();
    run(&dir, &["wallet", "create", "Cash", "--balance", "2000"]);
    run(
        &dir,
        &["loan", "create", "Tito Ben", "500", "--due", "2025-06-30"],
    );
    run(
        &dir,
        &["txn", "add", "Cash", "300", "-c", "Food", "--date", "2025-03-10"],
    );

    pesowise(&dir)
        .args(["report", "net-worth"])
        .assert()
        .success()
        .stdout(predicate::str::contains("₱1,200.00"));

    pesowise(&dir)
        .args(["report", "spending", "--period", "2025-03"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Food"));

    pesowise(&dir)
        .args(["report", "spending", "--period", "March"])
        .assert()
        .failure();

    pesowise(&dir)
        .args(["report", "dashboard"])
        .assert()
        .success();
}
