use assert_cmd::Command;
use predicates::prelude::*;
use predicates::str::contains;
use tempfile::TempDir;

fn script(home: &TempDir, input: &str) -> assert_cmd::assert::Assert {
    Command::cargo_bin("expense_tracker_cli")
        .unwrap()
        .env("EXPENSE_TRACKER_CLI_SCRIPT", "1")
        .env("EXPENSE_TRACKER_HOME", home.path())
        .env_remove("RUST_LOG")
        .write_stdin(input.to_string())
        .assert()
}

#[test]
fn script_mode_records_and_summarizes() {
    let home = TempDir::new().unwrap();
    let input = "record 12.50 Food Lunch\nrecord 7.25 Food Snack\nrecord 40 Transport Taxi\nsummary\nexit\n";

    script(&home, input)
        .success()
        .stdout(contains("Expense recorded."))
        .stdout(contains("Total Spending: 59.75"))
        .stdout(contains("Food: 19.75"))
        .stdout(contains("Transport: 40.00"));

    assert!(home.path().join("data").join("expenses.json").exists());
    assert!(home.path().join("data").join("budgets.json").exists());
}

#[test]
fn history_survives_restart() {
    let home = TempDir::new().unwrap();
    script(&home, "record 4.5 Coffee \"Flat white\"\nsave\n").success();

    script(&home, "history\n")
        .success()
        .stdout(contains("Coffee - 4.50 - Flat white"));
}

#[test]
fn budget_set_reports_previous_value() {
    let home = TempDir::new().unwrap();
    script(&home, "budget set Food 100\nbudget set Food 80\nbudget list\n")
        .success()
        .stdout(contains("Budget set successfully for the category: Food"))
        .stdout(contains("Previous budget for Food: 100.00"))
        .stdout(contains("Food: 80.00"));
}

#[test]
fn convert_uses_fixed_rate_and_rejects_bad_codes() {
    let home = TempDir::new().unwrap();
    script(&home, "convert EUR\nrecord 10 Food Lunch\nconvert usd\nconvert JPY\n")
        .success()
        .stdout(contains("Lunch: 10.00 USD = 1107.00 JPY"))
        .stderr(contains("No expenses recorded"))
        .stderr(contains("Invalid currency code: `usd`"));
}

#[test]
fn unknown_command_gets_a_suggestion() {
    let home = TempDir::new().unwrap();
    script(&home, "sumary\n")
        .success()
        .stdout(contains("Unknown command `sumary`"))
        .stdout(contains("Did you mean `summary`?"));
}

#[test]
fn corrupt_store_is_reported_and_recovered() {
    let home = TempDir::new().unwrap();
    script(&home, "budget set Rent 900\nrecord 12 Food Lunch\n").success();
    std::fs::write(home.path().join("data").join("expenses.json"), "garbage").unwrap();

    script(&home, "history\nbudget list\n")
        .success()
        .stdout(contains("The expenses store is unavailable"))
        .stdout(contains("No expenses recorded."))
        .stdout(contains("Rent: 900.00"))
        .stdout(contains("ERROR").not());
}
