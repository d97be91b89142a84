use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;
use std::fs;

mod common;
use common::{init_db, setup_db_root, tome, write_schema};

#[test]
fn end_to_end_apply_list_rollback() {
    let (config, root) = setup_db_root("e2e");
    init_db(&config);

    // users.001: up only, no down file.
    tome()
        .args(["--config", &config, "schema", "new", "users.001", "create-t"])
        .assert()
        .success()
        .stdout(contains("Created"));

    let folder = root.join("schemas").join("users");
    assert!(folder.join("001-create-t.sql").exists());
    assert!(folder.join("001-create-t.down.sql").exists());

    fs::write(folder.join("001-create-t.sql"), "CREATE TABLE t(x);").unwrap();
    fs::remove_file(folder.join("001-create-t.down.sql")).unwrap();

    tome()
        .args(["--config", &config, "schema", "apply-all"])
        .assert()
        .success()
        .stdout(contains("Executing users.001-create-t"))
        .stdout(contains("1 applied, 0 failed."));

    tome()
        .args(["--config", &config, "schema", "list"])
        .assert()
        .success()
        .stdout(contains("Applied migrations:"))
        .stdout(contains("users.001-create-t @"))
        .stdout(contains("No migrations are pending."));

    tome()
        .args(["--config", &config, "table", "t"])
        .assert()
        .success()
        .stdout(contains("x"));

    // users.002: down file drops t.
    tome()
        .args(["--config", &config, "schema", "new", "users.002", "drop-t"])
        .assert()
        .success();

    fs::write(folder.join("002-drop-t.sql"), "CREATE TABLE t2(x);").unwrap();
    fs::write(folder.join("002-drop-t.down.sql"), "DROP TABLE t;").unwrap();

    tome()
        .args(["--config", &config, "schema", "apply-all"])
        .assert()
        .success()
        .stdout(contains("Executing users.002-drop-t"));

    tome()
        .args(["--config", &config, "schema", "rollback", "users.002"])
        .assert()
        .success()
        .stdout(contains("Rolled back"));

    // The down script ran (t is gone) and no users.002 entry survives in
    // the applied section.
    tome()
        .args(["--config", &config, "table", "t"])
        .assert()
        .success()
        .stdout(contains("Table does not exist."));

    tome()
        .args(["--config", &config, "schema", "list"])
        .assert()
        .success()
        .stdout(
            predicates::str::is_match(r"users\.002-drop-t @")
                .expect("Invalid regex")
                .not(),
        );
}

#[test]
fn reapply_requires_confirmation() {
    let (config, root) = setup_db_root("reapply");
    init_db(&config);
    write_schema(
        &root,
        "users",
        "001-create.sql",
        "CREATE TABLE IF NOT EXISTS t(x);",
    );

    tome()
        .args(["--config", &config, "schema", "apply", "users.001"])
        .assert()
        .success()
        .stdout(contains("Ok"));

    // Declining the prompt (closed stdin) leaves everything unchanged.
    tome()
        .args(["--config", &config, "schema", "apply", "users.001"])
        .assert()
        .success()
        .stdout(contains("already applied"))
        .stdout(contains("Skipped."));

    // --force re-runs without asking.
    tome()
        .args(["--config", &config, "schema", "apply", "users.001", "--force"])
        .assert()
        .success()
        .stdout(contains("Ok"));
}

#[test]
fn failing_migration_is_logged_and_batch_continues() {
    let (config, root) = setup_db_root("failing");
    write_schema(&root, "users", "001-bad.sql", "THIS IS NOT SQL;");
    write_schema(&root, "users", "002-good.sql", "CREATE TABLE ok_t(x);");

    // init applies everything it can and still exits normally.
    tome()
        .args(["--config", &config, "init"])
        .assert()
        .success()
        .stdout(contains("Failed"))
        .stdout(contains("Errors during initializing database."));

    tome()
        .args(["--config", &config, "table", "ok_t"])
        .assert()
        .success()
        .stdout(contains("x"));

    tome()
        .args(["--config", &config, "schema", "errors"])
        .assert()
        .success()
        .stdout(contains("Recent migration errors:"))
        .stdout(contains("001-bad"));

    tome()
        .args(["--config", &config, "schema", "clear-errors"])
        .assert()
        .success()
        .stdout(contains("Cleared all migration errors."));

    tome()
        .args(["--config", &config, "schema", "errors"])
        .assert()
        .success()
        .stdout(contains("No migration errors logged."));
}

#[test]
fn rollback_without_down_file_reports_and_keeps_ledger() {
    let (config, root) = setup_db_root("no_down");
    init_db(&config);
    write_schema(&root, "users", "001-create.sql", "CREATE TABLE t(x);");

    tome()
        .args(["--config", &config, "schema", "apply-all"])
        .assert()
        .success();

    tome()
        .args(["--config", &config, "schema", "rollback", "users.001"])
        .assert()
        .success()
        .stdout(contains("No rollback file found for users.001"));

    tome()
        .args(["--config", &config, "schema", "list"])
        .assert()
        .success()
        .stdout(contains("users.001-create @"));
}

#[test]
fn full_init_force_rebuilds_from_scratch() {
    let (config, root) = setup_db_root("full_init");
    write_schema(&root, "users", "001-create.sql", "CREATE TABLE t(x);");

    tome()
        .args(["--config", &config, "full-init", "--force"])
        .assert()
        .success()
        .stdout(contains("Executing users.001-create"))
        .stdout(contains("Fully initialized the database."));

    // A second forced run starts over from an empty ledger and applies
    // the schema again.
    tome()
        .args(["--config", &config, "full-init", "--force"])
        .assert()
        .success()
        .stdout(contains("Executing users.001-create"));
}

#[test]
fn revert_last_restores_previous_state() {
    let (config, root) = setup_db_root("revert_last");
    init_db(&config);

    tome()
        .args(["--config", &config, "backup"])
        .assert()
        .success()
        .stdout(contains("Created backup"));

    write_schema(&root, "users", "001-zz.sql", "CREATE TABLE zz(x);");
    tome()
        .args(["--config", &config, "schema", "apply-all"])
        .assert()
        .success();

    tome()
        .args(["--config", &config, "revert", "last"])
        .write_stdin("n\n")
        .assert()
        .success()
        .stdout(contains("Reverted to:"));

    // zz only existed after the backup was taken.
    tome()
        .args(["--config", &config, "table", "zz"])
        .assert()
        .success()
        .stdout(contains("Table does not exist."));
}

#[test]
fn revert_reports_missing_backups() {
    let (config, _root) = setup_db_root("revert_missing");
    init_db(&config);

    tome()
        .args(["--config", &config, "revert", "last"])
        .write_stdin("n\n")
        .assert()
        .success()
        .stdout(contains("No last backup"));

    tome()
        .args(["--config", &config, "revert", "01-01-2020_00-00-00.db"])
        .write_stdin("n\n")
        .assert()
        .success()
        .stdout(contains("No backup from that date"));
}

#[test]
fn missing_config_key_aborts_the_command() {
    let (config, root) = setup_db_root("bad_config");
    fs::write(root.join("tomedb.yml"), "something_else: 1\n").unwrap();

    tome()
        .args(["--config", &config, "backup"])
        .assert()
        .failure()
        .stderr(contains("db_folder"));
}

#[test]
fn missing_config_file_aborts_the_command() {
    tome()
        .args(["--config", "/nonexistent/tomedb.yml", "backup"])
        .assert()
        .failure()
        .stderr(contains("Error"));
}

#[test]
fn invalid_schema_identifier_aborts() {
    let (config, _root) = setup_db_root("bad_name");
    init_db(&config);

    tome()
        .args(["--config", &config, "schema", "apply", "not-a-valid-name"])
        .assert()
        .failure()
        .stderr(contains("Invalid schema name format"));
}

#[test]
fn table_command_shows_ledger_columns() {
    let (config, _root) = setup_db_root("table_info");
    init_db(&config);

    tome()
        .args(["--config", &config, "table", "migrations"])
        .assert()
        .success()
        .stdout(contains("name"))
        .stdout(contains("applied_at"));
}
