use predicates::prelude::*;
use ulid_test_utils::VECTORS;

#[test]
fn new_prints_one_ulid_by_default() {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("ulid");
    cmd.env_remove("ULID_FORMAT").env_remove("ULID_PROVIDER");
    cmd.arg("new");
    cmd.assert()
        .success()
        .stdout(predicate::str::is_match("^[0-7][0-9A-HJKMNP-TV-Z]{25}\n$").unwrap());
}

#[test]
fn format_can_come_from_the_environment() {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("ulid");
    cmd.env("ULID_FORMAT", "uuid");
    cmd.args(["new", "--timestamp", VECTORS[1].timestamp, "--seed", "1"]);
    cmd.assert()
        .success()
        .stdout(predicate::str::starts_with("01563e3a-b5d3-"));
}

#[test]
fn inspect_prints_json() {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("ulid");
    cmd.args(["inspect", VECTORS[1].ulid]);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains(r#""datetime":"2016-07-30T23:54:10.259Z""#))
        .stdout(predicate::str::contains(r#""timestamp_ms":1469922850259"#));
}

#[test]
fn invalid_input_exits_1() {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("ulid");
    cmd.args(["convert", "01ARZ3NDEKTSV4RRFFQ69G5FAU", "--to", "int"]);
    cmd.assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("error:"))
        .stderr(predicate::str::contains("'U'"));
}

#[test]
fn verbose_logs_to_stderr_only() {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("ulid");
    cmd.env_remove("RUST_LOG");
    cmd.args(["-v", "new", "--format", "int"]);
    cmd.assert()
        .success()
        .stdout(predicate::str::is_match("^[0-9]+\n$").unwrap())
        .stderr(predicate::str::contains("generating ULIDs"));
}
