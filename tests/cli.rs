//! Exit-code contract (spec §6): `0` on success, `1` on parse/analysis
//! failure, exercised against the `files: Vec<PathBuf>` batch surface.

use std::io::Write;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::NamedTempFile;

fn pseudocode_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{contents}").unwrap();
    file
}

#[test]
fn valid_file_exits_zero_and_prints_a_report() {
    let file = pseudocode_file(
        "function factorial(n)
         begin
           if n <= 1 then begin return 1 end
           else begin return n * call factorial(n - 1) end
         end",
    );
    Command::cargo_bin("pcx")
        .unwrap()
        .arg(file.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Θ(n)"));
}

#[test]
fn malformed_file_exits_one_and_prints_the_error() {
    let file = pseudocode_file("function f(n begin return 1 end");
    Command::cargo_bin("pcx")
        .unwrap()
        .arg(file.path())
        .assert()
        .failure()
        .code(1);
}

#[test]
fn json_flag_emits_parseable_json() {
    let file = pseudocode_file("function c(n) begin x = 5; y = x + 10; return y end");
    let output = Command::cargo_bin("pcx")
        .unwrap()
        .arg(file.path())
        .arg("--json")
        .output()
        .unwrap();
    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["heur_complexity"], "Θ(1)");
}

#[test]
fn one_failing_file_among_several_fails_the_whole_batch() {
    let good = pseudocode_file("function c(n) begin return n end");
    let bad = pseudocode_file("function f(n begin return 1 end");
    Command::cargo_bin("pcx")
        .unwrap()
        .arg(good.path())
        .arg(bad.path())
        .assert()
        .failure()
        .code(1);
}

#[test]
fn missing_file_argument_is_rejected_by_clap() {
    Command::cargo_bin("pcx").unwrap().assert().failure();
}

#[test]
fn function_flag_selects_a_specific_function() {
    let file = pseudocode_file(
        "function helper(n) begin return n end
         function fib(n) begin if n <= 1 then return n else return call fib(n-1) + call fib(n-2) end end",
    );
    Command::cargo_bin("pcx")
        .unwrap()
        .arg(file.path())
        .arg("--function")
        .arg("helper")
        .assert()
        .success()
        .stdout(predicate::str::contains("Function: helper"));
}
