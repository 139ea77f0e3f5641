use assert_cmd::Command;
use predicates::prelude::*;
use predicates::str::contains;
use serde_json::Value;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

const INPUT: &str = "\
CASE_NUMBER;CASE_STATUS;SOC_NAME;WORKSITE_STATE
I-1;CERTIFIED;\"SOFTWARE DEVELOPERS, APPLICATIONS\";CA
I-2;CERTIFIED;\"SOFTWARE DEVELOPERS, APPLICATIONS\";WA
I-3;CERTIFIED;ACCOUNTANTS AND AUDITORS;CA
I-4;DENIED;ACCOUNTANTS AND AUDITORS;NY
I-5;CERTIFIED;COMPUTER SYSTEMS ANALYSTS;NY
I-6;WITHDRAWN;COMPUTER SYSTEMS ANALYSTS;NY
I-7;CERTIFIED;\"SOFTWARE DEVELOPERS, APPLICATIONS\";CA
";

struct TestEnv {
    _tmp: TempDir,
    input: PathBuf,
    occupations: PathBuf,
    states: PathBuf,
}

impl TestEnv {
    fn new(input: &str) -> Self {
        let tmp = TempDir::new().expect("create temp dir");
        let input_path = tmp.path().join("h1b_input.csv");
        fs::write(&input_path, input).expect("write input");

        Self {
            occupations: tmp.path().join("top_10_occupations.txt"),
            states: tmp.path().join("top_10_states.txt"),
            input: input_path,
            _tmp: tmp,
        }
    }

    fn cmd(&self) -> Command {
        let mut cmd = Command::cargo_bin("h1b-counting").unwrap();
        cmd.arg(&self.input).arg(&self.occupations).arg(&self.states);
        cmd
    }
}

#[test]
fn writes_both_summaries() {
    let env = TestEnv::new(INPUT);
    env.cmd().assert().success();

    assert_eq!(
        fs::read_to_string(&env.occupations).unwrap(),
        "TOP_OCCUPATIONS;NUMBER_CERTIFIED_APPLICATIONS;PERCENTAGE\n\
         SOFTWARE DEVELOPERS, APPLICATIONS;3;60.0%\n\
         ACCOUNTANTS AND AUDITORS;1;20.0%\n\
         COMPUTER SYSTEMS ANALYSTS;1;20.0%\n"
    );
    assert_eq!(
        fs::read_to_string(&env.states).unwrap(),
        "TOP_STATES;NUMBER_CERTIFIED_APPLICATIONS;PERCENTAGE\n\
         CA;3;60.0%\n\
         NY;1;20.0%\n\
         WA;1;20.0%\n"
    );
}

#[test]
fn limit_caps_rows() {
    let env = TestEnv::new(INPUT);
    env.cmd().args(["--limit", "1"]).assert().success();

    assert_eq!(
        fs::read_to_string(&env.states).unwrap(),
        "TOP_STATES;NUMBER_CERTIFIED_APPLICATIONS;PERCENTAGE\nCA;3;60.0%\n"
    );
}

#[test]
fn json_summary() {
    let env = TestEnv::new(INPUT);
    let out = env
        .cmd()
        .arg("--json")
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let summary: Value = serde_json::from_slice(&out).expect("valid json output");

    assert_eq!(summary["records_read"], 7);
    assert_eq!(summary["certified"], 5);
    assert_eq!(summary["occupation_total"], 5);
    assert_eq!(summary["columns"]["status"], 1);
    assert_eq!(summary["reports"][0]["category"], "occupation");
    assert_eq!(summary["reports"][1]["rows"], 3);
}

#[test]
fn missing_input_fails_and_names_path() {
    let env = TestEnv::new(INPUT);
    fs::remove_file(&env.input).unwrap();

    env.cmd()
        .assert()
        .code(2)
        .stderr(contains("h1b_input.csv").and(contains("cannot be opened")));
    assert!(!env.occupations.exists());
    assert!(!env.states.exists());
}

#[test]
fn unwritable_output_still_writes_the_other() {
    let env = TestEnv::new(INPUT);
    let blocked = env.input.with_file_name("missing_dir").join("top_10_occupations.txt");

    Command::cargo_bin("h1b-counting")
        .unwrap()
        .arg(&env.input)
        .arg(&blocked)
        .arg(&env.states)
        .assert()
        .code(1)
        .stderr(contains("top_10_occupations.txt").and(contains("cannot be written")));

    assert!(env.states.exists());
}

#[test]
fn header_without_known_columns_yields_empty_reports() {
    let env = TestEnv::new("ID;EMPLOYER\n1;Acme\n");
    env.cmd()
        .assert()
        .success()
        .stderr(contains("neither CASE_STATUS nor STATUS"));

    assert_eq!(
        fs::read_to_string(&env.occupations).unwrap(),
        "TOP_OCCUPATIONS;NUMBER_CERTIFIED_APPLICATIONS;PERCENTAGE\n"
    );
}

#[test]
fn missing_arguments_is_a_usage_error() {
    Command::cargo_bin("h1b-counting")
        .unwrap()
        .assert()
        .failure()
        .stderr(contains("Usage"));
}
