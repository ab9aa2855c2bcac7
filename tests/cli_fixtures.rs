use std::process::{Command, Output};

use serde_json::Value;
use stacktrace_fixture::catalog;

const PANIC_EXIT_CODE: i32 = 101;
const FIXTURE_PREFIX: &str = "stacktrace_fixture::failure_paths::";
const DISPATCH_FRAME: &str = "stacktrace_fixture::catalog::Scenario::trigger";

fn cli() -> Command {
    let mut command = Command::new(env!("CARGO_BIN_EXE_stacktrace_fixture"));
    command
        .env_remove("RUST_BACKTRACE")
        .env_remove("STACKTRACE_FIXTURE_BACKTRACE")
        .env_remove("STACKTRACE_FIXTURE_LOG");
    command
}

fn run(args: &[&str]) -> Output {
    cli()
        .args(args)
        .output()
        .expect("failed to run stacktrace_fixture")
}

fn banner(token: &str) -> String {
    format!(
        "Rust Stack Trace Test Script\n{}\nRunning test: {token}\n\n",
        "=".repeat(50)
    )
}

fn stdout_of(output: &Output) -> String {
    String::from_utf8(output.stdout.clone()).expect("stdout UTF-8")
}

fn stderr_of(output: &Output) -> String {
    String::from_utf8(output.stderr.clone()).expect("stderr UTF-8")
}

fn position(haystack: &str, needle: &str) -> usize {
    haystack
        .find(needle)
        .unwrap_or_else(|| panic!("expected {needle:?} in report:\n{haystack}"))
}

/// Drop the thread id newer toolchains print after the thread name.
fn strip_thread_ids(report: &str) -> String {
    report
        .lines()
        .map(|line| match (line.find("' ("), line.find(") panicked at ")) {
            (Some(open), Some(close)) if line.starts_with("thread '") && open < close => {
                format!("{}'{}", &line[..open], &line[close + 1..])
            }
            _ => line.to_string(),
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Frame names of a short backtrace, innermost first.
fn backtrace_frames(report: &str) -> Vec<&str> {
    report
        .lines()
        .filter_map(|line| {
            let (index, name) = line.trim().split_once(": ")?;
            index.parse::<usize>().ok()?;
            Some(name.trim())
        })
        .collect()
}

/// Frames from the first fixture frame up to the dispatch point, outermost first.
fn fixture_chain<'r>(report: &'r str, token: &str) -> Vec<&'r str> {
    let frames = backtrace_frames(report);
    let dispatch = frames
        .iter()
        .position(|name| *name == DISPATCH_FRAME)
        .unwrap_or_else(|| panic!("no dispatch frame for {token}:\n{report}"));
    let first = frames[..dispatch]
        .iter()
        .position(|name| name.starts_with(FIXTURE_PREFIX))
        .unwrap_or(dispatch);
    frames[first..dispatch].iter().rev().copied().collect()
}

#[test]
fn default_selector_runs_value_scenario() {
    let output = run(&[]);
    assert_eq!(output.status.code(), Some(PANIC_EXIT_CODE));
    assert_eq!(stdout_of(&output), banner("value"));

    let stderr = stderr_of(&output);
    assert!(
        stderr.contains("panicked at src/failure_paths/value_domain.rs:"),
        "expected panic location, got {stderr}"
    );
    assert!(stderr.contains("Test error from inner function"));
}

#[test]
fn backtrace_fixture_chain_matches_catalog() {
    for scenario in catalog().iter() {
        let output = run(&[scenario.token]);
        assert_eq!(output.status.code(), Some(PANIC_EXIT_CODE));
        let stderr = stderr_of(&output);
        assert!(stderr.contains("stack backtrace:"), "got {stderr}");

        let chain = fixture_chain(&stderr, scenario.token);
        assert!(
            chain.iter().all(|name| name.starts_with(FIXTURE_PREFIX)),
            "non-fixture frame beneath dispatch for {}: {chain:?}",
            scenario.token
        );
        let names: Vec<&str> = chain
            .iter()
            .map(|name| name.rsplit("::").next().unwrap_or_default())
            .collect();
        assert_eq!(names, scenario.frames, "chain for {}", scenario.token);
    }
}

#[test]
fn value_chain_is_outer_middle_inner() {
    let output = run(&["value"]);
    let stderr = stderr_of(&output);
    assert_eq!(
        fixture_chain(&stderr, "value"),
        vec![
            "stacktrace_fixture::failure_paths::value_domain::outer",
            "stacktrace_fixture::failure_paths::value_domain::middle",
            "stacktrace_fixture::failure_paths::value_domain::inner",
        ]
    );
    assert!(stderr.contains("failure_paths/value_domain.rs:"));
}

#[test]
fn type_selector_reports_type_mismatch() {
    let output = run(&["type"]);
    assert_eq!(output.status.code(), Some(PANIC_EXIT_CODE));
    assert_eq!(stdout_of(&output), banner("type"));

    let stderr = stderr_of(&output);
    assert!(stderr.contains("panicked at src/failure_paths/type_mismatch.rs:"));
    assert!(stderr.contains("cannot subscript JSON null with key \"key\""));
    position(&stderr, "type_mismatch::subscript_null");
}

#[test]
fn index_selector_reports_out_of_range() {
    let output = run(&["index"]);
    assert_eq!(output.status.code(), Some(PANIC_EXIT_CODE));
    assert_eq!(stdout_of(&output), banner("index"));

    let stderr = stderr_of(&output);
    assert!(
        stderr.contains("index out of bounds: the len is 3 but the index is 10"),
        "got {stderr}"
    );
    position(&stderr, "out_of_range::index_past_end");
}

#[test]
fn attr_selector_reports_missing_capability() {
    let output = run(&["attr"]);
    assert_eq!(output.status.code(), Some(PANIC_EXIT_CODE));
    assert_eq!(stdout_of(&output), banner("attr"));

    let stderr = stderr_of(&output);
    assert!(stderr.contains("panicked at src/failure_paths/missing_capability.rs:"));
    assert!(stderr.contains("empty reference has no method `some_method`"));
    position(&stderr, "missing_capability::call_on_empty");
}

#[test]
fn unknown_selector_exits_cleanly() {
    let output = run(&["nonsense"]);
    assert_eq!(output.status.code(), Some(1));

    let expected = format!(
        "{}Unknown test type: nonsense\nAvailable types: value, type, index, attr\n",
        banner("nonsense")
    );
    assert_eq!(stdout_of(&output), expected);
    assert!(
        !stderr_of(&output).contains("panicked"),
        "unknown selector must not panic"
    );
}

#[test]
fn repeated_runs_are_identical() {
    let first = run(&["type", "--backtrace", "off"]);
    let second = run(&["type", "--backtrace", "off"]);
    assert_eq!(first.stdout, second.stdout);
    assert_eq!(
        strip_thread_ids(&stderr_of(&first)),
        strip_thread_ids(&stderr_of(&second))
    );
    assert_eq!(first.status.code(), second.status.code());
}

#[test]
fn thread_ids_are_stripped_from_panic_header() {
    let newer = "thread 'main' (4294) panicked at src/failure_paths/type_mismatch.rs:15:9:";
    let older = "thread 'main' panicked at src/failure_paths/type_mismatch.rs:15:9:";
    assert_eq!(strip_thread_ids(newer), older);
    assert_eq!(strip_thread_ids(older), older);
}

#[test]
fn invalid_env_override_is_warned() {
    let output = cli()
        .arg("nonsense")
        .env("STACKTRACE_FIXTURE_BACKTRACE", "sideways")
        .output()
        .expect("failed to run stacktrace_fixture");
    assert_eq!(output.status.code(), Some(1));
    let stderr = stderr_of(&output);
    assert!(
        stderr.contains("Ignoring STACKTRACE_FIXTURE_BACKTRACE"),
        "expected config warning, got {stderr}"
    );
    assert!(stderr.contains("sideways"));
}

#[test]
fn piped_stderr_has_no_colour_codes() {
    let output = run(&["nonsense"]);
    let stderr = stderr_of(&output);
    assert!(stderr.contains("Dispatch error"), "got {stderr}");
    assert!(!stderr.contains('\u{1b}'), "ANSI escapes in {stderr:?}");
}

#[test]
fn backtrace_off_leaves_default_note() {
    let output = run(&["attr", "--backtrace", "off"]);
    let stderr = stderr_of(&output);
    assert!(!stderr.contains("stack backtrace:"), "got {stderr}");
    assert!(stderr.contains("RUST_BACKTRACE=1"));
}

#[test]
fn existing_rust_backtrace_is_respected() {
    let output = cli()
        .arg("index")
        .env("RUST_BACKTRACE", "0")
        .output()
        .expect("failed to run stacktrace_fixture");
    assert_eq!(output.status.code(), Some(PANIC_EXIT_CODE));
    assert!(!stderr_of(&output).contains("stack backtrace:"));
}

#[test]
fn list_prints_catalog() {
    let output = run(&["--list"]);
    assert!(output.status.success());
    let stdout = stdout_of(&output);
    let tokens: Vec<&str> = stdout
        .lines()
        .map(|line| line.split('\t').next().unwrap_or_default())
        .collect();
    assert_eq!(tokens, vec!["value", "type", "index", "attr"]);
    assert!(stdout.contains("value\tvalue_domain\tdepth=3\t"));
}

#[test]
fn list_json_describes_scenarios() {
    let output = run(&["--list", "--json"]);
    assert!(output.status.success());
    let json: Value = serde_json::from_str(stdout_of(&output).trim()).expect("catalog JSON");
    let entries = json.as_array().expect("array payload");
    assert_eq!(entries.len(), 4);
    assert_eq!(entries[1]["token"], "type");
    assert_eq!(entries[1]["kind"], "type_mismatch");
    assert_eq!(entries[1]["depth"], 1);
    assert_eq!(entries[2]["signature"], "index out of bounds");
}

#[test]
fn missing_config_file_is_reported() {
    let path = std::env::temp_dir().join(format!(
        "stacktrace-fixture-absent-{}.json",
        std::process::id()
    ));
    let output = run(&["--config", path.to_str().unwrap(), "value"]);
    assert_eq!(output.status.code(), Some(2));
    assert!(stderr_of(&output).contains("reading config file"));
    assert!(stdout_of(&output).is_empty());
}

#[test]
fn zero_separator_width_is_rejected() {
    let path = std::env::temp_dir().join(format!(
        "stacktrace-fixture-zero-width-{}.json",
        std::process::id()
    ));
    std::fs::write(&path, r#"{"separator_width": 0}"#).expect("write config");

    let output = run(&["--config", path.to_str().unwrap(), "value"]);
    let _ = std::fs::remove_file(&path);

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr_of(&output).contains("separator_width must be at least 1"));
    assert!(stdout_of(&output).is_empty());
}

#[test]
fn config_file_load_is_logged_at_info() {
    let path = std::env::temp_dir().join(format!(
        "stacktrace-fixture-info-{}.json",
        std::process::id()
    ));
    std::fs::write(&path, r#"{"title": "Fixture"}"#).expect("write config");

    let output = run(&[
        "--config",
        path.to_str().unwrap(),
        "--log-level",
        "info",
        "nonsense",
    ]);
    let _ = std::fs::remove_file(&path);

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr_of(&output).contains("Loaded configuration"));
}

#[test]
fn config_file_changes_banner_and_default() {
    let path = std::env::temp_dir().join(format!(
        "stacktrace-fixture-config-{}.json",
        std::process::id()
    ));
    std::fs::write(
        &path,
        r#"{"title": "Fixture", "separator_width": 5, "default_scenario": "attr"}"#,
    )
    .expect("write config");

    let output = run(&["--config", path.to_str().unwrap()]);
    let _ = std::fs::remove_file(&path);

    assert_eq!(output.status.code(), Some(PANIC_EXIT_CODE));
    assert_eq!(stdout_of(&output), "Fixture\n=====\nRunning test: attr\n\n");
    assert!(stderr_of(&output).contains("empty reference has no method"));
}
