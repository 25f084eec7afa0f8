//! End-to-end tests for the `vue-class-migrate` binary.

use pretty_assertions::assert_eq;
use serde::Deserialize;
use std::fs;
use std::io::Write;
use std::process::{Command, Output, Stdio};

const COUNTER: &str = r#"
import { Component, Vue } from 'vue-property-decorator'

@Component
export default class Counter extends Vue {
    count = 0

    increment() {
        this.count++
    }
}
"#;

const COUNTER_SETUP: &str = "const count = ref(0);\nfunction increment() {\n    count.value++;\n}\n";

/// The JSON printed with `--output json`.
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
enum JsonOutcome {
    Success { code: String },
    Error { message: String },
}

fn binary() -> Command {
    Command::new(env!("CARGO_BIN_EXE_vue-class-migrate"))
}

fn run_with_stdin(args: &[&str], stdin: &str) -> Output {
    let mut child = binary()
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("failed to spawn binary");
    child
        .stdin
        .take()
        .expect("stdin is piped")
        .write_all(stdin.as_bytes())
        .expect("failed to write stdin");
    child.wait_with_output().expect("failed to wait for binary")
}

#[test]
fn test_transforms_file() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("Counter.ts");
    fs::write(&input, COUNTER).unwrap();

    let output = binary().arg(&input).output().unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert_eq!(stdout, COUNTER_SETUP);
}

#[test]
fn test_transforms_stdin() {
    let output = run_with_stdin(&["-"], COUNTER);
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert_eq!(stdout, COUNTER_SETUP);
}

#[test]
fn test_writes_out_file() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("setup.ts");

    let output = run_with_stdin(&["--out", out.to_str().unwrap()], COUNTER);
    assert!(output.status.success());
    assert!(output.stdout.is_empty());
    let written = fs::read_to_string(&out).unwrap();
    assert_eq!(written, COUNTER_SETUP);
}

#[test]
fn test_error_exit_code() {
    let output = run_with_stdin(&[], "class A { @Prop(String, {}) a!: string }");
    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("Error: Decorator can only contain one argument"));
}

#[test]
fn test_json_output() {
    let output = run_with_stdin(&["--output", "json"], COUNTER);
    assert!(output.status.success());
    let outcome: JsonOutcome = serde_json::from_slice(&output.stdout).unwrap();
    match outcome {
        JsonOutcome::Success { code } => assert!(code.contains("const count = ref(0);")),
        JsonOutcome::Error { message } => panic!("unexpected error: {message}"),
    }

    let output = run_with_stdin(&["--output", "json"], "class {");
    assert_eq!(output.status.code(), Some(1));
    let outcome: JsonOutcome = serde_json::from_slice(&output.stdout).unwrap();
    assert!(matches!(outcome, JsonOutcome::Error { .. }));
}

#[test]
fn test_options_file_and_flags() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("options.json");
    fs::write(&config, r#"{ "inferTypes": true }"#).unwrap();
    let source = "class A { n: number = 1; userStore = useUserStore() }";

    let output = run_with_stdin(&["--config", config.to_str().unwrap()], source);
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("const n = ref(1);"));
    assert!(stdout.contains("const userStore = useUserStore();"));

    let output = run_with_stdin(
        &["--config", config.to_str().unwrap(), "--no-store-binding"],
        source,
    );
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("const userStore = ref(useUserStore());"));
}

#[test]
fn test_missing_input_file() {
    let output = binary().arg("/nonexistent/Component.ts").output().unwrap();
    assert!(!output.status.success());
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("failed to read"));
}
