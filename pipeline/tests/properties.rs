//! Property-style end-to-end checks from spec §8: backpressure, ordering
//! under a transform, and shutdown-banner idempotence.

use assert_cmd::Command;

fn pipeline() -> Command {
    Command::cargo_bin("pipeline").unwrap()
}

fn stdin_lines<'a>(lines: impl Iterator<Item = &'a str>) -> String {
    let mut stdin = String::new();
    for line in lines {
        stdin.push_str(line);
        stdin.push('\n');
    }
    stdin.push_str("<END>\n");
    stdin
}

#[test]
fn backpressure_preserves_order_with_capacity_one() {
    let n = 2000;
    let inputs: Vec<String> = (0..n).map(|i| format!("line{i}")).collect();
    let stdin = stdin_lines(inputs.iter().map(String::as_str));

    let assert = pipeline()
        .args(["1", "printer"])
        .write_stdin(stdin)
        .assert()
        .success();

    let output = assert.get_output();
    assert!(output.stderr.is_empty(), "stderr should be empty under backpressure");

    let stdout = String::from_utf8(output.stdout.clone()).unwrap();
    let mut lines = stdout.lines();
    for expected in &inputs {
        assert_eq!(lines.next(), Some(expected.as_str()));
    }
    assert_eq!(lines.next(), Some("Pipeline shutdown complete"));
    assert_eq!(lines.next(), None);
}

#[test]
fn ordering_is_preserved_under_a_transform() {
    let n = 1000;
    let inputs: Vec<String> = (0..n).map(|i| format!("item{i}")).collect();
    let stdin = stdin_lines(inputs.iter().map(String::as_str));

    let assert = pipeline()
        .args(["1", "uppercaser", "logger"])
        .write_stdin(stdin)
        .assert()
        .success();

    let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    let mut lines = stdout.lines();
    for expected in &inputs {
        assert_eq!(lines.next(), Some(format!("[logger] {}", expected.to_uppercase())).as_deref());
    }
    assert_eq!(lines.next(), Some("Pipeline shutdown complete"));
}

#[test]
fn shutdown_banner_appears_exactly_once() {
    let assert = pipeline()
        .args(["10", "printer"])
        .write_stdin("only-line\n<END>\n")
        .assert()
        .success();

    let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    assert_eq!(stdout.matches("Pipeline shutdown complete").count(), 1);
}

#[test]
fn two_independent_runs_do_not_interfere() {
    let first = pipeline()
        .args(["4", "uppercaser", "logger"])
        .write_stdin("alpha\n<END>\n")
        .assert()
        .success();
    let second = pipeline()
        .args(["4", "rotator", "logger"])
        .write_stdin("beta\n<END>\n")
        .assert()
        .success();

    let first_stdout = String::from_utf8(first.get_output().stdout.clone()).unwrap();
    let second_stdout = String::from_utf8(second.get_output().stdout.clone()).unwrap();
    assert_eq!(first_stdout, "[logger] ALPHA\nPipeline shutdown complete\n");
    assert_eq!(second_stdout, "[logger] abet\nPipeline shutdown complete\n");
}
