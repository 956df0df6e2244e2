//! End-to-end scenarios reproducing spec §8's literal input/output
//! table, driven against the built binary.

use assert_cmd::Command;
use predicates::prelude::*;

fn pipeline() -> Command {
    Command::cargo_bin("pipeline").unwrap()
}

#[test]
fn s1_uppercase_rotate_log_flip() {
    pipeline()
        .args(["20", "uppercaser", "rotator", "logger", "flipper"])
        .write_stdin("hello\n<END>\n")
        .assert()
        .success()
        .stdout("[logger] OHELL\nPipeline shutdown complete\n");
}

#[test]
fn s2_sentinel_only() {
    pipeline()
        .args(["10", "logger"])
        .write_stdin("<END>\n")
        .assert()
        .success()
        .stdout("Pipeline shutdown complete\n");
}

#[test]
fn s3_three_lines_through_logger() {
    pipeline()
        .args(["10", "logger"])
        .write_stdin("a\nb\nc\n<END>\n")
        .assert()
        .success()
        .stdout("[logger] a\n[logger] b\n[logger] c\nPipeline shutdown complete\n");
}

#[test]
fn s4_uppercase_expand_rotate_log() {
    pipeline()
        .args(["10", "uppercaser", "expander", "rotator", "logger"])
        .write_stdin("Abc\n<END>\n")
        .assert()
        .success()
        .stdout("[logger] CA B \nPipeline shutdown complete\n");
}

#[test]
fn s5_trailing_space_sentinel_does_not_terminate() {
    pipeline()
        .args(["1", "logger"])
        .write_stdin("<END> \n<END>\n")
        .assert()
        .success()
        .stdout("[logger] <END> \nPipeline shutdown complete\n");
}

#[test]
fn s6_input_after_sentinel_is_ignored() {
    pipeline()
        .args(["1", "logger"])
        .write_stdin("<END>\nSHOULD_NOT_APPEAR\n")
        .assert()
        .success()
        .stdout("Pipeline shutdown complete\n")
        .stdout(predicate::str::contains("SHOULD_NOT_APPEAR").not());
}

#[test]
fn unresolvable_stage_exits_one_with_usage_on_stdout() {
    pipeline()
        .args(["10", "not-a-real-stage"])
        .write_stdin("<END>\n")
        .assert()
        .code(1)
        .stdout(predicate::str::contains("Usage").or(predicate::str::contains("usage")));
}

#[test]
fn zero_queue_size_is_an_arg_error() {
    pipeline()
        .args(["0", "logger"])
        .write_stdin("<END>\n")
        .assert()
        .code(1)
        .stdout(predicate::str::contains("Usage").or(predicate::str::contains("usage")));
}

#[test]
fn missing_stage_argument_is_rejected() {
    pipeline().args(["10"]).assert().code(1);
}
