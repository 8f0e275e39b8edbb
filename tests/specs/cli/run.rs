// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `algoflow run` specs

use crate::prelude::*;
use std::time::{Duration, Instant};

#[test]
fn greets_by_name_from_stdin() {
    let project = Project::empty();
    let file = project.file("greet.py", "name = input(\"Name: \")\nprint(\"Hi \" + name)\n");

    let run = project.algoflow().args(&["run", file]).stdin("Bob\n").passes();
    assert!(run.stdout().starts_with("Name: Bob\nHi Bob"), "{}", run.stdout());
}

#[test]
fn answers_several_prompts_in_order() {
    let project = Project::empty();
    let file = project.file(
        "sum.py",
        "a = int(input(\"a? \"))\nb = int(input(\"b? \"))\nprint(a + b)\n",
    );

    project.algoflow().args(&["run", file]).stdin("2\n40\n").passes().stdout_eq("a? 2\nb? 40\n42\n");
}

#[test]
fn program_output_goes_to_stdout_only() {
    let project = Project::empty();
    let file = project.file("loop.py", "for i in range(3):\n    print(i, end=' ')\nprint()\n");

    project.algoflow().args(&["run", file]).passes().stdout_eq("0 1 2 \n");
}

#[test]
fn silent_program_reports_success_on_stderr() {
    let project = Project::empty();
    let file = project.file("quiet.py", "x = 1 + 1\n");

    project
        .algoflow()
        .args(&["run", file])
        .passes()
        .stdout_eq("")
        .stderr_has("Code executed successfully (no output)");
}

#[test]
fn empty_file_is_rejected() {
    let project = Project::empty();
    let file = project.file("empty.py", "  \n");

    project.algoflow().args(&["run", file]).exits(2).stderr_has("No code to run!");
}

#[test]
fn exception_keeps_earlier_output() {
    let project = Project::empty();
    let file = project.file("boom.py", "print(\"before\")\nraise ValueError(\"bad\")\nprint(\"after\")\n");

    project
        .algoflow()
        .args(&["run", file])
        .exits(1)
        .stdout_eq("before\n")
        .stdout_lacks("after")
        .stderr_has("ValueError: bad");
}

#[test]
fn closed_stdin_ends_input_with_eof_error() {
    let project = Project::empty();
    let file = project.file("ask.py", "x = input(\"? \")\nprint(x)\n");

    project.algoflow().args(&["run", file]).exits(1).stderr_has("EOFError");
}

#[test]
fn syntax_error_fails_the_run() {
    let project = Project::empty();
    let file = project.file("bad.py", "print(\n");

    project.algoflow().args(&["run", file]).exits(1).stderr_has("SyntaxError");
}

#[test]
fn missing_file_is_a_usage_error() {
    let project = Project::empty();
    project.algoflow().args(&["run", "nope.py"]).exits(1).stderr_has("cannot read nope.py");
}

#[test]
fn unanswered_prompt_times_out_with_eof_error() {
    let project = Project::empty();
    let file = project.file(
        "ask.py",
        "try:\n    x = input(\"q? \")\nexcept EOFError:\n    print(\"timed out\")\n",
    );

    let started = Instant::now();
    let run = project.run_with_idle_stdin(&["run", file], &[("ALGOFLOW_INPUT_TIMEOUT_MS", "200")]);
    assert!(started.elapsed() < Duration::from_secs(10), "took {:?}", started.elapsed());
    assert_eq!(run.code(), Some(0), "stderr: {}", run.stderr());
    run.stdout_eq("q? timed out\n");
}

#[test]
fn unanswered_prompt_without_handler_fails() {
    let project = Project::empty();
    let file = project.file("ask.py", "x = input(\"q? \")\nprint(\"got \" + x)\n");

    let run = project.run_with_idle_stdin(&["run", file], &[("ALGOFLOW_INPUT_TIMEOUT_MS", "200")]);
    assert_eq!(run.code(), Some(1), "stderr: {}", run.stderr());
    run.stdout_lacks("got").stderr_has("EOFError");
}

#[test]
fn deep_recursion_completes() {
    let project = Project::empty();
    let file = project.file(
        "deep.py",
        "def depth(n):\n    if n == 0:\n        return 0\n    return 1 + depth(n - 1)\nprint(depth(150))\n",
    );

    project.algoflow().args(&["run", file]).passes().stdout_eq("150\n");
}

#[test]
fn runaway_recursion_is_a_recursion_error() {
    let project = Project::empty();
    let file = project.file("loop.py", "def f(n):\n    return f(n + 1)\nf(0)\n");

    project
        .algoflow()
        .args(&["run", file])
        .exits(1)
        .stderr_has("RecursionError: maximum recursion depth exceeded");
}
