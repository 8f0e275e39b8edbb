// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! End-to-end programs through the supervisor.

use super::*;

#[tokio::test]
async fn greets_by_name() {
    let sup = supervisor();
    let outcome = run_answering(&sup, "name = input(\"Name: \")\nprint(\"Hi \" + name)", &["Bob"]).await;

    assert_eq!(outcome, RunOutcome::Completed);
    let records = sup.output().records();
    assert_eq!(records.len(), 3, "{records:?}");
    assert_eq!(records[0], OutputRecord::stdout("Name: "));
    assert_eq!(records[1], OutputRecord::new(StreamKind::Input, "Bob"));
    assert_eq!(records[2].kind, StreamKind::Stdout);
    assert!(records[2].content.starts_with("Hi Bob\n"), "{:?}", records[2].content);
}

#[tokio::test]
async fn greets_from_one_line_program() {
    let sup = supervisor();
    let source = "name = input(\"Enter name:\"); print(f\"Hi {name}\")";
    let outcome = run_answering(&sup, source, &["Bob"]).await;

    assert_eq!(outcome, RunOutcome::Completed);
    let records = sup.output().records();
    assert_eq!(records.len(), 3, "{records:?}");
    assert_eq!(records[0], OutputRecord::stdout("Enter name:"));
    assert_eq!(records[1], OutputRecord::new(StreamKind::Input, "Bob"));
    assert_eq!(records[2].kind, StreamKind::Stdout);
    assert!(records[2].content.starts_with("Hi Bob\n"), "{:?}", records[2].content);
}

#[tokio::test]
async fn input_value_keeps_trailing_newline() {
    let sup = supervisor();
    run_answering(&sup, "x = input(\"q\")\nprint(x == 'v\\n')", &["v"]).await;
    assert_eq!(stdout_text(&sup), "qTrue\n");
}

#[tokio::test]
async fn reads_until_sentinel() {
    let source = "total = 0\nwhile True:\n    line = input('> ').strip()\n    if line == 'q':\n        break\n    total += int(line)\nprint('total', total)";
    let sup = supervisor();
    let outcome = run_answering(&sup, source, &["2", "3", "q"]).await;
    assert_eq!(outcome, RunOutcome::Completed);
    assert_eq!(stdout_text(&sup), "> > > total 5\n");
    let inputs: Vec<String> = sup
        .output()
        .records()
        .into_iter()
        .filter(|r| r.kind == StreamKind::Input)
        .map(|r| r.content)
        .collect();
    assert_eq!(inputs, vec!["2", "3", "q"]);
}

#[tokio::test]
async fn input_inside_async_helper() {
    let source = "async def ask(p):\n    return input(p)\nname = await ask('who? ')\nprint(name.strip().upper())";
    let sup = supervisor();
    assert_eq!(run_answering(&sup, source, &["ann"]).await, RunOutcome::Completed);
    assert_eq!(stdout_text(&sup), "who? ANN\n");
}

#[tokio::test]
async fn input_inside_plain_function_is_a_syntax_error() {
    let sup = supervisor();
    let outcome = run_answering(&sup, "def ask():\n    return input()\nask()", &[]).await;
    let RunOutcome::Failed(message) = outcome else {
        panic!("expected failure, got {outcome:?}");
    };
    assert!(message.starts_with("SyntaxError"), "{message}");
}

#[tokio::test]
async fn empty_source_is_refused() {
    let sup = supervisor();
    let mut state = sup.state().subscribe();
    let outcome = sup.run("  \n\t").await;

    assert_eq!(outcome, RunOutcome::Rejected(RejectReason::EmptySource));
    assert_eq!(sup.output().records(), vec![OutputRecord::failure(EMPTY_SOURCE_MESSAGE)]);
    assert!(!state.has_changed().unwrap());
    assert_eq!(sup.phase(), RunPhase::Idle);
}

#[tokio::test]
async fn exception_mid_run_keeps_earlier_output() {
    let sup = supervisor();
    let outcome = sup.run("print(\"before\")\nraise ValueError(\"bad\")\nprint(\"after\")").await;

    assert_eq!(outcome, RunOutcome::Failed("ValueError: bad".to_string()));
    assert_eq!(
        sup.output().records(),
        vec![OutputRecord::stdout("before\n"), OutputRecord::failure("ValueError: bad")]
    );
    assert_eq!(sup.phase(), RunPhase::Failed);
}

#[tokio::test]
async fn silent_program_reports_success() {
    let sup = supervisor();
    assert_eq!(sup.run("x = 1 + 1").await, RunOutcome::Completed);
    assert_eq!(sup.output().records(), vec![OutputRecord::success(NO_OUTPUT_MESSAGE)]);
    assert_eq!(sup.phase(), RunPhase::Completed);
}

#[tokio::test]
async fn stderr_gets_its_own_record() {
    let sup = supervisor();
    sup.run("import sys\nprint('a')\nprint('oops', file=sys.stderr)\nprint('b')").await;
    assert_eq!(
        sup.output().records(),
        vec![
            OutputRecord::stdout("a\n"),
            OutputRecord::new(StreamKind::Stderr, "oops\n"),
            OutputRecord::stdout("b\n"),
        ]
    );
}

#[tokio::test]
async fn partial_lines_merge() {
    let sup = supervisor();
    sup.run("for c in 'abc':\n    print(c, end='')\nprint()").await;
    assert_eq!(sup.output().records(), vec![OutputRecord::stdout("abc\n")]);
}

#[tokio::test]
async fn syntax_error_is_reported_as_failure() {
    let sup = supervisor();
    let outcome = sup.run("print(").await;
    assert!(matches!(&outcome, RunOutcome::Failed(m) if m.starts_with("SyntaxError")), "{outcome:?}");
    assert_eq!(sup.output().last().map(|r| r.kind), Some(StreamKind::Failure));
}

#[tokio::test]
async fn previous_output_is_cleared_on_new_run() {
    let sup = supervisor();
    sup.run("print('one')").await;
    sup.run("print('two')").await;
    assert_eq!(sup.output().records(), vec![OutputRecord::stdout("two\n")]);
}

/// Runs on a thread sized like the CLI's runtime thread.
fn on_runtime_thread<T: Send + 'static>(f: impl FnOnce() -> T + Send + 'static) -> T {
    std::thread::Builder::new()
        .stack_size(algo_script::RUNTIME_STACK_SIZE)
        .spawn(f)
        .unwrap()
        .join()
        .unwrap()
}

#[test]
fn runaway_recursion_fails_with_recursion_error() {
    let (outcome, records) = on_runtime_thread(|| {
        let runtime = tokio::runtime::Builder::new_current_thread().enable_all().build().unwrap();
        runtime.block_on(async {
            let sup = supervisor();
            let outcome = sup.run("def f(n):\n    return f(n + 1)\nf(0)").await;
            (outcome, sup.output().records())
        })
    });

    let expected = "RecursionError: maximum recursion depth exceeded";
    assert_eq!(outcome, RunOutcome::Failed(expected.to_string()));
    assert_eq!(records, vec![OutputRecord::failure(expected)]);
}

#[test]
fn recursion_below_the_default_limit_completes() {
    let output = on_runtime_thread(|| {
        let runtime = tokio::runtime::Builder::new_current_thread().enable_all().build().unwrap();
        runtime.block_on(async {
            let sup = supervisor();
            let source = "def depth(n):\n    if n == 0:\n        return 0\n    return 1 + depth(n - 1)\nprint(depth(150))";
            assert_eq!(sup.run(source).await, RunOutcome::Completed);
            stdout_text(&sup)
        })
    });
    assert_eq!(output, "150\n");
}
