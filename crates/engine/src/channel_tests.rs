// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use algo_core::test_support::strategies::arb_writes;
use proptest::prelude::*;

fn kinds(channel: &OutputChannel) -> Vec<StreamKind> {
    channel.records().into_iter().map(|r| r.kind).collect()
}

#[test]
fn same_kind_writes_merge_in_call_order() {
    let channel = OutputChannel::new();
    channel.write(StreamKind::Stdout, "a");
    channel.write(StreamKind::Stdout, "b");
    channel.write(StreamKind::Stdout, "c\n");
    assert_eq!(channel.records(), vec![OutputRecord::stdout("abc\n")]);
}

#[test]
fn different_kinds_start_new_records() {
    let channel = OutputChannel::new();
    channel.write(StreamKind::Stdout, "out");
    channel.write(StreamKind::Stderr, "err");
    channel.write(StreamKind::Stdout, "more");
    assert_eq!(kinds(&channel), vec![StreamKind::Stdout, StreamKind::Stderr, StreamKind::Stdout]);
}

#[test]
fn input_records_never_merge() {
    let channel = OutputChannel::new();
    channel.write(StreamKind::Input, "a");
    channel.write(StreamKind::Input, "b");
    assert_eq!(channel.len(), 2);
    assert_eq!(channel.last().map(|r| r.content), Some("b".to_string()));
}

#[test]
fn empty_text_still_records() {
    let channel = OutputChannel::new();
    channel.write(StreamKind::Info, "");
    assert_eq!(channel.records(), vec![OutputRecord::new(StreamKind::Info, "")]);
}

#[test]
fn clear_empties_and_bumps_revision() {
    let channel = OutputChannel::new();
    channel.write(StreamKind::Stdout, "x");
    let before = channel.revision();
    channel.clear();
    assert!(channel.is_empty());
    assert_ne!(channel.revision(), before);
}

#[test]
fn clones_share_records() {
    let channel = OutputChannel::new();
    channel.clone().write(StreamKind::Stdout, "shared");
    assert_eq!(channel.len(), 1);
}

#[tokio::test]
async fn subscribers_see_every_write() {
    let channel = OutputChannel::new();
    let mut rx = channel.subscribe();
    channel.write(StreamKind::Stdout, "x");
    rx.changed().await.unwrap();
    assert_eq!(*rx.borrow_and_update(), channel.revision());
    assert!(!rx.has_changed().unwrap());
    channel.write(StreamKind::Stdout, "y");
    assert!(rx.has_changed().unwrap());
}

#[test]
fn restore_replaces_records() {
    let channel = OutputChannel::new();
    channel.write(StreamKind::Stdout, "old");
    channel.restore(vec![OutputRecord::failure("saved")]);
    assert_eq!(channel.records(), vec![OutputRecord::failure("saved")]);
}

// ---------------------------------------------------------------------------
// Cursor
// ---------------------------------------------------------------------------

#[test]
fn cursor_returns_growth_of_merged_record() {
    let channel = OutputChannel::new();
    let mut cursor = OutputCursor::new();
    channel.write(StreamKind::Stdout, "Na");
    assert_eq!(cursor.advance(&channel), vec![OutputRecord::stdout("Na")]);
    channel.write(StreamKind::Stdout, "me: ");
    channel.write(StreamKind::Input, "Ada");
    assert_eq!(
        cursor.advance(&channel),
        vec![OutputRecord::stdout("me: "), OutputRecord::new(StreamKind::Input, "Ada")]
    );
    assert!(cursor.advance(&channel).is_empty());
}

#[test]
fn cursor_restarts_after_clear() {
    let channel = OutputChannel::new();
    let mut cursor = OutputCursor::new();
    channel.write(StreamKind::Stdout, "first run\n");
    cursor.advance(&channel);
    channel.clear();
    channel.write(StreamKind::Failure, "No code to run!");
    assert_eq!(cursor.advance(&channel), vec![OutputRecord::failure("No code to run!")]);
}

#[yare::parameterized(
    shorter_record = { "NameError", "abcdefghijkl" },
    same_length = { "abc", "xyz" },
    longer_record = { "abc", "NameError" },
)]
fn cursor_sees_whole_record_after_clear(before: &str, after: &str) {
    let channel = OutputChannel::new();
    let mut cursor = OutputCursor::new();
    channel.write(StreamKind::Stdout, before);
    cursor.advance(&channel);
    channel.clear();
    channel.write(StreamKind::Failure, after);
    assert_eq!(cursor.advance(&channel), vec![OutputRecord::failure(after)]);
}

#[test]
fn cursor_restarts_after_restore() {
    let channel = OutputChannel::new();
    let mut cursor = OutputCursor::new();
    channel.write(StreamKind::Stdout, "a");
    channel.write(StreamKind::Stderr, "b");
    cursor.advance(&channel);
    channel.restore(vec![OutputRecord::stdout("x"), OutputRecord::failure("y"), OutputRecord::stdout("z")]);
    assert_eq!(cursor.advance(&channel).len(), 3);
}

proptest! {
    #[test]
    fn merged_records_preserve_text_and_alternate(writes in arb_writes(40)) {
        let channel = OutputChannel::new();
        for (kind, text) in &writes {
            channel.write(*kind, text);
        }
        let records = channel.records();

        let written: String = writes.iter().map(|(_, t)| t.as_str()).collect();
        let recorded: String = records.iter().map(|r| r.content.as_str()).collect();
        prop_assert_eq!(written, recorded);

        for pair in records.windows(2) {
            prop_assert!(pair[0].kind != pair[1].kind || !pair[0].kind.is_mergeable());
        }
        let inputs = writes.iter().filter(|(k, _)| *k == StreamKind::Input).count();
        let input_records = records.iter().filter(|r| r.kind == StreamKind::Input).count();
        prop_assert_eq!(inputs, input_records);
    }

    #[test]
    fn cursor_replays_everything_once(writes in arb_writes(40), split in 0usize..40) {
        let channel = OutputChannel::new();
        let mut cursor = OutputCursor::new();
        let mut seen = String::new();
        for (i, (kind, text)) in writes.iter().enumerate() {
            channel.write(*kind, text);
            if i == split {
                seen.extend(cursor.advance(&channel).into_iter().map(|r| r.content));
            }
        }
        seen.extend(cursor.advance(&channel).into_iter().map(|r| r.content));
        let written: String = writes.iter().map(|(_, t)| t.as_str()).collect();
        prop_assert_eq!(seen, written);
    }
}
