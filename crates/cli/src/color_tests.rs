// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use serial_test::serial;

fn force_color() {
    std::env::set_var("COLOR", "1");
    std::env::remove_var("NO_COLOR");
}

fn disable_color() {
    std::env::set_var("NO_COLOR", "1");
    std::env::remove_var("COLOR");
}

#[test]
#[serial]
fn styles_returns_styled_when_color_forced() {
    force_color();
    let debug = format!("{:?}", styles());
    assert_ne!(debug, format!("{:?}", Styles::plain()));
}

#[test]
#[serial]
fn styles_returns_plain_when_no_color() {
    disable_color();
    let debug = format!("{:?}", styles());
    assert_eq!(debug, format!("{:?}", Styles::plain()));
}

#[test]
#[serial]
fn palette_functions_emit_their_code() {
    force_color();
    let cases: [(fn(&str) -> String, u8); 4] = [
        (header, codes::HEADER),
        (literal, codes::LITERAL),
        (context, codes::CONTEXT),
        (muted, codes::MUTED),
    ];
    for (paint_fn, code) in cases {
        assert_eq!(paint_fn("foo"), format!("\x1b[38;5;{code}mfoo\x1b[0m"));
    }
}

#[test]
#[serial]
fn no_color_wins_over_color() {
    std::env::set_var("COLOR", "1");
    std::env::set_var("NO_COLOR", "1");
    assert!(!should_colorize());
    assert_eq!(paint(codes::FAILURE, "boom"), "boom");
    std::env::remove_var("NO_COLOR");
}
