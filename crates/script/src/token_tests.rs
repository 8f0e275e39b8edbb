// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[yare::parameterized(
    if_kw = { "if", Some(Keyword::If) },
    await_kw = { "await", Some(Keyword::Await) },
    none_kw = { "None", Some(Keyword::None) },
    lowercase_none = { "none", None },
    plain_name = { "input", None },
)]
fn keyword_lookup(word: &str, expected: Option<Keyword>) {
    assert_eq!(Keyword::from_word(word), expected);
}

#[test]
fn keyword_round_trips_through_as_str() {
    for word in ["False", "async", "elif", "finally", "global", "while"] {
        let kw = Keyword::from_word(word).unwrap();
        assert_eq!(kw.as_str(), word);
    }
}

#[test]
fn token_kind_display() {
    assert_eq!(TokenKind::Name("x".into()).to_string(), "name 'x'");
    assert_eq!(TokenKind::AugAssign(AugOp::FloorDiv).to_string(), "'//='");
    assert_eq!(TokenKind::LBrace.to_string(), "'{'");
    assert_eq!(TokenKind::Keyword(Keyword::Def).to_string(), "keyword 'def'");
}
