// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use serial_test::serial;

fn clear(names: &[&str]) {
    for name in names {
        std::env::remove_var(name);
    }
}

#[test]
#[serial]
fn state_dir_prefers_explicit_override() {
    std::env::set_var("ALGOFLOW_STATE_DIR", "/tmp/algo-explicit");
    std::env::set_var("XDG_STATE_HOME", "/tmp/xdg");
    assert_eq!(state_dir().unwrap(), PathBuf::from("/tmp/algo-explicit"));
    clear(&["ALGOFLOW_STATE_DIR", "XDG_STATE_HOME"]);
}

#[test]
#[serial]
fn state_dir_falls_back_to_xdg_then_home() {
    clear(&["ALGOFLOW_STATE_DIR"]);
    std::env::set_var("XDG_STATE_HOME", "/tmp/xdg");
    assert_eq!(state_dir().unwrap(), PathBuf::from("/tmp/xdg/algoflow"));

    clear(&["XDG_STATE_HOME"]);
    let home = std::env::var("HOME").unwrap_or_default();
    if !home.is_empty() {
        assert_eq!(state_dir().unwrap(), PathBuf::from(home).join(".local/state/algoflow"));
    }
}

#[test]
#[serial]
fn log_filter_order() {
    clear(&["ALGOFLOW_LOG", "RUST_LOG"]);
    assert_eq!(log_filter(), "warn");
    std::env::set_var("RUST_LOG", "info");
    assert_eq!(log_filter(), "info");
    std::env::set_var("ALGOFLOW_LOG", "algo_engine=debug");
    assert_eq!(log_filter(), "algo_engine=debug");
    clear(&["ALGOFLOW_LOG", "RUST_LOG"]);
}

#[test]
#[serial]
fn model_and_user_defaults() {
    clear(&["ALGOFLOW_MODEL", "ALGOFLOW_USER_ID"]);
    assert_eq!(model(), "gemini-2.5-flash-lite");
    assert_eq!(user_id(), "default_user");

    std::env::set_var("ALGOFLOW_MODEL", "gemini-pro");
    std::env::set_var("ALGOFLOW_USER_ID", "ada");
    assert_eq!(model(), "gemini-pro");
    assert_eq!(user_id(), "ada");
    clear(&["ALGOFLOW_MODEL", "ALGOFLOW_USER_ID"]);
}

#[test]
#[serial]
fn empty_keys_count_as_unset() {
    std::env::set_var("GEMINI_API_KEY", "");
    assert_eq!(gemini_api_key(), None);
    std::env::set_var("GEMINI_API_KEY", "k");
    assert_eq!(gemini_api_key().as_deref(), Some("k"));
    clear(&["GEMINI_API_KEY"]);
}

#[test]
#[serial]
fn input_timeout_parses_millis() {
    clear(&["ALGOFLOW_INPUT_TIMEOUT_MS"]);
    assert_eq!(input_timeout(), None);
    std::env::set_var("ALGOFLOW_INPUT_TIMEOUT_MS", "1500");
    assert_eq!(input_timeout(), Some(Duration::from_millis(1500)));
    std::env::set_var("ALGOFLOW_INPUT_TIMEOUT_MS", "soon");
    assert_eq!(input_timeout(), None);
    clear(&["ALGOFLOW_INPUT_TIMEOUT_MS"]);
}
