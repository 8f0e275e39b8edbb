// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Storage keys.

/// Editor document (durable).
pub const CODE: &str = "algoflow_code";
/// Last generated flowchart (durable).
pub const FLOWCHART: &str = "algoflow_flowchart_data";
/// Source the cached flowchart was generated from (durable).
pub const LAST_VISUALIZED_CODE: &str = "algoflow_last_visualized_code";
/// Chat transcript (durable).
pub const CHAT_HISTORY: &str = "algoflow_chat_history";
/// Output panel records (ephemeral).
pub const OUTPUT: &str = "algoflow_output";
