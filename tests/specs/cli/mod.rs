// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

mod chat;
mod clear;
mod help;
mod run;
mod visualize;
