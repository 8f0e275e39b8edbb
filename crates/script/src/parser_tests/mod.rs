// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Parser tests split into logical modules.

#[macro_use]
mod macros;

mod errors;
mod expressions;
mod fstrings;
mod statements;
