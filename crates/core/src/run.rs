// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Run lifecycle state observed by front ends

use serde::{Deserialize, Serialize};

/// The two flags a front end renders: spinner and input box.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunState {
    pub is_running: bool,
    pub is_waiting_for_input: bool,
}

impl RunState {
    pub fn phase(&self) -> RunPhase {
        match (self.is_running, self.is_waiting_for_input) {
            (true, true) => RunPhase::WaitingForInput,
            (true, false) => RunPhase::Running,
            (false, _) => RunPhase::Idle,
        }
    }
}

/// Lifecycle of one execution attempt.
///
/// `Idle → Running → (WaitingForInput ⇄ Running)* → Completed | Failed`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunPhase {
    Idle,
    Running,
    WaitingForInput,
    Completed,
    Failed,
}

crate::simple_display! {
    RunPhase {
        Idle => "idle",
        Running => "running",
        WaitingForInput => "waiting_for_input",
        Completed => "completed",
        Failed => "failed",
    }
}

impl RunPhase {
    pub fn is_active(self) -> bool {
        matches!(self, RunPhase::Running | RunPhase::WaitingForInput)
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, RunPhase::Completed | RunPhase::Failed)
    }

    /// Whether the lifecycle allows moving from `self` to `next`.
    pub fn can_transition_to(self, next: RunPhase) -> bool {
        use RunPhase::*;
        matches!(
            (self, next),
            (Idle | Completed | Failed, Running)
                | (Running, WaitingForInput | Completed | Failed)
                | (WaitingForInput, Running | Completed | Failed)
                | (Completed | Failed, Idle)
        )
    }
}

#[cfg(test)]
#[path = "run_tests.rs"]
mod tests;
