// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[yare::parameterized(
    idle = { false, false, RunPhase::Idle },
    running = { true, false, RunPhase::Running },
    waiting = { true, true, RunPhase::WaitingForInput },
    stale_waiting_flag = { false, true, RunPhase::Idle },
)]
fn phase_from_flags(is_running: bool, is_waiting_for_input: bool, phase: RunPhase) {
    assert_eq!(RunState { is_running, is_waiting_for_input }.phase(), phase);
}

#[test]
fn default_state_is_idle() {
    assert_eq!(RunState::default().phase(), RunPhase::Idle);
}

#[yare::parameterized(
    start = { RunPhase::Idle, RunPhase::Running, true },
    suspend = { RunPhase::Running, RunPhase::WaitingForInput, true },
    resume = { RunPhase::WaitingForInput, RunPhase::Running, true },
    finish = { RunPhase::Running, RunPhase::Completed, true },
    fail_while_waiting = { RunPhase::WaitingForInput, RunPhase::Failed, true },
    rerun = { RunPhase::Completed, RunPhase::Running, true },
    idle_cannot_wait = { RunPhase::Idle, RunPhase::WaitingForInput, false },
    idle_cannot_complete = { RunPhase::Idle, RunPhase::Completed, false },
    terminal_cannot_wait = { RunPhase::Failed, RunPhase::WaitingForInput, false },
)]
fn transitions(from: RunPhase, to: RunPhase, allowed: bool) {
    assert_eq!(from.can_transition_to(to), allowed);
}

#[test]
fn active_and_terminal_are_disjoint() {
    for phase in [
        RunPhase::Idle,
        RunPhase::Running,
        RunPhase::WaitingForInput,
        RunPhase::Completed,
        RunPhase::Failed,
    ] {
        assert!(!(phase.is_active() && phase.is_terminal()), "{phase}");
    }
}
