// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Run Supervisor: owns one execution attempt end to end.

use crate::broker::{BrokerConfig, InputBroker, InputError};
use crate::channel::OutputChannel;
use crate::engine::{EngineSource, ScriptEngine};
use crate::state::RunStateHandle;
use crate::transform::wrap_entry_point;
use algo_core::{RunId, RunPhase, StreamKind};
use algo_script::exec::to_str;
use algo_script::{ExcType, ExecError, Value};
use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;
use tracing::Instrument;

pub const NOT_READY_MESSAGE: &str = "Python environment is still loading. Please wait...";
pub const EMPTY_SOURCE_MESSAGE: &str = "No code to run!";
pub const NO_OUTPUT_MESSAGE: &str = "Code executed successfully (no output)";

/// Why a run request was turned away before the program started.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    /// Another run is still active.
    Busy,
    NotReady,
    EmptySource,
}

algo_core::simple_display! {
    RejectReason {
        Busy => "a run is already in progress",
        NotReady => "engine not ready",
        EmptySource => "no code to run",
    }
}

/// How a run ended. Front ends follow progress through the output channel
/// and run-state subscriptions; this is informational.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    Completed,
    /// The program raised; carries the rendered exception.
    Failed(String),
    Rejected(RejectReason),
}

/// Drives programs through an engine, one run at a time.
pub struct RunSupervisor<E> {
    engine: EngineSource<E>,
    output: OutputChannel,
    state: RunStateHandle,
    broker: InputBroker,
    active: AtomicBool,
    phase: Mutex<RunPhase>,
}

impl<E: ScriptEngine> RunSupervisor<E> {
    pub fn new(engine: EngineSource<E>) -> Self {
        Self::with_config(engine, BrokerConfig::default())
    }

    pub fn with_config(engine: EngineSource<E>, config: BrokerConfig) -> Self {
        let output = OutputChannel::new();
        let state = RunStateHandle::new();
        let broker = InputBroker::new(output.clone(), state.clone(), config);
        Self {
            engine,
            output,
            state,
            broker,
            active: AtomicBool::new(false),
            phase: Mutex::new(RunPhase::Idle),
        }
    }

    pub fn output(&self) -> &OutputChannel {
        &self.output
    }

    pub fn broker(&self) -> &InputBroker {
        &self.broker
    }

    pub fn state(&self) -> &RunStateHandle {
        &self.state
    }

    pub fn phase(&self) -> RunPhase {
        let state = self.state.get();
        if state.is_running {
            state.phase()
        } else {
            *self.phase.lock()
        }
    }

    /// Run `source` to completion.
    ///
    /// Rejected without side effects while another run is active. Program
    /// failures are written to the output channel, never returned as errors.
    pub async fn run(&self, source: &str) -> RunOutcome {
        let Some(guard) = ActiveRun::acquire(self) else {
            tracing::warn!("run rejected: another run is active");
            return RunOutcome::Rejected(RejectReason::Busy);
        };
        let run_id = RunId::new();
        let outcome = self.execute(source).instrument(tracing::info_span!("run", %run_id)).await;
        drop(guard);
        outcome
    }

    async fn execute(&self, source: &str) -> RunOutcome {
        let engine = self.engine.acquire();
        if !engine.is_ready() {
            return self.refuse(RejectReason::NotReady, NOT_READY_MESSAGE);
        }
        if source.trim().is_empty() {
            return self.refuse(RejectReason::EmptySource, EMPTY_SOURCE_MESSAGE);
        }

        self.output.clear();
        self.state.reset();
        self.state.set_running(true);
        self.set_phase(RunPhase::Running);

        self.install(&*engine);
        let transformed = engine.transform_input_calls(source).unwrap_or_else(|err| {
            tracing::debug!(error = %err, "running untransformed source");
            source.to_string()
        });
        let program = wrap_entry_point(&transformed);

        let started = Instant::now();
        let result = engine.run(&program).await;
        let elapsed_ms = started.elapsed().as_millis() as u64;

        match result {
            Ok(()) => {
                if self.output.is_empty() {
                    self.output.write(StreamKind::Success, NO_OUTPUT_MESSAGE);
                }
                tracing::info!(elapsed_ms, "run completed");
                self.set_phase(RunPhase::Completed);
                RunOutcome::Completed
            }
            Err(err) => {
                let message = err.to_string();
                tracing::info!(elapsed_ms, error = %message, "run failed");
                self.output.write(StreamKind::Failure, &message);
                self.set_phase(RunPhase::Failed);
                RunOutcome::Failed(message)
            }
        }
    }

    /// Replace the panel with a single failure record without running.
    fn refuse(&self, reason: RejectReason, message: &str) -> RunOutcome {
        tracing::info!(%reason, "run refused");
        self.output.clear();
        self.output.write(StreamKind::Failure, message);
        RunOutcome::Rejected(reason)
    }

    /// Bind the output sinks and the `input` hook in the engine's globals.
    fn install(&self, engine: &E) {
        for (name, kind) in [("__stdout__", StreamKind::Stdout), ("__stderr__", StreamKind::Stderr)] {
            let output = self.output.clone();
            engine.set_global(
                name,
                Value::host_fn(name, move |args| {
                    if let Some(text) = args.first() {
                        match text.as_str() {
                            Some(s) => output.write(kind, s),
                            None => output.write(kind, &to_str(text)),
                        }
                    }
                    Ok(Value::None)
                }),
            );
        }

        let broker = self.broker.clone();
        engine.set_global(
            "input",
            Value::host_async_fn("input", move |args| {
                let request = match args.as_slice() {
                    [] => Ok(broker.request_input("")),
                    [prompt] => Ok(broker.request_input(&to_str(prompt))),
                    _ => Err(ExecError::type_error(format!(
                        "input expected at most 1 argument, got {}",
                        args.len()
                    ))),
                };
                async move { request?.await.map(Value::str).map_err(input_error) }
            }),
        );
    }

    fn set_phase(&self, next: RunPhase) {
        let mut phase = self.phase.lock();
        let from = *phase;
        if !from.can_transition_to(next) {
            tracing::warn!(%from, to = %next, "unexpected run phase transition");
        }
        tracing::debug!(%from, to = %next, "run phase");
        *phase = next;
    }
}

fn input_error(err: InputError) -> ExecError {
    match err {
        InputError::Cancelled => ExecError::new(ExcType::EOFError, err.to_string()),
        InputError::TimedOut(_) => ExecError::new(ExcType::EOFError, "input timed out"),
        InputError::AlreadyPending => ExecError::new(ExcType::RuntimeError, err.to_string()),
    }
}

/// Marks the supervisor busy; releasing it restores the idle state on
/// every exit path, including a dropped run future.
struct ActiveRun<'a, E: ScriptEngine> {
    supervisor: &'a RunSupervisor<E>,
}

impl<'a, E: ScriptEngine> ActiveRun<'a, E> {
    fn acquire(supervisor: &'a RunSupervisor<E>) -> Option<Self> {
        supervisor
            .active
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self { supervisor })
    }
}

impl<E: ScriptEngine> Drop for ActiveRun<'_, E> {
    fn drop(&mut self) {
        let supervisor = self.supervisor;
        if supervisor.broker.cancel() {
            tracing::debug!("cancelled input request left by the run");
        }
        supervisor.state.reset();
        {
            let mut phase = supervisor.phase.lock();
            if phase.is_active() {
                *phase = RunPhase::Failed;
            }
        }
        supervisor.active.store(false, Ordering::Release);
    }
}

#[cfg(test)]
#[path = "supervisor_tests/mod.rs"]
mod tests;
