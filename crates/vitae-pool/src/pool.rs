//! Worker Pool
//!
//! Coordinator over a fixed set of unit threads. Idle units are a stack,
//! waiting tasks a FIFO queue. All coordinator state sits behind one
//! mutex touched from `submit_task` and the single event-loop thread;
//! callbacks are invoked with the lock released.

use std::collections::VecDeque;
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Arc, Mutex, MutexGuard};
use std::thread::JoinHandle;

use crate::program::WorkerProgram;
use crate::task::{Task, TaskResult};
use crate::worker::{unit_main, PoolEvent, UnitRequest, UnitStatus};

/// Construction failures. Construction is atomic: on any spawn failure
/// the already-spawned units are shut down before the error returns.
#[derive(Debug, thiserror::Error)]
pub enum PoolError {
    #[error("pool size must be at least 1")]
    InvalidSize,
    #[error("worker program must carry a non-empty name")]
    InvalidProgram,
    #[error("failed to spawn unit {0}: {1}")]
    Spawn(usize, String),
}

/// Faults of a single unit, routed to the registered error callback.
#[derive(Debug, Clone, thiserror::Error)]
pub enum UnitError {
    #[error("unit {unit} failed to initialize: {message}")]
    InitFailed { unit: usize, message: String },
    #[error("unit {unit} crashed while running task {index}: {message}")]
    Crashed {
        unit: usize,
        index: usize,
        message: String,
    },
    #[error("dispatch to unit {unit} failed, task requeued")]
    DispatchFailed { unit: usize },
}

type CompletionCallback = Arc<dyn Fn(TaskResult) + Send + Sync>;
type ErrorCallback = Arc<dyn Fn(UnitError) + Send + Sync>;

struct PoolState {
    /// Per-unit request channels; a retired unit's slot is `None`.
    units: Vec<Option<Sender<UnitRequest>>>,
    idle: Vec<usize>,
    pending: VecDeque<Task>,
    on_complete: Option<CompletionCallback>,
    on_error: Option<ErrorCallback>,
    terminated: bool,
}

impl PoolState {
    /// Hand `task` to `unit`. On failure the task returns to the front of
    /// the queue and the unit reverts to idle; the caller routes the
    /// returned error.
    fn dispatch(&mut self, unit: usize, task: Task) -> Option<UnitError> {
        let sender = match self.units.get(unit).and_then(Option::as_ref) {
            Some(sender) => sender.clone(),
            None => {
                self.pending.push_front(task);
                return Some(UnitError::DispatchFailed { unit });
            }
        };
        match sender.send(UnitRequest::Run(task)) {
            Ok(()) => None,
            Err(mpsc::SendError(request)) => {
                if let UnitRequest::Run(task) = request {
                    self.pending.push_front(task);
                }
                self.idle.push(unit);
                Some(UnitError::DispatchFailed { unit })
            }
        }
    }

    /// Remove a unit permanently. Capacity shrinks; crashed and
    /// init-failed units are not replaced.
    fn retire(&mut self, unit: usize) {
        if let Some(slot) = self.units.get_mut(unit) {
            *slot = None;
        }
        self.idle.retain(|idle| *idle != unit);
    }
}

/// Fixed-size pool of unit threads running one shared [`WorkerProgram`].
pub struct WorkerPool {
    state: Arc<Mutex<PoolState>>,
    events: Sender<PoolEvent>,
    unit_threads: Vec<Option<JoinHandle<()>>>,
    event_thread: Option<JoinHandle<()>>,
    size: usize,
}

impl std::fmt::Debug for WorkerPool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WorkerPool")
            .field("size", &self.size)
            .field("idle", &self.idle_count())
            .field("pending", &self.pending_count())
            .field("terminated", &self.is_terminated())
            .finish()
    }
}

fn lock(state: &Mutex<PoolState>) -> MutexGuard<'_, PoolState> {
    match state.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}

impl WorkerPool {
    /// Spawn `size` units running `program`. Each unit reports a one-time
    /// ready or init-error status; units become dispatchable when ready.
    pub fn new(size: usize, program: Arc<dyn WorkerProgram>) -> Result<Self, PoolError> {
        if size == 0 {
            return Err(PoolError::InvalidSize);
        }
        if program.name().is_empty() {
            return Err(PoolError::InvalidProgram);
        }

        let (events, event_rx) = mpsc::channel();
        let state = Arc::new(Mutex::new(PoolState {
            units: Vec::with_capacity(size),
            idle: Vec::new(),
            pending: VecDeque::new(),
            on_complete: None,
            on_error: None,
            terminated: false,
        }));

        let mut unit_threads: Vec<Option<JoinHandle<()>>> = Vec::with_capacity(size);
        for unit in 0..size {
            let (requests, request_rx) = mpsc::channel();
            let spawned = std::thread::Builder::new()
                .name(format!("{}-{unit}", program.name()))
                .spawn({
                    let program = Arc::clone(&program);
                    let events = events.clone();
                    move || unit_main(unit, program, request_rx, events)
                });
            match spawned {
                Ok(handle) => {
                    lock(&state).units.push(Some(requests));
                    unit_threads.push(Some(handle));
                }
                Err(error) => {
                    teardown(&state, &mut unit_threads);
                    return Err(PoolError::Spawn(unit, error.to_string()));
                }
            }
        }

        let event_thread = std::thread::Builder::new()
            .name(format!("{}-events", program.name()))
            .spawn({
                let state = Arc::clone(&state);
                move || event_loop(event_rx, state)
            });
        let event_thread = match event_thread {
            Ok(handle) => handle,
            Err(error) => {
                teardown(&state, &mut unit_threads);
                return Err(PoolError::Spawn(size, error.to_string()));
            }
        };

        tracing::info!(size, program = program.name(), "worker pool started");
        Ok(Self {
            state,
            events,
            unit_threads,
            event_thread: Some(event_thread),
            size,
        })
    }

    /// Dispatch `task` to an idle unit, or queue it FIFO when every unit
    /// is busy. On a terminated pool or an empty payload the task is
    /// logged and dropped.
    pub fn submit_task(&self, task: Task) {
        let mut guard = lock(&self.state);
        if guard.terminated {
            tracing::warn!(index = task.index, "submit_task on a terminated pool, dropping");
            return;
        }
        if task.payload.is_empty() {
            tracing::warn!(index = task.index, "submit_task with an empty payload, dropping");
            return;
        }
        match guard.idle.pop() {
            Some(unit) => {
                let failure = guard.dispatch(unit, task);
                let on_error = guard.on_error.clone();
                drop(guard);
                route_error(on_error, failure);
            }
            None => guard.pending.push_back(task),
        }
    }

    /// Register the completion callback. It fires exactly once per result,
    /// failed outcomes included, replacing any earlier registration.
    pub fn on_task_complete(&self, callback: impl Fn(TaskResult) + Send + Sync + 'static) {
        lock(&self.state).on_complete = Some(Arc::new(callback));
    }

    /// Register the unit-error callback, replacing any earlier one.
    pub fn on_error(&self, callback: impl Fn(UnitError) + Send + Sync + 'static) {
        lock(&self.state).on_error = Some(Arc::new(callback));
    }

    /// Number of units the pool was built with.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Units currently ready for dispatch.
    pub fn idle_count(&self) -> usize {
        lock(&self.state).idle.len()
    }

    /// Tasks waiting for a unit.
    pub fn pending_count(&self) -> usize {
        lock(&self.state).pending.len()
    }

    /// Units that have not been retired.
    pub fn live_units(&self) -> usize {
        lock(&self.state).units.iter().flatten().count()
    }

    pub fn is_terminated(&self) -> bool {
        lock(&self.state).terminated
    }

    /// Shut the pool down: close every unit channel, join the threads,
    /// clear the queue and callbacks. Idempotent; later submissions are
    /// logged no-ops.
    pub fn terminate(&mut self) {
        {
            let mut guard = lock(&self.state);
            if guard.terminated {
                tracing::debug!("terminate on an already terminated pool");
                return;
            }
            guard.terminated = true;
            for sender in guard.units.iter_mut().filter_map(Option::take) {
                let _ = sender.send(UnitRequest::Shutdown);
            }
            guard.idle.clear();
            guard.pending.clear();
            guard.on_complete = None;
            guard.on_error = None;
        }
        for handle in self.unit_threads.iter_mut().filter_map(Option::take) {
            let _ = handle.join();
        }
        let _ = self.events.send(PoolEvent::Shutdown);
        if let Some(handle) = self.event_thread.take() {
            let _ = handle.join();
        }
        tracing::info!("worker pool terminated");
    }
}

impl Drop for WorkerPool {
    fn drop(&mut self) {
        self.terminate();
    }
}

/// Partial-construction teardown: shut down whatever spawned so far.
fn teardown(state: &Mutex<PoolState>, unit_threads: &mut Vec<Option<JoinHandle<()>>>) {
    {
        let mut guard = lock(state);
        guard.terminated = true;
        for sender in guard.units.iter_mut().filter_map(Option::take) {
            let _ = sender.send(UnitRequest::Shutdown);
        }
    }
    for handle in unit_threads.iter_mut().filter_map(Option::take) {
        let _ = handle.join();
    }
}

fn event_loop(events: Receiver<PoolEvent>, state: Arc<Mutex<PoolState>>) {
    while let Ok(event) = events.recv() {
        match event {
            PoolEvent::Shutdown => break,
            PoolEvent::Status { unit, status } => on_status(&state, unit, status),
            PoolEvent::Completed { unit, result } => on_completed(&state, unit, result),
            PoolEvent::Crashed {
                unit,
                index,
                message,
            } => on_crashed(&state, unit, index, message),
        }
    }
}

fn on_status(state: &Mutex<PoolState>, unit: usize, status: UnitStatus) {
    match status {
        UnitStatus::Ready => {
            tracing::debug!(unit, "unit ready");
            free_unit(state, unit);
        }
        UnitStatus::InitError(message) => {
            let mut guard = lock(state);
            guard.retire(unit);
            let terminated = guard.terminated;
            let on_error = guard.on_error.clone();
            drop(guard);
            if !terminated {
                route_error(on_error, Some(UnitError::InitFailed { unit, message }));
            }
        }
    }
}

fn on_completed(state: &Mutex<PoolState>, unit: usize, result: TaskResult) {
    let on_complete = {
        let guard = lock(state);
        if guard.terminated {
            return;
        }
        guard.on_complete.clone()
    };
    // The completion callback observes the result before the next queued
    // task dispatches.
    match on_complete {
        Some(callback) => callback(result),
        None => tracing::warn!(
            index = result.index,
            "task completed with no completion callback registered"
        ),
    }
    free_unit(state, unit);
}

fn on_crashed(state: &Mutex<PoolState>, unit: usize, index: usize, message: String) {
    let mut guard = lock(state);
    guard.retire(unit);
    let terminated = guard.terminated;
    let on_error = guard.on_error.clone();
    drop(guard);
    if !terminated {
        route_error(on_error, Some(UnitError::Crashed {
            unit,
            index,
            message,
        }));
    }
}

/// A unit became available: hand it the oldest pending task, or park it
/// on the idle stack.
fn free_unit(state: &Mutex<PoolState>, unit: usize) {
    let mut guard = lock(state);
    if guard.terminated {
        return;
    }
    match guard.pending.pop_front() {
        Some(task) => {
            let failure = guard.dispatch(unit, task);
            let on_error = guard.on_error.clone();
            drop(guard);
            route_error(on_error, failure);
        }
        None => guard.idle.push(unit),
    }
}

fn route_error(on_error: Option<ErrorCallback>, failure: Option<UnitError>) {
    let Some(error) = failure else { return };
    match on_error {
        Some(callback) => callback(error),
        None => tracing::warn!(%error, "unit error with no error callback registered"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::TaskOutcome;
    use std::time::{Duration, Instant};

    struct EchoProgram;

    impl WorkerProgram for EchoProgram {
        fn name(&self) -> &str {
            "echo"
        }

        fn run(&self, payload: &str) -> Result<String, String> {
            match payload {
                "bad" => Err("refused".to_string()),
                "boom" => panic!("boom"),
                _ => Ok(format!("<p>{payload}</p>")),
            }
        }
    }

    struct FailingInit;

    impl WorkerProgram for FailingInit {
        fn name(&self) -> &str {
            "failing-init"
        }

        fn init(&self) -> Result<(), String> {
            Err("no renderer available".to_string())
        }

        fn run(&self, _payload: &str) -> Result<String, String> {
            Ok(String::new())
        }
    }

    /// Blocks each run until the test releases the gate.
    struct GatedProgram {
        gate: Mutex<mpsc::Receiver<()>>,
    }

    impl WorkerProgram for GatedProgram {
        fn name(&self) -> &str {
            "gated"
        }

        fn run(&self, payload: &str) -> Result<String, String> {
            let _ = lock_gate(&self.gate).recv();
            Ok(payload.to_string())
        }
    }

    fn lock_gate(gate: &Mutex<mpsc::Receiver<()>>) -> MutexGuard<'_, mpsc::Receiver<()>> {
        gate.lock().unwrap()
    }

    fn wait_until(timeout: Duration, mut condition: impl FnMut() -> bool) -> bool {
        let deadline = Instant::now() + timeout;
        while Instant::now() < deadline {
            if condition() {
                return true;
            }
            std::thread::sleep(Duration::from_millis(5));
        }
        condition()
    }

    #[test]
    fn rejects_degenerate_configurations() {
        assert!(matches!(
            WorkerPool::new(0, Arc::new(EchoProgram)),
            Err(PoolError::InvalidSize)
        ));

        struct Nameless;
        impl WorkerProgram for Nameless {
            fn name(&self) -> &str {
                ""
            }
            fn run(&self, _payload: &str) -> Result<String, String> {
                Ok(String::new())
            }
        }
        assert!(matches!(
            WorkerPool::new(1, Arc::new(Nameless)),
            Err(PoolError::InvalidProgram)
        ));
    }

    #[test]
    fn results_carry_their_submission_index() {
        let mut pool = WorkerPool::new(2, Arc::new(EchoProgram)).unwrap();
        let (results_tx, results_rx) = mpsc::channel();
        pool.on_task_complete(move |result| {
            let _ = results_tx.send(result);
        });

        for index in 0..4 {
            pool.submit_task(Task::new(index, format!("item-{index}")));
        }

        let mut seen = vec![None; 4];
        for _ in 0..4 {
            let result = results_rx.recv_timeout(Duration::from_secs(5)).unwrap();
            seen[result.index] = Some(result.outcome);
        }
        for (index, outcome) in seen.into_iter().enumerate() {
            assert_eq!(
                outcome,
                Some(TaskOutcome::Html(format!("<p>item-{index}</p>")))
            );
        }
        pool.terminate();
    }

    #[test]
    fn excess_tasks_queue_and_drain_in_fifo_order() {
        let (gate_tx, gate_rx) = mpsc::channel();
        let program = Arc::new(GatedProgram {
            gate: Mutex::new(gate_rx),
        });
        let mut pool = WorkerPool::new(1, program).unwrap();
        let (results_tx, results_rx) = mpsc::channel();
        pool.on_task_complete(move |result| {
            let _ = results_tx.send(result.index);
        });

        for index in 0..3 {
            pool.submit_task(Task::new(index, "work"));
        }
        assert!(wait_until(Duration::from_secs(5), || pool.pending_count() == 2));

        for _ in 0..3 {
            gate_tx.send(()).unwrap();
        }
        let order: Vec<usize> = (0..3)
            .map(|_| results_rx.recv_timeout(Duration::from_secs(5)).unwrap())
            .collect();
        assert_eq!(order, vec![0, 1, 2]);
        pool.terminate();
    }

    #[test]
    fn run_errors_are_failed_outcomes_not_faults() {
        let mut pool = WorkerPool::new(1, Arc::new(EchoProgram)).unwrap();
        let (results_tx, results_rx) = mpsc::channel();
        pool.on_task_complete(move |result| {
            let _ = results_tx.send(result);
        });

        pool.submit_task(Task::new(0, "bad"));
        let result = results_rx.recv_timeout(Duration::from_secs(5)).unwrap();
        assert_eq!(result.index, 0);
        assert_eq!(result.outcome, TaskOutcome::Failed("refused".to_string()));
        assert!(wait_until(Duration::from_secs(5), || pool.live_units() == 1));
        pool.terminate();
    }

    #[test]
    fn crashed_units_are_retired_without_replacement() {
        let mut pool = WorkerPool::new(2, Arc::new(EchoProgram)).unwrap();
        let (errors_tx, errors_rx) = mpsc::channel();
        pool.on_error(move |error| {
            let _ = errors_tx.send(error);
        });

        pool.submit_task(Task::new(7, "boom"));
        let error = errors_rx.recv_timeout(Duration::from_secs(5)).unwrap();
        assert!(matches!(error, UnitError::Crashed { index: 7, .. }));
        assert!(wait_until(Duration::from_secs(5), || pool.live_units() == 1));
        pool.terminate();
    }

    #[test]
    fn init_failure_retires_the_unit_before_it_goes_idle() {
        let mut pool = WorkerPool::new(1, Arc::new(FailingInit)).unwrap();
        assert!(wait_until(Duration::from_secs(5), || pool.live_units() == 0));
        assert_eq!(pool.idle_count(), 0);
        pool.terminate();
    }

    #[test]
    fn terminate_is_idempotent_and_final() {
        let mut pool = WorkerPool::new(2, Arc::new(EchoProgram)).unwrap();
        pool.terminate();
        pool.terminate();

        assert!(pool.is_terminated());
        pool.submit_task(Task::new(0, "late"));
        assert_eq!(pool.pending_count(), 0);
        assert_eq!(pool.idle_count(), 0);
    }

    #[test]
    fn empty_payloads_are_dropped_with_a_warning() {
        let mut pool = WorkerPool::new(1, Arc::new(EchoProgram)).unwrap();
        pool.submit_task(Task::new(0, ""));
        assert_eq!(pool.pending_count(), 0);
        pool.terminate();
    }
}
