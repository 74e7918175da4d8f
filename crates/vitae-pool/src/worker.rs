//! Unit Thread
//!
//! The loop run by each pool unit: one-time init status, then tasks until
//! shutdown. Panics in the program are caught here and reported as a
//! crash event; the unit exits and is never replaced.

use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::mpsc::{Receiver, Sender};
use std::sync::Arc;

use crate::program::WorkerProgram;
use crate::task::{Task, TaskOutcome, TaskResult};

/// Request sent from the coordinator to one unit.
pub(crate) enum UnitRequest {
    Run(Task),
    Shutdown,
}

/// One-time startup status reported by a unit.
pub(crate) enum UnitStatus {
    Ready,
    InitError(String),
}

/// Events flowing from units and `terminate` to the event loop.
pub(crate) enum PoolEvent {
    Status { unit: usize, status: UnitStatus },
    Completed { unit: usize, result: TaskResult },
    Crashed { unit: usize, index: usize, message: String },
    Shutdown,
}

pub(crate) fn unit_main(
    unit: usize,
    program: Arc<dyn WorkerProgram>,
    requests: Receiver<UnitRequest>,
    events: Sender<PoolEvent>,
) {
    if let Err(message) = program.init() {
        tracing::error!(unit, %message, "unit initialization failed");
        let _ = events.send(PoolEvent::Status {
            unit,
            status: UnitStatus::InitError(message),
        });
        return;
    }
    let _ = events.send(PoolEvent::Status {
        unit,
        status: UnitStatus::Ready,
    });

    while let Ok(UnitRequest::Run(task)) = requests.recv() {
        let index = task.index;
        match catch_unwind(AssertUnwindSafe(|| program.run(&task.payload))) {
            Ok(Ok(html)) => {
                let _ = events.send(PoolEvent::Completed {
                    unit,
                    result: TaskResult {
                        index,
                        outcome: TaskOutcome::Html(html),
                    },
                });
            }
            Ok(Err(message)) => {
                let _ = events.send(PoolEvent::Completed {
                    unit,
                    result: TaskResult {
                        index,
                        outcome: TaskOutcome::Failed(message),
                    },
                });
            }
            Err(panic) => {
                let message = panic_message(panic);
                tracing::error!(unit, index, %message, "unit crashed while running a task");
                let _ = events.send(PoolEvent::Crashed {
                    unit,
                    index,
                    message,
                });
                return;
            }
        }
    }
}

fn panic_message(panic: Box<dyn std::any::Any + Send>) -> String {
    if let Some(message) = panic.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = panic.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}
