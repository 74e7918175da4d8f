//! Task Pool
//!
//! A fixed set of worker threads fed over channels. Each task carries an
//! index; the index is the only reassembly key, there is no ordering
//! guarantee between units. Results and unit failures surface through
//! registered callbacks.

mod pool;
mod program;
mod task;
mod worker;

pub use pool::{PoolError, UnitError, WorkerPool};
pub use program::WorkerProgram;
pub use task::{Task, TaskOutcome, TaskResult};
