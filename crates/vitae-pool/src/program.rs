//! Worker Program
//!
//! The executable payload hosted by every unit of a pool. One program
//! instance is shared across units, so implementations carry their own
//! synchronization if they hold state.

/// Work executed inside pool units.
pub trait WorkerProgram: Send + Sync {
    /// Program name, used for thread naming and logs. Must be non-empty.
    fn name(&self) -> &str;

    /// One-time per-unit setup, before the first task. A failure retires
    /// the unit before it ever goes idle.
    fn init(&self) -> Result<(), String> {
        Ok(())
    }

    /// Execute one task payload. An `Err` is an ordinary failed outcome
    /// delivered through the completion callback, not a unit fault.
    fn run(&self, payload: &str) -> Result<String, String>;
}
