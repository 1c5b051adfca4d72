use crate::task::{Task, TaskItem};

/// Configuration entry-point for instantiating the scheduler.
///
/// A concrete `Config` binds a specific `Task` implementation to the scheduler
/// and selects how the queue's lock treats read acquisitions.
pub trait Config: Sized + 'static {
    /// The task type the scheduler queues and runs.
    type Task: Task;
    /// Read mode of the lock guarding the scheduler's queue.
    const READ_MODE: ReadMode = ReadMode::Shared;
}

/// Stock configuration: queues [`TaskItem`]s behind a shared-read lock.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultConfig;

impl Config for DefaultConfig {
    type Task = TaskItem;
}

/// How an [`RwLock`](crate::lock::RwLock) serves read acquisitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ReadMode {
    /// Readers share the lock with each other and exclude writers.
    #[default]
    Shared,
    /// Every read acquisition takes the lock in write mode, so readers also
    /// exclude each other.
    Exclusive,
}
