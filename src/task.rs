use crate::types::{Action, Priority};
use core::fmt::Debug;
use derive_more::Debug as DebugDerive;
use std::sync::Arc;

/// A single unit of deferred work.
///
/// A task carries a priority, the tasks that must run before it, and an action.
/// Dependencies are owned values: attaching a task moves it (or a clone of it)
/// into the dependent, so later changes to the caller's copy never reach what
/// was attached or submitted.
pub trait Task: Debug + Send + Sync + Sized + 'static {
    /// Scheduling priority; lower values are meant to run earlier.
    fn priority(&self) -> Priority;
    /// Tasks that must run before this one, in attachment order.
    fn dependencies(&self) -> &[Self];
    /// Attach a prerequisite.
    fn add_dependency(&mut self, dependency: Self);
    /// Detach and return all prerequisites, leaving none behind.
    fn take_dependencies(&mut self) -> Vec<Self>;
    /// Consume the task and run its action on the calling thread.
    fn exec(self);
}

/// Stock [`Task`] implementation wrapping a closure.
///
/// Cloning deep-copies the dependency tree and shares the action.
///
/// # Actions
///
/// The action is an [`Action`]: an `Fn() + Send + Sync` closure behind an
/// `Arc`, so every clone of a task (and every clone of a tree containing it)
/// calls the same closure. `FnMut`/`FnOnce` closures and closures capturing
/// non-`Sync` state are rejected:
///
/// ```compile_fail
/// let mut runs = 0;
/// cts::task::TaskItem::new(0, move || runs += 1);
/// ```
///
/// Keep mutable state behind a synchronized handle instead. It is then shared
/// by all clones:
///
/// ```
/// use cts::task::{Task, TaskItem};
/// use std::sync::{Arc, Mutex};
///
/// let runs = Arc::new(Mutex::new(0));
/// let task = {
///     let runs = Arc::clone(&runs);
///     TaskItem::new(0, move || *runs.lock().unwrap() += 1)
/// };
/// task.clone().exec();
/// task.exec();
/// assert_eq!(*runs.lock().unwrap(), 2);
/// ```
#[derive(Clone, DebugDerive)]
pub struct TaskItem {
    priority: Priority,
    dependencies: Vec<TaskItem>,
    #[debug(skip)]
    action: Action,
}

impl TaskItem {
    /// Create a task without dependencies.
    pub fn new(priority: Priority, action: impl Fn() + Send + Sync + 'static) -> Self {
        Self {
            priority,
            dependencies: Vec::new(),
            action: Arc::new(action),
        }
    }

    /// Builder form of [`Task::add_dependency`].
    #[must_use]
    pub fn with_dependency(mut self, dependency: Self) -> Self {
        self.add_dependency(dependency);
        self
    }
}

impl Task for TaskItem {
    fn priority(&self) -> Priority {
        self.priority
    }

    fn dependencies(&self) -> &[Self] {
        &self.dependencies
    }

    fn add_dependency(&mut self, dependency: Self) {
        self.dependencies.push(dependency);
    }

    fn take_dependencies(&mut self) -> Vec<Self> {
        core::mem::take(&mut self.dependencies)
    }

    fn exec(self) {
        (self.action)();
    }
}
