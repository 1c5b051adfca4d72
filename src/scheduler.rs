mod flatten;

use crate::{
    config::{Config, DefaultConfig},
    container::ConcurrentVec,
    task::Task,
    types::Priority,
};
use core::fmt;
use tracing::{debug, trace};

/// Priority queue of deferred tasks that runs prerequisites first.
///
/// Key responsibilities:
/// - `add` flattens a task's dependency tree into a run (see below) and
///   positions the whole run in front of the first queued entry with a
///   strictly greater priority than the submitted task, or at the end.
/// - `run_next` pops the head entry and runs it on the calling thread, outside
///   of any lock, so actions may call back into the scheduler.
///
/// There is no worker thread. `add` and `run_next` may be called from any
/// thread; concurrent `add`s land in the order they win the queue's write
/// lock.
///
/// Only the submitted task is positioned by priority. Its dependencies are
/// placed directly in front of it whatever their own priorities, so a queue
/// fed with such runs is not globally sorted:
///
#[cfg_attr(not(feature = "loom"), doc = "```")]
#[cfg_attr(feature = "loom", doc = "```ignore")]
/// use cts::{scheduler::Scheduler, task::TaskItem};
///
/// let scheduler = Scheduler::<cts::config::DefaultConfig>::new();
/// scheduler.add(TaskItem::new(5, || {}));
/// scheduler.add(TaskItem::new(1, || {}).with_dependency(TaskItem::new(10, || {})));
/// assert_eq!(scheduler.priorities(), [10, 1, 5]);
/// ```
pub struct Scheduler<C: Config = DefaultConfig> {
    queue: ConcurrentVec<C::Task>,
}

impl<C: Config> Default for Scheduler<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Config> fmt::Debug for Scheduler<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scheduler")
            .field("queue", &self.queue)
            .finish()
    }
}

impl<C: Config> Scheduler<C> {
    /// Create an empty scheduler whose queue lock uses `C::READ_MODE`.
    #[must_use]
    pub fn new() -> Self {
        Self {
            queue: ConcurrentVec::with_read_mode(C::READ_MODE),
        }
    }

    /// Enqueue `task` together with its whole dependency tree.
    ///
    /// The tree is flattened into a run where every dependency precedes the
    /// tasks depending on it and sibling dependencies are ordered by ascending
    /// priority. The run is inserted, under one write acquisition, right
    /// before the first queued entry whose priority is strictly greater than
    /// `task`'s, or at the end if there is none. Entries of equal priority
    /// therefore run in submission order.
    pub fn add(&self, task: C::Task) {
        let priority = task.priority();
        let run = flatten::flatten(task);
        let run_len = run.len();
        let position = self
            .queue
            .insert_all_before_first(run, |queued| queued.priority() > priority);
        trace!(priority, run_len, position, "enqueued task run");
    }

    /// Remove and return the head entry without running it.
    pub fn pop_next(&self) -> Option<C::Task> {
        self.queue.pop_first()
    }

    /// Pop the head entry and run it on the calling thread.
    ///
    /// Returns `false` without doing anything when the queue is empty.
    pub fn run_next(&self) -> bool {
        let Some(task) = self.pop_next() else {
            return false;
        };
        trace!(priority = task.priority(), "running task");
        task.exec();
        true
    }

    /// Run entries until the queue is observed empty, including entries that
    /// running actions add along the way. Returns how many entries ran.
    pub fn run_until_empty(&self) -> usize {
        let mut ran = 0usize;
        while self.run_next() {
            ran += 1;
        }
        debug!(ran, "scheduler queue drained");
        ran
    }

    /// Number of queued entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    /// Whether no entries are queued.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Priorities of the queued entries, head first.
    #[must_use]
    pub fn priorities(&self) -> Vec<Priority> {
        self.queue.map(Task::priority)
    }
}

#[cfg(all(test, not(feature = "loom")))]
mod tests {
    use super::*;
    use crate::{config::ReadMode, task::TaskItem};
    use std::sync::{
        Arc, Mutex,
        atomic::{AtomicUsize, Ordering},
    };

    struct ExclusiveConfig;

    impl Config for ExclusiveConfig {
        type Task = TaskItem;
        const READ_MODE: ReadMode = ReadMode::Exclusive;
    }

    fn logged(
        log: &Arc<Mutex<Vec<&'static str>>>,
        priority: Priority,
        name: &'static str,
    ) -> TaskItem {
        let log = Arc::clone(log);
        TaskItem::new(priority, move || log.lock().unwrap().push(name))
    }

    #[test]
    fn empty_queue_run_is_a_noop() {
        let scheduler = Scheduler::<DefaultConfig>::new();
        assert!(!scheduler.run_next());
        assert!(scheduler.pop_next().is_none());
        assert_eq!(scheduler.run_until_empty(), 0);
    }

    #[test]
    fn add_then_run_executes_once() {
        let runs = Arc::new(AtomicUsize::new(0));
        let scheduler = Scheduler::<DefaultConfig>::new();
        let counted = Arc::clone(&runs);
        scheduler.add(TaskItem::new(3, move || {
            counted.fetch_add(1, Ordering::SeqCst);
        }));
        assert!(scheduler.run_next());
        assert!(!scheduler.run_next());
        assert_eq!(runs.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn equal_priorities_run_in_submission_order() {
        let log = Arc::default();
        let scheduler = Scheduler::<ExclusiveConfig>::new();
        scheduler.add(logged(&log, 2, "first"));
        scheduler.add(logged(&log, 1, "head"));
        scheduler.add(logged(&log, 2, "second"));
        scheduler.run_until_empty();
        assert_eq!(*log.lock().unwrap(), ["head", "first", "second"]);
    }

    #[test]
    fn dependency_with_high_priority_still_runs_first() {
        let log = Arc::default();
        let scheduler = Scheduler::<DefaultConfig>::new();
        scheduler.add(logged(&log, 2, "two"));
        scheduler.add(logged(&log, 1, "one").with_dependency(logged(&log, 10, "ten")));
        assert_eq!(scheduler.priorities(), [10, 1, 2]);
        scheduler.run_until_empty();
        assert_eq!(*log.lock().unwrap(), ["ten", "one", "two"]);
    }

    #[test]
    fn actions_may_reenter_the_scheduler() {
        let scheduler = Arc::new(Scheduler::<DefaultConfig>::new());
        let runs = Arc::new(AtomicUsize::new(0));
        let inner = {
            let runs = Arc::clone(&runs);
            move || {
                runs.fetch_add(1, Ordering::SeqCst);
            }
        };
        let outer = {
            let scheduler = Arc::clone(&scheduler);
            let runs = Arc::clone(&runs);
            move || {
                runs.fetch_add(1, Ordering::SeqCst);
                scheduler.add(TaskItem::new(0, inner.clone()));
            }
        };
        scheduler.add(TaskItem::new(0, outer));
        assert_eq!(scheduler.run_until_empty(), 2);
        assert_eq!(runs.load(Ordering::SeqCst), 2);
    }
}
