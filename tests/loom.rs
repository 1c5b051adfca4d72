#![allow(missing_docs)]
#![cfg(feature = "loom")]

use cts::{
    config::{Config, ReadMode},
    container::ConcurrentVec,
    lock::RwLock,
    scheduler::Scheduler,
    task::TaskItem,
};
use loom::{
    sync::{
        Arc, Mutex,
        atomic::{AtomicUsize, Ordering},
    },
    thread,
};

struct LoomConfig;

impl Config for LoomConfig {
    type Task = TaskItem;
}

#[derive(Clone)]
struct Log(Arc<Mutex<Vec<u32>>>);

impl Log {
    fn new() -> Self {
        Self(Arc::new(Mutex::new(Vec::new())))
    }

    fn task(&self, priority: i64, id: u32) -> TaskItem {
        let log = self.0.clone();
        TaskItem::new(priority, move || log.lock().unwrap().push(id))
    }

    fn entries(&self) -> Vec<u32> {
        self.0.lock().unwrap().clone()
    }
}

fn position(entries: &[u32], id: u32) -> usize {
    entries
        .iter()
        .position(|&entry| entry == id)
        .unwrap_or_else(|| panic!("task {id} never ran"))
}

#[test]
fn loom_writer_excludes_shared_readers() {
    loom::model(|| {
        let lock = Arc::new(RwLock::new());
        let inside = Arc::new(AtomicUsize::new(0));

        let writer = {
            let lock = lock.clone();
            let inside = inside.clone();
            thread::spawn(move || {
                let _guard = lock.write();
                assert_eq!(inside.fetch_add(10, Ordering::SeqCst), 0);
                inside.fetch_sub(10, Ordering::SeqCst);
            })
        };

        {
            let _guard = lock.read();
            // A writer inside would have added 10.
            assert!(inside.fetch_add(1, Ordering::SeqCst) < 10);
            inside.fetch_sub(1, Ordering::SeqCst);
        }

        writer.join().unwrap();
        assert!(!lock.release());
    });
}

#[test]
fn loom_concurrent_mutations_lose_no_updates() {
    loom::model(|| {
        // Graph of operations:
        //   T1: push(1), insert(0, 2)
        //   T2: pop_first()
        // Starting from [0], exactly one element is removed and two are added.
        let vec = Arc::new(ConcurrentVec::from(vec![0u32]));

        let pusher = {
            let vec = vec.clone();
            thread::spawn(move || {
                vec.push(1);
                vec.insert(0, 2).unwrap();
            })
        };
        let popped = vec.pop_first();
        pusher.join().unwrap();

        assert!(popped.is_some());
        assert_eq!(vec.len(), 2);
        let mut all = vec.to_vec();
        all.push(popped.unwrap());
        all.sort_unstable();
        assert_eq!(all, [0, 1, 2]);
    });
}

#[test]
fn loom_mutual_comparison_does_not_deadlock() {
    loom::model(|| {
        // Exclusive reads are the worst case: each comparison holds both locks
        // exclusively, so acquisition order alone decides deadlock freedom.
        let a = Arc::new(ConcurrentVec::from_vec(vec![1, 2], ReadMode::Exclusive));
        let b = Arc::new(ConcurrentVec::from_vec(vec![1, 2], ReadMode::Exclusive));

        let backward = {
            let (a, b) = (a.clone(), b.clone());
            thread::spawn(move || b.elements_eq_by(&a, |x, y| x == y))
        };
        let forward = a.elements_eq_by(&b, |x, y| x == y);

        assert!(forward);
        assert!(backward.join().unwrap());
    });
}

#[test]
fn loom_concurrent_adds_keep_dependencies_first() {
    loom::model(|| {
        // Runs submitted from two threads:
        //   T1: task 1 (priority 1) depending on task 2 (priority 10)
        //   T2: task 3 (priority 5)
        // Whatever the interleaving, every action runs exactly once and
        // task 2 runs before task 1.
        let log = Log::new();
        let scheduler = Arc::new(Scheduler::<LoomConfig>::new());

        let submitter = {
            let scheduler = scheduler.clone();
            let task = log.task(1, 1).with_dependency(log.task(10, 2));
            thread::spawn(move || scheduler.add(task))
        };
        scheduler.add(log.task(5, 3));
        submitter.join().unwrap();

        assert_eq!(scheduler.run_until_empty(), 3);
        let entries = log.entries();
        assert_eq!(entries.len(), 3);
        assert!(position(&entries, 2) < position(&entries, 1));
        assert!(entries.contains(&3));
    });
}

#[test]
fn loom_concurrent_run_next_runs_each_task_once() {
    loom::model(|| {
        let log = Log::new();
        let scheduler = Arc::new(Scheduler::<LoomConfig>::new());
        scheduler.add(log.task(1, 1));
        scheduler.add(log.task(2, 2));

        let runner = {
            let scheduler = scheduler.clone();
            thread::spawn(move || scheduler.run_next())
        };
        let ran_here = scheduler.run_next();
        let ran_there = runner.join().unwrap();

        assert!(ran_here && ran_there);
        assert!(!scheduler.run_next());
        let mut entries = log.entries();
        entries.sort_unstable();
        assert_eq!(entries, [1, 2]);
    });
}
