//! Lock-guarded ordered container and a dependency-aware priority scheduler.
//!
//! This crate provides:
//! - An explicit reader/writer lock that owns no data and reports the outcome
//!   of every acquire/release call.
//! - `ConcurrentVec`, an index-addressable sequence whose every operation runs
//!   under that lock, with search-then-insert composites performed under one
//!   acquisition and cross-container comparisons that lock in a fixed order.
//! - `Scheduler`, a caller-driven queue of deferred tasks: a submitted task's
//!   dependency tree is flattened so prerequisites come first, and the run is
//!   positioned by the submitted task's priority.
//!
//! Key modules:
//! - `lock`: the `RwLock` primitive and its release-on-drop `LockGuard`.
//! - `container`: `ConcurrentVec` and its read/write/compare operations.
//! - `scheduler`: `Scheduler::add` / `Scheduler::run_next` and dependency
//!   flattening.
//! - `task`: the `Task` interface and the closure-backed `TaskItem`.
//! - `config`: binds a task type and lock read mode to a scheduler via the
//!   `Config` trait.
//!
//! Quick start:
//! 1. Build `TaskItem`s with a priority and a closure, attaching prerequisites
//!    via `with_dependency` / `Task::add_dependency`.
//! 2. Submit them with `Scheduler::add` from any thread.
//! 3. Drive the queue with `Scheduler::run_next` (or `run_until_empty`); each
//!    call runs one entry on the calling thread.
//!
//! With the `loom` feature the lock and container are built on `loom`
//! primitives so their interleavings can be model-checked.

/// Scheduler configuration.
///
/// Exposes the `Config` trait binding a task type and a lock read mode for a
/// concrete instantiation of the scheduler, and the `ReadMode` switch itself.
pub mod config;
/// The lock-guarded ordered container.
///
/// Every observation holds the lock in read mode and every mutation in write
/// mode, released on all exit paths. Index-based operations report
/// out-of-range access through `error::Error`.
pub mod container;
/// Errors reported by container operations.
pub mod error;
/// Reader/writer lock with explicit acquire/release calls and RAII guards.
pub mod lock;
/// Dependency-aware priority scheduler.
///
/// Flattens dependency trees on insertion, positions runs by priority under a
/// single write acquisition, and runs popped entries outside the lock.
pub mod scheduler;
mod sync;
/// Task definitions: the `Task` trait and the stock `TaskItem`.
pub mod task;
/// Common aliases (`Priority`, `Action`) and the internal cell wrapper.
pub mod types;
mod utils;
