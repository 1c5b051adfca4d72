use crate::task::Task;

/// Expand `task` into a run in which every dependency precedes its dependents.
///
/// At each level the direct dependencies are ordered by ascending priority
/// (stable, so equal priorities keep attachment order). Each dependency is
/// expanded in turn, its own dependencies first and then itself, and `task`
/// closes the run. Nested dependencies are never reordered against their
/// parent's siblings.
///
/// Example: `t(1)` depending on `a(5)` and `b(3)`, where `a` depends on `c(9)`,
/// yields `b, c, a, t`.
pub(super) fn flatten<T: Task>(task: T) -> Vec<T> {
    let mut run = Vec::new();
    flatten_into(task, &mut run);
    run
}

fn flatten_into<T: Task>(mut task: T, run: &mut Vec<T>) {
    let mut dependencies = task.take_dependencies();
    dependencies.sort_by_key(Task::priority);
    for dependency in dependencies {
        flatten_into(dependency, run);
    }
    run.push(task);
}
