//! Grouping of job rows by task id and by thread id.

use crate::log::{JobRecord, JobTable};
use std::collections::BTreeMap;

/// Durations of one job as seen from its owning task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaskSample {
    pub sched: u64,
    pub run: u64,
    pub wait: u64,
}

impl From<&JobRecord> for TaskSample {
    fn from(job: &JobRecord) -> Self {
        Self {
            sched: job.sched_duration,
            run: job.run_duration,
            wait: job.wait_duration,
        }
    }
}

/// task_id -> samples in log order.
pub type TaskGroups = BTreeMap<u64, Vec<TaskSample>>;

/// thread_id -> run durations in log order.
pub type ThreadGroups = BTreeMap<u64, Vec<u64>>;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JobGroups {
    pub tasks: TaskGroups,
    pub threads: ThreadGroups,
}

/// Group jobs by task and by thread.
///
/// The first pass counts rows per key so every group is allocated once at
/// its final size; the second pass fills groups in log order.
pub fn group_jobs(jobs: &JobTable) -> JobGroups {
    let mut task_counts: BTreeMap<u64, usize> = BTreeMap::new();
    let mut thread_counts: BTreeMap<u64, usize> = BTreeMap::new();
    for job in jobs {
        *task_counts.entry(job.task_id).or_default() += 1;
        *thread_counts.entry(job.thread_id).or_default() += 1;
    }

    let mut tasks: TaskGroups = task_counts
        .into_iter()
        .map(|(id, n)| (id, Vec::with_capacity(n)))
        .collect();
    let mut threads: ThreadGroups = thread_counts
        .into_iter()
        .map(|(id, n)| (id, Vec::with_capacity(n)))
        .collect();

    for job in jobs {
        tasks.entry(job.task_id).or_default().push(job.into());
        threads
            .entry(job.thread_id)
            .or_default()
            .push(job.run_duration);
    }

    JobGroups { tasks, threads }
}

/// Split samples into (sched, run, wait) columns.
pub fn task_columns(samples: &[TaskSample]) -> [Vec<u64>; 3] {
    [
        samples.iter().map(|s| s.sched).collect(),
        samples.iter().map(|s| s.run).collect(),
        samples.iter().map(|s| s.wait).collect(),
    ]
}
