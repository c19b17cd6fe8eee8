//! Job statistics: per task, per thread, and over the whole job table.

use crate::log::{JobRecord, JobTable};
use crate::model::group::{JobGroups, TaskSample, task_columns};
use crate::stats::StatsSummary;
use serde::ser::{Serialize, SerializeMap, Serializer};
use std::collections::BTreeMap;

/// Sched/run/wait summaries for one task.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TaskStats {
    pub sched: StatsSummary,
    pub run: StatsSummary,
    pub wait: StatsSummary,
}

/// Run-time summary for one worker thread.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThreadStats {
    pub run: StatsSummary,
}

/// Everything the job aggregator produces. Global summaries are `None` when
/// the job table is empty.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct JobStats {
    pub task_stats: BTreeMap<u64, TaskStats>,
    pub thread_stats: BTreeMap<u64, ThreadStats>,
    pub sched_stats: Option<StatsSummary>,
    pub run_stats: Option<StatsSummary>,
    pub wait_stats: Option<StatsSummary>,
}

impl TaskStats {
    pub fn compute(samples: &[TaskSample]) -> Option<Self> {
        let [sched, run, wait] = task_columns(samples);
        Some(Self {
            sched: StatsSummary::compute(&sched)?,
            run: StatsSummary::compute(&run)?,
            wait: StatsSummary::compute(&wait)?,
        })
    }
}

impl ThreadStats {
    pub fn compute(runs: &[u64]) -> Option<Self> {
        Some(Self {
            run: StatsSummary::compute(runs)?,
        })
    }
}

pub fn aggregate_jobs(jobs: &JobTable, groups: &JobGroups) -> JobStats {
    if jobs.is_empty() {
        return JobStats::default();
    }

    let task_stats = groups
        .tasks
        .iter()
        .filter_map(|(id, samples)| TaskStats::compute(samples).map(|s| (*id, s)))
        .collect();

    let thread_stats = groups
        .threads
        .iter()
        .filter_map(|(id, runs)| ThreadStats::compute(runs).map(|s| (*id, s)))
        .collect();

    JobStats {
        task_stats,
        thread_stats,
        sched_stats: StatsSummary::compute(&column(jobs, |j| j.sched_duration)),
        run_stats: StatsSummary::compute(&column(jobs, |j| j.run_duration)),
        wait_stats: StatsSummary::compute(&column(jobs, |j| j.wait_duration)),
    }
}

/// Extract one duration column from the job table.
pub fn column(jobs: &JobTable, f: impl Fn(&JobRecord) -> u64) -> Vec<u64> {
    jobs.iter().map(f).collect()
}

/// Write `<prefix>_mean`, `<prefix>_median`, ... entries into `map`.
fn serialize_prefixed<M: SerializeMap>(
    map: &mut M,
    prefix: &str,
    s: &StatsSummary,
) -> Result<(), M::Error> {
    map.serialize_entry(&format!("{prefix}_mean"), &s.mean)?;
    map.serialize_entry(&format!("{prefix}_median"), &s.median)?;
    map.serialize_entry(&format!("{prefix}_std"), &s.std)?;
    map.serialize_entry(&format!("{prefix}_min"), &s.min)?;
    map.serialize_entry(&format!("{prefix}_max"), &s.max)
}

impl Serialize for TaskStats {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(15))?;
        serialize_prefixed(&mut map, "sched_time", &self.sched)?;
        serialize_prefixed(&mut map, "run_time", &self.run)?;
        serialize_prefixed(&mut map, "wait_time", &self.wait)?;
        map.end()
    }
}

impl Serialize for ThreadStats {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(5))?;
        serialize_prefixed(&mut map, "run_time", &self.run)?;
        map.end()
    }
}
