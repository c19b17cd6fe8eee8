//! Aggregation model: group job rows and summarize durations into a report.

pub mod group;
pub mod jobs;
pub mod waves;

pub use group::{JobGroups, group_jobs, task_columns};
pub use jobs::{JobStats, TaskStats, ThreadStats, aggregate_jobs, column};
pub use waves::aggregate_waves;

use crate::stats::StatsSummary;
use serde::Serialize;
use serde::ser::{SerializeMap, Serializer};
use std::collections::BTreeMap;
use std::fmt;

/// Key of a `task_stats` entry: the numeric task id, or the node name it was
/// resolved to.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TaskKey {
    NumericId(u64),
    Name(String),
}

impl fmt::Display for TaskKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TaskKey::NumericId(id) => write!(f, "{id}"),
            TaskKey::Name(name) => f.write_str(name),
        }
    }
}

impl Serialize for TaskKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            TaskKey::NumericId(id) => serializer.serialize_u64(*id),
            TaskKey::Name(name) => serializer.serialize_str(name),
        }
    }
}

/// Final statistics document. Absent global sections serialize as `{}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AggregateReport {
    pub task_stats: BTreeMap<TaskKey, TaskStats>,
    pub thread_stats: BTreeMap<u64, ThreadStats>,
    #[serde(serialize_with = "section")]
    pub sched_stats: Option<StatsSummary>,
    #[serde(serialize_with = "section")]
    pub run_stats: Option<StatsSummary>,
    #[serde(serialize_with = "section")]
    pub wait_stats: Option<StatsSummary>,
    #[serde(serialize_with = "section")]
    pub wave_stats: Option<StatsSummary>,
}

impl AggregateReport {
    pub fn new(jobs: JobStats, wave_stats: Option<StatsSummary>) -> Self {
        Self {
            task_stats: jobs
                .task_stats
                .into_iter()
                .map(|(id, s)| (TaskKey::NumericId(id), s))
                .collect(),
            thread_stats: jobs.thread_stats,
            sched_stats: jobs.sched_stats,
            run_stats: jobs.run_stats,
            wait_stats: jobs.wait_stats,
            wave_stats,
        }
    }
}

fn section<S: Serializer>(value: &Option<StatsSummary>, serializer: S) -> Result<S::Ok, S::Error> {
    match value {
        Some(s) => s.serialize(serializer),
        None => serializer.serialize_map(Some(0))?.end(),
    }
}
