/// One `W` row: a scheduling round of the profiled runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WaveRecord {
    pub wave_num: u64,
    /// Microseconds.
    pub duration: u64,
}

/// One `J` row: a job dispatched to a worker thread.
///
/// Durations are in microseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JobRecord {
    pub task_id: u64,
    pub job_id: u64,
    pub thread_id: u64,
    pub sched_duration: u64,
    pub run_duration: u64,
    pub wait_duration: u64,
}

/// Wave rows in log order.
pub type WaveTable = Vec<WaveRecord>;

/// Job rows in log order.
pub type JobTable = Vec<JobRecord>;

/// Both tables produced by a single pass over a profiling log.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileLog {
    pub waves: WaveTable,
    pub jobs: JobTable,
}

impl WaveRecord {
    pub const FIELDS: usize = 2;

    pub(crate) fn from_fields(f: &[u64]) -> Self {
        Self {
            wave_num: f[0],
            duration: f[1],
        }
    }
}

impl JobRecord {
    pub const FIELDS: usize = 6;

    pub(crate) fn from_fields(f: &[u64]) -> Self {
        Self {
            task_id: f[0],
            job_id: f[1],
            thread_id: f[2],
            sched_duration: f[3],
            run_duration: f[4],
            wait_duration: f[5],
        }
    }
}
