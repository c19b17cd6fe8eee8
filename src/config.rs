use std::path::PathBuf;

pub const DEFAULT_OUTPUT_DIR: &str = "temp/";
pub const DEFAULT_BINS: usize = 20;

const REPORT_FILE: &str = "stats.json";
const GRAPHS_DIR: &str = "graphs";

/// Resolved settings for one analysis run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    pub log_file: PathBuf,
    pub output_dir: PathBuf,
    pub node_map: Option<PathBuf>,
    /// Histogram bins per column.
    pub bins: usize,
    /// Render histogram and plot images.
    pub graphs: bool,
}

impl RunConfig {
    pub fn new(log_file: impl Into<PathBuf>) -> Self {
        Self {
            log_file: log_file.into(),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            node_map: None,
            bins: DEFAULT_BINS,
            graphs: true,
        }
    }

    pub fn report_path(&self) -> PathBuf {
        self.output_dir.join(REPORT_FILE)
    }

    pub fn graphs_dir(&self) -> PathBuf {
        self.output_dir.join(GRAPHS_DIR)
    }
}
