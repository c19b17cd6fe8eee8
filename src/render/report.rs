use crate::model::AggregateReport;
use anyhow::Context;
use std::fs;
use std::path::Path;

/// Serialize the report as pretty JSON and write it to `path`, replacing any
/// existing file. The document is built fully in memory before the write.
pub fn write_report(report: &AggregateReport, path: &Path) -> anyhow::Result<()> {
    let mut json = serde_json::to_string_pretty(report)?;
    json.push('\n');
    fs::write(path, json).with_context(|| format!("write report {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::log::parse::parse_log_str;
    use crate::model::{AggregateReport, TaskKey, aggregate_jobs, aggregate_waves, group_jobs};
    use pretty_assertions::assert_eq;
    use serde_json::{Value, json};

    #[test]
    fn writes_full_document_and_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("stats.json");
        fs::write(&path, "stale content that is longer than nothing").unwrap();

        let log = parse_log_str("J,1,10,100,5,20,3\nJ,1,11,100,7,25,2\nW,0,50\n", "t").unwrap();
        let groups = group_jobs(&log.jobs);
        let mut report =
            AggregateReport::new(aggregate_jobs(&log.jobs, &groups), aggregate_waves(&log.waves));
        let stats = report.task_stats.remove(&TaskKey::NumericId(1)).unwrap();
        report.task_stats.insert(TaskKey::Name("alpha".into()), stats);

        write_report(&report, &path).unwrap();

        let value: Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(
            value["run_stats"],
            json!({ "mean": 22.5, "median": 22.5, "std": 2.5, "min": 20, "max": 25 })
        );
        assert_eq!(value["task_stats"]["alpha"]["sched_time_max"], 7);
        assert_eq!(value["thread_stats"]["100"]["run_time_min"], 20);
        assert_eq!(value["wave_stats"]["mean"], 50.0);
    }

    #[test]
    fn missing_parent_directory_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("no/such/dir/stats.json");
        assert!(write_report(&AggregateReport::default(), &path).is_err());
    }
}
