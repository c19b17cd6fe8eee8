//! One analysis run: parse -> aggregate -> resolve names -> write report ->
//! render graphs.

use crate::Result;
use crate::config::RunConfig;
use crate::log::{ProfileLog, parse_log_file};
use crate::model::{
    AggregateReport, JobGroups, aggregate_jobs, aggregate_waves, column, group_jobs, task_columns,
};
use crate::names::{load_node_map, resolve_task_names};
use crate::render::{GraphSink, SvgDirSink, create_histograms, create_plot, write_report};
use anyhow::Context;
use std::fs;
use std::path::PathBuf;
use tracing::{debug, info};

#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    pub waves: usize,
    pub jobs: usize,
    pub tasks: usize,
    pub threads: usize,
    pub renamed: usize,
    pub report_path: PathBuf,
    pub graphs: usize,
}

#[tracing::instrument(skip_all, fields(log = %config.log_file.display()))]
pub fn run(config: &RunConfig) -> Result<RunSummary> {
    fs::create_dir_all(&config.output_dir).with_context(|| {
        format!("create output directory {}", config.output_dir.display())
    })?;

    let log = parse_log_file(&config.log_file)?;
    info!(waves = log.waves.len(), jobs = log.jobs.len(), "parsed log");

    let groups = group_jobs(&log.jobs);
    let job_stats = aggregate_jobs(&log.jobs, &groups);
    info!(
        tasks = groups.tasks.len(),
        threads = groups.threads.len(),
        "job statistics calculated"
    );

    let mut report = AggregateReport::new(job_stats, aggregate_waves(&log.waves));

    let renamed = match &config.node_map {
        Some(path) => {
            let names = load_node_map(path)?;
            let renamed = resolve_task_names(&mut report, &names);
            info!(entries = names.len(), renamed, "applied node names");
            renamed
        }
        None => 0,
    };

    let report_path = config.report_path();
    write_report(&report, &report_path)?;
    info!(path = %report_path.display(), "statistics written");

    let graphs = if config.graphs {
        let mut sink = SvgDirSink::new(config.graphs_dir())?;
        render_graphs(&log, &groups, config.bins, &mut sink)?;
        info!(
            count = sink.written().len(),
            dir = %config.graphs_dir().display(),
            "graphs written"
        );
        sink.written().len()
    } else {
        0
    };

    Ok(RunSummary {
        waves: log.waves.len(),
        jobs: log.jobs.len(),
        tasks: groups.tasks.len(),
        threads: groups.threads.len(),
        renamed,
        report_path,
        graphs,
    })
}

/// Render every histogram and the wave plot into `sink`. Task and thread
/// graphs are named by numeric id regardless of node-name resolution.
pub fn render_graphs<S: GraphSink + ?Sized>(
    log: &ProfileLog,
    groups: &JobGroups,
    bins: usize,
    sink: &mut S,
) -> Result<usize> {
    let mut rendered = 0;

    for (task_id, samples) in &groups.tasks {
        rendered += create_histograms(
            &task_columns(samples),
            &format!("task_{task_id}"),
            bins,
            sink,
        )?;
    }

    for (thread_id, runs) in &groups.threads {
        rendered += create_histograms(
            std::slice::from_ref(runs),
            &format!("thread_{thread_id}"),
            bins,
            sink,
        )?;
    }

    if log.jobs.is_empty() {
        debug!("no jobs, global job histograms skipped");
    } else {
        let globals = [
            ("sched", column(&log.jobs, |j| j.sched_duration)),
            ("run", column(&log.jobs, |j| j.run_duration)),
            ("wait", column(&log.jobs, |j| j.wait_duration)),
        ];
        for (prefix, values) in globals {
            rendered += create_histograms(&[values], prefix, bins, sink)?;
        }
    }

    if log.waves.is_empty() {
        debug!("no waves, wave graphs skipped");
    } else {
        let wave_nums: Vec<u64> = log.waves.iter().map(|w| w.wave_num).collect();
        let durations: Vec<u64> = log.waves.iter().map(|w| w.duration).collect();
        rendered += create_histograms(std::slice::from_ref(&durations), "wave", bins, sink)?;
        if create_plot(&wave_nums, &durations, "wave", sink)? {
            rendered += 1;
        }
    }

    Ok(rendered)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ProfileError;
    use crate::log::parse::parse_log_str;
    use crate::render::tests::RecordingSink;
    use pretty_assertions::assert_eq;
    use serde_json::{Value, json};
    use std::path::Path;

    const LOG: &str = "\
W, 0, 900
J, 1, 0, 0, 5, 20, 3
J, 1, 1, 1, 7, 25, 2
J, 2, 2, 0, 4, 300, 9
C, 5, 77
W, 1, 850
";

    fn config_in(dir: &Path, log: &str) -> RunConfig {
        let log_file = dir.join("profile.log");
        fs::write(&log_file, log).unwrap();
        RunConfig {
            output_dir: dir.join("out"),
            ..RunConfig::new(log_file)
        }
    }

    fn read_report(path: &Path) -> Value {
        serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
    }

    #[test]
    fn full_run_writes_report_and_graphs() {
        let dir = tempfile::tempdir().unwrap();
        let mut cfg = config_in(dir.path(), LOG);
        let map = dir.path().join("nodes.txt");
        fs::write(&map, "1:decode\n7:unused\n").unwrap();
        cfg.node_map = Some(map);

        let summary = run(&cfg).unwrap();

        assert_eq!(summary.waves, 2);
        assert_eq!(summary.jobs, 3);
        assert_eq!(summary.tasks, 2);
        assert_eq!(summary.threads, 2);
        assert_eq!(summary.renamed, 1);
        // 2 tasks x 3 + 2 threads x 1 + sched/run/wait + wave hist + wave plot
        assert_eq!(summary.graphs, 13);

        let report = read_report(&summary.report_path);
        assert_eq!(report["task_stats"]["decode"]["run_time_mean"], 22.5);
        assert_eq!(report["task_stats"]["2"]["wait_time_max"], 9);
        assert_eq!(report["thread_stats"]["0"]["run_time_max"], 300);
        assert_eq!(report["wave_stats"]["median"], 875.0);

        let graphs = cfg.graphs_dir();
        for name in [
            "task_1_hist_col_0",
            "task_1_hist_col_2",
            "task_2_hist_col_1",
            "thread_1_hist_col_0",
            "sched_hist_col_0",
            "run_hist_col_0",
            "wait_hist_col_0",
            "wave_hist_col_0",
            "wave_plot",
        ] {
            assert!(graphs.join(format!("{name}.svg")).is_file(), "{name}");
        }
    }

    #[test]
    fn empty_log_writes_empty_sections_and_no_graphs() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = config_in(dir.path(), "C, 1, 2\n\n");

        let summary = run(&cfg).unwrap();

        assert_eq!(summary.graphs, 0);
        assert_eq!(
            read_report(&summary.report_path),
            json!({
                "task_stats": {},
                "thread_stats": {},
                "sched_stats": {},
                "run_stats": {},
                "wait_stats": {},
                "wave_stats": {},
            })
        );
    }

    #[test]
    fn waves_only_log_renders_wave_graphs() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = config_in(dir.path(), "W,0,10\nW,1,10\n");

        let summary = run(&cfg).unwrap();

        assert_eq!(summary.graphs, 2);
        let report = read_report(&summary.report_path);
        assert_eq!(report["wave_stats"]["std"], 0.0);
        assert_eq!(report["run_stats"], json!({}));
    }

    #[test]
    fn graphs_can_be_disabled() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = RunConfig {
            graphs: false,
            ..config_in(dir.path(), LOG)
        };

        let summary = run(&cfg).unwrap();

        assert_eq!(summary.graphs, 0);
        assert!(!cfg.graphs_dir().exists());
        assert!(summary.report_path.is_file());
    }

    #[test]
    fn malformed_log_aborts_before_report() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = config_in(dir.path(), "W,0,10\nJ,1,2,3,x,5,6\n");

        let err = run(&cfg).unwrap_err();

        assert!(matches!(
            err.downcast_ref::<ProfileError>(),
            Some(ProfileError::Parse { line: 2, .. })
        ));
        assert!(!cfg.report_path().exists());
    }

    #[test]
    fn missing_log_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = RunConfig {
            output_dir: dir.path().join("out"),
            ..RunConfig::new(dir.path().join("absent.log"))
        };

        let err = run(&cfg).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ProfileError>(),
            Some(ProfileError::Io { .. })
        ));
    }

    #[test]
    fn render_graphs_names_artifacts_by_numeric_id() {
        let log = parse_log_str(LOG, "t").unwrap();
        let groups = group_jobs(&log.jobs);
        let mut sink = RecordingSink::default();

        let n = render_graphs(&log, &groups, 20, &mut sink).unwrap();

        assert_eq!(n, 13);
        assert_eq!(
            sink.names(),
            vec![
                "task_1_hist_col_0",
                "task_1_hist_col_1",
                "task_1_hist_col_2",
                "task_2_hist_col_0",
                "task_2_hist_col_1",
                "task_2_hist_col_2",
                "thread_0_hist_col_0",
                "thread_1_hist_col_0",
                "sched_hist_col_0",
                "run_hist_col_0",
                "wait_hist_col_0",
                "wave_hist_col_0",
                "wave_plot",
            ]
        );
        assert_eq!(sink.plots[0].1, vec![0, 1]);
        assert_eq!(sink.plots[0].2, vec![900, 850]);
    }
}
