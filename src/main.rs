use clap::{Parser, Subcommand};
use clap_verbosity_flag::{InfoLevel, Verbosity};
use std::num::NonZeroUsize;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod config;
mod error;
mod log;
mod model;
mod names;
mod pipeline;
mod render;
mod stats;

pub type Result<T> = anyhow::Result<T>;

#[derive(Parser)]
#[command(name = "baltazar-profile-stats")]
#[command(about = "Summarize runtime wave/job profiling logs", long_about = None)]
struct Cli {
    #[command(flatten)]
    verbose: Verbosity<InfoLevel>,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute statistics and render graphs for one profiling log.
    Report {
        /// Profiling log to process.
        #[arg(long)]
        log_file: Option<PathBuf>,

        /// Output folder; graphs go to `<output>/graphs`.
        #[arg(short = 'o', long, default_value = config::DEFAULT_OUTPUT_DIR)]
        output: PathBuf,

        /// Node name mappings (`<task id>:<name>` per line).
        #[arg(long)]
        node_map: Option<PathBuf>,

        /// Histogram bins per column.
        #[arg(long, default_value = "20")]
        bins: NonZeroUsize,

        /// Write the statistics report only.
        #[arg(long)]
        no_graphs: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr; dependencies stay at warn.
    let level = cli.verbose.tracing_level_filter();
    let filter = EnvFilter::new(format!("warn,{}={level}", env!("CARGO_CRATE_NAME")));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let config = report_config(cli.cmd)?;
    let summary = pipeline::run(&config)?;
    println!(
        "Wrote {} ({} graphs)",
        summary.report_path.display(),
        summary.graphs
    );

    Ok(())
}

/// Resolve `report` arguments into run settings.
fn report_config(cmd: Commands) -> Result<config::RunConfig> {
    let Commands::Report {
        log_file,
        output,
        node_map,
        bins,
        no_graphs,
    } = cmd;

    let Some(log_file) = log_file else {
        anyhow::bail!("log file not provided (use --log-file)");
    };

    Ok(config::RunConfig {
        output_dir: output,
        node_map,
        bins: bins.get(),
        graphs: !no_graphs,
        ..config::RunConfig::new(log_file)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn parse(args: &[&str]) -> Commands {
        let argv = std::iter::once("baltazar-profile-stats").chain(args.iter().copied());
        Cli::try_parse_from(argv).unwrap().cmd
    }

    #[test]
    fn missing_log_file_is_an_error() {
        let err = report_config(parse(&["report"])).unwrap_err();
        assert!(err.to_string().contains("log file not provided"));
    }

    #[test]
    fn report_arguments_reach_run_config() {
        let cmd = parse(&[
            "report",
            "--log-file",
            "run.log",
            "-o",
            "out",
            "--node-map",
            "nodes.txt",
            "--bins",
            "5",
            "--no-graphs",
        ]);

        let config = report_config(cmd).unwrap();

        assert_eq!(config.log_file, PathBuf::from("run.log"));
        assert_eq!(config.output_dir, PathBuf::from("out"));
        assert_eq!(config.node_map, Some(PathBuf::from("nodes.txt")));
        assert_eq!(config.bins, 5);
        assert!(!config.graphs);
    }

    #[test]
    fn defaults_apply_without_flags() {
        let config = report_config(parse(&["report", "--log-file", "run.log"])).unwrap();

        assert_eq!(config.output_dir, PathBuf::from(config::DEFAULT_OUTPUT_DIR));
        assert_eq!(config.bins, config::DEFAULT_BINS);
        assert!(config.graphs);
    }

    #[test]
    fn zero_bins_is_rejected_by_the_parser() {
        let argv = ["baltazar-profile-stats", "report", "--log-file", "x", "--bins", "0"];
        assert!(Cli::try_parse_from(argv).is_err());
    }
}
