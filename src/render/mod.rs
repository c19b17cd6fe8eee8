//! Rendering sinks: histogram/plot images and the statistics report.

pub mod histogram;
pub mod report;
pub mod svg;

pub use histogram::Histogram;
pub use report::write_report;

use anyhow::{Context, bail};
use std::fs;
use std::path::PathBuf;

/// Destination for rendered graphs. `name` is the artifact identifier
/// (`{prefix}_hist_col_{i}` or `{prefix}_plot`); the sink picks the format.
pub trait GraphSink {
    fn histogram(&mut self, name: &str, column: usize, hist: &Histogram) -> anyhow::Result<()>;
    fn line_plot(&mut self, name: &str, xs: &[u64], ys: &[u64]) -> anyhow::Result<()>;
}

/// Writes one SVG file per artifact into a directory.
#[derive(Debug)]
pub struct SvgDirSink {
    dir: PathBuf,
    written: Vec<PathBuf>,
}

impl SvgDirSink {
    /// Creates `dir` (and parents) if missing.
    pub fn new(dir: impl Into<PathBuf>) -> anyhow::Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)
            .with_context(|| format!("create graphs directory {}", dir.display()))?;
        Ok(Self {
            dir,
            written: Vec::new(),
        })
    }

    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }

    fn write(&mut self, name: &str, svg: String) -> anyhow::Result<()> {
        let path = self.dir.join(format!("{name}.svg"));
        fs::write(&path, svg).with_context(|| format!("write graph {}", path.display()))?;
        self.written.push(path);
        Ok(())
    }
}

impl GraphSink for SvgDirSink {
    fn histogram(&mut self, name: &str, column: usize, hist: &Histogram) -> anyhow::Result<()> {
        let svg = svg::histogram_svg(&format!("Histogram of column {column}"), hist)?;
        self.write(name, svg)
    }

    fn line_plot(&mut self, name: &str, xs: &[u64], ys: &[u64]) -> anyhow::Result<()> {
        let svg = svg::line_plot_svg(xs, ys)?;
        self.write(name, svg)
    }
}

/// Render one histogram per column as `{prefix}_hist_col_{i}`.
///
/// Empty columns are skipped. Returns the number of histograms rendered.
pub fn create_histograms<S: GraphSink + ?Sized>(
    columns: &[Vec<u64>],
    prefix: &str,
    bins: usize,
    sink: &mut S,
) -> anyhow::Result<usize> {
    let mut rendered = 0;
    for (i, col) in columns.iter().enumerate() {
        let name = format!("{prefix}_hist_col_{i}");
        match Histogram::from_values(col, bins) {
            Some(hist) => {
                tracing::trace!(%name, total = hist.total(), populated = hist.populated(), "histogram");
                sink.histogram(&name, i, &hist)?;
                rendered += 1;
            }
            None => tracing::debug!(%name, "empty column, histogram skipped"),
        }
    }
    Ok(rendered)
}

/// Render `ys` against `xs` as `{prefix}_plot`. Returns false (and renders
/// nothing) when there are no points.
pub fn create_plot<S: GraphSink + ?Sized>(
    xs: &[u64],
    ys: &[u64],
    prefix: &str,
    sink: &mut S,
) -> anyhow::Result<bool> {
    if xs.len() != ys.len() {
        bail!(
            "plot {}: x has {} points but y has {}",
            prefix,
            xs.len(),
            ys.len()
        );
    }
    let name = format!("{prefix}_plot");
    if xs.is_empty() {
        tracing::debug!(%name, "no points, plot skipped");
        return Ok(false);
    }
    sink.line_plot(&name, xs, ys)?;
    Ok(true)
}
