use crate::render::histogram::Histogram;
use std::fmt::Write;

const WIDTH: f64 = 600.0;
const HEIGHT: f64 = 400.0;
const LEFT: f64 = 70.0;
const RIGHT: f64 = 20.0;
const TOP: f64 = 40.0;
const BOTTOM: f64 = 50.0;

const PLOT_W: f64 = WIDTH - LEFT - RIGHT;
const PLOT_H: f64 = HEIGHT - TOP - BOTTOM;

/// Frame shared by every chart. Placeholders are substituted with `replace`
/// rather than `format!` so the CSS braces need no escaping.
const TEMPLATE: &str = r#"<svg xmlns="http://www.w3.org/2000/svg" width="600" height="400" viewBox="0 0 600 400">
<style>
  text { font-family: system-ui, -apple-system, Segoe UI, Roboto, Arial, sans-serif; font-size: 12px; fill: #333; }
  .title { font-size: 14px; font-weight: 600; }
  .axis { stroke: #333; stroke-width: 1; }
  .grid { stroke: #ddd; stroke-width: 1; }
  .bar { fill: #4c78a8; stroke: black; stroke-width: 1; }
  .line { fill: none; stroke: #4c78a8; stroke-width: 1.5; }
</style>
<rect width="600" height="400" fill="white"/>
<text class="title" x="300" y="24" text-anchor="middle">__TITLE__</text>
__BODY__
<line class="axis" x1="70" y1="350" x2="580" y2="350"/>
<line class="axis" x1="70" y1="40" x2="70" y2="350"/>
<text x="325" y="390" text-anchor="middle">__XLABEL__</text>
<text x="18" y="195" text-anchor="middle" transform="rotate(-90 18 195)">__YLABEL__</text>
</svg>
"#;

fn frame(title: &str, xlabel: &str, ylabel: &str, body: &str) -> String {
    TEMPLATE
        .replace("__TITLE__", &escape_xml(title))
        .replace("__XLABEL__", &escape_xml(xlabel))
        .replace("__YLABEL__", &escape_xml(ylabel))
        .replace("__BODY__", body)
}

fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Map `v` from [lo, hi] onto [0, len]; a zero-width range maps to the middle.
fn scale(v: f64, lo: f64, hi: f64, len: f64) -> f64 {
    if hi > lo {
        (v - lo) / (hi - lo) * len
    } else {
        len / 2.0
    }
}

fn fmt_tick(v: f64) -> String {
    if v.fract() == 0.0 {
        format!("{v:.0}")
    } else {
        format!("{v:.1}")
    }
}

pub fn histogram_svg(title: &str, hist: &Histogram) -> anyhow::Result<String> {
    let mut body = String::new();
    let bar_w = PLOT_W / hist.bins() as f64;
    let max_count = hist.max_count().max(1) as f64;

    for (i, &count) in hist.counts.iter().enumerate() {
        if count == 0 {
            continue;
        }
        let h = count as f64 / max_count * PLOT_H;
        let x = LEFT + i as f64 * bar_w;
        let y = TOP + PLOT_H - h;
        writeln!(
            body,
            r#"<rect class="bar" x="{x:.2}" y="{y:.2}" width="{bar_w:.2}" height="{h:.2}"><title>{count}</title></rect>"#
        )?;
    }

    let base = TOP + PLOT_H;
    writeln!(
        body,
        r#"<text x="{LEFT}" y="{}" text-anchor="middle">{}</text>"#,
        base + 16.0,
        fmt_tick(hist.lo)
    )?;
    writeln!(
        body,
        r#"<text x="{}" y="{}" text-anchor="middle">{}</text>"#,
        LEFT + PLOT_W,
        base + 16.0,
        fmt_tick(hist.hi)
    )?;
    writeln!(
        body,
        r#"<text x="{}" y="{TOP}" text-anchor="end">{}</text>"#,
        LEFT - 6.0,
        hist.max_count()
    )?;
    writeln!(
        body,
        r#"<text x="{}" y="{base}" text-anchor="end">0</text>"#,
        LEFT - 6.0
    )?;

    Ok(frame(title, "Duration[microseconds]", "Frequency", &body))
}

pub fn line_plot_svg(xs: &[u64], ys: &[u64]) -> anyhow::Result<String> {
    let mut body = String::new();

    let (x_lo, x_hi) = bounds(xs);
    let (y_lo, y_hi) = bounds(ys);

    const GRID_LINES: usize = 5;
    for i in 0..=GRID_LINES {
        let y = TOP + PLOT_H * i as f64 / GRID_LINES as f64;
        let value = y_hi - (y_hi - y_lo) * i as f64 / GRID_LINES as f64;
        writeln!(
            body,
            r#"<line class="grid" x1="{LEFT}" y1="{y:.2}" x2="{}" y2="{y:.2}"/>"#,
            LEFT + PLOT_W
        )?;
        writeln!(
            body,
            r#"<text x="{}" y="{:.2}" text-anchor="end">{}</text>"#,
            LEFT - 6.0,
            y + 4.0,
            fmt_tick(value)
        )?;
    }

    let mut points = String::new();
    for (&x, &y) in xs.iter().zip(ys) {
        let px = LEFT + scale(x as f64, x_lo, x_hi, PLOT_W);
        let py = TOP + PLOT_H - scale(y as f64, y_lo, y_hi, PLOT_H);
        write!(points, "{px:.2},{py:.2} ")?;
    }
    writeln!(
        body,
        r#"<polyline class="line" points="{}"/>"#,
        points.trim_end()
    )?;

    let base = TOP + PLOT_H;
    writeln!(
        body,
        r#"<text x="{LEFT}" y="{}" text-anchor="middle">{}</text>"#,
        base + 16.0,
        fmt_tick(x_lo)
    )?;
    writeln!(
        body,
        r#"<text x="{}" y="{}" text-anchor="middle">{}</text>"#,
        LEFT + PLOT_W,
        base + 16.0,
        fmt_tick(x_hi)
    )?;

    Ok(frame("", "iteration", "wave duration[microseconds]", &body))
}

fn bounds(values: &[u64]) -> (f64, f64) {
    let lo = values.iter().copied().min().unwrap_or(0);
    let hi = values.iter().copied().max().unwrap_or(0);
    (lo as f64, hi as f64)
}
