//! ASCII report rendering for benchmark results.

use std::fmt::Write as _;
use std::time::Duration;
use sysinfo::System;

use crate::runner::BenchmarkReport;

/// Maximum bar width in characters.
const BAR_WIDTH: usize = 60;

/// Formats a number with comma separators for readability.
pub fn format_with_commas(n: f64) -> String {
    let s = format!("{:.0}", n);
    let digits: Vec<char> = s.chars().collect();
    let mut result = String::new();
    let len = digits.len();
    for (i, c) in digits.iter().enumerate() {
        if i > 0 && c.is_ascii_digit() && (len - i) % 3 == 0 {
            result.push(',');
        }
        result.push(*c);
    }
    result
}

/// Scales `values` so the largest maps to `width` characters.
///
/// An all-zero column renders empty bars rather than dividing by zero.
fn normalize(values: &[f64], width: usize) -> Vec<usize> {
    let max = values.iter().cloned().fold(0.0f64, f64::max);
    if max <= 0.0 {
        return vec![0; values.len()];
    }
    values
        .iter()
        .map(|v| ((v / max) * width as f64).round() as usize)
        .collect()
}

/// One chart comparing two series over shared labels.
///
/// Both series are normalized to the same scale, so bar lengths are
/// comparable across them; `fmt` renders the raw value printed after each
/// bar.
pub fn bar_chart(
    title: &str,
    labels: &[String],
    series_a: (&str, &[f64]),
    series_b: (&str, &[f64]),
    fmt: impl Fn(f64) -> String,
) -> String {
    let (name_a, values_a) = series_a;
    let (name_b, values_b) = series_b;
    debug_assert_eq!(values_a.len(), labels.len());
    debug_assert_eq!(values_b.len(), labels.len());

    let mut out = String::new();
    let _ = writeln!(
        out,
        "{} {} {}",
        "-".repeat(10),
        title.to_uppercase(),
        "-".repeat(10)
    );
    let _ = writeln!(out, "  legend: {name_a} = '#'  {name_b} = '*'");

    let mut combined: Vec<f64> = values_a.to_vec();
    combined.extend_from_slice(values_b);
    let scaled = normalize(&combined, BAR_WIDTH);
    let (scaled_a, scaled_b) = scaled.split_at(values_a.len());

    let label_width = labels.iter().map(|l| l.len()).max().unwrap_or(0);
    let name_width = name_a.len().max(name_b.len());

    for i in 0..labels.len() {
        let _ = writeln!(out);
        let _ = writeln!(
            out,
            "{:label_width$} | {:name_width$}: [{}] {}",
            labels[i],
            name_a,
            "#".repeat(scaled_a[i]),
            fmt(values_a[i]),
        );
        let _ = writeln!(
            out,
            "{:label_width$} | {:name_width$}: [{}] {}",
            "",
            name_b,
            "*".repeat(scaled_b[i]),
            fmt(values_b[i]),
        );
    }
    out
}

/// One-line description of the machine the run executed on, so reports
/// from different hosts are comparable.
pub fn system_context() -> String {
    let sys = System::new_all();
    let gib = sys.total_memory() as f64 / (1024.0 * 1024.0 * 1024.0);
    format!("{} cpus, {:.1} GiB memory", sys.cpus().len(), gib)
}

/// Renders the full three-chart comparison for a report.
pub fn render_report(report: &BenchmarkReport) -> String {
    let labels: Vec<String> = report
        .sizes
        .iter()
        .map(|s| format!("n={}", format_with_commas(*s as f64)))
        .collect();

    let mut out = String::new();
    let _ = writeln!(out, "=== Strata index comparison ===");
    let _ = writeln!(out, "host: {}", system_context());
    let _ = writeln!(out, "searches per size: {}", report.searches_per_size);
    let _ = writeln!(out);

    out.push_str(&bar_chart(
        "index build time",
        &labels,
        ("RMI", &secs(&report.rmi.build_times)),
        ("B-Tree", &secs(&report.btree.build_times)),
        |v| format!("{v:.6} s"),
    ));
    let _ = writeln!(out);
    out.push_str(&bar_chart(
        "mean search time",
        &labels,
        ("RMI", &secs(&report.rmi.mean_search_times)),
        ("B-Tree", &secs(&report.btree.mean_search_times)),
        |v| format!("{v:.9} s"),
    ));
    let _ = writeln!(out);
    out.push_str(&bar_chart(
        "estimated memory",
        &labels,
        ("RMI", &units(&report.rmi.memory_units)),
        ("B-Tree", &units(&report.btree.memory_units)),
        |v| format!("{} units", format_with_commas(v)),
    ));
    out
}

fn secs(durations: &[Duration]) -> Vec<f64> {
    durations.iter().map(|d| d.as_secs_f64()).collect()
}

fn units(counts: &[usize]) -> Vec<f64> {
    counts.iter().map(|&u| u as f64).collect()
}
