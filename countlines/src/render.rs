//! Terminal rendering for the count command

use console::Style;
use countlineslib::{CountReport, ExclusionSet};

/// Output format for the count command
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Human readable report
    #[default]
    Text,
    /// Pretty-printed JSON report, without the progress preamble
    Json,
}

fn heading_style() -> Style {
    Style::new().bold()
}

fn label_style() -> Style {
    Style::new().cyan()
}

/// Lines printed before the traversal starts.
pub fn render_preamble(target: &str, excludes: &ExclusionSet) -> String {
    let label = label_style();
    let mut out = format!("{} {}\n", label.apply_to("Counting lines in:"), target);

    if !excludes.is_empty() {
        let patterns: Vec<&str> = excludes.iter().collect();
        out.push_str(&format!(
            "{} {}\n",
            label.apply_to("Excluding patterns:"),
            patterns.join(", ")
        ));
    }

    out.push_str("Processing...\n");
    out
}

/// The final report, preceded by a blank line.
///
/// The header and the breakdown title are emphasized when the terminal
/// supports it; the text is otherwise identical to the report's `Display`.
pub fn render_report(report: &CountReport) -> String {
    let heading = heading_style();
    let mut out = String::from("\n");

    for line in report.to_string().lines() {
        if line.starts_with("===") || line == "Breakdown:" {
            out.push_str(&heading.apply_to(line).to_string());
        } else {
            out.push_str(line);
        }
        out.push('\n');
    }

    out
}

/// Render a report in the requested format.
pub fn render_count(report: &CountReport, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Text => Ok(render_report(report)),
        OutputFormat::Json => Ok(format!("{}\n", report.to_json_pretty()?)),
    }
}
