//! Output Formatting
//!
//! Human-readable rendering of a [`ComparisonReport`]: a banner, then one
//! block per function in comparison order with mean/median/std/min/max at
//! four decimal places, then the fastest function.

use crate::error::HarnessError;
use crate::result::ComparisonReport;

const RULE_WIDTH: usize = 70;

/// Render a comparison report as log lines.
///
/// Fails on an empty report, which has no fastest entry.
pub fn format_results(report: &ComparisonReport) -> Result<Vec<String>, HarnessError> {
    let Some((fastest, fastest_result)) = report.fastest() else {
        return Err(HarnessError::InvalidArgument(
            "cannot print an empty comparison report".to_string(),
        ));
    };

    let rule = "=".repeat(RULE_WIDTH);
    let mut lines = vec![rule.clone(), "PERFORMANCE COMPARISON".to_string(), rule];

    for (name, stats) in report.iter() {
        lines.push(format!("{name}:"));
        lines.push(format!("  Mean:   {:>10.4} ms", stats.mean_ms));
        lines.push(format!("  Median: {:>10.4} ms", stats.median_ms));
        lines.push(format!("  Std:    {:>10.4} ms", stats.std_ms));
        lines.push(format!("  Min:    {:>10.4} ms", stats.min_ms));
        lines.push(format!("  Max:    {:>10.4} ms", stats.max_ms));
    }

    lines.push(format!(
        "Fastest: {} ({:.4} ms)",
        fastest, fastest_result.mean_ms
    ));
    Ok(lines)
}
