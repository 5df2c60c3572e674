use anyhow::{Context, Result};
use owo_colors::OwoColorize;
use std::io::IsTerminal;

use crate::scoring::ScoreResult;

/// The single result line: "Favoritism Score: {F}"
/// The value uses the default `f64` Display (shortest round-trip form).
pub fn format_score_line(score: f64) -> String {
    format!("Favoritism Score: {}", score)
}

/// Check if stdout is a TTY (for auto-detecting color support)
pub fn should_use_colors() -> bool {
    std::io::stdout().is_terminal()
}

/// Format a value in compact notation (1.5k, 2.3M, 847, 0.705)
pub fn format_compact(value: f64) -> String {
    let magnitude = value.abs();
    let formatted = if magnitude >= 1_000_000.0 {
        format!("{:.1}M", value / 1_000_000.0)
    } else if magnitude >= 1_000.0 {
        format!("{:.1}k", value / 1_000.0)
    } else if magnitude >= 100.0 || value == value.trunc() {
        format!("{:.0}", value)
    } else {
        format!("{:.3}", value)
    };

    // Trim trailing .0 (e.g., "1.0k" -> "1k")
    formatted.replace(".0M", "M").replace(".0k", "k")
}

/// Format the score line followed by the per-term breakdown, one line per term:
/// label, term value, running numerator, description.
/// Ends with the denominator.
pub fn format_breakdown(result: &ScoreResult, use_colors: bool) -> String {
    let label_width = result
        .breakdown
        .terms
        .iter()
        .map(|t| t.label.len())
        .max()
        .unwrap_or(0)
        .max("Denominator".len());
    let value_width = 10;
    let running_width = 8;

    let score_line = format_score_line(result.score);
    let mut lines = vec![if use_colors {
        score_line.bold().to_string()
    } else {
        score_line
    }];

    lines.extend(result.breakdown.terms.iter().map(|term| {
        let label = format!("{:<width$}", term.label, width = label_width);
        let value = format!("{:>width$}", format_compact(term.value), width = value_width);
        let running = format!("{:>width$}", format_compact(term.after), width = running_width);
        if use_colors {
            format!(
                "{}  {}  {}  {}",
                label.cyan(),
                value.bold(),
                running.dimmed(),
                term.description.dimmed()
            )
        } else {
            format!("{}  {}  {}  {}", label, value, running, term.description)
        }
    }));

    let denominator_label = format!("{:<width$}", "Denominator", width = label_width);
    let denominator = format!(
        "{:>width$}",
        format_compact(result.denominator),
        width = value_width
    );
    if use_colors {
        lines.push(format!(
            "{}  {}  {}",
            denominator_label.cyan(),
            denominator.bold(),
            "integral of sibling proximity".dimmed()
        ));
    } else {
        lines.push(format!(
            "{}  {}  integral of sibling proximity",
            denominator_label, denominator
        ));
    }

    lines.join("\n")
}

/// Format the full result (score, numerator, denominator, random factor, terms) as JSON
pub fn format_json(result: &ScoreResult) -> Result<String> {
    serde_json::to_string_pretty(result).context("Failed to serialize score as JSON")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::{calculate_score, FavoritismInputs};

    fn sample_result() -> ScoreResult {
        calculate_score(&FavoritismInputs::default(), 1.0).unwrap()
    }

    #[test]
    fn test_format_score_line() {
        assert_eq!(format_score_line(80575561.5), "Favoritism Score: 80575561.5");
        assert_eq!(format_score_line(2.0), "Favoritism Score: 2");
    }

    #[test]
    fn test_format_score_line_uses_display() {
        let result = sample_result();
        let line = format_score_line(result.score);
        assert_eq!(line, format!("Favoritism Score: {}", result.score));
        assert!(line.starts_with("Favoritism Score: 80575561."));
    }

    #[test]
    fn test_format_compact_millions() {
        assert_eq!(format_compact(80_575_561.6), "80.6M");
        assert_eq!(format_compact(2_000_000.0), "2M");
    }

    #[test]
    fn test_format_compact_thousands() {
        assert_eq!(format_compact(2920.0), "2.9k");
        assert_eq!(format_compact(1000.0), "1k");
    }

    #[test]
    fn test_format_compact_small() {
        assert_eq!(format_compact(10.0), "10");
        assert_eq!(format_compact(18.25), "18.250");
        assert_eq!(format_compact(0.7046880897), "0.705");
        assert_eq!(format_compact(847.0), "847");
    }

    #[test]
    fn test_format_breakdown_plain() {
        let output = format_breakdown(&sample_result(), false);
        let lines: Vec<&str> = output.lines().collect();

        // score line + 12 terms + denominator
        assert_eq!(lines.len(), 14);
        assert!(lines[0].starts_with("Favoritism Score: "));
        assert!(lines[1].starts_with("Proximity"));
        assert!(lines[3].contains("det diag(5, 2)"));
        assert!(lines[13].starts_with("Denominator"));
        assert!(!output.contains('\x1b'));
    }

    #[test]
    fn test_format_breakdown_colored() {
        let output = format_breakdown(&sample_result(), true);
        assert!(output.contains('\x1b'));
    }

    #[test]
    fn test_format_json() {
        let json = format_json(&sample_result()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["random_factor"], 1.0);
        assert_eq!(value["breakdown"]["terms"].as_array().unwrap().len(), 12);
        assert_eq!(value["breakdown"]["terms"][2]["label"], "Gift matrix");
        assert!((value["denominator"].as_f64().unwrap() - 47.45).abs() < 1e-4);
    }
}
