use chrono::Duration;
use owo_colors::OwoColorize;
use std::io::IsTerminal;
use terminal_size::{terminal_size, Width};

use crate::scoring::{contributions, EvaluationInput, EvaluationResult, SeverityClass};
use crate::store::EvaluationRecord;

/// Check if stdout is a TTY (for auto-detecting color support)
pub fn should_use_colors() -> bool {
    std::io::stdout().is_terminal()
}

/// Format a severity class, colored by traffic light: 1-2 green, 3 yellow, 4-5 red
pub fn format_severity(class: SeverityClass, use_colors: bool) -> String {
    let text = class.to_string();
    if !use_colors {
        return text;
    }
    match class.value() {
        1 | 2 => text.green().bold().to_string(),
        3 => text.yellow().bold().to_string(),
        _ => text.red().bold().to_string(),
    }
}

/// Format the score breakdown as one line per dimension, followed by the
/// total and class
pub fn format_breakdown(
    input: &EvaluationInput,
    result: &EvaluationResult,
    use_colors: bool,
) -> String {
    let label_width = 13;
    let mut lines: Vec<String> = contributions(input)
        .iter()
        .map(|c| {
            let label = format!("{:<width$}", c.dimension.label(), width = label_width);
            let score = format!("{:>2}", c.score);
            if use_colors {
                format!("  {} {}  {}", label, score.bold(), c.description.dimmed())
            } else {
                format!("  {} {}  {}", label, score, c.description)
            }
        })
        .collect();

    lines.push(format!("  {:<width$} {:>2}", "Total", result.total, width = label_width));
    lines.push(format!(
        "  {:<width$} {}",
        "Severity",
        format_severity(result.severity_class, use_colors),
        width = label_width
    ));
    lines.join("\n")
}

/// Format a stored evaluation with detailed multi-line output
pub fn format_record_detail(record: &EvaluationRecord, use_colors: bool) -> String {
    let header = format!("Evaluation #{} ({})", record.id, record.conveyor_label());
    let header = if use_colors {
        header.bold().to_string()
    } else {
        header
    };

    let mut lines = vec![
        header,
        format!(
            "  Recorded: {} ({} ago)",
            record.created_at.format("%Y-%m-%d %H:%M UTC"),
            format_age(record.age())
        ),
        format!("  Width: {}", record.entered.width),
        format!("  Speed: {}", record.entered.speed),
    ];
    if let Some(ref notes) = record.notes {
        lines.push(format!("  Notes: {}", notes));
    }
    lines.push(String::new());
    lines.push(format_breakdown(&record.input, &record.result, use_colors));
    lines.join("\n")
}

/// Get terminal width, defaulting to None for pipes (unlimited)
fn get_terminal_width() -> Option<usize> {
    terminal_size().map(|(Width(w), _)| w as usize)
}

/// Truncate text to fit available width, accounting for Unicode
fn truncate(text: &str, max_width: usize) -> String {
    let chars: Vec<char> = text.chars().collect();
    if chars.len() <= max_width {
        text.to_string()
    } else if max_width > 3 {
        format!("{}...", chars[..max_width - 3].iter().collect::<String>())
    } else {
        chars[..max_width].iter().collect()
    }
}

/// Format records as a table with columns: Id, Class, Total, Age, Conveyor
/// No headers. Id column is right-aligned with a trailing dot.
pub fn format_record_table(records: &[&EvaluationRecord], use_colors: bool) -> String {
    if records.is_empty() {
        return "No evaluations found.".to_string();
    }

    let term_width = get_terminal_width();

    // Id: 4 + 1, Class: 7 + 2, Total: 3 + 2, Age: 4 + 2
    let fixed_width = 5 + 9 + 5 + 6;

    records
        .iter()
        .map(|record| {
            let id_str = format!("{:>3}.", record.id);
            let total_str = format!("{:>3}", record.result.total);
            let age_str = format!("{:>4}", format_age(record.age()));

            let conveyor = match term_width {
                Some(width) if width > fixed_width + 10 => {
                    truncate(record.conveyor_label(), width - fixed_width)
                }
                // Very narrow terminal, show truncated
                Some(_) => truncate(record.conveyor_label(), 10),
                // No terminal (pipe), don't truncate
                None => record.conveyor_label().to_string(),
            };

            if use_colors {
                format!(
                    "{} {}  {}  {}  {}",
                    id_str.dimmed(),
                    format_severity(record.result.severity_class, true),
                    total_str.bold(),
                    age_str.dimmed(),
                    conveyor
                )
            } else {
                format!(
                    "{} {}  {}  {}  {}",
                    id_str,
                    record.result.severity_class,
                    total_str,
                    age_str,
                    conveyor
                )
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Format records as tab-separated values for scripting
/// Columns: id, total, class, conveyor, created_at (no headers, no colors)
pub fn format_tsv(records: &[&EvaluationRecord]) -> String {
    records
        .iter()
        .map(|record| {
            format!(
                "{}\t{}\t{}\t{}\t{}",
                record.id,
                record.result.total,
                record.result.severity_class.value(),
                record.conveyor.as_deref().unwrap_or(""),
                record.created_at.to_rfc3339()
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Format a duration into a human-readable age string
/// "2h" for hours, "3d" for days, "1w" for weeks
pub fn format_age(duration: Duration) -> String {
    let hours = duration.num_hours();
    let days = duration.num_days();
    let weeks = days / 7;

    if weeks >= 1 {
        format!("{}w", weeks)
    } else if days >= 1 {
        format!("{}d", days)
    } else if hours >= 1 {
        format!("{}h", hours)
    } else {
        let minutes = duration.num_minutes();
        if minutes >= 1 {
            format!("{}m", minutes)
        } else {
            "now".to_string()
        }
    }
}
