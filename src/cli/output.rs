//! Output formatting for CLI commands

use crate::pipeline::{ProcessorReport, WindowReport};

/// Print a section header
pub fn print_section(title: &str) {
    println!("\n{}", "=".repeat(60));
    println!("{title}");
    println!("{}", "=".repeat(60));
}

/// Print a subsection header
pub fn print_subsection(title: &str) {
    println!("\n{title}");
    println!("{}", "-".repeat(40));
}

/// Format a number with thousands separators
pub fn format_number(n: usize) -> String {
    let s = n.to_string();
    let mut result = String::new();
    for (i, c) in s.chars().rev().enumerate() {
        if i > 0 && i.is_multiple_of(3) {
            result.insert(0, ',');
        }
        result.insert(0, c);
    }
    result
}

/// Format a rate in [0, 1] as a percentage
pub fn format_rate(rate: f64) -> String {
    format!("{:.1}%", rate * 100.0)
}

/// Print a key-value pair
pub fn print_kv(key: &str, value: &str) {
    println!("  {:20} {}", format!("{}:", key), value);
}

fn window_row(window: &WindowReport) -> String {
    format!(
        "  {:>4}  {:>7}-{:<7}  {:>7} {:>7} {:>7}",
        window.index,
        window.first_episode,
        window.last_episode,
        format_rate(window.win_rate),
        format_rate(window.draw_rate),
        format_rate(window.loss_rate)
    )
}

/// Print totals and the per-window trend of a run
pub fn print_report(report: &ProcessorReport) {
    print_subsection(&format!("Results for {}", report.tracked));
    print_kv("Episodes", &format_number(report.episodes));
    print_kv(
        "Wins",
        &format!("{} ({})", format_number(report.wins), format_rate(report.win_rate)),
    );
    print_kv(
        "Draws",
        &format!("{} ({})", format_number(report.draws), format_rate(report.draw_rate)),
    );
    print_kv(
        "Losses",
        &format!("{} ({})", format_number(report.losses), format_rate(report.loss_rate)),
    );

    if !report.windows.is_empty() {
        print_subsection("Windows");
        println!("  {:>4}  {:^15}  {:>7} {:>7} {:>7}", "#", "episodes", "win", "draw", "loss");
        for window in &report.windows {
            println!("{}", window_row(window));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(0), "0");
        assert_eq!(format_number(999), "999");
        assert_eq!(format_number(1000), "1,000");
        assert_eq!(format_number(1234567), "1,234,567");
    }

    #[test]
    fn test_format_rate() {
        assert_eq!(format_rate(0.5), "50.0%");
        assert_eq!(format_rate(1.0), "100.0%");
    }
}
