use crate::analysis::{Label, ResultSet};
use colored::{ColoredString, Colorize};

const TERMINAL_WIDTH: usize = 100;
const TEXT_COLUMN_WIDTH: usize = 40;
const CHART_WIDTH: usize = 40;

/// Render the dashboard view: results table plus label-distribution chart.
pub fn print_results(results: &ResultSet) {
    print_table(results);
    print_label_chart(results);
    println!();
}

fn print_table(results: &ResultSet) {
    println!("\n{}", "═".repeat(TERMINAL_WIDTH).bright_blue());
    println!("{}", "SENTIMENT ANALYSIS RESULTS".bright_white().bold());
    println!("{}", "═".repeat(TERMINAL_WIDTH).bright_blue());

    println!(
        "{:<4} {:<w$} {:<10} {:>6}  {}",
        "#",
        "Text",
        "Sentiment",
        "Conf",
        "Keywords",
        w = TEXT_COLUMN_WIDTH + 1
    );
    println!("{}", "─".repeat(TERMINAL_WIDTH).bright_black());

    for (index, record) in results.iter().enumerate() {
        println!(
            "{:<4} {:<w$} {:<10} {:>6.2}  {}",
            index + 1,
            truncate(&record.text, TEXT_COLUMN_WIDTH),
            colorize_label(record.sentiment),
            record.confidence,
            record.keywords,
            w = TEXT_COLUMN_WIDTH + 1
        );
    }
}

fn print_label_chart(results: &ResultSet) {
    let counts = results.label_counts();
    if counts.is_empty() {
        return;
    }
    let max = counts.values().copied().max().unwrap_or(1);

    println!("\n{}", "SENTIMENT DISTRIBUTION".bright_white().bold());
    println!("{}", "─".repeat(TERMINAL_WIDTH).bright_black());

    for (label, count) in &counts {
        let bar_len = (count * CHART_WIDTH).div_ceil(max);
        let bar = "█".repeat(bar_len);
        println!("{:<10} {} {}", colorize_label(*label), color_for(*label, &bar), count);
    }
}

fn colorize_label(label: Label) -> ColoredString {
    color_for(label, &label.to_string())
}

fn color_for(label: Label, text: &str) -> ColoredString {
    match label {
        Label::Positive => text.green(),
        Label::Negative => text.red(),
        Label::Neutral => text.yellow(),
    }
}

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        let head: String = text.chars().take(max - 3).collect();
        format!("{head}...")
    }
}
