use anyhow::Result;
use colored::Colorize;
use std::io::{BufRead, Write};

use super::analyze::build_analyzer;
use crate::analysis::{Analyzer, SentimentClassifier};
use crate::cli::commands::AnalyzerOptions;
use crate::report;

/// Interactive dashboard loop: read one block of texts per request, analyze
/// it, render the results, and wait for the next block. A failed request is
/// reported and the session keeps accepting input.
pub async fn handle_interactive_command(options: AnalyzerOptions) -> Result<()> {
    let analyzer = build_analyzer(&options).await?;

    println!("Enter texts, one per line. A blank line runs the analysis; Ctrl-D exits.");

    let stdin = std::io::stdin();
    let mut lines = stdin.lock();
    let mut block: Vec<String> = Vec::new();
    let mut line = String::new();

    loop {
        print!("> ");
        std::io::stdout().flush()?;

        line.clear();
        if lines.read_line(&mut line)? == 0 {
            if !block.is_empty() {
                run_request(&analyzer, &block);
            }
            break;
        }

        let trimmed = line.trim();
        if trimmed.is_empty() {
            if !block.is_empty() {
                let request = std::mem::take(&mut block);
                run_request(&analyzer, &request);
            }
        } else {
            block.push(trimmed.to_string());
        }
    }

    Ok(())
}

fn run_request<C: SentimentClassifier>(analyzer: &Analyzer<C>, texts: &[String]) {
    match analyzer.batch_analyze(texts) {
        Ok(results) => report::terminal::print_results(&results),
        // This request failed; the session stays usable for the next one.
        Err(error) => eprintln!("{} {error:#}", "analysis failed:".red()),
    }
}
