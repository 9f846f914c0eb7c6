use anyhow::{bail, Context, Result};
use std::io::Read;
use std::path::PathBuf;
use tracing::info;

use crate::analysis::Analyzer;
use crate::cli::commands::AnalyzerOptions;
use crate::input;
use crate::models::SentimentDistilBertModel;
use crate::pipelines::sentiment_analysis::{
    SentimentAnalysisPipeline, SentimentAnalysisPipelineBuilder,
};
use crate::report;

pub async fn handle_analyze_command(
    texts: Vec<String>,
    file: Option<PathBuf>,
    options: AnalyzerOptions,
    csv: Option<PathBuf>,
    json: Option<PathBuf>,
    pdf: Option<PathBuf>,
) -> Result<()> {
    let texts = gather_texts(texts, file)?;
    if texts.is_empty() {
        bail!("no input texts; pass TEXT arguments, --file, or pipe text on stdin");
    }
    info!(texts = texts.len(), "starting analysis");

    let analyzer = build_analyzer(&options).await?;
    let results = analyzer.batch_analyze(&texts)?;

    report::terminal::print_results(&results);

    if let Some(path) = csv {
        report::csv::write_csv(&path, &results)?;
    }
    if let Some(path) = json {
        report::json::write_json(&path, &results)?;
    }
    if let Some(path) = pdf {
        report::pdf::write_pdf(&path, &results)?;
    }

    Ok(())
}

/// Input precedence: an explicit file wins, then positional arguments, then
/// stdin.
fn gather_texts(args: Vec<String>, file: Option<PathBuf>) -> Result<Vec<String>> {
    if let Some(path) = file {
        return Ok(input::load_texts(&path)?);
    }
    if !args.is_empty() {
        return Ok(args
            .into_iter()
            .map(|text| text.trim().to_string())
            .filter(|text| !text.is_empty())
            .collect());
    }

    let mut raw = String::new();
    std::io::stdin()
        .read_to_string(&mut raw)
        .context("failed to read stdin")?;
    Ok(input::split_lines(&raw))
}

/// Build the analyzer for the requested checkpoint and keyword policy. The
/// model loads through the process-wide cache, so repeated requests reuse
/// the same weights.
pub(crate) async fn build_analyzer(
    options: &AnalyzerOptions,
) -> Result<Analyzer<SentimentAnalysisPipeline<SentimentDistilBertModel>>> {
    let mut builder = SentimentAnalysisPipelineBuilder::distilbert(options.model.into());
    if options.cpu {
        builder = builder.cpu();
    }
    let pipeline = builder.build().await?;
    Ok(Analyzer::new(
        pipeline,
        options.keywords.extractor(options.top_n),
    ))
}
