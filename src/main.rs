use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use std::time::Instant;

use symxref::core::graph::most_referenced;
use symxref::core::{AnalysisConfig, CouplingGraphBuilder, ProjectAnalyzer};
use symxref::formatters::{JsonArtifactWriter, MarkdownReportFormatter};
use symxref::logging;

#[derive(Debug, Clone, Parser)]
#[command(
    name = "symxref",
    version,
    author = "symxref developers",
    about = "Project-wide symbol cross-reference extractor"
)]
struct Cli {
    /// Root directory of the source tree to analyze
    #[arg(short, long, value_name = "PATH")]
    input: PathBuf,

    /// Directory receiving the JSON artifacts
    #[arg(short, long, value_name = "DIR", default_value = "symxref-out")]
    output: PathBuf,

    /// Language of the source tree
    #[arg(short, long, value_name = "LANG", default_value = "python")]
    language: String,

    /// Extra comma-separated source extensions to parse
    #[arg(long, value_name = "EXTS", value_delimiter = ',')]
    extensions: Vec<String>,

    /// Emit minified JSON instead of pretty-printed JSON
    #[arg(long)]
    compact: bool,

    /// Also write a Markdown coupling report to this file
    #[arg(short, long, value_name = "FILE")]
    report: Option<PathBuf>,

    /// Parse files on a single thread
    #[arg(long)]
    sequential: bool,

    /// Default log level when RUST_LOG is unset
    #[arg(long, value_name = "LEVEL", default_value = "info")]
    log_level: String,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(&cli.log_level);
    run(cli)
}

fn run(cli: Cli) -> Result<()> {
    let Cli {
        input,
        output,
        language,
        extensions,
        compact,
        report,
        sequential,
        log_level: _,
    } = cli;

    let start_time = Instant::now();

    let mut config = AnalysisConfig::for_language(language.trim()).with_parallel(!sequential);
    if !extensions.is_empty() {
        let suffixes: Vec<String> = config
            .source_suffixes
            .iter()
            .cloned()
            .chain(extensions)
            .collect();
        config = config.with_source_suffixes(suffixes);
    }

    println!("SYMXREF - Symbol Cross-Reference");
    println!("Input: {}", input.display());
    println!("Output: {}", output.display());
    println!("Language: {}", config.language);

    let analyzer = ProjectAnalyzer::new(config)?;
    let analysis = analyzer.analyze(&input)?;

    let writer = if compact {
        JsonArtifactWriter::compact()
    } else {
        JsonArtifactWriter::new()
    };
    let paths = writer.write_all(&analysis, &output)?;
    for path in paths.all() {
        println!(" - {}", path.display());
    }

    if let Some(report_path) = report {
        MarkdownReportFormatter::new().format_to_file(&analysis, &report_path)?;
        println!("Report: {}", report_path.display());
    }

    let graph = CouplingGraphBuilder::from_edges(&analysis.cross_reference);
    println!(
        "Files: {} parsed, Symbols: {} defined, Edges: {}",
        analysis.reference_map.len(),
        analysis.origin_map.len(),
        analysis.cross_reference.len()
    );
    if let Some((file, callers)) = most_referenced(&graph, 1).into_iter().next() {
        println!("Most referenced: {} ({} files)", file, callers);
    }
    println!(
        "Total execution time: {:.2}s",
        start_time.elapsed().as_secs_f64()
    );

    Ok(())
}
