use anyhow::{Context, Result};
use clap::Parser;
use nutrition_label::config::{AnalyzerConfig, LogFormat};
use nutrition_label::observability::init_tracing;
use nutrition_label::text_source::{FileTextSource, ReaderTextSource, TextSource};
use nutrition_label::{LabelAnalysis, LabelAnalyzer};
use std::path::PathBuf;
use tracing::info;

#[derive(Parser, Debug)]
#[command(
    name = "nutrition-label",
    version,
    about = "Analyze OCR text from a food nutrition label"
)]
struct Cli {
    #[arg(help = "OCR transcript file (reads stdin when absent or '-')")]
    input: Option<PathBuf>,
    #[arg(long, help = "Output the whole analysis as JSON")]
    json: bool,
    #[arg(long, help = "Log output format (pretty or json)")]
    log_format: Option<LogFormat>,
    #[arg(long, help = "Log level (off, error, warn, info, debug, trace)")]
    log_level: Option<String>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = AnalyzerConfig::from_env().context("Failed to load configuration")?;
    if let Some(format) = cli.log_format {
        config.logging.format = format;
    }
    if let Some(level) = &cli.log_level {
        config.logging.level = level.trim().to_lowercase();
    }
    config.validate().context("Invalid command line options")?;

    init_tracing(&config.logging).context("Failed to initialize logging")?;
    info!("Starting nutrition label analysis");

    let analyzer = LabelAnalyzer::new(config).context("Failed to create analyzer")?;
    let source_config = &analyzer.config().source;

    let source: Box<dyn TextSource> = match &cli.input {
        Some(path) if path.as_os_str() != "-" => {
            Box::new(FileTextSource::with_config(path, source_config))
        }
        _ => Box::new(ReaderTextSource::with_config(std::io::stdin(), source_config)),
    };

    let analysis = analyzer.analyze_source(source.as_ref());

    if cli.json {
        let json =
            serde_json::to_string_pretty(&analysis).context("Failed to serialize analysis")?;
        println!("{json}");
    } else {
        print_report(&analysis, analyzer.config().output.excerpt_chars)?;
    }

    Ok(())
}

fn print_report(analysis: &LabelAnalysis, excerpt_chars: usize) -> Result<()> {
    println!("--- Extracted Text ---");
    println!("{}", excerpt(&analysis.extracted_text, excerpt_chars));
    println!();
    println!("--- Parsed Nutrition Data ---");
    println!(
        "{}",
        serde_json::to_string_pretty(&analysis.nutrition)
            .context("Failed to serialize nutrition data")?
    );
    println!();
    println!("--- Analysis Result ---");
    println!("{}", analysis.response);
    Ok(())
}

fn excerpt(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_excerpt_truncates_on_char_boundary() {
        assert_eq!(excerpt("Calories 120", 8), "Calories...");
        assert_eq!(excerpt("Calories 120", 12), "Calories 120");
        assert_eq!(excerpt("HI 5¢ deposit", 5), "HI 5¢...");
    }

    #[test]
    fn test_cli_parses_options() {
        let cli = Cli::parse_from([
            "nutrition-label",
            "label.txt",
            "--json",
            "--log-format",
            "json",
            "--log-level",
            "debug",
        ]);
        assert_eq!(cli.input, Some(PathBuf::from("label.txt")));
        assert!(cli.json);
        assert_eq!(cli.log_format, Some(LogFormat::Json));
        assert_eq!(cli.log_level.as_deref(), Some("debug"));
    }

    #[test]
    fn test_cli_defaults_to_stdin() {
        let cli = Cli::parse_from(["nutrition-label"]);
        assert!(cli.input.is_none());
        assert!(!cli.json);
    }
}
