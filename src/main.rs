use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use locator_forge::{i18n, GeneratorConfig, Locale, LocatorEngine, ResultSet, SelectorFamily};
use log::{error, info};
use std::fs;
use std::io::Read;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// HTML fragment holding the element (read from --input or stdin when omitted)
    fragment: Option<String>,

    /// Read the fragment from a file
    #[arg(short, long, conflicts_with = "fragment")]
    input: Option<PathBuf>,

    /// Locator family: xpath, by-id or by-class
    #[arg(long, default_value = "xpath")]
    family: SelectorFamily,

    /// Language for descriptions and messages (en, pt)
    #[arg(short, long)]
    lang: Option<Locale>,

    /// CSS selector choosing the target element inside the fragment
    #[arg(short, long)]
    target: Option<String>,

    /// Drop locators below this reliability
    #[arg(long)]
    min_reliability: Option<f64>,

    /// Keep at most this many locators
    #[arg(long)]
    limit: Option<usize>,

    /// JSON file with generator settings; flags override it
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Output file path (optional)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum, Debug)]
enum OutputFormat {
    Text,
    Json,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let config = load_config(&args)?;
    let locale = config.locale;
    let html = read_fragment(&args)?;

    info!("Generating {:?} locators", args.family);
    let engine = LocatorEngine::new(config);

    match engine.generate(&html, args.family) {
        Ok(results) => {
            if results.is_empty() {
                eprintln!("{}", i18n::no_viable_locator(locale));
            }
            handle_output(&results, &args, locale)?;
            if results.is_empty() {
                std::process::exit(2);
            }
        }
        Err(e) => {
            error!("Locator generation failed: {}", e);
            eprintln!("Error: {}", i18n::error_message(&e, locale));
            std::process::exit(1);
        }
    }

    Ok(())
}

fn load_config(args: &Args) -> Result<GeneratorConfig> {
    let mut config = match &args.config {
        Some(path) => {
            let raw = fs::read_to_string(path).with_context(|| format!("reading config {:?}", path))?;
            serde_json::from_str(&raw).with_context(|| format!("parsing config {:?}", path))?
        }
        None => GeneratorConfig::default(),
    };

    if let Some(lang) = args.lang {
        config.locale = lang;
    }
    if let Some(target) = &args.target {
        config.target = Some(target.clone());
    }
    if let Some(min) = args.min_reliability {
        config.min_reliability = min;
    }
    if let Some(limit) = args.limit {
        config.max_results = Some(limit);
    }
    Ok(config)
}

fn read_fragment(args: &Args) -> Result<String> {
    if let Some(fragment) = &args.fragment {
        return Ok(fragment.clone());
    }
    if let Some(path) = &args.input {
        return fs::read_to_string(path).with_context(|| format!("reading fragment {:?}", path));
    }
    let mut buffer = String::new();
    std::io::stdin()
        .read_to_string(&mut buffer)
        .context("reading fragment from stdin")?;
    Ok(buffer)
}

fn handle_output(results: &ResultSet, args: &Args, locale: Locale) -> Result<()> {
    let content = match args.format {
        OutputFormat::Json => serde_json::to_string_pretty(results)?,
        OutputFormat::Text => render_text(results, locale),
    };

    if let Some(path) = &args.output {
        fs::write(path, content)?;
        println!("Output written to {:?}", path);
    } else {
        println!("{}", content);
    }
    Ok(())
}

fn render_text(results: &ResultSet, locale: Locale) -> String {
    let mut lines = Vec::new();
    for result in results {
        lines.push(format!(
            "{:>3.0}% {}  [{}]  {}",
            result.reliability() * 100.0,
            i18n::reliability_label(locale),
            i18n::kind_label(result.kind(), locale),
            result.locator()
        ));
        lines.push(format!("      {}", result.description()));
    }
    lines.join("\n")
}
