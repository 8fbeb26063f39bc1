//! unhwp CLI - HWP text extraction tool

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;

use unhwp::{
    detect_format_from_path, parse_file_with_options, ConvertOptions, ConvertResult, Document,
    ExtractionStats, HwpConverter, JsonFormat, OutputFormat, ParseOptions, RenderOptions,
    SectionSelection, SectionWarning,
};

#[derive(Parser)]
#[command(name = "unhwp")]
#[command(author = "iyulab")]
#[command(version)]
#[command(about = "Extract HWP document text to Markdown, text, and JSON", long_about = None)]
struct Cli {
    /// Input HWP file
    #[arg(value_name = "FILE")]
    input: Option<PathBuf>,

    /// Output directory
    #[arg(value_name = "OUTPUT")]
    output: Option<PathBuf>,

    #[command(flatten)]
    parse: ParseArgs,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Parsing flags shared by every command.
#[derive(Args, Clone, Default)]
struct ParseArgs {
    /// Sections to extract (e.g., "0-3", "0,2,5")
    #[arg(long, global = true, env = "UNHWP_SECTIONS")]
    sections: Option<String>,

    /// Fail on the first damaged section instead of skipping it
    #[arg(long, global = true)]
    strict: bool,

    /// Interpret inline control codes (tabs, breaks, hyphens)
    #[arg(long, global = true)]
    structured: bool,
}

impl ParseArgs {
    fn to_options(&self) -> Result<ParseOptions, Box<dyn std::error::Error>> {
        let mut options = ParseOptions::new();
        if let Some(ref s) = self.sections {
            options = options.with_sections(SectionSelection::parse(s)?);
        }
        if self.strict {
            options = options.strict();
        }
        if self.structured {
            options = options.structured();
        }
        Ok(options)
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Convert HWP to all formats (Markdown, text, JSON)
    Convert {
        /// Input HWP file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output directory
        #[arg(short, long, value_name = "DIR")]
        output: Option<PathBuf>,
    },

    /// Convert HWP to Markdown
    #[command(alias = "md")]
    Markdown {
        /// Input HWP file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Include YAML frontmatter
        #[arg(short, long)]
        frontmatter: bool,

        /// Emit tabular lines verbatim instead of Markdown tables
        #[arg(long)]
        no_tables: bool,

        /// Normalize output to Unicode NFC
        #[arg(long)]
        nfc: bool,
    },

    /// Convert HWP to plain text
    Text {
        /// Input HWP file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Convert HWP to JSON
    Json {
        /// Input HWP file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,
    },

    /// Show document information
    Info {
        /// Input HWP file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Print the information as JSON
        #[arg(long)]
        json: bool,
    },

    /// Convert many HWP files to Markdown in parallel
    Batch {
        /// Input HWP files
        #[arg(value_name = "FILES", required = true)]
        inputs: Vec<PathBuf>,

        /// Output directory
        #[arg(short, long, value_name = "DIR", default_value = ".")]
        output: PathBuf,
    },

    /// Show version information
    Version,
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();
    let parse = cli.parse;

    let result = match cli.command {
        Some(Commands::Convert { input, output }) => cmd_convert(&input, output.as_deref(), &parse),
        Some(Commands::Markdown {
            input,
            output,
            frontmatter,
            no_tables,
            nfc,
        }) => {
            let render_options = RenderOptions::new()
                .with_frontmatter(frontmatter)
                .with_tables(!no_tables)
                .with_unicode_normalization(nfc);
            cmd_markdown(&input, output.as_deref(), &parse, &render_options)
        }
        Some(Commands::Text { input, output }) => cmd_text(&input, output.as_deref(), &parse),
        Some(Commands::Json {
            input,
            output,
            compact,
        }) => cmd_json(&input, output.as_deref(), compact, &parse),
        Some(Commands::Info { input, json }) => cmd_info(&input, json, &parse),
        Some(Commands::Batch { inputs, output }) => cmd_batch(&inputs, &output, &parse),
        Some(Commands::Version) => {
            cmd_version();
            Ok(())
        }
        None => {
            // Default behavior: convert if input is provided
            if let Some(input) = cli.input {
                cmd_convert(&input, cli.output.as_deref(), &parse)
            } else {
                println!("{}", "Usage: unhwp <FILE> [OUTPUT]".yellow());
                println!("       unhwp --help for more information");
                Ok(())
            }
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

/// Parse a document and report section warnings on stderr.
fn load(input: &Path, parse: &ParseArgs) -> Result<Document, Box<dyn std::error::Error>> {
    let doc = parse_file_with_options(input, parse.to_options()?)?;
    print_warnings(input, &doc.warnings);
    Ok(doc)
}

fn print_warnings(input: &Path, warnings: &[SectionWarning]) {
    for warning in warnings {
        eprintln!(
            "{}: {}: {}",
            "Warning".yellow().bold(),
            input.display(),
            warning
        );
    }
}

fn write_or_print(output: Option<&Path>, content: &str) -> std::io::Result<()> {
    if let Some(path) = output {
        fs::write(path, content)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        print!("{}", content);
    }
    Ok(())
}

fn cmd_convert(
    input: &Path,
    output: Option<&Path>,
    parse: &ParseArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let output_dir = output.map(|p| p.to_path_buf()).unwrap_or_else(|| {
        let stem = input.file_stem().unwrap_or_default().to_string_lossy();
        PathBuf::from(format!("{}_output", stem))
    });

    fs::create_dir_all(&output_dir)?;

    let pb = ProgressBar::new(4);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {msg}")?
            .progress_chars("#>-"),
    );

    pb.set_message("Parsing HWP...");
    let doc = load(input, parse)?;
    pb.inc(1);

    let render_options = RenderOptions::new().with_frontmatter(true);

    pb.set_message("Generating Markdown...");
    let markdown = unhwp::render::to_markdown(&doc, &render_options)?;
    fs::write(output_dir.join("extract.md"), &markdown)?;
    pb.inc(1);

    pb.set_message("Generating text...");
    let text = unhwp::render::to_text(&doc, &render_options)?;
    fs::write(output_dir.join("extract.txt"), &text)?;
    pb.inc(1);

    pb.set_message("Generating JSON...");
    let json = unhwp::render::to_json(&doc, JsonFormat::Pretty)?;
    fs::write(output_dir.join("content.json"), &json)?;
    pb.inc(1);

    pb.finish_with_message("Done!");

    println!("\n{}", "Output files:".green().bold());
    println!("  {} extract.md", "├─".dimmed());
    println!("  {} extract.txt", "├─".dimmed());
    println!("  {} content.json", "└─".dimmed());

    Ok(())
}

/// Run a single conversion and report its section warnings on stderr.
fn convert(input: &Path, options: ConvertOptions) -> Result<ConvertResult, Box<dyn std::error::Error>> {
    let result = HwpConverter::new(options).convert_file(input)?;
    print_warnings(input, &result.warnings);
    Ok(result)
}

fn cmd_markdown(
    input: &Path,
    output: Option<&Path>,
    parse: &ParseArgs,
    render_options: &RenderOptions,
) -> Result<(), Box<dyn std::error::Error>> {
    let options = ConvertOptions::new()
        .with_parse_options(parse.to_options()?)
        .with_render_options(render_options.clone());
    let result = convert(input, options)?;
    write_or_print(output, &result.content)?;
    Ok(())
}

fn cmd_text(
    input: &Path,
    output: Option<&Path>,
    parse: &ParseArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let options = ConvertOptions::new()
        .with_parse_options(parse.to_options()?)
        .with_format(OutputFormat::Text);
    let result = convert(input, options)?;
    write_or_print(output, &result.content)?;
    Ok(())
}

fn cmd_json(
    input: &Path,
    output: Option<&Path>,
    compact: bool,
    parse: &ParseArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let format = if compact {
        JsonFormat::Compact
    } else {
        JsonFormat::Pretty
    };

    let options = ConvertOptions::new()
        .with_parse_options(parse.to_options()?)
        .with_format(OutputFormat::Json(format));
    let mut json = convert(input, options)?.content;
    json.push('\n');
    write_or_print(output, &json)?;
    Ok(())
}

fn cmd_info(input: &Path, as_json: bool, parse: &ParseArgs) -> Result<(), Box<dyn std::error::Error>> {
    let format = detect_format_from_path(input)?;
    let doc = load(input, parse)?;
    let stats = unhwp::render::to_markdown_with_stats(&doc, &RenderOptions::new())?.stats;

    if as_json {
        let info = serde_json::json!({
            "file": input.display().to_string(),
            "version": format.version,
            "compressed": format.compressed,
            "encrypted": format.encrypted,
            "distributed": format.distributed,
            "has_summary": doc.metadata.has_summary,
            "sections": doc.metadata.section_count,
            "warnings": doc.warnings,
            "stats": stats,
        });
        println!("{}", serde_json::to_string_pretty(&info)?);
        return Ok(());
    }

    let yes_no = |flag: bool| if flag { "Yes" } else { "No" };

    println!("{}", "Document Information".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "File".bold(), input.display());
    println!("{}: {}", "Format".bold(), format);
    println!("{}: {}", "Compressed".bold(), yes_no(format.compressed));
    println!("{}: {}", "Distribution".bold(), yes_no(format.distributed));
    println!("{}: {}", "Summary".bold(), yes_no(doc.metadata.has_summary));
    println!("{}: {}", "Sections".bold(), doc.metadata.section_count);

    println!();
    println!("{}", "Content Statistics".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "Lines".bold(), stats.line_count);
    println!(
        "{}: {} ({} rows)",
        "Tables".bold(),
        stats.table_count,
        stats.table_row_count
    );
    println!("{}: {}", "Words".bold(), stats.word_count);
    println!("{}: {}", "Characters".bold(), stats.char_count);
    if stats.sections_skipped > 0 {
        println!(
            "{}: {}",
            "Damaged sections".bold().yellow(),
            stats.sections_skipped
        );
    }

    Ok(())
}

fn cmd_batch(
    inputs: &[PathBuf],
    output_dir: &Path,
    parse: &ParseArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let targets = batch_targets(inputs, output_dir, OutputFormat::Markdown.extension())?;
    fs::create_dir_all(output_dir)?;
    let converter = HwpConverter::new(ConvertOptions::new().with_parse_options(parse.to_options()?));

    let pb = ProgressBar::new(inputs.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
            .progress_chars("#>-"),
    );

    let outcomes: Vec<Result<ExtractionStats, (PathBuf, String)>> = inputs
        .par_iter()
        .zip(targets.par_iter())
        .map(|(input, target)| {
            let result = converter
                .convert_file(input)
                .map_err(|e| e.to_string())
                .and_then(|result| {
                    fs::write(target, &result.content).map_err(|e| e.to_string())?;
                    log::debug!("{} -> {}", input.display(), target.display());
                    Ok(result)
                });

            pb.inc(1);
            match result {
                Ok(result) => {
                    pb.suspend(|| print_warnings(input, &result.warnings));
                    Ok(result.stats)
                }
                Err(e) => Err((input.clone(), e)),
            }
        })
        .collect();

    pb.finish_with_message("Done!");

    let mut totals = ExtractionStats::new();
    let mut failures = Vec::new();
    for outcome in outcomes {
        match outcome {
            Ok(stats) => totals.merge(&stats),
            Err(failure) => failures.push(failure),
        }
    }

    let converted = inputs.len() - failures.len();
    println!(
        "\n{} {} of {} files converted",
        "Done!".green().bold(),
        converted,
        inputs.len()
    );
    println!(
        "  {} sections, {} tables, {} lines, {} words",
        totals.sections_parsed, totals.table_count, totals.line_count, totals.word_count
    );
    if totals.sections_skipped > 0 {
        println!(
            "  {}",
            format!("{} damaged sections skipped", totals.sections_skipped).yellow()
        );
    }

    for (input, error) in &failures {
        eprintln!("{}: {}: {}", "Error".red().bold(), input.display(), error);
    }

    if failures.is_empty() {
        Ok(())
    } else {
        Err(format!("{} files failed", failures.len()).into())
    }
}

/// Pick one output path per batch input.
///
/// Inputs that share a file stem are prefixed with the name of their parent
/// directory. A name that still clashes (compared case-insensitively) is an
/// error, so no output is overwritten by another input.
fn batch_targets(
    inputs: &[PathBuf],
    output_dir: &Path,
    extension: &str,
) -> Result<Vec<PathBuf>, String> {
    let stem_of = |path: &Path| {
        path.file_stem()
            .unwrap_or_default()
            .to_string_lossy()
            .into_owned()
    };

    let mut stem_counts: HashMap<String, usize> = HashMap::new();
    for input in inputs {
        *stem_counts.entry(stem_of(input.as_path()).to_lowercase()).or_default() += 1;
    }

    let mut seen: HashMap<String, &Path> = HashMap::new();
    let mut targets = Vec::with_capacity(inputs.len());
    for input in inputs {
        let stem = stem_of(input.as_path());
        let shared = stem_counts.get(&stem.to_lowercase()).copied().unwrap_or(0) > 1;
        let parent = input
            .parent()
            .and_then(|p| p.file_name())
            .map(|name| name.to_string_lossy().into_owned());

        let name = match parent {
            Some(parent) if shared => format!("{}_{}.{}", parent, stem, extension),
            _ => format!("{}.{}", stem, extension),
        };

        if let Some(previous) = seen.insert(name.to_lowercase(), input.as_path()) {
            return Err(format!(
                "{} and {} would both be written to {}",
                previous.display(),
                input.display(),
                name
            ));
        }
        targets.push(output_dir.join(name));
    }

    Ok(targets)
}

fn cmd_version() {
    println!("{} {}", "unhwp".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("HWP text extraction tool");
    println!();
    println!("Repository: {}", "https://github.com/iyulab/unhwp".dimmed());
    println!("License: MIT");
}
