//! miniocr CLI - ALTO to MiniOCR conversion and IIIF indexing tool

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::{Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use miniocr::{
    detect_format_from_path, extract_ocr_files_from_path, to_json, AltoConverter, ErrorMode,
    HttpFetcher, IndexMode, IndexOptions, Indexer, JsonFormat, ParseOptions, SolrWriter,
    WordAttributes, XmlFormat,
};

#[derive(Parser)]
#[command(name = "miniocr")]
#[command(version)]
#[command(about = "Convert ALTO OCR to MiniOCR and index IIIF documents", long_about = None)]
struct Cli {
    /// Input ALTO or METS file
    #[arg(value_name = "FILE")]
    input: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert an ALTO file to MiniOCR
    Convert {
        /// Input ALTO file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Zero-based position of the file in the document's OCR file list
        #[arg(short, long, default_value = "0")]
        position: usize,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Fail on lines outside of any text block instead of dropping them
        #[arg(long)]
        strict: bool,

        /// Read String attributes by name instead of by position
        #[arg(long)]
        named_attributes: bool,

        /// Print the MiniOCR model as JSON instead of markup
        #[arg(long)]
        json: bool,

        /// With --json, print one record per word (JSON Lines)
        #[arg(long, requires = "json")]
        words: bool,
    },

    /// List the OCR files referenced by a METS file
    Mets {
        /// Input METS file
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },

    /// Index documents into Solr
    Index {
        /// Document identifiers
        #[arg(value_name = "ID", required = true)]
        ids: Vec<String>,

        /// IIIF host serving manifests
        #[arg(long, env = "MINIOCR_HOST")]
        host: String,

        /// Solr base URL
        #[arg(long, env = "MINIOCR_SOLR_URL", default_value = "http://localhost:8983/solr")]
        solr_url: String,

        /// Solr collection
        #[arg(long, env = "MINIOCR_COLLECTION", default_value = "ocr")]
        collection: String,

        /// Index mode: "full" writes eagerly, anything else lazily
        #[arg(long, env = "MINIOCR_INDEX_TYPE", default_value = "lazy")]
        mode: String,

        /// Commit deadline for lazy writes, in milliseconds
        #[arg(long, default_value = "10000")]
        commit_within: u64,

        /// HTTP timeout in seconds
        #[arg(long, default_value = "30")]
        timeout: u64,

        /// Index documents concurrently
        #[arg(long)]
        parallel: bool,
    },

    /// Show what kind of file this is and what it contains
    Inspect {
        /// Input ALTO or METS file
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },

    /// Show version information
    Version,
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Convert {
            input,
            position,
            output,
            strict,
            named_attributes,
            json,
            words,
        }) => {
            let json_format = match (json, words) {
                (true, true) => Some(JsonFormat::Words),
                (true, false) => Some(JsonFormat::Pretty),
                (false, _) => None,
            };
            cmd_convert(
                &input,
                position,
                output.as_deref(),
                strict,
                named_attributes,
                json_format,
            )
        }
        Some(Commands::Mets { input }) => cmd_mets(&input),
        Some(Commands::Index {
            ids,
            host,
            solr_url,
            collection,
            mode,
            commit_within,
            timeout,
            parallel,
        }) => {
            let options = IndexOptions::new()
                .with_host(host)
                .with_solr_url(solr_url)
                .with_collection(collection)
                .with_index_mode(IndexMode::from_setting(&mode))
                .with_commit_within(commit_within)
                .with_timeout(timeout)
                .with_parallel(parallel);
            cmd_index(&ids, options)
        }
        Some(Commands::Inspect { input }) => cmd_inspect(&input),
        Some(Commands::Version) => {
            cmd_version();
            Ok(())
        }
        None => {
            // Default behavior: convert ALTO or list METS depending on the input
            if let Some(input) = cli.input {
                match detect_format_from_path(&input) {
                    Ok(XmlFormat::Mets) => cmd_mets(&input),
                    Ok(XmlFormat::Alto) => cmd_convert(&input, 0, None, false, false, None),
                    Err(e) => Err(e.into()),
                }
            } else {
                println!("{}", "Usage: miniocr <FILE>".yellow());
                println!("       miniocr --help for more information");
                Ok(())
            }
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn cmd_convert(
    input: &Path,
    position: usize,
    output: Option<&Path>,
    strict: bool,
    named_attributes: bool,
    json_format: Option<JsonFormat>,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut options = ParseOptions::new();
    if strict {
        options = options.with_error_mode(ErrorMode::Strict);
    }
    if named_attributes {
        options = options.with_word_attributes(WordAttributes::Named);
    }

    let data = fs::read(input)?;
    let converter = AltoConverter::with_options(options);

    let rendered = match json_format {
        Some(format) => {
            let doc = converter.parse(&String::from_utf8_lossy(&data), position)?;
            to_json(&doc, format)?
        }
        None => converter.convert_bytes(&data, position)?.content,
    };

    if let Some(path) = output {
        fs::write(path, &rendered)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", rendered);
    }

    Ok(())
}

fn cmd_mets(input: &Path) -> Result<(), Box<dyn std::error::Error>> {
    for file in extract_ocr_files_from_path(input)? {
        println!("{}", file);
    }
    Ok(())
}

fn cmd_index(ids: &[String], options: IndexOptions) -> Result<(), Box<dyn std::error::Error>> {
    let fetcher = HttpFetcher::new(&options)?;
    let writer = SolrWriter::new(&options)?;
    let mode = options.index_mode;
    let indexer = Indexer::new(fetcher, writer, options);

    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap(),
    );
    pb.set_message(format!("Indexing {} documents ({} mode)...", ids.len(), mode));
    pb.enable_steady_tick(Duration::from_millis(100));

    let results = indexer.index_documents(ids);
    pb.finish_and_clear();

    let mut failed = 0;
    for (id, result) in &results {
        match result {
            Ok(report) => println!(
                "  {} {}: {} pages indexed, {} skipped, {} words",
                "✓".green(),
                id.bold(),
                report.indexed_files,
                report.skipped_files,
                report.word_count
            ),
            Err(e) => {
                failed += 1;
                println!("  {} {}: {}", "✗".red(), id.bold(), e);
            }
        }
    }

    if failed > 0 {
        return Err(format!("{} of {} documents failed", failed, results.len()).into());
    }
    println!("{}", "Done!".green().bold());
    Ok(())
}

fn cmd_inspect(input: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let format = detect_format_from_path(input)?;

    println!("{}", "File Information".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());
    println!("{}: {}", "File".bold(), input.display());
    println!("{}: {}", "Format".bold(), format);

    match format {
        XmlFormat::Mets => {
            let files = extract_ocr_files_from_path(input)?;
            let empty = files.iter().filter(|f| f.is_empty()).count();
            println!("{}: {}", "OCR files".bold(), files.len());
            println!("{}: {}", "Empty references".bold(), empty);
        }
        XmlFormat::Alto => {
            let data = fs::read(input)?;
            let doc = AltoConverter::new().parse(&String::from_utf8_lossy(&data), 0)?;
            let blocks: usize = doc.pages.iter().map(|p| p.block_count()).sum();
            let lines: usize = doc
                .pages
                .iter()
                .flat_map(|p| p.blocks.iter())
                .map(|b| b.lines.len())
                .sum();
            println!("{}: {}", "Pages".bold(), doc.page_count());
            println!("{}: {}", "Blocks".bold(), blocks);
            println!("{}: {}", "Lines".bold(), lines);
            println!("{}: {}", "Words".bold(), doc.word_count());
        }
    }

    Ok(())
}

fn cmd_version() {
    println!("{} {}", "miniocr".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("ALTO to MiniOCR conversion and IIIF indexing");
}
