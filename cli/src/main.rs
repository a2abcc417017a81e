//! relayout CLI - document layout reconstruction tool

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use colored::Colorize;

use relayout::{
    primitives_from_json, AssetContext, JsonFormat, LayoutEngine, NullInspector, PagePrimitives,
    Relayout, StructuredOptions,
};

#[derive(Parser)]
#[command(name = "relayout")]
#[command(version)]
#[command(about = "Reconstruct editable HTML and layout JSON from PDF page primitives", long_about = None)]
struct Cli {
    /// Input primitives JSON file
    #[arg(value_name = "FILE")]
    input: Option<PathBuf>,

    /// Output directory
    #[arg(value_name = "OUTPUT")]
    output: Option<PathBuf>,

    /// URL prefix for image src attributes
    #[arg(long, env = "RELAYOUT_ASSETS_BASE_URL", default_value = "")]
    assets_base_url: String,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Reconstruct all outputs (editable HTML, exact HTML, layout JSON)
    Convert {
        /// Input primitives JSON file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output directory
        #[arg(short, long, value_name = "DIR")]
        output: Option<PathBuf>,

        /// URL prefix for image src attributes
        #[arg(long, env = "RELAYOUT_ASSETS_BASE_URL", default_value = "")]
        assets_base_url: String,
    },

    /// Render semantic, editable HTML
    #[command(alias = "html")]
    Semantic {
        /// Input primitives JSON file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// URL prefix for image src attributes
        #[arg(long, env = "RELAYOUT_ASSETS_BASE_URL", default_value = "")]
        assets_base_url: String,
    },

    /// Render pixel-exact HTML
    Exact {
        /// Input primitives JSON file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// URL prefix for image src attributes
        #[arg(long, env = "RELAYOUT_ASSETS_BASE_URL", default_value = "")]
        assets_base_url: String,
    },

    /// Serialize the layout model to JSON
    Json {
        /// Input primitives JSON file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,
    },

    /// Extract the structured element document
    Structured {
        /// Input primitives JSON file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Base URL for asset links
        #[arg(long, default_value = "")]
        base_url: String,

        /// Session identifier for asset links
        #[arg(long, default_value = "local")]
        session: String,

        /// Original source filename recorded in the document
        #[arg(long, default_value = "")]
        source: String,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,
    },

    /// Show reconstruction statistics
    Info {
        /// Input primitives JSON file
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
            output,
            assets_base_url,
        }) => cmd_convert(&input, output.as_deref(), &assets_base_url),
        Some(Commands::Semantic {
            input,
            output,
            assets_base_url,
        }) => cmd_semantic(&input, output.as_deref(), &assets_base_url),
        Some(Commands::Exact {
            input,
            output,
            assets_base_url,
        }) => cmd_exact(&input, output.as_deref(), &assets_base_url),
        Some(Commands::Json {
            input,
            output,
            compact,
        }) => cmd_json(&input, output.as_deref(), compact),
        Some(Commands::Structured {
            input,
            output,
            base_url,
            session,
            source,
            compact,
        }) => cmd_structured(&input, output.as_deref(), &base_url, &session, &source, compact),
        Some(Commands::Info { input }) => cmd_info(&input),
        Some(Commands::Version) => {
            cmd_version();
            Ok(())
        }
        None => {
            // Default behavior: convert if input is provided
            if let Some(input) = cli.input {
                cmd_convert(&input, cli.output.as_deref(), &cli.assets_base_url)
            } else {
                println!("{}", "Usage: relayout <FILE> [OUTPUT]".yellow());
                println!("       relayout --help for more information");
                Ok(())
            }
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn load_primitives(input: &Path) -> Result<Vec<PagePrimitives>, Box<dyn std::error::Error>> {
    let raw = fs::read_to_string(input)?;
    Ok(primitives_from_json(&raw)?)
}

fn cmd_convert(
    input: &Path,
    output: Option<&Path>,
    assets_base_url: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let output_dir = output.map(|p| p.to_path_buf()).unwrap_or_else(|| {
        let stem = input.file_stem().unwrap_or_default().to_string_lossy();
        PathBuf::from(format!("{}_output", stem))
    });

    fs::create_dir_all(&output_dir)?;

    let pages = load_primitives(input)?;
    let result = Relayout::new()
        .with_assets_base_url(assets_base_url)
        .process(&pages);

    fs::write(output_dir.join("editable.html"), result.to_semantic_html())?;
    fs::write(output_dir.join("exact.html"), result.to_exact_html())?;
    fs::write(
        output_dir.join("layout.json"),
        result.to_layout_json(JsonFormat::Pretty)?,
    )?;

    println!("{}", "Output files:".green().bold());
    println!("  {} editable.html", "├─".dimmed());
    println!("  {} exact.html", "├─".dimmed());
    println!("  {} layout.json", "└─".dimmed());

    Ok(())
}

fn cmd_semantic(
    input: &Path,
    output: Option<&Path>,
    assets_base_url: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let pages = load_primitives(input)?;
    let html = Relayout::new()
        .with_assets_base_url(assets_base_url)
        .process(&pages)
        .to_semantic_html();
    write_or_print(output, &html)
}

fn cmd_exact(
    input: &Path,
    output: Option<&Path>,
    assets_base_url: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let pages = load_primitives(input)?;
    let html = Relayout::new()
        .with_assets_base_url(assets_base_url)
        .process(&pages)
        .to_exact_html();
    write_or_print(output, &html)
}

fn cmd_json(
    input: &Path,
    output: Option<&Path>,
    compact: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let pages = load_primitives(input)?;
    let format = if compact {
        JsonFormat::Compact
    } else {
        JsonFormat::Pretty
    };
    let json = Relayout::new().process(&pages).to_layout_json(format)?;
    write_or_print(output, &json)
}

fn cmd_structured(
    input: &Path,
    output: Option<&Path>,
    base_url: &str,
    session: &str,
    source: &str,
    compact: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let pages = load_primitives(input)?;

    let source_filename = if source.is_empty() {
        input
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    } else {
        source.to_string()
    };

    let options = StructuredOptions::new(AssetContext::new(base_url, session), source_filename);
    let doc = LayoutEngine::new().build_structured(&pages, &options, &NullInspector);

    let format = if compact {
        JsonFormat::Compact
    } else {
        JsonFormat::Pretty
    };
    let json = relayout::render::to_structured_json(&doc, format)?;
    write_or_print(output, &json)
}

fn cmd_info(input: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let pages = load_primitives(input)?;
    let result = Relayout::new().process(&pages);
    let layout = result.layout();

    println!("{}", "Reconstruction Statistics".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "File".bold(), input.display());
    println!("{}: {}", "Pages".bold(), layout.page_count());

    let text_blocks: usize = layout
        .pages
        .iter()
        .map(|p| p.blocks.iter().filter(|b| b.is_text()).count())
        .sum();
    let images: usize = layout
        .pages
        .iter()
        .map(|p| p.blocks.iter().filter(|b| b.is_image()).count())
        .sum();
    let links: usize = layout
        .pages
        .iter()
        .map(|p| p.blocks.iter().filter(|b| b.is_link()).count())
        .sum();

    println!("{}: {}", "Paragraphs".bold(), text_blocks);
    println!("{}: {}", "Images".bold(), images);
    println!("{}: {}", "Links".bold(), links);

    let text = layout.plain_text();
    let words: usize = text.split_whitespace().count();
    println!("{}: {}", "Words".bold(), words);

    Ok(())
}

fn cmd_version() {
    println!("{} {}", "relayout".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("Document layout reconstruction tool");
    println!();
    println!(
        "Repository: {}",
        "https://github.com/relayout/relayout".dimmed()
    );
    println!("License: MIT");
}

fn write_or_print(output: Option<&Path>, content: &str) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(path) = output {
        fs::write(path, content)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", content);
    }
    Ok(())
}
