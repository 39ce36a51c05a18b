use std::io::IsTerminal;
use std::path::{Path, PathBuf};

use clap::{Args, CommandFactory, Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use dark_recolor::{Recolorer, Scheme};
use pdfdarkmode::error::ConvertError;
use pdfdarkmode::interactive::Prompter;
use pdfdarkmode::models::{default_output_path, AppConfig, ConversionMode, ConvertOptions};
use pdfdarkmode::rendering::{decode_png, encode_png};
use pdfdarkmode::services::convert;
use pdfdarkmode::services::page_content::{latin1_decode, latin1_encode};

#[derive(Parser)]
#[command(name = "pdfdarkmode", version)]
#[command(about = "Convert PDFs to dark mode")]
#[command(long_about = "Convert PDF documents to dark mode.

Supports two conversion modes:
  - raster: renders pages to images, recolors them, reassembles (reliable)
  - direct: rewrites PDF color operators (preserves vectors and text)

Available color schemes: dark, sepia, nord, solarized, gruvbox, dracula, monokai
Or use --bg-color and --text-color for custom colors (hex format: #1a1a1a)")]
#[command(args_conflicts_with_subcommands = true)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    convert: ConvertArgs,

    /// YAML config file (falls back to $CONFIG_FILE)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log per-page detail
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Args)]
struct ConvertArgs {
    /// Input PDF file
    input: Option<PathBuf>,

    /// Output PDF file (default: <input>_dark.pdf)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Conversion mode: 'raster' or 'direct'
    #[arg(short, long)]
    mode: Option<String>,

    /// DPI for raster mode (default: 150)
    #[arg(long)]
    dpi: Option<u32>,

    /// Leave embedded images untouched in direct mode (default: true)
    #[arg(long)]
    preserve_images: Option<bool>,

    /// Worker threads for pixel work (0 = one per core)
    #[arg(long, default_value_t = 0)]
    threads: usize,

    #[command(flatten)]
    scheme: SchemeArgs,
}

#[derive(Args)]
struct SchemeArgs {
    /// Color scheme: dark, sepia, nord, solarized, gruvbox, dracula, monokai
    #[arg(short, long)]
    scheme: Option<String>,

    /// Custom background color (hex, e.g., #1a1a1a)
    #[arg(long)]
    bg_color: Option<String>,

    /// Custom text color (hex, e.g., #e0e0e0)
    #[arg(long)]
    text_color: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// List available color schemes
    Schemes,
    /// Recolor a single PNG image
    Image {
        /// Input PNG file
        input: PathBuf,

        /// Output PNG file
        #[arg(short, long)]
        output: PathBuf,

        #[command(flatten)]
        scheme: SchemeArgs,
    },
    /// Rewrite color operators in a decompressed content stream
    Content {
        /// Input content stream (plain text)
        input: PathBuf,

        /// Output file
        #[arg(short, long)]
        output: PathBuf,

        #[command(flatten)]
        scheme: SchemeArgs,
    },
    /// Print version information
    Version,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config_path = cli
        .config
        .clone()
        .or_else(|| std::env::var_os("CONFIG_FILE").map(PathBuf::from));
    let config = AppConfig::load_optional(config_path.as_deref())?;

    match cli.command {
        Some(Commands::Schemes) => {
            run_schemes_command(&config);
            Ok(())
        }
        Some(Commands::Image {
            input,
            output,
            scheme,
        }) => run_image_command(&input, &output, resolve_scheme(&config, &scheme)?),
        Some(Commands::Content {
            input,
            output,
            scheme,
        }) => run_content_command(&input, &output, resolve_scheme(&config, &scheme)?),
        Some(Commands::Version) => {
            println!("pdfdarkmode {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        None => run_convert_command(cli.convert, &config),
    }
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose {
        "pdfdarkmode=debug"
    } else {
        "pdfdarkmode=info"
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .without_time()
                .with_writer(std::io::stderr),
        )
        .init();
}

fn interactive() -> bool {
    std::io::stdin().is_terminal() && std::io::stdout().is_terminal()
}

/// Scheme from flags or config; `dark` when neither selects one.
fn resolve_scheme(config: &AppConfig, args: &SchemeArgs) -> anyhow::Result<Scheme> {
    let scheme = config.select_scheme(
        args.scheme.as_deref(),
        args.bg_color.as_deref(),
        args.text_color.as_deref(),
    )?;
    Ok(scheme.unwrap_or_default())
}

fn run_convert_command(args: ConvertArgs, config: &AppConfig) -> anyhow::Result<()> {
    let Some(input) = args.input else {
        Cli::command().print_help()?;
        return Ok(());
    };
    if !input.is_file() {
        return Err(ConvertError::InputNotFound(input).into());
    }
    let output = args.output.unwrap_or_else(|| default_output_path(&input));

    let mut prompter = Prompter::new(std::io::stdin().lock(), std::io::stdout());

    let mode = match (args.mode.as_deref(), config.mode) {
        (Some(mode), _) => mode.parse::<ConversionMode>()?,
        (None, Some(mode)) => mode,
        (None, None) if interactive() => prompter.select_mode()?,
        (None, None) => ConversionMode::default(),
    };

    let selected = config.select_scheme(
        args.scheme.scheme.as_deref(),
        args.scheme.bg_color.as_deref(),
        args.scheme.text_color.as_deref(),
    )?;
    let scheme = match selected {
        Some(scheme) => scheme,
        None if interactive() => prompter.select_scheme(config)?,
        None => Scheme::default(),
    };

    let mut options = ConvertOptions::new(&input, &output, scheme)
        .with_mode(mode)
        .with_dpi(args.dpi.unwrap_or(config.dpi))
        .with_preserve_images(args.preserve_images.unwrap_or(config.preserve_images));
    options.threads = args.threads;

    println!(
        "Converting {} to dark mode using {} mode...",
        input.display(),
        mode
    );
    println!(
        "Color scheme: {} (bg: {}, text: {})",
        options.scheme.name(),
        options.scheme.background().hex(),
        options.scheme.text().hex()
    );

    let report = convert(&options)?;

    println!("Processed {report}");
    println!("Successfully created: {}", output.display());
    Ok(())
}

fn run_schemes_command(config: &AppConfig) {
    println!("Available color schemes:");
    println!();
    for scheme in config.available_schemes() {
        println!(
            "  {:<10}  Background: {}  Text: {}",
            scheme.name(),
            scheme.background().hex(),
            scheme.text().hex()
        );
    }
    println!();
    println!("Usage:");
    println!("  pdfdarkmode --scheme nord input.pdf");
    println!("  pdfdarkmode --bg-color '#282a36' --text-color '#f8f8f2' input.pdf");
}

/// Recolor a PNG with the raster transform (no PDF involved)
fn run_image_command(input: &Path, output: &Path, scheme: Scheme) -> anyhow::Result<()> {
    let image = decode_png(&std::fs::read(input)?)?;
    let recolored = Recolorer::new(scheme).transform_image(&image);
    std::fs::write(output, encode_png(&recolored)?)?;

    println!(
        "Rendered {}x{} image to {}",
        recolored.width(),
        recolored.height(),
        output.display()
    );
    Ok(())
}

/// Rewrite a decompressed content stream file
fn run_content_command(input: &Path, output: &Path, scheme: Scheme) -> anyhow::Result<()> {
    let text = latin1_decode(&std::fs::read(input)?);
    let rewrite = Recolorer::new(scheme).rewrite_content(&text);
    std::fs::write(output, latin1_encode(&rewrite.content)?)?;

    println!(
        "Rewrote {} color operators into {}",
        rewrite.changed,
        output.display()
    );
    Ok(())
}
