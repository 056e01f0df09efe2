use aidsense::annotation::AnnotationResult;
use aidsense::catalog::Catalog;
use aidsense::config::Config;
use aidsense::engine::FusionEngine;
use aidsense::mock::degraded_result;
use aidsense::report::{self, ReportOptions};
use aidsense::schema::FusionResult;
use anyhow::{Context, Result};
use clap::{Args, ColorChoice, CommandFactory, FromArgMatches, Parser, Subcommand};
use serde_json::json;
use std::io::{IsTerminal, Read, stdout};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "aidsense",
    about = "Fuse detector annotations into prioritized first-aid findings",
    arg_required_else_help = true
)]
struct Cli {
    /// Disable color
    #[arg(long = "no-color", global = true)]
    no_color: bool,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Fuse one annotation result into findings
    Fuse(FuseArgs),
    /// Show how raw labels map onto the catalog
    Lookup(LookupArgs),
    /// List catalog entries by tier
    Catalog(CatalogArgs),
    /// Print the JSON schema of the output (or input)
    Schema(SchemaArgs),
}

#[derive(Args, Clone)]
struct FuseArgs {
    /// Annotation JSON file (reads stdin when omitted or "-")
    #[arg(value_name = "FILE")]
    input: Option<PathBuf>,

    /// Output JSON (stable schema)
    #[arg(long)]
    json: bool,

    /// Config file (defaults to the user config directory)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Catalog TOML replacing the builtin catalog
    #[arg(long, value_name = "PATH")]
    catalog: Option<PathBuf>,

    /// Minimum localized object score
    #[arg(long, value_name = "SCORE")]
    min_object_score: Option<f32>,

    /// Minimum whole-image label score
    #[arg(long, value_name = "SCORE")]
    min_label_score: Option<f32>,

    /// Confidence assigned to OCR text hits
    #[arg(long, value_name = "SCORE")]
    text_hit_score: Option<f32>,

    /// IoU at or above which overlapping boxes are suppressed
    #[arg(long, value_name = "IOU")]
    iou_threshold: Option<f32>,

    /// Emit the degraded sample result without reading input
    #[arg(long, conflicts_with = "input")]
    mock: bool,

    /// Show catalog notes under each finding
    #[arg(long)]
    notes: bool,
}

#[derive(Args, Clone)]
struct LookupArgs {
    /// Raw detector labels
    #[arg(value_name = "LABEL", required = true)]
    labels: Vec<String>,

    /// Output JSON
    #[arg(long)]
    json: bool,

    /// Catalog TOML replacing the builtin catalog
    #[arg(long, value_name = "PATH")]
    catalog: Option<PathBuf>,
}

#[derive(Args, Clone)]
struct CatalogArgs {
    /// Output JSON
    #[arg(long)]
    json: bool,

    /// Catalog TOML replacing the builtin catalog
    #[arg(long, value_name = "PATH")]
    catalog: Option<PathBuf>,
}

#[derive(Args, Clone)]
struct SchemaArgs {
    /// Print the annotation (input) schema instead
    #[arg(long)]
    input: bool,
}

fn detect_color_choice() -> ColorChoice {
    // Scan args before clap so help/errors honor `--no-color`.
    let mut args = std::env::args_os();
    args.next();
    let flag = args.take_while(|arg| arg != "--").any(|arg| arg == "--no-color");
    if flag || std::env::var_os("NO_COLOR").is_some_and(|v| !v.is_empty()) {
        ColorChoice::Never
    } else {
        ColorChoice::Auto
    }
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    // Logs go to stderr so JSON on stdout stays parseable
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn load_catalog(path: Option<&Path>) -> Result<Option<Catalog>> {
    path.map(|p| Catalog::load(p).with_context(|| format!("loading catalog {}", p.display())))
        .transpose()
}

fn read_annotation(input: Option<&Path>) -> Result<AnnotationResult> {
    let content = match input {
        Some(path) if path != Path::new("-") => std::fs::read_to_string(path)
            .with_context(|| format!("reading annotation {}", path.display()))?,
        _ => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("reading annotation from stdin")?;
            buf
        }
    };
    AnnotationResult::from_json(&content).context("parsing annotation JSON")
}

fn resolve_config(args: &FuseArgs) -> Result<Config> {
    let mut config = match &args.config {
        Some(path) => Config::load_from(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => Config::load().context("loading default config")?,
    };

    config.fusion.apply_env_overrides()?;
    let fusion = &mut config.fusion;
    if let Some(v) = args.min_object_score {
        fusion.min_object_score = v;
    }
    if let Some(v) = args.min_label_score {
        fusion.min_label_score = v;
    }
    if let Some(v) = args.text_hit_score {
        fusion.text_hit_score = v;
    }
    if let Some(v) = args.iou_threshold {
        fusion.nms_iou_threshold = v;
    }
    fusion.validate()?;

    if args.notes {
        config.output.show_notes = true;
    }
    Ok(config)
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn run_fuse(args: FuseArgs, color: bool) -> Result<()> {
    let config = resolve_config(&args)?;
    let custom = load_catalog(args.catalog.as_deref())?;
    let catalog = custom.as_ref().unwrap_or(Catalog::builtin());

    let result: FusionResult = if args.mock {
        degraded_result()
    } else {
        let annotation = read_annotation(args.input.as_deref())?;
        FusionEngine::with_catalog(catalog, config.fusion)
            .register_defaults()
            .fuse(&annotation)
    };

    if args.json {
        return print_json(&result);
    }

    let options = ReportOptions {
        color,
        show_notes: config.output.show_notes,
        show_raw_text: config.output.show_raw_text,
    };
    println!("{}", report::render(&result, catalog, &options));
    Ok(())
}

fn run_lookup(args: LookupArgs) -> Result<()> {
    let custom = load_catalog(args.catalog.as_deref())?;
    let catalog = custom.as_ref().unwrap_or(Catalog::builtin());

    let rows: Vec<_> = args
        .labels
        .iter()
        .map(|label| (label, catalog.categorize(label)))
        .collect();

    if args.json {
        let value: Vec<_> = rows
            .iter()
            .map(|(label, c)| {
                json!({
                    "input": label,
                    "priority": c.priority,
                    "key": c.key(),
                    "label": c.label(),
                })
            })
            .collect();
        return print_json(&value);
    }

    for (label, c) in rows {
        match c.item {
            Some(item) => println!("{} -> {} {} ({})", label, c.priority, item.key, item.label),
            None => println!("{} -> {} (unknown)", label, c.priority),
        }
    }
    Ok(())
}

fn run_catalog(args: CatalogArgs, color: bool) -> Result<()> {
    let custom = load_catalog(args.catalog.as_deref())?;
    let catalog = custom.as_ref().unwrap_or(Catalog::builtin());

    if args.json {
        return print_json(&catalog.items());
    }
    println!("{}", report::render_catalog(catalog, color));
    Ok(())
}

fn run_schema(args: SchemaArgs) -> Result<()> {
    if args.input {
        print_json(&schemars::schema_for!(AnnotationResult))
    } else {
        print_json(&FusionResult::json_schema())
    }
}

fn main() {
    let color = detect_color_choice();
    let matches = Cli::command().color(color).get_matches();
    let cli = Cli::from_arg_matches(&matches).unwrap_or_else(|e| e.exit());
    init_logging(cli.verbose);

    let want_color = !cli.no_color && stdout().is_terminal() && !matches!(color, ColorChoice::Never);
    let outcome = match cli.command {
        Some(Commands::Fuse(args)) => run_fuse(args, want_color),
        Some(Commands::Lookup(args)) => run_lookup(args),
        Some(Commands::Catalog(args)) => run_catalog(args, want_color),
        Some(Commands::Schema(args)) => run_schema(args),
        None => Ok(()),
    };

    if let Err(e) = outcome {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
