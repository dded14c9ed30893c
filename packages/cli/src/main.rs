mod commands;
mod config;

use clap::{ArgAction, Parser, Subcommand};
use colored::Colorize;
use commands::{
    elements, format, move_shape, props, raw, set, tree, ElementsArgs, FormatArgs, MoveArgs,
    PropsArgs, RawArgs, SetArgs, TreeArgs,
};
use config::Config;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Mobile UI editor - inspect and edit JSON screen layouts
#[derive(Parser, Debug)]
#[command(name = "mobile-ui")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Config file (defaults to ./mobile-ui.config.json when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the document structure tree
    Tree(TreeArgs),

    /// List module elements and canvas shapes
    Elements(ElementsArgs),

    /// Show the property form for a selection
    Props(PropsArgs),

    /// Edit one property of a selection and save
    Set(SetArgs),

    /// Drag a canvas shape to a new position and save
    Move(MoveArgs),

    /// Replace the document with raw JSON text and save
    Raw(RawArgs),

    /// Load and save without changes (normalizes formatting)
    Format(FormatArgs),
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let cwd = std::env::current_dir()?.display().to_string();
    let config = Config::load(&cwd, cli.config.as_deref())?;

    match cli.command {
        Command::Tree(args) => tree(args, &config),
        Command::Elements(args) => elements(args, &config),
        Command::Props(args) => props(args, &config),
        Command::Set(args) => set(args, &config),
        Command::Move(args) => move_shape(args, &config),
        Command::Raw(args) => raw(args, &config),
        Command::Format(args) => format(args, &config),
    }
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(err) = run(cli) {
        eprintln!();
        eprintln!("{} {:#}", "Error:".red().bold(), err);
        eprintln!();
        std::process::exit(1);
    }
}
