use super::{open_session, save, select, SelectorArgs};
use crate::config::Config;
use anyhow::{anyhow, Context, Result};
use clap::Args;
use colored::Colorize;
use mobile_ui_editor::{EditOutcome, Surface};
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct SetArgs {
    /// Layout JSON file
    pub file: PathBuf,

    #[command(flatten)]
    pub selector: SelectorArgs,

    /// Dotted field path below the selection (e.g. props.position.width)
    pub field: String,

    /// New value, as typed into the field's editor
    pub value: String,

    /// Write to this file instead of overwriting the input
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub struct MoveArgs {
    /// Layout JSON file
    pub file: PathBuf,

    /// Canvas shape index
    pub shape: usize,

    /// New left edge
    #[arg(allow_negative_numbers = true)]
    pub x: f64,

    /// New top edge
    #[arg(allow_negative_numbers = true)]
    pub y: f64,

    /// Write to this file instead of overwriting the input
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub struct RawArgs {
    /// Layout JSON file
    pub file: PathBuf,

    /// File holding the replacement JSON text
    #[arg(long)]
    pub from: PathBuf,

    /// Write to this file instead of overwriting the input
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub struct FormatArgs {
    /// Layout JSON file
    pub file: PathBuf,

    /// Write to this file instead of overwriting the input
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

pub fn set(args: SetArgs, config: &Config) -> Result<()> {
    let mut session = open_session(&args.file, config)?;
    let selection = select(&mut session, &args.selector)?;

    let outcome = session
        .edit_field(&args.field, &args.value)
        .with_context(|| format!("Cannot edit {} at {}", args.field, selection.node))?;

    match outcome {
        EditOutcome::Applied { .. } => {
            println!("{} {} = {}", "✏️".bright_blue(), args.field, args.value.cyan());
            save(&mut session, args.output)
        }
        EditOutcome::Dropped => Err(anyhow!(
            "'{}' is not a valid value for {}",
            args.value,
            args.field
        )),
    }
}

pub fn move_shape(args: MoveArgs, config: &Config) -> Result<()> {
    let mut session = open_session(&args.file, config)?;
    session.drag_shape(args.shape, args.x, args.y)?;

    if let Some(shape) = session.canvas().shape(args.shape) {
        println!(
            "{} {} → ({}, {})",
            "↔".bright_blue(),
            shape.label,
            shape.rect.x,
            shape.rect.y
        );
    }

    save(&mut session, args.output)
}

pub fn raw(args: RawArgs, config: &Config) -> Result<()> {
    let mut session = open_session(&args.file, config)?;
    let text = fs::read_to_string(&args.from)
        .with_context(|| format!("Cannot read {}", args.from.display()))?;

    session.set_active_surface(Surface::RawJson)?;
    session.edit_raw(text);

    save(&mut session, args.output)
}

pub fn format(args: FormatArgs, config: &Config) -> Result<()> {
    let mut session = open_session(&args.file, config)?;
    save(&mut session, args.output)
}
