use super::{open_session, select, SelectorArgs};
use crate::config::Config;
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use mobile_ui_editor::FormRow;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct TreeArgs {
    /// Layout JSON file
    pub file: PathBuf,
}

#[derive(Debug, Args)]
pub struct ElementsArgs {
    /// Layout JSON file
    pub file: PathBuf,
}

#[derive(Debug, Args)]
pub struct PropsArgs {
    /// Layout JSON file
    pub file: PathBuf,

    #[command(flatten)]
    pub selector: SelectorArgs,
}

pub fn tree(args: TreeArgs, config: &Config) -> Result<()> {
    let session = open_session(&args.file, config)?;

    for (depth, node) in session.tree().flatten() {
        let indent = "  ".repeat(depth);
        if node.children.is_empty() {
            println!("{}{}", indent, node.label);
        } else {
            println!("{}{}", indent, node.label.bold());
        }
    }

    Ok(())
}

pub fn elements(args: ElementsArgs, config: &Config) -> Result<()> {
    let session = open_session(&args.file, config)?;
    let canvas = session.canvas();

    println!("{}", "Module Elements".bright_blue().bold());
    let ids = session.module_element_ids();
    if ids.is_empty() {
        println!("  {}", "(none)".dimmed());
    }
    for id in ids {
        println!("  • {}", id);
    }

    println!();
    println!(
        "{} {}",
        "Canvas".bright_blue().bold(),
        format!("{} × {}", canvas.width, canvas.height).dimmed()
    );
    for (index, shape) in canvas.shapes().iter().enumerate() {
        let rect = shape.rect;
        let off_canvas = rect.x + rect.width > canvas.width || rect.y + rect.height > canvas.height;
        let line = format!(
            "  [{}] {:<28} at ({}, {}) size {} × {}",
            index, shape.label, rect.x, rect.y, rect.width, rect.height
        );

        if off_canvas {
            println!("{} {}", line, "(outside canvas)".yellow());
        } else {
            println!("{}", line);
        }
    }

    Ok(())
}

pub fn props(args: PropsArgs, config: &Config) -> Result<()> {
    let mut session = open_session(&args.file, config)?;
    let selection = select(&mut session, &args.selector)?;

    println!(
        "{} {}",
        "Property Editor".bright_blue().bold(),
        selection.node.to_string().dimmed()
    );

    for row in session.form().rows() {
        match row {
            FormRow::Section { depth, .. } => {
                println!("{}{}", "  ".repeat(*depth + 1), row.label().bold());
            }
            FormRow::Field(field) => {
                let value = field.widget.display().replace('\n', " ");
                println!(
                    "{}{} {} {}",
                    "  ".repeat(field.depth + 1),
                    row.label(),
                    value.cyan(),
                    format!("({})", field.path).dimmed()
                );
            }
        }
    }

    Ok(())
}
