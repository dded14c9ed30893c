pub mod edit;
pub mod inspect;

pub use edit::{format, move_shape, raw, set, FormatArgs, MoveArgs, RawArgs, SetArgs};
pub use inspect::{elements, props, tree, ElementsArgs, PropsArgs, TreeArgs};

use crate::config::Config;
use anyhow::{anyhow, Context, Result};
use clap::Args;
use colored::Colorize;
use mobile_ui_editor::{EditSession, NodeRef, SelectEvent, Selection};
use std::path::{Path, PathBuf};

/// Which subtree to show in the property form
#[derive(Debug, Clone, Args)]
#[group(required = true, multiple = false)]
pub struct SelectorArgs {
    /// Module element id (first match wins)
    #[arg(long)]
    pub id: Option<String>,

    /// Canvas shape index (moduleElements, then enhancedData)
    #[arg(long)]
    pub shape: Option<usize>,

    /// JSON Pointer to an object (e.g. /theme)
    #[arg(long)]
    pub node: Option<String>,
}

impl SelectorArgs {
    fn event(&self) -> Result<SelectEvent> {
        if let Some(id) = &self.id {
            return Ok(SelectEvent::ListEntry(id.clone()));
        }
        if let Some(index) = self.shape {
            return Ok(SelectEvent::CanvasShape(index));
        }
        if let Some(pointer) = &self.node {
            let node = NodeRef::parse_pointer(pointer)
                .ok_or_else(|| anyhow!("Invalid JSON Pointer: {}", pointer))?;
            return Ok(SelectEvent::TreeNode(Selection::node(node)));
        }
        Err(anyhow!("One of --id, --shape or --node is required"))
    }

    fn describe(&self) -> String {
        match (&self.id, self.shape, &self.node) {
            (Some(id), _, _) => format!("id '{id}'"),
            (_, Some(index), _) => format!("shape {index}"),
            (_, _, Some(pointer)) => format!("node '{pointer}'"),
            _ => "nothing".to_string(),
        }
    }
}

/// Load `file` into a fresh session configured from `config`
pub fn open_session(file: &Path, config: &Config) -> Result<EditSession> {
    let mut session = EditSession::new(config.session_options());
    session
        .open(file)
        .with_context(|| format!("Failed to load {}", file.display()))?;
    Ok(session)
}

/// Route the selector through the session
pub fn select(session: &mut EditSession, selector: &SelectorArgs) -> Result<Selection> {
    session
        .select(selector.event()?)
        .ok_or_else(|| anyhow!("Nothing to select for {}", selector.describe()))
}

/// Save in place, or to `output` when given
pub fn save(session: &mut EditSession, output: Option<PathBuf>) -> Result<()> {
    match output {
        Some(path) => session
            .save_as(&path)
            .with_context(|| format!("Failed to save {}", path.display()))?,
        None => session.save().context("Failed to save file")?,
    }

    println!("  {} {}", "✓".green(), session.status());
    Ok(())
}
