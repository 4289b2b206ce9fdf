//! Command-line argument parsing for the term-filter binary
//!
//! Supports:
//! - Transcoding a filter tree (JSON) into terms
//! - Replaying a keystroke script through the editor
//! - Overriding the separator and the config file
//! - Listing the active key bindings
//! - Writing the effective settings to disk

use clap::Parser;
use std::path::PathBuf;

use crate::keymap::{parse_key_string, Keystroke};

/// Edit filter expressions as a sequence of terms
#[derive(Parser, Debug)]
#[command(
    name = "term-filter",
    version,
    about = "Edit filter expressions as a sequence of terms"
)]
pub struct CliArgs {
    /// Filter tree (JSON) to load before the script runs
    #[arg(long, value_name = "JSON")]
    pub tree: Option<String>,

    /// Keystroke script; `<key>` names a key (`<enter>`, `<shift+home>`), `<lt>` types `<`
    #[arg(long, value_name = "SCRIPT")]
    pub keys: Option<String>,

    /// Separator joining term searches
    #[arg(long, value_name = "SEP")]
    pub separator: Option<String>,

    /// Config file to use instead of the one in the config directory
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Edit untyped free-text terms instead of a filter expression
    #[arg(long)]
    pub plain: bool,

    /// Print the active key bindings and exit
    #[arg(long)]
    pub list_keys: bool,

    /// Write the effective settings to the config file (or --config) and exit
    #[arg(long)]
    pub save_config: bool,
}

/// One step of a keystroke script
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptStep {
    /// A named key, resolved through the keymap
    Key(Keystroke),
    /// Characters typed one at a time
    Text(String),
}

/// Configuration derived from CLI arguments
#[derive(Debug, Clone)]
pub struct StartupConfig {
    pub tree: Option<String>,
    pub script: Vec<ScriptStep>,
    pub separator: Option<String>,
    pub config_path: Option<PathBuf>,
    pub plain: bool,
    pub list_keys: bool,
    pub save_config: bool,
}

impl CliArgs {
    /// Convert parsed CLI args into startup configuration
    pub fn into_config(self) -> Result<StartupConfig, String> {
        if self.tree.is_none() && self.keys.is_none() && !self.list_keys && !self.save_config {
            return Err("Nothing to do: pass --tree and/or --keys".to_string());
        }
        if self.plain && self.tree.is_some() {
            return Err("--tree needs a filter editor, drop --plain".to_string());
        }

        let script = match self.keys.as_deref() {
            Some(keys) => parse_script(keys)?,
            None => Vec::new(),
        };

        Ok(StartupConfig {
            tree: self.tree,
            script,
            separator: self.separator,
            config_path: self.config,
            plain: self.plain,
            list_keys: self.list_keys,
            save_config: self.save_config,
        })
    }
}

/// Split a keystroke script into typed text and named keys
pub fn parse_script(script: &str) -> Result<Vec<ScriptStep>, String> {
    let mut steps = Vec::new();
    let mut text = String::new();
    let mut rest = script;

    while let Some(open) = rest.find('<') {
        text.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let close = after
            .find('>')
            .ok_or_else(|| format!("Unclosed key in script: <{}", after))?;
        let name = &after[..close];

        if name == "lt" {
            text.push('<');
        } else {
            if !text.is_empty() {
                steps.push(ScriptStep::Text(std::mem::take(&mut text)));
            }
            let keystroke = parse_key_string(name).map_err(|e| e.to_string())?;
            steps.push(ScriptStep::Key(keystroke));
        }
        rest = &after[close + 1..];
    }

    text.push_str(rest);
    if !text.is_empty() {
        steps.push(ScriptStep::Text(text));
    }

    Ok(steps)
}
