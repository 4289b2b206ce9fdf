use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;

use term_filter::cli::{CliArgs, ScriptStep};
use term_filter::config::EditorConfig;
use term_filter::filter::Filter;
use term_filter::keymap::{load_default_keymap, Command, Keymap};
use term_filter::messages::LoadPayload;
use term_filter::model::{FilterModel, Term};
use term_filter::runtime::Runtime;
use term_filter::surface::MemorySurface;

/// Final editor state printed after the script ran
#[derive(Serialize)]
struct Report<'a> {
    terms: Vec<&'a Term>,
    serialized: &'a str,
    input: &'a str,
    #[serde(skip_serializing_if = "<[String]>::is_empty")]
    submitted: &'a [String],
}

fn main() -> Result<()> {
    term_filter::tracing::init();

    let startup = CliArgs::parse()
        .into_config()
        .map_err(|e| anyhow::anyhow!(e))?;

    let mut config = match &startup.config_path {
        // --save-config may create the file
        Some(path) if startup.save_config && !path.exists() => EditorConfig::default(),
        Some(path) => EditorConfig::load_from(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => EditorConfig::load(),
    };
    if let Some(separator) = startup.separator {
        config.separator = separator;
    }

    if startup.save_config {
        let path = match &startup.config_path {
            Some(path) => config.save_to(path).map(|()| path.clone()),
            None => config.save(),
        }
        .context("Failed to save config")?;
        println!("{}", path.display());
        return Ok(());
    }

    let model = if startup.plain {
        FilterModel::plain(config)
    } else {
        FilterModel::filter(config)
    };
    let keymap = Keymap::with_bindings(load_default_keymap());
    if startup.list_keys {
        print_bindings(&keymap);
        return Ok(());
    }
    let mut runtime = Runtime::with_keymap(model, MemorySurface::new(), keymap);

    if let Some(json) = &startup.tree {
        let filter = Filter::from_json(json).context("Invalid filter tree JSON")?;
        runtime
            .load(LoadPayload::Tree(filter))
            .context("Failed to load filter tree")?;
    }

    for step in startup.script {
        match step {
            ScriptStep::Key(keystroke) => {
                if !runtime.handle_keystroke(keystroke) {
                    tracing::debug!(key = %keystroke, "key did nothing");
                }
            }
            ScriptStep::Text(text) => runtime.type_text(&text),
        }
        runtime.run_until_idle();
    }

    let model = runtime.model();
    let report = Report {
        terms: model.terms.iter().collect(),
        serialized: model.serialized(),
        input: model.input.text(),
        submitted: &runtime.surface().submitted,
    };
    println!("{}", serde_json::to_string_pretty(&report)?);

    Ok(())
}

fn print_bindings(keymap: &Keymap) {
    for command in Command::ALL {
        if let Some(keys) = keymap.display_for(command) {
            println!("{:<22} {}", command.display_name(), keys);
        }
    }
}
