//! Shared test helpers for integration tests
//!
//! Note: Functions may appear unused because each test file compiles separately.

#![allow(dead_code)]

use term_filter::commands::Cmd;
use term_filter::config::EditorConfig;
use term_filter::filter::Filter;
use term_filter::messages::Msg;
use term_filter::model::{FilterModel, Term};
use term_filter::runtime::Runtime;
use term_filter::surface::MemorySurface;
use term_filter::update::update;

/// An empty filter editor with default config
pub fn filter_model() -> FilterModel {
    FilterModel::filter(EditorConfig::default())
}

/// An empty plain (untyped) editor with default config
pub fn plain_model() -> FilterModel {
    FilterModel::plain(EditorConfig::default())
}

/// A filter editor holding the terms of `filter`
pub fn model_from(filter: &Filter) -> FilterModel {
    FilterModel::from_filter(EditorConfig::default(), filter)
}

/// Type `text` one character at a time, collecting every returned command
pub fn type_text(model: &mut FilterModel, text: &str) -> Vec<Cmd> {
    text.chars()
        .filter_map(|ch| update(model, Msg::insert_char(ch)))
        .flat_map(Cmd::flatten)
        .collect()
}

/// Type `text` and commit it as a term
pub fn commit_text(model: &mut FilterModel, text: &str) -> Vec<Cmd> {
    let mut cmds = type_text(model, text);
    if let Some(cmd) = update(model, Msg::exchange()) {
        cmds.extend(cmd.flatten());
    }
    cmds
}

/// Labels of the committed terms
pub fn labels(model: &FilterModel) -> Vec<String> {
    model.terms.iter().map(|t| t.label.clone()).collect()
}

/// An empty filter editor attached to a fresh in-memory surface
pub fn runtime() -> Runtime<MemorySurface> {
    Runtime::new(filter_model(), MemorySurface::new())
}

/// A runtime whose surface already shows `terms`
pub fn prerendered_runtime(terms: &[Term]) -> Runtime<MemorySurface> {
    Runtime::new(filter_model(), MemorySurface::with_prerendered(terms))
}

/// Type `text` through a runtime and commit it as a term
pub fn commit(runtime: &mut Runtime<MemorySurface>, text: &str) {
    runtime.type_text(text);
    runtime.dispatch(Msg::exchange());
    runtime.run_until_idle();
}

/// Build `host = web & state != 0` in a runtime
pub fn two_conditions(runtime: &mut Runtime<MemorySurface>) {
    commit(runtime, "host");
    commit(runtime, "web");
    runtime.type_text("&");
    commit(runtime, "state");
    runtime.type_text("!=");
    commit(runtime, "0");
}
