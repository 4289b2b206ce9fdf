//! A small completer built on `Suggestions`, wired to a runtime

mod common;

use std::cell::RefCell;
use std::rc::Rc;

use common::runtime;
use term_filter::commands::{CompletionRequest, EditorEvent};
use term_filter::filter::Filter;
use term_filter::messages::{Msg, SlotId};
use term_filter::model::TermType;
use term_filter::suggestions::{DefaultKind, SuggestionList, Suggestions};

const COLUMNS: [&str; 4] = ["host.name", "host.state", "service.name", "service.state"];

/// Columns starting with the typed text, or values for `host.name`
fn complete(request: &CompletionRequest) -> SuggestionList {
    let typed = request.label.trim().to_string();
    match request.term_type {
        Some(TermType::Column) => Suggestions::new()
            .term_type(TermType::Column)
            .search_term(typed.as_str())
            .data(COLUMNS.iter().copied().filter(|c| c.starts_with(typed.as_str())))
            .assemble(),
        Some(TermType::Value) if request.column.as_deref() == Some("host.name") => {
            Suggestions::new()
                .term_type(TermType::Value)
                .search_term(typed.as_str())
                .data(["web01", "web02", "db01"].into_iter().filter(|v| v.starts_with(typed.as_str())))
                .default_entry(typed.clone(), DefaultKind::Term(None))
                .assemble()
        }
        _ => SuggestionList::default(),
    }
}

#[test]
fn test_completer_round_trip() {
    let requests = Rc::new(RefCell::new(Vec::new()));
    let mut rt = runtime();
    let sink = Rc::clone(&requests);
    rt.surface_mut().subscribe("complete", move |event| {
        if let EditorEvent::Complete(request) = event {
            sink.borrow_mut().push(request.clone());
        }
    });

    rt.type_text("service.n");
    rt.run_until_idle();
    let list = complete(requests.borrow().last().unwrap());
    assert_eq!(list.entries.len(), 1);

    let picked = list.suggestions().remove(0);
    rt.dispatch(Msg::complete(SlotId::Input, picked));
    rt.run_until_idle();
    assert_eq!(rt.value(), "service.name");
}

#[test]
fn test_value_suggestions_with_default() {
    let requests = Rc::new(RefCell::new(Vec::new()));
    let mut rt = runtime();
    let sink = Rc::clone(&requests);
    rt.surface_mut().subscribe("complete", move |event| {
        if let EditorEvent::Complete(request) = event {
            sink.borrow_mut().push(request.clone());
        }
    });

    rt.type_text("host.name=we");
    rt.run_until_idle();

    let request = requests.borrow().last().cloned().unwrap();
    assert_eq!(request.column.as_deref(), Some("host.name"));
    let list = complete(&request);
    assert_eq!(list.entries.len(), 2);
    let default = list.default.as_ref().unwrap();
    assert_eq!(default.search, "we");
    assert_eq!(default.term_type, Some(TermType::Value));

    // Picking the default keeps the typed text as a value
    let payloads = list.suggestions();
    rt.dispatch(Msg::complete(SlotId::Input, payloads[0].clone()));
    rt.run_until_idle();
    assert_eq!(rt.value(), "host.name = we");
}

#[test]
fn test_unknown_column_gets_empty_list() {
    let request = CompletionRequest {
        label: "x".into(),
        term_type: Some(TermType::Column),
        ..CompletionRequest::default()
    };
    assert!(complete(&request).is_empty());
}

#[test]
fn test_search_everywhere_default() {
    let chain = match Filter::any(vec![
        Filter::condition("host.name", "=", "*web*"),
        Filter::condition("service.name", "=", "*web*"),
    ]) {
        Filter::Chain(chain) => chain,
        Filter::Expression(_) => unreachable!(),
    };

    let list = Suggestions::new()
        .search_term("web")
        .default_entry("web", DefaultKind::Terms(chain))
        .assemble();

    let default = list.default.unwrap();
    assert_eq!(default.columns, vec!["host.name", "service.name"]);
    let json = serde_json::to_value(&default).unwrap();
    assert_eq!(json["search"], "web");
    assert_eq!(json["terms"].as_array().unwrap().len(), 7);
}
