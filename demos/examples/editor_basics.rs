// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Load a page, drop components into it, copy and paste, delete, and save.
//!
//! Run:
//! - `RUST_LOG=trellis_editor=debug cargo run -p trellis_demos --example editor_basics`

use serde_json::json;
use tracing_subscriber::EnvFilter;
use trellis_editor::document::PageRecord;
use trellis_editor::drop::{DragItem, DropEvent, DropOutcome};
use trellis_editor::schema::SchemaRegistry;
use trellis_editor::{Editor, EditorConfig, SharedEditor};
use trellis_tree::ElementTree;

const CATALOGUE: &str = r#"{
    "Form":   { "config": { "props": { "layout": "horizontal" } } },
    "Input":  { "config": { "props": { "placeholder": "Type here" } } },
    "Button": { "config": { "props": { "text": "Submit" } }, "events": [] },
    "Col":    { "config": { "props": { "span": 12 } } },
    "Row":    { "elements": [ { "type": "Col", "name": "Left" }, { "type": "Col", "name": "Right" } ] }
}"#;

fn print_tree(title: &str, tree: &ElementTree) {
    println!("== {title} ==");
    for el in tree.iter() {
        let depth = tree.ancestors(el.id().as_str()).count();
        println!("{:indent$}{} ({}) {:?}", "", el.id(), el.kind(), el.name(), indent = depth * 2);
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let registry = SchemaRegistry::from_json_str(CATALOGUE).unwrap();
    let shared = SharedEditor::new(Editor::new(EditorConfig::default()), registry);

    let record: PageRecord = serde_json::from_value(json!({
        "id": 101,
        "name": "Signup",
        "pageData": r#"{"elements": [{"id": "Form_1", "type": "Form", "name": "Signup form"}]}"#
    }))
    .unwrap();
    assert!(shared.with(|ed| ed.load(record)).is_none());

    // A text input lands inside the form; the same input dropped on the page is refused.
    let into_form = DropEvent::new(DragItem::new("Input", "Email"), Some("Form_1".into()));
    let DropOutcome::Inserted(input) = pollster::block_on(shared.drop_item(into_form)).unwrap() else {
        unreachable!("the page surface owns this drop");
    };
    let outside = DropEvent::new(DragItem::new("Input", "Stray"), None);
    let refused = pollster::block_on(shared.drop_item(outside)).unwrap_err();
    println!("refused: {}", refused.advisory());

    // A row arrives with its two default columns.
    let row = DropEvent::new(DragItem::new("Row", "Actions"), None);
    let _ = pollster::block_on(shared.drop_item(row)).unwrap();
    print_tree("after drops", shared.borrow().page().unwrap().tree());

    // Copy the input and paste it next to itself.
    let copy = shared.with(|ed| {
        let _ = ed.click(Some(input.as_str()));
        assert!(ed.copy());
        ed.paste().unwrap()
    });
    println!("pasted {copy} next to {input}");

    // Deleting the form takes the selection with it.
    let removed = shared.with(|ed| ed.delete("Form_1"));
    println!("removed {removed:?}");
    assert!(shared.borrow().page().unwrap().selected().is_none());
    print_tree("after delete", shared.borrow().page().unwrap().tree());

    let saved = shared.borrow().snapshot().unwrap().to_record().unwrap();
    println!("== saved ==\n{}", serde_json::to_string_pretty(&saved).unwrap());
    println!("changes: {:?}", shared.with(Editor::take_changes));
}
