// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Resolve pointer events on host render nodes to elements, and watch selection and hover.
//!
//! The host renders each element as a few nodes; only the outer node of each
//! component carries the element id. Pointer events on inner nodes bubble to
//! the nearest identified ancestor.
//!
//! Run:
//! - `cargo run -p trellis_demos --example pointer_selection`

use std::collections::HashMap;

use trellis_editor::document::{PageDocument, PageRecord};
use trellis_editor::{Editor, Mode};
use trellis_responder::hover::HoverEvent;
use trellis_responder::resolve::PointerResolver;
use trellis_responder::types::{IdentityLookup, InteractionEvent, ParentLookup};
use trellis_tree::{Element, ElementId};

/// Host render nodes: parent links and the element id carried by outer nodes.
#[derive(Default)]
struct HostTree {
    parents: HashMap<u32, u32>,
    ids: HashMap<u32, ElementId>,
}

impl HostTree {
    fn node(&mut self, node: u32, parent: Option<u32>, id: Option<&str>) {
        if let Some(p) = parent {
            self.parents.insert(node, p);
        }
        if let Some(id) = id {
            self.ids.insert(node, id.into());
        }
    }
}

struct Ids<'a>(&'a HostTree);
impl IdentityLookup<u32> for Ids<'_> {
    type Identity = ElementId;
    fn identity_of(&self, node: &u32) -> Option<ElementId> {
        self.0.ids.get(node).cloned()
    }
}

struct Parents<'a>(&'a HostTree);
impl ParentLookup<u32> for Parents<'_> {
    fn parent_of(&self, node: &u32) -> Option<u32> {
        self.0.parents.get(node).copied()
    }
}

fn show(label: &str, events: &[InteractionEvent<ElementId>]) {
    println!("{label:<28} {events:?}");
}

fn main() {
    let doc = PageDocument {
        elements: vec![
            Element::new("Form_1", "Form", "Signup")
                .with_child(Element::new("Input_1", "Input", "Email")),
            Element::new("Button_1", "Button", "Submit"),
        ],
        ..PageDocument::default()
    };
    let mut editor = Editor::default();
    let _ = editor.load(PageRecord {
        page_data: Some(doc.to_json().unwrap()),
        ..PageRecord::default()
    });

    // 1 Form_1 ─ 2 form body ─ 3 Input_1 ─ 4 input box
    // 5 Button_1 ─ 6 label
    // 9 page background
    let mut host = HostTree::default();
    host.node(1, None, Some("Form_1"));
    host.node(2, Some(1), None);
    host.node(3, Some(2), Some("Input_1"));
    host.node(4, Some(3), None);
    host.node(5, None, Some("Button_1"));
    host.node(6, Some(5), None);
    host.node(9, None, None);
    let resolver = PointerResolver::new(Ids(&host), Parents(&host));

    show("hover input box", &editor.pointer_over_at(&resolver, &4));
    show("hover form body", &editor.pointer_over_at(&resolver, &2));
    show("click button label", &editor.click_at(&resolver, &6));
    show("hover button label", &editor.pointer_over_at(&resolver, &6));
    let moved = editor.click_at(&resolver, &4);
    show("click input box", &moved);
    assert_eq!(
        moved,
        vec![
            InteractionEvent::Deselected("Button_1".into()),
            InteractionEvent::Selected("Input_1".into()),
        ]
    );
    show("hover page background", &editor.pointer_over_at(&resolver, &9));

    let _ = editor.pointer_over(Some("Button_1"));
    show("delete form", &[]);
    println!("  removed {:?}", editor.delete("Form_1"));
    let page = editor.page().unwrap();
    println!("  selected {:?}, hovered {:?}", page.selected(), page.hovered());
    assert_eq!(page.hovered(), Some(&ElementId::from("Button_1")));

    let preview = editor.set_mode(Mode::Preview);
    show("enter preview", &preview);
    assert_eq!(
        preview,
        vec![InteractionEvent::Hover(HoverEvent::Leave("Button_1".into()))]
    );
    show("click in preview", &editor.click_at(&resolver, &6));
}
