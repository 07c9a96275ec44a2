// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The editor: one open page, its selection, and the commands that edit it.
//!
//! ## Overview
//!
//! [`Editor`] owns the element tree of the open page together with the
//! interaction state and the clipboard. Every mutation is a synchronous
//! `&mut self` call that either applies completely or not at all, so the tree
//! and its index can never be observed half-updated.
//!
//! Drops need schema resolution first, which is asynchronous; they go through
//! [`SharedEditor`](crate::shared::SharedEditor), which only borrows the
//! editor between awaits.
//!
//! ## Commands
//!
//! - [`click`](Editor::click) and [`pointer_over`](Editor::pointer_over) drive
//!   selection and hover.
//! - [`copy`](Editor::copy) remembers the selected node.
//! - [`paste`](Editor::paste) deep-clones it: next to itself if it is still the
//!   selection, into the selection otherwise, at the page root when nothing is
//!   selected.
//! - [`delete`](Editor::delete) removes a subtree and reconciles selection and hover.
//! - [`load`](Editor::load) and [`unload`](Editor::unload) open and close pages.
//!
//! Changes accumulate in a [`Changes`] set until the host collects them with
//! [`take_changes`](Editor::take_changes) and repaints.

use serde_json::Value;
use trellis_responder::adapters::element_tree::selection_for;
use trellis_responder::resolve::PointerResolver;
use trellis_responder::selection::InteractionState;
use trellis_responder::types::{IdentityLookup, InteractionEvent, ParentLookup, Selection};
use trellis_tree::{ElementId, ElementTree, IdGenerator};

use crate::clipboard::Clipboard;
use crate::config::EditorConfig;
use crate::document::{self, MAX_NESTING, PageDocument, PageMeta, PageRecord, PageSnapshot};
use crate::drop::{DropEvent, DropOutcome, PreparedDrop};
use crate::error::EditorError;

bitflags::bitflags! {
    /// What changed since the host last called [`Editor::take_changes`].
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct Changes: u8 {
        /// A page was opened or closed.
        const PAGE      = 0b0000_0001;
        /// Elements were added, removed, or renamed.
        const TREE      = 0b0000_0010;
        /// The selection moved.
        const SELECTION = 0b0000_0100;
        /// The hover moved.
        const HOVER     = 0b0000_1000;
        /// Something was copied.
        const CLIPBOARD = 0b0001_0000;
        /// The editor switched between editing and preview.
        const MODE      = 0b0010_0000;
    }
}

/// Whether the page is being edited or previewed.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum Mode {
    /// Pointer input selects and hovers; edit commands apply.
    #[default]
    Edit,
    /// The page behaves as it will when published; the editor ignores input.
    Preview,
}

/// An open page.
#[derive(Debug)]
pub struct Page {
    meta: PageMeta,
    config: Value,
    events: Value,
    tree: ElementTree,
    interaction: InteractionState<ElementId>,
}

impl Page {
    /// Metadata the page was loaded with.
    pub fn meta(&self) -> &PageMeta {
        &self.meta
    }

    /// Page-level configuration.
    pub fn config(&self) -> &Value {
        &self.config
    }

    /// Page-level events.
    pub fn events(&self) -> &Value {
        &self.events
    }

    /// The element tree.
    pub fn tree(&self) -> &ElementTree {
        &self.tree
    }

    /// The selected element, if any.
    pub fn selected(&self) -> Option<&Selection<ElementId>> {
        self.interaction.selected()
    }

    /// The hovered element, if any.
    pub fn hovered(&self) -> Option<&ElementId> {
        self.interaction.hovered()
    }

    /// The current content as a document.
    pub fn document(&self) -> PageDocument {
        PageDocument {
            config: self.config.clone(),
            events: self.events.clone(),
            elements: self.tree.to_elements(),
        }
    }
}

/// Page editor.
#[derive(Debug)]
pub struct Editor {
    config: EditorConfig,
    ids: IdGenerator,
    clipboard: Clipboard,
    mode: Mode,
    page: Option<Page>,
    epoch: u64,
    changes: Changes,
}

impl Default for Editor {
    fn default() -> Self {
        Self::new(EditorConfig::default())
    }
}

impl Editor {
    /// Create an editor with no page open.
    pub fn new(config: EditorConfig) -> Self {
        Self::with_ids(config, IdGenerator::new())
    }

    /// Create an editor that issues ids from `ids`.
    pub fn with_ids(config: EditorConfig, ids: IdGenerator) -> Self {
        Self {
            config,
            ids,
            clipboard: Clipboard::new(),
            mode: Mode::Edit,
            page: None,
            epoch: 0,
            changes: Changes::empty(),
        }
    }

    /// The configuration.
    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    /// The open page, if any.
    pub fn page(&self) -> Option<&Page> {
        self.page.as_ref()
    }

    /// The clipboard. It survives page loads.
    pub fn clipboard(&self) -> &Clipboard {
        &self.clipboard
    }

    /// Current mode.
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Counter bumped every time a page is opened or closed.
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    /// Collect and reset the accumulated changes.
    pub fn take_changes(&mut self) -> Changes {
        core::mem::take(&mut self.changes)
    }

    /// Switch modes. Entering preview drops selection and hover.
    pub fn set_mode(&mut self, mode: Mode) -> Vec<InteractionEvent<ElementId>> {
        if self.mode == mode {
            return Vec::new();
        }
        self.mode = mode;
        self.changes |= Changes::MODE;
        let events = match (&mut self.page, mode) {
            (Some(page), Mode::Preview) => page.interaction.clear(),
            _ => Vec::new(),
        };
        self.note(&events);
        events
    }

    /// Open `record`, replacing the current page.
    ///
    /// Never fails. If the stored document is unusable the page opens empty
    /// and the reason is returned for the host to show.
    pub fn load(&mut self, record: PageRecord) -> Option<EditorError> {
        self.unload();
        let decoded = document::decode(record, &self.config.page_defaults);
        self.epoch += 1;
        tracing::info!(
            page = decoded.meta.id,
            elements = decoded.tree.len(),
            epoch = self.epoch,
            "page loaded"
        );
        self.page = Some(Page {
            meta: decoded.meta,
            config: decoded.config,
            events: decoded.events,
            tree: decoded.tree,
            interaction: InteractionState::new(),
        });
        self.changes |= Changes::PAGE | Changes::TREE;
        decoded.recovered
    }

    /// Close the current page. Returns false if none was open.
    ///
    /// Drops still resolving for the closed page will not commit.
    pub fn unload(&mut self) -> bool {
        self.epoch += 1;
        let Some(page) = self.page.take() else {
            return false;
        };
        tracing::info!(page = page.meta.id, epoch = self.epoch, "page unloaded");
        self.changes |= Changes::PAGE | Changes::TREE;
        if page.selected().is_some() {
            self.changes |= Changes::SELECTION;
        }
        if page.hovered().is_some() {
            self.changes |= Changes::HOVER;
        }
        true
    }

    /// The saveable state of the open page.
    pub fn snapshot(&self) -> Option<PageSnapshot> {
        self.page.as_ref().map(|page| PageSnapshot {
            meta: page.meta.clone(),
            document: page.document(),
        })
    }

    /// Handle a click on `hit` (`None` when outside every element).
    pub fn click(&mut self, hit: Option<&str>) -> Vec<InteractionEvent<ElementId>> {
        if self.mode == Mode::Preview {
            return Vec::new();
        }
        let Some(page) = self.page.as_mut() else {
            return Vec::new();
        };
        let selection = hit.and_then(|id| selection_for(&page.tree, id));
        let events = page.interaction.click(selection);
        self.note(&events);
        events
    }

    /// Handle a pointer move over `hit` (`None` when outside every element).
    pub fn pointer_over(&mut self, hit: Option<&str>) -> Vec<InteractionEvent<ElementId>> {
        if self.mode == Mode::Preview {
            return Vec::new();
        }
        let Some(page) = self.page.as_mut() else {
            return Vec::new();
        };
        let hit = hit.filter(|id| page.tree.contains(id)).map(ElementId::from);
        let events = page.interaction.pointer_over(hit);
        self.note(&events);
        events
    }

    /// Handle a click on a host render node, resolved to the nearest element.
    pub fn click_at<K, L, P>(
        &mut self,
        resolver: &PointerResolver<K, L, P>,
        target: &K,
    ) -> Vec<InteractionEvent<ElementId>>
    where
        K: Clone,
        L: IdentityLookup<K, Identity = ElementId>,
        P: ParentLookup<K>,
    {
        let hit = resolver.resolve(target);
        self.click(hit.as_ref().map(ElementId::as_str))
    }

    /// Handle a pointer move over a host render node, resolved to the nearest element.
    pub fn pointer_over_at<K, L, P>(
        &mut self,
        resolver: &PointerResolver<K, L, P>,
        target: &K,
    ) -> Vec<InteractionEvent<ElementId>>
    where
        K: Clone,
        L: IdentityLookup<K, Identity = ElementId>,
        P: ParentLookup<K>,
    {
        let hit = resolver.resolve(target);
        self.pointer_over(hit.as_ref().map(ElementId::as_str))
    }

    /// Remember the selected element for a later paste. Returns false when nothing is selected.
    pub fn copy(&mut self) -> bool {
        if self.mode == Mode::Preview {
            return false;
        }
        let Some(id) = self
            .page
            .as_ref()
            .and_then(Page::selected)
            .map(|sel| sel.id.clone())
        else {
            return false;
        };
        tracing::debug!(%id, "copied");
        self.clipboard.copy(id);
        self.changes |= Changes::CLIPBOARD;
        true
    }

    /// Paste a deep copy of the copied element. Returns the id of the copy.
    pub fn paste(&mut self) -> Result<ElementId, EditorError> {
        if self.mode == Mode::Preview {
            return Err(EditorError::Preview);
        }
        let page = self.page.as_mut().ok_or(EditorError::NoPage)?;
        let copied = self.clipboard.get().ok_or(EditorError::ClipboardEmpty)?;
        let Some(source) = page.tree.get(copied.as_str()) else {
            tracing::warn!(id = %copied, "copied element no longer exists");
            return Err(EditorError::ClipboardStale { id: copied.clone() });
        };
        let parent = match page.interaction.selected() {
            Some(sel) if sel.id == *copied => source.parent_id().cloned(),
            Some(sel) => Some(sel.id.clone()),
            None => None,
        };
        let base = parent.as_ref().map_or(0, |p| page.tree.depth(p.as_str()));
        if base + page.tree.height(copied.as_str()) > MAX_NESTING {
            return Err(EditorError::TooDeep { limit: MAX_NESTING });
        }
        let id = page.tree.clone_subtree(
            copied.as_str(),
            parent.as_ref().map(ElementId::as_str),
            &self.ids,
        )?;
        tracing::debug!(source = %copied, %id, parent = ?parent, "pasted");
        self.changes |= Changes::TREE;
        Ok(id)
    }

    /// Remove `id` and its subtree. Returns the removed ids; empty if `id` is unknown.
    pub fn delete(&mut self, id: &str) -> Vec<ElementId> {
        if self.mode == Mode::Preview {
            return Vec::new();
        }
        let Some(page) = self.page.as_mut() else {
            return Vec::new();
        };
        let removed = page.tree.remove(id);
        if removed.is_empty() {
            return removed;
        }
        let events = page.interaction.forget(&removed);
        tracing::debug!(id, count = removed.len(), "deleted");
        self.changes |= Changes::TREE;
        self.note(&events);
        removed
    }

    /// Remove the selected element and its subtree.
    pub fn delete_selected(&mut self) -> Vec<ElementId> {
        let Some(id) = self
            .page
            .as_ref()
            .and_then(Page::selected)
            .map(|sel| sel.id.clone())
        else {
            return Vec::new();
        };
        self.delete(id.as_str())
    }

    /// Change the display label of `id`. Returns false if `id` is unknown.
    pub fn rename(&mut self, id: &str, name: impl Into<String>) -> bool {
        if self.mode == Mode::Preview {
            return false;
        }
        let renamed = self
            .page
            .as_mut()
            .is_some_and(|page| page.tree.rename(id, name));
        if renamed {
            self.changes |= Changes::TREE;
        }
        renamed
    }

    /// The session a drop starts in: current epoch and the default-children depth limit.
    pub(crate) fn begin_drop(&self) -> Result<(u64, usize), EditorError> {
        self.editable_page()?;
        Ok((self.epoch, self.config.max_default_depth))
    }

    /// Check the placement rules for `event`, a drop begun in session `epoch`.
    ///
    /// The target is the drop surface's container or, for drops on the page
    /// itself, the current selection.
    pub(crate) fn check_placement(&self, event: &DropEvent, epoch: u64) -> Result<(), EditorError> {
        if epoch != self.epoch {
            return Err(EditorError::Superseded);
        }
        let page = self.editable_page()?;
        let (target_id, target_kind) = match &event.target {
            Some(id) => (Some(id.as_str()), None),
            None => match page.selected() {
                Some(sel) => (Some(sel.id.as_str()), Some(sel.kind.as_str())),
                None => (None, None),
            },
        };
        match self
            .config
            .placement
            .violation(&event.item.kind, target_id, target_kind, &page.tree)
        {
            None => Ok(()),
            Some(rule) => Err(EditorError::PlacementRejected {
                kind: event.item.kind.clone(),
                container: rule.container.clone(),
                target: target_id.map(ElementId::from),
            }),
        }
    }

    /// Insert a resolved drop, unless it was overtaken while resolving.
    pub(crate) fn commit_drop(&mut self, drop: PreparedDrop) -> Result<DropOutcome, EditorError> {
        let PreparedDrop { event, node, epoch } = drop;
        if event.claim.is_cancelled() {
            return Err(EditorError::Cancelled);
        }
        if epoch != self.epoch {
            return Err(EditorError::Superseded);
        }
        if self.mode == Mode::Preview {
            return Err(EditorError::Preview);
        }
        let page = self.page.as_mut().ok_or(EditorError::NoPage)?;
        if let Some(target) = &event.target
            && !page.tree.contains(target.as_str())
        {
            return Err(EditorError::TargetMissing { id: target.clone() });
        }
        let base = event.target.as_ref().map_or(0, |t| page.tree.depth(t.as_str()));
        if base + node.height() > MAX_NESTING {
            return Err(EditorError::TooDeep { limit: MAX_NESTING });
        }
        let id = match event.item.id {
            Some(id) if !id.as_str().is_empty() && !page.tree.contains(id.as_str()) => id,
            _ => page.tree.mint_id(&self.ids, &node.kind),
        };
        let kind = node.kind.clone();
        let count = node.count();
        let element = node.realize(id, &page.tree, &self.ids);
        let id = page
            .tree
            .insert(event.target.as_ref().map(ElementId::as_str), element)?;
        let events = if self.config.select_on_drop {
            selection_for(&page.tree, id.as_str())
                .map(|sel| page.interaction.select(sel))
                .unwrap_or_default()
        } else {
            Vec::new()
        };
        tracing::debug!(%id, %kind, target = ?event.target, count, "dropped");
        self.changes |= Changes::TREE;
        self.note(&events);
        Ok(DropOutcome::Inserted(id))
    }

    fn editable_page(&self) -> Result<&Page, EditorError> {
        if self.mode == Mode::Preview {
            return Err(EditorError::Preview);
        }
        self.page.as_ref().ok_or(EditorError::NoPage)
    }

    fn note(&mut self, events: &[InteractionEvent<ElementId>]) {
        for event in events {
            self.changes |= match event {
                InteractionEvent::Selected(_) | InteractionEvent::Deselected(_) => Changes::SELECTION,
                InteractionEvent::Hover(_) => Changes::HOVER,
            };
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use trellis_responder::hover::HoverEvent;
    use trellis_tree::Element;

    // Form_1 ─┬─ Input_1
    //         └─ Row_1 ── Select_1
    // Button_1
    fn record() -> PageRecord {
        let doc = PageDocument {
            config: Value::Null,
            events: Value::Null,
            elements: vec![
                Element::new("Form_1", "Form", "Signup")
                    .with_child(Element::new("Input_1", "Input", "Email"))
                    .with_child(
                        Element::new("Row_1", "Row", "")
                            .with_child(Element::new("Select_1", "Select", "Plan")),
                    ),
                Element::new("Button_1", "Button", "Submit"),
            ],
        };
        PageRecord {
            meta: PageMeta {
                id: 1,
                name: "Signup".into(),
                ..PageMeta::default()
            },
            page_data: Some(doc.to_json().unwrap()),
        }
    }

    fn editor() -> Editor {
        let mut ed = Editor::with_ids(EditorConfig::default(), IdGenerator::with_seed("t"));
        assert!(ed.load(record()).is_none());
        let _ = ed.take_changes();
        ed
    }

    fn tree(ed: &Editor) -> &ElementTree {
        ed.page().unwrap().tree()
    }

    fn child_ids(ed: &Editor, id: &str) -> Vec<ElementId> {
        tree(ed).get(id).unwrap().children().map(|c| c.id().clone()).collect()
    }

    fn root_ids(ed: &Editor) -> Vec<ElementId> {
        tree(ed).roots().map(|r| r.id().clone()).collect()
    }

    #[test]
    fn paste_stops_at_the_nesting_limit_and_the_page_reloads() {
        let mut ed = editor();
        let _ = ed.click(Some("Button_1"));
        assert!(ed.copy());
        let mut target = ElementId::from("Form_1");
        let err = loop {
            let _ = ed.click(Some(target.as_str()));
            match ed.paste() {
                Ok(id) => target = id,
                Err(err) => break err,
            }
        };
        assert!(matches!(err, EditorError::TooDeep { limit: MAX_NESTING }));
        assert_eq!(tree(&ed).depth(target.as_str()), MAX_NESTING);
        let len = tree(&ed).len();

        let saved = ed.snapshot().unwrap().to_record().unwrap();
        assert!(ed.load(saved).is_none(), "a page the editor built must load again");
        assert_eq!(tree(&ed).len(), len);
        assert_eq!(tree(&ed).depth(target.as_str()), MAX_NESTING);
    }

    #[test]
    fn paste_onto_the_copied_node_adds_a_sibling() {
        let mut ed = editor();
        let _ = ed.click(Some("Form_1"));
        assert!(ed.copy());
        let copy = ed.paste().unwrap();
        assert_eq!(root_ids(&ed), vec!["Form_1".into(), "Button_1".into(), copy.clone()]);

        let source = tree(&ed).snapshot("Form_1").unwrap();
        let clone = tree(&ed).snapshot(copy.as_str()).unwrap();
        assert_eq!(clone.count(), source.count());
        let kinds = |e: &Element| {
            let t = ElementTree::from_elements(vec![e.clone()]).unwrap();
            t.iter().map(|n| (n.kind().to_owned(), n.name().to_owned())).collect::<Vec<_>>()
        };
        assert_eq!(kinds(&clone), kinds(&source));
        assert!(clone.ids().iter().all(|id| !source.ids().contains(id)));
        tree(&ed).validate().unwrap();
    }

    #[test]
    fn paste_of_a_nested_node_stays_with_its_parent() {
        let mut ed = editor();
        let _ = ed.click(Some("Input_1"));
        assert!(ed.copy());
        let copy = ed.paste().unwrap();
        assert_eq!(
            child_ids(&ed, "Form_1"),
            vec!["Input_1".into(), "Row_1".into(), copy]
        );
    }

    #[test]
    fn paste_into_another_selection_nests() {
        let mut ed = editor();
        let _ = ed.click(Some("Button_1"));
        assert!(ed.copy());
        let _ = ed.click(Some("Row_1"));
        let copy = ed.paste().unwrap();
        assert_eq!(child_ids(&ed, "Row_1"), vec!["Select_1".into(), copy.clone()]);
        assert_eq!(copy.kind_prefix(), "Button");
        assert_eq!(tree(&ed).get(copy.as_str()).unwrap().name(), "Submit");
    }

    #[test]
    fn paste_without_selection_goes_to_the_root() {
        let mut ed = editor();
        let _ = ed.click(Some("Select_1"));
        assert!(ed.copy());
        let _ = ed.click(None);
        let copy = ed.paste().unwrap();
        assert_eq!(root_ids(&ed).last(), Some(&copy));
    }

    #[test]
    fn copy_without_selection_does_nothing() {
        let mut ed = editor();
        assert!(!ed.copy());
        assert!(ed.clipboard().get().is_none());
        assert!(matches!(ed.paste(), Err(EditorError::ClipboardEmpty)));
        assert_eq!(tree(&ed).len(), 5);
    }

    #[test]
    fn paste_of_deleted_node_is_stale() {
        let mut ed = editor();
        let _ = ed.click(Some("Input_1"));
        assert!(ed.copy());
        let _ = ed.delete("Input_1");
        let err = ed.paste().unwrap_err();
        assert!(matches!(err, EditorError::ClipboardStale { ref id } if id == "Input_1"));
        assert_eq!(tree(&ed).len(), 4);
        tree(&ed).validate().unwrap();
    }

    #[test]
    fn deleting_an_ancestor_clears_selection_and_hover() {
        let mut ed = editor();
        let _ = ed.click(Some("Select_1"));
        let _ = ed.pointer_over(Some("Input_1"));
        let _ = ed.take_changes();
        let removed = ed.delete("Form_1");
        assert_eq!(
            removed,
            vec![
                ElementId::from("Form_1"),
                "Input_1".into(),
                "Row_1".into(),
                "Select_1".into()
            ]
        );
        let page = ed.page().unwrap();
        assert!(page.selected().is_none());
        assert!(page.hovered().is_none());
        assert_eq!(
            ed.take_changes(),
            Changes::TREE | Changes::SELECTION | Changes::HOVER
        );
        tree(&ed).validate().unwrap();
    }

    #[test]
    fn deleting_elsewhere_keeps_selection() {
        let mut ed = editor();
        let _ = ed.click(Some("Input_1"));
        let _ = ed.delete("Button_1");
        assert_eq!(ed.page().unwrap().selected().map(|s| s.id.as_str()), Some("Input_1"));
    }

    #[test]
    fn delete_unknown_is_a_no_op() {
        let mut ed = editor();
        assert!(ed.delete("Ghost_1").is_empty());
        assert!(ed.take_changes().is_empty());
        assert_eq!(tree(&ed).len(), 5);
    }

    #[test]
    fn delete_selected_removes_the_selection() {
        let mut ed = editor();
        assert!(ed.delete_selected().is_empty());
        let _ = ed.click(Some("Row_1"));
        assert_eq!(ed.delete_selected().len(), 2);
        assert!(!tree(&ed).contains("Select_1"));
    }

    #[test]
    fn click_on_unknown_element_is_a_click_outside() {
        let mut ed = editor();
        let _ = ed.click(Some("Form_1"));
        let events = ed.click(Some("Ghost_1"));
        assert_eq!(events, vec![InteractionEvent::Deselected("Form_1".into())]);
        assert!(ed.pointer_over(Some("Ghost_1")).is_empty());
    }

    #[test]
    fn malformed_document_opens_an_empty_usable_page() {
        let mut ed = Editor::with_ids(EditorConfig::default(), IdGenerator::with_seed("t"));
        let mut rec = record();
        rec.page_data = Some("{\"elements\": [".into());
        let err = ed.load(rec).unwrap();
        assert!(matches!(err, EditorError::MalformedDocument { .. }));
        let page = ed.page().unwrap();
        assert!(page.tree().is_empty());
        assert_eq!(page.config(), &ed.config().page_defaults.config);
        assert_eq!(page.meta().name, "Signup");
        assert!(ed.click(None).is_empty());
        assert_eq!(ed.snapshot().unwrap().document.elements, Vec::new());
    }

    #[test]
    fn clipboard_survives_reload() {
        let mut ed = editor();
        let _ = ed.click(Some("Button_1"));
        assert!(ed.copy());
        assert!(ed.unload());
        assert!(ed.page().is_none());
        assert!(!ed.unload());
        assert!(matches!(ed.paste(), Err(EditorError::NoPage)));
        assert!(ed.load(record()).is_none());
        assert!(ed.page().unwrap().selected().is_none());
        let copy = ed.paste().unwrap();
        assert_eq!(root_ids(&ed).last(), Some(&copy));
    }

    #[test]
    fn load_and_unload_bump_the_epoch() {
        let mut ed = editor();
        let before = ed.epoch();
        assert!(ed.load(record()).is_none());
        assert!(ed.epoch() > before);
        let loaded = ed.epoch();
        let _ = ed.unload();
        assert!(ed.epoch() > loaded);
    }

    #[test]
    fn preview_ignores_input_and_commands() {
        let mut ed = editor();
        let _ = ed.click(Some("Input_1"));
        let events = ed.set_mode(Mode::Preview);
        assert_eq!(events, vec![InteractionEvent::Deselected("Input_1".into())]);
        assert!(ed.click(Some("Form_1")).is_empty());
        assert!(ed.pointer_over(Some("Form_1")).is_empty());
        assert!(!ed.copy());
        assert!(matches!(ed.paste(), Err(EditorError::Preview)));
        assert!(ed.delete("Form_1").is_empty());
        assert!(!ed.rename("Form_1", "x"));
        assert!(ed.set_mode(Mode::Preview).is_empty());
        let _ = ed.set_mode(Mode::Edit);
        assert_eq!(ed.click(Some("Form_1")), vec![InteractionEvent::Selected("Form_1".into())]);
    }

    #[test]
    fn rename_updates_the_label() {
        let mut ed = editor();
        assert!(ed.rename("Input_1", "Work email"));
        assert_eq!(tree(&ed).get("Input_1").unwrap().name(), "Work email");
        assert!(!ed.rename("Ghost_1", "x"));
        assert_eq!(ed.take_changes(), Changes::TREE);
    }

    #[test]
    fn snapshot_reloads_to_the_same_page() {
        let mut ed = editor();
        let _ = ed.click(Some("Form_1"));
        assert!(ed.copy());
        let _ = ed.paste().unwrap();
        let snapshot = ed.snapshot().unwrap();

        let mut other = Editor::default();
        assert!(other.load(snapshot.to_record().unwrap()).is_none());
        assert_eq!(tree(&other).to_elements(), tree(&ed).to_elements());
        assert_eq!(other.page().unwrap().meta(), ed.page().unwrap().meta());
    }

    #[test]
    fn changes_accumulate_until_taken() {
        let mut ed = editor();
        let _ = ed.pointer_over(Some("Button_1"));
        let _ = ed.click(Some("Input_1"));
        assert!(ed.copy());
        assert_eq!(
            ed.take_changes(),
            Changes::HOVER | Changes::SELECTION | Changes::CLIPBOARD
        );
        assert!(ed.take_changes().is_empty());
    }

    #[test]
    fn host_nodes_resolve_to_their_element() {
        // Host nodes: 10 renders Form_1, 11 is its inner wrapper, 12 renders Input_1, 99 is chrome.
        struct Ids;
        impl IdentityLookup<u32> for Ids {
            type Identity = ElementId;
            fn identity_of(&self, node: &u32) -> Option<ElementId> {
                match node {
                    10 => Some("Form_1".into()),
                    12 => Some("Input_1".into()),
                    _ => None,
                }
            }
        }
        struct Parents;
        impl ParentLookup<u32> for Parents {
            fn parent_of(&self, node: &u32) -> Option<u32> {
                match node {
                    11 => Some(10),
                    12 => Some(11),
                    _ => None,
                }
            }
        }
        let resolver = PointerResolver::new(Ids, Parents);
        let mut ed = editor();
        assert_eq!(
            ed.pointer_over_at(&resolver, &11),
            vec![InteractionEvent::Hover(HoverEvent::Enter("Form_1".into()))]
        );
        let _ = ed.click_at(&resolver, &12);
        assert_eq!(ed.page().unwrap().selected().map(|s| s.kind.as_str()), Some("Input"));
        let _ = ed.click_at(&resolver, &99);
        assert!(ed.page().unwrap().selected().is_none());
    }
}
