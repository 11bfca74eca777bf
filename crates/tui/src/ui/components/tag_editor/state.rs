//! Tag collection editor: one suggestion input plus the committed tag set.
//!
//! The editor only reacts to the events its children raise. A submitted value
//! is appended, a deleted value is filtered out, and every mutation is
//! re-broadcast as `Updated` with the full tag list.

use crossterm::event::KeyEvent;
use quill_types::{InputEvent, Outcome, TagEditorEvent, TagListEvent};
use rat_focus::{FocusBuilder, FocusFlag, HasFocus};
use ratatui::layout::Rect;
use tracing::{debug, info};

use super::tag_list::{ChipArea, TagListState, TagListView};
use crate::ui::components::suggestion_input::{InputMsg, SuggestionInputState};

/// Messages accepted by the tag editor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TagEditorMsg {
    /// Forwarded to the input core.
    Input(InputMsg),
    /// A key pressed while the tag list has focus.
    ListKey(KeyEvent),
    /// Pointer click inside the tag list.
    ListClick { column: u16, row: u16 },
    /// External `value` property change, mirrored into the field.
    SetValue(String),
}

#[derive(Debug)]
pub struct TagEditorState {
    /// Committed tags in insertion order
    tags: Vec<String>,
    /// Mirror of the field text, exposed to the parent
    value: String,
    /// Child input core
    input: SuggestionInputState,
    /// Child tag list display
    list: TagListState,
    /// Last focus state forwarded to the input core
    input_focused: bool,
    /// Container focus
    container: FocusFlag,
    pub f_input: FocusFlag,
    pub f_list: FocusFlag,
}

impl TagEditorState {
    /// Seed the editor from the `tags` property.
    pub fn new(tags: Vec<String>, input: SuggestionInputState) -> Self {
        Self {
            value: input.value().to_string(),
            tags,
            input,
            list: TagListState::default(),
            input_focused: false,
            container: FocusFlag::named("quill.tags"),
            f_input: FocusFlag::named("quill.tags.input"),
            f_list: FocusFlag::named("quill.tags.list"),
        }
    }

    // ===== SELECTORS =====

    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn view(&self) -> TagListView<'_> {
        TagListView::of(&self.tags)
    }

    pub fn input(&self) -> &SuggestionInputState {
        &self.input
    }

    pub fn input_mut(&mut self) -> &mut SuggestionInputState {
        &mut self.input
    }

    pub fn list(&self) -> &TagListState {
        &self.list
    }

    /// Lay the chips out for rendering and hit-testing.
    pub fn layout_tags(&mut self, area: Rect) -> Vec<ChipArea> {
        self.list.layout(area, &self.tags).to_vec()
    }

    // ===== REDUCER =====

    pub fn update(&mut self, msg: TagEditorMsg) -> Outcome<TagEditorEvent> {
        match msg {
            TagEditorMsg::Input(input_msg) => {
                let input_outcome = self.input.update(input_msg);
                self.absorb_input(input_outcome)
            }
            TagEditorMsg::ListKey(key) => {
                let list_outcome = self.list.handle_key(key, &self.tags);
                self.absorb_list(list_outcome)
            }
            TagEditorMsg::ListClick { column, row } => {
                let list_outcome = self.list.click(column, row, &self.tags);
                self.absorb_list(list_outcome)
            }
            TagEditorMsg::SetValue(value) => {
                self.input.set_value(&value);
                self.value = value;
                Outcome::handled()
            }
        }
    }

    /// Append `value` and broadcast the new set. No trimming, no dedup.
    pub fn add_tag(&mut self, value: String) -> TagEditorEvent {
        debug!(%value, "adding tag");
        self.tags.push(value);
        self.updated()
    }

    /// Remove every tag equal to `value` and broadcast, even when nothing
    /// matched.
    pub fn delete_tag(&mut self, value: &str) -> TagEditorEvent {
        let before = self.tags.len();
        self.tags.retain(|tag| tag != value);
        debug!(%value, removed = before - self.tags.len(), "deleting tag");
        self.list.clamp(self.tags.len());
        self.updated()
    }

    /// Forward a change of the input's focus flag to the input core.
    pub fn sync_input_focus(&mut self) -> Outcome<TagEditorEvent> {
        let focused = self.f_input.get();
        if focused == self.input_focused {
            return Outcome::ignored();
        }
        self.input_focused = focused;
        let msg = if focused { InputMsg::Focus } else { InputMsg::Blur };
        self.update(TagEditorMsg::Input(msg))
    }

    /// The terminal window gained or lost focus.
    pub fn terminal_focus_changed(&mut self, gained: bool) -> Outcome<TagEditorEvent> {
        if !self.input_focused {
            return Outcome::ignored();
        }
        let msg = if gained { InputMsg::Focus } else { InputMsg::Blur };
        self.update(TagEditorMsg::Input(msg))
    }

    fn absorb_input(&mut self, input_outcome: Outcome<InputEvent>) -> Outcome<TagEditorEvent> {
        let mut outcome = Outcome {
            effects: input_outcome.effects,
            handled: input_outcome.handled,
            ..Outcome::default()
        };
        for event in input_outcome.events {
            match event {
                InputEvent::Changed(value) => {
                    self.value = value;
                }
                InputEvent::Submitted(value) => {
                    outcome = outcome.with_event(self.add_tag(value));
                    self.value.clear();
                    self.input.set_value("");
                }
            }
        }
        outcome
    }

    fn absorb_list(&mut self, list_outcome: Outcome<TagListEvent>) -> Outcome<TagEditorEvent> {
        let mut outcome = Outcome {
            effects: list_outcome.effects,
            handled: list_outcome.handled,
            ..Outcome::default()
        };
        for TagListEvent::Deleted(value) in list_outcome.events {
            outcome = outcome.with_event(self.delete_tag(&value));
        }
        outcome
    }

    fn updated(&self) -> TagEditorEvent {
        info!(count = self.tags.len(), "tags updated");
        TagEditorEvent::Updated { tags: self.tags.clone() }
    }
}

impl HasFocus for TagEditorState {
    fn build(&self, builder: &mut FocusBuilder) {
        let tag = builder.start(self);
        builder.leaf_widget(&self.f_input);
        builder.leaf_widget(&self.f_list);
        builder.end(tag);
    }

    fn focus(&self) -> FocusFlag {
        self.container.clone()
    }

    fn area(&self) -> Rect {
        Rect::default()
    }
}
