//! Application state for the tag editor TUI.
//!
//! `App` owns the tag editor reducer, the active theme and the focus tree. All
//! state changes go through [`App::dispatch`], which logs the editor's upward
//! events and hands the resulting side effects to the runtime.

use std::rc::Rc;

use quill_types::{Effect, Outcome, TagEditorEvent};
use quill_util::AppConfig;
use rat_focus::{Focus, FocusBuilder, FocusFlag, HasFocus};
use ratatui::layout::Rect;
use tracing::{debug, info};

use crate::ui::components::suggestion_input::SuggestionInputState;
use crate::ui::components::tag_editor::{TagEditorMsg, TagEditorState};
use crate::ui::theme::{self, Theme};

pub struct App {
    /// Tag collection editor and its input core
    pub editor: TagEditorState,
    /// Active palette
    pub theme: Box<dyn Theme>,
    /// Focus tree, rebuilt before every render
    pub focus: Rc<Focus>,
    /// Set once the user asked to leave
    pub should_quit: bool,
    /// Number of `Updated` events published so far
    updates: usize,
    container: FocusFlag,
}

impl App {
    pub fn new(config: &AppConfig, tags: Vec<String>) -> Self {
        let input = SuggestionInputState::new(config.input_kind)
            .with_placeholder(config.placeholder.clone())
            .with_auto_complete(config.auto_complete)
            .with_blur_delay(config.blur_delay())
            .with_max_rows(config.max_rows);
        let mut app = Self {
            editor: TagEditorState::new(tags, input),
            theme: theme::load(),
            focus: Rc::new(Focus::default()),
            should_quit: false,
            updates: 0,
            container: FocusFlag::named("quill.app"),
        };
        app.focus = Rc::new(FocusBuilder::rebuild_for(&app, None));
        app
    }

    // ===== SELECTORS =====

    pub fn tags(&self) -> &[String] {
        self.editor.tags()
    }

    pub fn updates(&self) -> usize {
        self.updates
    }

    // ===== REDUCERS =====

    /// Route a message into the editor and publish its events.
    pub fn dispatch(&mut self, msg: TagEditorMsg) -> Vec<Effect> {
        let outcome = self.editor.update(msg);
        self.publish(outcome)
    }

    /// Forward any focus movement made through `self.focus` to the input core.
    pub fn sync_focus(&mut self) -> Vec<Effect> {
        let outcome = self.editor.sync_input_focus();
        self.publish(outcome)
    }

    /// The terminal window gained or lost focus.
    pub fn terminal_focus_changed(&mut self, gained: bool) -> Vec<Effect> {
        let outcome = self.editor.terminal_focus_changed(gained);
        self.publish(outcome)
    }

    /// Deliver a candidate set to the overlay. Last write wins.
    pub fn set_candidates(&mut self, candidates: Vec<String>) {
        debug!(count = candidates.len(), "candidates delivered");
        self.editor.input_mut().set_candidates(candidates);
    }

    /// Give keyboard focus to the tag input.
    pub fn focus_input(&mut self) -> Vec<Effect> {
        self.focus.focus(&self.editor.f_input);
        self.sync_focus()
    }

    /// Give keyboard focus to the tag list.
    pub fn focus_list(&mut self) -> Vec<Effect> {
        self.focus.focus(&self.editor.f_list);
        self.sync_focus()
    }

    pub fn quit(&mut self) -> Vec<Effect> {
        self.should_quit = true;
        let mut effects = self.editor.input_mut().reset();
        effects.push(Effect::Quit);
        effects
    }

    fn publish(&mut self, outcome: Outcome<TagEditorEvent>) -> Vec<Effect> {
        for event in outcome.events {
            match event {
                TagEditorEvent::Updated { tags } => {
                    self.updates += 1;
                    info!(?tags, "tag set updated");
                }
            }
        }
        outcome.effects
    }
}

impl HasFocus for App {
    fn build(&self, builder: &mut FocusBuilder) {
        let tag = builder.start(self);
        builder.widget(&self.editor);
        builder.end(tag);
    }

    fn focus(&self) -> FocusFlag {
        self.container.clone()
    }

    fn area(&self) -> Rect {
        Rect::default()
    }
}
