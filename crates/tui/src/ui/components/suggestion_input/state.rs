//! Text input core: field text, focus, dismissal and overlay visibility.
//!
//! The core translates terminal events into either overlay commands or
//! upward events. Every transition goes through [`SuggestionInputState::update`]
//! so the state machine can be exercised without a terminal.
//!
//! Key behaviors:
//! - `Changed` fires on every keystroke that alters the text and clears the
//!   dismissal flag.
//! - Enter submits only while the overlay is not shown; otherwise it applies
//!   the highlighted suggestion.
//! - Focus is lost only after a debounce from blur. Refocusing cancels the
//!   pending timer instead of letting it fire.
//! - Applying a suggestion dismisses the overlay and is reported as a plain
//!   `Changed`.

use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use quill_types::{
    BlurToken, ControlKind, DEFAULT_BLUR_DELAY, Effect, InputEvent, InputKind, Outcome, OverlayCommand, OverlayEvent,
};
use tracing::debug;

use crate::ui::components::common::TextInputState;
use crate::ui::components::suggestion_overlay::SuggestionOverlayState;

/// Messages accepted by the input core.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputMsg {
    /// A key press originating from `source`.
    Key { source: ControlKind, key: KeyEvent },
    Focus,
    Blur,
    /// The blur timer identified by the token fired.
    BlurElapsed(BlurToken),
    /// An event raised by the overlay.
    Overlay(OverlayEvent),
    /// Pointer activation of an overlay row.
    OverlayClick { row: usize, commit: bool },
}

#[derive(Clone, Debug)]
pub struct SuggestionInputState {
    /// Semantic kind of the field
    kind: InputKind,
    /// Hint shown while the field is empty
    placeholder: String,
    /// Whether suggestions are offered at all
    auto_complete: bool,
    /// Current field text and cursor
    text: TextInputState,
    /// True while the field has focus (cleared only after the blur debounce)
    has_focus: bool,
    /// The user closed the overlay for the current text
    auto_dismissed: bool,
    /// Debounce between blur and focus loss
    blur_delay: Duration,
    /// Timer currently scheduled to clear `has_focus`
    pending_blur: Option<BlurToken>,
    /// Source of fresh blur tokens
    next_blur_token: u64,
    /// Child suggestion overlay
    overlay: SuggestionOverlayState,
}

impl Default for SuggestionInputState {
    fn default() -> Self {
        Self::new(InputKind::Text)
    }
}

impl SuggestionInputState {
    pub fn new(kind: InputKind) -> Self {
        Self {
            kind,
            placeholder: String::new(),
            auto_complete: true,
            text: TextInputState::new(),
            has_focus: false,
            auto_dismissed: false,
            blur_delay: DEFAULT_BLUR_DELAY,
            pending_blur: None,
            next_blur_token: 0,
            overlay: SuggestionOverlayState::default(),
        }
    }

    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    pub fn with_auto_complete(mut self, enabled: bool) -> Self {
        self.auto_complete = enabled;
        self
    }

    pub fn with_blur_delay(mut self, delay: Duration) -> Self {
        self.blur_delay = delay;
        self
    }

    pub fn with_max_rows(mut self, max_rows: usize) -> Self {
        self.overlay.set_max_rows(max_rows);
        self
    }

    // ===== SELECTORS =====

    pub fn kind(&self) -> InputKind {
        self.kind
    }

    pub fn placeholder(&self) -> &str {
        &self.placeholder
    }

    pub fn value(&self) -> &str {
        self.text.input()
    }

    pub fn text(&self) -> &TextInputState {
        &self.text
    }

    pub fn auto_complete(&self) -> bool {
        self.auto_complete
    }

    pub fn has_focus(&self) -> bool {
        self.has_focus
    }

    pub fn is_auto_dismissed(&self) -> bool {
        self.auto_dismissed
    }

    pub fn pending_blur(&self) -> Option<BlurToken> {
        self.pending_blur
    }

    pub fn overlay(&self) -> &SuggestionOverlayState {
        &self.overlay
    }

    /// Whether suggestions may be offered for the current text.
    ///
    /// Derived on every call from the enable flag, the dismissal flag and the
    /// text; never stored.
    pub fn show_overlay(&self) -> bool {
        show_overlay(self.auto_complete, self.auto_dismissed, self.text.input())
    }

    /// Whether the overlay is actually shown: eligible and non-empty.
    pub fn is_overlay_shown(&self) -> bool {
        self.show_overlay() && !self.overlay.is_empty()
    }

    /// Whether the overlay is mounted on screen.
    pub fn is_overlay_visible(&self) -> bool {
        self.has_focus && self.is_overlay_shown()
    }

    // ===== PROPERTIES (one-way from the parent) =====

    /// Mirror an externally supplied value into the field without emitting
    /// `Changed`.
    pub fn set_value(&mut self, value: &str) {
        if self.text.input() == value {
            return;
        }
        self.text.replace(value);
        self.overlay.set_input(value);
    }

    pub fn set_auto_complete(&mut self, enabled: bool) {
        self.auto_complete = enabled;
    }

    pub fn set_placeholder(&mut self, placeholder: impl Into<String>) {
        self.placeholder = placeholder.into();
    }

    pub fn set_kind(&mut self, kind: InputKind) {
        self.kind = kind;
    }

    /// Deliver a new candidate set. May arrive at any time; last write wins.
    pub fn set_candidates(&mut self, candidates: Vec<String>) {
        self.overlay.set_candidates(candidates);
    }

    /// Return to the unmounted defaults, cancelling any pending blur timer.
    pub fn reset(&mut self) -> Vec<Effect> {
        let mut effects = Vec::new();
        if let Some(token) = self.pending_blur.take() {
            effects.push(Effect::CancelBlur(token));
        }
        self.text.clear();
        self.overlay.set_input("");
        self.has_focus = false;
        self.auto_dismissed = false;
        effects
    }

    // ===== REDUCER =====

    pub fn update(&mut self, msg: InputMsg) -> Outcome<InputEvent> {
        match msg {
            InputMsg::Key { source, key } => {
                if source != ControlKind::TextField || !self.has_focus {
                    return Outcome::ignored();
                }
                self.handle_key(key)
            }
            InputMsg::Focus => self.handle_focus(),
            InputMsg::Blur => self.handle_blur(),
            InputMsg::BlurElapsed(token) => self.handle_blur_elapsed(token),
            InputMsg::Overlay(event) => self.apply_overlay_event(event),
            InputMsg::OverlayClick { row, commit } => {
                if !self.is_overlay_visible() {
                    return Outcome::ignored();
                }
                let overlay_outcome = self.overlay.click_row(row, commit);
                self.apply_overlay_outcome(overlay_outcome)
            }
        }
    }

    fn handle_key(&mut self, key: KeyEvent) -> Outcome<InputEvent> {
        match key.code {
            KeyCode::Up => self.send_overlay_command(OverlayCommand::SelectUp),
            KeyCode::Down => self.send_overlay_command(OverlayCommand::SelectDown),
            KeyCode::Enter => {
                if self.is_overlay_shown() {
                    let overlay_outcome = self.overlay.handle_command(OverlayCommand::Select);
                    let mut outcome = self.apply_overlay_outcome(overlay_outcome);
                    outcome.handled = true;
                    outcome
                } else {
                    debug!(value = self.value(), "input submitted");
                    Outcome::handled().with_event(InputEvent::Submitted(self.value().to_string()))
                }
            }
            KeyCode::Esc => {
                if !self.is_overlay_shown() {
                    return Outcome::ignored();
                }
                self.auto_dismissed = true;
                Outcome::handled()
            }
            KeyCode::Char(c) if !key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) => {
                if !self.kind.accepts(c) {
                    return Outcome::handled();
                }
                self.text.insert_char(c);
                self.text_changed()
            }
            KeyCode::Backspace => {
                if self.text.backspace() {
                    self.text_changed()
                } else {
                    Outcome::handled()
                }
            }
            KeyCode::Delete => {
                if self.text.delete_forward() {
                    self.text_changed()
                } else {
                    Outcome::handled()
                }
            }
            KeyCode::Left => {
                self.text.move_left();
                Outcome::handled()
            }
            KeyCode::Right => {
                self.text.move_right();
                Outcome::handled()
            }
            KeyCode::Home => {
                self.text.move_home();
                Outcome::handled()
            }
            KeyCode::End => {
                self.text.move_end();
                Outcome::handled()
            }
            _ => Outcome::ignored(),
        }
    }

    /// Forward a navigation command while the overlay is shown.
    fn send_overlay_command(&mut self, command: OverlayCommand) -> Outcome<InputEvent> {
        if !self.is_overlay_shown() {
            return Outcome::ignored();
        }
        let overlay_outcome = self.overlay.handle_command(command);
        let mut outcome = self.apply_overlay_outcome(overlay_outcome);
        outcome.handled = true;
        outcome
    }

    /// Typing always re-opens eligibility for suggestions.
    fn text_changed(&mut self) -> Outcome<InputEvent> {
        self.auto_dismissed = false;
        self.overlay.set_input(self.text.input());
        Outcome::handled().with_event(InputEvent::Changed(self.value().to_string()))
    }

    fn handle_focus(&mut self) -> Outcome<InputEvent> {
        self.has_focus = true;
        self.auto_dismissed = false;
        let mut outcome = Outcome::handled();
        if let Some(token) = self.pending_blur.take() {
            debug!(?token, "refocused; cancelling pending blur");
            outcome = outcome.with_effect(Effect::CancelBlur(token));
        }
        outcome
    }

    fn handle_blur(&mut self) -> Outcome<InputEvent> {
        let mut outcome = Outcome::handled();
        if let Some(previous) = self.pending_blur.take() {
            outcome = outcome.with_effect(Effect::CancelBlur(previous));
        }
        self.next_blur_token += 1;
        let token = BlurToken(self.next_blur_token);
        self.pending_blur = Some(token);
        outcome.with_effect(Effect::ScheduleBlur {
            token,
            delay: self.blur_delay,
        })
    }

    fn handle_blur_elapsed(&mut self, token: BlurToken) -> Outcome<InputEvent> {
        if self.pending_blur != Some(token) {
            debug!(?token, "ignoring stale blur timer");
            return Outcome::ignored();
        }
        self.pending_blur = None;
        self.has_focus = false;
        Outcome::handled()
    }

    fn apply_overlay_outcome(&mut self, overlay_outcome: Outcome<OverlayEvent>) -> Outcome<InputEvent> {
        let mut outcome = Outcome {
            effects: overlay_outcome.effects,
            handled: overlay_outcome.handled,
            ..Outcome::default()
        };
        for event in overlay_outcome.events {
            outcome.merge(self.apply_overlay_event(event));
        }
        outcome
    }

    fn apply_overlay_event(&mut self, event: OverlayEvent) -> Outcome<InputEvent> {
        match event {
            OverlayEvent::SuggestionSelected(value) => {
                debug!(%value, "applying suggestion");
                self.auto_dismissed = true;
                self.text.replace(value.as_str());
                self.overlay.set_input(&value);
                Outcome::handled().with_event(InputEvent::Changed(value))
            }
            OverlayEvent::Submit => Outcome::handled().with_event(InputEvent::Submitted(self.value().to_string())),
        }
    }
}

/// `auto_complete && !auto_dismissed && !value.is_empty()`.
pub fn show_overlay(auto_complete: bool, auto_dismissed: bool, value: &str) -> bool {
    auto_complete && !auto_dismissed && !value.is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> InputMsg {
        InputMsg::Key {
            source: ControlKind::TextField,
            key: KeyEvent::new(code, KeyModifiers::NONE),
        }
    }

    fn type_text(st: &mut SuggestionInputState, text: &str) -> Vec<InputEvent> {
        text.chars().flat_map(|c| st.update(key(KeyCode::Char(c))).events).collect()
    }

    fn focused(candidates: &[&str]) -> SuggestionInputState {
        let mut st = SuggestionInputState::default();
        st.set_candidates(candidates.iter().map(|c| c.to_string()).collect());
        st.update(InputMsg::Focus);
        st
    }

    #[test]
    fn show_overlay_is_derived_from_flags_and_text() {
        for value in ["a", "veg", " ", "🙂"] {
            assert!(show_overlay(true, false, value));
        }
        for (auto_complete, dismissed) in [(true, false), (true, true), (false, false), (false, true)] {
            assert!(!show_overlay(auto_complete, dismissed, ""));
        }
        assert!(!show_overlay(false, false, "veg"));
        assert!(!show_overlay(true, true, "veg"));
    }

    #[test]
    fn every_keystroke_emits_changed() {
        let mut st = focused(&[]);
        let events = type_text(&mut st, "veg");
        assert_eq!(
            events,
            vec![
                InputEvent::Changed("v".into()),
                InputEvent::Changed("ve".into()),
                InputEvent::Changed("veg".into()),
            ]
        );
        let outcome = st.update(key(KeyCode::Backspace));
        assert_eq!(outcome.events, vec![InputEvent::Changed("ve".into())]);
        st.update(key(KeyCode::Home));
        let outcome = st.update(key(KeyCode::Backspace));
        assert!(outcome.events.is_empty());
    }

    #[test]
    fn keys_are_ignored_without_focus_or_from_other_controls() {
        let mut st = SuggestionInputState::default();
        assert!(!st.update(key(KeyCode::Char('a'))).handled);
        assert_eq!(st.value(), "");

        st.update(InputMsg::Focus);
        let outcome = st.update(InputMsg::Key {
            source: ControlKind::TagList,
            key: KeyEvent::new(KeyCode::Char('a'), KeyModifiers::NONE),
        });
        assert!(!outcome.handled);
        assert_eq!(st.value(), "");
    }

    #[test]
    fn enter_with_overlay_hidden_submits_once() {
        let mut st = focused(&[]);
        type_text(&mut st, "veg");
        assert!(st.show_overlay());
        assert!(!st.is_overlay_shown());

        let outcome = st.update(key(KeyCode::Enter));
        assert!(outcome.handled);
        assert_eq!(outcome.events, vec![InputEvent::Submitted("veg".into())]);
    }

    #[test]
    fn enter_with_overlay_shown_applies_suggestion() {
        let mut st = focused(&["apple", "apricot"]);
        type_text(&mut st, "ap");
        assert!(st.is_overlay_shown());

        assert!(st.update(key(KeyCode::Down)).handled);
        assert_eq!(st.overlay().highlighted(), 1);

        let outcome = st.update(key(KeyCode::Enter));
        assert_eq!(outcome.events, vec![InputEvent::Changed("apricot".into())]);
        assert!(st.is_auto_dismissed());
        assert!(!st.show_overlay());
        assert_eq!(st.value(), "apricot");
    }

    #[test]
    fn applying_same_suggestion_twice_is_idempotent() {
        let mut st = focused(&["apple"]);
        type_text(&mut st, "ap");
        for _ in 0..2 {
            let outcome = st.update(InputMsg::Overlay(OverlayEvent::SuggestionSelected("apple".into())));
            assert_eq!(outcome.events, vec![InputEvent::Changed("apple".into())]);
            assert!(st.is_auto_dismissed());
            assert_eq!(st.value(), "apple");
        }
    }

    #[test]
    fn arrows_without_overlay_are_not_consumed() {
        let mut st = focused(&["apple"]);
        type_text(&mut st, "zz");
        assert!(!st.update(key(KeyCode::Up)).handled);
        assert!(!st.update(key(KeyCode::Down)).handled);
    }

    #[test]
    fn typing_after_dismissal_restores_eligibility() {
        let mut st = focused(&["apple", "apricot"]);
        type_text(&mut st, "ap");
        assert!(st.update(key(KeyCode::Esc)).handled);
        assert!(st.is_auto_dismissed());
        assert!(!st.show_overlay());

        type_text(&mut st, "r");
        assert!(!st.is_auto_dismissed());
        assert!(st.show_overlay());
        assert!(st.is_overlay_shown());
    }

    #[test]
    fn focus_clears_dismissal() {
        let mut st = focused(&["apple"]);
        type_text(&mut st, "ap");
        st.update(key(KeyCode::Esc));
        st.update(InputMsg::Focus);
        assert!(st.show_overlay());
    }

    #[test]
    fn blur_is_debounced_and_cancelled_on_refocus() {
        let mut st = focused(&[]).with_blur_delay(Duration::from_millis(200));
        let outcome = st.update(InputMsg::Blur);
        let token = st.pending_blur().expect("blur scheduled");
        assert_eq!(
            outcome.effects,
            vec![Effect::ScheduleBlur {
                token,
                delay: Duration::from_millis(200)
            }]
        );
        assert!(st.has_focus());

        let outcome = st.update(InputMsg::Focus);
        assert_eq!(outcome.effects, vec![Effect::CancelBlur(token)]);

        // A timer that raced the cancellation must not hide the field.
        assert!(!st.update(InputMsg::BlurElapsed(token)).handled);
        assert!(st.has_focus());
    }

    #[test]
    fn blur_elapsed_clears_focus() {
        let mut st = focused(&["apple"]);
        type_text(&mut st, "ap");
        assert!(st.is_overlay_visible());
        st.update(InputMsg::Blur);
        let token = st.pending_blur().expect("blur scheduled");
        st.update(InputMsg::BlurElapsed(token));
        assert!(!st.has_focus());
        assert!(!st.is_overlay_visible());
        assert!(st.pending_blur().is_none());
    }

    #[test]
    fn second_blur_replaces_the_first_timer() {
        let mut st = focused(&[]);
        st.update(InputMsg::Blur);
        let first = st.pending_blur().expect("first");
        let outcome = st.update(InputMsg::Blur);
        let second = st.pending_blur().expect("second");
        assert_ne!(first, second);
        assert_eq!(outcome.effects[0], Effect::CancelBlur(first));
        st.update(InputMsg::BlurElapsed(first));
        assert!(st.has_focus());
    }

    #[test]
    fn overlay_click_during_blur_window_registers() {
        let mut st = focused(&["apple", "apricot"]);
        type_text(&mut st, "ap");
        st.update(InputMsg::Blur);

        let outcome = st.update(InputMsg::OverlayClick { row: 1, commit: false });
        assert_eq!(outcome.events, vec![InputEvent::Changed("apricot".into())]);
        assert!(st.is_auto_dismissed());
    }

    #[test]
    fn overlay_click_with_commit_submits_applied_value() {
        let mut st = focused(&["apple", "apricot"]);
        type_text(&mut st, "ap");
        let outcome = st.update(InputMsg::OverlayClick { row: 0, commit: true });
        assert_eq!(
            outcome.events,
            vec![InputEvent::Changed("apple".into()), InputEvent::Submitted("apple".into())]
        );
    }

    #[test]
    fn external_value_is_mirrored_without_events() {
        let mut st = focused(&["apple"]);
        st.set_value("ap");
        assert_eq!(st.value(), "ap");
        assert_eq!(st.text().cursor(), 2);
        assert!(st.is_overlay_shown());
    }

    #[test]
    fn number_fields_swallow_letters() {
        let mut st = SuggestionInputState::new(InputKind::Number);
        st.update(InputMsg::Focus);
        let events = type_text(&mut st, "1a2");
        assert_eq!(events, vec![InputEvent::Changed("1".into()), InputEvent::Changed("12".into())]);
    }

    #[test]
    fn reset_cancels_pending_blur() {
        let mut st = focused(&[]);
        type_text(&mut st, "veg");
        st.update(InputMsg::Blur);
        let token = st.pending_blur().expect("pending");
        assert_eq!(st.reset(), vec![Effect::CancelBlur(token)]);
        assert_eq!(st.value(), "");
        assert!(!st.has_focus());
    }

    #[test]
    fn disabled_auto_complete_never_shows_overlay() {
        let mut st = focused(&["apple"]).with_auto_complete(false);
        type_text(&mut st, "ap");
        assert!(!st.is_overlay_shown());
        let outcome = st.update(key(KeyCode::Enter));
        assert_eq!(outcome.events, vec![InputEvent::Submitted("ap".into())]);
    }
}
